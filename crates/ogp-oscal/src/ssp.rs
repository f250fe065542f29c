//! # System Security Plan
//!
//! Read model for the parts of an OSCAL SSP a reviewer looks at: metadata,
//! system-characteristics props, components, implemented requirements with
//! their statements, and back-matter resources (evidence).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OscalResult;
use crate::DEFAULT_OSCAL_VERSION;

/// Root wrapper: `{"system-security-plan": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SspDocument {
    #[serde(rename = "system-security-plan", default)]
    pub plan: SystemSecurityPlan,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SystemSecurityPlan {
    pub uuid: Option<String>,
    pub metadata: Metadata,
    pub system_characteristics: SystemCharacteristics,
    pub system_implementation: SystemImplementation,
    pub control_implementation: ControlImplementation,
    pub back_matter: BackMatter,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Metadata {
    pub title: Option<String>,
    pub version: Option<String>,
    pub oscal_version: Option<String>,
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SystemCharacteristics {
    pub system_name: Option<String>,
    pub props: Vec<Property>,
}

/// A `{name, value}` property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemImplementation {
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    pub uuid: Option<String>,
    #[serde(rename = "type")]
    pub component_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ComponentStatus>,
}

impl Component {
    /// The component's status state, `unknown` when absent.
    pub fn state(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.state.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentStatus {
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ControlImplementation {
    pub implemented_requirements: Vec<ImplementedRequirement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ImplementedRequirement {
    pub uuid: Option<String>,
    pub control_id: String,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Statement {
    pub uuid: Option<String>,
    pub statement_id: String,
    pub description: Option<String>,
    pub by_components: Vec<ByComponent>,
    pub related_resources: Vec<RelatedResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ByComponent {
    pub uuid: Option<String>,
    pub component_uuid: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RelatedResource {
    pub resource_uuid: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackMatter {
    pub resources: Vec<Resource>,
}

/// A back-matter resource, typically a piece of evidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub uuid: String,
    pub title: Option<String>,
    pub rlinks: Vec<Rlink>,
    pub hashes: Vec<ResourceHash>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Rlink {
    pub href: String,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceHash {
    pub algorithm: String,
    pub value: String,
}

/// A statement located by its control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatementRef {
    pub control_id: String,
    pub statement_id: String,
}

/// Overview figures for an SSP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SspSummary {
    pub title: String,
    pub version: String,
    pub oscal_version: String,
    pub last_modified: Option<String>,
    pub implemented_requirements: usize,
    pub components: usize,
    pub statements: Vec<StatementRef>,
    pub resources: usize,
}

impl SspDocument {
    /// Deserialize from an already parsed JSON value.
    pub fn from_value(value: Value) -> OscalResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Look up a system-characteristics prop value by name.
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.plan
            .system_characteristics
            .props
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Every statement of every implemented requirement, in document order.
    pub fn statements(&self) -> impl Iterator<Item = StatementRef> + '_ {
        self.plan
            .control_implementation
            .implemented_requirements
            .iter()
            .flat_map(|ir| {
                ir.statements.iter().map(move |s| StatementRef {
                    control_id: ir.control_id.clone(),
                    statement_id: s.statement_id.clone(),
                })
            })
    }

    pub fn summary(&self) -> SspSummary {
        let metadata = &self.plan.metadata;
        SspSummary {
            title: metadata.title.clone().unwrap_or_else(|| "SSP".to_string()),
            version: metadata.version.clone().unwrap_or_else(|| "-".to_string()),
            oscal_version: metadata
                .oscal_version
                .clone()
                .unwrap_or_else(|| DEFAULT_OSCAL_VERSION.to_string()),
            last_modified: metadata.last_modified.clone(),
            implemented_requirements: self
                .plan
                .control_implementation
                .implemented_requirements
                .len(),
            components: self.plan.system_implementation.components.len(),
            statements: self.statements().collect(),
            resources: self.plan.back_matter.resources.len(),
        }
    }
}

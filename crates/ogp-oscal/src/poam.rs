//! # Plan of Action & Milestones
//!
//! Read model for POA&M items: what is planned, its status, its risk score
//! (a `risk-score` prop on the item's risk), and scheduled milestones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OscalResult;
use crate::ssp::{Metadata, Property};

/// Status reported for items that do not declare one.
pub const DEFAULT_ITEM_STATUS: &str = "planned";

/// Root wrapper: `{"plan-of-action-and-milestones": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoamDocument {
    #[serde(rename = "plan-of-action-and-milestones", default)]
    pub plan: PlanOfActionAndMilestones,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PlanOfActionAndMilestones {
    pub uuid: Option<String>,
    pub metadata: Metadata,
    pub poam_items: Vec<PoamItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoamItem {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub risk: Option<Risk>,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    pub props: Vec<Property>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Milestone {
    pub title: Option<String>,
    pub scheduled_completion_date: Option<String>,
}

impl PoamItem {
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_ITEM_STATUS)
    }

    /// Value of the `risk-score` prop, if any.
    pub fn risk_score(&self) -> Option<&str> {
        self.risk
            .as_ref()?
            .props
            .iter()
            .find(|p| p.name == "risk-score")
            .map(|p| p.value.as_str())
    }
}

/// One line of a POA&M overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PoamItemSummary {
    pub title: String,
    pub status: String,
    pub risk_score: Option<String>,
    pub milestones: Vec<String>,
}

/// Overview of a POA&M.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PoamSummary {
    pub title: String,
    pub items: Vec<PoamItemSummary>,
}

impl PoamDocument {
    pub fn from_value(value: Value) -> OscalResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn summary(&self) -> PoamSummary {
        let items = self
            .plan
            .poam_items
            .iter()
            .map(|item| PoamItemSummary {
                title: item.title.clone().unwrap_or_default(),
                status: item.status().to_string(),
                risk_score: item.risk_score().map(str::to_string),
                milestones: item
                    .milestones
                    .iter()
                    .map(|m| match &m.scheduled_completion_date {
                        Some(date) => format!("{} ({date})", m.title.as_deref().unwrap_or("")),
                        None => m.title.clone().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        PoamSummary {
            title: self
                .plan
                .metadata
                .title
                .clone()
                .unwrap_or_else(|| "POA&M".to_string()),
            items,
        }
    }
}

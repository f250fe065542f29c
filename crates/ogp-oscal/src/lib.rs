//! # ogp-oscal: OSCAL Documents
//!
//! Typed views over the OSCAL 1.1 documents compliance teams work with, and
//! the bridge from mapping output into a System Security Plan.
//!
//! - [`ssp`]: System Security Plan read model and [`SspSummary`].
//! - [`poam`]: Plan of Action & Milestones read model and [`PoamSummary`].
//! - [`props`]: write mapped fields into
//!   `system-security-plan.system-characteristics.props`.
//! - [`participants`]: internal lanes and external recipients of a BPMN
//!   export, folded into the pending props.
//!
//! The read models are lenient: every field defaults, so partially filled
//! templates still load. The property filler works on `serde_json::Value`
//! so fields the read model does not cover survive a round trip.

pub mod error;
pub mod participants;
pub mod poam;
pub mod props;
pub mod ssp;

pub use error::OscalError;
pub use poam::{PoamDocument, PoamSummary};
pub use participants::{ProcessParticipants, RECIPIENT_GROUP_SEPARATOR};
pub use props::{
    apply_props, write_props, PropBindings, PropValues, PropsReport, DEFAULT_SEPARATOR,
};
pub use ssp::{SspDocument, SspSummary};

/// OSCAL version assumed when a document does not declare one.
pub const DEFAULT_OSCAL_VERSION: &str = "1.1.2";

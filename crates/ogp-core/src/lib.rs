//! # ogp-core: Foundational Types for the OpenGov Privacy Toolkit
//!
//! Every other crate in the workspace depends on `ogp-core`; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! - [`error`]: the top-level `OgpError` and file-loading `DocumentError`.
//! - [`temporal`]: `Timestamp`, a UTC-only, seconds-precision instant used
//!   for OSCAL `last-modified` stamps.
//! - [`parser`]: YAML/JSON text parsing into `serde_json::Value`, the single
//!   value model shared by source documents, rule sets, and OSCAL files.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ogp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod parser;
pub mod temporal;

pub use error::{DocumentError, OgpError};
pub use parser::{load_json_value, load_yaml_as_value, parse_yaml_str, yaml_to_json_value};
pub use temporal::Timestamp;

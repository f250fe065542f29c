//! # Last-Modified Stamps
//!
//! OSCAL `metadata.last-modified` values written by the toolkit are UTC,
//! whole seconds, and end in `Z` (`2026-10-18T09:30:00Z`). [`Timestamp`]
//! holds exactly that: anything finer than a second is dropped on
//! construction, and only `Z`-suffixed input is accepted when parsing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OgpError;

/// A UTC instant with seconds precision. Serializes as its `Z` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap a UTC datetime, dropping sub-second digits.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(0))
    }

    /// Parse an RFC 3339 string in UTC. Explicit offsets, even `+00:00`,
    /// are rejected so stamps round-trip byte for byte.
    pub fn parse(s: &str) -> Result<Self, OgpError> {
        if !s.ends_with('Z') {
            return Err(OgpError::InvalidTimestamp(format!(
                "{s:?} is not UTC; expected a trailing Z"
            )));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self::from_utc(dt.with_timezone(&Utc)))
            .map_err(|e| OgpError::InvalidTimestamp(format!("{s:?}: {e}")))
    }

    /// The stamp as written into OSCAL documents.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl FromStr for Timestamp {
    type Err = OgpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = OgpError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_iso8601()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

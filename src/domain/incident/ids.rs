//! Incident identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::InvalidIncidentId;

/// Identifier of a traffic incident row.
///
/// Assigned by the ingestion pipeline (a Postgres `SERIAL`), so it is always
/// a positive 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(i32);

impl IncidentId {
    /// Creates an id, rejecting zero and negative values.
    pub fn new(value: i32) -> Result<Self, InvalidIncidentId> {
        if value <= 0 {
            return Err(InvalidIncidentId(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IncidentId {
    type Err = InvalidIncidentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i32>()
            .map_err(|_| InvalidIncidentId(s.to_string()))?;
        Self::new(value)
    }
}

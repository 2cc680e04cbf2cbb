//! Result-count limit for list queries

use serde::{Deserialize, Serialize};

/// Rows returned when the caller doesn't say
const DEFAULT_LIMIT: u32 = 10;

/// Row cap for list and search queries, bound as SQL `LIMIT` unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Limit(u32);

impl Limit {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Value to bind for SQL `LIMIT`.
    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl From<u32> for Limit {
    fn from(n: u32) -> Self {
        Self::new(n)
    }
}

impl From<Limit> for u32 {
    fn from(limit: Limit) -> Self {
        limit.0
    }
}

impl From<Option<u32>> for Limit {
    fn from(n: Option<u32>) -> Self {
        n.map(Self::new).unwrap_or_default()
    }
}

//! Human-readable document numbers.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Human-readable sequence id, unique per document, immutable once assigned.
///
/// Format: `PREFIX-YYYYMM-NNNNNN` (e.g. `REC-202608-000042`), with a
/// per-kind monotonic sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn generate(prefix: &str, sequence: u64, at: DateTime<Utc>) -> Self {
        Self(format!(
            "{prefix}-{:04}{:02}-{sequence:06}",
            at.year(),
            at.month()
        ))
    }

    /// Number for a manual balance correction (no backing document).
    pub fn manual(at: DateTime<Utc>) -> Self {
        Self(format!("MANUAL-{}", at.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

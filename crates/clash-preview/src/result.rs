//! Preview output.

use serde::{Deserialize, Serialize};

/// Forecast of a destructive command's effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    /// Number of affected items.
    pub count: usize,
    /// Up to `preview_sample` item identifiers.
    pub sample: Vec<String>,
    /// What the simulation did.
    pub note: String,
    /// Why the simulation could not be computed, if it could not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PreviewResult {
    /// A successful preview built from affected item identifiers.
    ///
    /// Every item counts; only the first `sample_limit` are kept.
    #[must_use]
    pub fn from_items<I>(items: I, sample_limit: usize, note: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut count: usize = 0;
        let mut sample = Vec::new();
        for item in items {
            count = count.saturating_add(1);
            if sample.len() < sample_limit {
                sample.push(item);
            }
        }
        Self {
            count,
            sample,
            note: note.into(),
            error: None,
        }
    }

    /// A preview that could not be computed.
    #[must_use]
    pub fn failed(note: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            count: 0,
            sample: Vec::new(),
            note: note.into(),
            error: Some(error.into()),
        }
    }

    /// Whether the simulation failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

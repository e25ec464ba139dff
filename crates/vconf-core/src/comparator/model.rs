//! Comparator input options and output types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The differing portions of a current/desired configuration pair.
///
/// Both sides are `None` when the inputs are equivalent. Otherwise each side
/// holds a value of the same shape as its input, reduced to the differing
/// keys or elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigDiff {
    /// Differing portion of the current (live) configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Value>,
    /// Differing portion of the desired configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<Value>,
}

impl ConfigDiff {
    /// The "no drift" diff.
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn between(current: Value, desired: Value) -> Self {
        Self {
            current: Some(current),
            desired: Some(desired),
        }
    }

    /// True when the compared values were equivalent.
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.desired.is_none()
    }

    /// Split into `(current, desired)`.
    pub fn into_parts(self) -> (Option<Value>, Option<Value>) {
        (self.current, self.desired)
    }
}

/// How sequences are compared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ListComparison {
    /// Order-insensitive membership comparison; duplicates are ignored
    #[default]
    AsSet,
    /// Sequences of mappings paired up by the value stored under `key`
    Identifier { key: String },
    /// Position-wise comparison; any difference reports both whole sequences
    Ordered,
}

/// Options carried by a [`Comparator`](crate::comparator::Comparator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    #[serde(default)]
    pub list_comparison: ListComparison,
}

impl CompareOptions {
    pub fn with_list_comparison(mut self, list_comparison: ListComparison) -> Self {
        self.list_comparison = list_comparison;
        self
    }
}

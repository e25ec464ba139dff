//! Compliance and remediation result types.
//!
//! Serialized field names and status strings are the stable contract
//! consumed by orchestration code.

use crate::comparator::ConfigDiff;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Failed,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "COMPLIANT",
            ComplianceStatus::NonCompliant => "NON_COMPLIANT",
            ComplianceStatus::Failed => "FAILED",
        }
    }
}

/// Outcome of `check_compliance`.
///
/// `current`/`desired` are set only for `NON_COMPLIANT`; `errors` only for
/// `FAILED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub status: ComplianceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ComplianceResult {
    pub fn compliant() -> Self {
        Self {
            status: ComplianceStatus::Compliant,
            current: None,
            desired: None,
            errors: Vec::new(),
        }
    }

    pub fn non_compliant(current: Option<Value>, desired: Option<Value>) -> Self {
        Self {
            status: ComplianceStatus::NonCompliant,
            current,
            desired,
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            status: ComplianceStatus::Failed,
            current: None,
            desired: None,
            errors,
        }
    }

    /// `COMPLIANT` for an empty diff, otherwise `NON_COMPLIANT` carrying it.
    pub fn from_diff(diff: ConfigDiff) -> Self {
        if diff.is_empty() {
            Self::compliant()
        } else {
            let (current, desired) = diff.into_parts();
            Self::non_compliant(current, desired)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemediateStatus {
    Success,
    Skipped,
    Failed,
}

impl RemediateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediateStatus::Success => "SUCCESS",
            RemediateStatus::Skipped => "SKIPPED",
            RemediateStatus::Failed => "FAILED",
        }
    }
}

/// Outcome of `remediate`. `old`/`new` hold the drift that was corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediateResult {
    pub status: RemediateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl RemediateResult {
    pub fn success(old: Option<Value>, new: Option<Value>) -> Self {
        Self {
            status: RemediateStatus::Success,
            old,
            new,
            errors: Vec::new(),
        }
    }

    pub fn skipped(errors: Vec<String>) -> Self {
        Self {
            status: RemediateStatus::Skipped,
            old: None,
            new: None,
            errors,
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            status: RemediateStatus::Failed,
            old: None,
            new: None,
            errors,
        }
    }
}

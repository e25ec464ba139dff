//! vconf core - configuration compliance framework
//!
//! This crate provides the building blocks shared by every configuration
//! controller:
//! - A structural comparator that reports drift between current and desired
//!   JSON-like configuration, with set semantics for lists
//! - A bounded task executor that runs I/O-bound controller work on a fixed
//!   pool of worker threads, falling back to inline execution when saturated
//! - The controller contract with compliance checking and remediation
//! - Error, logging and configuration facilities used throughout

pub mod comparator;
pub mod config;
pub mod controller;
pub mod errors;
pub mod logging_facility;
pub mod task;

// Field names used by the logging macros
pub use vconf_core_types::schema;

// Re-export commonly used types
pub use comparator::{get_non_compliant_configs, Comparator, ConfigDiff, ListComparison};
pub use config::FrameworkConfig;
pub use controller::{
    ComplianceResult, ComplianceStatus, Controller, RemediateResult, RemediateStatus,
};
pub use errors::{ComplianceError, ExError, ExErrorKind, Result};
pub use task::{Dispatch, TaskExecutor, TaskHandle};
pub use vconf_core_types::{PoolId, TaskId};

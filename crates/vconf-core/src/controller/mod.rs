//! Uniform controller contract.
//!
//! A controller owns one configuration item on one kind of managed product.
//! Implementors supply `get` and `set`; compliance checking and remediation
//! are provided on top of the [comparator](crate::comparator).

pub mod contract;
pub mod result;

pub use contract::{Controller, CONTROL_ALREADY_COMPLIANT};
pub use result::{ComplianceResult, ComplianceStatus, RemediateResult, RemediateStatus};

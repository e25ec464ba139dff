//! The controller trait and its provided compliance operations.

use crate::comparator::Comparator;
use crate::controller::result::{ComplianceResult, ComplianceStatus, RemediateResult};
use crate::errors::Result;
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::time::Instant;

/// Error reported by `remediate` when there is nothing to change
pub const CONTROL_ALREADY_COMPLIANT: &str = "Control already compliant";

/// Knowledge of a single configuration item.
///
/// `Context` carries whatever the implementation needs to reach the product
/// (a host connection, an API session). Implementations only provide
/// [`get`](Self::get) and [`set`](Self::set); the provided methods implement
/// the compliance contract.
pub trait Controller: Send + Sync {
    type Context;

    /// Stable name used in logs and errors
    fn name(&self) -> &str;

    /// Read the current configuration.
    ///
    /// # Errors
    ///
    /// Implementations return `GetFailed` when the product cannot be queried.
    fn get(&self, context: &Self::Context) -> Result<Value>;

    /// Apply the desired configuration.
    ///
    /// # Errors
    ///
    /// Implementations return `SetFailed` when the product rejects the change.
    fn set(&self, context: &Self::Context, desired: &Value) -> Result<()>;

    /// Comparator used by [`check_compliance`](Self::check_compliance).
    fn comparator(&self) -> Comparator {
        Comparator::default()
    }

    /// Values filled into both sides before comparison.
    fn defaults(&self) -> Option<Value> {
        None
    }

    /// Compare the current configuration against `desired`.
    fn check_compliance(&self, context: &Self::Context, desired: &Value) -> ComplianceResult {
        let start = Instant::now();
        log_op_start!("controller.check_compliance", controller = self.name());

        let current = match self.get(context) {
            Ok(current) => current,
            Err(err) => {
                let message = err.to_string();
                log_op_error!(
                    "controller.check_compliance",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    controller = self.name()
                );
                return ComplianceResult::failed(vec![message]);
            }
        };

        let comparator = self.comparator();
        let diff = match self.defaults() {
            Some(defaults) => comparator.diff_with_defaults(&current, desired, &defaults),
            None => comparator.diff(&current, desired),
        };
        let result = ComplianceResult::from_diff(diff);

        log_op_end!(
            "controller.check_compliance",
            duration_ms = start.elapsed().as_millis() as u64,
            controller = self.name(),
            status = result.status.as_str()
        );
        result
    }

    /// Bring the product in line with `desired` when it has drifted.
    fn remediate(&self, context: &Self::Context, desired: &Value) -> RemediateResult {
        let start = Instant::now();
        log_op_start!("controller.remediate", controller = self.name());

        let check = self.check_compliance(context, desired);
        let result = match check.status {
            ComplianceStatus::Compliant => {
                RemediateResult::skipped(vec![CONTROL_ALREADY_COMPLIANT.to_string()])
            }
            ComplianceStatus::Failed => RemediateResult::failed(check.errors),
            ComplianceStatus::NonCompliant => match self.set(context, desired) {
                Ok(()) => RemediateResult::success(check.current, check.desired),
                Err(err) => {
                    let message = err.to_string();
                    log_op_error!(
                        "controller.remediate",
                        err,
                        duration_ms = start.elapsed().as_millis() as u64,
                        controller = self.name()
                    );
                    return RemediateResult::failed(vec![message]);
                }
            },
        };

        log_op_end!(
            "controller.remediate",
            duration_ms = start.elapsed().as_millis() as u64,
            controller = self.name(),
            status = result.status.as_str()
        );
        result
    }
}

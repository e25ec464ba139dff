//! Structured logging for vconf
//!
//! - [`init`] installs the process subscriber for a [`Profile`]
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` bracket operations with
//!   the canonical fields from [`schema`](crate::schema)
//! - [`test_capture`] records events in memory so tests can assert on them
//!
//! Executor and controller operations are logged through these macros; the
//! per-task dispatch decision is logged at debug level.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

//! Operation boundary macros
//!
//! Every operation logs one `start` event and exactly one of `end` or
//! `end_error`. The `component` field is the calling module's path.

/// Shared emitter for the boundary macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation, with optional extra fields.
///
/// ```
/// # use vconf_core::log_op_start;
/// log_op_start!("executor.configure");
/// log_op_start!("executor.configure", workers = 4);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, $crate::schema::event::START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation. `duration_ms` is required.
///
/// ```
/// # use vconf_core::log_op_end;
/// log_op_end!("executor.configure", duration_ms = 3, reused = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::schema::event::END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log the failed end of an operation.
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind and stable code are attached as `err.kind` and `err.code`.
///
/// ```
/// # use vconf_core::{log_op_error, errors::ComplianceError};
/// let err = ComplianceError::InvalidWorkerCount { requested: 0 };
/// log_op_error!("executor.configure", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = ::core::convert::Into::into($err);
        $crate::__log_op_event!(
            error,
            $op,
            $crate::schema::event::END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}

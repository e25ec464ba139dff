//! Field keys and values shared by every structured log line.
//!
//! Field names are identifiers inside the `tracing` macros; these constants are
//! what consumers of captured or JSON output match on.

/// Keys carried by operation boundary events
pub mod field {
    pub const COMPONENT: &str = "component";
    pub const OP: &str = "op";
    pub const EVENT: &str = "event";
    pub const DURATION_MS: &str = "duration_ms";

    pub const TASK_ID: &str = "task_id";
    pub const POOL_ID: &str = "pool_id";
    pub const WORKERS: &str = "workers";
    pub const DISPATCH: &str = "dispatch";

    pub const CONTROLLER: &str = "controller";
    pub const STATUS: &str = "status";

    pub const ERR_KIND: &str = "err.kind";
    pub const ERR_CODE: &str = "err.code";

    /// Every key above
    pub const ALL: &[&str] = &[
        COMPONENT,
        OP,
        EVENT,
        DURATION_MS,
        TASK_ID,
        POOL_ID,
        WORKERS,
        DISPATCH,
        CONTROLLER,
        STATUS,
        ERR_KIND,
        ERR_CODE,
    ];
}

/// Values of [`field::EVENT`]
pub mod event {
    pub const START: &str = "start";
    pub const END: &str = "end";
    pub const END_ERROR: &str = "end_error";
}

/// Values of [`field::DISPATCH`]
pub mod dispatch {
    pub const WORKER: &str = "worker";
    pub const INLINE: &str = "inline";
}

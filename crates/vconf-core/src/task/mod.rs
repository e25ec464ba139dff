//! Bounded concurrent task execution.
//!
//! A [`TaskExecutor`] owns one fixed-size worker pool. Submitting work either
//! dispatches it to an idle worker or, when every worker is busy, runs it
//! inline on the calling thread. Admission never blocks and never queues
//! beyond the number of workers, so a worker that submits and waits on a
//! child task cannot deadlock the pool.
//!
//! ## Lifecycle
//!
//! ```text
//! Unconfigured ──configure(N) / first submit──▶ Configured(N)
//! Configured(N) ──configure(N)──▶ Configured(N)      (no-op, same pool)
//! Configured(N) ──configure(M)──▶ Configured(M)      (old pool drains)
//! Configured(N) ──shutdown──▶ Shutdown ──next submit──▶ Configured
//! ```
//!
//! ## Example
//!
//! ```
//! use vconf_core::config::ExecutorConfig;
//! use vconf_core::task::TaskExecutor;
//!
//! let executor = TaskExecutor::new(ExecutorConfig::with_worker_count(2));
//! let handle = executor.submit(|| 6 * 7).unwrap();
//! assert_eq!(handle.join().unwrap(), 42);
//! ```

pub mod executor;
pub mod handle;
mod pool;
pub mod sugar;

pub use executor::{global, ExecutorStatus, TaskExecutor};
pub use handle::{Dispatch, TaskHandle};
pub use sugar::task;

//! Convenience forms over [`TaskExecutor::submit`].
//!
//! Three call shapes, one behaviour:
//!
//! ```
//! use std::sync::Arc;
//! use vconf_core::task::{task, TaskExecutor};
//!
//! let executor = Arc::new(TaskExecutor::with_workers(2));
//!
//! // Explicit: wrap the call yourself
//! let host = "esx-01".to_string();
//! let explicit = executor.submit(move || host.len()).unwrap();
//!
//! // Argumented: turn a function into a submitting callable
//! let measure = executor.wrap(|host: String| host.len());
//! let wrapped = measure("esx-02".to_string()).unwrap();
//!
//! // Bare: submit to the process-wide executor
//! let bare = task(|| "esx-03".len()).unwrap();
//!
//! assert_eq!(explicit.join().unwrap(), 6);
//! assert_eq!(wrapped.join().unwrap(), 6);
//! assert_eq!(bare.join().unwrap(), 6);
//! ```

use crate::errors::Result;
use crate::task::executor::{global, TaskExecutor};
use crate::task::handle::TaskHandle;
use std::sync::Arc;

impl TaskExecutor {
    /// Wrap `f` so each call submits `f(arg)` to this executor.
    pub fn wrap<F, A, T>(&self, f: F) -> impl Fn(A) -> Result<TaskHandle<T>> + '_
    where
        F: Fn(A) -> T + Send + Sync + 'static,
        A: Send + 'static,
        T: Send + 'static,
    {
        let f = Arc::new(f);
        move |arg| {
            let f = Arc::clone(&f);
            self.submit(move || f(arg))
        }
    }

    /// Like [`wrap`](Self::wrap), for callers that need a `'static` callable
    /// (for example one captured by another submitted task).
    pub fn wrap_shared<F, A, T>(
        self: &Arc<Self>,
        f: F,
    ) -> impl Fn(A) -> Result<TaskHandle<T>> + Send + Sync + 'static
    where
        F: Fn(A) -> T + Send + Sync + 'static,
        A: Send + 'static,
        T: Send + 'static,
    {
        let executor = Arc::clone(self);
        let f = Arc::new(f);
        move |arg| {
            let f = Arc::clone(&f);
            executor.submit(move || f(arg))
        }
    }
}

/// Submit `f` to the process-wide executor.
///
/// # Errors
///
/// See [`TaskExecutor::submit`].
pub fn task<F, T>(f: F) -> Result<TaskHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    global().submit(f)
}

//! Executor state machine and admission control.

use crate::config::{ExecutorConfig, FrameworkConfig};
use crate::errors::{ComplianceError, Result};
use crate::task::handle::TaskHandle;
use crate::task::pool::{Job, WorkerPool};
use crate::{log_op_end, log_op_error, log_op_start};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Instant;
use vconf_core_types::schema;
use vconf_core_types::{PoolId, TaskId};

/// Observable lifecycle state of a [`TaskExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorStatus {
    Unconfigured,
    Configured { pool_id: PoolId, workers: usize },
    Shutdown,
}

enum ExecutorState {
    Unconfigured,
    Configured(WorkerPool),
    Shutdown,
}

impl ExecutorState {
    fn label(&self) -> &'static str {
        match self {
            ExecutorState::Unconfigured => "unconfigured",
            ExecutorState::Configured(_) => "configured",
            ExecutorState::Shutdown => "shutdown",
        }
    }
}

/// Bounded executor with synchronous fallback.
///
/// The state lock covers only bookkeeping (configure, shutdown and the
/// admission decision in [`submit`](Self::submit)); submitted callables never
/// run while it is held.
pub struct TaskExecutor {
    config: ExecutorConfig,
    state: Mutex<ExecutorState>,
    next_pool_id: AtomicU64,
}

impl TaskExecutor {
    /// Create an unconfigured executor. The pool is built on first use with
    /// `config.worker_count` workers.
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ExecutorState::Unconfigured),
            next_pool_id: AtomicU64::new(0),
        }
    }

    pub fn with_workers(worker_count: usize) -> Self {
        Self::new(ExecutorConfig::with_worker_count(worker_count))
    }

    /// Worker count used when the executor configures itself.
    pub fn default_workers(&self) -> usize {
        self.config.worker_count
    }

    pub fn status(&self) -> ExecutorStatus {
        match &*self.lock_state() {
            ExecutorState::Unconfigured => ExecutorStatus::Unconfigured,
            ExecutorState::Configured(pool) => ExecutorStatus::Configured {
                pool_id: pool.id(),
                workers: pool.size(),
            },
            ExecutorState::Shutdown => ExecutorStatus::Shutdown,
        }
    }

    /// Identity of the active pool, if any.
    pub fn pool_id(&self) -> Option<PoolId> {
        match &*self.lock_state() {
            ExecutorState::Configured(pool) => Some(pool.id()),
            _ => None,
        }
    }

    /// Workers currently free to accept a task (0 when no pool is active).
    pub fn idle_workers(&self) -> usize {
        match &*self.lock_state() {
            ExecutorState::Configured(pool) => pool.idle(),
            _ => 0,
        }
    }

    /// Ensure a pool of exactly `workers` threads is active.
    ///
    /// Requesting the current size keeps the existing pool. Any other size
    /// builds a new pool first, swaps it in, then drains and joins the old
    /// one outside the state lock.
    ///
    /// # Errors
    ///
    /// - `InvalidWorkerCount`: `workers` is zero
    /// - `WorkerSpawn`: a worker thread could not be started; the previous
    ///   state is kept
    pub fn configure(&self, workers: usize) -> Result<PoolId> {
        let start = Instant::now();
        log_op_start!("executor.configure", workers = workers);

        let mut state = self.lock_state();
        if let ExecutorState::Configured(pool) = &*state {
            if pool.size() == workers {
                let pool_id = pool.id();
                drop(state);
                log_op_end!(
                    "executor.configure",
                    duration_ms = start.elapsed().as_millis() as u64,
                    pool_id = %pool_id,
                    reused = true
                );
                return Ok(pool_id);
            }
        }

        let pool = match self.spawn_pool(workers) {
            Ok(pool) => pool,
            Err(err) => {
                drop(state);
                log_op_error!(
                    "executor.configure",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                return Err(err);
            }
        };
        let pool_id = pool.id();
        let previous = std::mem::replace(&mut *state, ExecutorState::Configured(pool));
        drop(state);
        // Joins the replaced pool's workers, if any
        drop(previous);

        log_op_end!(
            "executor.configure",
            duration_ms = start.elapsed().as_millis() as u64,
            pool_id = %pool_id,
            reused = false
        );
        Ok(pool_id)
    }

    /// Shut the active pool down. Queued work drains before the workers are
    /// joined. The next submission reconfigures automatically.
    pub fn shutdown(&self) {
        let start = Instant::now();
        log_op_start!("executor.shutdown");

        let previous = std::mem::replace(&mut *self.lock_state(), ExecutorState::Shutdown);
        let pool_id = match &previous {
            ExecutorState::Configured(pool) => Some(pool.id()),
            _ => None,
        };
        drop(previous);

        log_op_end!(
            "executor.shutdown",
            duration_ms = start.elapsed().as_millis() as u64,
            pool_id = ?pool_id
        );
    }

    /// Run `f` on an idle worker, or inline on this thread if none is idle.
    ///
    /// Never blocks waiting for a worker. A panic inside `f` is captured and
    /// reported by the handle as `TaskPanicked` on either path.
    ///
    /// # Errors
    ///
    /// - `WorkerSpawn`: the executor had to (re)configure itself and a
    ///   worker thread could not be started
    pub fn submit<F, T>(&self, f: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let task_id = TaskId::new();
        let mut state = self.lock_state();
        let pool = self.ensure_pool(&mut state)?;
        let pool_id = pool.id();

        let Some(slot) = pool.try_reserve() else {
            drop(state);
            tracing::debug!(
                op = "executor.submit",
                task_id = %task_id,
                pool_id = %pool_id,
                dispatch = schema::dispatch::INLINE,
                "no idle worker, running inline"
            );
            return Ok(TaskHandle::resolved(task_id, run_guarded(f)));
        };

        let (sender, receiver) = mpsc::sync_channel(1);
        let job: Job = Box::new(move || {
            let result = run_guarded(f);
            // Free the worker before the result becomes observable
            drop(slot);
            let _ = sender.send(result);
        });

        match pool.dispatch(job) {
            Ok(()) => {
                drop(state);
                tracing::debug!(
                    op = "executor.submit",
                    task_id = %task_id,
                    pool_id = %pool_id,
                    dispatch = schema::dispatch::WORKER,
                );
                Ok(TaskHandle::pending(task_id, receiver))
            }
            Err(job) => {
                drop(state);
                tracing::warn!(
                    op = "executor.submit",
                    task_id = %task_id,
                    pool_id = %pool_id,
                    dispatch = schema::dispatch::INLINE,
                    "pool rejected job, running inline"
                );
                job();
                let result = receiver
                    .recv()
                    .unwrap_or(Err(ComplianceError::TaskDisconnected));
                Ok(TaskHandle::resolved(task_id, result))
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ExecutorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_pool(&self, workers: usize) -> Result<WorkerPool> {
        if workers == 0 {
            return Err(ComplianceError::InvalidWorkerCount { requested: workers });
        }
        let id = PoolId::new(self.next_pool_id.fetch_add(1, Ordering::Relaxed) + 1);
        WorkerPool::spawn(id, workers)
    }

    /// Configure on demand when no pool is active.
    fn ensure_pool<'a>(&self, state: &'a mut ExecutorState) -> Result<&'a WorkerPool> {
        if let ExecutorState::Unconfigured | ExecutorState::Shutdown = state {
            let pool = self.spawn_pool(self.config.worker_count)?;
            tracing::info!(
                op = "executor.auto_configure",
                from = state.label(),
                pool_id = %pool.id(),
                workers = pool.size(),
            );
            *state = ExecutorState::Configured(pool);
        }
        match state {
            ExecutorState::Configured(pool) => Ok(pool),
            ExecutorState::Unconfigured | ExecutorState::Shutdown => {
                unreachable!("pool installed above")
            }
        }
    }
}

impl Default for TaskExecutor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

impl std::fmt::Debug for TaskExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("default_workers", &self.config.worker_count)
            .field("status", &self.status())
            .finish()
    }
}

fn run_guarded<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| ComplianceError::TaskPanicked {
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

static GLOBAL_EXECUTOR: OnceLock<TaskExecutor> = OnceLock::new();

/// Process-wide executor, sized from `VCONF_WORKER_COUNT` when set.
///
/// Prefer an explicitly owned [`TaskExecutor`] where one can be passed down.
pub fn global() -> &'static TaskExecutor {
    GLOBAL_EXECUTOR.get_or_init(|| {
        let config = match FrameworkConfig::from_env() {
            Ok(config) => config.executor,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring invalid executor environment overrides");
                ExecutorConfig::default()
            }
        };
        TaskExecutor::new(config)
    })
}

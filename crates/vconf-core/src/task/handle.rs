//! One-shot handles for submitted tasks.

use crate::errors::{ComplianceError, Result};
use std::sync::mpsc;
use vconf_core_types::schema;
use vconf_core_types::TaskId;

/// Where a submitted task ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Handed to an idle pool worker
    Worker,
    /// Executed synchronously on the submitting thread
    Inline,
}

impl Dispatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dispatch::Worker => schema::dispatch::WORKER,
            Dispatch::Inline => schema::dispatch::INLINE,
        }
    }
}

enum HandleState<T> {
    Resolved(Result<T>),
    Pending(mpsc::Receiver<Result<T>>),
}

/// Handle to the eventual result of a submitted task.
///
/// Retrieval behaves the same whichever path the task took: [`join`](Self::join)
/// returns the callable's value, or `TaskPanicked` if it panicked.
pub struct TaskHandle<T> {
    id: TaskId,
    dispatch: Dispatch,
    state: HandleState<T>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn resolved(id: TaskId, result: Result<T>) -> Self {
        Self {
            id,
            dispatch: Dispatch::Inline,
            state: HandleState::Resolved(result),
        }
    }

    pub(crate) fn pending(id: TaskId, receiver: mpsc::Receiver<Result<T>>) -> Self {
        Self {
            id,
            dispatch: Dispatch::Worker,
            state: HandleState::Pending(receiver),
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Non-blocking check for completion.
    pub fn is_finished(&mut self) -> bool {
        let polled = match &self.state {
            HandleState::Resolved(_) => return true,
            HandleState::Pending(receiver) => match receiver.try_recv() {
                Ok(result) => result,
                Err(mpsc::TryRecvError::Empty) => return false,
                Err(mpsc::TryRecvError::Disconnected) => Err(ComplianceError::TaskDisconnected),
            },
        };
        self.state = HandleState::Resolved(polled);
        true
    }

    /// Block until the task has finished, keeping its result in the handle.
    pub fn wait(&mut self) {
        if let HandleState::Pending(receiver) = &self.state {
            let result = receiver
                .recv()
                .unwrap_or(Err(ComplianceError::TaskDisconnected));
            self.state = HandleState::Resolved(result);
        }
    }

    /// Block until the task has finished and take its result.
    ///
    /// # Errors
    ///
    /// - `TaskPanicked`: the callable panicked
    /// - `TaskDisconnected`: the worker went away without delivering a result
    pub fn join(self) -> Result<T> {
        match self.state {
            HandleState::Resolved(result) => result,
            HandleState::Pending(receiver) => receiver
                .recv()
                .unwrap_or(Err(ComplianceError::TaskDisconnected)),
        }
    }
}

impl<T, E> TaskHandle<std::result::Result<T, E>>
where
    E: From<ComplianceError>,
{
    /// Join a fallible task, folding executor errors into the task's own
    /// error type.
    pub fn try_join(self) -> std::result::Result<T, E> {
        self.join().map_err(E::from)?
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resolved = matches!(self.state, HandleState::Resolved(_));
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("dispatch", &self.dispatch)
            .field("resolved", &resolved)
            .finish()
    }
}

//! Fixed-size worker pool backing a [`TaskExecutor`](super::TaskExecutor).

use crate::errors::{ComplianceError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use vconf_core_types::PoolId;

pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

struct Worker {
    index: usize,
    thread: Option<JoinHandle<()>>,
}

/// A reserved idle worker. Dropping it marks the worker idle again.
pub(crate) struct WorkerSlot {
    idle: Arc<AtomicUsize>,
}

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.idle.fetch_add(1, Ordering::AcqRel);
    }
}

pub(crate) struct WorkerPool {
    id: PoolId,
    size: usize,
    idle: Arc<AtomicUsize>,
    sender: Option<mpsc::Sender<Job>>,
    workers: Vec<Worker>,
}

impl WorkerPool {
    /// Start `size` named worker threads.
    ///
    /// On a spawn failure the threads already started are stopped before the
    /// error is returned.
    pub(crate) fn spawn(id: PoolId, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(ComplianceError::InvalidWorkerCount { requested: size });
        }

        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));
        let mut pool = Self {
            id,
            size,
            idle: Arc::new(AtomicUsize::new(size)),
            sender: Some(sender),
            workers: Vec::with_capacity(size),
        };

        for index in 0..size {
            let receiver = Arc::clone(&receiver);
            let thread = thread::Builder::new()
                .name(format!("vconf-worker-{}-{}", id.get(), index))
                .spawn(move || worker_loop(receiver))
                .map_err(|e| ComplianceError::WorkerSpawn {
                    reason: e.to_string(),
                })?;
            pool.workers.push(Worker {
                index,
                thread: Some(thread),
            });
        }

        Ok(pool)
    }

    pub(crate) fn id(&self) -> PoolId {
        self.id
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn idle(&self) -> usize {
        self.idle.load(Ordering::Acquire)
    }

    /// Claim an idle worker without blocking.
    pub(crate) fn try_reserve(&self) -> Option<WorkerSlot> {
        self.idle
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .ok()
            .map(|_| WorkerSlot {
                idle: Arc::clone(&self.idle),
            })
    }

    /// Hand a job to the workers. The job comes back if no worker can take it.
    pub(crate) fn dispatch(&self, job: Job) -> std::result::Result<(), Job> {
        match &self.sender {
            Some(sender) => sender.send(job).map_err(|mpsc::SendError(job)| job),
            None => Err(job),
        }
    }

    /// Close the queue, let queued jobs drain, and join the workers.
    ///
    /// A worker shutting down its own pool is detached rather than joined.
    pub(crate) fn shutdown(&mut self) {
        self.sender.take();
        let current = thread::current().id();
        for worker in &mut self.workers {
            let Some(thread) = worker.thread.take() else {
                continue;
            };
            if thread.thread().id() == current {
                continue;
            }
            if thread.join().is_err() {
                tracing::warn!(
                    pool_id = %self.id,
                    worker = worker.index,
                    "worker thread exited with a panic"
                );
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(receiver: Arc<Mutex<mpsc::Receiver<Job>>>) {
    loop {
        let message = match receiver.lock() {
            Ok(guard) => guard.recv(),
            Err(poisoned) => poisoned.into_inner().recv(),
        };
        match message {
            Ok(job) => job(),
            // Sender dropped and queue drained
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        let err = WorkerPool::spawn(PoolId::new(1), 0).err();
        assert_eq!(err, Some(ComplianceError::InvalidWorkerCount { requested: 0 }));
    }

    #[test]
    fn test_reservation_is_bounded_by_size() {
        let pool = WorkerPool::spawn(PoolId::new(1), 2).unwrap();
        let a = pool.try_reserve();
        let b = pool.try_reserve();
        assert!(a.is_some());
        assert!(b.is_some());
        assert!(pool.try_reserve().is_none());
        assert_eq!(pool.idle(), 0);

        drop(a);
        assert_eq!(pool.idle(), 1);
        assert!(pool.try_reserve().is_some());
    }

    #[test]
    fn test_shutdown_drains_queued_jobs() {
        let mut pool = WorkerPool::spawn(PoolId::new(1), 1).unwrap();
        let (tx, rx) = mpsc::channel();
        for i in 0..3 {
            let tx = tx.clone();
            assert!(pool.dispatch(Box::new(move || tx.send(i).unwrap())).is_ok());
        }
        pool.shutdown();
        let mut seen: Vec<i32> = rx.try_iter().collect();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_dispatch_after_shutdown_returns_job() {
        let mut pool = WorkerPool::spawn(PoolId::new(1), 1).unwrap();
        pool.shutdown();
        assert!(pool.dispatch(Box::new(|| {})).is_err());
    }

    #[test]
    fn test_worker_threads_are_named() {
        let pool = WorkerPool::spawn(PoolId::new(9), 1).unwrap();
        let (tx, rx) = mpsc::channel();
        assert!(pool
            .dispatch(Box::new(move || {
                tx.send(thread::current().name().map(str::to_string)).unwrap();
            }))
            .is_ok());
        assert_eq!(rx.recv().unwrap().as_deref(), Some("vconf-worker-9-0"));
    }
}

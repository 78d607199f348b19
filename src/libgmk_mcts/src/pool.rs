// Copyright 2026 Gomoku Project Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The worker-pool primitives shared by the candidate generator, the
//! outcome detector, and UCT evaluation: a fixed pool of long-lived threads
//! reading jobs off a bounded channel, and a task group that counts
//! in-flight jobs and can block until they all finish.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};

/// One unit of work submitted to a [`WorkerPool`]. Boxed because the pool's
/// input channel is homogeneous across whatever task shape the caller needs;
/// jobs must be `'static` because worker threads are long-lived and outlive
/// any one `simulate()` call.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Counts in-flight tasks submitted as part of one logical operation (e.g.
/// "the 225 candidate checks for this generate() call") and offers a
/// blocking [`TaskGroup::wait`] that returns once the count drops to zero.
#[derive(Clone)]
pub struct TaskGroup {
    inner: Arc<(Mutex<usize>, Condvar)>,
}

impl TaskGroup {
    pub fn new() -> Self {
        TaskGroup { inner: Arc::new((Mutex::new(0), Condvar::new())) }
    }

    /// Registers `n` additional in-flight tasks.
    pub fn add(&self, n: usize) {
        let (lock, _) = &*self.inner;
        *lock.lock().expect("task group mutex poisoned") += n;
    }

    /// Marks one task as finished, waking any waiter if the count reaches
    /// zero.
    pub fn done(&self) {
        let (lock, cvar) = &*self.inner;
        let mut count = lock.lock().expect("task group mutex poisoned");
        assert!(*count > 0, "TaskGroup::done called more times than add");
        *count -= 1;
        if *count == 0 {
            cvar.notify_all();
        }
    }

    /// Blocks the calling thread until the in-flight count reaches zero.
    pub fn wait(&self) {
        let (lock, cvar) = &*self.inner;
        let mut count = lock.lock().expect("task group mutex poisoned");
        while *count > 0 {
            count = cvar.wait(count).expect("task group mutex poisoned");
        }
    }
}

impl Default for TaskGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixed pool of worker threads draining a single bounded input channel of
/// [`Job`]s. Threads exit when the input channel's last sender is dropped.
pub struct WorkerPool {
    tx: Option<Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `num_workers` threads, each looping `for job in rx { job() }`.
    /// `capacity` bounds the input channel so producers feel backpressure
    /// rather than unbounded queueing (spec: "publishing tasks blocks if the
    /// input channel is full").
    pub fn new(name: &'static str, num_workers: usize, capacity: usize) -> Self {
        let (tx, rx): (Sender<Job>, Receiver<Job>) = bounded(capacity);
        let mut handles = Vec::with_capacity(num_workers);

        for worker_id in 0..num_workers {
            let rx = rx.clone();
            handles.push(
                thread::Builder::new()
                    .name(format!("{name}-{worker_id}"))
                    .spawn(move || {
                        for job in rx {
                            job();
                        }
                    })
                    .expect("failed to spawn worker thread"),
            );
        }

        log::debug!("spawned pool \"{name}\" with {num_workers} worker(s), capacity {capacity}");

        WorkerPool { tx: Some(tx), handles }
    }

    /// Submits one job, blocking if the input channel is full.
    pub fn submit(&self, job: Job) {
        self.tx
            .as_ref()
            .expect("submit called after teardown")
            .send(job)
            .expect("worker pool input channel disconnected");
    }

    /// Closes the input channel. Worker threads observe the disconnect and
    /// exit once they drain whatever was already queued.
    pub fn close_input(&mut self) {
        self.tx.take();
    }

    /// Closes the input channel (if not already closed) and joins every
    /// worker thread, blocking until all have exited.
    pub fn join(&mut self) {
        self.close_input();
        for handle in self.handles.drain(..) {
            handle.join().expect("worker thread panicked");
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.join();
    }
}

/// The four logical pools described in the concurrency model: one pool per
/// task type, sized from [`crate::config::EngineConfig::worker_count`] except
/// for `wait_and_close`, which is always [`crate::config::WAIT_AND_CLOSE_WORKERS`].
pub struct WorkerPools {
    pub candidate: WorkerPool,
    pub uct: WorkerPool,
    pub outcome: WorkerPool,
    pub wait_and_close: WorkerPool,
}

impl WorkerPools {
    pub fn new(worker_count: usize) -> Self {
        WorkerPools {
            candidate: WorkerPool::new("candidate", worker_count, gmk_board::NUM_POSITIONS as usize),
            uct: WorkerPool::new("uct", worker_count, gmk_board::NUM_POSITIONS as usize),
            outcome: WorkerPool::new("outcome", worker_count, 8),
            wait_and_close: WorkerPool::new(
                "wait-and-close",
                crate::config::WAIT_AND_CLOSE_WORKERS,
                64,
            ),
        }
    }

    /// Submits `(group, on_close)` to the wait-and-close pool: the worker
    /// blocks on `group.wait()` then drops `on_close`, closing it, without
    /// making the producer block on draining its own output channel.
    pub fn wait_and_close<T: Send + 'static>(&self, group: TaskGroup, on_close: T) {
        self.wait_and_close.submit(Box::new(move || {
            group.wait();
            drop(on_close);
        }));
    }

    /// Closes the three worker pools' inputs, then the wait-and-close pool's
    /// input, then awaits completion in that same order — the teardown
    /// sequence the concurrency model mandates.
    pub fn teardown(&mut self) {
        self.candidate.close_input();
        self.uct.close_input();
        self.outcome.close_input();
        self.wait_and_close.close_input();

        self.candidate.join();
        self.uct.join();
        self.outcome.join();
        self.wait_and_close.join();

        log::debug!("worker pools torn down");
    }
}

// SPDX-License-Identifier: MIT

use crate::error::ParallelError;
use crate::partition::{ChunkSplitter, Partition};
use crate::policy::ExecutionPolicy;
use std::any::Any;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::{mem, thread};
use tracing::{debug, trace, warn};

/// Unit of work executed by a worker thread.
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Job borrowing from the stack frame of the call that submitted it.
type ScopedJob<'scope> = Box<dyn FnOnce() + Send + 'scope>;

type PanicPayload = Box<dyn Any + Send + 'static>;

/// Number of hardware threads available to this process, at least 1.
pub fn hardware_concurrency() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Locks `mutex`, recovering the guard if a previous holder panicked.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            mutex.clear_poison();
            poisoned.into_inner()
        }
    }
}

/// Countdown of the jobs submitted by one call. The submitting thread waits
/// on it until every job has arrived.
struct CompletionLatch {
    /// Outstanding jobs and the first panic raised by any of them.
    state: Mutex<LatchState>,
    /// Signalled once the last job arrives.
    all_arrived: Condvar,
}

struct LatchState {
    pending: usize,
    first_panic: Option<PanicPayload>,
}

impl CompletionLatch {
    fn new(pending: usize) -> Self {
        CompletionLatch {
            state: Mutex::new(LatchState {
                pending,
                first_panic: None,
            }),
            all_arrived: Condvar::new(),
        }
    }

    /// Marks one job as finished, recording its panic if it had one.
    fn arrive(&self, panic_payload: Option<PanicPayload>) {
        let mut state_guard = lock_recovering(&self.state);
        state_guard.pending -= 1;
        if state_guard.first_panic.is_none() {
            state_guard.first_panic = panic_payload;
        }

        // Wake the submitter if this was the last job to arrive.
        if state_guard.pending == 0 {
            self.all_arrived.notify_all();
        }
    }

    /// Blocks until every job has arrived and hands back the first panic.
    fn wait(&self) -> Option<PanicPayload> {
        let mut state_guard = lock_recovering(&self.state);
        while state_guard.pending != 0 {
            state_guard = self
                .all_arrived
                .wait(state_guard)
                .unwrap_or_else(|e| e.into_inner());
        }
        state_guard.first_panic.take()
    }
}

/// Shared data of the pool, holding the job queue and a shutdown flag.
struct SchedulerSharedData {
    /// Queue of jobs for worker threads.
    job_queue: VecDeque<Job>,
    /// Flag to signal shutdown to worker threads.
    shutdown_flag: bool,
}

impl SchedulerSharedData {
    fn new() -> Self {
        SchedulerSharedData {
            job_queue: VecDeque::with_capacity(64),
            shutdown_flag: false,
        }
    }
}

/// Fixed-size pool of persistent worker threads.
///
/// The pool spawns `min(max_workers, hardware_concurrency())` workers at
/// construction and keeps them until it is dropped. Every submitting method
/// blocks until all the partitions it dispatched have completed, so work
/// submitted through the pool may borrow from the caller's stack.
///
/// A job must not submit work to the pool that runs it: with every worker
/// blocked on a nested call, nothing is left to make progress.
pub struct BoundedPool {
    /// Pool of worker threads.
    worker_threads: Vec<thread::JoinHandle<()>>,
    /// Shared data protected by a mutex.
    shared_data: Arc<Mutex<SchedulerSharedData>>,
    /// Condition variable to notify workers of new jobs or shutdown.
    job_available: Arc<Condvar>,
    /// Worker cap requested at construction.
    max_workers: usize,
}

impl BoundedPool {
    /// Creates a pool of at most `max_workers` worker threads.
    ///
    /// The actual worker count is further capped by the hardware
    /// concurrency of the machine.
    ///
    /// # Errors
    /// - [`ParallelError::ZeroWorkers`] if `max_workers` is zero.
    /// - [`ParallelError::WorkerSpawn`] if a worker thread cannot be spawned.
    pub fn new(max_workers: usize) -> Result<Self, ParallelError> {
        if max_workers == 0 {
            return Err(ParallelError::ZeroWorkers);
        }

        let hardware_threads = hardware_concurrency();
        let pool = Self::spawn(max_workers, max_workers.min(hardware_threads))?;
        debug!(
            max_workers,
            hardware_threads,
            workers = pool.worker_count(),
            "bounded pool started"
        );
        Ok(pool)
    }

    /// Spawns exactly `thread_count` workers, ignoring hardware concurrency.
    pub(crate) fn spawn(
        max_workers: usize,
        thread_count: usize,
    ) -> Result<Self, ParallelError> {
        let mut pool = BoundedPool {
            worker_threads: Vec::with_capacity(thread_count),
            shared_data: Arc::new(Mutex::new(SchedulerSharedData::new())),
            job_available: Arc::new(Condvar::new()),
            max_workers,
        };

        // Spawn worker threads that wait for jobs to be queued. On failure the
        // partially built pool is dropped, which joins the threads spawned so
        // far.
        for worker_index in 0..thread_count {
            let shared_data = Arc::clone(&pool.shared_data);
            let job_available = Arc::clone(&pool.job_available);
            let handle = thread::Builder::new()
                .name(format!("boundedpool-worker-{worker_index}"))
                .spawn(move || worker_loop(shared_data, job_available))
                .map_err(|source| ParallelError::WorkerSpawn { source })?;
            pool.worker_threads.push(handle);
        }

        Ok(pool)
    }

    /// Number of worker threads owned by the pool.
    pub fn worker_count(&self) -> usize {
        self.worker_threads.len()
    }

    /// Worker cap requested at construction.
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Calls `body` once for every index in `range`.
    ///
    /// Under [`ExecutionPolicy::Parallel`] the range is split into up to
    /// [`worker_count`](Self::worker_count) contiguous partitions, one job
    /// each; within a partition indices run in ascending order. Under
    /// [`ExecutionPolicy::Sequential`] the whole range runs in order on the
    /// calling thread. Returns once every index has been processed.
    ///
    /// A panic in `body` is resumed on the calling thread after all other
    /// partitions have finished.
    pub fn run_indexed<F>(
        &self,
        range: Range<usize>,
        body: F,
        policy: ExecutionPolicy,
    ) where
        F: Fn(usize) + Sync,
    {
        let Some(splitter) = self.parallel_splitter(range.clone(), policy)
        else {
            range.for_each(&body);
            return;
        };

        let body = &body;
        let jobs: Vec<ScopedJob<'_>> = splitter
            .map(|partition| {
                let job: ScopedJob<'_> =
                    Box::new(move || partition.range().for_each(body));
                job
            })
            .collect();
        self.dispatch_scoped(jobs);
    }

    /// Calls `body` with every index of `data` and exclusive access to the
    /// element at that index.
    ///
    /// Partitioning and ordering follow [`run_indexed`](Self::run_indexed);
    /// each partition owns a disjoint sub-slice of `data`.
    pub fn run_indexed_mut<T, F>(
        &self,
        data: &mut [T],
        body: F,
        policy: ExecutionPolicy,
    ) where
        T: Send,
        F: Fn(usize, &mut T) + Sync,
    {
        self.run_chunks_mut(
            data,
            |partition, chunk| {
                for (index, item) in partition.range().zip(chunk.iter_mut()) {
                    body(index, item);
                }
            },
            policy,
        );
    }

    /// Calls `body` once per partition of `data` with the partition bounds
    /// and the matching sub-slice.
    ///
    /// Under [`ExecutionPolicy::Sequential`], or when only one partition
    /// results, `body` runs once on the calling thread with the whole slice.
    /// An empty slice never calls `body`.
    pub fn run_chunks_mut<T, F>(
        &self,
        data: &mut [T],
        body: F,
        policy: ExecutionPolicy,
    ) where
        T: Send,
        F: Fn(Partition, &mut [T]) + Sync,
    {
        let Some(splitter) = self.parallel_splitter(0..data.len(), policy)
        else {
            if !data.is_empty() {
                let whole = Partition {
                    index: 0,
                    start: 0,
                    end: data.len(),
                };
                body(whole, data);
            }
            return;
        };

        let body = &body;
        let mut remaining = data;
        let mut jobs: Vec<ScopedJob<'_>> = Vec::with_capacity(splitter.len());
        for partition in splitter {
            let (chunk, rest) =
                mem::take(&mut remaining).split_at_mut(partition.len());
            remaining = rest;
            jobs.push(Box::new(move || body(partition, chunk)));
        }
        self.dispatch_scoped(jobs);
    }

    /// Folds `transform(i)` over every index of `range` with `combine`.
    ///
    /// Each partition folds its indices in ascending order starting from a
    /// clone of `identity`; the per-partition accumulators are then combined
    /// in ascending partition order. Repeated calls on the same pool and
    /// input are therefore bit-reproducible. An empty range returns
    /// `identity`.
    ///
    /// `combine` must be associative and commutative for results to be
    /// independent of the worker count. This is not checked.
    pub fn reduce<R, C, M>(
        &self,
        range: Range<usize>,
        identity: R,
        combine: C,
        transform: M,
        policy: ExecutionPolicy,
    ) -> R
    where
        R: Clone + Send,
        C: Fn(R, R) -> R + Sync,
        M: Fn(usize) -> R + Sync,
    {
        let fold_range = |acc: R, indices: Range<usize>| {
            indices.fold(acc, |acc, i| combine(acc, transform(i)))
        };

        let Some(splitter) = self.parallel_splitter(range.clone(), policy)
        else {
            return fold_range(identity, range);
        };

        let fold_range = &fold_range;
        let mut partials: Vec<Option<R>> = vec![None; splitter.len()];
        let jobs: Vec<ScopedJob<'_>> = splitter
            .zip(partials.iter_mut())
            .map(|(partition, slot)| {
                let seed = identity.clone();
                let job: ScopedJob<'_> = Box::new(move || {
                    *slot = Some(fold_range(seed, partition.range()));
                });
                job
            })
            .collect();
        self.dispatch_scoped(jobs);

        partials
            .into_iter()
            .flatten()
            .reduce(|acc, partial| combine(acc, partial))
            .unwrap_or(identity)
    }

    /// Splitter for a parallel call, or `None` when the call should run
    /// inline on the calling thread.
    fn parallel_splitter(
        &self,
        range: Range<usize>,
        policy: ExecutionPolicy,
    ) -> Option<ChunkSplitter> {
        if !policy.is_parallel() {
            return None;
        }
        let splitter = ChunkSplitter::new(range, self.worker_count());
        (splitter.chunk_count() > 1).then_some(splitter)
    }

    /// Queues `jobs` and blocks until all of them have run.
    fn dispatch_scoped<'scope>(&self, jobs: Vec<ScopedJob<'scope>>) {
        let latch = Arc::new(CompletionLatch::new(jobs.len()));
        trace!(
            jobs = jobs.len(),
            workers = self.worker_count(),
            "dispatching partitions"
        );

        {
            let mut shared_data_guard = lock_recovering(&self.shared_data);
            for job in jobs {
                let latch = Arc::clone(&latch);
                let wrapped: ScopedJob<'scope> = Box::new(move || {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(job));
                    latch.arrive(outcome.err());
                });
                // SAFETY: the job borrows data living for 'scope, which
                // outlives this call. `latch.wait()` below does not return
                // before every queued job has run to completion (panics
                // included, they are caught above), so no job can touch the
                // borrowed data after this function returns.
                let wrapped: Job = unsafe {
                    mem::transmute::<ScopedJob<'scope>, Job>(wrapped)
                };
                shared_data_guard.job_queue.push_back(wrapped);
            }
            self.job_available.notify_all();
        }

        if let Some(payload) = latch.wait() {
            warn!("partition panicked, resuming on submitting thread");
            panic::resume_unwind(payload);
        }
    }
}

/// Body of every worker thread: run queued jobs until shutdown.
fn worker_loop(
    shared_data: Arc<Mutex<SchedulerSharedData>>,
    job_available: Arc<Condvar>,
) {
    loop {
        let job = {
            let mut shared_data_guard = lock_recovering(&shared_data);

            // Wait until there is a job to process or a shutdown signal.
            while shared_data_guard.job_queue.is_empty()
                && !shared_data_guard.shutdown_flag
            {
                shared_data_guard = job_available
                    .wait(shared_data_guard)
                    .unwrap_or_else(|e| e.into_inner());
            }

            // An empty queue past the wait means shutdown.
            match shared_data_guard.job_queue.pop_front() {
                Some(job) => job,
                None => break,
            }
        };

        // Execute the job outside the lock scope.
        job();
    }
}

impl Drop for BoundedPool {
    /// Signals shutdown to all workers and joins them.
    fn drop(&mut self) {
        {
            let mut shared_data_guard = lock_recovering(&self.shared_data);
            shared_data_guard.shutdown_flag = true;
            self.job_available.notify_all();
        }

        for handle in self.worker_threads.drain(..) {
            let _ = handle.join();
        }
        debug!(max_workers = self.max_workers, "bounded pool shut down");
    }
}

impl std::fmt::Debug for BoundedPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedPool")
            .field("worker_count", &self.worker_count())
            .field("max_workers", &self.max_workers)
            .finish()
    }
}

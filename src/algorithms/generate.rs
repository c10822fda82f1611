// SPDX-License-Identifier: MIT

use crate::policy::ExecutionPolicy;
use crate::pools::boundedpool::BoundedPool;

/// Fills `sequence` with one `producer()` call per element.
///
/// Under [`ExecutionPolicy::Sequential`] the calls happen in ascending index
/// order. Under [`ExecutionPolicy::Parallel`] their order is unspecified, so
/// `producer` should not depend on call order.
pub fn generate<T, F>(
    pool: &BoundedPool,
    sequence: &mut [T],
    producer: F,
    policy: ExecutionPolicy,
) where
    T: Send,
    F: Fn() -> T + Sync,
{
    pool.run_indexed_mut(sequence, |_, slot| *slot = producer(), policy);
}

/// Fills `sequence` from stateful producers, one per partition.
///
/// `make_producer` receives the partition index and returns the producer
/// used for that partition alone, so a stateful producer such as a seeded
/// random generator is never shared between workers. Under
/// [`ExecutionPolicy::Sequential`] a single producer built with
/// `make_producer(0)` fills the whole sequence in ascending order, which
/// makes the output reproducible for a fixed seed.
pub fn generate_with<T, M, P>(
    pool: &BoundedPool,
    sequence: &mut [T],
    make_producer: M,
    policy: ExecutionPolicy,
) where
    T: Send,
    M: Fn(usize) -> P + Sync,
    P: FnMut() -> T,
{
    pool.run_chunks_mut(
        sequence,
        |partition, chunk| {
            let mut producer = make_producer(partition.index);
            chunk.iter_mut().for_each(|slot| *slot = producer());
        },
        policy,
    );
}

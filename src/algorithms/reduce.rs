// SPDX-License-Identifier: MIT

use crate::error::ParallelError;
use crate::policy::ExecutionPolicy;
use crate::pools::boundedpool::BoundedPool;

/// Sum of all elements of `input`.
///
/// Partial sums are computed per partition and added in partition order, so
/// the result only differs from a plain left-to-right sum by rounding, and
/// is bit-identical across calls on pools with the same worker count.
pub fn sum(pool: &BoundedPool, input: &[f64], policy: ExecutionPolicy) -> f64 {
    pool.reduce(0..input.len(), 0.0, |a, b| a + b, |i| input[i], policy)
}

/// [`sum`] on a pool of at most `max_workers` threads built for this call.
///
/// # Errors
/// Propagates the construction errors of [`BoundedPool::new`].
pub fn sum_capped(
    input: &[f64],
    policy: ExecutionPolicy,
    max_workers: usize,
) -> Result<f64, ParallelError> {
    let pool = BoundedPool::new(max_workers)?;
    Ok(sum(&pool, input, policy))
}

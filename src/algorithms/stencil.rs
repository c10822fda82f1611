// SPDX-License-Identifier: MIT

use crate::error::ParallelError;
use crate::policy::ExecutionPolicy;
use crate::pools::boundedpool::BoundedPool;

/// Smallest sequence for which the left and right neighbours of every
/// element are distinct from each other and from the element itself.
pub const MIN_STENCIL_LEN: usize = 3;

/// Circular 3-point averaging filter.
///
/// For every index `i` of a sequence of length `n`:
///
/// ```text
/// output[i] = (input[(i - 1 + n) % n] + input[i] + input[(i + 1) % n]) / 3
/// ```
///
/// Each output element reads only `input`, so partitions need no
/// synchronization beyond the final join and the result is identical for
/// every policy and worker count.
///
/// # Errors
/// - [`ParallelError::LengthMismatch`] if `output` and `input` differ in
///   length.
/// - [`ParallelError::StencilTooShort`] if `input` has fewer than
///   [`MIN_STENCIL_LEN`] elements. `output` is left untouched.
pub fn filter(
    pool: &BoundedPool,
    input: &[f64],
    output: &mut [f64],
    policy: ExecutionPolicy,
) -> Result<(), ParallelError> {
    let n = input.len();
    if output.len() != n {
        return Err(ParallelError::LengthMismatch {
            input: n,
            output: output.len(),
        });
    }
    if n < MIN_STENCIL_LEN {
        return Err(ParallelError::StencilTooShort {
            len: n,
            min: MIN_STENCIL_LEN,
        });
    }

    pool.run_indexed_mut(
        output,
        |i, out| {
            let left = input[(i + n - 1) % n];
            let right = input[(i + 1) % n];
            *out = (left + input[i] + right) / 3.0;
        },
        policy,
    );
    Ok(())
}

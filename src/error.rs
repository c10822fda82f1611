// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors surfaced by the pool and the algorithms built on it.
///
/// Caller-contract violations (a non-associative combiner, submitting to a
/// pool from inside one of its own jobs) are not represented here: they are
/// not detected.
#[derive(Debug, Error)]
pub enum ParallelError {
    /// A pool was requested with a worker cap of zero.
    #[error("bounded pool requires at least one worker")]
    ZeroWorkers,

    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {source}")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
    },

    /// Input and output of an element-wise operation differ in length.
    #[error("input has {input} elements but output has {output}")]
    LengthMismatch {
        /// Length of the input sequence.
        input: usize,
        /// Length of the output sequence.
        output: usize,
    },

    /// The circular stencil needs distinct left and right neighbours.
    #[error("stencil requires at least {min} elements, got {len}")]
    StencilTooShort {
        /// Length of the rejected sequence.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },
}

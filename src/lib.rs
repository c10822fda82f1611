// SPDX-License-Identifier: MIT

//! Bounded parallel execution for numeric kernels.
//!
//! A [`BoundedPool`] owns a fixed number of worker threads and runs indexed
//! loops or reductions across them, or on the calling thread, depending on
//! the [`ExecutionPolicy`] passed with each call. The [`algorithms`] module
//! builds a circular stencil filter, a sum reduction and sequence generation
//! on top of it.

pub mod algorithms;
pub mod error;
pub mod partition;
pub mod policy;
pub mod pools;
pub mod timer;

pub use error::ParallelError;
pub use partition::{ChunkSplitter, Partition};
pub use policy::ExecutionPolicy;
pub use pools::boundedpool::{hardware_concurrency, BoundedPool};
pub use timer::Timer;

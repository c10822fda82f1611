// SPDX-License-Identifier: MIT

//! Worker pools.
//!
//! [`BoundedPool`](boundedpool::BoundedPool) is re-exported at the crate
//! root; its module is only reachable through `pools`:
//!
//! ```
//! use parexec::pools::boundedpool::BoundedPool;
//! ```
//!
//! ```compile_fail
//! use parexec::boundedpool::BoundedPool;
//! ```

pub mod boundedpool;

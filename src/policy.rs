// SPDX-License-Identifier: MIT

/// Selects how an algorithm call executes its work.
///
/// The policy carries no state; every algorithm entry point branches on it
/// once. `Parallel` authorizes the pool to split the work but does not force
/// it: a call that would produce a single partition runs inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionPolicy {
    /// Run on the calling thread, in ascending index order, unpartitioned.
    #[default]
    Sequential,
    /// Split the work across the pool's workers.
    Parallel,
}

impl ExecutionPolicy {
    /// Returns `true` if the policy allows work to be split across workers.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, ExecutionPolicy::Parallel)
    }
}

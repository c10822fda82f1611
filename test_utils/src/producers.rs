// SPDX-License-Identifier: MIT

use parexec::{BoundedPool, ExecutionPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Producer of uniform values in `[0, 1)` from a generator seeded with `seed`.
pub fn uniform_producer(seed: u64) -> impl FnMut() -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    move || rng.random::<f64>()
}

/// Sequence of `len` uniform values, generated sequentially from `seed`.
pub fn random_sequence(len: usize, seed: u64) -> Vec<f64> {
    let pool = BoundedPool::new(1).unwrap();
    let mut sequence = vec![0.0; len];
    parexec::algorithms::generate_with(
        &pool,
        &mut sequence,
        |_| uniform_producer(seed),
        ExecutionPolicy::Sequential,
    );
    sequence
}

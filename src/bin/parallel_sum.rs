// SPDX-License-Identifier: MIT

use anyhow::Context;
use parexec::algorithms::{generate_with, sum};
use parexec::{BoundedPool, ExecutionPolicy, Timer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};

const SEQUENCE_LEN: usize = 100_000_000;
const SEED: u64 = 0;
/// The reduction never uses more than this many threads.
const REDUCE_WORKER_CAP: usize = 4;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the progress lines.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let pool = BoundedPool::new(REDUCE_WORKER_CAP)
        .context("failed to start worker pool")?;
    tracing::info!(workers = pool.worker_count(), "reduction pool ready");

    let mut input = vec![0.0f64; SEQUENCE_LEN];

    print!("generating... ");
    io::stdout().flush()?;
    // We fill the vector sequentially.
    generate_with(
        &pool,
        &mut input,
        |_| {
            let mut rng = StdRng::seed_from_u64(SEED);
            move || rng.random::<f64>()
        },
        ExecutionPolicy::Sequential,
    );
    println!("done.");

    print!("reducing... ");
    io::stdout().flush()?;
    let timer = Timer::start();
    let result = sum(&pool, &input, ExecutionPolicy::Parallel);
    let reduce_duration = timer.elapsed_secs();
    println!("done.");

    println!("result is {result}");
    println!("reduction took {reduce_duration} s");
    Ok(())
}

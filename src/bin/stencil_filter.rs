// SPDX-License-Identifier: MIT

use anyhow::Context;
use parexec::algorithms::{filter, generate_with};
use parexec::{hardware_concurrency, BoundedPool, ExecutionPolicy, Timer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};

const SEQUENCE_LEN: usize = 10_000_000;
const SEED: u64 = 0;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the progress lines.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let pool = BoundedPool::new(hardware_concurrency())
        .context("failed to start worker pool")?;
    tracing::info!(workers = pool.worker_count(), "filter pool ready");

    let mut input = vec![0.0f64; SEQUENCE_LEN];
    let mut output = vec![0.0f64; SEQUENCE_LEN];

    print!("generating... ");
    io::stdout().flush()?;
    // Filled sequentially so the seeded generator reproduces the same input.
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

    print!("filtering... ");
    io::stdout().flush()?;
    let timer = Timer::start();
    filter(&pool, &input, &mut output, ExecutionPolicy::Parallel)?;
    let filter_duration = timer.elapsed_secs();
    println!("done.");

    println!("filter took {filter_duration} s");
    Ok(())
}

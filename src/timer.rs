// SPDX-License-Identifier: MIT

use std::time::{Duration, Instant};

/// Wall-clock stopwatch started at construction.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start_time: Instant,
}

impl Timer {
    /// Starts timing now.
    pub fn start() -> Self {
        Timer {
            start_time: Instant::now(),
        }
    }

    /// Time elapsed since the timer was started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};
use std::sync::Mutex;
use std::thread::{self, ThreadId};

/// Records how many times each index of a range has been visited.
pub struct VisitCounter {
    /// One counter per index.
    visits: Vec<AtomicUsize>,
}

impl VisitCounter {
    /// Creates a counter for indices `0..len`, all unvisited.
    pub fn new(len: usize) -> Self {
        VisitCounter {
            visits: (0..len).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    /// Records one visit of `index`.
    pub fn visit(&self, index: usize) {
        self.visits[index].fetch_add(1, SeqCst);
    }

    /// Returns `true` if every index was visited exactly once.
    pub fn all_visited_once(&self) -> bool {
        self.visits.iter().all(|count| count.load(SeqCst) == 1)
    }

    /// Sum of all visits.
    pub fn total(&self) -> usize {
        self.visits.iter().map(|count| count.load(SeqCst)).sum()
    }
}

/// Records the order in which indices were visited and by which thread.
#[derive(Default)]
pub struct VisitLog {
    entries: Mutex<Vec<(usize, ThreadId)>>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `index` along with the current thread.
    pub fn record(&self, index: usize) {
        self.entries
            .lock()
            .unwrap()
            .push((index, thread::current().id()));
    }

    /// Visited indices in recording order.
    pub fn indices(&self) -> Vec<usize> {
        self.entries.lock().unwrap().iter().map(|&(i, _)| i).collect()
    }

    /// Distinct threads that recorded a visit.
    pub fn threads(&self) -> Vec<ThreadId> {
        let mut threads: Vec<ThreadId> = Vec::new();
        for &(_, id) in self.entries.lock().unwrap().iter() {
            if !threads.contains(&id) {
                threads.push(id);
            }
        }
        threads
    }
}

//! Lock-free candidate pool.
//!
//! Filled once from the ordered candidate sequence before workers start,
//! then drained with non-blocking pops. Each candidate is handed to exactly
//! one worker, in sequence order on a first-available basis.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::queue::ArrayQueue;
use credtrial_types::Candidate;

#[derive(Debug)]
pub struct CandidatePool {
    queue: ArrayQueue<Candidate>,
    /// Stats: total candidates pushed.
    pushed: AtomicUsize,
    /// Stats: total candidates popped.
    popped: AtomicUsize,
}

impl CandidatePool {
    /// Create an empty pool. A zero capacity is rounded up to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: ArrayQueue::new(capacity.max(1)),
            pushed: AtomicUsize::new(0),
            popped: AtomicUsize::new(0),
        }
    }

    /// A pool sized to and filled with `candidates`, preserving order.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let pool = Self::new(candidates.len());
        pool.push_many(candidates);
        pool
    }

    /// Returns false if the queue is full.
    pub fn push(&self, candidate: Candidate) -> bool {
        match self.queue.push(candidate) {
            Ok(()) => {
                self.pushed.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the number successfully pushed; stops at the first rejection.
    pub fn push_many(&self, candidates: Vec<Candidate>) -> usize {
        let mut count = 0;
        for candidate in candidates {
            if !self.push(candidate) {
                break;
            }
            count += 1;
        }
        count
    }

    /// Non-blocking pop; `None` once the pool is drained.
    pub fn pop(&self) -> Option<Candidate> {
        let result = self.queue.pop();
        if result.is_some() {
            self.popped.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn total_pushed(&self) -> usize {
        self.pushed.load(Ordering::Relaxed)
    }

    pub fn total_popped(&self) -> usize {
        self.popped.load(Ordering::Relaxed)
    }
}

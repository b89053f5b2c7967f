//! FIFO of directories waiting to be expanded

use std::collections::VecDeque;
use std::path::PathBuf;

/// Pending directories in strict insertion order.
///
/// No deduplication happens here: a directory reachable twice is queued
/// twice.
#[derive(Debug, Default)]
pub struct TraversalQueue {
    pending: VecDeque<PathBuf>,
}

impl TraversalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn enqueue(&mut self, path: PathBuf) {
        self.pending.push_back(path);
    }

    pub fn dequeue(&mut self) -> Option<PathBuf> {
        self.pending.pop_front()
    }
}

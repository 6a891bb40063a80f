use crate::error::{Error, Result};

/// Tracks how deeply nested the value currently being encoded is.
#[derive(Clone, Debug)]
pub struct DepthTracker {
    depth: usize,
    max: usize,
}

impl DepthTracker {
    /// Create a new depth tracker that allows at most `max` nested sequences and aggregates.
    pub fn new(max: usize) -> Self {
        Self { depth: 0, max }
    }

    /// Call on starting any sequence or aggregate.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max {
            return Err(Error::DepthLimit { max: self.max });
        }
        self.depth += 1;
        Ok(())
    }

    /// Call on finishing a sequence or aggregate.
    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "exit() without matching enter()");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

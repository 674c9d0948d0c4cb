//! Evaluation-stack height bookkeeping for generated code.
//!
//! Every emission step maintains two counters: the depth actually reached
//! along the path being generated, and the worst-case depth used to size
//! the generated method's stack reservation. An under-reserved method is
//! rejected by the target verifier, so after each sub-expression is folded
//! in the caller re-checks the reservation upward (`ensure_room`) — a
//! retroactive correction, never a failure.

use tripwire_common::CompileError;

/// Running and maximum evaluation-stack depth during code generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StackHeights {
    current: u32,
    max: u32,
}

impl StackHeights {
    pub fn new() -> StackHeights {
        StackHeights::default()
    }

    /// Depth reached along the path generated so far.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Worst-case depth observed so far; the reservation to declare.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Record `n` values pushed, raising the maximum if a new peak is hit.
    pub fn push(&mut self, n: u32) {
        self.current += n;
        if self.current > self.max {
            self.max = self.current;
        }
    }

    /// Record `n` values popped. Popping below zero means the emitted
    /// sequence is malformed, which aborts code generation.
    pub fn pop(&mut self, n: u32) -> Result<(), CompileError> {
        if n > self.current {
            return Err(CompileError::StackUnderflow {
                popped: n,
                depth: self.current,
            });
        }
        self.current -= n;
        Ok(())
    }

    /// Grow the reservation if `base + extra` exceeds it.
    ///
    /// Called after a sub-expression compiled itself: the enclosing
    /// sequence needed room for `extra` values above the height it started
    /// at, whatever the sub-expression did in between.
    pub fn ensure_room(&mut self, base: u32, extra: u32) {
        let needed = base + extra;
        if needed > self.max {
            self.max = needed;
        }
    }
}

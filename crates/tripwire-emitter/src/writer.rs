//! Accumulates instructions for one injected method body.

use std::fmt;

use crate::{Instruction, StackHeights};

/// Sink for the instruction sequence of one injected method body.
///
/// Emission order is execution order; the writer itself does no height
/// bookkeeping — callers thread a [`StackHeights`] through every emit
/// site, exactly as each sub-expression does for its own pushes and pops.
#[derive(Debug, Default)]
pub struct MethodWriter {
    code: Vec<Instruction>,
}

impl MethodWriter {
    pub fn new() -> MethodWriter {
        MethodWriter::default()
    }

    pub fn emit(&mut self, insn: Instruction) {
        self.code.push(insn);
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Seal the body, declaring the stack reservation the tracker settled
    /// on. The reservation is what the target verifier will hold the
    /// generated method to.
    pub fn finish(self, heights: &StackHeights) -> CompiledCode {
        CompiledCode {
            code: self.code,
            max_stack: heights.max(),
        }
    }
}

/// A sealed instruction sequence with its declared stack reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCode {
    pub(crate) code: Vec<Instruction>,
    pub(crate) max_stack: u32,
}

impl CompiledCode {
    pub fn instructions(&self) -> &[Instruction] {
        &self.code
    }

    pub fn max_stack(&self) -> u32 {
        self.max_stack
    }
}

impl fmt::Display for CompiledCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; max_stack = {}", self.max_stack)?;
        for insn in &self.code {
            writeln!(f, "  {insn}")?;
        }
        Ok(())
    }
}

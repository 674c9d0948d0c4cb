//! Code emission for the tripwire instrumentation engine.
//!
//! Rules can run compiled instead of interpreted: at install time each
//! binding emits a short instruction sequence into the trigger method's
//! injected body. The target verifier rejects methods whose declared
//! evaluation-stack reservation is ever exceeded, so emission tracks the
//! running and worst-case stack depth precisely (`StackHeights`) and the
//! executor checks the reservation at runtime.
//!
//! The instruction set here is the small slice the binding subsystem
//! needs; the surrounding engine owns the full set and the binary format.

pub mod instruction;
pub use instruction::{Instruction, PrimitiveKind};

pub mod stack;
pub use stack::StackHeights;

pub mod writer;
pub use writer::{CompiledCode, MethodWriter};

mod exec;

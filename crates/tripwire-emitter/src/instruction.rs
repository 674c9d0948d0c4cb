//! The instruction slice the binding subsystem emits.
//!
//! These mirror the target method's real opcodes one-to-one (load of the
//! helper receiver, constant push, boxing conversion, named-value store
//! and load) without owning the binary encoding, which belongs to the
//! surrounding engine.

use std::fmt;

use tripwire_common::Value;

/// Primitive widths that need a boxing conversion before entering the
/// helper's named-value store, which holds references only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Boolean,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Class name of the boxed form.
    pub fn boxed_class(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "java.lang.Boolean",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Double => "java.lang.Double",
        }
    }
}

/// One instruction in a generated binding sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push the helper instance for the current firing. +1
    LoadHelper,
    /// Push a constant. +1
    Push(Value),
    /// Convert the primitive on top of the stack to its boxed form. +0
    BoxPrimitive(PrimitiveKind),
    /// Pop (helper, name, value) and store the value under the name. -3
    StoreBinding,
    /// Pop (helper, name) and push the value stored under the name. -1
    LoadBinding,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LoadHelper => write!(f, "load_helper"),
            Instruction::Push(v) => write!(f, "push {v}"),
            Instruction::BoxPrimitive(k) => write!(f, "box {}", k.boxed_class()),
            Instruction::StoreBinding => write!(f, "store_binding"),
            Instruction::LoadBinding => write!(f, "load_binding"),
        }
    }
}

//! Runs a sealed instruction sequence against a helper context.
//!
//! This is the reference executor for generated binding code: a small
//! stack machine whose observable effect must match tree-walking
//! interpretation of the same bindings. It enforces the declared stack
//! reservation on every push — exceeding it is exactly the artifact the
//! target verifier would reject, so it surfaces as an execution error
//! rather than being silently absorbed.

use tracing::trace;
use tripwire_common::{ExecuteError, HelperContext, Value};

use crate::writer::CompiledCode;
use crate::{Instruction, PrimitiveKind};

/// One operand-stack slot. The helper reference is not a `Value`; it only
/// ever flows into the store/load call sequences.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Helper,
    Value(Value),
}

struct Frame {
    stack: Vec<Slot>,
    reserved: u32,
}

impl Frame {
    fn push(&mut self, slot: Slot) -> Result<(), ExecuteError> {
        if self.stack.len() as u32 >= self.reserved {
            return Err(ExecuteError::StackOverflow {
                reserved: self.reserved,
            });
        }
        self.stack.push(slot);
        Ok(())
    }

    fn pop_value(&mut self) -> Result<Value, ExecuteError> {
        match self.stack.pop() {
            Some(Slot::Value(v)) => Ok(v),
            _ => Err(ExecuteError::BadOperand { expected: "value" }),
        }
    }

    fn pop_name(&mut self) -> Result<String, ExecuteError> {
        match self.pop_value()? {
            Value::Str(s) => Ok(s),
            _ => Err(ExecuteError::BadOperand { expected: "name" }),
        }
    }

    fn pop_helper(&mut self) -> Result<(), ExecuteError> {
        match self.stack.pop() {
            Some(Slot::Helper) => Ok(()),
            _ => Err(ExecuteError::BadOperand { expected: "helper" }),
        }
    }
}

impl CompiledCode {
    /// Execute the sequence for one firing, writing named values into the
    /// firing's helper.
    pub fn run(&self, helper: &mut dyn HelperContext) -> Result<(), ExecuteError> {
        let mut frame = Frame {
            stack: Vec::with_capacity(self.max_stack as usize),
            reserved: self.max_stack,
        };

        for insn in &self.code {
            trace!(%insn, depth = frame.stack.len(), "exec");
            match insn {
                Instruction::LoadHelper => frame.push(Slot::Helper)?,
                Instruction::Push(v) => frame.push(Slot::Value(v.clone()))?,
                Instruction::BoxPrimitive(kind) => {
                    let v = frame.pop_value()?;
                    check_primitive(kind, &v)?;
                    // The store holds references; the value representation
                    // is already uniform here, so boxing keeps the value.
                    frame.push(Slot::Value(v))?;
                }
                Instruction::StoreBinding => {
                    let value = frame.pop_value()?;
                    let name = frame.pop_name()?;
                    frame.pop_helper()?;
                    helper.set_binding(&name, value);
                }
                Instruction::LoadBinding => {
                    let name = frame.pop_name()?;
                    frame.pop_helper()?;
                    let value = helper
                        .get_binding(&name)
                        .cloned()
                        .ok_or_else(|| ExecuteError::Unbound(name.clone()))?;
                    frame.push(Slot::Value(value))?;
                }
            }
        }
        Ok(())
    }
}

fn check_primitive(kind: &PrimitiveKind, v: &Value) -> Result<(), ExecuteError> {
    let ok = matches!(
        (kind, v),
        (PrimitiveKind::Boolean, Value::Boolean(_))
            | (PrimitiveKind::Int, Value::Int(_))
            | (PrimitiveKind::Long, Value::Long(_))
            | (PrimitiveKind::Float, Value::Float(_))
            | (PrimitiveKind::Double, Value::Double(_))
    );
    if ok {
        Ok(())
    } else {
        Err(ExecuteError::BadOperand {
            expected: "primitive",
        })
    }
}

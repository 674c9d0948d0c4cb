//! The initializer seam between bindings and the expression AST.
//!
//! The full expression grammar (arithmetic, calls, field access) belongs
//! to the surrounding engine. Bindings only require the contract below,
//! and the two canonical nodes here — a literal constant and a reference
//! to another bound name — are what the install pipeline and tests run
//! against.

use std::fmt;

use tripwire_common::{CompileError, ExecuteError, HelperContext, TypeError, Value};
use tripwire_emitter::{Instruction, MethodWriter, StackHeights};

use crate::Type;

/// An expression producing a binding's value.
///
/// `type_check` runs once at install time; declared types flow down into
/// it and the inferred result flows back up. `interpret` and `compile`
/// are the two execution strategies and must agree observably: whatever
/// `interpret` returns, the compiled form leaves on the evaluation stack.
pub trait Expression: fmt::Debug {
    /// Check against the expected type; returns the inferred type.
    /// An undefined `expected` places no constraint.
    fn type_check(&mut self, expected: &Type) -> Result<Type, TypeError>;

    /// Evaluate against the live firing context.
    fn interpret(&self, helper: &mut dyn HelperContext) -> Result<Value, ExecuteError>;

    /// Emit code leaving this expression's value on the stack, updating
    /// `heights` for every push and pop along the way.
    fn compile(
        &self,
        writer: &mut MethodWriter,
        heights: &mut StackHeights,
    ) -> Result<(), CompileError>;

    /// Append the source rendering of this expression.
    fn write_to(&self, out: &mut String);
}

/// A constant initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Literal {
        Literal { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Expression for Literal {
    fn type_check(&mut self, expected: &Type) -> Result<Type, TypeError> {
        let ty = Type::of_value(&self.value);
        if !expected.is_defined() || *expected == ty {
            return Ok(ty);
        }
        if expected.is_assignable_from(&ty) {
            // Constant conversion: widen the stored value now so the
            // compiled form pushes the width the binding's type declares.
            if let Some(widened) = widen(&self.value, expected) {
                self.value = widened;
            }
            return Ok(expected.clone());
        }
        Err(TypeError::Mismatch {
            expr: self.value.to_string(),
            expected: expected.to_string(),
            found: ty.to_string(),
        })
    }

    fn interpret(&self, _helper: &mut dyn HelperContext) -> Result<Value, ExecuteError> {
        Ok(self.value.clone())
    }

    fn compile(
        &self,
        writer: &mut MethodWriter,
        heights: &mut StackHeights,
    ) -> Result<(), CompileError> {
        writer.emit(Instruction::Push(self.value.clone()));
        heights.push(1);
        Ok(())
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.value.to_string());
    }
}

fn widen(value: &Value, target: &Type) -> Option<Value> {
    match (value, target) {
        (Value::Int(i), Type::Long) => Some(Value::Long(i64::from(*i))),
        (Value::Int(i), Type::Float) => Some(Value::Float(*i as f32)),
        (Value::Int(i), Type::Double) => Some(Value::Double(f64::from(*i))),
        (Value::Long(l), Type::Float) => Some(Value::Float(*l as f32)),
        (Value::Long(l), Type::Double) => Some(Value::Double(*l as f64)),
        (Value::Float(x), Type::Double) => Some(Value::Double(f64::from(*x))),
        _ => None,
    }
}

/// A reference to a value already bound under another name.
///
/// The referenced binding's resolved type is recorded at construction by
/// the installer, keeping this seam free of the binding table itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRef {
    name: String,
    ty: Type,
}

impl VariableRef {
    pub fn new(name: impl Into<String>, ty: Type) -> VariableRef {
        VariableRef {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Expression for VariableRef {
    fn type_check(&mut self, expected: &Type) -> Result<Type, TypeError> {
        if expected.is_defined() && !expected.is_assignable_from(&self.ty) {
            return Err(TypeError::Mismatch {
                expr: self.name.clone(),
                expected: expected.to_string(),
                found: self.ty.to_string(),
            });
        }
        Ok(self.ty.clone())
    }

    fn interpret(&self, helper: &mut dyn HelperContext) -> Result<Value, ExecuteError> {
        helper
            .get_binding(&self.name)
            .cloned()
            .ok_or_else(|| ExecuteError::Unbound(self.name.clone()))
    }

    fn compile(
        &self,
        writer: &mut MethodWriter,
        heights: &mut StackHeights,
    ) -> Result<(), CompileError> {
        writer.emit(Instruction::LoadHelper);
        writer.emit(Instruction::Push(Value::string(self.name.as_str())));
        heights.push(2);
        writer.emit(Instruction::LoadBinding);
        heights.pop(2)?;
        heights.push(1);
        Ok(())
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.name);
    }
}

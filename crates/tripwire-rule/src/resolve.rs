//! The single-pass bidirectional type-resolution pass.
//!
//! Declared types flow down into initializers; inferred types flow back
//! up into the binding's slot. Resolution runs once per binding per
//! install pass — a second call returns the cached type — and must
//! complete before any interpretation or compiled execution, which the
//! evaluator enforces against the stage recorded here.

use tracing::{debug, trace};
use tripwire_common::TypeError;

use crate::binding::{BindingId, Bindings, Stage};
use crate::types::Type;

impl Bindings {
    /// Resolve one binding against the caller's expected type, delegating
    /// wholly to the alias target if one exists.
    pub fn resolve(&mut self, id: BindingId, expected: &Type) -> Result<Type, TypeError> {
        let target = self.target_of(id);
        if target != id {
            trace!(
                binding = self.name(id),
                target = self.name(target),
                "resolve forwarded to alias target"
            );
        }
        let name = self.name(target).to_string();
        let state = self.direct_mut(target);
        if state.stage == Stage::Resolved {
            return Ok(state.ty.clone());
        }

        let declared = state.ty.clone();
        match state.initializer.as_mut() {
            Some(init) => {
                if declared.is_defined() {
                    // Declared type flows down into the initializer.
                    init.type_check(&declared)?;
                    if expected.is_defined() && !expected.is_assignable_from(&declared) {
                        return Err(TypeError::Incompatible {
                            name,
                            declared: declared.to_string(),
                            expected: expected.to_string(),
                        });
                    }
                    state.stage = Stage::Resolved;
                    debug!(binding = %name, ty = %declared, "resolved against declared type");
                    Ok(declared)
                } else {
                    // No declaration: the initializer's inferred type
                    // flows up into the binding's slot.
                    let inferred = init.type_check(expected)?;
                    state.ty = inferred.clone();
                    state.stage = Stage::Resolved;
                    debug!(binding = %name, ty = %inferred, "resolved by inference");
                    Ok(inferred)
                }
            }
            None => {
                if declared.is_undefined() {
                    // Only method-parameter bindings may omit an
                    // initializer, and those carry an externally supplied
                    // declared type before this pass runs.
                    Err(TypeError::Unresolvable(name))
                } else {
                    state.stage = Stage::Resolved;
                    Ok(declared)
                }
            }
        }
    }

    /// The install-time pass: resolve every binding in declaration order
    /// with no outer expectation. Fails on the first error, aborting the
    /// owning rule's install.
    pub fn resolve_all(&mut self) -> Result<(), TypeError> {
        for id in 0..self.len() as u32 {
            self.resolve(BindingId::from_raw(id), &Type::Undefined)?;
        }
        Ok(())
    }
}

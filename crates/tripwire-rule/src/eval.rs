//! The dual-mode evaluator: interpretation and compilation of bindings.
//!
//! Only bind variables do work under either strategy — their initializer
//! is evaluated and the result stored into the firing's named-value
//! store. Every other kind already has its value in the trigger frame
//! and is read directly by referencing expressions, so both strategies
//! treat it as a no-op. Aliased bindings forward verbatim; no code is
//! ever emitted for the alias itself.

use smallvec::SmallVec;
use tracing::{debug, trace};
use tripwire_common::{CompileError, ExecuteError, HelperContext, Value};
use tripwire_emitter::{CompiledCode, Instruction, MethodWriter, StackHeights};

use crate::binding::{BindingId, Bindings};

impl Bindings {
    /// Evaluate one binding against the live firing context.
    ///
    /// Bind variables evaluate their initializer, store the result under
    /// their name, and return it; all other kinds return `Ok(None)`.
    pub fn interpret(
        &self,
        id: BindingId,
        helper: &mut dyn HelperContext,
    ) -> Result<Option<Value>, ExecuteError> {
        if !self.kind(id).is_bind_var() {
            return Ok(None);
        }
        let state = self.direct(self.target_of(id));
        if !self.is_resolved(id) {
            return Err(ExecuteError::Unresolved(self.name(id).to_string()));
        }
        let init = state
            .initializer
            .as_deref()
            .ok_or_else(|| ExecuteError::MissingInitializer(self.name(id).to_string()))?;
        let value = init.interpret(helper)?;
        helper.set_binding(self.name(id), value.clone());
        Ok(Some(value))
    }

    /// Emit the code realizing this binding inside the trigger method.
    ///
    /// For a bind variable the sequence is: load the helper, push the
    /// name, compile the initializer (which updates `heights` itself),
    /// box if the resolved type is primitive, then the store call that
    /// consumes all three values. Afterwards the reservation is
    /// re-checked upward: the sequence needed room for 3 values above
    /// its base height, whatever the initializer did in between.
    pub fn compile(
        &self,
        id: BindingId,
        writer: &mut MethodWriter,
        heights: &mut StackHeights,
    ) -> Result<(), CompileError> {
        if let Some(target) = self.alias_target(id) {
            trace!(
                binding = self.name(id),
                target = self.name(target),
                "compile forwarded to alias target"
            );
            return self.compile(target, writer, heights);
        }
        if !self.kind(id).is_bind_var() {
            return Ok(());
        }
        let state = self.direct(id);
        if !self.is_resolved(id) {
            return Err(CompileError::Unresolved(self.name(id).to_string()));
        }
        let init = state
            .initializer
            .as_deref()
            .ok_or_else(|| CompileError::MissingInitializer(self.name(id).to_string()))?;

        let base = heights.current();
        writer.emit(Instruction::LoadHelper);
        writer.emit(Instruction::Push(Value::string(self.name(id))));
        heights.push(2);
        init.compile(writer, heights)?;
        if let Some(prim) = state.ty.primitive_kind() {
            writer.emit(Instruction::BoxPrimitive(prim));
        }
        writer.emit(Instruction::StoreBinding);
        heights.pop(3)?;
        // The store needed 3 values above the base height; grow the
        // reservation if the initializer's own accounting left it short.
        heights.ensure_room(base, 3);
        Ok(())
    }
}

/// Which of the two conforming strategies a rule was installed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Tree-walk the initializers at every firing.
    Interpreted,
    /// Emit code once at install time, execute it per firing.
    Compiled,
}

#[derive(Debug)]
enum Strategy {
    Interpreted,
    Compiled(CompiledCode),
}

/// A rule's bindings frozen after the install pass, ready to fire.
///
/// Install requires the type-resolution pass and any alias linkage to
/// have completed; the strategy is selected exactly once here. After
/// install the bindings are read-only, so firing may proceed on many
/// threads as long as each firing brings its own helper.
#[derive(Debug)]
pub struct InstalledRule {
    bindings: Bindings,
    bind_vars: SmallVec<[BindingId; 8]>,
    strategy: Strategy,
}

impl InstalledRule {
    pub fn install(bindings: Bindings, mode: ExecutionMode) -> Result<InstalledRule, CompileError> {
        let bind_vars: SmallVec<[BindingId; 8]> = bindings
            .ids()
            .filter(|&id| bindings.kind(id).is_bind_var())
            .collect();
        // The install barrier: no strategy runs an unresolved binding.
        for &id in &bind_vars {
            if !bindings.is_resolved(id) {
                return Err(CompileError::Unresolved(bindings.name(id).to_string()));
            }
        }
        let strategy = match mode {
            ExecutionMode::Interpreted => Strategy::Interpreted,
            ExecutionMode::Compiled => {
                let mut writer = MethodWriter::new();
                let mut heights = StackHeights::new();
                for id in bindings.ids() {
                    bindings.compile(id, &mut writer, &mut heights)?;
                }
                let code = writer.finish(&heights);
                debug!(
                    instructions = code.instructions().len(),
                    max_stack = code.max_stack(),
                    "rule compiled"
                );
                Strategy::Compiled(code)
            }
        };
        Ok(InstalledRule {
            bindings,
            bind_vars,
            strategy,
        })
    }

    pub fn mode(&self) -> ExecutionMode {
        match self.strategy {
            Strategy::Interpreted => ExecutionMode::Interpreted,
            Strategy::Compiled(_) => ExecutionMode::Compiled,
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The sealed instruction sequence, when installed compiled.
    pub fn compiled_code(&self) -> Option<&CompiledCode> {
        match &self.strategy {
            Strategy::Compiled(code) => Some(code),
            Strategy::Interpreted => None,
        }
    }

    /// Run one firing: materialize every bind variable into the firing's
    /// helper under the installed strategy.
    pub fn fire(&self, helper: &mut dyn HelperContext) -> Result<(), ExecuteError> {
        match &self.strategy {
            Strategy::Interpreted => {
                for &id in &self.bind_vars {
                    self.bindings.interpret(id, helper)?;
                }
                Ok(())
            }
            Strategy::Compiled(code) => code.run(helper),
        }
    }
}

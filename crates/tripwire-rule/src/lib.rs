//! Rule binding subsystem for the tripwire instrumentation engine.
//!
//! A rule names values from the trigger point it is injected at — the
//! receiver, positional parameters, pseudo-variables, trigger-method
//! locals — and declares its own bind variables. Each distinct identifier
//! becomes one [`Binding`], classified once from the name's syntactic
//! form, type-resolved once at install time, and then evaluated at every
//! firing either by tree-walking interpretation or by code generated into
//! the trigger method. The two strategies are required to be observably
//! identical.
//!
//! This module is organized into several submodules:
//! - `kind` - Classification of identifiers into binding kinds
//! - `types` - The runtime type model consumed by resolution
//! - `expression` - The initializer seam and its canonical nodes
//! - `binding` - The binding arena with alias indirection
//! - `resolve` - The bidirectional type-resolution pass
//! - `eval` - The dual-mode evaluator and install-time strategy selection

pub mod kind;
pub use kind::BindingKind;

pub mod types;
pub use types::Type;

pub mod expression;
pub use expression::{Expression, Literal, VariableRef};

pub mod binding;
pub use binding::{Binding, BindingId, Bindings};

mod resolve;

pub mod eval;
pub use eval::{ExecutionMode, InstalledRule};

pub use tripwire_common::{
    AliasError, CompileError, ExecuteError, HelperContext, RuleHelper, TypeError, Value,
};

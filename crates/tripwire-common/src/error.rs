//! Error types for the install pass and per-firing execution.
//!
//! The split mirrors the three failure surfaces of the engine: type
//! resolution aborts the owning rule's install, interpretation errors
//! abort a single firing, and code-generation errors abort install-time
//! compilation. Alias misuse gets its own type so the contract is total
//! rather than a logged side channel.

use thiserror::Error;

/// Raised during the one-time type-resolution pass; aborts rule install.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("binding {name}: declared type {declared} is not assignable to expected type {expected}")]
    Incompatible {
        name: String,
        declared: String,
        expected: String,
    },

    #[error("expression {expr}: type {found} is not assignable to {expected}")]
    Mismatch {
        expr: String,
        expected: String,
        found: String,
    },

    #[error("binding {0}: no declared type and no initializer to infer from")]
    Unresolvable(String),
}

/// Raised while evaluating against a live context; aborts one firing only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("no value bound under name {0}")]
    Unbound(String),

    #[error("binding {0} used before type resolution")]
    Unresolved(String),

    #[error("bind variable {0} has no initializer")]
    MissingInitializer(String),

    #[error("generated code exceeded its reserved stack height ({reserved})")]
    StackOverflow { reserved: u32 },

    #[error("generated code popped an operand of the wrong shape: expected {expected}")]
    BadOperand { expected: &'static str },

    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

/// Raised while generating code at install time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("binding {0} compiled before type resolution")]
    Unresolved(String),

    #[error("bind variable {0} has no initializer")]
    MissingInitializer(String),

    #[error("evaluation stack underflow: popped {popped} with {depth} on the stack")]
    StackUnderflow { popped: u32, depth: u32 },

    #[error("cannot generate code for expression {0}")]
    Unsupported(String),
}

/// Raised when alias linkage is attempted on an illegal receiver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("binding {name} of kind {kind} cannot alias: only local-variable bindings forward")]
    NotLocal { name: String, kind: String },

    #[error("binding {0} cannot alias itself")]
    SelfAlias(String),

    #[error("alias target for {0} is not in the rule's binding set")]
    UnknownTarget(String),
}

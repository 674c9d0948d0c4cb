//! Common types and utilities for the tripwire instrumentation engine.
//!
//! This crate provides the foundational types shared by the rule and
//! emitter crates:
//! - Runtime values flowing through interpretation and generated code
//!   (`Value`)
//! - The execution-context seam written by rule bindings (`HelperContext`)
//! - The error types raised by type resolution, interpretation, code
//!   generation, and alias linkage

// Runtime values - Shared between the tree-walking and compiled paths
pub mod value;
pub use value::Value;

// Execution context seam - Shared here to break a circular dependency
// between the rule crate and the code executor
pub mod helper;
pub use helper::{HelperContext, RuleHelper};

// Error types for the install pass and per-firing execution
pub mod error;
pub use error::{AliasError, CompileError, ExecuteError, TypeError};

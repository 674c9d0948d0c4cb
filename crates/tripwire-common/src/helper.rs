//! The execution-context seam between rule bindings and the live frame.
//!
//! Each trigger firing supplies its own context, so concurrent firings
//! never share a named-value store. Bindings write into the store via
//! `set_binding`; referencing expressions read back via `get_binding`.

use rustc_hash::FxHashMap;

use crate::Value;

/// Per-firing execution context ("helper").
///
/// Implementations hold the named-value store for one firing of one rule.
/// Nothing in this trait blocks or is shared across firings.
pub trait HelperContext {
    /// Store a named value for the current firing.
    fn set_binding(&mut self, name: &str, value: Value);

    /// Read a named value stored earlier in the current firing.
    fn get_binding(&self, name: &str) -> Option<&Value>;
}

/// The default helper: a plain map-backed store.
#[derive(Debug, Default)]
pub struct RuleHelper {
    store: FxHashMap<String, Value>,
}

impl RuleHelper {
    pub fn new() -> RuleHelper {
        RuleHelper::default()
    }

    /// Number of values bound so far in this firing.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl HelperContext for RuleHelper {
    fn set_binding(&mut self, name: &str, value: Value) {
        self.store.insert(name.to_string(), value);
    }

    fn get_binding(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }
}

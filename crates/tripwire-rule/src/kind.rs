//! Classification of rule identifiers into binding kinds.
//!
//! The kind is derived once from the name's syntactic form when the
//! binding is constructed and never changes. Context validity — for
//! example that `$!` only means anything in an exit-triggered rule — is
//! the trigger matcher's business, not classification's.

use std::fmt;

/// What a rule identifier refers to.
///
/// One closed classification answers every downstream query; the
/// positional index lives inside `Param` rather than in a shared
/// sentinel field. `Param(0)` is the receiver of the trigger method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `$0`, `$1`, ... — the receiver (index 0) or a trigger-method
    /// parameter, counted from 1.
    Param(u32),
    /// `$$` — the helper implicitly associated with a built-in call.
    Helper,
    /// `$!` — the trigger method's return value; exit-triggered rules only.
    Return,
    /// `$^` — the throwable in flight; throw-triggered rules only.
    Throwable,
    /// `$#` — the trigger method's parameter count.
    ParamCount,
    /// `$*` — the trigger method's parameters as an object array.
    ParamArray,
    /// `$x`, `$total`, ... — a local declared in the trigger method.
    Local,
    /// Any other name — a variable introduced in the rule's binding
    /// section, owning an initializer evaluated at each firing.
    Bind,
}

impl BindingKind {
    /// Classify an identifier. Total: every string maps to some kind.
    pub fn classify(name: &str) -> BindingKind {
        match name {
            "$$" => return BindingKind::Helper,
            "$!" => return BindingKind::Return,
            "$^" => return BindingKind::Throwable,
            "$#" => return BindingKind::ParamCount,
            "$*" => return BindingKind::ParamArray,
            _ => {}
        }
        let Some(rest) = name.strip_prefix('$') else {
            return BindingKind::Bind;
        };
        match rest.chars().next() {
            Some(c) if c.is_ascii_digit() => {
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                BindingKind::Param(digits.parse().unwrap_or(u32::MAX))
            }
            Some(c) if c.is_ascii_alphabetic() => BindingKind::Local,
            // "$" alone, "$_", "$ " and the like fall through to Bind.
            _ => BindingKind::Bind,
        }
    }

    /// A positional parameter proper, i.e. not the receiver.
    pub fn is_param(&self) -> bool {
        matches!(self, BindingKind::Param(i) if *i > 0)
    }

    /// The instance the trigger method was invoked on.
    pub fn is_recipient(&self) -> bool {
        matches!(self, BindingKind::Param(0))
    }

    pub fn is_helper(&self) -> bool {
        matches!(self, BindingKind::Helper)
    }

    pub fn is_bind_var(&self) -> bool {
        matches!(self, BindingKind::Bind)
    }

    pub fn is_local_var(&self) -> bool {
        matches!(self, BindingKind::Local)
    }

    pub fn is_return(&self) -> bool {
        matches!(self, BindingKind::Return)
    }

    pub fn is_throwable(&self) -> bool {
        matches!(self, BindingKind::Throwable)
    }

    pub fn is_param_count(&self) -> bool {
        matches!(self, BindingKind::ParamCount)
    }

    pub fn is_param_array(&self) -> bool {
        matches!(self, BindingKind::ParamArray)
    }

    /// The positional index, for parameter-like kinds. 0 is the receiver.
    pub fn param_index(&self) -> Option<u32> {
        match self {
            BindingKind::Param(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BindingKind::Param(0) => "receiver",
            BindingKind::Param(_) => "parameter",
            BindingKind::Helper => "helper",
            BindingKind::Return => "return value",
            BindingKind::Throwable => "throwable",
            BindingKind::ParamCount => "parameter count",
            BindingKind::ParamArray => "parameter array",
            BindingKind::Local => "local variable",
            BindingKind::Bind => "bind variable",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_classify_as_positional_parameters() {
        assert_eq!(BindingKind::classify("$0"), BindingKind::Param(0));
        assert_eq!(BindingKind::classify("$1"), BindingKind::Param(1));
        assert_eq!(BindingKind::classify("$17"), BindingKind::Param(17));
        // Trailing text after the digit run does not change the index.
        assert_eq!(BindingKind::classify("$2remainder"), BindingKind::Param(2));
    }

    #[test]
    fn index_zero_is_the_receiver() {
        let kind = BindingKind::classify("$0");
        assert!(kind.is_recipient());
        assert!(!kind.is_param());
        assert_eq!(kind.param_index(), Some(0));

        let kind = BindingKind::classify("$1");
        assert!(kind.is_param());
        assert!(!kind.is_recipient());
        assert_eq!(kind.param_index(), Some(1));
    }

    #[test]
    fn pseudo_variables_are_exact_matches_only() {
        assert_eq!(BindingKind::classify("$$"), BindingKind::Helper);
        assert_eq!(BindingKind::classify("$!"), BindingKind::Return);
        assert_eq!(BindingKind::classify("$^"), BindingKind::Throwable);
        assert_eq!(BindingKind::classify("$#"), BindingKind::ParamCount);
        assert_eq!(BindingKind::classify("$*"), BindingKind::ParamArray);

        // Near misses are not pseudo-variables.
        assert_eq!(BindingKind::classify("$$x"), BindingKind::Bind);
        assert_eq!(BindingKind::classify("$!x"), BindingKind::Bind);
        assert_eq!(BindingKind::classify("$*rest"), BindingKind::Bind);
    }

    #[test]
    fn dollar_letter_is_a_trigger_local() {
        assert_eq!(BindingKind::classify("$x"), BindingKind::Local);
        assert_eq!(BindingKind::classify("$total"), BindingKind::Local);
        assert_eq!(BindingKind::classify("$Count2"), BindingKind::Local);
    }

    #[test]
    fn everything_else_is_a_bind_variable() {
        assert_eq!(BindingKind::classify("count"), BindingKind::Bind);
        assert_eq!(BindingKind::classify("x"), BindingKind::Bind);
        assert_eq!(BindingKind::classify(""), BindingKind::Bind);
        assert_eq!(BindingKind::classify("$"), BindingKind::Bind);
        assert_eq!(BindingKind::classify("$_"), BindingKind::Bind);
        assert_eq!(BindingKind::classify("a$b"), BindingKind::Bind);
    }

    #[test]
    fn predicates_are_mutually_exclusive() {
        for name in ["$0", "$3", "$$", "$!", "$^", "$#", "$*", "$loc", "plain"] {
            let kind = BindingKind::classify(name);
            let hits = [
                kind.is_recipient(),
                kind.is_param(),
                kind.is_helper(),
                kind.is_return(),
                kind.is_throwable(),
                kind.is_param_count(),
                kind.is_param_array(),
                kind.is_local_var(),
                kind.is_bind_var(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert_eq!(hits, 1, "{name} matched {hits} predicates");
        }
    }
}

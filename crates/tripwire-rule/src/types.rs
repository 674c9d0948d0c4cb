//! The runtime type model consumed by binding resolution.
//!
//! The engine's full type resolver (class lookup, interface hierarchies)
//! lives outside this subsystem; resolution only needs the queries below:
//! defined/primitive/object predicates, assignability with numeric
//! widening, the primitive-to-boxed mapping, and internal names for
//! emitted call descriptors.

use std::fmt;

use tripwire_common::Value;
use tripwire_emitter::PrimitiveKind;

const OBJECT_CLASS: &str = "java.lang.Object";

/// A resolved or declared runtime type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Not yet known; replaced during type resolution.
    Undefined,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    /// `java.lang.String`; a reference type with literal support.
    Str,
    /// Any other reference type, by class name.
    Object(String),
}

impl Type {
    pub fn object(class: impl Into<String>) -> Type {
        Type::Object(class.into())
    }

    /// The root reference type, assignable from every reference value.
    pub fn any_object() -> Type {
        Type::Object(OBJECT_CLASS.to_string())
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Type::Undefined)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Type::Undefined)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Type::Boolean | Type::Int | Type::Long | Type::Float | Type::Double
        )
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Type::Str | Type::Object(_))
    }

    /// Whether a value of type `source` can be bound where `self` is
    /// expected: identity, numeric widening, or widening to the root
    /// reference type.
    pub fn is_assignable_from(&self, source: &Type) -> bool {
        if self == source {
            return true;
        }
        match (self, source) {
            (Type::Long, Type::Int) => true,
            (Type::Float, Type::Int | Type::Long) => true,
            (Type::Double, Type::Int | Type::Long | Type::Float) => true,
            (Type::Object(class), s) if class == OBJECT_CLASS => s.is_object(),
            _ => false,
        }
    }

    /// The boxed counterpart of a primitive; reference types box to
    /// themselves.
    pub fn boxed(&self) -> Type {
        match self.primitive_kind() {
            Some(kind) => Type::Object(kind.boxed_class().to_string()),
            None => self.clone(),
        }
    }

    /// The emitter's primitive tag, when this type needs boxing before it
    /// can enter the named-value store.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Type::Boolean => Some(PrimitiveKind::Boolean),
            Type::Int => Some(PrimitiveKind::Int),
            Type::Long => Some(PrimitiveKind::Long),
            Type::Float => Some(PrimitiveKind::Float),
            Type::Double => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    /// Internal (descriptor) spelling, as emitted call sites want it.
    pub fn internal_name(&self) -> String {
        match self {
            Type::Undefined => "V".to_string(),
            Type::Boolean => "Z".to_string(),
            Type::Int => "I".to_string(),
            Type::Long => "J".to_string(),
            Type::Float => "F".to_string(),
            Type::Double => "D".to_string(),
            Type::Str => "java/lang/String".to_string(),
            Type::Object(class) => class.replace('.', "/"),
        }
    }

    /// The type a runtime value presents as.
    pub fn of_value(value: &Value) -> Type {
        match value {
            Value::Null => Type::any_object(),
            Value::Boolean(_) => Type::Boolean,
            Value::Int(_) => Type::Int,
            Value::Long(_) => Type::Long,
            Value::Float(_) => Type::Float,
            Value::Double(_) => Type::Double,
            Value::Str(_) => Type::Str,
            Value::Object { class, .. } => Type::Object(class.clone()),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Undefined => f.write_str("undefined"),
            Type::Boolean => f.write_str("boolean"),
            Type::Int => f.write_str("int"),
            Type::Long => f.write_str("long"),
            Type::Float => f.write_str("float"),
            Type::Double => f.write_str("double"),
            Type::Str => f.write_str("java.lang.String"),
            Type::Object(class) => f.write_str(class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_widening_assignability() {
        assert!(Type::Int.is_assignable_from(&Type::Int));
        assert!(Type::Long.is_assignable_from(&Type::Int));
        assert!(Type::Double.is_assignable_from(&Type::Float));
        assert!(!Type::Int.is_assignable_from(&Type::Long));
        assert!(!Type::Boolean.is_assignable_from(&Type::Int));
    }

    #[test]
    fn root_reference_accepts_any_object() {
        let root = Type::any_object();
        assert!(root.is_assignable_from(&Type::Str));
        assert!(root.is_assignable_from(&Type::object("com.acme.Order")));
        // Primitives do not widen to a reference without boxing.
        assert!(!root.is_assignable_from(&Type::Int));
    }

    #[test]
    fn boxing_maps_primitives_to_their_wrappers() {
        assert_eq!(Type::Int.boxed(), Type::object("java.lang.Integer"));
        assert_eq!(Type::Boolean.boxed(), Type::object("java.lang.Boolean"));
        assert_eq!(Type::Str.boxed(), Type::Str);
    }

    #[test]
    fn internal_names_use_descriptor_spelling() {
        assert_eq!(Type::Int.internal_name(), "I");
        assert_eq!(Type::Long.internal_name(), "J");
        assert_eq!(Type::Str.internal_name(), "java/lang/String");
        assert_eq!(
            Type::object("com.acme.Order").internal_name(),
            "com/acme/Order"
        );
    }
}

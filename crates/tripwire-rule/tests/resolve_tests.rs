//! Tests for the bidirectional type-resolution pass.

use tripwire_rule::{Bindings, Literal, Type, TypeError, Value};

#[test]
fn declared_type_flows_down_into_the_initializer() {
    let mut bindings = Bindings::new();
    let id = bindings.declare(
        "count",
        Type::Int,
        Some(Box::new(Literal::new(Value::Int(5)))),
    );
    let ty = bindings.resolve(id, &Type::Undefined).unwrap();
    assert_eq!(ty, Type::Int);
    assert_eq!(*bindings.ty(id), Type::Int);
}

#[test]
fn inferred_type_flows_up_into_the_binding() {
    let mut bindings = Bindings::new();
    let id = bindings.declare(
        "count",
        Type::Undefined,
        Some(Box::new(Literal::new(Value::Int(7)))),
    );
    let ty = bindings.resolve(id, &Type::Undefined).unwrap();
    assert_eq!(ty, Type::Int);
    // The binding's slot adopted the inferred type.
    assert_eq!(*bindings.ty(id), Type::Int);
}

#[test]
fn resolution_is_idempotent() {
    let mut bindings = Bindings::new();
    let id = bindings.declare(
        "label",
        Type::Undefined,
        Some(Box::new(Literal::new(Value::string("on")))),
    );
    let first = bindings.resolve(id, &Type::Undefined).unwrap();
    let second = bindings.resolve(id, &Type::Undefined).unwrap();
    assert_eq!(first, second);
    assert_eq!(second, Type::Str);
}

#[test]
fn initializer_widens_to_the_declared_type() {
    let mut bindings = Bindings::new();
    let id = bindings.declare(
        "total",
        Type::Long,
        Some(Box::new(Literal::new(Value::Int(5)))),
    );
    let ty = bindings.resolve(id, &Type::Undefined).unwrap();
    assert_eq!(ty, Type::Long);
}

#[test]
fn incompatible_initializer_fails_resolution() {
    let mut bindings = Bindings::new();
    let id = bindings.declare(
        "count",
        Type::Int,
        Some(Box::new(Literal::new(Value::string("five")))),
    );
    let err = bindings.resolve(id, &Type::Undefined).unwrap_err();
    assert!(matches!(err, TypeError::Mismatch { .. }));
}

#[test]
fn declared_type_must_satisfy_a_concrete_expectation() {
    let mut bindings = Bindings::new();
    let id = bindings.declare(
        "count",
        Type::Int,
        Some(Box::new(Literal::new(Value::Int(5)))),
    );
    // int is not assignable where boolean is expected.
    let err = bindings.resolve(id, &Type::Boolean).unwrap_err();
    assert!(matches!(err, TypeError::Incompatible { .. }));
}

#[test]
fn parameter_bindings_resolve_from_their_external_type() {
    let mut bindings = Bindings::new();
    let id = bindings.declare("$1", Type::Int, None);
    let ty = bindings.resolve(id, &Type::Undefined).unwrap();
    assert_eq!(ty, Type::Int);
}

#[test]
fn a_binding_with_neither_declaration_nor_initializer_fails() {
    let mut bindings = Bindings::new();
    let id = bindings.declare("$x", Type::Undefined, None);
    let err = bindings.resolve(id, &Type::Undefined).unwrap_err();
    assert_eq!(err, TypeError::Unresolvable("$x".to_string()));
}

#[test]
fn resolve_all_covers_every_binding_and_stops_on_the_first_error() {
    let mut bindings = Bindings::new();
    bindings.declare("$0", Type::any_object(), None);
    bindings.declare(
        "count",
        Type::Undefined,
        Some(Box::new(Literal::new(Value::Int(1)))),
    );
    bindings.resolve_all().unwrap();

    let mut failing = Bindings::new();
    failing.declare("$0", Type::any_object(), None);
    failing.declare("$x", Type::Undefined, None);
    assert!(failing.resolve_all().is_err());
}

#[test]
fn scenario_count_infers_integer() {
    // Name "count" (no $) classifies as a bind variable; resolving it
    // with no declared type against an integer initializer yields int.
    let mut bindings = Bindings::new();
    let id = bindings.declare(
        "count",
        Type::Undefined,
        Some(Box::new(Literal::new(Value::Int(0)))),
    );
    assert!(bindings.kind(id).is_bind_var());
    assert_eq!(bindings.resolve(id, &Type::Undefined).unwrap(), Type::Int);
}

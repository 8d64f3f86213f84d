use super::{FxnType, Kind, Subtypes, TypeVector, Var};

fn vector(kinds: Vec<Kind>) -> TypeVector {
    TypeVector::from(kinds)
}

fn fxn(cons: Vec<Kind>, prod: Vec<Kind>) -> FxnType {
    FxnType::new(vector(cons), vector(prod), false)
}

fn check(ty: &FxnType, expected: &str) {
    assert_eq!(ty.to_string(), expected);
}

#[test]
fn render_identity() {
    check(&FxnType::identity(), "( -> )");
}

#[test]
fn render_simple() {
    let ty = fxn(
        vec![Kind::stack_var("A"), Kind::simple("int")],
        vec![Kind::stack_var("A"), Kind::simple("bool")],
    );

    check(&ty, "('A int -> 'A bool)");
}

#[test]
fn render_side_effects_and_empty_sides() {
    let mut ty = fxn(vec![Kind::simple("string")], vec![]);
    ty.side_effects = true;
    check(&ty, "(string ~> )");

    check(&FxnType::pushing(Kind::simple("int")), "( -> int)");
}

#[test]
fn render_nested() {
    let inner = fxn(vec![Kind::stack_var("A")], vec![Kind::stack_var("B")]);
    let ty = fxn(
        vec![Kind::stack_var("A"), Kind::Function(inner)],
        vec![Kind::stack_var("B")],
    );

    check(&ty, "('A ('A -> 'B) -> 'B)");
}

#[test]
fn variable_categories() {
    assert!(Var::new("A").is_stack_name());
    assert!(Var::new("S12").is_stack_name());
    assert!(!Var::new("a").is_stack_name());
    assert!(!Var::new("t3").is_stack_name());
}

#[test]
fn vector_ends() {
    let mut v = vector(vec![Kind::simple("int"), Kind::simple("bool")]);
    assert_eq!(v.top(), Some(&Kind::simple("bool")));
    assert_eq!(v.bottom(), Some(&Kind::simple("int")));
    assert_eq!(v.rest(), vector(vec![Kind::simple("int")]));

    v.push_bottom(Kind::stack_var("A"));
    v.extend_top(vector(vec![Kind::type_var("a"), Kind::type_var("b")]));
    assert_eq!(v.to_string(), "'A int bool 'a 'b");

    v.extend_bottom(vector(vec![Kind::simple("x")]));
    assert_eq!(v.bottom(), Some(&Kind::simple("x")));
    assert_eq!(TypeVector::new().rest(), TypeVector::new());
}

#[test]
fn closing() {
    let ty = fxn(vec![Kind::simple("int")], vec![Kind::simple("bool")]);
    assert!(!ty.is_closed());

    let closed = ty.close_with(Var::new("R"));
    assert!(closed.is_closed());
    check(&closed, "('R int -> 'R bool)");

    let again = closed.clone().close_with(Var::new("S"));
    assert_eq!(again, closed);
}

#[test]
fn quoting() {
    let body = FxnType::pushing(Kind::simple("int"));
    check(&body.quoted(Var::new("R")), "('R -> 'R ( -> int))");
}

#[test]
fn vars_in_order() {
    let inner = fxn(vec![Kind::stack_var("A")], vec![Kind::type_var("b")]);
    let ty = fxn(
        vec![Kind::stack_var("A"), Kind::Function(inner)],
        vec![Kind::type_var("c"), Kind::type_var("b"), Kind::stack_var("A")],
    );

    assert_eq!(
        ty.vars(),
        vec![
            Kind::stack_var("A"),
            Kind::type_var("b"),
            Kind::type_var("c"),
        ]
    );
}

#[test]
fn subtype_tower() {
    let subtypes = Subtypes::standard();
    assert!(subtypes.is_subtype("byte", "double"));
    assert!(subtypes.is_subtype("int", "int"));
    assert!(!subtypes.is_subtype("double", "int"));
    assert!(subtypes.equivalent("int", "int"));
    assert!(!subtypes.equivalent("double", "byte"));
    assert!(!subtypes.equivalent("int", "double"));
    assert!(!subtypes.equivalent("int", "string"));
}

#[test]
fn subtype_aliases() {
    let mut subtypes = Subtypes::new();
    subtypes.declare_equivalent("char", "byte");
    assert!(subtypes.is_subtype("char", "byte"));
    assert!(subtypes.is_subtype("byte", "char"));
    assert!(subtypes.equivalent("byte", "char"));
    assert!(!subtypes.equivalent("char", "int"));

    subtypes.declare("byte", "int");
    assert!(subtypes.is_subtype("char", "int"));
    assert!(!subtypes.equivalent("char", "int"));
}

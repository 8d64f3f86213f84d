use cat_common::kinds::{FxnType, Kind, Subtypes, TypeVector, Var};
use cat_common::message::Span;

use super::generalize::Generalizer;
use super::names::{var_name, Namer};
use super::unify::Unifier;
use super::{
    construct, normalize, Function, InferError, Options, Session, TypeError, MAX_DEPTH,
};
use crate::parse::tree::{Type, TypeNode};

fn parse(session: &Session, text: &str) -> FxnType {
    session.parse_type(text).unwrap().as_ref().clone()
}

fn functions(session: &Session, sigs: &[&str]) -> Vec<Function> {
    sigs.iter()
        .enumerate()
        .map(|(i, sig)| Function::typed(format!("f{i}"), parse(session, sig)))
        .collect()
}

/// Check that a sequence of functions has the given canonical type.
fn check(sigs: &[&str], expected: &str) {
    let session = Session::default();
    let fs = functions(&session, sigs);
    let ty = session.infer(&fs).unwrap();
    assert_eq!(session.canonical(&ty).to_string(), expected);
}

/// Check that inference fails at the given function, and return the error.
fn check_error(session: &Session, sigs: &[&str], at: usize) -> TypeError {
    let fs = functions(session, sigs);
    let err = session.infer(&fs).unwrap_err();
    assert_eq!(err.at, at);
    err.error
}

fn vector(kinds: Vec<Kind>) -> TypeVector {
    TypeVector::from(kinds)
}

#[test]
fn infer_nothing() {
    let session = Session::default();
    let ty = session.infer(&[]).unwrap();
    assert_eq!(ty.to_string(), "( -> )");
}

#[test]
fn infer_single_is_unchanged() {
    let session = Session::default();
    let fs = functions(&session, &["(int -> bool)"]);
    let ty = session.infer(&fs).unwrap();
    assert_eq!(ty.to_string(), "(int -> bool)");
}

#[test]
fn infer_chain() {
    check(
        &["(int -> int)", "(int -> int)", "(int -> bool)"],
        "('A int -> 'A bool)",
    );
}

#[test]
fn infer_is_associative() {
    let session = Session::default();
    let fs = functions(&session, &["(int -> int)", "(int -> int)", "(int -> bool)"]);

    let all = session.infer(&fs).unwrap();
    let first = session.infer(&fs[..2]).unwrap();
    let nested = session
        .infer(&[Function::typed("fg", first), fs[2].clone()])
        .unwrap();

    assert!(session.same_type(&all, &nested));
    assert!(session.same_type(&all, &parse(&session, "(int -> bool)")));
}

#[test]
fn infer_dup_dup() {
    check(&["('a -> 'a 'a)", "('a -> 'a 'a)"], "('A 'a -> 'A 'a 'a 'a)");
}

#[test]
fn infer_push_consume() {
    check(&["('A -> 'A int)", "('B int -> 'B)"], "('A -> 'A)");
}

#[test]
fn infer_side_effects_spread() {
    check(&["( ~> int)", "(int -> )"], "('A ~> 'A)");
    check(&["( -> int)", "(int ~> )"], "('A ~> 'A)");
}

#[test]
fn infer_stack_shuffling() {
    check(
        &["('R 'a 'b -> 'R 'b 'a)", "('R 'a 'b -> 'R 'b 'a)"],
        "('A 'a 'b -> 'A 'a 'b)",
    );
    check(
        &["( -> int)", "( -> bool)", "('R 'a 'b -> 'R 'b 'a)", "('R 'a -> 'R)"],
        "('A -> 'A bool)",
    );
}

#[test]
fn infer_mismatch() {
    let session = Session::default();
    let err = check_error(&session, &["( -> string)", "(int -> )"], 1);
    assert_eq!(
        err,
        TypeError::KindMismatch {
            left: "string".into(),
            right: "int".into(),
        }
    );
}

#[test]
fn infer_error_keeps_partial_type() {
    let session = Session::default();
    let fs = functions(&session, &["( -> int)", "(int -> bool)", "(string -> )"]);

    let InferError { error, at, partial } = session.infer(&fs).unwrap_err();
    assert!(matches!(error, TypeError::KindMismatch { .. }));
    assert_eq!(at, 2);
    assert_eq!(partial.unwrap().to_string(), "('A -> 'A bool)");
}

#[test]
fn infer_untyped() {
    let session = Session::default();
    let fs = vec![
        Function::typed("one", parse(&session, "( -> int)")),
        Function::new("mystery", None),
    ];

    let err = session.infer(&fs).unwrap_err();
    assert_eq!(
        err.error,
        TypeError::Untyped {
            name: "mystery".into()
        }
    );
    assert_eq!(err.at, 1);
    assert!(err.partial.is_some());

    let err = session.infer(&[Function::new("mystery", None)]).unwrap_err();
    assert_eq!(err.at, 0);
    assert!(err.partial.is_none());
}

#[test]
fn var_is_an_ordinary_type() {
    let session = Session::default();
    let err = check_error(&session, &["( -> var)", "(int -> )"], 1);
    assert!(matches!(err, TypeError::KindMismatch { .. }));

    check(&["( -> var)", "(var -> bool)"], "('A -> 'A bool)");
}

#[test]
fn numbers_do_not_convert() {
    let session = Session::default();
    for sigs in [
        ["( -> double)", "(int -> )"],
        ["( -> int)", "(byte -> )"],
        ["( -> byte)", "(int -> bool)"],
    ] {
        let err = check_error(&session, &sigs, 1);
        assert!(matches!(err, TypeError::KindMismatch { .. }), "{sigs:?}: {err}");
    }
}

#[test]
fn aliases_are_interchangeable() {
    let mut subtypes = Subtypes::standard();
    subtypes.declare_equivalent("char", "byte");
    let session = Session::new(Options {
        subtypes,
        max_depth: MAX_DEPTH,
    });

    let fs = functions(&session, &["( -> char)", "(byte -> bool)"]);
    let ty = session.infer(&fs).unwrap();
    assert_eq!(session.canonical(&ty).to_string(), "('A -> 'A bool)");

    let fs = functions(&session, &["('R 'x -> 'R 'x 'x)", "('R char byte -> 'R)"]);
    let ty = session.infer(&fs).unwrap();
    assert_eq!(session.canonical(&ty).to_string(), "('A byte -> 'A)");
}

#[test]
fn merged_simple_types_must_agree() {
    let session = Session::default();
    let err = check_error(&session, &["('R 'x -> 'R 'x 'x)", "('R double int -> 'R)"], 1);
    assert!(matches!(err, TypeError::KindMismatch { .. }));
}

#[test]
fn merged_functions_are_unified() {
    check(
        &["('R -> 'R 'f 'f)", "('R ('a -> 'a) (int -> 'b) -> 'R 'b)"],
        "('A -> 'A int)",
    );
}

#[test]
fn merged_functions_can_conflict() {
    let session = Session::default();
    let err = check_error(
        &session,
        &["('R -> 'R 'f 'f)", "('R (int -> bool) (int -> string) -> 'R)"],
        1,
    );
    assert!(matches!(err, TypeError::KindMismatch { .. }));
}

#[test]
fn circular_binding() {
    let session = Session::default();
    let err = check_error(&session, &["('R -> 'R 'a 'a)", "('R ('b -> int) 'b -> 'R)"], 1);
    assert!(matches!(err, TypeError::CircularType { .. }));
}

#[test]
fn quotation_is_polymorphic() {
    let session = Session::default();
    let dup = parse(&session, "('a -> 'a 'a)");

    let quoted = session.quote(&dup);
    assert_eq!(quoted.to_string(), "('A -> 'A ('a -> 'a 'a))");

    let ty = session.compose(&quoted, &dup).unwrap();
    assert_eq!(
        ty.to_string(),
        "('A -> 'A ('B 'a -> 'B 'a 'a) ('C 'b -> 'C 'b 'b))"
    );
}

#[test]
fn quotation_then_eval() {
    let session = Session::default();
    let quoted = session.quote(&parse(&session, "( -> int)"));
    let eval = parse(&session, "('A ('A -> 'B) -> 'B)");

    let ty = session.compose(&quoted, &eval).unwrap();
    assert_eq!(ty.to_string(), "('A -> 'A int)");
}

#[test]
fn canonical_comparison() {
    let session = Session::default();
    let same = |a: &str, b: &str| session.same_type(&parse(&session, a), &parse(&session, b));

    assert!(same("(int -> bool)", "('A int -> 'A bool)"));
    assert!(same("('a -> 'a)", "('b -> 'b)"));
    assert!(same("(( -> int) -> )", "('R ('S -> 'S int) -> 'R)"));
    assert!(!same("('a -> 'a)", "(int -> int)"));
    assert!(!same("(int -> bool)", "(int ~> bool)"));
}

#[test]
fn rendering_round_trips() {
    let session = Session::default();

    for text in [
        "( -> )",
        "(int -> bool)",
        "('A 'b ('A 'b -> 'C) ~> 'C)",
        "('R ( -> ) -> 'R ( ~> int))",
    ] {
        let ty = parse(&session, text);
        let inferred = session.infer(&[Function::typed("f", ty.clone())]).unwrap();
        let reparsed = parse(&session, &inferred.to_string());
        assert_eq!(ty, reparsed);
    }
}

#[test]
fn deep_chains_are_too_deep() {
    // Bind 'z_i to ('y_{i+1} -> ) and unify 'z_i with 'y_i, so resolving
    // 'y_0 has to walk the whole chain.
    fn chain(n: usize) -> (FxnType, FxnType) {
        let zs: Vec<_> = (0..n).map(|i| Kind::type_var(format!("z{i}"))).collect();
        let ys: Vec<_> = (0..n).map(|i| Kind::type_var(format!("y{i}"))).collect();
        let links = (0..n).map(|i| {
            Kind::Function(FxnType::new(
                vector(vec![Kind::type_var(format!("y{}", i + 1))]),
                TypeVector::new(),
                false,
            ))
        });

        let mut prod = vector(vec![Kind::stack_var("R")]);
        prod.extend_top(vector(zs.clone()));
        prod.extend_top(vector(zs));

        let mut cons = vector(vec![Kind::stack_var("S")]);
        cons.extend_top(vector(ys));
        cons.extend_top(links.collect());

        let left = FxnType::new(vector(vec![Kind::stack_var("R")]), prod, false);
        let right = FxnType::new(cons, vector(vec![Kind::stack_var("S")]), false);
        (left, right)
    }

    let session = Session::new(Options {
        subtypes: Subtypes::standard(),
        max_depth: 8,
    });

    let (left, right) = chain(3);
    assert!(session.compose(&left, &right).is_ok());

    let (left, right) = chain(20);
    assert_eq!(
        session.compose(&left, &right),
        Err(TypeError::TooDeep { limit: 8 })
    );

    let session = Session::default();
    let (left, right) = chain(5000);
    assert!(matches!(
        session.compose(&left, &right),
        Err(TypeError::TooDeep { .. })
    ));
}

#[test]
fn deep_nesting_is_too_deep() {
    fn nested(n: usize) -> String {
        format!("{}{}", "(".repeat(n + 1), " -> )".repeat(n + 1))
    }

    let session = Session::default();
    assert!(session.parse_type(&nested(20)).is_ok());
    assert_eq!(
        session.parse_type(&nested(300)).unwrap_err(),
        TypeError::TooDeep { limit: 256 }
    );
    assert_eq!(
        session.parse_type(&nested(20_000)).unwrap_err(),
        TypeError::TooDeep { limit: 256 }
    );
    assert!(session.cache().is_empty());
}

#[test]
fn parse_errors() {
    let session = Session::default();
    assert!(matches!(
        session.parse_type("(int -> "),
        Err(TypeError::Syntax(_))
    ));
    assert!(matches!(session.parse_type("int"), Err(TypeError::Syntax(_))));
    assert!(session.cache().is_empty());
}

#[test]
fn parsed_types_are_cached() {
    let session = Session::default();
    let a = session.parse_type("('a -> 'a 'a)").unwrap();
    let b = session.parse_type("('a -> 'a 'a)").unwrap();

    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(session.cache().len(), 1);
}

#[test]
fn construct_rejects_non_functions() {
    let ty = Type {
        node: TypeNode::Name("int".into()),
        span: Span::new(0, 0, 3),
    };
    assert!(matches!(construct(&ty, 256), Err(TypeError::Malformed(_))));

    let ty = Type {
        node: TypeNode::Function {
            cons: vec![Type {
                node: TypeNode::StackVar("a".into()),
                span: Span::new(0, 1, 3),
            }],
            prod: Vec::new(),
            effects: false,
        },
        span: Span::new(0, 0, 8),
    };
    assert!(matches!(construct(&ty, 256), Err(TypeError::Malformed(_))));
}

#[test]
fn session_is_shared_between_threads() {
    fn assert_sync<T: Send + Sync>() {}
    assert_sync::<Session>();

    let session = Session::default();
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let fs = functions(&session, &["('a -> 'a 'a)", "('a -> 'a 'a)", "('R 'a -> 'R)"]);
                    session.infer(&fs).unwrap().to_string()
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert!(results.iter().all(|ty| ty == "('A 'a -> 'A 'a 'a)"));
    assert_eq!(session.cache().len(), 2);
}

#[test]
fn unify_arity_mismatch() {
    let subtypes = Subtypes::standard();
    let mut unifier = Unifier::new(&subtypes, 16);

    let left = vector(vec![Kind::simple("int"), Kind::simple("int")]);
    let right = vector(vec![Kind::simple("int")]);
    assert!(matches!(
        unifier.unify(&left, &right),
        Err(TypeError::KindMismatch { .. })
    ));
}

#[test]
fn generalizer_scopes() {
    let subtypes = Subtypes::standard();
    let mut unifier = Unifier::new(&subtypes, 16);

    let id = FxnType::new(
        vector(vec![Kind::type_var("y")]),
        vector(vec![Kind::type_var("y")]),
        false,
    );
    let left = vector(vec![Kind::stack_var("A"), Kind::type_var("f")]);
    let right = vector(vec![Kind::stack_var("B"), Kind::Function(id)]);
    unifier.unify(&left, &right).unwrap();
    let subst = unifier.resolve().unwrap();

    let context = FxnType::new(
        vector(vec![Kind::stack_var("A")]),
        vector(vec![Kind::stack_var("B"), Kind::type_var("f")]),
        false,
    );
    let mut generalizer = Generalizer::new(&subst, &context, 16);

    assert_eq!(generalizer.is_free(&Var::new("y")), Ok(true));
    assert_eq!(generalizer.is_free(&Var::new("f")), Ok(false));
    assert_eq!(generalizer.is_free(&Var::new("A")), Ok(false));
    assert_eq!(generalizer.is_free(&Var::new("B")), Ok(false));
    assert_eq!(
        generalizer.is_free(&Var::new("z")),
        Err(TypeError::UnresolvedVariable { var: "z".into() })
    );

    let mut namer = Namer::new();
    let applied = generalizer.apply(&mut namer, &context).unwrap();
    let fresh = applied.prod.top().and_then(Kind::as_function).unwrap();
    assert_eq!(fresh.cons, fresh.prod);
    assert_ne!(fresh.cons.top(), Some(&Kind::type_var("y")));
}

#[test]
fn unify_binds_rows() {
    let subtypes = Subtypes::standard();
    let mut unifier = Unifier::new(&subtypes, 16);

    let left = vector(vec![Kind::stack_var("A"), Kind::simple("int"), Kind::type_var("x")]);
    let right = vector(vec![Kind::stack_var("B"), Kind::simple("bool")]);
    unifier.unify(&left, &right).unwrap();

    let subst = unifier.resolve().unwrap();
    assert_eq!(subst.len(), 2);
    assert_eq!(
        subst.get(&Var::new("x")).map(|b| b.describe()),
        Some("bool".into())
    );
    assert_eq!(
        subst.get(&Var::new("B")).map(|b| b.describe()),
        Some("'A int".into())
    );
}

#[test]
fn normalized_names() {
    assert_eq!(var_name(0), "a");
    assert_eq!(var_name(25), "z");
    assert_eq!(var_name(26), "aa");
    assert_eq!(var_name(27), "ab");
    assert_eq!(var_name(702), "aaa");

    let mut namer = Namer::new();
    assert_eq!(namer.fresh_type(), Var::new("t0"));
    assert_eq!(namer.fresh_stack(), Var::new("S1"));

    let session = Session::default();
    let ty = parse(&session, "('X 'q ('Q -> 'Q 'q) -> 'X)");
    assert_eq!(normalize(&ty).to_string(), "('A 'a ('B -> 'B 'a) -> 'A)");
}

//! Signatures of the primitives every program can use.

use cat_common::kinds::FxnType;

use crate::tyck::{Session, TypeError};

pub const PRELUDE: &[(&str, &str)] = &[
    // Stack shuffling
    ("id", "('a -> 'a)"),
    ("dup", "('R 'a -> 'R 'a 'a)"),
    ("pop", "('R 'a -> 'R)"),
    ("swap", "('R 'a 'b -> 'R 'b 'a)"),
    // Combinators
    ("dip", "('A 'b ('A -> 'C) -> 'C 'b)"),
    ("eval", "('A ('A -> 'B) -> 'B)"),
    ("apply", "('A ('A -> 'B) -> 'B)"),
    ("compose", "('R ('A -> 'B) ('B -> 'C) -> 'R ('A -> 'C))"),
    ("qv", "('R 'a -> 'R ('S -> 'S 'a))"),
    ("quote", "('R 'a -> 'R ('S -> 'S 'a))"),
    ("if", "('A bool ('A -> 'B) ('A -> 'B) -> 'B)"),
    ("while", "('A ('A -> 'A) ('A -> 'A bool) -> 'A)"),
    // Booleans
    ("true", "( -> bool)"),
    ("false", "( -> bool)"),
    ("and", "(bool bool -> bool)"),
    ("or", "(bool bool -> bool)"),
    ("not", "(bool -> bool)"),
    // Numbers
    ("add_int", "(int int -> int)"),
    ("sub_int", "(int int -> int)"),
    ("mul_int", "(int int -> int)"),
    ("div_int", "(int int -> int)"),
    ("lt_int", "(int int -> bool)"),
    ("gt_int", "(int int -> bool)"),
    ("eq_int", "(int int -> bool)"),
    ("int_to_double", "(int -> double)"),
    ("int_to_byte", "(int -> byte)"),
    // Strings
    ("str_cat", "(string string -> string)"),
    ("str_length", "(string -> int)"),
    // Input and output
    ("write", "('a ~> )"),
    ("writeln", "('a ~> )"),
    ("read_line", "( ~> string)"),
];

/// Every primitive with its type.
pub fn load(session: &Session) -> Result<Vec<(&'static str, FxnType)>, TypeError> {
    let mut primitives = Vec::with_capacity(PRELUDE.len());
    for (name, sig) in PRELUDE {
        let ty = session.parse_type(sig)?;
        primitives.push((*name, ty.as_ref().clone()));
    }

    Ok(primitives)
}

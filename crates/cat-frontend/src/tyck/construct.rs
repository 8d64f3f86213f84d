use cat_common::kinds::{FxnType, Kind, TypeVector, Var};

use super::{check_depth, TypeError};
use crate::parse::tree::{Type, TypeNode};

/// Build the kind of a parsed type annotation, which must be a function type.
pub fn construct(ty: &Type, max_depth: usize) -> Result<FxnType, TypeError> {
    match &ty.node {
        TypeNode::Function {
            cons,
            prod,
            effects,
        } => construct_fxn(cons, prod, *effects, 0, max_depth),
        TypeNode::Invalid => Err(invalid()),
        _ => Err(TypeError::Malformed(
            "expected a function type at the top level".into(),
        )),
    }
}

fn construct_fxn(
    cons: &[Type],
    prod: &[Type],
    effects: bool,
    depth: usize,
    max_depth: usize,
) -> Result<FxnType, TypeError> {
    check_depth(depth, max_depth)?;

    let vector = |types: &[Type]| -> Result<TypeVector, TypeError> {
        types
            .iter()
            .map(|ty| construct_kind(ty, depth, max_depth))
            .collect()
    };

    Ok(FxnType::new(vector(cons)?, vector(prod)?, effects))
}

fn construct_kind(ty: &Type, depth: usize, max_depth: usize) -> Result<Kind, TypeError> {
    match &ty.node {
        TypeNode::Name(name) => Ok(Kind::Simple(name.clone())),

        TypeNode::TypeVar(name) | TypeNode::StackVar(name) => {
            let var = Var::new(name.clone());
            let is_stack = matches!(ty.node, TypeNode::StackVar(_));

            // The category must agree with the name, or it would change when
            // the type is rendered and parsed again.
            match (is_stack, var.is_stack_name()) {
                (true, true) => Ok(Kind::StackVar(var)),
                (false, false) => Ok(Kind::TypeVar(var)),
                _ => Err(TypeError::Malformed(format!(
                    "the variable '{name} is in the wrong category for its name"
                ))),
            }
        }

        TypeNode::Function {
            cons,
            prod,
            effects,
        } => Ok(Kind::Function(construct_fxn(
            cons,
            prod,
            *effects,
            depth + 1,
            max_depth,
        )?)),

        TypeNode::Invalid => Err(invalid()),
    }
}

fn invalid() -> TypeError {
    TypeError::Malformed("the type contains a syntax error".into())
}

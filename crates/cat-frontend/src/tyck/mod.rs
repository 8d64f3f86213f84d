//! Type inference for sequences of Cat functions.
//!
//! Inference is a left fold of pairwise composition. Composing `f` with `g`
//! closes and renames both types apart, collects the constraints that make the
//! production of `f` the same stack as the consumption of `g`, resolves them
//! into a substitution and applies that to `(f.cons -> g.prod)`.

mod construct;
mod generalize;
mod infer;
mod names;
mod resolve;
mod session;
mod unify;

#[cfg(test)]
mod tests;

use cat_common::kinds::{FxnType, Subtypes};
use thiserror::Error;

pub use construct::construct;
pub use infer::{Function, Inferrer};
pub use names::normalize;
pub use session::{Session, TypeCache};

/// Default bound on nesting and chain length during inference.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Debug)]
pub struct Options {
    pub subtypes: Subtypes,
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            subtypes: Subtypes::standard(),
            max_depth: MAX_DEPTH,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TypeError {
    #[error("syntax error in type: {0}")]
    Syntax(String),

    #[error("malformed type: {0}")]
    Malformed(String),

    #[error("incompatible kinds: {left} conflicts with {right}")]
    KindMismatch { left: String, right: String },

    #[error("circular type: '{var} would contain itself")]
    CircularType { var: String },

    #[error("unresolved type variable '{var}")]
    UnresolvedVariable { var: String },

    #[error("type nests or chains more than {limit} levels deep")]
    TooDeep { limit: usize },

    #[error("'{name}' has no type")]
    Untyped { name: String },
}

impl TypeError {
    pub(crate) fn mismatch(left: impl ToString, right: impl ToString) -> Self {
        Self::KindMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// A failure somewhere in a sequence of functions. `at` is the index of the
/// function that could not be composed, and `partial` the type of everything
/// before it, if there was anything.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("at function {at}: {error}")]
pub struct InferError {
    pub error: TypeError,
    pub at: usize,
    pub partial: Option<FxnType>,
}

/// Bail out with [`TypeError::TooDeep`] once `depth` passes `limit`.
pub(crate) fn check_depth(depth: usize, limit: usize) -> Result<(), TypeError> {
    if depth > limit {
        Err(TypeError::TooDeep { limit })
    } else {
        Ok(())
    }
}

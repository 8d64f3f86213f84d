use cat_common::kinds::{FxnType, Kind};
use log::{debug, info, trace};

use super::generalize::Generalizer;
use super::names::{close_deep, normalize, Namer, Renamer};
use super::unify::Unifier;
use super::{InferError, Options, TypeError};

/// A function in a sequence, with its type if one is known.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    pub name: String,
    pub ty: Option<FxnType>,
}

impl Function {
    pub fn new(name: impl Into<String>, ty: Option<FxnType>) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn typed(name: impl Into<String>, ty: FxnType) -> Self {
        Self::new(name, Some(ty))
    }

    fn ty(&self) -> Result<&FxnType, TypeError> {
        self.ty.as_ref().ok_or_else(|| TypeError::Untyped {
            name: self.name.clone(),
        })
    }
}

/// State for a single inference. Fresh names are only unique within one
/// `Inferrer`.
#[derive(Debug)]
pub struct Inferrer<'a> {
    options: &'a Options,
    namer: Namer,
    renamer: Renamer,
}

impl<'a> Inferrer<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            namer: Namer::new(),
            renamer: Renamer::new(),
        }
    }

    /// Infer the type of running `functions` one after the other.
    pub fn infer(&mut self, functions: &[Function]) -> Result<FxnType, InferError> {
        info!("beginning inference of {} functions", functions.len());

        let Some((first, rest)) = functions.split_first() else {
            return Ok(FxnType::identity());
        };

        let mut result = first.ty().cloned().map_err(|error| InferError {
            error,
            at: 0,
            partial: None,
        })?;

        for (index, function) in rest.iter().enumerate() {
            match function.ty().and_then(|ty| self.compose(&result, ty)) {
                Ok(ty) => result = ty,
                Err(error) => {
                    debug!("inference failed at '{}': {error}", function.name);
                    return Err(InferError {
                        error,
                        at: index + 1,
                        partial: Some(result),
                    });
                }
            }
        }

        Ok(result)
    }

    /// The type of running `left` and then `right`.
    pub fn compose(&mut self, left: &FxnType, right: &FxnType) -> Result<FxnType, TypeError> {
        debug!("composing {left} with {right}");

        let left = close_deep(&mut self.namer, left);
        let right = close_deep(&mut self.namer, right);

        let left = self.rename_apart(&left);
        let right = self.rename_apart(&right);
        debug!("renamed apart to {left} and {right}");

        let mut unifier = Unifier::new(&self.options.subtypes, self.options.max_depth);
        unifier.unify(&left.prod, &right.cons)?;

        let raw = FxnType::new(left.cons, right.prod, left.side_effects || right.side_effects);
        let subst = unifier.resolve()?;

        let mut generalizer = Generalizer::new(&subst, &raw, self.options.max_depth);
        let applied = generalizer.apply(&mut self.namer, &raw)?;

        let result = normalize(&applied);
        debug!("composed to {result}");
        Ok(result)
    }

    /// The type of a quotation whose body has type `body`.
    pub fn quote(&mut self, body: &FxnType) -> FxnType {
        let body = self.rename_apart(body);
        let row = self.namer.fresh_stack();
        normalize(&body.quoted(row))
    }

    /// The form two types are compared in: closed, with normalized names.
    pub fn canonical(&mut self, ty: &FxnType) -> FxnType {
        normalize(&close_deep(&mut self.namer, ty))
    }

    fn rename_apart(&mut self, ty: &FxnType) -> FxnType {
        self.renamer.reset();
        let renamed = self.renamer.rename_all(&mut self.namer, ty);

        for kind in renamed.vars() {
            if let Kind::TypeVar(var) | Kind::StackVar(var) = kind {
                if let Some(origin) = self.renamer.origin(&var) {
                    trace!("{var} stands for {origin}");
                }
            }
        }

        renamed
    }
}

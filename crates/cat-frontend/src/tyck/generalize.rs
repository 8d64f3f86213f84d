use std::collections::{HashMap, HashSet};

use cat_common::kinds::{FxnType, Kind, TypeVector, Var};
use log::trace;

use super::names::{Namer, Renamer};
use super::resolve::Substitution;
use super::unify::Binding;
use super::{check_depth, TypeError};

/// Where a variable was seen.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Scope {
    /// In the type being built, so it keeps its identity.
    Context,
    /// In the binding of exactly this variable.
    Binding(Var),
    /// In the bindings of several variables.
    Shared,
}

/// Applies a substitution to a composed type. Variables that only occur
/// inside the binding of a single type variable are free, and get fresh names
/// every time that binding is used.
#[derive(Debug)]
pub struct Generalizer<'s> {
    subst: &'s Substitution,
    scopes: HashMap<Var, Scope>,
    renamer: Renamer,
    limit: usize,
}

impl<'s> Generalizer<'s> {
    pub fn new(subst: &'s Substitution, context: &FxnType, limit: usize) -> Self {
        let mut scopes = HashMap::new();

        for (key, binding) in subst.iter() {
            let mut vars = Vec::new();
            match binding {
                Binding::Type(kind) => kind.collect_vars(&mut vars),
                Binding::Stack(vector) => vector.collect_vars(&mut vars),
            }

            for var in vars.into_iter().filter_map(into_var) {
                scopes
                    .entry(var)
                    .and_modify(|scope| {
                        if *scope != Scope::Binding(key.clone()) {
                            *scope = Scope::Shared;
                        }
                    })
                    .or_insert_with(|| Scope::Binding(key.clone()));
            }
        }

        for var in context.vars().into_iter().filter_map(into_var) {
            scopes.insert(var, Scope::Context);
        }

        Self {
            subst,
            scopes,
            renamer: Renamer::new(),
            limit,
        }
    }

    /// Is this variable local to a single binding?
    pub fn is_free(&self, var: &Var) -> Result<bool, TypeError> {
        if self.subst.contains(var) {
            return Ok(false);
        }

        match self.scopes.get(var) {
            Some(Scope::Binding(_)) => Ok(true),
            Some(Scope::Context | Scope::Shared) => Ok(false),
            None => Err(TypeError::UnresolvedVariable {
                var: var.name().into(),
            }),
        }
    }

    pub fn apply(&mut self, namer: &mut Namer, fxn: &FxnType) -> Result<FxnType, TypeError> {
        self.apply_fxn(namer, fxn, 0)
    }

    fn apply_fxn(
        &mut self,
        namer: &mut Namer,
        fxn: &FxnType,
        depth: usize,
    ) -> Result<FxnType, TypeError> {
        check_depth(depth, self.limit)?;

        let cons = self.apply_vector(namer, &fxn.cons, depth)?;
        let prod = self.apply_vector(namer, &fxn.prod, depth)?;
        Ok(FxnType::new(cons, prod, fxn.side_effects))
    }

    fn apply_vector(
        &mut self,
        namer: &mut Namer,
        vector: &TypeVector,
        depth: usize,
    ) -> Result<TypeVector, TypeError> {
        let mut result = TypeVector::new();

        for kind in vector.iter() {
            match kind {
                Kind::TypeVar(var) | Kind::StackVar(var) => match self.subst.get(var) {
                    Some(Binding::Type(Kind::Function(fxn))) => {
                        let fxn = self.instantiate(namer, fxn)?;
                        result.push_top(Kind::Function(fxn));
                    }

                    Some(Binding::Type(kind)) => result.push_top(kind.clone()),
                    Some(Binding::Stack(spliced)) => result.extend_top(spliced.clone()),
                    None => result.push_top(kind.clone()),
                },

                Kind::Function(fxn) => {
                    let fxn = self.apply_fxn(namer, fxn, depth + 1)?;
                    result.push_top(Kind::Function(fxn));
                }

                Kind::Simple(_) => result.push_top(kind.clone()),
            }
        }

        Ok(result)
    }

    /// Copy a function-valued binding, with its free variables renamed.
    fn instantiate(&mut self, namer: &mut Namer, fxn: &FxnType) -> Result<FxnType, TypeError> {
        let mut free = HashSet::new();
        for var in fxn.vars().into_iter().filter_map(into_var) {
            if self.is_free(&var)? {
                free.insert(var);
            }
        }

        self.renamer.reset();
        let fresh = self
            .renamer
            .rename_fxn(namer, fxn, &|var: &Var| free.contains(var));

        if !free.is_empty() {
            trace!("instantiated {fxn} as {fresh}");
        }

        Ok(fresh)
    }
}

fn into_var(kind: Kind) -> Option<Var> {
    match kind {
        Kind::TypeVar(var) | Kind::StackVar(var) => Some(var),
        _ => None,
    }
}

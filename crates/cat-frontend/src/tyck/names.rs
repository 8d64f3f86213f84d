use std::collections::HashMap;

use bimap::BiMap;
use cat_common::kinds::{FxnType, Kind, TypeVector, Var};

/// Source of fresh variable names for a single inference. Generated names
/// always contain a digit, so they never collide with normalized names.
#[derive(Debug, Default)]
pub struct Namer {
    count: usize,
}

impl Namer {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn fresh_type(&mut self) -> Var {
        Var::new(format!("t{}", self.next()))
    }

    pub fn fresh_stack(&mut self) -> Var {
        Var::new(format!("S{}", self.next()))
    }

    /// A fresh variable of the same category as `var`.
    pub fn fresh_like(&mut self, var: &Var) -> Var {
        if var.is_stack_name() {
            self.fresh_stack()
        } else {
            self.fresh_type()
        }
    }

    fn next(&mut self) -> usize {
        let count = self.count;
        self.count += 1;
        count
    }
}

/// Consistently renames variables within one pass, remembering where every
/// fresh name came from.
#[derive(Debug, Default)]
pub struct Renamer {
    names: BiMap<Var, Var>,
}

impl Renamer {
    pub fn new() -> Self {
        Self { names: BiMap::new() }
    }

    /// Start a new pass. Variables seen before will get new names.
    pub fn reset(&mut self) {
        self.names.clear();
    }

    /// The variable a fresh name was made for in the current pass.
    pub fn origin(&self, fresh: &Var) -> Option<&Var> {
        self.names.get_by_right(fresh)
    }

    /// Rename every variable in `fxn`.
    pub fn rename_all(&mut self, namer: &mut Namer, fxn: &FxnType) -> FxnType {
        self.rename_fxn(namer, fxn, &|_| true)
    }

    /// Rename the variables of `fxn` for which `renames` holds.
    pub fn rename_fxn(
        &mut self,
        namer: &mut Namer,
        fxn: &FxnType,
        renames: &impl Fn(&Var) -> bool,
    ) -> FxnType {
        FxnType::new(
            self.rename_vector(namer, &fxn.cons, renames),
            self.rename_vector(namer, &fxn.prod, renames),
            fxn.side_effects,
        )
    }

    fn rename_vector(
        &mut self,
        namer: &mut Namer,
        vector: &TypeVector,
        renames: &impl Fn(&Var) -> bool,
    ) -> TypeVector {
        vector
            .iter()
            .map(|kind| self.rename_kind(namer, kind, renames))
            .collect()
    }

    fn rename_kind(
        &mut self,
        namer: &mut Namer,
        kind: &Kind,
        renames: &impl Fn(&Var) -> bool,
    ) -> Kind {
        match kind {
            Kind::TypeVar(var) if renames(var) => Kind::TypeVar(self.rename(namer, var)),
            Kind::StackVar(var) if renames(var) => Kind::StackVar(self.rename(namer, var)),
            Kind::Function(fxn) => Kind::Function(self.rename_fxn(namer, fxn, renames)),
            _ => kind.clone(),
        }
    }

    fn rename(&mut self, namer: &mut Namer, var: &Var) -> Var {
        if let Some(fresh) = self.names.get_by_left(var) {
            return fresh.clone();
        }

        let fresh = namer.fresh_like(var);
        self.names.insert(var.clone(), fresh.clone());
        fresh
    }
}

/// Close `fxn` and every function type nested inside it with fresh row
/// variables.
pub fn close_deep(namer: &mut Namer, fxn: &FxnType) -> FxnType {
    let close_vector = |namer: &mut Namer, vector: &TypeVector| -> TypeVector {
        vector
            .iter()
            .map(|kind| match kind {
                Kind::Function(inner) => Kind::Function(close_deep(namer, inner)),
                other => other.clone(),
            })
            .collect()
    };

    let cons = close_vector(namer, &fxn.cons);
    let prod = close_vector(namer, &fxn.prod);
    let row = namer.fresh_stack();
    FxnType::new(cons, prod, fxn.side_effects).close_with(row)
}

/// Rename every variable to `'a 'b ..` or `'A 'B ..`, in order of first
/// appearance.
pub fn normalize(fxn: &FxnType) -> FxnType {
    let mut names = HashMap::new();
    let (mut types, mut stacks) = (0, 0);

    for var in fxn.vars() {
        let (var, name) = match var {
            Kind::TypeVar(var) => {
                types += 1;
                (var, number_to_var_name(types - 1, b'a'))
            }

            Kind::StackVar(var) => {
                stacks += 1;
                (var, number_to_var_name(stacks - 1, b'A'))
            }

            _ => continue,
        };

        names.insert(var, Var::new(name));
    }

    substitute_names(fxn, &names)
}

fn substitute_names(fxn: &FxnType, names: &HashMap<Var, Var>) -> FxnType {
    let vector = |vector: &TypeVector| -> TypeVector {
        vector
            .iter()
            .map(|kind| match kind {
                Kind::TypeVar(var) => Kind::TypeVar(names.get(var).unwrap_or(var).clone()),
                Kind::StackVar(var) => Kind::StackVar(names.get(var).unwrap_or(var).clone()),
                Kind::Function(inner) => Kind::Function(substitute_names(inner, names)),
                Kind::Simple(_) => kind.clone(),
            })
            .collect()
    };

    FxnType::new(vector(&fxn.cons), vector(&fxn.prod), fxn.side_effects)
}

/// Bijective base 26: `a`, `b`, .., `z`, `aa`, `ab`, ..
fn number_to_var_name(mut num: usize, base: u8) -> String {
    let mut result = Vec::new();

    loop {
        result.push(base + (num % 26) as u8);
        if num < 26 {
            break;
        }

        num = num / 26 - 1;
    }

    result.reverse();
    result.into_iter().map(char::from).collect()
}

#[cfg(test)]
pub(super) fn var_name(num: usize) -> String {
    number_to_var_name(num, b'a')
}

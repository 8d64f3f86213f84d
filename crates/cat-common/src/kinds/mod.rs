//! Kinds are the types of Cat functions and of the values they move around.
//! Every function has a [`FxnType`], which describes the part of the stack it
//! consumes and the part of the stack it produces as two [`TypeVector`]s.
//!
//! A vector is listed bottom first, so the last element is the top of the
//! stack. Stack variables stand for any number of slots, type variables for
//! exactly one. The category of a variable is visible in its name: type
//! variables start with a lowercase letter, stack variables with an uppercase
//! one. This keeps the rendered form unambiguous.

mod display;
mod subtype;

#[cfg(test)]
mod tests;

pub use subtype::Subtypes;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Var(String);

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "variables must have a name");
        Self(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Does this name belong to a stack variable?
    pub fn is_stack_name(&self) -> bool {
        self.0.chars().next().map_or(false, char::is_uppercase)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    TypeVar(Var),
    StackVar(Var),
    Simple(String),
    Function(FxnType),
}

impl Kind {
    pub fn type_var(name: impl Into<String>) -> Self {
        let var = Var::new(name);
        debug_assert!(!var.is_stack_name());
        Self::TypeVar(var)
    }

    pub fn stack_var(name: impl Into<String>) -> Self {
        let var = Var::new(name);
        debug_assert!(var.is_stack_name());
        Self::StackVar(var)
    }

    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple(name.into())
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Self::TypeVar(_) | Self::StackVar(_))
    }

    pub fn as_function(&self) -> Option<&FxnType> {
        match self {
            Self::Function(fxn) => Some(fxn),
            _ => None,
        }
    }

    /// Push every variable in this kind onto `vars`, in order of first
    /// appearance, skipping ones already present.
    pub fn collect_vars(&self, vars: &mut Vec<Kind>) {
        match self {
            Self::TypeVar(_) | Self::StackVar(_) => {
                if !vars.contains(self) {
                    vars.push(self.clone());
                }
            }

            Self::Function(fxn) => fxn.collect_vars(vars),
            Self::Simple(_) => {}
        }
    }
}

/// A slice of the stack, bottom first.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct TypeVector {
    kinds: Vec<Kind>,
}

impl TypeVector {
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    pub fn kinds(&self) -> &[Kind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn top(&self) -> Option<&Kind> {
        self.kinds.last()
    }

    pub fn bottom(&self) -> Option<&Kind> {
        self.kinds.first()
    }

    /// Everything but the top.
    pub fn rest(&self) -> TypeVector {
        match self.kinds.split_last() {
            Some((_, rest)) => rest.iter().cloned().collect(),
            None => TypeVector::new(),
        }
    }

    pub fn push_top(&mut self, kind: Kind) {
        self.kinds.push(kind);
    }

    pub fn push_bottom(&mut self, kind: Kind) {
        self.kinds.insert(0, kind);
    }

    /// Splice another vector on top of this one.
    pub fn extend_top(&mut self, other: TypeVector) {
        self.kinds.extend(other.kinds);
    }

    /// Splice another vector underneath this one.
    pub fn extend_bottom(&mut self, other: TypeVector) {
        self.kinds.splice(0..0, other.kinds);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Kind> {
        self.kinds.iter()
    }

    pub fn collect_vars(&self, vars: &mut Vec<Kind>) {
        for kind in self.kinds.iter() {
            kind.collect_vars(vars);
        }
    }
}

impl FromIterator<Kind> for TypeVector {
    fn from_iter<T: IntoIterator<Item = Kind>>(iter: T) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Kind>> for TypeVector {
    fn from(kinds: Vec<Kind>) -> Self {
        Self { kinds }
    }
}

impl IntoIterator for TypeVector {
    type Item = Kind;
    type IntoIter = std::vec::IntoIter<Kind>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.into_iter()
    }
}

impl<'a> IntoIterator for &'a TypeVector {
    type Item = &'a Kind;
    type IntoIter = std::slice::Iter<'a, Kind>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.iter()
    }
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FxnType {
    pub cons: TypeVector,
    pub prod: TypeVector,
    pub side_effects: bool,
}

impl FxnType {
    pub fn new(cons: TypeVector, prod: TypeVector, side_effects: bool) -> Self {
        Self {
            cons,
            prod,
            side_effects,
        }
    }

    /// The type `( -> )`, which does nothing to the stack.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The type of a function which pushes a single value of type `kind`.
    pub fn pushing(kind: Kind) -> Self {
        Self::new(TypeVector::new(), TypeVector::from(vec![kind]), false)
    }

    /// Is the bottom of the consumption a stack variable?
    pub fn is_closed(&self) -> bool {
        matches!(self.cons.bottom(), Some(Kind::StackVar(_)))
    }

    /// Put `row` at the bottom of both vectors, unless this function type is
    /// already closed.
    pub fn close_with(mut self, row: Var) -> Self {
        if !self.is_closed() {
            self.cons.push_bottom(Kind::StackVar(row.clone()));
            self.prod.push_bottom(Kind::StackVar(row));
        }

        self
    }

    /// The type `('R -> 'R self)` of a quotation with this type as its body.
    pub fn quoted(self, row: Var) -> Self {
        let cons = TypeVector::from(vec![Kind::StackVar(row.clone())]);
        let prod = TypeVector::from(vec![Kind::StackVar(row), Kind::Function(self)]);
        Self::new(cons, prod, false)
    }

    /// Every variable in this type, consumption before production, bottom
    /// before top, outer before inner.
    pub fn vars(&self) -> Vec<Kind> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    pub fn collect_vars(&self, vars: &mut Vec<Kind>) {
        self.cons.collect_vars(vars);
        self.prod.collect_vars(vars);
    }
}

use std::collections::HashMap;

use cat_common::kinds::{Kind, Subtypes, TypeVector, Var};
use log::trace;

use super::{check_depth, TypeError};

/// How many pending obligations may be processed per level of `max_depth`.
const STEPS_PER_LEVEL: usize = 64;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClassId(usize);

/// What a class of variables stands for. Type variables are bound to a single
/// kind, stack variables to a run of them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Binding {
    Type(Kind),
    Stack(TypeVector),
}

impl Binding {
    pub fn describe(&self) -> String {
        match self {
            Self::Type(kind) => kind.to_string(),
            Self::Stack(vector) => describe(vector.kinds()),
        }
    }
}

/// A set of variables which have been unified with each other. Classes that
/// were merged into another are left empty.
#[derive(Debug)]
pub(super) struct Class {
    pub members: Vec<Var>,
    pub value: Option<Binding>,
}

impl Class {
    /// The variable an unbound class resolves to.
    pub fn representative(&self) -> &Var {
        &self.members[0]
    }
}

#[derive(Debug)]
enum Pending {
    Kinds(Kind, Kind),
    Vectors(TypeVector, TypeVector),
}

#[derive(Debug)]
pub struct Unifier<'a> {
    subtypes: &'a Subtypes,
    pub(super) limit: usize,
    pub(super) classes: Vec<Class>,
    pub(super) vars: HashMap<Var, ClassId>,
    pending: Vec<Pending>,
}

impl<'a> Unifier<'a> {
    pub fn new(subtypes: &'a Subtypes, limit: usize) -> Self {
        Self {
            subtypes,
            limit,
            classes: Vec::new(),
            vars: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Constrain `left` and `right` to describe the same stack, and work
    /// through every obligation that follows from that.
    pub fn unify(&mut self, left: &TypeVector, right: &TypeVector) -> Result<(), TypeError> {
        self.unify_vectors(left, right, 0)?;
        self.solve()
    }

    pub(super) fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    fn solve(&mut self) -> Result<(), TypeError> {
        let max_steps = self.limit.saturating_mul(STEPS_PER_LEVEL);
        let mut steps = 0;

        while let Some(pending) = self.pending.pop() {
            steps += 1;
            if steps > max_steps {
                return Err(TypeError::TooDeep { limit: self.limit });
            }

            match pending {
                Pending::Kinds(a, b) => {
                    trace!("pending: {a} ~ {b}");
                    self.unify_kinds(&a, &b, 0)?;
                }

                Pending::Vectors(a, b) => {
                    trace!("pending: {a} ~ {b}");
                    self.unify_vectors(&a, &b, 0)?;
                }
            }
        }

        Ok(())
    }

    /// Walk both vectors from the top down. A stack variable on either side
    /// swallows everything that remains on the other.
    fn unify_vectors(
        &mut self,
        left: &TypeVector,
        right: &TypeVector,
        depth: usize,
    ) -> Result<(), TypeError> {
        check_depth(depth, self.limit)?;

        let mut left = left.kinds();
        let mut right = right.kinds();

        loop {
            match (left.split_last(), right.split_last()) {
                (None, None) => return Ok(()),

                (Some((Kind::StackVar(a), below_a)), Some((Kind::StackVar(b), below_b))) => {
                    if below_a.is_empty() && below_b.is_empty() {
                        return self.union(a, b);
                    }

                    self.bind_stack(a, right)?;
                    return self.bind_stack(b, left);
                }

                (Some((Kind::StackVar(a), _)), _) => return self.bind_stack(a, right),
                (_, Some((Kind::StackVar(b), _))) => return self.bind_stack(b, left),

                (Some((a, below_a)), Some((b, below_b))) => {
                    self.unify_kinds(a, b, depth)?;
                    left = below_a;
                    right = below_b;
                }

                (Some(_), None) | (None, Some(_)) => {
                    return Err(TypeError::mismatch(describe(left), describe(right)));
                }
            }
        }
    }

    fn unify_kinds(&mut self, a: &Kind, b: &Kind, depth: usize) -> Result<(), TypeError> {
        trace!("{a} ~ {b}");

        match (a, b) {
            (Kind::TypeVar(x), Kind::TypeVar(y)) => self.union(x, y),

            (Kind::StackVar(_), _) | (_, Kind::StackVar(_)) => Err(TypeError::mismatch(a, b)),

            (Kind::TypeVar(x), other) | (other, Kind::TypeVar(x)) => {
                let id = self.class_of(x);
                self.bind(id, Binding::Type(other.clone()))
            }

            (Kind::Function(f), Kind::Function(g)) => {
                self.unify_vectors(&f.cons, &g.cons, depth + 1)?;
                self.unify_vectors(&f.prod, &g.prod, depth + 1)
            }

            (Kind::Simple(x), Kind::Simple(y)) => {
                if self.subtypes.equivalent(x, y) {
                    Ok(())
                } else {
                    Err(TypeError::mismatch(a, b))
                }
            }

            _ => Err(TypeError::mismatch(a, b)),
        }
    }

    fn class_of(&mut self, var: &Var) -> ClassId {
        if let Some(id) = self.vars.get(var) {
            return *id;
        }

        let id = ClassId(self.classes.len());
        self.classes.push(Class {
            members: vec![var.clone()],
            value: None,
        });
        self.vars.insert(var.clone(), id);
        id
    }

    fn bind_stack(&mut self, var: &Var, kinds: &[Kind]) -> Result<(), TypeError> {
        if let [Kind::StackVar(other)] = kinds {
            return self.union(var, other);
        }

        let id = self.class_of(var);
        self.bind(id, Binding::Stack(TypeVector::from(kinds.to_vec())))
    }

    fn union(&mut self, a: &Var, b: &Var) -> Result<(), TypeError> {
        let (a, b) = (self.class_of(a), self.class_of(b));
        if a == b {
            return Ok(());
        }

        let (keep, gone) = if self.class(a).members.len() >= self.class(b).members.len() {
            (a, b)
        } else {
            (b, a)
        };

        let members = std::mem::take(&mut self.classes[gone.0].members);
        let value = self.classes[gone.0].value.take();

        trace!(
            "merging {} into the class of {}",
            members
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            self.class(keep).representative()
        );

        for member in members.iter() {
            self.vars.insert(member.clone(), keep);
        }

        self.classes[keep.0].members.extend(members);

        match value {
            Some(value) => self.bind(keep, value),
            None => Ok(()),
        }
    }

    fn bind(&mut self, id: ClassId, value: Binding) -> Result<(), TypeError> {
        let merged = match self.classes[id.0].value.take() {
            None => value,
            Some(old) => self.merge(old, value)?,
        };

        trace!(
            "{} := {}",
            self.class(id).representative(),
            merged.describe()
        );

        self.classes[id.0].value = Some(merged);
        Ok(())
    }

    /// Combine two bindings of the same class. The larger candidate is kept,
    /// and the other one is queued to be unified with it.
    fn merge(&mut self, old: Binding, new: Binding) -> Result<Binding, TypeError> {
        match (old, new) {
            (Binding::Type(Kind::Function(f)), Binding::Type(Kind::Function(g))) => {
                if f == g {
                    return Ok(Binding::Type(Kind::Function(f)));
                }

                let (keep, other) = if g.cons.len() > f.cons.len() {
                    (g, f)
                } else {
                    (f, g)
                };

                self.pending.push(Pending::Kinds(
                    Kind::Function(keep.clone()),
                    Kind::Function(other),
                ));

                Ok(Binding::Type(Kind::Function(keep)))
            }

            (Binding::Type(Kind::Simple(a)), Binding::Type(Kind::Simple(b))) => {
                if self.subtypes.equivalent(&a, &b) {
                    Ok(Binding::Type(Kind::Simple(a)))
                } else {
                    Err(TypeError::mismatch(a, b))
                }
            }

            (Binding::Stack(v), Binding::Stack(w)) => {
                if v == w {
                    return Ok(Binding::Stack(v));
                }

                let (keep, other) = if w.len() > v.len() { (w, v) } else { (v, w) };
                self.pending.push(Pending::Vectors(keep.clone(), other));
                Ok(Binding::Stack(keep))
            }

            (old, new) => Err(TypeError::mismatch(old.describe(), new.describe())),
        }
    }
}

/// Render what is left of a stack for a diagnostic.
pub(super) fn describe(kinds: &[Kind]) -> String {
    if kinds.is_empty() {
        "an empty stack".into()
    } else {
        kinds
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

use std::collections::{HashMap, HashSet};

use cat_common::kinds::{FxnType, Kind, TypeVector, Var};
use log::trace;

use super::unify::{Binding, ClassId, Unifier};
use super::{check_depth, TypeError};

/// The final, fully resolved binding of every variable that does not simply
/// stand for itself.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitution {
    bindings: HashMap<Var, Binding>,
}

impl Substitution {
    pub fn get(&self, var: &Var) -> Option<&Binding> {
        self.bindings.get(var)
    }

    pub fn contains(&self, var: &Var) -> bool {
        self.bindings.contains_key(var)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Var, &Binding)> {
        self.bindings.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl<'a> Unifier<'a> {
    /// Resolve the binding of every variable seen so far. Fails if a binding
    /// would have to contain itself.
    pub fn resolve(&self) -> Result<Substitution, TypeError> {
        let mut resolver = Resolver {
            unifier: self,
            visiting: HashSet::new(),
            done: HashMap::new(),
        };

        let mut vars: Vec<_> = self.vars.iter().collect();
        vars.sort();

        let mut bindings = HashMap::new();
        for (var, id) in vars {
            let (binding, _) = resolver.resolve_class(*id, 0)?;

            let identity = match &binding {
                Binding::Type(Kind::TypeVar(other)) => other == var,
                Binding::Stack(vector) => {
                    matches!(vector.kinds(), [Kind::StackVar(other)] if other == var)
                }
                _ => false,
            };

            if !identity {
                trace!("resolved {var} to {}", binding.describe());
                bindings.insert(var.clone(), binding);
            }
        }

        Ok(Substitution { bindings })
    }
}

struct Resolver<'u, 'a> {
    unifier: &'u Unifier<'a>,
    visiting: HashSet<ClassId>,
    /// Finished classes, along with how deep their resolution went.
    done: HashMap<ClassId, (Binding, usize)>,
}

impl<'u, 'a> Resolver<'u, 'a> {
    fn resolve_class(&mut self, id: ClassId, depth: usize) -> Result<(Binding, usize), TypeError> {
        let limit = self.unifier.limit;

        if let Some((binding, height)) = self.done.get(&id) {
            check_depth(depth + height, limit)?;
            return Ok((binding.clone(), *height));
        }

        check_depth(depth, limit)?;

        let unifier = self.unifier;
        let class = unifier.class(id);

        if !self.visiting.insert(id) {
            return Err(TypeError::CircularType {
                var: class.representative().name().into(),
            });
        }

        let (binding, height) = match &class.value {
            None => {
                let var = class.representative().clone();
                let binding = if var.is_stack_name() {
                    Binding::Stack(TypeVector::from(vec![Kind::StackVar(var)]))
                } else {
                    Binding::Type(Kind::TypeVar(var))
                };

                (binding, 0)
            }

            Some(Binding::Type(kind)) => {
                let (kind, height) = self.resolve_kind(kind, depth + 1)?;
                (Binding::Type(kind), height + 1)
            }

            Some(Binding::Stack(vector)) => {
                let (vector, height) = self.resolve_vector(vector, depth + 1)?;
                (Binding::Stack(vector), height + 1)
            }
        };

        self.visiting.remove(&id);
        self.done.insert(id, (binding.clone(), height));

        Ok((binding, height))
    }

    fn resolve_kind(&mut self, kind: &Kind, depth: usize) -> Result<(Kind, usize), TypeError> {
        match kind {
            Kind::TypeVar(var) => match self.unifier.vars.get(var) {
                Some(id) => match self.resolve_class(*id, depth)? {
                    (Binding::Type(kind), height) => Ok((kind, height)),
                    (binding, _) => Err(TypeError::mismatch(var, binding.describe())),
                },

                None => Ok((kind.clone(), 0)),
            },

            Kind::Function(fxn) => {
                check_depth(depth, self.unifier.limit)?;
                let (cons, cons_height) = self.resolve_vector(&fxn.cons, depth + 1)?;
                let (prod, prod_height) = self.resolve_vector(&fxn.prod, depth + 1)?;

                Ok((
                    Kind::Function(FxnType::new(cons, prod, fxn.side_effects)),
                    cons_height.max(prod_height) + 1,
                ))
            }

            Kind::StackVar(_) | Kind::Simple(_) => Ok((kind.clone(), 0)),
        }
    }

    /// Resolve every kind in a vector, splicing in the bindings of stack
    /// variables.
    fn resolve_vector(
        &mut self,
        vector: &TypeVector,
        depth: usize,
    ) -> Result<(TypeVector, usize), TypeError> {
        let mut result = TypeVector::new();
        let mut height = 0;

        for kind in vector.iter() {
            match kind {
                Kind::StackVar(var) => match self.unifier.vars.get(var) {
                    Some(id) => match self.resolve_class(*id, depth)? {
                        (Binding::Stack(spliced), inner) => {
                            result.extend_top(spliced);
                            height = height.max(inner);
                        }

                        (binding, _) => {
                            return Err(TypeError::mismatch(var, binding.describe()));
                        }
                    },

                    None => result.push_top(kind.clone()),
                },

                _ => {
                    let (kind, inner) = self.resolve_kind(kind, depth)?;
                    result.push_top(kind);
                    height = height.max(inner);
                }
            }
        }

        Ok((result, height))
    }
}

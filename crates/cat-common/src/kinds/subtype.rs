use std::collections::{HashMap, HashSet};

/// A declared subtype relation between simple types. The relation is
/// reflexive and transitive; two names declared equivalent are subtypes of
/// each other. Unification only accepts equivalent types, so a one-way
/// declaration never lets a value be used at another type.
#[derive(Clone, Debug, Default)]
pub struct Subtypes {
    supers: HashMap<String, HashSet<String>>,
}

impl Subtypes {
    /// The empty relation, in which a simple type only matches itself.
    pub fn new() -> Self {
        Self {
            supers: HashMap::new(),
        }
    }

    /// The numeric tower `byte <: int <: double`.
    pub fn standard() -> Self {
        let mut subtypes = Self::new();
        subtypes.declare("byte", "int");
        subtypes.declare("int", "double");
        subtypes
    }

    /// Declare `sub <: sup`.
    pub fn declare(&mut self, sub: impl Into<String>, sup: impl Into<String>) {
        self.supers.entry(sub.into()).or_default().insert(sup.into());
    }

    /// Declare `a` and `b` as aliases of each other.
    pub fn declare_equivalent(&mut self, a: impl Into<String>, b: impl Into<String>) {
        let (a, b) = (a.into(), b.into());
        self.declare(a.clone(), b.clone());
        self.declare(b, a);
    }

    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        if sub == sup {
            return true;
        }

        let mut seen = HashSet::new();
        let mut worklist = vec![sub];

        while let Some(name) = worklist.pop() {
            if !seen.insert(name) {
                continue;
            }

            if let Some(supers) = self.supers.get(name) {
                for next in supers {
                    if next == sup {
                        return true;
                    }

                    worklist.push(next);
                }
            }
        }

        false
    }

    /// Is each of these a subtype of the other?
    pub fn equivalent(&self, a: &str, b: &str) -> bool {
        self.is_subtype(a, b) && self.is_subtype(b, a)
    }
}

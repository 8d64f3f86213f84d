use std::fmt;

use super::{FxnType, Kind, TypeVector, Var};

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}", self.0)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeVar(var) | Self::StackVar(var) => write!(f, "{var}"),
            Self::Simple(name) => write!(f, "{name}"),
            Self::Function(fxn) => write!(f, "{fxn}"),
        }
    }
}

impl fmt::Display for TypeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in self.kinds.iter() {
            if !first {
                write!(f, " ")?;
            }

            first = false;
            write!(f, "{kind}")?;
        }

        Ok(())
    }
}

impl fmt::Display for FxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.side_effects { "~>" } else { "->" };

        // An empty vector still gets its separating space, so the identity
        // renders as `( -> )`.
        write!(f, "(")?;
        if !self.cons.is_empty() {
            write!(f, "{} ", self.cons)?;
        } else {
            write!(f, " ")?;
        }

        write!(f, "{arrow}")?;

        if !self.prod.is_empty() {
            write!(f, " {}", self.prod)?;
        } else {
            write!(f, " ")?;
        }

        write!(f, ")")
    }
}

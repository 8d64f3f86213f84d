mod lex;
mod parse;
mod resolve;
mod source;
mod tyck;

pub use parse::TOO_DEEP as PARSE_TOO_DEEP;
pub use source::{File, Span};

use codespan_reporting::diagnostic::{Diagnostic, Severity};

#[derive(Debug, Default)]
pub struct Messages {
    pub msgs: Vec<Diagnostic<usize>>,
}

impl Messages {
    pub fn new() -> Self {
        Self { msgs: Vec::new() }
    }

    #[must_use]
    pub fn at(&mut self, span: Span) -> MessageAdder {
        MessageAdder {
            msgs: self,
            at: span,
        }
    }

    pub fn merge(&mut self, other: Messages) {
        self.msgs.extend(other.msgs);
    }

    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.msgs
            .iter()
            .any(|diag| matches!(diag.severity, Severity::Error | Severity::Bug))
    }

    /// The codes of every collected diagnostic, in order.
    pub fn codes(&self) -> Vec<&str> {
        self.msgs
            .iter()
            .filter_map(|diag| diag.code.as_deref())
            .collect()
    }
}

#[derive(Debug)]
pub struct MessageAdder<'a> {
    msgs: &'a mut Messages,
    at: Span,
}

impl<'a> MessageAdder<'a> {
    fn add(&mut self, diag: Diagnostic<usize>) {
        self.msgs.msgs.push(diag);
    }
}

use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::MessageAdder;

const INCOMPATIBLE_KINDS: &str = "ET00";
const CIRCULAR: &str = "ET01";
const UNRESOLVED: &str = "ET02";
const TOO_DEEP: &str = "ET03";
const UNTYPED: &str = "ET04";
const DECLARED_MISMATCH: &str = "ET05";
const MALFORMED: &str = "ET06";

impl<'a> MessageAdder<'a> {
    /// `partial` is the type of everything before the failing term, if any.
    pub fn tyck_incompatible(
        &mut self,
        left: impl Into<String>,
        right: impl Into<String>,
        partial: Option<impl Into<String>>,
    ) {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!(
            "'{}' conflicts with '{}'",
            left.into(),
            right.into()
        ))];

        let notes = match partial {
            Some(partial) => vec![format!("the stack before this has type '{}'", partial.into())],
            None => Vec::new(),
        };

        self.add(
            Diagnostic::error()
                .with_code(INCOMPATIBLE_KINDS)
                .with_message("incompatible kinds")
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn tyck_circular(&mut self, var: impl Into<String>) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("'{}' would contain itself", var.into()))];

        self.add(
            Diagnostic::error()
                .with_code(CIRCULAR)
                .with_message("circular type")
                .with_labels(labels),
        );
    }

    pub fn tyck_unresolved(&mut self, var: impl Into<String>) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("the variable '{}' has no scope", var.into()))];

        self.add(
            Diagnostic::error()
                .with_code(UNRESOLVED)
                .with_message("unresolved type variable")
                .with_labels(labels),
        );
    }

    pub fn tyck_too_deep(&mut self, limit: usize) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![format!(
            "inference gives up after {limit} levels; see '--max-depth'"
        )];

        self.add(
            Diagnostic::error()
                .with_code(TOO_DEEP)
                .with_message("type is too deeply nested")
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn tyck_untyped(&mut self, name: impl Into<String>) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("'{}' has no known type", name.into()))];

        self.add(
            Diagnostic::error()
                .with_code(UNTYPED)
                .with_message("use of an untyped function")
                .with_labels(labels),
        );
    }

    pub fn tyck_declared_mismatch(
        &mut self,
        declared: impl Into<String>,
        inferred: impl Into<String>,
    ) {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!(
            "declared as '{}', but the body has type '{}'",
            declared.into(),
            inferred.into()
        ))];

        self.add(
            Diagnostic::error()
                .with_code(DECLARED_MISMATCH)
                .with_message("definition does not match its declared type")
                .with_labels(labels),
        );
    }

    pub fn tyck_malformed(&mut self, reason: impl Into<String>) {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(reason.into())];

        self.add(
            Diagnostic::error()
                .with_code(MALFORMED)
                .with_message("malformed type")
                .with_labels(labels),
        );
    }
}

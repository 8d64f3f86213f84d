use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::{MessageAdder, Span};

const UNKNOWN_NAME: &str = "ER00";
const REDEFINITION: &str = "ER01";

impl<'a> MessageAdder<'a> {
    pub fn resolve_unknown_name(&mut self, name: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_NAME)
                .with_message(format!("unresolved name '{name}'"))
                .with_labels(labels),
        );
    }

    /// A definition replacing an earlier one. `prev` is `None` if the
    /// earlier binding came from the prelude.
    pub fn resolve_redefinition(&mut self, name: &str, prev: Option<Span>) {
        let mut labels = vec![Label::primary(self.at.file, self.at)];
        if let Some(prev) = prev {
            labels.push(Label::secondary(prev.file, prev).with_message("previous definition here"));
        }

        self.add(
            Diagnostic::warning()
                .with_code(REDEFINITION)
                .with_message(format!("'{name}' is redefined"))
                .with_labels(labels),
        );
    }
}

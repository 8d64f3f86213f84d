use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::MessageAdder;

const NOT_A_TYPE: &str = "EP00";
const EXPECTED_ARROW: &str = "EP01";
const UNCLOSED_GROUP: &str = "EP02";
const NOT_AN_ITEM: &str = "EP03";
const EXPECTED_NAME: &str = "EP04";
const EXPECTED_TOKEN: &str = "EP05";
const NOT_A_TERM: &str = "EP06";
const TRAILING: &str = "EP07";
pub const TOO_DEEP: &str = "EP08";

impl<'a> MessageAdder<'a> {
    pub fn parse_not_a_type(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![String::from(
            "a type is a name, a variable like 'a or 'A, or a function type",
        )];

        self.add(
            Diagnostic::error()
                .with_code(NOT_A_TYPE)
                .with_message("expected a type")
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_expected_arrow(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message("expected '->' or '~>' between consumption and production")];

        self.add(
            Diagnostic::error()
                .with_code(EXPECTED_ARROW)
                .with_message("function type without an arrow")
                .with_labels(labels),
        );
    }

    pub fn parse_unclosed_group(&mut self, opener: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("this '{opener}' is never closed"))];

        self.add(
            Diagnostic::error()
                .with_code(UNCLOSED_GROUP)
                .with_message("unclosed group")
                .with_labels(labels),
        );
    }

    pub fn parse_not_an_item(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![String::from(
            "items start with either 'declare' or 'define'",
        )];

        self.add(
            Diagnostic::error()
                .with_code(NOT_AN_ITEM)
                .with_message("expected an item")
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_expected_name(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(EXPECTED_NAME)
                .with_message("expected a name")
                .with_labels(labels),
        );
    }

    pub fn parse_expected_token(&mut self, token: &str) {
        let labels =
            vec![Label::primary(self.at.file, self.at).with_message(format!("expected '{token}'"))];

        self.add(
            Diagnostic::error()
                .with_code(EXPECTED_TOKEN)
                .with_message(format!("missing '{token}'"))
                .with_labels(labels),
        );
    }

    pub fn parse_not_a_term(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message("expected a name, a literal, or a quotation")];

        self.add(
            Diagnostic::error()
                .with_code(NOT_A_TERM)
                .with_message("expected a term")
                .with_labels(labels),
        );
    }

    pub fn parse_trailing(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(TRAILING)
                .with_message("unexpected input after the type")
                .with_labels(labels),
        );
    }

    pub fn parse_too_deep(&mut self, limit: usize) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("nested more than {limit} levels deep"))];

        self.add(
            Diagnostic::error()
                .with_code(TOO_DEEP)
                .with_message("nesting is too deep")
                .with_labels(labels),
        );
    }
}

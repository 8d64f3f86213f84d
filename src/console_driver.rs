use codespan_reporting::diagnostic::Severity;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::term::{self, Config, DisplayStyle};
use console::style;
use log::error;

use cat_common::kinds::FxnType;
use cat_common::message::Messages;
use cat_common::Driver;

pub struct ConsoleDriver {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: Config,

    errors: usize,
    checked: usize,
}

impl ConsoleDriver {
    pub fn new(files: SimpleFiles<String, String>) -> Self {
        Self {
            files,
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: Config {
                display_style: DisplayStyle::Rich,
                ..Default::default()
            },

            errors: 0,
            checked: 0,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl Driver for ConsoleDriver {
    fn report(&mut self, messages: Messages) {
        for msg in messages.msgs {
            if matches!(msg.severity, Severity::Error | Severity::Bug) {
                self.errors += 1;
            }

            if let Err(err) = term::emit(&mut self.writer, &self.config, &self.files, &msg) {
                error!("unable to print a diagnostic: {err}");
            }
        }
    }

    fn report_type(&mut self, name: &str, ty: Option<&FxnType>) {
        self.checked += 1;

        match ty {
            Some(ty) => println!("{} : {}", style(name).bold(), style(ty).cyan()),
            None => println!("{} : {}", style(name).bold(), style("<untyped>").red()),
        }
    }

    fn done(&mut self) {
        let summary = format!("checked {} definitions", self.checked);
        if self.has_errors() {
            eprintln!(
                "{summary}, {}",
                style(format!("{} errors", self.errors)).red().bold()
            );
        } else {
            eprintln!("{summary}, {}", style("no errors").green());
        }
    }
}

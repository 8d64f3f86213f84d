use std::path::PathBuf;

use cat_common::kinds::Subtypes;
use cat_frontend::tyck::{self, MAX_DEPTH};
use clap::{ArgAction, Args, Parser, Subcommand};

/// a type checker for the concatenative language Cat.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
#[command(propagate_version = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,

    /// Log more of what is going on. Repeat for even more.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check every definition in a file against its declared type.
    #[command(visible_alias = "c")]
    Check(CheckOptions),
    /// Infer the type of running some functions one after the other.
    #[command(visible_alias = "i")]
    Infer(InferOptions),
}

#[derive(Debug, Args)]
pub struct TypeOptions {
    /// Make two simple types interchangeable, as in `--alias char=byte`.
    #[arg(long, value_name = "NAME=NAME", value_parser = parse_alias)]
    pub alias: Vec<(String, String)>,

    /// How deeply types may nest before inference gives up.
    #[arg(long, default_value_t = MAX_DEPTH)]
    pub max_depth: usize,
}

impl TypeOptions {
    pub fn to_options(&self) -> tyck::Options {
        let mut subtypes = Subtypes::standard();
        for (a, b) in self.alias.iter() {
            subtypes.declare_equivalent(a.clone(), b.clone());
        }

        tyck::Options {
            subtypes,
            max_depth: self.max_depth,
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckOptions {
    #[command(flatten)]
    pub types: TypeOptions,

    /// Don't make the primitives available.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_prelude: bool,

    #[arg(required = true)]
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct InferOptions {
    #[command(flatten)]
    pub types: TypeOptions,

    /// Function types such as "('A int -> 'A bool)", in the order they run.
    #[arg(required = true)]
    pub signatures: Vec<String>,
}

fn parse_alias(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok((a.into(), b.into())),
        _ => Err(format!("expected two type names like 'char=byte', got '{arg}'")),
    }
}

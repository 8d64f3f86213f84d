mod args;
mod console_driver;
mod input;

use std::process::ExitCode;

use cat_frontend::defs::Checker;
use cat_frontend::tyck::{Function, Session};
use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use console::style;
use log::{info, LevelFilter};

use args::{Arguments, CheckOptions, Command, InferOptions};
use cat_common::Driver;
use console_driver::ConsoleDriver;
use input::read_file;

fn main() -> anyhow::Result<ExitCode> {
    let args = Arguments::parse();
    init_logger(args.verbose);

    match &args.command {
        Command::Check(opts) => check(opts),
        Command::Infer(opts) => infer(opts),
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn check(opts: &CheckOptions) -> anyhow::Result<ExitCode> {
    let src = read_file(&opts.path)?;

    let mut files = SimpleFiles::new();
    let file = files.add(opts.path.display().to_string(), src.clone());
    let mut driver = ConsoleDriver::new(files);

    let session = Session::new(opts.types.to_options());
    let mut checker = if opts.no_prelude {
        Checker::new(&session)
    } else {
        Checker::with_prelude(&session)?
    };

    info!("checking '{}'", opts.path.display());
    cat_frontend::check(&mut driver, &mut checker, &src, file);
    driver.done();

    Ok(if driver.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn infer(opts: &InferOptions) -> anyhow::Result<ExitCode> {
    let session = Session::new(opts.types.to_options());

    let mut functions = Vec::with_capacity(opts.signatures.len());
    for (index, sig) in opts.signatures.iter().enumerate() {
        match session.parse_type(sig) {
            Ok(ty) => {
                let name = format!("#{}", index + 1);
                functions.push(Function::typed(name, ty.as_ref().clone()));
            }
            Err(err) => {
                eprintln!("{}: in '{sig}': {err}", style("error").red().bold());
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    match session.infer(&functions) {
        Ok(ty) => {
            println!("{}", style(ty).cyan());
            Ok(ExitCode::SUCCESS)
        }

        Err(err) => {
            eprintln!(
                "{}: cannot compose '{}' with what comes before it: {}",
                style("error").red().bold(),
                opts.signatures[err.at],
                err.error
            );

            if let Some(partial) = err.partial {
                eprintln!("{}: everything before it has type {partial}", style("note").green());
            }

            Ok(ExitCode::FAILURE)
        }
    }
}

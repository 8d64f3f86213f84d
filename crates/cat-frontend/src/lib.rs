pub mod defs;
pub mod lex;
pub mod parse;
pub mod tyck;

use cat_common::message::File;
use cat_common::Driver;

use defs::Checker;

/// Lex, parse and check a whole file, reporting everything to `driver`.
pub fn check(driver: &mut impl Driver, checker: &mut Checker, source: impl AsRef<str>, file: File) {
    let tokens = lex::lex(driver, source, file);
    let items = parse::parse(driver, tokens, file, checker.session().options().max_depth);
    defs::check(driver, checker, &items);
}

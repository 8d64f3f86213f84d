mod convert;
mod token;


use cat_common::message::{File, Messages, Span};
use cat_common::Driver;
use log::{info, trace};
use logos::Logos;

use convert::{clean_float, parse_dec};
use token::FreeToken;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    Declare,
    Define,

    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,

    PureArrow,
    EffectArrow,
    Colon,

    TypeVar(String),
    StackVar(String),
    Name(String),

    Int(u64),
    Double(String),
    String(String),
}

pub fn lex(driver: &mut impl Driver, src: impl AsRef<str>, file: File) -> Vec<(Token, Span)> {
    let (tokens, msgs) = tokenize(src, file);
    driver.report(msgs);
    tokens
}

/// Lex a source text, returning the diagnostics instead of reporting them.
pub fn tokenize(src: impl AsRef<str>, file: File) -> (Vec<(Token, Span)>, Messages) {
    info!("lexing file with id {file}");
    let mut lexer = Lexer::new(src.as_ref(), file);
    lexer.lex();
    trace!("done lexing {file}");
    (lexer.res, lexer.msgs)
}

struct Lexer<'src> {
    lex: logos::SpannedIter<'src, FreeToken<'src>>,
    file: File,
    res: Vec<(Token, Span)>,
    msgs: Messages,

    /// Span of the current run of unrecognized characters.
    invalid: Option<Span>,
}

impl<'src> Lexer<'src> {
    fn new(src: &'src str, file: File) -> Self {
        Self {
            lex: FreeToken::lexer(src).spanned(),
            file,
            res: Vec::new(),
            msgs: Messages::new(),

            invalid: None,
        }
    }

    fn lex(&mut self) {
        while self.dispatch() {}
        self.flush_invalid();
    }

    fn dispatch(&mut self) -> bool {
        if let Some((tok, span)) = self.lex.next() {
            let span = Span::new(self.file, span.start, span.end);
            let tok = match tok {
                FreeToken::Declare => Token::Declare,
                FreeToken::Define => Token::Define,
                FreeToken::LParen => Token::ParenOpen,
                FreeToken::RParen => Token::ParenClose,
                FreeToken::LBracket => Token::BracketOpen,
                FreeToken::RBracket => Token::BracketClose,
                FreeToken::LBrace => Token::BraceOpen,
                FreeToken::RBrace => Token::BraceClose,
                FreeToken::MinArrow => Token::PureArrow,
                FreeToken::TildeArrow => Token::EffectArrow,
                FreeToken::Colon => Token::Colon,
                FreeToken::TypeVar(name) => Token::TypeVar(name.into()),
                FreeToken::StackVar(name) => Token::StackVar(name.into()),
                FreeToken::Name(name) => Token::Name(name.into()),
                FreeToken::DecNumber(num) => Token::Int(parse_dec(num)),
                FreeToken::DecFloat(num) => Token::Double(clean_float(num)),
                FreeToken::String(text) => Token::String(text.into()),

                FreeToken::Error => {
                    // Adjacent bad characters become a single diagnostic.
                    self.invalid = Some(match self.invalid {
                        Some(prev) if prev.end == span.start => prev + span,
                        _ => {
                            self.flush_invalid();
                            span
                        }
                    });
                    return true;
                }
            };

            self.flush_invalid();
            self.res.push((tok, span));

            true
        } else {
            false
        }
    }

    fn flush_invalid(&mut self) {
        if let Some(span) = self.invalid.take() {
            self.msgs.at(span).lex_invalid();
        }
    }
}

pub mod tree;

mod items;
mod matcher;
mod types;


use cat_common::message::{File, Messages, Span};
use cat_common::Driver;
use log::{info, trace};

use crate::lex::Token;
use matcher::Matcher;
use tree::{Item, Type, TypeNode};

pub fn parse(
    driver: &mut impl Driver,
    tokens: impl IntoIterator<Item = (Token, Span)>,
    file: File,
    max_depth: usize,
) -> Vec<Item> {
    let (items, msgs) = parse_items(tokens, file, max_depth);
    driver.report(msgs);
    items
}

/// Parse a whole file, returning the diagnostics instead of reporting them.
/// Types and quotations nested more than `max_depth` levels deep are
/// rejected.
pub fn parse_items(
    tokens: impl IntoIterator<Item = (Token, Span)>,
    file: File,
    max_depth: usize,
) -> (Vec<Item>, Messages) {
    info!("parsing file with id {file}");

    let mut parser = Parser::new(tokens, file, max_depth);
    let items = parser.parse_program();

    trace!("done parsing file {file}");

    (items, parser.msgs)
}

/// Parse a single function type which makes up the whole input. Any error
/// leaves a [`TypeNode::Invalid`] node somewhere in the result.
pub fn parse_type(
    tokens: impl IntoIterator<Item = (Token, Span)>,
    file: File,
    max_depth: usize,
) -> (Type, Messages) {
    let mut parser = Parser::new(tokens, file, max_depth);
    let mut ty = parser.parse_fxn_type();

    if !parser.is_done() {
        let span = parser.curr_span();
        parser.msgs.at(span).parse_trailing();
        ty.node = TypeNode::Invalid;
    }

    (ty, parser.msgs)
}

#[derive(Debug)]
struct Parser<I> {
    tokens: I,
    curr: Option<(Token, Span)>,
    prev: Option<(Token, Span)>,
    msgs: Messages,
    default_span: Span,

    depth: usize,
    max_depth: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = (Token, Span)>,
{
    pub fn new<In>(tokens: In, file: File, max_depth: usize) -> Self
    where
        In: IntoIterator<Item = (Token, Span), IntoIter = I>,
    {
        let mut parser = Self {
            tokens: tokens.into_iter(),

            curr: None,
            prev: None,

            msgs: Messages::new(),
            default_span: Span::new(file, 0, 0),

            depth: 0,
            max_depth,
        };

        parser.advance();
        parser
    }

    fn is_done(&self) -> bool {
        self.curr.is_none()
    }

    fn advance(&mut self) {
        self.prev = self.curr.take();
        if let Some(curr) = self.tokens.next() {
            self.curr = Some(curr);
        }
    }

    fn peek(&self, matcher: impl Matcher) -> bool {
        self.curr
            .as_ref()
            .map(|(tok, _)| matcher.matches(tok))
            .unwrap_or(false)
    }

    fn consume(&mut self, matcher: impl Matcher) -> bool {
        if self.peek(matcher) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn matches(&mut self, matcher: impl Matcher) -> Option<Span> {
        if self.peek(matcher) {
            self.advance();
            self.prev.as_ref().map(|(_, span)| *span)
        } else {
            None
        }
    }

    /// The span of the current token, or the end of the previous one at the
    /// end of input.
    fn curr_span(&self) -> Span {
        match (&self.curr, &self.prev) {
            (Some((_, span)), _) => *span,
            (None, Some((_, span))) => Span::point(span.file, span.end),
            (None, None) => self.default_span,
        }
    }

    /// Run `f` one level of nesting deeper, or return `None` if that would
    /// pass the limit. The caller is responsible for skipping the group.
    fn nested<T>(&mut self, open: Span, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.depth >= self.max_depth {
            trace!("group at {}..{} is too deep", open.start, open.end);
            self.msgs.at(open).parse_too_deep(self.max_depth);
            return None;
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        Some(res)
    }

    fn prev_span(&self) -> Span {
        self.prev
            .as_ref()
            .map(|(_, span)| *span)
            .unwrap_or(self.default_span)
    }
}

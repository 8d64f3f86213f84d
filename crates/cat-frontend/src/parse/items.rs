use cat_common::message::Span;

use super::tree::{Item, ItemNode, Name, Term, TermNode};
use super::Parser;
use crate::lex::Token;

impl<I> Parser<I>
where
    I: Iterator<Item = (Token, Span)>,
{
    /// ```abnf
    /// program = *item
    /// ```
    pub fn parse_program(&mut self) -> Vec<Item> {
        let mut items = vec![];

        while !self.is_done() {
            if let Some(item) = self.item() {
                items.push(item);
            }

            let mut junk_span: Option<Span> = None;
            while !self.is_done() && !self.peek(Self::ITEM_STARTS) {
                self.advance();
                let span = self.prev_span();
                junk_span = Some(junk_span.map_or(span, |junk| junk + span));
            }

            if let Some(span) = junk_span {
                self.msgs.at(span).parse_not_an_item();
            }
        }

        items
    }

    /// Tokens that may start an `item`.
    const ITEM_STARTS: &'static [Token] = &[Token::Declare, Token::Define];

    /// ```abnf
    /// item = declare / define
    /// ```
    fn item(&mut self) -> Option<Item> {
        if let Some(span) = self.matches(Token::Declare) {
            self.declare(span)
        } else if let Some(span) = self.matches(Token::Define) {
            self.define(span)
        } else {
            None
        }
    }

    /// ```abnf
    /// declare = "declare" name ":" fxn-type
    /// ```
    fn declare(&mut self, keyword: Span) -> Option<Item> {
        let (name, name_span) = self.name()?;

        if !self.consume(Token::Colon) {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected_token(":");
        }

        let ty = self.parse_fxn_type();
        let span = keyword + ty.span;

        Some(Item {
            node: ItemNode::Declare {
                name,
                name_span,
                ty,
            },
            span,
        })
    }

    /// ```abnf
    /// define = "define" name [":" fxn-type] "{" *term "}"
    /// ```
    fn define(&mut self, keyword: Span) -> Option<Item> {
        let (name, name_span) = self.name()?;

        let anno = self.consume(Token::Colon).then(|| self.parse_fxn_type());

        let Some(open) = self.matches(Token::BraceOpen) else {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected_token("{");
            return None;
        };

        let mut body = Vec::new();
        loop {
            body.extend(self.terms());

            // A stray bracket would otherwise end the body early.
            if let Some(span) = self.matches(Token::BracketClose) {
                self.msgs.at(span).parse_not_a_term();
                continue;
            }

            break;
        }

        let end = match self.matches(Token::BraceClose) {
            Some(close) => close,
            None => {
                self.msgs.at(open).parse_unclosed_group("{");
                self.prev_span()
            }
        };

        Some(Item {
            node: ItemNode::Define {
                name,
                name_span,
                anno,
                body,
            },
            span: keyword + end,
        })
    }

    fn name(&mut self) -> Option<(Name, Span)> {
        if let Some((Token::Name(name), span)) = &self.curr {
            let res = (name.clone(), *span);
            self.advance();
            Some(res)
        } else {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected_name();
            None
        }
    }

    /// Terms up to (but not including) a closing bracket or brace.
    fn terms(&mut self) -> Vec<Term> {
        let mut terms = Vec::new();

        while !self.is_done()
            && !self.peek(Self::ITEM_STARTS)
            && !self.peek(Token::BracketClose)
            && !self.peek(Token::BraceClose)
        {
            terms.push(self.term());
        }

        terms
    }

    /// ```abnf
    /// term = name / int / double / string / "[" *term "]"
    /// ```
    fn term(&mut self) -> Term {
        if let Some(open) = self.matches(Token::BracketOpen) {
            let Some(body) = self.nested(open, Self::terms) else {
                let end = self.skip_quote(open);
                return Term {
                    node: TermNode::Invalid,
                    span: open + end,
                };
            };

            let end = match self.matches(Token::BracketClose) {
                Some(close) => close,
                None => {
                    self.msgs.at(open).parse_unclosed_group("[");
                    self.prev_span()
                }
            };

            return Term {
                node: TermNode::Quote(body),
                span: open + end,
            };
        }

        let node = match &self.curr {
            Some((Token::Name(name), _)) => TermNode::Name(name.clone()),
            Some((Token::Int(value), _)) => TermNode::Int(*value),
            Some((Token::Double(value), _)) => TermNode::Double(value.clone()),
            Some((Token::String(value), _)) => TermNode::String(value.clone()),
            _ => {
                let span = self.curr_span();
                self.msgs.at(span).parse_not_a_term();
                TermNode::Invalid
            }
        };

        self.advance();
        Term {
            node,
            span: self.prev_span(),
        }
    }

    /// Skip to the closing bracket of a quotation opened at `open`, and
    /// return the span of the last token belonging to it.
    fn skip_quote(&mut self, open: Span) -> Span {
        let mut depth = 0usize;

        while !self.is_done() && !self.peek(Self::ITEM_STARTS) && !self.peek(Token::BraceClose) {
            if self.consume(Token::BracketOpen) {
                depth += 1;
            } else if self.consume(Token::BracketClose) {
                if depth == 0 {
                    return self.prev_span();
                }

                depth -= 1;
            } else {
                self.advance();
            }
        }

        self.msgs.at(open).parse_unclosed_group("[");
        self.prev_span()
    }
}

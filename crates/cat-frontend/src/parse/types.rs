use cat_common::message::Span;

use super::tree::{Type, TypeNode};
use super::Parser;
use crate::lex::Token;

impl<I> Parser<I>
where
    I: Iterator<Item = (Token, Span)>,
{
    /// ```abnf
    /// fxn-type = "(" *component ("->" / "~>") *component ")"
    /// ```
    pub fn parse_fxn_type(&mut self) -> Type {
        if let Some(open) = self.matches(Token::ParenOpen) {
            match self.nested(open, |this| this.fxn_type_body(open)) {
                Some(ty) => ty,
                None => {
                    let end = self.skip_group(open);
                    Type {
                        node: TypeNode::Invalid,
                        span: open + end,
                    }
                }
            }
        } else {
            let span = self.curr_span();
            self.msgs.at(span).parse_not_a_type();

            // Don't swallow something the caller might be able to use.
            if !self.is_done() && !self.peek(Self::RECOVERY_POINTS) {
                self.advance();
            }

            Type {
                node: TypeNode::Invalid,
                span,
            }
        }
    }

    /// Tokens that the type parser never skips past while recovering.
    const RECOVERY_POINTS: &'static [Token] = &[
        Token::Declare,
        Token::Define,
        Token::BraceOpen,
        Token::BraceClose,
    ];

    fn fxn_type_body(&mut self, open: Span) -> Type {
        let cons = self.components();

        let effects = if self.consume(Token::PureArrow) {
            false
        } else if self.consume(Token::EffectArrow) {
            true
        } else {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected_arrow();
            let end = self.skip_group(open);

            return Type {
                node: TypeNode::Invalid,
                span: open + end,
            };
        };

        let prod = self.components();

        if let Some(close) = self.matches(Token::ParenClose) {
            return Type {
                node: TypeNode::Function {
                    cons,
                    prod,
                    effects,
                },
                span: open + close,
            };
        }

        if !self.is_done() && !self.peek(Self::RECOVERY_POINTS) {
            let span = self.curr_span();
            self.msgs.at(span).parse_not_a_type();
        }

        let end = self.skip_group(open);
        Type {
            node: TypeNode::Invalid,
            span: open + end,
        }
    }

    /// ```abnf
    /// component = name / type-var / stack-var / fxn-type
    /// ```
    fn components(&mut self) -> Vec<Type> {
        let mut components = Vec::new();

        loop {
            if self.peek(Token::ParenOpen) {
                components.push(self.parse_fxn_type());
                continue;
            }

            let node = match &self.curr {
                Some((Token::Name(name), _)) => TypeNode::Name(name.clone()),
                Some((Token::TypeVar(name), _)) => TypeNode::TypeVar(name.clone()),
                Some((Token::StackVar(name), _)) => TypeNode::StackVar(name.clone()),
                _ => break,
            };

            self.advance();
            components.push(Type {
                node,
                span: self.prev_span(),
            });
        }

        components
    }

    /// Skip to the closing parenthesis of a group opened at `open`, and
    /// return the span of the last token belonging to it.
    fn skip_group(&mut self, open: Span) -> Span {
        let mut depth = 0usize;

        while !self.is_done() && !self.peek(Self::RECOVERY_POINTS) {
            if self.consume(Token::ParenOpen) {
                depth += 1;
            } else if self.consume(Token::ParenClose) {
                if depth == 0 {
                    return self.prev_span();
                }

                depth -= 1;
            } else {
                self.advance();
            }
        }

        self.msgs.at(open).parse_unclosed_group("(");
        self.prev_span()
    }
}

//! Checks the definitions of a file against the types they were declared
//! with.

pub mod prelude;


use std::collections::HashMap;

use cat_common::kinds::{FxnType, Kind};
use cat_common::message::{Messages, Span};
use cat_common::Driver;
use log::{debug, info, warn};

use crate::parse::tree::{Item, ItemNode, Name, Term, TermNode, Type, TypeNode};
use crate::tyck::{construct, Function, InferError, Session, TypeError};

pub fn check(driver: &mut impl Driver, checker: &mut Checker, items: &[Item]) {
    info!("checking {} items", items.len());

    for item in items {
        if let Some((name, ty)) = checker.check_item(item) {
            driver.report_type(&name, ty.as_ref());
        }
    }

    driver.report(std::mem::take(&mut checker.msgs));
}

#[derive(Clone, Debug)]
pub struct Entry {
    /// `None` if the definition had errors.
    pub ty: Option<FxnType>,
    pub origin: Origin,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Origin {
    Prelude,
    Declare(Span),
    Define(Span),
}

#[derive(Debug)]
pub struct Checker<'s> {
    session: &'s Session,
    env: HashMap<Name, Entry>,
    msgs: Messages,
}

impl<'s> Checker<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self {
            session,
            env: HashMap::new(),
            msgs: Messages::new(),
        }
    }

    /// A checker which knows the types of every primitive.
    pub fn with_prelude(session: &'s Session) -> Result<Self, TypeError> {
        let mut checker = Self::new(session);
        for (name, ty) in prelude::load(session)? {
            checker.env.insert(
                name.into(),
                Entry {
                    ty: Some(ty),
                    origin: Origin::Prelude,
                },
            );
        }

        Ok(checker)
    }

    pub fn session(&self) -> &'s Session {
        self.session
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.env.get(name)
    }

    /// Check a single item. Definitions give back their name and type.
    pub fn check_item(&mut self, item: &Item) -> Option<(Name, Option<FxnType>)> {
        match &item.node {
            ItemNode::Declare {
                name,
                name_span,
                ty,
            } => {
                let ty = self.construct(ty);
                self.bind(name, Origin::Declare(*name_span), ty);
                None
            }

            ItemNode::Define {
                name,
                name_span,
                anno,
                body,
            } => {
                let ty = self.define(name, *name_span, anno.as_ref(), body);
                self.bind(name, Origin::Define(*name_span), ty.clone());
                Some((name.clone(), ty))
            }
        }
    }

    fn define(
        &mut self,
        name: &str,
        name_span: Span,
        anno: Option<&Type>,
        body: &[Term],
    ) -> Option<FxnType> {
        debug!("checking the definition of '{name}'");

        let declared = match anno {
            Some(anno) => Some(self.construct(anno)?),
            None => None,
        };

        let inferred = self.infer_terms(body)?;

        match declared {
            Some(declared) if !self.session.same_type(&declared, &inferred) => {
                self.msgs
                    .at(name_span)
                    .tyck_declared_mismatch(declared.to_string(), inferred.to_string());
                None
            }

            Some(declared) => Some(declared),
            None => Some(inferred),
        }
    }

    /// Bind a name, replacing what it was bound to before. A declaration
    /// followed by the matching definition is not a redefinition.
    fn bind(&mut self, name: &str, origin: Origin, ty: Option<FxnType>) {
        let prev = self.env.insert(name.into(), Entry { ty, origin });

        let prev = match (prev.map(|entry| entry.origin), origin) {
            (None, _) | (Some(Origin::Declare(_)), Origin::Define(_)) => return,
            (Some(Origin::Prelude), _) => None,
            (Some(Origin::Declare(span) | Origin::Define(span)), _) => Some(span),
        };

        let span = match origin {
            Origin::Declare(span) | Origin::Define(span) => span,
            Origin::Prelude => return,
        };

        warn!("'{name}' is redefined");
        self.msgs.at(span).resolve_redefinition(name, prev);
    }

    fn construct(&mut self, ty: &Type) -> Option<FxnType> {
        match construct(ty, self.session.options().max_depth) {
            Ok(ty) => Some(ty),

            // The parser has already complained about these.
            Err(TypeError::Malformed(_)) if is_invalid(ty) => None,

            Err(error) => {
                self.report(ty.span, error, None);
                None
            }
        }
    }

    /// Infer the type of a sequence of terms, reporting any errors.
    fn infer_terms(&mut self, terms: &[Term]) -> Option<FxnType> {
        let mut functions = Vec::with_capacity(terms.len());
        let mut ok = true;

        for term in terms {
            match self.function(term) {
                Some(function) => functions.push(function),
                None => ok = false,
            }
        }

        if !ok {
            return None;
        }

        match self.session.infer(&functions) {
            Ok(ty) => Some(ty),
            Err(InferError { error, at, partial }) => {
                self.report(terms[at].span, error, partial);
                None
            }
        }
    }

    fn function(&mut self, term: &Term) -> Option<Function> {
        let literal = |name: &str| Function::typed(name, FxnType::pushing(Kind::simple(name)));

        match &term.node {
            TermNode::Name(name) => match self.env.get(name) {
                Some(entry) => Some(Function::new(name.clone(), entry.ty.clone())),
                None => {
                    self.msgs.at(term.span).resolve_unknown_name(name);
                    None
                }
            },

            TermNode::Int(_) => Some(literal("int")),
            TermNode::Double(_) => Some(literal("double")),
            TermNode::String(_) => Some(literal("string")),

            TermNode::Quote(body) => {
                let body = self.infer_terms(body)?;
                Some(Function::typed("quotation", self.session.quote(&body)))
            }

            TermNode::Invalid => None,
        }
    }

    fn report(&mut self, span: Span, error: TypeError, partial: Option<FxnType>) {
        let mut at = self.msgs.at(span);

        match error {
            TypeError::KindMismatch { left, right } => {
                at.tyck_incompatible(left, right, partial.map(|ty| ty.to_string()))
            }
            TypeError::CircularType { var } => at.tyck_circular(var),
            TypeError::UnresolvedVariable { var } => at.tyck_unresolved(var),
            TypeError::TooDeep { limit } => at.tyck_too_deep(limit),
            TypeError::Untyped { name } => at.tyck_untyped(name),
            TypeError::Malformed(reason) | TypeError::Syntax(reason) => at.tyck_malformed(reason),
        }
    }
}

fn is_invalid(ty: &Type) -> bool {
    match &ty.node {
        TypeNode::Invalid => true,
        TypeNode::Function { cons, prod, .. } => cons.iter().chain(prod).any(is_invalid),
        _ => false,
    }
}

use std::sync::Arc;

use cat_common::kinds::FxnType;
use cat_common::message::PARSE_TOO_DEEP;
use dashmap::DashMap;
use log::trace;

use super::construct::construct;
use super::infer::{Function, Inferrer};
use super::{InferError, Options, TypeError};
use crate::lex::tokenize;
use crate::parse::parse_type;

/// Parsed types, keyed by their source text.
#[derive(Debug, Default)]
pub struct TypeCache {
    types: DashMap<String, Arc<FxnType>>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    pub fn get(&self, text: &str) -> Option<Arc<FxnType>> {
        self.types.get(text).map(|ty| Arc::clone(&ty))
    }

    /// Add a type, unless another one was added for the same text first. The
    /// type now in the cache is returned.
    pub fn insert(&self, text: impl Into<String>, ty: FxnType) -> Arc<FxnType> {
        let entry = self.types.entry(text.into()).or_insert_with(|| Arc::new(ty));
        Arc::clone(entry.value())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Everything that stays the same across inferences. A session may be shared
/// between threads; every inference gets its own names and constraints.
#[derive(Debug, Default)]
pub struct Session {
    options: Options,
    cache: TypeCache,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            cache: TypeCache::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn cache(&self) -> &TypeCache {
        &self.cache
    }

    /// Parse and construct a function type such as `('A int -> 'A bool)`.
    pub fn parse_type(&self, text: &str) -> Result<Arc<FxnType>, TypeError> {
        if let Some(ty) = self.cache.get(text) {
            trace!("cached type for {text:?}");
            return Ok(ty);
        }

        let (tokens, mut msgs) = tokenize(text, 0);
        let (ty, parse_msgs) = parse_type(tokens, 0, self.options.max_depth);
        msgs.merge(parse_msgs);

        if msgs.codes().contains(&PARSE_TOO_DEEP) {
            return Err(TypeError::TooDeep {
                limit: self.options.max_depth,
            });
        }

        if let Some(diag) = msgs.msgs.first() {
            return Err(TypeError::Syntax(diag.message.clone()));
        }

        let ty = construct(&ty, self.options.max_depth)?;
        Ok(self.cache.insert(text, ty))
    }

    pub fn infer(&self, functions: &[Function]) -> Result<FxnType, InferError> {
        Inferrer::new(&self.options).infer(functions)
    }

    pub fn compose(&self, left: &FxnType, right: &FxnType) -> Result<FxnType, TypeError> {
        Inferrer::new(&self.options).compose(left, right)
    }

    pub fn quote(&self, body: &FxnType) -> FxnType {
        Inferrer::new(&self.options).quote(body)
    }

    pub fn canonical(&self, ty: &FxnType) -> FxnType {
        Inferrer::new(&self.options).canonical(ty)
    }

    /// Do these describe the same type, up to closing and renaming?
    pub fn same_type(&self, a: &FxnType, b: &FxnType) -> bool {
        self.canonical(a) == self.canonical(b)
    }
}

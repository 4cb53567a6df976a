//! Two-level dispatch tables: namespace alias, then element local name.
//!
//! A [`HandlerSet`] is the per-alias table. [`HandlerTable`] maps aliases to
//! shared sets so that several aliases can point at one physical table, which
//! is how CityGML's module namespaces reuse the GML readers. [`compose`] layers
//! an override table over a base table without mutating either.

use crate::read::{Field, Reader};
use crate::write::Writer;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Local-name key consulted when no exact entry matches.
pub const WILDCARD: &str = "*";

/// A dispatch target. Reader tables hold `Read` and `Attribute` entries,
/// writer tables hold `Write` entries; dialect validation enforces the split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Handler {
    Read(Reader),
    Write(Writer),
    /// Sets or appends the node's text (or nested record) under a field name.
    Attribute(Field),
}

impl Handler {
    pub fn kind(&self) -> &'static str {
        match self {
            Handler::Read(_) => "reader",
            Handler::Write(_) => "writer",
            Handler::Attribute(_) => "attribute",
        }
    }

    pub fn is_writer(&self) -> bool {
        matches!(self, Handler::Write(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerSet {
    handlers: IndexMap<String, Handler>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, local: impl Into<String>, handler: Handler) -> Self {
        self.insert(local, handler);
        self
    }

    pub fn insert(&mut self, local: impl Into<String>, handler: Handler) -> Option<Handler> {
        self.handlers.insert(local.into(), handler)
    }

    pub fn get(&self, local: &str) -> Option<Handler> {
        self.handlers.get(local).copied()
    }

    /// Exact match first, then the wildcard entry.
    pub fn resolve(&self, local: &str) -> Option<Handler> {
        self.get(local).or_else(|| self.get(WILDCARD))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.handlers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// This set with every entry of `overrides` laid on top.
    pub fn layered(&self, overrides: &HandlerSet) -> HandlerSet {
        let mut merged = self.clone();
        for (local, handler) in &overrides.handlers {
            merged.handlers.insert(local.clone(), *handler);
        }
        merged
    }
}

impl<S: Into<String>> FromIterator<(S, Handler)> for HandlerSet {
    fn from_iter<I: IntoIterator<Item = (S, Handler)>>(iter: I) -> Self {
        let mut set = HandlerSet::new();
        for (local, handler) in iter {
            set.insert(local, handler);
        }
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerTable {
    sets: IndexMap<String, Arc<HandlerSet>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(mut self, alias: impl Into<String>, set: HandlerSet) -> Self {
        self.insert_set(alias, set);
        self
    }

    pub fn insert_set(&mut self, alias: impl Into<String>, set: HandlerSet) {
        self.sets.insert(alias.into(), Arc::new(set));
    }

    /// Points `alias` at an existing set without copying it.
    pub fn share(&mut self, alias: impl Into<String>, set: Arc<HandlerSet>) {
        self.sets.insert(alias.into(), set);
    }

    /// Adds a single entry. A shared set is copied first so other aliases
    /// pointing at it are unaffected.
    pub fn insert(&mut self, alias: &str, local: impl Into<String>, handler: Handler) {
        let set = self.sets.entry(alias.to_string()).or_default();
        Arc::make_mut(set).insert(local, handler);
    }

    pub fn get(&self, alias: &str) -> Option<&Arc<HandlerSet>> {
        self.sets.get(alias)
    }

    pub fn resolve(&self, alias: &str, local: &str) -> Option<Handler> {
        self.sets.get(alias).and_then(|set| set.resolve(local))
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<HandlerSet>)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Whether two aliases resolve to the same physical set.
    pub fn shares_set(&self, a: &str, b: &str) -> bool {
        match (self.sets.get(a), self.sets.get(b)) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            _ => false,
        }
    }
}

/// Layers `overrides` over `base`.
///
/// For every alias in either table the result holds the union of entries with
/// `overrides` winning on collision. Aliases whose sets were shared in `base`
/// and are overridden by one shared set stay shared in the result.
pub fn compose(base: &HandlerTable, overrides: &HandlerTable) -> HandlerTable {
    let mut merged: HashMap<(usize, usize), Arc<HandlerSet>> = HashMap::new();
    let mut sets = IndexMap::with_capacity(base.sets.len() + overrides.sets.len());

    for (alias, base_set) in &base.sets {
        let set = match overrides.sets.get(alias) {
            Some(over) if Arc::ptr_eq(base_set, over) => base_set.clone(),
            Some(over) => {
                let key = (
                    Arc::as_ptr(base_set) as usize,
                    Arc::as_ptr(over) as usize,
                );
                merged
                    .entry(key)
                    .or_insert_with(|| Arc::new(base_set.layered(over)))
                    .clone()
            }
            None => base_set.clone(),
        };
        sets.insert(alias.clone(), set);
    }
    for (alias, over) in &overrides.sets {
        if !sets.contains_key(alias) {
            sets.insert(alias.clone(), over.clone());
        }
    }

    HandlerTable { sets }
}

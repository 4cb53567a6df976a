use super::builtin;
use super::descriptor::{DialectDescriptor, NamespaceMode, TableImport};
use super::{Dialect, EntryPoint};
use crate::error::DialectError;
use crate::handler::{compose, HandlerTable};
use crate::namespace::{NamespaceTable, FEATURE_ALIAS};
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

static BUILTIN: Lazy<DialectCatalog> = Lazy::new(DialectCatalog::builtin);

/// Built-in dialects, assembled once on first use.
static BUILT: Lazy<Result<IndexMap<String, Arc<Dialect>>, DialectError>> = Lazy::new(|| {
    let dialects = BUILTIN.build_all()?;
    Ok(BUILTIN.ids().map(str::to_string).zip(dialects).collect())
});

/// The catalog holding the built-in dialects.
pub fn builtin_catalog() -> &'static DialectCatalog {
    &BUILTIN
}

/// A built-in dialect by id. Every call returns the same shared instance.
pub fn dialect(id: &str) -> Result<Arc<Dialect>, DialectError> {
    match &*BUILT {
        Ok(dialects) => dialects
            .get(id)
            .cloned()
            .ok_or_else(|| DialectError::UnknownDialect(id.to_string())),
        Err(err) => Err(err.clone()),
    }
}

/// Named dialect descriptors. Dialects are assembled on demand by resolving
/// each descriptor's ancestors first.
#[derive(Debug, Clone, Default)]
pub struct DialectCatalog {
    descriptors: IndexMap<String, DialectDescriptor>,
}

impl DialectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for descriptor in builtin::descriptors() {
            catalog.register(descriptor);
        }
        catalog
    }

    /// Adds or replaces a descriptor.
    pub fn register(&mut self, descriptor: DialectDescriptor) -> Option<DialectDescriptor> {
        self.descriptors.insert(descriptor.id.clone(), descriptor)
    }

    pub fn descriptor(&self, id: &str) -> Option<&DialectDescriptor> {
        self.descriptors.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    pub fn build(&self, id: &str) -> Result<Arc<Dialect>, DialectError> {
        Builder::new(self).build(id)
    }

    /// Builds every registered dialect, sharing ancestors between them.
    pub fn build_all(&self) -> Result<Vec<Arc<Dialect>>, DialectError> {
        let mut builder = Builder::new(self);
        self.ids().map(|id| builder.build(id)).collect()
    }
}

struct Builder<'c> {
    catalog: &'c DialectCatalog,
    built: HashMap<String, Arc<Dialect>>,
    visiting: Vec<String>,
}

impl<'c> Builder<'c> {
    fn new(catalog: &'c DialectCatalog) -> Self {
        Self {
            catalog,
            built: HashMap::new(),
            visiting: Vec::new(),
        }
    }

    fn build(&mut self, id: &str) -> Result<Arc<Dialect>, DialectError> {
        if let Some(dialect) = self.built.get(id) {
            return Ok(dialect.clone());
        }
        if let Some(start) = self.visiting.iter().position(|v| v == id) {
            let mut cycle = self.visiting[start..].to_vec();
            cycle.push(id.to_string());
            return Err(DialectError::Cycle(cycle));
        }
        let catalog = self.catalog;
        let descriptor = catalog
            .descriptor(id)
            .ok_or_else(|| DialectError::UnknownDialect(id.to_string()))?;

        self.visiting.push(id.to_string());
        let parents = descriptor
            .derives_from
            .iter()
            .map(|parent| self.build(parent))
            .collect::<Result<Vec<_>, _>>()?;
        let mut sources = HashMap::new();
        for import in descriptor.reader_imports.iter().chain(&descriptor.writer_imports) {
            if let Some(source) = &import.source {
                sources.insert(source.clone(), self.build(source)?);
            }
        }
        self.visiting.pop();

        let dialect = Arc::new(assemble(descriptor, &parents, &sources)?);
        validate(&dialect)?;
        debug!(
            "Built dialect '{}' from [{}]",
            dialect.id(),
            dialect.lineage().iter().join(", ")
        );
        self.built.insert(id.to_string(), dialect.clone());
        Ok(dialect)
    }
}

fn assemble(
    descriptor: &DialectDescriptor,
    parents: &[Arc<Dialect>],
    sources: &HashMap<String, Arc<Dialect>>,
) -> Result<Dialect, DialectError> {
    let inherited = parents.iter().fold(NamespaceTable::new(), |mut table, parent| {
        table.extend(parent.namespaces());
        table
    });
    let mut namespaces = match &descriptor.namespaces {
        NamespaceMode::Inherit => inherited.clone(),
        NamespaceMode::Extend(pairs) => {
            let mut table = inherited.clone();
            table.extend(&NamespaceTable::from_pairs(pairs.iter().cloned()));
            table
        }
        NamespaceMode::Replace(pairs) => NamespaceTable::from_pairs(pairs.iter().cloned()),
    };
    let compat = inherited
        .compat_iter()
        .map(|(u, a)| (u.to_string(), a.to_string()))
        .chain(descriptor.compat_namespaces.iter().cloned())
        .collect::<Vec<_>>();
    for (uri, alias) in compat {
        if namespaces.contains_alias(&alias) {
            namespaces.insert_compat(uri, alias);
        }
    }

    let readers = layer_tables(
        descriptor,
        parents.iter().map(|p| p.readers()),
        &descriptor.reader_imports,
        sources,
        Dialect::readers,
        &descriptor.readers,
    )?;
    let writers = layer_tables(
        descriptor,
        parents.iter().map(|p| p.writers()),
        &descriptor.writer_imports,
        sources,
        Dialect::writers,
        &descriptor.writers,
    )?;

    let mut schema_locations = IndexMap::new();
    for parent in parents {
        for (alias, location) in parent.schema_locations() {
            schema_locations.insert(alias.to_string(), location.to_string());
        }
    }
    for (alias, location) in &descriptor.schema_locations {
        schema_locations.insert(alias.clone(), location.clone());
    }

    let inherit = |pick: fn(&Dialect) -> Option<&str>| {
        parents.iter().rev().find_map(|p| pick(p)).map(str::to_string)
    };

    let mut lineage: Vec<String> = parents
        .iter()
        .flat_map(|p| p.lineage().iter().cloned())
        .unique()
        .collect();
    lineage.push(descriptor.id.clone());

    Ok(Dialect {
        id: descriptor.id.clone(),
        version: descriptor.version.clone().or_else(|| inherit(Dialect::version)),
        entry_point: entry_point(descriptor, parents)?,
        namespaces,
        readers,
        writers,
        schema_locations,
        request_prefixes: descriptor
            .request_prefixes
            .clone()
            .or_else(|| parents.last().map(|p| p.request_prefixes().to_vec()))
            .unwrap_or_default(),
        default_prefix: descriptor
            .default_prefix
            .clone()
            .or_else(|| inherit(Dialect::default_prefix)),
        filter_prefix: descriptor
            .filter_prefix
            .clone()
            .or_else(|| inherit(Dialect::filter_prefix)),
        lineage,
    })
}

/// Parents in order, then imports, then the descriptor's own entries.
fn layer_tables<'p>(
    descriptor: &DialectDescriptor,
    parents: impl Iterator<Item = &'p HandlerTable>,
    imports: &[TableImport],
    sources: &HashMap<String, Arc<Dialect>>,
    table_of: fn(&Dialect) -> &HandlerTable,
    own: &HandlerTable,
) -> Result<HandlerTable, DialectError> {
    let mut table = parents.fold(HandlerTable::new(), |acc, parent| compose(&acc, parent));
    let inherited = table.clone();
    for import in imports {
        let source_table = match &import.source {
            Some(source) => sources.get(source).map(|d| table_of(d)),
            None => Some(&inherited),
        };
        let set = source_table
            .and_then(|t| t.get(&import.source_alias))
            .ok_or_else(|| DialectError::UnknownImport {
                dialect: descriptor.id.clone(),
                alias: import.source_alias.clone(),
            })?;
        table.share(import.alias.clone(), set.clone());
    }
    Ok(compose(&table, own))
}

fn entry_point(descriptor: &DialectDescriptor, parents: &[Arc<Dialect>]) -> Result<EntryPoint, DialectError> {
    if let Some(entry_point) = descriptor.entry_point {
        return Ok(entry_point);
    }
    let candidates: Vec<EntryPoint> = parents.iter().map(|p| p.entry_point()).unique().collect();
    match candidates.as_slice() {
        [] => Ok(EntryPoint::Plain),
        [single] => Ok(*single),
        _ => Err(DialectError::AmbiguousEntryPoint {
            dialect: descriptor.id.clone(),
            candidates: parents
                .iter()
                .map(|p| format!("{}: {:?}", p.id(), p.entry_point()))
                .join(", "),
        }),
    }
}

fn validate(dialect: &Dialect) -> Result<(), DialectError> {
    let unbound = |alias: &str| DialectError::UnboundAlias {
        dialect: dialect.id().to_string(),
        alias: alias.to_string(),
    };
    let is_bound = |alias: &str| alias == FEATURE_ALIAS || dialect.namespaces().contains_alias(alias);

    for (table, expect_writers) in [(dialect.readers(), false), (dialect.writers(), true)] {
        for (alias, set) in table.iter() {
            if !is_bound(alias) {
                return Err(unbound(alias));
            }
            if let Some((local, handler)) = set.iter().find(|(_, h)| h.is_writer() != expect_writers) {
                return Err(DialectError::MisplacedHandler {
                    dialect: dialect.id().to_string(),
                    alias: alias.to_string(),
                    local: local.to_string(),
                    kind: handler.kind(),
                });
            }
        }
    }

    let prefixes = dialect
        .default_prefix()
        .into_iter()
        .chain(dialect.filter_prefix())
        .chain(dialect.request_prefixes().iter().map(String::as_str))
        .chain(dialect.schema_locations().map(|(alias, _)| alias));
    for prefix in prefixes {
        if !dialect.namespaces().contains_alias(prefix) {
            return Err(unbound(prefix));
        }
    }
    Ok(())
}

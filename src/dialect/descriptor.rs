use super::EntryPoint;
use crate::handler::{Handler, HandlerTable};
use crate::read::{Field, Reader};
use crate::write::Writer;

/// How a dialect's namespace table relates to its ancestors'.
#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceMode {
    /// The merged ancestor table as is.
    Inherit,
    /// The merged ancestor table plus these bindings.
    Extend(Vec<(String, String)>),
    /// Only these bindings.
    Replace(Vec<(String, String)>),
}

/// `alias ← source:source_alias`. With no source dialect the table comes from
/// the merged ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct TableImport {
    pub alias: String,
    pub source: Option<String>,
    pub source_alias: String,
}

/// The declarative definition of a dialect, resolved by a `DialectCatalog`.
#[derive(Debug, Clone, PartialEq)]
pub struct DialectDescriptor {
    pub id: String,
    pub version: Option<String>,
    /// Ancestors in layering order; later ones override earlier ones.
    pub derives_from: Vec<String>,
    pub namespaces: NamespaceMode,
    /// `(uri, alias)` pairs read as if they were the alias' primary URI.
    pub compat_namespaces: Vec<(String, String)>,
    pub reader_imports: Vec<TableImport>,
    pub writer_imports: Vec<TableImport>,
    pub readers: HandlerTable,
    pub writers: HandlerTable,
    pub entry_point: Option<EntryPoint>,
    /// `(alias, location)` pairs for `xsi:schemaLocation`.
    pub schema_locations: Vec<(String, String)>,
    pub request_prefixes: Option<Vec<String>>,
    pub default_prefix: Option<String>,
    pub filter_prefix: Option<String>,
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

impl DialectDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
            derives_from: Vec::new(),
            namespaces: NamespaceMode::Inherit,
            compat_namespaces: Vec::new(),
            reader_imports: Vec::new(),
            writer_imports: Vec::new(),
            readers: HandlerTable::new(),
            writers: HandlerTable::new(),
            entry_point: None,
            schema_locations: Vec::new(),
            request_prefixes: None,
            default_prefix: None,
            filter_prefix: None,
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn derives_from(mut self, parents: &[&str]) -> Self {
        self.derives_from = parents.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn namespaces(mut self, pairs: &[(&str, &str)]) -> Self {
        self.namespaces = NamespaceMode::Replace(owned_pairs(pairs));
        self
    }

    pub fn extend_namespaces(mut self, pairs: &[(&str, &str)]) -> Self {
        self.namespaces = NamespaceMode::Extend(owned_pairs(pairs));
        self
    }

    pub fn compat_namespace(mut self, uri: &str, alias: &str) -> Self {
        self.compat_namespaces.push((uri.to_string(), alias.to_string()));
        self
    }

    pub fn import_readers(mut self, alias: &str, source: Option<&str>, source_alias: &str) -> Self {
        self.reader_imports.push(TableImport {
            alias: alias.to_string(),
            source: source.map(str::to_string),
            source_alias: source_alias.to_string(),
        });
        self
    }

    pub fn import_writers(mut self, alias: &str, source: Option<&str>, source_alias: &str) -> Self {
        self.writer_imports.push(TableImport {
            alias: alias.to_string(),
            source: source.map(str::to_string),
            source_alias: source_alias.to_string(),
        });
        self
    }

    pub fn reader(mut self, alias: &str, local: &str, reader: Reader) -> Self {
        self.readers.insert(alias, local, Handler::Read(reader));
        self
    }

    pub fn readers_for(mut self, alias: &str, locals: &[&str], reader: Reader) -> Self {
        for local in locals {
            self.readers.insert(alias, *local, Handler::Read(reader));
        }
        self
    }

    pub fn field(mut self, alias: &str, local: &str, field: Field) -> Self {
        self.readers.insert(alias, local, Handler::Attribute(field));
        self
    }

    pub fn writer(mut self, alias: &str, local: &str, writer: Writer) -> Self {
        self.writers.insert(alias, local, Handler::Write(writer));
        self
    }

    pub fn writers_for(mut self, alias: &str, locals: &[&str], writer: Writer) -> Self {
        for local in locals {
            self.writers.insert(alias, *local, Handler::Write(writer));
        }
        self
    }

    pub fn entry_point(mut self, entry_point: EntryPoint) -> Self {
        self.entry_point = Some(entry_point);
        self
    }

    pub fn schema_location(mut self, alias: &str, location: &str) -> Self {
        self.schema_locations.push((alias.to_string(), location.to_string()));
        self
    }

    pub fn request_prefixes(mut self, prefixes: &[&str]) -> Self {
        self.request_prefixes = Some(prefixes.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn default_prefix(mut self, prefix: &str) -> Self {
        self.default_prefix = Some(prefix.to_string());
        self
    }

    pub fn filter_prefix(mut self, prefix: &str) -> Self {
        self.filter_prefix = Some(prefix.to_string());
        self
    }
}

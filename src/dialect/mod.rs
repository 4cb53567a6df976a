//! Dialects: versioned profiles of the GML/WFS/Filter/CityGML family.
//!
//! A [`Dialect`] is the immutable result of layering a [`DialectDescriptor`]
//! over its ancestors. It owns the namespace table and the reader and writer
//! tables, and is the entry point for reading responses and writing requests.

mod builtin;
mod catalog;
mod descriptor;

pub use catalog::{builtin_catalog, dialect, DialectCatalog};
pub use descriptor::{DialectDescriptor, NamespaceMode, TableImport};

use crate::error::{Error, WriteError};
use crate::handler::HandlerTable;
use crate::namespace::NamespaceTable;
use crate::read::{ReadResult, ReadSession};
use crate::write::{WriteInput, WriteSession};
use gmlwfs_types::{FeatureRecord, ReadOptions, WriteOptions};
use gmlwfs_xml::Element;
use indexmap::IndexMap;

pub const GML_3_1_1: &str = "gml-3.1.1";
pub const GML_3_2_1: &str = "gml-3.2.1";
pub const FILTER_1_1_0: &str = "filter-1.1.0";
pub const FILTER_2_0_0: &str = "filter-2.0.0";
pub const WFS_1_1_0: &str = "wfs-1.1.0";
pub const WFS_2_0_0: &str = "wfs-2.0.0";
pub const CITYGML_WFS: &str = "citygml-wfs";

/// What happens at the root of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// Plain dispatch.
    Plain,
    /// GML reading: the feature namespace and type may be detected from the
    /// first feature member when not configured.
    Gml,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    pub(crate) id: String,
    pub(crate) version: Option<String>,
    pub(crate) entry_point: EntryPoint,
    pub(crate) namespaces: NamespaceTable,
    pub(crate) readers: HandlerTable,
    pub(crate) writers: HandlerTable,
    pub(crate) schema_locations: IndexMap<String, String>,
    pub(crate) request_prefixes: Vec<String>,
    pub(crate) default_prefix: Option<String>,
    pub(crate) filter_prefix: Option<String>,
    pub(crate) lineage: Vec<String>,
}

impl Dialect {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Service version written on requests.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.entry_point
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    pub fn readers(&self) -> &HandlerTable {
        &self.readers
    }

    pub fn writers(&self) -> &HandlerTable {
        &self.writers
    }

    pub fn schema_locations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.schema_locations
            .iter()
            .map(|(a, l)| (a.as_str(), l.as_str()))
    }

    pub fn request_prefixes(&self) -> &[String] {
        &self.request_prefixes
    }

    /// Prefix for bare writer names.
    pub fn default_prefix(&self) -> Option<&str> {
        self.default_prefix.as_deref()
    }

    /// Prefix of the filter vocabulary embedded in queries and transactions.
    pub fn filter_prefix(&self) -> Option<&str> {
        self.filter_prefix.as_deref()
    }

    /// Ids of every dialect this one was layered from, ending with its own.
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    /// A read session for several documents with the same options.
    pub fn session(&self, options: ReadOptions) -> ReadSession<'_> {
        ReadSession::new(self, options)
    }

    pub fn read(&self, root: &Element, options: &ReadOptions) -> ReadResult {
        self.session(options.clone()).read(root)
    }

    pub fn read_str(&self, xml: &str, options: &ReadOptions) -> Result<ReadResult, Error> {
        let root = gmlwfs_xml::parse(xml)?;
        Ok(self.read(&root, options))
    }

    pub fn read_features(&self, root: &Element, options: &ReadOptions) -> Vec<FeatureRecord> {
        self.read(root, options).features
    }

    /// Writes a single named element; see [`WriteSession::build_node`].
    pub fn write(
        &self,
        name: &str,
        input: WriteInput<'_>,
        options: &WriteOptions,
    ) -> Result<Element, WriteError> {
        WriteSession::new(self, options).build_node(name, input)
    }

    pub fn write_get_feature(&self, options: &WriteOptions) -> Result<Element, WriteError> {
        self.write("GetFeature", WriteInput::Options(options), options)
    }

    pub fn write_transaction(
        &self,
        features: &[FeatureRecord],
        options: &WriteOptions,
    ) -> Result<Element, WriteError> {
        self.write("Transaction", WriteInput::Features(features), options)
    }

    pub fn write_feature(
        &self,
        feature: &FeatureRecord,
        options: &WriteOptions,
    ) -> Result<Element, WriteError> {
        self.write("feature:_typeName", WriteInput::Feature(feature), options)
    }

    pub fn write_get_feature_xml(&self, options: &WriteOptions) -> Result<String, Error> {
        Ok(gmlwfs_xml::to_xml(&self.write_get_feature(options)?)?)
    }

    pub fn write_transaction_xml(
        &self,
        features: &[FeatureRecord],
        options: &WriteOptions,
    ) -> Result<String, Error> {
        Ok(gmlwfs_xml::to_xml(&self.write_transaction(features, options)?)?)
    }
}

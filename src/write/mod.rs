//! The write engine: semantic names and records in, qualified element trees out.
//!
//! A writer is looked up by `prefix:local` (a bare `local` uses the dialect's
//! default prefix). Writers build their element and may call
//! [`WriteSession::write_node`] for children under any other prefix the
//! dialect binds, which is how WFS requests embed Filter and GML content.

mod feature;
mod filter;
mod wfs;

use crate::dialect::Dialect;
use crate::error::WriteError;
use crate::handler::Handler;
use crate::namespace::FEATURE_ALIAS;
use gmlwfs_types::{Bounds, FeatureRecord, Filter, Geometry, Value, WriteOptions};
use gmlwfs_xml::{Element, QName};
use itertools::Itertools;
use log::trace;

/// Paging attribute of a `GetFeature` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// WFS 1.1 `maxFeatures`.
    MaxFeatures,
    /// WFS 2.0 `count`.
    Count,
}

/// How a `Query` names the requested feature types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNames {
    /// The configured feature type, qualified with the feature prefix.
    Configured { attribute: &'static str },
    /// A fixed list regardless of configuration.
    Fixed {
        attribute: &'static str,
        names: &'static str,
    },
}

/// Which attribute carries a written feature's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdAttribute {
    Fid,
    GmlId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Writer {
    GetFeature(Paging),
    Query(TypeNames),
    PropertyName,
    Transaction,
    Insert,
    Update,
    Delete,
    /// An update property; `name_element` holds the property name.
    Property { name_element: &'static str },
    PropertyValue,
    FeatureType(IdAttribute),
    FeatureGeometry,
    FeatureAttribute,
    Envelope,
    Filter,
    Logical,
    Not,
    Comparison,
    Like,
    Between,
    IsNull,
    Boundary,
    /// The element naming a filtered property (`PropertyName`/`ValueReference`).
    PropertyReference { element: &'static str },
    Literal,
    ResourceId {
        element: &'static str,
        attribute: &'static str,
    },
    BBox,
}

/// The value of an update property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Value(&'a Value),
    Geometry(&'a Geometry),
}

/// Data handed to a writer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WriteInput<'a> {
    Options(&'a WriteOptions),
    Text(&'a str),
    Filter(&'a Filter),
    Features(&'a [FeatureRecord]),
    Feature(&'a FeatureRecord),
    Property {
        name: &'a str,
        value: Option<PropertyValue<'a>>,
    },
    PropertyValue(PropertyValue<'a>),
    /// A feature property; `namespace` is the namespace the record was read with.
    Attribute {
        name: &'a str,
        value: &'a Value,
        namespace: Option<&'a str>,
    },
    Bounds(&'a Bounds),
}

impl WriteInput<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            WriteInput::Options(_) => "options",
            WriteInput::Text(_) => "text",
            WriteInput::Filter(_) => "filter",
            WriteInput::Features(_) => "feature list",
            WriteInput::Feature(_) => "feature",
            WriteInput::Property { .. } => "property",
            WriteInput::PropertyValue(_) => "property value",
            WriteInput::Attribute { .. } => "attribute",
            WriteInput::Bounds(_) => "bounds",
        }
    }
}

/// The resolved name a writer was invoked under.
#[derive(Debug, Clone, Copy)]
pub struct WriteTarget<'n> {
    pub prefix: &'n str,
    pub local: &'n str,
}

impl WriteTarget<'_> {
    fn name(&self) -> String {
        format!("{}:{}", self.prefix, self.local)
    }

    fn unexpected(&self, input: &WriteInput<'_>) -> WriteError {
        WriteError::UnexpectedInput {
            writer: self.name(),
            found: input.kind(),
        }
    }

    fn missing(&self, option: &'static str) -> WriteError {
        WriteError::MissingOption {
            writer: self.name(),
            option,
        }
    }
}

pub struct WriteSession<'a> {
    dialect: &'a Dialect,
    options: &'a WriteOptions,
}

impl<'a> WriteSession<'a> {
    pub fn new(dialect: &'a Dialect, options: &'a WriteOptions) -> Self {
        Self { dialect, options }
    }

    pub fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    pub fn options(&self) -> &'a WriteOptions {
        self.options
    }

    /// Builds the element for `name` without attaching it anywhere.
    pub fn build_node(&self, name: &str, input: WriteInput<'_>) -> Result<Element, WriteError> {
        let (prefix, local) = match name.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => (
                self.dialect
                    .default_prefix()
                    .ok_or_else(|| WriteError::UnknownWriter(name.to_string()))?,
                name,
            ),
        };
        let writer = match self.dialect.writers().resolve(prefix, local) {
            Some(Handler::Write(writer)) => writer,
            _ => return Err(WriteError::UnknownWriter(format!("{}:{}", prefix, local))),
        };
        trace!("Writing {}:{} from {}", prefix, local, input.kind());
        writer.write(self, WriteTarget { prefix, local }, input)
    }

    /// Builds the element for `name` and appends it to `parent`.
    pub fn write_node<'p>(
        &self,
        name: &str,
        input: WriteInput<'_>,
        parent: &'p mut Element,
    ) -> Result<&'p mut Element, WriteError> {
        let child = self.build_node(name, input)?;
        Ok(parent.push_element(child))
    }

    /// A new element under a dialect prefix, or under the feature prefix and
    /// namespace when `prefix` is the feature alias.
    pub fn element(&self, prefix: &str, local: &str) -> Result<Element, WriteError> {
        if prefix == FEATURE_ALIAS {
            return Ok(self.feature_element(local, None));
        }
        let uri = self
            .dialect
            .namespaces()
            .uri(prefix)
            .ok_or_else(|| WriteError::UnknownPrefix(prefix.to_string()))?;
        Ok(Element::new(QName::qualified(prefix, uri, local)))
    }

    /// A feature-namespace element. The configured namespace wins over the
    /// one a record was read with.
    pub fn feature_element(&self, local: &str, record_ns: Option<&str>) -> Element {
        match self.feature_namespace(record_ns) {
            Some((prefix, ns)) => Element::new(QName::qualified(prefix, ns, local)),
            None => Element::new(QName::local(local)),
        }
    }

    /// Prefix and URI used for feature content.
    pub fn feature_namespace<'r>(&self, record_ns: Option<&'r str>) -> Option<(&'r str, &'r str)>
    where
        'a: 'r,
    {
        let options: &'a WriteOptions = self.options;
        let dialect: &'a Dialect = self.dialect;
        if let Some(ns) = options.feature_ns.as_deref() {
            return Some((options.feature_prefix(), ns));
        }
        let ns = record_ns?;
        let prefix = dialect
            .namespaces()
            .alias(ns)
            .unwrap_or_else(|| options.feature_prefix());
        Some((prefix, ns))
    }

    /// Resolves `prefix:local` or bare `local` to an attribute name.
    pub fn attribute_name(&self, name: &str) -> Result<QName, WriteError> {
        match name.split_once(':') {
            Some((prefix, local)) => {
                let uri = self
                    .dialect
                    .namespaces()
                    .uri(prefix)
                    .ok_or_else(|| WriteError::UnknownPrefix(prefix.to_string()))?;
                Ok(QName::qualified(prefix, uri, local))
            }
            None => Ok(QName::local(name)),
        }
    }

    /// Sets every attribute that has a value; absent ones are left off.
    pub fn set_attributes(
        &self,
        element: &mut Element,
        attributes: &[(&str, Option<String>)],
    ) -> Result<(), WriteError> {
        for (name, value) in attributes {
            if let Some(value) = value {
                element.set_attribute(self.attribute_name(name)?, value.as_str());
            }
        }
        Ok(())
    }

    /// `xsi:schemaLocation` value: dialect schema pairs plus the feature schema.
    pub fn schema_location(&self) -> Option<String> {
        let mut pairs: Vec<String> = self
            .dialect
            .schema_locations()
            .filter_map(|(alias, location)| {
                let uri = self.dialect.namespaces().uri(alias)?;
                Some(format!("{} {}", uri, location))
            })
            .collect();
        if let (Some(ns), Some(schema)) = (&self.options.feature_ns, &self.options.schema) {
            pairs.push(format!("{} {}", ns, schema));
        }
        (!pairs.is_empty()).then(|| pairs.iter().join(" "))
    }

    /// Declares the dialect's request prefixes, and the feature prefix when
    /// configured, on a request root.
    pub fn declare_request_namespaces(&self, element: &mut Element) {
        for prefix in self.dialect.request_prefixes() {
            if let Some(uri) = self.dialect.namespaces().uri(prefix) {
                element.declare_namespace(prefix.as_str(), uri);
            }
        }
        if let Some(ns) = &self.options.feature_ns {
            element.declare_namespace(self.options.feature_prefix(), ns.as_str());
        }
    }

    /// The configured feature type, qualified with the feature prefix when a
    /// feature namespace is set.
    pub fn qualified_feature_type(&self, record: Option<&FeatureRecord>) -> Option<String> {
        let local = record
            .and_then(|r| r.feature_type.as_deref())
            .or(self.options.feature_type.as_deref())?;
        let record_ns = record.and_then(|r| r.namespace.as_deref());
        Some(match self.feature_namespace(record_ns) {
            Some((prefix, _)) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        })
    }
}

impl Writer {
    pub(crate) fn write(
        self,
        session: &WriteSession<'_>,
        target: WriteTarget<'_>,
        input: WriteInput<'_>,
    ) -> Result<Element, WriteError> {
        match self {
            Writer::GetFeature(paging) => wfs::write_get_feature(session, target, input, paging),
            Writer::Query(type_names) => wfs::write_query(session, target, input, type_names),
            Writer::PropertyName => filter::write_text(session, target, input),
            Writer::Transaction => wfs::write_transaction(session, target, input),
            Writer::Insert => wfs::write_insert(session, target, input),
            Writer::Update => wfs::write_update(session, target, input),
            Writer::Delete => wfs::write_delete(session, target, input),
            Writer::Property { name_element } => wfs::write_property(session, target, input, name_element),
            Writer::PropertyValue => wfs::write_property_value(session, target, input),
            Writer::FeatureType(id) => feature::write_feature(session, target, input, id),
            Writer::FeatureGeometry => feature::write_geometry(session, target, input),
            Writer::FeatureAttribute => feature::write_attribute(session, target, input),
            Writer::Envelope => feature::write_envelope(session, target, input),
            Writer::Filter => filter::write_filter(session, target, input),
            Writer::Logical => filter::write_logical(session, target, input),
            Writer::Not => filter::write_not(session, target, input),
            Writer::Comparison => filter::write_comparison(session, target, input),
            Writer::Like => filter::write_like(session, target, input),
            Writer::Between => filter::write_between(session, target, input),
            Writer::IsNull => filter::write_is_null(session, target, input),
            Writer::Boundary => filter::write_boundary(session, target, input),
            Writer::PropertyReference { element } => {
                filter::write_property_reference(session, target, input, element)
            }
            Writer::Literal => filter::write_text(session, target, input),
            Writer::ResourceId { element, attribute } => {
                filter::write_resource_id(session, target, input, element, attribute)
            }
            Writer::BBox => filter::write_bbox(session, target, input),
        }
    }
}

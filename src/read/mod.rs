//! The read engine: element tree in, feature records out.
//!
//! Each node is dispatched on `(alias of its namespace, local name)` through
//! the dialect's reader table. Unregistered nodes are never errors: leaves
//! become attributes and containers are walked transparently.

pub mod accumulate;
mod context;
mod readers;

pub use accumulate::{parse_int, Field};
pub use context::{Component, ParseContext, ServiceException, TransactionTotals};
pub use readers::{Counts, Reader};

use crate::dialect::{Dialect, EntryPoint};
use crate::handler::Handler;
use crate::namespace::{uri, FEATURE_ALIAS};
use gmlwfs_types::{Attributes, Bounds, FeatureRecord, FieldKind, ReadOptions, Value};
use gmlwfs_xml::Element;
use log::{debug, trace, warn};

/// Wrapper elements whose first unknown-namespace child names the feature type.
const MEMBER_WRAPPERS: &[&str] = &["featureMember", "featureMembers", "member", "cityObjectMember"];
const MEMBER_WRAPPER_ALIASES: &[&str] = &["gml", "wfs", "core"];

/// Feature namespace and type inferred from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureConfig {
    pub feature_type: String,
    pub feature_ns: String,
}

/// Whether auto-detected configuration survives from one read to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detection {
    /// Reset at every root read.
    #[default]
    PerCall,
    /// Keep the first detected configuration for the life of the session.
    Sticky,
}

/// Everything a top-level read produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadResult {
    pub features: Vec<FeatureRecord>,
    pub number_returned: Option<i64>,
    pub number_matched: Option<i64>,
    pub insert_ids: Vec<String>,
    pub success: Option<bool>,
    pub totals: TransactionTotals,
    pub exceptions: Vec<ServiceException>,
    pub bounds: Option<Bounds>,
    pub detected: Option<FeatureConfig>,
}

impl ReadResult {
    fn from_context(ctx: ParseContext, detected: Option<FeatureConfig>) -> Self {
        Self {
            features: ctx.features.unwrap_or_default(),
            number_returned: ctx.number_returned,
            number_matched: ctx.number_matched,
            insert_ids: ctx.insert_ids.unwrap_or_default(),
            success: ctx.success,
            totals: ctx.totals,
            exceptions: ctx.exceptions.unwrap_or_default(),
            bounds: ctx.bounds,
            detected,
        }
    }

    pub fn is_exception(&self) -> bool {
        !self.exceptions.is_empty()
    }
}

/// Mutable state for reading with one dialect.
///
/// `Dialect::read` creates a session per call. Hold one from
/// `Dialect::session` to read several documents with the same options, and
/// switch it to [`Detection::Sticky`] to keep the detected feature type
/// between them.
pub struct ReadSession<'d> {
    dialect: &'d Dialect,
    options: ReadOptions,
    detection: Detection,
    detected: Option<FeatureConfig>,
}

impl<'d> ReadSession<'d> {
    pub fn new(dialect: &'d Dialect, options: ReadOptions) -> Self {
        Self {
            dialect,
            options,
            detection: Detection::PerCall,
            detected: None,
        }
    }

    pub fn sticky(mut self) -> Self {
        self.detection = Detection::Sticky;
        self
    }

    pub fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    pub fn detected(&self) -> Option<&FeatureConfig> {
        self.detected.as_ref()
    }

    /// Reads a whole document.
    pub fn read(&mut self, root: &Element) -> ReadResult {
        let mut ctx = ParseContext::collection();
        self.read_node(root, &mut ctx, true);
        ReadResult::from_context(ctx, self.detected.clone())
    }

    /// Dispatches one node. `is_root` marks the start of a traversal, where
    /// previously detected configuration is discarded.
    pub fn read_node(&mut self, node: &Element, ctx: &mut ParseContext, is_root: bool) {
        if is_root && self.detection == Detection::PerCall && self.detected.take().is_some() {
            debug!("Discarding feature configuration detected by a previous read");
        }
        self.visit(node, None, ctx);
    }

    pub fn read_children(&mut self, node: &Element, ctx: &mut ParseContext) {
        for child in node.elements() {
            self.visit(child, Some(node), ctx);
        }
    }

    /// Reads `node`'s children into a fresh context and returns it.
    pub fn read_scope(&mut self, node: &Element) -> ParseContext {
        let mut scope = ParseContext::default();
        self.read_children(node, &mut scope);
        scope
    }

    /// Reads `node`'s children as a nested record.
    pub fn read_record(&mut self, node: &Element) -> Attributes {
        self.read_scope(node).attributes
    }

    fn visit(&mut self, node: &Element, parent: Option<&Element>, ctx: &mut ParseContext) {
        if self.dialect.entry_point() == EntryPoint::Gml {
            self.auto_configure(node, parent);
        }

        let local = node.local_name();
        let handler = self
            .alias_for(node.namespace())
            .and_then(|alias| self.dialect.readers().resolve(alias, local));

        match handler {
            Some(Handler::Read(reader)) => reader.read(self, node, ctx),
            Some(Handler::Attribute(field)) => self.read_field(field, node, ctx),
            Some(Handler::Write(writer)) => {
                warn!("Writer {:?} found in reader table for '{}'", writer, local);
                self.fallback(node, ctx);
            }
            None => self.fallback(node, ctx),
        }
    }

    /// The dispatch alias for a namespace: dialect table first, then the
    /// configured or detected feature namespace.
    pub fn alias_for(&self, namespace: Option<&str>) -> Option<&'d str> {
        let namespace = namespace?;
        if let Some(alias) = self.dialect.namespaces().alias(namespace) {
            return Some(alias);
        }
        (self.feature_ns() == Some(namespace)).then_some(FEATURE_ALIAS)
    }

    pub fn feature_ns(&self) -> Option<&str> {
        self.options
            .feature_ns
            .as_deref()
            .or_else(|| self.detected.as_ref().map(|c| c.feature_ns.as_str()))
    }

    /// Whether `local` names a feature element under the current configuration.
    pub fn is_feature_type(&self, local: &str) -> bool {
        if !self.options.feature_type.is_empty() {
            return self.options.feature_type.iter().any(|t| t == local);
        }
        self.detected
            .as_ref()
            .is_some_and(|c| c.feature_type == local)
    }

    /// Whether an attribute belongs to any GML version this dialect reads.
    pub fn is_gml_namespace(&self, namespace: Option<&str>) -> bool {
        let Some(namespace) = namespace else {
            return false;
        };
        uri::is_gml(namespace)
            || matches!(self.dialect.namespaces().alias(namespace), Some("gml" | "gml31"))
    }

    fn field_kind(&self, name: &str) -> FieldKind {
        self.options.fields.get(name).copied().unwrap_or_default()
    }

    fn auto_configure(&mut self, node: &Element, parent: Option<&Element>) {
        if self.feature_ns().is_some() {
            return;
        }
        let (Some(parent), Some(namespace)) = (parent, node.namespace()) else {
            return;
        };
        if self.dialect.namespaces().alias(namespace).is_some() {
            return;
        }
        let wrapped = MEMBER_WRAPPERS.contains(&parent.local_name())
            && self
                .alias_for(parent.namespace())
                .is_some_and(|alias| MEMBER_WRAPPER_ALIASES.contains(&alias));
        if !wrapped {
            return;
        }

        debug!(
            "Detected feature type '{}' in namespace '{}'",
            node.local_name(),
            namespace
        );
        self.detected = Some(FeatureConfig {
            feature_type: node.local_name().to_string(),
            feature_ns: namespace.to_string(),
        });
    }

    fn read_field(&mut self, field: Field, node: &Element, ctx: &mut ParseContext) {
        let name = match field.name {
            Some(name) => name,
            None => node.local_name(),
        };
        let value = if field.kind.is_record() {
            Value::Record(self.read_record(node))
        } else {
            Value::Text(node.child_value().trim().to_string())
        };
        ctx.store(name, value, field.kind);
    }

    /// Handling for nodes without a registered reader.
    ///
    /// Values from namespaces the session cannot resolve never replace values
    /// written by recognised elements of the same record.
    pub fn fallback(&mut self, node: &Element, ctx: &mut ParseContext) {
        let local = node.local_name();
        let kind = self.field_kind(local);
        let foreign = node.namespace().is_some() && self.alias_for(node.namespace()).is_none();
        let store = |ctx: &mut ParseContext, value: Value, kind: FieldKind| {
            if foreign {
                ctx.store_foreign(local, value, kind);
            } else {
                ctx.store(local, value, kind);
            }
        };

        if !node.has_element_children() {
            trace!("Reading unregistered leaf '{}' as {:?}", local, kind);
            let value = Value::Text(node.child_value().trim().to_string());
            let kind = match kind {
                FieldKind::Record => FieldKind::Scalar,
                FieldKind::RecordList => FieldKind::List,
                other => other,
            };
            store(ctx, value, kind);
        } else if kind.is_record() {
            trace!("Reading unregistered container '{}' as a record", local);
            let record = self.read_record(node);
            store(ctx, Value::Record(record), kind);
        } else {
            self.read_children(node, ctx);
        }
    }
}

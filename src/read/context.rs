use super::accumulate;
use gmlwfs_types::{Attributes, Bounds, FeatureRecord, FieldKind, Geometry, Value};
use log::trace;
use std::collections::HashSet;

/// Something a geometry-bearing child contributed to its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Envelope(Bounds),
    Geometry(Geometry),
}

/// Counts from a `TransactionSummary`. Each is `None` when absent or not a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTotals {
    pub inserted: Option<i64>,
    pub updated: Option<i64>,
    pub replaced: Option<i64>,
    pub deleted: Option<i64>,
}

/// One `ows:Exception` from an exception report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceException {
    pub code: Option<String>,
    pub locator: Option<String>,
    pub texts: Vec<String>,
}

/// The accumulator readers write into.
///
/// One context exists per record being built; handlers that need an isolated
/// scope (features, bounds, nested records) read their children into a fresh
/// `ParseContext::default()` and lift what they need out of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseContext {
    pub attributes: Attributes,
    pub components: Vec<Component>,
    pub bounds: Option<Bounds>,
    pub ids: Vec<String>,
    /// `Some` only in collection scope; feature readers push here.
    pub features: Option<Vec<FeatureRecord>>,
    pub number_returned: Option<i64>,
    pub number_matched: Option<i64>,
    pub insert_ids: Option<Vec<String>>,
    pub success: Option<bool>,
    pub totals: TransactionTotals,
    pub exceptions: Option<Vec<ServiceException>>,
    /// Attribute keys written by recognised elements.
    claimed: HashSet<String>,
    /// Attribute keys written only by elements from unknown namespaces.
    foreign: HashSet<String>,
}

impl ParseContext {
    /// The top-level scope of a read: collects features.
    pub fn collection() -> Self {
        Self {
            features: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn push_feature(&mut self, feature: FeatureRecord) {
        self.features.get_or_insert_with(Vec::new).push(feature);
    }

    /// Stores a value read from a recognised element, replacing whatever an
    /// unknown-namespace element left under the same key.
    pub fn store(&mut self, name: &str, value: Value, kind: FieldKind) {
        if self.foreign.remove(name) {
            self.attributes.shift_remove(name);
        }
        if !self.claimed.contains(name) {
            self.claimed.insert(name.to_string());
        }
        accumulate::accumulate(&mut self.attributes, name, value, kind);
    }

    /// Stores a value read from an element in a namespace the reader does not
    /// know. Keys already written by recognised elements are left alone.
    pub fn store_foreign(&mut self, name: &str, value: Value, kind: FieldKind) {
        if self.claimed.contains(name) {
            trace!("Unknown-namespace '{}' does not replace a recognised value", name);
            return;
        }
        if !self.foreign.contains(name) {
            self.foreign.insert(name.to_string());
        }
        accumulate::accumulate(&mut self.attributes, name, value, kind);
    }

    /// The first component, if it is an envelope.
    pub fn first_envelope(&self) -> Option<&Bounds> {
        match self.components.first() {
            Some(Component::Envelope(bounds)) => Some(bounds),
            _ => None,
        }
    }

    /// The first geometry component.
    pub fn first_geometry(&self) -> Option<&Geometry> {
        self.components.iter().find_map(|c| match c {
            Component::Geometry(geometry) => Some(geometry),
            Component::Envelope(_) => None,
        })
    }
}

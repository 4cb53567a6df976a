use crate::geometry::{Bounds, Geometry};
use crate::value::{Attributes, Value};

/// What a transaction should do with a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureState {
    Insert,
    Update,
    Delete,
}

/// The decoded form of one feature element, and the input for writing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    /// Local name of the feature element, e.g. `Building`.
    pub feature_type: Option<String>,
    /// Namespace URI of the feature element.
    pub namespace: Option<String>,
    pub ids: Vec<String>,
    pub attributes: Attributes,
    pub geometry: Option<Geometry>,
    pub bounds: Option<Bounds>,
    /// Only consulted when writing transactions.
    pub state: Option<FeatureState>,
}

impl FeatureRecord {
    pub fn new(feature_type: impl Into<String>) -> Self {
        Self {
            feature_type: Some(feature_type.into()),
            ..Default::default()
        }
    }

    /// The primary feature id.
    pub fn fid(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_state(mut self, state: FeatureState) -> Self {
        self.state = Some(state);
        self
    }
}

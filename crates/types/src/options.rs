//! Per-call configuration for reading responses and writing requests.
//!
//! Both option sets deserialize from camelCase JSON so they can live next to
//! other service configuration.

use crate::filter::Filter;
use crate::value::FieldKind;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Prefix used for feature elements when the caller does not pick one.
pub const DEFAULT_FEATURE_PREFIX: &str = "feature";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadOptions {
    /// Local names of the feature elements to decode. Empty means
    /// auto-configure from the first feature member in the document.
    #[serde(deserialize_with = "one_or_many")]
    pub feature_type: Vec<String>,
    #[serde(alias = "featureNS")]
    pub feature_ns: Option<String>,
    /// Field classifications; unlisted fields are scalar.
    pub fields: IndexMap<String, FieldKind>,
    /// When false, feature properties are skipped and only ids, geometry and
    /// bounds are decoded.
    pub extract_attributes: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            feature_type: Vec::new(),
            feature_ns: None,
            fields: IndexMap::new(),
            extract_attributes: true,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn feature_type(mut self, feature_type: impl Into<String>) -> Self {
        self.feature_type.push(feature_type.into());
        self
    }

    pub fn feature_ns(mut self, feature_ns: impl Into<String>) -> Self {
        self.feature_ns = Some(feature_ns.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    pub fn extract_attributes(mut self, extract: bool) -> Self {
        self.extract_attributes = extract;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteOptions {
    pub feature_type: Option<String>,
    #[serde(alias = "featureNS")]
    pub feature_ns: Option<String>,
    pub feature_prefix: Option<String>,
    pub property_names: Vec<String>,
    pub filter: Option<Filter>,
    pub srs_name: Option<String>,
    pub handle: Option<String>,
    pub output_format: Option<String>,
    pub result_type: Option<String>,
    pub start_index: Option<u64>,
    pub count: Option<u64>,
    /// Geometry property name used for feature geometry and for spatial
    /// filters that do not name a property.
    pub geometry_name: Option<String>,
    /// Schema location of the feature type, added to `xsi:schemaLocation`.
    pub schema: Option<String>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn feature_prefix(&self) -> &str {
        self.feature_prefix
            .as_deref()
            .unwrap_or(DEFAULT_FEATURE_PREFIX)
    }

    pub fn with_feature_type(mut self, feature_type: impl Into<String>) -> Self {
        self.feature_type = Some(feature_type.into());
        self
    }

    pub fn with_feature_ns(
        mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        self.feature_prefix = Some(prefix.into());
        self.feature_ns = Some(namespace.into());
        self
    }

    pub fn with_property_name(mut self, name: impl Into<String>) -> Self {
        self.property_names.push(name.into());
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_srs_name(mut self, srs_name: impl Into<String>) -> Self {
        self.srs_name = Some(srs_name.into());
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_start_index(mut self, start_index: u64) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn with_geometry_name(mut self, geometry_name: impl Into<String>) -> Self {
        self.geometry_name = Some(geometry_name.into());
        self
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_options_defaults() {
        let options = ReadOptions::from_json("{}").unwrap();
        assert!(options.extract_attributes);
        assert!(options.feature_type.is_empty());
        assert_eq!(options, ReadOptions::default());
    }

    #[test]
    fn test_read_options_accept_single_feature_type() {
        let options = ReadOptions::from_json(
            r#"{ "featureType": "Building", "fields": { "function": "list" } }"#,
        )
        .unwrap();
        assert_eq!(options.feature_type, vec!["Building".to_string()]);
        assert_eq!(options.fields.get("function"), Some(&FieldKind::List));
    }

    #[test]
    fn test_write_options_from_json() {
        let options = WriteOptions::from_json(
            r#"{
                "featureType": "roads",
                "featureNS": "http://example.com/roads",
                "propertyNames": ["name", "lanes"],
                "count": 10,
                "filter": { "type": "resourceId", "ids": ["roads.1"] }
            }"#,
        )
        .unwrap();
        assert_eq!(options.feature_ns.as_deref(), Some("http://example.com/roads"));
        assert_eq!(options.count, Some(10));
        assert_eq!(options.property_names.len(), 2);
        assert_eq!(options.feature_prefix(), DEFAULT_FEATURE_PREFIX);
        assert_eq!(options.filter, Some(Filter::resource_ids(["roads.1"])));
    }
}

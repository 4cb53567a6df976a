//! Filter expressions written into `ogc:Filter` / `fes:Filter` elements.

use crate::geometry::Bounds;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonOp {
    EqualTo,
    NotEqualTo,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
}

impl ComparisonOp {
    pub fn element_name(self) -> &'static str {
        match self {
            ComparisonOp::EqualTo => "PropertyIsEqualTo",
            ComparisonOp::NotEqualTo => "PropertyIsNotEqualTo",
            ComparisonOp::LessThan => "PropertyIsLessThan",
            ComparisonOp::GreaterThan => "PropertyIsGreaterThan",
            ComparisonOp::LessThanOrEqualTo => "PropertyIsLessThanOrEqualTo",
            ComparisonOp::GreaterThanOrEqualTo => "PropertyIsGreaterThanOrEqualTo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Filter {
    Comparison {
        op: ComparisonOp,
        property: String,
        value: String,
        #[serde(default)]
        match_case: Option<bool>,
    },
    Like {
        property: String,
        pattern: String,
        #[serde(default = "default_wild_card")]
        wild_card: String,
        #[serde(default = "default_single_char")]
        single_char: String,
        #[serde(default = "default_escape_char")]
        escape_char: String,
        #[serde(default)]
        match_case: Option<bool>,
    },
    Between {
        property: String,
        lower: String,
        upper: String,
    },
    IsNull {
        property: String,
    },
    And {
        filters: Vec<Filter>,
    },
    Or {
        filters: Vec<Filter>,
    },
    Not {
        filter: Box<Filter>,
    },
    ResourceId {
        ids: Vec<String>,
    },
    #[serde(rename = "bbox")]
    BBox {
        #[serde(default)]
        property: Option<String>,
        bounds: Bounds,
    },
}

fn default_wild_card() -> String {
    "*".to_string()
}

fn default_single_char() -> String {
    ".".to_string()
}

fn default_escape_char() -> String {
    "!".to_string()
}

impl Filter {
    pub fn equal_to(property: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Comparison {
            op: ComparisonOp::EqualTo,
            property: property.into(),
            value: value.into(),
            match_case: None,
        }
    }

    pub fn resource_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::ResourceId {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn bbox(bounds: Bounds) -> Self {
        Filter::BBox {
            property: None,
            bounds,
        }
    }

    /// Local name of the element this filter is written as. Resource ids have
    /// no wrapper element of their own; each id becomes a sibling element.
    pub fn element_name(&self) -> &'static str {
        match self {
            Filter::Comparison { op, .. } => op.element_name(),
            Filter::Like { .. } => "PropertyIsLike",
            Filter::Between { .. } => "PropertyIsBetween",
            Filter::IsNull { .. } => "PropertyIsNull",
            Filter::And { .. } => "And",
            Filter::Or { .. } => "Or",
            Filter::Not { .. } => "Not",
            Filter::ResourceId { .. } => "_resourceId",
            Filter::BBox { .. } => "BBOX",
        }
    }

    /// Fills in the geometry property of spatial filters that do not name one,
    /// recursing through logical operators.
    pub fn with_geometry_property(&self, geometry_name: &str) -> Filter {
        match self {
            Filter::BBox {
                property: None,
                bounds,
            } => Filter::BBox {
                property: Some(geometry_name.to_string()),
                bounds: bounds.clone(),
            },
            Filter::And { filters } => Filter::And {
                filters: filters
                    .iter()
                    .map(|f| f.with_geometry_property(geometry_name))
                    .collect(),
            },
            Filter::Or { filters } => Filter::Or {
                filters: filters
                    .iter()
                    .map(|f| f.with_geometry_property(geometry_name))
                    .collect(),
            },
            Filter::Not { filter } => Filter::Not {
                filter: Box::new(filter.with_geometry_property(geometry_name)),
            },
            other => other.clone(),
        }
    }
}

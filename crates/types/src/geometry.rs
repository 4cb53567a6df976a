use gmlwfs_xml::Element;
use serde::{Deserialize, Serialize};

/// An axis-aligned envelope as carried by `gml:Envelope`.
///
/// Corners keep whatever dimension the source used, so CityGML's 3D
/// envelopes survive unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srs_name: Option<String>,
}

impl Bounds {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self {
            lower,
            upper,
            srs_name: None,
        }
    }

    /// Shorthand for a 2D envelope given as `left, bottom, right, top`.
    pub fn from_extent(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self::new(vec![left, bottom], vec![right, top])
    }

    pub fn with_srs_name(mut self, srs_name: impl Into<String>) -> Self {
        self.srs_name = Some(srs_name.into());
        self
    }

    pub fn dimension(&self) -> usize {
        self.lower.len().max(self.upper.len())
    }

    /// Parses a whitespace separated coordinate tuple such as a `gml:lowerCorner`.
    /// Tokens that are not numbers are skipped.
    pub fn parse_corner(text: &str) -> Vec<f64> {
        text.split_whitespace()
            .filter_map(|token| token.parse::<f64>().ok())
            .collect()
    }

    pub fn format_corner(corner: &[f64]) -> String {
        corner
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A geometry kept as its source subtree.
///
/// Coordinate decoding belongs to the caller; the engine only carries the
/// element from the input document to the feature record and back out again.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub element: Element,
}

impl Geometry {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// The geometry type, e.g. `Point` or `MultiSurface`.
    pub fn kind(&self) -> &str {
        self.element.local_name()
    }

    pub fn srs_name(&self) -> Option<&str> {
        self.element.attribute("srsName")
    }
}

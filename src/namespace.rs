//! Namespace alias tables.
//!
//! Every dialect owns one immutable table mapping aliases (`gml`, `wfs`, ...)
//! to URIs. The reverse direction is what the read engine uses to turn a node's
//! namespace into a dispatch key; when two aliases share a URI the first one
//! declared wins. Compatibility URIs map an adjacent schema version onto an
//! existing alias so documents from that version still dispatch.

use indexmap::IndexMap;
use std::collections::HashMap;

/// Alias under which per-call feature namespaces are dispatched.
pub const FEATURE_ALIAS: &str = "feature";

/// Well-known namespace URIs.
pub mod uri {
    pub const XLINK: &str = "http://www.w3.org/1999/xlink";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    pub const GML_3_1: &str = "http://www.opengis.net/gml";
    pub const GML_3_2: &str = "http://www.opengis.net/gml/3.2";
    pub const WFS_1_1: &str = "http://www.opengis.net/wfs";
    pub const WFS_2_0: &str = "http://www.opengis.net/wfs/2.0";
    pub const OGC: &str = "http://www.opengis.net/ogc";
    pub const FES_2_0: &str = "http://www.opengis.net/fes/2.0";
    pub const OWS_1_0: &str = "http://www.opengis.net/ows";
    pub const OWS_1_1: &str = "http://www.opengis.net/ows/1.1";

    pub const CITYGML_CORE: &str = "http://www.opengis.net/citygml/1.0";
    pub const CITYGML_TRANSPORTATION: &str = "http://www.opengis.net/citygml/transportation/1.0";
    pub const CITYGML_WATERBODY: &str = "http://www.opengis.net/citygml/waterbody/1.0";
    pub const CITYGML_GROUP: &str = "http://www.opengis.net/citygml/cityobjectgroup/1.0";
    pub const CITYGML_LANDUSE: &str = "http://www.opengis.net/citygml/landuse/1.0";
    pub const CITYGML_FURNITURE: &str = "http://www.opengis.net/citygml/cityfurniture/1.0";
    pub const CITYGML_APPEARANCE: &str = "http://www.opengis.net/citygml/appearance/1.0";
    pub const CITYGML_TEXTURED: &str = "http://www.opengis.net/citygml/texturedsurface/1.0";
    pub const CITYGML_BUILDING: &str = "http://www.opengis.net/citygml/building/1.0";
    pub const CITYGML_RELIEF: &str = "http://www.opengis.net/citygml/relief/1.0";
    pub const CITYGML_VEGETATION: &str = "http://www.opengis.net/citygml/vegetation/1.0";
    pub const CITYGML_GENERICS: &str = "http://www.opengis.net/citygml/generics/1.0";
    pub const XAL: &str = "urn:oasis:names:tc:ciq:xsdschema:xAL:2.0";

    /// Whether a URI names any GML version.
    pub fn is_gml(uri: &str) -> bool {
        uri == GML_3_1 || uri == GML_3_2
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceTable {
    aliases: IndexMap<String, String>,
    by_uri: HashMap<String, String>,
    compat: IndexMap<String, String>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<A, U>(pairs: impl IntoIterator<Item = (A, U)>) -> Self
    where
        A: Into<String>,
        U: Into<String>,
    {
        let mut table = Self::new();
        for (alias, uri) in pairs {
            table.insert(alias, uri);
        }
        table
    }

    /// Binds an alias, replacing any previous URI for it.
    pub fn insert(&mut self, alias: impl Into<String>, uri: impl Into<String>) {
        let alias = alias.into();
        let uri = uri.into();
        let replaced = self.aliases.insert(alias.clone(), uri.clone());
        if replaced.is_some() {
            self.rebuild_reverse();
        } else {
            self.by_uri.entry(uri).or_insert(alias);
        }
    }

    /// Maps an additional URI onto an existing alias for reading only.
    pub fn insert_compat(&mut self, uri: impl Into<String>, alias: impl Into<String>) {
        self.compat.insert(uri.into(), alias.into());
    }

    pub fn uri(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// The dispatch alias for a URI, falling back to compatibility URIs.
    pub fn alias(&self, uri: &str) -> Option<&str> {
        self.by_uri
            .get(uri)
            .or_else(|| self.compat.get(uri))
            .map(String::as_str)
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, u)| (a.as_str(), u.as_str()))
    }

    pub fn compat_iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.compat.iter().map(|(u, a)| (u.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Layers `other` on top of this table; its bindings win.
    pub fn extend(&mut self, other: &NamespaceTable) {
        for (alias, uri) in other.iter() {
            self.insert(alias, uri);
        }
        for (uri, alias) in other.compat_iter() {
            self.insert_compat(uri, alias);
        }
    }

    fn rebuild_reverse(&mut self) {
        self.by_uri.clear();
        for (alias, uri) in &self.aliases {
            self.by_uri
                .entry(uri.clone())
                .or_insert_with(|| alias.clone());
        }
    }
}

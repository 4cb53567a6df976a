//! Owned XML element tree used as the source and sink of the transcoding engine.
//!
//! Parsing is delegated to `roxmltree`, serialization to `quick-xml`. The tree
//! itself is deliberately small: elements, attributes and text. Comments and
//! processing instructions are dropped on parse.

pub mod element;
pub mod error;
pub mod parse;
pub mod serialize;

pub use element::{Attribute, Element, Node, QName, XML_NS};
pub use error::XmlError;
pub use parse::parse;
pub use serialize::{to_xml, to_xml_pretty};

//! Element tree sink backed by `quick-xml`.
//!
//! The serializer keeps a stack of in-scope namespace bindings and emits an
//! `xmlns` declaration whenever an element or attribute name uses a prefix that
//! is not yet bound to the right URI.

use crate::element::{Element, Node, QName, XML_NS};
use crate::error::XmlError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Serializes an element tree to a compact XML document.
pub fn to_xml(element: &Element) -> Result<String, XmlError> {
    write_document(Writer::new(Vec::new()), element)
}

/// Serializes an element tree with two-space indentation.
pub fn to_xml_pretty(element: &Element) -> Result<String, XmlError> {
    write_document(Writer::new_with_indent(Vec::new(), b' ', 2), element)
}

fn write_document(mut writer: Writer<Vec<u8>>, element: &Element) -> Result<String, XmlError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut scope = NamespaceScope::default();
    write_element(&mut writer, element, &mut scope)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

#[derive(Default)]
struct NamespaceScope {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScope {
    fn lookup(&self, prefix: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, u)| u == uri && !p.is_empty())
            .map(|(p, _)| p.as_str())
    }
}

/// Bindings being introduced on the element currently written.
struct PendingDeclarations<'s> {
    scope: &'s NamespaceScope,
    declared: Vec<(String, String)>,
}

impl<'s> PendingDeclarations<'s> {
    fn lookup(&self, prefix: &str) -> Option<&str> {
        self.declared
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
            .or_else(|| self.scope.lookup(prefix))
    }

    fn bind(&mut self, prefix: &str, uri: &str) {
        if self.lookup(prefix) != Some(uri) {
            self.declared.push((prefix.to_string(), uri.to_string()));
        }
    }

    /// Ensures the element name's namespace is in scope.
    fn require_element(&mut self, name: &QName) {
        match &name.namespace {
            Some(uri) if uri == XML_NS => {}
            Some(uri) => {
                let prefix = name.prefix.clone().unwrap_or_default();
                self.bind(&prefix, uri);
            }
            None => {
                // Undo an inherited default namespace for unqualified elements.
                if name.prefix.is_none() && self.lookup("").is_some_and(|uri| !uri.is_empty()) {
                    self.declared.push((String::new(), String::new()));
                }
            }
        }
    }

    /// A generated `nsN` prefix not bound on this element or in scope.
    fn unused_prefix(&self) -> String {
        (self.declared.len()..)
            .map(|n| format!("ns{}", n))
            .find(|prefix| self.lookup(prefix).is_none())
            .unwrap_or_default()
    }

    /// Returns the lexical name to use for an attribute, binding its prefix if needed.
    fn require_attribute(&mut self, name: &QName) -> String {
        let Some(uri) = &name.namespace else {
            return name.local.clone();
        };
        if uri == XML_NS {
            return format!("xml:{}", name.local);
        }
        let prefix = match name.prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => prefix.to_string(),
            None => match self.scope.prefix_for(uri) {
                Some(prefix) => prefix.to_string(),
                None => self.unused_prefix(),
            },
        };
        self.bind(&prefix, uri);
        format!("{}:{}", prefix, name.local)
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    scope: &mut NamespaceScope,
) -> Result<(), XmlError> {
    let mut pending = PendingDeclarations {
        scope,
        declared: Vec::new(),
    };
    for (prefix, uri) in &element.namespaces {
        pending.bind(prefix, uri);
    }
    pending.require_element(&element.name);
    let attributes: Vec<(String, &str)> = element
        .attributes
        .iter()
        .map(|attr| (pending.require_attribute(&attr.name), attr.value.as_str()))
        .collect();
    let declared = pending.declared;

    let tag = element.name.prefixed_name();
    let mut start = BytesStart::new(tag.as_str());
    for (prefix, uri) in &declared {
        let key = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", prefix)
        };
        start.push_attribute((key.as_str(), uri.as_str()));
    }
    for (key, value) in &attributes {
        start.push_attribute((key.as_str(), *value));
    }

    scope.frames.push(declared);
    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        for child in &element.children {
            match child {
                Node::Element(child) => write_element(writer, child, scope)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
    }
    scope.frames.pop();
    Ok(())
}

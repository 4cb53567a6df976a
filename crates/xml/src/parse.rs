// Element tree source backed by roxmltree
use crate::element::{Attribute, Element, Node, QName, XML_NS};
use crate::error::XmlError;

/// Parses a document and returns its root element as an owned tree.
pub fn parse(text: &str) -> Result<Element, XmlError> {
    let doc = roxmltree::Document::parse(text)?;
    let root = convert(doc.root_element());
    log::trace!("Parsed XML document with root '{}'", root.name.prefixed_name());
    Ok(root)
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualify(node, tag.namespace(), tag.name()));

    for attr in node.attributes() {
        element.attributes.push(Attribute {
            name: qualify(node, attr.namespace(), attr.name()),
            value: attr.value().to_string(),
        });
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert(child)));
        } else if child.is_text() {
            // CDATA sections surface as text nodes as well
            if let Some(text) = child.text() {
                element.children.push(Node::Text(text.to_string()));
            }
        }
    }
    element
}

/// roxmltree resolves namespaces but does not keep prefixes on names, so the
/// prefix is looked up from the in-scope declarations of the owning element.
fn qualify(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> QName {
    let prefix = namespace
        .and_then(|uri| {
            if uri == XML_NS {
                Some("xml")
            } else {
                node.lookup_prefix(uri)
            }
        })
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string);

    QName {
        namespace: namespace.map(str::to_string),
        prefix,
        local: local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_namespaces_and_prefixes() {
        let xml = r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"
            xmlns:gml="http://www.opengis.net/gml/3.2" numberMatched="3">
            <wfs:member><gml:Point gml:id="p1"/></wfs:member>
        </wfs:FeatureCollection>"#;
        let root = parse(xml).unwrap();

        assert_eq!(root.local_name(), "FeatureCollection");
        assert_eq!(root.namespace(), Some("http://www.opengis.net/wfs/2.0"));
        assert_eq!(root.name.prefix.as_deref(), Some("wfs"));
        assert_eq!(root.attribute("numberMatched"), Some("3"));

        let member = root.first_element().unwrap();
        let point = member.first_element().unwrap();
        assert_eq!(point.name.prefix.as_deref(), Some("gml"));
        assert_eq!(
            point.attribute_ns("http://www.opengis.net/gml/3.2", "id"),
            Some("p1")
        );
    }

    #[test]
    fn test_parse_default_namespace_has_no_prefix() {
        let root = parse(r#"<Root xmlns="urn:test"><child>text</child></Root>"#).unwrap();
        assert_eq!(root.namespace(), Some("urn:test"));
        assert_eq!(root.name.prefix, None);
        assert_eq!(root.first_element().unwrap().child_value(), "text");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(parse("<open>"), Err(XmlError::Parse(_))));
    }
}

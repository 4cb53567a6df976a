use super::{IdAttribute, WriteInput, WriteSession, WriteTarget};
use crate::error::WriteError;
use gmlwfs_types::{Bounds, Value};
use gmlwfs_xml::Element;

pub(super) fn write_feature(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
    id: IdAttribute,
) -> Result<Element, WriteError> {
    let feature = match input {
        WriteInput::Feature(feature) => feature,
        other => return Err(target.unexpected(&other)),
    };
    let local = feature
        .feature_type
        .as_deref()
        .or(session.options().feature_type.as_deref())
        .ok_or_else(|| target.missing("featureType"))?;
    let record_ns = feature.namespace.as_deref();
    let mut node = session.feature_element(local, record_ns);

    if let Some(fid) = feature.fid() {
        let name = match id {
            IdAttribute::Fid => session.attribute_name("fid")?,
            IdAttribute::GmlId => session.attribute_name("gml:id")?,
        };
        node.set_attribute(name, fid);
    }
    if feature.geometry.is_some() {
        session.write_node(
            &format!("{}:_geometry", target.prefix),
            WriteInput::Feature(feature),
            &mut node,
        )?;
    }
    let attribute = format!("{}:_attribute", target.prefix);
    for (name, value) in &feature.attributes {
        match value {
            // one element per entry, in order
            Value::List(items) => {
                for item in items {
                    session.write_node(
                        &attribute,
                        WriteInput::Attribute {
                            name: name.as_str(),
                            value: item,
                            namespace: record_ns,
                        },
                        &mut node,
                    )?;
                }
            }
            value => {
                session.write_node(
                    &attribute,
                    WriteInput::Attribute {
                        name: name.as_str(),
                        value,
                        namespace: record_ns,
                    },
                    &mut node,
                )?;
            }
        }
    }
    Ok(node)
}

pub(super) fn write_geometry(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let (geometry, record_ns) = match input {
        WriteInput::Feature(feature) => match &feature.geometry {
            Some(geometry) => (geometry, feature.namespace.as_deref()),
            None => return Err(target.unexpected(&input)),
        },
        other => return Err(target.unexpected(&other)),
    };
    let name = session.options().geometry_name.as_deref().unwrap_or("geometry");
    Ok(session
        .feature_element(name, record_ns)
        .with_child(geometry.element.clone()))
}

pub(super) fn write_attribute(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let (name, value, record_ns) = match input {
        WriteInput::Attribute {
            name,
            value,
            namespace,
        } => (name, value, namespace),
        other => return Err(target.unexpected(&other)),
    };
    let mut node = session.feature_element(name, record_ns);
    fill_value(session, &mut node, value, record_ns);
    Ok(node)
}

/// Writes a value as element content: text, nested fields for records, and
/// whitespace-joined text for lists.
pub(super) fn fill_value(
    session: &WriteSession<'_>,
    node: &mut Element,
    value: &Value,
    record_ns: Option<&str>,
) {
    match value {
        Value::Text(text) => node.push_text(text.as_str()),
        Value::List(items) => {
            let text = items
                .iter()
                .filter_map(Value::as_text)
                .collect::<Vec<_>>()
                .join(" ");
            node.push_text(text);
        }
        Value::Record(fields) => {
            for (name, field) in fields {
                let items: Vec<&Value> = match field {
                    Value::List(items) => items.iter().collect(),
                    single => vec![single],
                };
                for item in items {
                    let child = node.push_element(session.feature_element(name, record_ns));
                    fill_value(session, child, item, record_ns);
                }
            }
        }
    }
}

pub(super) fn write_envelope(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let bounds = match input {
        WriteInput::Bounds(bounds) => bounds,
        other => return Err(target.unexpected(&other)),
    };
    let mut node = session.element(target.prefix, target.local)?;
    let srs_name = bounds
        .srs_name
        .clone()
        .or_else(|| session.options().srs_name.clone());
    session.set_attributes(&mut node, &[("srsName", srs_name)])?;
    node.push_element(
        session
            .element(target.prefix, "lowerCorner")?
            .with_text(Bounds::format_corner(&bounds.lower)),
    );
    node.push_element(
        session
            .element(target.prefix, "upperCorner")?
            .with_text(Bounds::format_corner(&bounds.upper)),
    );
    Ok(node)
}

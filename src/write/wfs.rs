use super::{Paging, PropertyValue, TypeNames, WriteInput, WriteSession, WriteTarget};
use crate::error::WriteError;
use gmlwfs_types::{FeatureState, Filter, WriteOptions};
use gmlwfs_xml::Element;
use log::debug;

fn expect_options<'i>(
    target: &WriteTarget<'_>,
    input: WriteInput<'i>,
) -> Result<&'i WriteOptions, WriteError> {
    match input {
        WriteInput::Options(options) => Ok(options),
        other => Err(target.unexpected(&other)),
    }
}

fn expect_feature<'i>(
    target: &WriteTarget<'_>,
    input: WriteInput<'i>,
) -> Result<&'i gmlwfs_types::FeatureRecord, WriteError> {
    match input {
        WriteInput::Feature(feature) => Ok(feature),
        other => Err(target.unexpected(&other)),
    }
}

fn filter_name(session: &WriteSession<'_>, target: &WriteTarget<'_>) -> Result<String, WriteError> {
    let prefix = session
        .dialect()
        .filter_prefix()
        .ok_or_else(|| target.missing("filterPrefix"))?;
    Ok(format!("{}:Filter", prefix))
}

pub(super) fn write_get_feature(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
    paging: Paging,
) -> Result<Element, WriteError> {
    let options = expect_options(&target, input)?;
    let mut node = session.element(target.prefix, target.local)?;

    let limit = options.count.map(|n| n.to_string());
    let (max_features, count) = match paging {
        Paging::MaxFeatures => (limit, None),
        Paging::Count => (None, limit),
    };
    session.set_attributes(
        &mut node,
        &[
            ("service", Some("WFS".to_string())),
            ("version", session.dialect().version().map(str::to_string)),
            ("handle", options.handle.clone()),
            ("outputFormat", options.output_format.clone()),
            ("resultType", options.result_type.clone()),
            ("startIndex", options.start_index.map(|n| n.to_string())),
            ("maxFeatures", max_features),
            ("count", count),
            ("xsi:schemaLocation", session.schema_location()),
        ],
    )?;
    session.declare_request_namespaces(&mut node);

    session.write_node("Query", WriteInput::Options(options), &mut node)?;
    Ok(node)
}

pub(super) fn write_query(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
    type_names: TypeNames,
) -> Result<Element, WriteError> {
    let options = expect_options(&target, input)?;
    let mut node = session.element(target.prefix, target.local)?;

    let (attribute, value) = match type_names {
        TypeNames::Configured { attribute } => {
            let value = session
                .qualified_feature_type(None)
                .ok_or_else(|| target.missing("featureType"))?;
            if let Some(ns) = &options.feature_ns {
                node.declare_namespace(options.feature_prefix(), ns.as_str());
            }
            (attribute, value)
        }
        TypeNames::Fixed { attribute, names } => (attribute, names.to_string()),
    };
    session.set_attributes(
        &mut node,
        &[(attribute, Some(value)), ("srsName", options.srs_name.clone())],
    )?;

    for name in &options.property_names {
        session.write_node(&format!("{}:PropertyName", target.prefix), WriteInput::Text(name), &mut node)?;
    }
    if let Some(filter) = &options.filter {
        let filter = match &options.geometry_name {
            Some(geometry_name) => filter.with_geometry_property(geometry_name),
            None => filter.clone(),
        };
        session.write_node(&filter_name(session, &target)?, WriteInput::Filter(&filter), &mut node)?;
    }
    Ok(node)
}

pub(super) fn write_transaction(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let features = match input {
        WriteInput::Features(features) => features,
        other => return Err(target.unexpected(&other)),
    };
    let options = session.options();
    let mut node = session.element(target.prefix, target.local)?;
    session.set_attributes(
        &mut node,
        &[
            ("service", Some("WFS".to_string())),
            ("version", session.dialect().version().map(str::to_string)),
            ("handle", options.handle.clone()),
            ("xsi:schemaLocation", session.schema_location()),
        ],
    )?;
    session.declare_request_namespaces(&mut node);

    for feature in features {
        let action = match feature.state {
            Some(FeatureState::Insert) => "Insert",
            Some(FeatureState::Update) => "Update",
            Some(FeatureState::Delete) => "Delete",
            None => {
                debug!("Leaving feature {:?} without a state out of the transaction", feature.fid());
                continue;
            }
        };
        session.write_node(
            &format!("{}:{}", target.prefix, action),
            WriteInput::Feature(feature),
            &mut node,
        )?;
    }
    Ok(node)
}

pub(super) fn write_insert(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let feature = expect_feature(&target, input)?;
    let mut node = session.element(target.prefix, target.local)?;
    session.write_node("feature:_typeName", WriteInput::Feature(feature), &mut node)?;
    Ok(node)
}

/// Opens an `Update`/`Delete` element: type name plus the feature namespace.
fn typed_action(
    session: &WriteSession<'_>,
    target: &WriteTarget<'_>,
    feature: &gmlwfs_types::FeatureRecord,
) -> Result<Element, WriteError> {
    let mut node = session.element(target.prefix, target.local)?;
    let type_name = session
        .qualified_feature_type(Some(feature))
        .ok_or_else(|| target.missing("featureType"))?;
    node.set_attribute(session.attribute_name("typeName")?, type_name);
    if let Some((prefix, ns)) = session.feature_namespace(feature.namespace.as_deref()) {
        node.declare_namespace(prefix, ns);
    }
    Ok(node)
}

fn write_id_filter(
    session: &WriteSession<'_>,
    target: &WriteTarget<'_>,
    feature: &gmlwfs_types::FeatureRecord,
    node: &mut Element,
) -> Result<(), WriteError> {
    let fid = feature
        .fid()
        .ok_or_else(|| WriteError::MissingFeatureId(format!("{}:{}", target.prefix, target.local)))?;
    let filter = Filter::resource_ids([fid]);
    session.write_node(&filter_name(session, target)?, WriteInput::Filter(&filter), node)?;
    Ok(())
}

pub(super) fn write_update(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let feature = expect_feature(&target, input)?;
    let mut node = typed_action(session, &target, feature)?;
    let property = format!("{}:Property", target.prefix);

    if let Some(geometry) = &feature.geometry {
        let name = session.options().geometry_name.as_deref().unwrap_or("geometry");
        session.write_node(
            &property,
            WriteInput::Property {
                name,
                value: Some(PropertyValue::Geometry(geometry)),
            },
            &mut node,
        )?;
    }
    for (name, value) in &feature.attributes {
        session.write_node(
            &property,
            WriteInput::Property {
                name: name.as_str(),
                value: Some(PropertyValue::Value(value)),
            },
            &mut node,
        )?;
    }
    write_id_filter(session, &target, feature, &mut node)?;
    Ok(node)
}

pub(super) fn write_delete(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let feature = expect_feature(&target, input)?;
    let mut node = typed_action(session, &target, feature)?;
    write_id_filter(session, &target, feature, &mut node)?;
    Ok(node)
}

pub(super) fn write_property(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
    name_element: &'static str,
) -> Result<Element, WriteError> {
    let (name, value) = match input {
        WriteInput::Property { name, value } => (name, value),
        other => return Err(target.unexpected(&other)),
    };
    let mut node = session.element(target.prefix, target.local)?;
    node.push_element(session.element(target.prefix, name_element)?.with_text(name));
    if let Some(value) = value {
        session.write_node(
            &format!("{}:Value", target.prefix),
            WriteInput::PropertyValue(value),
            &mut node,
        )?;
    }
    Ok(node)
}

pub(super) fn write_property_value(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let value = match input {
        WriteInput::PropertyValue(value) => value,
        other => return Err(target.unexpected(&other)),
    };
    let mut node = session.element(target.prefix, target.local)?;
    match value {
        PropertyValue::Geometry(geometry) => {
            node.push_element(geometry.element.clone());
        }
        PropertyValue::Value(value) => super::feature::fill_value(session, &mut node, value, None),
    }
    Ok(node)
}

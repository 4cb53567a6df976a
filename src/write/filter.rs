//! Writers for the `ogc` (Filter 1.1) and `fes` (Filter 2.0) vocabularies.
//! The same functions serve both; the element names that differ are carried
//! by the registered `Writer` variants.

use super::{WriteInput, WriteSession, WriteTarget};
use crate::error::WriteError;
use gmlwfs_types::Filter;
use gmlwfs_xml::Element;

fn expect_filter<'i>(target: &WriteTarget<'_>, input: WriteInput<'i>) -> Result<&'i Filter, WriteError> {
    match input {
        WriteInput::Filter(filter) => Ok(filter),
        other => Err(target.unexpected(&other)),
    }
}

fn expect_text<'i>(target: &WriteTarget<'_>, input: WriteInput<'i>) -> Result<&'i str, WriteError> {
    match input {
        WriteInput::Text(text) => Ok(text),
        other => Err(target.unexpected(&other)),
    }
}

/// Appends the element(s) for `filter` under `prefix`.
fn write_child(
    session: &WriteSession<'_>,
    prefix: &str,
    filter: &Filter,
    parent: &mut Element,
) -> Result<(), WriteError> {
    let name = format!("{}:{}", prefix, filter.element_name());
    match filter {
        Filter::ResourceId { ids } => {
            for id in ids {
                session.write_node(&name, WriteInput::Text(id), parent)?;
            }
        }
        other => {
            session.write_node(&name, WriteInput::Filter(other), parent)?;
        }
    }
    Ok(())
}

fn write_property(
    session: &WriteSession<'_>,
    prefix: &str,
    property: &str,
    parent: &mut Element,
) -> Result<(), WriteError> {
    session.write_node(&format!("{}:_property", prefix), WriteInput::Text(property), parent)?;
    Ok(())
}

fn write_literal(
    session: &WriteSession<'_>,
    prefix: &str,
    value: &str,
    parent: &mut Element,
) -> Result<(), WriteError> {
    session.write_node(&format!("{}:Literal", prefix), WriteInput::Text(value), parent)?;
    Ok(())
}

fn bool_attr(value: Option<bool>) -> Option<String> {
    value.map(|v| v.to_string())
}

pub(super) fn write_filter(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let filter = expect_filter(&target, input)?;
    let mut node = session.element(target.prefix, target.local)?;
    write_child(session, target.prefix, filter, &mut node)?;
    Ok(node)
}

pub(super) fn write_logical(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let filters = match expect_filter(&target, input)? {
        Filter::And { filters } | Filter::Or { filters } => filters,
        _ => return Err(target.unexpected(&input)),
    };
    let mut node = session.element(target.prefix, target.local)?;
    for filter in filters {
        write_child(session, target.prefix, filter, &mut node)?;
    }
    Ok(node)
}

pub(super) fn write_not(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let Filter::Not { filter } = expect_filter(&target, input)? else {
        return Err(target.unexpected(&input));
    };
    let mut node = session.element(target.prefix, target.local)?;
    write_child(session, target.prefix, filter, &mut node)?;
    Ok(node)
}

pub(super) fn write_comparison(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let Filter::Comparison {
        property,
        value,
        match_case,
        ..
    } = expect_filter(&target, input)?
    else {
        return Err(target.unexpected(&input));
    };
    let mut node = session.element(target.prefix, target.local)?;
    session.set_attributes(&mut node, &[("matchCase", bool_attr(*match_case))])?;
    write_property(session, target.prefix, property, &mut node)?;
    write_literal(session, target.prefix, value, &mut node)?;
    Ok(node)
}

pub(super) fn write_like(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let Filter::Like {
        property,
        pattern,
        wild_card,
        single_char,
        escape_char,
        match_case,
    } = expect_filter(&target, input)?
    else {
        return Err(target.unexpected(&input));
    };
    let mut node = session.element(target.prefix, target.local)?;
    session.set_attributes(
        &mut node,
        &[
            ("wildCard", Some(wild_card.clone())),
            ("singleChar", Some(single_char.clone())),
            ("escapeChar", Some(escape_char.clone())),
            ("matchCase", bool_attr(*match_case)),
        ],
    )?;
    write_property(session, target.prefix, property, &mut node)?;
    write_literal(session, target.prefix, pattern, &mut node)?;
    Ok(node)
}

pub(super) fn write_between(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let Filter::Between {
        property,
        lower,
        upper,
    } = expect_filter(&target, input)?
    else {
        return Err(target.unexpected(&input));
    };
    let mut node = session.element(target.prefix, target.local)?;
    write_property(session, target.prefix, property, &mut node)?;
    session.write_node(
        &format!("{}:LowerBoundary", target.prefix),
        WriteInput::Text(lower),
        &mut node,
    )?;
    session.write_node(
        &format!("{}:UpperBoundary", target.prefix),
        WriteInput::Text(upper),
        &mut node,
    )?;
    Ok(node)
}

pub(super) fn write_boundary(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let value = expect_text(&target, input)?;
    let mut node = session.element(target.prefix, target.local)?;
    write_literal(session, target.prefix, value, &mut node)?;
    Ok(node)
}

pub(super) fn write_is_null(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let Filter::IsNull { property } = expect_filter(&target, input)? else {
        return Err(target.unexpected(&input));
    };
    let mut node = session.element(target.prefix, target.local)?;
    write_property(session, target.prefix, property, &mut node)?;
    Ok(node)
}

pub(super) fn write_property_reference(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
    element: &'static str,
) -> Result<Element, WriteError> {
    let property = expect_text(&target, input)?;
    Ok(session.element(target.prefix, element)?.with_text(property))
}

/// Element with the input text as content (`Literal`, `wfs:PropertyName`).
pub(super) fn write_text(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let text = expect_text(&target, input)?;
    Ok(session.element(target.prefix, target.local)?.with_text(text))
}

pub(super) fn write_resource_id(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<Element, WriteError> {
    let id = expect_text(&target, input)?;
    let mut node = session.element(target.prefix, element)?;
    session.set_attributes(&mut node, &[(attribute, Some(id.to_string()))])?;
    Ok(node)
}

/// `BBOX` delegates the envelope to the `gml` writers.
pub(super) fn write_bbox(
    session: &WriteSession<'_>,
    target: WriteTarget<'_>,
    input: WriteInput<'_>,
) -> Result<Element, WriteError> {
    let Filter::BBox { property, bounds } = expect_filter(&target, input)? else {
        return Err(target.unexpected(&input));
    };
    let mut node = session.element(target.prefix, target.local)?;
    if let Some(property) = property {
        write_property(session, target.prefix, property, &mut node)?;
    }
    session.write_node("gml:Envelope", WriteInput::Bounds(bounds), &mut node)?;
    Ok(node)
}

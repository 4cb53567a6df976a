use super::accumulate::parse_int;
use super::context::{Component, ParseContext, ServiceException};
use super::ReadSession;
use gmlwfs_types::{Attributes, Bounds, FeatureRecord, FieldKind, Geometry, Value};
use gmlwfs_xml::Element;
use log::{debug, trace};

/// Which count attributes a collection element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counts {
    None,
    /// WFS 1.1 `numberOfFeatures`.
    NumberOfFeatures,
    /// WFS 2.0 `numberReturned` and `numberMatched`.
    ReturnedAndMatched,
}

/// Structural readers registered in reader tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reader {
    /// Walk the children against the same context.
    Children,
    FeatureCollection(Counts),
    /// Decode the node as one feature and push it to the collection. Inside
    /// another feature or record it becomes a nested record under its local
    /// name instead.
    Feature,
    /// Wildcard for the feature namespace: a configured feature type in
    /// collection scope is a feature, anything else is a property.
    FeatureProperty,
    /// Capture the subtree as an opaque geometry component.
    Geometry,
    BoundedBy,
    Envelope,
    TransactionResponse,
    TransactionSummary,
    /// A `Feature` under `InsertResults`: contributes its first id, if any.
    InsertedFeature,
    /// Adds the value of `attribute` to the context's ids.
    ResourceId { attribute: &'static str },
    /// Builds a nested record stored under `field`.
    Record {
        field: &'static str,
        kind: FieldKind,
    },
    /// A CityGML generic attribute of the given value type.
    GenericAttribute { value_type: &'static str },
    ExceptionReport,
    Exception,
}

impl Reader {
    pub(crate) fn read(self, session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
        match self {
            Reader::Children => session.read_children(node, ctx),
            Reader::FeatureCollection(counts) => read_feature_collection(session, node, ctx, counts),
            Reader::Feature => read_feature(session, node, ctx),
            Reader::FeatureProperty => read_feature_property(session, node, ctx),
            Reader::Geometry => {
                ctx.components
                    .push(Component::Geometry(Geometry::new(node.clone())));
            }
            Reader::BoundedBy => read_bounded_by(session, node, ctx),
            Reader::Envelope => read_envelope(session, node, ctx),
            Reader::TransactionResponse => {
                ctx.insert_ids = Some(Vec::new());
                ctx.success = Some(false);
                session.read_children(node, ctx);
            }
            Reader::TransactionSummary => read_transaction_summary(session, node, ctx),
            Reader::InsertedFeature => read_inserted_feature(session, node, ctx),
            Reader::ResourceId { attribute } => {
                if let Some(id) = node.attribute(attribute) {
                    ctx.ids.push(id.to_string());
                }
            }
            Reader::Record { field, kind } => {
                let record = session.read_record(node);
                ctx.store(field, Value::Record(record), kind);
            }
            Reader::GenericAttribute { value_type } => {
                read_generic_attribute(session, node, ctx, value_type)
            }
            Reader::ExceptionReport => {
                ctx.exceptions.get_or_insert_with(Vec::new);
                session.read_children(node, ctx);
            }
            Reader::Exception => read_exception(session, node, ctx),
        }
    }
}

fn read_feature_collection(
    session: &mut ReadSession<'_>,
    node: &Element,
    ctx: &mut ParseContext,
    counts: Counts,
) {
    ctx.features.get_or_insert_with(Vec::new);
    match counts {
        Counts::None => {}
        Counts::NumberOfFeatures => {
            ctx.number_returned = parse_int(node.attribute("numberOfFeatures"));
        }
        Counts::ReturnedAndMatched => {
            ctx.number_returned = parse_int(node.attribute("numberReturned"));
            ctx.number_matched = parse_int(node.attribute("numberMatched"));
        }
    }
    session.read_children(node, ctx);
}

fn read_feature(session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
    let mut scope = ParseContext::default();
    if let Some(fid) = node.attribute("fid") {
        scope.ids.push(fid.to_string());
    } else if let Some(id) = node
        .attributes
        .iter()
        .find(|a| a.name.local == "id" && session.is_gml_namespace(a.name.namespace.as_deref()))
    {
        scope.ids.push(id.value.clone());
    }
    session.read_children(node, &mut scope);

    if ctx.features.is_none() {
        let local = node.local_name();
        trace!("Reading nested feature '{}' as a record", local);
        let mut record = scope.attributes;
        if let Some(id) = scope.ids.into_iter().next() {
            record.insert("id".to_string(), Value::Text(id));
        }
        ctx.store(local, Value::Record(record), FieldKind::RecordList);
        return;
    }

    let geometry = scope.first_geometry().cloned();
    let attributes = if session.options().extract_attributes {
        scope.attributes
    } else {
        Attributes::new()
    };
    let feature = FeatureRecord {
        feature_type: Some(node.local_name().to_string()),
        namespace: node.namespace().map(str::to_string),
        ids: scope.ids,
        attributes,
        geometry,
        bounds: scope.bounds,
        state: None,
    };
    trace!("Read feature {:?} ({:?})", feature.fid(), feature.feature_type);
    ctx.push_feature(feature);
}

fn read_feature_property(session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
    let local = node.local_name();
    if ctx.features.is_some() {
        if session.is_feature_type(local) {
            read_feature(session, node, ctx);
        } else {
            trace!("Skipping unconfigured feature type '{}'", local);
        }
    } else {
        session.fallback(node, ctx);
    }
}

fn read_bounded_by(session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
    let scope = session.read_scope(node);
    if let Some(bounds) = scope.first_envelope() {
        ctx.bounds = Some(bounds.clone());
    }
}

fn read_envelope(session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
    let scope = session.read_scope(node);
    let corner = |name: &str| {
        scope
            .attributes
            .get(name)
            .and_then(Value::as_text)
            .map(Bounds::parse_corner)
    };
    let (lower, upper) = match (corner("lowerCorner"), corner("upperCorner")) {
        (Some(lower), Some(upper)) => (lower, upper),
        // deprecated form: two gml:pos children
        _ => {
            let positions: Vec<Vec<f64>> = scope
                .attributes
                .get("pos")
                .and_then(Value::as_list)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::as_text)
                .map(Bounds::parse_corner)
                .collect();
            match positions.as_slice() {
                [lower, upper, ..] => (lower.clone(), upper.clone()),
                _ => {
                    debug!("Envelope without usable corners ignored");
                    return;
                }
            }
        }
    };
    let mut bounds = Bounds::new(lower, upper);
    bounds.srs_name = node.attribute("srsName").map(str::to_string);
    ctx.components.push(Component::Envelope(bounds));
}

fn read_transaction_summary(session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
    ctx.success = Some(true);
    let scope = session.read_scope(node);
    let total = |name: &str| parse_int(scope.attributes.get(name).and_then(Value::as_text));
    ctx.totals.inserted = total("totalInserted");
    ctx.totals.updated = total("totalUpdated");
    ctx.totals.replaced = total("totalReplaced");
    ctx.totals.deleted = total("totalDeleted");
}

fn read_inserted_feature(session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
    let scope = session.read_scope(node);
    match scope.ids.into_iter().next() {
        Some(id) => ctx.insert_ids.get_or_insert_with(Vec::new).push(id),
        None => debug!("Inserted feature without an id"),
    }
}

fn read_generic_attribute(
    session: &mut ReadSession<'_>,
    node: &Element,
    ctx: &mut ParseContext,
    value_type: &'static str,
) {
    let Some(name) = node.attribute("name") else {
        debug!("Skipping generic attribute without a name");
        return;
    };
    let mut record = Attributes::new();
    record.insert("name".to_string(), Value::from(name));
    record.insert("type".to_string(), Value::from(value_type));
    for (key, value) in session.read_record(node) {
        record.entry(key).or_insert(value);
    }
    ctx.store("genericAttributes", Value::Record(record), FieldKind::List);
}

fn read_exception(session: &mut ReadSession<'_>, node: &Element, ctx: &mut ParseContext) {
    let scope = session.read_scope(node);
    let texts = match scope.attributes.get("texts") {
        Some(Value::List(items)) => items
            .iter()
            .filter_map(Value::as_text)
            .map(str::to_string)
            .collect(),
        Some(Value::Text(text)) => vec![text.clone()],
        _ => Vec::new(),
    };
    let exception = ServiceException {
        code: node.attribute("exceptionCode").map(str::to_string),
        locator: node.attribute("locator").map(str::to_string),
        texts,
    };
    ctx.exceptions.get_or_insert_with(Vec::new).push(exception);
}

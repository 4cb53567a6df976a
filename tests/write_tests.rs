mod common;

use common::{child, child_names, children, descend, init_logger, TestResult, TOPP};
use gmlwfs::dialect::{self, FILTER_1_1_0, GML_3_1_1, WFS_1_1_0, WFS_2_0_0};
use gmlwfs::namespace::uri;
use gmlwfs::types::{
    Bounds, ComparisonOp, FeatureRecord, FeatureState, Filter, Geometry, Value, WriteOptions,
};
use gmlwfs::xml::{self, Element, QName};
use gmlwfs::{WriteError, WriteInput};

fn roads_options() -> WriteOptions {
    WriteOptions::new()
        .with_feature_type("roads")
        .with_feature_ns("topp", TOPP)
}

#[test]
fn test_get_feature_wfs2_with_filter() -> TestResult {
    init_logger();
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let options = roads_options()
        .with_property_name("name")
        .with_srs_name("EPSG:4326")
        .with_geometry_name("the_geom")
        .with_filter(Filter::And {
            filters: vec![
                Filter::equal_to("name", "Main Street"),
                Filter::bbox(Bounds::from_extent(0.0, 0.0, 10.0, 10.0)),
            ],
        });
    let request = wfs.write_get_feature(&options)?;

    assert_eq!(request.name.prefixed_name(), "wfs:GetFeature");
    assert_eq!(request.namespace(), Some(uri::WFS_2_0));
    assert_eq!(request.attribute("service"), Some("WFS"));
    assert_eq!(request.attribute("version"), Some("2.0.0"));

    let query = child(&request, "Query");
    assert_eq!(query.attribute("typeNames"), Some("topp:roads"));
    assert_eq!(query.attribute("srsName"), Some("EPSG:4326"));
    assert_eq!(child_names(query), vec!["wfs:PropertyName", "fes:Filter"]);
    assert_eq!(child(query, "PropertyName").child_value(), "name");

    let and = descend(query, &["Filter", "And"]);
    assert_eq!(child_names(and), vec!["fes:PropertyIsEqualTo", "fes:BBOX"]);

    let equal = child(and, "PropertyIsEqualTo");
    assert_eq!(child_names(equal), vec!["fes:ValueReference", "fes:Literal"]);
    assert_eq!(child(equal, "Literal").child_value(), "Main Street");

    // the spatial filter picks up the geometry name and delegates to gml
    let bbox = child(and, "BBOX");
    assert_eq!(child_names(bbox), vec!["fes:ValueReference", "gml:Envelope"]);
    assert_eq!(child(bbox, "ValueReference").child_value(), "the_geom");
    let envelope = child(bbox, "Envelope");
    assert_eq!(envelope.namespace(), Some(uri::GML_3_2));
    assert_eq!(child(envelope, "lowerCorner").child_value(), "0 0");
    assert_eq!(child(envelope, "upperCorner").child_value(), "10 10");

    let text = xml::to_xml(&request)?;
    assert!(text.contains("xmlns:topp=\"http://www.openplans.org/topp\""));
    assert_eq!(xml::parse(&text)?.local_name(), "GetFeature");
    Ok(())
}

#[test]
fn test_count_is_omitted_unless_set() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let request = wfs.write_get_feature(&roads_options())?;
    assert_eq!(request.attribute("count"), None);
    assert_eq!(request.attribute("maxFeatures"), None);
    assert_eq!(request.attribute("startIndex"), None);

    let paged = wfs.write_get_feature(&roads_options().with_count(25).with_start_index(50))?;
    assert_eq!(paged.attribute("count"), Some("25"));
    assert_eq!(paged.attribute("startIndex"), Some("50"));
    Ok(())
}

#[test]
fn test_get_feature_wfs11_uses_max_features_and_ogc_filter() -> TestResult {
    let wfs = dialect::dialect(WFS_1_1_0)?;
    let options = roads_options()
        .with_count(5)
        .with_filter(Filter::resource_ids(["roads.1", "roads.2"]));
    let request = wfs.write_get_feature(&options)?;

    assert_eq!(request.namespace(), Some(uri::WFS_1_1));
    assert_eq!(request.attribute("version"), Some("1.1.0"));
    assert_eq!(request.attribute("maxFeatures"), Some("5"));
    assert_eq!(request.attribute("count"), None);

    let query = child(&request, "Query");
    assert_eq!(query.attribute("typeName"), Some("topp:roads"));
    let filter = child(query, "Filter");
    assert_eq!(filter.namespace(), Some(uri::OGC));
    let ids: Vec<_> = children(filter, "FeatureId")
        .into_iter()
        .filter_map(|id| id.attribute("fid"))
        .collect();
    assert_eq!(ids, vec!["roads.1", "roads.2"]);
    Ok(())
}

#[test]
fn test_schema_location_includes_feature_schema() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let options = WriteOptions {
        schema: Some("http://example.com/roads.xsd".into()),
        ..roads_options()
    };
    let request = wfs.write_get_feature(&options)?;
    let location = request
        .attribute_ns(uri::XSI, "schemaLocation")
        .ok_or("schemaLocation missing")?;

    assert!(location.starts_with("http://www.opengis.net/wfs/2.0 http://schemas.opengis.net/wfs/2.0/wfs.xsd"));
    assert!(location.ends_with("http://www.openplans.org/topp http://example.com/roads.xsd"));
    Ok(())
}

fn transaction_features() -> Vec<FeatureRecord> {
    vec![
        FeatureRecord::new("roads")
            .with_attribute("name", "New Road")
            .with_state(FeatureState::Insert),
        FeatureRecord::new("roads")
            .with_id("roads.1")
            .with_attribute("lanes", "3")
            .with_state(FeatureState::Update),
        FeatureRecord::new("roads")
            .with_id("roads.2")
            .with_state(FeatureState::Delete),
        // no state: left out
        FeatureRecord::new("roads").with_id("roads.3"),
    ]
}

#[test]
fn test_transaction_wfs2() -> TestResult {
    init_logger();
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let transaction = wfs.write_transaction(&transaction_features(), &roads_options())?;

    assert_eq!(transaction.name.prefixed_name(), "wfs:Transaction");
    assert_eq!(transaction.attribute("version"), Some("2.0.0"));
    assert_eq!(
        child_names(&transaction),
        vec!["wfs:Insert", "wfs:Update", "wfs:Delete"]
    );

    let inserted = descend(&transaction, &["Insert", "roads"]);
    assert_eq!(inserted.namespace(), Some(TOPP));
    assert_eq!(child_names(inserted), vec!["topp:name"]);

    let update = child(&transaction, "Update");
    assert_eq!(update.attribute("typeName"), Some("topp:roads"));
    assert_eq!(child_names(update), vec!["wfs:Property", "fes:Filter"]);
    let property = child(update, "Property");
    assert_eq!(child_names(property), vec!["wfs:ValueReference", "wfs:Value"]);
    assert_eq!(child(property, "ValueReference").child_value(), "lanes");
    assert_eq!(child(property, "Value").child_value(), "3");
    assert_eq!(
        descend(update, &["Filter", "ResourceId"]).attribute("rid"),
        Some("roads.1")
    );

    let delete = child(&transaction, "Delete");
    assert_eq!(delete.attribute("typeName"), Some("topp:roads"));
    assert_eq!(
        descend(delete, &["Filter", "ResourceId"]).attribute("rid"),
        Some("roads.2")
    );
    Ok(())
}

#[test]
fn test_transaction_wfs11_uses_ogc_vocabulary() -> TestResult {
    let wfs = dialect::dialect(WFS_1_1_0)?;
    let transaction = wfs.write_transaction(&transaction_features(), &roads_options())?;

    let update = child(&transaction, "Update");
    assert_eq!(child_names(child(update, "Property")), vec!["wfs:Name", "wfs:Value"]);
    let feature_id = descend(update, &["Filter", "FeatureId"]);
    assert_eq!(feature_id.namespace(), Some(uri::OGC));
    assert_eq!(feature_id.attribute("fid"), Some("roads.1"));
    Ok(())
}

#[test]
fn test_update_writes_geometry_property() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let point = Element::new(QName::qualified("gml", uri::GML_3_2, "Point"));
    let feature = FeatureRecord::new("roads")
        .with_id("roads.1")
        .with_geometry(Geometry::new(point))
        .with_state(FeatureState::Update);
    let options = roads_options().with_geometry_name("the_geom");
    let transaction = wfs.write_transaction(std::slice::from_ref(&feature), &options)?;

    let property = descend(&transaction, &["Update", "Property"]);
    assert_eq!(child(property, "ValueReference").child_value(), "the_geom");
    assert_eq!(child_names(child(property, "Value")), vec!["gml:Point"]);
    Ok(())
}

#[test]
fn test_update_and_delete_need_a_feature_id() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    for state in [FeatureState::Update, FeatureState::Delete] {
        let feature = FeatureRecord::new("roads").with_state(state);
        let err = wfs
            .write_transaction(&[feature], &roads_options())
            .unwrap_err();
        assert!(matches!(err, WriteError::MissingFeatureId(_)), "{:?}", err);
    }
    Ok(())
}

#[test]
fn test_write_errors() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let options = WriteOptions::new();

    assert_eq!(
        wfs.write("Nothing", WriteInput::Text("x"), &options).unwrap_err(),
        WriteError::UnknownWriter("wfs:Nothing".into())
    );
    assert_eq!(
        wfs.write("gml:Nothing", WriteInput::Text("x"), &options).unwrap_err(),
        WriteError::UnknownWriter("gml:Nothing".into())
    );
    assert_eq!(
        wfs.write("GetFeature", WriteInput::Text("x"), &options).unwrap_err(),
        WriteError::UnexpectedInput {
            writer: "wfs:GetFeature".into(),
            found: "text",
        }
    );
    assert_eq!(
        wfs.write_get_feature(&options).unwrap_err(),
        WriteError::MissingOption {
            writer: "wfs:Query".into(),
            option: "featureType",
        }
    );
    Ok(())
}

#[test]
fn test_filter_vocabulary_ogc() -> TestResult {
    let filter_dialect = dialect::dialect(FILTER_1_1_0)?;
    let options = WriteOptions::new();
    let filter = Filter::Or {
        filters: vec![
            Filter::Like {
                property: "name".into(),
                pattern: "Main*".into(),
                wild_card: "*".into(),
                single_char: ".".into(),
                escape_char: "!".into(),
                match_case: Some(false),
            },
            Filter::Between {
                property: "lanes".into(),
                lower: "1".into(),
                upper: "4".into(),
            },
            Filter::Not {
                filter: Box::new(Filter::IsNull {
                    property: "name".into(),
                }),
            },
            Filter::Comparison {
                op: ComparisonOp::GreaterThanOrEqualTo,
                property: "lanes".into(),
                value: "2".into(),
                match_case: None,
            },
        ],
    };
    let written = filter_dialect.write("Filter", WriteInput::Filter(&filter), &options)?;
    assert_eq!(written.name.prefixed_name(), "ogc:Filter");

    let or = child(&written, "Or");
    assert_eq!(
        child_names(or),
        vec![
            "ogc:PropertyIsLike",
            "ogc:PropertyIsBetween",
            "ogc:Not",
            "ogc:PropertyIsGreaterThanOrEqualTo",
        ]
    );

    let like = child(or, "PropertyIsLike");
    assert_eq!(like.attribute("wildCard"), Some("*"));
    assert_eq!(like.attribute("singleChar"), Some("."));
    assert_eq!(like.attribute("escapeChar"), Some("!"));
    assert_eq!(like.attribute("matchCase"), Some("false"));
    assert_eq!(child_names(like), vec!["ogc:PropertyName", "ogc:Literal"]);

    let between = child(or, "PropertyIsBetween");
    assert_eq!(
        child_names(between),
        vec!["ogc:PropertyName", "ogc:LowerBoundary", "ogc:UpperBoundary"]
    );
    assert_eq!(descend(between, &["UpperBoundary", "Literal"]).child_value(), "4");

    let is_null = descend(or, &["Not", "PropertyIsNull"]);
    assert_eq!(child(is_null, "PropertyName").child_value(), "name");

    let comparison = child(or, "PropertyIsGreaterThanOrEqualTo");
    assert_eq!(comparison.attribute("matchCase"), None);
    Ok(())
}

#[test]
fn test_feature_id_attribute_follows_gml_version() -> TestResult {
    let feature = FeatureRecord::new("roads").with_id("roads.9");

    let gml31 = dialect::dialect(GML_3_1_1)?.write_feature(&feature, &roads_options())?;
    assert_eq!(gml31.attribute("fid"), Some("roads.9"));

    let wfs2 = dialect::dialect(WFS_2_0_0)?.write_feature(&feature, &roads_options())?;
    assert_eq!(wfs2.attribute("fid"), None);
    assert_eq!(wfs2.attribute_ns(uri::GML_3_2, "id"), Some("roads.9"));
    Ok(())
}

#[test]
fn test_feature_values_become_elements() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let mut address = gmlwfs::types::Attributes::new();
    address.insert("street".into(), Value::from("Main Street"));
    address.insert("phone".into(), Value::from(vec!["1", "2"]));
    let feature = FeatureRecord::new("roads")
        .with_attribute("tag", vec!["a", "b"])
        .with_attribute("address", Value::Record(address))
        .with_geometry(Geometry::new(Element::new(QName::qualified(
            "gml",
            uri::GML_3_2,
            "LineString",
        ))));
    let written = wfs.write_feature(&feature, &roads_options())?;

    assert_eq!(
        child_names(&written),
        vec!["topp:geometry", "topp:tag", "topp:tag", "topp:address"]
    );
    assert_eq!(child_names(child(&written, "geometry")), vec!["gml:LineString"]);
    let tags: Vec<_> = children(&written, "tag").into_iter().map(|t| t.child_value()).collect();
    assert_eq!(tags, vec!["a", "b"]);
    let address = child(&written, "address");
    assert_eq!(
        child_names(address),
        vec!["topp:street", "topp:phone", "topp:phone"]
    );
    Ok(())
}

#[test]
fn test_record_namespace_is_used_without_configuration() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let feature = FeatureRecord {
        namespace: Some(TOPP.into()),
        ..FeatureRecord::new("roads").with_attribute("name", "x")
    };
    let written = wfs.write_feature(&feature, &WriteOptions::new())?;
    assert_eq!(written.name.prefixed_name(), "feature:roads");
    assert_eq!(written.namespace(), Some(TOPP));
    assert_eq!(child(&written, "name").namespace(), Some(TOPP));
    Ok(())
}

mod common;

use common::fixtures::*;
use common::{init_logger, TestResult, TOPP};
use gmlwfs::dialect::{self, GML_3_1_1, GML_3_2_1, WFS_1_1_0, WFS_2_0_0};
use gmlwfs::read::FeatureConfig;
use gmlwfs::types::{FieldKind, ReadOptions, Value};
use gmlwfs::xml;

#[test]
fn test_wfs2_collection_counts_bounds_and_features() -> TestResult {
    init_logger();
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let result = wfs.read_str(
        WFS2_ROADS,
        &ReadOptions::new().feature_type("roads").feature_ns(TOPP),
    )?;

    assert_eq!(result.number_matched, Some(-1));
    assert_eq!(result.number_returned, Some(2));
    let bounds = result.bounds.as_ref().ok_or("collection bounds missing")?;
    assert_eq!(bounds.lower, vec![0.0, 0.0]);
    assert_eq!(bounds.upper, vec![10.0, 10.0]);
    assert_eq!(bounds.srs_name.as_deref(), Some("EPSG:4326"));

    assert_eq!(result.features.len(), 2);
    let first = &result.features[0];
    assert_eq!(first.fid(), Some("roads.1"));
    assert_eq!(first.feature_type.as_deref(), Some("roads"));
    assert_eq!(first.namespace.as_deref(), Some(TOPP));
    assert_eq!(first.attribute("name"), Some(&Value::from("Main Street")));
    assert_eq!(first.attribute("lanes"), Some(&Value::from("2")));

    let geometry = first.geometry.as_ref().ok_or("geometry missing")?;
    assert_eq!(geometry.kind(), "LineString");
    assert_eq!(geometry.srs_name(), Some("EPSG:4326"));
    // the geometry property itself is not an attribute
    assert!(first.attribute("the_geom").is_none());

    assert_eq!(result.features[1].fid(), Some("roads.2"));
    assert!(result.features[1].geometry.is_none());
    Ok(())
}

#[test]
fn test_missing_or_garbage_counts_are_none() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let xml = r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"
        numberReturned="unknown"/>"#;
    let result = wfs.read_str(xml, &ReadOptions::new())?;

    assert_eq!(result.number_returned, None);
    assert_eq!(result.number_matched, None);
    assert!(result.features.is_empty());
    Ok(())
}

#[test]
fn test_wfs11_number_of_features() -> TestResult {
    let wfs = dialect::dialect(WFS_1_1_0)?;
    let xml = r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs"
        numberOfFeatures="12 features"/>"#;
    let result = wfs.read_str(xml, &ReadOptions::new())?;
    assert_eq!(result.number_returned, Some(12));
    assert_eq!(result.number_matched, None);
    Ok(())
}

#[test]
fn test_repeated_fields_follow_classification() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let options = ReadOptions::new().feature_type("roads").feature_ns(TOPP);

    let scalar = wfs.read_str(WFS2_ROADS, &options)?;
    assert_eq!(scalar.features[0].attribute("tag"), Some(&Value::from("third")));

    let listed = wfs.read_str(WFS2_ROADS, &options.clone().field("tag", FieldKind::List))?;
    assert_eq!(
        listed.features[0].attribute("tag"),
        Some(&Value::from(vec!["first", "second", "third"]))
    );
    assert_eq!(listed.features[1].attribute("tag"), None);

    // one occurrence still produces a list
    let single = wfs.read_str(WFS2_ROADS, &options.field("name", FieldKind::List))?;
    assert_eq!(single.features[1].attribute("name"), Some(&Value::from(vec!["Side Street"])));
    Ok(())
}

#[test]
fn test_unregistered_elements_are_not_errors() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let options = ReadOptions::new().feature_type("roads").feature_ns(TOPP);
    let result = wfs.read_str(WFS2_ROADS, &options)?;
    let road = &result.features[0];

    // unknown container is walked in place, unknown namespace leaf is kept
    assert_eq!(road.attribute("source"), Some(&Value::from("survey")));
    assert!(road.attribute("meta").is_none());
    assert_eq!(road.attribute("note"), Some(&Value::from("unmapped")));

    let nested = wfs.read_str(WFS2_ROADS, &options.field("meta", FieldKind::Record))?;
    let meta = nested.features[0].attribute("meta").ok_or("meta record missing")?;
    assert_eq!(meta.get("source"), Some(&Value::from("survey")));
    assert!(nested.features[0].attribute("source").is_none());
    Ok(())
}

/// A one-road WFS 2.0 collection with `body` as the feature's content.
fn road_document(body: &str) -> String {
    format!(
        r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"
            xmlns:gml="http://www.opengis.net/gml/3.2"
            xmlns:topp="http://www.openplans.org/topp"
            xmlns:ext="http://example.com/extension">
          <wfs:member><topp:roads gml:id="roads.9">{}</topp:roads></wfs:member>
        </wfs:FeatureCollection>"#,
        body
    )
}

#[test]
fn test_unknown_namespace_siblings_do_not_change_recognised_values() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let options = ReadOptions::new()
        .feature_type("roads")
        .feature_ns(TOPP)
        .field("tag", FieldKind::List);
    let plain = wfs.read_str(
        &road_document("<topp:name>Main Street</topp:name><topp:tag>a</topp:tag><topp:tag>b</topp:tag>"),
        &options,
    )?;
    let expected = &plain.features[0];
    assert_eq!(expected.attribute("name"), Some(&Value::from("Main Street")));

    for body in [
        "<topp:name>Main Street</topp:name><ext:name>vendor</ext:name><topp:tag>a</topp:tag><topp:tag>b</topp:tag>",
        "<ext:name>vendor</ext:name><topp:name>Main Street</topp:name><ext:tag>x</ext:tag><topp:tag>a</topp:tag><topp:tag>b</topp:tag>",
        "<topp:name>Main Street</topp:name><topp:tag>a</topp:tag><ext:tag>x</ext:tag><topp:tag>b</topp:tag>",
    ] {
        let mixed = wfs.read_str(&road_document(body), &options)?;
        let road = &mixed.features[0];
        assert_eq!(road.attribute("name"), expected.attribute("name"), "{}", body);
        assert_eq!(road.attribute("tag"), expected.attribute("tag"), "{}", body);
    }
    Ok(())
}

#[test]
fn test_feature_type_filter_skips_other_types() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let result = wfs.read_str(
        WFS2_ROADS,
        &ReadOptions::new().feature_type("bridges").feature_ns(TOPP),
    )?;
    assert!(result.features.is_empty());
    Ok(())
}

#[test]
fn test_extract_attributes_off_keeps_ids_and_geometry() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let result = wfs.read_str(
        WFS2_ROADS,
        &ReadOptions::new()
            .feature_type("roads")
            .feature_ns(TOPP)
            .extract_attributes(false),
    )?;
    let road = &result.features[0];
    assert!(road.attributes.is_empty());
    assert_eq!(road.fid(), Some("roads.1"));
    assert!(road.geometry.is_some());
    Ok(())
}

#[test]
fn test_auto_detects_feature_type_from_first_member() -> TestResult {
    init_logger();
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let result = wfs.read_str(WFS2_ROADS, &ReadOptions::new())?;

    assert_eq!(
        result.detected,
        Some(FeatureConfig {
            feature_type: "roads".into(),
            feature_ns: TOPP.into(),
        })
    );
    assert_eq!(result.features.len(), 2);
    Ok(())
}

#[test]
fn test_gml32_reads_gml31_documents() -> TestResult {
    let gml = dialect::dialect(GML_3_2_1)?;
    let result = gml.read_str(GML31_STATES, &ReadOptions::new())?;

    assert_eq!(result.features.len(), 2);
    assert_eq!(result.features[0].fid(), Some("states.1"));
    assert_eq!(result.features[1].fid(), Some("states.2"));
    assert_eq!(
        result.features[0].attribute("STATE_NAME"),
        Some(&Value::from("Illinois"))
    );
    assert_eq!(
        result.features[0].geometry.as_ref().map(|g| g.kind()),
        Some("MultiSurface")
    );

    let bounds = result.bounds.ok_or("bounds from gml:pos pair missing")?;
    assert_eq!(bounds.lower, vec![0.0, 0.0]);
    assert_eq!(bounds.upper, vec![5.0, 5.0]);
    Ok(())
}

#[test]
fn test_gml31_reads_its_own_documents() -> TestResult {
    let gml = dialect::dialect(GML_3_1_1)?;
    let result = gml.read_str(GML31_STATES, &ReadOptions::new().feature_type("states").feature_ns(TOPP))?;
    assert_eq!(result.features.len(), 2);
    Ok(())
}

#[test]
fn test_detection_is_reset_per_call() -> TestResult {
    let gml = dialect::dialect(GML_3_1_1)?;
    let mut session = gml.session(ReadOptions::new());

    let states = session.read(&xml::parse(GML31_STATES)?);
    assert_eq!(states.features.len(), 2);

    let parcels = session.read(&xml::parse(GML31_PARCELS)?);
    assert_eq!(parcels.features.len(), 1);
    assert_eq!(parcels.features[0].fid(), Some("parcels.7"));
    assert_eq!(
        session.detected().map(|c| c.feature_type.as_str()),
        Some("parcels")
    );
    Ok(())
}

#[test]
fn test_sticky_detection_survives_between_reads() -> TestResult {
    let gml = dialect::dialect(GML_3_1_1)?;
    let mut session = gml.session(ReadOptions::new()).sticky();

    let states = session.read(&xml::parse(GML31_STATES)?);
    assert_eq!(states.features.len(), 2);

    let parcels = session.read(&xml::parse(GML31_PARCELS)?);
    assert!(parcels.features.is_empty());
    assert_eq!(
        session.detected().map(|c| c.feature_ns.as_str()),
        Some(TOPP)
    );
    Ok(())
}

#[test]
fn test_transaction_response_totals_and_insert_ids() -> TestResult {
    let wfs = dialect::dialect(WFS_1_1_0)?;
    let result = wfs.read_str(WFS11_TRANSACTION_RESPONSE, &ReadOptions::new())?;

    assert_eq!(result.success, Some(true));
    assert_eq!(result.insert_ids, vec!["roads.10", "roads.11"]);
    assert_eq!(result.totals.inserted, Some(2));
    assert_eq!(result.totals.updated, Some(1));
    assert_eq!(result.totals.deleted, Some(0));
    assert_eq!(result.totals.replaced, None);
    Ok(())
}

#[test]
fn test_transaction_response_without_summary_is_not_success() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    let result = wfs.read_str(WFS2_TRANSACTION_WITHOUT_SUMMARY, &ReadOptions::new())?;

    assert_eq!(result.success, Some(false));
    assert_eq!(result.insert_ids, vec!["roads.12"]);
    assert_eq!(result.totals.inserted, None);
    Ok(())
}

#[test]
fn test_exception_report() -> TestResult {
    // OWS 1.0 reports are still read by the WFS 2.0 dialect
    for id in [WFS_1_1_0, WFS_2_0_0] {
        let wfs = dialect::dialect(id)?;
        let result = wfs.read_str(OWS_EXCEPTION, &ReadOptions::new())?;

        assert!(result.is_exception(), "{} did not read the report", id);
        let exception = &result.exceptions[0];
        assert_eq!(exception.code.as_deref(), Some("InvalidParameterValue"));
        assert_eq!(exception.locator.as_deref(), Some("typeName"));
        assert_eq!(exception.texts, vec!["Unknown feature type", "topp:nowhere"]);
    }
    Ok(())
}

#[test]
fn test_malformed_xml_is_an_error() -> TestResult {
    let wfs = dialect::dialect(WFS_2_0_0)?;
    assert!(wfs.read_str("<wfs:FeatureCollection", &ReadOptions::new()).is_err());
    Ok(())
}

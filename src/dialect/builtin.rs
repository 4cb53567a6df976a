//! Descriptors for the built-in dialect family.

use super::descriptor::DialectDescriptor;
use super::{
    EntryPoint, CITYGML_WFS, FILTER_1_1_0, FILTER_2_0_0, GML_3_1_1, GML_3_2_1, WFS_1_1_0, WFS_2_0_0,
};
use crate::handler::WILDCARD;
use crate::namespace::{uri, FEATURE_ALIAS};
use crate::read::{Counts, Field, Reader};
use crate::write::{IdAttribute, Paging, TypeNames, Writer};
use gmlwfs_types::FieldKind;

const GEOMETRY_TYPES: &[&str] = &[
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Curve",
    "MultiCurve",
    "LinearRing",
    "Polygon",
    "MultiPolygon",
    "Surface",
    "MultiSurface",
    "CompositeSurface",
    "OrientableSurface",
    "TriangulatedSurface",
    "Tin",
    "Solid",
    "MultiSolid",
    "CompositeSolid",
    "MultiGeometry",
];

const COMPARISON_OPERATORS: &[&str] = &[
    "PropertyIsEqualTo",
    "PropertyIsNotEqualTo",
    "PropertyIsLessThan",
    "PropertyIsGreaterThan",
    "PropertyIsLessThanOrEqualTo",
    "PropertyIsGreaterThanOrEqualTo",
];

/// Feature types every CityGML query asks for.
const CITY_FEATURE_TYPES: &str = "bldg:Building tran:TransportationComplex tran:Road tran:Track \
tran:Square tran:Railway frn:CityFurniture luse:LandUse wtr:WaterBody veg:PlantCover \
veg:SolitaryVegetationObject dem:ReliefFeature gen:GenericCityObject grp:CityObjectGroup";

/// Thematic surfaces a building is bounded by.
const BOUNDARY_SURFACES: &[&str] = &[
    "WallSurface",
    "RoofSurface",
    "GroundSurface",
    "ClosureSurface",
    "FloorSurface",
    "InteriorWallSurface",
    "CeilingSurface",
];

/// CityGML module aliases whose reader tables start out as the GML readers.
const CITY_MODULES: &[&str] = &[
    "core", "tran", "wtr", "grp", "luse", "frn", "app", "tex", "bldg", "dem", "veg", "gen",
];

pub(super) fn descriptors() -> Vec<DialectDescriptor> {
    vec![
        gml_3_1_1(),
        gml_3_2_1(),
        filter_1_1_0(),
        filter_2_0_0(),
        wfs_1_1_0(),
        wfs_2_0_0(),
        citygml_wfs(),
    ]
}

fn gml_3_1_1() -> DialectDescriptor {
    DialectDescriptor::new(GML_3_1_1)
        .namespaces(&[
            ("gml", uri::GML_3_1),
            ("xlink", uri::XLINK),
            ("xsi", uri::XSI),
            ("wfs", uri::WFS_1_1),
        ])
        .entry_point(EntryPoint::Gml)
        .default_prefix("gml")
        .readers_for("gml", &["featureMember", "featureMembers"], Reader::Children)
        .reader("gml", "FeatureCollection", Reader::FeatureCollection(Counts::None))
        .reader("gml", "boundedBy", Reader::BoundedBy)
        .reader("gml", "Envelope", Reader::Envelope)
        .field("gml", "lowerCorner", Field::scalar("lowerCorner"))
        .field("gml", "upperCorner", Field::scalar("upperCorner"))
        .field("gml", "pos", Field::list("pos"))
        .field("gml", "name", Field::scalar("name"))
        .readers_for("gml", GEOMETRY_TYPES, Reader::Geometry)
        .reader(FEATURE_ALIAS, WILDCARD, Reader::FeatureProperty)
        .reader("wfs", "FeatureCollection", Reader::FeatureCollection(Counts::NumberOfFeatures))
        .writer("gml", "Envelope", Writer::Envelope)
        .writer(FEATURE_ALIAS, "_typeName", Writer::FeatureType(IdAttribute::Fid))
        .writer(FEATURE_ALIAS, "_geometry", Writer::FeatureGeometry)
        .writer(FEATURE_ALIAS, "_attribute", Writer::FeatureAttribute)
}

fn gml_3_2_1() -> DialectDescriptor {
    DialectDescriptor::new(GML_3_2_1)
        .derives_from(&[GML_3_1_1])
        .namespaces(&[
            ("gml", uri::GML_3_2),
            ("xlink", uri::XLINK),
            ("xsi", uri::XSI),
            ("wfs", uri::WFS_2_0),
        ])
        .compat_namespace(uri::GML_3_1, "gml")
        .reader("wfs", "member", Reader::Children)
        .reader("wfs", "FeatureCollection", Reader::FeatureCollection(Counts::ReturnedAndMatched))
        .writer(FEATURE_ALIAS, "_typeName", Writer::FeatureType(IdAttribute::GmlId))
}

/// Filter writers shared by both filter versions.
fn filter_vocabulary(
    descriptor: DialectDescriptor,
    prefix: &str,
    property_element: &'static str,
    id_element: &'static str,
    id_attribute: &'static str,
) -> DialectDescriptor {
    descriptor
        .default_prefix(prefix)
        .filter_prefix(prefix)
        .entry_point(EntryPoint::Plain)
        .reader(prefix, id_element, Reader::ResourceId { attribute: id_attribute })
        .writer(prefix, "Filter", Writer::Filter)
        .writers_for(prefix, &["And", "Or"], Writer::Logical)
        .writer(prefix, "Not", Writer::Not)
        .writers_for(prefix, COMPARISON_OPERATORS, Writer::Comparison)
        .writer(prefix, "PropertyIsLike", Writer::Like)
        .writer(prefix, "PropertyIsBetween", Writer::Between)
        .writer(prefix, "PropertyIsNull", Writer::IsNull)
        .writers_for(prefix, &["LowerBoundary", "UpperBoundary"], Writer::Boundary)
        .writer(prefix, "_property", Writer::PropertyReference { element: property_element })
        .writer(prefix, "Literal", Writer::Literal)
        .writer(
            prefix,
            "_resourceId",
            Writer::ResourceId {
                element: id_element,
                attribute: id_attribute,
            },
        )
        .writer(prefix, "BBOX", Writer::BBox)
}

fn filter_1_1_0() -> DialectDescriptor {
    let descriptor = DialectDescriptor::new(FILTER_1_1_0)
        .namespaces(&[("ogc", uri::OGC), ("gml", uri::GML_3_1), ("xsi", uri::XSI)])
        .import_writers("gml", Some(GML_3_1_1), "gml");
    filter_vocabulary(descriptor, "ogc", "PropertyName", "FeatureId", "fid")
}

fn filter_2_0_0() -> DialectDescriptor {
    let descriptor = DialectDescriptor::new(FILTER_2_0_0)
        .namespaces(&[("fes", uri::FES_2_0), ("gml", uri::GML_3_2), ("xsi", uri::XSI)])
        .import_writers("gml", Some(GML_3_2_1), "gml");
    filter_vocabulary(descriptor, "fes", "ValueReference", "ResourceId", "rid")
}

fn wfs_1_1_0() -> DialectDescriptor {
    DialectDescriptor::new(WFS_1_1_0)
        .version("1.1.0")
        .derives_from(&[GML_3_1_1, FILTER_1_1_0])
        .extend_namespaces(&[("wfs", uri::WFS_1_1), ("ows", uri::OWS_1_0)])
        .entry_point(EntryPoint::Gml)
        .default_prefix("wfs")
        .request_prefixes(&["wfs", "gml", "ogc", "xsi"])
        .schema_location("wfs", "http://schemas.opengis.net/wfs/1.1.0/wfs.xsd")
        .reader("wfs", "TransactionResponse", Reader::TransactionResponse)
        .reader("wfs", "TransactionSummary", Reader::TransactionSummary)
        .readers_for("wfs", &["TransactionResults", "InsertResults"], Reader::Children)
        .reader("wfs", "Feature", Reader::InsertedFeature)
        .reader("ows", "ExceptionReport", Reader::ExceptionReport)
        .reader("ows", "Exception", Reader::Exception)
        .field("ows", "ExceptionText", Field::list("texts"))
        .writer("wfs", "GetFeature", Writer::GetFeature(Paging::MaxFeatures))
        .writer("wfs", "Query", Writer::Query(TypeNames::Configured { attribute: "typeName" }))
        .writer("wfs", "PropertyName", Writer::PropertyName)
        .writer("wfs", "Transaction", Writer::Transaction)
        .writer("wfs", "Insert", Writer::Insert)
        .writer("wfs", "Update", Writer::Update)
        .writer("wfs", "Delete", Writer::Delete)
        .writer("wfs", "Property", Writer::Property { name_element: "Name" })
        .writer("wfs", "Value", Writer::PropertyValue)
}

fn wfs_2_0_0() -> DialectDescriptor {
    DialectDescriptor::new(WFS_2_0_0)
        .version("2.0.0")
        .derives_from(&[WFS_1_1_0, FILTER_2_0_0, GML_3_2_1])
        .extend_namespaces(&[("wfs", uri::WFS_2_0), ("ows", uri::OWS_1_1)])
        .compat_namespace(uri::OWS_1_0, "ows")
        .entry_point(EntryPoint::Gml)
        .default_prefix("wfs")
        .filter_prefix("fes")
        .request_prefixes(&["wfs", "gml", "fes", "xsi"])
        .schema_location("wfs", "http://schemas.opengis.net/wfs/2.0/wfs.xsd")
        .reader("wfs", "FeatureCollection", Reader::FeatureCollection(Counts::ReturnedAndMatched))
        .reader("wfs", "member", Reader::Children)
        .reader("wfs", "boundedBy", Reader::BoundedBy)
        .writer("wfs", "GetFeature", Writer::GetFeature(Paging::Count))
        .writer("wfs", "Query", Writer::Query(TypeNames::Configured { attribute: "typeNames" }))
        .writer("wfs", "Property", Writer::Property { name_element: "ValueReference" })
}

fn citygml_wfs() -> DialectDescriptor {
    let mut descriptor = DialectDescriptor::new(CITYGML_WFS)
        .derives_from(&[FILTER_2_0_0, WFS_2_0_0])
        .namespaces(&[
            ("xlink", uri::XLINK),
            ("xsi", uri::XSI),
            ("wfs", uri::WFS_2_0),
            ("gml", uri::GML_3_2),
            ("gml31", uri::GML_3_1),
            ("fes", uri::FES_2_0),
            ("ogc", uri::OGC),
            ("ows", uri::OWS_1_1),
            ("core", uri::CITYGML_CORE),
            ("tran", uri::CITYGML_TRANSPORTATION),
            ("wtr", uri::CITYGML_WATERBODY),
            ("grp", uri::CITYGML_GROUP),
            ("luse", uri::CITYGML_LANDUSE),
            ("frn", uri::CITYGML_FURNITURE),
            ("app", uri::CITYGML_APPEARANCE),
            ("tex", uri::CITYGML_TEXTURED),
            ("bldg", uri::CITYGML_BUILDING),
            ("xal", uri::XAL),
            ("dem", uri::CITYGML_RELIEF),
            ("veg", uri::CITYGML_VEGETATION),
            ("gen", uri::CITYGML_GENERICS),
        ])
        .entry_point(EntryPoint::Gml)
        .request_prefixes(&[
            "wfs", "gml", "fes", "xsi", "core", "tran", "wtr", "grp", "luse", "frn", "app", "tex",
            "bldg", "xal", "dem", "veg", "gen",
        ])
        .schema_location("core", "http://schemas.opengis.net/citygml/1.0/cityGMLBase.xsd")
        .schema_location("tran", "http://schemas.opengis.net/citygml/transportation/1.0/transportation.xsd")
        .schema_location("wtr", "http://schemas.opengis.net/citygml/waterbody/1.0/waterBody.xsd")
        .schema_location("grp", "http://schemas.opengis.net/citygml/cityobjectgroup/1.0/cityObjectGroup.xsd")
        .schema_location("luse", "http://schemas.opengis.net/citygml/landuse/1.0/landUse.xsd")
        .schema_location("frn", "http://schemas.opengis.net/citygml/cityfurniture/1.0/cityFurniture.xsd")
        .schema_location("app", "http://schemas.opengis.net/citygml/appearance/1.0/appearance.xsd")
        .schema_location("tex", "http://schemas.opengis.net/citygml/texturedsurface/1.0/texturedSurface.xsd")
        .schema_location("bldg", "http://schemas.opengis.net/citygml/building/1.0/building.xsd")
        .schema_location("dem", "http://schemas.opengis.net/citygml/relief/1.0/relief.xsd")
        .schema_location("veg", "http://schemas.opengis.net/citygml/vegetation/1.0/vegetation.xsd")
        .schema_location("gen", "http://schemas.opengis.net/citygml/generics/1.0/generics.xsd")
        .import_readers("gml31", Some(GML_3_1_1), "gml")
        .import_writers("gml31", None, "gml");

    for module in CITY_MODULES {
        descriptor = descriptor.import_readers(module, None, "gml");
    }

    descriptor
        .reader("wfs", "TransactionResponse", Reader::TransactionResponse)
        .reader("core", "CityModel", Reader::FeatureCollection(Counts::None))
        .reader("core", "cityObjectMember", Reader::Children)
        .reader(
            "core",
            "externalReference",
            Reader::Record {
                field: "externalReferences",
                kind: FieldKind::RecordList,
            },
        )
        .reader("core", "externalObject", Reader::Children)
        .field("core", "name", Field::scalar("name"))
        .field("core", "uri", Field::scalar("uri"))
        .field("core", "informationSystem", Field::scalar("informationSystem"))
        .reader(
            "bldg",
            "address",
            Reader::Record {
                field: "address",
                kind: FieldKind::Record,
            },
        )
        .readers_for(
            "tran",
            &["TransportationComplex", "TrafficArea", "AuxiliaryTrafficArea", "Road", "Track", "Railway", "Square"],
            Reader::Feature,
        )
        .reader("wtr", "WaterBody", Reader::Feature)
        .reader("grp", "CityObjectGroup", Reader::Feature)
        .reader("luse", "LandUse", Reader::Feature)
        .reader("frn", "CityFurniture", Reader::Feature)
        .readers_for("bldg", &["Building", "BuildingPart"], Reader::Feature)
        // thematic surfaces, not an envelope
        .reader("bldg", "boundedBy", Reader::Children)
        .readers_for("bldg", BOUNDARY_SURFACES, Reader::Feature)
        .reader("dem", "ReliefFeature", Reader::Feature)
        .readers_for("veg", &["SolitaryVegetationObject", "PlantCover"], Reader::Feature)
        .reader("gen", "GenericCityObject", Reader::Feature)
        .reader("gen", "stringAttribute", Reader::GenericAttribute { value_type: "string" })
        .reader("gen", "intAttribute", Reader::GenericAttribute { value_type: "int" })
        .reader("gen", "doubleAttribute", Reader::GenericAttribute { value_type: "double" })
        .reader("gen", "dateAttribute", Reader::GenericAttribute { value_type: "date" })
        .reader("gen", "uriAttribute", Reader::GenericAttribute { value_type: "uri" })
        .reader("gen", "measureAttribute", Reader::GenericAttribute { value_type: "measure" })
        .reader("gen", "genericAttributeSet", Reader::GenericAttribute { value_type: "generic" })
        .field("gen", "value", Field::scalar("value"))
        .writer(
            "wfs",
            "Query",
            Writer::Query(TypeNames::Fixed {
                attribute: "typeNames",
                names: CITY_FEATURE_TYPES,
            }),
        )
}

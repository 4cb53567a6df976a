//! Service responses used across the integration tests.

/// A WFS 2.0 GetFeature response with two roads.
pub const WFS2_ROADS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:topp="http://www.openplans.org/topp"
    xmlns:ext="http://example.com/extension"
    numberMatched="-1" numberReturned="2">
  <wfs:boundedBy>
    <gml:Envelope srsName="EPSG:4326">
      <gml:lowerCorner>0 0</gml:lowerCorner>
      <gml:upperCorner>10 10</gml:upperCorner>
    </gml:Envelope>
  </wfs:boundedBy>
  <wfs:member>
    <topp:roads gml:id="roads.1">
      <topp:name>Main Street</topp:name>
      <topp:lanes>2</topp:lanes>
      <topp:the_geom>
        <gml:LineString srsName="EPSG:4326">
          <gml:posList>0 0 1 1</gml:posList>
        </gml:LineString>
      </topp:the_geom>
      <topp:tag>first</topp:tag>
      <topp:tag>second</topp:tag>
      <topp:tag>third</topp:tag>
      <topp:meta>
        <topp:source>survey</topp:source>
      </topp:meta>
      <ext:note>unmapped</ext:note>
    </topp:roads>
  </wfs:member>
  <wfs:member>
    <topp:roads gml:id="roads.2">
      <topp:name>Side Street</topp:name>
    </topp:roads>
  </wfs:member>
</wfs:FeatureCollection>"#;

/// A GML 3.1.1 feature collection, as served next to WFS 1.1.
pub const GML31_STATES: &str = r#"<gml:FeatureCollection xmlns:gml="http://www.opengis.net/gml"
    xmlns:topp="http://www.openplans.org/topp">
  <gml:boundedBy>
    <gml:Envelope srsName="EPSG:4326">
      <gml:pos>0 0</gml:pos>
      <gml:pos>5 5</gml:pos>
    </gml:Envelope>
  </gml:boundedBy>
  <gml:featureMember>
    <topp:states gml:id="states.1">
      <topp:STATE_NAME>Illinois</topp:STATE_NAME>
      <topp:the_geom>
        <gml:MultiSurface srsName="EPSG:4326"/>
      </topp:the_geom>
    </topp:states>
  </gml:featureMember>
  <gml:featureMember>
    <topp:states fid="states.2">
      <topp:STATE_NAME>Ohio</topp:STATE_NAME>
    </topp:states>
  </gml:featureMember>
</gml:FeatureCollection>"#;

/// A GML 3.1.1 collection in another feature namespace.
pub const GML31_PARCELS: &str = r#"<gml:FeatureCollection xmlns:gml="http://www.opengis.net/gml"
    xmlns:cad="http://example.com/cadastre">
  <gml:featureMember>
    <cad:parcels fid="parcels.7">
      <cad:area>120</cad:area>
    </cad:parcels>
  </gml:featureMember>
</gml:FeatureCollection>"#;

/// WFS 1.1 transaction response with two inserted features.
pub const WFS11_TRANSACTION_RESPONSE: &str = r#"<wfs:TransactionResponse xmlns:wfs="http://www.opengis.net/wfs"
    xmlns:ogc="http://www.opengis.net/ogc" version="1.1.0">
  <wfs:TransactionSummary>
    <wfs:totalInserted>2</wfs:totalInserted>
    <wfs:totalUpdated>1</wfs:totalUpdated>
    <wfs:totalDeleted>0</wfs:totalDeleted>
  </wfs:TransactionSummary>
  <wfs:TransactionResults/>
  <wfs:InsertResults>
    <wfs:Feature><ogc:FeatureId fid="roads.10"/></wfs:Feature>
    <wfs:Feature><ogc:FeatureId fid="roads.11"/></wfs:Feature>
  </wfs:InsertResults>
</wfs:TransactionResponse>"#;

/// WFS 2.0 transaction response missing its summary.
pub const WFS2_TRANSACTION_WITHOUT_SUMMARY: &str = r#"<wfs:TransactionResponse xmlns:wfs="http://www.opengis.net/wfs/2.0"
    xmlns:fes="http://www.opengis.net/fes/2.0" version="2.0.0">
  <wfs:InsertResults>
    <wfs:Feature><fes:ResourceId rid="roads.12"/></wfs:Feature>
    <wfs:Feature/>
  </wfs:InsertResults>
</wfs:TransactionResponse>"#;

/// An OWS 1.0 exception report.
pub const OWS_EXCEPTION: &str = r#"<ows:ExceptionReport xmlns:ows="http://www.opengis.net/ows" version="1.0.0">
  <ows:Exception exceptionCode="InvalidParameterValue" locator="typeName">
    <ows:ExceptionText>Unknown feature type</ows:ExceptionText>
    <ows:ExceptionText>topp:nowhere</ows:ExceptionText>
  </ows:Exception>
</ows:ExceptionReport>"#;

/// A CityGML 1.0 city model with one building.
pub const CITY_MODEL: &str = r#"<core:CityModel xmlns:core="http://www.opengis.net/citygml/1.0"
    xmlns:bldg="http://www.opengis.net/citygml/building/1.0"
    xmlns:gen="http://www.opengis.net/citygml/generics/1.0"
    xmlns:gml="http://www.opengis.net/gml"
    xmlns:xal="urn:oasis:names:tc:ciq:xsdschema:xAL:2.0">
  <core:cityObjectMember>
    <bldg:Building gml:id="BLDG_0001">
      <gml:name>Town Hall</gml:name>
      <gml:boundedBy>
        <gml:Envelope srsName="EPSG:25832">
          <gml:lowerCorner>1 2 3</gml:lowerCorner>
          <gml:upperCorner>4 5 6</gml:upperCorner>
        </gml:Envelope>
      </gml:boundedBy>
      <core:externalReference>
        <core:informationSystem>http://cadastre.example.com</core:informationSystem>
        <core:externalObject>
          <core:name>A-17</core:name>
        </core:externalObject>
      </core:externalReference>
      <core:externalReference>
        <core:informationSystem>http://registry.example.com</core:informationSystem>
        <core:externalObject>
          <core:uri>urn:registry:42</core:uri>
        </core:externalObject>
      </core:externalReference>
      <gen:stringAttribute name="owner">
        <gen:value>City</gen:value>
      </gen:stringAttribute>
      <gen:intAttribute>
        <gen:value>3</gen:value>
      </gen:intAttribute>
      <gen:doubleAttribute name="area">
        <gen:value>812.5</gen:value>
      </gen:doubleAttribute>
      <bldg:measuredHeight uom="m">21.5</bldg:measuredHeight>
      <bldg:address>
        <core:Address>
          <core:xalAddress>
            <xal:AddressDetails>
              <xal:Country>
                <xal:CountryName>Germany</xal:CountryName>
              </xal:Country>
            </xal:AddressDetails>
          </core:xalAddress>
        </core:Address>
      </bldg:address>
    </bldg:Building>
  </core:cityObjectMember>
</core:CityModel>"#;

//! Test fixtures: representative JSON payloads from the EA
//! flood-monitoring API.
//!
//! These fixtures are structurally complete but truncated to the minimum
//! needed to exercise the parser and the merge. They reflect the real
//! envelopes returned by:
//!   http://environment.data.gov.uk/flood-monitoring/id/floodAreas?lat=..&long=..&dist=..
//!   http://environment.data.gov.uk/flood-monitoring/id/floods?lat=..&long=..&dist=..
//!
//! Response shapes:
//!   floodAreas: items[] with notation (area code), label, description
//!               plus many fields the service ignores (@id, polygon, ...)
//!   floods:     items[] with floodAreaID, message, severity,
//!               severityLevel (1 = most severe), timeRaised,
//!               timeMessageChanged, timeSeverityChanged, isTidal

/// Two flood areas: Falton (012FWFAL) and Barchester (013FWFBC).
pub(crate) fn fixture_two_areas_json() -> &'static str {
    r#"{
      "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
      "meta": { "publisher": "Environment Agency", "licence": "OGL" },
      "items": [
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/floodAreas/012FWFAL",
          "county": "Fooshire",
          "description": "River Foo at Falton, including riverside properties and the mill",
          "eaAreaName": "East Anglia",
          "fwdCode": "012FWFAL",
          "label": "River Foo at Falton",
          "lat": 52.204,
          "long": 0.121,
          "notation": "012FWFAL",
          "polygon": "http://environment.data.gov.uk/flood-monitoring/id/floodAreas/012FWFAL/polygon",
          "quickDialNumber": "143052",
          "riverOrSea": "River Foo"
        },
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/floodAreas/013FWFBC",
          "county": "Fooshire",
          "description": "River Bar at Barchester, low lying land upstream of the weir",
          "eaAreaName": "East Anglia",
          "fwdCode": "013FWFBC",
          "label": "River Bar at Barchester",
          "lat": 52.251,
          "long": 0.187,
          "notation": "013FWFBC",
          "polygon": "http://environment.data.gov.uk/flood-monitoring/id/floodAreas/013FWFBC/polygon",
          "quickDialNumber": "143053",
          "riverOrSea": "River Bar"
        }
      ]
    }"#
}

/// One active warning for Falton at severity level 2 ("Flood Warning"),
/// which derives to risk level 2.
pub(crate) fn fixture_single_warning_json() -> &'static str {
    r#"{
      "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
      "meta": { "publisher": "Environment Agency", "licence": "OGL" },
      "items": [
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/floods/012FWFAL",
          "description": "River Foo at Falton",
          "eaAreaName": "East Anglia",
          "floodAreaID": "012FWFAL",
          "isTidal": false,
          "message": "River levels are rising following heavy rainfall. Flooding of property is expected.",
          "severity": "Flood Warning",
          "severityLevel": 2,
          "timeMessageChanged": "2024-01-05T10:30:00",
          "timeRaised": "2024-01-05T09:12:00",
          "timeSeverityChanged": "2024-01-05T09:12:00"
        }
      ]
    }"#
}

/// Two warnings targeting the same area (levels 3 then 1, in that order).
/// The merged risk must come from the worse one regardless of order.
pub(crate) fn fixture_two_warnings_same_area_json() -> &'static str {
    r#"{
      "items": [
        {
          "floodAreaID": "012FWFAL",
          "isTidal": false,
          "message": "Be prepared. River levels remain high.",
          "severity": "Flood Alert",
          "severityLevel": 3,
          "timeMessageChanged": "2024-01-05T08:00:00",
          "timeRaised": "2024-01-05T06:45:00",
          "timeSeverityChanged": "2024-01-05T06:45:00"
        },
        {
          "floodAreaID": "012FWFAL",
          "isTidal": true,
          "message": "Severe flooding. Danger to life.",
          "severity": "Severe Flood Warning",
          "severityLevel": 1,
          "timeMessageChanged": "2024-01-05T11:05:00",
          "timeRaised": "2024-01-05T11:05:00",
          "timeSeverityChanged": "2024-01-05T11:05:00"
        }
      ]
    }"#
}

/// A warning referencing an area code that no areas response contains.
pub(crate) fn fixture_unknown_area_warning_json() -> &'static str {
    r#"{
      "items": [
        {
          "floodAreaID": "099FWNOPE",
          "isTidal": false,
          "message": "Flooding is possible.",
          "severity": "Flood Alert",
          "severityLevel": 3,
          "timeMessageChanged": "2024-01-05T07:00:00",
          "timeRaised": "2024-01-05T07:00:00",
          "timeSeverityChanged": "2024-01-05T07:00:00"
        },
        {
          "floodAreaID": "013FWFBC",
          "isTidal": false,
          "message": "Flooding is possible. Be prepared.",
          "severity": "Flood Alert",
          "severityLevel": 3,
          "timeMessageChanged": "2024-01-05T07:10:00",
          "timeRaised": "2024-01-05T07:10:00",
          "timeSeverityChanged": "2024-01-05T07:10:00"
        }
      ]
    }"#
}

/// The quiet-period response shared by both resources: a valid envelope
/// with no items.
pub(crate) fn fixture_empty_items_json() -> &'static str {
    r#"{
      "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
      "meta": { "publisher": "Environment Agency", "licence": "OGL" },
      "items": []
    }"#
}

/// Structurally valid envelope but the warning item lacks severityLevel.
pub(crate) fn fixture_warning_missing_severity_json() -> &'static str {
    r#"{
      "items": [
        {
          "floodAreaID": "012FWFAL",
          "isTidal": false,
          "message": "Flooding is expected.",
          "severity": "Flood Warning",
          "timeMessageChanged": "2024-01-05T10:30:00",
          "timeRaised": "2024-01-05T09:12:00",
          "timeSeverityChanged": "2024-01-05T09:12:00"
        }
      ]
    }"#
}

/// Structurally valid envelope but the area item lacks a label.
pub(crate) fn fixture_area_missing_label_json() -> &'static str {
    r#"{
      "items": [
        {
          "description": "River Foo at Falton",
          "notation": "012FWFAL"
        }
      ]
    }"#
}

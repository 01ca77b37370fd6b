mod common;

use common::kml_with;
use outline_admin::models::location::Coordinate;
use outline_admin::services::kml_parser::{parse, ParseError};

#[test]
fn test_two_coordinates_in_order() {
    let path = parse(&kml_with("127.1,37.5 128.2,38.6")).unwrap();

    assert_eq!(
        path,
        vec![Coordinate::new(37.5, 127.1), Coordinate::new(38.6, 128.2)]
    );
}

#[test]
fn test_document_without_coordinates_fails() {
    assert_eq!(parse("<kml></kml>"), Err(ParseError::MissingCoordinates));
}

#[test]
fn test_non_xml_text_fails() {
    assert_eq!(
        parse("just some text"),
        Err(ParseError::MissingCoordinates)
    );
}

#[test]
fn test_malformed_tuples_skipped_in_place() {
    let path = parse(&kml_with(
        "127.0,37.0,0 garbage 127.1,37.1 127.2 ,37.3 127.4,abc 127.5,37.5,10",
    ))
    .unwrap();

    assert_eq!(
        path,
        vec![
            Coordinate::new(37.0, 127.0),
            Coordinate::new(37.1, 127.1),
            Coordinate::new(37.5, 127.5),
        ]
    );
}

#[test]
fn test_only_malformed_tuples_is_empty_path() {
    let path = parse(&kml_with("abc,def ghi")).unwrap();
    assert!(path.is_empty());
}

#[test]
fn test_empty_coordinates_element_is_empty_path() {
    assert_eq!(parse("<kml><coordinates/></kml>").unwrap(), vec![]);
    assert_eq!(parse("<kml><coordinates>   </coordinates></kml>").unwrap(), vec![]);
}

#[test]
fn test_only_first_coordinates_element_used() {
    let doc = r#"<kml>
        <Placemark><LineString><coordinates>1,2 3,4</coordinates></LineString></Placemark>
        <Placemark><LineString><coordinates>5,6</coordinates></LineString></Placemark>
    </kml>"#;

    assert_eq!(
        parse(doc).unwrap(),
        vec![Coordinate::new(2.0, 1.0), Coordinate::new(4.0, 3.0)]
    );
}

#[test]
fn test_namespace_prefix_ignored() {
    let doc = r#"<kml:kml xmlns:kml="http://www.opengis.net/kml/2.2">
        <kml:coordinates>126.97,37.56</kml:coordinates>
    </kml:kml>"#;

    assert_eq!(parse(doc).unwrap(), vec![Coordinate::new(37.56, 126.97)]);
}

#[test]
fn test_newline_separated_tuples() {
    let path = parse(&kml_with(
        "\n          126.9,37.5,0\n          127.0,37.6,0\n        ",
    ))
    .unwrap();

    assert_eq!(
        path,
        vec![Coordinate::new(37.5, 126.9), Coordinate::new(37.6, 127.0)]
    );
}

#[test]
fn test_reparse_yields_same_path() {
    let doc = kml_with("127.1,37.5 128.2,38.6 129.3,39.7");
    assert_eq!(parse(&doc).unwrap(), parse(&doc).unwrap());
}

#[test]
fn test_cdata_wrapped_coordinates() {
    let path = parse("<kml><coordinates><![CDATA[1,2 3,4 5,6]]></coordinates></kml>").unwrap();

    assert_eq!(
        path,
        vec![
            Coordinate::new(2.0, 1.0),
            Coordinate::new(4.0, 3.0),
            Coordinate::new(6.0, 5.0)
        ]
    );
}

#[test]
fn test_character_references_are_resolved() {
    let path = parse("<kml><coordinates>1,2&#32;3,4&#10;5,6</coordinates></kml>").unwrap();

    assert_eq!(
        path,
        vec![
            Coordinate::new(2.0, 1.0),
            Coordinate::new(4.0, 3.0),
            Coordinate::new(6.0, 5.0)
        ]
    );
}

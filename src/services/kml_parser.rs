//! Extracts the course track from an uploaded KML file.
//!
//! Only the first `coordinates` element in the document is read, whatever
//! namespace prefix it carries. Its text is a whitespace separated list of
//! `longitude,latitude[,altitude]` tuples; altitude is ignored and tuples
//! that do not yield two finite numbers are skipped.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::models::location::{Coordinate, TrackPath};

#[derive(Debug, PartialEq)]
pub enum ParseError {
    MissingCoordinates,
    Malformed(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingCoordinates => write!(f, "KML file has no coordinates element"),
            ParseError::Malformed(err) => write!(f, "KML file is not valid XML: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

const COORDINATES: &[u8] = b"coordinates";

pub fn parse(contents: &str) -> Result<TrackPath, ParseError> {
    let mut reader = Reader::from_str(contents);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == COORDINATES => {
                let text = read_text_content(&mut reader)?;
                return Ok(parse_coordinate_list(&text));
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == COORDINATES => {
                return Ok(TrackPath::new());
            }
            Ok(Event::Eof) => return Err(ParseError::MissingCoordinates),
            Ok(_) => {}
            Err(e) => return Err(ParseError::Malformed(e.to_string())),
        }
    }
}

/// Text and CDATA up to the end of the element just opened, with entities
/// resolved. Text inside nested elements counts too.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                let unescaped = e
                    .unescape()
                    .map_err(|e| ParseError::Malformed(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(e)) => {
                let raw = std::str::from_utf8(&e)
                    .map_err(|e| ParseError::Malformed(e.to_string()))?;
                text.push_str(raw);
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) if depth == 0 => return Ok(text),
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => {
                return Err(ParseError::Malformed(
                    "unclosed coordinates element".to_string(),
                ))
            }
            Ok(_) => {}
            Err(e) => return Err(ParseError::Malformed(e.to_string())),
        }
    }
}

fn parse_coordinate_list(text: &str) -> TrackPath {
    text.split_whitespace().filter_map(parse_tuple).collect()
}

fn parse_tuple(token: &str) -> Option<Coordinate> {
    let mut fields = token.split(',');
    let longitude: f64 = fields.next()?.trim().parse().ok()?;
    let latitude: f64 = fields.next()?.trim().parse().ok()?;

    if longitude.is_finite() && latitude.is_finite() {
        Some(Coordinate::new(latitude, longitude))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_with_altitude() {
        assert_eq!(
            parse_tuple("127.1,37.5,12.0"),
            Some(Coordinate::new(37.5, 127.1))
        );
    }

    #[test]
    fn test_text_content_joins_text_and_cdata() {
        let path = parse("<kml><coordinates>1,2 <![CDATA[3,4]]> 5,6</coordinates></kml>").unwrap();
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
    fn test_unclosed_coordinates_is_malformed() {
        assert!(matches!(
            parse("<kml><coordinates>1,2 3,4"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_tuple_rejects_garbage() {
        assert_eq!(parse_tuple("127.1"), None);
        assert_eq!(parse_tuple("abc,37.5"), None);
        assert_eq!(parse_tuple("NaN,37.5"), None);
        assert_eq!(parse_tuple("127.1,inf"), None);
        assert_eq!(parse_tuple(""), None);
    }
}

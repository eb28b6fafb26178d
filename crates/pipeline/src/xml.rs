//! Field extraction from lookup service XML responses.
//!
//! Both endpoints answer with a `<bmp_locations>` document holding one or
//! more `<location>` entries. Only the first occurrence of a field counts.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::LookupFailure;
use crate::model::LatLng;

/// Text content of the first `<tag>` element, trimmed.
pub fn first_element_text(body: &str, tag: &'static str) -> Result<String, LookupFailure> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut inside = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if !inside && e.name().as_ref() == tag.as_bytes() => {
                inside = true;
            }
            Ok(Event::Empty(ref e)) if !inside && e.name().as_ref() == tag.as_bytes() => {
                return Ok(String::new());
            }
            Ok(Event::Text(ref e)) if inside => {
                text.push_str(&String::from_utf8_lossy(e));
            }
            Ok(Event::CData(ref e)) if inside => {
                text.push_str(&String::from_utf8_lossy(e));
            }
            Ok(Event::End(ref e)) if inside && e.name().as_ref() == tag.as_bytes() => {
                return Ok(text.trim().to_string());
            }
            Ok(Event::Eof) => {
                return Err(LookupFailure::MissingElement(tag));
            }
            Err(e) => {
                return Err(LookupFailure::MalformedBody(e.to_string()));
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Brewery identifier from a `locquery` response.
pub fn parse_identifier(body: &str) -> Result<u64, LookupFailure> {
    let raw = first_element_text(body, "id")?;
    raw.parse::<u64>()
        .map_err(|_| LookupFailure::Unparseable { element: "id", value: raw })
}

/// Latitude/longitude from a `locmap` response. Both must be finite numbers.
pub fn parse_coordinates(body: &str) -> Result<LatLng, LookupFailure> {
    let latitude = parse_degrees(body, "lat")?;
    let longitude = parse_degrees(body, "lng")?;
    Ok(LatLng { latitude, longitude })
}

fn parse_degrees(body: &str, tag: &'static str) -> Result<f64, LookupFailure> {
    let raw = first_element_text(body, tag)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LookupFailure::Unparseable { element: tag, value: raw }),
    }
}

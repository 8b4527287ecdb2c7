use std::collections::HashMap;

use kml::{
    Kml, KmlDocument, KmlWriter,
    types::{Coord, Geometry, LineString, Placemark},
};

use crate::{routing::Itinerary, structures::LatLng};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

fn coord(loc: LatLng) -> Coord {
    Coord::new(loc.longitude, loc.latitude, None)
}

/// KML document tracing the journey as a single line string, from the source
/// coordinate through every node to the destination.
pub fn render_kml(itinerary: &Itinerary) -> Result<String, String> {
    let coords: Vec<Coord> = itinerary
        .legs
        .first()
        .map(|l| l.from)
        .into_iter()
        .chain(itinerary.legs.iter().map(|l| l.to))
        .map(coord)
        .collect();

    let placemark = Placemark {
        name: Some(itinerary.objective.name().to_string()),
        geometry: Some(Geometry::LineString(LineString {
            coords,
            ..Default::default()
        })),
        ..Default::default()
    };
    let document = Kml::KmlDocument(KmlDocument {
        attrs: HashMap::from([("xmlns".to_string(), KML_NAMESPACE.to_string())]),
        elements: vec![Kml::Document {
            attrs: HashMap::new(),
            elements: vec![Kml::Placemark(placemark)],
        }],
        ..Default::default()
    });

    let mut buf = Vec::new();
    KmlWriter::from_writer(&mut buf)
        .write(&document)
        .map_err(|e| format!("Failed to write KML: {e}"))?;
    String::from_utf8(buf).map_err(|e| format!("KML is not UTF-8: {e}"))
}

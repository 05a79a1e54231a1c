use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A point of interest near one route, assembled by the backend from its
/// map data. `distance` is feet from the rider's position. `coordinates`
/// is (latitude, longitude); not every POI has one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default = "unknown_type", rename = "type")]
    pub poi_type: String,
    pub distance: f64,
    #[serde(default)]
    pub coordinates: Option<(f64, f64)>,
    #[serde(default)]
    pub stop: Option<PoiStop>,
}

/// The transit stop a POI hangs off of. The backend identifies it by GTFS
/// id, position, and its sequence along the route; a name only shows up
/// if some server revision adds one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoiStop {
    // Numeric-looking GTFS ids come through as JSON numbers
    #[serde(default, deserialize_with = "id_string")]
    pub stop_id: Option<String>,
    #[serde(default)]
    pub stop_name: Option<String>,
    #[serde(default)]
    pub stop_sequence: Option<i64>,
    #[serde(default)]
    pub stop_lat: Option<f64>,
    #[serde(default)]
    pub stop_lon: Option<f64>,
}

impl PoiStop {
    /// The best identifier available for display: the name when there is
    /// one, otherwise the GTFS id.
    pub fn label(&self) -> Option<&str> {
        self.stop_name.as_deref().or(self.stop_id.as_deref())
    }
}

fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        Value::String(x) => Some(x),
        other => Some(other.to_string()),
    })
}

fn unknown_name() -> String {
    "Unknown POI".to_string()
}

fn unknown_type() -> String {
    "Unknown Type".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_poi() {
        // The stop object carries a GTFS id and sequence, never a name
        let poi: Poi = serde_json::from_str(
            r#"{
                "name": "Mill City Museum",
                "type": "museum",
                "distance": 850.0,
                "coordinates": [44.978, -93.257],
                "stop": { "stop_id": "17948", "stop_sequence": 4, "stop_lat": 44.978, "stop_lon": -93.258 }
            }"#,
        )
        .unwrap();
        assert_eq!(poi.name, "Mill City Museum");
        assert_eq!(poi.coordinates, Some((44.978, -93.257)));

        let stop = poi.stop.unwrap();
        assert_eq!(stop.stop_id, Some("17948".to_string()));
        assert_eq!(stop.stop_sequence, Some(4));
        assert_eq!(stop.stop_name, None);
        // The id alone is enough for the "Near stop" line
        assert_eq!(stop.label(), Some("17948"));
    }

    #[test]
    fn test_numeric_stop_ids() {
        // GTFS ids are text, but the backend's table import turns the
        // numeric-looking ones into JSON numbers
        let poi: Poi = serde_json::from_str(
            r#"{ "distance": 90.0, "stop": { "stop_id": 17948, "stop_sequence": 4 } }"#,
        )
        .unwrap();
        assert_eq!(poi.stop.unwrap().stop_id, Some("17948".to_string()));
    }

    #[test]
    fn test_stop_label_prefers_name() {
        let stop: PoiStop = serde_json::from_str(
            r#"{ "stop_id": "17948", "stop_name": "Washington & Chicago" }"#,
        )
        .unwrap();
        assert_eq!(stop.label(), Some("Washington & Chicago"));

        let bare: PoiStop = serde_json::from_str(r#"{ "stop_lat": 44.9 }"#).unwrap();
        assert_eq!(bare.label(), None);
    }

    #[test]
    fn test_unnamed_pois_get_placeholders() {
        let poi: Poi = serde_json::from_str(r#"{ "distance": 120.5 }"#).unwrap();
        assert_eq!(poi.name, "Unknown POI");
        assert_eq!(poi.poi_type, "Unknown Type");
        assert_eq!(poi.coordinates, None);
        assert_eq!(poi.stop, None);
    }
}

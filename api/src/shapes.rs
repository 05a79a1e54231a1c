use geojson::GeoJson;

use crate::error::{ApiError, ApiResult};

/// One drawable path from /api/route_shape. The backend groups shape
/// points by shape_id and emits one LineString feature per group, with
/// coordinates as (longitude, latitude).
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePath {
    pub shape_id: String,
    pub points: Vec<(f64, f64)>,
}

pub fn decode_route_shape(url: &str, body: &str) -> ApiResult<Vec<ShapePath>> {
    let geojson: GeoJson = body
        .parse()
        .map_err(|err: geojson::Error| decode_err(url, err.to_string()))?;
    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        _ => {
            return Err(decode_err(url, "expected a FeatureCollection"));
        }
    };

    let mut paths = Vec::new();
    for (idx, feature) in collection.features.into_iter().enumerate() {
        // Some revisions of the backend send shape_id as a number
        let shape_id = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("shape_id"))
            .map(|value| match value {
                serde_json::Value::String(x) => x.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| idx.to_string());

        let geometry = match feature.geometry {
            Some(geometry) => geometry,
            None => {
                return Err(decode_err(url, format!("feature {idx} has no geometry")));
            }
        };
        match geometry.value {
            geojson::Value::LineString(coords) => {
                let mut points = Vec::new();
                for pos in coords {
                    if pos.len() < 2 {
                        return Err(decode_err(
                            url,
                            format!("shape {shape_id} has a malformed coordinate"),
                        ));
                    }
                    points.push((pos[0], pos[1]));
                }
                paths.push(ShapePath { shape_id, points });
            }
            _ => {
                return Err(decode_err(url, format!("feature {idx} isn't a LineString")));
            }
        }
    }
    Ok(paths)
}

fn decode_err<S: Into<String>>(url: &str, message: S) -> ApiError {
    ApiError::Decode {
        url: url.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_shapes() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "shape_id": "21-4" },
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-93.26, 44.97], [-93.25, 44.98], [-93.24, 44.98]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": { "shape_id": 215 },
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-93.30, 44.95], [-93.29, 44.96]]
                    }
                }
            ]
        }"#;

        let paths = decode_route_shape("http://test/api/route_shape", body).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].shape_id, "21-4");
        assert_eq!(paths[0].points.len(), 3);
        assert_eq!(paths[0].points[0], (-93.26, 44.97));
        // Numeric IDs come through as their decimal text
        assert_eq!(paths[1].shape_id, "215");
    }

    #[test]
    fn test_missing_shape_id_falls_back_to_index() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-93.1, 44.9], [-93.2, 44.9]]
                    }
                }
            ]
        }"#;
        let paths = decode_route_shape("http://test/api/route_shape", body).unwrap();
        assert_eq!(paths[0].shape_id, "0");
    }

    #[test]
    fn test_reject_non_linestrings() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "shape_id": "x" },
                    "geometry": { "type": "Point", "coordinates": [-93.26, 44.97] }
                }
            ]
        }"#;
        assert!(decode_route_shape("http://test/api/route_shape", body).is_err());

        let not_a_collection = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [0, 0] }
        }"#;
        assert!(decode_route_shape("http://test/api/route_shape", not_a_collection).is_err());
    }

    #[test]
    fn test_empty_collection() {
        let body = r#"{ "type": "FeatureCollection", "features": [] }"#;
        assert_eq!(
            decode_route_shape("http://test/api/route_shape", body).unwrap(),
            Vec::new()
        );
    }
}

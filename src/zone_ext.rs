// extends Zones to add some capabilities
// The Zone's capabilities have been split in order to keep the geojson and geo
// dependencies out of the model

use crate::zone_loader::ConfigurationError;
use failure::Error;
use geo::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{BoundingRect, MultiPolygon, Point};
use geojson::{JsonObject, Value};
use std::convert::TryFrom;
use zonemap_model::{KeyResolution, Zone, ZoneIndex};

/// properties holding the key of a zone, by order of preference
pub const KEY_PROPERTIES: [&str; 3] = ["zone_key", "zoneKey", "name"];

pub trait ZoneExt {
    /// create a zone from the geometry and the properties of a geojson feature
    fn from_geojson(
        geometry: &geojson::Geometry,
        properties: &JsonObject,
        index: ZoneIndex,
    ) -> Result<Zone, Error>;

    /// check if a point (lon/lat) is inside the zone or on its boundary
    fn covers(&self, point: &Point<f64>) -> bool;
}

impl ZoneExt for Zone {
    fn from_geojson(
        geometry: &geojson::Geometry,
        properties: &JsonObject,
        index: ZoneIndex,
    ) -> Result<Self, Error> {
        let key_resolution = resolve_zone_key(properties, index.index);
        let boundary = match geometry.value {
            Value::Polygon(_) | Value::MultiPolygon(_) => {
                match geo::Geometry::<f64>::try_from(geometry.value.clone())? {
                    geo::Geometry::Polygon(p) => MultiPolygon(vec![p]),
                    geo::Geometry::MultiPolygon(mp) => mp,
                    _ => unreachable!("a geojson polygon is always converted to a polygon"),
                }
            }
            ref other => {
                return Err(ConfigurationError::UnsupportedGeometry {
                    key: key_resolution.key(),
                    geometry_type: geometry_type(other).to_string(),
                }
                .into())
            }
        };
        let bbox = boundary.bounding_rect();

        Ok(Zone::new(index, key_resolution, boundary, bbox))
    }

    fn covers(&self, point: &Point<f64>) -> bool {
        // In `CoordPos` terms, a point on the edge of a zone or of one of its
        // holes is `OnBoundary`, it belongs to the zone.
        self.bbox_contains(point) && self.boundary.coordinate_position(&point.0) != CoordPos::Outside
    }
}

/// Find the key of a zone in its properties.
///
/// The properties are tried in the order of `KEY_PROPERTIES`; a property is
/// usable if it is a non empty string, a non zero number or `true`.
/// Numbers are rendered in their shortest form (`1.0` is `"1"`).
/// Objects and arrays are never used as keys.
/// When no property is usable, the zone is named after its position: `Fallback(index)`.
pub fn resolve_zone_key(properties: &JsonObject, index: usize) -> KeyResolution {
    KEY_PROPERTIES
        .iter()
        .filter_map(|p| properties.get(*p))
        .find_map(property_as_key)
        .map(KeyResolution::Found)
        .unwrap_or(KeyResolution::Fallback(index))
}

fn property_as_key(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => n
            .as_f64()
            .filter(|f| *f != 0.)
            .map(|f| f.to_string()),
        serde_json::Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn geometry_type(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn properties(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(o) => o,
            _ => panic!("properties must be an object"),
        }
    }

    fn square(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Vec<f64>> {
        vec![
            vec![min_x, min_y],
            vec![max_x, min_y],
            vec![max_x, max_y],
            vec![min_x, max_y],
            vec![min_x, min_y],
        ]
    }

    fn z1() -> Zone {
        let geometry = geojson::Geometry::new(Value::Polygon(vec![square(-3.0, 54.0, -2.9, 54.1)]));
        Zone::from_geojson(
            &geometry,
            &properties(json!({"zone_key": "Z1"})),
            ZoneIndex { index: 0 },
        )
        .unwrap()
    }

    #[test]
    fn key_resolution_order() {
        let p = properties(json!({"zone_key": "A", "zoneKey": "B", "name": "C"}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("A".into()));
        let p = properties(json!({"zoneKey": "B", "name": "C"}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("B".into()));
        let p = properties(json!({"name": "C"}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("C".into()));
        let p = properties(json!({"colour": "green"}));
        assert_eq!(resolve_zone_key(&p, 6), KeyResolution::Fallback(6));
        assert_eq!(resolve_zone_key(&p, 6).key(), "zone_7");
    }

    #[test]
    fn empty_or_null_properties_are_skipped() {
        let p = properties(json!({"zone_key": "", "zoneKey": null, "name": "Heysham"}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("Heysham".into()));
        let p = properties(json!({"zone_key": 0, "zoneKey": false}));
        assert_eq!(resolve_zone_key(&p, 1), KeyResolution::Fallback(1));
    }

    #[test]
    fn numeric_keys_are_rendered() {
        let p = properties(json!({"zone_key": 12}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("12".into()));
        let p = properties(json!({"zone_key": 1.0}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("1".into()));
        let p = properties(json!({"zone_key": 2.5}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("2.5".into()));
        let p = properties(json!({"zone_key": -0.0, "name": "Heysham"}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("Heysham".into()));
    }

    #[test]
    fn boolean_keys() {
        let p = properties(json!({"zone_key": true, "name": "Heysham"}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("true".into()));
        let p = properties(json!({"zone_key": false, "name": "Heysham"}));
        assert_eq!(resolve_zone_key(&p, 0), KeyResolution::Found("Heysham".into()));
        let p = properties(json!({"zone_key": {"id": 1}, "zoneKey": [1]}));
        assert_eq!(resolve_zone_key(&p, 2), KeyResolution::Fallback(2));
    }

    #[test]
    fn polygon_is_lifted_to_a_multipolygon() {
        let z = z1();
        assert_eq!(z.key, "Z1");
        assert_eq!(z.boundary.0.len(), 1);
        let bbox = z.bbox.unwrap();
        assert_eq!(bbox.min().x, -3.0);
        assert_eq!(bbox.max().y, 54.1);
    }

    #[test]
    fn covers_inside_and_boundary() {
        let z = z1();
        assert!(z.covers(&Point::new(-2.95, 54.05)));
        assert!(z.covers(&Point::new(-3.0, 54.05)));
        assert!(z.covers(&Point::new(-2.9, 54.1)));
        assert!(!z.covers(&Point::new(-2.85, 54.05)));
        assert!(!z.covers(&Point::new(-2.95, 53.99)));
    }

    #[test]
    fn holes_are_not_covered() {
        let geometry = geojson::Geometry::new(Value::MultiPolygon(vec![
            vec![
                square(-2.89, 54.06, -2.80, 54.10),
                square(-2.86, 54.07, -2.84, 54.09),
            ],
            vec![square(-3.2, 54.0, -3.1, 54.1)],
        ]));
        let z = Zone::from_geojson(
            &geometry,
            &properties(json!({"name": "Morecambe"})),
            ZoneIndex { index: 3 },
        )
        .unwrap();
        assert_eq!(z.boundary.0.len(), 2);
        assert!(z.covers(&Point::new(-2.82, 54.08)));
        assert!(!z.covers(&Point::new(-2.85, 54.08)));
        // edge of the hole
        assert!(z.covers(&Point::new(-2.86, 54.08)));
        assert!(z.covers(&Point::new(-3.15, 54.05)));
        assert!(!z.covers(&Point::new(-3.0, 54.05)));
    }

    #[test]
    fn other_geometries_are_rejected() {
        let geometry = geojson::Geometry::new(Value::LineString(vec![
            vec![-3.0, 54.0],
            vec![-2.9, 54.1],
        ]));
        let err = Zone::from_geojson(
            &geometry,
            &properties(json!({"zone_key": "road"})),
            ZoneIndex { index: 0 },
        )
        .unwrap_err();
        assert!(err.to_string().contains("road"));
        assert!(err.to_string().contains("LineString"));
    }
}

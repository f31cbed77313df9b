use geo_types::{MultiPolygon, Point, Rect};
use std::fmt;

pub type Coord = Point<f64>;

#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ZoneIndex {
    pub index: usize,
}

/// How the key of a zone has been found in the properties of its feature.
///
/// `Fallback` carries the position of the feature among the *valid* features
/// (features without geometry or properties are removed before the keys are
/// resolved), so removing an invalid feature can shift every fallback key
/// behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution {
    Found(String),
    Fallback(usize),
}

impl KeyResolution {
    pub fn key(&self) -> String {
        match self {
            KeyResolution::Found(k) => k.clone(),
            KeyResolution::Fallback(idx) => format!("zone_{}", idx + 1),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, KeyResolution::Fallback(_))
    }
}

impl fmt::Display for KeyResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyResolution::Found(k) => write!(f, "{}", k),
            KeyResolution::Fallback(idx) => write!(f, "zone_{} (positional fallback)", idx + 1),
        }
    }
}

/// A service area, in WGS84 longitude/latitude.
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: ZoneIndex,
    pub key: String,
    pub key_resolution: KeyResolution,
    pub boundary: MultiPolygon<f64>,
    pub bbox: Option<Rect<f64>>,
}

impl Zone {
    pub fn new(
        id: ZoneIndex,
        key_resolution: KeyResolution,
        boundary: MultiPolygon<f64>,
        bbox: Option<Rect<f64>>,
    ) -> Self {
        Zone {
            id,
            key: key_resolution.key(),
            key_resolution,
            boundary,
            bbox,
        }
    }

    /// cheap check on the bounding rectangle, boundary included
    pub fn bbox_contains(&self, point: &Coord) -> bool {
        match self.bbox {
            Some(ref b) => {
                point.x() >= b.min().x
                    && point.x() <= b.max().x
                    && point.y() >= b.min().y
                    && point.y() <= b.max().y
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, Coord as GeoCoord};

    fn square_zone(key_resolution: KeyResolution) -> Zone {
        let poly = polygon![
            (x: -3.0, y: 54.0),
            (x: -2.9, y: 54.0),
            (x: -2.9, y: 54.1),
            (x: -3.0, y: 54.1),
            (x: -3.0, y: 54.0),
        ];
        let bbox = Rect::new(GeoCoord { x: -3.0, y: 54.0 }, GeoCoord { x: -2.9, y: 54.1 });
        Zone::new(
            ZoneIndex { index: 0 },
            key_resolution,
            MultiPolygon(vec![poly]),
            Some(bbox),
        )
    }

    #[test]
    fn fallback_key_is_one_based() {
        assert_eq!(KeyResolution::Fallback(0).key(), "zone_1");
        assert_eq!(KeyResolution::Fallback(4).key(), "zone_5");
        assert!(KeyResolution::Fallback(4).is_fallback());
        assert!(!KeyResolution::Found("Z1".into()).is_fallback());
    }

    #[test]
    fn display_shows_how_the_key_was_found() {
        assert_eq!(KeyResolution::Found("Z1".into()).to_string(), "Z1");
        assert_eq!(
            KeyResolution::Fallback(1).to_string(),
            "zone_2 (positional fallback)"
        );
    }

    #[test]
    fn zone_key_follows_resolution() {
        let z = square_zone(KeyResolution::Found("Z1".into()));
        assert_eq!(z.key, "Z1");
        let z = square_zone(KeyResolution::Fallback(2));
        assert_eq!(z.key, "zone_3");
    }

    #[test]
    fn bbox_includes_its_edges() {
        let z = square_zone(KeyResolution::Found("Z1".into()));
        assert!(z.bbox_contains(&Coord::new(-2.95, 54.05)));
        assert!(z.bbox_contains(&Coord::new(-3.0, 54.1)));
        assert!(!z.bbox_contains(&Coord::new(-2.85, 54.05)));

        let without_bbox = Zone {
            bbox: None,
            ..z
        };
        assert!(!without_bbox.bbox_contains(&Coord::new(-2.95, 54.05)));
    }
}

use crate::zone_ext::ZoneExt;
use failure::{Error, ResultExt};
use geojson::GeoJson;
use std::collections::BTreeMap;
use std::path::Path;
use zonemap_model::{Zone, ZoneIndex};

/// Errors on the zones that make the run impossible.
/// Nothing is written when one of them occurs.
#[derive(Debug, Fail)]
pub enum ConfigurationError {
    #[fail(display = "No polygon features found in zones file {}", _0)]
    NoZones(String),
    #[fail(display = "Zone number {} is missing a zone_key property", index)]
    MissingZoneKey { index: usize },
    #[fail(
        display = "Zone '{}' is a {}, only Polygon and MultiPolygon geometries are handled",
        key, geometry_type
    )]
    UnsupportedGeometry { key: String, geometry_type: String },
}

/// Load the zones of a geojson file, in the order of the file
pub fn load_zones(zones_path: impl AsRef<Path>) -> Result<Vec<Zone>, Error> {
    let path = zones_path.as_ref();
    info!("reading zones from {}", path.display());
    let raw = std::fs::read_to_string(path)
        .with_context(|_| format!("impossible to read zones file {}", path.display()))?;
    let geojson = raw
        .parse::<GeoJson>()
        .with_context(|_| format!("invalid geojson in zones file {}", path.display()))?;
    let zones = zones_from_geojson(geojson, &path.display().to_string())?;
    info!("{} zones loaded", zones.len());
    Ok(zones)
}

/// Build the zones from a FeatureCollection or a single Feature.
///
/// The features without geometry or without properties are removed
/// before the zone keys are resolved.
pub fn zones_from_geojson(geojson: GeoJson, source: &str) -> Result<Vec<Zone>, Error> {
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => {
            debug!("{} is a bare geometry, it has no properties", source);
            vec![]
        }
    };

    let zones = features
        .iter()
        .enumerate()
        .filter_map(|(pos, f)| match (&f.geometry, &f.properties) {
            (Some(geometry), Some(properties)) => Some((geometry, properties)),
            _ => {
                debug!("feature {} has no geometry or no properties, skipped", pos);
                None
            }
        })
        .enumerate()
        .map(|(index, (geometry, properties))| {
            Zone::from_geojson(geometry, properties, ZoneIndex { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if zones.is_empty() {
        return Err(ConfigurationError::NoZones(source.to_string()).into());
    }
    if let Some(z) = zones.iter().find(|z| z.key.is_empty()) {
        return Err(ConfigurationError::MissingZoneKey { index: z.id.index }.into());
    }

    for z in zones.iter().filter(|z| z.key_resolution.is_fallback()) {
        warn!("zone number {} has no key property: {}", z.id.index, z.key_resolution);
    }
    let mut keys: BTreeMap<&str, usize> = BTreeMap::new();
    for z in &zones {
        *keys.entry(z.key.as_str()).or_insert(0) += 1;
    }
    for (key, count) in keys.iter().filter(|(_, c)| **c > 1) {
        warn!(
            "{} zones share the key '{}', postcodes are assigned to the first one",
            count, key
        );
    }

    Ok(zones)
}

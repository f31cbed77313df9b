use crate::projection::Reproject;
use crate::zone_finder::ZoneFinder;
use rayon::prelude::*;
use zonemap_model::{format_uk_postcode, ClassifiedPostcode, PostcodeRecord, Zone, ZoneMapStats};

/// The rows of the lookup table, in the order of the postcodes, and their stats
#[derive(Debug, Default)]
pub struct Assignment {
    pub rows: Vec<ClassifiedPostcode>,
    pub stats: ZoneMapStats,
}

/// Reproject every postcode and find the zone containing it.
///
/// The postcodes are processed in parallel, the rows keep the order of `postcodes`.
pub fn assign_postcodes_to_zones(
    zones: &[Zone],
    postcodes: &[PostcodeRecord],
    projection: &impl Reproject,
) -> Assignment {
    info!(
        "Starting to match {} postcodes with {} zones",
        postcodes.len(),
        zones.len()
    );
    let finder = ZoneFinder::new(zones);
    let rows: Vec<ClassifiedPostcode> = postcodes
        .par_iter()
        .map(|p| classify(&finder, projection, p))
        .collect();
    let stats: ZoneMapStats = rows.iter().collect();
    info!("Finished matching postcodes and zones.");

    Assignment { rows, stats }
}

pub fn classify(
    finder: &ZoneFinder<'_>,
    projection: &impl Reproject,
    postcode: &PostcodeRecord,
) -> ClassifiedPostcode {
    let point = projection.reproject(postcode.easting, postcode.northing);
    let zone_key = finder
        .find_zone(&point)
        .map(|z| z.key.clone())
        .unwrap_or_default();

    ClassifiedPostcode {
        postcode: format_uk_postcode(&postcode.postcode),
        zone_key,
        lat: point.y(),
        lng: point.x(),
    }
}

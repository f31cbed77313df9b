#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

pub mod assignment;
pub mod codepoint;
pub mod projection;
pub mod zone_ext;
pub mod zone_finder;
pub mod zone_loader;

pub use assignment::{assign_postcodes_to_zones, Assignment};
pub use codepoint::{read_postcodes, read_postcodes_from_file};
pub use projection::{BritishNationalGrid, Reproject};
pub use zone_loader::{load_zones, ConfigurationError};
pub use zonemap_model::*;

use failure::Error;
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|f| f.to_str())
        .map(|f| f.to_string())
        .unwrap_or_else(|| "invalid file name".into())
}

/// Build the postcode -> zone table of the postcodes starting with `prefix`.
///
/// Nothing is written, see `write_zone_map` for that.
pub fn build_zone_map(
    zones_path: impl AsRef<Path>,
    codepoint_path: impl AsRef<Path>,
    prefix: &str,
) -> Result<ZoneMapRun, Error> {
    let zones = load_zones(zones_path.as_ref())?;
    let (postcodes, source_stats) = read_postcodes_from_file(codepoint_path.as_ref(), prefix)?;

    let assignment =
        assign_postcodes_to_zones(&zones, &postcodes, &BritishNationalGrid::default());

    Ok(ZoneMapRun {
        rows: assignment.rows,
        meta: ZoneMapMetadata {
            zones_filename: file_name(zones_path.as_ref()),
            codepoint_filename: file_name(codepoint_path.as_ref()),
            prefix: normalise_postcode_no_space(prefix),
            source_stats,
            stats: assignment.stats,
        },
    })
}

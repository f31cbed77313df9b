//! Reader of the Ordnance Survey Code-Point Open csv files.
//!
//! The files have no header. The columns are positional:
//! 0 postcode, 1 positional quality indicator, 2 easting, 3 northing,
//! the others are ignored.

use failure::{Error, ResultExt};
use std::io::Read;
use std::path::Path;
use zonemap_model::{normalise_postcode_no_space, PostcodeRecord, SourceStats};

const POSTCODE_COLUMN: usize = 0;
const EASTING_COLUMN: usize = 2;
const NORTHING_COLUMN: usize = 3;

/// Read the postcodes starting with `prefix` (case and spaces are ignored).
///
/// Malformed rows and rows with invalid coordinates are dropped and counted
/// in the returned stats, only I/O errors abort the read.
///
/// An empty easting or northing is an invalid coordinate: the row is dropped,
/// it is not placed at 0 on the grid.
pub fn read_postcodes(
    reader: impl Read,
    prefix: &str,
) -> Result<(Vec<PostcodeRecord>, SourceStats), Error> {
    let prefix = normalise_postcode_no_space(prefix);
    let mut stats = SourceStats::default();
    let mut postcodes = vec![];

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    for result in rdr.records() {
        stats.rows_read += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                if let csv::ErrorKind::Io(_) = e.kind() {
                    return Err(e.into());
                }
                debug!("malformed row skipped: {}", e);
                stats.malformed_rows += 1;
                continue;
            }
        };

        let postcode = match row.get(POSTCODE_COLUMN) {
            Some(p) if !p.is_empty() => p,
            _ => {
                stats.malformed_rows += 1;
                continue;
            }
        };
        if !normalise_postcode_no_space(postcode).starts_with(&prefix) {
            stats.outside_prefix += 1;
            continue;
        }

        match (
            parse_coordinate(row.get(EASTING_COLUMN)),
            parse_coordinate(row.get(NORTHING_COLUMN)),
        ) {
            (Some(easting), Some(northing)) => postcodes.push(PostcodeRecord {
                postcode: postcode.to_string(),
                easting,
                northing,
            }),
            _ => {
                debug!("postcode {} has invalid coordinates, skipped", postcode);
                stats.invalid_coordinates += 1;
            }
        }
    }

    stats.retained = postcodes.len();
    Ok((postcodes, stats))
}

/// Read a Code-Point Open file, gzipped if its name ends with `.gz`
pub fn read_postcodes_from_file(
    codepoint_path: impl AsRef<Path>,
    prefix: &str,
) -> Result<(Vec<PostcodeRecord>, SourceStats), Error> {
    let path = codepoint_path.as_ref();
    info!("reading postcodes {} from {}", prefix, path.display());
    let file = std::fs::File::open(path)
        .with_context(|_| format!("impossible to read postcode file {}", path.display()))?;
    let file = std::io::BufReader::new(file);
    let is_gz = path
        .file_name()
        .and_then(|f| f.to_str())
        .map_or(false, |f| f.ends_with(".gz"));
    let read = if is_gz {
        read_postcodes(flate2::bufread::GzDecoder::new(file), prefix)
    } else {
        read_postcodes(file, prefix)
    };
    let (postcodes, stats) =
        read.with_context(|_| format!("impossible to read postcode file {}", path.display()))?;
    info!("{} postcodes read", postcodes.len());
    Ok((postcodes, stats))
}

fn parse_coordinate(field: Option<&str>) -> Option<f64> {
    field
        .and_then(|f| f.parse::<f64>().ok())
        .filter(|c| c.is_finite())
}

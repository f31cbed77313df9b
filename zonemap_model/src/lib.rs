pub mod file_format;
mod model;
mod postcode;
mod read;
mod write;
mod zone;
mod zone_map;

pub use model::{SourceStats, ZoneMapMetadata, ZoneMapRun, ZoneMapStats};
pub use postcode::{
    format_uk_postcode, is_likely_postcode, normalise_postcode_no_space, ClassifiedPostcode,
    PostcodeRecord,
};
pub use read::{read_rows_from_file, read_zone_map_from_file};
pub use write::{to_csv, write_zone_map, HEADER};
pub use zone::{Coord, KeyResolution, Zone, ZoneIndex};
pub use zone_map::ZoneMap;

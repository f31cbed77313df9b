use crate::postcode::{normalise_postcode_no_space, ClassifiedPostcode};
use crate::read::read_rows_from_file;
use failure::Error;
use log::warn;
use std::collections::BTreeMap;
use std::path::Path;

/// In memory postcode -> zone lookup, as used by the signup availability check.
///
/// Postcodes are indexed without spaces, so any casing or spacing
/// of a postcode finds its row.
#[derive(Debug, Default)]
pub struct ZoneMap {
    zones: BTreeMap<String, String>,
}

impl ZoneMap {
    /// when a postcode appears more than once, the first row wins
    pub fn from_rows(rows: impl IntoIterator<Item = ClassifiedPostcode>) -> Self {
        let mut zones = BTreeMap::new();
        for row in rows {
            let key = normalise_postcode_no_space(&row.postcode);
            if let Some(existing) = zones.get(&key) {
                if existing != &row.zone_key {
                    warn!(
                        "postcode {} is in zone '{}', ignoring the duplicate in zone '{}'",
                        row.postcode, existing, row.zone_key
                    );
                }
                continue;
            }
            zones.insert(key, row.zone_key);
        }
        ZoneMap { zones }
    }

    pub fn load(input: impl AsRef<Path>) -> Result<Self, Error> {
        let rows = read_rows_from_file(input)?.collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_rows(rows))
    }

    /// The zone serving a postcode, `None` if the postcode is unknown
    /// or outside every zone
    pub fn zone_for(&self, postcode: &str) -> Option<&str> {
        self.zones
            .get(&normalise_postcode_no_space(postcode))
            .map(|z| z.as_str())
            .filter(|z| !z.is_empty())
    }

    pub fn contains_postcode(&self, postcode: &str) -> bool {
        self.zones
            .contains_key(&normalise_postcode_no_space(postcode))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

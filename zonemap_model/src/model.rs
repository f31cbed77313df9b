use crate::postcode::ClassifiedPostcode;
use std::collections::BTreeMap;
use std::fmt;

/// The lookup table built for one postcode prefix
#[derive(Debug, Clone, Default)]
pub struct ZoneMapRun {
    pub rows: Vec<ClassifiedPostcode>,
    pub meta: ZoneMapMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct ZoneMapMetadata {
    pub zones_filename: String,
    pub codepoint_filename: String,
    pub prefix: String,
    pub source_stats: SourceStats,
    pub stats: ZoneMapStats,
}

/// What happened to the rows of the postcode source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceStats {
    pub rows_read: usize,
    pub malformed_rows: usize,
    pub outside_prefix: usize,
    pub invalid_coordinates: usize,
    pub retained: usize,
}

impl SourceStats {
    /// rows lost before classification, for a reason other than the prefix filter
    pub fn dropped(&self) -> usize {
        self.malformed_rows + self.invalid_coordinates
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneMapStats {
    pub rows_processed: usize,
    pub unmatched: usize,
    pub zone_counts: BTreeMap<String, u64>,
}

impl ZoneMapStats {
    pub fn process(&mut self, row: &ClassifiedPostcode) {
        self.rows_processed += 1;
        if row.is_unmatched() {
            self.unmatched += 1;
        } else {
            let count = self.zone_counts.entry(row.zone_key.clone()).or_insert(0);
            *count += 1;
        }
    }
}

impl<'a> std::iter::FromIterator<&'a ClassifiedPostcode> for ZoneMapStats {
    fn from_iter<I: IntoIterator<Item = &'a ClassifiedPostcode>>(rows: I) -> Self {
        let mut stats = ZoneMapStats::default();
        for r in rows {
            stats.process(r);
        }
        stats
    }
}

impl fmt::Display for SourceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source rows read: {}", self.rows_read)?;
        writeln!(f, "    {} malformed", self.malformed_rows)?;
        writeln!(f, "    {} outside the prefix", self.outside_prefix)?;
        writeln!(f, "    {} with invalid coordinates", self.invalid_coordinates)?;
        writeln!(f, "    {} retained", self.retained)
    }
}

impl fmt::Display for ZoneMapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, count) in &self.zone_counts {
            writeln!(f, "Zone {}: {} postcodes", key, count)?;
        }
        writeln!(f, "Unmatched: {} postcodes", self.unmatched)
    }
}

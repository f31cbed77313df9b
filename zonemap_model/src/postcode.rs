use serde_derive::{Deserialize, Serialize};

/// A postcode as read from the national reference dataset,
/// with its British National Grid coordinates (metres).
#[derive(Debug, Clone, PartialEq)]
pub struct PostcodeRecord {
    pub postcode: String,
    pub easting: f64,
    pub northing: f64,
}

/// A row of the postcode to zone lookup table.
///
/// `zone_key` is empty when the postcode lies outside every zone.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassifiedPostcode {
    pub postcode: String,
    pub zone_key: String,
    #[serde(serialize_with = "serialize_as_fixed_6")]
    pub lat: f64,
    #[serde(serialize_with = "serialize_as_fixed_6")]
    pub lng: f64,
}

impl ClassifiedPostcode {
    pub fn is_unmatched(&self) -> bool {
        self.zone_key.is_empty()
    }
}

fn serialize_as_fixed_6<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{:.6}", value))
}

/// Remove every whitespace and uppercase the postcode: " la3 2fw" -> "LA32FW"
pub fn normalise_postcode_no_space(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Canonical display form of a UK postcode.
///
/// The last three characters are the inward code and are separated
/// by a single space from the outward code: "la32fw" -> "LA3 2FW".
/// Codes of three characters or less are returned without space.
pub fn format_uk_postcode(postcode: &str) -> String {
    let pc: Vec<char> = normalise_postcode_no_space(postcode).chars().collect();
    if pc.len() <= 3 {
        return pc.into_iter().collect();
    }
    let (outward, inward) = pc.split_at(pc.len() - 3);
    format!(
        "{} {}",
        outward.iter().collect::<String>(),
        inward.iter().collect::<String>()
    )
}

/// A full UK postcode has between 5 and 8 characters once the spaces are removed.
pub fn is_likely_postcode(postcode: &str) -> bool {
    let len = normalise_postcode_no_space(postcode).chars().count();
    len >= 5 && len <= 8
}

use std::path::Path;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum OutputFormat {
    Csv,
    CsvGz,
}

impl OutputFormat {
    /// A name ending with `.gz` is gzipped csv, any other name is plain csv
    pub fn from_filename(filename: impl AsRef<Path>) -> OutputFormat {
        let is_gz = filename
            .as_ref()
            .file_name()
            .and_then(|f| f.to_str())
            .map_or(false, |f| f.to_lowercase().ends_with(".gz"));
        if is_gz {
            OutputFormat::CsvGz
        } else {
            OutputFormat::Csv
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            OutputFormat::from_filename("data/la3-2-zone-map.csv"),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_filename("out/map.CSV.GZ"),
            OutputFormat::CsvGz
        );
        assert_eq!(OutputFormat::from_filename("out/map.gz"), OutputFormat::CsvGz);
    }

    #[test]
    fn any_other_name_is_plain_csv() {
        for name in &["map.txt", "la3.tsv", "out/zone-map", "gz/map", "map.gzip"] {
            assert_eq!(OutputFormat::from_filename(name), OutputFormat::Csv, "{}", name);
        }
    }
}

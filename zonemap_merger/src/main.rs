use std::collections::BTreeMap;
use std::path::PathBuf;
use structopt::StructOpt;
use zonemap_model::{
    normalise_postcode_no_space, read_rows_from_file, write_zone_map, ClassifiedPostcode,
};

#[derive(StructOpt, Debug)]
struct Args {
    /// Zone map files to merge, the first file wins when a postcode is in several files
    #[structopt(name = "FILE", parse(from_os_str))]
    files: Vec<PathBuf>,
    /// output file name
    #[structopt(
        short = "o",
        long = "output",
        parse(from_os_str),
        help = r#"Output file name. It is gzipped if its name ends with '.gz'
    Missing parent directories are created
    "#
    )]
    output: PathBuf,
}

/// Keeps the first row of each postcode
#[derive(Default)]
struct ZoneMapMerger {
    seen: BTreeMap<String, String>,
    nb_duplicates: usize,
}

impl ZoneMapMerger {
    fn merge_zone_maps(
        &mut self,
        files: &[PathBuf],
    ) -> Result<Vec<ClassifiedPostcode>, failure::Error> {
        let mut rows = vec![];
        for f in files {
            let before = rows.len();
            self.read_zone_map(f, &mut rows)?;
            log::info!("{} rows taken from {}", rows.len() - before, f.display());
        }
        Ok(rows)
    }

    fn read_zone_map(
        &mut self,
        file: &PathBuf,
        rows: &mut Vec<ClassifiedPostcode>,
    ) -> Result<(), failure::Error> {
        for row in read_rows_from_file(file)? {
            let row = row?;
            if self.keep(&row) {
                rows.push(row);
            }
        }
        Ok(())
    }

    fn keep(&mut self, row: &ClassifiedPostcode) -> bool {
        let postcode = normalise_postcode_no_space(&row.postcode);
        if let Some(zone_key) = self.seen.get(&postcode) {
            if zone_key != &row.zone_key {
                log::warn!(
                    "postcode {} already assigned to '{}', '{}' ignored",
                    row.postcode,
                    zone_key,
                    row.zone_key
                );
            }
            self.nb_duplicates += 1;
            return false;
        }
        self.seen.insert(postcode, row.zone_key.clone());
        true
    }
}

fn merge_zone_maps(args: Args) -> Result<(), failure::Error> {
    let mut merger = ZoneMapMerger::default();

    let rows = merger.merge_zone_maps(&args.files)?;
    let nb_rows = write_zone_map(&args.output, &rows)?;
    log::info!(
        "{} rows written to {}, {} duplicated postcodes skipped",
        nb_rows,
        args.output.display(),
        merger.nb_duplicates
    );
    Ok(())
}

fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.filter(None, log::LevelFilter::Info);
    if let Ok(s) = std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    }
    builder.init();
}

fn main() {
    init_logger();
    let args = Args::from_args();
    if let Err(e) = merge_zone_maps(args) {
        log::error!("impossible to merge zone maps: {:?}", e);
        e.iter_chain().for_each(|c| {
            log::error!("{}", c);
            if let Some(b) = c.backtrace() {
                log::error!("  - {}", b);
            }
        });
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let la32 = dir.path().join("la32.csv");
        let la3 = dir.path().join("la3.csv");
        std::fs::write(
            &la32,
            "postcode,zone_key,lat,lng\nLA3 2FW,Z1,54.014270,-2.947649\nLA3 2ZZ,,54.050903,-2.856836\n",
        )
        .unwrap();
        std::fs::write(
            &la3,
            "postcode,zone_key,lat,lng\nLA32FW,Z2,54.014270,-2.947649\nLA3 1AA,Z2,54.060000,-2.880000\n",
        )
        .unwrap();

        let mut merger = ZoneMapMerger::default();
        let rows = merger.merge_zone_maps(&[la32, la3]).unwrap();
        let merged: Vec<_> = rows
            .iter()
            .map(|r| (r.postcode.as_str(), r.zone_key.as_str()))
            .collect();
        assert_eq!(
            merged,
            vec![("LA3 2FW", "Z1"), ("LA3 2ZZ", ""), ("LA3 1AA", "Z2")]
        );
        assert_eq!(merger.nb_duplicates, 1);
    }

    #[test]
    fn merged_map_is_written_in_a_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let la32 = dir.path().join("la32.csv.gz");
        write_zone_map(
            &la32,
            &[ClassifiedPostcode {
                postcode: "LA3 2FW".into(),
                zone_key: "Z1".into(),
                lat: 54.0142698373462,
                lng: -2.947648567380484,
            }],
        )
        .unwrap();
        let output = dir.path().join("merged/lancaster/zone-map.csv.gz");

        merge_zone_maps(Args {
            files: vec![la32],
            output: output.clone(),
        })
        .unwrap();

        let rows = zonemap_model::read_zone_map_from_file(&output).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].zone_key, "Z1");
    }

    #[test]
    fn unreadable_file() {
        let mut merger = ZoneMapMerger::default();
        assert!(merger
            .merge_zone_maps(&[PathBuf::from("/nonexistent/map.csv")])
            .is_err());
    }
}

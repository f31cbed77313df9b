#[macro_use]
extern crate log;
use failure::Error;
use std::path::PathBuf;
use structopt::StructOpt;
use zonemap::{build_zone_map, write_zone_map};

#[derive(StructOpt, Debug)]
#[structopt(name = "zonemap", about = "Assign the postcodes of a prefix to service zones")]
struct Args {
    /// GeoJSON file of the zones
    #[structopt(
        long = "zones",
        default_value = "data/mossgate-zones.geojson",
        parse(from_os_str)
    )]
    zones: PathBuf,
    /// Code-Point Open csv file (headerless, may be gzipped)
    #[structopt(long = "codepoint", default_value = "data/LA.csv", parse(from_os_str))]
    codepoint: PathBuf,
    /// Postcode prefix, case and spaces are ignored
    #[structopt(long = "prefix", default_value = "LA32")]
    prefix: String,
    #[structopt(
        long = "out",
        default_value = "data/la3-2-zone-map.csv",
        parse(from_os_str),
        help = r#"Output file name. It is gzipped if its name ends with '.gz'
Missing parent directories are created
"#
    )]
    out: PathBuf,
    #[structopt(help = "Do not display the stats", long = "no-stats")]
    no_stats: bool,
}

fn zonemap(args: Args) -> Result<(), Error> {
    let run = build_zone_map(&args.zones, &args.codepoint, &args.prefix)?;

    info!("writing the output file {}", args.out.display());
    let nb_rows = write_zone_map(&args.out, &run.rows)?;

    println!("Rows processed: {}", nb_rows);
    println!(
        "Unmatched (outside all polygons): {}",
        run.meta.stats.unmatched
    );
    println!("Dropped source rows: {}", run.meta.source_stats.dropped());
    println!("Output written to: {}", args.out.display());

    if !args.no_stats {
        info!(
            "Statistics for {} with {} (prefix {}):\n{}{}",
            run.meta.codepoint_filename,
            run.meta.zones_filename,
            run.meta.prefix,
            run.meta.source_stats,
            run.meta.stats
        );
    }
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
    if let Err(e) = zonemap(args) {
        error!("zonemap in error! {:?}", e);
        e.iter_chain().for_each(|c| {
            error!("{}", c);
            if let Some(b) = c.backtrace() {
                error!("  - {}", b);
            }
        });

        std::process::exit(1);
    }
}

use crate::file_format::OutputFormat;
use crate::postcode::ClassifiedPostcode;
use failure::{Error, ResultExt};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const HEADER: [&str; 4] = ["postcode", "zone_key", "lat", "lng"];

/// Write the header and the rows as csv, returns the writer and the number of rows written
pub fn to_csv<'a, W: Write>(
    writer: W,
    rows: impl IntoIterator<Item = &'a ClassifiedPostcode>,
) -> Result<(W, usize), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(&HEADER)?;
    let mut nb_rows = 0;
    for row in rows {
        wtr.serialize(row)?;
        nb_rows += 1;
    }
    let writer = wtr
        .into_inner()
        .map_err(|e| failure::err_msg(format!("impossible to flush csv: {}", e.error())))?;
    Ok((writer, nb_rows))
}

/// Write a zone map to a file, gzipped if its name ends with `.gz`.
///
/// Missing parent directories are created.
pub fn write_zone_map<'a>(
    output_file: impl AsRef<Path>,
    rows: impl IntoIterator<Item = &'a ClassifiedPostcode>,
) -> Result<usize, Error> {
    let output_file = output_file.as_ref();
    let format = OutputFormat::from_filename(output_file);
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|_| format!("impossible to create directory {}", parent.display()))?;
        }
    }
    let file = File::create(output_file)
        .with_context(|_| format!("impossible to create {}", output_file.display()))?;
    let stream = BufWriter::new(file);
    let nb_rows = match format {
        OutputFormat::Csv => {
            let (mut stream, nb_rows) = to_csv(stream, rows)?;
            stream.flush()?;
            nb_rows
        }
        OutputFormat::CsvGz => {
            let e = GzEncoder::new(stream, Compression::default());
            let (e, nb_rows) = to_csv(e, rows)?;
            e.finish()?.flush()?;
            nb_rows
        }
    };
    Ok(nb_rows)
}

use crate::file_format::OutputFormat;
use crate::postcode::ClassifiedPostcode;
use failure::Error;
use std::path::Path;

// Stream the rows of a zone map from a Reader
fn read_rows(
    reader: impl std::io::Read + 'static,
) -> impl std::iter::Iterator<Item = Result<ClassifiedPostcode, Error>> {
    csv::Reader::from_reader(reader)
        .into_deserialize()
        .map(|r| r.map_err(Error::from))
}

/// Return an iterator on the rows of a zone map file.
/// The file is streamed, gzipped files are decompressed on the fly.
pub fn read_rows_from_file(
    input: impl AsRef<Path>,
) -> Result<Box<dyn std::iter::Iterator<Item = Result<ClassifiedPostcode, Error>>>, Error> {
    let format = OutputFormat::from_filename(input.as_ref());
    let f = std::fs::File::open(input.as_ref())?;
    let f = std::io::BufReader::new(f);
    match format {
        OutputFormat::Csv => Ok(Box::new(read_rows(f))),
        OutputFormat::CsvGz => {
            let r = flate2::bufread::GzDecoder::new(f);
            Ok(Box::new(read_rows(r)))
        }
    }
}

/// Load all the rows of a zone map file
pub fn read_zone_map_from_file(input: impl AsRef<Path>) -> Result<Vec<ClassifiedPostcode>, Error> {
    read_rows_from_file(input)?.collect()
}

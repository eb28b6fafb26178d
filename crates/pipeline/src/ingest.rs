//! Input table ingestion: header skip, name column extraction, counting.

use std::io::Read;
use std::path::Path;

use crate::error::PipelineError;
use crate::model::NameTally;

/// Read the input table as text.
///
/// Tries UTF-8 first and falls back to Windows-1252, which is what
/// spreadsheet exports usually are when they are not UTF-8. A leading
/// byte-order mark is dropped.
pub fn read_table(path: &Path) -> Result<String, PipelineError> {
    let read_err = |e: std::io::Error| PipelineError::InputRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Collect the names in column `name_column` (zero-based) of every data row.
///
/// Every line is one record split on plain commas; quote characters are
/// ordinary data. The first record is the header and is discarded. Rows
/// with too few fields are skipped without comment.
pub fn ingest(text: &str, name_column: usize) -> NameTally {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut tally = NameTally::new();
    for record in reader.records().skip(1) {
        let Ok(record) = record else { continue };
        if let Some(name) = record.get(name_column) {
            tally.record(name);
        }
    }
    tally
}

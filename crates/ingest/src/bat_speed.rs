use crate::error::IngestError;
use crate::numeric::cell;
use core_types::SwingRecord;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Lines of device metadata that precede the column header.
pub const METADATA_LINES: usize = 8;

pub const BAT_SPEED_COLUMN: usize = 7;
pub const ATTACK_ANGLE_COLUMN: usize = 10;
pub const TIME_TO_CONTACT_COLUMN: usize = 15;

const FILE_KIND: &str = "bat speed";

/// Opens and parses a bat-speed sensor export.
pub fn read_bat_speed_file(path: impl AsRef<Path>) -> Result<Vec<SwingRecord>, IngestError> {
    let file = File::open(path.as_ref())?;
    parse_bat_speed(file)
}

/// Parses a bat-speed export: 8 metadata lines, a header line, then one swing per row.
pub fn parse_bat_speed<R: Read>(reader: R) -> Result<Vec<SwingRecord>, IngestError> {
    let mut reader = BufReader::new(reader);
    let mut skipped = String::new();
    for _ in 0..METADATA_LINES {
        skipped.clear();
        if reader.read_line(&mut skipped)? == 0 {
            break;
        }
    }

    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns = csv_reader.headers()?.len();
    if columns <= TIME_TO_CONTACT_COLUMN {
        return Err(IngestError::MalformedInput {
            file: FILE_KIND,
            reason: format!(
                "expected at least {} columns after the metadata header, found {columns}",
                TIME_TO_CONTACT_COLUMN + 1
            ),
        });
    }

    let mut swings = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        swings.push(SwingRecord::new(
            cell(&record, BAT_SPEED_COLUMN),
            cell(&record, ATTACK_ANGLE_COLUMN),
            cell(&record, TIME_TO_CONTACT_COLUMN),
        ));
    }

    tracing::info!(rows = swings.len(), "Parsed bat-speed export.");
    Ok(swings)
}

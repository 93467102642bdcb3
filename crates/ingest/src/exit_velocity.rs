use crate::error::IngestError;
use crate::numeric::cell;
use core_types::{BattedBallRecord, ZoneCode};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ZONE_COLUMN: usize = 5;
pub const EXIT_VELOCITY_COLUMN: usize = 7;
pub const LAUNCH_ANGLE_COLUMN: usize = 8;
pub const DISTANCE_COLUMN: usize = 9;

const FILE_KIND: &str = "exit velocity";

/// Opens and parses an exit-velocity sensor export.
pub fn read_exit_velocity_file(
    path: impl AsRef<Path>,
) -> Result<Vec<BattedBallRecord>, IngestError> {
    let file = File::open(path.as_ref())?;
    parse_exit_velocity(file)
}

/// Parses an exit-velocity export: a header line, then one batted ball per row.
///
/// The header must have more than 9 columns. Zero velocities are kept here;
/// filtering them is the engine's job.
pub fn parse_exit_velocity<R: Read>(reader: R) -> Result<Vec<BattedBallRecord>, IngestError> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns = csv_reader.headers()?.len();
    if columns <= DISTANCE_COLUMN {
        return Err(IngestError::MalformedInput {
            file: FILE_KIND,
            reason: format!(
                "expected more than {DISTANCE_COLUMN} columns (zone, EV, LA, distance), found {columns}"
            ),
        });
    }

    let mut balls = Vec::new();
    let mut unknown_zones = 0usize;
    for result in csv_reader.records() {
        let record = result?;
        let zone = cell(&record, ZONE_COLUMN).and_then(ZoneCode::from_cell);
        if zone.is_none() {
            unknown_zones += 1;
        }
        balls.push(BattedBallRecord::new(
            zone,
            cell(&record, EXIT_VELOCITY_COLUMN),
            cell(&record, LAUNCH_ANGLE_COLUMN),
            cell(&record, DISTANCE_COLUMN),
        ));
    }

    if unknown_zones > 0 {
        tracing::warn!(rows = unknown_zones, "Rows without a recognised strike zone.");
    }
    tracing::info!(rows = balls.len(), "Parsed exit-velocity export.");
    Ok(balls)
}

//! Readers for the two sensor exports.
//!
//! Both readers are lenient about cell contents (anything non-numeric is a
//! missing value) and strict about shape (a file without the expected
//! columns is `MalformedInput`).

pub mod bat_speed;
pub mod error;
pub mod exit_velocity;
mod numeric;

pub use bat_speed::{parse_bat_speed, read_bat_speed_file};
pub use error::IngestError;
pub use exit_velocity::{parse_exit_velocity, read_exit_velocity_file};

use crate::enums::ZoneMetric;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the 13 strike-zone regions reported by the exit-velocity sensor.
///
/// Zones 1-9 form the 3x3 in-zone grid, 10-13 are the chase cells above and
/// below the outer columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZoneCode(u8);

impl ZoneCode {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 13;

    pub fn new(code: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&code) {
            Ok(Self(code))
        } else {
            Err(CoreError::InvalidInput(
                "zone code".to_string(),
                format!("{code} is outside {}..={}", Self::MIN, Self::MAX),
            ))
        }
    }

    /// Interprets a numeric spreadsheet cell as a zone code.
    ///
    /// Exports sometimes store the zone as a float (`5.0`); anything that is
    /// not an integral value in range yields `None`.
    pub fn from_cell(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        if value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return None;
        }
        Self::new(value as u8).ok()
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ZoneCode {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoneCode> for u8 {
    fn from(zone: ZoneCode) -> Self {
        zone.0
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Placement of the zones on the 5x3 heatmap grid, top row first.
/// `None` marks the two blank cells between the chase zones.
pub const GRID_LAYOUT: [[Option<u8>; 3]; 5] = [
    [Some(10), None, Some(11)],
    [Some(1), Some(2), Some(3)],
    [Some(4), Some(5), Some(6)],
    [Some(7), Some(8), Some(9)],
    [Some(12), None, Some(13)],
];

/// A per-zone scalar used to color the strike-zone heatmap.
///
/// Zones without qualifying balls are absent from the map; they mean
/// "no data", which is different from a low value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAggregate {
    pub metric: ZoneMetric,
    values: BTreeMap<ZoneCode, f64>,
}

impl ZoneAggregate {
    pub fn new(metric: ZoneMetric, values: BTreeMap<ZoneCode, f64>) -> Self {
        Self { metric, values }
    }

    pub fn get(&self, zone: ZoneCode) -> Option<f64> {
        self.values.get(&zone).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Zones in ascending code order with their value.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneCode, f64)> + '_ {
        self.values.iter().map(|(zone, value)| (*zone, *value))
    }

    pub fn min(&self) -> Option<f64> {
        self.values.values().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.values().copied().reduce(f64::max)
    }

    /// Min-max normalized value of a zone in `[0, 1]`.
    ///
    /// When every present zone shares the same value the range collapses and
    /// all of them normalize to 0, i.e. the minimum.
    pub fn normalized(&self, zone: ZoneCode) -> Option<f64> {
        let value = self.get(zone)?;
        let (min, max) = (self.min()?, self.max()?);
        if max > min {
            Some((value - min) / (max - min))
        } else {
            Some(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(code: u8) -> ZoneCode {
        ZoneCode::new(code).unwrap()
    }

    #[test]
    fn zone_code_accepts_only_thirteen_regions() {
        assert!(ZoneCode::new(0).is_err());
        assert!(ZoneCode::new(14).is_err());
        assert!((1..=13).all(|code| ZoneCode::new(code).is_ok()));
    }

    #[test]
    fn zone_code_from_float_cells() {
        assert_eq!(ZoneCode::from_cell(5.0), Some(zone(5)));
        assert_eq!(ZoneCode::from_cell(5.5), None);
        assert_eq!(ZoneCode::from_cell(-1.0), None);
        assert_eq!(ZoneCode::from_cell(f64::NAN), None);
        assert_eq!(ZoneCode::from_cell(300.0), None);
    }

    #[test]
    fn layout_places_every_zone_once() {
        let mut seen: Vec<u8> = GRID_LAYOUT.iter().flatten().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=13).collect::<Vec<u8>>());
    }

    #[test]
    fn normalization_spans_min_to_max() {
        let values = BTreeMap::from([(zone(1), 60.0), (zone(2), 70.0), (zone(3), 80.0)]);
        let aggregate = ZoneAggregate::new(ZoneMetric::MeanExitVelocity, values);

        assert_eq!(aggregate.normalized(zone(1)), Some(0.0));
        assert_eq!(aggregate.normalized(zone(2)), Some(0.5));
        assert_eq!(aggregate.normalized(zone(3)), Some(1.0));
        assert_eq!(aggregate.normalized(zone(4)), None);
    }

    #[test]
    fn flat_values_normalize_to_minimum() {
        let values = BTreeMap::from([(zone(7), 72.0), (zone(12), 72.0)]);
        let aggregate = ZoneAggregate::new(ZoneMetric::MeanExitVelocity, values);

        assert_eq!(aggregate.normalized(zone(7)), Some(0.0));
        assert_eq!(aggregate.normalized(zone(12)), Some(0.0));
    }
}

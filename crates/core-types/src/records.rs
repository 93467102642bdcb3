use crate::zone::ZoneCode;
use serde::{Deserialize, Serialize};

/// One swing from the bat-speed sensor export.
///
/// Every measurement is optional: a cell that is empty or not numeric is
/// "missing" and is left out of every aggregate instead of counting as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SwingRecord {
    pub bat_speed: Option<f64>,
    pub attack_angle: Option<f64>,
    pub time_to_contact: Option<f64>,
}

impl SwingRecord {
    pub fn new(bat_speed: Option<f64>, attack_angle: Option<f64>, time_to_contact: Option<f64>) -> Self {
        Self {
            bat_speed,
            attack_angle,
            time_to_contact,
        }
    }
}

/// One batted ball from the exit-velocity sensor export.
///
/// The sensor writes an exit velocity of zero when no contact was detected,
/// so `has_contact` is the gate for every EV-derived statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BattedBallRecord {
    pub zone: Option<ZoneCode>,
    pub exit_velocity: Option<f64>,
    pub launch_angle: Option<f64>,
    pub distance: Option<f64>,
}

impl BattedBallRecord {
    pub fn new(
        zone: Option<ZoneCode>,
        exit_velocity: Option<f64>,
        launch_angle: Option<f64>,
        distance: Option<f64>,
    ) -> Self {
        Self {
            zone,
            exit_velocity,
            launch_angle,
            distance,
        }
    }

    /// Returns the exit velocity only when it is a real measurement (> 0).
    pub fn contact_velocity(&self) -> Option<f64> {
        self.exit_velocity.filter(|ev| *ev > 0.0)
    }

    pub fn has_contact(&self) -> bool {
        self.contact_velocity().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_missing_velocity_are_not_contact() {
        let zero = BattedBallRecord::new(None, Some(0.0), Some(15.0), None);
        let missing = BattedBallRecord::new(None, None, Some(15.0), None);
        let negative = BattedBallRecord::new(None, Some(-2.0), None, None);
        let hit = BattedBallRecord::new(None, Some(71.5), None, None);

        assert!(!zero.has_contact());
        assert!(!missing.has_contact());
        assert!(!negative.has_contact());
        assert_eq!(hit.contact_velocity(), Some(71.5));
    }
}

use serde::Serialize;

use crate::processing::level::DB_MIN;

/// Real-time metering output, fully replaced on every metering tick.
///
/// Single writer (the metering loop); everything else reads a copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelReading {
    /// Perceptually normalized level in [0, 1].
    pub level: f32,

    /// Decibels relative to full scale, floored at the configured minimum.
    pub db: f32,

    /// Peak-hold envelope in [0, 1], non-increasing between loud events.
    pub peak: f32,
}

impl LevelReading {
    /// The zero/floor reading shown while no session is active.
    pub fn silence(db_floor: f32) -> Self {
        Self {
            level: 0.0,
            db: db_floor,
            peak: 0.0,
        }
    }

    /// Needle rotation for a VU dial sweeping -120°..+120°.
    pub fn needle_degrees(&self) -> f32 {
        -120.0 + 240.0 * self.level
    }

    pub fn level_percent(&self) -> f32 {
        self.level * 100.0
    }

    pub fn peak_percent(&self) -> f32 {
        self.peak * 100.0
    }

    /// dB value rounded to the nearest integer for the status readout.
    pub fn db_rounded(&self) -> i32 {
        self.db.round() as i32
    }
}

impl Default for LevelReading {
    fn default() -> Self {
        Self::silence(DB_MIN)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn default_is_floor_silence() {
        let reading = LevelReading::default();
        assert_eq!(reading.level, 0.0);
        assert_eq!(reading.peak, 0.0);
        assert_eq!(reading.db, DB_MIN);
    }

    #[test]
    fn needle_sweeps_the_dial() {
        let mut reading = LevelReading::default();
        assert_relative_eq!(reading.needle_degrees(), -120.0);

        reading.level = 0.5;
        assert_relative_eq!(reading.needle_degrees(), 0.0);

        reading.level = 1.0;
        assert_relative_eq!(reading.needle_degrees(), 120.0);
    }

    #[test]
    fn percentages_scale_linearly() {
        let reading = LevelReading {
            level: 0.25,
            db: -30.0,
            peak: 0.75,
        };
        assert_relative_eq!(reading.level_percent(), 25.0);
        assert_relative_eq!(reading.peak_percent(), 75.0);
    }

    #[test]
    fn db_rounds_to_nearest_integer() {
        let reading = LevelReading {
            level: 0.5,
            db: -29.6,
            peak: 0.0,
        };
        assert_eq!(reading.db_rounded(), -30);
    }
}

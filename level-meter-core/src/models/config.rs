use std::time::Duration;

use crate::processing::level::{DB_MAX, DB_MIN};

/// Capture request parameters forwarded to the platform boundary.
///
/// All input processing is disabled by default so the meter measures raw
/// levels, not an echo-cancelled or gain-ridden signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub echo_cancellation: bool,
    pub noise_suppression: bool,
    pub auto_gain_control: bool,

    /// Specific input device ID, or None for the system default.
    pub device_id: Option<String>,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            echo_cancellation: false,
            noise_suppression: false,
            auto_gain_control: false,
            device_id: None,
        }
    }
}

/// Configuration for a metering session.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterConfig {
    /// Samples per analysis window (default: 1024).
    pub window_size: usize,

    /// Exponential averaging factor of the analysis primitive
    /// (default: 0.22). Shapes spectral reads inside the platform
    /// primitive only; time-domain snapshots stay raw.
    pub smoothing_time_constant: f32,

    /// Lower bound of the displayed dBFS range (default: -60).
    pub db_floor: f32,

    /// Upper bound of the displayed dBFS range (default: 0, full scale).
    pub db_ceiling: f32,

    /// Peak decay factor applied once per metering tick (default: 0.92).
    pub frame_peak_decay: f32,

    /// Peak decay factor applied by the independent ticker (default: 0.6).
    pub ticker_peak_decay: f32,

    /// Metering loop period (default: ~16.7 ms, one 60 Hz display tick).
    pub frame_period: Duration,

    /// Peak decay ticker period (default: 250 ms).
    pub ticker_period: Duration,

    /// Capture constraints handed to the capture source.
    pub constraints: CaptureConstraints,
}

impl MeterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.window_size == 0 {
            return Err("window size must be positive".into());
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(format!(
                "smoothing time constant out of range: {}",
                self.smoothing_time_constant
            ));
        }
        if self.db_floor >= self.db_ceiling {
            return Err("dB floor must be below the ceiling".into());
        }
        if self.db_ceiling > 0.0 {
            return Err("dB ceiling cannot exceed full scale".into());
        }
        for decay in [self.frame_peak_decay, self.ticker_peak_decay] {
            if !(0.0..1.0).contains(&decay) {
                return Err(format!("peak decay factor out of range: {}", decay));
            }
        }
        if self.frame_period.is_zero() || self.ticker_period.is_zero() {
            return Err("loop periods must be nonzero".into());
        }
        Ok(())
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            window_size: 1024,
            smoothing_time_constant: 0.22,
            db_floor: DB_MIN,
            db_ceiling: DB_MAX,
            frame_peak_decay: 0.92,
            ticker_peak_decay: 0.6,
            frame_period: Duration::from_micros(16_667),
            ticker_period: Duration::from_millis(250),
            constraints: CaptureConstraints::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MeterConfig::default().validate().is_ok());
    }

    #[test]
    fn default_constraints_disable_processing() {
        let constraints = CaptureConstraints::default();
        assert!(!constraints.echo_cancellation);
        assert!(!constraints.noise_suppression);
        assert!(!constraints.auto_gain_control);
        assert!(constraints.device_id.is_none());
    }

    #[test]
    fn rejects_zero_window() {
        let config = MeterConfig {
            window_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_db_range() {
        let config = MeterConfig {
            db_floor: 0.0,
            db_ceiling: -60.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_positive_ceiling() {
        let config = MeterConfig {
            db_ceiling: 6.0,
            db_floor: -60.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_decay() {
        let config = MeterConfig {
            frame_peak_decay: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

//! Single-line terminal rendering of the meter state.

use level_meter_core::{LevelReading, MeterState};

/// VU-style status line: bar, dB, percentages, needle angle, state label.
pub struct MeterView {
    bar_length: usize,
}

impl MeterView {
    pub fn new() -> Self {
        Self { bar_length: 40 }
    }

    pub fn render(&self, state: &MeterState, reading: &LevelReading) -> String {
        format!(
            "[{}] {:>4} dB  level {:>3.0}%  peak {:>3.0}%  needle {:>+5.0}°  {}",
            self.bar(reading),
            reading.db_rounded(),
            reading.level_percent(),
            reading.peak_percent(),
            reading.needle_degrees(),
            state.label(),
        )
    }

    /// Filled bar for the live level with a marker at the held peak.
    fn bar(&self, reading: &LevelReading) -> String {
        let filled = (reading.level.clamp(0.0, 1.0) * self.bar_length as f32).round() as usize;
        let peak = (reading.peak.clamp(0.0, 1.0) * self.bar_length as f32).round() as usize;

        let mut bar = String::with_capacity(self.bar_length * 3);
        for i in 0..self.bar_length {
            if i < filled {
                bar.push('█');
            } else if i + 1 == peak {
                bar.push('▌');
            } else {
                bar.push(' ');
            }
        }
        bar
    }
}

impl Default for MeterView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use level_meter_core::DB_MIN;

    use super::*;

    #[test]
    fn silence_renders_an_empty_bar_at_the_floor() {
        let view = MeterView::new();
        let line = view.render(&MeterState::Idle, &LevelReading::silence(DB_MIN));

        assert!(line.contains("-60 dB"));
        assert!(line.contains("level   0%"));
        assert!(line.contains("idle"));
        assert!(!line.contains('█'));
    }

    #[test]
    fn full_scale_fills_the_bar() {
        let view = MeterView::new();
        let reading = LevelReading {
            level: 1.0,
            db: 0.0,
            peak: 1.0,
        };
        let line = view.render(&MeterState::Listening, &reading);

        assert!(line.contains("   0 dB"));
        assert!(line.contains("level 100%"));
        assert!(line.contains("+120°"));
        assert!(line.contains("listening"));
        assert_eq!(line.chars().filter(|&c| c == '█').count(), 40);
    }

    #[test]
    fn peak_marker_sits_beyond_the_live_fill() {
        let view = MeterView::new();
        let reading = LevelReading {
            level: 0.25,
            db: -45.0,
            peak: 0.75,
        };
        let line = view.render(&MeterState::Listening, &reading);

        assert_eq!(line.chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(line.chars().filter(|&c| c == '▌').count(), 1);
    }
}

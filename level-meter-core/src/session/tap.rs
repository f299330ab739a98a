use std::sync::Arc;

use parking_lot::Mutex;

use crate::processing::level::downmix_to_mono;
use crate::processing::snapshot::SnapshotBuffer;
use crate::traits::capture_provider::SampleCallback;

/// Analysis node wired between the capture stream and the metering loop.
///
/// Configured with a fixed transform window and the analysis primitive's
/// exponential smoothing constant. Time-domain snapshots are raw samples;
/// the smoothing constant shapes spectral reads inside the platform
/// primitive only and is carried here so the capture boundary sees the
/// full configuration.
///
/// A tap is created fresh for every session and dropped on teardown,
/// never reused across sessions.
pub struct AnalysisTap {
    window: Arc<Mutex<SnapshotBuffer>>,
    smoothing_time_constant: f32,
}

impl AnalysisTap {
    pub fn new(window_size: usize, smoothing_time_constant: f32) -> Self {
        Self {
            window: Arc::new(Mutex::new(SnapshotBuffer::new(window_size))),
            smoothing_time_constant,
        }
    }

    /// The callback to hand to the capture provider.
    ///
    /// Downmixes interleaved input to mono before feeding the snapshot
    /// window, so the metering loop always sees a single channel.
    pub fn writer(&self) -> SampleCallback {
        let window = Arc::clone(&self.window);
        Arc::new(move |samples: &[f32], _sample_rate: f64, channels: u16| {
            let mono = downmix_to_mono(samples, channels as usize);
            window.lock().write(&mono);
        })
    }

    /// Non-blocking snapshot of the most recent time-domain window.
    pub fn read_time_domain(&self) -> Vec<f32> {
        self.window.lock().snapshot()
    }

    pub fn window_size(&self) -> usize {
        self.window.lock().window_size()
    }

    pub fn smoothing_time_constant(&self) -> f32 {
        self.smoothing_time_constant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_feeds_time_domain_reads() {
        let tap = AnalysisTap::new(4, 0.22);
        let writer = tap.writer();

        writer(&[0.1, 0.2, 0.3, 0.4], 48000.0, 1);
        assert_eq!(tap.read_time_domain(), vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn writer_downmixes_stereo_input() {
        let tap = AnalysisTap::new(2, 0.22);
        let writer = tap.writer();

        writer(&[1.0, 0.0, -0.5, 0.5], 44100.0, 2);
        assert_eq!(tap.read_time_domain(), vec![0.5, 0.0]);
    }

    #[test]
    fn unfilled_window_reads_as_silence() {
        let tap = AnalysisTap::new(1024, 0.22);
        assert_eq!(tap.read_time_domain(), vec![0.0; 1024]);
        assert_eq!(tap.window_size(), 1024);
    }
}

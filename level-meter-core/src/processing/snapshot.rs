/// Fixed-size circular window holding the most recent audio samples.
///
/// The capture callback writes arbitrary-length mono blocks; readers copy
/// out the latest `window_size` samples in chronological order without
/// consuming them. Until the first full window has arrived the missing
/// head reads as silence. Wrap in `Arc<parking_lot::Mutex<_>>` for
/// cross-thread access.
#[derive(Debug)]
pub struct SnapshotBuffer {
    buffer: Vec<f32>,
    write_index: usize,
}

impl SnapshotBuffer {
    pub fn new(window_size: usize) -> Self {
        Self {
            buffer: vec![0.0; window_size],
            write_index: 0,
        }
    }

    /// Overwrite the oldest samples with a new block.
    ///
    /// If `samples` is larger than the window, only the tail is kept.
    pub fn write(&mut self, samples: &[f32]) {
        if samples.is_empty() || self.buffer.is_empty() {
            return;
        }

        let capacity = self.buffer.len();
        let samples = if samples.len() > capacity {
            &samples[samples.len() - capacity..]
        } else {
            samples
        };

        for &sample in samples {
            self.buffer[self.write_index] = sample;
            self.write_index = (self.write_index + 1) % capacity;
        }
    }

    /// Non-blocking copy of the current window, oldest sample first.
    pub fn snapshot(&self) -> Vec<f32> {
        let capacity = self.buffer.len();
        let mut window = Vec::with_capacity(capacity);
        for i in 0..capacity {
            window.push(self.buffer[(self.write_index + i) % capacity]);
        }
        window
    }

    /// Zero the window, as if only silence had been captured.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_index = 0;
    }

    pub fn window_size(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_reads_as_silence() {
        let buf = SnapshotBuffer::new(4);
        assert_eq!(buf.snapshot(), vec![0.0; 4]);
    }

    #[test]
    fn partial_fill_pads_head_with_silence() {
        let mut buf = SnapshotBuffer::new(4);
        buf.write(&[1.0, 2.0]);
        assert_eq!(buf.snapshot(), vec![0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn keeps_latest_window_across_wraparound() {
        let mut buf = SnapshotBuffer::new(4);
        buf.write(&[1.0, 2.0, 3.0]);
        buf.write(&[4.0, 5.0, 6.0]);
        assert_eq!(buf.snapshot(), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn oversized_block_keeps_only_the_tail() {
        let mut buf = SnapshotBuffer::new(3);
        buf.write(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(buf.snapshot(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn snapshot_does_not_consume() {
        let mut buf = SnapshotBuffer::new(2);
        buf.write(&[0.5, -0.5]);
        assert_eq!(buf.snapshot(), buf.snapshot());
    }

    #[test]
    fn reset_returns_to_silence() {
        let mut buf = SnapshotBuffer::new(3);
        buf.write(&[1.0, 2.0, 3.0]);
        buf.reset();
        assert_eq!(buf.snapshot(), vec![0.0; 3]);
        assert_eq!(buf.window_size(), 3);
    }
}

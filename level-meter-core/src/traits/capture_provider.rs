use std::sync::Arc;

use crate::models::config::CaptureConstraints;
use crate::models::device::InputDevice;
use crate::models::error::MeterError;

/// Callback invoked when a block of input samples is available.
///
/// Parameters:
/// - `samples`: Interleaved f32 samples in [-1, 1].
/// - `sample_rate`: The actual sample rate of the delivered audio.
/// - `channels`: Number of interleaved channels (1 = mono).
pub type SampleCallback = Arc<dyn Fn(&[f32], f64, u16) + Send + Sync + 'static>;

/// Interface for platform-specific microphone capture sources.
///
/// Implemented by:
/// - `CpalInputCapture` (level-meter-cpal)
/// - Test doubles in session tests
pub trait CaptureProvider: Send {
    /// Whether a usable input device currently exists.
    fn is_available(&self) -> bool;

    /// Start capturing with the given constraints, delivering sample
    /// blocks via `callback`.
    ///
    /// The callback fires on a dedicated capture thread — keep processing
    /// minimal.
    fn start(
        &mut self,
        constraints: &CaptureConstraints,
        callback: SampleCallback,
    ) -> Result<(), MeterError>;

    /// Stop capturing and release the device.
    ///
    /// Must be idempotent and safe to call on a partially-initialized
    /// source.
    fn stop(&mut self) -> Result<(), MeterError>;

    /// Information about the device backing this source.
    fn device_info(&self) -> InputDevice;
}

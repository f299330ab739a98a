use crate::models::error::MeterError;
use crate::models::reading::LevelReading;
use crate::models::state::MeterState;

/// Event sink for meter session notifications.
///
/// Methods are called from the session's worker threads, not the thread
/// that owns the session. Implementations should marshal to their own
/// display context if needed.
pub trait MeterDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: &MeterState);

    /// Called once per metering tick with the freshly published reading.
    fn on_reading(&self, reading: &LevelReading);

    /// Called when acquiring or running the capture source fails.
    fn on_error(&self, error: &MeterError);
}

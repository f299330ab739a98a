use thiserror::Error;

/// Shown when the platform rejects capture without a usable message.
pub const FALLBACK_ERROR_MESSAGE: &str =
    "Unable to access microphone. Please check your permissions.";

/// Errors that can occur while acquiring or running a capture session.
///
/// Every variant carries the platform's own message text (possibly empty)
/// so the presentation layer can surface it verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeterError {
    /// The user (or platform policy) declined microphone access.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// No usable input device, or the device is busy.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Any other platform capture failure.
    #[error("capture failed: {0}")]
    Unknown(String),
}

impl MeterError {
    /// The platform's message verbatim, or the fixed fallback when the
    /// platform gave none.
    pub fn user_message(&self) -> &str {
        let detail = match self {
            Self::PermissionDenied(msg) | Self::DeviceUnavailable(msg) | Self::Unknown(msg) => msg,
        };
        if detail.is_empty() {
            FALLBACK_ERROR_MESSAGE
        } else {
            detail
        }
    }
}

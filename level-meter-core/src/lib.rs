//! # level-meter-core
//!
//! Platform-agnostic core of a real-time sound level meter.
//!
//! Raw microphone samples come in through a pluggable `CaptureProvider`,
//! an `AnalysisTap` keeps the most recent time-domain window, and a
//! `MeterSession` runs the metering loop that turns each window into a
//! normalized, decaying `LevelReading` (RMS → dBFS → [0,1]) suitable for
//! driving a VU-style display. Platform backends (cpal) implement the
//! `CaptureProvider` trait and plug into the generic session.
//!
//! ## Architecture
//!
//! ```text
//! level-meter-core (this crate)
//! ├── traits/       ← CaptureProvider, MeterDelegate
//! ├── models/       ← MeterState, MeterError, MeterConfig, LevelReading, InputDevice
//! ├── processing/   ← RMS/dBFS math, peak envelope, snapshot window
//! └── session/      ← AnalysisTap, MeterSession (lifecycle orchestrator)
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::{CaptureConstraints, MeterConfig};
pub use models::device::InputDevice;
pub use models::error::{MeterError, FALLBACK_ERROR_MESSAGE};
pub use models::reading::LevelReading;
pub use models::state::MeterState;
pub use processing::envelope::PeakEnvelope;
pub use processing::level::{DB_MAX, DB_MIN, RMS_FLOOR};
pub use processing::snapshot::SnapshotBuffer;
pub use session::meter::MeterSession;
pub use session::tap::AnalysisTap;
pub use traits::capture_provider::{CaptureProvider, SampleCallback};
pub use traits::delegate::MeterDelegate;

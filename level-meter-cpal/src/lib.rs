//! # level-meter-cpal
//!
//! cpal microphone backend for level-meter-core.
//!
//! Provides:
//! - `CpalInputCapture` — microphone capture via the host's default audio API
//! - `list_input_devices` — input device enumeration
//!
//! ## Usage
//! ```ignore
//! use level_meter_core::MeterSession;
//! use level_meter_cpal::CpalInputCapture;
//!
//! let mut session = MeterSession::new(CpalInputCapture::default_device());
//! session.start()?;
//! ```

pub mod devices;
pub mod input;

pub use devices::list_input_devices;
pub use input::CpalInputCapture;

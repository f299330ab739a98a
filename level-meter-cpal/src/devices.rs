//! Input device enumeration via cpal.

use cpal::traits::{DeviceTrait, HostTrait};

use level_meter_core::models::device::InputDevice;
use level_meter_core::models::error::MeterError;

/// List the input devices the host currently exposes.
///
/// The system default device, if any, is flagged; device names double as
/// IDs because cpal has no stable identifier beyond the name.
pub fn list_input_devices() -> Result<Vec<InputDevice>, MeterError> {
    let host = cpal::default_host();
    let default_name = host
        .default_input_device()
        .and_then(|d| d.name().ok());

    let devices = host
        .input_devices()
        .map_err(|e| MeterError::Unknown(e.to_string()))?;

    let mut inputs = Vec::new();
    for device in devices {
        let name = match device.name() {
            Ok(name) => name,
            Err(err) => {
                log::warn!("skipping unnameable input device: {err}");
                continue;
            }
        };
        inputs.push(InputDevice {
            id: name.clone(),
            is_default: default_name.as_deref() == Some(name.as_str()),
            name,
        });
    }
    Ok(inputs)
}

//! cpal microphone capture provider.
//!
//! Opens an input stream on a dedicated capture thread that owns the
//! `cpal::Stream` (the stream handle is not `Send`, so it never leaves
//! that thread). Samples are delivered raw — cpal applies no echo
//! cancellation, noise suppression, or gain control, which is exactly
//! what the metering constraints ask for.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use parking_lot::Mutex;

use level_meter_core::models::config::CaptureConstraints;
use level_meter_core::models::device::InputDevice;
use level_meter_core::models::error::MeterError;
use level_meter_core::traits::capture_provider::{CaptureProvider, SampleCallback};

/// How long `start` waits for the capture thread to finish device setup.
const SETUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Microphone capture via cpal.
///
/// The capture thread polls a run flag every 10 ms and drops the stream
/// (releasing the device) when it clears.
pub struct CpalInputCapture {
    device_id: Option<String>,
    device_name: Arc<Mutex<String>>,
    running: Arc<AtomicBool>,
    capture_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl CpalInputCapture {
    /// Capture from the system default input device.
    pub fn default_device() -> Self {
        Self {
            device_id: None,
            device_name: Arc::new(Mutex::new("Default Microphone".into())),
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: Mutex::new(None),
        }
    }

    /// Capture from a specific input device by name.
    pub fn with_device(id: String) -> Self {
        Self {
            device_name: Arc::new(Mutex::new(id.clone())),
            device_id: Some(id),
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: Mutex::new(None),
        }
    }
}

impl CaptureProvider for CpalInputCapture {
    fn is_available(&self) -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    fn start(
        &mut self,
        constraints: &CaptureConstraints,
        callback: SampleCallback,
    ) -> Result<(), MeterError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(MeterError::Unknown("capture already running".into()));
        }

        if constraints.echo_cancellation || constraints.noise_suppression || constraints.auto_gain_control
        {
            // cpal has no processing toggles; it only ever delivers raw input.
            log::warn!("input processing constraints requested but unsupported; capturing raw");
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let device_name = Arc::clone(&self.device_name);
        let device_id = constraints.device_id.clone().or_else(|| self.device_id.clone());
        let (setup_tx, setup_rx) = mpsc::sync_channel::<Result<(), MeterError>>(1);

        let handle = thread::Builder::new()
            .name("cpal-input".into())
            .spawn(move || {
                match capture_loop(&running, device_id, device_name, callback, &setup_tx) {
                    Ok(()) => {}
                    Err(err) => {
                        log::error!("input capture error: {err}");
                        // If setup already succeeded the receiver is gone.
                        let _ = setup_tx.try_send(Err(err));
                    }
                }
                running.store(false, Ordering::SeqCst);
            })
            .map_err(|e| MeterError::Unknown(format!("failed to spawn capture thread: {e}")))?;

        *self.capture_handle.lock() = Some(handle);

        match setup_rx.recv_timeout(SETUP_TIMEOUT) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                self.stop()?;
                Err(err)
            }
            Err(_) => {
                self.stop()?;
                Err(MeterError::Unknown(
                    "timed out waiting for the capture device".into(),
                ))
            }
        }
    }

    fn stop(&mut self) -> Result<(), MeterError> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_handle.lock().take() {
            let _ = handle.join();
        }
        Ok(())
    }

    fn device_info(&self) -> InputDevice {
        InputDevice {
            id: self.device_id.clone().unwrap_or_else(|| "default-input".into()),
            name: self.device_name.lock().clone(),
            is_default: self.device_id.is_none(),
        }
    }
}

impl Drop for CpalInputCapture {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Main capture loop running on the dedicated thread.
///
/// Sequence:
/// 1. Resolve the input device (default or by name)
/// 2. Query its default input config
/// 3. Build an f32 input stream (converting from i16/u16 formats)
/// 4. Report setup success to `start`, then hold the stream alive
///    until the run flag clears
fn capture_loop(
    running: &AtomicBool,
    device_id: Option<String>,
    device_name: Arc<Mutex<String>>,
    callback: SampleCallback,
    setup_tx: &mpsc::SyncSender<Result<(), MeterError>>,
) -> Result<(), MeterError> {
    let host = cpal::default_host();

    let device = match device_id {
        Some(ref wanted) => find_device_by_name(&host, wanted)?,
        None => host
            .default_input_device()
            .ok_or_else(|| MeterError::DeviceUnavailable("no input device available".into()))?,
    };

    if let Ok(name) = device.name() {
        *device_name.lock() = name;
    }

    let supported = device
        .default_input_config()
        .map_err(|e| classify_platform_error(&e.to_string()))?;
    let sample_format = supported.sample_format();
    let sample_rate = supported.sample_rate().0 as f64;
    let channels = supported.channels();
    let config: cpal::StreamConfig = supported.into();

    let err_fn = |err: cpal::StreamError| {
        log::error!("input stream error: {err}");
    };

    let stream = match sample_format {
        SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                callback(data, sample_rate, channels);
            },
            err_fn,
            None,
        ),
        SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                let samples: Vec<f32> =
                    data.iter().map(|&s| s as f32 / i16::MAX as f32).collect();
                callback(&samples, sample_rate, channels);
            },
            err_fn,
            None,
        ),
        SampleFormat::U16 => device.build_input_stream(
            &config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| {
                let samples: Vec<f32> =
                    data.iter().map(|&s| (s as f32 - 32768.0) / 32768.0).collect();
                callback(&samples, sample_rate, channels);
            },
            err_fn,
            None,
        ),
        other => {
            return Err(MeterError::Unknown(format!(
                "unsupported sample format: {other:?}"
            )))
        }
    }
    .map_err(|e| classify_platform_error(&e.to_string()))?;

    stream
        .play()
        .map_err(|e| classify_platform_error(&e.to_string()))?;

    let _ = setup_tx.try_send(Ok(()));

    // The stream delivers buffers on cpal's own thread; this one just
    // keeps the handle alive until teardown.
    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(10));
    }

    drop(stream);
    Ok(())
}

fn find_device_by_name(host: &cpal::Host, wanted: &str) -> Result<cpal::Device, MeterError> {
    let devices = host
        .input_devices()
        .map_err(|e| classify_platform_error(&e.to_string()))?;
    for device in devices {
        if device.name().map(|n| n == wanted).unwrap_or(false) {
            return Ok(device);
        }
    }
    Err(MeterError::DeviceUnavailable(format!(
        "input device not found: {wanted}"
    )))
}

/// Map a platform error message onto the meter error taxonomy, keeping
/// the message text verbatim for the presentation layer.
fn classify_platform_error(message: &str) -> MeterError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("not allowed") {
        MeterError::PermissionDenied(message.to_string())
    } else if lower.contains("device")
        && (lower.contains("no longer available")
            || lower.contains("not available")
            || lower.contains("in use")
            || lower.contains("busy"))
    {
        MeterError::DeviceUnavailable(message.to_string())
    } else {
        MeterError::Unknown(message.to_string())
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::models::config::MeterConfig;
use crate::models::device::InputDevice;
use crate::models::error::MeterError;
use crate::models::reading::LevelReading;
use crate::models::state::MeterState;
use crate::processing::envelope::PeakEnvelope;
use crate::processing::level::{dbfs, normalize_db, rms};
use crate::session::tap::AnalysisTap;
use crate::traits::capture_provider::CaptureProvider;
use crate::traits::delegate::MeterDelegate;

/// Internal mutable state, protected by `parking_lot::Mutex`.
///
/// The metering loop is the single writer of `reading`; the ticker only
/// touches the peak envelope; everyone else reads copies.
struct SharedState {
    state: MeterState,
    reading: LevelReading,
    peak: PeakEnvelope,
}

impl SharedState {
    fn new(config: &MeterConfig) -> Self {
        Self {
            state: MeterState::Idle,
            reading: LevelReading::silence(config.db_floor),
            peak: PeakEnvelope::new(config.frame_peak_decay),
        }
    }
}

/// Sound level meter session orchestrator.
///
/// Generic over the capture backend via the `CaptureProvider` trait.
/// Owns the whole lifecycle:
/// ```text
/// [CaptureProvider] → [AnalysisTap window] → [metering loop ~60 Hz] → LevelReading
///                                             [peak ticker 250 ms] ──↗
/// ```
///
/// Exactly one capture session is live at a time: `start` fully tears
/// down any prior session before acquiring a new one, and teardown is
/// idempotent and best-effort so it is safe from `stop`, a failed
/// `start`, and `Drop` alike.
pub struct MeterSession<P: CaptureProvider> {
    provider: P,
    config: MeterConfig,
    shared: Arc<Mutex<SharedState>>,
    delegate: Option<Arc<dyn MeterDelegate>>,
    tap: Option<Arc<AnalysisTap>>,

    // Metering loop control
    loop_running: Arc<AtomicBool>,
    loop_handle: Option<thread::JoinHandle<()>>,

    // Peak decay ticker control
    ticker_running: Arc<AtomicBool>,
    ticker_handle: Option<thread::JoinHandle<()>>,
}

impl<P: CaptureProvider> MeterSession<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, MeterConfig::default())
    }

    pub fn with_config(provider: P, config: MeterConfig) -> Self {
        let shared = Arc::new(Mutex::new(SharedState::new(&config)));
        Self {
            provider,
            config,
            shared,
            delegate: None,
            tap: None,
            loop_running: Arc::new(AtomicBool::new(false)),
            loop_handle: None,
            ticker_running: Arc::new(AtomicBool::new(false)),
            ticker_handle: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn MeterDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> MeterState {
        self.shared.lock().state.clone()
    }

    pub fn reading(&self) -> LevelReading {
        self.shared.lock().reading
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    pub fn device_info(&self) -> InputDevice {
        self.provider.device_info()
    }

    /// Begin listening. Transitions: idle/failed → listening.
    ///
    /// Any prior session is fully torn down first, the previous error is
    /// cleared, and the state is set to `Listening` before acquisition.
    /// On acquisition failure the session runs a full teardown, lands in
    /// `Failed` with the platform error, and stays retryable.
    pub fn start(&mut self) -> Result<(), MeterError> {
        self.config.validate().map_err(MeterError::Unknown)?;

        // One live session at a time.
        self.teardown();

        {
            let mut shared = self.shared.lock();
            shared.reading = LevelReading::silence(self.config.db_floor);
            shared.peak.reset();
        }
        self.set_state(MeterState::Listening);

        // The tap is re-created for every session, never reused.
        let tap = Arc::new(AnalysisTap::new(
            self.config.window_size,
            self.config.smoothing_time_constant,
        ));

        if let Err(err) = self.provider.start(&self.config.constraints, tap.writer()) {
            log::error!("capture acquisition failed: {err}");
            self.teardown();
            self.set_state(MeterState::Failed(err.clone()));
            if let Some(ref delegate) = self.delegate {
                delegate.on_error(&err);
            }
            return Err(err);
        }

        log::info!(
            "listening on {} ({} sample window)",
            self.provider.device_info().name,
            self.config.window_size
        );

        self.tap = Some(Arc::clone(&tap));
        self.spawn_metering_loop(tap);
        self.spawn_peak_ticker();
        Ok(())
    }

    /// Stop listening and reset the displayed values to their zero/floor
    /// defaults. Safe to call when nothing is active.
    pub fn stop(&mut self) {
        self.teardown();
        {
            let mut shared = self.shared.lock();
            shared.reading = LevelReading::silence(self.config.db_floor);
            shared.peak.reset();
        }
        self.set_state(MeterState::Idle);
    }

    // --- Internal helpers ---

    fn set_state(&self, new_state: MeterState) {
        {
            let mut shared = self.shared.lock();
            shared.state = new_state.clone();
        }
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&new_state);
        }
    }

    /// Release everything a session holds: stop both loops, join their
    /// threads, release the capture device, drop the tap.
    ///
    /// Idempotent and best-effort — a failure to release one resource is
    /// logged and never prevents releasing the rest.
    fn teardown(&mut self) {
        self.loop_running.store(false, Ordering::SeqCst);
        self.ticker_running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.loop_handle.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.ticker_handle.take() {
            let _ = handle.join();
        }

        if let Err(err) = self.provider.stop() {
            log::warn!("capture source release failed: {err}");
        }

        self.tap = None;
    }

    /// Spawn the ~60 Hz metering loop: read the tap window, compute
    /// RMS → dBFS → normalized level, fold the peak envelope, publish.
    fn spawn_metering_loop(&mut self, tap: Arc<AnalysisTap>) {
        self.loop_running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.loop_running);
        let shared = Arc::clone(&self.shared);
        let delegate = self.delegate.clone();
        let frame_period = self.config.frame_period;
        let db_floor = self.config.db_floor;
        let db_ceiling = self.config.db_ceiling;

        let handle = thread::Builder::new()
            .name("metering-loop".into())
            .spawn(move || {
                while running.load(Ordering::SeqCst) {
                    thread::sleep(frame_period);
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }

                    let window = tap.read_time_domain();
                    let reading = {
                        let mut s = shared.lock();
                        // Teardown has begun: the tick is a no-op.
                        if !s.state.is_listening() {
                            continue;
                        }

                        let db = dbfs(rms(&window));
                        let level = normalize_db(db, db_floor, db_ceiling);
                        let peak = s.peak.update(level);
                        s.reading = LevelReading {
                            level,
                            db: db.max(db_floor),
                            peak,
                        };
                        s.reading
                    };

                    if let Some(ref delegate) = delegate {
                        delegate.on_reading(&reading);
                    }
                }
            })
            .expect("failed to spawn metering thread");

        self.loop_handle = Some(handle);
    }

    /// Spawn the independent 250 ms peak decay ticker.
    fn spawn_peak_ticker(&mut self) {
        self.ticker_running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.ticker_running);
        let shared = Arc::clone(&self.shared);
        let period = self.config.ticker_period;
        let factor = self.config.ticker_peak_decay;

        let handle = thread::Builder::new()
            .name("peak-decay-ticker".into())
            .spawn(move || {
                while running.load(Ordering::SeqCst) {
                    thread::sleep(period);
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }

                    let mut s = shared.lock();
                    if !s.state.is_listening() {
                        continue;
                    }
                    let peak = s.peak.decay(factor);
                    s.reading.peak = peak;
                }
            })
            .expect("failed to spawn peak ticker thread");

        self.ticker_handle = Some(handle);
    }
}

impl<P: CaptureProvider> Drop for MeterSession<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

//! Orientation service facade.
//!
//! `OrientationService` coordinates the tracker, lock-setting observer,
//! lock controller, and observer lifecycle behind one surface, and
//! forwards their change records to the host bridge as named events.
//!
//! # Startup Sequence
//!
//! 1. Tracker event loop starts consuming platform events
//! 2. Lock-setting observer reads the setting and registers its watch
//! 3. The forwarding task subscribes to both and feeds the sink
//!
//! # Example
//!
//! ```ignore
//! use orientbridge::service::{OrientationService, Platform, ServiceConfig};
//!
//! let mut service = OrientationService::new(config, platform);
//! service.start()?;
//! service.set_sink(bridge);
//!
//! // Host lifecycle owner wires these to its own callbacks
//! service.activate();
//! // ...
//! service.deactivate();
//! ```

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::events;
use crate::lifecycle::{LifecycleController, LifecycleState};
use crate::lock::{LockController, LockSettingObserver};
use crate::platform::{
    ActivityProvider, ConfigurationProvider, NotificationSink, SettingsStore, SinkHandle,
};
use crate::tracker::{
    DefaultOrientationTracker, Orientation, OrientationReading, OrientationTracker,
    OrientationTrackerEvents, SensorEvent, SpecificOrientation,
};

use super::config::ServiceConfig;
use super::error::ServiceError;

/// The platform seams a host must provide.
pub struct Platform {
    /// Synchronous configuration reads.
    pub configuration: Arc<dyn ConfigurationProvider>,
    /// The OS auto-rotate setting.
    pub settings: Arc<dyn SettingsStore>,
    /// Foreground activity resolution.
    pub activities: Arc<dyn ActivityProvider>,
}

/// Coordinates orientation tracking and lock control for a host.
pub struct OrientationService {
    initial_orientation: Option<Orientation>,

    configuration: Arc<dyn ConfigurationProvider>,
    tracker: Arc<DefaultOrientationTracker>,
    lock_observer: LockSettingObserver,
    lock_controller: LockController,
    lifecycle: LifecycleController,
    sink: Arc<SinkHandle>,

    /// Sender for platform events; also handed to the activity on
    /// observer registration.
    events_tx: mpsc::UnboundedSender<SensorEvent>,

    /// Receiver side, consumed by `start()`.
    events_rx: Option<mpsc::UnboundedReceiver<SensorEvent>>,

    tracker_handle: Option<JoinHandle<()>>,
    observer_handle: Option<JoinHandle<()>>,
    forward_handle: Option<JoinHandle<()>>,
}

impl OrientationService {
    /// Create a service over the given platform seams.
    ///
    /// Nothing runs until [`start()`](Self::start).
    pub fn new(config: ServiceConfig, platform: Platform) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let tracker = Arc::new(DefaultOrientationTracker::new(config.tracker));
        let lock_observer = LockSettingObserver::new(platform.settings);
        let lock_controller = LockController::new(Arc::clone(&platform.activities));
        let lifecycle = LifecycleController::new(platform.activities, events_tx.clone());

        Self {
            initial_orientation: config.initial_orientation,
            configuration: platform.configuration,
            tracker,
            lock_observer,
            lock_controller,
            lifecycle,
            sink: Arc::new(SinkHandle::new()),
            events_tx,
            events_rx: Some(events_rx),
            tracker_handle: None,
            observer_handle: None,
            forward_handle: None,
        }
    }

    /// Start the tracker loop, the lock-setting observer, and the
    /// notification forwarding task.
    ///
    /// # Errors
    ///
    /// [`ServiceError::SettingsRegistration`] when the settings watch
    /// cannot be registered (surfaced verbatim, not retried), or
    /// [`ServiceError::AlreadyStarted`] on a second call.
    pub fn start(&mut self) -> Result<(), ServiceError> {
        let events_rx = self.events_rx.take().ok_or(ServiceError::AlreadyStarted)?;

        self.tracker_handle = Some(Arc::clone(&self.tracker).start(events_rx));
        self.observer_handle = Some(self.lock_observer.start()?);
        self.forward_handle = Some(self.spawn_forwarder());

        info!(mode = ?self.tracker.mode(), "orientation service started");
        Ok(())
    }

    /// Spawn the task turning broadcast records into named sink events.
    fn spawn_forwarder(&self) -> JoinHandle<()> {
        let mut changes = self.tracker.subscribe_changes();
        let mut lock_changes = self.lock_observer.subscribe();
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            debug!("notification forwarding started");
            loop {
                tokio::select! {
                    change = changes.recv() => match change {
                        Ok(change) => {
                            sink.emit_event(events::ORIENTATION_DID_CHANGE, &change);
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "orientation change forwarding lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    change = lock_changes.recv() => match change {
                        Ok(change) => {
                            sink.emit_event(events::ORIENTATION_LOCK_SETTINGS_DID_CHANGED, &change);
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "lock setting forwarding lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
            debug!("notification forwarding stopped");
        })
    }

    // === Synchronous query surface ===

    /// Current coarse orientation, read synchronously from the
    /// platform configuration. `Unknown` for undefined values.
    pub fn orientation(&self) -> Orientation {
        Orientation::from_configuration(self.configuration.configuration())
    }

    /// Current orientation as a structured result carrying the raw
    /// configuration value for diagnostics.
    pub fn orientation_reading(&self) -> OrientationReading {
        OrientationReading::from_raw(self.configuration.configuration())
    }

    /// Last directional orientation the tracker observed (fine mode).
    pub fn specific_orientation(&self) -> Option<SpecificOrientation> {
        self.tracker.specific_orientation()
    }

    /// Orientation captured by the owning process at startup, if any.
    pub fn initial_orientation(&self) -> Option<Orientation> {
        self.initial_orientation
    }

    /// Whether orientation is locked in the OS settings.
    ///
    /// The negation of the auto-rotate flag; see
    /// [`LockSettingObserver::is_orientation_locked_in_settings`].
    pub fn is_orientation_locked_in_settings(&self) -> bool {
        self.lock_observer.is_orientation_locked_in_settings()
    }

    /// Cached OS auto-rotate value.
    pub fn is_lock_enabled(&self) -> bool {
        self.lock_observer.is_lock_enabled()
    }

    // === Lock commands (fire-and-forget) ===

    /// Lock to upright portrait.
    pub fn lock_to_portrait(&self) {
        self.lock_controller.lock_to_portrait();
    }

    /// Lock to landscape, letting the sensor pick the side.
    pub fn lock_to_landscape(&self) {
        self.lock_controller.lock_to_landscape();
    }

    /// Lock to landscape with the device top pointing left.
    pub fn lock_to_landscape_left(&self) {
        self.lock_controller.lock_to_landscape_left();
    }

    /// Lock to landscape with the device top pointing right.
    pub fn lock_to_landscape_right(&self) {
        self.lock_controller.lock_to_landscape_right();
    }

    /// Remove any lock and follow the sensor freely.
    pub fn unlock_all_orientations(&self) {
        self.lock_controller.unlock_all_orientations();
    }

    // === Lifecycle entry points ===

    /// Host moved to the foreground.
    pub fn activate(&self) {
        self.lifecycle.activate();
    }

    /// Host moved to the background.
    pub fn deactivate(&self) {
        self.lifecycle.deactivate();
    }

    /// Current lifecycle state.
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Permanent teardown: same as a background transition, idempotent.
    /// The background loops end when the service is dropped and the
    /// event channels close.
    pub fn shutdown(&self) {
        self.lifecycle.shutdown();
        info!("orientation service shut down");
    }

    // === Sink management ===

    /// Attach the host bridge. Replaces any previous sink.
    pub fn set_sink(&self, sink: Arc<dyn NotificationSink>) {
        self.sink.set(sink);
    }

    /// Detach the host bridge; emissions no-op until reattached.
    pub fn clear_sink(&self) {
        self.sink.clear();
    }

    /// Sender for pushing platform events directly, for hosts whose
    /// sensor glue lives outside the activity registration path.
    pub fn sensor_sender(&self) -> mpsc::UnboundedSender<SensorEvent> {
        self.events_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ForegroundActivity, SettingsError};
    use std::sync::atomic::{AtomicI32, Ordering};

    struct FakeConfiguration {
        value: AtomicI32,
    }

    impl ConfigurationProvider for FakeConfiguration {
        fn configuration(&self) -> i32 {
            self.value.load(Ordering::Relaxed)
        }
    }

    struct FakeSettings;

    impl SettingsStore for FakeSettings {
        fn auto_rotate_enabled(&self) -> Option<bool> {
            Some(true)
        }

        fn watch(&self, _notify: mpsc::UnboundedSender<()>) -> Result<(), SettingsError> {
            Ok(())
        }
    }

    struct RefusingSettings;

    impl SettingsStore for RefusingSettings {
        fn auto_rotate_enabled(&self) -> Option<bool> {
            None
        }

        fn watch(&self, _notify: mpsc::UnboundedSender<()>) -> Result<(), SettingsError> {
            Err(SettingsError::Registration("refused".to_string()))
        }
    }

    struct NoActivity;

    impl ActivityProvider for NoActivity {
        fn current_activity(&self) -> Option<Arc<dyn ForegroundActivity>> {
            None
        }
    }

    fn platform(raw_configuration: i32) -> Platform {
        Platform {
            configuration: Arc::new(FakeConfiguration {
                value: AtomicI32::new(raw_configuration),
            }),
            settings: Arc::new(FakeSettings),
            activities: Arc::new(NoActivity),
        }
    }

    #[tokio::test]
    async fn test_start_twice_fails() {
        let mut service = OrientationService::new(ServiceConfig::default(), platform(1));

        service.start().unwrap();
        assert!(matches!(service.start(), Err(ServiceError::AlreadyStarted)));
    }

    #[tokio::test]
    async fn test_settings_registration_failure_surfaces() {
        let mut service = OrientationService::new(
            ServiceConfig::default(),
            Platform {
                configuration: Arc::new(FakeConfiguration {
                    value: AtomicI32::new(1),
                }),
                settings: Arc::new(RefusingSettings),
                activities: Arc::new(NoActivity),
            },
        );

        assert!(matches!(
            service.start(),
            Err(ServiceError::SettingsRegistration(_))
        ));
    }

    #[test]
    fn test_orientation_queries() {
        let service = OrientationService::new(ServiceConfig::default(), platform(2));
        assert_eq!(service.orientation(), Orientation::Landscape);

        let reading = service.orientation_reading();
        assert_eq!(reading.orientation, Orientation::Landscape);
        assert_eq!(reading.raw, 2);
    }

    #[test]
    fn test_undefined_configuration_reads_unknown() {
        let service = OrientationService::new(ServiceConfig::default(), platform(0));
        assert_eq!(service.orientation(), Orientation::Unknown);
        assert_eq!(service.orientation_reading().raw, 0);
    }

    #[test]
    fn test_initial_orientation_is_threaded_through() {
        let config = ServiceConfig::default().with_initial_orientation(Orientation::Portrait);
        let service = OrientationService::new(config, platform(1));
        assert_eq!(service.initial_orientation(), Some(Orientation::Portrait));

        let service = OrientationService::new(ServiceConfig::default(), platform(1));
        assert_eq!(service.initial_orientation(), None);
    }

    #[tokio::test]
    async fn test_lock_query_inversion() {
        let mut service = OrientationService::new(ServiceConfig::default(), platform(1));
        service.start().unwrap();

        // FakeSettings reports auto-rotate enabled.
        assert!(service.is_lock_enabled());
        assert!(!service.is_orientation_locked_in_settings());
    }

    #[test]
    fn test_lock_commands_without_activity_do_not_panic() {
        let service = OrientationService::new(ServiceConfig::default(), platform(1));
        service.lock_to_portrait();
        service.lock_to_landscape();
        service.unlock_all_orientations();
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let mut service = OrientationService::new(ServiceConfig::default(), platform(1));
        service.start().unwrap();
        service.activate();
        service.shutdown();
        service.shutdown();
        assert_eq!(service.lifecycle_state(), LifecycleState::Inactive);
    }
}

//! Orientation tracker trait and implementation.
//!
//! The tracker maintains the last-known orientation classification,
//! providing both query APIs (pull) and event subscriptions (push).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, trace};

use crate::events::OrientationChanged;

use super::detector::ChangeDetector;
use super::model::{Orientation, SensorEvent, SensorEventKind, SpecificOrientation};

/// Trait for querying tracked orientation state (pull API).
pub trait OrientationTracker: Send + Sync {
    /// Last-known coarse orientation, `Unknown` before the first event.
    fn orientation(&self) -> Orientation;

    /// Last-known directional orientation. `None` before the first
    /// fine-mode event, and always `None` in coarse mode.
    fn specific_orientation(&self) -> Option<SpecificOrientation>;

    /// Total change notifications emitted this session.
    fn changes_emitted(&self) -> u64;
}

/// Trait for subscribing to orientation transitions (push API).
pub trait OrientationTrackerEvents: Send + Sync {
    /// Subscribe to orientation change records.
    ///
    /// A record is broadcast only on an actual transition; duplicate
    /// readings never produce one.
    fn subscribe_changes(&self) -> broadcast::Receiver<OrientationChanged>;
}

/// Which platform input the tracker consumes.
///
/// The two modes are mutually exclusive: a platform either delivers
/// continuous sensor angles (fine) or discrete configuration-change
/// broadcasts (coarse). Hosts pick the mode matching their capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// Continuous angle readings, bucketed into four directional
    /// orientations with duplicate suppression.
    Fine,
    /// Discrete configuration changes mapped straight to
    /// portrait/landscape. The platform only delivers actual changes,
    /// so no additional suppression is applied.
    Coarse,
}

/// Configuration for the [`DefaultOrientationTracker`].
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Tracking mode (platform-capability fork).
    pub mode: TrackingMode,

    /// Channel capacity for change broadcasts.
    pub change_channel_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            mode: TrackingMode::Fine,
            change_channel_capacity: 16,
        }
    }
}

/// Internal state for the tracker.
struct TrackerState {
    /// Duplicate suppression for fine-mode readings.
    detector: ChangeDetector,

    /// Last-known coarse orientation.
    orientation: Orientation,
}

impl TrackerState {
    fn new() -> Self {
        Self {
            detector: ChangeDetector::new(),
            orientation: Orientation::Unknown,
        }
    }
}

/// Default implementation of the orientation tracker.
///
/// Receives platform events via an unbounded channel and maintains the
/// last-known classification. Events that do not match the configured
/// [`TrackingMode`] are counted and dropped, so a host wiring both
/// sources by mistake cannot produce conflicting notifications.
pub struct DefaultOrientationTracker {
    mode: TrackingMode,

    /// Thread-safe classification state.
    state: Arc<RwLock<TrackerState>>,

    /// Broadcast channel for change records.
    change_tx: broadcast::Sender<OrientationChanged>,

    /// Events received this session, including dropped ones.
    events_seen: AtomicU64,

    /// Change notifications emitted this session.
    changes_emitted: AtomicU64,
}

impl DefaultOrientationTracker {
    /// Create a new tracker with the given configuration.
    pub fn new(config: TrackerConfig) -> Self {
        let (change_tx, _) = broadcast::channel(config.change_channel_capacity);

        Self {
            mode: config.mode,
            state: Arc::new(RwLock::new(TrackerState::new())),
            change_tx,
            events_seen: AtomicU64::new(0),
            changes_emitted: AtomicU64::new(0),
        }
    }

    /// Create a tracker with default configuration (fine mode).
    pub fn with_defaults() -> Self {
        Self::new(TrackerConfig::default())
    }

    /// The configured tracking mode.
    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Total events received this session, including dropped ones.
    pub fn events_seen(&self) -> u64 {
        self.events_seen.load(Ordering::Relaxed)
    }

    /// Start the tracker's event processing loop.
    ///
    /// Spawns an async task consuming platform events. The task runs
    /// until the sender side of the channel is dropped.
    ///
    /// # Returns
    ///
    /// A handle to the spawned task.
    pub fn start(
        self: Arc<Self>,
        mut rx: mpsc::UnboundedReceiver<SensorEvent>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            debug!(mode = ?self.mode, "orientation tracker started, waiting for platform events");

            while let Some(event) = rx.recv().await {
                self.process_event(event);
            }

            debug!("orientation tracker stopped (channel closed)");
        })
    }

    /// Process a single platform event.
    pub(crate) fn process_event(&self, event: SensorEvent) {
        self.events_seen.fetch_add(1, Ordering::Relaxed);

        match (self.mode, event.kind) {
            (TrackingMode::Fine, SensorEventKind::Angle(degrees)) => {
                self.process_angle(degrees);
            }
            (TrackingMode::Coarse, SensorEventKind::Configuration(raw)) => {
                self.process_configuration(raw);
            }
            (mode, kind) => {
                trace!(?mode, ?kind, "dropping event not matching tracking mode");
            }
        }
    }

    fn process_angle(&self, degrees: u16) {
        trace!(degrees, "orientation tracker received angle reading");

        if let Ok(mut state) = self.state.write() {
            if let Some(change) = state.detector.record_angle(degrees) {
                state.orientation = change.orientation;
                self.changes_emitted.fetch_add(1, Ordering::Relaxed);
                debug!(
                    orientation = %change.orientation,
                    specific = ?change.specific_orientation,
                    "orientation changed"
                );
                // Broadcast the change (ignore errors - no subscribers is OK)
                let _ = self.change_tx.send(change);
            }
        }
    }

    fn process_configuration(&self, raw: i32) {
        trace!(raw, "orientation tracker received configuration change");

        let orientation = Orientation::from_configuration_change(raw);
        if let Ok(mut state) = self.state.write() {
            state.orientation = orientation;
        }
        self.changes_emitted.fetch_add(1, Ordering::Relaxed);
        debug!(orientation = %orientation, "orientation changed (configuration)");
        let _ = self.change_tx.send(OrientationChanged::coarse(orientation));
    }
}

impl OrientationTracker for DefaultOrientationTracker {
    fn orientation(&self) -> Orientation {
        self.state
            .read()
            .map(|s| s.orientation)
            .unwrap_or(Orientation::Unknown)
    }

    fn specific_orientation(&self) -> Option<SpecificOrientation> {
        self.state
            .read()
            .map(|s| s.detector.current())
            .unwrap_or(None)
    }

    fn changes_emitted(&self) -> u64 {
        self.changes_emitted.load(Ordering::Relaxed)
    }
}

impl OrientationTrackerEvents for DefaultOrientationTracker {
    fn subscribe_changes(&self) -> broadcast::Receiver<OrientationChanged> {
        self.change_tx.subscribe()
    }
}

//! Service configuration.

use crate::tracker::{Orientation, TrackerConfig, TrackingMode};

/// Top-level configuration for [`crate::service::OrientationService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Tracker configuration, including the tracking-mode fork.
    pub tracker: TrackerConfig,

    /// Orientation captured once by the owning process at startup, for
    /// early consumers that cannot wait for an event. Threaded through
    /// explicitly here rather than read from ambient state.
    pub initial_orientation: Option<Orientation>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            initial_orientation: None,
        }
    }
}

impl ServiceConfig {
    /// Set the tracking mode.
    pub fn with_mode(mut self, mode: TrackingMode) -> Self {
        self.tracker.mode = mode;
        self
    }

    /// Set the startup orientation constant.
    pub fn with_initial_orientation(mut self, orientation: Orientation) -> Self {
        self.initial_orientation = Some(orientation);
        self
    }
}

//! Observer lifecycle tied to host foreground/background transitions.
//!
//! The host framework owns the actual lifecycle events; this module
//! only exposes explicit `activate()`/`deactivate()` entry points for
//! the lifecycle owner to call. Nothing persists across reactivation:
//! every activation registers against the platform afresh.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::platform::{ActivityProvider, ObserverError};
use crate::tracker::SensorEvent;

/// Whether the orientation observer should currently be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Host is backgrounded; the observer is unregistered.
    Inactive,
    /// Host is foregrounded; the observer is registered (or inert when
    /// no foreground activity existed at activation time).
    Active,
}

/// Registers and unregisters the orientation observer as the host
/// moves between foreground and background.
pub struct LifecycleController {
    state: RwLock<LifecycleState>,
    activities: Arc<dyn ActivityProvider>,

    /// Sender handed to the activity on registration; the platform
    /// pushes its orientation events into it.
    events_tx: mpsc::UnboundedSender<SensorEvent>,
}

impl LifecycleController {
    /// Create a controller in the inactive state.
    pub fn new(
        activities: Arc<dyn ActivityProvider>,
        events_tx: mpsc::UnboundedSender<SensorEvent>,
    ) -> Self {
        Self {
            state: RwLock::new(LifecycleState::Inactive),
            activities,
            events_tx,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.state.read()
    }

    /// Host moved to the foreground: (re)register the observer.
    ///
    /// With no foreground activity available the controller logs and
    /// stays effectively inert until the next activation; the state
    /// still becomes `Active`.
    pub fn activate(&self) {
        *self.state.write() = LifecycleState::Active;

        let Some(activity) = self.activities.current_activity() else {
            warn!("no foreground activity to register orientation observer");
            return;
        };

        match activity.register_orientation_observer(self.events_tx.clone()) {
            Ok(()) => debug!("orientation observer registered"),
            Err(e) => warn!(error = %e, "failed to register orientation observer"),
        }
    }

    /// Host moved to the background: unregister the observer.
    ///
    /// Double unregistration is an expected idempotent case; it is
    /// logged and never propagated.
    pub fn deactivate(&self) {
        *self.state.write() = LifecycleState::Inactive;

        let Some(activity) = self.activities.current_activity() else {
            return;
        };

        match activity.unregister_orientation_observer() {
            Ok(()) => debug!("orientation observer unregistered"),
            Err(ObserverError::AlreadyUnregistered) => {
                debug!("orientation observer already unregistered");
            }
            Err(e) => warn!(error = %e, "failed to unregister orientation observer"),
        }
    }

    /// Permanent teardown. Same as a background transition, idempotent.
    pub fn shutdown(&self) {
        self.deactivate();
    }
}

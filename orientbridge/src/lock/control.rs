//! Fire-and-forget orientation-lock commands.

use std::sync::Arc;

use tracing::debug;

use crate::platform::{ActivityProvider, LockRequest};

/// Applies orientation-lock requests to the foreground activity.
///
/// Every command is fire-and-forget: when no foreground activity is
/// available the request is silently dropped. That is a recognized
/// absence condition (the host is backgrounded), not an error, so
/// nothing is surfaced to the caller.
pub struct LockController {
    activities: Arc<dyn ActivityProvider>,
}

impl LockController {
    /// Create a controller resolving activities through the provider.
    pub fn new(activities: Arc<dyn ActivityProvider>) -> Self {
        Self { activities }
    }

    /// Lock to upright portrait.
    pub fn lock_to_portrait(&self) {
        self.apply(LockRequest::Portrait);
    }

    /// Lock to landscape, letting the sensor pick the side.
    pub fn lock_to_landscape(&self) {
        self.apply(LockRequest::Landscape);
    }

    /// Lock to landscape with the device top pointing left.
    pub fn lock_to_landscape_left(&self) {
        self.apply(LockRequest::LandscapeLeft);
    }

    /// Lock to landscape with the device top pointing right.
    pub fn lock_to_landscape_right(&self) {
        self.apply(LockRequest::LandscapeRight);
    }

    /// Remove any lock and follow the sensor freely.
    pub fn unlock_all_orientations(&self) {
        self.apply(LockRequest::UnlockAll);
    }

    fn apply(&self, request: LockRequest) {
        match self.activities.current_activity() {
            Some(activity) => {
                debug!(request = %request, "applying orientation lock");
                activity.apply_orientation_lock(request);
            }
            None => {
                debug!(request = %request, "no foreground activity, dropping lock request");
            }
        }
    }
}

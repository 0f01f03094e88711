//! Trait seams to the host platform.
//!
//! The crate never talks to an OS directly. Hosts provide
//! implementations of these traits for their platform:
//!
//! - [`ConfigurationProvider`] — synchronous read of the current
//!   configuration orientation value
//! - [`SettingsStore`] — the OS auto-rotate setting plus a change watch
//! - [`ActivityProvider`] / [`ForegroundActivity`] — the currently
//!   visible UI container that accepts lock requests and hosts the
//!   orientation observer
//! - [`NotificationSink`] — the host bridge that receives named events
//!
//! All traits are dyn-compatible and wired as `Arc<dyn Trait>` so a
//! host can swap implementations (or test doubles) without touching the
//! core.

mod sink;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::tracker::SensorEvent;

pub use sink::{NotificationSink, SinkHandle};

/// An orientation-lock request applied to the foreground activity.
///
/// Each variant translates to a platform-specific lock constant inside
/// the host's [`ForegroundActivity`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockRequest {
    /// Lock to upright portrait.
    Portrait,
    /// Lock to landscape, letting the sensor pick left or right.
    Landscape,
    /// Lock to landscape with the device top pointing left.
    LandscapeLeft,
    /// Lock to landscape with the device top pointing right.
    LandscapeRight,
    /// Remove any lock and follow the sensor freely.
    UnlockAll,
}

impl LockRequest {
    /// Short name for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockRequest::Portrait => "portrait",
            LockRequest::Landscape => "landscape",
            LockRequest::LandscapeLeft => "landscape-left",
            LockRequest::LandscapeRight => "landscape-right",
            LockRequest::UnlockAll => "unlock-all",
        }
    }
}

impl std::fmt::Display for LockRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from registering or unregistering the orientation observer.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The observer was not registered (or was already unregistered).
    ///
    /// Expected during lifecycle teardown; callers log it and move on.
    #[error("orientation observer already unregistered")]
    AlreadyUnregistered,

    /// The platform refused the registration.
    #[error("failed to register orientation observer: {0}")]
    Registration(String),
}

/// Errors from registering a settings watch.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform refused the watch registration.
    #[error("failed to register settings watch: {0}")]
    Registration(String),
}

/// Synchronous access to the platform configuration.
pub trait ConfigurationProvider: Send + Sync {
    /// The raw configuration orientation value as the platform reports
    /// it right now. See the `CONFIGURATION_*` constants in
    /// [`crate::tracker`] for the defined values.
    fn configuration(&self) -> i32;
}

/// Access to the OS auto-rotate setting.
pub trait SettingsStore: Send + Sync {
    /// Read the auto-rotate boolean.
    ///
    /// Returns `None` when the setting is absent or unreadable; callers
    /// treat that as disabled, never as an error.
    fn auto_rotate_enabled(&self) -> Option<bool>;

    /// Register a watch on the setting.
    ///
    /// The store sends `()` on `notify` for every underlying change;
    /// the payload is re-read by the receiver. Registration failures
    /// are surfaced verbatim, not retried.
    fn watch(&self, notify: mpsc::UnboundedSender<()>) -> Result<(), SettingsError>;
}

/// The currently visible UI container.
pub trait ForegroundActivity: Send + Sync {
    /// Apply an orientation lock. Fire-and-forget.
    fn apply_orientation_lock(&self, request: LockRequest);

    /// Register the orientation observer, handing over the sender the
    /// platform should push [`SensorEvent`]s into.
    fn register_orientation_observer(
        &self,
        events: mpsc::UnboundedSender<SensorEvent>,
    ) -> Result<(), ObserverError>;

    /// Unregister the orientation observer.
    ///
    /// Returns [`ObserverError::AlreadyUnregistered`] if there was
    /// nothing to unregister; that case is tolerated by callers.
    fn unregister_orientation_observer(&self) -> Result<(), ObserverError>;
}

/// Resolves the current foreground activity, if any.
///
/// `None` is a recognized absence (the host is backgrounded or has no
/// UI yet), not an error: lock requests and observer registration
/// silently no-op against it.
pub trait ActivityProvider: Send + Sync {
    /// The current foreground activity, or `None` if the host has none.
    fn current_activity(&self) -> Option<Arc<dyn ForegroundActivity>>;
}

//! Service error types.

use thiserror::Error;

use crate::platform::SettingsError;

/// Errors that can occur while starting the orientation service.
///
/// Nothing after startup surfaces errors to the caller: lock requests
/// against a missing activity are silently dropped, and unregistration
/// failures are logged, never propagated.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The lock-setting watch could not be registered.
    #[error("failed to start lock setting observer: {0}")]
    SettingsRegistration(#[from] SettingsError),

    /// `start()` was called on an already-started service.
    #[error("orientation service already started")]
    AlreadyStarted,
}

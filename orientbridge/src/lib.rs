//! OrientBridge - device orientation state and lock control for host
//! application frameworks.
//!
//! This library bridges native platform orientation input (continuous
//! sensor angles or discrete configuration-change broadcasts) into a
//! host-facing event surface. It reports the current orientation,
//! notifies subscribers on actual transitions, observes the OS
//! auto-rotate setting, and applies programmatic orientation locks to
//! the foreground activity.
//!
//! The crate owns no platform bindings: hosts implement the trait seams
//! in [`platform`] and drive the lifecycle entry points on
//! [`service::OrientationService`] from their own foreground/background
//! callbacks.

pub mod events;
pub mod lifecycle;
pub mod lock;
pub mod logging;
pub mod platform;
pub mod service;
pub mod tracker;

pub use events::{OrientationChanged, LockSettingChanged};
pub use service::{OrientationService, Platform, ServiceConfig, ServiceError};
pub use tracker::{Orientation, SpecificOrientation, TrackingMode};

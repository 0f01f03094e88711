//! Orientation classification and change tracking.
//!
//! This module maintains the last-known device orientation, classifies
//! raw platform input into discrete orientations, and suppresses
//! duplicate notifications.
//!
//! # Design Philosophy
//!
//! **Raw platform input is the foundation. Classification is a
//! calculation on top.**
//!
//! - **Consume**: what the platform actually delivered (sensor angles
//!   or configuration-change values)
//! - **Derive**: coarse and directional orientation buckets
//! - **Suppress**: readings that repeat the current classification
//!
//! # Example
//!
//! ```ignore
//! use orientbridge::tracker::{DefaultOrientationTracker, OrientationTracker, SensorEvent};
//!
//! // Create tracker with event channel
//! let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
//! let tracker = std::sync::Arc::new(DefaultOrientationTracker::with_defaults());
//! let handle = tracker.clone().start(rx);
//!
//! // Platform pushes readings; queries read the derived state
//! tx.send(SensorEvent::angle(90))?;
//! let current = tracker.orientation();
//! ```

mod detector;
mod model;
mod tracker;

pub use detector::ChangeDetector;
pub use model::{
    Orientation, OrientationReading, SensorEvent, SensorEventKind, SpecificOrientation,
    CONFIGURATION_LANDSCAPE, CONFIGURATION_PORTRAIT, CONFIGURATION_UNDEFINED,
};
pub use tracker::{
    DefaultOrientationTracker, OrientationTracker, OrientationTrackerEvents, TrackerConfig,
    TrackingMode,
};

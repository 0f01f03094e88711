//! Core data types for orientation tracking.
//!
//! Types here represent what the platform actually reported (raw
//! configuration integers, sensor angles) and the discrete
//! classifications derived from them. Derivation is a calculation on
//! top of the raw reading, never a replacement for it: the raw value is
//! carried alongside for diagnostics.

use std::time::Instant;

use serde::Serialize;

/// Raw platform configuration value for portrait orientation.
pub const CONFIGURATION_PORTRAIT: i32 = 1;

/// Raw platform configuration value for landscape orientation.
pub const CONFIGURATION_LANDSCAPE: i32 = 2;

/// Raw platform configuration value when orientation is undefined.
pub const CONFIGURATION_UNDEFINED: i32 = 0;

/// Coarse device orientation derived from the platform configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    Portrait,
    Landscape,
    /// The platform reported an undefined configuration value.
    Unknown,
}

impl Orientation {
    /// Classify a raw configuration value for synchronous queries.
    ///
    /// Any value other than the two known constants maps to `Unknown`;
    /// the caller keeps the raw integer for diagnostics (see
    /// [`OrientationReading`]).
    pub fn from_configuration(raw: i32) -> Self {
        match raw {
            CONFIGURATION_PORTRAIT => Orientation::Portrait,
            CONFIGURATION_LANDSCAPE => Orientation::Landscape,
            _ => Orientation::Unknown,
        }
    }

    /// Classify a raw configuration value from a change broadcast.
    ///
    /// Change broadcasts only ever carry the two defined states, so
    /// anything that is not portrait is treated as landscape. This is
    /// the coarse-mode event path; queries use
    /// [`Orientation::from_configuration`] instead.
    pub fn from_configuration_change(raw: i32) -> Self {
        if raw == CONFIGURATION_PORTRAIT {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Event payload spelling ("PORTRAIT", "LANDSCAPE", "UNKNOWN").
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "PORTRAIT",
            Orientation::Landscape => "LANDSCAPE",
            Orientation::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directional orientation derived from a continuous sensor angle.
///
/// Only populated in fine tracking mode, where the platform delivers
/// raw angles instead of discrete configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecificOrientation {
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl SpecificOrientation {
    /// Bucket a sensor angle into a directional orientation.
    ///
    /// Bands are half-open (inclusive low bound, exclusive high bound):
    ///
    /// - `[60, 120)`  → `LandscapeLeft`
    /// - `[150, 210)` → `PortraitUpsideDown`
    /// - `[240, 300)` → `LandscapeRight`
    /// - everything else → `Portrait` (the default/rest bucket,
    ///   including angles near 0/330–360 and the dead zones between the
    ///   named bands)
    ///
    /// There is no hysteresis beyond the dead zones themselves; a
    /// reading oscillating at a band edge is handled by the same
    /// duplicate suppression as any other repeated reading.
    pub fn from_angle(degrees: u16) -> Self {
        match degrees % 360 {
            60..=119 => SpecificOrientation::LandscapeLeft,
            150..=209 => SpecificOrientation::PortraitUpsideDown,
            240..=299 => SpecificOrientation::LandscapeRight,
            _ => SpecificOrientation::Portrait,
        }
    }

    /// Collapse to the coarse portrait/landscape category.
    pub fn coarse(&self) -> Orientation {
        match self {
            SpecificOrientation::Portrait | SpecificOrientation::PortraitUpsideDown => {
                Orientation::Portrait
            }
            SpecificOrientation::LandscapeLeft | SpecificOrientation::LandscapeRight => {
                Orientation::Landscape
            }
        }
    }

    /// Event payload spelling (e.g. "PORTRAIT_UPSIDE_DOWN").
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecificOrientation::Portrait => "PORTRAIT",
            SpecificOrientation::PortraitUpsideDown => "PORTRAIT_UPSIDE_DOWN",
            SpecificOrientation::LandscapeLeft => "LANDSCAPE_LEFT",
            SpecificOrientation::LandscapeRight => "LANDSCAPE_RIGHT",
        }
    }
}

impl std::fmt::Display for SpecificOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A synchronous orientation query result.
///
/// Carries the raw configuration integer alongside the classification
/// so callers can report undefined values for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationReading {
    /// Classified orientation (`Unknown` for undefined values).
    pub orientation: Orientation,
    /// The raw platform configuration value the classification came from.
    pub raw: i32,
}

impl OrientationReading {
    /// Classify a raw configuration value, keeping the raw value.
    pub fn from_raw(raw: i32) -> Self {
        Self {
            orientation: Orientation::from_configuration(raw),
            raw,
        }
    }
}

/// Inbound platform notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEventKind {
    /// Continuous sensor angle in degrees, fine mode only.
    Angle(u16),
    /// Raw configuration value from a configuration-change broadcast.
    Configuration(i32),
}

/// A single inbound platform notification.
#[derive(Debug, Clone, Copy)]
pub struct SensorEvent {
    /// What the platform reported.
    pub kind: SensorEventKind,
    /// When the event entered the tracker pipeline.
    pub timestamp: Instant,
}

impl SensorEvent {
    /// Create an angle event stamped with the current time.
    pub fn angle(degrees: u16) -> Self {
        Self {
            kind: SensorEventKind::Angle(degrees),
            timestamp: Instant::now(),
        }
    }

    /// Create a configuration-change event stamped with the current time.
    pub fn configuration(raw: i32) -> Self {
        Self {
            kind: SensorEventKind::Configuration(raw),
            timestamp: Instant::now(),
        }
    }
}

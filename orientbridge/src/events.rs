//! Outbound event contract for the host bridge.
//!
//! Event names and payload shapes are an established external contract
//! (host-side listeners match on the literal names), so the spellings
//! here are fixed: camelCase field names and SCREAMING_SNAKE_CASE
//! orientation values.

use serde::Serialize;

use crate::tracker::{Orientation, SpecificOrientation};

/// Emitted when the tracked orientation transitions.
pub const ORIENTATION_DID_CHANGE: &str = "orientationDidChange";

/// Emitted when the OS auto-rotate setting changes.
///
/// The historical name (including the grammar) is part of the contract.
pub const ORIENTATION_LOCK_SETTINGS_DID_CHANGED: &str = "orientationLockSettingsDidChanged";

/// Payload for [`ORIENTATION_DID_CHANGE`].
///
/// `specific_orientation` is only present in fine tracking mode; coarse
/// mode omits the field from the serialized payload entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationChanged {
    /// Coarse portrait/landscape category. Derived, non-authoritative:
    /// the transition that triggered the event is the specific one.
    pub orientation: Orientation,

    /// Directional orientation that actually transitioned (fine mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_orientation: Option<SpecificOrientation>,
}

impl OrientationChanged {
    /// Build a fine-mode change record from a directional transition.
    pub fn fine(specific: SpecificOrientation) -> Self {
        Self {
            orientation: specific.coarse(),
            specific_orientation: Some(specific),
        }
    }

    /// Build a coarse-mode change record.
    pub fn coarse(orientation: Orientation) -> Self {
        Self {
            orientation,
            specific_orientation: None,
        }
    }
}

/// Payload for [`ORIENTATION_LOCK_SETTINGS_DID_CHANGED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockSettingChanged {
    /// Whether the OS auto-rotate setting is now enabled.
    pub is_orientation_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_payload_shape() {
        let change = OrientationChanged::fine(SpecificOrientation::LandscapeLeft);
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "orientation": "LANDSCAPE",
                "specificOrientation": "LANDSCAPE_LEFT",
            })
        );
    }

    #[test]
    fn test_coarse_payload_omits_specific() {
        let change = OrientationChanged::coarse(Orientation::Portrait);
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json, serde_json::json!({ "orientation": "PORTRAIT" }));
    }

    #[test]
    fn test_lock_setting_payload_shape() {
        let change = LockSettingChanged {
            is_orientation_enabled: false,
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json, serde_json::json!({ "isOrientationEnabled": false }));
    }

    #[test]
    fn test_event_names_are_contract_spellings() {
        assert_eq!(ORIENTATION_DID_CHANGE, "orientationDidChange");
        assert_eq!(
            ORIENTATION_LOCK_SETTINGS_DID_CHANGED,
            "orientationLockSettingsDidChanged"
        );
    }
}

//! Duplicate suppression for orientation readings.
//!
//! Fine-mode sensors deliver a continuous stream of angle readings, most
//! of which classify into the same bucket as the previous one. The
//! change detector remembers the last classification and hands out a
//! change record only on an actual transition; everything else is
//! suppressed. A reading oscillating at a band edge gets no special
//! treatment: it either classifies into a new bucket (a transition) or
//! it repeats the current one (suppressed).

use crate::events::OrientationChanged;

use super::model::SpecificOrientation;

/// State machine that turns raw readings into transition records.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    /// Classification of the last emitted change, if any.
    last: Option<SpecificOrientation>,
}

impl ChangeDetector {
    /// Create a detector with no remembered orientation.
    ///
    /// The first reading always produces a change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector seeded with a known starting orientation.
    ///
    /// Readings matching the seed are suppressed from the start.
    pub fn with_initial(initial: Option<SpecificOrientation>) -> Self {
        Self { last: initial }
    }

    /// Record a raw sensor angle.
    ///
    /// # Returns
    ///
    /// `Some(OrientationChanged)` when the classification differs from
    /// the last emitted one, `None` otherwise. The remembered value is
    /// updated before the change record is handed out.
    pub fn record_angle(&mut self, degrees: u16) -> Option<OrientationChanged> {
        self.record(SpecificOrientation::from_angle(degrees))
    }

    /// Record an already-classified reading.
    pub fn record(&mut self, specific: SpecificOrientation) -> Option<OrientationChanged> {
        if self.last == Some(specific) {
            return None;
        }
        self.last = Some(specific);
        Some(OrientationChanged::fine(specific))
    }

    /// Classification of the last emitted change, if any.
    pub fn current(&self) -> Option<SpecificOrientation> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Orientation;

    #[test]
    fn test_first_reading_emits() {
        let mut detector = ChangeDetector::new();

        let change = detector.record_angle(90);
        assert!(change.is_some());
        let change = change.unwrap();
        assert_eq!(
            change.specific_orientation,
            Some(SpecificOrientation::LandscapeLeft)
        );
        assert_eq!(change.orientation, Orientation::Landscape);
        assert_eq!(detector.current(), Some(SpecificOrientation::LandscapeLeft));
    }

    #[test]
    fn test_duplicate_readings_suppressed() {
        let mut detector = ChangeDetector::new();

        assert!(detector.record_angle(90).is_some());
        assert!(detector.record_angle(90).is_none());
        // A different angle in the same band is still a duplicate.
        assert!(detector.record_angle(115).is_none());
    }

    #[test]
    fn test_transition_sequence() {
        let mut detector = ChangeDetector::new();

        let first = detector.record_angle(90).unwrap();
        let second = detector.record_angle(180).unwrap();

        assert_eq!(
            first.specific_orientation,
            Some(SpecificOrientation::LandscapeLeft)
        );
        assert_eq!(
            second.specific_orientation,
            Some(SpecificOrientation::PortraitUpsideDown)
        );
        assert_eq!(second.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_band_edge_oscillation() {
        let mut detector = ChangeDetector::new();

        // 119 is inside the landscape-left band, 120 is in the rest
        // bucket. Oscillating across the edge is a real transition each
        // time, while repeats on either side are suppressed.
        assert!(detector.record_angle(119).is_some());
        assert!(detector.record_angle(119).is_none());
        assert!(detector.record_angle(120).is_some());
        assert!(detector.record_angle(120).is_none());
        assert!(detector.record_angle(119).is_some());
    }

    #[test]
    fn test_seeded_detector_suppresses_seed() {
        let mut detector = ChangeDetector::with_initial(Some(SpecificOrientation::Portrait));

        // Rest-bucket reading matches the seed: suppressed.
        assert!(detector.record_angle(0).is_none());
        assert!(detector.record_angle(90).is_some());
    }

    #[test]
    fn test_returning_to_previous_orientation_emits() {
        let mut detector = ChangeDetector::new();

        assert!(detector.record_angle(90).is_some());
        assert!(detector.record_angle(180).is_some());
        assert!(detector.record_angle(90).is_some());
    }
}

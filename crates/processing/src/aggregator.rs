//! Latest-state sample aggregation.

use motionflow_model::{
    Magnitudes, Orientation, RawEvent, ScreenOrientationInfo, Snapshot, Vector3,
};

use crate::remap::{remap_acceleration, remap_orientation, remap_rotation_rate};

/// Holds the most recent screen-frame acceleration, rotation rate and
/// orientation, and formats a [`Snapshot`] for every sensor event.
///
/// Channels absent from an event keep their previous value. Magnitudes are
/// always computed over the full current state.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SampleAggregator {
    accel: Vector3,
    rotation: Vector3,
    orientation: Orientation,
}

impl SampleAggregator {
    /// Create an aggregator with all-zero state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a raw event into the current state.
    ///
    /// Returns the resulting snapshot for motion and orientation events.
    /// Screen-change events carry no sample and yield `None`.
    pub fn ingest(
        &mut self,
        event: &RawEvent,
        screen: &ScreenOrientationInfo,
    ) -> Option<Snapshot> {
        let landscape = screen.is_landscape();
        match event {
            RawEvent::Motion {
                acceleration_including_gravity,
                rotation_rate,
            } => {
                if let Some(raw) = acceleration_including_gravity {
                    self.accel = remap_acceleration(raw, landscape);
                }
                if let Some(raw) = rotation_rate {
                    self.rotation = remap_rotation_rate(raw, landscape);
                }
            }
            RawEvent::Orientation(raw) => {
                self.orientation = remap_orientation(raw, landscape);
            }
            RawEvent::ScreenChange => return None,
        }
        Some(self.snapshot(screen))
    }

    /// Format the current state.
    pub fn snapshot(&self, screen: &ScreenOrientationInfo) -> Snapshot {
        Snapshot::capture(
            &self.accel,
            &self.rotation,
            &self.orientation,
            screen.clone(),
        )
    }

    pub fn accel(&self) -> Vector3 {
        self.accel
    }

    pub fn rotation(&self) -> Vector3 {
        self.rotation
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn magnitudes(&self) -> Magnitudes {
        Magnitudes::of(&self.accel, &self.rotation)
    }

    /// Return to all-zero state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motionflow_model::{RawAcceleration, RawRotation};

    fn portrait() -> ScreenOrientationInfo {
        ScreenOrientationInfo::new("portrait-primary", false, 0.0)
    }

    fn landscape() -> ScreenOrientationInfo {
        ScreenOrientationInfo::new("landscape-primary", true, 90.0)
    }

    #[test]
    fn starts_at_zero() {
        let agg = SampleAggregator::new();
        let snapshot = agg.snapshot(&portrait());
        assert_eq!(snapshot.accel.x, "0.00");
        assert_eq!(snapshot.orientation.alpha, "0.00");
        assert_eq!(snapshot.magnitudes.accel_magnitude, "0.00");
    }

    #[test]
    fn motion_event_produces_snapshot() {
        let mut agg = SampleAggregator::new();
        let snapshot = agg
            .ingest(&RawEvent::acceleration(0.0, 9.81, 0.0), &portrait())
            .unwrap();

        assert_eq!(snapshot.accel.x, "0.00");
        assert_eq!(snapshot.accel.y, "9.81");
        assert_eq!(snapshot.accel.z, "0.00");
        assert_eq!(snapshot.magnitudes.accel_magnitude, "9.81");
        assert_eq!(snapshot.magnitudes.rotation_magnitude, "0.00");
    }

    #[test]
    fn magnitude_of_three_four_zero() {
        let mut agg = SampleAggregator::new();
        let snapshot = agg
            .ingest(&RawEvent::acceleration(3.0, 4.0, 0.0), &portrait())
            .unwrap();
        assert_eq!(snapshot.magnitudes.accel_magnitude, "5.00");
    }

    #[test]
    fn absent_channel_retains_previous_value() {
        let mut agg = SampleAggregator::new();
        agg.ingest(&RawEvent::acceleration(1.0, 2.0, 2.0), &portrait());

        let snapshot = agg
            .ingest(&RawEvent::rotation_rate(3.0, 4.0, 0.0), &portrait())
            .unwrap();

        assert_eq!(agg.accel(), Vector3::new(1.0, 2.0, 2.0));
        assert_eq!(snapshot.accel.y, "2.00");
        assert_eq!(snapshot.rotation.x, "3.00");
        // Magnitudes span the whole state, not only the updated channel.
        assert_eq!(snapshot.magnitudes.accel_magnitude, "3.00");
        assert_eq!(snapshot.magnitudes.rotation_magnitude, "5.00");
    }

    #[test]
    fn motion_with_both_channels_updates_both() {
        let mut agg = SampleAggregator::new();
        let event = RawEvent::Motion {
            acceleration_including_gravity: Some(RawAcceleration::new(1.0, 2.0, 3.0)),
            rotation_rate: Some(RawRotation::new(10.0, 20.0, 30.0)),
        };
        agg.ingest(&event, &landscape());

        assert_eq!(agg.accel(), Vector3::new(2.0, -1.0, 3.0));
        assert_eq!(agg.rotation(), Vector3::new(20.0, 350.0, 30.0));
    }

    #[test]
    fn orientation_event_updates_orientation_only() {
        let mut agg = SampleAggregator::new();
        agg.ingest(&RawEvent::acceleration(0.0, 9.81, 0.0), &portrait());
        let snapshot = agg
            .ingest(&RawEvent::orientation(-10.0, 45.0, 10.0), &portrait())
            .unwrap();

        assert_eq!(snapshot.orientation.alpha, "350.00");
        assert_eq!(snapshot.orientation.beta, "45.00");
        assert_eq!(snapshot.accel.y, "9.81");
        assert_eq!(agg.orientation(), Orientation::new(350.0, 45.0, 10.0));
    }

    #[test]
    fn screen_change_yields_nothing() {
        let mut agg = SampleAggregator::new();
        assert!(agg.ingest(&RawEvent::ScreenChange, &portrait()).is_none());
        assert_eq!(agg, SampleAggregator::new());
    }

    #[test]
    fn landscape_sign_flip_renders_without_negative_zero() {
        let mut agg = SampleAggregator::new();
        let snapshot = agg
            .ingest(&RawEvent::acceleration(0.0, 9.81, 0.0), &landscape())
            .unwrap();
        assert_eq!(snapshot.accel.x, "9.81");
        assert_eq!(snapshot.accel.y, "0.00");
        assert!(snapshot.screen_orientation.is_landscape());
    }

    #[test]
    fn reset_clears_state() {
        let mut agg = SampleAggregator::new();
        agg.ingest(&RawEvent::acceleration(1.0, 1.0, 1.0), &portrait());
        agg.reset();
        assert_eq!(agg.accel(), Vector3::ZERO);
        assert_eq!(agg.magnitudes().accel_magnitude, 0.0);
    }
}

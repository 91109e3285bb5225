use crate::bbox::{BBox, Ltrb, Xywh};
use crate::detection::Detection;

/// Arm/scan/disarm flags of one track. All-false is the idle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossingState {
    pub armed: bool,
    pub scanned: bool,
    pub disarmed: bool,

    // frames spent disarmed, informational only
    pub cleanup_frames: u32,
}

impl CrossingState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.armed && !self.scanned && !self.disarmed
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Smoothed state of one object class.
///
/// Identity is the class label: two items of the same class in view at once
/// share a single track.
#[derive(Debug, Clone)]
pub struct Track {
    pub class_id: String,
    pub detection_count: u32,
    pub missing_frames: u32,
    pub last_seen_frame: u64,
    pub filtered_bbox: BBox<Xywh>,

    // raw (unfiltered) center of the last matched detection
    pub previous_center_x: f32,
    pub moving_left: bool,
    pub checkout_state: CrossingState,
}

impl Track {
    pub fn new(det: &Detection, frame_ordinal: u64) -> Self {
        Self {
            class_id: det.class.clone(),
            detection_count: 1,
            missing_frames: 0,
            last_seen_frame: frame_ordinal,
            filtered_bbox: det.bbox(),
            previous_center_x: det.x,
            moving_left: false,
            checkout_state: CrossingState::default(),
        }
    }

    /// Folds a matched detection into the track.
    pub fn update(&mut self, det: &Detection, frame_ordinal: u64, alpha: f32, deadband: f32) {
        self.detection_count += 1;
        self.missing_frames = 0;
        self.last_seen_frame = frame_ordinal;

        if det.x < self.previous_center_x - deadband {
            self.moving_left = true;
        } else if det.x > self.previous_center_x + deadband {
            self.moving_left = false;
        }

        self.previous_center_x = det.x;
        self.filtered_bbox = self.filtered_bbox.lerp(&det.bbox(), alpha);
    }

    #[inline(always)]
    pub fn center_x(&self) -> f32 {
        self.filtered_bbox.cx()
    }

    /// Edges of the smoothed box, for overlay drawing.
    #[inline]
    pub fn ltrb(&self) -> BBox<Ltrb> {
        self.filtered_bbox.as_ltrb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x: f32) -> Detection {
        Detection::new("red_tulip", x, 100.0, 40.0, 40.0, 0.9)
    }

    #[test]
    fn new_track_starts_from_raw_sample() {
        let track = Track::new(&det(250.0), 7);

        assert_eq!(track.detection_count, 1);
        assert_eq!(track.last_seen_frame, 7);
        assert_eq!(track.center_x(), 250.0);
        assert_eq!(track.previous_center_x, 250.0);
        assert!(!track.moving_left);
        assert!(track.checkout_state.is_idle());
    }

    #[test]
    fn direction_ignores_moves_inside_deadband() {
        let mut track = Track::new(&det(100.0), 0);

        for (i, x) in [98.0, 97.0, 99.0, 101.0].into_iter().enumerate() {
            track.update(&det(x), i as u64 + 1, 0.3, 3.0);
            assert!(!track.moving_left, "flipped at x={}", x);
        }
    }

    #[test]
    fn direction_flips_only_past_deadband() {
        let mut track = Track::new(&det(100.0), 0);

        track.update(&det(96.0), 1, 0.3, 3.0);
        assert!(track.moving_left);

        // small rightward jitter keeps the flag
        track.update(&det(98.0), 2, 0.3, 3.0);
        assert!(track.moving_left);

        track.update(&det(102.0), 3, 0.3, 3.0);
        assert!(!track.moving_left);
    }

    #[test]
    fn move_of_exactly_deadband_keeps_direction() {
        let mut track = Track::new(&det(100.0), 0);

        track.update(&det(97.0), 1, 0.3, 3.0);
        assert!(!track.moving_left);

        track.update(&det(93.0), 2, 0.3, 3.0);
        assert!(track.moving_left);

        track.update(&det(96.0), 3, 0.3, 3.0);
        assert!(track.moving_left);
    }

    #[test]
    fn overlay_edges_follow_filtered_box() {
        let mut track = Track::new(&det(100.0), 0);
        track.update(&det(200.0), 1, 0.5, 3.0);

        let edges = track.ltrb();
        assert_eq!(edges.left(), 130.0);
        assert_eq!(edges.right(), 170.0);
        assert_eq!(edges.top(), 80.0);
        assert_eq!(edges.bottom(), 120.0);
    }

    #[test]
    fn update_resets_missing_counter() {
        let mut track = Track::new(&det(100.0), 0);
        track.missing_frames = 4;

        track.update(&det(100.0), 5, 0.3, 3.0);

        assert_eq!(track.missing_frames, 0);
        assert_eq!(track.detection_count, 2);
        assert_eq!(track.last_seen_frame, 5);
    }
}

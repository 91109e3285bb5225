//! Arm / scan / disarm crossing detector.
//!
//! Items travel right to left across the frame. Three vertical lines split
//! the frame: the arm line right of the middle, the middle (scan) line, and
//! the disarm line left of the middle. A track must enter the arm band while
//! moving left before crossing the middle line counts as a scan, and it must
//! retreat right past the arm line before it can be scanned again.

use tracing::debug;

use crate::config::ZoneConfig;
use crate::error::Error;
use crate::Track;

/// The three x positions of the crossing zone, in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneLines {
    pub arm_x: f32,
    pub middle_x: f32,
    pub disarm_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingZone {
    frame_width: f32,
    band_ratio: f32,
    lines: ZoneLines,
}

impl CrossingZone {
    pub fn new(frame_width: f32, band_ratio: f32) -> Result<Self, Error> {
        ZoneConfig { band_ratio }.validate()?;

        Ok(Self {
            frame_width,
            band_ratio,
            lines: Self::compute_lines(frame_width, band_ratio)?,
        })
    }

    pub fn with_config(frame_width: f32, config: &ZoneConfig) -> Result<Self, Error> {
        Self::new(frame_width, config.band_ratio)
    }

    fn compute_lines(frame_width: f32, band_ratio: f32) -> Result<ZoneLines, Error> {
        if !frame_width.is_finite() || frame_width <= 0.0 {
            return Err(Error::InvalidFrameWidth(frame_width));
        }

        let middle_x = frame_width / 2.0;
        let band = frame_width * band_ratio;

        Ok(ZoneLines {
            arm_x: middle_x + band,
            middle_x,
            disarm_x: middle_x - band,
        })
    }

    /// Recomputes the lines when the frame width changed. Returns `true` if
    /// anything was recomputed.
    pub fn resize(&mut self, frame_width: f32) -> Result<bool, Error> {
        if frame_width == self.frame_width {
            return Ok(false);
        }

        self.lines = Self::compute_lines(frame_width, self.band_ratio)?;
        self.frame_width = frame_width;

        debug!(
            width = frame_width,
            middle_x = self.lines.middle_x,
            "crossing zone resized"
        );

        Ok(true)
    }

    #[inline]
    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    #[inline]
    pub fn lines(&self) -> ZoneLines {
        self.lines
    }

    /// Advances the track's crossing state by one frame. Returns `true` on
    /// the frame the track is scanned, which happens at most once between two
    /// idle states.
    pub fn step(&self, track: &mut Track) -> bool {
        let ZoneLines {
            arm_x,
            middle_x,
            disarm_x,
        } = self.lines;

        let cx = track.center_x();
        let moving_left = track.moving_left;
        let state = &mut track.checkout_state;

        if !state.is_idle() && cx > arm_x {
            debug!(class = %track.class_id, cx, "retreated past arm line, reset");
            state.reset();
        }

        if !state.armed && cx > middle_x && cx < arm_x && moving_left {
            state.armed = true;
            debug!(class = %track.class_id, cx, "armed");
        }

        let mut scanned = false;
        if state.armed && !state.scanned && cx <= middle_x && moving_left {
            state.scanned = true;
            scanned = true;
            debug!(class = %track.class_id, cx, "scanned");
        }

        if state.scanned && !state.disarmed && cx < disarm_x {
            state.disarmed = true;
            debug!(class = %track.class_id, cx, "disarmed");
        }

        if state.disarmed {
            state.cleanup_frames += 1;
        }

        scanned
    }
}

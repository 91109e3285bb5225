use tracing::info;

/// Summary of one processed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub ordinal: u64,
    pub detections: usize,
    pub tracked: usize,
    pub stable_tracks: usize,
    pub events: usize,
}

/// Hook called by the driving loop after each frame.
pub trait Diagnostics {
    fn on_frame(&mut self, report: &FrameReport);
}

/// Logs a frame summary every `interval` frames.
#[derive(Debug)]
pub struct LogEvery {
    interval: u64,
    frames: u64,
}

impl LogEvery {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
        }
    }

    /// Whether the next report would be logged.
    #[inline]
    pub fn is_due(&self) -> bool {
        self.frames % self.interval == 0
    }
}

impl Default for LogEvery {
    fn default() -> Self {
        Self::new(30)
    }
}

impl Diagnostics for LogEvery {
    fn on_frame(&mut self, report: &FrameReport) {
        if self.is_due() {
            info!(
                frame = report.ordinal,
                detections = report.detections,
                tracked = report.tracked,
                stable = report.stable_tracks,
                events = report.events,
                "frame summary"
            );
        }

        self.frames += 1;
    }
}

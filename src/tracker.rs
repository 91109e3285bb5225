use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::config::TrackerConfig;
use crate::error::Error;
use crate::{Detection, Track};

/// Keeps one exponentially smoothed [`Track`] per class label.
#[derive(Debug)]
pub struct LowPassTracker {
    config: TrackerConfig,
    tracks: BTreeMap<String, Track>,
}

impl LowPassTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            tracks: BTreeMap::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Feeds one frame of detections and returns the stable tracks keyed by
    /// class.
    pub fn update(
        &mut self,
        detections: &[Detection],
        frame_ordinal: u64,
    ) -> BTreeMap<&str, &Track> {
        let mut matched = HashSet::new();

        for det in detections {
            if !det.is_valid() {
                debug!(
                    class = %det.class,
                    confidence = det.confidence,
                    "dropping invalid detection"
                );
                continue;
            }

            if det.confidence < self.config.confidence_threshold {
                continue;
            }

            if let Some(track) = self.tracks.get_mut(&det.class) {
                track.update(
                    det,
                    frame_ordinal,
                    self.config.alpha,
                    self.config.direction_deadband,
                );
            } else {
                debug!(class = %det.class, frame = frame_ordinal, "new track");
                self.tracks
                    .insert(det.class.clone(), Track::new(det, frame_ordinal));
            }

            matched.insert(det.class.as_str());
        }

        for (class, track) in &mut self.tracks {
            if !matched.contains(class.as_str()) {
                track.missing_frames += 1;
            }
        }

        let max_missing = self.config.max_missing_frames;
        self.tracks.retain(|class, t| {
            if t.missing_frames > max_missing {
                debug!(class = %class, missing = t.missing_frames, "evicting track");
                return false;
            }

            true
        });

        self.stable()
    }

    /// Tracks that have been detected at least `min_detections` times.
    pub fn stable(&self) -> BTreeMap<&str, &Track> {
        let min = self.config.min_detections;

        self.tracks
            .iter()
            .filter(|(_, t)| t.detection_count >= min)
            .map(|(c, t)| (c.as_str(), t))
            .collect()
    }

    /// Mutable handles to the stable tracks, for the crossing state machine.
    pub fn stable_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        let min = self.config.min_detections;

        self.tracks
            .values_mut()
            .filter(move |t| t.detection_count >= min)
    }

    #[inline]
    pub fn get(&self, class: &str) -> Option<&Track> {
        self.tracks.get(class)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

impl Default for LowPassTracker {
    fn default() -> Self {
        Self {
            config: TrackerConfig::default(),
            tracks: BTreeMap::new(),
        }
    }
}

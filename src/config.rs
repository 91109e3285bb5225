use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Low-pass tracker tuning.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Weight of the newest sample in the exponential filter, `0 < alpha <= 1`.
    pub alpha: f32,
    /// Detections required before a track is reported as stable.
    pub min_detections: u32,
    /// Frames a track may go undetected before it is evicted.
    pub max_missing_frames: u32,
    /// Detections below this confidence never reach the filter.
    pub confidence_threshold: f32,
    /// Horizontal dead-band (px) for the direction flag.
    pub direction_deadband: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            min_detections: 3,
            max_missing_frames: 15,
            confidence_threshold: 0.4,
            direction_deadband: 3.0,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }

        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::InvalidConfig(format!(
                "confidence_threshold must be in [0, 1], got {}",
                self.confidence_threshold
            )));
        }

        if !self.direction_deadband.is_finite() || self.direction_deadband < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "direction_deadband must be finite and non-negative, got {}",
                self.direction_deadband
            )));
        }

        Ok(())
    }
}

/// Crossing zone geometry, relative to the frame width.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ZoneConfig {
    /// Distance of the arm and disarm lines from the middle line, as a
    /// fraction of the frame width.
    pub band_ratio: f32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self { band_ratio: 0.15 }
    }
}

impl ZoneConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.band_ratio > 0.0 && self.band_ratio < 0.5) {
            return Err(Error::InvalidConfig(format!(
                "band_ratio must be in (0, 0.5), got {}",
                self.band_ratio
            )));
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub zone: ZoneConfig,
}

impl Config {
    /// Parses a JSON document; missing fields fall back to defaults.
    pub fn from_json_str(src: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(src)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.tracker.validate()?;
        self.zone.validate()
    }
}

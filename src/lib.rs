pub mod bbox;
pub mod checkout;
pub mod config;
pub mod crossing;
pub mod detection;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod register;
pub mod tracker;

mod track;

pub use checkout::{Aggregator, CheckoutEvent, PriceTable, TransactionSnapshot};
pub use config::Config;
pub use crossing::CrossingZone;
pub use detection::Detection;
pub use frame::Frame;
pub use register::{Register, Transaction, TransactionSink};
pub use track::{CrossingState, Track};
pub use tracker::LowPassTracker;

use diagnostics::FrameReport;
use error::Error;
use std::rc::Rc;
use tracing::{info, warn};

pub trait Scanning {
    fn update(&mut self, frame: &Frame) -> Result<Vec<CheckoutEvent>, Error>;
    fn tracks(&self) -> Rc<[Track]>;
}

/// One camera watching one checkout line: tracker plus crossing zone.
pub struct CheckoutLane {
    config: Config,
    tracker: LowPassTracker,
    zone: Option<CrossingZone>,
    prices: PriceTable,
    last_report: FrameReport,
}

impl CheckoutLane {
    pub fn new(config: Config, prices: PriceTable) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            tracker: LowPassTracker::new(config.tracker.clone())?,
            config,
            zone: None,
            prices,
            last_report: FrameReport::default(),
        })
    }

    #[inline]
    pub fn zone(&self) -> Option<&CrossingZone> {
        self.zone.as_ref()
    }

    #[inline]
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    #[inline]
    pub fn tracker(&self) -> &LowPassTracker {
        &self.tracker
    }

    #[inline]
    pub fn last_report(&self) -> &FrameReport {
        &self.last_report
    }

    fn sync_zone(&mut self, width: f32) -> Result<CrossingZone, Error> {
        let zone = match self.zone {
            Some(mut zone) => {
                zone.resize(width)?;
                zone
            }
            None => {
                let zone = CrossingZone::with_config(width, &self.config.zone)?;
                let lines = zone.lines();
                info!(
                    width,
                    arm_x = lines.arm_x,
                    middle_x = lines.middle_x,
                    disarm_x = lines.disarm_x,
                    "crossing zone set"
                );
                zone
            }
        };

        self.zone = Some(zone);

        Ok(zone)
    }
}

impl Default for CheckoutLane {
    fn default() -> Self {
        Self {
            config: Config::default(),
            tracker: LowPassTracker::default(),
            zone: None,
            prices: PriceTable::floral_shop(),
            last_report: FrameReport::default(),
        }
    }
}

impl crate::Scanning for CheckoutLane {
    fn update(&mut self, frame: &Frame) -> Result<Vec<CheckoutEvent>, Error> {
        let width = frame.width() as f32;

        // a failed resize keeps the previous geometry in place
        let zone = match self.sync_zone(width) {
            Ok(zone) => zone,
            Err(err) => {
                warn!(frame = frame.ordinal, "skipping frame: {}", err);
                return Err(err);
            }
        };

        let stable_tracks = self.tracker.update(&frame.detections, frame.ordinal).len();

        let mut events = Vec::new();
        for track in self.tracker.stable_mut() {
            if zone.step(track) {
                let unit_price = self.prices.price_of(&track.class_id);
                info!(class = %track.class_id, unit_price, frame = frame.ordinal, "item scanned");

                events.push(CheckoutEvent {
                    class_id: track.class_id.clone(),
                    unit_price,
                });
            }
        }

        self.last_report = FrameReport {
            ordinal: frame.ordinal,
            detections: frame.len(),
            tracked: self.tracker.len(),
            stable_tracks,
            events: events.len(),
        };

        Ok(events)
    }

    #[inline]
    fn tracks(&self) -> Rc<[Track]> {
        self.tracker
            .stable()
            .into_values()
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }
}

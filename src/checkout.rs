use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};
use tracing::debug;

/// One physical pass of an item through the scan line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CheckoutEvent {
    pub class_id: String,
    pub unit_price: f64,
}

/// Unit prices by class label.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct PriceTable(BTreeMap<String, f64>);

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flower shop catalogue the checkout model was trained on.
    pub fn floral_shop() -> Self {
        [("red_tulip", 0.75), ("yellow_tulip", 0.75), ("blue_iris", 1.50)]
            .into_iter()
            .collect()
    }

    pub fn insert(&mut self, class: impl Into<String>, price: f64) -> Option<f64> {
        self.0.insert(class.into(), price)
    }

    #[inline]
    pub fn contains(&self, class: &str) -> bool {
        self.0.contains_key(class)
    }

    /// Price of `class`, `0.0` when it is not in the table.
    #[inline]
    pub fn price_of(&self, class: &str) -> f64 {
        self.0.get(class).copied().unwrap_or(0.0)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, p)| (c.into(), p)).collect())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TransactionSnapshot {
    pub counts: BTreeMap<String, u32>,
    pub total: f64,
}

impl TransactionSnapshot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.total <= 0.0
    }

    #[inline]
    pub fn count(&self, class: &str) -> u32 {
        self.counts.get(class).copied().unwrap_or(0)
    }
}

/// Running counts and total of the current transaction.
#[derive(Debug, Default)]
pub struct Aggregator {
    snapshot: TransactionSnapshot,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &CheckoutEvent, prices: &PriceTable) -> &TransactionSnapshot {
        *self
            .snapshot
            .counts
            .entry(event.class_id.clone())
            .or_insert(0) += 1;

        if !prices.contains(&event.class_id) {
            debug!(class = %event.class_id, "unpriced class counted at 0.00");
        }

        self.snapshot.total += prices.price_of(&event.class_id);

        &self.snapshot
    }

    pub fn reset(&mut self) -> &TransactionSnapshot {
        self.snapshot = TransactionSnapshot::default();

        &self.snapshot
    }

    #[inline]
    pub fn snapshot(&self) -> &TransactionSnapshot {
        &self.snapshot
    }
}

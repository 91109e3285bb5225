use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::checkout::{Aggregator, CheckoutEvent, PriceTable, TransactionSnapshot};
use crate::error::Error;

/// A transaction as handed to the persistence collaborator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub counts: BTreeMap<String, u32>,
    pub total: f64,
}

/// Storage / payment backend. A returned error leaves the register untouched.
pub trait TransactionSink {
    type Error: std::fmt::Display;

    fn submit(&mut self, tx: &Transaction) -> Result<(), Self::Error>;
}

/// Keeps submitted transactions in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub transactions: Vec<Transaction>,
}

impl TransactionSink for MemorySink {
    type Error = std::convert::Infallible;

    fn submit(&mut self, tx: &Transaction) -> Result<(), Self::Error> {
        self.transactions.push(tx.clone());
        Ok(())
    }
}

/// The open transaction of a checkout lane.
#[derive(Debug)]
pub struct Register {
    transaction_id: Uuid,
    start_time: DateTime<Utc>,
    aggregator: Aggregator,
}

impl Register {
    pub fn new() -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            start_time: Utc::now(),
            aggregator: Aggregator::new(),
        }
    }

    pub fn apply(&mut self, event: &CheckoutEvent, prices: &PriceTable) -> &TransactionSnapshot {
        let snapshot = self.aggregator.apply(event, prices);

        info!(
            tx = %self.transaction_id,
            class = %event.class_id,
            count = snapshot.count(&event.class_id),
            total = snapshot.total,
            "item added"
        );

        snapshot
    }

    #[inline]
    pub fn snapshot(&self) -> &TransactionSnapshot {
        self.aggregator.snapshot()
    }

    #[inline]
    pub fn transaction_id(&self) -> Uuid {
        self.transaction_id
    }

    pub fn transaction(&self) -> Transaction {
        let snapshot = self.aggregator.snapshot();

        Transaction {
            transaction_id: self.transaction_id,
            start_time: self.start_time,
            counts: snapshot.counts.clone(),
            total: snapshot.total,
        }
    }

    /// Submits the open transaction and starts a new one on success.
    pub fn finalize<S: TransactionSink>(&mut self, sink: &mut S) -> Result<Transaction, Error> {
        if self.aggregator.snapshot().is_empty() {
            return Err(Error::EmptyTransaction);
        }

        let tx = self.transaction();

        if let Err(err) = sink.submit(&tx) {
            warn!(tx = %tx.transaction_id, "submit failed: {}", err);
            return Err(Error::Submit(err.to_string()));
        }

        info!(tx = %tx.transaction_id, total = tx.total, "transaction finalized");

        self.aggregator.reset();
        self.transaction_id = Uuid::new_v4();
        self.start_time = Utc::now();

        Ok(tx)
    }

    /// Drops the open transaction without submitting it.
    pub fn void(&mut self) {
        self.aggregator.reset();
        self.transaction_id = Uuid::new_v4();
        self.start_time = Utc::now();
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl TransactionSink for FailingSink {
        type Error = String;

        fn submit(&mut self, _tx: &Transaction) -> Result<(), Self::Error> {
            Err("backend unavailable".to_string())
        }
    }

    fn event(class: &str) -> CheckoutEvent {
        CheckoutEvent {
            class_id: class.to_string(),
            unit_price: 0.0,
        }
    }

    #[test]
    fn empty_transaction_is_not_submitted() {
        let mut register = Register::new();
        let mut sink = MemorySink::default();

        assert!(matches!(
            register.finalize(&mut sink),
            Err(Error::EmptyTransaction)
        ));
        assert!(sink.transactions.is_empty());
    }

    #[test]
    fn finalize_submits_and_starts_fresh() {
        let prices = PriceTable::floral_shop();
        let mut register = Register::new();
        let mut sink = MemorySink::default();
        register.apply(&event("blue_iris"), &prices);
        register.apply(&event("red_tulip"), &prices);

        let first_id = register.transaction_id();
        let tx = register.finalize(&mut sink).unwrap();

        assert_eq!(tx.transaction_id, first_id);
        assert_eq!(tx.counts["blue_iris"], 1);
        assert_eq!(tx.total, 2.25);
        assert_eq!(sink.transactions, vec![tx]);

        assert_ne!(register.transaction_id(), first_id);
        assert!(register.snapshot().is_empty());
    }

    #[test]
    fn failed_submit_keeps_transaction() {
        let prices = PriceTable::floral_shop();
        let mut register = Register::new();
        register.apply(&event("yellow_tulip"), &prices);
        let id = register.transaction_id();

        assert!(matches!(
            register.finalize(&mut FailingSink),
            Err(Error::Submit(_))
        ));
        assert_eq!(register.transaction_id(), id);
        assert_eq!(register.snapshot().count("yellow_tulip"), 1);
    }

    #[test]
    fn transaction_serializes_for_storage() {
        let mut register = Register::new();
        register.apply(&event("red_tulip"), &PriceTable::floral_shop());

        let json = serde_json::to_value(register.transaction()).unwrap();

        assert_eq!(json["counts"]["red_tulip"], 1);
        assert_eq!(json["transaction_id"], register.transaction_id().to_string());
        assert!(json["start_time"].is_string());
    }

    #[test]
    fn void_discards_items() {
        let mut register = Register::new();
        register.apply(&event("red_tulip"), &PriceTable::floral_shop());
        let id = register.transaction_id();

        register.void();

        assert!(register.snapshot().is_empty());
        assert_ne!(register.transaction_id(), id);
    }
}

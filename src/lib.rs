#![doc(test(attr(deny(warnings))))]

//! Bizledger provides the transaction ledger, category taxonomy, and metrics
//! aggregation that power a small multi-business bookkeeping dashboard.
//!
//! Rendering, form handling, and chart drawing live in the consumer; this
//! crate owns the data model, its persistence contract, and the pure
//! computations that turn a raw transaction list into period summaries.

pub mod codec;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod repository;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bizledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}

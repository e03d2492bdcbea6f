#![doc(test(attr(deny(warnings))))]

//! Partner Books keeps the accounts of a three-partner shop: daily sales,
//! expenses, and deductions, archived day by day, rolled up monthly, and
//! netted into running partner balances.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Partner Books tracing initialized.");
    });
}

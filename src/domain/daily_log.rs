use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::month::Month;
use super::partner::PartnerMap;
use super::records::{Deduction, Expense, Sale};

/// Snapshot produced by archiving a day. Created once and never re-archived;
/// embedded line items may still be edited or deleted afterwards, in which
/// case every aggregate field is refreshed from the embedded arrays before
/// the log is visible again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub total_sales: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub partner_shares: PartnerMap,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl DailyLog {
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

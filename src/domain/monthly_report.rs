use serde::{Deserialize, Serialize};

use super::month::Month;
use super::partner::PartnerMap;

/// Aggregate of all daily logs in one calendar month. Totals are straight
/// sums of the logs' already-computed fields. Manual edits may break the
/// sum invariant on purpose; see `core::rollup::apply_manual_edit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub month: Month,
    pub total_sales: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub partner_shares: PartnerMap,
}

//! Monthly rollup: aggregating archived daily logs into one report per
//! calendar month.

use super::errors::CoreError;
use crate::domain::{DailyLog, Month, MonthlyReport, Partner, PartnerMap};

/// Monthly reports retained in the archive; the oldest is evicted past this.
pub const MONTHLY_REPORT_RETENTION: usize = 24;

/// Aggregates every daily log dated in `month` into a report.
///
/// Totals and per-partner shares are straight sums of the logs'
/// already-computed fields; raw deductions are never re-derived here.
/// Refuses with [`CoreError::NothingToRollUp`] when the month has no logs.
pub fn generate_report(daily_logs: &[DailyLog], month: Month) -> Result<MonthlyReport, CoreError> {
    let in_month: Vec<&DailyLog> = daily_logs
        .iter()
        .filter(|log| log.month() == month)
        .collect();
    if in_month.is_empty() {
        return Err(CoreError::NothingToRollUp(month));
    }

    let mut partner_shares = PartnerMap::default();
    for log in &in_month {
        partner_shares.add(&log.partner_shares);
    }

    Ok(MonthlyReport {
        month,
        total_sales: in_month.iter().map(|log| log.total_sales).sum(),
        total_expenses: in_month.iter().map(|log| log.total_expenses).sum(),
        net_profit: in_month.iter().map(|log| log.net_profit).sum(),
        partner_shares,
    })
}

/// Applies a manual edit to a report's totals.
///
/// Net profit becomes the difference of the new totals, and the partner
/// shares are overwritten with an equal three-way split of it. This discards
/// any deduction netting the report previously carried; daily-log edits keep
/// deduction-aware shares, and the asymmetry is intentional.
pub fn apply_manual_edit(report: &mut MonthlyReport, total_sales: f64, total_expenses: f64) {
    report.total_sales = total_sales;
    report.total_expenses = total_expenses;
    report.net_profit = total_sales - total_expenses;
    let share = report.net_profit / Partner::COUNT as f64;
    report.partner_shares = PartnerMap::from_fn(|_| share);
}

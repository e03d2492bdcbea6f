//! Daily archival: converting the open current period into an immutable,
//! dated `DailyLog` snapshot.

use chrono::{Local, NaiveDate};

use super::errors::CoreError;
use super::split::compute_shares;
use crate::domain::{DailyLog, Deduction, Expense, Sale};

/// Daily logs retained in the archive; the oldest is evicted past this.
pub const DAILY_LOG_RETENTION: usize = 100;

/// Builds the archival snapshot for one day.
///
/// Refuses with [`CoreError::NothingToArchive`] when all three current
/// collections are empty. `date` defaults to the local calendar date. The
/// caller owns the side effects: prepending the log to the archive, capping
/// retention, and clearing the current collections.
pub fn archive_day(
    sales: &[Sale],
    expenses: &[Expense],
    deductions: &[Deduction],
    date: Option<NaiveDate>,
) -> Result<DailyLog, CoreError> {
    if sales.is_empty() && expenses.is_empty() && deductions.is_empty() {
        return Err(CoreError::NothingToArchive);
    }

    let breakdown = compute_shares(sales, expenses, deductions);
    Ok(DailyLog {
        date: date.unwrap_or_else(|| Local::now().date_naive()),
        total_sales: breakdown.total_sales,
        total_expenses: breakdown.total_expenses,
        net_profit: breakdown.net_profit,
        partner_shares: breakdown.partner_shares,
        deductions: deductions.to_vec(),
        sales: sales.to_vec(),
        expenses: expenses.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Partner;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn refuses_empty_period() {
        let err = archive_day(&[], &[], &[], Some(day())).unwrap_err();
        assert!(matches!(err, CoreError::NothingToArchive));
    }

    #[test]
    fn snapshots_collections_with_aggregates() {
        let sales = vec![Sale::new("Customer", 1000.0, "Design", "7", day())];
        let expenses = vec![Expense::new(100.0, "Ink", day())];
        let log = archive_day(&sales, &expenses, &[], Some(day())).unwrap();
        assert_eq!(log.date, day());
        assert_eq!(log.net_profit, 900.0);
        assert_eq!(log.partner_shares.get(Partner::Fahd), 300.0);
        assert_eq!(log.sales, sales);
        assert_eq!(log.expenses, expenses);
        assert!(log.deductions.is_empty());
    }

    #[test]
    fn deductions_alone_are_archivable() {
        let deductions = vec![Deduction::new(Partner::Hamad, 25.0, "Advance", day())];
        let log = archive_day(&[], &[], &deductions, Some(day())).unwrap();
        assert_eq!(log.net_profit, 0.0);
        assert_eq!(log.partner_shares.get(Partner::Hamad), -25.0);
    }

    #[test]
    fn date_defaults_to_today() {
        let sales = vec![Sale::new("Customer", 10.0, "Copies", "8", day())];
        let log = archive_day(&sales, &[], &[], None).unwrap();
        assert_eq!(log.date, Local::now().date_naive());
    }
}

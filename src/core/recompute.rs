//! Line-item mutations on archived daily logs. Every update or delete runs
//! through one shared "apply, then recalculate" path so a log's aggregates
//! are refreshed all together or not at all.

use uuid::Uuid;

use super::errors::CoreError;
use super::split::compute_shares;
use crate::domain::{DailyLog, Deduction, Expense, Identifiable, Sale};

/// Refreshes every aggregate field of `log` from its embedded arrays.
pub fn recalculate(log: &mut DailyLog) {
    let breakdown = compute_shares(&log.sales, &log.expenses, &log.deductions);
    log.total_sales = breakdown.total_sales;
    log.total_expenses = breakdown.total_expenses;
    log.net_profit = breakdown.net_profit;
    log.partner_shares = breakdown.partner_shares;
}

pub fn update_sale(log: &mut DailyLog, sale: Sale) -> Result<(), CoreError> {
    replace(&mut log.sales, sale)?;
    recalculate(log);
    Ok(())
}

pub fn update_expense(log: &mut DailyLog, expense: Expense) -> Result<(), CoreError> {
    replace(&mut log.expenses, expense)?;
    recalculate(log);
    Ok(())
}

pub fn update_deduction(log: &mut DailyLog, deduction: Deduction) -> Result<(), CoreError> {
    replace(&mut log.deductions, deduction)?;
    recalculate(log);
    Ok(())
}

pub fn remove_sale(log: &mut DailyLog, id: Uuid) -> Result<Sale, CoreError> {
    let removed = remove(&mut log.sales, id)?;
    recalculate(log);
    Ok(removed)
}

pub fn remove_expense(log: &mut DailyLog, id: Uuid) -> Result<Expense, CoreError> {
    let removed = remove(&mut log.expenses, id)?;
    recalculate(log);
    Ok(removed)
}

pub fn remove_deduction(log: &mut DailyLog, id: Uuid) -> Result<Deduction, CoreError> {
    let removed = remove(&mut log.deductions, id)?;
    recalculate(log);
    Ok(removed)
}

pub(crate) fn replace<T: Identifiable>(items: &mut [T], updated: T) -> Result<(), CoreError> {
    let slot = items
        .iter_mut()
        .find(|item| item.id() == updated.id())
        .ok_or_else(|| CoreError::ItemNotFound(updated.id()))?;
    *slot = updated;
    Ok(())
}

pub(crate) fn remove<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> Result<T, CoreError> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or(CoreError::ItemNotFound(id))?;
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::archive::archive_day;
    use crate::domain::Partner;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn sample_log() -> DailyLog {
        let sales = vec![
            Sale::new("First", 600.0, "Design", "1", day()),
            Sale::new("Second", 400.0, "Print", "2", day()),
        ];
        let expenses = vec![Expense::new(100.0, "Paper", day())];
        let deductions = vec![Deduction::new(Partner::Hamad, 50.0, "Advance", day())];
        archive_day(&sales, &expenses, &deductions, Some(day())).unwrap()
    }

    #[test]
    fn deleting_a_sale_refreshes_dependent_aggregates_only() {
        let mut log = sample_log();
        let expenses_before = log.total_expenses;
        let id = log.sales[1].id;

        remove_sale(&mut log, id).unwrap();
        assert_eq!(log.total_sales, 600.0);
        assert_eq!(log.net_profit, 500.0);
        assert_eq!(log.total_expenses, expenses_before);
        // 500 / 3 minus Hamad's 50 advance
        assert_eq!(log.partner_shares.get(Partner::Hamad), 500.0 / 3.0 - 50.0);
    }

    #[test]
    fn editing_a_deduction_leaves_totals_untouched() {
        let mut log = sample_log();
        let mut deduction = log.deductions[0].clone();
        deduction.amount = 110.0;

        update_deduction(&mut log, deduction).unwrap();
        assert_eq!(log.total_sales, 1000.0);
        assert_eq!(log.total_expenses, 100.0);
        assert_eq!(log.partner_shares.get(Partner::Hamad), 300.0 - 110.0);
        assert_eq!(log.partner_shares.get(Partner::Fahd), 300.0);
    }

    #[test]
    fn updating_an_expense_recomputes_profit() {
        let mut log = sample_log();
        let mut expense = log.expenses[0].clone();
        expense.amount = 400.0;

        update_expense(&mut log, expense).unwrap();
        assert_eq!(log.total_expenses, 400.0);
        assert_eq!(log.net_profit, 600.0);
        assert_eq!(log.partner_shares.get(Partner::Jamil), 200.0);
    }

    #[test]
    fn unknown_ids_are_rejected_without_mutation() {
        let mut log = sample_log();
        let before = log.clone();
        let err = remove_expense(&mut log, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound(_)));
        assert_eq!(log, before);
    }
}

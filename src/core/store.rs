//! The `Books`: single in-memory source of truth for the current period, the
//! archives, and the partner roster, with validated mutation methods. All
//! call sites that edit archived data go through the shared recompute path.

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use super::archive::{archive_day, DAILY_LOG_RETENTION};
use super::balance::{compute_balances, settlement_deduction};
use super::errors::CoreError;
use super::recompute;
use super::rollup::{apply_manual_edit, generate_report, MONTHLY_REPORT_RETENTION};
use super::split::{compute_shares, SplitBreakdown};
use crate::domain::{
    DailyLog, Deduction, Expense, ItemOrigin, Month, MonthlyReport, Partner, PartnerBalance,
    PartnerMap, Sale,
};

/// A deduction tagged with where it lives, as shown on a partner statement.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementEntry {
    pub origin: ItemOrigin,
    pub deduction: Deduction,
}

/// One partner's deductions for one month, merged from the current period
/// and the archived logs.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementView {
    pub partner: Partner,
    pub month: Month,
    pub entries: Vec<StatementEntry>,
    pub total: f64,
}

/// An expense tagged with where it lives, as shown on the monthly detail.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub origin: ItemOrigin,
    pub expense: Expense,
}

/// All expenses for one month, merged from the current period and the
/// archived logs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDetailView {
    pub month: Month,
    pub entries: Vec<ExpenseEntry>,
    pub total: f64,
}

/// In-memory bookkeeping state. Mutation methods validate first and touch
/// nothing on refusal; aggregates for the current period are derived on
/// read, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Books {
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub deductions: Vec<Deduction>,
    pub daily_logs: Vec<DailyLog>,
    pub monthly_reports: Vec<MonthlyReport>,
    pub partner_debts: Vec<PartnerBalance>,
}

impl Default for Books {
    fn default() -> Self {
        Self {
            sales: Vec::new(),
            expenses: Vec::new(),
            deductions: Vec::new(),
            daily_logs: Vec::new(),
            monthly_reports: Vec::new(),
            partner_debts: PartnerBalance::zeroed_roster(),
        }
    }
}

impl Books {
    pub fn new() -> Self {
        Self::default()
    }

    // --- current-period records ---

    pub fn add_sale(&mut self, sale: Sale) -> Result<Uuid, CoreError> {
        validate_sale(&sale)?;
        let id = sale.id;
        self.sales.insert(0, sale);
        Ok(id)
    }

    pub fn add_expense(&mut self, expense: Expense) -> Result<Uuid, CoreError> {
        validate_expense(&expense)?;
        let id = expense.id;
        self.expenses.insert(0, expense);
        Ok(id)
    }

    pub fn add_deduction(&mut self, deduction: Deduction) -> Result<Uuid, CoreError> {
        validate_deduction(&deduction)?;
        let id = deduction.id;
        self.deductions.insert(0, deduction);
        Ok(id)
    }

    /// Records a settlement paid out to `partner`: a negative deduction in
    /// the current period, absorbed into balances at the next archival.
    pub fn record_settlement(
        &mut self,
        partner: Partner,
        amount: f64,
        note: &str,
        date: Option<NaiveDate>,
    ) -> Result<Uuid, CoreError> {
        ensure_positive(amount, "settlement amount")?;
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let deduction = settlement_deduction(partner, amount, note, date);
        let id = deduction.id;
        self.deductions.insert(0, deduction);
        Ok(id)
    }

    /// Aggregates for the open period, derived on read.
    pub fn current_summary(&self) -> SplitBreakdown {
        compute_shares(&self.sales, &self.expenses, &self.deductions)
    }

    // --- line-item edits, dispatched on origin ---

    pub fn update_sale_at(&mut self, origin: ItemOrigin, sale: Sale) -> Result<(), CoreError> {
        validate_sale(&sale)?;
        match origin {
            ItemOrigin::Current => recompute::replace(&mut self.sales, sale),
            ItemOrigin::Archived { log_index } => {
                recompute::update_sale(self.log_mut(log_index)?, sale)
            }
        }
    }

    pub fn remove_sale_at(&mut self, origin: ItemOrigin, id: Uuid) -> Result<Sale, CoreError> {
        match origin {
            ItemOrigin::Current => recompute::remove(&mut self.sales, id),
            ItemOrigin::Archived { log_index } => {
                recompute::remove_sale(self.log_mut(log_index)?, id)
            }
        }
    }

    pub fn update_expense_at(
        &mut self,
        origin: ItemOrigin,
        expense: Expense,
    ) -> Result<(), CoreError> {
        validate_expense(&expense)?;
        match origin {
            ItemOrigin::Current => recompute::replace(&mut self.expenses, expense),
            ItemOrigin::Archived { log_index } => {
                recompute::update_expense(self.log_mut(log_index)?, expense)
            }
        }
    }

    pub fn remove_expense_at(
        &mut self,
        origin: ItemOrigin,
        id: Uuid,
    ) -> Result<Expense, CoreError> {
        match origin {
            ItemOrigin::Current => recompute::remove(&mut self.expenses, id),
            ItemOrigin::Archived { log_index } => {
                recompute::remove_expense(self.log_mut(log_index)?, id)
            }
        }
    }

    pub fn update_deduction_at(
        &mut self,
        origin: ItemOrigin,
        deduction: Deduction,
    ) -> Result<(), CoreError> {
        validate_deduction(&deduction)?;
        match origin {
            ItemOrigin::Current => recompute::replace(&mut self.deductions, deduction),
            ItemOrigin::Archived { log_index } => {
                recompute::update_deduction(self.log_mut(log_index)?, deduction)
            }
        }
    }

    pub fn remove_deduction_at(
        &mut self,
        origin: ItemOrigin,
        id: Uuid,
    ) -> Result<Deduction, CoreError> {
        match origin {
            ItemOrigin::Current => recompute::remove(&mut self.deductions, id),
            ItemOrigin::Archived { log_index } => {
                recompute::remove_deduction(self.log_mut(log_index)?, id)
            }
        }
    }

    // --- archival ---

    /// Archives the current period into a new daily log, newest first, and
    /// clears the open collections. Returns the archive date.
    pub fn archive_day(&mut self, date: Option<NaiveDate>) -> Result<NaiveDate, CoreError> {
        let log = archive_day(&self.sales, &self.expenses, &self.deductions, date)?;
        let archived_on = log.date;
        self.daily_logs.insert(0, log);
        self.daily_logs.truncate(DAILY_LOG_RETENTION);
        self.sales.clear();
        self.expenses.clear();
        self.deductions.clear();
        Ok(archived_on)
    }

    pub fn daily_log(&self, index: usize) -> Result<&DailyLog, CoreError> {
        self.daily_logs.get(index).ok_or(CoreError::LogNotFound(index))
    }

    pub fn remove_daily_log(&mut self, index: usize) -> Result<DailyLog, CoreError> {
        if index >= self.daily_logs.len() {
            return Err(CoreError::LogNotFound(index));
        }
        Ok(self.daily_logs.remove(index))
    }

    // --- monthly reports ---

    pub fn report_exists(&self, month: Month) -> bool {
        self.monthly_reports
            .iter()
            .any(|report| report.month == month)
    }

    /// Rolls the month's daily logs up into a new report, newest first.
    /// Duplicate-month confirmation is the caller's decision; proceeding
    /// appends a second entry rather than replacing the first.
    pub fn generate_monthly_report(&mut self, month: Month) -> Result<&MonthlyReport, CoreError> {
        let report = generate_report(&self.daily_logs, month)?;
        self.monthly_reports.insert(0, report);
        self.monthly_reports.truncate(MONTHLY_REPORT_RETENTION);
        Ok(&self.monthly_reports[0])
    }

    pub fn monthly_report(&self, month: Month) -> Result<&MonthlyReport, CoreError> {
        self.monthly_reports
            .iter()
            .find(|report| report.month == month)
            .ok_or(CoreError::ReportNotFound(month))
    }

    pub fn edit_monthly_report(
        &mut self,
        month: Month,
        total_sales: f64,
        total_expenses: f64,
    ) -> Result<(), CoreError> {
        ensure_finite(total_sales, "total sales")?;
        ensure_finite(total_expenses, "total expenses")?;
        let report = self
            .monthly_reports
            .iter_mut()
            .find(|report| report.month == month)
            .ok_or(CoreError::ReportNotFound(month))?;
        apply_manual_edit(report, total_sales, total_expenses);
        Ok(())
    }

    pub fn remove_monthly_report(&mut self, month: Month) -> Result<MonthlyReport, CoreError> {
        let index = self
            .monthly_reports
            .iter()
            .position(|report| report.month == month)
            .ok_or(CoreError::ReportNotFound(month))?;
        Ok(self.monthly_reports.remove(index))
    }

    // --- derived views ---

    pub fn balances(&self) -> PartnerMap {
        compute_balances(&self.daily_logs)
    }

    /// One partner's deductions for `month`, merged from the current period
    /// and every archived log, newest first.
    pub fn partner_statement(&self, partner: Partner, month: Month) -> StatementView {
        let mut entries: Vec<StatementEntry> = self
            .deductions
            .iter()
            .filter(|deduction| deduction.partner == partner)
            .map(|deduction| StatementEntry {
                origin: ItemOrigin::Current,
                deduction: deduction.clone(),
            })
            .collect();
        for (log_index, log) in self.daily_logs.iter().enumerate() {
            entries.extend(
                log.deductions
                    .iter()
                    .filter(|deduction| deduction.partner == partner)
                    .map(|deduction| StatementEntry {
                        origin: ItemOrigin::Archived { log_index },
                        deduction: deduction.clone(),
                    }),
            );
        }
        entries.retain(|entry| month.contains(entry.deduction.date));
        entries.sort_by(|a, b| b.deduction.date.cmp(&a.deduction.date));
        let total = entries.iter().map(|entry| entry.deduction.amount).sum();
        StatementView {
            partner,
            month,
            entries,
            total,
        }
    }

    /// All expenses for `month`, merged from the current period and every
    /// archived log, newest first.
    pub fn expense_detail(&self, month: Month) -> ExpenseDetailView {
        let mut entries: Vec<ExpenseEntry> = self
            .expenses
            .iter()
            .map(|expense| ExpenseEntry {
                origin: ItemOrigin::Current,
                expense: expense.clone(),
            })
            .collect();
        for (log_index, log) in self.daily_logs.iter().enumerate() {
            entries.extend(log.expenses.iter().map(|expense| ExpenseEntry {
                origin: ItemOrigin::Archived { log_index },
                expense: expense.clone(),
            }));
        }
        entries.retain(|entry| month.contains(entry.expense.date));
        entries.sort_by(|a, b| b.expense.date.cmp(&a.expense.date));
        let total = entries.iter().map(|entry| entry.expense.amount).sum();
        ExpenseDetailView {
            month,
            entries,
            total,
        }
    }

    /// Full-state wipe: clears every collection and zeroes the roster.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn log_mut(&mut self, index: usize) -> Result<&mut DailyLog, CoreError> {
        self.daily_logs
            .get_mut(index)
            .ok_or(CoreError::LogNotFound(index))
    }
}

fn validate_sale(sale: &Sale) -> Result<(), CoreError> {
    ensure_positive(sale.amount, "sale amount")?;
    ensure_not_blank(&sale.customer_name, "customer name")?;
    ensure_not_blank(&sale.service_type, "service type")
}

fn validate_expense(expense: &Expense) -> Result<(), CoreError> {
    ensure_positive(expense.amount, "expense amount")?;
    ensure_not_blank(&expense.expense_type, "expense type")
}

fn validate_deduction(deduction: &Deduction) -> Result<(), CoreError> {
    ensure_finite(deduction.amount, "deduction amount")?;
    if deduction.amount == 0.0 {
        return Err(CoreError::Validation(
            "deduction amount must not be zero".into(),
        ));
    }
    ensure_not_blank(&deduction.deduction_type, "deduction type")
}

fn ensure_finite(amount: f64, what: &str) -> Result<(), CoreError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{what} must be a number")))
    }
}

fn ensure_positive(amount: f64, what: &str) -> Result<(), CoreError> {
    ensure_finite(amount, what)?;
    if amount > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{what} must be positive")))
    }
}

fn ensure_not_blank(value: &str, what: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{what} is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn seeded_books() -> Books {
        let mut books = Books::new();
        books
            .add_sale(Sale::new("Customer", 1000.0, "Design", "1", day()))
            .unwrap();
        books.add_expense(Expense::new(100.0, "Paper", day())).unwrap();
        books
            .add_deduction(Deduction::new(Partner::Hamad, 50.0, "Advance", day()))
            .unwrap();
        books
    }

    #[test]
    fn rejects_invalid_records_without_partial_state() {
        let mut books = Books::new();
        assert!(books
            .add_sale(Sale::new("", 10.0, "Design", "1", day()))
            .is_err());
        assert!(books
            .add_sale(Sale::new("Customer", -1.0, "Design", "1", day()))
            .is_err());
        assert!(books.add_expense(Expense::new(f64::NAN, "Paper", day())).is_err());
        assert!(books
            .add_deduction(Deduction::new(Partner::Fahd, 0.0, "Advance", day()))
            .is_err());
        assert_eq!(books, Books::new());
    }

    #[test]
    fn archive_clears_current_and_prepends_log() {
        let mut books = seeded_books();
        let archived_on = books.archive_day(Some(day())).unwrap();
        assert_eq!(archived_on, day());
        assert!(books.sales.is_empty());
        assert!(books.expenses.is_empty());
        assert!(books.deductions.is_empty());
        assert_eq!(books.daily_logs.len(), 1);
        assert_eq!(books.daily_logs[0].net_profit, 900.0);
        // the cleared period computes to zeros
        assert_eq!(books.current_summary(), SplitBreakdown::default());
    }

    #[test]
    fn archive_refusal_leaves_archive_untouched() {
        let mut books = Books::new();
        let err = books.archive_day(Some(day())).unwrap_err();
        assert!(matches!(err, CoreError::NothingToArchive));
        assert!(books.daily_logs.is_empty());
    }

    #[test]
    fn archive_caps_retention_by_evicting_oldest() {
        let mut books = Books::new();
        for offset in 0..DAILY_LOG_RETENTION as u32 + 5 {
            let date = day() + chrono::Duration::days(i64::from(offset));
            books
                .add_sale(Sale::new("Customer", 10.0, "Copies", "1", date))
                .unwrap();
            books.archive_day(Some(date)).unwrap();
        }
        assert_eq!(books.daily_logs.len(), DAILY_LOG_RETENTION);
        // newest first; the earliest five days fell off the end
        assert_eq!(
            books.daily_logs[0].date,
            day() + chrono::Duration::days(DAILY_LOG_RETENTION as i64 + 4)
        );
        assert_eq!(
            books.daily_logs.last().unwrap().date,
            day() + chrono::Duration::days(5)
        );
    }

    #[test]
    fn settlement_raises_share_at_next_archival() {
        let mut unsettled = seeded_books();
        unsettled.archive_day(Some(day())).unwrap();
        let baseline = unsettled.balances().get(Partner::Hamad);

        let mut settled = seeded_books();
        settled
            .record_settlement(Partner::Hamad, 200.0, "cash payout", Some(day()))
            .unwrap();
        settled.archive_day(Some(day())).unwrap();
        assert_eq!(settled.balances().get(Partner::Hamad), baseline + 200.0);
    }

    #[test]
    fn duplicate_rollup_appends_rather_than_replacing() {
        let mut books = seeded_books();
        books.archive_day(Some(day())).unwrap();
        let month = Month::of(day());
        books.generate_monthly_report(month).unwrap();
        assert!(books.report_exists(month));
        books.generate_monthly_report(month).unwrap();
        assert_eq!(books.monthly_reports.len(), 2);
    }

    #[test]
    fn monthly_reports_cap_retention_by_evicting_oldest() {
        let mut books = Books::new();
        for offset in 0..=MONTHLY_REPORT_RETENTION {
            let year = 2020 + (offset / 12) as i32;
            let month = (offset % 12) as u32 + 1;
            let date = NaiveDate::from_ymd_opt(year, month, 5).unwrap();
            books
                .add_sale(Sale::new("Customer", 300.0, "Design", "1", date))
                .unwrap();
            books.archive_day(Some(date)).unwrap();
            books
                .generate_monthly_report(Month::new(year, month).unwrap())
                .unwrap();
        }
        assert_eq!(books.monthly_reports.len(), MONTHLY_REPORT_RETENTION);
        // newest first; the first month generated fell off the end
        assert_eq!(
            books.monthly_reports[0].month,
            Month::new(2022, 1).unwrap()
        );
        assert_eq!(
            books.monthly_reports.last().unwrap().month,
            Month::new(2020, 2).unwrap()
        );
        assert!(!books.report_exists(Month::new(2020, 1).unwrap()));
    }

    #[test]
    fn statement_merges_current_and_archived_deductions() {
        let mut books = seeded_books();
        books.archive_day(Some(day())).unwrap();
        books
            .add_deduction(Deduction::new(Partner::Hamad, 30.0, "Fuel", day()))
            .unwrap();
        books
            .add_deduction(Deduction::new(Partner::Fahd, 99.0, "Other", day()))
            .unwrap();

        let view = books.partner_statement(Partner::Hamad, Month::of(day()));
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.total, 80.0);
        assert!(view
            .entries
            .iter()
            .any(|entry| entry.origin == ItemOrigin::Current));
        assert!(view
            .entries
            .iter()
            .any(|entry| entry.origin == ItemOrigin::Archived { log_index: 0 }));
    }

    #[test]
    fn expense_detail_filters_by_month() {
        let mut books = seeded_books();
        books.archive_day(Some(day())).unwrap();
        let june = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        books.add_expense(Expense::new(70.0, "Rent", june)).unwrap();

        let may_view = books.expense_detail(Month::of(day()));
        assert_eq!(may_view.total, 100.0);
        let june_view = books.expense_detail(Month::of(june));
        assert_eq!(june_view.total, 70.0);
        assert_eq!(june_view.entries[0].origin, ItemOrigin::Current);
    }

    #[test]
    fn archived_edit_keeps_log_consistent() {
        let mut books = seeded_books();
        books.archive_day(Some(day())).unwrap();
        let id = books.daily_logs[0].sales[0].id;
        let mut sale = books.daily_logs[0].sales[0].clone();
        sale.amount = 400.0;

        books
            .update_sale_at(ItemOrigin::Archived { log_index: 0 }, sale)
            .unwrap();
        let log = books.daily_log(0).unwrap();
        assert_eq!(log.total_sales, 400.0);
        assert_eq!(log.net_profit, 300.0);
        assert_eq!(log.partner_shares.get(Partner::Hamad), 50.0);

        books
            .remove_sale_at(ItemOrigin::Archived { log_index: 0 }, id)
            .unwrap();
        let log = books.daily_log(0).unwrap();
        assert_eq!(log.total_sales, 0.0);
        assert_eq!(log.total_expenses, 100.0);
    }

    #[test]
    fn reset_restores_pristine_state() {
        let mut books = seeded_books();
        books.archive_day(Some(day())).unwrap();
        books.generate_monthly_report(Month::of(day())).unwrap();
        books.reset();
        assert_eq!(books, Books::new());
        assert_eq!(books.partner_debts, PartnerBalance::zeroed_roster());
    }
}

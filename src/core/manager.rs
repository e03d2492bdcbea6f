//! `BooksManager` pairs the in-memory `Books` with a storage backend:
//! every mutation is followed by a synchronous save of the collections it
//! touched. Writes are fire-and-forget — a failed save is logged and the
//! in-memory state stays authoritative — which is the accepted consistency
//! model for a single-user local tool.

use chrono::NaiveDate;
use uuid::Uuid;

use super::errors::CoreError;
use super::split::SplitBreakdown;
use super::store::{Books, ExpenseDetailView, StatementView};
use crate::domain::{
    Deduction, Expense, ItemOrigin, Month, MonthlyReport, Partner, PartnerMap, Sale,
};
use crate::storage::{load_or_default, save_collection, StorageBackend, StoreKey};

pub struct BooksManager {
    books: Books,
    storage: Box<dyn StorageBackend>,
}

impl BooksManager {
    /// Assembles the books from the six stored collections. Missing or
    /// malformed collections come back empty; an empty roster is replaced
    /// with the zeroed three-partner default.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let mut books = Books {
            sales: load_or_default(&*storage, StoreKey::Sales),
            expenses: load_or_default(&*storage, StoreKey::Expenses),
            deductions: load_or_default(&*storage, StoreKey::Deductions),
            daily_logs: load_or_default(&*storage, StoreKey::DailyLogs),
            monthly_reports: load_or_default(&*storage, StoreKey::MonthlyReports),
            partner_debts: load_or_default(&*storage, StoreKey::PartnerDebts),
        };
        if books.partner_debts.is_empty() {
            books.partner_debts = crate::domain::PartnerBalance::zeroed_roster();
        }
        Self { books, storage }
    }

    pub fn books(&self) -> &Books {
        &self.books
    }

    // --- current-period records ---

    pub fn add_sale(&mut self, sale: Sale) -> Result<Uuid, CoreError> {
        let id = self.books.add_sale(sale)?;
        self.persist(&[StoreKey::Sales]);
        Ok(id)
    }

    pub fn add_expense(&mut self, expense: Expense) -> Result<Uuid, CoreError> {
        let id = self.books.add_expense(expense)?;
        self.persist(&[StoreKey::Expenses]);
        Ok(id)
    }

    pub fn add_deduction(&mut self, deduction: Deduction) -> Result<Uuid, CoreError> {
        let id = self.books.add_deduction(deduction)?;
        self.persist(&[StoreKey::Deductions]);
        Ok(id)
    }

    pub fn record_settlement(
        &mut self,
        partner: Partner,
        amount: f64,
        note: &str,
        date: Option<NaiveDate>,
    ) -> Result<Uuid, CoreError> {
        let id = self.books.record_settlement(partner, amount, note, date)?;
        self.persist(&[StoreKey::Deductions]);
        Ok(id)
    }

    pub fn current_summary(&self) -> SplitBreakdown {
        self.books.current_summary()
    }

    // --- line-item edits ---

    pub fn update_sale_at(&mut self, origin: ItemOrigin, sale: Sale) -> Result<(), CoreError> {
        self.books.update_sale_at(origin, sale)?;
        self.persist(&[origin_key(origin, StoreKey::Sales)]);
        Ok(())
    }

    pub fn remove_sale_at(&mut self, origin: ItemOrigin, id: Uuid) -> Result<Sale, CoreError> {
        let removed = self.books.remove_sale_at(origin, id)?;
        self.persist(&[origin_key(origin, StoreKey::Sales)]);
        Ok(removed)
    }

    pub fn update_expense_at(
        &mut self,
        origin: ItemOrigin,
        expense: Expense,
    ) -> Result<(), CoreError> {
        self.books.update_expense_at(origin, expense)?;
        self.persist(&[origin_key(origin, StoreKey::Expenses)]);
        Ok(())
    }

    pub fn remove_expense_at(
        &mut self,
        origin: ItemOrigin,
        id: Uuid,
    ) -> Result<Expense, CoreError> {
        let removed = self.books.remove_expense_at(origin, id)?;
        self.persist(&[origin_key(origin, StoreKey::Expenses)]);
        Ok(removed)
    }

    pub fn update_deduction_at(
        &mut self,
        origin: ItemOrigin,
        deduction: Deduction,
    ) -> Result<(), CoreError> {
        self.books.update_deduction_at(origin, deduction)?;
        self.persist(&[origin_key(origin, StoreKey::Deductions)]);
        Ok(())
    }

    pub fn remove_deduction_at(
        &mut self,
        origin: ItemOrigin,
        id: Uuid,
    ) -> Result<Deduction, CoreError> {
        let removed = self.books.remove_deduction_at(origin, id)?;
        self.persist(&[origin_key(origin, StoreKey::Deductions)]);
        Ok(removed)
    }

    // --- archival and rollup ---

    pub fn archive_day(&mut self, date: Option<NaiveDate>) -> Result<NaiveDate, CoreError> {
        let archived_on = self.books.archive_day(date)?;
        self.persist(&[
            StoreKey::DailyLogs,
            StoreKey::Sales,
            StoreKey::Expenses,
            StoreKey::Deductions,
        ]);
        Ok(archived_on)
    }

    pub fn remove_daily_log(&mut self, index: usize) -> Result<(), CoreError> {
        self.books.remove_daily_log(index)?;
        self.persist(&[StoreKey::DailyLogs]);
        Ok(())
    }

    pub fn report_exists(&self, month: Month) -> bool {
        self.books.report_exists(month)
    }

    pub fn generate_monthly_report(&mut self, month: Month) -> Result<MonthlyReport, CoreError> {
        let report = self.books.generate_monthly_report(month)?.clone();
        self.persist(&[StoreKey::MonthlyReports]);
        Ok(report)
    }

    pub fn edit_monthly_report(
        &mut self,
        month: Month,
        total_sales: f64,
        total_expenses: f64,
    ) -> Result<(), CoreError> {
        self.books
            .edit_monthly_report(month, total_sales, total_expenses)?;
        self.persist(&[StoreKey::MonthlyReports]);
        Ok(())
    }

    pub fn remove_monthly_report(&mut self, month: Month) -> Result<(), CoreError> {
        self.books.remove_monthly_report(month)?;
        self.persist(&[StoreKey::MonthlyReports]);
        Ok(())
    }

    // --- derived views ---

    pub fn balances(&self) -> PartnerMap {
        self.books.balances()
    }

    pub fn partner_statement(&self, partner: Partner, month: Month) -> StatementView {
        self.books.partner_statement(partner, month)
    }

    pub fn expense_detail(&self, month: Month) -> ExpenseDetailView {
        self.books.expense_detail(month)
    }

    /// Full-state wipe: clears storage and reinitializes the books,
    /// persisting the zeroed partner roster. No undo.
    pub fn reset_all(&mut self) {
        self.books.reset();
        if let Err(err) = self.storage.wipe() {
            tracing::warn!(%err, "failed to wipe stored collections");
        }
        self.persist(&[StoreKey::PartnerDebts]);
    }

    fn persist(&self, keys: &[StoreKey]) {
        for &key in keys {
            let result = match key {
                StoreKey::Sales => save_collection(&*self.storage, key, &self.books.sales),
                StoreKey::Expenses => save_collection(&*self.storage, key, &self.books.expenses),
                StoreKey::Deductions => {
                    save_collection(&*self.storage, key, &self.books.deductions)
                }
                StoreKey::DailyLogs => save_collection(&*self.storage, key, &self.books.daily_logs),
                StoreKey::MonthlyReports => {
                    save_collection(&*self.storage, key, &self.books.monthly_reports)
                }
                StoreKey::PartnerDebts => {
                    save_collection(&*self.storage, key, &self.books.partner_debts)
                }
            };
            if let Err(err) = result {
                tracing::warn!(key = key.as_str(), %err, "failed to persist collection");
            }
        }
    }
}

fn origin_key(origin: ItemOrigin, current_key: StoreKey) -> StoreKey {
    match origin {
        ItemOrigin::Current => current_key,
        ItemOrigin::Archived { .. } => StoreKey::DailyLogs,
    }
}

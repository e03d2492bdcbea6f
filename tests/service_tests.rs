use chrono::NaiveDate;
use partner_books::core::{netting_suggestions, Books, CoreError};
use partner_books::domain::{Deduction, Expense, ItemOrigin, Month, Partner, Sale};

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn seeded_books() -> Books {
    let mut books = Books::new();
    books
        .add_sale(Sale::new("Aisha", 1200.0, "Printing", "1001", day(10)))
        .unwrap();
    books
        .add_sale(Sale::new("Omar", 300.0, "Design", "1002", day(10)))
        .unwrap();
    books
        .add_expense(Expense::new(300.0, "Supplies", day(10)))
        .unwrap();
    books
        .add_deduction(Deduction::new(Partner::Fahd, 100.0, "Advance", day(10)))
        .unwrap();
    books
}

#[test]
fn full_day_cycle_from_entry_to_archive() {
    let mut books = seeded_books();

    let summary = books.current_summary();
    assert_eq!(summary.total_sales, 1500.0);
    assert_eq!(summary.net_profit, 1200.0);
    assert_eq!(summary.partner_shares.get(Partner::Hamad), 400.0);
    assert_eq!(summary.partner_shares.get(Partner::Fahd), 300.0);

    let archived_on = books.archive_day(Some(day(10))).unwrap();
    assert_eq!(archived_on, day(10));
    assert!(books.sales.is_empty());
    assert!(books.expenses.is_empty());
    assert!(books.deductions.is_empty());

    let log = books.daily_log(0).unwrap();
    assert_eq!(log.net_profit, 1200.0);
    assert_eq!(log.partner_shares.get(Partner::Fahd), 300.0);
}

#[test]
fn month_cycle_rolls_logs_into_a_report() {
    let mut books = seeded_books();
    books.archive_day(Some(day(10))).unwrap();
    books
        .add_sale(Sale::new("Noor", 600.0, "Printing", "1003", day(11)))
        .unwrap();
    books.archive_day(Some(day(11))).unwrap();

    let month = Month::new(2024, 5).unwrap();
    let report = books.generate_monthly_report(month).unwrap().clone();
    assert_eq!(report.total_sales, 2100.0);
    assert_eq!(report.total_expenses, 300.0);
    assert_eq!(report.net_profit, 1800.0);
    assert_eq!(
        report.partner_shares.total(),
        books.daily_logs[0].partner_shares.total()
            + books.daily_logs[1].partner_shares.total()
    );
}

#[test]
fn archived_edit_recomputes_the_owning_log() {
    let mut books = seeded_books();
    books.archive_day(Some(day(10))).unwrap();
    let sale_id = books.daily_logs[0].sales[0].id;

    let mut edited = books.daily_logs[0].sales[0].clone();
    edited.amount = 2200.0;
    books
        .update_sale_at(ItemOrigin::Archived { log_index: 0 }, edited)
        .unwrap();

    let log = books.daily_log(0).unwrap();
    assert_eq!(log.total_sales, 3400.0);
    assert_eq!(log.net_profit, 3100.0);
    assert_eq!(log.sales[0].id, sale_id);
}

#[test]
fn current_edit_leaves_archived_logs_alone() {
    let mut books = seeded_books();
    books.archive_day(Some(day(10))).unwrap();
    let archived = books.daily_logs[0].clone();

    books
        .add_expense(Expense::new(50.0, "Fuel", day(11)))
        .unwrap();
    let expense_id = books.expenses[0].id;
    books
        .remove_expense_at(ItemOrigin::Current, expense_id)
        .unwrap();

    assert_eq!(books.daily_logs[0], archived);
    assert!(books.expenses.is_empty());
}

#[test]
fn balances_accumulate_and_settlements_reduce_them() {
    let mut books = Books::new();
    books
        .add_sale(Sale::new("Aisha", 900.0, "Printing", "1001", day(10)))
        .unwrap();
    books.archive_day(Some(day(10))).unwrap();
    assert_eq!(books.balances().get(Partner::Jamil), 300.0);

    books
        .record_settlement(Partner::Jamil, 200.0, "cash payout", Some(day(11)))
        .unwrap();
    books.archive_day(Some(day(11))).unwrap();

    let balances = books.balances();
    assert_eq!(balances.get(Partner::Jamil), 500.0);
    assert_eq!(balances.get(Partner::Hamad), 300.0);

    let suggestions = netting_suggestions(&balances);
    assert!(suggestions.is_empty());
}

#[test]
fn statement_merges_current_and_archived_deductions() {
    let mut books = seeded_books();
    books.archive_day(Some(day(10))).unwrap();
    books
        .add_deduction(Deduction::new(Partner::Fahd, 40.0, "Fuel", day(12)))
        .unwrap();

    let month = Month::new(2024, 5).unwrap();
    let view = books.partner_statement(Partner::Fahd, month);
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.total, 140.0);
    assert_eq!(view.entries[0].origin, ItemOrigin::Current);
    assert_eq!(
        view.entries[1].origin,
        ItemOrigin::Archived { log_index: 0 }
    );
}

#[test]
fn expense_detail_filters_by_month() {
    let mut books = seeded_books();
    books.archive_day(Some(day(10))).unwrap();
    books
        .add_expense(Expense::new(
            75.0,
            "Rent",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ))
        .unwrap();

    let may = books.expense_detail(Month::new(2024, 5).unwrap());
    assert_eq!(may.entries.len(), 1);
    assert_eq!(may.total, 300.0);

    let june = books.expense_detail(Month::new(2024, 6).unwrap());
    assert_eq!(june.entries.len(), 1);
    assert_eq!(june.total, 75.0);
}

#[test]
fn validation_refuses_bad_records_without_mutating() {
    let mut books = Books::new();
    let err = books
        .add_sale(Sale::new("", 100.0, "Design", "1", day(10)))
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let err = books
        .add_expense(Expense::new(-5.0, "Supplies", day(10)))
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let err = books
        .add_deduction(Deduction::new(Partner::Hamad, 0.0, "Advance", day(10)))
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    assert_eq!(books, Books::new());
}

#[test]
fn missing_targets_surface_typed_errors() {
    let mut books = Books::new();
    assert!(matches!(
        books.archive_day(None).unwrap_err(),
        CoreError::NothingToArchive
    ));
    assert!(matches!(
        books.daily_log(3).unwrap_err(),
        CoreError::LogNotFound(3)
    ));
    let month = Month::new(2024, 5).unwrap();
    assert!(matches!(
        books.generate_monthly_report(month).unwrap_err(),
        CoreError::NothingToRollUp(_)
    ));
    assert!(matches!(
        books.monthly_report(month).unwrap_err(),
        CoreError::ReportNotFound(_)
    ));
}

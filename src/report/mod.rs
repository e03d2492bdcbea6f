//! Plain-text printable documents. The core hands over plain data; these
//! functions only lay it out. Amounts are rounded to two decimals here and
//! nowhere else.

use crate::core::{ExpenseDetailView, SettlementSuggestion, StatementView};
use crate::domain::{DailyLog, ItemOrigin, MonthlyReport, Partner, PartnerMap};

const RULE: &str = "----------------------------------------------";

/// Formats an amount for display with the configured currency label.
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

fn origin_tag(origin: ItemOrigin) -> String {
    match origin {
        ItemOrigin::Current => "current".to_string(),
        ItemOrigin::Archived { log_index } => format!("log #{log_index}"),
    }
}

fn push_shares(out: &mut String, shares: &PartnerMap, currency: &str) {
    out.push_str("Partner shares:\n");
    for (partner, share) in shares.iter() {
        out.push_str(&format!(
            "  {:<6} {}\n",
            partner.label(),
            format_amount(share, currency)
        ));
    }
}

/// Printable report for one archived day.
pub fn daily_report(log: &DailyLog, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Daily report — {}\n{RULE}\n", log.date));
    out.push_str(&format!(
        "Total sales:    {}\n",
        format_amount(log.total_sales, currency)
    ));
    out.push_str(&format!(
        "Total expenses: {}\n",
        format_amount(log.total_expenses, currency)
    ));
    out.push_str(&format!(
        "Net profit:     {}\n",
        format_amount(log.net_profit, currency)
    ));
    push_shares(&mut out, &log.partner_shares, currency);

    if !log.sales.is_empty() {
        out.push_str(&format!("\nSales ({}):\n", log.sales.len()));
        for sale in &log.sales {
            out.push_str(&format!(
                "  {} | {} | {} | order {} | {}\n",
                sale.date,
                sale.customer_name,
                sale.service_type,
                sale.order_number,
                format_amount(sale.amount, currency)
            ));
        }
    }
    if !log.expenses.is_empty() {
        out.push_str(&format!("\nExpenses ({}):\n", log.expenses.len()));
        for expense in &log.expenses {
            out.push_str(&format!(
                "  {} | {} | {}\n",
                expense.date,
                expense.expense_type,
                format_amount(expense.amount, currency)
            ));
        }
    }
    if !log.deductions.is_empty() {
        out.push_str(&format!("\nDeductions ({}):\n", log.deductions.len()));
        for deduction in &log.deductions {
            out.push_str(&format!(
                "  {} | {} | {} | {}\n",
                deduction.date,
                deduction.partner.label(),
                deduction.deduction_type,
                format_amount(deduction.amount, currency)
            ));
        }
    }
    out
}

/// Printable summary of one monthly report.
pub fn monthly_report(report: &MonthlyReport, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Monthly report — {}\n{RULE}\n", report.month));
    out.push_str(&format!(
        "Total sales:    {}\n",
        format_amount(report.total_sales, currency)
    ));
    out.push_str(&format!(
        "Total expenses: {}\n",
        format_amount(report.total_expenses, currency)
    ));
    out.push_str(&format!(
        "Net profit:     {}\n",
        format_amount(report.net_profit, currency)
    ));
    push_shares(&mut out, &report.partner_shares, currency);
    out
}

/// Printable account statement: one partner's deductions for one month.
pub fn partner_statement(view: &StatementView, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Account statement — {} — {}\n{RULE}\n",
        view.partner.label(),
        view.month
    ));
    if view.entries.is_empty() {
        out.push_str("No deductions recorded this month.\n");
    }
    for entry in &view.entries {
        out.push_str(&format!(
            "  {} | {} | {} | {}\n",
            entry.deduction.date,
            entry.deduction.deduction_type,
            origin_tag(entry.origin),
            format_amount(entry.deduction.amount, currency)
        ));
    }
    out.push_str(&format!(
        "Total deductions: {}\n",
        format_amount(view.total, currency)
    ));
    out
}

/// Printable expense breakdown for one month.
pub fn expense_detail(view: &ExpenseDetailView, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Expense detail — {}\n{RULE}\n", view.month));
    if view.entries.is_empty() {
        out.push_str("No expenses recorded this month.\n");
    }
    for entry in &view.entries {
        out.push_str(&format!(
            "  {} | {} | {} | {}\n",
            entry.expense.date,
            entry.expense.expense_type,
            origin_tag(entry.origin),
            format_amount(entry.expense.amount, currency)
        ));
    }
    out.push_str(&format!(
        "Total expenses: {}\n",
        format_amount(view.total, currency)
    ));
    out
}

/// Printable balances overview with netting suggestions.
pub fn balances_report(
    balances: &PartnerMap,
    suggestions: &[SettlementSuggestion],
    currency: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Partner balances\n{RULE}\n"));
    for (partner, balance) in balances.iter() {
        let standing = if balance >= 0.0 {
            "owed to partner"
        } else {
            "owed by partner"
        };
        out.push_str(&format!(
            "  {:<6} {} ({standing})\n",
            partner.label(),
            format_amount(balance.abs(), currency)
        ));
    }
    if suggestions.is_empty() {
        out.push_str("\nAll accounts are balanced; no transfers needed.\n");
    } else {
        out.push_str("\nSuggested transfers:\n");
        for suggestion in suggestions {
            out.push_str(&format!(
                "  {} owes {}:\n",
                suggestion.debtor.label(),
                format_amount(suggestion.owed, currency)
            ));
            for payment in &suggestion.payments {
                out.push_str(&format!(
                    "    pays {} {}\n",
                    payment.creditor.label(),
                    format_amount(payment.amount, currency)
                ));
            }
        }
    }
    out
}

//! Partner balance derivation and settlement helpers. A balance is the sum
//! of a partner's shares across every archived daily log; deductions were
//! already netted in at archive or recompute time.

use chrono::NaiveDate;

use crate::domain::{DailyLog, Deduction, Partner, PartnerMap};

/// Prefix folded into `deduction_type` when recording a settlement.
pub const SETTLEMENT_NOTE_PREFIX: &str = "Settlement";

/// Sums each partner's share across all daily logs. Positive means the
/// business owes the partner; negative means the partner owes the business.
pub fn compute_balances(daily_logs: &[DailyLog]) -> PartnerMap {
    let mut balances = PartnerMap::default();
    for log in daily_logs {
        balances.add(&log.partner_shares);
    }
    balances
}

/// A suggested transfer from one debtor partner to one creditor partner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payment {
    pub creditor: Partner,
    pub amount: f64,
}

/// One debtor's deficit split across the creditors.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementSuggestion {
    pub debtor: Partner,
    pub owed: f64,
    pub payments: Vec<Payment>,
}

/// Presentation-only netting hints: each debtor's absolute deficit is split
/// across creditors in proportion to every creditor's share of the total
/// positive balance pool. Empty when no partner holds a positive balance.
pub fn netting_suggestions(balances: &PartnerMap) -> Vec<SettlementSuggestion> {
    let creditors: Vec<(Partner, f64)> = balances
        .iter()
        .filter(|(_, balance)| *balance > 0.0)
        .collect();
    let pool: f64 = creditors.iter().map(|(_, balance)| balance).sum();
    if pool <= 0.0 {
        return Vec::new();
    }

    balances
        .iter()
        .filter(|(_, balance)| *balance < 0.0)
        .map(|(debtor, balance)| {
            let owed = balance.abs();
            let payments = creditors
                .iter()
                .map(|(creditor, credit)| Payment {
                    creditor: *creditor,
                    amount: owed * credit / pool,
                })
                .collect();
            SettlementSuggestion {
                debtor,
                owed,
                payments,
            }
        })
        .collect()
}

/// Builds the deduction that records a settlement paid out to `partner`.
///
/// The amount is stored negated (a credit in the partner's favor) and the
/// note rides inside `deduction_type`. The caller pushes it into the
/// current-period deductions; it affects balances at the next archival and
/// never rewrites past logs.
pub fn settlement_deduction(
    partner: Partner,
    amount: f64,
    note: &str,
    date: NaiveDate,
) -> Deduction {
    Deduction::new(
        partner,
        -amount,
        format!("{SETTLEMENT_NOTE_PREFIX}: {note}"),
        date,
    )
}

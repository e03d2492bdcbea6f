//! The profit-split engine: the one routine that turns raw sales, expenses,
//! and deductions into totals and per-partner shares. Archival, line-item
//! recompute, and the dashboard summary all call through here so the
//! arithmetic exists in exactly one place.

use crate::domain::{Amounted, Deduction, Expense, Partner, PartnerMap, Sale};

/// Aggregates computed by [`compute_shares`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplitBreakdown {
    pub total_sales: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub partner_shares: PartnerMap,
}

/// Computes totals, net profit, and the three-way partner split.
///
/// Net profit is divided equally before deductions; each partner's own
/// deductions are then subtracted from that partner's share only. Pure and
/// total: empty inputs yield all zeros, and no rounding is applied here.
pub fn compute_shares(
    sales: &[Sale],
    expenses: &[Expense],
    deductions: &[Deduction],
) -> SplitBreakdown {
    let total_sales: f64 = sales.iter().map(Amounted::amount).sum();
    let total_expenses: f64 = expenses.iter().map(Amounted::amount).sum();
    let net_profit = total_sales - total_expenses;
    let share = net_profit / Partner::COUNT as f64;

    let partner_shares = PartnerMap::from_fn(|partner| {
        let deducted: f64 = deductions
            .iter()
            .filter(|deduction| deduction.partner == partner)
            .map(Amounted::amount)
            .sum();
        share - deducted
    });

    SplitBreakdown {
        total_sales,
        total_expenses,
        net_profit,
        partner_shares,
    }
}

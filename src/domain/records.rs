use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Amounted, Identifiable};
use super::partner::Partner;

/// A sale recorded in the current period. Ids are generated at creation and
/// never change, even after the sale is archived into a daily log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub customer_name: String,
    pub amount: f64,
    pub service_type: String,
    pub order_number: String,
    pub date: NaiveDate,
}

impl Sale {
    pub fn new(
        customer_name: impl Into<String>,
        amount: f64,
        service_type: impl Into<String>,
        order_number: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name: customer_name.into(),
            amount,
            service_type: service_type.into(),
            order_number: order_number.into(),
            date,
        }
    }
}

/// An expense recorded in the current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub expense_type: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(amount: f64, expense_type: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            expense_type: expense_type.into(),
            date,
        }
    }
}

/// A debit against one partner's share. Negative amounts are settlement
/// credits in the partner's favor; settlements carry their note inside
/// `deduction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    pub id: Uuid,
    pub partner: Partner,
    pub amount: f64,
    pub deduction_type: String,
    pub date: NaiveDate,
}

impl Deduction {
    pub fn new(
        partner: Partner,
        amount: f64,
        deduction_type: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            partner,
            amount,
            deduction_type: deduction_type.into(),
            date,
        }
    }
}

/// Where a record currently lives. Views that merge open and archived items
/// into one list tag each entry with its origin so mutations dispatch to the
/// right place: archived edits must recompute the owning log's aggregates,
/// current-period edits must not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrigin {
    Current,
    Archived { log_index: usize },
}

macro_rules! impl_record_traits {
    ($($record:ty),+) => {
        $(
            impl Identifiable for $record {
                fn id(&self) -> Uuid {
                    self.id
                }
            }

            impl Amounted for $record {
                fn amount(&self) -> f64 {
                    self.amount
                }
            }
        )+
    };
}

impl_record_traits!(Sale, Expense, Deduction);

use thiserror::Error;
use uuid::Uuid;

use crate::domain::Month;

/// Error type covering refusals and lookup failures in the books. Every
/// variant is locally recoverable: no state is mutated when one is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("nothing to archive: the current period has no sales, expenses, or deductions")]
    NothingToArchive,
    #[error("no archived days found for {0}")]
    NothingToRollUp(Month),
    #[error("daily log #{0} not found")]
    LogNotFound(usize),
    #[error("no monthly report for {0}")]
    ReportNotFound(Month),
    #[error("record {0} not found")]
    ItemNotFound(Uuid),
    #[error("validation failed: {0}")]
    Validation(String),
}

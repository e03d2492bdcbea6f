//! Pure domain models for the partner books: partners, record types, and
//! archival snapshots. No I/O, no CLI, no storage.

pub mod common;
pub mod daily_log;
pub mod month;
pub mod monthly_report;
pub mod partner;
pub mod records;

pub use common::*;
pub use daily_log::*;
pub use month::*;
pub use monthly_report::*;
pub use partner::*;
pub use records::*;

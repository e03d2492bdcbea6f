//! Shared traits for records stored in the books.

use uuid::Uuid;

/// Exposes a stable identifier for records stored in the books.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

//! Persistence for the six stored collections. The backend is a plain
//! key-value contract: callers always receive a well-typed collection, with
//! missing or unparsable data degrading to the supplied default.

pub mod json_backend;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use json_backend::JsonStorage;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The six fixed logical collection names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Sales,
    Expenses,
    Deductions,
    DailyLogs,
    MonthlyReports,
    PartnerDebts,
}

impl StoreKey {
    pub const ALL: [StoreKey; 6] = [
        StoreKey::Sales,
        StoreKey::Expenses,
        StoreKey::Deductions,
        StoreKey::DailyLogs,
        StoreKey::MonthlyReports,
        StoreKey::PartnerDebts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Sales => "sales",
            StoreKey::Expenses => "expenses",
            StoreKey::Deductions => "deductions",
            StoreKey::DailyLogs => "daily-logs",
            StoreKey::MonthlyReports => "monthly-reports",
            StoreKey::PartnerDebts => "partner-debts",
        }
    }
}

/// Abstraction over persistence backends keyed by [`StoreKey`].
pub trait StorageBackend: Send + Sync {
    /// Returns the raw serialized form for `key`, or `None` when absent.
    fn load_raw(&self, key: StoreKey) -> Result<Option<String>>;
    /// Durably stores the serialized form for `key`.
    fn save_raw(&self, key: StoreKey, json: &str) -> Result<()>;
    /// Removes every stored collection.
    fn wipe(&self) -> Result<()>;
}

/// Loads and deserializes a collection, falling back to `T::default()` when
/// the key is absent, unreadable, or holds malformed data. Failures are
/// logged, never propagated; the core always receives a usable value.
pub fn load_or_default<T: DeserializeOwned + Default>(
    storage: &dyn StorageBackend,
    key: StoreKey,
) -> T {
    match storage.load_raw(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(key = key.as_str(), %err, "stored data is malformed; using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(key = key.as_str(), %err, "failed to read stored data; using default");
            T::default()
        }
    }
}

/// Serializes and stores a collection under `key`.
pub fn save_collection<T: Serialize>(
    storage: &dyn StorageBackend,
    key: StoreKey,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    storage.save_raw(key, &json)
}

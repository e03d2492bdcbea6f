//! Business logic for the partner books: the profit-split engine, archival,
//! monthly rollups, line-item recompute, balance derivation, and the `Books`
//! store plus its persisting manager. Depends on `domain`; no CLI, no
//! terminal I/O.

pub mod archive;
pub mod balance;
pub mod errors;
pub mod manager;
pub mod recompute;
pub mod rollup;
pub mod split;
pub mod store;

pub use archive::*;
pub use balance::*;
pub use errors::CoreError;
pub use manager::*;
pub use recompute::*;
pub use rollup::*;
pub use split::*;
pub use store::*;

//! Stock ledger data model.
//!
//! The ledger is the source of truth: an append-only log of signed quantity
//! movements, one entry per (product, warehouse, document) effect. Balance
//! records are a materialized view over it, kept transactionally in step with
//! each append and reconstructable by replay.

pub mod balance;
pub mod entry;
pub mod movement;
pub mod query;
pub mod replay;

pub use balance::BalanceRecord;
pub use entry::{EntryKind, LedgerEntry};
pub use movement::Movement;
pub use query::LedgerFilter;
pub use replay::rebuild_balances;

//! Domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers and the stock-domain error taxonomy.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{DocumentId, ProductId, UserId, WarehouseId};

/// On-hand quantity / quantity delta, in the product's unit of measure.
///
/// Signed: ledger entries carry negative deltas for outbound movements.
pub type Quantity = i64;

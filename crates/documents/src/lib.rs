//! Business documents and their lifecycle.
//!
//! A document (receipt, delivery, transfer, adjustment) is the business record
//! whose one-time `validate` transition produces stock movements. This crate
//! is pure domain: it plans movements but never applies them.

pub mod document;
pub mod line;
pub mod number;
pub mod status;

pub use document::{Document, DocumentBody, DocumentKind, DocumentLines};
pub use line::{AdjustmentLine, DeliveryLine, PickUpdate, ReceiptLine, TransferLine};
pub use number::DocumentNumber;
pub use status::DocumentStatus;

//! Infrastructure layer: stores, the movement applier, and the service facade.
//!
//! Repositories are explicit traits injected into the applier and service, so
//! tests (and embedders) substitute the in-memory implementations while a
//! database adapter can implement the same seams.

pub mod applier;
pub mod locks;
pub mod resolver;
pub mod service;
pub mod store;


pub use applier::{AppliedMovement, MovementApplier, MovementContext};
pub use resolver::{InMemoryCatalog, ReferenceResolver};
pub use service::{
    DocumentPatch, InventoryService, LinePatch, NewAdjustment, NewAdjustmentLine, NewDelivery,
    NewLine, NewReceipt, NewTransfer,
};
pub use store::{
    BalanceStore, DocumentStore, InMemoryBalanceStore, InMemoryDocumentStore,
    InMemoryLedgerStore, LedgerStore, StoreError,
};

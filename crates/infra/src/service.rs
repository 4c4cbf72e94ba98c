//! Service facade: document lifecycle, validation, and balance queries.
//!
//! All writes funnel through here. Per-document mutations are serialized by a
//! keyed lock so the validate guard, the movement batch, and the mark-done
//! update form one atomic unit per document.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use stockmaster_core::{DomainError, DomainResult, DocumentId, ProductId, Quantity, UserId, WarehouseId};
use stockmaster_documents::{
    AdjustmentLine, DeliveryLine, Document, DocumentBody, DocumentLines, DocumentNumber,
    DocumentStatus, PickUpdate, ReceiptLine, TransferLine,
};
use stockmaster_ledger::{BalanceRecord, LedgerEntry, LedgerFilter};

use crate::applier::{AppliedMovement, MovementApplier, MovementContext};
use crate::locks::KeyLocks;
use crate::resolver::ReferenceResolver;
use crate::store::{BalanceStore, DocumentStore, LedgerStore};

/// Product, quantity, and price for a new receipt/delivery/transfer line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLine {
    pub product: ProductId,
    pub quantity: Quantity,
    pub unit_price: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReceipt {
    pub supplier: String,
    pub warehouse: WarehouseId,
    pub lines: Vec<NewLine>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDelivery {
    pub customer: String,
    pub warehouse: WarehouseId,
    pub lines: Vec<NewLine>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransfer {
    pub from_warehouse: WarehouseId,
    pub to_warehouse: WarehouseId,
    pub lines: Vec<NewLine>,
    pub notes: Option<String>,
}

/// Adjustment input carries the counted quantity only; the recorded quantity
/// is snapshotted from the current balance when the line is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdjustmentLine {
    pub product: ProductId,
    pub counted_quantity: Quantity,
    pub unit_price: u64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdjustment {
    pub warehouse: WarehouseId,
    pub lines: Vec<NewAdjustmentLine>,
    pub notes: Option<String>,
}

/// Replacement lines for an update, in input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LinePatch {
    Receipt(Vec<NewLine>),
    Delivery(Vec<NewLine>),
    Transfer(Vec<NewLine>),
    Adjustment(Vec<NewAdjustmentLine>),
}

/// Partial update of a non-done document. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPatch {
    pub notes: Option<Option<String>>,
    pub lines: Option<LinePatch>,
    pub status: Option<DocumentStatus>,
}

/// The inventory engine's public surface.
pub struct InventoryService<D, B, L, R> {
    documents: Arc<D>,
    balances: Arc<B>,
    ledger: Arc<L>,
    resolver: Arc<R>,
    applier: MovementApplier<B, L>,
    doc_locks: KeyLocks<DocumentId>,
}

impl<D, B, L, R> InventoryService<D, B, L, R>
where
    D: DocumentStore,
    B: BalanceStore,
    L: LedgerStore,
    R: ReferenceResolver,
{
    pub fn new(documents: Arc<D>, balances: Arc<B>, ledger: Arc<L>, resolver: Arc<R>) -> Self {
        let applier = MovementApplier::new(Arc::clone(&balances), Arc::clone(&ledger));
        Self {
            documents,
            balances,
            ledger,
            resolver,
            applier,
            doc_locks: KeyLocks::new(),
        }
    }

    // --- document creation ---

    pub fn create_receipt(&self, input: NewReceipt, actor: UserId) -> DomainResult<Document> {
        let body = DocumentBody::Receipt {
            supplier: input.supplier,
            warehouse: input.warehouse,
            lines: input
                .lines
                .into_iter()
                .map(|l| ReceiptLine {
                    product: l.product,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
        };
        self.create_document(body, input.notes, actor)
    }

    pub fn create_delivery(&self, input: NewDelivery, actor: UserId) -> DomainResult<Document> {
        for line in &input.lines {
            self.check_availability(line.product, input.warehouse, line.quantity)?;
        }
        let body = DocumentBody::Delivery {
            customer: input.customer,
            warehouse: input.warehouse,
            lines: input
                .lines
                .into_iter()
                .map(|l| DeliveryLine::new(l.product, l.quantity, l.unit_price))
                .collect(),
        };
        self.create_document(body, input.notes, actor)
    }

    pub fn create_transfer(&self, input: NewTransfer, actor: UserId) -> DomainResult<Document> {
        for line in &input.lines {
            self.check_availability(line.product, input.from_warehouse, line.quantity)?;
        }
        let body = DocumentBody::Transfer {
            from_warehouse: input.from_warehouse,
            to_warehouse: input.to_warehouse,
            lines: input
                .lines
                .into_iter()
                .map(|l| TransferLine {
                    product: l.product,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
        };
        self.create_document(body, input.notes, actor)
    }

    pub fn create_adjustment(&self, input: NewAdjustment, actor: UserId) -> DomainResult<Document> {
        let lines = self.derive_adjustment_lines(input.warehouse, input.lines)?;
        let body = DocumentBody::Adjustment {
            warehouse: input.warehouse,
            lines,
        };
        self.create_document(body, input.notes, actor)
    }

    fn create_document(
        &self,
        body: DocumentBody,
        notes: Option<String>,
        actor: UserId,
    ) -> DomainResult<Document> {
        self.resolve_body(&body)?;

        let now = Utc::now();
        let kind = body.kind();
        let sequence = self.documents.next_sequence(kind)?;
        let number = DocumentNumber::generate(kind.prefix(), sequence, now);
        let document = Document::new(DocumentId::new(), number, body, notes, actor, now)?;
        self.documents.insert(document.clone())?;

        info!(
            id = %document.id(),
            number = %document.number(),
            kind = kind.as_str(),
            "created document"
        );
        Ok(document)
    }

    // --- document reads ---

    pub fn get_document(&self, id: DocumentId) -> DomainResult<Document> {
        self.documents.get(id)?.ok_or(DomainError::NotFound)
    }

    pub fn list_documents(&self) -> DomainResult<Vec<Document>> {
        Ok(self.documents.list()?)
    }

    // --- document mutation ---

    /// Apply a partial update under the document lock.
    ///
    /// Adjustment lines are re-derived against the current balances, so the
    /// recorded snapshot tracks the latest edit, not the first.
    pub fn update_document(&self, id: DocumentId, patch: DocumentPatch) -> DomainResult<Document> {
        let handle = self.doc_locks.handle(&id)?;
        let _guard = handle
            .lock()
            .map_err(|_| DomainError::conflict("document lock poisoned"))?;

        let mut document = self.get_document(id)?;
        document.ensure_editable()?;
        let now = Utc::now();

        if let Some(lines) = patch.lines {
            let lines = match lines {
                LinePatch::Receipt(lines) => DocumentLines::Receipt(
                    lines
                        .into_iter()
                        .map(|l| ReceiptLine {
                            product: l.product,
                            quantity: l.quantity,
                            unit_price: l.unit_price,
                        })
                        .collect(),
                ),
                LinePatch::Delivery(lines) => DocumentLines::Delivery(
                    lines
                        .into_iter()
                        .map(|l| DeliveryLine::new(l.product, l.quantity, l.unit_price))
                        .collect(),
                ),
                LinePatch::Transfer(lines) => DocumentLines::Transfer(
                    lines
                        .into_iter()
                        .map(|l| TransferLine {
                            product: l.product,
                            quantity: l.quantity,
                            unit_price: l.unit_price,
                        })
                        .collect(),
                ),
                LinePatch::Adjustment(lines) => {
                    let DocumentBody::Adjustment { warehouse, .. } = document.body() else {
                        return Err(DomainError::validation(
                            "adjustment lines on a non-adjustment document",
                        ));
                    };
                    DocumentLines::Adjustment(self.derive_adjustment_lines(*warehouse, lines)?)
                }
            };
            for product in lines_products(&lines) {
                self.resolve_product(product)?;
            }
            document.replace_lines(lines, now)?;
        }

        if let Some(notes) = patch.notes {
            document.set_notes(notes, now)?;
        }
        if let Some(status) = patch.status {
            // Terminal states have dedicated paths: done is only reachable
            // through validate_document, canceled through cancel_document.
            if !matches!(status, DocumentStatus::Waiting | DocumentStatus::Ready) {
                return Err(DomainError::validation(format!(
                    "cannot patch status to {}; only waiting and ready are patchable",
                    status.as_str()
                )));
            }
            document.transition(status, now)?;
        }

        self.documents.update(document.clone())?;
        Ok(document)
    }

    /// Record picked quantities on a delivery; promotes it to ready.
    pub fn record_picking(&self, id: DocumentId, picks: &[PickUpdate]) -> DomainResult<Document> {
        let handle = self.doc_locks.handle(&id)?;
        let _guard = handle
            .lock()
            .map_err(|_| DomainError::conflict("document lock poisoned"))?;

        let mut document = self.get_document(id)?;
        document.record_picking(picks, Utc::now())?;
        self.documents.update(document.clone())?;
        Ok(document)
    }

    /// Validate a document: apply its movements and freeze it as done.
    ///
    /// Holds the document lock across the status guard, the movement batch,
    /// and the mark-done write, so a concurrent second validation observes
    /// `done` and fails with `AlreadyValidated` without touching stock.
    pub fn validate_document(&self, id: DocumentId, actor: UserId) -> DomainResult<Document> {
        let handle = self.doc_locks.handle(&id)?;
        let _guard = handle
            .lock()
            .map_err(|_| DomainError::conflict("document lock poisoned"))?;

        let mut document = self.get_document(id)?;
        if document.status() == DocumentStatus::Done {
            return Err(DomainError::AlreadyValidated);
        }
        if !document.status().can_transition(DocumentStatus::Done) {
            return Err(DomainError::validation(format!(
                "cannot validate a {} document",
                document.status().as_str()
            )));
        }
        self.resolve_body(document.body())?;

        let now = Utc::now();
        let movements = document.movement_plan()?;
        let ctx = MovementContext {
            document_id: document.id(),
            document_number: document.number().to_string(),
            actor,
            at: now,
        };
        let applied = self.applier.apply_batch(&movements, &ctx)?;

        document.mark_validated(actor, now)?;
        self.documents.update(document.clone())?;

        info!(
            id = %document.id(),
            number = %document.number(),
            movements = applied.len(),
            "validated document"
        );
        Ok(document)
    }

    /// Cancel a non-done document. No ledger entries are written.
    pub fn cancel_document(&self, id: DocumentId) -> DomainResult<Document> {
        let handle = self.doc_locks.handle(&id)?;
        let _guard = handle
            .lock()
            .map_err(|_| DomainError::conflict("document lock poisoned"))?;

        let mut document = self.get_document(id)?;
        document.cancel(Utc::now())?;
        self.documents.update(document.clone())?;
        Ok(document)
    }

    /// Delete a non-done document outright.
    pub fn delete_document(&self, id: DocumentId) -> DomainResult<()> {
        let handle = self.doc_locks.handle(&id)?;
        let _guard = handle
            .lock()
            .map_err(|_| DomainError::conflict("document lock poisoned"))?;

        let document = self.get_document(id)?;
        document.ensure_editable()?;
        self.documents.remove(id)?;
        Ok(())
    }

    // --- balances and ledger ---

    /// Current balance for a pair; a zero record when it has no movements.
    pub fn get_balance(
        &self,
        product: ProductId,
        warehouse: WarehouseId,
    ) -> DomainResult<BalanceRecord> {
        Ok(match self.balances.get(product, warehouse)? {
            Some(record) => record,
            None => BalanceRecord::empty(product, warehouse, Utc::now()),
        })
    }

    pub fn list_balances(&self) -> DomainResult<Vec<BalanceRecord>> {
        Ok(self.balances.list()?)
    }

    pub fn free_to_use(&self, product: ProductId, warehouse: WarehouseId) -> DomainResult<Quantity> {
        Ok(self.get_balance(product, warehouse)?.free_to_use())
    }

    /// Ledger entries matching the filter, newest first.
    pub fn list_ledger(&self, filter: &LedgerFilter) -> DomainResult<Vec<LedgerEntry>> {
        Ok(self.ledger.query(filter)?)
    }

    /// Force a pair's balance to `target` outside any document, leaving an
    /// adjustment entry under a MANUAL document number.
    pub fn correct_balance(
        &self,
        product: ProductId,
        warehouse: WarehouseId,
        target: Quantity,
        reason: Option<String>,
        actor: UserId,
    ) -> DomainResult<Option<AppliedMovement>> {
        self.resolve_product(product)?;
        self.resolve_warehouse(warehouse)?;

        let now = Utc::now();
        let ctx = MovementContext {
            document_id: DocumentId::new(),
            document_number: DocumentNumber::manual(now).to_string(),
            actor,
            at: now,
        };
        let reason = reason.unwrap_or_else(|| "Manual balance correction".to_string());
        self.applier
            .set_quantity(product, warehouse, target, Some(reason), &ctx)
    }

    // --- helpers ---

    fn derive_adjustment_lines(
        &self,
        warehouse: WarehouseId,
        lines: Vec<NewAdjustmentLine>,
    ) -> DomainResult<Vec<AdjustmentLine>> {
        lines
            .into_iter()
            .map(|l| {
                let recorded = self.get_balance(l.product, warehouse)?.quantity;
                Ok(AdjustmentLine::derive(
                    l.product,
                    recorded,
                    l.counted_quantity,
                    l.unit_price,
                    l.reason,
                ))
            })
            .collect()
    }

    fn check_availability(
        &self,
        product: ProductId,
        warehouse: WarehouseId,
        requested: Quantity,
    ) -> DomainResult<()> {
        let available = self.get_balance(product, warehouse)?.free_to_use();
        if requested > available {
            return Err(DomainError::InsufficientStock {
                product,
                warehouse,
                requested,
                available,
            });
        }
        Ok(())
    }

    fn resolve_body(&self, body: &DocumentBody) -> DomainResult<()> {
        for warehouse in body.warehouses() {
            self.resolve_warehouse(warehouse)?;
        }
        for product in body.products() {
            self.resolve_product(product)?;
        }
        Ok(())
    }

    fn resolve_product(&self, product: ProductId) -> DomainResult<()> {
        if !self.resolver.product_exists(product)? {
            return Err(DomainError::malformed_reference(format!(
                "unknown product {product}"
            )));
        }
        Ok(())
    }

    fn resolve_warehouse(&self, warehouse: WarehouseId) -> DomainResult<()> {
        if !self.resolver.warehouse_exists(warehouse)? {
            return Err(DomainError::malformed_reference(format!(
                "unknown warehouse {warehouse}"
            )));
        }
        Ok(())
    }
}

fn lines_products(lines: &DocumentLines) -> Vec<ProductId> {
    match lines {
        DocumentLines::Receipt(lines) => lines.iter().map(|l| l.product).collect(),
        DocumentLines::Delivery(lines) => lines.iter().map(|l| l.product).collect(),
        DocumentLines::Transfer(lines) => lines.iter().map(|l| l.product).collect(),
        DocumentLines::Adjustment(lines) => lines.iter().map(|l| l.product).collect(),
    }
}

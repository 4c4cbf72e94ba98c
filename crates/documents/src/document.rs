//! The document model: header, kind-specific body, lifecycle transitions,
//! and per-kind movement planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockmaster_core::{DocumentId, DomainError, DomainResult, ProductId, UserId, WarehouseId};
use stockmaster_ledger::{EntryKind, Movement};

use crate::line::{AdjustmentLine, DeliveryLine, PickUpdate, ReceiptLine, TransferLine};
use crate::number::DocumentNumber;
use crate::status::DocumentStatus;

/// The four document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Receipt,
    Delivery,
    Transfer,
    Adjustment,
}

impl DocumentKind {
    /// Document-number prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            DocumentKind::Receipt => "REC",
            DocumentKind::Delivery => "DEL",
            DocumentKind::Transfer => "TRF",
            DocumentKind::Adjustment => "ADJ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Receipt => "receipt",
            DocumentKind::Delivery => "delivery",
            DocumentKind::Transfer => "transfer",
            DocumentKind::Adjustment => "adjustment",
        }
    }
}

/// Kind-specific document payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocumentBody {
    Receipt {
        supplier: String,
        warehouse: WarehouseId,
        lines: Vec<ReceiptLine>,
    },
    Delivery {
        customer: String,
        warehouse: WarehouseId,
        lines: Vec<DeliveryLine>,
    },
    Transfer {
        from_warehouse: WarehouseId,
        to_warehouse: WarehouseId,
        lines: Vec<TransferLine>,
    },
    Adjustment {
        warehouse: WarehouseId,
        lines: Vec<AdjustmentLine>,
    },
}

impl DocumentBody {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentBody::Receipt { .. } => DocumentKind::Receipt,
            DocumentBody::Delivery { .. } => DocumentKind::Delivery,
            DocumentBody::Transfer { .. } => DocumentKind::Transfer,
            DocumentBody::Adjustment { .. } => DocumentKind::Adjustment,
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            DocumentBody::Receipt { lines, .. } => lines.len(),
            DocumentBody::Delivery { lines, .. } => lines.len(),
            DocumentBody::Transfer { lines, .. } => lines.len(),
            DocumentBody::Adjustment { lines, .. } => lines.len(),
        }
    }

    /// Products referenced by the lines, for boundary resolution.
    pub fn products(&self) -> Vec<ProductId> {
        match self {
            DocumentBody::Receipt { lines, .. } => lines.iter().map(|l| l.product).collect(),
            DocumentBody::Delivery { lines, .. } => lines.iter().map(|l| l.product).collect(),
            DocumentBody::Transfer { lines, .. } => lines.iter().map(|l| l.product).collect(),
            DocumentBody::Adjustment { lines, .. } => lines.iter().map(|l| l.product).collect(),
        }
    }

    /// Warehouses referenced by the header, for boundary resolution.
    pub fn warehouses(&self) -> Vec<WarehouseId> {
        match self {
            DocumentBody::Receipt { warehouse, .. }
            | DocumentBody::Delivery { warehouse, .. }
            | DocumentBody::Adjustment { warehouse, .. } => vec![*warehouse],
            DocumentBody::Transfer {
                from_warehouse,
                to_warehouse,
                ..
            } => vec![*from_warehouse, *to_warehouse],
        }
    }
}

/// Replacement lines for an update, shaped per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLines {
    Receipt(Vec<ReceiptLine>),
    Delivery(Vec<DeliveryLine>),
    Transfer(Vec<TransferLine>),
    Adjustment(Vec<AdjustmentLine>),
}

/// A business document: receipt, delivery, transfer, or adjustment.
///
/// Once `status == done`, the document and its lines are immutable; no
/// further edits, re-validation, or deletion are permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    number: DocumentNumber,
    status: DocumentStatus,
    body: DocumentBody,
    notes: Option<String>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    validated_by: Option<UserId>,
    validated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Create a draft document after structural validation of the body.
    pub fn new(
        id: DocumentId,
        number: DocumentNumber,
        body: DocumentBody,
        notes: Option<String>,
        created_by: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        check_body(&body)?;
        Ok(Self {
            id,
            number,
            status: DocumentStatus::Draft,
            body,
            notes,
            created_by,
            created_at: at,
            updated_at: at,
            validated_by: None,
            validated_at: None,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn number(&self) -> &DocumentNumber {
        &self.number
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn kind(&self) -> DocumentKind {
        self.body.kind()
    }

    pub fn body(&self) -> &DocumentBody {
        &self.body
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn validated_by(&self) -> Option<UserId> {
        self.validated_by
    }

    pub fn validated_at(&self) -> Option<DateTime<Utc>> {
        self.validated_at
    }

    /// Guard shared by update/delete/cancel/pick: a done document is frozen.
    pub fn ensure_editable(&self) -> DomainResult<()> {
        if self.status == DocumentStatus::Done {
            return Err(DomainError::AlreadyValidated);
        }
        Ok(())
    }

    /// Replace the line set (kind must match); re-runs structural validation.
    ///
    /// The body is only swapped in once the candidate passes validation, so a
    /// rejected update leaves the document untouched.
    pub fn replace_lines(&mut self, lines: DocumentLines, at: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_editable()?;

        let mut candidate = self.body.clone();
        match (&mut candidate, lines) {
            (DocumentBody::Receipt { lines, .. }, DocumentLines::Receipt(new)) => *lines = new,
            (DocumentBody::Delivery { lines, .. }, DocumentLines::Delivery(new)) => *lines = new,
            (DocumentBody::Transfer { lines, .. }, DocumentLines::Transfer(new)) => *lines = new,
            (DocumentBody::Adjustment { lines, .. }, DocumentLines::Adjustment(new)) => {
                *lines = new
            }
            (body, _) => {
                return Err(DomainError::validation(format!(
                    "line shape does not match a {} document",
                    body.kind().as_str()
                )));
            }
        }
        check_body(&candidate)?;

        self.body = candidate;
        self.updated_at = at;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>, at: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_editable()?;
        self.notes = notes;
        self.updated_at = at;
        Ok(())
    }

    /// Move to another non-terminal state via the transition table.
    pub fn transition(&mut self, to: DocumentStatus, at: DateTime<Utc>) -> DomainResult<()> {
        if self.status == DocumentStatus::Done {
            return Err(DomainError::AlreadyValidated);
        }
        if !self.status.can_transition(to) {
            return Err(DomainError::validation(format!(
                "cannot transition from {} to {}",
                self.status.as_str(),
                to.as_str()
            )));
        }
        self.status = to;
        self.updated_at = at;
        Ok(())
    }

    /// Record picked quantities on a delivery and promote it to ready.
    pub fn record_picking(&mut self, picks: &[PickUpdate], at: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_editable()?;

        let DocumentBody::Delivery { lines, .. } = &mut self.body else {
            return Err(DomainError::validation(
                "picking applies to delivery documents only",
            ));
        };

        for pick in picks {
            let Some(line) = lines.iter_mut().find(|l| l.product == pick.product) else {
                return Err(DomainError::validation(format!(
                    "no delivery line for product {}",
                    pick.product
                )));
            };
            if pick.picked_quantity < 0 {
                return Err(DomainError::validation("picked quantity cannot be negative"));
            }
            if pick.picked_quantity > line.quantity {
                return Err(DomainError::validation(format!(
                    "picked quantity cannot exceed ordered quantity for product {}",
                    pick.product
                )));
            }
            line.picked_quantity = pick.picked_quantity;
        }

        if self.status != DocumentStatus::Ready {
            self.transition(DocumentStatus::Ready, at)?;
        } else {
            self.updated_at = at;
        }
        Ok(())
    }

    /// Terminal transition with no stock effect.
    pub fn cancel(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        self.transition(DocumentStatus::Canceled, at)
    }

    /// Plan the movements this document produces at validation.
    ///
    /// Pure: the applier decides whether they can actually be committed.
    pub fn movement_plan(&self) -> DomainResult<Vec<Movement>> {
        if self.body.line_count() == 0 {
            return Err(DomainError::EmptyDocument);
        }

        let mut movements = Vec::new();
        match &self.body {
            DocumentBody::Receipt {
                supplier,
                warehouse,
                lines,
            } => {
                for line in lines {
                    movements.push(Movement {
                        product: line.product,
                        warehouse: *warehouse,
                        quantity_change: line.quantity,
                        kind: EntryKind::Receipt,
                        note: Some(format!("Receipt from {supplier}")),
                    });
                }
            }
            DocumentBody::Delivery {
                customer,
                warehouse,
                lines,
            } => {
                for line in lines {
                    movements.push(Movement {
                        product: line.product,
                        warehouse: *warehouse,
                        quantity_change: -line.deducted_quantity(),
                        kind: EntryKind::Delivery,
                        note: Some(format!("Delivery to {customer}")),
                    });
                }
            }
            DocumentBody::Transfer {
                from_warehouse,
                to_warehouse,
                lines,
            } => {
                for line in lines {
                    movements.push(Movement {
                        product: line.product,
                        warehouse: *from_warehouse,
                        quantity_change: -line.quantity,
                        kind: EntryKind::TransferOut,
                        note: Some(format!("Transfer to {to_warehouse}")),
                    });
                    movements.push(Movement {
                        product: line.product,
                        warehouse: *to_warehouse,
                        quantity_change: line.quantity,
                        kind: EntryKind::TransferIn,
                        note: Some(format!("Transfer from {from_warehouse}")),
                    });
                }
            }
            DocumentBody::Adjustment { warehouse, lines } => {
                for line in lines {
                    // Zero difference means the count matched; nothing to move.
                    if line.difference == 0 {
                        continue;
                    }
                    let reason = line
                        .reason
                        .clone()
                        .unwrap_or_else(|| "Stock count correction".to_string());
                    movements.push(Movement {
                        product: line.product,
                        warehouse: *warehouse,
                        quantity_change: line.difference,
                        kind: EntryKind::Adjustment,
                        note: Some(format!("Adjustment: {reason}")),
                    });
                }
            }
        }
        Ok(movements)
    }

    /// Mark the document done after its movements were applied.
    ///
    /// Fails closed with `AlreadyValidated` if already done; validating twice
    /// must be a no-op error, never a double application.
    pub fn mark_validated(&mut self, actor: UserId, at: DateTime<Utc>) -> DomainResult<()> {
        if self.status == DocumentStatus::Done {
            return Err(DomainError::AlreadyValidated);
        }
        if !self.status.can_transition(DocumentStatus::Done) {
            return Err(DomainError::validation(format!(
                "cannot validate a {} document",
                self.status.as_str()
            )));
        }
        self.status = DocumentStatus::Done;
        self.validated_by = Some(actor);
        self.validated_at = Some(at);
        self.updated_at = at;
        Ok(())
    }
}

fn check_body(body: &DocumentBody) -> DomainResult<()> {
    if body.line_count() == 0 {
        return Err(DomainError::validation("at least one line is required"));
    }

    match body {
        DocumentBody::Receipt {
            supplier, lines, ..
        } => {
            if supplier.trim().is_empty() {
                return Err(DomainError::validation("supplier name is required"));
            }
            for line in lines {
                if line.quantity <= 0 {
                    return Err(DomainError::validation("line quantity must be positive"));
                }
            }
        }
        DocumentBody::Delivery {
            customer, lines, ..
        } => {
            if customer.trim().is_empty() {
                return Err(DomainError::validation("customer name is required"));
            }
            for line in lines {
                if line.quantity <= 0 {
                    return Err(DomainError::validation("line quantity must be positive"));
                }
                if line.picked_quantity < 0 || line.packed_quantity < 0 {
                    return Err(DomainError::validation(
                        "picked/packed quantities cannot be negative",
                    ));
                }
            }
        }
        DocumentBody::Transfer {
            from_warehouse,
            to_warehouse,
            lines,
        } => {
            if from_warehouse == to_warehouse {
                return Err(DomainError::validation(
                    "source and destination warehouses must differ",
                ));
            }
            for line in lines {
                if line.quantity <= 0 {
                    return Err(DomainError::validation("line quantity must be positive"));
                }
            }
        }
        DocumentBody::Adjustment { lines, .. } => {
            for line in lines {
                if line.counted_quantity < 0 {
                    return Err(DomainError::validation(
                        "counted quantity cannot be negative",
                    ));
                }
                if line.difference != line.counted_quantity - line.recorded_quantity {
                    return Err(DomainError::validation(
                        "difference must equal counted minus recorded quantity",
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::AdjustmentLine;
    use proptest::prelude::*;

    fn actor() -> UserId {
        UserId::new()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn receipt_doc(quantity: i64) -> Document {
        Document::new(
            DocumentId::new(),
            DocumentNumber::generate("REC", 1, now()),
            DocumentBody::Receipt {
                supplier: "Acme".to_string(),
                warehouse: WarehouseId::new(),
                lines: vec![ReceiptLine {
                    product: ProductId::new(),
                    quantity,
                    unit_price: 100,
                }],
            },
            None,
            actor(),
            now(),
        )
        .unwrap()
    }

    #[test]
    fn new_document_starts_in_draft() {
        let doc = receipt_doc(5);
        assert_eq!(doc.status(), DocumentStatus::Draft);
        assert_eq!(doc.kind(), DocumentKind::Receipt);
        assert!(doc.validated_at().is_none());
    }

    #[test]
    fn empty_supplier_is_rejected() {
        let err = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("REC", 1, now()),
            DocumentBody::Receipt {
                supplier: "  ".to_string(),
                warehouse: WarehouseId::new(),
                lines: vec![ReceiptLine {
                    product: ProductId::new(),
                    quantity: 1,
                    unit_price: 0,
                }],
            },
            None,
            actor(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn document_without_lines_is_rejected_at_creation() {
        let err = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("DEL", 1, now()),
            DocumentBody::Delivery {
                customer: "Globex".to_string(),
                warehouse: WarehouseId::new(),
                lines: vec![],
            },
            None,
            actor(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let err = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("REC", 1, now()),
            DocumentBody::Receipt {
                supplier: "Acme".to_string(),
                warehouse: WarehouseId::new(),
                lines: vec![ReceiptLine {
                    product: ProductId::new(),
                    quantity: 0,
                    unit_price: 0,
                }],
            },
            None,
            actor(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn transfer_to_same_warehouse_is_rejected() {
        let warehouse = WarehouseId::new();
        let err = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("TRF", 1, now()),
            DocumentBody::Transfer {
                from_warehouse: warehouse,
                to_warehouse: warehouse,
                lines: vec![TransferLine {
                    product: ProductId::new(),
                    quantity: 1,
                    unit_price: 0,
                }],
            },
            None,
            actor(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn receipt_plans_one_inbound_movement_per_line() {
        let doc = receipt_doc(5);
        let movements = doc.movement_plan().unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].quantity_change, 5);
        assert_eq!(movements[0].kind, EntryKind::Receipt);
        assert_eq!(movements[0].note.as_deref(), Some("Receipt from Acme"));
    }

    #[test]
    fn delivery_plans_packed_quantity_when_tracked() {
        let product = ProductId::new();
        let mut line = DeliveryLine::new(product, 6, 100);
        line.packed_quantity = 4;
        let doc = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("DEL", 1, now()),
            DocumentBody::Delivery {
                customer: "Globex".to_string(),
                warehouse: WarehouseId::new(),
                lines: vec![line],
            },
            None,
            actor(),
            now(),
        )
        .unwrap();

        let movements = doc.movement_plan().unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].quantity_change, -4);
        assert_eq!(movements[0].kind, EntryKind::Delivery);
    }

    #[test]
    fn transfer_plans_both_legs_per_line() {
        let from = WarehouseId::new();
        let to = WarehouseId::new();
        let product = ProductId::new();
        let doc = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("TRF", 1, now()),
            DocumentBody::Transfer {
                from_warehouse: from,
                to_warehouse: to,
                lines: vec![TransferLine {
                    product,
                    quantity: 5,
                    unit_price: 0,
                }],
            },
            None,
            actor(),
            now(),
        )
        .unwrap();

        let movements = doc.movement_plan().unwrap();
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].warehouse, from);
        assert_eq!(movements[0].quantity_change, -5);
        assert_eq!(movements[0].kind, EntryKind::TransferOut);
        assert_eq!(movements[1].warehouse, to);
        assert_eq!(movements[1].quantity_change, 5);
        assert_eq!(movements[1].kind, EntryKind::TransferIn);
    }

    #[test]
    fn adjustment_skips_zero_differences() {
        let warehouse = WarehouseId::new();
        let doc = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("ADJ", 1, now()),
            DocumentBody::Adjustment {
                warehouse,
                lines: vec![
                    AdjustmentLine::derive(ProductId::new(), 4, 12, 0, None),
                    AdjustmentLine::derive(ProductId::new(), 7, 7, 0, None),
                ],
            },
            None,
            actor(),
            now(),
        )
        .unwrap();

        let movements = doc.movement_plan().unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].quantity_change, 8);
        assert_eq!(movements[0].kind, EntryKind::Adjustment);
    }

    #[test]
    fn mark_validated_freezes_the_document() {
        let mut doc = receipt_doc(5);
        let validator = actor();
        doc.mark_validated(validator, now()).unwrap();

        assert_eq!(doc.status(), DocumentStatus::Done);
        assert_eq!(doc.validated_by(), Some(validator));
        assert!(doc.validated_at().is_some());

        assert_eq!(
            doc.mark_validated(actor(), now()).unwrap_err(),
            DomainError::AlreadyValidated
        );
        assert_eq!(
            doc.set_notes(Some("late edit".to_string()), now())
                .unwrap_err(),
            DomainError::AlreadyValidated
        );
        assert_eq!(doc.cancel(now()).unwrap_err(), DomainError::AlreadyValidated);
    }

    #[test]
    fn canceled_document_cannot_be_validated() {
        let mut doc = receipt_doc(5);
        doc.cancel(now()).unwrap();
        let err = doc.mark_validated(actor(), now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn picking_promotes_delivery_to_ready_and_caps_at_ordered() {
        let product = ProductId::new();
        let mut doc = Document::new(
            DocumentId::new(),
            DocumentNumber::generate("DEL", 1, now()),
            DocumentBody::Delivery {
                customer: "Globex".to_string(),
                warehouse: WarehouseId::new(),
                lines: vec![DeliveryLine::new(product, 6, 100)],
            },
            None,
            actor(),
            now(),
        )
        .unwrap();

        let err = doc
            .record_picking(
                &[PickUpdate {
                    product,
                    picked_quantity: 7,
                }],
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(doc.status(), DocumentStatus::Draft);

        doc.record_picking(
            &[PickUpdate {
                product,
                picked_quantity: 5,
            }],
            now(),
        )
        .unwrap();
        assert_eq!(doc.status(), DocumentStatus::Ready);
    }

    #[test]
    fn picking_a_receipt_is_rejected() {
        let mut doc = receipt_doc(5);
        let err = doc
            .record_picking(
                &[PickUpdate {
                    product: ProductId::new(),
                    picked_quantity: 1,
                }],
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn replace_lines_rejects_kind_mismatch() {
        let mut doc = receipt_doc(5);
        let err = doc
            .replace_lines(
                DocumentLines::Transfer(vec![TransferLine {
                    product: ProductId::new(),
                    quantity: 1,
                    unit_price: 0,
                }]),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn replace_lines_revalidates_structure() {
        let mut doc = receipt_doc(5);
        let err = doc
            .replace_lines(DocumentLines::Receipt(vec![]), now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // Rejected update leaves the previous lines in place.
        assert_eq!(doc.body().line_count(), 1);
    }

    proptest! {
        /// Property: a pick succeeds exactly when it stays within the ordered
        /// quantity, and the line records it verbatim.
        #[test]
        fn picking_accepts_exactly_the_ordered_range(ordered in 1i64..1000, picked in 0i64..1200) {
            let product = ProductId::new();
            let mut doc = Document::new(
                DocumentId::new(),
                DocumentNumber::generate("DEL", 1, now()),
                DocumentBody::Delivery {
                    customer: "Globex".to_string(),
                    warehouse: WarehouseId::new(),
                    lines: vec![DeliveryLine::new(product, ordered, 0)],
                },
                None,
                actor(),
                now(),
            )
            .unwrap();

            let result = doc.record_picking(
                &[PickUpdate { product, picked_quantity: picked }],
                now(),
            );
            if picked <= ordered {
                prop_assert!(result.is_ok());
                let DocumentBody::Delivery { lines, .. } = doc.body() else {
                    unreachable!()
                };
                prop_assert_eq!(lines[0].picked_quantity, picked);
                prop_assert_eq!(doc.status(), DocumentStatus::Ready);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(doc.status(), DocumentStatus::Draft);
            }
        }

        /// Property: a receipt plan is strictly inbound, one movement per
        /// line, all landing in the document's warehouse.
        #[test]
        fn receipt_plans_are_strictly_inbound(quantities in prop::collection::vec(1i64..500, 1..8)) {
            let warehouse = WarehouseId::new();
            let lines: Vec<ReceiptLine> = quantities
                .iter()
                .map(|&quantity| ReceiptLine {
                    product: ProductId::new(),
                    quantity,
                    unit_price: 0,
                })
                .collect();
            let doc = Document::new(
                DocumentId::new(),
                DocumentNumber::generate("REC", 1, now()),
                DocumentBody::Receipt {
                    supplier: "Acme".to_string(),
                    warehouse,
                    lines,
                },
                None,
                actor(),
                now(),
            )
            .unwrap();

            let movements = doc.movement_plan().unwrap();
            prop_assert_eq!(movements.len(), quantities.len());
            for movement in &movements {
                prop_assert!(movement.quantity_change > 0);
                prop_assert_eq!(movement.warehouse, warehouse);
                prop_assert_eq!(movement.kind, EntryKind::Receipt);
            }
        }
    }
}

//! Movement applier: the single writer for balances and the ledger.
//!
//! Every stock change flows through [`MovementApplier`]. A batch locks the
//! pairs it touches (sorted, so concurrent batches cannot deadlock), stages
//! the new balances, rejects the whole batch if any line would go negative,
//! and only then writes the balances and appends the ledger entries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use stockmaster_core::{DocumentId, DomainError, DomainResult, ProductId, UserId, WarehouseId};
use stockmaster_ledger::{BalanceRecord, EntryKind, LedgerEntry, Movement};

use crate::locks::KeyLocks;
use crate::store::{BalanceStore, LedgerStore};

/// Provenance shared by every entry a batch produces.
#[derive(Debug, Clone)]
pub struct MovementContext {
    pub document_id: DocumentId,
    pub document_number: String,
    pub actor: UserId,
    pub at: DateTime<Utc>,
}

/// Outcome of one applied movement.
#[derive(Debug, Clone)]
pub struct AppliedMovement {
    pub old_quantity: i64,
    pub new_quantity: i64,
    pub entry: LedgerEntry,
}

/// Sole writer of [`BalanceStore`] and [`LedgerStore`].
pub struct MovementApplier<B, L> {
    balances: Arc<B>,
    ledger: Arc<L>,
    locks: KeyLocks<(ProductId, WarehouseId)>,
}

impl<B, L> MovementApplier<B, L>
where
    B: BalanceStore,
    L: LedgerStore,
{
    pub fn new(balances: Arc<B>, ledger: Arc<L>) -> Self {
        Self {
            balances,
            ledger,
            locks: KeyLocks::new(),
        }
    }

    /// Apply a batch of movements atomically.
    ///
    /// Either every movement lands (balances updated, entries appended) or
    /// none does. Movements are applied in the order given; a later movement
    /// sees the staged balance left by an earlier one on the same pair.
    pub fn apply_batch(
        &self,
        movements: &[Movement],
        ctx: &MovementContext,
    ) -> DomainResult<Vec<AppliedMovement>> {
        if movements.is_empty() {
            return Ok(Vec::new());
        }

        let mut keys: Vec<(ProductId, WarehouseId)> =
            movements.iter().map(Movement::pair).collect();
        keys.sort();
        keys.dedup();

        let handles = self.locks.handles(&keys)?;
        let mut guards = Vec::with_capacity(handles.len());
        for handle in &handles {
            guards.push(
                handle
                    .lock()
                    .map_err(|_| DomainError::conflict("balance lock poisoned"))?,
            );
        }

        let mut staged: HashMap<(ProductId, WarehouseId), BalanceRecord> = HashMap::new();
        for key in &keys {
            let record = match self.balances.get(key.0, key.1)? {
                Some(record) => record,
                None => BalanceRecord::empty(key.0, key.1, ctx.at),
            };
            staged.insert(*key, record);
        }

        let mut applied = Vec::with_capacity(movements.len());
        for movement in movements {
            let key = movement.pair();
            let record = staged
                .get_mut(&key)
                .ok_or_else(|| DomainError::conflict("staged balance missing"))?;
            let old_quantity = record.quantity;
            let new_quantity = old_quantity + movement.quantity_change;
            if new_quantity < 0 {
                warn!(
                    product = %movement.product,
                    warehouse = %movement.warehouse,
                    requested = movement.quantity_change.abs(),
                    available = old_quantity,
                    document = %ctx.document_number,
                    "insufficient stock, rejecting batch"
                );
                return Err(DomainError::InsufficientStock {
                    product: movement.product,
                    warehouse: movement.warehouse,
                    requested: movement.quantity_change.abs(),
                    available: old_quantity,
                });
            }
            record.quantity = new_quantity;
            record.last_updated = ctx.at;

            applied.push(AppliedMovement {
                old_quantity,
                new_quantity,
                entry: LedgerEntry {
                    entry_id: Uuid::now_v7(),
                    product: movement.product,
                    warehouse: movement.warehouse,
                    quantity_change: movement.quantity_change,
                    balance_after: new_quantity,
                    kind: movement.kind,
                    document_id: ctx.document_id,
                    document_number: ctx.document_number.clone(),
                    note: movement.note.clone(),
                    created_by: ctx.actor,
                    created_at: ctx.at,
                },
            });
        }

        for record in staged.into_values() {
            self.balances.upsert(record)?;
        }
        self.ledger
            .append(applied.iter().map(|a| a.entry.clone()).collect())?;

        debug!(
            document = %ctx.document_number,
            movements = applied.len(),
            "applied movement batch"
        );
        Ok(applied)
    }

    /// Apply a single movement.
    pub fn apply(
        &self,
        movement: Movement,
        ctx: &MovementContext,
    ) -> DomainResult<AppliedMovement> {
        let mut applied = self.apply_batch(std::slice::from_ref(&movement), ctx)?;
        applied
            .pop()
            .ok_or_else(|| DomainError::conflict("empty batch result"))
    }

    /// Force a pair's balance to `target` via an adjustment entry.
    ///
    /// Returns `None` when the balance is already at `target` (no entry is
    /// written). `target` must be non-negative.
    pub fn set_quantity(
        &self,
        product: ProductId,
        warehouse: WarehouseId,
        target: i64,
        note: Option<String>,
        ctx: &MovementContext,
    ) -> DomainResult<Option<AppliedMovement>> {
        if target < 0 {
            return Err(DomainError::validation(
                "target quantity cannot be negative",
            ));
        }

        let handle = self.locks.handle(&(product, warehouse))?;
        let _guard = handle
            .lock()
            .map_err(|_| DomainError::conflict("balance lock poisoned"))?;

        let mut record = match self.balances.get(product, warehouse)? {
            Some(record) => record,
            None => BalanceRecord::empty(product, warehouse, ctx.at),
        };
        let old_quantity = record.quantity;
        let quantity_change = target - old_quantity;
        if quantity_change == 0 {
            return Ok(None);
        }

        record.quantity = target;
        record.last_updated = ctx.at;

        let entry = LedgerEntry {
            entry_id: Uuid::now_v7(),
            product,
            warehouse,
            quantity_change,
            balance_after: target,
            kind: EntryKind::Adjustment,
            document_id: ctx.document_id,
            document_number: ctx.document_number.clone(),
            note,
            created_by: ctx.actor,
            created_at: ctx.at,
        };

        self.balances.upsert(record)?;
        self.ledger.append(vec![entry.clone()])?;

        debug!(
            product = %product,
            warehouse = %warehouse,
            old = old_quantity,
            new = target,
            "corrected balance"
        );
        Ok(Some(AppliedMovement {
            old_quantity,
            new_quantity: target,
            entry,
        }))
    }
}

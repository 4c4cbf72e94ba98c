//! Planned movements: the unit of work handed to the movement applier.

use serde::{Deserialize, Serialize};

use stockmaster_core::{ProductId, Quantity, WarehouseId};

use crate::entry::EntryKind;

/// One signed quantity change to apply atomically to a (product, warehouse)
/// balance, plus its corresponding ledger append.
///
/// Movements are *planned* by document validation and *applied* by the
/// movement applier; nothing else writes the ledger or the balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub product: ProductId,
    pub warehouse: WarehouseId,
    /// Signed delta; negative for outbound movements.
    pub quantity_change: Quantity,
    pub kind: EntryKind,
    pub note: Option<String>,
}

impl Movement {
    /// The balance-pair key this movement touches.
    pub fn pair(&self) -> (ProductId, WarehouseId) {
        (self.product, self.warehouse)
    }
}

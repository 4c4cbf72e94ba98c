//! Line items, one shape per document kind.

use serde::{Deserialize, Serialize};

use stockmaster_core::{ProductId, Quantity};

/// Receipt line: goods coming in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product: ProductId,
    pub quantity: Quantity,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
}

/// Delivery line: goods going out, with the warehouse pick/pack trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLine {
    pub product: ProductId,
    /// Ordered quantity.
    pub quantity: Quantity,
    pub picked_quantity: Quantity,
    pub packed_quantity: Quantity,
    pub unit_price: u64,
}

impl DeliveryLine {
    pub fn new(product: ProductId, quantity: Quantity, unit_price: u64) -> Self {
        Self {
            product,
            quantity,
            picked_quantity: 0,
            packed_quantity: 0,
            unit_price,
        }
    }

    /// Quantity deducted at validation: the packed quantity when the pack
    /// step tracked one, otherwise the ordered quantity.
    pub fn deducted_quantity(&self) -> Quantity {
        if self.packed_quantity > 0 {
            self.packed_quantity
        } else {
            self.quantity
        }
    }
}

/// Transfer line; source and destination warehouses live on the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLine {
    pub product: ProductId,
    pub quantity: Quantity,
    pub unit_price: u64,
}

/// Adjustment line: counted vs recorded, with the difference pre-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    pub product: ProductId,
    /// Snapshot of the balance at creation (or last line update), not at
    /// validation time.
    pub recorded_quantity: Quantity,
    pub counted_quantity: Quantity,
    /// `counted_quantity - recorded_quantity`; may be negative.
    pub difference: Quantity,
    pub unit_price: u64,
    pub reason: Option<String>,
}

impl AdjustmentLine {
    /// Build a line from a count, deriving the difference.
    pub fn derive(
        product: ProductId,
        recorded_quantity: Quantity,
        counted_quantity: Quantity,
        unit_price: u64,
        reason: Option<String>,
    ) -> Self {
        Self {
            product,
            recorded_quantity,
            counted_quantity,
            difference: counted_quantity - recorded_quantity,
            unit_price,
            reason,
        }
    }
}

/// One picked-quantity update in the delivery pick flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickUpdate {
    pub product: ProductId,
    pub picked_quantity: Quantity,
}

//! Reference resolution at the system boundary.
//!
//! Documents carry product and warehouse references; the service checks them
//! against a catalog before accepting a document or applying its movements.

use std::collections::HashSet;
use std::sync::RwLock;

use stockmaster_core::{DomainError, DomainResult, ProductId, WarehouseId};

/// Catalog lookups for reference validation.
pub trait ReferenceResolver: Send + Sync {
    fn product_exists(&self, product: ProductId) -> DomainResult<bool>;
    fn warehouse_exists(&self, warehouse: WarehouseId) -> DomainResult<bool>;
}

/// In-memory catalog of known products and warehouses.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashSet<ProductId>>,
    warehouses: RwLock<HashSet<WarehouseId>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_product(&self, product: ProductId) -> DomainResult<()> {
        self.products
            .write()
            .map_err(|_| DomainError::conflict("catalog lock poisoned"))?
            .insert(product);
        Ok(())
    }

    pub fn register_warehouse(&self, warehouse: WarehouseId) -> DomainResult<()> {
        self.warehouses
            .write()
            .map_err(|_| DomainError::conflict("catalog lock poisoned"))?
            .insert(warehouse);
        Ok(())
    }
}

impl ReferenceResolver for InMemoryCatalog {
    fn product_exists(&self, product: ProductId) -> DomainResult<bool> {
        Ok(self
            .products
            .read()
            .map_err(|_| DomainError::conflict("catalog lock poisoned"))?
            .contains(&product))
    }

    fn warehouse_exists(&self, warehouse: WarehouseId) -> DomainResult<bool> {
        Ok(self
            .warehouses
            .read()
            .map_err(|_| DomainError::conflict("catalog lock poisoned"))?
            .contains(&warehouse))
    }
}

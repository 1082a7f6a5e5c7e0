//! In-memory implementations of the consumed collaborator ports, used by
//! the journal-replay binary and the test suites. Production deployments
//! adapt these ports to the real directory/inventory/settings services.

use crate::domain::ports::{InventoryService, SupplierDirectory, TaxSettings};
use crate::domain::supplier::{Supplier, SupplierId};
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Supplier directory backed by a concurrent map.
#[derive(Default)]
pub struct InMemorySupplierDirectory {
    suppliers: DashMap<SupplierId, Supplier>,
}

impl InMemorySupplierDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: SupplierId, supplier: Supplier) {
        self.suppliers.insert(id, supplier);
    }
}

#[async_trait]
impl SupplierDirectory for InMemorySupplierDirectory {
    async fn resolve(&self, id: &SupplierId) -> Result<Option<Supplier>> {
        Ok(self.suppliers.get(id).map(|s| s.value().clone()))
    }
}

/// Inventory service that accumulates stock increases per product, so
/// tests can observe exactly what receipt booked.
#[derive(Default)]
pub struct RecordingInventory {
    stock: DashMap<String, u64>,
}

impl RecordingInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total quantity booked for a product across all receipts.
    pub fn recorded(&self, product_id: &str) -> u64 {
        self.stock.get(product_id).map(|q| *q).unwrap_or(0)
    }
}

#[async_trait]
impl InventoryService for RecordingInventory {
    async fn increase_stock(&self, product_id: &str, quantity: u32) -> Result<()> {
        *self.stock.entry(product_id.to_string()).or_insert(0) += u64::from(quantity);
        Ok(())
    }
}

/// Constant VAT rate (e.g. 0.16 for 16%).
pub struct FixedVatRate {
    rate: Decimal,
}

impl FixedVatRate {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl TaxSettings for FixedVatRate {
    async fn current_vat_rate(&self) -> Result<Decimal> {
        Ok(self.rate)
    }
}

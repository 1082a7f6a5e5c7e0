use super::invoice::{InvoiceId, SupplierInvoice};
use super::payment::SupplierPayment;
use super::purchase_order::{PurchaseOrder, PurchaseOrderId};
use super::supplier::{Supplier, SupplierId};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Keyed storage for purchase orders. Also owns the `PO-nnnn` sequence so
/// numbering survives restarts with a persistent backend.
#[async_trait]
pub trait PurchaseOrderStore: Send + Sync {
    async fn put(&self, po: PurchaseOrder) -> Result<()>;
    async fn get(&self, id: PurchaseOrderId) -> Result<Option<PurchaseOrder>>;
    async fn get_all(&self) -> Result<Vec<PurchaseOrder>>;
    async fn next_po_number(&self) -> Result<u64>;
}

/// Keyed storage for supplier invoices.
///
/// `insert` enforces the one-invoice-per-receipt rule: the purchase order
/// id is a unique index, and inserting a second invoice for the same PO
/// fails with `DuplicateReceipt`.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, invoice: SupplierInvoice) -> Result<()>;
    async fn put(&self, invoice: SupplierInvoice) -> Result<()>;
    async fn get(&self, id: InvoiceId) -> Result<Option<SupplierInvoice>>;
    async fn get_all(&self) -> Result<Vec<SupplierInvoice>>;
    async fn find_by_purchase_order(
        &self,
        po_id: PurchaseOrderId,
    ) -> Result<Option<SupplierInvoice>>;
    async fn next_invoice_number(&self) -> Result<u64>;
}

/// Append-only storage for supplier payments.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn append(&self, payment: SupplierPayment) -> Result<()>;
    async fn list_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<SupplierPayment>>;
}

/// External supplier directory, consumed read-only.
#[async_trait]
pub trait SupplierDirectory: Send + Sync {
    async fn resolve(&self, id: &SupplierId) -> Result<Option<Supplier>>;
}

/// External inventory service; called once per received item.
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn increase_stock(&self, product_id: &str, quantity: u32) -> Result<()>;
}

/// External tax settings.
#[async_trait]
pub trait TaxSettings: Send + Sync {
    async fn current_vat_rate(&self) -> Result<Decimal>;
}

pub type PurchaseOrderStoreRef = Arc<dyn PurchaseOrderStore>;
pub type InvoiceStoreRef = Arc<dyn InvoiceStore>;
pub type PaymentStoreRef = Arc<dyn PaymentStore>;
pub type SupplierDirectoryRef = Arc<dyn SupplierDirectory>;
pub type InventoryServiceRef = Arc<dyn InventoryService>;
pub type TaxSettingsRef = Arc<dyn TaxSettings>;

use crate::domain::invoice::{InvoiceId, SupplierInvoice};
use crate::domain::payment::SupplierPayment;
use crate::domain::ports::{InvoiceStore, PaymentStore, PurchaseOrderStore};
use crate::domain::purchase_order::{PurchaseOrder, PurchaseOrderId};
use crate::error::{ApError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Thread-safe in-memory ledger store backing all three tables.
///
/// `Arc<RwLock<HashMap>>` per table allows shared concurrent access; the
/// invoice table keeps a purchase-order index so the one-invoice-per-
/// receipt rule is enforced at the storage layer. Ideal for tests and
/// single-session journal replays.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    purchase_orders: Arc<RwLock<HashMap<PurchaseOrderId, PurchaseOrder>>>,
    invoices: Arc<RwLock<HashMap<InvoiceId, SupplierInvoice>>>,
    po_index: Arc<RwLock<HashMap<PurchaseOrderId, InvoiceId>>>,
    payments: Arc<RwLock<Vec<SupplierPayment>>>,
    po_seq: Arc<AtomicU64>,
    invoice_seq: Arc<AtomicU64>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PurchaseOrderStore for InMemoryLedger {
    async fn put(&self, po: PurchaseOrder) -> Result<()> {
        let mut purchase_orders = self.purchase_orders.write().await;
        purchase_orders.insert(po.id, po);
        Ok(())
    }

    async fn get(&self, id: PurchaseOrderId) -> Result<Option<PurchaseOrder>> {
        let purchase_orders = self.purchase_orders.read().await;
        Ok(purchase_orders.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<PurchaseOrder>> {
        let purchase_orders = self.purchase_orders.read().await;
        let mut all: Vec<_> = purchase_orders.values().cloned().collect();
        all.sort_by(|a, b| a.po_number.cmp(&b.po_number));
        Ok(all)
    }

    async fn next_po_number(&self) -> Result<u64> {
        Ok(self.po_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryLedger {
    async fn insert(&self, invoice: SupplierInvoice) -> Result<()> {
        // Take both locks in a fixed order; the index and the table must
        // move together.
        let mut po_index = self.po_index.write().await;
        let mut invoices = self.invoices.write().await;
        if po_index.contains_key(&invoice.purchase_order_id) {
            return Err(ApError::DuplicateReceipt(
                invoice.purchase_order_id.to_string(),
            ));
        }
        po_index.insert(invoice.purchase_order_id, invoice.id);
        invoices.insert(invoice.id, invoice);
        Ok(())
    }

    async fn put(&self, invoice: SupplierInvoice) -> Result<()> {
        let mut invoices = self.invoices.write().await;
        invoices.insert(invoice.id, invoice);
        Ok(())
    }

    async fn get(&self, id: InvoiceId) -> Result<Option<SupplierInvoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<SupplierInvoice>> {
        let invoices = self.invoices.read().await;
        let mut all: Vec<_> = invoices.values().cloned().collect();
        all.sort_by(|a, b| a.invoice_number.cmp(&b.invoice_number));
        Ok(all)
    }

    async fn find_by_purchase_order(
        &self,
        po_id: PurchaseOrderId,
    ) -> Result<Option<SupplierInvoice>> {
        let po_index = self.po_index.read().await;
        let Some(invoice_id) = po_index.get(&po_id).copied() else {
            return Ok(None);
        };
        let invoices = self.invoices.read().await;
        Ok(invoices.get(&invoice_id).cloned())
    }

    async fn next_invoice_number(&self) -> Result<u64> {
        Ok(self.invoice_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl PaymentStore for InMemoryLedger {
    async fn append(&self, payment: SupplierPayment) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.push(payment);
        Ok(())
    }

    async fn list_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<SupplierPayment>> {
        let payments = self.payments.read().await;
        Ok(payments
            .iter()
            .filter(|p| p.invoice_id == invoice_id)
            .cloned()
            .collect())
    }
}

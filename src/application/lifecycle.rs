use crate::application::locks::EntityLocks;
use crate::domain::invoice::SupplierInvoice;
use crate::domain::money::vat_on;
use crate::domain::ports::{
    InventoryServiceRef, InvoiceStoreRef, PurchaseOrderStoreRef, SupplierDirectoryRef,
    TaxSettingsRef,
};
use crate::domain::purchase_order::{PoStatus, PurchaseOrder, PurchaseOrderId, PurchaseOrderItem};
use crate::domain::supplier::SupplierId;
use crate::error::{ApError, Result};
use chrono::{NaiveDate, Utc};

/// Owns the purchase-order state machine.
///
/// All mutations run inside the per-PO critical section: read the current
/// record, validate the transition on the entity, write back. Receiving a
/// PO additionally materializes exactly one supplier invoice and notifies
/// the inventory collaborator per item.
pub struct PoLifecycleManager {
    purchase_orders: PurchaseOrderStoreRef,
    invoices: InvoiceStoreRef,
    suppliers: SupplierDirectoryRef,
    inventory: InventoryServiceRef,
    tax: TaxSettingsRef,
    locks: EntityLocks,
}

impl PoLifecycleManager {
    pub fn new(
        purchase_orders: PurchaseOrderStoreRef,
        invoices: InvoiceStoreRef,
        suppliers: SupplierDirectoryRef,
        inventory: InventoryServiceRef,
        tax: TaxSettingsRef,
    ) -> Self {
        Self {
            purchase_orders,
            invoices,
            suppliers,
            inventory,
            tax,
            locks: EntityLocks::new(),
        }
    }

    /// Creates a purchase order in `Draft` or `Sent` with a freshly
    /// assigned sequential number.
    pub async fn create_purchase_order(
        &self,
        supplier_id: SupplierId,
        items: Vec<PurchaseOrderItem>,
        expected_date: NaiveDate,
        initial_status: PoStatus,
    ) -> Result<PurchaseOrder> {
        // An unknown supplier is malformed input, not a missing entity.
        if self.suppliers.resolve(&supplier_id).await?.is_none() {
            return Err(ApError::Validation(format!(
                "unknown supplier {supplier_id}"
            )));
        }

        let seq = self.purchase_orders.next_po_number().await?;
        let po = PurchaseOrder::new(
            format!("PO-{seq:04}"),
            supplier_id,
            items,
            Utc::now().date_naive(),
            expected_date,
            initial_status,
        )?;
        self.purchase_orders.put(po.clone()).await?;
        tracing::info!(po = %po.po_number, supplier = %po.supplier_id, total = %po.total_cost(), "created purchase order");
        Ok(po)
    }

    /// `Draft → Sent`.
    pub async fn send(&self, po_id: PurchaseOrderId) -> Result<PurchaseOrder> {
        let _guard = self.locks.acquire(po_id.0).await;
        let mut po = self.get_required(po_id).await?;
        po.send()?;
        self.purchase_orders.put(po.clone()).await?;
        tracing::info!(po = %po.po_number, "sent purchase order");
        Ok(po)
    }

    /// `Draft | Sent → Cancelled`.
    pub async fn cancel(&self, po_id: PurchaseOrderId) -> Result<PurchaseOrder> {
        let _guard = self.locks.acquire(po_id.0).await;
        let mut po = self.get_required(po_id).await?;
        po.cancel()?;
        self.purchase_orders.put(po.clone()).await?;
        tracing::info!(po = %po.po_number, "cancelled purchase order");
        Ok(po)
    }

    /// `Sent → Received`: materializes the supplier invoice and books the
    /// received quantities into inventory.
    ///
    /// Idempotent on retry: the invoice is inserted under the PO's unique
    /// index before the status write, so a second receive for the same PO
    /// fails with `DuplicateReceipt` instead of duplicating the invoice.
    pub async fn receive(
        &self,
        po_id: PurchaseOrderId,
        received_date: NaiveDate,
    ) -> Result<(PurchaseOrder, SupplierInvoice)> {
        let _guard = self.locks.acquire(po_id.0).await;
        let mut po = self.get_required(po_id).await?;

        if self.invoices.find_by_purchase_order(po_id).await?.is_some() {
            return Err(ApError::DuplicateReceipt(po.po_number));
        }
        po.receive(received_date)?;

        let supplier = self
            .suppliers
            .resolve(&po.supplier_id)
            .await?
            .ok_or_else(|| ApError::not_found("supplier", &po.supplier_id))?;
        let vat_rate = self.tax.current_vat_rate().await?;

        let subtotal = po.total_cost();
        let seq = self.invoices.next_invoice_number().await?;
        let invoice = SupplierInvoice::new(
            format!("INV-{seq:04}"),
            po.id,
            po.supplier_id.clone(),
            received_date,
            supplier.credit_terms.due_date(received_date),
            subtotal,
            vat_on(subtotal, vat_rate),
        );

        self.invoices.insert(invoice.clone()).await?;
        for item in &po.items {
            self.inventory
                .increase_stock(&item.product_id, item.quantity)
                .await?;
        }
        self.purchase_orders.put(po.clone()).await?;

        tracing::info!(
            po = %po.po_number,
            invoice = %invoice.invoice_number,
            due = %invoice.due_date,
            total = %invoice.total_amount(),
            "received purchase order"
        );
        Ok((po, invoice))
    }

    pub async fn get_purchase_order(&self, po_id: PurchaseOrderId) -> Result<PurchaseOrder> {
        self.get_required(po_id).await
    }

    pub async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        self.purchase_orders.get_all().await
    }

    /// The invoice materialized when this purchase order was received.
    pub async fn invoice_for(&self, po_id: PurchaseOrderId) -> Result<SupplierInvoice> {
        self.invoices
            .find_by_purchase_order(po_id)
            .await?
            .ok_or_else(|| ApError::not_found("invoice for purchase order", po_id))
    }

    async fn get_required(&self, po_id: PurchaseOrderId) -> Result<PurchaseOrder> {
        self.purchase_orders
            .get(po_id)
            .await?
            .ok_or_else(|| ApError::not_found("purchase order", po_id))
    }
}

use crate::domain::invoice::{InvoiceId, SupplierInvoice};
use crate::domain::payment::SupplierPayment;
use crate::domain::ports::{InvoiceStore, PaymentStore, PurchaseOrderStore};
use crate::domain::purchase_order::{PurchaseOrder, PurchaseOrderId};
use crate::error::{ApError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for purchase orders.
pub const CF_PURCHASE_ORDERS: &str = "purchase_orders";
/// Column Family for supplier invoices.
pub const CF_INVOICES: &str = "supplier_invoices";
/// Column Family for the append-only payment ledger.
pub const CF_PAYMENTS: &str = "supplier_payments";
/// Column Family mapping purchase order id -> invoice id (unique receipt index).
pub const CF_PO_INDEX: &str = "po_index";
/// Column Family for number sequences.
pub const CF_META: &str = "meta";

const META_PO_SEQ: &[u8] = b"po_seq";
const META_INVOICE_SEQ: &[u8] = b"invoice_seq";

/// Persistent ledger store backed by RocksDB.
///
/// Each logical table gets its own Column Family; values are JSON. The
/// `po_index` family enforces the one-invoice-per-receipt rule and the
/// `meta` family keeps the PO/invoice number sequences across restarts.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
    // Sequence bumps and invoice inserts are read-then-write; RocksDB has
    // no conditional put, so serialize them here.
    seq_lock: Arc<Mutex<()>>,
    insert_lock: Arc<Mutex<()>>,
}

impl RocksDbLedger {
    /// Opens or creates the database at `path`, ensuring all column
    /// families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = [
            CF_PURCHASE_ORDERS,
            CF_INVOICES,
            CF_PAYMENTS,
            CF_PO_INDEX,
            CF_META,
        ]
        .into_iter()
        .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
        .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        Ok(Self {
            db: Arc::new(db),
            seq_lock: Arc::new(Mutex::new(())),
            insert_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            ApError::Internal(Box::new(std::io::Error::other(format!(
                "column family {name} not found"
            ))))
        })
    }

    fn put_json<T: serde::Serialize>(&self, cf_name: &str, key: &[u8], value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        self.db.put_cf(&cf, key, serde_json::to_vec(value)?)?;
        Ok(())
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        cf_name: &str,
        key: &[u8],
    ) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(&cf, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan_json<T: serde::de::DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    async fn next_sequence(&self, key: &[u8]) -> Result<u64> {
        let _guard = self.seq_lock.lock().await;
        let cf = self.cf(CF_META)?;
        let current = match self.db.get_cf(&cf, key)? {
            Some(bytes) => {
                let bytes: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    ApError::Internal(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "corrupt sequence value",
                    )))
                })?;
                u64::from_be_bytes(bytes)
            }
            None => 0,
        };
        let next = current + 1;
        self.db.put_cf(&cf, key, next.to_be_bytes())?;
        Ok(next)
    }
}

#[async_trait]
impl PurchaseOrderStore for RocksDbLedger {
    async fn put(&self, po: PurchaseOrder) -> Result<()> {
        self.put_json(CF_PURCHASE_ORDERS, po.id.0.as_bytes(), &po)
    }

    async fn get(&self, id: PurchaseOrderId) -> Result<Option<PurchaseOrder>> {
        self.get_json(CF_PURCHASE_ORDERS, id.0.as_bytes())
    }

    async fn get_all(&self) -> Result<Vec<PurchaseOrder>> {
        let mut all: Vec<PurchaseOrder> = self.scan_json(CF_PURCHASE_ORDERS)?;
        all.sort_by(|a, b| a.po_number.cmp(&b.po_number));
        Ok(all)
    }

    async fn next_po_number(&self) -> Result<u64> {
        self.next_sequence(META_PO_SEQ).await
    }
}

#[async_trait]
impl InvoiceStore for RocksDbLedger {
    async fn insert(&self, invoice: SupplierInvoice) -> Result<()> {
        let _guard = self.insert_lock.lock().await;
        let index_cf = self.cf(CF_PO_INDEX)?;
        let po_key = invoice.purchase_order_id.0.as_bytes();
        if self.db.get_pinned_cf(&index_cf, po_key)?.is_some() {
            return Err(ApError::DuplicateReceipt(
                invoice.purchase_order_id.to_string(),
            ));
        }
        self.db.put_cf(&index_cf, po_key, invoice.id.0.as_bytes())?;
        self.put_json(CF_INVOICES, invoice.id.0.as_bytes(), &invoice)
    }

    async fn put(&self, invoice: SupplierInvoice) -> Result<()> {
        self.put_json(CF_INVOICES, invoice.id.0.as_bytes(), &invoice)
    }

    async fn get(&self, id: InvoiceId) -> Result<Option<SupplierInvoice>> {
        self.get_json(CF_INVOICES, id.0.as_bytes())
    }

    async fn get_all(&self) -> Result<Vec<SupplierInvoice>> {
        let mut all: Vec<SupplierInvoice> = self.scan_json(CF_INVOICES)?;
        all.sort_by(|a, b| a.invoice_number.cmp(&b.invoice_number));
        Ok(all)
    }

    async fn find_by_purchase_order(
        &self,
        po_id: PurchaseOrderId,
    ) -> Result<Option<SupplierInvoice>> {
        let index_cf = self.cf(CF_PO_INDEX)?;
        let Some(bytes) = self.db.get_cf(&index_cf, po_id.0.as_bytes())? else {
            return Ok(None);
        };
        let invoice_id = uuid::Uuid::from_slice(&bytes).map_err(|e| {
            ApError::Internal(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("corrupt po_index entry: {e}"),
            )))
        })?;
        self.get_json(CF_INVOICES, invoice_id.as_bytes())
    }

    async fn next_invoice_number(&self) -> Result<u64> {
        self.next_sequence(META_INVOICE_SEQ).await
    }
}

#[async_trait]
impl PaymentStore for RocksDbLedger {
    async fn append(&self, payment: SupplierPayment) -> Result<()> {
        self.put_json(CF_PAYMENTS, payment.id.0.as_bytes(), &payment)
    }

    async fn list_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<SupplierPayment>> {
        let all: Vec<SupplierPayment> = self.scan_json(CF_PAYMENTS)?;
        Ok(all
            .into_iter()
            .filter(|p| p.invoice_id == invoice_id)
            .collect())
    }
}

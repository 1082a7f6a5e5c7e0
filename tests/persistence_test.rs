#![cfg(feature = "storage-rocksdb")]

use duka_ap::application::lifecycle::PoLifecycleManager;
use duka_ap::application::payments::InvoicePaymentEngine;
use duka_ap::domain::invoice::InvoiceStatus;
use duka_ap::domain::payment::PaymentMethod;
use duka_ap::domain::ports::InvoiceStore;
use duka_ap::domain::purchase_order::{PoStatus, PurchaseOrderItem};
use duka_ap::domain::supplier::{CreditTerms, Supplier, SupplierId};
use duka_ap::infrastructure::collaborators::{
    FixedVatRate, InMemorySupplierDirectory, RecordingInventory,
};
use duka_ap::infrastructure::rocksdb::RocksDbLedger;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::tempdir;

fn manager(ledger: Arc<RocksDbLedger>) -> PoLifecycleManager {
    let directory = InMemorySupplierDirectory::new();
    directory.add(
        SupplierId("SUP-1".to_string()),
        Supplier {
            name: "Eldoret Distributors".to_string(),
            credit_terms: CreditTerms::Net(30),
        },
    );
    PoLifecycleManager::new(
        ledger.clone(),
        ledger,
        Arc::new(directory),
        Arc::new(RecordingInventory::new()),
        Arc::new(FixedVatRate::new(dec!(0.16))),
    )
}

#[tokio::test]
async fn test_lifecycle_survives_reopen() {
    let dir = tempdir().unwrap();

    let invoice_id = {
        let ledger = Arc::new(RocksDbLedger::open(dir.path()).unwrap());
        let lifecycle = manager(ledger.clone());
        let po = lifecycle
            .create_purchase_order(
                SupplierId("SUP-1".to_string()),
                vec![PurchaseOrderItem {
                    product_id: "P-1".to_string(),
                    product_name: "Cooking oil 5L".to_string(),
                    quantity: 2,
                    unit_cost: dec!(500),
                }],
                "2026-02-10".parse().unwrap(),
                PoStatus::Sent,
            )
            .await
            .unwrap();
        let (_, invoice) = lifecycle
            .receive(po.id, "2026-02-03".parse().unwrap())
            .await
            .unwrap();

        let payments = InvoicePaymentEngine::new(ledger.clone(), ledger.clone());
        payments
            .record_payment(
                invoice.id,
                dec!(160),
                "2026-02-20".parse().unwrap(),
                PaymentMethod::Mpesa,
            )
            .await
            .unwrap();
        invoice.id
    };

    // Reopen: invoice, paid amount and payment history are all durable.
    let ledger = Arc::new(RocksDbLedger::open(dir.path()).unwrap());
    let payments = InvoicePaymentEngine::new(ledger.clone(), ledger.clone());

    let invoice = payments.get_invoice(invoice_id).await.unwrap();
    assert_eq!(invoice.paid_amount, dec!(160));
    assert_eq!(invoice.status(), InvoiceStatus::PartiallyPaid);
    assert_eq!(payments.list_payments(invoice_id).await.unwrap().len(), 1);

    // Number sequences continue instead of restarting.
    let lifecycle = manager(ledger.clone());
    let po = lifecycle
        .create_purchase_order(
            SupplierId("SUP-1".to_string()),
            vec![PurchaseOrderItem {
                product_id: "P-2".to_string(),
                product_name: "Wheat flour 2kg".to_string(),
                quantity: 1,
                unit_cost: dec!(150),
            }],
            "2026-03-10".parse().unwrap(),
            PoStatus::Draft,
        )
        .await
        .unwrap();
    assert_eq!(po.po_number, "PO-0002");

    // The receipt index is durable too: re-receiving the old PO fails.
    let old_invoice = InvoiceStore::get(ledger.as_ref(), invoice_id)
        .await
        .unwrap()
        .unwrap();
    let err = lifecycle
        .receive(old_invoice.purchase_order_id, "2026-03-11".parse().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, duka_ap::error::ApError::DuplicateReceipt(_)));
}

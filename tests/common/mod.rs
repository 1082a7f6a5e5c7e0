use chrono::NaiveDate;
use duka_ap::application::aging::AgingReporter;
use duka_ap::application::lifecycle::PoLifecycleManager;
use duka_ap::application::payments::InvoicePaymentEngine;
use duka_ap::domain::purchase_order::PurchaseOrderItem;
use duka_ap::domain::supplier::{CreditTerms, Supplier, SupplierId};
use duka_ap::infrastructure::collaborators::{
    FixedVatRate, InMemorySupplierDirectory, RecordingInventory,
};
use duka_ap::infrastructure::in_memory::InMemoryLedger;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

pub const NET30: &str = "SUP-NET30";
pub const COD: &str = "SUP-COD";

/// Fully wired AP core over the in-memory ledger, with two suppliers
/// seeded (Net 30 and On Delivery) and a 16% VAT rate.
pub struct TestContext {
    pub lifecycle: Arc<PoLifecycleManager>,
    pub payments: Arc<InvoicePaymentEngine>,
    pub reporter: AgingReporter,
    pub inventory: Arc<RecordingInventory>,
}

pub fn context() -> TestContext {
    let ledger = Arc::new(InMemoryLedger::new());
    let directory = InMemorySupplierDirectory::new();
    directory.add(
        SupplierId(NET30.to_string()),
        Supplier {
            name: "Eldoret Distributors".to_string(),
            credit_terms: CreditTerms::Net(30),
        },
    );
    directory.add(
        SupplierId(COD.to_string()),
        Supplier {
            name: "Thika Fresh Produce".to_string(),
            credit_terms: CreditTerms::OnDelivery,
        },
    );
    let inventory = Arc::new(RecordingInventory::new());

    TestContext {
        lifecycle: Arc::new(PoLifecycleManager::new(
            ledger.clone(),
            ledger.clone(),
            Arc::new(directory),
            inventory.clone(),
            Arc::new(FixedVatRate::new(dec!(0.16))),
        )),
        payments: Arc::new(InvoicePaymentEngine::new(ledger.clone(), ledger.clone())),
        reporter: AgingReporter::new(ledger),
        inventory,
    }
}

pub fn supplier(id: &str) -> SupplierId {
    SupplierId(id.to_string())
}

pub fn item(product: &str, qty: u32, unit_cost: Decimal) -> PurchaseOrderItem {
    PurchaseOrderItem {
        product_id: product.to_string(),
        product_name: product.to_string(),
        quantity: qty,
        unit_cost,
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use duka_ap::application::aging::AgingReporter;
use duka_ap::application::lifecycle::PoLifecycleManager;
use duka_ap::application::payments::InvoicePaymentEngine;
use duka_ap::domain::ports::{InvoiceStoreRef, PaymentStoreRef, PurchaseOrderStoreRef};
use duka_ap::domain::purchase_order::{PoStatus, PurchaseOrderId, PurchaseOrderItem};
use duka_ap::domain::supplier::{Supplier, SupplierId};
use duka_ap::error::{ApError, Result as ApResult};
use duka_ap::infrastructure::collaborators::{
    FixedVatRate, InMemorySupplierDirectory, RecordingInventory,
};
use duka_ap::infrastructure::in_memory::InMemoryLedger;
#[cfg(feature = "storage-rocksdb")]
use duka_ap::infrastructure::rocksdb::RocksDbLedger;
use duka_ap::interfaces::csv::report_writer::ReportWriter;
use duka_ap::interfaces::jsonl::command_reader::{Command, CommandReader};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Report {
    /// Accounts-payable aging summary.
    Aging,
    /// Invoice listing with derived statuses.
    Invoices,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input AP command journal (JSON lines)
    journal: PathBuf,

    /// Reference date for the aging report (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Which report to print after replaying the journal
    #[arg(long, value_enum, default_value = "aging")]
    report: Report,

    /// VAT rate applied when receiving orders
    #[arg(long, default_value = "0.16")]
    vat_rate: Decimal,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[cfg_attr(not(feature = "storage-rocksdb"), allow(unused_variables))]
fn build_stores(
    cli: &Cli,
) -> Result<(PurchaseOrderStoreRef, InvoiceStoreRef, PaymentStoreRef)> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = &cli.db_path {
        let ledger = Arc::new(RocksDbLedger::open(db_path).into_diagnostic()?);
        return Ok((ledger.clone(), ledger.clone(), ledger));
    }
    let ledger = Arc::new(InMemoryLedger::new());
    Ok((ledger.clone(), ledger.clone(), ledger))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let (po_store, invoice_store, payment_store) = build_stores(&cli)?;

    let directory = Arc::new(InMemorySupplierDirectory::new());
    let lifecycle = PoLifecycleManager::new(
        po_store,
        invoice_store.clone(),
        directory.clone(),
        Arc::new(RecordingInventory::new()),
        Arc::new(FixedVatRate::new(cli.vat_rate)),
    );
    let payments = InvoicePaymentEngine::new(invoice_store.clone(), payment_store);

    // Caller-chosen order references -> assigned ids, scoped to this replay.
    let mut refs: HashMap<String, PurchaseOrderId> = HashMap::new();

    let file = File::open(&cli.journal).into_diagnostic()?;
    let reader = CommandReader::new(BufReader::new(file));
    for command in reader.commands() {
        match command {
            Ok(command) => {
                if let Err(e) =
                    apply(command, &directory, &lifecycle, &payments, &mut refs).await
                {
                    eprintln!("Error applying command: {e}");
                }
            }
            Err(e) => {
                eprintln!("Error reading command: {e}");
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    match cli.report {
        Report::Aging => {
            let as_of = cli.as_of.unwrap_or_else(|| Utc::now().date_naive());
            let report = AgingReporter::new(invoice_store)
                .compute(as_of)
                .await
                .into_diagnostic()?;
            writer.write_aging(&report).into_diagnostic()?;
        }
        Report::Invoices => {
            let invoices = payments.list_invoices().await.into_diagnostic()?;
            writer.write_invoices(&invoices).into_diagnostic()?;
        }
    }

    Ok(())
}

async fn apply(
    command: Command,
    directory: &InMemorySupplierDirectory,
    lifecycle: &PoLifecycleManager,
    payments: &InvoicePaymentEngine,
    refs: &mut HashMap<String, PurchaseOrderId>,
) -> ApResult<()> {
    match command {
        Command::Supplier {
            id,
            name,
            credit_terms,
        } => {
            directory.add(SupplierId(id), Supplier { name, credit_terms });
        }
        Command::CreateOrder {
            r#ref,
            supplier,
            items,
            expected_date,
            sent,
        } => {
            let items = items
                .into_iter()
                .map(|spec| PurchaseOrderItem {
                    product_name: spec.name.unwrap_or_else(|| spec.product.clone()),
                    product_id: spec.product,
                    quantity: spec.qty,
                    unit_cost: spec.unit_cost,
                })
                .collect();
            let status = if sent { PoStatus::Sent } else { PoStatus::Draft };
            let po = lifecycle
                .create_purchase_order(SupplierId(supplier), items, expected_date, status)
                .await?;
            refs.insert(r#ref, po.id);
        }
        Command::Send { r#ref } => {
            lifecycle.send(lookup(refs, &r#ref)?).await?;
        }
        Command::Receive { r#ref, date } => {
            lifecycle.receive(lookup(refs, &r#ref)?, date).await?;
        }
        Command::Cancel { r#ref } => {
            lifecycle.cancel(lookup(refs, &r#ref)?).await?;
        }
        Command::Pay {
            r#ref,
            amount,
            date,
            method,
        } => {
            let po_id = lookup(refs, &r#ref)?;
            let invoice = lifecycle.invoice_for(po_id).await?;
            payments.record_payment(invoice.id, amount, date, method).await?;
        }
    }
    Ok(())
}

fn lookup(refs: &HashMap<String, PurchaseOrderId>, r#ref: &str) -> ApResult<PurchaseOrderId> {
    refs.get(r#ref)
        .copied()
        .ok_or_else(|| ApError::not_found("order reference", r#ref))
}

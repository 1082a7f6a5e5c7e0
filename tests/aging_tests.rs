mod common;

use common::{COD, NET30, context, date, item, supplier};
use duka_ap::domain::payment::PaymentMethod;
use duka_ap::domain::purchase_order::PoStatus;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Creates, receives and optionally part-pays one order, returning the
/// invoice due date.
async fn receipt(
    ctx: &common::TestContext,
    supplier_id: &str,
    qty: u32,
    unit_cost: Decimal,
    received: &str,
    paid: Decimal,
) -> chrono::NaiveDate {
    let po = ctx
        .lifecycle
        .create_purchase_order(
            supplier(supplier_id),
            vec![item("P-1", qty, unit_cost)],
            date(received),
            PoStatus::Sent,
        )
        .await
        .unwrap();
    let (_, invoice) = ctx.lifecycle.receive(po.id, date(received)).await.unwrap();
    if !paid.is_zero() {
        ctx.payments
            .record_payment(invoice.id, paid, date(received), PaymentMethod::Mpesa)
            .await
            .unwrap();
    }
    invoice.due_date
}

#[tokio::test]
async fn test_aging_worked_example() {
    let ctx = context();
    // On-delivery receipt on 2026-01-30: due the same day. Subtotal 1000,
    // VAT 160, part-paid 360 -> 800 outstanding.
    let due = receipt(&ctx, COD, 2, dec!(500), "2026-01-30", dec!(360)).await;
    assert_eq!(due, date("2026-01-30"));

    // 45 days past due lands in the 31-60 bucket.
    let report = ctx.reporter.compute(date("2026-03-16")).await.unwrap();
    assert_eq!(report.due_31_60, dec!(800));
    assert_eq!(report.current, Decimal::ZERO);
    assert_eq!(report.due_1_30, Decimal::ZERO);
    assert_eq!(report.due_60_plus, Decimal::ZERO);
}

#[tokio::test]
async fn test_aging_buckets_across_invoices() {
    let ctx = context();
    // Net 30 receipts: due dates are received + 30 days.
    receipt(&ctx, NET30, 1, dec!(100), "2026-01-01", dec!(0)).await; // due 2026-01-31
    receipt(&ctx, NET30, 1, dec!(200), "2026-02-20", dec!(0)).await; // due 2026-03-22
    receipt(&ctx, NET30, 1, dec!(400), "2026-03-20", dec!(0)).await; // due 2026-04-19

    let report = ctx.reporter.compute(date("2026-03-25")).await.unwrap();
    // 2026-01-31 is 53 days past due.
    assert_eq!(report.due_31_60, dec!(116));
    // 2026-03-22 is 3 days past due.
    assert_eq!(report.due_1_30, dec!(232));
    // 2026-04-19 is not yet due.
    assert_eq!(report.current, dec!(464));
    assert_eq!(report.due_60_plus, Decimal::ZERO);
    assert_eq!(report.total_outstanding(), dec!(812));
}

#[tokio::test]
async fn test_paid_invoices_drop_out_of_aging() {
    let ctx = context();
    let po = ctx
        .lifecycle
        .create_purchase_order(
            supplier(COD),
            vec![item("P-1", 1, dec!(1000))],
            date("2026-01-01"),
            PoStatus::Sent,
        )
        .await
        .unwrap();
    let (_, invoice) = ctx.lifecycle.receive(po.id, date("2026-01-01")).await.unwrap();

    let before = ctx.reporter.compute(date("2026-04-01")).await.unwrap();
    assert_eq!(before.due_60_plus, dec!(1160));

    ctx.payments
        .record_payment(
            invoice.id,
            invoice.total_amount(),
            date("2026-04-01"),
            PaymentMethod::BankTransfer,
        )
        .await
        .unwrap();

    let after = ctx.reporter.compute(date("2026-04-01")).await.unwrap();
    assert_eq!(after.total_outstanding(), Decimal::ZERO);
}

#[tokio::test]
async fn test_due_today_is_current() {
    let ctx = context();
    let due = receipt(&ctx, COD, 1, dec!(100), "2026-02-01", dec!(0)).await;

    let on_due_day = ctx.reporter.compute(due).await.unwrap();
    assert_eq!(on_due_day.current, dec!(116));

    let next_day = ctx
        .reporter
        .compute(due.succ_opt().unwrap())
        .await
        .unwrap();
    assert_eq!(next_day.current, Decimal::ZERO);
    assert_eq!(next_day.due_1_30, dec!(116));
}

#[tokio::test]
async fn test_report_is_recomputed_per_call() {
    let ctx = context();
    receipt(&ctx, COD, 1, dec!(100), "2026-02-01", dec!(0)).await;

    let early = ctx.reporter.compute(date("2026-02-01")).await.unwrap();
    let late = ctx.reporter.compute(date("2026-06-01")).await.unwrap();
    assert_eq!(early.current, dec!(116));
    assert_eq!(late.due_60_plus, dec!(116));
}

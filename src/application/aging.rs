use crate::domain::invoice::{InvoiceStatus, SupplierInvoice};
use crate::domain::ports::InvoiceStoreRef;
use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Outstanding balance bucketed by days past due.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AgingReport {
    pub current: Decimal,
    pub due_1_30: Decimal,
    pub due_31_60: Decimal,
    pub due_60_plus: Decimal,
}

impl AgingReport {
    pub fn total_outstanding(&self) -> Decimal {
        self.current + self.due_1_30 + self.due_31_60 + self.due_60_plus
    }
}

/// Buckets every non-paid invoice's outstanding balance by days past due
/// as of `as_of`.
///
/// Dates are date-only, so "due today" is current regardless of the time
/// of day either timestamp was captured at. Pure reduction; recomputed on
/// every call.
pub fn bucket_invoices(invoices: &[SupplierInvoice], as_of: NaiveDate) -> AgingReport {
    let mut report = AgingReport::default();
    for invoice in invoices {
        if invoice.status() == InvoiceStatus::Paid {
            continue;
        }
        let due = invoice.amount_due();
        if invoice.due_date >= as_of {
            report.current += due;
            continue;
        }
        let days_late = (as_of - invoice.due_date).num_days();
        match days_late {
            1..=30 => report.due_1_30 += due,
            31..=60 => report.due_31_60 += due,
            _ => report.due_60_plus += due,
        }
    }
    report
}

/// Read-side façade over the invoice store. Never mutates state.
pub struct AgingReporter {
    invoices: InvoiceStoreRef,
}

impl AgingReporter {
    pub fn new(invoices: InvoiceStoreRef) -> Self {
        Self { invoices }
    }

    pub async fn compute(&self, as_of: NaiveDate) -> Result<AgingReport> {
        let invoices = self.invoices.get_all().await?;
        Ok(bucket_invoices(&invoices, as_of))
    }
}

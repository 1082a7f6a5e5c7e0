use crate::application::aging::AgingReport;
use crate::domain::invoice::SupplierInvoice;
use crate::error::Result;
use std::io::Write;

/// Writes read-side reports as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(target),
        }
    }

    /// Aging summary as a single record: current, 1-30, 31-60, 60+ days
    /// past due, plus the grand total outstanding.
    pub fn write_aging(&mut self, report: &AgingReport) -> Result<()> {
        self.writer
            .write_record(["current", "due_1_30", "due_31_60", "due_60_plus", "total"])?;
        self.writer.write_record([
            format!("{:.2}", report.current),
            format!("{:.2}", report.due_1_30),
            format!("{:.2}", report.due_31_60),
            format!("{:.2}", report.due_60_plus),
            format!("{:.2}", report.total_outstanding()),
        ])?;
        self.writer.flush()?;
        Ok(())
    }

    /// One row per invoice with the derived status.
    pub fn write_invoices(&mut self, invoices: &[SupplierInvoice]) -> Result<()> {
        self.writer.write_record([
            "invoice_number",
            "supplier",
            "due_date",
            "total",
            "paid",
            "due",
            "status",
        ])?;
        for invoice in invoices {
            self.writer.write_record([
                invoice.invoice_number.clone(),
                invoice.supplier_id.to_string(),
                invoice.due_date.to_string(),
                format!("{:.2}", invoice.total_amount()),
                format!("{:.2}", invoice.paid_amount),
                format!("{:.2}", invoice.amount_due()),
                invoice.status().to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

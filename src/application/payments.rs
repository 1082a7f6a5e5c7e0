use crate::application::locks::EntityLocks;
use crate::domain::invoice::{InvoiceId, SupplierInvoice};
use crate::domain::money::Amount;
use crate::domain::payment::{PaymentMethod, SupplierPayment};
use crate::domain::ports::{InvoiceStoreRef, PaymentStoreRef};
use crate::error::{ApError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Applies payments to supplier invoices.
///
/// The amount-due check and the `paid_amount` update run as one atomic
/// unit inside the invoice's critical section, so racing payments can
/// never push `paid_amount` past `total_amount`. Payments against
/// different invoices proceed without mutual blocking.
pub struct InvoicePaymentEngine {
    invoices: InvoiceStoreRef,
    payments: PaymentStoreRef,
    locks: EntityLocks,
}

impl InvoicePaymentEngine {
    pub fn new(invoices: InvoiceStoreRef, payments: PaymentStoreRef) -> Self {
        Self {
            invoices,
            payments,
            locks: EntityLocks::new(),
        }
    }

    /// Records a payment against an invoice and returns the updated
    /// invoice plus the created payment record.
    pub async fn record_payment(
        &self,
        invoice_id: InvoiceId,
        amount: Decimal,
        payment_date: NaiveDate,
        method: PaymentMethod,
    ) -> Result<(SupplierInvoice, SupplierPayment)> {
        let amount = Amount::new(amount)?;

        let _guard = self.locks.acquire(invoice_id.0).await;
        let mut invoice = self.get_required(invoice_id).await?;
        invoice.apply_payment(amount)?;

        let payment = SupplierPayment::new(invoice_id, payment_date, amount, method);
        self.invoices.put(invoice.clone()).await?;
        self.payments.append(payment.clone()).await?;

        tracing::info!(
            invoice = %invoice.invoice_number,
            amount = %amount,
            method = %method,
            status = %invoice.status(),
            "recorded supplier payment"
        );
        Ok((invoice, payment))
    }

    /// Outstanding balance of an invoice; read-only.
    pub async fn amount_due(&self, invoice_id: InvoiceId) -> Result<Decimal> {
        Ok(self.get_required(invoice_id).await?.amount_due())
    }

    pub async fn get_invoice(&self, invoice_id: InvoiceId) -> Result<SupplierInvoice> {
        self.get_required(invoice_id).await
    }

    pub async fn list_invoices(&self) -> Result<Vec<SupplierInvoice>> {
        self.invoices.get_all().await
    }

    pub async fn list_payments(&self, invoice_id: InvoiceId) -> Result<Vec<SupplierPayment>> {
        self.payments.list_for_invoice(invoice_id).await
    }

    async fn get_required(&self, invoice_id: InvoiceId) -> Result<SupplierInvoice> {
        self.invoices
            .get(invoice_id)
            .await?
            .ok_or_else(|| ApError::not_found("invoice", invoice_id))
    }
}

use crate::domain::money::Amount;
use crate::domain::purchase_order::PurchaseOrderId;
use crate::domain::supplier::SupplierId;
use crate::error::ApError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub Uuid);

impl InvoiceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Derived payment state of an invoice. Never stored; always a pure
/// function of `paid_amount` vs `total_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Paid => "paid",
        };
        f.write_str(s)
    }
}

/// A supplier invoice materialized when a purchase order is received.
///
/// `total_amount`, `amount_due` and `status` are derived; only
/// `paid_amount` mutates, and only through `apply_payment`. The invariant
/// `0 ≤ paid_amount ≤ total_amount` holds at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierInvoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub purchase_order_id: PurchaseOrderId,
    pub supplier_id: SupplierId,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub paid_amount: Decimal,
}

impl SupplierInvoice {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invoice_number: String,
        purchase_order_id: PurchaseOrderId,
        supplier_id: SupplierId,
        invoice_date: NaiveDate,
        due_date: NaiveDate,
        subtotal: Decimal,
        tax_amount: Decimal,
    ) -> Self {
        Self {
            id: InvoiceId::new(),
            invoice_number,
            purchase_order_id,
            supplier_id,
            invoice_date,
            due_date,
            subtotal,
            tax_amount,
            paid_amount: Decimal::ZERO,
        }
    }

    pub fn total_amount(&self) -> Decimal {
        self.subtotal + self.tax_amount
    }

    pub fn amount_due(&self) -> Decimal {
        self.total_amount() - self.paid_amount
    }

    pub fn status(&self) -> InvoiceStatus {
        if self.paid_amount.is_zero() {
            InvoiceStatus::Unpaid
        } else if self.paid_amount < self.total_amount() {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Paid
        }
    }

    /// Applies a payment, rejecting anything beyond the amount due.
    /// Paying the exact remainder is allowed and settles the invoice.
    pub fn apply_payment(&mut self, amount: Amount) -> Result<(), ApError> {
        let due = self.amount_due();
        if amount.value() > due {
            return Err(ApError::Overpayment {
                amount: amount.value(),
                due,
            });
        }
        self.paid_amount += amount.value();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice(subtotal: Decimal, tax: Decimal) -> SupplierInvoice {
        SupplierInvoice::new(
            "INV-0001".to_string(),
            PurchaseOrderId::new(),
            SupplierId("SUP-1".to_string()),
            "2026-01-08".parse().unwrap(),
            "2026-02-07".parse().unwrap(),
            subtotal,
            tax,
        )
    }

    fn amount(v: Decimal) -> Amount {
        Amount::new(v).unwrap()
    }

    #[test]
    fn test_new_invoice_is_unpaid() {
        let inv = invoice(dec!(1000), dec!(160));
        assert_eq!(inv.total_amount(), dec!(1160));
        assert_eq!(inv.amount_due(), dec!(1160));
        assert_eq!(inv.paid_amount, Decimal::ZERO);
        assert_eq!(inv.status(), InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_status_follows_paid_amount() {
        let mut inv = invoice(dec!(1000), dec!(160));

        inv.apply_payment(amount(dec!(160))).unwrap();
        assert_eq!(inv.status(), InvoiceStatus::PartiallyPaid);
        assert_eq!(inv.amount_due(), dec!(1000));

        inv.apply_payment(amount(dec!(1000))).unwrap();
        assert_eq!(inv.status(), InvoiceStatus::Paid);
        assert_eq!(inv.amount_due(), Decimal::ZERO);
    }

    #[test]
    fn test_overpayment_rejected_state_unchanged() {
        let mut inv = invoice(dec!(1000), dec!(0));
        let err = inv.apply_payment(amount(dec!(1000.01))).unwrap_err();
        assert!(matches!(err, ApError::Overpayment { due, .. } if due == dec!(1000)));
        assert_eq!(inv.paid_amount, Decimal::ZERO);
        assert_eq!(inv.status(), InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_exact_payment_allowed_then_anything_rejected() {
        let mut inv = invoice(dec!(1000), dec!(160));
        inv.apply_payment(amount(dec!(1160))).unwrap();
        assert_eq!(inv.status(), InvoiceStatus::Paid);

        let err = inv.apply_payment(amount(dec!(0.01))).unwrap_err();
        assert!(matches!(err, ApError::Overpayment { due, .. } if due == Decimal::ZERO));
    }
}

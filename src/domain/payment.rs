use crate::domain::invoice::InvoiceId;
use crate::domain::money::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub Uuid);

impl PaymentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
    Mpesa,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Mpesa => "mpesa",
        };
        f.write_str(s)
    }
}

/// An append-only ledger entry: immutable once created, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierPayment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    pub payment_date: NaiveDate,
    pub amount: Amount,
    pub method: PaymentMethod,
}

impl SupplierPayment {
    pub fn new(
        invoice_id: InvoiceId,
        payment_date: NaiveDate,
        amount: Amount,
        method: PaymentMethod,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            invoice_id,
            payment_date,
            amount,
            method,
        }
    }
}

//! Application layer orchestrating the purchase-order lifecycle, invoice
//! payments and the aging report against the ledger store ports.

pub mod aging;
pub mod lifecycle;
pub mod locks;
pub mod payments;

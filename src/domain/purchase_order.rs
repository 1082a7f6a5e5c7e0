use crate::domain::supplier::SupplierId;
use crate::error::ApError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(pub Uuid);

impl PurchaseOrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PurchaseOrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PurchaseOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoStatus {
    Draft,
    Sent,
    Received,
    Cancelled,
}

impl std::fmt::Display for PoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PoStatus::Draft => "draft",
            PoStatus::Sent => "sent",
            PoStatus::Received => "received",
            PoStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One line of a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_cost: Decimal,
}

impl PurchaseOrderItem {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_cost
    }
}

/// A commitment to buy items from a supplier.
///
/// The status moves forward only (`Draft → Sent → Received`, with `Draft`
/// and `Sent` cancellable); `Received` and `Cancelled` are terminal. All
/// guarded transitions live on the entity so no caller can move the state
/// machine backwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub po_number: String,
    pub supplier_id: SupplierId,
    pub items: Vec<PurchaseOrderItem>,
    pub status: PoStatus,
    pub created_date: NaiveDate,
    pub expected_date: NaiveDate,
    pub received_date: Option<NaiveDate>,
}

impl PurchaseOrder {
    /// Builds a validated purchase order in `Draft` or `Sent`.
    pub fn new(
        po_number: String,
        supplier_id: SupplierId,
        items: Vec<PurchaseOrderItem>,
        created_date: NaiveDate,
        expected_date: NaiveDate,
        initial_status: PoStatus,
    ) -> Result<Self, ApError> {
        if !matches!(initial_status, PoStatus::Draft | PoStatus::Sent) {
            return Err(ApError::Validation(format!(
                "purchase orders start in draft or sent, not {initial_status}"
            )));
        }
        Self::validate_items(&items)?;
        Ok(Self {
            id: PurchaseOrderId::new(),
            po_number,
            supplier_id,
            items,
            status: initial_status,
            created_date,
            expected_date,
            received_date: None,
        })
    }

    fn validate_items(items: &[PurchaseOrderItem]) -> Result<(), ApError> {
        if items.is_empty() {
            return Err(ApError::Validation(
                "purchase order must have at least one item".to_string(),
            ));
        }
        for item in items {
            if item.quantity == 0 {
                return Err(ApError::Validation(format!(
                    "item {} has zero quantity",
                    item.product_id
                )));
            }
            if item.unit_cost < Decimal::ZERO {
                return Err(ApError::Validation(format!(
                    "item {} has negative unit cost",
                    item.product_id
                )));
            }
        }
        Ok(())
    }

    /// Total cost, always recomputed from the items.
    pub fn total_cost(&self) -> Decimal {
        self.items.iter().map(PurchaseOrderItem::line_total).sum()
    }

    /// `Draft → Sent`.
    pub fn send(&mut self) -> Result<(), ApError> {
        match self.status {
            PoStatus::Draft => {
                self.status = PoStatus::Sent;
                Ok(())
            }
            from => Err(ApError::InvalidTransition {
                from: from.to_string(),
                action: "send",
            }),
        }
    }

    /// `Sent → Received`, recording the receipt date.
    pub fn receive(&mut self, received_date: NaiveDate) -> Result<(), ApError> {
        match self.status {
            PoStatus::Sent => {
                self.status = PoStatus::Received;
                self.received_date = Some(received_date);
                Ok(())
            }
            from => Err(ApError::InvalidTransition {
                from: from.to_string(),
                action: "receive",
            }),
        }
    }

    /// `Draft | Sent → Cancelled`.
    pub fn cancel(&mut self) -> Result<(), ApError> {
        match self.status {
            PoStatus::Draft | PoStatus::Sent => {
                self.status = PoStatus::Cancelled;
                Ok(())
            }
            from => Err(ApError::InvalidTransition {
                from: from.to_string(),
                action: "cancel",
            }),
        }
    }
}

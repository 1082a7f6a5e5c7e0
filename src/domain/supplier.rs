use crate::error::ApError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reference to a supplier in the external directory.
///
/// The core never owns supplier records; it only resolves them through the
/// `SupplierDirectory` port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub String);

impl std::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The slice of the supplier directory record the core needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub credit_terms: CreditTerms,
}

/// Supplier payment window, as carried by the directory ("Net 30",
/// "On Delivery").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CreditTerms {
    OnDelivery,
    Net(u32),
}

impl CreditTerms {
    /// Invoice due date for goods received on `received_date`.
    pub fn due_date(&self, received_date: NaiveDate) -> NaiveDate {
        match self {
            CreditTerms::OnDelivery => received_date,
            CreditTerms::Net(days) => received_date
                .checked_add_days(Days::new(u64::from(*days)))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}

impl std::str::FromStr for CreditTerms {
    type Err = ApError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("on delivery") {
            return Ok(CreditTerms::OnDelivery);
        }
        if let Some(days) = s.strip_prefix("Net ").or_else(|| s.strip_prefix("net "))
            && let Ok(days) = days.trim().parse::<u32>()
        {
            return Ok(CreditTerms::Net(days));
        }
        Err(ApError::Validation(format!("unknown credit terms: {s:?}")))
    }
}

impl TryFrom<String> for CreditTerms {
    type Error = ApError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CreditTerms> for String {
    fn from(terms: CreditTerms) -> Self {
        terms.to_string()
    }
}

impl std::fmt::Display for CreditTerms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditTerms::OnDelivery => write!(f, "On Delivery"),
            CreditTerms::Net(days) => write!(f, "Net {days}"),
        }
    }
}

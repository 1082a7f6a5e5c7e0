use crate::error::ApError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A positive monetary amount.
///
/// Wrapper around `rust_decimal::Decimal` so that payment and item amounts
/// are guaranteed positive at construction time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ApError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ApError::Validation("amount must be positive".to_string()))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ApError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Computes the VAT due on `subtotal` at `rate` (e.g. 0.16), rounded to
/// cent precision.
pub fn vat_on(subtotal: Decimal, rate: Decimal) -> Decimal {
    (subtotal * rate).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(ApError::Validation(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(ApError::Validation(_))
        ));
    }

    #[test]
    fn test_vat_rounds_to_cents() {
        assert_eq!(vat_on(dec!(1000), dec!(0.16)), dec!(160.00));
        assert_eq!(vat_on(dec!(333.33), dec!(0.16)), dec!(53.33));
    }
}

use crate::domain::payment::PaymentMethod;
use crate::domain::supplier::CreditTerms;
use crate::error::{ApError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::BufRead;

/// One journal line. Orders carry nested item lists, which is why the
/// journal is JSON-lines rather than CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Registers a supplier in the directory collaborator.
    Supplier {
        id: String,
        name: String,
        credit_terms: CreditTerms,
    },
    /// Creates a purchase order under a caller-chosen reference.
    CreateOrder {
        r#ref: String,
        supplier: String,
        items: Vec<ItemSpec>,
        expected_date: NaiveDate,
        #[serde(default)]
        sent: bool,
    },
    Send {
        r#ref: String,
    },
    Receive {
        r#ref: String,
        date: NaiveDate,
    },
    Cancel {
        r#ref: String,
    },
    /// Pays the invoice materialized for the referenced order.
    Pay {
        r#ref: String,
        amount: Decimal,
        date: NaiveDate,
        method: PaymentMethod,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSpec {
    pub product: String,
    #[serde(default)]
    pub name: Option<String>,
    pub qty: u32,
    pub unit_cost: Decimal,
}

/// Streaming reader over a JSONL command journal.
///
/// Yields one `Result<Command>` per non-empty line so large journals
/// replay without loading everything into memory. Lines starting with `#`
/// are comments.
pub struct CommandReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.source
            .lines()
            .filter(|line| match line {
                Ok(line) => {
                    let line = line.trim();
                    !line.is_empty() && !line.starts_with('#')
                }
                Err(_) => true,
            })
            .map(|line| {
                let line = line?;
                serde_json::from_str(&line).map_err(ApError::from)
            })
    }
}

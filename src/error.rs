use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid transition: cannot {action} a purchase order in status {from}")]
    InvalidTransition { from: String, action: &'static str },
    #[error("payment of {amount} exceeds amount due {due}")]
    Overpayment { amount: Decimal, due: Decimal },
    #[error("purchase order {0} has already been received")]
    DuplicateReceipt(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl ApError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApError>;

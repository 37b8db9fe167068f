use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BilancioError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Balancing failure: total assets {total_assets} vs liabilities and equity \
         {total_liabilities_and_equity} (difference {difference})"
    )]
    BalancingFailure {
        total_assets: Decimal,
        total_liabilities_and_equity: Decimal,
        difference: Decimal,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BilancioError {
    fn from(e: serde_json::Error) -> Self {
        BilancioError::SerializationError(e.to_string())
    }
}

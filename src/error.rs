use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum RewardError {
    #[error("No transactions found for customer: {0}")]
    #[diagnostic(
        code(rewards::customer_not_found),
        help("check the customer id against the loaded transactions")
    )]
    CustomerNotFound(String),
    #[error("Reward points overflow for customer: {0}")]
    #[diagnostic(code(rewards::points_overflow))]
    PointsOverflow(String),
    #[error("CSV error: {0}")]
    #[diagnostic(code(rewards::csv))]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    #[diagnostic(code(rewards::json))]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    #[diagnostic(code(rewards::io))]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    #[diagnostic(code(rewards::internal))]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, RewardError>;

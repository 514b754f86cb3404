//! Error types for the pricing engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricerError {
    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Precondition error: {0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type PricerResult<T> = Result<T, PricerError>;

impl PricerError {
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

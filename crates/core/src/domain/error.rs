// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Salary must not be negative: {0}")]
    NegativeSalary(i64),

    #[error("Equity must be a decimal in [0, 1]: {0}")]
    InvalidEquity(String),

    #[error("Company handle must not be empty")]
    EmptyCompanyHandle,
}

pub type Result<T> = std::result::Result<T, DomainError>;

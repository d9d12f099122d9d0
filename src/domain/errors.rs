use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Invalid company handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid job id: {0}")]
    InvalidJobId(String),
}

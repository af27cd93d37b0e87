use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error("config: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MaintenanceError>;

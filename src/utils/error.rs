use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Metadata lookup for ISBN {isbn} failed with status {status}")]
    MetadataFetch { isbn: String, status: u16 },

    #[error("No book found for ISBN {isbn}")]
    BookNotFound { isbn: String },

    #[error("Review rejected: {reason}")]
    BadReview { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CatalogError {
    /// 訊息重新投遞後是否可能成功
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::ApiError(_) | CatalogError::Database(_) => true,
            CatalogError::MetadataFetch { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => 2,
            CatalogError::BadReview { .. }
            | CatalogError::Validation { .. }
            | CatalogError::BookNotFound { .. } => 1,
            _ if self.is_retryable() => 75,
            _ => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

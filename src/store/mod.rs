//! Status persistence

pub mod status;


pub use status::StatusStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record has been written yet
    #[error("No status data available yet")]
    NotFound,

    /// Persisted content could not be parsed or failed validation
    #[error("Stored status is corrupt: {0}")]
    Corrupt(String),

    #[error("Status storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Status serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

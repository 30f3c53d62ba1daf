use thiserror::Error;

/// Canonical result for the codec crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A structurally valid document that fails table/database validation.
    #[error(transparent)]
    Core(#[from] jrel_core::error::Error),

    /// Malformed JSON, or JSON not shaped like a table/database document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

/// Unified error type for the entire strategy-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Catalog ─────────────────────────────────────────────────────
    #[error("Unknown asset symbol: {0}")]
    UnknownSymbol(String),

    #[error("Malformed asset {symbol}: {reason}")]
    MalformedAsset { symbol: String, reason: String },

    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    // ── Derived Metrics ─────────────────────────────────────────────
    #[error("Scenario probabilities must sum to 1 (got {sum})")]
    InvalidProbabilityDistribution { sum: f64 },

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Checklist ───────────────────────────────────────────────────
    #[error("Unknown task id: {0}")]
    UnknownTask(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

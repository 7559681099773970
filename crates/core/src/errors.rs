use thiserror::Error;

/// Unified error type for the entire portfolio-watch-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The quote-lookup path never surfaces these to its caller: upstream
/// failures are absorbed into a no-data `Quote`. The variants below cover
/// configuration handling and the per-tier failures the fetch layer
/// swallows internally.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration / File ────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),
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

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs embedded in reqwest error
        // messages; they can carry full request parameters.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

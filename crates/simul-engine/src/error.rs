//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the tick loop,
//! so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: simul_core::config::ConfigError,
    },

    /// World assembly, a read-model query, or a tick failed.
    #[error("service error: {source}")]
    Service {
        /// The underlying service error.
        #[from]
        source: simul_core::service::ServiceError,
    },

    /// A snapshot could not be serialized.
    #[error("snapshot serialization error: {source}")]
    Snapshot {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and of the step
//! loop so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: worldview_core::ConfigError,
    },

    /// Demo world construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: worldview_world::WorldError,
    },

    /// The query service failed to start.
    #[error("service error: {source}")]
    Service {
        /// The underlying startup error.
        #[from]
        source: worldview_service::StartupError,
    },

    /// The step loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: worldview_core::RunnerError,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}

use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum SysmonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("system error: {0}")]
    System(String),

    /// The running platform has no source for the requested counter.
    #[error("unsupported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = SysmonError> = std::result::Result<T, E>;

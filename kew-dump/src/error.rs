use thiserror::Error;

/// Result type for dump operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while writing literals to a sink.
///
/// Traversal itself never fails on data: degraded sub-values fall back to a
/// best-effort rendering. Only the sink can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to format literal")]
    Fmt(#[from] std::fmt::Error),

    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}

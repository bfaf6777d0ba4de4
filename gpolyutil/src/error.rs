use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while classifying URLs or converting routes.
#[derive(Debug, Error)]
pub enum Error {
    /// A URL or a query/coordinate string couldn't be understood.
    #[error("malformed input {input:?}: {reason}")]
    MalformedInput { input: String, reason: String },
    /// A required path doesn't exist in a JSON document.
    #[error("{source_name} has nothing at {path}")]
    MissingField { source_name: String, path: String },
    #[error("fetching {url} failed: {reason}")]
    Network { url: String, reason: String },
    /// Some items of a batch failed. The rest was still processed.
    #[error("{} of {} files failed: {}", .failed.len(), .total, .failed.join(", "))]
    PartialBatchFailure { total: usize, failed: Vec<String> },
    #[error("can't decode polyline {polyline:?}: {reason}")]
    Decode { polyline: String, reason: String },
    #[error("writing {path} failed: {reason}")]
    Write { path: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Error {
        Error::MalformedInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

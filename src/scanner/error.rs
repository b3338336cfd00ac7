use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// Cancellation was observed before the run completed. No identifier
    /// list is produced; a partial list is never treated as complete.
    #[error("operation aborted before end")]
    Aborted,
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}

mod index_error;
mod port_error;

pub use index_error::IndexError;
pub use port_error::PortError;

/// Top-level error for the recall engine.
///
/// Port failures never reach callers of `retrieve`; they are absorbed at
/// component boundaries and degrade to empty contributions. This aggregate
/// exists for the indexing path and for adapters that wrap ports directly.
#[derive(Debug, thiserror::Error)]
pub enum RecallError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Port(#[from] PortError),
}

pub type RecallResult<T> = Result<T, RecallError>;

pub type PortResult<T> = Result<T, PortError>;

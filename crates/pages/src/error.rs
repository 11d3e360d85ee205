use crate::PageId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<lopdf::Error> for BackendError {
    fn from(value: lopdf::Error) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no pages to merge")]
    NoPages,
    #[error("no page could be copied ({skipped} skipped)")]
    NothingMerged { skipped: usize },
    #[error("unknown page {0}")]
    UnknownPage(PageId),
    #[error("position {index} out of range for {len} pages")]
    PositionOutOfRange { index: usize, len: usize },
    #[error("order does not list every page exactly once")]
    NotAPermutation,
    #[error("document backend: {0}")]
    Backend(#[from] BackendError),
}

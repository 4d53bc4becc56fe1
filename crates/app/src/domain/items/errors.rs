//! Items service errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Failures of the items service.
#[derive(Debug, Error)]
pub enum ItemsServiceError {
    /// The new item failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Unexpected storage failure.
    #[error("{context}")]
    Storage {
        /// What the service was doing when storage failed.
        context: &'static str,

        #[source]
        source: StorageError,
    },
}

impl ItemsServiceError {
    pub(crate) fn storage(context: &'static str) -> impl FnOnce(StorageError) -> Self {
        move |source| Self::Storage { context, source }
    }
}

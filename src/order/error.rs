//! Error types for the ordering layer.

use thiserror::Error;

/// Result alias for ordering operations.
pub type OrderResult<T, I> = Result<T, OrderError<I>>;

/// Contract violations raised while registering items with an
/// [`Arranger`](crate::order::Arranger).
///
/// Note that unsatisfiable *constraints* are not errors: arrangement always
/// succeeds and reports them as [`Conflict`](crate::order::Conflict)s.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum OrderError<I> {
    /// The same item id was registered twice.
    #[error("item {item:?} is already registered")]
    DuplicateItem {
        /// Id of the rejected registration.
        item: I,
    },
}

impl<I> OrderError<I> {
    /// Creates a duplicate-item error.
    pub fn duplicate_item(item: I) -> Self {
        Self::DuplicateItem { item }
    }
}

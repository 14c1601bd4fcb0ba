//! Deterministic constraint-based ordering.
//!
//! This is the consumer side of the [`dag`](crate::dag) module: a small
//! layer that turns per-item placement declarations into one linear order.
//! Items carry a [`Placement`], which is a gravity weight plus pairwise
//! [`Constraint`]s against other items by id. The [`Arranger`] resolves all
//! of it into an [`Arrangement`], tolerating bad declarations by skipping
//! them and reporting each skip as a [`Conflict`].
//!
//! The output is fully deterministic: constraints bind hardest, gravity
//! ranks the unconstrained, and registration order breaks the remaining
//! ties.

mod arranger;
mod error;
mod placement;

pub use arranger::{Arrangement, Arranger, Conflict};
pub use error::{OrderError, OrderResult};
pub use placement::{Constraint, Placement};

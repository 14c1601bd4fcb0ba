//! # taxis
//!
//! *τάξις — Greek for "arrangement, order".*
//!
//! Cycle-safe dependency graphs and deterministic constraint-based ordering.
//!
//! The crate has two layers. [`Dag`] is a directed acyclic graph that stays
//! acyclic by construction: an edge insertion that would close a cycle is
//! refused with a plain `false` and leaves the graph untouched, so callers
//! can treat "this dependency is impossible" as an ordinary answer instead
//! of an error. [`Arranger`] sits on top and solves the problem such graphs
//! usually exist for: given items that each declare a gravity weight and
//! before/after constraints against other items, produce one deterministic
//! linear order, skipping and reporting the constraints that cannot be
//! honored.
//!
//! # Features
//!
//! - **Acyclic by construction**: every edge insertion runs a reachability
//!   check first; rejected edges leave no partial state behind.
//! - **Deterministic**: vertices, children, sources and sinks all iterate
//!   in first-insertion order, so the same operations always produce the
//!   same traversals and the same arrangement.
//! - **Tolerant ordering**: unknown references and contradictory
//!   constraints degrade to logged, reported [`Conflict`]s rather than
//!   failures; every item always ends up somewhere in the order.
//! - **Inspectable**: the graph and ordering types serialize with serde,
//!   and [`Dag::to_dot`] renders Graphviz DOT for debugging.
//!
//! # Quick Start
//!
//! ```
//! use taxis::{Arranger, Placement};
//!
//! let mut arranger = Arranger::new();
//! arranger.insert("annotations", Placement::new())?;
//! arranger.insert("line-numbers", Placement::new().with_gravity(0.0))?;
//! arranger.insert(
//!     "breakpoints",
//!     Placement::new().with_gravity(0.0).before("line-numbers"),
//! )?;
//!
//! let arrangement = arranger.arrange();
//! assert!(arrangement.is_clean());
//! assert_eq!(
//!     arrangement.order,
//!     vec!["breakpoints", "line-numbers", "annotations"],
//! );
//! # Ok::<(), taxis::OrderError<&'static str>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`dag`]: the core graph, [`Dag`], and its ordered adjacency storage,
//!   [`OrderedMultimap`].
//! - [`order`]: placement declarations and the arrangement algorithm.

pub mod dag;
pub mod order;

// Re-export the main types at the crate root (Effective Rust Item 24).
pub use dag::{Dag, OrderedMultimap};
pub use order::{
    Arrangement, Arranger, Conflict, Constraint, OrderError, OrderResult, Placement,
};

// `IndexSet` appears in `OrderedMultimap`'s public API; re-export the crate
// so downstream code can name it without declaring its own dependency.
pub use indexmap;

/// Commonly used types, importable in one line.
///
/// ```
/// use taxis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dag::Dag;
    pub use crate::order::{Arrangement, Arranger, Conflict, Constraint, OrderError, Placement};
}

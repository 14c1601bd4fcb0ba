//! Cycle-safe directed graphs.
//!
//! The centerpiece is [`Dag`], a directed acyclic graph that maintains
//! acyclicity as an invariant: edge insertions that would close a cycle are
//! refused with a boolean, never applied halfway. Iteration over vertices,
//! children, sources and sinks is deterministic, following first-insertion
//! order, which makes the graph suitable as the backbone of reproducible
//! ordering decisions (see the [`order`](crate::order) module).
//!
//! [`OrderedMultimap`] is the underlying adjacency storage and is exposed
//! because it is occasionally useful on its own.

mod graph;
mod multimap;

pub use graph::Dag;
pub use multimap::OrderedMultimap;

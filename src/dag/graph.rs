//! Directed acyclic graph with deterministic iteration order
//!
//! [`Dag`] guarantees acyclicity as an invariant rather than checking it
//! after the fact: every edge insertion runs a reachability check first and
//! refuses, with a plain `false`, any edge that would close a cycle. A
//! rejected insertion leaves the graph exactly as it was.
//!
//! # Design
//!
//! The graph stores every edge twice, in an outgoing and an incoming
//! [`OrderedMultimap`]. The redundancy buys O(1) access to both edge
//! directions, which keeps vertex removal and the source/sink queries
//! simple; the price is that every mutation must update both maps in step.
//! All iteration (vertices, children, sources, sinks) follows first
//! insertion order, so a given sequence of operations always produces the
//! same traversal. See <https://en.wikipedia.org/wiki/Directed_acyclic_graph>
//! for background on the structure itself.

use crate::dag::multimap::OrderedMultimap;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// A directed acyclic graph over hashable vertices.
///
/// Vertices are the values themselves; there is no separate index or id
/// space. The graph is kept acyclic by construction: [`Dag::add_edge`]
/// rejects any edge that would create a path from a vertex back to itself,
/// including self-loops. Rejection is a normal outcome, not an error.
///
/// Not synchronized. A `Dag` belongs to one owner; wrap it in a lock if it
/// must be shared.
///
/// # Examples
///
/// ```
/// use taxis::Dag;
///
/// let mut dag = Dag::new();
/// assert!(dag.add_edge("parse", "check"));
/// assert!(dag.add_edge("check", "emit"));
///
/// // This edge would close the cycle parse -> check -> emit -> parse.
/// assert!(!dag.add_edge("emit", "parse"));
///
/// assert_eq!(dag.sources().collect::<Vec<_>>(), vec![&"parse"]);
/// assert_eq!(dag.sinks().collect::<Vec<_>>(), vec![&"emit"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dag<V>
where
    V: Eq + Hash + Clone,
{
    /// Edges keyed by origin; `outgoing[v]` holds the direct successors.
    outgoing: OrderedMultimap<V, V>,
    /// Edges keyed by target; `incoming[v]` holds the direct predecessors.
    incoming: OrderedMultimap<V, V>,
}

impl<V> Dag<V>
where
    V: Eq + Hash + Clone,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            outgoing: OrderedMultimap::new(),
            incoming: OrderedMultimap::new(),
        }
    }

    /// Adds a directed edge from `origin` to `target`.
    ///
    /// Both vertices are registered if they were not present. Returns
    /// `false` and leaves the graph untouched when the edge would create a
    /// cycle, that is when a path from `target` back to `origin` already
    /// exists or when `origin == target`. Re-adding an existing edge
    /// returns `true` and changes nothing.
    ///
    /// The cycle check is a depth-first reachability scan, O(V + E) in the
    /// worst case.
    pub fn add_edge(&mut self, origin: V, target: V) -> bool {
        if self.has_path(&target, &origin) {
            return false;
        }

        self.outgoing.insert(origin.clone(), target.clone());
        self.outgoing.insert_key(target.clone());
        self.incoming.insert(target, origin.clone());
        self.incoming.insert_key(origin);
        true
    }

    /// Registers `vertex` with no edges.
    ///
    /// Idempotent: adding a vertex that already exists, with or without
    /// edges, changes nothing.
    pub fn add_vertex(&mut self, vertex: V) {
        self.outgoing.insert_key(vertex.clone());
        self.incoming.insert_key(vertex);
    }

    /// Removes `vertex` and every edge incident to it, in both directions.
    ///
    /// Safe to call for vertices that are not in the graph. The insertion
    /// order of the remaining vertices is preserved.
    pub fn remove_vertex(&mut self, vertex: &V) {
        let targets = self.outgoing.remove_key(vertex);
        for target in &targets {
            self.incoming.remove(target, vertex);
        }

        let origins = self.incoming.remove_key(vertex);
        for origin in &origins {
            self.outgoing.remove(origin, vertex);
        }
    }

    /// Returns the vertices with no incoming edges, in insertion order.
    ///
    /// A non-empty acyclic graph always has at least one source.
    pub fn sources(&self) -> impl Iterator<Item = &V> {
        Self::zero_edge_vertices(&self.incoming)
    }

    /// Returns the vertices with no outgoing edges, in insertion order.
    pub fn sinks(&self) -> impl Iterator<Item = &V> {
        Self::zero_edge_vertices(&self.outgoing)
    }

    /// Returns the direct successors of `vertex`, in the order their edges
    /// were added.
    ///
    /// Yields nothing for vertices that are not in the graph.
    pub fn children(&self, vertex: &V) -> impl Iterator<Item = &V> + '_ {
        self.outgoing.get(vertex)
    }

    /// Returns `true` if `vertex` is registered, with or without edges.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.outgoing.contains_key(vertex)
    }

    /// Returns all vertices in first-insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.outgoing.keys()
    }

    /// Returns all edges as `(origin, target)` pairs, grouped by origin in
    /// insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.outgoing.keys().flat_map(|origin| {
            self.outgoing
                .get(origin)
                .map(move |target| (origin, target))
        })
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Returns `true` if a directed path from `start` to `end` exists.
    ///
    /// Every vertex reaches itself, so `start == end` is a path. Iterative
    /// depth-first search with an explicit stack; the visited set is not
    /// needed for termination (the graph is acyclic) but bounds the scan on
    /// diamond-heavy graphs.
    fn has_path(&self, start: &V, end: &V) -> bool {
        if start == end {
            return true;
        }

        let mut stack = vec![start];
        let mut visited: HashSet<&V> = HashSet::new();
        while let Some(vertex) = stack.pop() {
            for child in self.outgoing.get(vertex) {
                if child == end {
                    return true;
                }
                if visited.insert(child) {
                    stack.push(child);
                }
            }
        }
        false
    }

    fn zero_edge_vertices(map: &OrderedMultimap<V, V>) -> impl Iterator<Item = &V> + '_ {
        map.keys()
            .filter(move |&vertex| map.get(vertex).next().is_none())
    }
}

impl<V> Dag<V>
where
    V: Eq + Hash + Clone + fmt::Display,
{
    /// Renders the graph in Graphviz DOT format.
    ///
    /// Pipe the output through `dot -Tpng` (or paste it into an online
    /// Graphviz viewer) to visualize the structure.
    pub fn to_dot(&self) -> String {
        let mut graph = DiGraph::<String, ()>::new();
        let mut node_indices: HashMap<&V, NodeIndex> = HashMap::new();

        for vertex in self.vertices() {
            let idx = graph.add_node(vertex.to_string());
            node_indices.insert(vertex, idx);
        }
        for (origin, target) in self.edges() {
            graph.add_edge(node_indices[origin], node_indices[target], ());
        }

        format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}

impl<V> Default for Dag<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

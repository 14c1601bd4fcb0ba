//! Constraint-based arrangement
//!
//! The [`Arranger`] collects items with their [`Placement`] declarations and
//! turns them into a single linear order. Internally every arrangement is a
//! fresh [`Dag`] walk: items become vertices, satisfiable constraints become
//! edges, and the order is produced by repeatedly extracting the
//! lightest-gravity source.
//!
//! Arrangement is total: it never fails and never drops an item. Constraints
//! that cannot be honored (references to unknown items, constraints that
//! would close a cycle) are logged as warnings, skipped, and reported in the
//! resulting [`Arrangement`] as [`Conflict`]s, so a single bad declaration
//! cannot take down the whole order.

use crate::dag::Dag;
use crate::order::error::{OrderError, OrderResult};
use crate::order::placement::{Constraint, Placement};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, warn};

/// A constraint that could not be satisfied and was skipped.
///
/// `item` is always the item whose placement declared the constraint and
/// `target` the item the constraint referred to.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Conflict<I> {
    /// The constraint referenced an id that was never registered.
    #[error("constraint of {item:?} references unknown item {target:?}")]
    UnknownTarget {
        /// Item whose placement declared the constraint.
        item: I,
        /// The unregistered id the constraint referred to.
        target: I,
    },
    /// Honoring the constraint would contradict previously applied ones.
    #[error("constraint of {item:?} on {target:?} would close an ordering cycle")]
    Cycle {
        /// Item whose placement declared the constraint.
        item: I,
        /// The id the constraint referred to.
        target: I,
    },
}

impl<I> Conflict<I> {
    /// Creates an unknown-target conflict.
    pub fn unknown_target(item: I, target: I) -> Self {
        Self::UnknownTarget { item, target }
    }

    /// Creates a cycle conflict.
    pub fn cycle(item: I, target: I) -> Self {
        Self::Cycle { item, target }
    }
}

/// The result of [`Arranger::arrange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrangement<I> {
    /// The computed order, front to back. Contains every registered item
    /// exactly once.
    pub order: Vec<I>,
    /// Constraints that were skipped, in the order they were encountered.
    pub conflicts: Vec<Conflict<I>>,
}

impl<I> Arrangement<I> {
    /// Returns `true` if every constraint was satisfied.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Consumes the arrangement, keeping only the order.
    pub fn into_order(self) -> Vec<I> {
        self.order
    }
}

/// Collects items and their placements, then arranges them.
///
/// Items are remembered in registration order, and that order is the
/// ultimate tie-breaker: two items that neither constraints nor gravity
/// tell apart come out in the order they went in. Repeated calls to
/// [`arrange`](Arranger::arrange) therefore return identical results.
///
/// # Examples
///
/// ```
/// use taxis::{Arranger, Placement};
///
/// let mut arranger = Arranger::new();
/// arranger.insert("annotations", Placement::new())?;
/// arranger.insert("line-numbers", Placement::new().with_gravity(0.0))?;
/// arranger.insert("diff", Placement::new().after("line-numbers"))?;
///
/// let arrangement = arranger.arrange();
/// assert!(arrangement.is_clean());
/// assert_eq!(arrangement.order, vec!["line-numbers", "annotations", "diff"]);
/// # Ok::<(), taxis::OrderError<&'static str>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Arranger<I>
where
    I: Eq + Hash + Clone,
{
    items: IndexMap<I, Placement<I>>,
}

impl<I> Arranger<I>
where
    I: Eq + Hash + Clone,
{
    /// Creates an empty arranger.
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Registers an item with its placement.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::DuplicateItem`] if `id` is already registered.
    pub fn insert(&mut self, id: I, placement: Placement<I>) -> OrderResult<(), I> {
        if self.items.contains_key(&id) {
            return Err(OrderError::duplicate_item(id));
        }
        self.items.insert(id, placement);
        Ok(())
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: &I) -> bool {
        self.items.contains_key(id)
    }

    /// Returns the registered items and their placements, in registration
    /// order.
    pub fn items(&self) -> impl Iterator<Item = (&I, &Placement<I>)> {
        self.items.iter()
    }

    /// Returns the number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<I> Arranger<I>
where
    I: Eq + Hash + Clone + fmt::Debug,
{
    /// Computes the arrangement.
    ///
    /// The algorithm works in two phases. First every item becomes a vertex
    /// of a [`Dag`] and every constraint becomes an edge, with `Before`
    /// pointing from the declaring item to its target and `After` the other
    /// way around; constraints that reference unknown items or that the
    /// graph rejects as cycle-closing are skipped with a warning and
    /// recorded. Then the order is drained from the graph: each round picks
    /// the source with the least gravity, compared with [`f32::total_cmp`]
    /// and resolved in favor of the earliest-registered item on ties.
    ///
    /// The result always contains every registered item exactly once.
    pub fn arrange(&self) -> Arrangement<I> {
        let mut dag = Dag::new();
        // All vertices go in before any edge so that tie-breaking reflects
        // registration order, not the accident of which constraint first
        // mentioned an item.
        for id in self.items.keys() {
            dag.add_vertex(id.clone());
        }

        let mut conflicts = Vec::new();
        for (id, placement) in &self.items {
            for constraint in placement.constraints() {
                let target = constraint.target();
                if !self.items.contains_key(target) {
                    warn!(
                        "constraint of {:?} references unknown item {:?}, skipping",
                        id, target
                    );
                    conflicts.push(Conflict::unknown_target(id.clone(), target.clone()));
                    continue;
                }

                let accepted = match constraint {
                    Constraint::Before(target) => dag.add_edge(id.clone(), target.clone()),
                    Constraint::After(target) => dag.add_edge(target.clone(), id.clone()),
                };
                if !accepted {
                    warn!(
                        "constraint of {:?} on {:?} would close an ordering cycle, skipping",
                        id, target
                    );
                    conflicts.push(Conflict::cycle(id.clone(), target.clone()));
                }
            }
        }

        let mut order = Vec::with_capacity(self.items.len());
        while !dag.is_empty() {
            let mut lightest: Option<&I> = None;
            let mut lightest_gravity = f32::INFINITY;
            for source in dag.sources() {
                let gravity = self.items[source].gravity();
                if lightest.is_none() || gravity.total_cmp(&lightest_gravity) == Ordering::Less {
                    lightest = Some(source);
                    lightest_gravity = gravity;
                }
            }

            match lightest {
                Some(id) => {
                    let id = id.clone();
                    dag.remove_vertex(&id);
                    order.push(id);
                }
                None => {
                    // A non-empty acyclic graph always has a source.
                    debug_assert!(false, "drained graph still has vertices but no source");
                    break;
                }
            }
        }

        debug_assert_eq!(order.len(), self.items.len());
        debug!(
            "arranged {} items with {} skipped constraints",
            order.len(),
            conflicts.len()
        );
        Arrangement { order, conflicts }
    }
}

impl<I> Default for Arranger<I>
where
    I: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arranger_of(items: Vec<(&'static str, Placement<&'static str>)>) -> Arranger<&'static str> {
        let mut arranger = Arranger::new();
        for (id, placement) in items {
            arranger.insert(id, placement).unwrap();
        }
        arranger
    }

    #[test]
    fn test_empty_arranger() {
        let arranger: Arranger<&str> = Arranger::new();
        let arrangement = arranger.arrange();
        assert!(arrangement.order.is_empty());
        assert!(arrangement.is_clean());
    }

    #[test]
    fn test_unconstrained_items_keep_registration_order() {
        let arranger = arranger_of(vec![
            ("c", Placement::new()),
            ("a", Placement::new()),
            ("b", Placement::new()),
        ]);

        assert_eq!(arranger.arrange().order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_gravity_orders_unconstrained_items() {
        let arranger = arranger_of(vec![
            ("back", Placement::new().with_gravity(1.0)),
            ("front", Placement::new().with_gravity(0.0)),
            ("middle", Placement::new().with_gravity(0.5)),
        ]);

        assert_eq!(arranger.arrange().order, vec!["front", "middle", "back"]);
    }

    #[test]
    fn test_gravity_tie_falls_back_to_registration_order() {
        let arranger = arranger_of(vec![
            ("second", Placement::new().with_gravity(0.5)),
            ("third", Placement::new().with_gravity(0.5)),
            ("first", Placement::new().with_gravity(0.1)),
        ]);

        assert_eq!(arranger.arrange().order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_before_constraint() {
        let arranger = arranger_of(vec![
            ("a", Placement::new()),
            ("b", Placement::new().before("a")),
        ]);

        let arrangement = arranger.arrange();
        assert!(arrangement.is_clean());
        assert_eq!(arrangement.order, vec!["b", "a"]);
    }

    #[test]
    fn test_after_constraint() {
        let arranger = arranger_of(vec![
            ("a", Placement::new().after("b")),
            ("b", Placement::new()),
        ]);

        let arrangement = arranger.arrange();
        assert!(arrangement.is_clean());
        assert_eq!(arrangement.order, vec!["b", "a"]);
    }

    #[test]
    fn test_constraints_dominate_gravity() {
        let arranger = arranger_of(vec![
            ("heavy", Placement::new().with_gravity(1.0)),
            ("light", Placement::new().with_gravity(0.0).after("heavy")),
        ]);

        assert_eq!(arranger.arrange().order, vec!["heavy", "light"]);
    }

    #[test]
    fn test_gravity_reconsidered_every_round() {
        // "blocked" is the lightest item overall but only becomes available
        // once its predecessor is out; until then the scan must settle for
        // the lightest unblocked source.
        let arranger = arranger_of(vec![
            ("a", Placement::new().with_gravity(0.9)),
            ("b", Placement::new().with_gravity(0.1)),
            ("blocked", Placement::new().with_gravity(0.0).after("b")),
        ]);

        assert_eq!(arranger.arrange().order, vec!["b", "blocked", "a"]);
    }

    #[test]
    fn test_unknown_target_is_skipped_and_recorded() {
        let arranger = arranger_of(vec![
            ("a", Placement::new().before("ghost")),
            ("b", Placement::new()),
        ]);

        let arrangement = arranger.arrange();
        assert_eq!(arrangement.order, vec!["a", "b"]);
        assert_eq!(
            arrangement.conflicts,
            vec![Conflict::unknown_target("a", "ghost")]
        );
        assert!(!arrangement.is_clean());
    }

    #[test]
    fn test_contradictory_constraints_skip_the_later_one() {
        let arranger = arranger_of(vec![
            ("a", Placement::new().before("b")),
            ("b", Placement::new().before("a")),
        ]);

        let arrangement = arranger.arrange();
        assert_eq!(arrangement.order, vec!["a", "b"]);
        assert_eq!(arrangement.conflicts, vec![Conflict::cycle("b", "a")]);
    }

    #[test]
    fn test_self_constraint_is_a_cycle_conflict() {
        let arranger = arranger_of(vec![("a", Placement::new().before("a"))]);

        let arrangement = arranger.arrange();
        assert_eq!(arrangement.order, vec!["a"]);
        assert_eq!(arrangement.conflicts, vec![Conflict::cycle("a", "a")]);
    }

    #[test]
    fn test_conflicting_constraint_leaves_the_rest_intact() {
        let arranger = arranger_of(vec![
            ("a", Placement::new().before("b")),
            ("b", Placement::new().before("c")),
            ("c", Placement::new().before("a").before("d")),
            ("d", Placement::new()),
        ]);

        let arrangement = arranger.arrange();
        // c -> a is skipped; a -> b -> c -> d still holds.
        assert_eq!(arrangement.order, vec!["a", "b", "c", "d"]);
        assert_eq!(arrangement.conflicts, vec![Conflict::cycle("c", "a")]);
    }

    #[test]
    fn test_duplicate_item_is_rejected() {
        let mut arranger = Arranger::new();
        arranger.insert("a", Placement::new()).unwrap();

        let err = arranger.insert("a", Placement::new()).unwrap_err();
        assert_eq!(err, OrderError::duplicate_item("a"));
        assert_eq!(arranger.len(), 1);
    }

    #[test]
    fn test_arrange_is_repeatable() {
        let arranger = arranger_of(vec![
            ("a", Placement::new().with_gravity(0.3)),
            ("b", Placement::new().with_gravity(0.3).after("d")),
            ("c", Placement::new().before("ghost")),
            ("d", Placement::new().with_gravity(0.0)),
        ]);

        let first = arranger.arrange();
        let second = arranger.arrange();
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_order_drops_conflicts() {
        let arranger = arranger_of(vec![("a", Placement::new().after("ghost"))]);
        assert_eq!(arranger.arrange().into_order(), vec!["a"]);
    }
}

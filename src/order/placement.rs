//! Placement declarations
//!
//! A [`Placement`] describes where an item wants to sit in the final order:
//! a gravity weight for the coarse position plus any number of pairwise
//! [`Constraint`]s against other items. Constraints are declarative; whether
//! they can all be honored is decided later, during
//! [`arrange`](crate::order::Arranger::arrange).

use serde::{Deserialize, Serialize};

/// A pairwise ordering requirement against another item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint<I> {
    /// The declaring item must appear before the referenced item.
    Before(I),
    /// The declaring item must appear after the referenced item.
    After(I),
}

impl<I> Constraint<I> {
    /// Returns the item this constraint refers to.
    pub fn target(&self) -> &I {
        match self {
            Constraint::Before(target) | Constraint::After(target) => target,
        }
    }
}

/// Where an item wants to sit in the final order.
///
/// Gravity is the coarse position: conventionally in `[0.0, 1.0]`, where
/// `0.0` floats the item toward the front and `1.0` (the default) sinks it
/// toward the back. Gravity only breaks ties between items that are not
/// ordered against each other by constraints; constraints always win.
///
/// # Examples
///
/// ```
/// use taxis::Placement;
///
/// let placement = Placement::new()
///     .with_gravity(0.5)
///     .after("line-numbers")
///     .before("annotations");
/// assert_eq!(placement.constraints().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement<I> {
    gravity: f32,
    constraints: Vec<Constraint<I>>,
}

impl<I> Placement<I> {
    /// Creates a placement with gravity `1.0` and no constraints.
    pub fn new() -> Self {
        Self {
            gravity: 1.0,
            constraints: Vec::new(),
        }
    }

    /// Sets the gravity weight.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Requires this item to appear before `target`.
    pub fn before(mut self, target: I) -> Self {
        self.constraints.push(Constraint::Before(target));
        self
    }

    /// Requires this item to appear after `target`.
    pub fn after(mut self, target: I) -> Self {
        self.constraints.push(Constraint::After(target));
        self
    }

    /// Returns the gravity weight.
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Returns the constraints in declaration order.
    pub fn constraints(&self) -> &[Constraint<I>] {
        &self.constraints
    }
}

impl<I> Default for Placement<I> {
    fn default() -> Self {
        Self::new()
    }
}

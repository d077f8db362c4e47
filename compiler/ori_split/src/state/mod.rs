//! Search State
//!
//! An immutable snapshot of one partial layout: how many boundaries have
//! been resolved, at what cost, where the cursor sits, and which indentation
//! and constraints are still in scope.
//!
//! # Transition
//!
//! [`State::next`] resolves the next boundary with one split:
//!
//! 1. **Expire** pushes whose reference token has moved past their recorded
//!    position, then open the split's own pushes.
//! 2. **Measure** the right token. A multi-line literal extends the current
//!    line only up to its first break.
//! 3. **Place** the token: after a newline it starts at the new indentation,
//!    otherwise after the current column and the split's own width.
//! 4. **Penalize** a line reaching the width limit with the overflow penalty
//!    plus the overflowing column.
//! 5. **Combine** the path's constraints with the split's policy, dropping
//!    constraints that ended before the left token.
//! 6. **Record** the optimality marker, if any, at the pre-transition depth.
//!
//! # Ordering
//!
//! [`Priority`] orders the frontier (cheaper, then deeper, then shallower
//! indentation first). [`State::always_better`] is the separate, cheaper
//! dominance test used for pruning. The two are intentionally not the same
//! relation.

mod arena;

use std::cmp::Ordering;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::boundary::Boundary;
use crate::config::Limit;
use crate::error::{InvalidInput, Result};
use crate::policy::PolicySummary;
use crate::split::{IndentPush, OptimalMarker, Split, SplitKind};

pub use arena::{StateArena, StateId};

/// Depths at which each optimality marker was reached along a path.
///
/// Each entry is sorted and free of duplicates.
pub type OptimalDecisions = FxHashMap<OptimalMarker, SmallVec<[u32; 2]>>;

/// An indentation push in scope, stamped with where it was opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActivePush {
    /// The push as offered by the split.
    pub push: IndentPush,
    /// Column of the cursor when the push was opened.
    pub origin_column: u32,
    /// Total indentation when the push was opened.
    pub origin_indentation: u32,
}

/// A partial layout.
#[derive(Clone, Debug)]
pub struct State {
    id: StateId,
    parent: Option<StateId>,
    cost: u64,
    policy: PolicySummary,
    /// Last split taken, with its penalized cost.
    split: Option<Split>,
    depth: u32,
    optimal: Arc<OptimalDecisions>,
    indentation: u32,
    pushes: SmallVec<[ActivePush; 4]>,
    column: u32,
}

impl State {
    /// The designated start state: nothing resolved, nothing in scope.
    pub fn start() -> Self {
        State {
            id: StateId::INVALID,
            parent: None,
            cost: 0,
            policy: PolicySummary::new(),
            split: None,
            depth: 0,
            optimal: Arc::default(),
            indentation: 0,
            pushes: SmallVec::new(),
            column: 0,
        }
    }

    /// Arena slot of this state, or `StateId::INVALID` if not stored.
    #[inline]
    pub fn id(&self) -> StateId {
        self.id
    }

    /// The state this one was derived from.
    #[inline]
    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Accumulated cost of the path.
    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Constraints in scope.
    #[inline]
    pub fn policy(&self) -> &PolicySummary {
        &self.policy
    }

    /// Last split taken, carrying its penalized cost.
    #[inline]
    pub fn last_split(&self) -> Option<&Split> {
        self.split.as_ref()
    }

    /// Number of boundaries resolved so far (history length).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    /// Depths at which each optimality marker was reached.
    #[inline]
    pub fn optimal_decisions(&self) -> &OptimalDecisions {
        &self.optimal
    }

    /// Check if `marker` was reached after exactly `depth` decisions.
    pub fn reached_optimal_at(&self, marker: OptimalMarker, depth: usize) -> bool {
        self.optimal
            .get(&marker)
            .is_some_and(|depths| depths.iter().any(|&d| d as usize == depth))
    }

    /// Total indentation of the pushes in scope.
    #[inline]
    pub fn indentation(&self) -> u32 {
        self.indentation
    }

    /// Indentation pushes in scope, oldest first.
    #[inline]
    pub fn active_pushes(&self) -> &[ActivePush] {
        &self.pushes
    }

    /// Cursor column after the last emitted token.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Key for frontier ordering.
    #[inline]
    pub fn priority(&self) -> Priority {
        Priority {
            cost: self.cost,
            depth: self.depth,
            indentation: self.indentation,
        }
    }

    /// Dominance test: `self` costs no more and is indented no deeper.
    ///
    /// Column, constraints, and history are not compared. This is a cheap
    /// sufficient test for discarding `other`, not an equivalence; `false`
    /// proves nothing.
    #[inline]
    pub fn always_better(&self, other: &State) -> bool {
        self.cost <= other.cost && self.indentation <= other.indentation
    }

    /// Resolve `boundary` with `split`.
    ///
    /// Pure: `self` is unchanged and the result is a new state whose parent
    /// is `self`. Overflowing the width limit is penalized, never rejected.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::TokenOrder`] if the boundary's tokens are out of
    /// source order, [`InvalidInput::ExpiredPush`] if one of the split's
    /// pushes would already be expired at this boundary.
    pub fn next(&self, limit: Limit, split: &Split, boundary: &Boundary) -> Result<State> {
        let index = self.depth();
        if !boundary.is_ordered() {
            return Err(InvalidInput::TokenOrder { boundary: index }.into());
        }

        let mut pushes: SmallVec<[ActivePush; 4]> = self
            .pushes
            .iter()
            .filter(|active| active.push.expiry.is_live_at(boundary))
            .copied()
            .collect();
        for push in &split.pushes {
            if !push.expiry.is_live_at(boundary) {
                return Err(InvalidInput::ExpiredPush { boundary: index }.into());
            }
            pushes.push(ActivePush {
                push: *push,
                origin_column: self.column,
                origin_indentation: self.indentation,
            });
        }
        let indentation = pushes
            .iter()
            .fold(0u32, |sum, active| sum.saturating_add(active.push.length));

        let metrics = boundary.right.metrics();
        let line_start = match split.kind {
            SplitKind::Newline { no_indent: true, .. } => 0,
            SplitKind::Newline { .. } => indentation,
            _ => self.column.saturating_add(split.width()),
        };
        let line_end = line_start.saturating_add(metrics.first_line);
        let column = if metrics.is_multiline() {
            metrics.last_line
        } else {
            line_end
        };

        let cost = limit.penalize(split.cost, line_end);
        let policy = self.policy.combine(split.policy.as_ref(), boundary.left.end);

        let optimal = match split.optimal_at {
            Some(marker) => {
                let mut optimal = Arc::clone(&self.optimal);
                let depths = Arc::make_mut(&mut optimal).entry(marker).or_default();
                if let Err(at) = depths.binary_search(&self.depth) {
                    depths.insert(at, self.depth);
                }
                optimal
            }
            None => Arc::clone(&self.optimal),
        };

        Ok(State {
            id: StateId::INVALID,
            parent: self.id.is_valid().then_some(self.id),
            cost: self.cost.saturating_add(cost),
            policy,
            split: Some(split.with_cost(cost)),
            depth: self.depth + 1,
            optimal,
            indentation,
            pushes,
            column,
        })
    }
}

/// Frontier ordering key of a [`State`].
///
/// Greater means "expand first": lower cost, then more boundaries resolved,
/// then lower indentation. Two priorities are equal only when all three
/// keys are equal, so a max-heap of priorities is a best-first frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Priority {
    pub cost: u64,
    pub depth: u32,
    pub indentation: u32,
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.depth.cmp(&other.depth))
            .then_with(|| other.indentation.cmp(&self.indentation))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

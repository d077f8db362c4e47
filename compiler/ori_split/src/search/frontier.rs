//! Frontier bookkeeping for the driver.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::policy::PolicySummary;
use crate::split::IndentPush;
use crate::state::{Priority, State, StateId};

/// A frontier entry: the state's priority plus its arena slot.
///
/// Ties on priority go to the state created first, which keeps the search
/// deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Entry {
    priority: Priority,
    id: StateId,
}

impl Entry {
    pub(super) fn of(state: &State) -> Self {
        Entry {
            priority: state.priority(),
            id: state.id(),
        }
    }

    #[inline]
    pub(super) fn id(self) -> StateId {
        self.id
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything that shapes a state's future besides its cost.
///
/// States sharing a key continue identically, so within a key the
/// dominance test decides which one survives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(super) struct StateKey {
    depth: usize,
    column: u32,
    policy: PolicySummary,
    pushes: SmallVec<[IndentPush; 4]>,
}

impl StateKey {
    pub(super) fn of(state: &State) -> Self {
        StateKey {
            depth: state.depth(),
            column: state.column(),
            policy: state.policy().clone(),
            pushes: state.active_pushes().iter().map(|a| a.push).collect(),
        }
    }
}

//! State storage.
//!
//! Every state records its parent as a [`StateId`] into a [`StateArena`]
//! instead of carrying its own copy of the path. Walking parent links
//! recovers the full history and ancestor chain of any state.

use std::fmt;
use std::ops::Index;

use crate::boundary::Boundary;
use crate::config::Limit;
use crate::error::Result;
use crate::split::Split;

use super::State;

/// Index of a state in a [`StateArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StateId(u32);

impl StateId {
    /// Invalid state ID (sentinel value for states not yet in an arena).
    pub const INVALID: StateId = StateId(u32::MAX);

    /// The start state of every arena.
    pub const START: StateId = StateId(0);

    /// Create a new `StateId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        StateId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "StateId({})", self.0)
        } else {
            write!(f, "StateId::INVALID")
        }
    }
}

/// Append-only storage for the states of one search run.
///
/// Slot 0 always holds the start state.
#[derive(Debug)]
pub struct StateArena {
    states: Vec<State>,
}

impl Default for StateArena {
    fn default() -> Self {
        Self::new()
    }
}

impl StateArena {
    /// Create an arena holding only the start state.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = StateArena {
            states: Vec::with_capacity(capacity.max(1)),
        };
        arena.alloc(State::start());
        arena
    }

    /// Store a state and return its ID.
    ///
    /// Callers store only states derived from a state of this arena, so
    /// parent links, depth, and history stay in step. Outside the crate,
    /// [`StateArena::next`] is the way in.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "state counts are capped far below u32::MAX by the expansion limit"
    )]
    pub(crate) fn alloc(&mut self, mut state: State) -> StateId {
        let id = StateId::new(self.states.len() as u32);
        state.id = id;
        self.states.push(state);
        id
    }

    /// Transition the state `id` through `split` at `boundary` and store the result.
    pub fn next(
        &mut self,
        id: StateId,
        limit: Limit,
        split: &Split,
        boundary: &Boundary,
    ) -> Result<StateId> {
        let state = self[id].next(limit, split, boundary)?;
        Ok(self.alloc(state))
    }

    /// Get a state by ID.
    #[inline]
    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// Number of stored states, including the start state.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the start state is allocated on creation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Every state on the path to `id`, start state first, excluding `id`.
    pub fn ancestors(&self, id: StateId) -> Vec<StateId> {
        let mut chain = Vec::with_capacity(self[id].depth());
        let mut cursor = self[id].parent();
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self[parent].parent();
        }
        chain.reverse();
        chain
    }

    /// Penalized splits taken on the path to `id`, in boundary order.
    pub fn history(&self, id: StateId) -> Vec<&Split> {
        let mut splits = Vec::with_capacity(self[id].depth());
        let mut cursor = id;
        while let Some(split) = self[cursor].last_split() {
            splits.push(split);
            match self[cursor].parent() {
                Some(parent) => cursor = parent,
                None => break,
            }
        }
        splits.reverse();
        splits
    }
}

impl Index<StateId> for StateArena {
    type Output = State;

    #[inline]
    fn index(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }
}

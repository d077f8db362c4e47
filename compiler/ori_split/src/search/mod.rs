//! Search Driver
//!
//! Best-first search over [`State`]s for the cheapest split sequence.
//!
//! # Algorithm
//!
//! 1. Seed the frontier with the start state.
//! 2. Pop the highest-[`Priority`] state. If it has resolved every boundary
//!    no cheaper layout is left: costs never decrease along a path, and the
//!    frontier pops in cost order. This holds as long as the rule layer's
//!    [`OptimalMarker`]s are honest, since marker pruning trusts them.
//! 3. Otherwise transition it through each split its constraints admit at
//!    the next boundary, and push the children that survive pruning:
//!    - a child reaching an [`OptimalMarker`] at a depth where a cheaper
//!      state already reached it is dropped;
//!    - a child whose future is identical to a stored state's (same depth,
//!      column, constraints, and pushes) is dropped if that state
//!      [`always_better`](State::always_better) it, and replaces it otherwise.
//! 4. After `max_expansions` expansions, complete the best frontier state
//!    greedily and report [`Termination::Truncated`].
//!
//! The overflow penalty is raised per run above the sum of each boundary's
//! most expensive split, so no in-bounds layout ever costs more than an
//! overflowing one.

mod frontier;

use std::collections::BinaryHeap;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::boundary::Boundary;
use crate::config::{Limit, SearchConfig};
use crate::error::{InvalidInput, Result, SearchError};
use crate::reconstruct::{reconstruct, Reconstruction};
use crate::split::{OptimalMarker, Split};
use crate::state::{Priority, State, StateArena, StateId};

use frontier::{Entry, StateKey};

/// A boundary and the splits the rule layer offers there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub boundary: Boundary,
    pub splits: Vec<Split>,
}

impl Slot {
    /// Create a slot.
    pub fn new(boundary: Boundary, splits: Vec<Split>) -> Self {
        Slot { boundary, splits }
    }
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The returned layout has minimal cost, assuming every
    /// [`OptimalMarker`] the rule layer attached is truthful.
    Optimal,
    /// The expansion cap was hit; the layout is complete but may not be optimal.
    Truncated,
}

/// The outcome of a search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Chosen split per boundary, as offered (without overflow penalties).
    pub splits: Vec<Split>,
    /// Total cost, overflow penalties included.
    pub cost: u64,
    /// Whether the layout is known to be optimal.
    pub termination: Termination,
    /// Number of states expanded.
    pub expanded: usize,
    /// Limit the run used, with its effective overflow penalty.
    pub limit: Limit,
}

impl Solution {
    /// Check if the search finished without hitting the expansion cap.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.termination == Termination::Optimal
    }

    /// Replay the chosen splits over `slots` and render the whitespace.
    pub fn reconstruct(&self, slots: &[Slot]) -> Result<Reconstruction> {
        let boundaries = boundaries(slots);
        reconstruct(&boundaries, &self.splits, self.limit)
    }
}

/// Find the cheapest split sequence for `slots`.
///
/// # Errors
///
/// [`SearchError::InvalidInput`] for a zero width limit, a slot without
/// splits, or tokens out of source order. [`SearchError::SearchExhausted`]
/// if the frontier empties before any layout is complete.
pub fn search(slots: &[Slot], config: &SearchConfig) -> Result<Solution> {
    validate(slots)?;
    let limit = effective_limit(slots, config)?;

    tracing::debug!(
        boundaries = slots.len(),
        max_width = limit.width(),
        overflow_penalty = limit.overflow_penalty(),
        "starting split search"
    );

    let mut search = Search::new(slots, limit);
    let solution = search.run(config.max_expansions)?;

    tracing::debug!(
        cost = solution.cost,
        expanded = solution.expanded,
        pruned = search.pruned,
        states = search.arena.len(),
        optimal = solution.is_optimal(),
        "split search finished"
    );
    Ok(solution)
}

/// Search and render: the formatted text for `slots`.
pub fn format(slots: &[Slot], config: &SearchConfig) -> Result<String> {
    let solution = search(slots, config)?;
    let reconstruction = solution.reconstruct(slots)?;
    Ok(reconstruction.render(&boundaries(slots)))
}

/// Run independent searches in parallel, one per stream.
pub fn search_all(streams: &[Vec<Slot>], config: &SearchConfig) -> Vec<Result<Solution>> {
    streams
        .par_iter()
        .map(|slots| search(slots, config))
        .collect()
}

fn boundaries(slots: &[Slot]) -> Vec<Boundary> {
    slots.iter().map(|slot| slot.boundary.clone()).collect()
}

fn validate(slots: &[Slot]) -> Result<()> {
    let mut previous_end = 0;
    for (index, slot) in slots.iter().enumerate() {
        if slot.splits.is_empty() {
            return Err(InvalidInput::NoSplits { boundary: index }.into());
        }
        if !slot.boundary.is_ordered() || slot.boundary.left.end < previous_end {
            return Err(InvalidInput::TokenOrder { boundary: index }.into());
        }
        previous_end = slot.boundary.left.end;
    }
    Ok(())
}

/// The configured limit with its penalty raised above every in-bounds path cost.
fn effective_limit(slots: &[Slot], config: &SearchConfig) -> Result<Limit> {
    let worst_path = slots.iter().fold(0u64, |sum, slot| {
        let worst = slot.splits.iter().map(|s| s.cost).max().unwrap_or(0);
        sum.saturating_add(worst)
    });
    let limit = config.limit()?;
    let floor = worst_path.saturating_add(1);
    if floor > limit.overflow_penalty() {
        tracing::debug!(
            configured = limit.overflow_penalty(),
            raised = floor,
            "raising overflow penalty above worst in-bounds path"
        );
    }
    Ok(limit.raise_penalty(floor))
}

/// Per-run driver state. The frontier is owned by one run.
struct Search<'a> {
    slots: &'a [Slot],
    limit: Limit,
    arena: StateArena,
    /// Index of the split that produced each state, parallel to the arena.
    choices: Vec<usize>,
    frontier: BinaryHeap<Entry>,
    /// Cheapest known state per future-equivalence key.
    best: FxHashMap<StateKey, StateId>,
    /// Cheapest cost at which each marker was reached at each depth.
    optimal: FxHashMap<(OptimalMarker, usize), u64>,
    expanded: usize,
    pruned: usize,
}

impl<'a> Search<'a> {
    fn new(slots: &'a [Slot], limit: Limit) -> Self {
        Search {
            slots,
            limit,
            arena: StateArena::new(),
            choices: vec![0],
            frontier: BinaryHeap::new(),
            best: FxHashMap::default(),
            optimal: FxHashMap::default(),
            expanded: 0,
            pruned: 0,
        }
    }

    fn run(&mut self, max_expansions: usize) -> Result<Solution> {
        self.frontier.push(Entry::of(&self.arena[StateId::START]));

        while let Some(entry) = self.frontier.pop() {
            let id = entry.id();
            if self.is_superseded(id) {
                continue;
            }
            if self.arena[id].depth() == self.slots.len() {
                return Ok(self.solution(id, Termination::Optimal));
            }
            if self.expanded >= max_expansions {
                tracing::warn!(
                    expanded = self.expanded,
                    depth = self.arena[id].depth(),
                    boundaries = self.slots.len(),
                    "expansion cap reached, completing greedily"
                );
                let last = self.complete_greedily(id)?;
                return Ok(self.solution(last, Termination::Truncated));
            }
            self.expand(id)?;
        }

        Err(SearchError::SearchExhausted {
            expanded: self.expanded,
        })
    }

    /// Check if a cheaper state with the same future replaced `id`.
    fn is_superseded(&self, id: StateId) -> bool {
        let key = StateKey::of(&self.arena[id]);
        self.best.get(&key).is_some_and(|&best| best != id)
    }

    /// Indices of the splits at the next boundary that `id`'s constraints admit.
    ///
    /// Conflicting constraints can rule out every split; the boundary still
    /// has to be resolved, so then every split is admitted.
    fn admitted(&self, id: StateId) -> SmallVec<[usize; 4]> {
        let state = &self.arena[id];
        let slot = &self.slots[state.depth()];
        let admitted: SmallVec<[usize; 4]> = (0..slot.splits.len())
            .filter(|&i| state.policy().admits(&slot.splits[i], &slot.boundary))
            .collect();
        if admitted.is_empty() {
            tracing::trace!(
                boundary = state.depth(),
                "constraints admit no split, ignoring them"
            );
            (0..slot.splits.len()).collect()
        } else {
            admitted
        }
    }

    fn expand(&mut self, id: StateId) -> Result<()> {
        self.expanded += 1;
        let depth = self.arena[id].depth();
        tracing::trace!(depth, cost = self.arena[id].cost(), "expanding state");

        let slots = self.slots;
        let slot = &slots[depth];
        for index in self.admitted(id) {
            let split = &slot.splits[index];
            let child = self.arena[id].next(self.limit, split, &slot.boundary)?;
            if self.should_prune(&child, split) {
                self.pruned += 1;
                continue;
            }
            let key = StateKey::of(&child);
            let child = self.store(child, index);
            self.best.insert(key, child);
            self.frontier.push(Entry::of(&self.arena[child]));
        }
        Ok(())
    }

    fn should_prune(&mut self, child: &State, split: &Split) -> bool {
        let at = child.depth() - 1;
        if let Some(marker) = split
            .optimal_at
            .filter(|&marker| child.reached_optimal_at(marker, at))
        {
            let cost = child.cost();
            match self.optimal.get(&(marker, at)) {
                Some(&seen) if seen <= cost => return true,
                _ => {
                    self.optimal.insert((marker, at), cost);
                }
            }
        }

        self.best
            .get(&StateKey::of(child))
            .is_some_and(|&best| self.arena[best].always_better(child))
    }

    fn store(&mut self, state: State, choice: usize) -> StateId {
        let id = self.arena.alloc(state);
        self.choices.push(choice);
        id
    }

    /// Finish a path by taking the highest-priority admitted split at each
    /// remaining boundary.
    fn complete_greedily(&mut self, mut id: StateId) -> Result<StateId> {
        let slots = self.slots;
        while self.arena[id].depth() < slots.len() {
            let slot = &slots[self.arena[id].depth()];
            let mut best: Option<(Priority, usize, State)> = None;
            for index in self.admitted(id) {
                let child = self.arena[id].next(self.limit, &slot.splits[index], &slot.boundary)?;
                let priority = child.priority();
                let better = match &best {
                    Some((seen, _, _)) => priority > *seen,
                    None => true,
                };
                if better {
                    best = Some((priority, index, child));
                }
            }
            match best {
                Some((_, index, child)) => id = self.store(child, index),
                None => {
                    return Err(SearchError::SearchExhausted {
                        expanded: self.expanded,
                    })
                }
            }
        }
        Ok(id)
    }

    fn solution(&self, id: StateId, termination: Termination) -> Solution {
        let mut path = self.arena.ancestors(id);
        path.push(id);
        let splits = path
            .iter()
            .skip(1)
            .map(|&step| {
                let depth = self.arena[step].depth() - 1;
                self.slots[depth].splits[self.choices[step.index()]].clone()
            })
            .collect();
        Solution {
            splits,
            cost: self.arena[id].cost(),
            termination,
            expanded: self.expanded,
            limit: self.limit,
        }
    }
}

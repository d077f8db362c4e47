//! Search Configuration
//!
//! Per-run knobs for the line-breaking search: the width limit, the overflow
//! penalty, and the expansion cap that bounds search time.

use crate::error::{InvalidInput, SearchError};

/// Default maximum line width.
pub const MAX_LINE_WIDTH: u32 = 100;

/// Fixed cost added to any split that pushes its line to or past the width limit.
///
/// The overflowing column is added on top, so deeper overflows cost more.
pub const OVERFLOW_PENALTY: u64 = 10_000;

/// Default number of state expansions before the search gives up on optimality.
pub const MAX_EXPANSIONS: usize = 100_000;

/// Configuration for one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum line width. Columns at or past this value overflow.
    pub max_width: u32,

    /// Base overflow penalty. The driver raises it per run when the
    /// boundary stream's own costs could exceed it.
    pub overflow_penalty: u64,

    /// Expansion cap. When reached, the best frontier state is completed
    /// greedily and the solution is marked [`Termination::Truncated`].
    ///
    /// [`Termination::Truncated`]: crate::search::Termination::Truncated
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_LINE_WIDTH,
            overflow_penalty: OVERFLOW_PENALTY,
            max_expansions: MAX_EXPANSIONS,
        }
    }
}

impl SearchConfig {
    /// Create a new config with the specified max width.
    pub fn with_max_width(max_width: u32) -> Self {
        Self {
            max_width,
            ..Default::default()
        }
    }

    /// Create a new config with the specified expansion cap.
    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions,
            ..Default::default()
        }
    }

    /// The transition limit described by this config.
    pub fn limit(&self) -> Result<Limit, SearchError> {
        Limit::with_penalty(self.max_width, self.overflow_penalty)
    }
}

/// Width limit and overflow penalty consumed by [`State::next`].
///
/// [`State::next`]: crate::state::State::next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit {
    width: u32,
    overflow_penalty: u64,
}

impl Limit {
    /// A limit of `width` columns with the default overflow penalty.
    pub fn new(width: u32) -> Result<Self, SearchError> {
        Self::with_penalty(width, OVERFLOW_PENALTY)
    }

    /// A limit with an explicit overflow penalty.
    pub fn with_penalty(width: u32, overflow_penalty: u64) -> Result<Self, SearchError> {
        if width == 0 {
            return Err(InvalidInput::ZeroWidth.into());
        }
        Ok(Limit {
            width,
            overflow_penalty,
        })
    }

    /// Maximum line width.
    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    /// Fixed part of the overflow penalty.
    #[inline]
    pub fn overflow_penalty(self) -> u64 {
        self.overflow_penalty
    }

    /// Penalized cost of a split whose line reaches `column`.
    #[inline]
    pub fn penalize(self, base: u64, column: u32) -> u64 {
        if column < self.width {
            base
        } else {
            base.saturating_add(self.overflow_penalty)
                .saturating_add(u64::from(column))
        }
    }

    /// Same limit with the penalty raised to at least `floor`.
    #[must_use = "raise_penalty returns a new Limit"]
    pub fn raise_penalty(self, floor: u64) -> Self {
        Limit {
            overflow_penalty: self.overflow_penalty.max(floor),
            ..self
        }
    }
}

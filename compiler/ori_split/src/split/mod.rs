//! Split Candidates
//!
//! A [`Split`] is one formatting decision the rule layer offers at a
//! boundary: what to put between the two tokens, what it costs, which
//! indentation it opens, and which constraint it attaches to the rest of
//! the path.

use smallvec::SmallVec;

use crate::boundary::{char_width, Boundary};
use crate::policy::Policy;

/// What a split inserts between the left and right token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SplitKind {
    /// A single space.
    Space,
    /// A line break followed by the current indentation.
    Newline {
        /// Emit an empty line before the next token.
        blank_line: bool,
        /// Start the next line at column 0.
        no_indent: bool,
    },
    /// Nothing; the tokens touch.
    Nothing,
    /// Literal text, emitted verbatim.
    Literal(String),
}

impl SplitKind {
    /// Plain line break.
    pub const NEWLINE: SplitKind = SplitKind::Newline {
        blank_line: false,
        no_indent: false,
    };

    /// Check if this kind breaks the line.
    #[inline]
    pub fn is_newline(&self) -> bool {
        matches!(self, SplitKind::Newline { .. })
    }

    /// Columns this kind adds to the current line. Newlines add none.
    pub fn width(&self) -> u32 {
        match self {
            SplitKind::Space => 1,
            SplitKind::Newline { .. } | SplitKind::Nothing => 0,
            SplitKind::Literal(text) => char_width(text),
        }
    }
}

/// Which token of a boundary an expiry refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// End position of this side's token in `boundary`.
    #[inline]
    pub fn end_of(self, boundary: &Boundary) -> usize {
        match self {
            Side::Left => boundary.left.end,
            Side::Right => boundary.right.end,
        }
    }
}

/// When an indentation push stops applying.
///
/// The push stays active while the reference token (per `side`) of the
/// boundary being resolved ends at or before `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Expiry {
    pub side: Side,
    pub position: usize,
}

impl Expiry {
    /// Check if the push is still active at `boundary`.
    #[inline]
    pub fn is_live_at(self, boundary: &Boundary) -> bool {
        self.side.end_of(boundary) <= self.position
    }
}

/// A scoped contribution to the indentation of following lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndentPush {
    /// Spaces added to the indentation while active.
    pub length: u32,
    /// Expiration trigger.
    pub expiry: Expiry,
}

impl IndentPush {
    /// A push expiring at a recorded source position.
    pub fn new(length: u32, side: Side, position: usize) -> Self {
        IndentPush {
            length,
            expiry: Expiry { side, position },
        }
    }

    /// A push that expires once the search moves past `until`'s `side` token.
    pub fn until(length: u32, until: &Boundary, side: Side) -> Self {
        IndentPush::new(length, side, side.end_of(until))
    }
}

/// Rule-layer tag marking a boundary where the locally cheapest decision is
/// known to be globally optimal.
///
/// The driver prunes costlier states that reach the same marker after the
/// same number of decisions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct OptimalMarker(u32);

impl OptimalMarker {
    /// Create a new marker.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        OptimalMarker(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One candidate decision at a boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Split {
    /// What to insert.
    pub kind: SplitKind,
    /// Cost of taking this split. The transition adds the overflow penalty
    /// to the copy it records in the path history.
    pub cost: u64,
    /// Indentation opened by this split.
    pub pushes: SmallVec<[IndentPush; 1]>,
    /// Constraint attached to the rest of the path.
    pub policy: Option<Policy>,
    /// Optimality hint for the driver.
    pub optimal_at: Option<OptimalMarker>,
}

impl Split {
    /// A split of the given kind and cost with no pushes, policy, or marker.
    pub fn new(kind: SplitKind, cost: u64) -> Self {
        Split {
            kind,
            cost,
            pushes: SmallVec::new(),
            policy: None,
            optimal_at: None,
        }
    }

    /// Insert a space.
    pub fn space(cost: u64) -> Self {
        Split::new(SplitKind::Space, cost)
    }

    /// Break the line.
    pub fn newline(cost: u64) -> Self {
        Split::new(SplitKind::NEWLINE, cost)
    }

    /// Insert nothing.
    pub fn nothing(cost: u64) -> Self {
        Split::new(SplitKind::Nothing, cost)
    }

    /// Insert literal text.
    pub fn literal(text: impl Into<String>, cost: u64) -> Self {
        Split::new(SplitKind::Literal(text.into()), cost)
    }

    /// Emit an empty line before the next token. No effect unless newline.
    #[must_use]
    pub fn blank_line(mut self) -> Self {
        if let SplitKind::Newline { blank_line, .. } = &mut self.kind {
            *blank_line = true;
        }
        self
    }

    /// Start the next line at column 0. No effect unless newline.
    #[must_use]
    pub fn no_indent(mut self) -> Self {
        if let SplitKind::Newline { no_indent, .. } = &mut self.kind {
            *no_indent = true;
        }
        self
    }

    /// Open an indentation push.
    #[must_use]
    pub fn with_push(mut self, push: IndentPush) -> Self {
        self.pushes.push(push);
        self
    }

    /// Attach a policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Tag with an optimality marker.
    #[must_use]
    pub fn optimal_at(mut self, marker: OptimalMarker) -> Self {
        self.optimal_at = Some(marker);
        self
    }

    /// Check if this split breaks the line.
    #[inline]
    pub fn is_newline(&self) -> bool {
        self.kind.is_newline()
    }

    /// Columns this split adds to the current line.
    #[inline]
    pub fn width(&self) -> u32 {
        self.kind.width()
    }

    /// Same split with a different cost.
    #[must_use = "with_cost returns a new Split"]
    pub fn with_cost(&self, cost: u64) -> Self {
        Split {
            cost,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests;

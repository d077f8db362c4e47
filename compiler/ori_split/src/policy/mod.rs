//! Path Constraints
//!
//! A [`Policy`] is a constraint a split attaches to the rest of its path,
//! scoped to a source range. A [`PolicySummary`] is everything still in
//! scope along one path. The driver consults the summary to decide which of
//! a boundary's offered splits may be taken.

use smallvec::SmallVec;

use crate::boundary::Boundary;
use crate::split::Split;

/// A scoped formatting constraint.
///
/// Both variants apply to boundaries whose left token ends at or before
/// `until`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Keep the range on one line: newline splits are not admitted.
    Unbroken { until: usize },
    /// Break every boundary in the range: only newline splits are admitted.
    Broken { until: usize },
}

impl Policy {
    /// Last source position the constraint covers.
    #[inline]
    pub fn until(self) -> usize {
        match self {
            Policy::Unbroken { until } | Policy::Broken { until } => until,
        }
    }

    /// Check if this constraint covers `boundary`.
    #[inline]
    pub fn covers(self, boundary: &Boundary) -> bool {
        boundary.left.end <= self.until()
    }

    /// Check if `split` satisfies this constraint at `boundary`.
    pub fn admits(self, split: &Split, boundary: &Boundary) -> bool {
        if !self.covers(boundary) {
            return true;
        }
        match self {
            Policy::Unbroken { .. } => !split.is_newline(),
            Policy::Broken { .. } => split.is_newline(),
        }
    }
}

/// Constraints in scope along one path, oldest first, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PolicySummary {
    policies: SmallVec<[Policy; 2]>,
}

impl PolicySummary {
    /// The empty summary carried by the start state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Policies in scope, oldest first.
    #[inline]
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Check if no constraint is in scope.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Merge a new policy into the summary.
    ///
    /// Constraints that ended before `cutoff` are dropped. The new policy is
    /// appended unless an identical one is already in scope.
    #[must_use = "combine returns a new PolicySummary"]
    pub fn combine(&self, policy: Option<&Policy>, cutoff: usize) -> Self {
        let mut policies: SmallVec<[Policy; 2]> = self
            .policies
            .iter()
            .copied()
            .filter(|p| p.until() >= cutoff)
            .collect();
        if let Some(&policy) = policy {
            if policy.until() >= cutoff && !policies.contains(&policy) {
                policies.push(policy);
            }
        }
        PolicySummary { policies }
    }

    /// Check if every constraint in scope admits `split` at `boundary`.
    pub fn admits(&self, split: &Split, boundary: &Boundary) -> bool {
        self.policies.iter().all(|p| p.admits(split, boundary))
    }
}

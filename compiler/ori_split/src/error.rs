//! Search Errors
//!
//! Malformed input from the boundary producer or the rule layer is reported
//! as [`SearchError::InvalidInput`]. A driver run that ends without any
//! complete layout is [`SearchError::SearchExhausted`]. Overflowing the
//! width limit is never an error; it is a penalized outcome.

/// Errors produced by the transition function, reconstruction, and driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A caller broke a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The frontier ran dry before any state resolved every boundary.
    #[error("search exhausted after {expanded} expansions without a complete layout")]
    SearchExhausted { expanded: usize },
}

/// Precondition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// The line-width limit must be positive.
    #[error("line width limit must be positive")]
    ZeroWidth,

    /// A boundary offered no candidate splits.
    #[error("boundary {boundary} offers no splits")]
    NoSplits { boundary: usize },

    /// A boundary's right token ends before its left token.
    #[error("boundary {boundary} has tokens out of source order")]
    TokenOrder { boundary: usize },

    /// An indentation push expires at a position already behind the
    /// boundary that introduces it.
    #[error("indentation push at boundary {boundary} expires behind the stream")]
    ExpiredPush { boundary: usize },

    /// The chosen split sequence does not line up with the boundary stream.
    #[error("{splits} splits chosen for {boundaries} boundaries")]
    LengthMismatch { boundaries: usize, splits: usize },
}

/// Result alias used throughout the crate.
pub type Result<T, E = SearchError> = std::result::Result<T, E>;

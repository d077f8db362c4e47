//! Ori Split Search
//!
//! Line-breaking decision engine for the Ori formatter. Given a stream of
//! token boundaries, each offering candidate splits (space, newline,
//! nothing, literal text), it finds the cheapest split sequence that keeps
//! lines within the width limit, then renders the whitespace.
//!
//! # Architecture
//!
//! 1. **State**: immutable snapshots of a partial layout, stored in an arena,
//!    with a pure transition function, a frontier ordering, and a dominance
//!    test for pruning.
//! 2. **Search**: best-first driver over states, capped by an expansion limit.
//! 3. **Reconstruct**: replays the winning splits and emits the whitespace.
//!
//! The grammar is never consulted. Which splits exist at a boundary, and
//! what constraints they carry, is decided by the caller's rules.
//!
//! # Modules
//!
//! - [`boundary`]: Tokens, boundaries, and width measurement
//! - [`split`]: Candidate splits and indentation pushes
//! - [`policy`]: Scoped constraints accumulated along a path
//! - [`state`]: Search states, transition, ordering, and dominance
//! - [`search`]: Best-first driver
//! - [`reconstruct`]: Rendering a chosen path
//! - [`emitter`]: Output abstraction for rendered whitespace
//! - [`config`]: Width limit, overflow penalty, and expansion cap

pub mod boundary;
pub mod config;
pub mod emitter;
pub mod error;
pub mod policy;
pub mod reconstruct;
pub mod search;
pub mod split;
pub mod state;

use std::sync::Once;

pub use boundary::{Boundary, Token, TokenMetrics};
pub use config::{Limit, SearchConfig, MAX_EXPANSIONS, MAX_LINE_WIDTH, OVERFLOW_PENALTY};
pub use emitter::{Emitter, StringEmitter};
pub use error::{InvalidInput, Result, SearchError};
pub use policy::{Policy, PolicySummary};
pub use reconstruct::{emit_path, reconstruct, Gap, Reconstruction};
pub use search::{format, search, search_all, Slot, Solution, Termination};
pub use split::{Expiry, IndentPush, OptimalMarker, Side, Split, SplitKind};
pub use state::{ActivePush, Priority, State, StateArena, StateId};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=ori_split=debug` or `RUST_LOG=ori_split=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

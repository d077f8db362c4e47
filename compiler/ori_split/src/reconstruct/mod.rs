//! Path Reconstruction
//!
//! Replays a chosen split sequence over the boundary stream and renders the
//! text that goes between each pair of tokens. Concatenating the first left
//! token, then each gap followed by its right token, yields the formatted
//! output byte-for-byte.

use crate::boundary::Boundary;
use crate::config::Limit;
use crate::emitter::{Emitter, StringEmitter};
use crate::error::{InvalidInput, Result};
use crate::split::{Split, SplitKind};
use crate::state::State;

/// Rendered text between the tokens of one boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gap {
    /// Index of the boundary in the stream.
    pub boundary: usize,
    /// Text inserted between the boundary's left and right token.
    pub text: String,
}

/// Result of replaying a split sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconstruction {
    /// One gap per boundary, in stream order.
    pub gaps: Vec<Gap>,
    /// Realized total cost, overflow penalties included.
    pub cost: u64,
}

impl Reconstruction {
    /// Interleave the gaps with the stream's tokens.
    pub fn render(&self, boundaries: &[Boundary]) -> String {
        let mut emitter = StringEmitter::new();
        if let Some(first) = boundaries.first() {
            emitter.emit(&first.left.text);
        }
        for (boundary, gap) in boundaries.iter().zip(&self.gaps) {
            emitter.emit(&gap.text);
            emitter.emit(&boundary.right.text);
        }
        emitter.output()
    }
}

/// Replay `splits` over `boundaries` and render each gap.
///
/// # Errors
///
/// [`InvalidInput::LengthMismatch`] if there is not exactly one split per
/// boundary, plus any error the transition reports.
pub fn reconstruct(boundaries: &[Boundary], splits: &[Split], limit: Limit) -> Result<Reconstruction> {
    let mut emitter = StringEmitter::new();
    let mut gaps = Vec::with_capacity(boundaries.len());
    let cost = replay(boundaries, splits, limit, |index, _, split, state| {
        emit_split(&mut emitter, split, state);
        gaps.push(Gap {
            boundary: index,
            text: emitter.take(),
        });
    })?;
    Ok(Reconstruction { gaps, cost })
}

/// Replay `splits` over `boundaries`, streaming tokens and whitespace into `emitter`.
///
/// Returns the realized total cost.
///
/// # Errors
///
/// Same as [`reconstruct`].
pub fn emit_path<E: Emitter>(
    boundaries: &[Boundary],
    splits: &[Split],
    limit: Limit,
    emitter: &mut E,
) -> Result<u64> {
    if let Some(first) = boundaries.first() {
        emitter.emit(&first.left.text);
    }
    replay(boundaries, splits, limit, |_, boundary, split, state| {
        emit_split(emitter, split, state);
        emitter.emit(&boundary.right.text);
    })
}

/// Run the transition over the stream, handing each post-transition state
/// to `visit`. Returns the final cost.
fn replay(
    boundaries: &[Boundary],
    splits: &[Split],
    limit: Limit,
    mut visit: impl FnMut(usize, &Boundary, &Split, &State),
) -> Result<u64> {
    if boundaries.len() != splits.len() {
        return Err(InvalidInput::LengthMismatch {
            boundaries: boundaries.len(),
            splits: splits.len(),
        }
        .into());
    }

    let mut state = State::start();
    for (index, (boundary, split)) in boundaries.iter().zip(splits).enumerate() {
        state = state.next(limit, split, boundary)?;
        visit(index, boundary, split, &state);
    }

    tracing::trace!(
        boundaries = boundaries.len(),
        cost = state.cost(),
        "replayed split path"
    );
    Ok(state.cost())
}

/// Render one split. Newlines indent by the state after the split, so
/// pushes opened by the split already apply to the line it starts.
fn emit_split<E: Emitter>(emitter: &mut E, split: &Split, after: &State) {
    match &split.kind {
        SplitKind::Space => emitter.emit_space(),
        SplitKind::Newline {
            blank_line,
            no_indent,
        } => {
            emitter.emit_newline();
            if *blank_line {
                emitter.emit_newline();
            }
            if !*no_indent {
                emitter.emit_indent(after.indentation());
            }
        }
        SplitKind::Nothing => {}
        SplitKind::Literal(text) => emitter.emit(text),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

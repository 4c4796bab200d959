use thiserror::Error;

use crate::{FACELET_COUNT, Face};

/// Error produced by the cube engine.
///
/// None of these are fatal. Whatever input caused them is not applied and
/// the previous consistent state stays authoritative.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Facelet string does not have exactly 54 symbols.
    #[error("facelet state must have {FACELET_COUNT} symbols, not {len}")]
    InvalidStateLength {
        /// Number of symbols in the rejected string.
        len: usize,
    },
    /// Move token starts with a letter other than `U`, `R`, `F`, `D`, `L`, or
    /// `B`.
    #[error("unknown face label {0:?}")]
    UnknownFaceLabel(char),
    /// Move token has a valid face but a malformed suffix, or is empty.
    #[error("invalid move token {0:?}")]
    InvalidMoveToken(String),
    /// Turn requested while another turn is animating.
    #[error("another turn is already in progress")]
    ConcurrentTurnRejected,
    /// Panel offset has two equally dominant axes.
    ///
    /// This should be unreachable once the lattice has settled.
    #[error("panel offset {offset:?} has no unique dominant axis; resolved to {resolved}")]
    DegenerateProjection {
        /// World-space offset of the panel from its piece.
        offset: [f32; 3],
        /// Face chosen by the tie-break.
        resolved: Face,
    },
    /// Trace does not have exactly one more state than there are moves.
    #[error("trace has {trace_len} states but {move_count} moves need {}", move_count + 1)]
    TraceLengthMismatch {
        /// Number of states in the trace.
        trace_len: usize,
        /// Number of moves.
        move_count: usize,
    },
}

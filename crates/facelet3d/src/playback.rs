//! Playing a solver's move list, one settled turn at a time.
//!
//! A solver may also send a trace of the state after every move. The trace
//! is only ever compared against; the geometry stays authoritative.

use web_time::{Duration, Instant};

use crate::{CubeView, EngineError, Move, TurnCompletion};

/// Step at which the geometry-derived state disagreed with the trace.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TraceDivergence {
    /// Index of the move after which the states disagreed.
    pub step: usize,
    /// State from the trace.
    pub expected: String,
    /// State derived from geometry.
    pub actual: String,
}

/// Sequential playback of a move list.
///
/// Each move is started only once the previous one has settled.
#[derive(Debug)]
pub struct Playback {
    moves: Vec<Move>,
    /// `trace[0]` is the state before any move and `trace[i + 1]` the state
    /// after move `i`.
    trace: Option<Vec<String>>,

    /// Index of the next move to start.
    next: usize,
    in_flight: Option<TurnCompletion>,
    divergences: Vec<TraceDivergence>,
}
impl Playback {
    /// Constructs a playback, checking that `trace` (if any) has exactly one
    /// more state than there are moves.
    pub fn new(moves: Vec<Move>, trace: Option<Vec<String>>) -> Result<Self, EngineError> {
        if let Some(trace) = &trace {
            if trace.len() != moves.len() + 1 {
                return Err(EngineError::TraceLengthMismatch {
                    trace_len: trace.len(),
                    move_count: moves.len(),
                });
            }
        }
        Ok(Self {
            moves,
            trace,

            next: 0,
            in_flight: None,
            divergences: vec![],
        })
    }

    /// Constructs a playback from move tokens.
    pub fn parse<S: AsRef<str>>(
        tokens: &[S],
        trace: Option<Vec<String>>,
    ) -> Result<Self, EngineError> {
        let moves = tokens
            .iter()
            .map(|token| token.as_ref().parse())
            .collect::<Result<Vec<Move>, _>>()?;
        Self::new(moves, trace)
    }

    /// Returns the moves.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
    /// Returns the number of moves that have been started.
    pub fn started(&self) -> usize {
        self.next
    }
    /// Returns whether every move has been played and settled.
    pub fn is_finished(&self) -> bool {
        self.next == self.moves.len() && self.in_flight.is_none()
    }
    /// Returns every divergence from the trace found so far.
    pub fn divergences(&self) -> &[TraceDivergence] {
        &self.divergences
    }

    /// Applies the initial state from the trace, if there is one.
    pub fn start(&mut self, view: &mut CubeView) -> Result<(), EngineError> {
        if let Some(initial) = self.trace.as_ref().and_then(|trace| trace.first()) {
            view.apply_full_state(initial)?;
        }
        Ok(())
    }

    /// Does one frame's worth of bookkeeping: checks whether the move in
    /// flight has settled and starts the next one if it has. The view itself
    /// must be advanced separately with [`CubeView::update()`].
    ///
    /// Returns whether the playback is finished.
    pub fn step(&mut self, view: &mut CubeView, now: Instant) -> bool {
        if let Some(completion) = &self.in_flight {
            let Some(actual) = completion.poll() else {
                return false;
            };
            self.in_flight = None;
            self.check_trace(self.next - 1, actual);
        }

        let Some(&mv) = self.moves.get(self.next) else {
            return true;
        };
        // If something else is turning, try again next frame.
        if let Some(completion) = view.play(mv, now) {
            log::debug!("playing move {} of {}: {mv}", self.next + 1, self.moves.len());
            self.in_flight = Some(completion);
            self.next += 1;
        }
        false
    }

    /// Plays every remaining move on a synthetic clock with frames of length
    /// `frame_interval`. Returns the time of the last frame.
    pub fn run(
        &mut self,
        view: &mut CubeView,
        mut now: Instant,
        frame_interval: Duration,
    ) -> Instant {
        while !self.step(view, now) {
            if frame_interval.is_zero() {
                view.finish_turn();
            } else {
                now += frame_interval;
                view.update(now);
            }
        }
        now
    }

    fn check_trace(&mut self, step: usize, actual: String) {
        let Some(expected) = self.trace.as_ref().and_then(|trace| trace.get(step + 1)) else {
            return;
        };
        if *expected != actual {
            log::warn!(
                "state after move {step} diverges from trace: expected {expected}, got {actual}"
            );
            self.divergences.push(TraceDivergence {
                step,
                expected: expected.clone(),
                actual,
            });
        }
    }
}

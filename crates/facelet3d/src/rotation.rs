//! Layer turns and the animation state machine that performs them.
//!
//! A turn never re-parents anything. While a turn is in flight, the pose of
//! each piece in the turning layer is its rest pose composed with the layer
//! rotation. When the animation finishes, that composition is baked back into
//! each piece's rest pose and snapped to the lattice.

use std::fmt;
use std::str::FromStr;

use cgmath::{Deg, Matrix3, Rad};
use web_time::{Duration, Instant};

use crate::interpolate::{self, InterpolateFn};
use crate::{Axis, EngineError, Face, Lattice, LatticeCoord, Orientation, PieceId, Pose, Sign};

/// Default duration of one turn, regardless of its magnitude.
pub const DEFAULT_TWIST_DURATION: Duration = Duration::from_millis(250);

/// Direction and magnitude of a face turn, as seen from outside that face.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    /// Quarter turn clockwise.
    #[default]
    CW90,
    /// Quarter turn counterclockwise.
    CCW90,
    /// Half turn clockwise.
    CW180,
    /// Half turn counterclockwise.
    CCW180,
}
impl TurnDirection {
    /// Returns the notation suffix for this direction.
    pub fn symbol(self) -> &'static str {
        use TurnDirection::*;

        match self {
            CW90 => "",
            CCW90 => "'",
            CW180 => "2",
            CCW180 => "2'",
        }
    }
    /// Returns the reverse direction.
    #[must_use]
    pub fn rev(self) -> Self {
        use TurnDirection::*;

        match self {
            CW90 => CCW90,
            CCW90 => CW90,
            CW180 => CCW180,
            CCW180 => CW180,
        }
    }
    /// Returns the number of clockwise quarter turns (negative for
    /// counterclockwise).
    pub fn clockwise_quarter_turns(self) -> i8 {
        use TurnDirection::*;

        match self {
            CW90 => 1,
            CCW90 => -1,
            CW180 => 2,
            CCW180 => -2,
        }
    }
}

/// Face turn in standard notation, such as `R`, `U'`, or `F2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face whose layer turns.
    pub face: Face,
    /// Direction of the turn, as seen from outside `face`.
    pub direction: TurnDirection,
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.direction.symbol())
    }
}
impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        let c = chars
            .next()
            .ok_or_else(|| EngineError::InvalidMoveToken(s.to_string()))?;
        let face = Face::from_symbol(c).ok_or(EngineError::UnknownFaceLabel(c))?;
        let direction = match chars.as_str() {
            "" => TurnDirection::CW90,
            "'" => TurnDirection::CCW90,
            "2" => TurnDirection::CW180,
            "2'" => TurnDirection::CCW180,
            _ => return Err(EngineError::InvalidMoveToken(s.to_string())),
        };
        Ok(Self { face, direction })
    }
}
impl Move {
    /// Constructs a new move.
    pub fn new(face: Face, direction: TurnDirection) -> Self {
        Self { face, direction }
    }
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            direction: self.direction.rev(),
        }
    }
    /// Returns the layer rotation that performs this move.
    ///
    /// Clockwise as seen from outside a face is a negative angle about that
    /// face's outward normal, so the sign flips for faces on the negative end
    /// of their axis.
    pub fn layer_turn(self) -> LayerTurn {
        LayerTurn {
            axis: self.face.axis(),
            layer: self.face.sign(),
            quarter_turns: -self.face.sign().int() * self.direction.clockwise_quarter_turns(),
        }
    }
}

/// Rotation of one lattice layer about a positive world axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerTurn {
    /// Axis of rotation.
    pub axis: Axis,
    /// Coordinate along `axis` of the pieces that turn.
    pub layer: Sign,
    /// Signed number of quarter turns, counterclockwise about the positive
    /// end of `axis`.
    pub quarter_turns: i8,
}
impl fmt::Display for LayerTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degrees = self.quarter_turns as i32 * 90;
        write!(f, "{}={} {degrees:+}°", self.axis, self.layer.int())
    }
}
impl LayerTurn {
    /// Returns the turn that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            quarter_turns: -self.quarter_turns,
            ..self
        }
    }
    /// Returns the full angle of the turn.
    pub fn angle(self) -> Rad<f32> {
        Rad::from(Deg(90.0 * self.quarter_turns as f32))
    }
    /// Returns the rotation matrix for `progress` (from 0.0 to 1.0) of the
    /// turn.
    pub fn matrix(self, progress: f32) -> Matrix3<f32> {
        Matrix3::from_axis_angle(self.axis.unit_vec3(), self.angle() * progress)
    }
}

/// Phase of the turn state machine.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// No turn in progress.
    #[default]
    Idle,
    /// Collecting the pieces of the turning layer.
    Grouping,
    /// Interpolating the layer rotation over several frames.
    Animating,
    /// Baking the final rotation into the rest poses.
    Settling,
}

/// Turn being animated.
#[derive(Debug, Clone)]
struct ActiveTurn {
    turn: LayerTurn,
    /// Pieces in the turning layer.
    members: Vec<PieceId>,
    /// Time that the animation started.
    start: Instant,
    /// Interpolated progress of the animation, from 0.0 to 1.0.
    progress: f32,
}
impl ActiveTurn {
    fn contains(&self, piece: PieceId) -> bool {
        self.members.contains(&piece)
    }
}

/// State machine that performs one layer turn at a time.
///
/// A turn requested while another is in flight is rejected, not queued.
#[derive(Debug, Clone)]
pub struct RotationEngine {
    phase: TurnPhase,
    active: Option<ActiveTurn>,

    /// Wall-clock duration of each turn.
    duration: Duration,
    /// Easing curve applied to the elapsed fraction of `duration`.
    interpolate: InterpolateFn,
}
impl Default for RotationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TWIST_DURATION, interpolate::QUADRATIC_IN_OUT)
    }
}
impl RotationEngine {
    /// Constructs an idle rotation engine.
    pub fn new(duration: Duration, interpolate: InterpolateFn) -> Self {
        Self {
            phase: TurnPhase::Idle,
            active: None,
            duration,
            interpolate,
        }
    }

    /// Sets the timing used by subsequent turns.
    pub fn set_timing(&mut self, duration: Duration, interpolate: InterpolateFn) {
        self.duration = duration;
        self.interpolate = interpolate;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }
    /// Returns whether no turn is in progress.
    pub fn is_idle(&self) -> bool {
        self.phase == TurnPhase::Idle
    }

    /// Returns the turn currently being animated, along with its interpolated
    /// progress from 0.0 to 1.0.
    pub fn current_turn(&self) -> Option<(LayerTurn, f32)> {
        self.active.as_ref().map(|a| (a.turn, a.progress))
    }

    /// Starts a turn at time `now`.
    ///
    /// Returns [`EngineError::ConcurrentTurnRejected`] without changing
    /// anything if a turn is already in progress.
    pub fn begin(
        &mut self,
        lattice: &Lattice,
        turn: LayerTurn,
        now: Instant,
    ) -> Result<(), EngineError> {
        if !self.is_idle() {
            return Err(EngineError::ConcurrentTurnRejected);
        }

        self.set_phase(TurnPhase::Grouping);
        let members = lattice.layer(turn.axis, turn.layer);
        log::debug!("turning {turn} with {} pieces", members.len());

        self.active = Some(ActiveTurn {
            turn,
            members,
            start: now,
            progress: 0.0,
        });
        self.set_phase(TurnPhase::Animating);
        Ok(())
    }

    /// Steps the animation to time `now`. If the animation has reached its
    /// end, settles the turn into `lattice` and returns it.
    pub fn advance(&mut self, lattice: &mut Lattice, now: Instant) -> Option<LayerTurn> {
        let active = self.active.as_mut()?;
        let t = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(active.start);
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        active.progress = (self.interpolate)(t);
        if t < 1.0 {
            return None;
        }
        self.settle(lattice)
    }

    /// Completes the turn in progress immediately, skipping the rest of its
    /// animation. Returns the turn, or `None` if there was none.
    pub fn finish(&mut self, lattice: &mut Lattice) -> Option<LayerTurn> {
        self.settle(lattice)
    }

    fn settle(&mut self, lattice: &mut Lattice) -> Option<LayerTurn> {
        let active = self.active.take()?;
        self.set_phase(TurnPhase::Settling);

        let rotation = active.turn.matrix(1.0);
        for &id in &active.members {
            let pose = lattice[id].rest_pose().rotated_by(rotation);
            match LatticeCoord::from_vector(pose.position) {
                Some(coord) => lattice.set_rest_pose(id, coord, Orientation::snap(pose.rotation)),
                None => log::error!("{id} settled off the lattice at {:?}", pose.position),
            }
        }
        if !lattice.is_consistent() {
            log::error!("lattice is inconsistent after {}", active.turn);
        }

        self.set_phase(TurnPhase::Idle);
        Some(active.turn)
    }

    /// Returns the current world pose of `piece`, including any in-flight
    /// rotation.
    pub fn pose_of(&self, lattice: &Lattice, piece: PieceId) -> Pose {
        let pose = lattice[piece].rest_pose();
        match &self.active {
            Some(active) if active.contains(piece) => {
                pose.rotated_by(active.turn.matrix(active.progress))
            }
            _ => pose,
        }
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        log::trace!("turn phase {:?} -> {phase:?}", self.phase);
        self.phase = phase;
    }
}

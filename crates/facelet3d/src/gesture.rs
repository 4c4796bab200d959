//! Turning layers and orbiting the camera with a pointer.
//!
//! Input arrives as a stream of [`PointerEvent`]s. The primary button drags
//! a piece to turn its layer; the secondary button orbits the camera.

use cgmath::{InnerSpace, Point2, Vector2, Vector3};

use crate::{
    Axis, CameraBasis, Lattice, LatticeCoord, LayerTurn, OrbitCamera, PieceId, pick_piece,
};

/// Default distance in pixels that the pointer must travel before a drag
/// turns a layer.
pub const DEFAULT_TWIST_DRAG_THRESHOLD: f32 = 30.0;
/// Default camera orbit speed in radians per pixel.
pub const DEFAULT_ORBIT_SENSITIVITY: f32 = 0.01;

/// Pointer button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Button that turns layers (usually the left mouse button).
    Primary,
    /// Button that orbits the camera (usually the right mouse button).
    Secondary,
}

/// Pointer input, in viewport pixels from the top left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Down {
        /// Button that was pressed.
        button: PointerButton,
        /// Pointer position.
        pos: Point2<f32>,
    },
    /// Pointer moved.
    Move {
        /// Pointer position.
        pos: Point2<f32>,
    },
    /// Button released.
    Up {
        /// Button that was released.
        button: PointerButton,
    },
}

/// State of a primary-button drag.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum DragState {
    /// No drag.
    #[default]
    Idle,
    /// Pressed on a piece. Once the pointer has moved far enough to
    /// determine a direction, the drag state will change to
    /// [`DragState::Committed`].
    Tracking {
        /// Piece that was pressed on.
        piece: PieceId,
        /// Pointer position when the button was pressed.
        start: Point2<f32>,
    },
    /// Drag has produced its turn; ignore movement until the button is
    /// released.
    Committed,
}

/// Effect of a pointer event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureAction {
    /// Orbit the camera by a pointer delta in pixels.
    Orbit(Vector2<f32>),
    /// Turn a layer.
    Turn(LayerTurn),
}

/// Everything the gesture interpreter needs to know about the scene.
#[derive(Debug, Copy, Clone)]
pub struct GestureContext<'a> {
    /// Lattice at rest.
    pub lattice: &'a Lattice,
    /// Current camera.
    pub camera: &'a OrbitCamera,
    /// Whether a turn is in flight.
    pub busy: bool,
}

/// State machine that turns pointer events into camera orbits and layer
/// turns.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureInterpreter {
    drag: DragState,
    /// Last pointer position during a secondary-button drag.
    orbit_cursor: Option<Point2<f32>>,
    /// Minimum drag distance in pixels for a turn.
    threshold: f32,
}
impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_TWIST_DRAG_THRESHOLD)
    }
}
impl GestureInterpreter {
    /// Constructs an idle gesture interpreter.
    pub fn new(threshold: f32) -> Self {
        Self {
            drag: DragState::Idle,
            orbit_cursor: None,
            threshold,
        }
    }

    /// Returns the drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }
    /// Returns whether the camera is being orbited.
    pub fn is_orbiting(&self) -> bool {
        self.orbit_cursor.is_some()
    }
    /// Sets the minimum drag distance in pixels for a turn.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Handles a pointer event and returns what should happen as a result.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        ctx: GestureContext<'_>,
    ) -> Option<GestureAction> {
        match event {
            PointerEvent::Down {
                button: PointerButton::Secondary,
                pos,
            } => {
                self.orbit_cursor = Some(pos);
                None
            }

            PointerEvent::Down {
                button: PointerButton::Primary,
                pos,
            } => {
                if ctx.busy {
                    return None;
                }
                let ray = ctx.camera.ray_through(pos);
                if let Some(piece) = pick_piece(ctx.lattice, &ray, |id| ctx.lattice[id].rest_pose())
                {
                    self.set_drag(DragState::Tracking { piece, start: pos });
                }
                None
            }

            PointerEvent::Move { pos } => {
                if let Some(last) = &mut self.orbit_cursor {
                    let delta = pos - *last;
                    *last = pos;
                    return Some(GestureAction::Orbit(delta));
                }

                let DragState::Tracking { piece, start } = self.drag else {
                    return None;
                };
                if ctx.busy {
                    return None;
                }
                let delta = pos - start;
                if delta.magnitude() <= self.threshold {
                    return None;
                }
                self.set_drag(DragState::Committed);
                let turn = infer_turn(delta, &ctx.camera.basis(), ctx.lattice[piece].coord());
                log::debug!("drag on {piece} inferred {turn}");
                Some(GestureAction::Turn(turn))
            }

            PointerEvent::Up {
                button: PointerButton::Secondary,
            } => {
                self.orbit_cursor = None;
                None
            }

            PointerEvent::Up {
                button: PointerButton::Primary,
            } => {
                self.set_drag(DragState::Idle);
                None
            }
        }
    }

    fn set_drag(&mut self, drag: DragState) {
        log::trace!("drag state {:?} -> {drag:?}", self.drag);
        self.drag = drag;
    }
}

/// Infers the layer turn for a drag of `delta` pixels on the piece at
/// `coord`.
///
/// A horizontal drag turns about the world axis that screen-up is most
/// aligned with, and a vertical drag about the one that screen-right is most
/// aligned with. Screen Y points down.
pub fn infer_turn(delta: Vector2<f32>, basis: &CameraBasis, coord: LatticeCoord) -> LayerTurn {
    let (reference, amount) = if delta.x.abs() > delta.y.abs() {
        (basis.up, delta.x)
    } else {
        (basis.right, delta.y)
    };
    let axis = most_aligned_axis(reference);
    let quarter_turns = if amount * axis.component(reference) > 0.0 {
        1
    } else {
        -1
    };
    LayerTurn {
        axis,
        layer: coord[axis],
        quarter_turns,
    }
}

/// Returns the axis with the strictly largest component magnitude, or Z if
/// there is no strict maximum.
fn most_aligned_axis(v: Vector3<f32>) -> Axis {
    let [x, y, z] = [v.x.abs(), v.y.abs(), v.z.abs()];
    if x > y && x > z {
        Axis::X
    } else if y > x && y > z {
        Axis::Y
    } else {
        Axis::Z
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;
    use crate::Sign;

    fn front_camera() -> OrbitCamera {
        let mut camera = OrbitCamera::new(5.0, Deg(75.0), 0.0, 0.0);
        camera.set_target_size([800, 800]);
        camera
    }

    fn down(button: PointerButton, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down {
            button,
            pos: Point2::new(x, y),
        }
    }
    fn move_to(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            pos: Point2::new(x, y),
        }
    }

    #[test]
    fn test_infer_turn_from_front() {
        let basis = front_camera().basis();
        let coord = LatticeCoord([Sign::Pos, Sign::Pos, Sign::Pos]);

        // Dragging right on the top row turns the top layer like U'.
        let turn = infer_turn(Vector2::new(50.0, 5.0), &basis, coord);
        assert_eq!(
            turn,
            LayerTurn {
                axis: Axis::Y,
                layer: Sign::Pos,
                quarter_turns: 1,
            },
        );

        // Dragging down on the right column turns the right layer like R'.
        let turn = infer_turn(Vector2::new(-3.0, 40.0), &basis, coord);
        assert_eq!(
            turn,
            LayerTurn {
                axis: Axis::X,
                layer: Sign::Pos,
                quarter_turns: 1,
            },
        );

        let turn = infer_turn(Vector2::new(0.0, -40.0), &basis, coord);
        assert_eq!(turn.quarter_turns, -1);
    }

    #[test]
    fn test_most_aligned_axis_ties_go_to_z() {
        assert_eq!(most_aligned_axis(Vector3::new(0.9, 0.1, 0.2)), Axis::X);
        assert_eq!(most_aligned_axis(Vector3::new(0.1, -0.9, 0.2)), Axis::Y);
        assert_eq!(most_aligned_axis(Vector3::new(0.5, 0.5, 0.1)), Axis::Z);
    }

    #[test]
    fn test_drag_below_threshold_does_nothing() {
        let lattice = Lattice::new();
        let camera = front_camera();
        let ctx = GestureContext {
            lattice: &lattice,
            camera: &camera,
            busy: false,
        };
        let mut gestures = GestureInterpreter::default();

        assert_eq!(gestures.handle(down(PointerButton::Primary, 400.0, 400.0), ctx), None);
        assert!(matches!(gestures.drag_state(), DragState::Tracking { .. }));
        assert_eq!(gestures.handle(move_to(420.0, 410.0), ctx), None);
        assert!(matches!(gestures.drag_state(), DragState::Tracking { .. }));

        let up = PointerEvent::Up {
            button: PointerButton::Primary,
        };
        assert_eq!(gestures.handle(up, ctx), None);
        assert_eq!(gestures.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_commits_one_turn() {
        let lattice = Lattice::new();
        let camera = front_camera();
        let ctx = GestureContext {
            lattice: &lattice,
            camera: &camera,
            busy: false,
        };
        let mut gestures = GestureInterpreter::default();

        // The center of the viewport is the front center piece.
        gestures.handle(down(PointerButton::Primary, 400.0, 400.0), ctx);
        let action = gestures.handle(move_to(450.0, 400.0), ctx);
        assert_eq!(
            action,
            Some(GestureAction::Turn(LayerTurn {
                axis: Axis::Y,
                layer: Sign::Zero,
                quarter_turns: 1,
            })),
        );
        assert_eq!(gestures.drag_state(), DragState::Committed);
        assert_eq!(gestures.handle(move_to(600.0, 400.0), ctx), None);
    }

    #[test]
    fn test_drag_ignored_while_busy() {
        let lattice = Lattice::new();
        let camera = front_camera();
        let mut ctx = GestureContext {
            lattice: &lattice,
            camera: &camera,
            busy: true,
        };
        let mut gestures = GestureInterpreter::default();

        gestures.handle(down(PointerButton::Primary, 400.0, 400.0), ctx);
        assert_eq!(gestures.drag_state(), DragState::Idle);

        ctx.busy = false;
        gestures.handle(down(PointerButton::Primary, 400.0, 400.0), ctx);
        ctx.busy = true;
        assert_eq!(gestures.handle(move_to(480.0, 400.0), ctx), None);
        ctx.busy = false;
        assert!(gestures.handle(move_to(480.0, 400.0), ctx).is_some());
    }

    #[test]
    fn test_press_on_empty_space_does_not_track() {
        let lattice = Lattice::new();
        let camera = front_camera();
        let ctx = GestureContext {
            lattice: &lattice,
            camera: &camera,
            busy: false,
        };
        let mut gestures = GestureInterpreter::default();
        gestures.handle(down(PointerButton::Primary, 5.0, 5.0), ctx);
        assert_eq!(gestures.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_secondary_drag_orbits() {
        let lattice = Lattice::new();
        let camera = front_camera();
        let ctx = GestureContext {
            lattice: &lattice,
            camera: &camera,
            busy: true,
        };
        let mut gestures = GestureInterpreter::default();

        assert_eq!(gestures.handle(move_to(10.0, 10.0), ctx), None);
        gestures.handle(down(PointerButton::Secondary, 10.0, 10.0), ctx);
        assert!(gestures.is_orbiting());
        assert_eq!(
            gestures.handle(move_to(15.0, 7.0), ctx),
            Some(GestureAction::Orbit(Vector2::new(5.0, -3.0))),
        );
        assert_eq!(
            gestures.handle(move_to(16.0, 7.0), ctx),
            Some(GestureAction::Orbit(Vector2::new(1.0, 0.0))),
        );
        let up = PointerEvent::Up {
            button: PointerButton::Secondary,
        };
        gestures.handle(up, ctx);
        assert!(!gestures.is_orbiting());
    }
}

//! Facade that the surrounding UI talks to.
//!
//! [`CubeView`] owns the lattice and everything that mutates it. It is driven
//! by calling [`CubeView::update()`] once per frame with the current time.

use std::sync::mpsc;

use cgmath::{Deg, Vector3};
use web_time::{Duration, Instant};

use crate::gesture::{DEFAULT_ORBIT_SENSITIVITY, DEFAULT_TWIST_DRAG_THRESHOLD};
use crate::interpolate::{self, InterpolateFn};
use crate::projection::{face_of, rebuild_facelets_at_rest, sync_colors};
use crate::{
    ColorLegend, DEFAULT_CAMERA_DISTANCE, DEFAULT_FOV, DEFAULT_PITCH, DEFAULT_TWIST_DURATION,
    DEFAULT_YAW, EngineError, Face, FaceColorTable, FacePalette, GestureAction, GestureContext,
    GestureInterpreter, Lattice, LayerTurn, Move, OrbitCamera, PanelId, PieceId, PointerEvent,
    Pose, Rgb, RotationEngine, TurnPhase,
};

/// Tunable behavior of a [`CubeView`].
#[derive(Debug, Copy, Clone)]
pub struct ViewSettings {
    /// Duration of each turn.
    pub twist_duration: Duration,
    /// Easing curve for turns.
    pub interpolate: InterpolateFn,
    /// Distance in pixels that a drag must exceed to turn a layer.
    pub twist_drag_threshold: f32,
    /// Camera orbit speed in radians per pixel.
    pub orbit_sensitivity: f32,
    /// Distance from the camera to the center of the cube.
    pub camera_distance: f32,
    /// Vertical field of view.
    pub fov: Deg<f32>,
    /// Initial camera elevation in radians.
    pub initial_pitch: f32,
    /// Initial camera azimuth in radians.
    pub initial_yaw: f32,
    /// Color of each face.
    pub palette: FacePalette,
}
impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            twist_duration: DEFAULT_TWIST_DURATION,
            interpolate: interpolate::QUADRATIC_IN_OUT,
            twist_drag_threshold: DEFAULT_TWIST_DRAG_THRESHOLD,
            orbit_sensitivity: DEFAULT_ORBIT_SENSITIVITY,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            fov: DEFAULT_FOV,
            initial_pitch: DEFAULT_PITCH,
            initial_yaw: DEFAULT_YAW,
            palette: FacePalette::default(),
        }
    }
}

/// Signal that a turn has settled.
///
/// Yields the facelet string derived from geometry once the turn settles.
#[derive(Debug)]
pub struct TurnCompletion(mpsc::Receiver<String>);
impl TurnCompletion {
    /// Returns the settled facelet string, or `None` if the turn is still in
    /// flight.
    ///
    /// The string is only yielded once.
    pub fn poll(&self) -> Option<String> {
        self.0.try_recv().ok()
    }
}

/// Everything needed to draw one panel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanelRenderData {
    /// Panel ID.
    pub panel: PanelId,
    /// Piece that the panel is attached to.
    pub piece: PieceId,
    /// World-space center of the panel.
    pub center: Vector3<f32>,
    /// World-space outward normal of the panel.
    pub normal: Vector3<f32>,
    /// Facelet symbol on the panel.
    pub symbol: char,
    /// Display color of the panel.
    pub color: Rgb,
}

/// Interactive 3D cube synchronized with a facelet string.
#[derive(Debug)]
pub struct CubeView {
    lattice: Lattice,
    engine: RotationEngine,
    camera: OrbitCamera,
    gestures: GestureInterpreter,

    palette: FacePalette,
    legend: ColorLegend,
    orbit_sensitivity: f32,

    /// Notified when the turn in flight settles.
    completion: Option<mpsc::Sender<String>>,
}
impl Default for CubeView {
    fn default() -> Self {
        Self::new(&ViewSettings::default())
    }
}
impl CubeView {
    /// Constructs a solved cube.
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            lattice: Lattice::new(),
            engine: RotationEngine::new(settings.twist_duration, settings.interpolate),
            camera: OrbitCamera::new(
                settings.camera_distance,
                settings.fov,
                settings.initial_pitch,
                settings.initial_yaw,
            ),
            gestures: GestureInterpreter::new(settings.twist_drag_threshold),

            palette: settings.palette,
            legend: ColorLegend::default(),
            orbit_sensitivity: settings.orbit_sensitivity,

            completion: None,
        }
    }

    /// Applies new settings. The camera angles and the cube state are kept.
    pub fn apply_settings(&mut self, settings: &ViewSettings) {
        self.engine
            .set_timing(settings.twist_duration, settings.interpolate);
        self.gestures.set_threshold(settings.twist_drag_threshold);
        self.orbit_sensitivity = settings.orbit_sensitivity;
        self.camera.distance = settings.camera_distance;
        self.camera.fov = settings.fov;
        self.palette = settings.palette;
    }

    /// Returns the lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
    /// Returns the camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
    /// Returns the camera.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }
    /// Returns the pointer gesture state.
    pub fn gestures(&self) -> &GestureInterpreter {
        &self.gestures
    }
    /// Returns the face colors.
    pub fn palette(&self) -> &FacePalette {
        &self.palette
    }
    /// Returns the symbol-to-face legend.
    pub fn legend(&self) -> &ColorLegend {
        &self.legend
    }

    /// Returns the phase of the turn state machine.
    pub fn phase(&self) -> TurnPhase {
        self.engine.phase()
    }
    /// Returns whether no turn is in flight.
    pub fn is_idle(&self) -> bool {
        self.engine.is_idle()
    }
    /// Returns the turn in flight and its interpolated progress.
    pub fn current_turn(&self) -> Option<(LayerTurn, f32)> {
        self.engine.current_turn()
    }

    /// Resets the geometry and repaints every panel from `facelets`, with no
    /// animation.
    ///
    /// Invalid input and requests made while a turn is in flight leave the
    /// cube unchanged.
    pub fn apply_full_state(&mut self, facelets: &str) -> Result<(), EngineError> {
        if !self.is_idle() {
            log::debug!("refusing to apply full state while turning");
            return Err(EngineError::ConcurrentTurnRejected);
        }
        let table = FaceColorTable::decode(facelets).inspect_err(|e| log::warn!("{e}"))?;
        self.lattice.reset_geometry();
        self.lattice.place_colors(&table);
        self.legend = ColorLegend::from_centers(&table);
        Ok(())
    }

    /// Repaints every panel from `facelets` according to where it is now,
    /// without moving anything.
    pub fn sync_colors(&mut self, facelets: &str) -> Result<(), EngineError> {
        if !self.is_idle() {
            log::debug!("refusing to sync colors while turning");
            return Err(EngineError::ConcurrentTurnRejected);
        }
        let table = FaceColorTable::decode(facelets).inspect_err(|e| log::warn!("{e}"))?;
        sync_colors(&mut self.lattice, &table);
        Ok(())
    }

    /// Starts animating a move given in standard notation.
    ///
    /// Returns `Ok(None)` if the move was dropped because another turn is in
    /// flight.
    pub fn play_move(
        &mut self,
        token: &str,
        now: Instant,
    ) -> Result<Option<TurnCompletion>, EngineError> {
        let mv = token.parse::<Move>().inspect_err(|e| log::warn!("{e}"))?;
        Ok(self.play(mv, now))
    }

    /// Starts animating a move. Returns `None` if the move was dropped
    /// because another turn is in flight.
    pub fn play(&mut self, mv: Move, now: Instant) -> Option<TurnCompletion> {
        self.turn_layer(mv.layer_turn(), now)
    }

    /// Starts animating a layer turn. Returns `None` if the turn was dropped
    /// because another turn is in flight.
    pub fn turn_layer(&mut self, turn: LayerTurn, now: Instant) -> Option<TurnCompletion> {
        if let Err(e) = self.engine.begin(&self.lattice, turn, now) {
            log::debug!("dropped {turn}: {e}");
            return None;
        }
        let (tx, rx) = mpsc::channel();
        self.completion = Some(tx);
        Some(TurnCompletion(rx))
    }

    /// Returns the facelet string derived from the geometry at rest.
    ///
    /// While a turn is in flight, this is the state before that turn.
    pub fn current_facelet_string(&self) -> String {
        rebuild_facelets_at_rest(&self.lattice)
    }

    /// Overrides the colors of some faces. The geometry is not touched.
    pub fn set_face_color_palette(&mut self, colors: impl IntoIterator<Item = (Face, Rgb)>) {
        self.palette.merge(colors);
    }

    /// Updates the viewport size. Zero-sized viewports are ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        self.camera.set_target_size([width, height])
    }

    /// Advances the turn in flight to time `now`. Returns whether anything
    /// moved.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.is_idle() {
            return false;
        }
        if let Some(turn) = self.engine.advance(&mut self.lattice, now) {
            self.on_settled(turn);
        }
        true
    }

    /// Completes the turn in flight immediately. Returns the turn, or `None`
    /// if there was none.
    pub fn finish_turn(&mut self) -> Option<LayerTurn> {
        let turn = self.engine.finish(&mut self.lattice)?;
        self.on_settled(turn);
        Some(turn)
    }

    /// Steps frames of length `frame_interval` starting after `now` until no
    /// turn is in flight. Returns the time of the last frame.
    pub fn run_until_idle(&mut self, mut now: Instant, frame_interval: Duration) -> Instant {
        if frame_interval.is_zero() {
            self.finish_turn();
            return now;
        }
        while !self.is_idle() {
            now += frame_interval;
            self.update(now);
        }
        now
    }

    fn on_settled(&mut self, turn: LayerTurn) {
        let facelets = self.current_facelet_string();
        log::debug!("settled {turn}: {facelets}");
        if let Some(tx) = self.completion.take() {
            // Nobody may be waiting anymore.
            let _ = tx.send(facelets);
        }
    }

    /// Handles a pointer event at time `now`. Returns whether the scene needs
    /// to be redrawn.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> bool {
        let ctx = GestureContext {
            lattice: &self.lattice,
            camera: &self.camera,
            busy: !self.engine.is_idle(),
        };
        match self.gestures.handle(event, ctx) {
            Some(GestureAction::Orbit(delta)) => {
                self.camera
                    .orbit(delta.x, delta.y, self.orbit_sensitivity);
                true
            }
            Some(GestureAction::Turn(turn)) => self.turn_layer(turn, now).is_some(),
            None => false,
        }
    }

    /// Returns the current world pose of every piece, indexed by
    /// [`PieceId`].
    pub fn piece_poses(&self) -> Vec<Pose> {
        self.lattice
            .piece_ids()
            .map(|id| self.engine.pose_of(&self.lattice, id))
            .collect()
    }

    /// Returns what a renderer needs to draw every panel, including any
    /// in-flight rotation.
    pub fn render_data(&self) -> Vec<PanelRenderData> {
        let poses = self.piece_poses();
        self.lattice
            .panel_ids()
            .map(|id| {
                let panel = &self.lattice[id];
                let pose = poses[panel.piece().0 as usize];
                let offset = pose.rotation * panel.local_offset();
                PanelRenderData {
                    panel: id,
                    piece: panel.piece(),
                    center: pose.position + offset,
                    normal: pose.rotation * panel.home_face().vector(),
                    symbol: panel.symbol(),
                    color: self.legend.color_of(panel.symbol(), &self.palette),
                }
            })
            .collect()
    }

    /// Returns the face that each panel is on right now, indexed by
    /// [`PanelId`].
    pub fn panel_faces(&self) -> Vec<Face> {
        let poses = self.piece_poses();
        self.lattice
            .panel_ids()
            .map(|id| face_of(&self.lattice, id, poses[self.lattice[id].piece().0 as usize]))
            .collect()
    }
}

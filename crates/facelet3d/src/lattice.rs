//! Registry of the 27 pieces and their panels.

use std::fmt;
use std::ops::{Index, IndexMut};

use cgmath::{Matrix3, Vector3};
use itertools::Itertools;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::{Axis, Face, FaceColorTable, Orientation, Sign, facelet_index};

/// Number of pieces on the lattice, including the hidden core.
pub const PIECE_COUNT: usize = 27;
/// Number of panels on the lattice.
pub const PANEL_COUNT: usize = 54;

/// Distance from a piece center to the center of each of its panels.
pub const PANEL_OFFSET: f32 = 0.51;
/// Edge length of a piece box.
pub const PIECE_SIZE: f32 = 0.92;

/// Piece ID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece #{}", self.0)
    }
}

/// Panel (sticker) ID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u8);

/// Integer position of a piece, with each component in `-1..=1`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeCoord(pub [Sign; 3]);
impl Index<Axis> for LatticeCoord {
    type Output = Sign;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis.index()]
    }
}
impl IndexMut<Axis> for LatticeCoord {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        &mut self.0[axis.index()]
    }
}
impl fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0.map(Sign::int);
        write!(f, "({x}, {y}, {z})")
    }
}
impl LatticeCoord {
    /// Position of the hidden core piece.
    pub const CORE: Self = Self([Sign::Zero; 3]);

    /// Returns all 27 coordinates in ascending X, then Y, then Z order (Z
    /// varies fastest).
    pub fn iter() -> impl Iterator<Item = Self> {
        itertools::iproduct!(Sign::iter(), Sign::iter(), Sign::iter())
            .map(|(x, y, z)| Self([x, y, z]))
    }

    /// Rounds a world-space position to the nearest lattice coordinate, or
    /// returns `None` if it is off the lattice.
    pub fn from_vector(v: Vector3<f32>) -> Option<Self> {
        Some(Self([
            Sign::from_coordinate(v.x)?,
            Sign::from_coordinate(v.y)?,
            Sign::from_coordinate(v.z)?,
        ]))
    }

    /// Returns the world-space center of a piece at this coordinate.
    pub fn vector(self) -> Vector3<f32> {
        let [x, y, z] = self.0.map(Sign::float);
        Vector3::new(x, y, z)
    }

    /// Returns the faces of the cube that a piece at this coordinate touches.
    pub fn exposed_faces(self) -> impl Iterator<Item = Face> {
        Axis::iter()
            .filter(move |&axis| !self[axis].is_zero())
            .map(move |axis| Face::new(axis, self[axis]))
    }
}

/// World-space placement of a piece.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    /// Center of the piece.
    pub position: Vector3<f32>,
    /// Rotation from piece-local space to world space.
    pub rotation: Matrix3<f32>,
}
impl Pose {
    /// Returns the pose after rotating the whole piece about the origin.
    #[must_use]
    pub fn rotated_by(self, m: Matrix3<f32>) -> Self {
        Self {
            position: m * self.position,
            rotation: m * self.rotation,
        }
    }
}

/// One of the 27 rigid pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    home: LatticeCoord,
    coord: LatticeCoord,
    orientation: Orientation,
    panels: SmallVec<[PanelId; 3]>,
}
impl Piece {
    /// Returns the coordinate that the piece occupies in the home
    /// arrangement. This also identifies the piece.
    pub fn home(&self) -> LatticeCoord {
        self.home
    }
    /// Returns the coordinate that the piece occupies when at rest.
    pub fn coord(&self) -> LatticeCoord {
        self.coord
    }
    /// Returns the orientation of the piece when at rest.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
    /// Returns the panels attached to the piece.
    pub fn panels(&self) -> &[PanelId] {
        &self.panels
    }
    /// Returns the pose of the piece when at rest.
    pub fn rest_pose(&self) -> Pose {
        Pose {
            position: self.coord.vector(),
            rotation: self.orientation.matrix(),
        }
    }
}

/// Colored panel attached to one piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    piece: PieceId,
    home_face: Face,
    home_index: usize,
    symbol: char,
}
impl Panel {
    /// Returns the piece that the panel is attached to.
    pub fn piece(&self) -> PieceId {
        self.piece
    }
    /// Returns the face that the panel is on in the home arrangement.
    ///
    /// This says nothing about where the panel is now. Use
    /// [`crate::projection`] for that.
    pub fn home_face(&self) -> Face {
        self.home_face
    }
    /// Returns the index within [`Self::home_face()`] that the panel occupies
    /// in the home arrangement.
    pub fn home_index(&self) -> usize {
        self.home_index
    }
    /// Returns the panel's offset from its piece center, in piece-local
    /// space.
    pub fn local_offset(&self) -> Vector3<f32> {
        self.home_face.vector() * PANEL_OFFSET
    }
    /// Returns the facelet symbol painted on the panel.
    pub fn symbol(&self) -> char {
        self.symbol
    }
}

/// The 27-piece lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    pieces: Vec<Piece>,
    panels: Vec<Panel>,
}
impl Default for Lattice {
    fn default() -> Self {
        Self::new()
    }
}
impl Index<PieceId> for Lattice {
    type Output = Piece;

    fn index(&self, id: PieceId) -> &Self::Output {
        &self.pieces[id.0 as usize]
    }
}
impl Index<PanelId> for Lattice {
    type Output = Panel;

    fn index(&self, id: PanelId) -> &Self::Output {
        &self.panels[id.0 as usize]
    }
}
impl Lattice {
    /// Constructs the lattice in the home arrangement, with every panel
    /// labeled by its home face.
    pub fn new() -> Self {
        let mut pieces = Vec::with_capacity(PIECE_COUNT);
        let mut panels = Vec::with_capacity(PANEL_COUNT);

        // Piece IDs follow this enumeration order.
        for home in LatticeCoord::iter() {
            let piece = PieceId(pieces.len() as u8);
            let mut piece_panels = SmallVec::new();
            for face in [Face::U, Face::D, Face::F, Face::B, Face::R, Face::L] {
                if home[face.axis()] == face.sign() {
                    piece_panels.push(PanelId(panels.len() as u8));
                    panels.push(Panel {
                        piece,
                        home_face: face,
                        home_index: facelet_index(face, home),
                        symbol: face.symbol(),
                    });
                }
            }
            pieces.push(Piece {
                home,
                coord: home,
                orientation: Orientation::IDENTITY,
                panels: piece_panels,
            });
        }

        debug_assert_eq!(pieces.len(), PIECE_COUNT);
        debug_assert_eq!(panels.len(), PANEL_COUNT);

        Self { pieces, panels }
    }

    /// Returns all pieces, indexed by [`PieceId`].
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
    /// Returns all panels, indexed by [`PanelId`].
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
    /// Returns an iterator over all piece IDs.
    pub fn piece_ids(&self) -> impl Iterator<Item = PieceId> + use<> {
        (0..PIECE_COUNT as u8).map(PieceId)
    }
    /// Returns an iterator over all panel IDs.
    pub fn panel_ids(&self) -> impl Iterator<Item = PanelId> + use<> {
        (0..PANEL_COUNT as u8).map(PanelId)
    }

    /// Moves every piece back to its home coordinate with identity
    /// orientation.
    ///
    /// Panel symbols are left alone.
    pub fn reset_geometry(&mut self) {
        for piece in &mut self.pieces {
            piece.coord = piece.home;
            piece.orientation = Orientation::IDENTITY;
        }
    }

    /// Paints every panel from `table` using its home face and index.
    ///
    /// This is only meaningful right after [`Self::reset_geometry()`], when
    /// every panel sits at its home position.
    pub fn place_colors(&mut self, table: &FaceColorTable) {
        debug_assert!(self.is_home_arrangement(), "place_colors() without reset");
        for panel in &mut self.panels {
            panel.symbol = table[panel.home_face][panel.home_index];
        }
    }

    /// Sets the symbol on one panel.
    pub(crate) fn set_symbol(&mut self, panel: PanelId, symbol: char) {
        self.panels[panel.0 as usize].symbol = symbol;
    }

    /// Records a new rest pose for a piece.
    pub(crate) fn set_rest_pose(
        &mut self,
        piece: PieceId,
        coord: LatticeCoord,
        orientation: Orientation,
    ) {
        let piece = &mut self.pieces[piece.0 as usize];
        piece.coord = coord;
        piece.orientation = orientation;
    }

    /// Returns the pieces whose coordinate along `axis` is `layer`.
    pub fn layer(&self, axis: Axis, layer: Sign) -> Vec<PieceId> {
        self.piece_ids()
            .filter(|&id| self[id].coord[axis] == layer)
            .collect()
    }

    /// Returns the piece at rest at `coord`.
    pub fn piece_at(&self, coord: LatticeCoord) -> Option<PieceId> {
        self.piece_ids().find(|&id| self[id].coord == coord)
    }

    /// Returns whether every piece is at its home coordinate with identity
    /// orientation.
    pub fn is_home_arrangement(&self) -> bool {
        self.pieces
            .iter()
            .all(|p| p.coord == p.home && p.orientation == Orientation::IDENTITY)
    }

    /// Returns whether the rest poses satisfy the lattice invariant: all 27
    /// coordinates distinct and every orientation a proper axis-aligned
    /// rotation.
    pub fn is_consistent(&self) -> bool {
        self.pieces.iter().map(|p| p.coord).all_unique()
            && self
                .pieces
                .iter()
                .all(|p| p.orientation.is_proper_rotation())
    }

    /// Returns the rest pose of every piece, for comparing geometry between
    /// two points in time.
    pub fn rest_poses(&self) -> Vec<(LatticeCoord, Orientation)> {
        self.pieces
            .iter()
            .map(|p| (p.coord, p.orientation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_lattice_structure() {
        let lattice = Lattice::new();
        assert_eq!(lattice.pieces().len(), PIECE_COUNT);
        assert_eq!(lattice.panels().len(), PANEL_COUNT);
        assert!(lattice.is_home_arrangement());
        assert!(lattice.is_consistent());

        let core = lattice.piece_at(LatticeCoord::CORE).unwrap();
        assert_eq!(core, PieceId(13));
        assert!(lattice[core].panels().is_empty());

        let mut counts = [0; 4];
        for piece in lattice.pieces() {
            assert_eq!(piece.panels().len(), piece.home().exposed_faces().count());
            counts[piece.panels().len()] += 1;
        }
        // core, centers, edges, corners
        assert_eq!(counts, [1, 6, 12, 8]);
    }

    #[test]
    fn test_every_facelet_has_exactly_one_panel() {
        let lattice = Lattice::new();
        let mut seen = [[false; 9]; Face::COUNT];
        for panel in lattice.panels() {
            let slot = &mut seen[panel.home_face().index()][panel.home_index()];
            assert!(!*slot);
            *slot = true;
        }
        assert!(seen.iter().flatten().all(|&b| b));
    }

    #[test]
    fn test_layer_selection() {
        let lattice = Lattice::new();
        for axis in Axis::iter() {
            for layer in Sign::iter() {
                assert_eq!(lattice.layer(axis, layer).len(), 9);
            }
        }
    }

    #[test]
    fn test_enumeration_order() {
        let coords: Vec<_> = LatticeCoord::iter().take(3).collect();
        use Sign::*;
        assert_eq!(
            coords,
            [
                LatticeCoord([Neg, Neg, Neg]),
                LatticeCoord([Neg, Neg, Zero]),
                LatticeCoord([Neg, Neg, Pos]),
            ],
        );
    }
}

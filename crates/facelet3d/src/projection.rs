//! Recovering the facelet string from live geometry.
//!
//! A panel's face is always recomputed from where it is right now, never
//! taken from its construction-time label. Nothing here is cached.

use cgmath::Vector3;
use strum::IntoEnumIterator;

use crate::{
    Axis, EngineError, FACELET_COUNT, FACELETS_PER_FACE, Face, FaceColorTable, Lattice,
    LatticeCoord, PanelId, PieceId, Pose, Sign, facelet_index,
};

/// Returns the face whose outward normal is closest to `v`, and whether the
/// choice was a tie between two or more axes.
///
/// Ties prefer X over Y and Y over Z.
pub(crate) fn dominant_face(v: Vector3<f32>) -> (Face, bool) {
    let [ax, ay, az] = [v.x.abs(), v.y.abs(), v.z.abs()];
    let axis = if ax >= ay && ax >= az {
        Axis::X
    } else if ay >= az {
        Axis::Y
    } else {
        Axis::Z
    };
    let max = axis.component(v).abs();
    let is_tie = [ax, ay, az].into_iter().filter(|&a| a == max).count() > 1;
    let sign = if axis.component(v) > 0.0 {
        Sign::Pos
    } else {
        Sign::Neg
    };
    (Face::new(axis, sign), is_tie)
}

/// Returns the face that a panel at world-space `offset` from its piece
/// center is on, or [`EngineError::DegenerateProjection`] if two axes are
/// equally dominant.
pub fn try_face_of_offset(offset: Vector3<f32>) -> Result<Face, EngineError> {
    match dominant_face(offset) {
        (face, false) => Ok(face),
        (resolved, true) => Err(EngineError::DegenerateProjection {
            offset: offset.into(),
            resolved,
        }),
    }
}

/// Returns the face that a panel at world-space `offset` from its piece
/// center is on.
///
/// Degenerate offsets are logged and resolved by the fixed tie-break.
pub fn face_of_offset(offset: Vector3<f32>) -> Face {
    try_face_of_offset(offset).unwrap_or_else(|e| {
        log::warn!("{e}");
        dominant_face(offset).0
    })
}

/// Returns the face that `panel` is currently on, given the pose of its
/// piece.
pub fn face_of(lattice: &Lattice, panel: PanelId, piece_pose: Pose) -> Face {
    face_of_offset(piece_pose.rotation * lattice[panel].local_offset())
}

/// Returns the row and column on `face` of the facelet belonging to the piece
/// at `coord`.
pub fn coords_of(face: Face, coord: LatticeCoord) -> (usize, usize) {
    crate::facelet_coords(face, coord)
}

/// Returns which panel currently occupies each of the 54 facelet slots.
///
/// `pose_of` gives the world pose of each piece, which may include an
/// in-flight rotation. Slots that no panel projects to are `None`.
pub fn facelet_layout(
    lattice: &Lattice,
    pose_of: impl Fn(PieceId) -> Pose,
) -> [Option<PanelId>; FACELET_COUNT] {
    let mut layout = [None; FACELET_COUNT];
    for panel in lattice.panel_ids() {
        let pose = pose_of(lattice[panel].piece());
        let face = face_of(lattice, panel, pose);
        let Some(coord) = LatticeCoord::from_vector(pose.position) else {
            log::error!(
                "{} is off the lattice at {:?}",
                lattice[panel].piece(),
                pose.position,
            );
            continue;
        };
        let slot = face.index() * FACELETS_PER_FACE + facelet_index(face, coord);
        if let Some(other) = layout[slot].replace(panel) {
            log::warn!("panels {other:?} and {panel:?} both project to facelet {slot}");
        }
    }
    layout
}

/// Rebuilds the facelet string from geometry.
///
/// Empty slots, which a structurally valid lattice never has, fall back to
/// the label of the face they are on.
pub fn rebuild_facelets(lattice: &Lattice, pose_of: impl Fn(PieceId) -> Pose) -> String {
    let layout = facelet_layout(lattice, pose_of);
    Face::iter()
        .flat_map(|face| std::iter::repeat_n(face, FACELETS_PER_FACE))
        .zip(layout)
        .map(|(face, panel)| panel.map_or(face.symbol(), |p| lattice[p].symbol()))
        .collect()
}

/// Rebuilds the facelet string from the rest poses of all pieces.
pub fn rebuild_facelets_at_rest(lattice: &Lattice) -> String {
    rebuild_facelets(lattice, |id| lattice[id].rest_pose())
}

/// Repaints panels from `table` according to where they are now, without
/// moving any geometry.
pub fn sync_colors(lattice: &mut Lattice, table: &FaceColorTable) {
    let layout = facelet_layout(lattice, |id| lattice[id].rest_pose());
    for (face, slots) in Face::iter().zip(layout.chunks_exact(FACELETS_PER_FACE)) {
        for (index, panel) in slots.iter().enumerate() {
            if let Some(panel) = *panel {
                lattice.set_symbol(panel, table[face][index]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::SOLVED_STATE;

    #[test]
    fn test_face_of_offset_axes() {
        assert_eq!(face_of_offset(Vector3::new(0.51, 0.0, 0.0)), Face::R);
        assert_eq!(face_of_offset(Vector3::new(0.0, -0.51, 0.01)), Face::D);
        assert_eq!(face_of_offset(Vector3::new(0.1, 0.2, -0.5)), Face::B);
    }

    #[test]
    fn test_degenerate_projection_tie_break() {
        let v = Vector3::new(0.3, -0.3, 0.1);
        assert_eq!(
            try_face_of_offset(v),
            Err(EngineError::DegenerateProjection {
                offset: [0.3, -0.3, 0.1],
                resolved: Face::R,
            }),
        );
        assert_eq!(face_of_offset(v), Face::R);
        assert_eq!(face_of_offset(Vector3::new(0.0, -0.3, 0.3)), Face::D);
    }

    #[test]
    fn test_home_lattice_projects_to_solved() {
        let lattice = Lattice::new();
        assert_eq!(rebuild_facelets_at_rest(&lattice), SOLVED_STATE);
        let layout = facelet_layout(&lattice, |id| lattice[id].rest_pose());
        assert!(layout.iter().all(Option::is_some));
    }

    #[test]
    fn test_place_then_project_roundtrip() {
        let state: String = (0..FACELET_COUNT)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let mut lattice = Lattice::new();
        lattice.place_colors(&FaceColorTable::decode(&state).unwrap());
        assert_eq!(rebuild_facelets_at_rest(&lattice), state);
    }

    #[test]
    fn test_sync_colors_at_home_matches_place_colors() {
        let table = FaceColorTable::decode(
            "DRLUUBFBRBLURRLRUBLRDDFDLFUFUFFDBRDUBRUFLLFDDBFLUBLRBD",
        )
        .unwrap();
        let mut placed = Lattice::new();
        placed.place_colors(&table);
        let mut synced = Lattice::new();
        sync_colors(&mut synced, &table);
        assert_eq!(placed, synced);
    }
}

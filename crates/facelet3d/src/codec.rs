//! Conversion between facelet strings and per-face color tables.
//!
//! A facelet string has 54 symbols: six blocks of nine, one per face in the
//! order `U`, `R`, `F`, `D`, `L`, `B`. Within a block, symbol `row * 3 + col`
//! is at the row and column given by [`facelet_coords()`].

use std::fmt;
use std::ops::{Index, IndexMut};

use strum::IntoEnumIterator;

use crate::{Axis, EngineError, Face, LatticeCoord};

/// Number of symbols in a facelet string.
pub const FACELET_COUNT: usize = 54;
/// Number of facelets on each face.
pub const FACELETS_PER_FACE: usize = 9;

/// Facelet string of the solved cube, using face labels as symbols.
pub const SOLVED_STATE: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// Symbols on each face, indexed by `row * 3 + col`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceColorTable([[char; FACELETS_PER_FACE]; Face::COUNT]);
impl Default for FaceColorTable {
    fn default() -> Self {
        Self::solved()
    }
}
impl Index<Face> for FaceColorTable {
    type Output = [char; FACELETS_PER_FACE];

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face.index()]
    }
}
impl IndexMut<Face> for FaceColorTable {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face.index()]
    }
}
impl fmt::Display for FaceColorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().flatten().try_for_each(|c| write!(f, "{c}"))
    }
}
impl FaceColorTable {
    /// Returns the table of the solved cube, where every facelet is labeled
    /// by its face.
    pub fn solved() -> Self {
        let mut ret = Self([['?'; FACELETS_PER_FACE]; Face::COUNT]);
        for face in Face::iter() {
            ret[face] = [face.symbol(); FACELETS_PER_FACE];
        }
        ret
    }

    /// Splits a facelet string into per-face symbol lists.
    ///
    /// Length is counted in symbols (`char`s), not bytes.
    pub fn decode(state: &str) -> Result<Self, EngineError> {
        let len = state.chars().count();
        if len != FACELET_COUNT {
            return Err(EngineError::InvalidStateLength { len });
        }
        let mut ret = Self::solved();
        for (i, c) in state.chars().enumerate() {
            ret.0[i / FACELETS_PER_FACE][i % FACELETS_PER_FACE] = c;
        }
        Ok(ret)
    }

    /// Joins the per-face symbol lists back into a facelet string.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Returns the symbol at the center of `face`.
    pub fn center(&self, face: Face) -> char {
        self[face][FACELETS_PER_FACE / 2]
    }
}

/// Returns the row and column of the facelet on `face` belonging to the piece
/// at `coord`.
///
/// Row 0 is the top edge of the face as drawn in the flat net. These formulas
/// are used both to place panels and to project them back, so they must stay
/// in one place.
pub fn facelet_coords(face: Face, coord: LatticeCoord) -> (usize, usize) {
    let [x, y, z] = [Axis::X, Axis::Y, Axis::Z].map(|axis| coord[axis].int());
    let (row, col) = match face {
        Face::U => (1 - z, x + 1),
        Face::D => (z + 1, x + 1),
        Face::F => (1 - y, x + 1),
        Face::B => (1 - y, 1 - x),
        Face::R => (1 - y, 1 - z),
        Face::L => (1 - y, z + 1),
    };
    (row as usize, col as usize)
}

/// Returns the index into a face's 9-symbol block of the facelet on `face`
/// belonging to the piece at `coord`.
pub fn facelet_index(face: Face, coord: LatticeCoord) -> usize {
    let (row, col) = facelet_coords(face, coord);
    row * 3 + col
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Sign;

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            FaceColorTable::decode("short"),
            Err(EngineError::InvalidStateLength { len: 5 }),
        );
        let long = format!("{SOLVED_STATE}U");
        assert_eq!(
            FaceColorTable::decode(&long),
            Err(EngineError::InvalidStateLength { len: 55 }),
        );
    }

    #[test]
    fn test_decode_groups_by_face() {
        let state: String = (0..FACELET_COUNT)
            .map(|i| char::from(b'0' + (i % 10) as u8))
            .collect();
        let table = FaceColorTable::decode(&state).unwrap();
        assert_eq!(table[Face::U], ['0', '1', '2', '3', '4', '5', '6', '7', '8']);
        assert_eq!(table[Face::R][0], '9');
        assert_eq!(table[Face::B][8], '3');
        assert_eq!(table.encode(), state);
    }

    #[test]
    fn test_decode_counts_chars_not_bytes() {
        let state: String = std::iter::repeat_n('é', FACELET_COUNT).collect();
        let table = FaceColorTable::decode(&state).unwrap();
        assert_eq!(table.center(Face::L), 'é');
    }

    #[test]
    fn test_facelet_coords_corners() {
        use Sign::*;

        // U is drawn with its top row against F, and D with its top row
        // against B.
        assert_eq!(facelet_coords(Face::U, LatticeCoord([Neg, Pos, Pos])), (0, 0));
        assert_eq!(facelet_coords(Face::U, LatticeCoord([Pos, Pos, Neg])), (2, 2));
        assert_eq!(facelet_coords(Face::D, LatticeCoord([Neg, Neg, Neg])), (0, 0));
        // R1 touches U and F.
        assert_eq!(facelet_coords(Face::R, LatticeCoord([Pos, Pos, Pos])), (0, 0));
        // B1 touches U and R.
        assert_eq!(facelet_coords(Face::B, LatticeCoord([Pos, Pos, Neg])), (0, 0));
        // L1 touches U and B.
        assert_eq!(facelet_coords(Face::L, LatticeCoord([Neg, Pos, Neg])), (0, 0));
        // Centers.
        for face in Face::iter() {
            let mut coord = LatticeCoord::CORE;
            coord[face.axis()] = face.sign();
            assert_eq!(facelet_index(face, coord), 4);
        }
    }
}

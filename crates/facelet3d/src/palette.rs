//! Face colors and the mapping from facelet symbols to faces.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::de::Error;
use strum::IntoEnumIterator;

use crate::{Face, FaceColorTable};

/// 8-bit sRGB color that serializes to a string like `"#ff00ff"`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// sRGB component values.
    pub rgb: [u8; 3],
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode(self.rgb))
    }
}
impl FromStr for Rgb {
    type Err = hex::FromHexError;

    /// Parses a color like `#ff00ff`, `#f0f`, or `0xff00ff`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut rgb = [0_u8; 3];
        match s.len() {
            3 => {
                let s = &s.chars().flat_map(|c| [c, c]).collect::<String>();
                hex::decode_to_slice(s, &mut rgb)?;
            }
            _ => hex::decode_to_slice(s, &mut rgb)?,
        }
        Ok(Rgb { rgb })
    }
}
impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>().map_err(D::Error::custom)
    }
}
impl Rgb {
    /// Color of a facelet whose symbol doesn't belong to any face.
    pub const UNKNOWN: Rgb = Rgb::from_u32(0x808080);

    /// Constructs a color from a number like `0xff00ff`.
    pub const fn from_u32(value: u32) -> Self {
        let [_, r, g, b] = value.to_be_bytes();
        Rgb { rgb: [r, g, b] }
    }
}

/// Color of each face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FacePalette([Rgb; Face::COUNT]);
impl Default for FacePalette {
    fn default() -> Self {
        Self([
            Rgb::from_u32(0xf8fafc), // U
            Rgb::from_u32(0xef4444), // R
            Rgb::from_u32(0x22c55e), // F
            Rgb::from_u32(0xfacc15), // D
            Rgb::from_u32(0xfb923c), // L
            Rgb::from_u32(0x3b82f6), // B
        ])
    }
}
impl Index<Face> for FacePalette {
    type Output = Rgb;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face.index()]
    }
}
impl IndexMut<Face> for FacePalette {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face.index()]
    }
}
impl FacePalette {
    /// Overrides the colors of some faces, leaving the others alone.
    pub fn merge(&mut self, colors: impl IntoIterator<Item = (Face, Rgb)>) {
        for (face, color) in colors {
            self[face] = color;
        }
    }
}

/// Mapping from facelet symbols to the faces whose color they stand for.
///
/// Symbols are arbitrary (`W`, `Y`, `R`, ... are as valid as `U`, `D`, `F`,
/// ...), so the legend is read off the center of each face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLegend(HashMap<char, Face>);
impl Default for ColorLegend {
    fn default() -> Self {
        Self(Face::iter().map(|face| (face.symbol(), face)).collect())
    }
}
impl ColorLegend {
    /// Builds a legend from the center symbol of each face.
    ///
    /// If two faces share a center symbol, the later face in `URFDLB` order
    /// wins.
    pub fn from_centers(table: &FaceColorTable) -> Self {
        let legend: HashMap<char, Face> =
            Face::iter().map(|face| (table.center(face), face)).collect();
        if legend.len() < Face::COUNT {
            log::warn!("face centers {table} do not have six distinct symbols");
        }
        Self(legend)
    }

    /// Returns the face that `symbol` stands for.
    ///
    /// Symbols missing from the legend fall back to the face with that label,
    /// case-insensitively.
    pub fn face_of(&self, symbol: char) -> Option<Face> {
        self.0
            .get(&symbol)
            .copied()
            .or_else(|| Face::from_symbol(symbol.to_ascii_uppercase()))
    }

    /// Returns the display color of `symbol`.
    pub fn color_of(&self, symbol: char, palette: &FacePalette) -> Rgb {
        self.face_of(symbol)
            .map_or(Rgb::UNKNOWN, |face| palette[face])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rgb_parse_and_display() {
        let c: Rgb = "#ef4444".parse().unwrap();
        assert_eq!(c, Rgb::from_u32(0xef4444));
        assert_eq!(c.to_string(), "#ef4444");
        assert_eq!("#f0f".parse::<Rgb>().unwrap(), Rgb { rgb: [255, 0, 255] });
        assert_eq!("0x3b82f6".parse::<Rgb>().unwrap(), Rgb::from_u32(0x3b82f6));
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_palette_merge_is_partial() {
        let mut palette = FacePalette::default();
        palette.merge([(Face::R, Rgb::from_u32(0x123456))]);
        assert_eq!(palette[Face::R], Rgb::from_u32(0x123456));
        assert_eq!(palette[Face::U], FacePalette::default()[Face::U]);
    }

    #[test]
    fn test_legend_from_color_letters() {
        let state: String = ['W', 'R', 'G', 'Y', 'O', 'B']
            .into_iter()
            .flat_map(|c| std::iter::repeat_n(c, 9))
            .collect();
        let legend = ColorLegend::from_centers(&FaceColorTable::decode(&state).unwrap());
        assert_eq!(legend.face_of('W'), Some(Face::U));
        assert_eq!(legend.face_of('O'), Some(Face::L));
        assert_eq!(legend.face_of('B'), Some(Face::B));
        // Not a center, but still a face label
        assert_eq!(legend.face_of('f'), Some(Face::F));
        assert_eq!(legend.face_of('?'), None);

        let palette = FacePalette::default();
        assert_eq!(legend.color_of('G', &palette), palette[Face::F]);
        assert_eq!(legend.color_of('x', &palette), Rgb::UNKNOWN);
    }
}

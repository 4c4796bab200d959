use facelet3d::{Face, FacePalette, Rgb};
use serde::{Deserialize, Serialize};

/// Color of each face, keyed by lowercase face label.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColorPreferences {
    pub u: Rgb,
    pub r: Rgb,
    pub f: Rgb,
    pub d: Rgb,
    pub l: Rgb,
    pub b: Rgb,
}
impl Default for ColorPreferences {
    fn default() -> Self {
        Self::from_palette(&FacePalette::default())
    }
}
impl ColorPreferences {
    /// Constructs color preferences from a palette.
    pub fn from_palette(palette: &FacePalette) -> Self {
        Self {
            u: palette[Face::U],
            r: palette[Face::R],
            f: palette[Face::F],
            d: palette[Face::D],
            l: palette[Face::L],
            b: palette[Face::B],
        }
    }

    /// Returns the colors as a palette.
    pub fn palette(&self) -> FacePalette {
        let mut palette = FacePalette::default();
        palette.merge([
            (Face::U, self.u),
            (Face::R, self.r),
            (Face::F, self.f),
            (Face::D, self.d),
            (Face::L, self.l),
            (Face::B, self.b),
        ]);
        palette
    }
}

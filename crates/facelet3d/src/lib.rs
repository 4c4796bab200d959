//! 3x3x3 cube engine that keeps a lattice of 27 rigid pieces synchronized
//! with a 54-symbol facelet string.
//!
//! Facelet strings are decoded into a [`FaceColorTable`] and painted onto a
//! [`Lattice`] in its home arrangement. Layer turns are animated by the
//! [`RotationEngine`] and baked back into the lattice when they settle, after
//! which the facelet string is recomputed from geometry by the
//! [`projection`] functions. Turns can come from move notation or from
//! pointer drags interpreted relative to an [`OrbitCamera`].
//!
//! [`CubeView`] ties all of this together for a UI.

mod camera;
mod codec;
mod error;
mod face;
mod gesture;
pub mod interpolate;
mod lattice;
mod orientation;
mod palette;
mod picking;
mod playback;
pub mod projection;
mod rotation;
mod sign;
mod view;


pub use camera::*;
pub use codec::*;
pub use error::EngineError;
pub use face::{Axis, Face};
pub use gesture::*;
pub use lattice::*;
pub use orientation::Orientation;
pub use palette::{ColorLegend, FacePalette, Rgb};
pub use picking::{Ray, pick_piece};
pub use playback::{Playback, TraceDivergence};
pub use rotation::*;
pub use sign::Sign;
pub use view::{CubeView, PanelRenderData, TurnCompletion, ViewSettings};

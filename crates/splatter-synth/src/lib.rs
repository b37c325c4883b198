//! Maps analyzed mesh faces to splats.
//!
//! Each non-degenerate face becomes one isotropic splat at the face center,
//! sized from the face area. Orientation is selected with [`RotationMode`];
//! colors are placeholders drawn from the caller's RNG.

pub mod rotation;
pub mod splats;
pub mod synth;

pub use rotation::RotationMode;
pub use splats::{LengthMismatch, Splat, SplatSet};
pub use synth::synthesize;

// SPDX-License-Identifier: MIT
//
// chroma-color — color math for the chroma tonal scale engine.
//
// Hex strings come in, perceptual OKLCH colors come out, and every
// computed point goes back to hex through the same model, so a parsed
// color always formats back to the string it came from. The crate holds
// no state: every function is pure and safe to call from any thread.

pub mod color;
pub mod error;
pub mod interpolate;

pub use color::{Color, normalize_hex};
pub use error::{InvalidColorError, InvalidColorReason};
pub use interpolate::Interpolator;

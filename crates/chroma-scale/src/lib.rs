//! # chroma-scale — tonal scale engine
//!
//! Turns a single seed color into an eleven-step tonal scale, derives
//! semantic light/dark variants, and picks readable text colors. Every
//! entry point is a pure function over its arguments: no shared state, no
//! I/O, safe to call from any number of threads.
//!
//! # Architecture
//!
//! ```text
//! seed hex (+ name, provenance)
//!     │
//!     ▼
//! step.rs:     canonical steps 50..950, target lightness, anchor search
//!     │
//!     ▼
//! scale.rs:    white → seed → black interpolation, TonalScale record
//!
//! variant.rs:  dark/light attribute rewrite of a seed (independent)
//! contrast.rs: WCAG luminance, white-or-black foreground (independent)
//! random.rs:   deterministic random seed colors (independent)
//! ```
//!
//! # Failure model
//!
//! Only input parsing can fail. [`generate`] and [`derive_variant`] fail
//! soft (an all-black scale, the input unchanged) and report through
//! `tracing`; [`try_generate`] hands the [`InvalidColorError`] back to
//! callers that prefer a hard failure.

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod contrast;
pub mod random;
pub mod scale;
pub mod step;
pub mod variant;

pub use chroma_color::{Color, InvalidColorError};
pub use contrast::{contrast_ratio, pick_foreground, relative_luminance};
pub use random::{lucky_scales, random_colors};
pub use scale::{
    MalformedScale, Provenance, ScaleId, TonalScale, generate, spawn_variant, try_generate,
};
pub use step::{Step, anchor_step};
pub use variant::{VariantKind, derive_variant, variant_color};

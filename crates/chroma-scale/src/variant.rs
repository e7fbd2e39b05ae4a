//! Semantic light/dark variants of a seed color.
//!
//! A variant is not a point on the seed's own scale. It rewrites the OKLCH
//! attributes directly:
//!
//! - **Dark**: lightness pinned at 0.25 (slate/charcoal territory), chroma
//!   cut to 40% so darks don't turn neon, and the hue pulled 10% of the way
//!   toward 270° (blue) for a cool dark-mode cast.
//! - **Light**: lightness pinned at 0.94, chroma capped at the lesser of
//!   0.1 and 80% of the original, which keeps a pastel tint instead of
//!   washing out to white.

use std::fmt;
use std::str::FromStr;

use chroma_color::Color;
use thiserror::Error;
use tracing::warn;

const DARK_LIGHTNESS: f64 = 0.25;
const DARK_CHROMA_SCALE: f64 = 0.4;
const COOL_HUE: f64 = 270.0;
const COOL_HUE_PULL: f64 = 0.1;

const LIGHT_LIGHTNESS: f64 = 0.94;
const LIGHT_CHROMA_CEILING: f64 = 0.1;
const LIGHT_CHROMA_SCALE: f64 = 0.8;

/// Which way a variant leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Dark,
    Light,
}

impl VariantKind {
    /// Lowercase identifier (`dark`, `light`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Suffix used when naming a scale spawned from this variant.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "Darker",
            Self::Light => "Lighter",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names neither variant kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant kind {0:?} (expected \"dark\" or \"light\")")]
pub struct UnknownVariantKind(pub String);

impl FromStr for VariantKind {
    type Err = UnknownVariantKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(UnknownVariantKind(s.to_owned())),
        }
    }
}

/// The variant as a perceptual color, before formatting to hex.
#[must_use]
pub fn variant_color(color: Color, kind: VariantKind) -> Color {
    match kind {
        VariantKind::Dark => {
            let dark = color
                .set_lightness(DARK_LIGHTNESS)
                .set_chroma(color.c * DARK_CHROMA_SCALE);
            color
                .h
                .map_or(dark, |h| dark.set_hue(COOL_HUE_PULL.mul_add(COOL_HUE - h, h)))
        }
        VariantKind::Light => color
            .set_lightness(LIGHT_LIGHTNESS)
            .set_chroma(LIGHT_CHROMA_CEILING.min(color.c * LIGHT_CHROMA_SCALE)),
    }
}

/// Derive a variant of `seed` and format it as hex.
///
/// Fails soft: an unparsable seed comes back unchanged.
#[must_use]
pub fn derive_variant(seed: &str, kind: VariantKind) -> String {
    match Color::parse(seed) {
        Ok(color) => variant_color(color, kind).to_hex(),
        Err(err) => {
            warn!(%err, %kind, "cannot derive variant; returning input unchanged");
            seed.to_owned()
        }
    }
}

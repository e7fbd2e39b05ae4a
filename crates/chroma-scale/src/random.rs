//! Random seed colors — the "feeling lucky" entry point.
//!
//! Seeds are vivid mid-tones so the scales built from them have room on
//! both sides of the anchor. Generation is deterministic for a given PRNG
//! seed; callers pick the seed (time, user input, a test constant).

use chroma_color::Color;

use crate::scale::{Provenance, TonalScale, generate};

/// Upper bound on colors per request.
pub const MAX_RANDOM_COLORS: usize = 20;

/// Golden angle in degrees: successive hues never line up.
const GOLDEN_ANGLE: f64 = 137.508;

const LIGHTNESS_RANGE: (f64, f64) = (0.5, 0.7);
const CHROMA_RANGE: (f64, f64) = (0.15, 0.25);

const BASE_LIGHTNESS_JITTER: f64 = 0.08;
const BASE_CHROMA_JITTER: f64 = 0.04;
const BASE_LIGHTNESS_BOUNDS: (f64, f64) = (0.2, 0.9);
const BASE_CHROMA_BOUNDS: (f64, f64) = (0.02, 0.3);

// ---------------------------------------------------------------------------
// Xorshift32 — a minimal deterministic PRNG
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG. Same seed, same colors.
struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    const fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Random f64 in [lo, hi].
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let t = f64::from(self.next()) / f64::from(u32::MAX);
        (hi - lo).mul_add(t, lo)
    }
}

/// `count` random seed colors as hex, `count` clamped to 1..=20.
///
/// Without `base`, each color is an independent vivid mid-tone. With
/// `base`, hues fan out from the base hue by the golden angle while
/// lightness and chroma jitter around the base's own values.
#[must_use]
pub fn random_colors(count: usize, seed: u32, base: Option<Color>) -> Vec<String> {
    random_points(count, seed, base).into_iter().map(Color::to_hex).collect()
}

/// Scales named `"Lucky Color 1"`, `"Lucky Color 2"`, … from random seeds.
#[must_use]
pub fn lucky_scales(count: usize, seed: u32) -> Vec<TonalScale> {
    random_colors(count, seed, None)
        .iter()
        .enumerate()
        .map(|(i, hex)| generate(hex, &format!("Lucky Color {}", i + 1), Provenance::Manual))
        .collect()
}

fn random_points(count: usize, seed: u32, base: Option<Color>) -> Vec<Color> {
    let count = count.clamp(1, MAX_RANDOM_COLORS);
    let mut rng = Xorshift32::new(seed);

    match base {
        None => (0..count)
            .map(|_| {
                let l = rng.range(LIGHTNESS_RANGE.0, LIGHTNESS_RANGE.1);
                let c = rng.range(CHROMA_RANGE.0, CHROMA_RANGE.1);
                let h = rng.range(0.0, 360.0);
                Color::oklch(l, c, h)
            })
            .collect(),
        Some(base) => {
            let base_hue = base.h.unwrap_or(0.0);
            (0..count)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let h = GOLDEN_ANGLE.mul_add(i as f64, base_hue);
                    let l = (base.l + rng.range(-BASE_LIGHTNESS_JITTER, BASE_LIGHTNESS_JITTER))
                        .clamp(BASE_LIGHTNESS_BOUNDS.0, BASE_LIGHTNESS_BOUNDS.1);
                    let c = (base.c + rng.range(-BASE_CHROMA_JITTER, BASE_CHROMA_JITTER))
                        .clamp(BASE_CHROMA_BOUNDS.0, BASE_CHROMA_BOUNDS.1);
                    Color::oklch(l, c, h)
                })
                .collect()
        }
    }
}

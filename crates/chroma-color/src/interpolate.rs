// SPDX-License-Identifier: MIT
//
// Straight-line interpolation in OKLCH.
//
// Lightness and chroma move linearly. Hue takes the shortest arc around the
// wheel, except when an endpoint is achromatic: a gray has no hue to move
// away from, so the path borrows the other endpoint's hue from start to end.
// That keeps white → blue from sweeping through yellow on the way.

use crate::color::{Color, normalize_hue};

/// How the hue evolves along an [`Interpolator`] path.
#[derive(Debug, Clone, Copy, PartialEq)]
enum HuePath {
    /// Both endpoints are gray.
    Gray,
    /// One endpoint is gray; the other's hue holds for the whole path.
    Fixed(f64),
    /// Both endpoints have a hue; `delta` is the signed shortest arc.
    Arc { start: f64, delta: f64 },
}

/// Interpolates between two colors in OKLCH, parameterized by `t` ∈ \[0, 1\].
///
/// # Examples
///
/// ```
/// use chroma_color::{Color, Interpolator};
///
/// let blue = Color::parse("#3b82f6").unwrap();
/// let toward_white = Interpolator::new(Color::WHITE, blue);
///
/// assert_eq!(toward_white.at(0.0).to_hex(), "#ffffff");
/// assert_eq!(toward_white.at(1.0).to_hex(), "#3b82f6");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Interpolator {
    from: Color,
    to: Color,
    hue: HuePath,
}

impl Interpolator {
    /// Build the path from `from` (at `t = 0`) to `to` (at `t = 1`).
    #[must_use]
    pub fn new(from: Color, to: Color) -> Self {
        let hue = match (from.h, to.h) {
            (None, None) => HuePath::Gray,
            (Some(h), None) | (None, Some(h)) => HuePath::Fixed(h),
            (Some(h0), Some(h1)) => HuePath::Arc {
                start: h0,
                delta: shortest_arc(h0, h1),
            },
        };
        Self { from, to, hue }
    }

    /// Start of the path.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> Color {
        self.from
    }

    /// End of the path.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Color {
        self.to
    }

    /// The color at `t`, clamped to \[0, 1\].
    #[must_use]
    pub fn at(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let l = (self.to.l - self.from.l).mul_add(t, self.from.l);
        let c = (self.to.c - self.from.c).mul_add(t, self.from.c);
        let h = match self.hue {
            HuePath::Gray => None,
            HuePath::Fixed(h) => Some(h),
            HuePath::Arc { start, delta } => Some(normalize_hue(delta.mul_add(t, start))),
        };
        Color { l, c, h }
    }

    /// `n` evenly spaced colors from start to end, both included.
    ///
    /// `n == 0` yields nothing; `n == 1` yields only the start.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn samples(&self, n: usize) -> impl ExactSizeIterator<Item = Color> {
        let last = n.saturating_sub(1).max(1) as f64;
        (0..n).map(move |i| self.at(i as f64 / last))
    }
}

/// Signed difference `h1 - h0` folded into (-180, 180].
#[inline]
fn shortest_arc(h0: f64, h1: f64) -> f64 {
    let diff = h1 - h0;
    if diff > 180.0 {
        diff - 360.0
    } else if diff <= -180.0 {
        diff + 360.0
    } else {
        diff
    }
}

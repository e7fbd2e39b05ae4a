// SPDX-License-Identifier: MIT
//
// chroma color system — hex in, OKLCH in the middle, hex out.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Every tonal computation happens in OKLCH, where equal numerical steps in
// lightness look like equal visual steps. sRGB is only the wire format:
// callers hand us hex strings and get hex strings back.
//
// Conversion pipeline:
//
//   hex ↔ sRGB ↔ Linear sRGB ↔ Oklab ↔ OKLCH
//
// Formatting never fails. Points outside the sRGB gamut are clamped per
// channel, then rounded to the nearest 8-bit value.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidColorError, InvalidColorReason};

/// Chroma below which a color counts as achromatic and its hue is undefined.
pub const ACHROMATIC_CHROMA: f64 = 1e-5;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color in OKLCH space.
///
/// OKLCH is the cylindrical form of Björn Ottosson's Oklab. Lightness runs
/// from 0.0 (black) to 1.0 (white), chroma from 0.0 (gray) to roughly 0.37
/// for the most vivid sRGB colors, and hue is an angle in degrees.
///
/// Grays have no meaningful hue, so `h` is `None` whenever the chroma is
/// below [`ACHROMATIC_CHROMA`]. Interpolation and variant derivation rely on
/// this to avoid dragging colors toward an arbitrary angle.
///
/// # Examples
///
/// ```
/// use chroma_color::Color;
///
/// let blue = Color::parse("#3b82f6").unwrap();
/// assert!(blue.l > 0.6 && blue.l < 0.65);
/// assert_eq!(blue.to_hex(), "#3b82f6");
///
/// let gray = Color::parse("888").unwrap();
/// assert!(gray.is_achromatic());
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,

    /// Chroma (colorfulness), never negative.
    pub c: f64,

    /// Hue angle in degrees, in [0, 360). `None` for achromatic colors.
    pub h: Option<f64>,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values. The hue is normalized to [0, 360).
    #[inline]
    #[must_use]
    pub fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self {
            l,
            c,
            h: Some(normalize_hue(h)),
        }
    }

    /// Create an achromatic color at the given OKLCH lightness.
    #[inline]
    #[must_use]
    pub const fn gray(lightness: f64) -> Self {
        Self {
            l: lightness,
            c: 0.0,
            h: None,
        }
    }

    /// Create a color from sRGB values (0.0 to 1.0 range).
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        let (l, a, b_ok) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
        oklab_to_color(l, a, b_ok)
    }

    /// Create a color from 8-bit sRGB values.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Parse a `#RGB` or `#RRGGBB` hex string (the `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColorError`] when the string is empty, holds a
    /// non-hex character, or has a digit count other than 3 or 6.
    pub fn parse(s: &str) -> Result<Self, InvalidColorError> {
        let (r, g, b) = parse_hex(s)?;
        Ok(Self::rgb8(r, g, b))
    }

    /// Pure black.
    pub const BLACK: Self = Self::gray(0.0);

    /// Pure white.
    pub const WHITE: Self = Self::gray(1.0);

    /// Whether this color has no visible chroma.
    #[inline]
    #[must_use]
    pub const fn is_achromatic(self) -> bool {
        self.h.is_none()
    }

    // ─── Attribute Edits ─────────────────────────────────────────────────

    /// Set lightness to an absolute value (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn set_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Set chroma to an absolute value (clamped to >= 0.0).
    ///
    /// The hue is kept as is: an achromatic color stays hue-less.
    #[inline]
    #[must_use]
    pub const fn set_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    /// Set hue to an absolute angle (normalized to 0°–360°).
    #[inline]
    #[must_use]
    pub fn set_hue(self, h: f64) -> Self {
        Self {
            h: Some(normalize_hue(h)),
            ..self
        }
    }

    // ─── Conversions to sRGB ─────────────────────────────────────────────

    /// Convert to sRGB with every channel clamped to 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_srgb_unclamped();
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Convert to 8-bit sRGB, clamping out-of-gamut channels.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Format as a lowercase `#rrggbb` string.
    ///
    /// Never fails: out-of-gamut points are clamped to the nearest
    /// renderable value channel by channel.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Whether this color is within the sRGB gamut.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        // Tolerance absorbs float noise at the gamut boundary (pure white,
        // fully saturated primaries).
        const EPS: f64 = 1e-6;
        let in_range = |v: f64| (-EPS..=1.0 + EPS).contains(&v);
        let (r, g, b) = self.to_srgb_unclamped();
        in_range(r) && in_range(g) && in_range(b)
    }

    fn to_srgb_unclamped(self) -> (f64, f64, f64) {
        let (a, b) = self.h.map_or((0.0, 0.0), |h| oklch_to_oklab_ab(self.c, h));
        let (lr, lg, lb) = oklab_to_linear_srgb(self.l, a, b);
        (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.h {
            Some(h) => write!(f, "Color::oklch({:.4}, {:.4}, {h:.1})", self.l, self.c),
            None => write!(f, "Color::gray({:.4})", self.l),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f64 = 1e-9;
        let hues_match = match (self.h, other.h) {
            (Some(a), Some(b)) => hue_diff(a, b) < EPS,
            (None, None) => true,
            _ => false,
        };
        (self.l - other.l).abs() < EPS && (self.c - other.c).abs() < EPS && hues_match
    }
}

impl Default for Color {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

/// Canonical lowercase `#rrggbb` form of a valid hex color.
///
/// Works on the 8-bit channels directly, so no float round-trip is
/// involved: `"#FFF"` becomes `"#ffffff"`, `"3B82F6"` becomes `"#3b82f6"`.
///
/// # Errors
///
/// Returns [`InvalidColorError`] under the same conditions as [`Color::parse`].
pub fn normalize_hex(s: &str) -> Result<String, InvalidColorError> {
    let (r, g, b) = parse_hex(s)?;
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// These implement the Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// Pipeline: OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB

/// Normalize a hue angle to the range [0, 360).
#[inline]
pub(crate) fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel).
#[inline]
pub(crate) fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// Convert OKLCH chroma and hue to Oklab a, b components.
#[inline]
fn oklch_to_oklab_ab(c: f64, h: f64) -> (f64, f64) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

/// Build a [`Color`] from Oklab, dropping the hue of achromatic points.
#[inline]
fn oklab_to_color(l: f64, a: f64, b: f64) -> Color {
    let c = a.hypot(b);
    if c < ACHROMATIC_CHROMA {
        return Color { l, c, h: None };
    }
    let h = b.atan2(a).to_degrees();
    Color {
        l,
        c,
        h: Some(normalize_hue(h)),
    }
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The Oklab ↔ Linear sRGB conversion goes through an intermediate LMS
// (Long, Medium, Short cone response) space. The matrices below are from
// Björn Ottosson's original specification.

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_757_3f64.mul_add(b, 0.396_337_777_4f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8f64.mul_add(-b, 0.105_561_345_8f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_0f64.mul_add(-b, 0.089_484_177_5f64.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_929_2f64.mul_add(s, 4.076_741_662_1f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5f64.mul_add(-s, (-1.268_438_004_6f64).mul_add(l, 2.609_757_401_1 * m));
    let bl = 1.707_614_701_0f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    // Linear sRGB → LMS
    let l = 0.051_445_992_9f64.mul_add(b, 0.412_221_470_8f64.mul_add(r, 0.536_332_536_3 * g));
    let m = 0.107_396_956_6f64.mul_add(b, 0.211_903_498_2f64.mul_add(r, 0.680_699_545_1 * g));
    let s = 0.629_978_700_5f64.mul_add(b, 0.088_302_461_9f64.mul_add(r, 0.281_718_837_6 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // Oklab intermediate → Oklab
    let l_ok = 0.004_072_046_8f64.mul_add(-s_, 0.210_454_255_3f64.mul_add(l_, 0.793_617_785_0 * m_));
    let a = 0.450_593_709_9f64.mul_add(s_, 1.977_998_495_1f64.mul_add(l_, -(2.428_592_205_0 * m_)));
    let b_ok = 0.808_675_766_0f64.mul_add(-s_, 0.025_904_037_1f64.mul_add(l_, 0.782_771_766_2 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

/// Parse a hex color string into 8-bit channels.
fn parse_hex(input: &str) -> Result<(u8, u8, u8), InvalidColorError> {
    let s = input.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.is_empty() {
        return Err(InvalidColorError::new(input, InvalidColorReason::Empty));
    }
    if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(InvalidColorError::new(input, InvalidColorReason::Digit(bad)));
    }

    let bytes = s.as_bytes();
    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0]);
            let g = parse_hex_digit(bytes[1]);
            let b = parse_hex_digit(bytes[2]);
            Ok((r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => Ok((
            parse_hex_byte(bytes[0], bytes[1]),
            parse_hex_byte(bytes[2], bytes[3]),
            parse_hex_byte(bytes[4], bytes[5]),
        )),
        n => Err(InvalidColorError::new(input, InvalidColorReason::Length(n))),
    }
}

/// Value of an ASCII hex digit. Callers have already checked the digit.
#[inline]
const fn parse_hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[inline]
const fn parse_hex_byte(hi: u8, lo: u8) -> u8 {
    parse_hex_digit(hi) << 4 | parse_hex_digit(lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

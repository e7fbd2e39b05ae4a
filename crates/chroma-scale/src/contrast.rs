//! WCAG contrast and binary foreground selection.
//!
//! Readability is judged in sRGB relative luminance (the WCAG definition),
//! not OKLCH lightness. The selector is deliberately binary: white when it
//! clears the AA threshold for normal text, black otherwise.

use chroma_color::Color;
use chroma_color::color::srgb_to_linear;
use tracing::debug;

/// WCAG 2.1 AA minimum contrast for normal-size text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// Foreground returned for dark backgrounds.
pub const WHITE_HEX: &str = "#ffffff";

/// Foreground returned for light backgrounds.
pub const BLACK_HEX: &str = "#000000";

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_rgb8();
    let r_lin = srgb_to_linear(f64::from(r) / 255.0);
    let g_lin = srgb_to_linear(f64::from(g) / 255.0);
    let b_lin = srgb_to_linear(f64::from(b) / 255.0);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result is always >= 1.0 regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick white or black text for `background`.
///
/// White wins when its contrast against the background is at least
/// [`AA_NORMAL_TEXT`]. A background that does not parse is treated as
/// black, so it gets white text.
#[must_use]
pub fn pick_foreground(background: &str) -> &'static str {
    let color = Color::parse(background).unwrap_or_else(|err| {
        debug!(%err, "unparsable background treated as black");
        Color::BLACK
    });
    pick_foreground_for(color)
}

/// [`pick_foreground`] for an already parsed color.
#[must_use]
pub fn pick_foreground_for(background: Color) -> &'static str {
    if contrast_ratio(background, Color::WHITE) >= AA_NORMAL_TEXT {
        WHITE_HEX
    } else {
        BLACK_HEX
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn hex(s: &str) -> Color {
        Color::parse(s).unwrap()
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = relative_luminance(Color::BLACK);
        assert!(approx_eq(lum, 0.0, 1e-9), "Black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        let lum = relative_luminance(Color::WHITE);
        assert!(approx_eq(lum, 1.0, 1e-9), "White luminance: {lum}");
    }

    #[test]
    fn luminance_pure_red() {
        let lum = relative_luminance(hex("#ff0000"));
        assert!(approx_eq(lum, 0.2126, 1e-6), "Red luminance: {lum}");
    }

    #[test]
    fn luminance_pure_green() {
        let lum = relative_luminance(hex("#00ff00"));
        assert!(approx_eq(lum, 0.7152, 1e-6), "Green luminance: {lum}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Color::oklch(0.5, 0.1, 180.0);
        let ratio = contrast_ratio(c, c);
        assert!(approx_eq(ratio, 1.0, 1e-12), "Same-color contrast: {ratio}");
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = hex("#cc334d");
        let b = hex("#1a1a66");
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
    }

    #[test]
    fn contrast_reference_blue() {
        let ratio = contrast_ratio(hex("#3b82f6"), Color::WHITE);
        assert!(approx_eq(ratio, 3.68, 0.01), "Blue on white: {ratio}");
    }

    // ── pick_foreground ─────────────────────────────────────────────

    #[test]
    fn black_background_gets_white() {
        assert_eq!(pick_foreground("#000000"), WHITE_HEX);
    }

    #[test]
    fn white_background_gets_black() {
        assert_eq!(pick_foreground("#ffffff"), BLACK_HEX);
    }

    #[test]
    fn threshold_boundary() {
        // #767676 is the lightest gray that still clears 4.5:1 against white.
        assert_eq!(pick_foreground("#767676"), WHITE_HEX);
        assert_eq!(pick_foreground("#777777"), BLACK_HEX);
    }

    #[test]
    fn mid_blue_gets_black_deep_blue_gets_white() {
        assert_eq!(pick_foreground("#3b82f6"), BLACK_HEX);
        assert_eq!(pick_foreground("#1d4ed8"), WHITE_HEX);
    }

    #[test]
    fn pick_is_pure() {
        for bg in ["#3b82f6", "#fde68a", "#14532d", "#767676"] {
            assert_eq!(pick_foreground(bg), pick_foreground(bg));
        }
    }

    #[test]
    fn unparsable_background_gets_white() {
        assert_eq!(pick_foreground("not-a-color"), WHITE_HEX);
    }

    #[test]
    fn short_hex_accepted() {
        assert_eq!(pick_foreground("#fff"), BLACK_HEX);
        assert_eq!(pick_foreground("000"), WHITE_HEX);
    }
}

//! The canonical step identifiers and their target lightness.
//!
//! Every tonal scale has exactly eleven steps, `50` through `950`. Low
//! numbers are light, high numbers are dark; the target table encodes that
//! intent and drives anchor selection.

use std::fmt;

use thiserror::Error;

/// Target OKLCH lightness per step, in [`Step::ALL`] order.
const TARGET_LIGHTNESS: [f64; Step::COUNT] = [
    0.97, // 50
    0.94, // 100
    0.88, // 200
    0.80, // 300
    0.70, // 400
    0.60, // 500
    0.50, // 600
    0.40, // 700
    0.30, // 800
    0.20, // 900
    0.10, // 950
];

/// Denominator for dark-ward interpolation: the step a scale would end at.
pub const STEP_CEILING: u16 = 1000;

/// A step identifier that is not one of the eleven canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a scale step (expected one of 50, 100..900, 950)")]
pub struct UnknownStep(pub u16);

/// One of the eleven canonical scale steps.
///
/// Only the values in [`Step::ALL`] can be constructed, so a `Step` is
/// always a valid index into a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(u16);

impl Step {
    /// Number of steps in every scale.
    pub const COUNT: usize = 11;

    /// All steps in ascending order (lightest first).
    pub const ALL: [Self; Self::COUNT] = [
        Self(50),
        Self(100),
        Self(200),
        Self(300),
        Self(400),
        Self(500),
        Self(600),
        Self(700),
        Self(800),
        Self(900),
        Self(950),
    ];

    /// The numeric identifier (`50`, `100`, … `950`).
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Position of this step in [`Step::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self.0 {
            50 => 0,
            100 => 1,
            200 => 2,
            300 => 3,
            400 => 4,
            500 => 5,
            600 => 6,
            700 => 7,
            800 => 8,
            900 => 9,
            _ => 10,
        }
    }

    /// The OKLCH lightness this step aims for.
    #[inline]
    #[must_use]
    pub const fn target_lightness(self) -> f64 {
        TARGET_LIGHTNESS[self.index()]
    }
}

impl TryFrom<u16> for Step {
    type Error = UnknownStep;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|step| step.0 == value)
            .ok_or(UnknownStep(value))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The step whose target lightness is closest to `lightness`.
///
/// Linear scan in ascending order; a later step only replaces the current
/// best when it is strictly closer, so on an exact tie the lighter step
/// wins. The search starts from `500` with a difference of `1.0`, which
/// every lightness in [0, 1] beats.
#[must_use]
pub fn anchor_step(lightness: f64) -> Step {
    let mut best = Step(500);
    let mut min_diff = 1.0;

    for step in Step::ALL {
        let diff = (lightness - step.target_lightness()).abs();
        if diff < min_diff {
            min_diff = diff;
            best = step;
        }
    }

    best
}

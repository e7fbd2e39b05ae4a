//! Tonal scale generation — one seed color in, eleven steps out.
//!
//! ```text
//! seed hex ──parse──▶ OKLCH ──▶ anchor step (closest target lightness)
//!                                   │
//!          steps < anchor ◀── white → seed   (t = step / anchor)
//!          step == anchor ◀── seed, formatted once
//!          steps > anchor ◀── seed → black   (t = (step − anchor) / (1000 − anchor))
//! ```
//!
//! The anchor holds the formatted seed itself rather than an interpolated
//! point, so the scale always contains the exact color the caller chose.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chroma_color::{Color, InvalidColorError, Interpolator};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::step::{STEP_CEILING, Step, anchor_step};
use crate::variant::{VariantKind, derive_variant};

/// Name given to the all-black scale produced for unparsable seeds.
pub const INVALID_SCALE_NAME: &str = "Invalid Scale";

const FALLBACK_HEX: &str = "#000000";

// ---------------------------------------------------------------------------
// ScaleId
// ---------------------------------------------------------------------------

/// Opaque identifier, unique per generated scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleId(Uuid);

impl ScaleId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Where a scale's seed color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Typed or picked by the user.
    Manual,
    /// Part of an AI-suggested palette.
    AiPalette,
    /// Sampled from an image.
    Image,
    /// A variant suggested by an AI service.
    AiVariant,
    /// A variant computed by [`crate::variant`].
    AlgoVariant,
}

impl Provenance {
    pub const ALL: [Self; 5] = [
        Self::Manual,
        Self::AiPalette,
        Self::Image,
        Self::AiVariant,
        Self::AlgoVariant,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::AiPalette => "ai-palette",
            Self::Image => "image",
            Self::AiVariant => "ai-variant",
            Self::AlgoVariant => "algo-variant",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names none of the provenance tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scale source {0:?} (expected manual, ai-palette, image, ai-variant or algo-variant)")]
pub struct UnknownProvenance(pub String);

impl FromStr for Provenance {
    type Err = UnknownProvenance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownProvenance(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// TonalScale
// ---------------------------------------------------------------------------

/// A generated scale: eleven hex colors keyed by [`Step`].
///
/// Immutable once built, apart from [`rename`](Self::rename). Deserializing
/// re-checks what generation guarantees; see [`MalformedScale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTonalScale")]
pub struct TonalScale {
    id: ScaleId,
    name: String,
    base_color: String,
    #[serde(with = "steps_map")]
    steps: [String; Step::COUNT],
    #[serde(rename = "source")]
    provenance: Provenance,
    #[serde(default, with = "anchor_value")]
    anchor: Option<Step>,
}

impl TonalScale {
    /// The all-black scale standing in for an unparsable seed.
    ///
    /// An empty `name` becomes [`INVALID_SCALE_NAME`].
    #[must_use]
    pub fn fallback(name: &str, provenance: Provenance) -> Self {
        Self {
            id: ScaleId::new(),
            name: name_or(name, || INVALID_SCALE_NAME.to_owned()),
            base_color: FALLBACK_HEX.to_owned(),
            steps: Step::ALL.map(|_| FALLBACK_HEX.to_owned()),
            provenance,
            anchor: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ScaleId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The seed color as normalized `#rrggbb`.
    #[must_use]
    pub fn base_color(&self) -> &str {
        &self.base_color
    }

    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// The step holding the seed color. `None` for a fallback scale.
    #[must_use]
    pub const fn anchor(&self) -> Option<Step> {
        self.anchor
    }

    /// Whether this scale stands in for an unparsable seed.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.anchor.is_none()
    }

    /// The hex color at `step`.
    #[must_use]
    pub fn get(&self, step: Step) -> &str {
        &self.steps[step.index()]
    }

    /// Steps in ascending order with their colors.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Step, &str)> {
        Step::ALL.into_iter().zip(self.steps.iter().map(String::as_str))
    }

    /// Change the display name; the only edit a scale allows.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Why a deserialized scale was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedScale {
    #[error("{field} is not a normalized hex color: {value:?}")]
    NotHex { field: String, value: String },
    #[error("anchor step {anchor} holds {found} but the base color is {base}")]
    AnchorMismatch {
        anchor: Step,
        found: String,
        base: String,
    },
    #[error("scale without an anchor must be all #000000")]
    NotFallback,
}

/// Wire shape of [`TonalScale`] before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTonalScale {
    id: ScaleId,
    name: String,
    base_color: String,
    #[serde(with = "steps_map")]
    steps: [String; Step::COUNT],
    #[serde(rename = "source")]
    provenance: Provenance,
    #[serde(default, with = "anchor_value")]
    anchor: Option<Step>,
}

impl TryFrom<RawTonalScale> for TonalScale {
    type Error = MalformedScale;

    fn try_from(raw: RawTonalScale) -> Result<Self, Self::Error> {
        check_hex("baseColor", &raw.base_color)?;
        for (step, hex) in Step::ALL.iter().zip(&raw.steps) {
            check_hex(&format!("step {step}"), hex)?;
        }
        match raw.anchor {
            Some(anchor) => {
                let found = &raw.steps[anchor.index()];
                if *found != raw.base_color {
                    return Err(MalformedScale::AnchorMismatch {
                        anchor,
                        found: found.clone(),
                        base: raw.base_color,
                    });
                }
            }
            None => {
                let all_black = raw.base_color == FALLBACK_HEX
                    && raw.steps.iter().all(|hex| hex == FALLBACK_HEX);
                if !all_black {
                    return Err(MalformedScale::NotFallback);
                }
            }
        }
        Ok(Self {
            id: raw.id,
            name: raw.name,
            base_color: raw.base_color,
            steps: raw.steps,
            provenance: raw.provenance,
            anchor: raw.anchor,
        })
    }
}

/// Accepts exactly what [`Color::to_hex`] produces.
fn check_hex(field: &str, value: &str) -> Result<(), MalformedScale> {
    match chroma_color::normalize_hex(value) {
        Ok(normalized) if normalized == value => Ok(()),
        _ => Err(MalformedScale::NotHex {
            field: field.to_owned(),
            value: value.to_owned(),
        }),
    }
}

fn name_or(name: &str, default: impl FnOnce() -> String) -> String {
    if name.trim().is_empty() {
        default()
    } else {
        name.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Build the scale for `seed`, failing on an unparsable color.
///
/// An empty `name` becomes `"Scale #rrggbb"`.
///
/// # Errors
///
/// Returns [`InvalidColorError`] when `seed` is not a 3- or 6-digit hex color.
pub fn try_generate(
    seed: &str,
    name: &str,
    provenance: Provenance,
) -> Result<TonalScale, InvalidColorError> {
    let base = Color::parse(seed)?;
    let base_hex = base.to_hex();
    let anchor = anchor_step(base.l);
    debug!(seed = %base_hex, lightness = base.l, %anchor, "anchor selected");

    let toward_white = Interpolator::new(Color::WHITE, base);
    let toward_black = Interpolator::new(base, Color::BLACK);
    let anchor_value = f64::from(anchor.value());
    let dark_range = f64::from(STEP_CEILING - anchor.value());

    let steps = Step::ALL.map(|step| {
        let value = f64::from(step.value());
        match step.cmp(&anchor) {
            Ordering::Equal => base_hex.clone(),
            Ordering::Less => toward_white.at(value / anchor_value).to_hex(),
            Ordering::Greater => toward_black.at((value - anchor_value) / dark_range).to_hex(),
        }
    });

    Ok(TonalScale {
        id: ScaleId::new(),
        name: name_or(name, || format!("Scale {base_hex}")),
        base_color: base_hex,
        steps,
        provenance,
        anchor: Some(anchor),
    })
}

/// Build the scale for `seed`, never failing.
///
/// An unparsable seed is logged as a warning and yields
/// [`TonalScale::fallback`]: base color and all eleven steps `#000000`.
#[must_use]
pub fn generate(seed: &str, name: &str, provenance: Provenance) -> TonalScale {
    try_generate(seed, name, provenance).unwrap_or_else(|err| {
        warn!(%err, "invalid seed color; substituting all-black scale");
        TonalScale::fallback(name, provenance)
    })
}

/// Build a scale from the `kind` variant of `parent`'s base color.
///
/// Named after the parent, e.g. `"Primary Blue (Darker)"`, and tagged
/// [`Provenance::AlgoVariant`].
#[must_use]
pub fn spawn_variant(parent: &TonalScale, kind: VariantKind) -> TonalScale {
    let base = derive_variant(parent.base_color(), kind);
    let name = format!("{} ({})", parent.name(), kind.label());
    generate(&base, &name, Provenance::AlgoVariant)
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Steps as a `{ "50": "#…", … }` map with exactly the canonical keys.
mod steps_map {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::step::Step;

    pub fn serialize<S: Serializer>(steps: &[String; Step::COUNT], ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(Step::COUNT))?;
        for (step, hex) in Step::ALL.iter().zip(steps) {
            map.serialize_entry(&step.value(), hex)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[String; Step::COUNT], D::Error> {
        let mut raw = BTreeMap::<u16, String>::deserialize(de)?;
        if raw.len() != Step::COUNT {
            return Err(D::Error::invalid_length(raw.len(), &"exactly 11 scale steps"));
        }
        let mut steps: [String; Step::COUNT] = Default::default();
        for (slot, step) in steps.iter_mut().zip(Step::ALL) {
            *slot = raw
                .remove(&step.value())
                .ok_or_else(|| D::Error::custom(format!("missing scale step {step}")))?;
        }
        Ok(steps)
    }
}

/// Anchor step as its bare number, `null` for fallback scales.
mod anchor_value {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::step::Step;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(anchor: &Option<Step>, ser: S) -> Result<S::Ok, S::Error> {
        anchor.map(Step::value).serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Step>, D::Error> {
        Option::<u16>::deserialize(de)?
            .map(|v| Step::try_from(v).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn step(v: u16) -> Step {
        Step::try_from(v).unwrap()
    }

    fn lightness(hex: &str) -> f64 {
        Color::parse(hex).unwrap().l
    }

    const SEEDS: [&str; 14] = [
        "#3b82f6", "#ef4444", "#22c55e", "#eab308", "#a855f7", "#ffffff", "#000000", "#808080",
        "#ff00ff", "#00ffff", "#0000ff", "#fde68a", "#14532d", "#f80",
    ];

    // ── Structure ───────────────────────────────────────────────────

    #[test]
    fn every_scale_has_the_eleven_steps() {
        for seed in SEEDS {
            let scale = generate(seed, "", Provenance::Manual);
            let keys: Vec<u16> = scale.iter().map(|(s, _)| s.value()).collect();
            assert_eq!(keys, vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]);
            assert!(scale.iter().all(|(_, hex)| hex.len() == 7 && hex.starts_with('#')));
        }
    }

    #[test]
    fn anchor_holds_normalized_seed() {
        for seed in SEEDS {
            let scale = try_generate(seed, "", Provenance::Manual).unwrap();
            let anchor = scale.anchor().unwrap();
            let normalized = chroma_color::normalize_hex(seed).unwrap();
            assert_eq!(scale.get(anchor), normalized, "seed {seed}");
            assert_eq!(scale.base_color(), normalized);
        }
    }

    #[test]
    fn lightness_never_increases() {
        for seed in SEEDS {
            let scale = generate(seed, "", Provenance::Manual);
            let ls: Vec<f64> = scale.iter().map(|(_, hex)| lightness(hex)).collect();
            assert!(
                ls.windows(2).all(|w| w[1] <= w[0] + 1e-9),
                "seed {seed}: {ls:?}"
            );
        }
    }

    #[test]
    fn ids_are_unique() {
        let a = generate("#3b82f6", "a", Provenance::Manual);
        let b = generate("#3b82f6", "a", Provenance::Manual);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.get(step(300)), b.get(step(300)));
    }

    // ── Scenarios ───────────────────────────────────────────────────

    #[test]
    fn reference_blue_scale() {
        let scale = generate("#3b82f6", "Primary Blue", Provenance::Manual);
        assert_eq!(scale.anchor(), Some(step(500)));
        assert_eq!(scale.get(step(500)), "#3b82f6");
        assert_eq!(scale.name(), "Primary Blue");

        let anchor_l = lightness("#3b82f6");
        assert!(lightness(scale.get(step(50))) > anchor_l);
        assert!(lightness(scale.get(step(950))) < anchor_l);

        assert_eq!(scale.get(step(50)), "#ebf3ff");
        assert_eq!(scale.get(step(400)), "#649dfa");
        assert_eq!(scale.get(step(600)), "#295fb7");
    }

    #[test]
    fn uppercase_seed_is_normalized() {
        let scale = generate("#3B82F6", "", Provenance::Manual);
        assert_eq!(scale.get(step(500)), "#3b82f6");
        assert_eq!(scale.name(), "Scale #3b82f6");
    }

    #[test]
    fn white_anchors_at_50() {
        let scale = generate("#ffffff", "", Provenance::Manual);
        assert_eq!(scale.anchor(), Some(step(50)));
        assert_eq!(scale.get(step(50)), "#ffffff");
    }

    #[test]
    fn black_anchors_at_950() {
        let scale = generate("#000000", "", Provenance::Manual);
        assert_eq!(scale.anchor(), Some(step(950)));
        assert_eq!(scale.get(step(950)), "#000000");
        // White → black through gray.
        assert_eq!(scale.get(step(50)), "#ededed");
    }

    #[test]
    fn light_steps_come_from_white_dark_steps_toward_black() {
        let scale = generate("#22c55e", "", Provenance::Manual);
        let anchor = scale.anchor().unwrap();
        for (s, hex) in scale.iter() {
            let l = lightness(hex);
            match s.cmp(&anchor) {
                Ordering::Less => assert!(l >= lightness(scale.base_color())),
                Ordering::Greater => assert!(l <= lightness(scale.base_color())),
                Ordering::Equal => assert_eq!(hex, scale.base_color()),
            }
        }
    }

    // ── Fallback ────────────────────────────────────────────────────

    #[test]
    fn malformed_seed_yields_black_scale() {
        let scale = generate("not-a-color", "", Provenance::Manual);
        assert_eq!(scale.base_color(), "#000000");
        assert!(scale.iter().all(|(_, hex)| hex == "#000000"));
        assert_eq!(scale.iter().len(), 11);
        assert_eq!(scale.name(), INVALID_SCALE_NAME);
        assert!(scale.is_fallback());
    }

    #[test]
    fn caller_name_is_kept_verbatim() {
        let scale = generate("#3b82f6", "  Brand ", Provenance::Manual);
        assert_eq!(scale.name(), "  Brand ");
        let fallback = generate("#zz", " Brand", Provenance::Manual);
        assert_eq!(fallback.name(), " Brand");
    }

    #[test]
    fn blank_name_gets_default() {
        assert_eq!(generate("#3b82f6", "   ", Provenance::Manual).name(), "Scale #3b82f6");
        assert_eq!(generate("#zz", "\t", Provenance::Manual).name(), INVALID_SCALE_NAME);
    }

    #[test]
    fn fallback_keeps_caller_name_and_source() {
        let scale = generate("#12345", "Brand", Provenance::Image);
        assert!(scale.is_fallback());
        assert_eq!(scale.name(), "Brand");
        assert_eq!(scale.provenance(), Provenance::Image);
    }

    #[test]
    fn try_generate_surfaces_the_error() {
        let err = try_generate("#zzz", "", Provenance::Manual).unwrap_err();
        assert_eq!(err.input, "#zzz");
    }

    // ── Variants / rename ───────────────────────────────────────────

    #[test]
    fn spawn_dark_variant() {
        let parent = generate("#3b82f6", "Primary Blue", Provenance::Manual);
        let child = spawn_variant(&parent, VariantKind::Dark);
        assert_eq!(child.name(), "Primary Blue (Darker)");
        assert_eq!(child.provenance(), Provenance::AlgoVariant);
        assert_eq!(child.base_color(), derive_variant("#3b82f6", VariantKind::Dark));
        assert!(lightness(child.base_color()) < lightness(parent.base_color()));
    }

    #[test]
    fn spawn_light_variant() {
        let parent = generate("#ef4444", "Alert", Provenance::AiPalette);
        let child = spawn_variant(&parent, VariantKind::Light);
        assert_eq!(child.name(), "Alert (Lighter)");
        assert!(!child.is_fallback());
        assert!(lightness(child.base_color()) > 0.85);
    }

    #[test]
    fn rename_changes_only_the_name() {
        let mut scale = generate("#3b82f6", "Old", Provenance::Manual);
        let before = scale.clone();
        scale.rename("New");
        assert_eq!(scale.name(), "New");
        assert_eq!(scale.id(), before.id());
        assert_eq!(scale.base_color(), before.base_color());
        assert!(scale.iter().eq(before.iter()));
    }

    // ── Provenance ──────────────────────────────────────────────────

    #[test]
    fn provenance_round_trips_through_str() {
        for p in Provenance::ALL {
            assert_eq!(p.as_str().parse::<Provenance>().unwrap(), p);
        }
        assert_eq!("AI-Palette".parse::<Provenance>().unwrap(), Provenance::AiPalette);
        assert!("clipboard".parse::<Provenance>().is_err());
    }

    // ── Serde ───────────────────────────────────────────────────────

    #[test]
    fn serializes_with_step_keys() {
        let scale = generate("#3b82f6", "Primary Blue", Provenance::AlgoVariant);
        let json = serde_json::to_value(&scale).unwrap();
        assert_eq!(json["name"], "Primary Blue");
        assert_eq!(json["baseColor"], "#3b82f6");
        assert_eq!(json["source"], "algo-variant");
        assert_eq!(json["anchor"], 500);
        assert_eq!(json["steps"]["500"], "#3b82f6");
        assert_eq!(json["steps"].as_object().unwrap().len(), 11);
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let scale = generate("#a855f7", "Violet", Provenance::Image);
        let text = serde_json::to_string(&scale).unwrap();
        let back: TonalScale = serde_json::from_str(&text).unwrap();
        assert_eq!(back, scale);
    }

    #[test]
    fn fallback_serializes_null_anchor() {
        let scale = generate("nope", "", Provenance::Manual);
        let json = serde_json::to_value(&scale).unwrap();
        assert!(json["anchor"].is_null());
    }

    fn scale_json(seed: &str) -> serde_json::Value {
        serde_json::to_value(generate(seed, "x", Provenance::Manual)).unwrap()
    }

    #[test]
    fn deserialize_rejects_non_hex_step() {
        let mut json = scale_json("#3b82f6");
        json["steps"]["200"] = "blue".into();
        let err = serde_json::from_value::<TonalScale>(json).unwrap_err();
        assert!(err.to_string().contains("step 200"), "{err}");

        let mut json = scale_json("#3b82f6");
        json["steps"]["300"] = "#8BB6FD".into();
        assert!(serde_json::from_value::<TonalScale>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_base_differing_from_anchor() {
        let mut json = scale_json("#3b82f6");
        json["baseColor"] = "#ff0000".into();
        let err = serde_json::from_value::<TonalScale>(json).unwrap_err();
        assert!(err.to_string().contains("anchor step 500"), "{err}");
    }

    #[test]
    fn deserialize_rejects_null_anchor_on_colored_scale() {
        let mut json = scale_json("#3b82f6");
        json["anchor"] = serde_json::Value::Null;
        assert!(serde_json::from_value::<TonalScale>(json).is_err());

        let mut json = scale_json("#3b82f6");
        json.as_object_mut().unwrap().remove("anchor");
        assert!(serde_json::from_value::<TonalScale>(json).is_err());
    }

    #[test]
    fn deserialize_accepts_fallback() {
        let scale = generate("nope", "", Provenance::Image);
        let back: TonalScale =
            serde_json::from_value(serde_json::to_value(&scale).unwrap()).unwrap();
        assert_eq!(back, scale);
    }

    #[test]
    fn deserialize_rejects_missing_steps() {
        let scale = generate("#3b82f6", "x", Provenance::Manual);
        let mut json = serde_json::to_value(&scale).unwrap();
        json["steps"].as_object_mut().unwrap().remove("950");
        assert!(serde_json::from_value::<TonalScale>(json).is_err());
    }
}

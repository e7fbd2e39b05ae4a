// SPDX-License-Identifier: MIT
//
// chroma — tonal color scales from the command line.
//
// This binary is a thin caller around the engine crates:
//
//   chroma-color → hex parsing, OKLCH conversion, interpolation
//   chroma-scale → scales, variants, foreground selection, random seeds
//
// Every subcommand parses its arguments, calls one engine entry point and
// renders the result as aligned text or pretty JSON on stdout. Engine
// warnings (an unparsable seed turning into an all-black scale, say) go to
// stderr through tracing, so piping JSON stays clean.
//
//   chroma scale "#3b82f6" --name "Primary Blue" --variants
//   chroma variant "#3b82f6" --kind dark
//   chroma contrast "#1d4ed8"
//   chroma random --count 5 --seed 42

use std::io::{self, Write};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use chroma_color::Color;
use chroma_scale::{
    Provenance, TonalScale, VariantKind, contrast_ratio, derive_variant, generate, lucky_scales,
    pick_foreground, random_colors, spawn_variant,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chroma")]
#[command(about = "Tonal color scales from a single seed color")]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(long, short, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Log filter directive (e.g. `warn`, `chroma_scale=debug`); falls back
    /// to `RUST_LOG`, then `warn`
    #[arg(long, env = "CHROMA_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the eleven-step scale for a seed color
    Scale {
        /// Seed color: 3 or 6 hex digits, `#` optional
        seed: String,

        /// Display name (defaults to "Scale #rrggbb")
        #[arg(long, short, default_value = "")]
        name: String,

        /// Where the seed came from
        #[arg(long, short, default_value = "manual")]
        source: Provenance,

        /// Also emit the darker and lighter variant scales
        #[arg(long)]
        variants: bool,
    },

    /// Derive a darker or lighter variant of a color
    Variant {
        /// Seed color
        seed: String,

        /// `dark` or `light`
        #[arg(long, short)]
        kind: VariantKind,
    },

    /// Pick white or black text for a background color
    Contrast {
        /// Background color
        background: String,
    },

    /// Random vivid seed colors and their scales
    Random {
        /// How many colors (1 to 20)
        #[arg(long, short, default_value_t = 5)]
        count: usize,

        /// PRNG seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u32>,

        /// Fan hues out from this color instead of picking freely
        #[arg(long)]
        base: Option<Color>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(cli.command, cli.format, &mut out) {
        eprintln!("chroma: {e:#}");
        process::exit(1);
    }
}

fn init_logging(directive: Option<&str>) {
    let filter = directive
        .map_or_else(
            || EnvFilter::try_from_default_env().ok(),
            |d| EnvFilter::try_new(d).ok(),
        )
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command, format: Format, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Scale {
            seed,
            name,
            source,
            variants,
        } => {
            let scale = generate(&seed, &name, source);
            let mut scales = vec![];
            if variants && !scale.is_fallback() {
                let dark = spawn_variant(&scale, VariantKind::Dark);
                let light = spawn_variant(&scale, VariantKind::Light);
                scales.extend([scale, dark, light]);
            } else {
                scales.push(scale);
            }
            write_scales(out, &scales, format)
        }
        Command::Variant { seed, kind } => {
            let color = derive_variant(&seed, kind);
            match format {
                Format::Text => writeln!(out, "{color}")?,
                Format::Json => write_json(
                    out,
                    &json!({ "seed": seed, "kind": kind.as_str(), "color": color }),
                )?,
            }
            Ok(())
        }
        Command::Contrast { background } => {
            let foreground = pick_foreground(&background);
            match format {
                Format::Text => writeln!(out, "{foreground}")?,
                Format::Json => {
                    let ratio = Color::parse(&background)
                        .ok()
                        .map(|bg| contrast_ratio(bg, Color::WHITE));
                    write_json(
                        out,
                        &json!({
                            "background": background,
                            "foreground": foreground,
                            "whiteContrast": ratio,
                        }),
                    )?;
                }
            }
            Ok(())
        }
        Command::Random { count, seed, base } => {
            let seed = seed.unwrap_or_else(clock_seed);
            debug!(seed, count, "generating random seed colors");
            let scales = base.map_or_else(
                || lucky_scales(count, seed),
                |base| {
                    random_colors(count, seed, Some(base))
                        .iter()
                        .enumerate()
                        .map(|(i, hex)| {
                            generate(hex, &format!("Random Color {}", i + 1), Provenance::Manual)
                        })
                        .collect()
                },
            );
            write_scales(out, &scales, format)
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| d.subsec_nanos())
}

// ─── Rendering ──────────────────────────────────────────────────────────────

fn write_scales(out: &mut impl Write, scales: &[TonalScale], format: Format) -> Result<()> {
    match format {
        Format::Json => {
            if let [scale] = scales {
                write_json(out, scale)
            } else {
                write_json(out, &scales)
            }
        }
        Format::Text => {
            for (i, scale) in scales.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_scale_text(out, scale)?;
            }
            Ok(())
        }
    }
}

/// One header line, then one line per step: `500 #3b82f6 fg=#000000 *`.
/// The `*` marks the anchor step.
fn write_scale_text(out: &mut impl Write, scale: &TonalScale) -> io::Result<()> {
    writeln!(
        out,
        "{} {} [{}]",
        scale.name(),
        scale.base_color(),
        scale.provenance()
    )?;
    for (step, hex) in scale.iter() {
        let fg = pick_foreground(hex);
        let marker = if scale.anchor() == Some(step) { " *" } else { "" };
        writeln!(out, "{step} {hex} fg={fg}{marker}")?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    writeln!(out, "{text}").context("writing output")?;
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use spektra_core::raster::MAX_DIMENSION;
use spektra_core::{GradientKind, GradientStore, StopPatch, parse_color};

use crate::storage;

/// Command-line interface of the `spektra` binary.
#[derive(Parser, Debug)]
#[command(
    name = "spektra",
    version,
    about = "Spektra: build CSS gradients from the terminal",
    long_about = "Spektra edits linear, radial and conic gradients and emits the matching CSS. \
                  Run `spektra edit` for an interactive session or use the one-shot commands."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long = "log", global = true, value_name = "FILTER")]
    pub log: Option<String>,

    /// Where saved colors are kept
    #[arg(
        long = "palette-file",
        global = true,
        env = "SPEKTRA_PALETTE_FILE",
        value_name = "PATH"
    )]
    pub palette_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive editor reading commands from stdin
    Edit {
        /// Start from a saved gradient
        #[arg(long, value_name = "FILE")]
        load: Option<PathBuf>,
    },

    /// Print the CSS for a gradient
    Css {
        #[command(flatten)]
        gradient: GradientArgs,

        /// Also copy `background: <css>;` to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Render a gradient to a PNG file
    Export {
        /// Output image path
        output: PathBuf,

        #[command(flatten)]
        gradient: GradientArgs,

        #[arg(long, value_name = "N")]
        width: Option<u32>,

        #[arg(long, value_name = "N")]
        height: Option<u32>,
    },

    /// Show or edit the saved color palette
    Palette {
        #[command(subcommand)]
        action: Option<PaletteCommand>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PaletteCommand {
    /// List saved colors, most recent first
    List,
    /// Save a color
    Add { color: String },
    /// Forget a color
    Remove { color: String },
    /// Forget every color
    Clear,
}

/// Gradient described on the command line.
///
/// Options are applied on top of the default gradient (or `--load`), in the
/// order type, angle, center, stops.
#[derive(Args, Debug, Clone, Default)]
pub struct GradientArgs {
    /// Start from a saved gradient
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// linear, radial or conic
    #[arg(long = "type", value_name = "KIND")]
    pub kind: Option<GradientKind>,

    /// Angle in degrees (linear and conic)
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Center in percent (radial and conic)
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
    pub center: Option<Center>,

    /// Color stop; repeat for more. Replaces the starting stops.
    #[arg(long = "stop", value_name = "COLOR@POS")]
    pub stops: Vec<StopSpec>,
}

impl GradientArgs {
    /// Builds the store these options describe.
    pub fn build_store(&self) -> Result<GradientStore> {
        let mut store = GradientStore::new();
        if let Some(path) = &self.load {
            store.replace(storage::load_gradient(path)?);
        }
        if let Some(kind) = self.kind {
            store.set_kind(kind);
        }
        if let Some(angle) = self.angle {
            store.set_angle(angle);
        }
        if let Some(Center(x, y)) = self.center {
            store.set_center(x, y);
        }

        if !self.stops.is_empty() {
            for spec in &self.stops {
                parse_color(&spec.color).with_context(|| format!("--stop {spec}"))?;
            }
            let old: Vec<_> = store.config().color_stops.iter().map(|s| s.id.clone()).collect();
            for spec in &self.stops {
                let id = store.add_color_stop(spec.color.clone());
                store.update_color_stop(&id, StopPatch::position(spec.position))?;
            }
            for id in &old {
                store.remove_color_stop(id);
            }
        }
        Ok(store)
    }
}

/// `X,Y` pair in percent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Center(pub f64, pub f64);

impl FromStr for Center {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
        let num = |v: &str| v.trim().parse::<f64>().map_err(|_| format!("{v:?} is not a number"));
        Ok(Self(num(x)?, num(y)?))
    }
}

/// `COLOR@POS`, e.g. `#ff0080@0` or `rgb(0 0 0 / 50%)@75%`.
#[derive(Debug, Clone, PartialEq)]
pub struct StopSpec {
    pub color: String,
    pub position: f64,
}

impl FromStr for StopSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split at the last '@' so the color part is never cut.
        let (color, pos) = s.rsplit_once('@').ok_or_else(|| format!("expected COLOR@POS, got {s:?}"))?;
        let color = color.trim();
        if color.is_empty() {
            return Err(format!("missing color in {s:?}"));
        }
        let position = pos
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| format!("{pos:?} is not a position"))?;
        Ok(Self { color: color.to_string(), position })
    }
}

impl std::fmt::Display for StopSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.color, self.position)
    }
}

/// Rejects sizes the exporter cannot produce, with the flag name in the message.
pub fn export_size(width: u32, height: u32) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        bail!("--width and --height must be at least 1 (got {width}x{height})");
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        bail!("--width and --height must be at most {MAX_DIMENSION} (got {width}x{height})");
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spektra").chain(args.iter().copied())).unwrap()
    }

    fn gradient(args: &[&str]) -> GradientArgs {
        let mut full = vec!["css"];
        full.extend_from_slice(args);
        match parse(&full).command {
            Command::Css { gradient, .. } => gradient,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    // ── argument parsing ──────────────────────────────────────────────────

    #[test]
    fn css_with_options() {
        let g = gradient(&["--type", "conic", "--angle", "-30", "--center", "10,20"]);
        assert_eq!(g.kind, Some(GradientKind::Conic));
        assert_eq!(g.angle, Some(-30.0));
        assert_eq!(g.center, Some(Center(10.0, 20.0)));
    }

    #[test]
    fn stops_repeat() {
        let g = gradient(&["--stop", "red@0", "--stop", "rgb(0 0 255 / 50%)@75%"]);
        assert_eq!(
            g.stops,
            vec![
                StopSpec { color: "red".into(), position: 0.0 },
                StopSpec { color: "rgb(0 0 255 / 50%)".into(), position: 75.0 },
            ]
        );
    }

    #[test]
    fn bad_values_are_rejected() {
        for args in [
            ["css", "--type", "diamond"],
            ["css", "--center", "10"],
            ["css", "--stop", "red"],
            ["css", "--stop", "@50"],
        ] {
            assert!(Cli::try_parse_from(std::iter::once("spektra").chain(args)).is_err(), "{args:?}");
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["palette", "add", "#abc", "--palette-file", "/tmp/p.json", "--log", "debug"]);
        assert_eq!(cli.palette_file, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(cli.log.as_deref(), Some("debug"));
        match cli.command {
            Command::Palette { action } => {
                assert_eq!(action, Some(PaletteCommand::Add { color: "#abc".into() }))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn export_takes_output_and_size() {
        match parse(&["export", "out.png", "--width", "64", "--type", "radial"]).command {
            Command::Export { output, gradient, width, height } => {
                assert_eq!(output, PathBuf::from("out.png"));
                assert_eq!(gradient.kind, Some(GradientKind::Radial));
                assert_eq!((width, height), (Some(64), None));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    // ── store building ────────────────────────────────────────────────────

    #[test]
    fn no_options_gives_default_gradient() {
        let store = GradientArgs::default().build_store().unwrap();
        assert_eq!(store.css(), "linear-gradient(90deg, #FF0080 0%, #7928CA 100%)");
    }

    #[test]
    fn options_build_expected_css() {
        let store = gradient(&[
            "--type", "radial", "--center", "30,70",
            "--stop", "red@0", "--stop", "blue@50", "--stop", "green@100",
        ])
        .build_store()
        .unwrap();
        assert_eq!(
            store.css(),
            "radial-gradient(circle at 30% 70%, red 0%, blue 50%, green 100%)"
        );
    }

    #[test]
    fn invalid_stop_color_fails() {
        let err = gradient(&["--stop", "chartreuse-ish@10"]).build_store().unwrap_err();
        assert!(format!("{err:#}").contains("--stop chartreuse-ish@10"));
    }

    #[test]
    fn load_then_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.json");
        let mut saved = GradientStore::new();
        saved.set_kind(GradientKind::Conic);
        saved.set_angle(45.0);
        storage::save_gradient(&path, saved.config()).unwrap();

        let args = GradientArgs { load: Some(path), angle: Some(10.0), ..Default::default() };
        let store = args.build_store().unwrap();
        assert!(store.css().starts_with("conic-gradient(from 10deg at 50% 50%"));
    }

    #[test]
    fn zero_export_size_rejected() {
        assert!(export_size(0, 10).is_err());
        assert!(export_size(MAX_DIMENSION + 1, 10).is_err());
        assert!(export_size(u32::MAX, u32::MAX).is_err());
        assert_eq!(export_size(MAX_DIMENSION, 1).unwrap(), (MAX_DIMENSION, 1));
        assert_eq!(export_size(3, 4).unwrap(), (3, 4));
    }
}

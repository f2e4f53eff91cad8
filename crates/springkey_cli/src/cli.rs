//! Command-line interface for `springkey`.
//!
//! # Examples
//!
//! ```bash
//! # Print the displacement curve, one value per line
//! springkey sample --from 40
//!
//! # Print a CSS descriptor with WebKit and Gecko fallbacks
//! springkey css --from 40 --property translate-x --legacy-prefixes
//!
//! # Stream live frames at 60 fps
//! springkey live --from 40 --fps 60
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Damped spring curves as samples, CSS keyframes, or live frames.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "springkey",
    author,
    version,
    about = "Damped spring curves as samples, CSS keyframes, or live frames"
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short = 'c', global = true, env = "SPRINGKEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// What to produce
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the sampled displacement curve
    Sample(SampleArgs),

    /// Print a CSS keyframes descriptor for the curve
    Css(CssArgs),

    /// Step the spring in real time, printing one value per frame
    Live(LiveArgs),
}

/// Spring options shared by every subcommand. Unset values fall back to
/// the configuration file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct SpringArgs {
    /// Initial displacement
    #[arg(long = "from", short = 'x', allow_negative_numbers = true)]
    pub from: Option<f64>,

    /// Initial velocity
    #[arg(long, allow_negative_numbers = true)]
    pub velocity: Option<f64>,

    /// Particle mass (> 0)
    #[arg(long, short = 'm')]
    pub mass: Option<f64>,

    /// Spring stiffness (>= 0)
    #[arg(long, short = 'k')]
    pub stiffness: Option<f64>,

    /// Damping coefficient (>= 0)
    #[arg(long, short = 'b')]
    pub damping: Option<f64>,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Maximum integration steps before giving up
    #[arg(long)]
    pub max_steps: Option<usize>,
}

/// Arguments for `sample`.
#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    #[command(flatten)]
    pub spring: SpringArgs,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

/// Arguments for `css`.
#[derive(Args, Debug, Clone)]
pub struct CssArgs {
    #[command(flatten)]
    pub spring: SpringArgs,

    /// Animation name; generated when omitted
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Property the displacement drives
    #[arg(long, short = 'p', value_enum, default_value_t = Property::TranslateX)]
    pub property: Property,

    /// Unit appended to translate values
    #[arg(long, default_value = "px")]
    pub unit: String,

    /// Vendor prefix to emit, in cascade order (repeatable; use "" for the
    /// standard spelling)
    #[arg(long = "prefix", allow_hyphen_values = true)]
    pub prefixes: Vec<String>,

    /// Emit -webkit- and -moz- fallbacks before the standard rules
    #[arg(long, conflicts_with = "prefixes")]
    pub legacy_prefixes: bool,

    /// Seed for generated names
    #[arg(long, short = 's')]
    pub seed: Option<u64>,
}

/// Arguments for `live`.
#[derive(Args, Debug, Clone)]
pub struct LiveArgs {
    #[command(flatten)]
    pub spring: SpringArgs,

    /// Run frames back to back instead of pacing them
    #[arg(long)]
    pub immediate: bool,

    /// Stop after this many frames even if the spring is still moving
    #[arg(long)]
    pub max_frames: Option<usize>,
}

/// Curve output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One value per line
    #[default]
    Plain,
    /// JSON document with parameters and samples
    Json,
}

/// CSS property driven by the spring.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Property {
    /// transform: translateX
    #[default]
    TranslateX,
    /// transform: translateY
    TranslateY,
    /// transform: scale, settling at 1
    Scale,
    /// transform: rotate, in degrees
    Rotate,
    /// opacity, settling at 1
    Opacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sample_defaults() {
        let cli = Cli::try_parse_from(["springkey", "sample"]).unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.format, OutputFormat::Plain);
        assert!(args.spring.from.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_negative_values() {
        let cli =
            Cli::try_parse_from(["springkey", "sample", "--from", "-40", "--velocity", "-2.5"])
                .unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.spring.from, Some(-40.0));
        assert_eq!(args.spring.velocity, Some(-2.5));
    }

    #[test]
    fn parses_css_prefixes_in_order() {
        let cli = Cli::try_parse_from([
            "springkey",
            "css",
            "--prefix",
            "-moz-",
            "--prefix",
            "",
            "--property",
            "scale",
        ])
        .unwrap();
        let Command::Css(args) = cli.command else {
            panic!("expected css");
        };
        assert_eq!(args.prefixes, vec!["-moz-".to_string(), String::new()]);
        assert_eq!(args.property, Property::Scale);
    }

    #[test]
    fn legacy_conflicts_with_explicit_prefixes() {
        let result =
            Cli::try_parse_from(["springkey", "css", "--prefix", "-moz-", "--legacy-prefixes"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["springkey", "live", "-vv", "--immediate"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Live(args) = cli.command else {
            panic!("expected live");
        };
        assert!(args.immediate);
    }

    #[test]
    fn requires_subcommand() {
        assert!(Cli::try_parse_from(["springkey"]).is_err());
    }
}

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! # Springkey CLI
//!
//! Command-line front end for [`springkey`]: prints sampled spring curves,
//! CSS keyframe descriptors, or paced live frames.
//!
//! Every subcommand writes its result to the supplied writer, so the same
//! code paths serve the binary and the tests.

pub mod cli;
pub mod config;

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::Path;

use anyhow::{Context, bail};
use serde::Serialize;
use springkey::{
    Animation, Dialects, FrameScheduler, ImmediateScheduler, IntervalScheduler, LiveStepper,
    NameProvider, RandomNames, Sampler, SequentialNames, StopReason, mapper,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, CssArgs, LiveArgs, OutputFormat, Property, SampleArgs, SpringArgs};
use crate::config::{Config, SpringConfig};

/// Log filter for a `-v` count. `RUST_LOG` takes precedence when set.
pub fn log_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)))
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr log subscriber.
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Runs a parsed command line, writing results to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Command::Sample(args) => run_sample(cli.config.as_deref(), args, out),
        Command::Css(args) => run_css(cli.config.as_deref(), args, out),
        Command::Live(args) => run_live(cli.config.as_deref(), args, out),
    }
}

fn resolve(path: Option<&Path>, args: &SpringArgs) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path)?;
    config.apply_args(args)?;
    debug!(?config, "resolved configuration");
    Ok(config)
}

fn sampler(config: &Config) -> Sampler {
    Sampler::new().max_steps(config.max_steps)
}

#[derive(Serialize)]
struct CurveReport<'a> {
    spring: &'a SpringConfig,
    fps: u32,
    duration_ms: u64,
    samples: &'a [f64],
}

fn run_sample<W: Write>(path: Option<&Path>, args: &SampleArgs, out: &mut W) -> anyhow::Result<()> {
    let config = resolve(path, &args.spring)?;
    let s = &config.spring;
    let curve = sampler(&config)
        .sample(s.from, s.velocity, s.mass, s.stiffness, s.damping)
        .context("sampling failed")?;
    info!(samples = curve.len(), "sampled spring curve");

    match args.format {
        OutputFormat::Plain => {
            for x in &curve {
                writeln!(out, "{x}")?;
            }
        }
        OutputFormat::Json => {
            let report = CurveReport {
                spring: s,
                fps: config.fps,
                duration_ms: curve.duration_ms(config.fps),
                samples: curve.as_slice(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn mapper_for(property: Property, unit: &str) -> Box<dyn Fn(f64) -> String> {
    let unit = unit.to_string();
    match property {
        Property::TranslateX => Box::new(mapper::translate_x(unit)),
        Property::TranslateY => Box::new(mapper::translate_y(unit)),
        Property::Scale => Box::new(mapper::scale(1.0)),
        Property::Rotate => Box::new(mapper::rotate()),
        Property::Opacity => Box::new(mapper::opacity()),
    }
}

fn dialects_for(args: &CssArgs, config: &Config) -> Dialects {
    if args.legacy_prefixes {
        Dialects::legacy()
    } else if args.prefixes.is_empty() {
        config.dialects()
    } else {
        Dialects::new(args.prefixes.iter().cloned())
    }
}

fn names_for(args: &CssArgs, config: &Config) -> Box<dyn NameProvider> {
    if let Some(name) = &args.name {
        let name = name.clone();
        Box::new(move || name.clone())
    } else if let Some(seed) = args.seed {
        Box::new(RandomNames::new(config.name_prefix.clone(), seed))
    } else {
        Box::new(SequentialNames::new(config.name_prefix.clone()))
    }
}

fn run_css<W: Write>(path: Option<&Path>, args: &CssArgs, out: &mut W) -> anyhow::Result<()> {
    let config = resolve(path, &args.spring)?;
    let s = &config.spring;
    let mut names = names_for(args, &config);

    let descriptor = Animation::new(s.from, s.velocity)
        .mass(s.mass)
        .stiffness(s.stiffness)
        .damping(s.damping)
        .fps(config.fps)
        .sampler(sampler(&config))
        .dialects(dialects_for(args, &config))
        .build(names.as_mut(), mapper_for(args.property, &args.unit))
        .context("cannot build animation")?;
    info!(
        name = descriptor.name(),
        frames = descriptor.keyframes().len(),
        duration_ms = descriptor.duration_ms(),
        "built descriptor"
    );

    writeln!(out, "{descriptor}")?;
    Ok(())
}

fn run_live<W: Write>(path: Option<&Path>, args: &LiveArgs, out: &mut W) -> anyhow::Result<()> {
    let config = resolve(path, &args.spring)?;
    let s = &config.spring;
    let mut stepper = LiveStepper::from_state(s.from, s.velocity, s.mass, s.stiffness, s.damping)?;

    let cancel = stepper.cancel_token();
    let mut write_error = None;
    let on_tick = |x: f64| {
        if let Err(e) = writeln!(out, "{x}").and_then(|()| out.flush()) {
            write_error = Some(e);
            cancel.cancel();
        }
    };

    let budget = args.max_frames.unwrap_or(config.max_steps);
    let outcome = if args.immediate {
        stepper.run(&mut ImmediateScheduler::with_budget(budget), on_tick)
    } else {
        info!(fps = config.fps, "pacing live frames");
        stepper.run(&mut Budgeted::new(IntervalScheduler::fps(config.fps), budget), on_tick)
    };

    if let Some(e) = write_error {
        return Err(e).context("cannot write live frame");
    }
    info!(ticks = outcome.ticks, reason = ?outcome.reason, "live run finished");
    match outcome.reason {
        StopReason::Resting | StopReason::SchedulerStopped => Ok(()),
        StopReason::Cancelled => bail!("live run cancelled after {} frames", outcome.ticks),
        StopReason::Diverged => bail!("spring diverged after {} frames", outcome.ticks),
    }
}

/// Caps the frames another scheduler delivers.
struct Budgeted<S> {
    inner: S,
    budget: usize,
}

impl<S> Budgeted<S> {
    fn new(inner: S, budget: usize) -> Self {
        Self { inner, budget }
    }
}

impl<S: FrameScheduler> FrameScheduler for Budgeted<S> {
    fn drive(&mut self, frame: &mut dyn FnMut() -> ControlFlow<()>) {
        let mut remaining = self.budget;
        self.inner.drive(&mut || {
            if remaining == 0 {
                return ControlFlow::Break(());
            }
            remaining -= 1;
            frame()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("springkey").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn sample_plain_prints_one_value_per_line() {
        let out = run_args(&["sample"]).unwrap();
        assert_eq!(out.lines().count(), 19);
        assert_eq!(out.lines().next(), Some("-0.7"));
    }

    #[test]
    fn sample_json_reports_duration() {
        let out = run_args(&["sample", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["duration_ms"], 300);
        assert_eq!(value["fps"], 60);
        assert_eq!(value["samples"].as_array().unwrap().len(), 19);
        assert_eq!(value["spring"]["stiffness"], 170.0);
    }

    #[test]
    fn sample_diverging_spring_fails() {
        let err = run_args(&["sample", "--damping", "26"]).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("diverged"), "{chain}");
    }

    #[test]
    fn css_with_explicit_name() {
        let out = run_args(&["css", "--name", "slide", "--from", "40"]).unwrap();
        assert!(out.starts_with("@keyframes slide {0%{transform:translateX("));
        assert!(out.contains(".slide{animation-duration:"));
        assert!(out.trim_end().ends_with("animation-fill-mode:both;}"));
    }

    #[test]
    fn css_sequential_name_by_default() {
        let out = run_args(&["css"]).unwrap();
        assert!(out.starts_with("@keyframes spring-0 "));
        assert!(out.contains("animation-duration:300ms;"));
    }

    #[test]
    fn css_seeded_names_are_reproducible() {
        let a = run_args(&["css", "--seed", "7"]).unwrap();
        let b = run_args(&["css", "--seed", "7"]).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("@keyframes spring-"));
    }

    #[test]
    fn css_legacy_prefixes() {
        let out = run_args(&["css", "--legacy-prefixes", "--property", "opacity"]).unwrap();
        assert_eq!(out.matches("keyframes spring-0 {").count(), 3);
        assert!(out.starts_with("@-webkit-keyframes"));
        assert!(out.contains("opacity:"));
    }

    #[test]
    fn css_at_rest_is_an_error() {
        let err = run_args(&["css", "--from", "0"]).unwrap_err();
        assert!(format!("{err:#}").contains("empty"));
    }

    #[test]
    fn live_immediate_matches_sample() {
        let live = run_args(&["live", "--immediate"]).unwrap();
        let sampled = run_args(&["sample"]).unwrap();
        assert_eq!(live, sampled);
    }

    #[test]
    fn live_max_frames_stops_early() {
        let out = run_args(&["live", "--immediate", "--max-frames", "4", "--from", "40"]).unwrap();
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn live_paced_respects_budget() {
        let out = run_args(&["live", "--fps", "1000", "--max-frames", "3", "--from", "40"]).unwrap();
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn live_diverging_spring_fails() {
        let err = run_args(&["live", "--immediate", "--damping", "26"]).unwrap_err();
        assert!(err.to_string().contains("diverged after 215 frames"));
    }

    #[test]
    fn invalid_mass_is_reported() {
        assert!(run_args(&["sample", "--mass", "0"]).is_err());
    }
}

//! Animation descriptor assembly.
//!
//! A descriptor is the keyframe blocks for every dialect followed by one
//! class rule that plays them:
//!
//! ```text
//! @-moz-keyframes spin {0%{...}100%{...}}@keyframes spin {0%{...}100%{...}}
//! .spin{-moz-animation-duration:300ms;animation-duration:300ms;...}
//! ```
//!
//! (shown on two lines; the real output has no separators.)

use std::fmt;
use std::fmt::Write as _;

use tracing::debug;

use crate::error::Result;
use crate::keyframes::{Dialects, KeyframeSet, quantize, validate_name};
use crate::naming::NameProvider;
use crate::particle::{Particle, SpringParams};
use crate::sampler::{DEFAULT_FPS, Sampler};

/// Timing function applied to every generated animation. The easing is
/// already baked into the keyframes.
pub const TIMING_FUNCTION: &str = "linear";

/// Fill mode applied to every generated animation.
pub const FILL_MODE: &str = "both";

/// A named, timed keyframe animation ready to be rendered as CSS.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDescriptor {
    name: String,
    duration_ms: u64,
    keyframes: KeyframeSet,
    dialects: Dialects,
}

impl AnimationDescriptor {
    /// Quantizes `samples` and bundles them with a name, duration and
    /// dialect list.
    ///
    /// # Errors
    ///
    /// Fails on an empty curve, an invalid name, or an empty dialect list.
    pub fn new<F>(
        samples: &[f64],
        name: impl Into<String>,
        duration_ms: u64,
        mapper: F,
        dialects: Dialects,
    ) -> Result<Self>
    where
        F: Fn(f64) -> String,
    {
        let name = name.into();
        validate_name(&name)?;
        dialects.ensure_not_empty()?;
        let keyframes = quantize(samples, mapper)?;
        Ok(Self {
            name,
            duration_ms,
            keyframes,
            dialects,
        })
    }

    /// Animation and class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Playback duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// The quantized keyframes.
    pub fn keyframes(&self) -> &KeyframeSet {
        &self.keyframes
    }

    /// Dialects in cascade order.
    pub fn dialects(&self) -> &Dialects {
        &self.dialects
    }

    /// Renders the class rule, e.g.
    /// `.spin{animation-duration:300ms;animation-name:spin;...}`.
    pub fn render_rule(&self) -> String {
        let duration = format!("{}ms", self.duration_ms);
        let properties: [(&str, &str); 4] = [
            ("animation-duration", &duration),
            ("animation-name", &self.name),
            ("animation-timing-function", TIMING_FUNCTION),
            ("animation-fill-mode", FILL_MODE),
        ];

        let mut out = format!(".{}{{", self.name);
        for (property, value) in properties {
            for prefix in self.dialects.iter() {
                let _ = write!(out, "{prefix}{property}:{value};");
            }
        }
        out.push('}');
        out
    }

    /// Renders keyframes followed by the class rule.
    pub fn render(&self) -> String {
        let mut out = self.keyframes.render_blocks(&self.name, &self.dialects);
        out.push_str(&self.render_rule());
        out
    }
}

impl fmt::Display for AnimationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builds the descriptor text for a sampled curve.
///
/// # Example
///
/// ```rust
/// use springkey::{build_descriptor, Dialects};
///
/// let css = build_descriptor(&[0.5, 0.2, 0.05], "anim-test", 33, |v| v.to_string(), &Dialects::default())?;
/// assert!(css.starts_with("@keyframes anim-test {0%{0.5}50%{0.2}100%{0.05}}"));
/// assert!(css.ends_with(".anim-test{animation-duration:33ms;animation-name:anim-test;animation-timing-function:linear;animation-fill-mode:both;}"));
/// # Ok::<(), springkey::SpringError>(())
/// ```
pub fn build_descriptor<F>(
    samples: &[f64],
    name: &str,
    duration_ms: u64,
    mapper: F,
    dialects: &Dialects,
) -> Result<String>
where
    F: Fn(f64) -> String,
{
    AnimationDescriptor::new(samples, name, duration_ms, mapper, dialects.clone())
        .map(|descriptor| descriptor.render())
}

/// One-shot spring animation builder: sample, name, time and render.
///
/// # Example
///
/// ```rust
/// use springkey::{mapper, Animation, SequentialNames};
///
/// let mut names = SequentialNames::new("bounce-");
/// let descriptor = Animation::new(40.0, 0.0)
///     .stiffness(170.0)
///     .damping(1.0)
///     .build(&mut names, mapper::translate_x("px"))?;
///
/// assert_eq!(descriptor.name(), "bounce-0");
/// assert!(descriptor.duration_ms() > 0);
/// # Ok::<(), springkey::SpringError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Animation {
    x0: f64,
    v0: f64,
    mass: f64,
    stiffness: f64,
    damping: f64,
    fps: u32,
    sampler: Sampler,
    dialects: Dialects,
}

impl Animation {
    /// Starts from displacement `x0` and velocity `v0` with unit mass,
    /// default spring constants and the default frame rate.
    pub fn new(x0: f64, v0: f64) -> Self {
        Self {
            x0,
            v0,
            mass: 1.0,
            stiffness: SpringParams::default().stiffness(),
            damping: SpringParams::default().damping(),
            fps: DEFAULT_FPS,
            sampler: Sampler::new(),
            dialects: Dialects::default(),
        }
    }

    /// Sets the particle mass.
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the spring stiffness. Validated when [`build`](Self::build) runs.
    pub fn stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Sets the damping coefficient. Validated when [`build`](Self::build)
    /// runs.
    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the frame rate used to derive the duration.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Replaces the sampler (for example to change the step cap).
    pub fn sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Sets the dialects to emit.
    pub fn dialects(mut self, dialects: Dialects) -> Self {
        self.dialects = dialects;
        self
    }

    /// Samples the spring and assembles a descriptor named by `names`.
    ///
    /// # Errors
    ///
    /// Any precondition or convergence error from sampling, plus
    /// [`SpringError::EmptyCurve`](crate::SpringError::EmptyCurve) when the
    /// spring starts at rest.
    pub fn build<N, F>(&self, names: &mut N, mapper: F) -> Result<AnimationDescriptor>
    where
        N: NameProvider + ?Sized,
        F: Fn(f64) -> String,
    {
        let params = SpringParams::new(self.stiffness, self.damping)?;
        let particle = Particle::new(self.x0, self.v0, self.mass)?;
        let curve = self.sampler.run(particle, &params)?;
        let duration = curve.duration_ms(self.fps);
        let name = names.next_name();
        debug!(%name, frames = curve.len(), duration_ms = duration, "built spring animation");
        AnimationDescriptor::new(&curve, name, duration, mapper, self.dialects.clone())
    }
}

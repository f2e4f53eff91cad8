//! Curve sampling: run the integrator until rest and collect displacements.

use std::ops::Deref;

use tracing::{debug, warn};

use crate::error::{Result, SpringError};
use crate::particle::{Particle, SpringParams};

/// Default upper bound on integration steps for one curve.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Default frame rate used to turn a sample count into a duration.
pub const DEFAULT_FPS: u32 = 60;

/// Returns the length of one frame in milliseconds at `n` frames per second.
///
/// ```rust
/// use springkey::fps;
///
/// assert!((fps(60) - 16.666_666_666_666_668).abs() < 1e-12);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1000.0 / f64::from(n)
}

/// Duration in whole milliseconds for a curve of `sample_count` frames
/// played at `frames_per_second`.
///
/// The first keyframe sits at 0% and the last at 100%, so a curve of `n`
/// samples spans `n - 1` frame intervals. Curves with fewer than two samples
/// have zero duration.
///
/// ```rust
/// use springkey::duration_ms;
///
/// assert_eq!(duration_ms(0, 60), 0);
/// assert_eq!(duration_ms(1, 60), 0);
/// assert_eq!(duration_ms(61, 60), 1000);
/// ```
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn duration_ms(sample_count: usize, frames_per_second: u32) -> u64 {
    if sample_count <= 1 || frames_per_second == 0 {
        return 0;
    }
    let intervals = (sample_count - 1) as f64;
    (intervals * fps(frames_per_second)).round() as u64
}

/// Displacements recorded one per step until the particle came to rest.
///
/// The first value is the displacement after the first step, not the
/// initial displacement. The resting state is never included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSequence {
    samples: Vec<f64>,
}

impl SampleSequence {
    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Consumes the sequence and returns the underlying vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }

    /// Duration of this curve at the given frame rate.
    pub fn duration_ms(&self, frames_per_second: u32) -> u64 {
        duration_ms(self.samples.len(), frames_per_second)
    }
}

impl Deref for SampleSequence {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

impl From<Vec<f64>> for SampleSequence {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

impl IntoIterator for SampleSequence {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Configurable curve sampler.
///
/// # Example
///
/// ```rust
/// use springkey::{Particle, Sampler, SpringParams};
///
/// let sampler = Sampler::new().max_steps(500);
/// let curve = sampler.run(
///     Particle::new(1.0, 0.0, 1.0)?,
///     &SpringParams::new(170.0, 1.0)?,
/// )?;
/// assert!(!curve.is_empty());
/// # Ok::<(), springkey::SpringError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    max_steps: usize,
}

impl Sampler {
    /// Creates a sampler with [`DEFAULT_MAX_STEPS`].
    pub fn new() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Sets the step cap. The cap is at least one step, so a particle that
    /// rests on its first step always yields an empty curve.
    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps.max(1);
        self
    }

    /// Returns the configured step cap.
    pub fn step_limit(&self) -> usize {
        self.max_steps
    }

    /// Steps `particle` until it rests and returns every non-resting
    /// displacement.
    ///
    /// # Errors
    ///
    /// [`SpringError::Diverged`] when the state overflows, and
    /// [`SpringError::DidNotConverge`] when the cap is reached first.
    pub fn run(&self, mut particle: Particle, params: &SpringParams) -> Result<SampleSequence> {
        let mut samples = Vec::new();

        for step in 1..=self.max_steps {
            let displacement = particle.step(params);
            if !particle.is_finite() {
                warn!(step, samples = samples.len(), "spring diverged");
                return Err(SpringError::Diverged { step });
            }
            if particle.is_resting() {
                debug!(
                    samples = samples.len(),
                    stiffness = params.stiffness(),
                    damping = params.damping(),
                    "spring came to rest"
                );
                return Ok(SampleSequence { samples });
            }
            samples.push(displacement);
        }

        warn!(max_steps = self.max_steps, "spring did not come to rest");
        Err(SpringError::DidNotConverge {
            steps: self.max_steps,
        })
    }

    /// Validates raw inputs and runs the sampler.
    pub fn sample(
        &self,
        x0: f64,
        v0: f64,
        mass: f64,
        stiffness: f64,
        damping: f64,
    ) -> Result<SampleSequence> {
        let particle = Particle::new(x0, v0, mass)?;
        let params = SpringParams::new(stiffness, damping)?;
        self.run(particle, &params)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples a spring curve with the default step cap.
///
/// # Example
///
/// ```rust
/// use springkey::sample;
///
/// let curve = sample(1.0, 0.0, 1.0, 170.0, 1.0)?;
/// assert_eq!(curve.len(), 19);
///
/// // Already at rest: nothing to animate.
/// assert!(sample(0.0, 0.0, 1.0, 170.0, 1.0)?.is_empty());
/// # Ok::<(), springkey::SpringError>(())
/// ```
pub fn sample(x0: f64, v0: f64, mass: f64, stiffness: f64, damping: f64) -> Result<SampleSequence> {
    Sampler::new().sample(x0, v0, mass, stiffness, damping)
}

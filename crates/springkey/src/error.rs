//! Error types for spring simulation and descriptor generation.

use thiserror::Error;

/// Errors produced while validating inputs, sampling a spring, or assembling
/// an animation descriptor.
///
/// Every operation in this crate is pure once its preconditions hold, so the
/// variants split into two families:
///
/// | Family | Variants | Meaning |
/// |--------|----------|---------|
/// | Precondition | `InvalidMass`, `InvalidParameter`, `NonFiniteState`, `EmptyCurve`, `InvalidName`, `NoDialects` | The caller passed something the model cannot use |
/// | Convergence | `DidNotConverge`, `Diverged` | The inputs were legal but the motion never settled |
///
/// # Example
///
/// ```rust
/// use springkey::{sample, SpringError};
///
/// // No restoring force and no damping: the particle drifts forever.
/// let err = sample(0.0, 1.0, 1.0, 0.0, 0.0).unwrap_err();
/// assert!(err.is_convergence_failure());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpringError {
    /// Mass was zero, negative, or not finite.
    ///
    /// The integrator divides by mass on every step, so this is rejected
    /// up front instead of letting NaN or infinity leak into the curve.
    #[error("invalid mass {0}: mass must be a finite value greater than zero")]
    InvalidMass(f64),

    /// A spring constant was negative or not finite.
    #[error("invalid {name} {value}: must be a finite value >= 0")]
    InvalidParameter {
        /// Which parameter was rejected (`"stiffness"` or `"damping"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The initial displacement or velocity was not finite.
    #[error("initial state is not finite (displacement {displacement}, velocity {velocity})")]
    NonFiniteState {
        /// Initial displacement.
        displacement: f64,
        /// Initial velocity.
        velocity: f64,
    },

    /// The sampler hit its step cap before the particle came to rest.
    ///
    /// # Recovery
    ///
    /// Raise the cap with [`Sampler::max_steps`](crate::Sampler::max_steps)
    /// or add damping.
    #[error("spring did not come to rest within {steps} steps")]
    DidNotConverge {
        /// The cap that was exceeded.
        steps: usize,
    },

    /// The particle state overflowed to infinity or NaN.
    ///
    /// Happens when the damping/mass ratio or stiffness amplifies motion
    /// instead of decaying it.
    #[error("spring diverged at step {step}: state is no longer finite")]
    Diverged {
        /// The 1-based step on which the state stopped being finite.
        step: usize,
    },

    /// A keyframe set was requested for a curve with no samples.
    #[error("cannot build keyframes from an empty curve")]
    EmptyCurve,

    /// The animation name is not a usable CSS identifier.
    #[error("invalid animation name {0:?}")]
    InvalidName(String),

    /// The dialect list was empty, so nothing would be emitted.
    #[error("at least one style dialect is required")]
    NoDialects,
}

impl SpringError {
    /// Returns true if the error reports a violated precondition.
    pub fn is_precondition(&self) -> bool {
        !self.is_convergence_failure()
    }

    /// Returns true if the motion failed to settle.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::DidNotConverge { .. } | Self::Diverged { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpringError>;

//! Damped spring force model and the single-particle integrator.
//!
//! The integrator is a fixed-step semi-implicit Euler scheme:
//!
//! ```text
//! a  = force(x, v, k, b) / m
//! v += a
//! x += v / 100
//! ```
//!
//! The velocity update feeds the displacement update of the same step. Every
//! timing value downstream (sample counts, animation durations) depends on
//! this exact order of operations, so it must not be rearranged.

use crate::error::{Result, SpringError};

/// Displacement is scaled by this divisor when integrating velocity.
pub const DISPLACEMENT_DIVISOR: f64 = 100.0;

/// Below this absolute velocity a particle can be considered at rest.
pub const REST_VELOCITY: f64 = 0.2;

/// Hooke's law with linear damping.
///
/// Returns `-(stiffness * displacement) - (damping * velocity)`.
///
/// # Example
///
/// ```rust
/// use springkey::force;
///
/// assert_eq!(force(1.0, 0.0, 1.0, 0.0), -1.0);
/// assert_eq!(force(0.0, 1.0, 0.0, 1.0), -1.0);
/// ```
#[inline]
pub fn force(displacement: f64, velocity: f64, stiffness: f64, damping: f64) -> f64 {
    -(stiffness * displacement) - (damping * velocity)
}

/// Spring constants for one simulation run.
///
/// # Example
///
/// ```rust
/// use springkey::SpringParams;
///
/// let params = SpringParams::new(170.0, 1.0)?;
/// assert_eq!(params.stiffness(), 170.0);
/// # Ok::<(), springkey::SpringError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    stiffness: f64,
    damping: f64,
}

impl SpringParams {
    /// Creates a parameter set, rejecting negative or non-finite constants.
    pub fn new(stiffness: f64, damping: f64) -> Result<Self> {
        check_constant("stiffness", stiffness)?;
        check_constant("damping", damping)?;
        Ok(Self { stiffness, damping })
    }

    /// Spring stiffness `k`.
    #[inline]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping coefficient `b`.
    #[inline]
    pub fn damping(&self) -> f64 {
        self.damping
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 1.0,
        }
    }
}

fn check_constant(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SpringError::InvalidParameter { name, value })
    }
}

/// A point mass attached to a spring anchored at zero.
///
/// Mass is fixed at construction; displacement and velocity change on every
/// [`step`](Particle::step).
///
/// # Example
///
/// ```rust
/// use springkey::{Particle, SpringParams};
///
/// let params = SpringParams::new(170.0, 1.0)?;
/// let mut particle = Particle::new(1.0, 0.0, 1.0)?;
///
/// while !particle.is_resting() {
///     particle.step(&params);
/// }
/// assert_eq!(particle.displacement().round(), 0.0);
/// # Ok::<(), springkey::SpringError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    displacement: f64,
    velocity: f64,
    mass: f64,
}

impl Particle {
    /// Creates a particle with the given initial state.
    ///
    /// # Errors
    ///
    /// [`SpringError::InvalidMass`] if `mass <= 0` or is not finite, and
    /// [`SpringError::NonFiniteState`] if either initial value is not finite.
    pub fn new(displacement: f64, velocity: f64, mass: f64) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SpringError::InvalidMass(mass));
        }
        if !(displacement.is_finite() && velocity.is_finite()) {
            return Err(SpringError::NonFiniteState {
                displacement,
                velocity,
            });
        }
        Ok(Self {
            displacement,
            velocity,
            mass,
        })
    }

    /// Creates a unit-mass particle.
    pub fn with_unit_mass(displacement: f64, velocity: f64) -> Result<Self> {
        Self::new(displacement, velocity, 1.0)
    }

    /// Distance from equilibrium.
    #[inline]
    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// Current velocity per step.
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The particle's mass.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Advances the particle by one fixed step and returns the new
    /// displacement.
    #[inline]
    pub fn step(&mut self, params: &SpringParams) -> f64 {
        let acceleration = force(
            self.displacement,
            self.velocity,
            params.stiffness,
            params.damping,
        ) / self.mass;
        self.velocity += acceleration;
        self.displacement += self.velocity / DISPLACEMENT_DIVISOR;
        self.displacement
    }

    /// Returns the state one step later, leaving `self` untouched.
    #[inline]
    pub fn stepped(mut self, params: &SpringParams) -> Self {
        self.step(params);
        self
    }

    /// Heuristic rest test: displacement rounds to zero and speed is below
    /// [`REST_VELOCITY`].
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.displacement.round() == 0.0 && self.velocity.abs() < REST_VELOCITY
    }

    /// Returns true while both displacement and velocity are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.displacement.is_finite() && self.velocity.is_finite()
    }
}

#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::float_cmp)]

//! # Springkey
//!
//! Damped spring motion turned into animation data.
//!
//! Springkey provides:
//! - **Particle**: a point mass on a damped spring, advanced one fixed step
//!   at a time
//! - **Sampler**: runs a particle until it rests and records its curve
//! - **Keyframes**: lays a curve onto a 0–100% timeline and renders CSS
//!   `@keyframes` plus the class rule that plays them
//! - **Live stepping**: per-frame callbacks driven by an injected scheduler
//!
//! ## Sampling Example
//!
//! ```rust
//! use springkey::sample;
//!
//! // Start one unit from equilibrium, at rest.
//! let curve = sample(1.0, 0.0, 1.0, 170.0, 1.0)?;
//!
//! assert_eq!(curve.len(), 19);
//! assert_eq!(curve.duration_ms(60), 300);
//! # Ok::<(), springkey::SpringError>(())
//! ```
//!
//! ## Descriptor Example
//!
//! ```rust
//! use springkey::{build_descriptor, mapper, sample, Dialects};
//!
//! let curve = sample(40.0, 0.0, 1.0, 170.0, 1.0)?;
//! let css = build_descriptor(
//!     &curve,
//!     "slide-in",
//!     curve.duration_ms(60),
//!     mapper::translate_x("px"),
//!     &Dialects::new(["-webkit-", ""]),
//! )?;
//!
//! assert!(css.starts_with("@-webkit-keyframes slide-in {0%{transform:translateX("));
//! # Ok::<(), springkey::SpringError>(())
//! ```
//!
//! ## Live Example
//!
//! ```rust
//! use springkey::{run_live, IntervalScheduler};
//!
//! let outcome = run_live(
//!     1.0, 0.0, 1.0, 170.0, 1.0,
//!     &mut IntervalScheduler::fps(240),
//!     |x| println!("{x}"),
//! )?;
//! println!("{} frames", outcome.ticks);
//! # Ok::<(), springkey::SpringError>(())
//! ```
//!
//! ## Stability
//!
//! The integrator is semi-implicit Euler with velocity in per-step units
//! and displacement advanced by `velocity / 100`. With `c = damping / mass`
//! and `w = stiffness / mass` it settles when `0 < c < 2` and
//! `w < 100 * (4 - 2c)`; outside that region the motion grows until it is
//! reported as [`SpringError::Diverged`] or [`SpringError::DidNotConverge`].

mod descriptor;
mod error;
mod keyframes;
mod live;
pub mod mapper;
mod naming;
mod particle;
mod sampler;

pub use descriptor::{Animation, AnimationDescriptor, FILL_MODE, TIMING_FUNCTION, build_descriptor};
pub use error::{Result, SpringError};
pub use keyframes::{
    Dialects, Keyframe, KeyframeSet, PERCENT_PRECISION, quantize, round_percent, validate_name,
};
#[cfg(feature = "async")]
pub use live::run_live_async;
pub use live::{
    CancelToken, FrameScheduler, ImmediateScheduler, IntervalScheduler, LiveOutcome, LiveStepper,
    StopReason, Tick, run_live,
};
pub use naming::{NameProvider, RandomNames, SequentialNames};
pub use particle::{DISPLACEMENT_DIVISOR, Particle, REST_VELOCITY, SpringParams, force};
pub use sampler::{DEFAULT_FPS, DEFAULT_MAX_STEPS, SampleSequence, Sampler, duration_ms, fps, sample};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::descriptor::{Animation, AnimationDescriptor, build_descriptor};
    pub use crate::error::{Result, SpringError};
    pub use crate::keyframes::{Dialects, KeyframeSet, quantize};
    pub use crate::live::{FrameScheduler, LiveStepper, StopReason, run_live};
    pub use crate::naming::{NameProvider, RandomNames, SequentialNames};
    pub use crate::particle::{Particle, SpringParams, force};
    pub use crate::sampler::{SampleSequence, Sampler, sample};
}

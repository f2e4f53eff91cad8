//! Real-time, callback-driven spring stepping.
//!
//! A [`LiveStepper`] advances its particle once per display frame and hands
//! each displacement to a callback, without sampling the curve up front.
//! Frames are delivered by a [`FrameScheduler`], so the stepper never needs
//! to know which platform primitive paces it.
//!
//! # Example
//!
//! ```rust
//! use springkey::{run_live, ImmediateScheduler, StopReason};
//!
//! let mut frames = Vec::new();
//! let outcome = run_live(
//!     1.0, 0.0, 1.0, 170.0, 1.0,
//!     &mut ImmediateScheduler::new(),
//!     |x| frames.push(x),
//! )?;
//!
//! assert_eq!(outcome.reason, StopReason::Resting);
//! assert_eq!(outcome.ticks, frames.len());
//! # Ok::<(), springkey::SpringError>(())
//! ```

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::particle::{Particle, SpringParams};

/// Why a live run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The particle came to rest. This is the normal ending.
    Resting,
    /// The run's [`CancelToken`] was triggered.
    Cancelled,
    /// The particle state stopped being finite.
    Diverged,
    /// The scheduler stopped delivering frames.
    SchedulerStopped,
}

/// Result of one [`LiveStepper::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The callback ran; schedule another frame.
    Continue,
    /// The run is over; no callback ran.
    Stopped(StopReason),
}

/// Summary of a finished live run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveOutcome {
    /// Number of callback invocations.
    pub ticks: usize,
    /// Why the run ended.
    pub reason: StopReason,
}

/// Shared stop flag, checked before every resumption.
///
/// Clones refer to the same flag, so a token can be handed to another
/// thread or UI handler while the stepper runs.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Delivers frames to a running animation.
///
/// Implementations call `frame` once per refresh tick, in delivery order,
/// and stop as soon as it returns [`ControlFlow::Break`]. Returning early is
/// allowed and ends the run with [`StopReason::SchedulerStopped`].
pub trait FrameScheduler {
    /// Drives `frame` until it breaks or the scheduler has no more ticks.
    fn drive(&mut self, frame: &mut dyn FnMut() -> ControlFlow<()>);
}

/// Runs frames back to back with no pacing.
///
/// Useful for headless rendering and tests. An optional budget bounds the
/// number of frames delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler {
    budget: Option<usize>,
}

impl ImmediateScheduler {
    /// Unbounded scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler that delivers at most `frames` frames.
    pub fn with_budget(frames: usize) -> Self {
        Self {
            budget: Some(frames),
        }
    }
}

impl FrameScheduler for ImmediateScheduler {
    fn drive(&mut self, frame: &mut dyn FnMut() -> ControlFlow<()>) {
        let mut delivered = 0;
        while self.budget.is_none_or(|budget| delivered < budget) {
            delivered += 1;
            if frame().is_break() {
                break;
            }
        }
    }
}

/// Paces frames on the calling thread at a fixed period.
///
/// Deadlines are computed from the start time, so a slow callback does not
/// push every later frame back.
#[derive(Debug, Clone, Copy)]
pub struct IntervalScheduler {
    period: Duration,
}

impl IntervalScheduler {
    /// Scheduler with an explicit frame period.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Scheduler running at `n` frames per second.
    pub fn fps(n: u32) -> Self {
        Self::new(Duration::from_secs(1) / n.max(1))
    }

    /// The frame period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameScheduler for IntervalScheduler {
    fn drive(&mut self, frame: &mut dyn FnMut() -> ControlFlow<()>) {
        let mut deadline = Instant::now();
        loop {
            deadline += self.period;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            if frame().is_break() {
                break;
            }
        }
    }
}

/// Owns one particle and steps it once per frame.
#[derive(Debug, Clone)]
pub struct LiveStepper {
    particle: Particle,
    params: SpringParams,
    cancel: CancelToken,
    ticks: usize,
    stopped: Option<StopReason>,
}

impl LiveStepper {
    /// Creates a stepper for an already validated particle and spring.
    pub fn new(particle: Particle, params: SpringParams) -> Self {
        Self {
            particle,
            params,
            cancel: CancelToken::new(),
            ticks: 0,
            stopped: None,
        }
    }

    /// Validates raw inputs and creates a stepper.
    pub fn from_state(x0: f64, v0: f64, mass: f64, stiffness: f64, damping: f64) -> Result<Self> {
        Ok(Self::new(
            Particle::new(x0, v0, mass)?,
            SpringParams::new(stiffness, damping)?,
        ))
    }

    /// Uses `token` as this run's stop flag.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this run.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Current particle state.
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    /// Callbacks delivered so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Why the run ended, if it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Performs one frame: checks cancellation, steps, and either stops or
    /// hands the new displacement to `on_tick`.
    ///
    /// Once stopped, further calls return the same reason without stepping.
    pub fn tick<F>(&mut self, on_tick: &mut F) -> Tick
    where
        F: FnMut(f64) + ?Sized,
    {
        if let Some(reason) = self.stopped {
            return Tick::Stopped(reason);
        }
        if self.cancel.is_cancelled() {
            return self.stop(StopReason::Cancelled);
        }

        let displacement = self.particle.step(&self.params);
        if !self.particle.is_finite() {
            warn!(tick = self.ticks, "live spring diverged");
            return self.stop(StopReason::Diverged);
        }
        if self.particle.is_resting() {
            return self.stop(StopReason::Resting);
        }

        self.ticks += 1;
        trace!(tick = self.ticks, displacement, "live spring frame");
        on_tick(displacement);
        Tick::Continue
    }

    fn stop(&mut self, reason: StopReason) -> Tick {
        debug!(ticks = self.ticks, ?reason, "live spring stopped");
        self.stopped = Some(reason);
        Tick::Stopped(reason)
    }

    /// Drives the stepper with `scheduler` until it stops.
    pub fn run<S, F>(&mut self, scheduler: &mut S, mut on_tick: F) -> LiveOutcome
    where
        S: FrameScheduler + ?Sized,
        F: FnMut(f64),
    {
        scheduler.drive(&mut || match self.tick(&mut on_tick) {
            Tick::Continue => ControlFlow::Continue(()),
            Tick::Stopped(_) => ControlFlow::Break(()),
        });
        self.outcome()
    }

    fn outcome(&self) -> LiveOutcome {
        LiveOutcome {
            ticks: self.ticks,
            reason: self.stopped.unwrap_or(StopReason::SchedulerStopped),
        }
    }
}

/// Validates inputs and runs a live spring on `scheduler`, calling
/// `on_tick` with each non-resting displacement.
///
/// # Errors
///
/// Only precondition errors; a spring that never rests runs until the
/// scheduler or a cancel token stops it.
pub fn run_live<S, F>(
    x0: f64,
    v0: f64,
    mass: f64,
    stiffness: f64,
    damping: f64,
    scheduler: &mut S,
    on_tick: F,
) -> Result<LiveOutcome>
where
    S: FrameScheduler + ?Sized,
    F: FnMut(f64),
{
    let mut stepper = LiveStepper::from_state(x0, v0, mass, stiffness, damping)?;
    Ok(stepper.run(scheduler, on_tick))
}

/// Runs a live spring on a tokio interval timer.
///
/// The first frame fires immediately, later ones every `period`.
#[cfg(feature = "async")]
pub async fn run_live_async<F>(
    mut stepper: LiveStepper,
    period: Duration,
    mut on_tick: F,
) -> LiveOutcome
where
    F: FnMut(f64),
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if let Tick::Stopped(_) = stepper.tick(&mut on_tick) {
            break;
        }
    }
    stepper.outcome()
}

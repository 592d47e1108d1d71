use rand::Rng;
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Length of every spin animation.
pub const SPIN_DURATION: Duration = Duration::from_millis(4000);
/// Fewest and most whole turns a spin adds before its random offset.
pub const MIN_TURNS: u32 = 5;
pub const MAX_TURNS: u32 = 8;

/// Cubic ease-out: fast start, settles into the target.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// How far a spin travels: whole turns plus a fractional offset in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub turns: u32,
    pub offset: f64,
}

impl SpinPlan {
    pub fn new(turns: u32, offset: f64) -> Self {
        Self { turns, offset }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            turns: rng.random_range(MIN_TURNS..=MAX_TURNS),
            offset: rng.random_range(0.0..TAU),
        }
    }

    pub fn distance(&self) -> f64 {
        self.turns as f64 * TAU + self.offset
    }
}

/// One rotation value computed for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub rotation: f64,
    pub done: bool,
}

/// A running spin. Lives from the spin request until the sample that reports `done`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSession {
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub start_time: Instant,
    pub duration: Duration,
}

impl SpinSession {
    pub fn new(start_rotation: f64, plan: SpinPlan, start_time: Instant) -> Self {
        Self {
            start_rotation,
            target_rotation: start_rotation + plan.distance(),
            start_time,
            duration: SPIN_DURATION,
        }
    }

    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> Sample {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return Sample {
                rotation: self.target_rotation,
                done: true,
            };
        }
        let ease = ease_out_cubic(progress);
        Sample {
            rotation: self.start_rotation + (self.target_rotation - self.start_rotation) * ease,
            done: false,
        }
    }
}

/// Idle/Spinning state machine around at most one [`SpinSession`].
#[derive(Debug, Clone, Default)]
pub struct SpinAnimator {
    session: Option<SpinSession>,
}

impl SpinAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_spinning(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    /// Begins a spin from `current_rotation`. Returns `false` and leaves the
    /// running session untouched when a spin is already in progress.
    pub fn start(&mut self, current_rotation: f64, now: Instant, plan: SpinPlan) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(SpinSession::new(current_rotation, plan, now));
        true
    }

    /// Ends the running spin early, handing back its session.
    pub fn finish(&mut self) -> Option<SpinSession> {
        self.session.take()
    }

    /// Samples the running spin, if any. The session ends with the first
    /// sample whose `done` flag is set.
    pub fn tick(&mut self, now: Instant) -> Option<Sample> {
        let sample = self.session.as_ref()?.sample(now);
        if sample.done {
            self.session = None;
        }
        Some(sample)
    }
}

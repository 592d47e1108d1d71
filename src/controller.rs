use crate::geometry::resolve_winner_index;
use crate::spin::{SpinAnimator, SpinPlan};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Result of a spin request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinOutcome {
    Started { target_rotation: f64 },
    AlreadySpinning,
    NoNames,
}

/// What one `tick` published.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub rotation: f64,
    /// Set on the final frame of a spin.
    pub winner: Option<String>,
}

/// Owns the wheel state. Every mutation goes through `add_name`,
/// `start_spin`, `tick` and `complete_spin`.
#[derive(Debug)]
pub struct Controller<R = StdRng> {
    names: Vec<String>,
    rotation: f64,
    winner: Option<String>,
    animator: SpinAnimator,
    rng: R,
}

impl Controller<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Controller<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Controller<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            names: Vec::new(),
            rotation: 0.0,
            winner: None,
            animator: SpinAnimator::new(),
            rng,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_spinning(&self) -> bool {
        self.animator.is_spinning()
    }

    /// Target of the running spin.
    pub fn target_rotation(&self) -> Option<f64> {
        self.animator.session().map(|s| s.target_rotation)
    }

    pub fn can_spin(&self) -> bool {
        !self.names.is_empty() && !self.is_spinning()
    }

    /// Appends a name. Empty input is refused; anything else is kept verbatim.
    pub fn add_name(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.names.push(name.to_string());
        log::info!("Added '{}' ({} names)", name, self.names.len());
        true
    }

    pub fn start_spin(&mut self, now: Instant) -> SpinOutcome {
        let plan = SpinPlan::random(&mut self.rng);
        self.start_spin_with(now, plan)
    }

    pub fn start_spin_with(&mut self, now: Instant, plan: SpinPlan) -> SpinOutcome {
        if self.names.is_empty() {
            log::debug!("Spin ignored: no names on the wheel");
            return SpinOutcome::NoNames;
        }
        if !self.animator.start(self.rotation, now, plan) {
            log::debug!("Spin ignored: already spinning");
            return SpinOutcome::AlreadySpinning;
        }

        self.winner = None;
        let target_rotation = self.rotation + plan.distance();
        log::info!(
            "Spinning {} turns + {:.3} rad toward {:.3}",
            plan.turns,
            plan.offset,
            target_rotation
        );
        SpinOutcome::Started { target_rotation }
    }

    /// Advances the running spin to `now`. Returns `None` while idle.
    pub fn tick(&mut self, now: Instant) -> Option<Frame> {
        let sample = self.animator.tick(now)?;
        self.rotation = sample.rotation;

        if sample.done {
            self.settle(sample.rotation);
        }
        Some(Frame {
            rotation: self.rotation,
            winner: self.winner.clone(),
        })
    }

    /// Ends the running spin at its target right away. Returns the winner,
    /// or `None` when no spin was running.
    pub fn complete_spin(&mut self) -> Option<&str> {
        let session = self.animator.finish()?;
        self.settle(session.target_rotation);
        self.winner()
    }

    /// Parks the wheel on `target_rotation` and resolves the winner against
    /// the names on the wheel right now.
    fn settle(&mut self, target_rotation: f64) {
        self.rotation = target_rotation;
        if self.names.is_empty() {
            return;
        }
        let index = resolve_winner_index(target_rotation, self.names.len());
        let winner = self.names[index].clone();
        log::info!("Winner: {} (slice {})", winner, index);
        self.winner = Some(winner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;
    use std::time::Duration;

    fn controller_with(names: &[&str]) -> Controller {
        let mut controller = Controller::seeded(1);
        for name in names {
            controller.add_name(name);
        }
        controller
    }

    #[test]
    fn test_add_name_rejects_empty() {
        let mut controller = Controller::seeded(0);
        assert!(!controller.add_name(""));
        assert!(controller.add_name(" "));
        assert!(controller.add_name("Alice"));
        assert!(controller.add_name("Alice"));
        assert_eq!(controller.names(), [" ", "Alice", "Alice"]);
    }

    #[test]
    fn test_spin_needs_names() {
        let mut controller = Controller::seeded(0);
        assert!(!controller.can_spin());
        assert_eq!(controller.start_spin(Instant::now()), SpinOutcome::NoNames);
        assert!(!controller.is_spinning());
    }

    #[test]
    fn test_reentrant_spin_keeps_first_session() {
        let mut controller = controller_with(&["A", "B", "C"]);
        let t0 = Instant::now();
        let first = controller.start_spin(t0);
        assert!(matches!(first, SpinOutcome::Started { .. }));
        let target = controller.target_rotation();
        let session = controller.animator.session().cloned();

        let second = controller.start_spin(t0 + Duration::from_millis(10));
        assert_eq!(second, SpinOutcome::AlreadySpinning);
        assert_eq!(controller.target_rotation(), target);
        assert_eq!(controller.animator.session().cloned(), session);
        assert!(!controller.can_spin());
    }

    #[test]
    fn test_start_clears_previous_winner() {
        let mut controller = controller_with(&["A", "B"]);
        let t0 = Instant::now();
        controller.start_spin_with(t0, SpinPlan::new(5, 0.0));
        controller.tick(t0 + Duration::from_secs(5));
        assert!(controller.winner().is_some());

        controller.start_spin(t0 + Duration::from_secs(6));
        assert_eq!(controller.winner(), None);
    }

    #[test]
    fn test_alice_and_bob_end_to_end() {
        let mut controller = controller_with(&["Alice", "Bob"]);
        let t0 = Instant::now();
        let outcome = controller.start_spin_with(t0, SpinPlan::new(5, 0.0));
        let SpinOutcome::Started { target_rotation } = outcome else {
            panic!("spin did not start: {outcome:?}");
        };
        assert_eq!(target_rotation, 5.0 * TAU);

        let mut last = controller.rotation();
        let mut final_frame = None;
        for frame_index in 1..=300 {
            let now = t0 + Duration::from_millis(frame_index * 16);
            let Some(frame) = controller.tick(now) else {
                break;
            };
            assert!(frame.rotation >= last);
            last = frame.rotation;
            if frame.winner.is_some() {
                final_frame = Some(frame);
                break;
            }
        }

        let frame = final_frame.expect("spin should finish within 300 frames");
        let expected = &controller.names()[resolve_winner_index(target_rotation, 2)];
        assert_eq!(frame.winner.as_deref(), Some(expected.as_str()));
        assert!(["Alice", "Bob"].contains(&expected.as_str()));
        assert_eq!(controller.rotation(), target_rotation);
        assert!(!controller.is_spinning());
        assert_eq!(controller.tick(t0 + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_rotation_carries_into_next_spin() {
        let mut controller = controller_with(&["A", "B", "C", "D"]);
        let t0 = Instant::now();
        controller.start_spin_with(t0, SpinPlan::new(5, 1.0));
        controller.tick(t0 + Duration::from_secs(4));
        let settled = controller.rotation();
        assert_eq!(settled, 5.0 * TAU + 1.0);

        let t1 = t0 + Duration::from_secs(5);
        let outcome = controller.start_spin_with(t1, SpinPlan::new(6, 0.5));
        assert_eq!(
            outcome,
            SpinOutcome::Started {
                target_rotation: settled + SpinPlan::new(6, 0.5).distance()
            }
        );
        let frame = controller.tick(t1).expect("spinning");
        assert_eq!(frame.rotation, settled);
    }

    #[test]
    fn test_seeded_controllers_agree() {
        let mut a = controller_with(&["A", "B", "C"]);
        let mut b = controller_with(&["A", "B", "C"]);
        let now = Instant::now();
        assert_eq!(a.start_spin(now), b.start_spin(now));
    }

    #[test]
    fn test_names_added_mid_spin_take_part() {
        let mut controller = controller_with(&["A", "B"]);
        let t0 = Instant::now();
        controller.start_spin_with(t0, SpinPlan::new(5, 0.1));
        controller.add_name("C");
        let frame = controller.tick(t0 + Duration::from_secs(4)).expect("frame");
        let index = resolve_winner_index(5.0 * TAU + 0.1, 3);
        assert_eq!(frame.winner.as_deref(), Some(["A", "B", "C"][index]));
    }

    #[test]
    fn test_complete_spin_mid_spin_settles_on_target() {
        let mut controller = controller_with(&["A", "B", "C"]);
        let t0 = Instant::now();
        controller.start_spin_with(t0, SpinPlan::new(5, 1.0));
        let target = controller.target_rotation().expect("spinning");
        controller.tick(t0 + Duration::from_millis(1000));
        let before = controller.rotation();

        let winner = controller.complete_spin().map(str::to_string);
        let index = resolve_winner_index(target, 3);
        assert_eq!(winner.as_deref(), Some(["A", "B", "C"][index]));
        assert!(!controller.is_spinning());
        assert_eq!(controller.rotation(), target);
        assert!(controller.rotation() >= before);

        // the old session is gone, so later ticks can't rewind the wheel
        assert_eq!(controller.tick(t0 + Duration::from_millis(1100)), None);
        assert_eq!(controller.rotation(), target);
        assert!(controller.can_spin());
    }

    #[test]
    fn test_complete_spin_while_idle_does_nothing() {
        let mut controller = controller_with(&["A", "B"]);
        assert_eq!(controller.complete_spin(), None);
        assert_eq!(controller.winner(), None);
        assert_eq!(controller.rotation(), 0.0);
    }
}

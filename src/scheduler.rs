/// Shortest period a trigger accepts; keeps a zero period from firing forever
const MIN_PERIOD_MS: f64 = 1.0;

/// A repeating trigger measured in simulated milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicTrigger {
    period_ms: f64,
    until_next_ms: f64,
    armed: bool,
}

impl PeriodicTrigger {
    pub fn new(period_ms: f64) -> Self {
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        Self {
            period_ms,
            until_next_ms: period_ms,
            armed: false,
        }
    }

    /// Start counting a full period from now
    pub fn arm(&mut self) {
        self.until_next_ms = self.period_ms;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Change the period. Like clearing and re-creating an interval timer,
    /// the countdown restarts, but only when the period actually changes.
    pub fn reschedule(&mut self, period_ms: f64) {
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        if period_ms == self.period_ms {
            return;
        }
        self.period_ms = period_ms;
        self.until_next_ms = period_ms;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn until_next_ms(&self) -> Option<f64> {
        self.armed.then_some(self.until_next_ms)
    }

    fn elapse(&mut self, ms: f64) {
        if self.armed {
            self.until_next_ms = (self.until_next_ms - ms).max(0.0);
        }
    }

    fn rearm(&mut self) {
        self.until_next_ms = self.period_ms;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Spawn,
    Motion,
}

/// Drives the spawn and motion triggers of one session
#[derive(Debug, Clone)]
pub struct Scheduler {
    spawn: PeriodicTrigger,
    motion: PeriodicTrigger,
}

impl Scheduler {
    pub fn new(spawn_period_ms: f64, motion_period_ms: f64) -> Self {
        Self {
            spawn: PeriodicTrigger::new(spawn_period_ms),
            motion: PeriodicTrigger::new(motion_period_ms),
        }
    }

    pub fn arm(&mut self, spawn_period_ms: f64) {
        self.spawn.reschedule(spawn_period_ms);
        self.spawn.arm();
        self.motion.arm();
    }

    pub fn cancel(&mut self) {
        self.spawn.cancel();
        self.motion.cancel();
    }

    pub fn is_armed(&self) -> bool {
        self.spawn.is_armed() || self.motion.is_armed()
    }

    pub fn reschedule(&mut self, spawn_period_ms: f64) {
        self.spawn.reschedule(spawn_period_ms);
    }

    pub fn spawn_trigger(&self) -> &PeriodicTrigger {
        &self.spawn
    }

    pub fn motion_trigger(&self) -> &PeriodicTrigger {
        &self.motion
    }

    /// Next trigger to fire and how far away it is. Spawn wins ties so a new
    /// word is in place before the motion tick that shares its instant.
    pub fn next_due(&self) -> Option<(Trigger, f64)> {
        match (self.spawn.until_next_ms(), self.motion.until_next_ms()) {
            (Some(s), Some(m)) if m < s => Some((Trigger::Motion, m)),
            (Some(s), _) => Some((Trigger::Spawn, s)),
            (None, Some(m)) => Some((Trigger::Motion, m)),
            (None, None) => None,
        }
    }

    /// Advance by up to `budget_ms`. Returns the trigger that fired and the
    /// time consumed, or `None` once the budget runs out before the next one.
    pub fn poll(&mut self, budget_ms: f64) -> Option<(Trigger, f64)> {
        let (trigger, due) = self.next_due()?;
        if due > budget_ms {
            self.spawn.elapse(budget_ms);
            self.motion.elapse(budget_ms);
            return None;
        }

        self.spawn.elapse(due);
        self.motion.elapse(due);
        match trigger {
            Trigger::Spawn => self.spawn.rearm(),
            Trigger::Motion => self.motion.rearm(),
        }
        Some((trigger, due))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler, mut budget: f64) -> Vec<Trigger> {
        let mut fired = Vec::new();
        while let Some((trigger, used)) = scheduler.poll(budget) {
            fired.push(trigger);
            budget -= used;
        }
        fired
    }

    #[test]
    fn test_unarmed_scheduler_never_fires() {
        let mut scheduler = Scheduler::new(100.0, 20.0);
        assert_eq!(scheduler.next_due(), None);
        assert!(drain(&mut scheduler, 1_000.0).is_empty());
    }

    #[test]
    fn test_motion_fires_every_period() {
        let mut scheduler = Scheduler::new(1_000.0, 20.0);
        scheduler.arm(1_000.0);

        let fired = drain(&mut scheduler, 100.0);
        assert_eq!(fired, vec![Trigger::Motion; 5]);
    }

    #[test]
    fn test_spawn_fires_before_motion_on_ties() {
        let mut scheduler = Scheduler::new(40.0, 20.0);
        scheduler.arm(40.0);

        let fired = drain(&mut scheduler, 40.0);
        assert_eq!(
            fired,
            vec![Trigger::Motion, Trigger::Spawn, Trigger::Motion]
        );
    }

    #[test]
    fn test_partial_budget_carries_over() {
        let mut scheduler = Scheduler::new(1_000.0, 20.0);
        scheduler.arm(1_000.0);

        assert!(drain(&mut scheduler, 15.0).is_empty());
        assert_eq!(drain(&mut scheduler, 5.0), vec![Trigger::Motion]);
    }

    #[test]
    fn test_cancel_stops_everything() {
        let mut scheduler = Scheduler::new(50.0, 20.0);
        scheduler.arm(50.0);
        scheduler.cancel();

        assert!(!scheduler.is_armed());
        assert!(drain(&mut scheduler, 500.0).is_empty());
    }

    #[test]
    fn test_reschedule_restarts_countdown_only_on_change() {
        let mut trigger = PeriodicTrigger::new(100.0);
        trigger.arm();
        trigger.elapse(60.0);

        trigger.reschedule(100.0);
        assert_eq!(trigger.until_next_ms(), Some(40.0));

        trigger.reschedule(80.0);
        assert_eq!(trigger.period_ms(), 80.0);
        assert_eq!(trigger.until_next_ms(), Some(80.0));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut scheduler = Scheduler::new(0.0, 0.0);
        scheduler.arm(0.0);

        assert_eq!(drain(&mut scheduler, 3.0).len(), 6);
    }

    #[test]
    fn test_rearm_after_cancel_counts_a_full_period() {
        let mut scheduler = Scheduler::new(100.0, 20.0);
        scheduler.arm(100.0);
        drain(&mut scheduler, 90.0);
        scheduler.cancel();

        scheduler.arm(100.0);
        assert_eq!(scheduler.spawn_trigger().until_next_ms(), Some(100.0));
        assert_eq!(scheduler.motion_trigger().until_next_ms(), Some(20.0));
    }
}

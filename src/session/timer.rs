use crate::foundation::core::Millis;

/// A cancelable timer with room for exactly one pending callback.
///
/// Driven by the session clock rather than wall time: the owner asks whether the
/// slot is due and fires it. Re-arming replaces the pending deadline and
/// cancelling clears it, so there is never more than one outstanding callback
/// per slot and a cancelled deadline can never fire.
#[derive(Clone, Debug, Default)]
pub struct TimerSlot {
    due: Option<Millis>,
    period_ms: Option<u64>,
}

impl TimerSlot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn arm_once(&mut self, now: Millis, delay_ms: u64) {
        self.due = Some(now.saturating_add(delay_ms));
        self.period_ms = None;
    }

    /// Fire every `period_ms` (at least 1 ms), first after one period.
    pub fn arm_every(&mut self, now: Millis, period_ms: u64) {
        let period = period_ms.max(1);
        self.due = Some(now.saturating_add(period));
        self.period_ms = Some(period);
    }

    pub fn cancel(&mut self) {
        self.due = None;
        self.period_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn due(&self) -> Option<Millis> {
        self.due
    }

    pub fn period_ms(&self) -> Option<u64> {
        self.period_ms
    }

    /// Consume the deadline if it has passed.
    ///
    /// One-shot slots disarm; periodic slots re-arm one period after the
    /// deadline they just fired for, so ticks do not drift with frame timing.
    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        let Some(due) = self.due else {
            return false;
        };
        if due > now {
            return false;
        }
        match self.period_ms {
            Some(period) => self.due = Some(due.saturating_add(period)),
            None => self.due = None,
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/timer.rs"]
mod tests;

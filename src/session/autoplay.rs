use crate::foundation::core::Millis;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::session::timer::TimerSlot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AutoPlayParams {
    /// Start playing as soon as the session exists.
    pub enabled: bool,
    pub interval_ms: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
}

impl Default for AutoPlayParams {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 3000,
            min_interval_ms: 1000,
            max_interval_ms: 10_000,
        }
    }
}

impl AutoPlayParams {
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.min_interval_ms == 0 || self.min_interval_ms > self.max_interval_ms {
            return Err(FlipbookError::config(
                "auto-play interval bounds must satisfy 0 < min <= max",
            ));
        }
        Ok(())
    }

    pub fn clamp_interval(&self, ms: u64) -> u64 {
        ms.clamp(self.min_interval_ms, self.max_interval_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SpeedPreset {
    Fast,
    Medium,
    Slow,
}

impl SpeedPreset {
    pub fn interval_ms(self) -> u64 {
        match self {
            Self::Fast => 2000,
            Self::Medium => 5000,
            Self::Slow => 8000,
        }
    }
}

/// Periodic page advance.
#[derive(Clone, Debug)]
pub struct AutoPlay {
    enabled: bool,
    interval_ms: u64,
    ticker: TimerSlot,
}

impl AutoPlay {
    pub fn new(params: &AutoPlayParams, now: Millis) -> Self {
        let mut ap = Self {
            enabled: false,
            interval_ms: params.clamp_interval(params.interval_ms),
            ticker: TimerSlot::idle(),
        };
        ap.set_enabled(params.enabled, now);
        ap
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn tick_due(&self) -> Option<Millis> {
        self.ticker.due()
    }

    pub fn is_armed(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn set_enabled(&mut self, enabled: bool, now: Millis) {
        self.enabled = enabled;
        if enabled {
            self.ticker.arm_every(now, self.interval_ms);
        } else {
            self.ticker.cancel();
        }
    }

    /// Flip auto-play on/off; returns the new state.
    pub fn toggle(&mut self, now: Millis) -> bool {
        self.set_enabled(!self.enabled, now);
        self.enabled
    }

    /// Change the tick period (clamped); a running ticker restarts with it.
    pub fn set_interval(&mut self, ms: u64, now: Millis, params: &AutoPlayParams) -> u64 {
        self.interval_ms = params.clamp_interval(ms);
        if self.enabled {
            self.ticker.arm_every(now, self.interval_ms);
        }
        self.interval_ms
    }

    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        self.enabled && self.ticker.fire_if_due(now)
    }

    pub fn cancel(&mut self) {
        self.enabled = false;
        self.ticker.cancel();
    }

    /// Target after one tick: the next page, wrapping to the front at the end.
    pub fn next_target(current: usize, page_count: usize) -> usize {
        let next = current + 1;
        if next >= page_count { 0 } else { next }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/autoplay.rs"]
mod tests;

use crate::foundation::core::Millis;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::session::timer::TimerSlot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NavigationParams {
    /// Delay between single-page convergence steps.
    pub step_delay_ms: u64,
    /// Clicks on a page closer together than this are ignored.
    pub click_cooldown_ms: u64,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            step_delay_ms: 500,
            click_cooldown_ms: 500,
        }
    }
}

impl NavigationParams {
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.step_delay_ms == 0 {
            return Err(FlipbookError::config("step_delay_ms must be > 0"));
        }
        Ok(())
    }
}

/// Target and rendered page indices, both in `[0, page_count]`.
///
/// The rendered index walks toward the target one page at a time, at most once
/// per step delay. `0` is closed at the front, `page_count` closed at the back.
#[derive(Clone, Debug)]
pub struct PageCursor {
    page_count: usize,
    target: usize,
    rendered: usize,
    stepper: TimerSlot,
    last_click: Option<Millis>,
}

impl PageCursor {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            target: 0,
            rendered: 0,
            stepper: TimerSlot::idle(),
            last_click: None,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn rendered(&self) -> usize {
        self.rendered
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Rendered page has reached the target and no step is pending.
    pub fn is_settled(&self) -> bool {
        self.rendered == self.target && !self.stepper.is_armed()
    }

    pub fn step_due(&self) -> Option<Millis> {
        self.stepper.due()
    }

    pub fn has_pending_step(&self) -> bool {
        self.stepper.is_armed()
    }

    fn clamp(&self, requested: i64) -> usize {
        let max = i64::try_from(self.page_count).unwrap_or(i64::MAX);
        // Lossless: the clamped value lies in [0, page_count].
        requested.clamp(0, max) as usize
    }

    /// Request page `requested`, clamped into range. Returns the new target.
    pub fn set_target(&mut self, requested: i64, now: Millis, params: &NavigationParams) -> usize {
        let target = self.clamp(requested);
        if i64::try_from(target).ok() != Some(requested) {
            tracing::warn!(requested, clamped = target, "page index out of range");
        }
        if target != self.target {
            self.target = target;
            if !self.stepper.is_armed() {
                self.step(now, params);
            }
        }
        self.target
    }

    pub fn next(&mut self, now: Millis, params: &NavigationParams) -> usize {
        let requested = self.target.saturating_add(1).min(self.page_count);
        self.set_target(requested as i64, now, params)
    }

    pub fn prev(&mut self, now: Millis, params: &NavigationParams) -> usize {
        let requested = self.target.saturating_sub(1);
        self.set_target(requested as i64, now, params)
    }

    /// A click on page `number`: turns it forward if unopened, back if opened.
    ///
    /// Returns `false` when the click falls inside the cooldown of the last one.
    pub fn click_page(&mut self, number: usize, now: Millis, params: &NavigationParams) -> bool {
        if let Some(last) = self.last_click
            && now.since(last) < params.click_cooldown_ms
        {
            return false;
        }
        self.last_click = Some(now);
        let opened = self.rendered > number;
        let requested = if opened { number } else { number + 1 };
        self.set_target(requested as i64, now, params);
        true
    }

    /// Adopt a new page count, pulling both indices into range.
    pub fn set_page_count(&mut self, page_count: usize, now: Millis, params: &NavigationParams) {
        self.page_count = page_count;
        self.target = self.target.min(page_count);
        if self.rendered > page_count {
            self.rendered = page_count;
        }
        if self.rendered != self.target && !self.stepper.is_armed() {
            self.step(now, params);
        }
    }

    /// Fire the convergence timer if due. Returns `true` when a step was taken.
    pub fn fire_if_due(&mut self, now: Millis, params: &NavigationParams) -> bool {
        if !self.stepper.fire_if_due(now) {
            return false;
        }
        self.step(now, params)
    }

    fn step(&mut self, now: Millis, params: &NavigationParams) -> bool {
        if self.rendered == self.target {
            self.stepper.cancel();
            return false;
        }
        if self.target > self.rendered {
            self.rendered += 1;
        } else {
            self.rendered -= 1;
        }
        tracing::debug!(rendered = self.rendered, target = self.target, "page step");
        self.stepper.arm_once(now, params.step_delay_ms);
        true
    }

    pub fn cancel(&mut self) {
        self.stepper.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/cursor.rs"]
mod tests;

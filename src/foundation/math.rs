use std::f64::consts::{PI, TAU};

use crate::foundation::core::DVec3;

/// Values closer than this to their target snap onto it.
pub const DAMP_EPSILON: f64 = 0.001;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Shortest signed angular distance from `current` to `target`, in `(-PI, PI]`.
pub fn delta_angle(current: f64, target: f64) -> f64 {
    let mut delta = (target - current).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// Rational approximation of `exp(-x)` used by the critically damped smoother.
fn exp_decay(x: f64) -> f64 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Critically damped smoother for a single scalar.
///
/// Each call moves `value` toward a target using a spring with time constant
/// `smooth_time` (seconds). The velocity term is retained between calls, so the
/// motion stays continuous when the target changes mid-flight and is stable
/// under variable frame deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Damper {
    pub value: f64,
    pub velocity: f64,
}

impl Damper {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    /// Advance toward `target` by `dt` seconds. Returns `false` once settled.
    pub fn damp(&mut self, target: f64, smooth_time: f64, dt: f64) -> bool {
        if (self.value - target).abs() <= DAMP_EPSILON {
            self.value = target;
            return false;
        }
        if dt <= 0.0 {
            return true;
        }

        let smooth_time = smooth_time.max(0.0001);
        let omega = 2.0 / smooth_time;
        let t = exp_decay(omega * dt);

        let change = self.value - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * t;
        let mut output = target + (change + temp) * t;

        // No overshoot past the target.
        if (target - self.value > 0.0) == (output > target) {
            output = target;
            self.velocity = 0.0;
        }
        self.value = output;
        true
    }

    /// Like [`Damper::damp`], but travels the shortest way around the circle.
    pub fn damp_angle(&mut self, target: f64, smooth_time: f64, dt: f64) -> bool {
        let target = self.value + delta_angle(self.value, target);
        self.damp(target, smooth_time, dt)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DampedVec3 {
    pub x: Damper,
    pub y: Damper,
    pub z: Damper,
}

impl DampedVec3 {
    pub fn new(v: DVec3) -> Self {
        Self {
            x: Damper::new(v.x),
            y: Damper::new(v.y),
            z: Damper::new(v.z),
        }
    }

    pub fn value(&self) -> DVec3 {
        DVec3::new(self.x.value, self.y.value, self.z.value)
    }

    pub fn damp(&mut self, target: DVec3, smooth_time: f64, dt: f64) -> bool {
        let a = self.x.damp(target.x, smooth_time, dt);
        let b = self.y.damp(target.y, smooth_time, dt);
        let c = self.z.damp(target.z, smooth_time, dt);
        a || b || c
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

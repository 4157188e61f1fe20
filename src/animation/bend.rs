//! Page curl: per-joint target angles and their damped per-frame state.
//!
//! Angle computation is a pure function of the page's situation; [`PageBender`]
//! only owns the smoothing state, so the curl can be tested without a renderer.

use std::f64::consts::PI;

use crate::foundation::core::{Euler, Millis};
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::foundation::math::{Damper, deg_to_rad};
use crate::rig::chain::JointAngles;

/// Tuning for the page curl.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BendParams {
    /// Smoothing time constant (seconds) for the bend axis.
    pub easing: f64,
    /// Smoothing time constant (seconds) for the fold axis.
    pub fold_easing: f64,
    pub inside_curve_strength: f64,
    pub outside_curve_strength: f64,
    pub turning_curve_strength: f64,
    /// How long a page keeps "turning" after it flips side.
    pub turn_window_ms: u64,
    /// Extra hinge angle per page number while the book is open.
    pub fan_deg: f64,
    pub fold_deg: f64,
    /// Joints nearer the spine than this curve inwards; the rest outwards.
    pub inside_joints: usize,
}

impl Default for BendParams {
    fn default() -> Self {
        Self {
            easing: 0.3,
            fold_easing: 0.0,
            inside_curve_strength: 0.158,
            outside_curve_strength: 0.0,
            turning_curve_strength: 0.0,
            turn_window_ms: 200,
            fan_deg: 0.4,
            fold_deg: 0.2,
            inside_joints: 8,
        }
    }
}

impl BendParams {
    /// Livelier curl with visible outside curvature, turn bulge and fold.
    pub fn classic() -> Self {
        Self {
            easing: 0.5,
            fold_easing: 0.3,
            inside_curve_strength: 0.18,
            outside_curve_strength: 0.05,
            turning_curve_strength: 0.09,
            turn_window_ms: 400,
            fan_deg: 0.8,
            fold_deg: 2.0,
            inside_joints: 8,
        }
    }

    pub fn validate(&self) -> FlipbookResult<()> {
        if !(self.easing >= 0.0 && self.fold_easing >= 0.0) {
            return Err(FlipbookError::config("bend easing must be >= 0"));
        }
        if self.turn_window_ms == 0 {
            return Err(FlipbookError::config("turn window must be > 0 ms"));
        }
        Ok(())
    }
}

/// Where a page sits relative to the book's settle point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSituation {
    pub number: usize,
    /// Turned over to the left (`number < rendered page`).
    pub opened: bool,
    /// Rendered page is 0 or the page count.
    pub book_closed: bool,
}

/// Sine-eased turn intensity: 0 at the flip, peaking half way through the window.
pub fn turning_intensity(elapsed_ms: Option<u64>, window_ms: u64) -> f64 {
    let Some(elapsed) = elapsed_ms else {
        return 0.0;
    };
    let window = window_ms.max(1);
    let t = elapsed.min(window) as f64 / window as f64;
    (t * PI).sin()
}

/// Hinge target: -90 degrees opened, +90 unopened, fanned while the book is open.
pub fn hinge_target(page: PageSituation, params: &BendParams) -> f64 {
    let mut target = if page.opened { -PI / 2.0 } else { PI / 2.0 };
    if !page.book_closed {
        target += deg_to_rad(page.number as f64 * params.fan_deg);
    }
    target
}

/// Target angles for every joint of a page's chain.
///
/// Index 0 is the page hinge (applied to the page group); indices `1..` are the
/// chain's bones. `turning` is the current [`turning_intensity`].
pub fn compute_bone_angles(
    page: PageSituation,
    turning: f64,
    bone_count: usize,
    params: &BendParams,
) -> Vec<JointAngles> {
    let target = hinge_target(page, params);
    let span = bone_count.saturating_sub(1).max(1) as f64;
    let fold = deg_to_rad(target.signum() * params.fold_deg);
    let inside = params.inside_joints;

    (0..bone_count)
        .map(|i| {
            if page.book_closed {
                let y = if i == 0 { target } else { 0.0 };
                return JointAngles { x: 0.0, y };
            }

            let fi = i as f64;
            let inside_curve = if i < inside {
                (fi * 0.2 + 0.25).sin()
            } else {
                0.0
            };
            let outside_curve = if i >= inside {
                (fi * 0.3 + 0.09).cos()
            } else {
                0.0
            };
            let turn = (fi * PI / span).sin() * turning;

            let y = params.inside_curve_strength * inside_curve * target
                - params.outside_curve_strength * outside_curve * target
                + params.turning_curve_strength * turn * target;

            let fold_intensity = if i > inside {
                (fi * PI / bone_count as f64 - 0.5).sin() * turning
            } else {
                0.0
            };

            JointAngles {
                x: fold * fold_intensity,
                y,
            }
        })
        .collect()
}

/// Posed page for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PagePose {
    pub number: usize,
    /// Rotation of the page group around the spine.
    pub hinge: Euler,
    /// Local rotation of each bone; bone 0 stays at rest.
    pub joints: Vec<JointAngles>,
    pub turning: f64,
    /// Z offset stacking this page against its neighbours.
    pub z_offset: f64,
}

#[derive(Clone, Copy, Debug, Default)]
struct JointState {
    y: Damper,
    x: Damper,
}

/// Smoothing state for one page.
#[derive(Clone, Debug)]
pub struct PageBender {
    joints: Vec<JointState>,
    last_opened: bool,
    turned_at: Option<Millis>,
}

impl PageBender {
    pub fn new(bone_count: usize, opened: bool) -> Self {
        Self {
            joints: vec![JointState::default(); bone_count.max(1)],
            last_opened: opened,
            turned_at: None,
        }
    }

    pub fn bone_count(&self) -> usize {
        self.joints.len()
    }

    /// Moment the page last flipped side, if it has.
    pub fn turned_at(&self) -> Option<Millis> {
        self.turned_at
    }

    /// Ease every joint toward this frame's targets.
    pub fn advance(
        &mut self,
        page: PageSituation,
        now: Millis,
        dt_secs: f64,
        params: &BendParams,
        z_offset: f64,
    ) -> PagePose {
        if page.opened != self.last_opened {
            self.turned_at = Some(now);
            self.last_opened = page.opened;
        }

        let elapsed = self.turned_at.map(|t| now.since(t));
        let turning = turning_intensity(elapsed, params.turn_window_ms);
        let targets = compute_bone_angles(page, turning, self.joints.len(), params);

        for (state, target) in self.joints.iter_mut().zip(&targets) {
            state.y.damp_angle(target.y, params.easing, dt_secs);
            state.x.damp_angle(target.x, params.fold_easing, dt_secs);
        }

        let hinge = Euler::new(self.joints[0].x.value, self.joints[0].y.value, 0.0);
        let joints = self
            .joints
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == 0 {
                    JointAngles::default()
                } else {
                    JointAngles {
                        x: s.x.value,
                        y: s.y.value,
                    }
                }
            })
            .collect();

        PagePose {
            number: page.number,
            hinge,
            joints,
            turning,
            z_offset,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/bend.rs"]
mod tests;

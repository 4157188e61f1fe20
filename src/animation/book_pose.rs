use std::f64::consts::PI;

use crate::foundation::core::{DVec3, Euler, Transform3D};
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::foundation::math::{DampedVec3, Damper};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BookPoseParams {
    /// X shift while open, so the visible spread stays centered.
    pub open_offset_x: f64,
    pub closed_yaw: f64,
    pub open_yaw: f64,
    pub closed_roll: f64,
    pub open_roll: f64,
    /// Constant tilt toward the viewer.
    pub pitch: f64,
    /// Smoothing time constant (seconds).
    pub smooth_time: f64,
    /// Root placement rotation when nothing overrides it.
    pub root_rotation: Euler,
    /// Root Z when an AR session is active and the book is not yet placed.
    pub ar_root_z: f64,
}

impl Default for BookPoseParams {
    fn default() -> Self {
        Self {
            open_offset_x: -1.3,
            closed_yaw: -PI / 2.5,
            open_yaw: -PI / 2.0,
            closed_roll: 0.1,
            open_roll: 0.02,
            pitch: -0.2,
            smooth_time: 0.15,
            root_rotation: Euler::new(-PI / 10.0, 0.0, 0.0),
            ar_root_z: -1.0,
        }
    }
}

impl BookPoseParams {
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.smooth_time.is_nan() || self.smooth_time < 0.0 {
            return Err(FlipbookError::config("pose smooth_time must be >= 0"));
        }
        Ok(())
    }

    fn target(&self, open: bool) -> (DVec3, f64, f64) {
        if open {
            (
                DVec3::new(self.open_offset_x, 0.0, 0.0),
                self.open_yaw,
                self.open_roll,
            )
        } else {
            (DVec3::ZERO, self.closed_yaw, self.closed_roll)
        }
    }
}

/// Whole-book position/rotation easing between the closed and open poses.
#[derive(Clone, Debug)]
pub struct BookPose {
    position: DampedVec3,
    yaw: Damper,
    roll: Damper,
}

impl BookPose {
    pub fn new(params: &BookPoseParams) -> Self {
        let (position, yaw, roll) = params.target(false);
        Self {
            position: DampedVec3::new(position),
            yaw: Damper::new(yaw),
            roll: Damper::new(roll),
        }
    }

    /// Ease toward the open (`open == true`) or closed pose; returns the
    /// book transform with `scale` applied.
    pub fn advance(
        &mut self,
        open: bool,
        dt_secs: f64,
        scale: f64,
        params: &BookPoseParams,
    ) -> Transform3D {
        let (position, yaw, roll) = params.target(open);
        self.position.damp(position, params.smooth_time, dt_secs);
        self.yaw.damp_angle(yaw, params.smooth_time, dt_secs);
        self.roll.damp_angle(roll, params.smooth_time, dt_secs);
        self.current(scale, params)
    }

    pub fn current(&self, scale: f64, params: &BookPoseParams) -> Transform3D {
        Transform3D::at(
            self.position.value(),
            Euler::new(params.pitch, self.yaw.value, self.roll.value),
        )
        .with_uniform_scale(scale)
    }
}

/// Where the book's root sits in the world.
///
/// An AR collaborator may supply an explicit transform; per-page animation is
/// unaffected by it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub override_transform: Option<Transform3D>,
    pub ar_active: bool,
}

impl Placement {
    pub fn root(&self, params: &BookPoseParams) -> Transform3D {
        if let Some(t) = self.override_transform {
            return t;
        }
        let z = if self.ar_active { params.ar_root_z } else { 0.0 };
        Transform3D::at(DVec3::new(0.0, 0.0, z), params.root_rotation)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/book_pose.rs"]
mod tests;

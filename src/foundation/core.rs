pub use glam::{DMat4, DQuat, DVec3, EulerRot};
pub use kurbo::Size;

/// Milliseconds on the session clock.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn saturating_add(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn from_duration(d: std::time::Duration) -> u64 {
        u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Euler rotation in radians, applied in X, Y, Z order (three.js default).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_y(y: f64) -> Self {
        Self::new(0.0, y, 0.0)
    }

    pub fn to_quat(self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform3D {
    pub position: DVec3,
    pub rotation: Euler,
    pub scale: DVec3, // default (1,1,1)
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: Euler::ZERO,
            scale: DVec3::ONE,
        }
    }
}

impl Transform3D {
    pub fn at(position: DVec3, rotation: Euler) -> Self {
        Self {
            position,
            rotation,
            ..Self::default()
        }
    }

    pub fn with_uniform_scale(self, s: f64) -> Self {
        Self {
            scale: DVec3::splat(s),
            ..self
        }
    }

    /// Object-to-parent matrix: scale, then rotate, then translate.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation.to_quat(), self.position)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

//! Forward kinematics over a page's bone chain.

use crate::foundation::core::{DVec3, Euler};

/// Local rotation of one joint: `y` bends the sheet, `x` folds it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct JointAngles {
    pub x: f64,
    pub y: f64,
}

impl JointAngles {
    pub fn to_euler(self) -> Euler {
        Euler::new(self.x, self.y, 0.0)
    }
}

/// Joint positions of a posed chain in the page group's parent space.
///
/// - `hinge`: rotation of the page group around the spine.
/// - `offsets`: rest offset of each bone along its parent's X axis.
/// - `joints`: local rotation of each bone; must be as long as `offsets`.
///
/// Returns one position per bone followed by the free-edge tip, which sits one
/// segment past the last bone.
pub fn pose_chain(hinge: Euler, offsets: &[f64], joints: &[JointAngles]) -> Vec<DVec3> {
    debug_assert_eq!(offsets.len(), joints.len());
    let tip_offset = offsets.last().copied().unwrap_or(0.0);

    let mut out = Vec::with_capacity(offsets.len() + 1);
    let mut rot = hinge.to_quat();
    let mut pos = DVec3::ZERO;
    for (offset, joint) in offsets.iter().zip(joints) {
        pos += rot * (DVec3::X * *offset);
        out.push(pos);
        rot *= joint.to_euler().to_quat();
    }
    out.push(pos + rot * (DVec3::X * tip_offset));
    out
}

/// Total Y rotation accumulated along the chain, hinge included.
pub fn accumulated_bend(hinge: Euler, joints: &[JointAngles]) -> f64 {
    hinge.y + joints.iter().map(|j| j.y).sum::<f64>()
}

#[cfg(test)]
#[path = "../../tests/unit/rig/chain.rs"]
mod tests;

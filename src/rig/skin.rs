use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Physical dimensions of one page and the resolution of its bone chain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// Number of width segments; the chain has `segments + 1` bones.
    pub segments: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 2.6,
            height: 1.92,
            depth: 0.003,
            segments: 160,
        }
    }
}

impl PageGeometry {
    pub fn validate(&self) -> FlipbookResult<()> {
        if !(self.width > 0.0 && self.height > 0.0 && self.depth > 0.0) {
            return Err(FlipbookError::config("page dimensions must be > 0"));
        }
        if self.segments < 2 {
            return Err(FlipbookError::config("page segments must be >= 2"));
        }
        Ok(())
    }

    pub fn segment_width(&self) -> f64 {
        self.width / f64::from(self.segments)
    }

    pub fn bone_count(&self) -> usize {
        self.segments as usize + 1
    }

    /// Rest offset of every bone relative to its parent along X.
    ///
    /// The root sits on the spine; every other bone is one segment further out.
    pub fn bone_rest_offsets(&self) -> Vec<f64> {
        let seg = self.segment_width();
        (0..self.bone_count())
            .map(|i| if i == 0 { 0.0 } else { seg })
            .collect()
    }

    /// Z offset that stacks page `number` behind its predecessors.
    pub fn stack_offset(&self, number: usize, rendered_page: usize) -> f64 {
        -(number as f64) * self.depth * 1.01 + (rendered_page as f64) * self.depth * 0.01
    }

    /// Skin binding for a vertex at `x` (page space, spine at 0).
    pub fn skin_vertex(&self, x: f64) -> SkinWeight {
        let seg = self.segment_width();
        let index = (x / seg).floor().max(0.0) as u16;
        let weight = (x % seg) / seg;
        SkinWeight {
            indices: [index, index.saturating_add(1), 0, 0],
            weights: [(1.0 - weight) as f32, weight as f32, 0.0, 0.0],
        }
    }

    /// X coordinates of the vertex columns of the segmented page box.
    pub fn vertex_columns(&self) -> Vec<f64> {
        let seg = self.segment_width();
        (0..=self.segments).map(|i| f64::from(i) * seg).collect()
    }

    pub fn skin(&self, xs: &[f64]) -> Vec<SkinWeight> {
        xs.iter().map(|&x| self.skin_vertex(x)).collect()
    }
}

/// Four-influence skin binding, matching GPU skinning attribute layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SkinWeight {
    pub indices: [u16; 4],
    pub weights: [f32; 4],
}

#[cfg(test)]
#[path = "../../tests/unit/rig/skin.rs"]
mod tests;

use crate::foundation::core::Size;
use crate::foundation::error::{FlipbookError, FlipbookResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    /// Applies to screens narrower than this many pixels.
    pub below_px: f64,
    pub factor: f64,
}

/// Maps the visible viewport to an overall book scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScalePolicy {
    /// Viewport extent (world units) at which the book has scale 1 before boost.
    pub reference_size: f64,
    pub boost: f64,
    pub min: f64,
    pub max: f64,
    /// Checked narrowest first; the first matching breakpoint applies.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self {
            reference_size: 4.0,
            boost: 1.15,
            min: 0.4,
            max: 1.8,
            breakpoints: vec![
                Breakpoint {
                    below_px: 480.0,
                    factor: 0.7,
                },
                Breakpoint {
                    below_px: 768.0,
                    factor: 0.8,
                },
                Breakpoint {
                    below_px: 1024.0,
                    factor: 0.9,
                },
            ],
        }
    }
}

impl ScalePolicy {
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.reference_size.is_nan() || self.reference_size <= 0.0 {
            return Err(FlipbookError::config("scale reference_size must be > 0"));
        }
        if !(self.min > 0.0 && self.min <= self.max) {
            return Err(FlipbookError::config("scale bounds must satisfy 0 < min <= max"));
        }
        Ok(())
    }

    /// Book scale for a viewport of `viewport` world units on a screen
    /// `screen_width_px` pixels wide.
    pub fn scale_for(&self, viewport: Size, screen_width_px: f64) -> f64 {
        let mut scale = viewport.width.min(viewport.height) / self.reference_size;

        let mut breakpoints = self.breakpoints.clone();
        breakpoints.sort_by(|a, b| a.below_px.total_cmp(&b.below_px));
        if let Some(bp) = breakpoints.iter().find(|bp| screen_width_px < bp.below_px) {
            scale *= bp.factor;
        }

        (scale * self.boost).clamp(self.min, self.max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scale.rs"]
mod tests;

//! Session configuration.
//!
//! Every section has reference defaults, so an empty JSON object is a valid
//! configuration and files only need to name what they change.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::bend::BendParams;
use crate::animation::book_pose::BookPoseParams;
use crate::animation::scale::ScalePolicy;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::rig::skin::PageGeometry;
use crate::session::autoplay::AutoPlayParams;
use crate::session::cursor::NavigationParams;

/// All tunables of a [`crate::BookSession`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Page size and bone chain resolution.
    pub geometry: PageGeometry,
    /// Page curl tuning.
    pub bend: BendParams,
    /// Whole-book open/closed pose.
    pub pose: BookPoseParams,
    /// Viewport-to-scale policy.
    pub scale: ScalePolicy,
    /// Page convergence and click timing.
    pub navigation: NavigationParams,
    /// Auto-play defaults and limits.
    pub auto_play: AutoPlayParams,
}

impl BookConfig {
    /// Parse a configuration from JSON text and validate it.
    pub fn from_json_str(s: &str) -> FlipbookResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FlipbookError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> FlipbookResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlipbookError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            FlipbookError::config(format!("parse config JSON '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every section's invariants.
    pub fn validate(&self) -> FlipbookResult<()> {
        self.geometry.validate()?;
        self.bend.validate()?;
        self.pose.validate()?;
        self.scale.validate()?;
        self.navigation.validate()?;
        self.auto_play.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

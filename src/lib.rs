//! Flipbook turns a list of photos into a double-sided page book and animates it.
//!
//! # Pipeline overview
//!
//! 1. **Load**: album JSON -> [`AlbumData`] -> ordered [`ImageRef`]s
//! 2. **Assemble**: images -> [`PageDescriptor`]s (cover, interior pages, back cover)
//! 3. **Animate**: a [`BookSession`] advanced once per frame yields a [`BookFrame`]
//!    with every page's hinge and bone angles plus the book's world transform
//!
//! Rendering is left to the caller. The crate computes what to draw, not how.
#![forbid(unsafe_code)]

pub mod album;
pub mod animation;
pub mod config;
pub mod foundation;
pub mod rig;
pub mod session;

pub use album::assemble::{ImageRef, PLACEHOLDER_IMAGE, PageDescriptor, assemble, construct_pages};
pub use album::faces::{FaceFill, PageFaces, TextureWindow, bind_faces, book_faces};
pub use album::source::{AlbumData, album_json_url};
pub use animation::bend::{BendParams, PageBender, PagePose, PageSituation, compute_bone_angles};
pub use animation::book_pose::{BookPose, BookPoseParams, Placement};
pub use animation::scale::{Breakpoint, ScalePolicy};
pub use config::BookConfig;
pub use foundation::core::{DMat4, DQuat, DVec3, Euler, Millis, Size, Transform3D};
pub use foundation::error::{FlipbookError, FlipbookResult};
pub use foundation::math::{DampedVec3, Damper};
pub use rig::chain::{JointAngles, pose_chain};
pub use rig::skin::{PageGeometry, SkinWeight};
pub use session::autoplay::{AutoPlay, AutoPlayParams, SpeedPreset};
pub use session::book::{BookFrame, BookSession};
pub use session::cursor::{NavigationParams, PageCursor};

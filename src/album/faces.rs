//! Which image, and which part of it, each page face shows.

use std::collections::HashSet;

use crate::album::assemble::{ImageRef, PageDescriptor, construct_pages, displayed_len};

/// Horizontal texture window: `repeat` is the fraction of the image width
/// sampled, `offset` where sampling starts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextureWindow {
    pub repeat: f64,
    pub offset: f64,
}

impl TextureWindow {
    /// Whole image, slightly overscanned to hide the seam at the spine.
    pub const WHOLE: Self = Self {
        repeat: 1.02,
        offset: 0.0,
    };
    /// Whole image with no overscan (front of a cover in split layout).
    pub const EXACT: Self = Self {
        repeat: 1.0,
        offset: 0.0,
    };
    pub const LEFT_HALF: Self = Self {
        repeat: 0.52,
        offset: 0.0,
    };
    pub const RIGHT_HALF: Self = Self {
        repeat: 0.5,
        offset: 0.5,
    };
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind")]
pub enum FaceFill {
    Texture {
        image: ImageRef,
        window: TextureWindow,
    },
    /// The image could not be loaded; draw the face untextured.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageFaces {
    pub number: usize,
    pub front: FaceFill,
    pub back: FaceFill,
}

/// Bind every page face to an image window.
///
/// In split layout an interior page's back shows the left half of the *next*
/// page's front image, so that a spread always reads as one picture.
/// Images listed in `failed` render as [`FaceFill::Fallback`].
pub fn bind_faces(
    pages: &[PageDescriptor],
    split_mode: bool,
    failed: &HashSet<ImageRef>,
) -> Vec<PageFaces> {
    let fill = |image: &ImageRef, window: TextureWindow| {
        if failed.contains(image) {
            FaceFill::Fallback
        } else {
            FaceFill::Texture {
                image: image.clone(),
                window,
            }
        }
    };

    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            if !split_mode {
                return PageFaces {
                    number: page.number,
                    front: fill(&page.front, TextureWindow::WHOLE),
                    back: fill(&page.back, TextureWindow::WHOLE),
                };
            }

            let back_image = pages.get(i + 1).map_or(&page.back, |next| &next.front);
            let front_window = if page.is_cover {
                TextureWindow::EXACT
            } else {
                TextureWindow::RIGHT_HALF
            };
            PageFaces {
                number: page.number,
                front: fill(&page.front, front_window),
                back: fill(back_image, TextureWindow::LEFT_HALF),
            }
        })
        .collect()
}

/// Faces of the pages [`assemble`](crate::album::assemble::assemble) displays.
///
/// Neighbours are taken from the full constructed list, so the last displayed
/// page in split layout still backs onto the front of the dropped back cover.
pub fn book_faces(
    image_urls: &[ImageRef],
    split_mode: bool,
    failed: &HashSet<ImageRef>,
) -> Vec<PageFaces> {
    let pages = construct_pages(image_urls, split_mode);
    let mut faces = bind_faces(&pages, split_mode, failed);
    faces.truncate(displayed_len(pages.len()));
    faces
}

#[cfg(test)]
#[path = "../../tests/unit/album/faces.rs"]
mod tests;

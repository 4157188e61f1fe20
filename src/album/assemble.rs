use std::fmt;

/// Image shown when an album carries no images at all.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x600?text=No+Images";

/// Opaque reference to a bitmap resource (usually a URL).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_IMAGE.to_owned())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One leaf of the book.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageDescriptor {
    /// Position in the final sequence; doubles as z-stack and fan multiplier.
    pub number: usize,
    pub front: ImageRef,
    pub back: ImageRef,
    /// First/last leaf. Covers are never split.
    pub is_cover: bool,
    /// Faces show halves of their images instead of whole images.
    pub is_split_image: bool,
}

impl PageDescriptor {
    fn cover(front: &ImageRef, back: &ImageRef) -> Self {
        Self {
            number: 0,
            front: front.clone(),
            back: back.clone(),
            is_cover: true,
            is_split_image: false,
        }
    }

    fn leaf(front: &ImageRef, back: &ImageRef, is_split_image: bool) -> Self {
        Self {
            number: 0,
            front: front.clone(),
            back: back.clone(),
            is_cover: false,
            is_split_image,
        }
    }
}

/// Build every leaf for `image_urls`, including the trailing back cover.
///
/// An empty input is replaced by a single placeholder image, so the result is
/// never empty. Pages are numbered by position.
pub fn construct_pages(image_urls: &[ImageRef], split_mode: bool) -> Vec<PageDescriptor> {
    let placeholder = [ImageRef::placeholder()];
    let urls = if image_urls.is_empty() {
        &placeholder[..]
    } else {
        image_urls
    };
    let len = urls.len();
    let first = &urls[0];
    let last = &urls[len - 1];

    let mut pages = vec![PageDescriptor::cover(first, urls.get(1).unwrap_or(first))];

    if split_mode {
        for url in urls.iter().take(len.saturating_sub(1)).skip(1) {
            pages.push(PageDescriptor::leaf(url, url, true));
        }
        if len > 1 {
            pages.push(PageDescriptor::cover(last, last));
        }
    } else {
        let mut i = 2;
        while i + 1 < len {
            pages.push(PageDescriptor::leaf(
                &urls[i],
                urls.get(i + 1).unwrap_or(&urls[i]),
                false,
            ));
            i += 2;
        }
        if len > 2 {
            // Reuse the first image as filler for the back face.
            pages.push(PageDescriptor::cover(last, first));
        }
    }

    renumber(&mut pages);
    pages
}

/// Assemble the page list the book displays.
///
/// This is [`construct_pages`] with the last constructed leaf dropped, which is
/// how existing albums have always rendered. A lone page is kept so the book
/// always has at least one leaf.
#[tracing::instrument(skip(image_urls), fields(images = image_urls.len()))]
pub fn assemble(image_urls: &[ImageRef], split_mode: bool) -> Vec<PageDescriptor> {
    if image_urls.is_empty() {
        tracing::warn!("album has no images; using placeholder page");
    }
    let mut pages = construct_pages(image_urls, split_mode);
    pages.truncate(displayed_len(pages.len()));
    tracing::debug!(pages = pages.len(), "assembled book pages");
    pages
}

/// How many of `constructed` leaves the book displays: all but the last, and
/// never fewer than one.
pub(crate) fn displayed_len(constructed: usize) -> usize {
    if constructed > 1 { constructed - 1 } else { constructed }
}

fn renumber(pages: &mut [PageDescriptor]) {
    for (i, p) in pages.iter_mut().enumerate() {
        p.number = i;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/album/assemble.rs"]
mod tests;

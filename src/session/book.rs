use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::album::assemble::{ImageRef, PageDescriptor, assemble};
use crate::album::faces::{PageFaces, book_faces};
use crate::album::source::{AlbumData, DEFAULT_TITLE};
use crate::animation::bend::{PageBender, PagePose, PageSituation};
use crate::animation::book_pose::{BookPose, Placement};
use crate::config::BookConfig;
use crate::foundation::core::{DMat4, Millis, Size, Transform3D};
use crate::foundation::error::FlipbookResult;
use crate::session::autoplay::{AutoPlay, SpeedPreset};
use crate::session::cursor::PageCursor;

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BookFrame {
    pub time: Millis,
    pub target_page: usize,
    pub rendered_page: usize,
    pub page_count: usize,
    /// World placement of the book root (AR anchor or default).
    pub root: Transform3D,
    /// Animated book transform relative to the root, scale included.
    pub book: Transform3D,
    pub pages: Vec<PagePose>,
}

impl BookFrame {
    /// Book-to-world matrix: the animated book transform under the root placement.
    pub fn book_to_world(&self) -> DMat4 {
        self.root.to_matrix() * self.book.to_matrix()
    }
}

/// One album on screen: owns the page list and all navigation state.
///
/// All mutation happens through `&mut self` on the caller's frame loop; the
/// session's own clock only moves in [`BookSession::advance`], which also fires
/// the convergence and auto-play timers that fall due in the advanced interval.
#[derive(Debug)]
pub struct BookSession {
    config: BookConfig,
    image_urls: Vec<ImageRef>,
    split_mode: bool,
    pages: Arc<[PageDescriptor]>,
    failed_images: HashSet<ImageRef>,
    title: String,
    music_url: Option<String>,
    cursor: PageCursor,
    auto_play: AutoPlay,
    benders: Vec<PageBender>,
    pose: BookPose,
    placement: Placement,
    scale: f64,
    now: Millis,
    torn_down: bool,
}

impl BookSession {
    /// Session showing the placeholder page until an album is loaded.
    pub fn new(config: BookConfig) -> FlipbookResult<Self> {
        config.validate()?;
        let pages: Arc<[PageDescriptor]> = assemble(&[], true).into();
        let now = Millis::ZERO;
        let mut session = Self {
            cursor: PageCursor::new(pages.len()),
            auto_play: AutoPlay::new(&config.auto_play, now),
            pose: BookPose::new(&config.pose),
            placement: Placement::default(),
            scale: 1.0,
            image_urls: Vec::new(),
            split_mode: true,
            pages,
            failed_images: HashSet::new(),
            title: DEFAULT_TITLE.to_owned(),
            music_url: None,
            benders: Vec::new(),
            config,
            now,
            torn_down: false,
        };
        session.rebuild_benders();
        Ok(session)
    }

    pub fn with_album(config: BookConfig, album: &AlbumData) -> FlipbookResult<Self> {
        let mut session = Self::new(config)?;
        session.load_album(album);
        Ok(session)
    }

    /// Replace the album. Navigation state survives, clamped to the new book.
    #[tracing::instrument(skip_all)]
    pub fn load_album(&mut self, album: &AlbumData) {
        self.title = album.title().to_owned();
        self.music_url = album.music_url().map(str::to_owned);
        self.failed_images.clear();
        self.set_images(album.image_urls(), album.split_mode());
        tracing::info!(
            title = %self.title,
            pages = self.pages.len(),
            split = self.split_mode,
            "album loaded"
        );
    }

    /// Rebuild the page list from `image_urls` in the given layout.
    pub fn set_images(&mut self, image_urls: Vec<ImageRef>, split_mode: bool) {
        self.image_urls = image_urls;
        self.split_mode = split_mode;
        self.rebuild_pages();
    }

    pub fn set_split_mode(&mut self, split_mode: bool) {
        if split_mode != self.split_mode {
            self.split_mode = split_mode;
            self.rebuild_pages();
        }
    }

    fn rebuild_pages(&mut self) {
        self.pages = assemble(&self.image_urls, self.split_mode).into();
        let nav = self.config.navigation;
        self.cursor.set_page_count(self.pages.len(), self.now, &nav);
        self.rebuild_benders();
    }

    fn rebuild_benders(&mut self) {
        let bones = self.config.geometry.bone_count();
        let rendered = self.cursor.rendered();
        self.benders = self
            .pages
            .iter()
            .map(|p| PageBender::new(bones, rendered > p.number))
            .collect();
    }

    /// Shared read-only view of the current pages.
    pub fn pages(&self) -> Arc<[PageDescriptor]> {
        Arc::clone(&self.pages)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn split_mode(&self) -> bool {
        self.split_mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn music_url(&self) -> Option<&str> {
        self.music_url.as_deref()
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Face bindings for the current pages, honouring failed image loads.
    pub fn page_faces(&self) -> Vec<PageFaces> {
        book_faces(&self.image_urls, self.split_mode, &self.failed_images)
    }

    /// Record that `image` could not be loaded; its faces render untextured.
    pub fn mark_image_failed(&mut self, image: ImageRef) {
        tracing::warn!(%image, "image failed to load; rendering page untextured");
        self.failed_images.insert(image);
    }

    pub fn target_page(&self) -> usize {
        self.cursor.target()
    }

    pub fn rendered_page(&self) -> usize {
        self.cursor.rendered()
    }

    /// "rendered / total", for page counters.
    pub fn page_label(&self) -> String {
        format!("{} / {}", self.cursor.rendered(), self.pages.len())
    }

    /// Ask for page `n`; out-of-range values clamp into `[0, page_count]`.
    pub fn set_target_page(&mut self, n: i64) -> usize {
        if self.torn_down {
            return self.cursor.target();
        }
        let nav = self.config.navigation;
        self.cursor.set_target(n, self.now, &nav)
    }

    pub fn next_page(&mut self) -> usize {
        if self.torn_down {
            return self.cursor.target();
        }
        let nav = self.config.navigation;
        self.cursor.next(self.now, &nav)
    }

    pub fn prev_page(&mut self) -> usize {
        if self.torn_down {
            return self.cursor.target();
        }
        let nav = self.config.navigation;
        self.cursor.prev(self.now, &nav)
    }

    /// Pointer click on page `number`. Returns `false` if debounced.
    pub fn click_page(&mut self, number: usize) -> bool {
        if self.torn_down || number >= self.pages.len() {
            return false;
        }
        let nav = self.config.navigation;
        self.cursor.click_page(number, self.now, &nav)
    }

    pub fn auto_play_enabled(&self) -> bool {
        self.auto_play.is_enabled()
    }

    pub fn auto_play_interval_ms(&self) -> u64 {
        self.auto_play.interval_ms()
    }

    pub fn toggle_auto_play(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.auto_play.toggle(self.now)
    }

    pub fn set_auto_play(&mut self, enabled: bool) {
        if !self.torn_down {
            self.auto_play.set_enabled(enabled, self.now);
        }
    }

    /// Set the auto-play period; clamped to the configured range.
    pub fn set_auto_play_speed(&mut self, ms: u64) -> u64 {
        let params = self.config.auto_play;
        if self.torn_down {
            return params.clamp_interval(ms);
        }
        self.auto_play.set_interval(ms, self.now, &params)
    }

    pub fn set_auto_play_preset(&mut self, preset: SpeedPreset) -> u64 {
        self.set_auto_play_speed(preset.interval_ms())
    }

    /// Externally supplied world transform for the book root, or `None` for
    /// the default placement.
    pub fn set_placement(&mut self, transform: Option<Transform3D>) {
        self.placement.override_transform = transform;
    }

    pub fn set_ar_active(&mut self, active: bool) {
        self.placement.ar_active = active;
    }

    /// Recompute the book scale for a viewport (world units) and screen width (px).
    pub fn set_viewport(&mut self, viewport: Size, screen_width_px: f64) -> f64 {
        self.scale = self.config.scale.scale_for(viewport, screen_width_px);
        self.scale
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of armed timers (convergence stepper and auto-play ticker).
    pub fn active_timers(&self) -> usize {
        usize::from(self.cursor.has_pending_step()) + usize::from(self.auto_play.is_armed())
    }

    /// Stop all timers. Navigation requests made afterwards are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.cursor.cancel();
        self.auto_play.cancel();
        self.torn_down = true;
        tracing::debug!("book session torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Advance the session clock by `delta` and pose every page.
    pub fn advance(&mut self, delta: Duration) -> BookFrame {
        let end = self.now.saturating_add(Millis::from_duration(delta));
        self.run_timers_until(end);
        self.now = end;
        self.pose_frame(delta.as_secs_f64())
    }

    fn run_timers_until(&mut self, end: Millis) {
        if self.torn_down {
            return;
        }
        let nav = self.config.navigation;
        loop {
            let auto_due = self.auto_play.tick_due().filter(|&d| d <= end);
            let step_due = self.cursor.step_due().filter(|&d| d <= end);
            match (auto_due, step_due) {
                (Some(a), Some(s)) if s < a => {
                    self.now = self.now.max(s);
                    self.cursor.fire_if_due(self.now, &nav);
                }
                (Some(a), _) => {
                    self.now = self.now.max(a);
                    if self.auto_play.fire_if_due(self.now) {
                        let next = AutoPlay::next_target(self.cursor.target(), self.pages.len());
                        tracing::debug!(next, "auto-play tick");
                        self.cursor.set_target(next as i64, self.now, &nav);
                    }
                }
                (None, Some(s)) => {
                    self.now = self.now.max(s);
                    self.cursor.fire_if_due(self.now, &nav);
                }
                (None, None) => break,
            }
        }
    }

    fn pose_frame(&mut self, dt_secs: f64) -> BookFrame {
        let rendered = self.cursor.rendered();
        let count = self.pages.len();
        let book_closed = rendered == 0 || rendered == count;
        let geometry = self.config.geometry;
        let bend = self.config.bend;

        let pages = self
            .benders
            .iter_mut()
            .zip(self.pages.iter())
            .map(|(bender, page)| {
                let situation = PageSituation {
                    number: page.number,
                    opened: rendered > page.number,
                    book_closed,
                };
                let z = geometry.stack_offset(page.number, rendered);
                bender.advance(situation, self.now, dt_secs, &bend, z)
            })
            .collect();

        let book = self
            .pose
            .advance(rendered != 0, dt_secs, self.scale, &self.config.pose);

        BookFrame {
            time: self.now,
            target_page: self.cursor.target(),
            rendered_page: rendered,
            page_count: count,
            root: self.placement.root(&self.config.pose),
            book,
            pages,
        }
    }
}

impl Drop for BookSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/book.rs"]
mod tests;

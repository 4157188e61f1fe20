use std::f64::consts::PI;

use super::*;
use crate::album::faces::FaceFill;
use crate::animation::bend::compute_bone_angles;
use crate::foundation::core::{DVec3, Euler};
use crate::rig::chain::accumulated_bend;

fn refs(n: usize) -> Vec<ImageRef> {
    (0..n).map(|i| ImageRef(format!("img{i}.jpg"))).collect()
}

/// Split-layout session with `pages` pages (`pages + 1` images).
fn session_with_pages(pages: usize) -> BookSession {
    let mut s = BookSession::new(BookConfig::default()).unwrap();
    s.set_images(refs(pages + 1), true);
    assert_eq!(s.page_count(), pages);
    s
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn new_session_shows_placeholder_page() {
    let s = BookSession::new(BookConfig::default()).unwrap();
    assert_eq!(s.page_count(), 1);
    assert_eq!(s.pages()[0].front, ImageRef::placeholder());
    assert_eq!(s.target_page(), 0);
    assert_eq!(s.rendered_page(), 0);
    assert_eq!(s.active_timers(), 0);
    assert_eq!(s.page_label(), "0 / 1");
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = BookConfig::default();
    cfg.navigation.step_delay_ms = 0;
    assert!(BookSession::new(cfg).is_err());
}

#[test]
fn load_album_rebuilds_pages_and_metadata() {
    let album = AlbumData::from_json_str(
        r#"{"ImagesServer":{"0":"a","1":"b","2":"c","3":"d"},"ProjectTitle":"Trip","MusicServer":"m.mp3"}"#,
    )
    .unwrap();
    let s = BookSession::with_album(BookConfig::default(), &album).unwrap();
    assert_eq!(s.title(), "Trip");
    assert_eq!(s.music_url(), Some("m.mp3"));
    assert!(s.split_mode());
    assert_eq!(s.page_count(), 3);
}

#[test]
fn target_requests_clamp_into_range() {
    let mut s = session_with_pages(4);
    assert_eq!(s.set_target_page(-5), 0);
    assert_eq!(s.set_target_page(100), 4);
    assert_eq!(s.target_page(), 4);
    assert_eq!(s.set_target_page(2), 2);
}

#[test]
fn rendered_page_converges_one_step_per_delay() {
    let mut s = session_with_pages(5);
    s.set_target_page(4);
    assert_eq!(s.rendered_page(), 1);

    let mut seen = vec![s.rendered_page()];
    for _ in 0..30 {
        let frame = s.advance(ms(100));
        seen.push(frame.rendered_page);
    }
    for w in seen.windows(2) {
        assert!(w[1] >= w[0] && w[1] - w[0] <= 1, "jumped: {seen:?}");
    }
    assert_eq!(s.rendered_page(), 4);
    assert_eq!(s.active_timers(), 0);

    // One step each 500 ms: 1 at t=0, 2 at 500, 3 at 1000, 4 at 1500.
    assert_eq!(seen[5], 2);
    assert_eq!(seen[10], 3);
    assert_eq!(seen[15], 4);
}

#[test]
fn retarget_mid_flight_reverses_without_skipping() {
    let mut s = session_with_pages(5);
    s.set_target_page(4);
    s.advance(ms(600));
    assert_eq!(s.rendered_page(), 2);

    s.set_target_page(0);
    assert_eq!(s.rendered_page(), 2, "pending step keeps its slot");
    s.advance(ms(400));
    assert_eq!(s.rendered_page(), 1);
    s.advance(ms(500));
    assert_eq!(s.rendered_page(), 0);
    s.advance(ms(500));
    assert_eq!(s.active_timers(), 0);
}

#[test]
fn auto_play_wraps_after_last_page() {
    let mut s = session_with_pages(5);
    s.set_auto_play(true);
    assert_eq!(s.auto_play_interval_ms(), 3000);

    let mut targets = Vec::new();
    for _ in 0..5 {
        s.advance(ms(3000));
        targets.push(s.target_page());
    }
    assert_eq!(targets, vec![1, 2, 3, 4, 0]);
}

#[test]
fn auto_play_ticks_inside_one_long_frame_are_all_applied() {
    let mut s = session_with_pages(5);
    s.set_auto_play(true);
    s.advance(ms(9000));
    assert_eq!(s.target_page(), 3);
    assert_eq!(s.rendered_page(), 3);
}

#[test]
fn toggling_auto_play_twice_leaves_no_timers() {
    let mut s = session_with_pages(3);
    assert!(s.toggle_auto_play());
    assert_eq!(s.active_timers(), 1);
    assert!(!s.toggle_auto_play());
    assert_eq!(s.active_timers(), 0);

    s.advance(ms(10_000));
    assert_eq!(s.target_page(), 0);
}

#[test]
fn auto_play_speed_is_clamped_and_presets_apply() {
    let mut s = session_with_pages(3);
    assert_eq!(s.set_auto_play_speed(10), 1000);
    assert_eq!(s.set_auto_play_speed(60_000), 10_000);
    assert_eq!(s.set_auto_play_preset(SpeedPreset::Fast), 2000);
    assert_eq!(s.auto_play_interval_ms(), 2000);
}

#[test]
fn speed_change_while_playing_restarts_the_period() {
    let mut s = session_with_pages(5);
    s.set_auto_play(true);
    s.advance(ms(2500));
    s.set_auto_play_speed(2000);
    s.advance(ms(1999));
    assert_eq!(s.target_page(), 0);
    s.advance(ms(1));
    assert_eq!(s.target_page(), 1);
}

#[test]
fn click_turns_page_and_is_debounced() {
    let mut s = session_with_pages(4);
    assert!(s.click_page(0));
    assert_eq!(s.target_page(), 1);
    assert!(!s.click_page(1));
    assert_eq!(s.target_page(), 1);

    s.advance(ms(500));
    // Page 0 is now opened; clicking it turns it back.
    assert!(s.click_page(0));
    assert_eq!(s.target_page(), 0);
    assert!(!s.click_page(99));
}

#[test]
fn pages_settle_on_their_side_of_the_spine() {
    let mut s = session_with_pages(5);
    s.set_target_page(1);
    let mut frame = s.advance(ms(16));
    for _ in 0..400 {
        frame = s.advance(ms(16));
    }
    let bend = s.config().bend;
    let bones = s.config().geometry.bone_count();

    for page in &frame.pages {
        let situation = PageSituation {
            number: page.number,
            opened: page.number < 1,
            book_closed: false,
        };
        let targets = compute_bone_angles(situation, 0.0, bones, &bend);
        assert!((page.hinge.y - targets[0].y).abs() < 1e-3);
        assert!((page.joints[5].y - targets[5].y).abs() < 1e-3);

        let total = accumulated_bend(page.hinge, &page.joints);
        assert_eq!(total < 0.0, page.number == 0, "page {} on wrong side", page.number);
    }
    assert!((frame.book.rotation.y + PI / 2.0).abs() < 1e-3);
    assert!((frame.book.position.x + 1.3).abs() < 1e-3);
}

#[test]
fn closed_book_keeps_bones_flat() {
    let mut s = session_with_pages(3);
    let mut frame = s.advance(ms(16));
    for _ in 0..200 {
        frame = s.advance(ms(16));
    }
    for page in &frame.pages {
        assert!((page.hinge.y - PI / 2.0).abs() < 1e-3);
        assert!(page.joints.iter().all(|j| j.x.abs() < 1e-9 && j.y.abs() < 1e-9));
    }
    assert!((frame.book.rotation.y + PI / 2.5).abs() < 1e-3);
}

#[test]
fn frames_stack_pages_and_count_bones() {
    let mut s = session_with_pages(3);
    let frame = s.advance(ms(16));
    let bones = s.config().geometry.bone_count();
    assert_eq!(frame.pages.len(), 3);
    for (i, page) in frame.pages.iter().enumerate() {
        assert_eq!(page.number, i);
        assert_eq!(page.joints.len(), bones);
    }
    assert!(frame.pages[0].z_offset > frame.pages[1].z_offset);
}

#[test]
fn placement_override_moves_root_only() {
    let mut plain = session_with_pages(4);
    let mut placed = session_with_pages(4);
    let anchor = Transform3D::at(DVec3::new(1.0, 2.0, -3.0), Euler::from_y(0.7));
    placed.set_placement(Some(anchor));

    for s in [&mut plain, &mut placed] {
        s.set_target_page(2);
    }
    for _ in 0..50 {
        let a = plain.advance(ms(20));
        let b = placed.advance(ms(20));
        assert_eq!(a.pages, b.pages);
        assert_eq!(a.book, b.book);
        assert_eq!(b.root, anchor);
        assert_ne!(a.root, anchor);
    }

    placed.set_placement(None);
    placed.set_ar_active(true);
    let frame = placed.advance(ms(20));
    assert_eq!(frame.root.position, DVec3::new(0.0, 0.0, -1.0));
}

#[test]
fn viewport_scale_reaches_book_transform() {
    let mut s = session_with_pages(2);
    let scale = s.set_viewport(Size::new(4.0, 4.0), 1920.0);
    assert!((scale - 1.15).abs() < 1e-9);
    let frame = s.advance(ms(16));
    assert_eq!(frame.book.scale, DVec3::splat(scale));
}

#[test]
fn failed_image_faces_fall_back() {
    let mut s = session_with_pages(3);
    s.mark_image_failed(ImageRef::from("img0.jpg"));
    let faces = s.page_faces();
    assert_eq!(faces[0].front, FaceFill::Fallback);
    assert!(matches!(faces[1].front, FaceFill::Texture { .. }));
}

#[test]
fn book_to_world_composes_root_and_book() {
    let mut s = session_with_pages(2);
    s.set_placement(Some(Transform3D::at(
        DVec3::new(1.0, 2.0, -3.0),
        Euler::ZERO,
    )));
    let frame = s.advance(ms(16));
    let m = frame.book_to_world();
    assert!(
        m.transform_point3(DVec3::ZERO)
            .abs_diff_eq(DVec3::new(1.0, 2.0, -3.0) + frame.book.position, 1e-12)
    );
    let p = DVec3::new(0.5, -0.25, 1.0);
    let nested = frame
        .root
        .to_matrix()
        .transform_point3(frame.book.to_matrix().transform_point3(p));
    assert!(m.transform_point3(p).abs_diff_eq(nested, 1e-9));
}

#[test]
fn last_page_back_shows_back_cover_image() {
    let s = session_with_pages(3);
    let faces = s.page_faces();
    assert_eq!(faces.len(), 3);
    let FaceFill::Texture { image, .. } = &faces[2].back else {
        panic!("expected texture");
    };
    assert_eq!(image.as_str(), "img3.jpg");
}

#[test]
fn switching_layout_rebuilds_and_clamps() {
    let mut s = session_with_pages(5);
    s.set_target_page(5);
    s.set_split_mode(false);
    // Six images in full layout: cover, two leaves and a back cover, minus one.
    assert_eq!(s.page_count(), 3);
    assert_eq!(s.target_page(), 3);
    assert!(s.rendered_page() <= 3);
}

#[test]
fn teardown_cancels_timers_and_ignores_requests() {
    let mut s = session_with_pages(5);
    s.set_auto_play(true);
    s.set_target_page(3);
    assert_eq!(s.active_timers(), 2);

    s.teardown();
    assert!(s.is_torn_down());
    assert_eq!(s.active_timers(), 0);
    assert_eq!(s.set_target_page(5), 3);
    assert!(!s.toggle_auto_play());

    let frame = s.advance(ms(20_000));
    assert_eq!(frame.target_page, 3);
    assert_eq!(frame.rendered_page, 1);
    s.teardown();
}

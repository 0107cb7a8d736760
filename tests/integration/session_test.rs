//! Integration tests for the session lifecycle: fetch commit, staleness,
//! navigation and teardown

use std::time::{Duration, Instant};

use ytstamps::overlay::{Activation, ActivationTarget, OverlayPhase};
use ytstamps::replay::SimulatedPage;
use ytstamps::session::PageHost;
use ytstamps::{Config, PlaybackTick, SessionController};

use super::helpers::{
    comment, commit, controller, ManualSource, RecordingSurface, SurfaceEvent, VIDEO_A, VIDEO_B,
};

// ============================================================================
// Startup
// ============================================================================

#[test]
fn start_requests_comments_for_the_page_video() {
    let mut controller = controller(VIDEO_A, 100.0);

    let requests = &controller.source_mut().requests;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].video_id, "aaaaaaaaaaa");
    assert_eq!(requests[0].generation, 1);
}

#[test]
fn page_without_video_id_is_left_alone() {
    let page = SimulatedPage::new("https://www.youtube.com/feed/trending", 100.0);
    let mut controller = SessionController::new(
        &Config::default(),
        page,
        RecordingSurface::default(),
        ManualSource::default(),
    );
    controller.start();

    assert!(controller.source_mut().requests.is_empty());
    assert_eq!(controller.generation(), 0);
}

#[test]
fn commit_draws_marker_bar_and_attaches_listener() {
    let mut controller = controller(VIDEO_A, 60.0);
    commit(
        &mut controller,
        vec![comment("a", 10.0), comment("b", 10.0), comment("c", 30.0)],
    );

    let bar = controller.host().marker_bar().expect("marker bar drawn");
    assert_eq!(bar.len(), 2);
    assert_eq!(bar[0].count, 2);
    assert_eq!(controller.host().listeners().len(), 1);
    assert_eq!(controller.session().video_id(), Some("aaaaaaaaaaa"));
    assert!(controller.session().monitor().is_attached());
}

#[test]
fn comments_past_the_end_get_no_stamp_and_never_show() {
    let mut controller = controller(VIDEO_A, 60.0);
    commit(&mut controller, vec![comment("a", 10.0), comment("late", 90.0)]);

    let bar = controller.host().marker_bar().expect("marker bar drawn");
    assert_eq!(bar.len(), 1);
    assert_eq!(bar[0].time, 10.0);
    assert_eq!(controller.session().index().len(), 1);

    let now = Instant::now();
    controller.on_playback(PlaybackTick::playing(60.0, 60.0), now);
    assert_eq!(controller.session().scheduler().active_count(), 0);
}

// ============================================================================
// Stale fetches
// ============================================================================

#[test]
fn fetch_resolving_after_navigation_is_discarded() {
    let mut controller = controller(VIDEO_A, 100.0);
    let ticket_a = controller.source_mut().last_request();

    controller.host_mut().navigate(VIDEO_B, 50.0);
    assert!(controller.check_navigation());
    let ticket_b = controller.source_mut().last_request();
    assert_eq!(ticket_b.video_id, "bbbbbbbbbbb");
    assert_eq!(ticket_b.generation, 2);

    controller
        .source_mut()
        .resolve(&ticket_a, vec![comment("from-a", 5.0)]);
    assert_eq!(controller.poll_fetches(), 0);
    assert!(controller.session().index().is_empty());
    assert!(controller.host().marker_bar().is_none());
    assert!(controller.host().listeners().is_empty());

    controller
        .source_mut()
        .resolve(&ticket_b, vec![comment("from-b", 5.0)]);
    assert_eq!(controller.poll_fetches(), 1);
    assert_eq!(controller.session().index().comments()[0].comment_id, "from-b");
}

#[test]
fn fetch_for_a_video_no_longer_on_the_page_is_discarded() {
    let mut controller = controller(VIDEO_A, 100.0);
    let ticket = controller.source_mut().last_request();

    // Address changed but the navigation has not been handled yet
    controller.host_mut().navigate(VIDEO_B, 50.0);
    controller.source_mut().resolve(&ticket, vec![comment("a", 5.0)]);

    assert_eq!(controller.poll_fetches(), 0);
    assert!(controller.host().marker_bar().is_none());
}

// ============================================================================
// Navigation reset
// ============================================================================

#[test]
fn navigation_clears_overlays_queue_and_timers() {
    let mut controller = controller(VIDEO_A, 100.0);
    commit(
        &mut controller,
        (0..4).map(|i| comment(&format!("c{}", i), 10.0)).collect(),
    );

    let now = Instant::now();
    controller.on_playback(PlaybackTick::playing(10.0, 100.0), now);
    assert_eq!(controller.session().scheduler().active_count(), 3);
    assert_eq!(controller.session().scheduler().queued_len(), 1);

    controller.host_mut().navigate(VIDEO_B, 50.0);
    assert!(controller.check_navigation());

    let scheduler = controller.session().scheduler();
    assert_eq!(scheduler.active_count(), 0);
    assert_eq!(scheduler.queued_len(), 0);
    assert_eq!(scheduler.pending_timers(), 0);
    assert!(scheduler.surface().mounted.is_empty());
    assert_eq!(
        scheduler.surface().events.last(),
        Some(&SurfaceEvent::RemoveContainer)
    );
    assert!(controller.session().index().is_empty());
    assert!(controller.host().marker_bar().is_none());
    assert!(controller.host().listeners().is_empty());

    // Nothing scheduled for the old video fires afterwards
    let events_before = controller.session().scheduler().surface().events.len();
    assert_eq!(controller.advance(now + Duration::from_secs(30)), 0);
    assert_eq!(
        controller.session().scheduler().surface().events.len(),
        events_before
    );
}

#[test]
fn navigation_is_handled_once_per_address_change() {
    let mut controller = controller(VIDEO_A, 100.0);
    controller.host_mut().navigate(VIDEO_B, 50.0);

    assert!(controller.check_navigation());
    assert!(!controller.check_navigation());
    assert_eq!(controller.source_mut().requests.len(), 2);
}

#[test]
fn playback_ticks_before_the_new_commit_show_nothing() {
    let mut controller = controller(VIDEO_A, 100.0);
    commit(&mut controller, vec![comment("a", 10.0)]);

    controller.host_mut().navigate(VIDEO_B, 100.0);
    controller.check_navigation();

    let now = Instant::now();
    assert_eq!(
        controller.on_playback(PlaybackTick::playing(10.0, 100.0), now),
        0
    );
    assert_eq!(controller.session().scheduler().active_count(), 0);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn teardown_removes_marker_bar_and_listener() {
    let mut controller = controller(VIDEO_A, 100.0);
    commit(&mut controller, vec![comment("a", 10.0)]);
    controller.on_playback(PlaybackTick::playing(10.0, 100.0), Instant::now());

    controller.teardown();

    assert!(controller.host().marker_bar().is_none());
    assert!(controller.host().listeners().is_empty());
    assert!(!controller.session().is_bar_drawn());
    assert!(!controller.session().monitor().is_attached());
    assert!(controller.session().scheduler().surface().mounted.is_empty());
}

// ============================================================================
// Activation
// ============================================================================

#[test]
fn clicking_an_overlay_seeks_without_cancelling_expiry() {
    let config = Config::default();
    let mut controller = controller(VIDEO_A, 100.0);
    commit(
        &mut controller,
        vec![comment("a", 42.0).with_text("the drop at 1:05")],
    );

    let now = Instant::now();
    controller.on_playback(PlaybackTick::playing(42.0, 100.0), now);
    let id = controller.session().scheduler().active()[0].id;

    assert_eq!(
        controller.activate(id, Activation::Click(ActivationTarget::Overlay)),
        Some(42.0)
    );
    assert_eq!(controller.host().seeks(), &[42.0]);
    assert_eq!(controller.host().resumes(), 1);
    assert_eq!(controller.session().scheduler().pending_timers(), 1);

    controller.advance(now + config.overlay.display_duration());
    assert_eq!(
        controller.session().scheduler().active()[0].phase,
        OverlayPhase::FadingOut
    );
}

#[test]
fn clicking_a_stamp_seeks_to_the_stamp() {
    let mut controller = controller(VIDEO_A, 100.0);
    commit(
        &mut controller,
        vec![comment("a", 42.0).with_text("the drop at 1:05")],
    );
    controller.on_playback(PlaybackTick::playing(42.0, 100.0), Instant::now());

    let id = controller.session().scheduler().active()[0].id;
    let card = controller.session().scheduler().card(id).unwrap().clone();
    let stamp = card.stamp_indices().next().expect("card has a stamp");

    assert_eq!(
        controller.activate(id, Activation::Click(ActivationTarget::Stamp(stamp))),
        Some(65.0)
    );
    assert_eq!(controller.host().seeks(), &[65.0]);
}

#[test]
fn blocked_resume_still_seeks() {
    let mut controller = controller(VIDEO_A, 100.0);
    commit(&mut controller, vec![comment("a", 42.0)]);
    controller.host_mut().block_resume = true;
    controller.on_playback(PlaybackTick::playing(42.0, 100.0), Instant::now());

    let id = controller.session().scheduler().active()[0].id;
    assert_eq!(
        controller.activate(id, Activation::Click(ActivationTarget::Overlay)),
        Some(42.0)
    );
    assert_eq!(controller.host().seeks(), &[42.0]);
    assert!(controller.host().has_video());
}

//! Integration tests for overlay lifecycles under playback

use std::time::{Duration, Instant};

use ytstamps::config::OverlayConfig;
use ytstamps::overlay::{Admission, OverlayId, OverlayScheduler};
use ytstamps::PlaybackTick;

use super::helpers::{comment, commit, controller, RecordingSurface, SurfaceEvent, VIDEO_A};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn capacity_holds_through_dense_playback() {
    let mut controller = controller(VIDEO_A, 60.0);
    // One comment every half second from 1s to 20s
    let comments: Vec<_> = (2..=40)
        .map(|i| comment(&format!("c{}", i), i as f64 / 2.0))
        .collect();
    let total = comments.len();
    commit(&mut controller, comments);

    let origin = Instant::now();
    let mut position = 0.0;
    while position <= 30.0 {
        let now = origin + Duration::from_secs_f64(position);
        controller.advance(now);
        assert!(controller.session().scheduler().active_count() <= 3);

        controller.on_playback(PlaybackTick::playing(position, 60.0), now);
        let scheduler = controller.session().scheduler();
        assert!(scheduler.active_count() <= 3);
        assert!(scheduler.surface().mounted.len() <= 3);
        position += 0.25;
    }

    while let Some(deadline) = controller.session().scheduler().next_deadline() {
        controller.advance(deadline);
        assert!(controller.session().scheduler().active_count() <= 3);
    }

    let stats = controller.session().scheduler().stats();
    assert_eq!(stats.shown, total, "every comment is shown exactly once");
    assert_eq!(stats.peak_active, 3);
    assert!(stats.queued > 0);
    assert_eq!(controller.session().scheduler().queued_len(), 0);
    assert!(controller.session().scheduler().surface().mounted.is_empty());
}

#[test]
fn overlay_is_gone_by_display_plus_fade() {
    let config = OverlayConfig::default();
    let mut scheduler = OverlayScheduler::new(config.clone(), RecordingSurface::default());
    let t0 = Instant::now();

    let Admission::Shown(id) = scheduler.admit(comment("a", 1.0), t0) else {
        panic!("expected the overlay to be shown");
    };

    scheduler.advance(t0 + config.display_duration() - ms(1));
    assert!(scheduler.active()[0].is_visible());

    scheduler.advance(t0 + config.display_duration());
    assert!(!scheduler.active()[0].is_visible());

    scheduler.advance(t0 + config.display_duration() + config.fade_duration());
    assert_eq!(scheduler.active_count(), 0);
    assert_eq!(
        scheduler.surface().events.last(),
        Some(&SurfaceEvent::Unmount(id))
    );
}

#[test]
fn late_advance_does_not_stretch_lifetimes() {
    let config = OverlayConfig {
        max_concurrent: 1,
        ..OverlayConfig::default()
    };
    let mut scheduler = OverlayScheduler::new(config, RecordingSurface::default());
    let t0 = Instant::now();

    assert!(matches!(
        scheduler.admit(comment("a", 1.0), t0),
        Admission::Shown(_)
    ));
    assert_eq!(scheduler.admit(comment("b", 1.0), t0), Admission::Queued(0));

    // One call long after both lifecycles should have ended:
    // a expires at 4.0s and is removed at 4.5s, b then runs to 9.0s.
    scheduler.advance(t0 + Duration::from_secs(10));

    assert_eq!(scheduler.active_count(), 0);
    assert_eq!(scheduler.queued_len(), 0);
    assert_eq!(scheduler.pending_timers(), 0);
    let unmounts: Vec<OverlayId> = scheduler
        .surface()
        .events
        .iter()
        .filter_map(|e| match e {
            SurfaceEvent::Unmount(id) => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(unmounts.len(), 2);
}

#[test]
fn freed_slot_is_reused_by_the_queue() {
    let config = OverlayConfig::default();
    let mut scheduler = OverlayScheduler::new(config.clone(), RecordingSurface::default());
    let t0 = Instant::now();

    for (i, id) in ["a", "b", "c", "d"].iter().enumerate() {
        scheduler.admit(comment(id, 1.0), t0 + ms(i as u64 * 100));
    }
    assert_eq!(scheduler.queued_len(), 1);

    // "a" (slot 0) is removed first; "d" takes its slot
    scheduler.advance(t0 + config.display_duration() + config.fade_duration());

    let last_mount = scheduler
        .surface()
        .events
        .iter()
        .rev()
        .find_map(|e| match e {
            SurfaceEvent::Mount { slot, .. } => Some(*slot),
            _ => None,
        });
    assert_eq!(last_mount, Some(0));
    assert_eq!(scheduler.active_count(), 3);
    assert_eq!(scheduler.surface().mounts(), 4);
}

#[test]
fn paused_playback_shows_nothing() {
    let mut controller = controller(VIDEO_A, 60.0);
    commit(&mut controller, vec![comment("a", 10.0)]);

    let now = Instant::now();
    assert_eq!(
        controller.on_playback(PlaybackTick::paused(10.0, 60.0), now),
        0
    );
    assert_eq!(controller.session().scheduler().active_count(), 0);
}

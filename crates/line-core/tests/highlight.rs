// File: crates/line-core/tests/highlight.rs
// Purpose: Thumb broadcast: suppression, cross-chart sync, scope isolation, unsubscription.

use line_core::series::instant_from_millis;
use line_core::{
    ChannelRegistry, LineChart, LineOptions, Point, PointerEvent, Thumb, ThumbChannel, HIGHLIGHT_RADIUS,
    NORMAL_RADIUS,
};

const H: f64 = HIGHLIGHT_RADIUS;
const N: f64 = NORMAL_RADIUS;

fn chart(xs: &[f64], channel: &ThumbChannel) -> LineChart {
    let points: Vec<Point> = xs
        .iter()
        .map(|&x| Point { t: instant_from_millis(x), x: Some(x), y: x / 1000.0 })
        .collect();
    LineChart::new(&points, LineOptions::plugin(), Some(channel.clone())).expect("chart")
}

#[test]
fn repeated_thumb_repaints_once() {
    let channel = ThumbChannel::new("main");
    let a = chart(&[1000.0, 2000.0, 3000.0], &channel);

    assert!(channel.publish(2000.0));
    assert!(!channel.publish(2000.0));
    assert_eq!(channel.repaint_count(), 1);
    assert_eq!(channel.last(), Some(Thumb::from(2000.0)));
    assert_eq!(a.markers().radii(), vec![N, H, N]);
}

#[test]
fn hover_syncs_every_chart_on_the_channel() {
    let channel = ThumbChannel::new("main");
    let a = chart(&[1000.0, 2000.0, 3000.0], &channel);
    let b = chart(&[2000.0, 3000.0, 4000.0, 5000.0], &channel);
    assert_eq!(channel.subscriber_count(), 2);

    // hovering x = 3000 in A highlights x = 3000 in B
    a.handle_event(PointerEvent::Enter { index: 2 }).unwrap();
    assert_eq!(a.markers().radii(), vec![N, N, H]);
    assert_eq!(b.markers().radii(), vec![N, H, N, N]);

    // moving to x = 2000 in B moves the highlight in both
    b.handle_event(PointerEvent::Enter { index: 0 }).unwrap();
    assert_eq!(a.markers().radii(), vec![N, H, N]);
    assert_eq!(b.markers().radii(), vec![H, N, N, N]);
    assert_eq!(channel.repaint_count(), 2);
}

#[test]
fn leave_only_touches_the_hovered_marker() {
    let channel = ThumbChannel::new("main");
    let a = chart(&[1000.0, 2000.0], &channel);
    let b = chart(&[1000.0, 2000.0], &channel);

    a.handle_event(PointerEvent::Enter { index: 1 }).unwrap();
    a.handle_event(PointerEvent::Leave { index: 1 }).unwrap();
    assert_eq!(a.markers().radii(), vec![N, N]);
    assert_eq!(b.markers().radii(), vec![N, H]);
    assert_eq!(channel.last(), Some(Thumb::from(2000.0)));

    // re-entering the same marker is suppressed by the channel but the
    // hovered marker still grows
    a.handle_event(PointerEvent::Enter { index: 1 }).unwrap();
    assert_eq!(channel.repaint_count(), 1);
    assert_eq!(a.markers().radii(), vec![N, H]);
}

#[test]
fn scopes_do_not_interfere() {
    let mut registry = ChannelRegistry::new();
    let main = registry.main();
    let side = registry.channel("sidebar");
    let a = chart(&[1000.0, 2000.0], &main);
    let b = chart(&[1000.0, 2000.0], &side);

    a.handle_event(PointerEvent::Enter { index: 0 }).unwrap();
    assert_eq!(a.markers().radii(), vec![H, N]);
    assert_eq!(b.markers().radii(), vec![N, N]);
    assert_eq!(side.last(), None);
}

#[test]
fn record_markers_never_match_by_identity() {
    let channel = ThumbChannel::new("main");
    let records: Vec<Point> = (0..3)
        .map(|i| Point { t: instant_from_millis(1000.0 * f64::from(i)), x: None, y: f64::from(i) })
        .collect();
    let a = LineChart::new(&records, LineOptions::plugin(), Some(channel.clone())).unwrap();
    let b = LineChart::new(&records, LineOptions::plugin(), Some(channel.clone())).unwrap();

    a.handle_event(PointerEvent::Enter { index: 1 }).unwrap();
    assert_eq!(channel.last(), Some(Thumb(None)));
    assert_eq!(a.markers().radii(), vec![N, H, N]);
    assert_eq!(b.markers().radii(), vec![N, N, N]);
}

#[test]
fn dropped_charts_leave_the_channel() {
    let channel = ThumbChannel::new("main");
    let a = chart(&[1000.0], &channel);
    {
        let _b = chart(&[1000.0], &channel);
        assert_eq!(channel.subscriber_count(), 2);
    }
    assert_eq!(channel.subscriber_count(), 1);
    assert!(channel.publish(1000.0));
    assert_eq!(a.markers().radii(), vec![H]);
}

#[test]
fn marker_snapshot_is_detached_from_repaints() {
    let channel = ThumbChannel::new("main");
    let a = chart(&[1000.0, 2000.0, 3000.0], &channel);
    let before = a.markers().snapshot();

    a.handle_event(PointerEvent::Enter { index: 1 }).unwrap();
    assert!(channel.publish(3000.0));

    assert!(before.iter().all(|m| !m.is_highlighted()));
    let after = a.markers().snapshot();
    assert!(after[2].is_highlighted());
    assert!(!after[1].is_highlighted());
}

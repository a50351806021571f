use super::*;
use crate::render::record::{RecordedCall, RecordingGraphics};

#[test]
fn tint_is_created_lazily_on_first_draw() {
    let shared = SharedResources::new();
    let mut lease = shared.lease();
    let mut g = RecordingGraphics::without_native_tint();
    assert!(!shared.tint_ready());

    lease.draw_solid(&mut g, 10.0, 2.0, ColorArgb(0xFFFF_0000), 0.5);
    lease.draw_solid(&mut g, 10.0, 2.0, ColorArgb(0xFFFF_0000), 0.5);
    assert!(shared.tint_ready());
    assert_eq!(g.live_effects(), 1);
    assert_eq!(g.live_textures(), 1);
    assert_eq!(g.scope_violations(), 0);

    let tinted = g
        .calls()
        .iter()
        .filter(|c| matches!(c, RecordedCall::Tinted(_)))
        .count();
    assert_eq!(tinted, 2);
    lease.release(&mut g);
}

#[test]
fn resources_survive_until_last_holder_releases() {
    let shared = SharedResources::new();
    let mut a = shared.lease();
    let b = shared.lease();
    let mut g = RecordingGraphics::without_native_tint();
    a.draw_solid(&mut g, 1.0, 1.0, ColorArgb::WHITE, 1.0);
    assert_eq!(shared.holders(), 2);

    a.release(&mut g);
    assert_eq!(shared.holders(), 1);
    assert!(shared.tint_ready());
    assert_eq!(g.live_effects(), 1);

    b.release(&mut g);
    assert_eq!(shared.holders(), 0);
    assert!(!shared.tint_ready());
    assert_eq!(g.live_effects(), 0);
    assert_eq!(g.live_textures(), 0);
    assert_eq!(g.scope_violations(), 0);
}

#[test]
fn failed_creation_draws_nothing_and_retries() {
    let shared = SharedResources::new();
    let mut lease = shared.lease();
    let mut g = RecordingGraphics::without_native_tint();
    g.set_fail_allocations(true);

    lease.draw_solid(&mut g, 1.0, 1.0, ColorArgb::WHITE, 1.0);
    assert!(!shared.tint_ready());
    assert!(g.quads().is_empty());

    g.set_fail_allocations(false);
    lease.draw_solid(&mut g, 1.0, 1.0, ColorArgb::WHITE, 1.0);
    assert!(shared.tint_ready());
    assert_eq!(g.quads().len(), 1);
    lease.release(&mut g);
}

#[test]
fn dropping_a_lease_still_decrements() {
    let shared = SharedResources::new();
    let lease = shared.lease();
    assert_eq!(shared.holders(), 1);
    drop(lease);
    assert_eq!(shared.holders(), 0);
}

#[test]
fn shared_handles_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SharedResources>();
    assert_send_sync::<TintLease>();
}

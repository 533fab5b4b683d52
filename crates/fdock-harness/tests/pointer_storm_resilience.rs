//! Pointer storms against a live controller.
//!
//! Run with a fixed seed:
//!   FDOCK_TEST_SEED=42 cargo test -p fdock-harness --test pointer_storm_resilience

use fdock_core::{GestureDecision, GesturePhase, PointerEvent, PointerSample};
use fdock_harness::{
    DockFixture, SimController, StormConfig, StormPattern, generate_storm, surface_rect,
};

const SEEDS: [u64; 4] = [1, 7, 0xDEAD_BEEF, 0x5EED_F00D];

/// Route controller logs to the test writer; `RUST_LOG=fdock_runtime=debug`
/// shows every settle and cancel for a failing seed.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

fn storm_on(ctl: &SimController, fixture: &DockFixture, pattern: StormPattern) -> StormConfig {
    StormConfig::new(pattern, fixture.seed(), surface_rect(ctl), fixture.screen())
}

/// Invariants that hold whenever no drag is in flight.
fn assert_at_rest(ctl: &SimController, ctx: &str) {
    assert_eq!(
        ctl.position(),
        ctl.store().load(),
        "{ctx}: resting position differs from persisted"
    );
    let p = ctl.position();
    let screen = ctl.screen_bounds();
    assert!(
        p.x >= 0 && p.x <= screen.width - ctl.surface_size().width,
        "{ctx}: x={} off screen",
        p.x
    );
    assert!(p.y >= 0 && p.y < screen.height, "{ctx}: y={} off screen", p.y);
}

#[test]
fn chaos_storm_keeps_rest_invariants() {
    init_logging();
    for default_seed in SEEDS {
        let fixture = DockFixture::new("chaos", default_seed);
        let mut ctl = fixture.controller();
        let config = storm_on(&ctl, &fixture, StormPattern::Chaos { count: 2_000 });
        let storm = generate_storm(&config);

        let mut in_drag = false;
        for (idx, event) in storm.events.iter().enumerate() {
            let decision = ctl.handle_pointer(*event);
            match decision {
                GestureDecision::DragStart { .. } => in_drag = true,
                GestureDecision::DragEnd { .. } | GestureDecision::DragCancel => in_drag = false,
                _ => {}
            }
            if matches!(event, PointerEvent::Press(_)) {
                in_drag = false;
            }
            if !in_drag {
                assert_at_rest(&ctl, &format!("{} event {idx}", fixture.run_id()));
            }
        }

        ctl.handle_pointer(PointerEvent::Cancel(PointerSample::new(0.0, 0.0, u64::MAX)));
        assert_eq!(ctl.phase(), GesturePhase::Idle);
        assert_at_rest(&ctl, fixture.run_id());
    }
}

#[test]
fn tap_burst_never_drags_or_moves() {
    for default_seed in SEEDS {
        let fixture = DockFixture::new("taps", default_seed);
        let mut ctl = fixture.controller();
        let start = ctl.position();
        let storm = generate_storm(&storm_on(
            &ctl,
            &fixture,
            StormPattern::TapBurst {
                count: 300,
                slop: 8.0,
            },
        ));
        for event in &storm.events {
            let decision = ctl.handle_pointer(*event);
            assert!(
                !decision.is_drag(),
                "{}: tap burst produced {decision:?}",
                fixture.run_id()
            );
        }
        assert_eq!(ctl.position(), start);
    }
}

#[test]
fn drag_walk_ends_docked() {
    init_logging();
    for default_seed in SEEDS {
        let fixture = DockFixture::new("walk", default_seed);
        let mut ctl = fixture.controller();
        let storm = generate_storm(&storm_on(
            &ctl,
            &fixture,
            StormPattern::DragWalk {
                steps: 400,
                max_step: 60.0,
            },
        ));
        let decisions: Vec<_> = storm
            .events
            .iter()
            .map(|e| ctl.handle_pointer(*e))
            .collect();

        let starts = decisions
            .iter()
            .filter(|d| matches!(d, GestureDecision::DragStart { .. }))
            .count();
        assert_eq!(starts, 1, "{}", fixture.run_id());
        assert!(matches!(
            decisions.last(),
            Some(GestureDecision::DragEnd { .. })
        ));

        let screen = fixture.screen();
        let right = screen.width - ctl.surface_size().width;
        assert!(
            ctl.position().x == 0 || ctl.position().x == right,
            "{}: rested at x={}",
            fixture.run_id(),
            ctl.position().x
        );
        assert_at_rest(&ctl, fixture.run_id());
    }
}

#[test]
fn jitter_inside_slop_is_a_single_gesture() {
    for default_seed in SEEDS {
        let fixture = DockFixture::new("jitter", default_seed);
        let mut ctl = fixture.controller();
        let start = ctl.position();
        let storm = generate_storm(&storm_on(
            &ctl,
            &fixture,
            StormPattern::Jitter {
                count: 500,
                radius: 7.0,
            },
        ));
        let decisions: Vec<_> = storm
            .events
            .iter()
            .map(|e| ctl.handle_pointer(*e))
            .collect();
        assert!(decisions.iter().all(|d| !d.is_drag()));
        assert_eq!(ctl.position(), start);
    }
}

#[test]
fn storm_log_replays_identically() {
    let fixture = DockFixture::new("replay", 11);
    let ctl = fixture.controller();
    let config = storm_on(&ctl, &fixture, StormPattern::Chaos { count: 100 });
    assert_eq!(
        generate_storm(&config).to_jsonl(),
        generate_storm(&config).to_jsonl()
    );
}

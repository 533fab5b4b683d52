#![forbid(unsafe_code)]

//! Deterministic pointer storms for stress testing the dock controller.
//!
//! # Storm Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | [`StormPattern::TapBurst`] | Many taps on the surface, each jittering inside half the slop |
//! | [`StormPattern::DragWalk`] | One long drag that random-walks across the screen |
//! | [`StormPattern::Jitter`] | A single press with many small moves, then release |
//! | [`StormPattern::Chaos`] | Unstructured press/move/release/cancel anywhere |
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"storm_start","pattern":"tap_burst","seed":7,"event_count":400}
//! {"event":"storm_inject","idx":0,"kind":"press","x":312.0,"y":540.0}
//! ```

use fdock_core::event::{PointerEvent, PointerSample};
use fdock_core::geometry::{Rect, ScreenBounds};

// ============================================================================
// Configuration
// ============================================================================

/// Pattern type for storm generation.
#[derive(Debug, Clone, PartialEq)]
pub enum StormPattern {
    /// `count` complete taps.
    TapBurst { count: usize, slop: f32 },
    /// Press, `steps` moves of at most `max_step` px per axis, release.
    DragWalk { steps: usize, max_step: f32 },
    /// Press, `count` moves within `radius` of the press point, release.
    Jitter { count: usize, radius: f32 },
    /// `count` arbitrary events with no gesture structure.
    Chaos { count: usize },
}

impl StormPattern {
    /// Pattern name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TapBurst { .. } => "tap_burst",
            Self::DragWalk { .. } => "drag_walk",
            Self::Jitter { .. } => "jitter",
            Self::Chaos { .. } => "chaos",
        }
    }
}

/// Configuration for a pointer storm.
#[derive(Debug, Clone)]
pub struct StormConfig {
    pub pattern: StormPattern,
    /// Seed for deterministic generation.
    pub seed: u64,
    /// Absolute rectangle of the surface when the storm starts. Presses
    /// land inside it.
    pub surface: Rect,
    pub screen: ScreenBounds,
}

impl StormConfig {
    #[must_use]
    pub fn new(pattern: StormPattern, seed: u64, surface: Rect, screen: ScreenBounds) -> Self {
        Self {
            pattern,
            seed,
            surface,
            screen,
        }
    }
}

// ============================================================================
// Event Generation
// ============================================================================

/// xorshift64.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f32 {
        (self.next() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in `[-r, r)`.
    fn symmetric(&mut self, r: f32) -> f32 {
        (self.unit() * 2.0 - 1.0) * r
    }

    /// Pixel center in `[lo, lo + len)`; `lo` when `len <= 0`.
    fn span(&mut self, lo: i32, len: i32) -> f32 {
        if len <= 0 {
            return lo as f32;
        }
        let offset = (self.next() % len as u64) as i32;
        lo.saturating_add(offset) as f32 + 0.5
    }
}

/// Generated storm with events and metadata.
#[derive(Debug, Clone)]
pub struct PointerStorm {
    pub events: Vec<PointerEvent>,
    pub pattern_name: &'static str,
    pub seed: u64,
}

impl PointerStorm {
    /// Render the storm as JSONL lines for replay logs.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = serde_json::json!({
            "event": "storm_start",
            "pattern": self.pattern_name,
            "seed": self.seed,
            "event_count": self.events.len(),
        })
        .to_string();
        for (idx, event) in self.events.iter().enumerate() {
            let sample = event.sample();
            out.push('\n');
            out.push_str(
                &serde_json::json!({
                    "event": "storm_inject",
                    "idx": idx,
                    "kind": event.name(),
                    "x": sample.x,
                    "y": sample.y,
                })
                .to_string(),
            );
        }
        out
    }
}

/// Generate a deterministic pointer storm from config.
#[must_use]
pub fn generate_storm(config: &StormConfig) -> PointerStorm {
    let mut rng = Rng::new(config.seed);
    let mut out = Emitter::default();
    match &config.pattern {
        StormPattern::TapBurst { count, slop } => {
            generate_tap_burst(&mut out, *count, *slop, config.surface, &mut rng);
        }
        StormPattern::DragWalk { steps, max_step } => {
            generate_drag_walk(&mut out, *steps, *max_step, config, &mut rng);
        }
        StormPattern::Jitter { count, radius } => {
            generate_jitter(&mut out, *count, *radius, config.surface, &mut rng);
        }
        StormPattern::Chaos { count } => generate_chaos(&mut out, *count, config, &mut rng),
    }
    PointerStorm {
        events: out.events,
        pattern_name: config.pattern.name(),
        seed: config.seed,
    }
}

#[derive(Default)]
struct Emitter {
    events: Vec<PointerEvent>,
}

impl Emitter {
    fn emit(&mut self, make: fn(PointerSample) -> PointerEvent, x: f32, y: f32) {
        let ordinal = self.events.len() as u64;
        self.events.push(make(PointerSample::new(x, y, ordinal)));
    }
}

fn point_in(surface: Rect, rng: &mut Rng) -> (f32, f32) {
    (
        rng.span(surface.x, surface.width),
        rng.span(surface.y, surface.height),
    )
}

fn generate_tap_burst(out: &mut Emitter, count: usize, slop: f32, surface: Rect, rng: &mut Rng) {
    let reach = (slop / 2.0).max(0.0);
    for _ in 0..count {
        let (x, y) = point_in(surface, rng);
        out.emit(PointerEvent::Press, x, y);
        let wiggles = rng.next() % 3;
        for _ in 0..wiggles {
            out.emit(
                PointerEvent::Move,
                x + rng.symmetric(reach),
                y + rng.symmetric(reach),
            );
        }
        out.emit(PointerEvent::Release, x, y);
    }
}

fn generate_drag_walk(
    out: &mut Emitter,
    steps: usize,
    max_step: f32,
    config: &StormConfig,
    rng: &mut Rng,
) {
    let (mut x, mut y) = point_in(config.surface, rng);
    out.emit(PointerEvent::Press, x, y);
    let max_x = config.screen.width.max(1) as f32;
    let max_y = config.screen.height.max(1) as f32;
    for _ in 0..steps {
        x = (x + rng.symmetric(max_step)).clamp(0.0, max_x);
        y = (y + rng.symmetric(max_step)).clamp(0.0, max_y);
        out.emit(PointerEvent::Move, x, y);
    }
    out.emit(PointerEvent::Release, x, y);
}

fn generate_jitter(out: &mut Emitter, count: usize, radius: f32, surface: Rect, rng: &mut Rng) {
    let (x, y) = point_in(surface, rng);
    out.emit(PointerEvent::Press, x, y);
    for _ in 0..count {
        out.emit(
            PointerEvent::Move,
            x + rng.symmetric(radius),
            y + rng.symmetric(radius),
        );
    }
    out.emit(PointerEvent::Release, x, y);
}

fn generate_chaos(out: &mut Emitter, count: usize, config: &StormConfig, rng: &mut Rng) {
    let screen = Rect::new(0, 0, config.screen.width, config.screen.height);
    for _ in 0..count {
        let kind = rng.next() % 10;
        match kind {
            // 20% press on the surface
            0 | 1 => {
                let (x, y) = point_in(config.surface, rng);
                out.emit(PointerEvent::Press, x, y);
            }
            // 50% move anywhere
            2..=6 => {
                let (x, y) = point_in(screen, rng);
                out.emit(PointerEvent::Move, x, y);
            }
            // 20% release
            7 | 8 => {
                let (x, y) = point_in(screen, rng);
                out.emit(PointerEvent::Release, x, y);
            }
            // 10% cancel
            _ => out.emit(PointerEvent::Cancel, 0.0, 0.0),
        }
    }
}

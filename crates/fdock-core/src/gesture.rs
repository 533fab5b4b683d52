#![forbid(unsafe_code)]

//! Gesture classification: decides whether a pointer stream is a tap on a
//! dock control or a drag of the whole surface.
//!
//! [`GestureClassifier`] is a stateful processor that consumes one
//! [`PointerEvent`] at a time and returns exactly one [`GestureDecision`].
//!
//! # State Machine
//!
//! ```text
//!            press on control                  move > slop
//!   Idle ─────────────────────▶ PendingChildClick ────────────┐
//!    │                             │ release                   │
//!    │ press on body               ▼                           ▼
//!    └────────────────────▶ PendingDrag ── move > slop ──▶ Dragging
//!                              │ release                  │ release / cancel
//!                              ▼                          ▼
//!                        Click(body) / Ignored      DragEnd / DragCancel
//! ```
//!
//! # Invariants
//!
//! 1. Click and drag never both emit for the same press → release stream.
//!    Once the slop threshold is crossed the release produces `DragEnd`.
//! 2. At most one gesture session exists. A press always replaces it.
//! 3. While a control tap is pending no delta is reported, so the surface
//!    cannot move while the tap is still ambiguous.
//! 4. Every `DragStart` is followed by zero or more `DragUpdate` and then
//!    exactly one `DragEnd` or `DragCancel` (or a replacing press).
//!
//! # Failure Modes
//!
//! - Move/release/cancel with no active session are `Ignored`.
//! - A release that lands beyond the slop without any intermediate move is
//!   neither a tap nor a drag and is `Ignored`.

use std::fmt;

use crate::event::{PointerEvent, PointerSample};
use crate::geometry::{Delta, SurfacePosition};
use crate::hit_region::{HitRegionSet, HitTarget, RegionId};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default touch slop in pixels.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Thresholds for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Per-axis displacement (px) a pointer must strictly exceed before a
    /// press turns into a drag.
    pub touch_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
        }
    }
}

// ---------------------------------------------------------------------------
// Public outputs
// ---------------------------------------------------------------------------

/// Classification emitted for one pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureDecision {
    /// Nothing actionable.
    Ignored,
    /// A completed tap on the given region.
    Click(RegionId),
    /// The slop threshold was crossed. Carries the first delta so the
    /// surface can follow immediately.
    DragStart { delta: Delta },
    /// Pointer moved during a drag; delta is relative to the press origin.
    DragUpdate { delta: Delta },
    /// Pointer lifted after a drag.
    DragEnd { delta: Delta },
    /// The host cancelled an in-flight drag.
    DragCancel,
}

impl GestureDecision {
    /// True for the drag lifecycle variants.
    #[must_use]
    pub const fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::DragStart { .. } | Self::DragUpdate { .. } | Self::DragEnd { .. } | Self::DragCancel
        )
    }
}

/// Externally visible classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Idle,
    PendingChildClick,
    PendingDrag,
    Dragging,
}

/// Bookkeeping for one press → release stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Surface position when the press landed.
    pub origin_position: SurfacePosition,
    /// The press sample.
    pub origin_pointer: PointerSample,
    /// Whether the slop threshold has been crossed.
    pub is_dragging: bool,
}

impl GestureSession {
    fn new(origin_position: SurfacePosition, origin_pointer: PointerSample) -> Self {
        Self {
            origin_position,
            origin_pointer,
            is_dragging: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Tracker {
    Idle,
    PendingChildClick {
        region: RegionId,
        session: GestureSession,
    },
    PendingDrag {
        body: RegionId,
        clickable: bool,
        session: GestureSession,
    },
    Dragging {
        session: GestureSession,
    },
}

// ---------------------------------------------------------------------------
// GestureClassifier
// ---------------------------------------------------------------------------

/// Stateful tap-vs-drag classifier.
///
/// Call [`process`](GestureClassifier::process) for every pointer event with
/// the region set for the current dock state and the current surface
/// position (needed to map absolute samples into surface-local space).
pub struct GestureClassifier {
    config: GestureConfig,
    tracker: Tracker,
}

impl fmt::Debug for GestureClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureClassifier")
            .field("phase", &self.phase())
            .field("touch_slop", &self.config.touch_slop)
            .finish()
    }
}

impl GestureClassifier {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracker: Tracker::Idle,
        }
    }

    /// Classify one pointer event.
    pub fn process(
        &mut self,
        event: &PointerEvent,
        regions: &HitRegionSet,
        surface: SurfacePosition,
    ) -> GestureDecision {
        let tracker = std::mem::replace(&mut self.tracker, Tracker::Idle);
        let slop = self.config.touch_slop;

        let (next, decision) = match (tracker, *event) {
            // A press always starts over, whatever was in flight.
            (_, PointerEvent::Press(sample)) => Self::on_press(sample, regions, surface),

            (Tracker::Idle, _) => (Tracker::Idle, GestureDecision::Ignored),

            // --- PendingChildClick ---
            (Tracker::PendingChildClick { region, session }, PointerEvent::Move(sample)) => {
                if sample.exceeds_slop(&session.origin_pointer, slop) {
                    Self::begin_drag(session, sample)
                } else {
                    (
                        Tracker::PendingChildClick { region, session },
                        GestureDecision::Ignored,
                    )
                }
            }
            (Tracker::PendingChildClick { region, session }, PointerEvent::Release(sample)) => {
                if sample.exceeds_slop(&session.origin_pointer, slop) {
                    (Tracker::Idle, GestureDecision::Ignored)
                } else {
                    (Tracker::Idle, GestureDecision::Click(region))
                }
            }

            // --- PendingDrag ---
            (
                Tracker::PendingDrag {
                    body,
                    clickable,
                    session,
                },
                PointerEvent::Move(sample),
            ) => {
                if sample.exceeds_slop(&session.origin_pointer, slop) {
                    Self::begin_drag(session, sample)
                } else {
                    (
                        Tracker::PendingDrag {
                            body,
                            clickable,
                            session,
                        },
                        GestureDecision::Ignored,
                    )
                }
            }
            (
                Tracker::PendingDrag {
                    body,
                    clickable,
                    session,
                },
                PointerEvent::Release(sample),
            ) => {
                let tapped = !sample.exceeds_slop(&session.origin_pointer, slop);
                if tapped && clickable {
                    (Tracker::Idle, GestureDecision::Click(body))
                } else {
                    (Tracker::Idle, GestureDecision::Ignored)
                }
            }

            // --- Dragging ---
            (Tracker::Dragging { session }, PointerEvent::Move(sample)) => {
                let delta = sample.delta_from(&session.origin_pointer);
                (
                    Tracker::Dragging { session },
                    GestureDecision::DragUpdate { delta },
                )
            }
            (Tracker::Dragging { session }, PointerEvent::Release(sample)) => {
                let delta = sample.delta_from(&session.origin_pointer);
                (Tracker::Idle, GestureDecision::DragEnd { delta })
            }
            (Tracker::Dragging { .. }, PointerEvent::Cancel(_)) => {
                (Tracker::Idle, GestureDecision::DragCancel)
            }

            (_, PointerEvent::Cancel(_)) => (Tracker::Idle, GestureDecision::Ignored),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            event = event.name(),
            ordinal = event.sample().ordinal,
            phase = ?Self::phase_of(&next),
            decision = ?decision,
            "gesture classified"
        );

        self.tracker = next;
        decision
    }

    /// Current phase of the state machine.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        Self::phase_of(&self.tracker)
    }

    /// Whether the slop threshold has been crossed in the current session.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.tracker, Tracker::Dragging { .. })
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        match &self.tracker {
            Tracker::Idle => None,
            Tracker::PendingChildClick { session, .. }
            | Tracker::PendingDrag { session, .. }
            | Tracker::Dragging { session } => Some(session),
        }
    }

    /// Drop any in-flight session without emitting a decision.
    pub fn reset(&mut self) {
        self.tracker = Tracker::Idle;
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Takes effect on the next event.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GestureClassifier {
    fn on_press(
        sample: PointerSample,
        regions: &HitRegionSet,
        surface: SurfacePosition,
    ) -> (Tracker, GestureDecision) {
        let (lx, ly) = sample.local_to(surface);
        let session = GestureSession::new(surface, sample);
        let tracker = match regions.hit_test(lx, ly) {
            Some(HitTarget::Control(region)) => Tracker::PendingChildClick { region, session },
            Some(HitTarget::Body { id, clickable }) => Tracker::PendingDrag {
                body: id,
                clickable,
                session,
            },
            None => Tracker::Idle,
        };
        (tracker, GestureDecision::Ignored)
    }

    fn begin_drag(
        mut session: GestureSession,
        sample: PointerSample,
    ) -> (Tracker, GestureDecision) {
        session.is_dragging = true;
        let delta = sample.delta_from(&session.origin_pointer);
        (
            Tracker::Dragging { session },
            GestureDecision::DragStart { delta },
        )
    }

    fn phase_of(tracker: &Tracker) -> GesturePhase {
        match tracker {
            Tracker::Idle => GesturePhase::Idle,
            Tracker::PendingChildClick { .. } => GesturePhase::PendingChildClick,
            Tracker::PendingDrag { .. } => GesturePhase::PendingDrag,
            Tracker::Dragging { .. } => GesturePhase::Dragging,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

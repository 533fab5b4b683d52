#![forbid(unsafe_code)]

//! Dock controller.
//!
//! Owns the gesture session, the current surface position and dock state.
//! Pointer events from the host are classified, drags move the surface,
//! drag ends settle it against a screen edge and persist it, and screen
//! geometry changes re-dock it.
//!
//! # Lifecycle
//!
//! ```text
//! Press ─► Pending ─┬─ release within slop ─► Click ─► toggle / callback
//!                   └─ move beyond slop ───► DragStart ─► DragUpdate*
//!                                              ├─ Release ─► settle ─► persist ─► reposition
//!                                              └─ Cancel  ─► restore origin ─► reposition
//! ```
//!
//! # Invariants
//!
//! 1. Between gestures the position is the persisted one and lies on
//!    screen, including right after construction and reattachment.
//! 2. Cancelling a drag restores the pre-drag position. It is only written
//!    when a deferred re-dock moves it.
//! 3. Geometry changes are deferred while a gesture is in flight or the
//!    surface is detached. The oldest bounds are kept; the re-dock runs when
//!    the gesture ends (a settle already uses the new bounds) or on
//!    [`DockController::on_attached`].
//! 4. No failure aborts an operation. Host and store errors are logged and
//!    kept in [`Diagnostics`].

use std::collections::HashMap;
use std::fmt;

use fdock_core::density::Density;
use fdock_core::dock_state::DockState;
use fdock_core::event::PointerEvent;
use fdock_core::geometry::{Delta, ScreenBounds, Size, SurfacePosition};
use fdock_core::gesture::{GestureClassifier, GestureConfig, GestureDecision, GesturePhase};
use fdock_core::hit_region::{HitRegion, RegionId};
use fdock_layout::{
    PlacementConfig, PlacementEngine, StackAppearance, SurfaceLayout, TOGGLE_CONTROL_ID,
    layout_stack, shortcut_region_id,
};

use crate::config::{DockPolicy, PolicyConfigError};
use crate::error::{Diagnostics, DockError};
use crate::host::WindowHost;
use crate::position_store::{DEFAULT_POSITION, PositionStore, StoreKeys};
use crate::store::StorageBackend;

/// Callback invoked when a region is tapped.
pub type ClickHandler = Box<dyn FnMut(&RegionId)>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything a [`DockController`] is bound to at construction.
pub struct DockControllerConfig<H, S> {
    pub host: H,
    pub storage: S,
    pub keys: StoreKeys,
    pub default_position: SurfacePosition,
    pub gesture: GestureConfig,
    pub placement: PlacementConfig,
    pub density: Density,
    pub appearance: StackAppearance,
    /// Shortcut names in display order.
    pub shortcuts: Vec<String>,
}

impl<H, S> DockControllerConfig<H, S> {
    /// Stock configuration around `host` and `storage`.
    #[must_use]
    pub fn new(host: H, storage: S) -> Self {
        Self {
            host,
            storage,
            keys: StoreKeys::default(),
            default_position: DEFAULT_POSITION,
            gesture: GestureConfig::default(),
            placement: PlacementConfig::default(),
            density: Density::BASELINE,
            appearance: StackAppearance::default(),
            shortcuts: Vec::new(),
        }
    }

    /// Configuration derived from a [`DockPolicy`]. A policy that fails
    /// [`DockPolicy::validate`] is refused.
    pub fn from_policy(
        policy: &DockPolicy,
        host: H,
        storage: S,
        density: Density,
    ) -> Result<Self, PolicyConfigError> {
        let errors = policy.validate();
        if !errors.is_empty() {
            return Err(PolicyConfigError::Validation(errors));
        }
        Ok(Self {
            host,
            storage,
            keys: policy.to_store_keys(),
            default_position: policy.default_position(),
            gesture: policy.to_gesture_config(),
            placement: policy.to_placement_config(density),
            density,
            appearance: policy.to_stack_appearance(),
            shortcuts: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_shortcuts<I, T>(mut self, shortcuts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.shortcuts = shortcuts.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }
}

// ---------------------------------------------------------------------------
// DockController
// ---------------------------------------------------------------------------

/// Ties the classifier, placement engine, store and host together.
pub struct DockController<H: WindowHost, S: StorageBackend> {
    host: H,
    store: PositionStore<S>,
    classifier: GestureClassifier,
    placement: PlacementEngine,
    density: Density,
    appearance: StackAppearance,
    shortcuts: Vec<String>,
    extra_regions: Vec<(DockState, HitRegion)>,
    handlers: HashMap<RegionId, ClickHandler>,
    layout: SurfaceLayout,
    position: SurfacePosition,
    dock_state: DockState,
    screen: ScreenBounds,
    /// Bounds the surface was last placed against, while a re-dock waits.
    deferred_redock: Option<ScreenBounds>,
    diagnostics: Diagnostics,
}

impl<H: WindowHost, S: StorageBackend> fmt::Debug for DockController<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockController")
            .field("position", &self.position)
            .field("dock_state", &self.dock_state)
            .field("screen", &self.screen)
            .field("deferred_redock", &self.deferred_redock)
            .field("phase", &self.classifier.phase())
            .field("size", &self.layout.size)
            .field("shortcuts", &self.shortcuts)
            .field("handlers", &self.handlers.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

impl<H: WindowHost, S: StorageBackend> DockController<H, S> {
    /// Bind to the host and store and restore the persisted position and
    /// dock state. A restored position that no longer fits the screen is
    /// clamped and written back. Nothing is moved until
    /// [`on_attached`](Self::on_attached).
    pub fn new(config: DockControllerConfig<H, S>) -> Self {
        let store = PositionStore::new(config.storage, config.keys, config.default_position);
        let restored = store.load();
        let dock_state = store.load_dock_state();
        let screen = config.host.screen_bounds();
        let layout = layout_stack(
            &config.appearance,
            config.density,
            &config.shortcuts,
            dock_state,
        );
        let position = PlacementEngine::clamp(restored, layout.size, screen);

        let mut controller = Self {
            host: config.host,
            store,
            classifier: GestureClassifier::new(config.gesture),
            placement: PlacementEngine::new(config.placement),
            density: config.density,
            appearance: config.appearance,
            shortcuts: config.shortcuts,
            extra_regions: Vec::new(),
            handlers: HashMap::new(),
            layout,
            position,
            dock_state,
            screen,
            deferred_redock: None,
            diagnostics: Diagnostics::new(),
        };
        if !screen.is_valid() {
            controller.diagnostics.record(DockError::MalformedGeometry {
                width: screen.width,
                height: screen.height,
            });
        }
        if position != restored {
            tracing::info!(
                from_x = restored.x,
                from_y = restored.y,
                x = position.x,
                y = position.y,
                "restored position clamped on screen"
            );
            controller.persist_position();
        }
        tracing::debug!(
            x = position.x,
            y = position.y,
            state = %dock_state,
            screen = %screen,
            "dock controller restored"
        );
        controller
    }

    // --- Input -------------------------------------------------------------

    /// Classify one pointer event and apply its effect.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureDecision {
        let origin = self.classifier.session().map(|s| s.origin_position);

        // A new press abandons whatever drag was in flight.
        if matches!(event, PointerEvent::Press(_)) && self.classifier.is_dragging() {
            if let Some(origin) = origin {
                tracing::debug!("drag superseded by new press");
                self.restore(origin);
            }
        }

        let decision = self
            .classifier
            .process(&event, &self.layout.regions, self.position);

        match (&decision, origin) {
            (GestureDecision::Ignored, _) => {}
            (GestureDecision::Click(region), _) => self.dispatch_click(region),
            (
                GestureDecision::DragStart { delta } | GestureDecision::DragUpdate { delta },
                Some(origin),
            ) => {
                self.position = self.placement.follow(origin, *delta);
                self.request_reposition();
            }
            (GestureDecision::DragEnd { delta }, Some(origin)) => self.settle(origin, *delta),
            (GestureDecision::DragCancel, Some(origin)) => {
                tracing::debug!(x = origin.x, y = origin.y, "drag cancelled");
                self.restore(origin);
            }
            (_, None) => {}
        }

        if self.classifier.session().is_none() && self.host.is_attached() {
            if let Some(old) = self.deferred_redock.take() {
                // A settle already placed the surface against the new bounds.
                if !matches!(decision, GestureDecision::DragEnd { .. }) {
                    self.redock(old);
                }
            }
        }
        decision
    }

    /// The host reported new screen bounds.
    pub fn on_geometry_changed(&mut self, bounds: ScreenBounds) {
        if !bounds.is_valid() {
            self.diagnostics.record(DockError::MalformedGeometry {
                width: bounds.width,
                height: bounds.height,
            });
            return;
        }
        let old = std::mem::replace(&mut self.screen, bounds);
        if self.classifier.session().is_some() {
            tracing::debug!(old = %old, new = %bounds, "geometry change during gesture, re-dock deferred");
            self.deferred_redock.get_or_insert(old);
            return;
        }
        if !self.host.is_attached() {
            tracing::debug!(old = %old, new = %bounds, "geometry change while detached, re-dock deferred");
            self.deferred_redock.get_or_insert(old);
            return;
        }
        let old = self.deferred_redock.take().unwrap_or(old);
        self.redock(old);
    }

    /// The surface was (re)attached: retry deferred writes, reload the
    /// persisted position, re-dock it against any geometry change missed
    /// while detached and move there.
    pub fn on_attached(&mut self) {
        self.classifier.reset();
        let old = self.deferred_redock.take().unwrap_or(self.screen);
        let bounds = self.host.screen_bounds();
        if bounds.is_valid() {
            self.screen = bounds;
        } else {
            self.diagnostics.record(DockError::MalformedGeometry {
                width: bounds.width,
                height: bounds.height,
            });
        }
        if let Err(err) = self.store.flush_pending() {
            self.diagnostics.record(err);
        }
        let persisted = self.store.load();
        self.rebuild_layout();
        self.position = self
            .placement
            .reconcile(persisted, self.layout.size, old, self.screen)
            .unwrap_or_else(|| {
                PlacementEngine::clamp(persisted, self.layout.size, self.screen)
            });
        tracing::debug!(x = self.position.x, y = self.position.y, "surface attached");
        if self.position != persisted {
            self.persist_position();
        }
        self.request_reposition();
    }

    // --- Dock state and content --------------------------------------------

    /// Flip between expanded and collapsed, persist the new state and
    /// refresh the surface in place.
    pub fn toggle_dock_state(&mut self) {
        self.dock_state = self.dock_state.toggled();
        tracing::info!(state = %self.dock_state, "dock state toggled");
        if let Err(err) = self.store.save_dock_state(self.dock_state) {
            self.diagnostics.record(err);
        }
        self.rebuild_layout();
        self.request_reposition();
    }

    /// Drop a shortcut and rebuild the layout. Returns whether it existed.
    pub fn remove_shortcut(&mut self, name: &str) -> bool {
        let before = self.shortcuts.len();
        self.shortcuts.retain(|s| s != name);
        if self.shortcuts.len() == before {
            return false;
        }
        self.handlers.remove(&shortcut_region_id(name));
        tracing::info!(shortcut = name, "shortcut removed");
        self.rebuild_layout();
        true
    }

    /// Replace the shortcut list and rebuild the layout.
    pub fn set_shortcuts<I, T>(&mut self, shortcuts: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.shortcuts = shortcuts.into_iter().map(Into::into).collect();
        self.rebuild_layout();
    }

    /// Add a host-defined region to the layout of `state`, replacing any
    /// earlier registration with the same id.
    pub fn register_region(&mut self, state: DockState, region: HitRegion) {
        self.extra_regions
            .retain(|(s, r)| !(*s == state && r.id == region.id));
        self.extra_regions.push((state, region));
        if state == self.dock_state {
            self.rebuild_layout();
        }
    }

    /// Register the callback for taps on `region`.
    pub fn on_click<F>(&mut self, region: impl Into<RegionId>, handler: F)
    where
        F: FnMut(&RegionId) + 'static,
    {
        self.handlers.insert(region.into(), Box::new(handler));
    }

    // --- Accessors -----------------------------------------------------------

    #[must_use]
    pub fn position(&self) -> SurfacePosition {
        self.position
    }

    #[must_use]
    pub fn dock_state(&self) -> DockState {
        self.dock_state
    }

    #[must_use]
    pub fn screen_bounds(&self) -> ScreenBounds {
        self.screen
    }

    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.layout.size
    }

    #[must_use]
    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    #[must_use]
    pub fn shortcuts(&self) -> &[String] {
        &self.shortcuts
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.classifier.phase()
    }

    #[must_use]
    pub fn density(&self) -> Density {
        self.density
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn store(&self) -> &PositionStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PositionStore<S> {
        &mut self.store
    }

    // --- Internals -----------------------------------------------------------

    fn settle(&mut self, origin: SurfacePosition, delta: Delta) {
        let settled = self
            .placement
            .settle(origin, delta, self.layout.size, self.screen);
        tracing::info!(
            x = settled.x,
            y = settled.y,
            dx = delta.dx,
            dy = delta.dy,
            "drag settled"
        );
        self.position = settled;
        self.persist_position();
        self.request_reposition();
    }

    /// Re-dock against a width change from `old` to the current bounds.
    fn redock(&mut self, old: ScreenBounds) {
        let new = self.screen;
        if let Some(redocked) = self
            .placement
            .reconcile(self.position, self.layout.size, old, new)
        {
            tracing::info!(
                old = %old,
                new = %new,
                x = redocked.x,
                y = redocked.y,
                "re-docked after geometry change"
            );
            self.position = redocked;
            self.persist_position();
            self.request_reposition();
        }
    }

    fn restore(&mut self, origin: SurfacePosition) {
        self.position = origin;
        self.request_reposition();
    }

    fn dispatch_click(&mut self, region: &RegionId) {
        let is_toggle = region.as_str() == TOGGLE_CONTROL_ID;
        if is_toggle {
            self.toggle_dock_state();
        }
        match self.handlers.get_mut(region) {
            Some(handler) => handler(region),
            None if !is_toggle => {
                tracing::debug!(region = %region, "click on region without handler");
            }
            None => {}
        }
    }

    fn rebuild_layout(&mut self) {
        let mut layout = layout_stack(
            &self.appearance,
            self.density,
            &self.shortcuts,
            self.dock_state,
        );
        for (_, region) in self
            .extra_regions
            .iter()
            .filter(|(state, _)| *state == self.dock_state)
        {
            layout.regions.insert(region.clone());
        }
        self.layout = layout;
        tracing::debug!(
            width = self.layout.size.width,
            height = self.layout.size.height,
            regions = self.layout.regions.len(),
            "layout rebuilt"
        );
        if self.host.is_attached() {
            if let Err(err) = self.host.apply_layout(&self.layout) {
                self.diagnostics.record(err.into());
            }
        }
    }

    fn persist_position(&mut self) {
        if let Err(err) = self.store.save(self.position) {
            self.diagnostics.record(err);
        }
    }

    fn request_reposition(&mut self) {
        if !self.host.is_attached() {
            self.diagnostics.record(DockError::NotAttached);
            return;
        }
        if let Err(err) = self.host.reposition(self.position) {
            self.diagnostics.record(err.into());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#![cfg(all(feature = "policy-config", feature = "state-persistence"))]

//! A policy loaded from TOML drives the controller end to end: custom
//! store keys land in the JSON file, the default position applies to an
//! empty store, and the dock padding is scaled by density.

use fdock_core::{
    Density, DockState, GestureDecision, PointerEvent, PointerSample, ScreenBounds,
    SurfacePosition,
};
use fdock_runtime::{
    DockController, DockControllerConfig, DockPolicy, FileStorage, HostError, PolicyConfigError,
    StorageBackend, WindowHost,
};

const POLICY: &str = r#"
[placement]
dock_padding_dp = 16
default_x = 40
default_y = 60

[appearance]
opacity = 0.75
max_shortcuts = 3

[store]
pos_x_key = "dock_x"
pos_y_key = "dock_y"
dock_state_key = "dock_min"
"#;

struct Host {
    attached: bool,
}

impl WindowHost for Host {
    fn reposition(&mut self, _: SurfacePosition) -> Result<(), HostError> {
        if self.attached {
            Ok(())
        } else {
            Err(HostError::NotAttached)
        }
    }

    fn screen_bounds(&self) -> ScreenBounds {
        ScreenBounds::new(1000, 2000)
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

fn controller(policy: &DockPolicy, path: &std::path::Path) -> DockController<Host, FileStorage> {
    let storage = FileStorage::open(path).unwrap();
    DockController::new(
        DockControllerConfig::from_policy(policy, Host { attached: true }, storage, Density::new(2.0))
            .unwrap()
            .with_shortcuts(["a", "b", "c", "d"]),
    )
}

#[test]
fn policy_drives_keys_defaults_and_padding() {
    let policy = DockPolicy::from_toml_str(POLICY).unwrap();
    assert!(policy.validate().is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dock.json");
    let mut ctl = controller(&policy, &path);

    assert_eq!(ctl.position(), SurfacePosition::new(40, 60));
    assert_eq!(ctl.layout().visible_shortcuts.len(), 3);
    assert!((ctl.layout().opacity - 0.75).abs() < f32::EPSILON);

    ctl.handle_pointer(PointerEvent::Press(PointerSample::new(41.0, 61.0, 0)));
    ctl.handle_pointer(PointerEvent::Move(PointerSample::new(841.0, 261.0, 1)));
    let end = ctl.handle_pointer(PointerEvent::Release(PointerSample::new(841.0, 261.0, 2)));
    assert!(matches!(end, GestureDecision::DragEnd { .. }));

    let width = ctl.surface_size().width;
    let rest = SurfacePosition::new(1000 - width - 32, 260);
    assert_eq!(ctl.position(), rest);

    let raw = FileStorage::open(&path).unwrap();
    assert_eq!(raw.get_int("dock_x").unwrap(), Some(rest.x));
    assert_eq!(raw.get_int("dock_y").unwrap(), Some(rest.y));
    assert_eq!(raw.get_int("floating_x").unwrap(), None);

    drop(ctl);
    let ctl = controller(&policy, &path);
    assert_eq!(ctl.position(), rest);
    assert_eq!(ctl.dock_state(), DockState::Expanded);
}

#[test]
fn invalid_policy_reports_every_problem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("floatdock.toml");
    std::fs::write(
        &path,
        r#"
[appearance]
icon_size_dp = 100
max_shortcuts = 9
"#,
    )
    .unwrap();
    let Err(PolicyConfigError::Validation(errors)) = DockPolicy::from_toml_file(&path) else {
        panic!("out-of-range policy loaded");
    };
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert!(errors.iter().any(|e| e.contains("icon_size_dp")));
    assert!(errors.iter().any(|e| e.contains("max_shortcuts")));
}

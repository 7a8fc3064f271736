mod common;

use common::{is_valid, setup};
use dui::prelude::*;
use dui::toolkit::with_toolkit;
use dui::dispatch;
use dui::{DuiError, ToolkitError};

#[test]
fn test_dropping_stack_releases_everything() {
    let (_app, probe) = setup();
    let stack = vstack![
        text("a"),
        button("b"),
        hstack![text("c"), button("d")],
    ];
    // vstack + text + button/label + hstack + text + button/label
    assert_eq!(probe.live_objects(), 8);
    let handles: Vec<_> = stack.children().iter().filter_map(|c| c.handle()).collect();

    drop(stack);
    assert_eq!(probe.live_objects(), 0);
    assert!(handles.iter().all(|h| !is_valid(*h)));
}

#[test]
fn test_every_object_is_deleted_once() {
    let (_app, probe) = setup();
    let stack = hstack![button("x"), button("y")];
    drop(stack);

    assert_eq!(probe.created(), probe.deleted());
    // Children release before the container, so no call hits a freed handle
    assert_eq!(probe.stale_operations(), 0);
}

#[test]
fn test_unmount_releases_root() {
    let (mut app, probe) = setup();
    app.mount(vstack![text("a"), text("b")]);
    assert_eq!(probe.live_objects(), 3);

    app.unmount();
    assert_eq!(probe.live_objects(), 0);
    assert!(app.root().is_none());
}

#[test]
fn test_root_is_reachable_from_app() {
    let (mut app, _probe) = setup();
    app.mount(vstack![text("first")]);

    let root = app.root_mut().unwrap().downcast_mut::<VStack>().unwrap();
    root.add_child(text("second"));
    assert_eq!(root.len(), 2);
    let second = root.child_at(1).unwrap().downcast_ref::<Text>().unwrap();
    assert_eq!(second.text(), "second");
}

#[test]
fn test_view_outliving_native_parent() {
    let (_app, probe) = setup();
    let t = text("orphan");
    let handle = t.handle().unwrap();

    with_toolkit(|tk| tk.delete(handle)).unwrap().unwrap();
    assert!(!is_valid(handle));
    // Setters on the stale handle are logged and ignored
    let t = t.width(10);
    assert_eq!(t.text(), "");
    drop(t);
    assert_eq!(probe.live_objects(), 0);
}

#[test]
fn test_set_label_without_label_child_is_noop() {
    let (_app, _probe) = setup();
    let mut b = button("Start");
    let button_handle = b.handle().unwrap();
    let label = with_toolkit(|tk| tk.child(button_handle, 0)).unwrap().unwrap();

    with_toolkit(|tk| tk.delete(label)).unwrap().unwrap();
    b.set_label("Stop");
    assert_eq!(b.label(), None);
    assert!(is_valid(button_handle));
}

#[test]
fn test_set_label_updates_native_label() {
    let (_app, probe) = setup();
    let b = button("Start").with_label("Stop");
    assert_eq!(b.label().as_deref(), Some("Stop"));

    let button_handle = b.handle().unwrap();
    let label = with_toolkit(|tk| tk.child(button_handle, 0)).unwrap().unwrap();
    assert!(probe.is_centered(label));
}

#[test]
fn test_try_new_reports_exhaustion() {
    let _ = env_logger::builder().is_test(true).try_init();
    let _app = App::new(HeadlessToolkit::default().with_object_limit(2));

    let first = Text::try_new("one").unwrap();
    // Button needs two objects, only one slot left
    let err = Button::try_new("two").err().unwrap();
    assert!(matches!(err, DuiError::Toolkit(_)));
    drop(first);
    assert!(Button::try_new("two").is_ok());
}

#[test]
fn test_building_without_app_fails() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert!(matches!(Text::try_new("nope"), Err(DuiError::NoToolkit)));
}

#[test]
#[should_panic(expected = "failed to allocate")]
fn test_new_without_app_panics() {
    let _ = text("nope");
}

#[test]
fn test_button_without_click_subscription_fails() {
    let _ = env_logger::builder().is_test(true).try_init();
    let toolkit = HeadlessToolkit::default().with_subscription_limit(0);
    let probe = toolkit.probe();
    let _app = App::new(toolkit);

    let err = Button::try_new("Mute").err().unwrap();
    assert!(matches!(
        err,
        DuiError::Toolkit(ToolkitError::SubscriptionLimit(_))
    ));
    // The half-built button and its label are gone again
    assert_eq!(probe.live_objects(), 0);
    assert_eq!(dispatch::registered(), 0);
}

#[test]
fn test_stack_try_new_reports_failures() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert!(matches!(HStack::try_new(), Err(DuiError::NoToolkit)));

    let _app = App::new(HeadlessToolkit::default().with_object_limit(0));
    assert!(matches!(
        VStack::try_new(),
        Err(DuiError::Toolkit(ToolkitError::OutOfMemory(_)))
    ));
}

#[test]
fn test_stack_try_new_fills_parent() {
    let (_app, probe) = setup();
    let stack = VStack::try_new().unwrap();
    let handle = stack.handle().unwrap();

    let width = with_toolkit(|tk| tk.width(handle)).unwrap();
    assert_eq!(width, Some(pct(100)));
    assert_eq!(probe.live_objects(), 1);
}

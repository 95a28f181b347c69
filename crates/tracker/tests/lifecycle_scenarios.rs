use std::cell::RefCell;
use std::rc::Rc;

use motionflow_common::error::{MotionflowError, PermissionCategory};
use motionflow_model::{EventKind, RawEvent, Snapshot};
use motionflow_platform_core::{ScriptedPermissions, StaticScreen, Viewport};
use motionflow_tracker::backends::{ReplaySource, StubSource};
use motionflow_tracker::{LifecycleState, SensorTracker};

fn recorder() -> (Rc<RefCell<Vec<Snapshot>>>, impl FnMut(Snapshot) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |snapshot| sink.borrow_mut().push(snapshot))
}

#[tokio::test]
async fn ungated_host_delivers_portrait_snapshot() {
    let mut tracker = SensorTracker::new(StubSource::empty(), StaticScreen::portrait());

    tracker.init().await.expect("ungated init should resolve");
    assert_eq!(tracker.state(), LifecycleState::Ready);

    let (seen, sink) = recorder();
    tracker.listen(sink).expect("listen after init");
    assert_eq!(tracker.state(), LifecycleState::Listening);
    assert_eq!(
        tracker.source().attached(),
        &[EventKind::Motion, EventKind::Orientation, EventKind::ScreenChange]
    );

    tracker.dispatch(RawEvent::acceleration(0.0, 9.81, 0.0));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].accel.x, "0.00");
    assert_eq!(seen[0].accel.y, "9.81");
    assert_eq!(seen[0].accel.z, "0.00");
    assert_eq!(seen[0].magnitudes.accel_magnitude, "9.81");
    assert!(seen[0].screen_orientation.is_portrait());
}

#[tokio::test]
async fn listen_before_init_is_rejected() {
    let mut tracker = SensorTracker::new(StubSource::empty(), StaticScreen::portrait());

    let err = tracker.listen(|_| {}).unwrap_err();
    assert!(matches!(err, MotionflowError::NotInitialized));
    assert!(tracker.source().attached().is_empty());
    assert_eq!(tracker.state(), LifecycleState::Uninitialized);
}

#[tokio::test]
async fn remove_listeners_twice_is_a_no_op() {
    let mut tracker = SensorTracker::new(StubSource::empty(), StaticScreen::portrait());
    tracker.init().await.unwrap();
    tracker.listen(|_| {}).unwrap();

    tracker.remove_listeners();
    assert_eq!(tracker.state(), LifecycleState::Stopped);
    assert!(tracker.source().attached().is_empty());

    tracker.remove_listeners();
    assert_eq!(tracker.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn orientation_denial_names_category_and_allows_retry() {
    let mut tracker = SensorTracker::new(StubSource::empty(), StaticScreen::portrait())
        .with_permissions(ScriptedPermissions::granting().deny(PermissionCategory::Orientation));

    match tracker.init().await {
        Err(MotionflowError::PermissionDenied { category }) => {
            assert_eq!(category, PermissionCategory::Orientation)
        }
        other => panic!("expected orientation denial, got {other:?}"),
    }
    assert_eq!(tracker.state(), LifecycleState::Uninitialized);
    assert!(matches!(
        tracker.listen(|_| {}),
        Err(MotionflowError::NotInitialized)
    ));
}

#[tokio::test]
async fn viewport_fallback_drives_landscape_remap() {
    let screen = StaticScreen::viewport_only(Viewport::new(1024, 600));
    let mut tracker = SensorTracker::new(StubSource::empty(), screen);
    tracker.init().await.unwrap();
    let (seen, sink) = recorder();
    tracker.listen(sink).unwrap();

    tracker.dispatch(RawEvent::acceleration(1.0, 2.0, 3.0));
    tracker.dispatch(RawEvent::orientation(10.0, 20.0, 30.0));

    let seen = seen.borrow();
    assert_eq!(seen[0].accel.x, "2.00");
    assert_eq!(seen[0].accel.y, "-1.00");
    assert_eq!(seen[0].accel.z, "3.00");
    assert_eq!(seen[0].screen_orientation.orientation_type(), "landscape-primary");
    assert_eq!(seen[1].orientation.alpha, "20.00");
    assert_eq!(seen[1].orientation.beta, "350.00");
    assert_eq!(seen[1].orientation.gamma, "30.00");
}

#[tokio::test]
async fn malformed_fields_never_error() {
    let recording = r#"
{"type":"motion","acceleration_including_gravity":{"x":"abc","y":500,"z":null}}
{"type":"motion","rotation_rate":{"alpha":-10,"beta":"200","gamma":{}}}
"#;
    let source = ReplaySource::from_jsonl("malformed", recording).unwrap();
    let mut tracker = SensorTracker::new(source, StaticScreen::portrait());
    tracker.init().await.unwrap();
    let (seen, sink) = recorder();
    tracker.listen(sink).unwrap();

    assert_eq!(tracker.pump().unwrap(), 2);

    let seen = seen.borrow();
    assert_eq!(seen[0].accel.x, "0.00");
    assert_eq!(seen[0].accel.y, "156.96");
    assert_eq!(seen[0].accel.z, "0.00");
    assert_eq!(seen[1].rotation.x, "350.00");
    assert_eq!(seen[1].rotation.y, "180.00");
    assert_eq!(seen[1].rotation.z, "0.00");
    // Acceleration retained from the first event.
    assert_eq!(seen[1].accel.y, "156.96");
}

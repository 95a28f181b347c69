//! Sensor event source implementations.
//!
//! Real hosts push events from their own dispatch loop. These sources cover
//! the pull side: scripted streams for tests and recorded JSONL streams for
//! replay.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use motionflow_common::error::{MotionflowError, MotionflowResult};
use motionflow_model::{jsonl_records, EventKind, RawEvent};
use motionflow_platform_core::{ScreenDescriptor, ScreenOrientation, StaticScreen, Viewport};
use serde::{Deserialize, Serialize};

use crate::SensorEventSource;

/// Stub source for testing. Replays a scripted queue of events.
#[derive(Debug)]
pub struct StubSource {
    events: VecDeque<RawEvent>,
    motion: bool,
    orientation: bool,
    attached: Vec<EventKind>,
    fail_attach: Option<EventKind>,
}

impl StubSource {
    /// Create a stub with pre-loaded events. Supports every event kind.
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self {
            events: events.into(),
            motion: true,
            orientation: true,
            attached: Vec::new(),
            fail_attach: None,
        }
    }

    /// Create an empty stub that never produces events.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A host without motion or orientation events.
    pub fn unsupported() -> Self {
        Self {
            motion: false,
            orientation: false,
            ..Self::empty()
        }
    }

    /// Reject attaching a listener of the given kind.
    pub fn failing_attach(mut self, kind: EventKind) -> Self {
        self.fail_attach = Some(kind);
        self
    }

    /// Queue another event.
    pub fn push(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }

    /// Currently attached listener kinds, in attach order.
    pub fn attached(&self) -> &[EventKind] {
        &self.attached
    }

    /// Events not yet polled.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl SensorEventSource for StubSource {
    fn supports(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Motion => self.motion,
            EventKind::Orientation => self.orientation,
            EventKind::ScreenChange => true,
        }
    }

    fn attach(&mut self, kind: EventKind) -> MotionflowResult<()> {
        if self.fail_attach == Some(kind) {
            return Err(MotionflowError::source(format!(
                "stub refused {} listener",
                kind.as_str()
            )));
        }
        if !self.attached.contains(&kind) {
            self.attached.push(kind);
        }
        Ok(())
    }

    fn detach(&mut self, kind: EventKind) {
        self.attached.retain(|k| *k != kind);
    }

    fn poll(&mut self) -> MotionflowResult<Option<RawEvent>> {
        Ok(self.events.pop_front())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Screen state recorded on a `screen_change` line.
///
/// Hosts deliver screen changes without a payload and the tracker re-reads
/// its screen descriptor. A recording carries the new state next to the
/// event so replay can reproduce the rotation:
///
/// ```text
/// {"type":"screen_change","orientation":{"type":"landscape-primary","angle":90}}
/// ```
///
/// Absent fields leave the screen unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<ScreenOrientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl ScreenUpdate {
    fn is_empty(&self) -> bool {
        self.orientation.is_none() && self.viewport.is_none()
    }

    fn apply(&self, screen: &mut StaticScreen) {
        if let Some(orientation) = &self.orientation {
            screen.set_orientation(Some(orientation.clone()));
        }
        if let Some(viewport) = self.viewport {
            screen.set_viewport(viewport);
        }
    }
}

/// Screen descriptor shared with a [`ReplaySource`].
///
/// The source applies recorded [`ScreenUpdate`]s to it just before handing
/// out the matching screen-change event.
#[derive(Debug, Clone)]
pub struct ReplayScreen(Rc<RefCell<StaticScreen>>);

impl ReplayScreen {
    pub fn new(initial: StaticScreen) -> Self {
        Self(Rc::new(RefCell::new(initial)))
    }

    fn apply(&self, update: &ScreenUpdate) {
        update.apply(&mut self.0.borrow_mut());
    }
}

impl ScreenDescriptor for ReplayScreen {
    fn orientation(&self) -> Option<ScreenOrientation> {
        self.0.borrow().orientation()
    }

    fn viewport(&self) -> Viewport {
        self.0.borrow().viewport()
    }
}

/// Replays a recorded JSONL stream of raw events.
///
/// Motion and orientation are reported as supported when the recording
/// contains at least one event of that kind. Events are only delivered while
/// a listener is attached.
#[derive(Debug)]
pub struct ReplaySource {
    name: String,
    events: VecDeque<(RawEvent, Option<ScreenUpdate>)>,
    motion: bool,
    orientation: bool,
    attached: Vec<EventKind>,
    screen: Option<ReplayScreen>,
}

impl ReplaySource {
    /// Build a source from JSONL content.
    ///
    /// `screen_change` lines may carry a [`ScreenUpdate`].
    pub fn from_jsonl(name: impl Into<String>, jsonl: &str) -> MotionflowResult<Self> {
        let mut events = Vec::new();
        for line in jsonl_records(jsonl) {
            let event: RawEvent = serde_json::from_str(line)?;
            let update = if event.kind() == EventKind::ScreenChange {
                let update: ScreenUpdate = serde_json::from_str(line)?;
                (!update.is_empty()).then_some(update)
            } else {
                None
            };
            events.push((event, update));
        }
        Ok(Self::from_recorded(name, events))
    }

    /// Load a recording from disk.
    pub fn open(path: &Path) -> MotionflowResult<Self> {
        if !path.exists() {
            return Err(MotionflowError::source(format!(
                "recording not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let source = Self::from_jsonl(path.display().to_string(), &content)?;
        tracing::info!(
            path = %path.display(),
            events = source.remaining(),
            screen_updates = source.screen_updates(),
            "Loaded recording"
        );
        Ok(source)
    }

    pub fn from_events(name: impl Into<String>, events: Vec<RawEvent>) -> Self {
        Self::from_recorded(name, events.into_iter().map(|e| (e, None)).collect())
    }

    fn from_recorded(
        name: impl Into<String>,
        events: Vec<(RawEvent, Option<ScreenUpdate>)>,
    ) -> Self {
        let motion = events.iter().any(|(e, _)| e.kind() == EventKind::Motion);
        let orientation = events.iter().any(|(e, _)| e.kind() == EventKind::Orientation);
        Self {
            name: name.into(),
            events: events.into(),
            motion,
            orientation,
            attached: Vec::new(),
            screen: None,
        }
    }

    /// Share a screen descriptor that follows the recording's screen updates.
    ///
    /// Pass the returned handle to the tracker as its screen.
    pub fn follow_screen(&mut self, initial: StaticScreen) -> ReplayScreen {
        let screen = ReplayScreen::new(initial);
        self.screen = Some(screen.clone());
        screen
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Pending screen-change events that carry a recorded screen state.
    pub fn screen_updates(&self) -> usize {
        self.events.iter().filter(|(_, u)| u.is_some()).count()
    }
}

impl SensorEventSource for ReplaySource {
    fn supports(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Motion => self.motion,
            EventKind::Orientation => self.orientation,
            EventKind::ScreenChange => true,
        }
    }

    fn attach(&mut self, kind: EventKind) -> MotionflowResult<()> {
        if !self.attached.contains(&kind) {
            self.attached.push(kind);
        }
        Ok(())
    }

    fn detach(&mut self, kind: EventKind) {
        self.attached.retain(|k| *k != kind);
    }

    fn poll(&mut self) -> MotionflowResult<Option<RawEvent>> {
        if self.attached.is_empty() {
            return Ok(None);
        }
        let Some((event, update)) = self.events.pop_front() else {
            return Ok(None);
        };
        if let (Some(update), Some(screen)) = (&update, &self.screen) {
            screen.apply(update);
            tracing::debug!(?update, "Applied recorded screen update");
        }
        Ok(Some(event))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDING: &str = r#"
# portrait handset, device lying flat then tilted
{"type":"motion","acceleration_including_gravity":{"x":0,"y":0,"z":9.81}}
{"type":"orientation","alpha":90,"beta":45,"gamma":0}
"#;

    #[test]
    fn replay_supports_what_it_recorded() {
        let source = ReplaySource::from_jsonl("fixture", RECORDING).unwrap();
        assert!(source.supports(EventKind::Motion));
        assert!(source.supports(EventKind::Orientation));
        assert_eq!(source.remaining(), 2);

        let only_orientation =
            ReplaySource::from_events("o", vec![RawEvent::orientation(1.0, 2.0, 3.0)]);
        assert!(!only_orientation.supports(EventKind::Motion));
    }

    #[test]
    fn replay_waits_for_listeners() {
        let mut source = ReplaySource::from_jsonl("fixture", RECORDING).unwrap();
        assert!(source.poll().unwrap().is_none());

        source.attach(EventKind::Motion).unwrap();
        assert_eq!(source.poll().unwrap().map(|e| e.kind()), Some(EventKind::Motion));

        source.detach(EventKind::Motion);
        assert!(source.poll().unwrap().is_none());
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn recorded_screen_update_applies_when_polled() {
        let recording = r#"
{"type":"motion","acceleration_including_gravity":{"x":1,"y":2,"z":3}}
{"type":"screen_change","orientation":{"type":"landscape-primary","angle":90},"viewport":{"width":844,"height":390}}
"#;
        let mut source = ReplaySource::from_jsonl("rotation", recording).unwrap();
        assert_eq!(source.screen_updates(), 1);
        let screen = source.follow_screen(StaticScreen::portrait());
        source.attach(EventKind::ScreenChange).unwrap();

        source.poll().unwrap();
        assert_eq!(screen.orientation().unwrap().orientation_type, "portrait-primary");

        assert_eq!(source.poll().unwrap(), Some(RawEvent::ScreenChange));
        let orientation = screen.orientation().unwrap();
        assert!(orientation.is_landscape());
        assert_eq!(orientation.angle, 90.0);
        assert_eq!(screen.viewport(), Viewport::new(844, 390));
    }

    #[test]
    fn bare_screen_change_leaves_screen_alone() {
        let mut source = ReplaySource::from_jsonl("bare", r#"{"type":"screen_change"}"#).unwrap();
        assert_eq!(source.screen_updates(), 0);
        let screen = source.follow_screen(StaticScreen::portrait());
        source.attach(EventKind::ScreenChange).unwrap();

        assert_eq!(source.poll().unwrap(), Some(RawEvent::ScreenChange));
        assert_eq!(screen.orientation().unwrap().orientation_type, "portrait-primary");
    }

    #[test]
    fn replay_rejects_malformed_lines() {
        let err = ReplaySource::from_jsonl("bad", "{\"type\":\"teleport\"}").unwrap_err();
        assert!(matches!(err, MotionflowError::Json(_)));
    }

    #[test]
    fn missing_recording_is_a_source_error() {
        let err = ReplaySource::open(Path::new("/nonexistent/motion.jsonl")).unwrap_err();
        assert!(matches!(err, MotionflowError::Source { .. }));
    }

    #[test]
    fn stub_attach_is_idempotent() {
        let mut stub = StubSource::empty();
        stub.attach(EventKind::Motion).unwrap();
        stub.attach(EventKind::Motion).unwrap();
        assert_eq!(stub.attached(), &[EventKind::Motion]);

        stub.detach(EventKind::Orientation);
        assert_eq!(stub.attached().len(), 1);
    }
}

//! Motionflow Sensor Tracker
//!
//! Owns the sensor lifecycle for a single host:
//!
//! ```text
//! Uninitialized -> Initializing -> Ready -> Listening -> Stopped
//! ```
//!
//! - **init:** probes host capabilities and requests motion, then
//!   orientation permission when the host gates access
//! - **listen:** attaches motion, orientation and screen-change listeners
//!   and delivers one [`Snapshot`] per sensor event to the callback
//! - **remove_listeners:** detaches everything; idempotent
//!
//! Delivery is single-threaded: events are processed one at a time, in
//! arrival order, either pushed by the host through
//! [`SensorTracker::dispatch`] or pulled from the source with
//! [`SensorTracker::pump`] / [`SensorTracker::run`].

pub mod backends;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use motionflow_common::error::{MotionflowError, MotionflowResult, PermissionCategory};
use motionflow_model::{EventKind, RawEvent, ScreenOrientationInfo, Snapshot};
use motionflow_platform_core::{
    HostCapabilities, OrientationResolver, PermissionAuthority, ScreenDescriptor, Ungated,
};
use motionflow_processing::SampleAggregator;

/// Trait for host sensor event sources.
pub trait SensorEventSource {
    /// Whether the host can deliver events of this kind at all.
    fn supports(&self, kind: EventKind) -> bool;

    /// Register a listener for `kind`.
    fn attach(&mut self, kind: EventKind) -> MotionflowResult<()>;

    /// Unregister the listener for `kind`. Detaching an unattached kind is a no-op.
    fn detach(&mut self, kind: EventKind);

    /// Poll for the next event. Returns `None` if no event is available.
    fn poll(&mut self) -> MotionflowResult<Option<RawEvent>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Lifecycle of a [`SensorTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, `init()` not yet completed.
    Uninitialized,
    /// Waiting on host permission grants.
    Initializing,
    /// Initialized, no listeners attached.
    Ready,
    /// Listeners attached, snapshots flowing.
    Listening,
    /// Listeners removed. `listen()` may be called again.
    Stopped,
}

/// Requests detachment from outside the tracker, including from inside the
/// snapshot callback.
///
/// When triggered during a delivery, the tracker detaches before that
/// delivery returns and never invokes the callback again.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

type SnapshotCallback = Box<dyn FnMut(Snapshot)>;

/// Lifecycle manager tying a host source, screen and permission authority
/// to the sample aggregator.
pub struct SensorTracker<S, D, P = Ungated> {
    source: S,
    resolver: OrientationResolver<D>,
    permissions: Option<P>,
    aggregator: SampleAggregator,
    state: LifecycleState,
    capabilities: Option<HostCapabilities>,
    callback: Option<SnapshotCallback>,
    attached: Vec<EventKind>,
    stop: StopHandle,
    poll_interval: Duration,
    events_dispatched: u64,
}

impl<S, D> SensorTracker<S, D, Ungated>
where
    S: SensorEventSource,
    D: ScreenDescriptor,
{
    /// Create a tracker for a host that does not gate sensor access.
    pub fn new(source: S, screen: D) -> Self {
        Self {
            source,
            resolver: OrientationResolver::new(screen),
            permissions: None,
            aggregator: SampleAggregator::new(),
            state: LifecycleState::Uninitialized,
            capabilities: None,
            callback: None,
            attached: Vec::new(),
            stop: StopHandle::default(),
            poll_interval: Duration::from_millis(1),
            events_dispatched: 0,
        }
    }

    /// Use a host permission authority; `init()` will request grants from it.
    pub fn with_permissions<Q: PermissionAuthority>(self, permissions: Q) -> SensorTracker<S, D, Q> {
        SensorTracker {
            source: self.source,
            resolver: self.resolver,
            permissions: Some(permissions),
            aggregator: self.aggregator,
            state: self.state,
            capabilities: self.capabilities,
            callback: self.callback,
            attached: self.attached,
            stop: self.stop,
            poll_interval: self.poll_interval,
            events_dispatched: self.events_dispatched,
        }
    }
}

impl<S, D, P> SensorTracker<S, D, P>
where
    S: SensorEventSource,
    D: ScreenDescriptor,
    P: PermissionAuthority,
{
    /// Sleep between empty polls in [`run`](Self::run).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Capabilities probed by the last successful `init()`.
    pub fn capabilities(&self) -> Option<HostCapabilities> {
        self.capabilities
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Number of events accepted while listening.
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn permissions(&self) -> Option<&P> {
        self.permissions.as_ref()
    }

    pub fn screen_mut(&mut self) -> &mut D {
        self.resolver.screen_mut()
    }

    /// Current screen orientation as the resolver sees it.
    pub fn orientation_info(&self) -> ScreenOrientationInfo {
        self.resolver.orientation_info()
    }

    /// Probe the host and obtain permission grants.
    ///
    /// Resolves immediately when already initialized. On failure the tracker
    /// returns to `Uninitialized`, so a caller can retry after corrective
    /// action such as a fresh user gesture. There is no internal timeout.
    pub async fn init(&mut self) -> MotionflowResult<HostCapabilities> {
        if self.state != LifecycleState::Uninitialized {
            if let Some(capabilities) = self.capabilities {
                return Ok(capabilities);
            }
        }

        let capabilities = HostCapabilities::probe(
            |kind| self.source.supports(kind),
            self.permissions.is_some(),
            self.resolver.screen(),
        );
        if !capabilities.is_supported() {
            tracing::warn!(source = %self.source.name(), "Host exposes no sensor events");
            return Err(MotionflowError::unsupported(format!(
                "source '{}' delivers neither motion nor orientation events",
                self.source.name()
            )));
        }

        tracing::info!(
            source = %self.source.name(),
            permission_gated = capabilities.permission_gated,
            "Initializing sensor tracker"
        );
        self.state = LifecycleState::Initializing;
        let guard = InitGuard::new(&mut self.state);

        if let Some(permissions) = self.permissions.as_mut() {
            for category in PermissionCategory::REQUEST_ORDER {
                let answer = permissions.request(category).await;
                tracing::debug!(%category, ?answer, "Permission answered");
                if !answer.is_granted() {
                    tracing::warn!(%category, "Sensor permission denied");
                    return Err(MotionflowError::permission_denied(category));
                }
            }
        }

        guard.commit(LifecycleState::Ready);
        self.capabilities = Some(capabilities);
        self.resolver.refresh();
        tracing::info!("Sensor tracker ready");
        Ok(capabilities)
    }

    /// Attach listeners and start delivering snapshots to `callback`.
    ///
    /// Accepted from `Ready` and `Stopped`; any other state, including an
    /// active `Listening`, fails with `NotInitialized`. Attachment is
    /// all-or-nothing: if the source rejects a listener, the ones already
    /// attached are removed.
    pub fn listen<F>(&mut self, callback: F) -> MotionflowResult<()>
    where
        F: FnMut(Snapshot) + 'static,
    {
        if !matches!(self.state, LifecycleState::Ready | LifecycleState::Stopped) {
            tracing::warn!(state = ?self.state, "listen() rejected");
            return Err(MotionflowError::NotInitialized);
        }

        let mut attached = Vec::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            if let Err(e) = self.source.attach(kind) {
                tracing::warn!(kind = kind.as_str(), error = %e, "Failed to attach listener");
                for kind in attached.into_iter().rev() {
                    self.source.detach(kind);
                }
                return Err(e);
            }
            tracing::debug!(kind = kind.as_str(), "Listener attached");
            attached.push(kind);
        }

        self.attached = attached;
        self.callback = Some(Box::new(callback));
        self.stop.clear();
        self.resolver.refresh();
        self.state = LifecycleState::Listening;
        tracing::info!(source = %self.source.name(), "Sensor tracker listening");
        Ok(())
    }

    /// Detach all listeners. Safe to call repeatedly.
    pub fn remove_listeners(&mut self) {
        if self.attached.is_empty() && self.callback.is_none() {
            tracing::debug!("No listeners attached");
            return;
        }

        for kind in std::mem::take(&mut self.attached).into_iter().rev() {
            self.source.detach(kind);
            tracing::debug!(kind = kind.as_str(), "Listener detached");
        }
        self.callback = None;
        self.aggregator.reset();
        self.state = LifecycleState::Stopped;
        tracing::info!(events = self.events_dispatched, "Sensor tracker stopped");
    }

    /// Deliver one raw event from the host.
    ///
    /// Returns whether a snapshot was delivered. Events arriving while not
    /// listening are dropped.
    pub fn dispatch(&mut self, event: RawEvent) -> bool {
        self.honor_stop_request();
        let kind = event.kind();
        if self.state != LifecycleState::Listening || !self.attached.contains(&kind) {
            tracing::trace!(kind = kind.as_str(), state = ?self.state, "Dropping event");
            return false;
        }
        self.events_dispatched += 1;

        if kind == EventKind::ScreenChange {
            self.resolver.refresh();
            return false;
        }

        let screen = self.resolver.orientation_info();
        let Some(snapshot) = self.aggregator.ingest(&event, &screen) else {
            return false;
        };
        tracing::trace!(kind = kind.as_str(), landscape = screen.is_landscape(), "Snapshot");
        if let Some(callback) = self.callback.as_mut() {
            callback(snapshot);
        }

        self.honor_stop_request();
        true
    }

    /// Drain every event the source currently has.
    ///
    /// Returns the number of snapshots delivered.
    pub fn pump(&mut self) -> MotionflowResult<usize> {
        let mut delivered = 0;
        while self.is_listening() {
            match self.source.poll()? {
                Some(event) => {
                    if self.dispatch(event) {
                        delivered += 1;
                    }
                }
                None => break,
            }
        }
        self.honor_stop_request();
        Ok(delivered)
    }

    /// Poll the source until the stop handle fires or listeners are removed.
    ///
    /// Returns the number of snapshots delivered.
    pub async fn run(&mut self) -> MotionflowResult<u64> {
        if self.state != LifecycleState::Listening {
            return Err(MotionflowError::NotInitialized);
        }
        tracing::info!(source = %self.source.name(), "Sensor tracker running");

        let mut delivered = 0;
        while self.is_listening() {
            match self.source.poll() {
                Ok(Some(event)) => {
                    if self.dispatch(event) {
                        delivered += 1;
                    }
                }
                Ok(None) => {
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Sensor source error");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }

        self.honor_stop_request();
        Ok(delivered)
    }

    fn is_listening(&self) -> bool {
        self.state == LifecycleState::Listening && !self.stop.is_stopped()
    }

    fn honor_stop_request(&mut self) {
        if self.state == LifecycleState::Listening && self.stop.is_stopped() {
            self.remove_listeners();
        }
    }
}

/// Restores `Uninitialized` if `init()` fails or its future is dropped
/// while waiting on the host.
struct InitGuard<'a> {
    state: &'a mut LifecycleState,
    committed: bool,
}

impl<'a> InitGuard<'a> {
    fn new(state: &'a mut LifecycleState) -> Self {
        Self {
            state,
            committed: false,
        }
    }

    fn commit(mut self, state: LifecycleState) {
        *self.state = state;
        self.committed = true;
    }
}

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            *self.state = LifecycleState::Uninitialized;
        }
    }
}

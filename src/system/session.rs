//! AR session: permission handshake, sensor subscription and per-frame pose.
//!
//! The session is driven from a single event loop. Sensor callbacks push
//! events into a [`SensorSubscription`]; the loop calls
//! [`ArSession::process_pending`] and then reads [`ArSession::frame`] to
//! place the virtual camera. Every event is handled to completion before the
//! next one, in arrival order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, info, warn};

use crate::config::{SessionMode, TrackerConfig};
use crate::error::SessionError;
use crate::geometry::CameraPose;
use crate::imu::{MotionSample, OrientationSample};
use crate::tracking::{PoseState, PoseTracker, SessionState};
use crate::viz::Telemetry;

use super::messages::SensorEvent;
use super::platform::{Permission, PermissionGate, SensorKind, VideoFeed};
use super::shared_state::SharedState;

/// Producer end of a running session, handed to the platform's sensor
/// callbacks. Cancelling (or dropping) it tears the subscription down.
pub struct SensorSubscription {
    sender: Sender<SensorEvent>,
    active: Arc<AtomicBool>,
    mode: SessionMode,
}

impl SensorSubscription {
    /// Returns false if the event was not accepted.
    pub fn push(&self, event: SensorEvent) -> bool {
        if !self.is_active() {
            debug!(kind = %event.kind(), "Sensor event after teardown ignored");
            return false;
        }
        let subscribed = match event.kind() {
            SensorKind::Motion => self.mode.wants_motion(),
            SensorKind::Orientation => self.mode.wants_orientation(),
        };
        if !subscribed {
            return false;
        }
        self.sender.send(event).is_ok()
    }

    /// Deliver a motion event.
    pub fn push_motion(&self, sample: MotionSample) -> bool {
        self.push(SensorEvent::Motion(sample))
    }

    /// Deliver an orientation event.
    pub fn push_orientation(&self, sample: OrientationSample) -> bool {
        self.push(SensorEvent::Orientation(sample))
    }

    /// Unsubscribe. Later pushes are rejected and the session tears down.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// False once cancelled or once the session was stopped.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Owns the pose tracker and the consumer end of the sensor subscription.
pub struct ArSession {
    /// Tracking parameters; fixed for the lifetime of the session.
    config: TrackerConfig,

    /// Pose record read by the renderer once per frame.
    shared: Arc<SharedState>,

    /// Integrator and orientation estimator, writing into `shared`.
    tracker: PoseTracker,

    /// Lifecycle (Idle / Running / Denied).
    state: SessionState,

    /// Queued sensor events. None while not subscribed.
    receiver: Option<Receiver<SensorEvent>>,

    /// Cleared by the subscription handle on cancel or drop.
    active: Option<Arc<AtomicBool>>,

    /// Whether the camera background was acquired.
    video_active: bool,
}

impl ArSession {
    /// Create an idle session. Nothing is subscribed until [`Self::start`].
    pub fn new(config: TrackerConfig) -> Self {
        let shared = SharedState::new();
        let tracker = PoseTracker::new(&config, shared.clone());
        Self {
            config,
            shared,
            tracker,
            state: SessionState::Idle,
            receiver: None,
            active: None,
            video_active: false,
        }
    }

    /// Tracking parameters the session was created with.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current lifecycle state. A subscription that was cancelled but not yet
    /// reaped already reads as `Idle`.
    pub fn state(&self) -> SessionState {
        if self.state == SessionState::Running && self.subscription_cancelled() {
            return SessionState::Idle;
        }
        self.state
    }

    /// Pose tracker, for diagnostics (sample counters, integrator state).
    pub fn tracker(&self) -> &PoseTracker {
        &self.tracker
    }

    /// Shared pose record, for renderers living outside the session.
    pub fn shared_state(&self) -> &Arc<SharedState> {
        &self.shared
    }

    /// Whether the camera background is running.
    pub fn video_active(&self) -> bool {
        self.video_active
    }

    /// Ask for the permissions the mode needs, then subscribe.
    ///
    /// Every permission the mode needs is requested, orientation first, and
    /// only then are the answers checked. All of them must be granted;
    /// otherwise nothing is subscribed and the pose stays at its initial
    /// value. A failing prompt aborts the remaining requests. A successful
    /// start always begins a fresh dead-reckoning run.
    pub fn start(
        &mut self,
        gate: &mut dyn PermissionGate,
    ) -> Result<SensorSubscription, SessionError> {
        self.reap_cancelled();
        if self.state == SessionState::Running {
            return Err(SessionError::AlreadyRunning);
        }

        let mode = self.config.mode;
        let required = [
            (SensorKind::Orientation, mode.wants_orientation()),
            (SensorKind::Motion, mode.wants_motion()),
        ];
        let mut answers = Vec::with_capacity(required.len());
        for (sensor, wanted) in required {
            if !wanted {
                continue;
            }
            match gate.request(sensor) {
                Ok(answer) => answers.push((sensor, answer)),
                Err(e) => {
                    warn!(%sensor, "Permission request failed: {}", e);
                    return Err(SessionError::AcquisitionFailure(e));
                }
            }
        }
        if let Some((sensor, _)) = answers
            .iter()
            .find(|(_, answer)| *answer == Permission::Denied)
        {
            let sensor = *sensor;
            warn!(%sensor, "Permission denied, sensors will not be subscribed");
            self.state = SessionState::Denied;
            return Err(SessionError::PermissionDenied(sensor));
        }
        debug!(granted = answers.len(), "Permissions granted");

        self.tracker.reset();
        self.shared.reset();

        let (sender, receiver) = unbounded();
        let active = Arc::new(AtomicBool::new(true));
        self.receiver = Some(receiver);
        self.active = Some(active.clone());
        self.state = SessionState::Running;

        info!(?mode, "Sensor session started");

        Ok(SensorSubscription {
            sender,
            active,
            mode,
        })
    }

    /// Start the camera background. Failure only disables the background.
    pub fn start_video(&mut self, feed: &mut dyn VideoFeed) -> Result<(), SessionError> {
        match feed.start() {
            Ok(()) => {
                self.video_active = true;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to start camera feed: {}", e);
                self.video_active = false;
                Err(SessionError::AcquisitionFailure(e))
            }
        }
    }

    /// Handle every queued sensor event in arrival order.
    ///
    /// Returns the number of events handled. If the subscription was
    /// cancelled, the session is torn down first and queued events are
    /// dropped.
    pub fn process_pending(&mut self) -> usize {
        self.reap_cancelled();
        if self.state != SessionState::Running {
            return 0;
        }

        let Some(receiver) = self.receiver.as_ref() else {
            return 0;
        };

        let mut handled = 0;
        for event in receiver.try_iter() {
            match event {
                SensorEvent::Motion(sample) => {
                    self.tracker.handle_motion(&sample);
                }
                SensorEvent::Orientation(sample) => {
                    self.tracker.handle_orientation(&sample);
                }
            }
            handled += 1;
        }
        handled
    }

    /// Unsubscribe. The pose keeps its last value; the dead-reckoning anchor
    /// is discarded.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.as_ref() {
            active.store(false, Ordering::SeqCst);
        }
        if self.state == SessionState::Running {
            self.teardown();
        }
    }

    fn subscription_cancelled(&self) -> bool {
        self.active
            .as_ref()
            .is_none_or(|active| !active.load(Ordering::SeqCst))
    }

    /// Tear down a running session whose subscription handle was cancelled.
    fn reap_cancelled(&mut self) {
        if self.state == SessionState::Running && self.subscription_cancelled() {
            self.teardown();
        }
    }

    fn teardown(&mut self) {
        self.receiver = None;
        self.active = None;
        self.tracker.reset();
        self.state = SessionState::Idle;
        info!("Sensor session stopped");
    }

    /// Camera pose for the frame being rendered.
    pub fn frame(&self) -> CameraPose {
        self.shared.camera_pose()
    }

    /// Full pose record, including velocity and last acceleration.
    pub fn pose(&self) -> PoseState {
        self.shared.snapshot()
    }

    /// Diagnostic lines for the current pose.
    pub fn telemetry(&self) -> Telemetry {
        Telemetry::from_pose_state(&self.shared.snapshot())
    }
}

impl Drop for ArSession {
    fn drop(&mut self) {
        self.stop();
    }
}

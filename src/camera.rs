//! Camera pose and eased fly-to transitions.
//!
//! The controller is either Idle or Transitioning. A transition captures
//! the live pose, computes an end pose (a planet close-up or the home
//! view) and interpolates position and look-at target with an easing
//! curve, one `tick` per frame. Requests that arrive while a transition is
//! running are handled according to the configured `TransitionPolicy`.

use crate::config::SceneConfig;
use crate::easing::Easing;
use crate::store::StoreEvent;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

const MIN_POLAR: f64 = 0.01;
const MAX_POLAR: f64 = FRAC_PI_2;
const COMPLETION_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
}

impl CameraPose {
    pub fn new(position: Point3<f64>, target: Point3<f64>) -> Self {
        Self { position, target }
    }

    pub fn lerp(&self, other: &CameraPose, t: f64) -> CameraPose {
        CameraPose {
            position: Point3::from(self.position.coords.lerp(&other.position.coords, t)),
            target: Point3::from(self.target.coords.lerp(&other.target.coords, t)),
        }
    }

    pub fn distance(&self) -> f64 {
        (self.position - self.target).norm()
    }
}

/// What to do with a focus request while a transition is in flight.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum TransitionPolicy {
    /// Drop the request; the running transition finishes undisturbed.
    #[default]
    Ignore,
    /// Abandon the running transition and start over from the live pose.
    Restart,
}

impl TransitionPolicy {
    pub fn label(self) -> &'static str {
        match self {
            TransitionPolicy::Ignore => "Ignore while moving",
            TransitionPolicy::Restart => "Restart from live pose",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FocusRequest {
    Planet(Point3<f64>),
    Home,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RequestOutcome {
    Started,
    Restarted,
    Ignored,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Transition {
    from: CameraPose,
    to: CameraPose,
    destination: FocusRequest,
    elapsed: f64,
    duration: f64,
    easing: Easing,
}

impl Transition {
    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let p = self.elapsed / self.duration;
        if p >= 1.0 - COMPLETION_EPSILON { 1.0 } else { p }
    }

    pub fn destination(&self) -> FocusRequest {
        self.destination
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum CameraState {
    Idle,
    Transitioning(Transition),
}

#[derive(Clone, Debug)]
pub struct CameraController {
    pose: CameraPose,
    home: CameraPose,
    state: CameraState,
    policy: TransitionPolicy,
    duration: f64,
    easing: Easing,
    focus_distance: f64,
    focus_lift: f64,
    min_distance: f64,
    max_distance: f64,
}

impl CameraController {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            pose: config.home,
            home: config.home,
            state: CameraState::Idle,
            policy: config.transition_policy,
            duration: config.transition_duration,
            easing: config.transition_easing,
            focus_distance: config.focus_distance,
            focus_lift: config.focus_lift,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn home(&self) -> CameraPose {
        self.home
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CameraState::Transitioning(_))
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TransitionPolicy) {
        self.policy = policy;
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Applies to transitions started after the call.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Close-up pose for a focus point: pushed outward from the system
    /// center by the focus distance and lifted above the orbit plane.
    pub fn focus_pose(&self, point: &Point3<f64>) -> CameraPose {
        let outward = point.coords.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
        let position = point + outward * self.focus_distance + Vector3::new(0.0, self.focus_lift, 0.0);
        CameraPose::new(position, *point)
    }

    pub fn request(&mut self, request: FocusRequest) -> RequestOutcome {
        let outcome = match (&self.state, self.policy) {
            (CameraState::Idle, _) => RequestOutcome::Started,
            (CameraState::Transitioning(_), TransitionPolicy::Restart) => RequestOutcome::Restarted,
            (CameraState::Transitioning(_), TransitionPolicy::Ignore) => {
                log::debug!("Camera busy, ignoring {:?}", request);
                return RequestOutcome::Ignored;
            }
        };

        let to = match request {
            FocusRequest::Planet(point) => self.focus_pose(&point),
            FocusRequest::Home => self.home,
        };
        log::debug!("Camera transition {:?} towards {:?}", outcome, request);
        self.state = CameraState::Transitioning(Transition {
            from: self.pose,
            to,
            destination: request,
            elapsed: 0.0,
            duration: self.duration,
            easing: self.easing,
        });
        outcome
    }

    /// Translates a focus change from the UI store into a camera request.
    pub fn on_store_event(&mut self, event: &StoreEvent) -> Option<RequestOutcome> {
        match event {
            StoreEvent::FocusChanged(Some(point)) => Some(self.request(FocusRequest::Planet(*point))),
            StoreEvent::FocusChanged(None) => Some(self.request(FocusRequest::Home)),
            StoreEvent::SelectionChanged(_) | StoreEvent::HoverChanged(_) => None,
        }
    }

    /// Advances a running transition by `dt` simulated seconds and returns
    /// the pose to render.
    pub fn tick(&mut self, dt: f64) -> CameraPose {
        let CameraState::Transitioning(transition) = &mut self.state else {
            return self.pose;
        };

        transition.elapsed += dt.max(0.0);
        let progress = transition.progress();
        if progress >= 1.0 {
            self.pose = transition.to;
            log::debug!("Camera transition finished at {:?}", self.pose.position);
            self.state = CameraState::Idle;
        } else {
            let eased = transition.easing.apply(progress);
            self.pose = transition.from.lerp(&transition.to, eased);
        }
        self.pose
    }

    /// Rotates the camera around its target. Ignored while transitioning.
    pub fn orbit(&mut self, d_azimuth: f64, d_polar: f64) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let offset = self.pose.position - self.pose.target;
        let radius = offset.norm();
        if radius < 1e-9 {
            return false;
        }
        let azimuth = offset.x.atan2(offset.z) + d_azimuth;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + d_polar).clamp(MIN_POLAR, MAX_POLAR);
        self.pose.position = self.pose.target + spherical_offset(radius, polar, azimuth);
        true
    }

    /// Scales the distance to the target, within the configured limits.
    /// Ignored while transitioning.
    pub fn dolly(&mut self, factor: f64) -> bool {
        if self.is_transitioning() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let offset = self.pose.position - self.pose.target;
        let radius = offset.norm();
        if radius < 1e-9 {
            return false;
        }
        let new_radius = (radius * factor).clamp(self.min_distance, self.max_distance);
        self.pose.position = self.pose.target + offset * (new_radius / radius);
        true
    }
}

fn spherical_offset(radius: f64, polar: f64, azimuth: f64) -> Vector3<f64> {
    Vector3::new(
        radius * polar.sin() * azimuth.sin(),
        radius * polar.cos(),
        radius * polar.sin() * azimuth.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(policy: TransitionPolicy) -> CameraController {
        let config = SceneConfig {
            transition_policy: policy,
            ..SceneConfig::default()
        };
        CameraController::new(&config)
    }

    fn assert_close(a: Point3<f64>, b: Point3<f64>) {
        assert!((a - b).norm() < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn easing_applies_to_next_transition() {
        let mut cam = controller(TransitionPolicy::Ignore);
        assert_eq!(cam.easing(), Easing::InOutCubic);
        cam.set_easing(Easing::Linear);
        cam.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0)));
        cam.set_easing(Easing::InOutCubic);

        // A quarter of the way with linear progress.
        let pose = cam.tick(0.5);
        assert_close(pose.target, Point3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn starts_idle_at_home() {
        let cam = controller(TransitionPolicy::Ignore);
        assert!(!cam.is_transitioning());
        assert_eq!(cam.pose().position, Point3::new(25.0, 15.0, 25.0));
        assert_eq!(cam.pose().target, Point3::origin());
    }

    #[test]
    fn flies_to_focus_point_in_two_seconds() {
        let mut cam = controller(TransitionPolicy::Ignore);
        assert_eq!(cam.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0))), RequestOutcome::Started);
        assert!(cam.is_transitioning());

        let pose = cam.tick(2.0);
        assert!(!cam.is_transitioning());
        assert_close(pose.target, Point3::new(10.0, 0.0, 0.0));
        assert_close(pose.position, Point3::new(18.0, 3.0, 0.0));
    }

    #[test]
    fn frame_sized_steps_reach_idle() {
        let mut cam = controller(TransitionPolicy::Ignore);
        cam.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0)));
        for _ in 0..120 {
            cam.tick(1.0 / 60.0);
        }
        assert!(!cam.is_transitioning());
        assert_close(cam.pose().position, Point3::new(18.0, 3.0, 0.0));
    }

    #[test]
    fn midpoint_is_halfway_with_symmetric_easing() {
        let mut cam = controller(TransitionPolicy::Ignore);
        let start = cam.pose();
        cam.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0)));
        let mid = cam.tick(1.0);
        let expected = start.lerp(&cam.focus_pose(&Point3::new(10.0, 0.0, 0.0)), 0.5);
        assert_close(mid.position, expected.position);
        assert_close(mid.target, expected.target);

        let early = {
            let mut c = controller(TransitionPolicy::Ignore);
            c.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0)));
            c.tick(0.2)
        };
        let travelled = (early.position - start.position).norm();
        let total = (Point3::new(18.0, 3.0, 0.0) - start.position).norm();
        assert!(travelled / total < 0.1, "ease-in should start slowly");
    }

    #[test]
    fn second_request_mid_flight_is_ignored() {
        let mut cam = controller(TransitionPolicy::Ignore);
        cam.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0)));
        cam.tick(0.5);
        assert_eq!(cam.request(FocusRequest::Planet(Point3::new(0.0, 0.0, 20.0))), RequestOutcome::Ignored);
        assert_eq!(cam.request(FocusRequest::Home), RequestOutcome::Ignored);

        cam.tick(1.5);
        assert!(!cam.is_transitioning());
        assert_close(cam.pose().target, Point3::new(10.0, 0.0, 0.0));

        assert_eq!(cam.request(FocusRequest::Planet(Point3::new(0.0, 0.0, 20.0))), RequestOutcome::Started);
        cam.tick(2.0);
        assert_close(cam.pose().target, Point3::new(0.0, 0.0, 20.0));
        assert_close(cam.pose().position, Point3::new(0.0, 3.0, 28.0));
    }

    #[test]
    fn restart_policy_starts_from_live_pose() {
        let mut cam = controller(TransitionPolicy::Restart);
        cam.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0)));
        let live = cam.tick(1.0);
        assert_eq!(cam.request(FocusRequest::Home), RequestOutcome::Restarted);

        let CameraState::Transitioning(t) = cam.state() else { panic!("expected transition") };
        assert_eq!(t.destination(), FocusRequest::Home);
        assert_eq!(t.progress(), 0.0);

        // No jump on restart.
        let next = cam.tick(1e-9);
        assert_close(next.position, live.position);

        cam.tick(2.0);
        assert_eq!(cam.pose(), cam.home());
    }

    #[test]
    fn returns_home_after_clear() {
        let mut cam = controller(TransitionPolicy::Ignore);
        cam.request(FocusRequest::Planet(Point3::new(-7.0, 1.0, 3.0)));
        cam.tick(2.0);
        assert_eq!(cam.on_store_event(&StoreEvent::FocusChanged(None)), Some(RequestOutcome::Started));
        cam.tick(2.0);
        assert_eq!(cam.pose(), cam.home());
    }

    #[test]
    fn unrelated_store_events_do_not_move_camera() {
        let mut cam = controller(TransitionPolicy::Ignore);
        assert_eq!(cam.on_store_event(&StoreEvent::HoverChanged(Some(3))), None);
        assert_eq!(cam.on_store_event(&StoreEvent::SelectionChanged(Some(3))), None);
        assert!(!cam.is_transitioning());
    }

    #[test]
    fn focus_at_origin_only_lifts() {
        let cam = controller(TransitionPolicy::Ignore);
        let pose = cam.focus_pose(&Point3::origin());
        assert_eq!(pose.position, Point3::new(0.0, 3.0, 0.0));
        assert!(pose.position.coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn manual_controls_respect_limits_and_transitions() {
        let mut cam = controller(TransitionPolicy::Ignore);
        assert!(cam.dolly(0.01));
        assert!((cam.pose().distance() - 5.0).abs() < 1e-9);
        assert!(cam.dolly(1000.0));
        assert!((cam.pose().distance() - 70.0).abs() < 1e-9);

        assert!(cam.orbit(0.3, 10.0));
        let offset = cam.pose().position - cam.pose().target;
        assert!(offset.y.abs() < 1e-6, "polar angle is clamped to the horizon");
        assert!((offset.norm() - 70.0).abs() < 1e-9);

        cam.request(FocusRequest::Home);
        let before = cam.pose();
        assert!(!cam.orbit(0.5, 0.0));
        assert!(!cam.dolly(2.0));
        assert_eq!(cam.pose(), before);
    }

    #[test]
    fn orbit_preserves_distance() {
        let mut cam = controller(TransitionPolicy::Ignore);
        let d = cam.pose().distance();
        cam.orbit(1.0, -0.2);
        assert!((cam.pose().distance() - d).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_snaps() {
        let config = SceneConfig { transition_duration: 0.0, ..SceneConfig::default() };
        let mut cam = CameraController::new(&config);
        cam.request(FocusRequest::Planet(Point3::new(10.0, 0.0, 0.0)));
        cam.tick(0.0);
        assert!(!cam.is_transitioning());
        assert_close(cam.pose().position, Point3::new(18.0, 3.0, 0.0));
    }
}

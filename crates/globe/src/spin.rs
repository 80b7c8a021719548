//! Idle auto-rotation state machine.
//!
//! The globe orbits slowly while nobody is touching it. Pointer activity
//! of any kind suspends rotation for its duration; zooming in damps the
//! rate and eventually stops it so the surface never crawls under a
//! close-up view.

use foundation::easing::Easing;
use foundation::geo::wrap_lon_deg;

use crate::surface::{EaseRequest, RenderSurface};

/// Nominal seconds for one full revolution at low zoom.
pub const SECONDS_PER_REVOLUTION: f64 = 240.0;

/// Zoom level at or above which rotation stops entirely.
pub const MAX_SPIN_ZOOM: f64 = 5.0;

/// Zoom level above which the rate is damped linearly toward zero at
/// [`MAX_SPIN_ZOOM`].
pub const SLOW_SPIN_ZOOM: f64 = 3.0;

/// Duration of each rotation step's eased transition.
pub const STEP_DURATION_MS: u32 = 1_000;

/// Per-session rotation flags.
///
/// Owned by the session for exactly the lifetime of its surface; two
/// sessions on one page cannot alias each other's flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpinState {
    user_interacting: bool,
    spin_enabled: bool,
}

impl Default for SpinState {
    fn default() -> Self {
        Self {
            user_interacting: false,
            spin_enabled: true,
        }
    }
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_user_interacting(&self) -> bool {
        self.user_interacting
    }

    pub fn is_spin_enabled(&self) -> bool {
        self.spin_enabled
    }

    pub fn set_spin_enabled(&mut self, enabled: bool) {
        self.spin_enabled = enabled;
    }

    /// Marks the start of a pointer gesture. Idempotent: a second start
    /// while already interacting leaves the flag set.
    pub fn begin_interaction(&mut self) {
        self.user_interacting = true;
    }

    /// Marks the end of a pointer gesture. Idempotent.
    pub fn end_interaction(&mut self) {
        self.user_interacting = false;
    }

    /// Degrees of westward travel requested per step at `zoom`, or `None`
    /// while rotation is suspended.
    ///
    /// Full rate up to [`SLOW_SPIN_ZOOM`], then linear damping that
    /// reaches zero at [`MAX_SPIN_ZOOM`].
    pub fn step_degrees(&self, zoom: f64) -> Option<f64> {
        if !self.spin_enabled || self.user_interacting || zoom >= MAX_SPIN_ZOOM {
            return None;
        }

        let mut rate = 360.0 / SECONDS_PER_REVOLUTION;
        if zoom > SLOW_SPIN_ZOOM {
            rate *= (MAX_SPIN_ZOOM - zoom) / (MAX_SPIN_ZOOM - SLOW_SPIN_ZOOM);
        }
        Some(rate)
    }

    /// One rotation tick: reads the camera and requests the next eased
    /// move westward. Returns whether a transition was requested.
    pub fn step<S: RenderSurface>(&self, surface: &mut S) -> bool {
        let Some(deg) = self.step_degrees(surface.zoom()) else {
            return false;
        };

        let mut center = surface.center();
        center.lon_deg = wrap_lon_deg(center.lon_deg - deg);
        surface.ease_to(EaseRequest {
            center,
            duration_ms: STEP_DURATION_MS,
            easing: Easing::Linear,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_SPIN_ZOOM, SECONDS_PER_REVOLUTION, SLOW_SPIN_ZOOM, SpinState};
    use crate::testing::RecordingSurface;
    use foundation::easing::Easing;
    use pretty_assertions::assert_eq;

    const BASE_RATE: f64 = 360.0 / SECONDS_PER_REVOLUTION;

    #[test]
    fn full_rate_at_or_below_slow_zoom() {
        let spin = SpinState::new();
        assert_eq!(spin.step_degrees(1.5), Some(BASE_RATE));
        assert_eq!(spin.step_degrees(SLOW_SPIN_ZOOM), Some(BASE_RATE));
    }

    #[test]
    fn damped_rate_between_slow_and_max_zoom() {
        let spin = SpinState::new();

        // zoomDif = (5 - 4) / (5 - 3) = 0.5
        assert_eq!(spin.step_degrees(4.0), Some(0.75));

        let mut prev = BASE_RATE;
        for zoom in [3.25, 3.5, 4.0, 4.5, 4.9, 4.99] {
            let rate = spin.step_degrees(zoom).unwrap();
            assert!(rate > 0.0, "rate must stay positive at zoom {zoom}");
            assert!(rate < prev, "rate must decrease toward {MAX_SPIN_ZOOM}");
            prev = rate;
        }
    }

    #[test]
    fn stops_at_max_zoom_and_beyond() {
        let spin = SpinState::new();
        assert_eq!(spin.step_degrees(MAX_SPIN_ZOOM), None);
        assert_eq!(spin.step_degrees(7.0), None);
    }

    #[test]
    fn suspended_while_interacting() {
        let mut spin = SpinState::new();
        spin.begin_interaction();
        assert_eq!(spin.step_degrees(1.5), None);
    }

    #[test]
    fn suspended_while_disabled() {
        let mut spin = SpinState::new();
        spin.set_spin_enabled(false);
        assert_eq!(spin.step_degrees(1.5), None);
    }

    #[test]
    fn interaction_flags_are_idempotent() {
        let mut spin = SpinState::new();
        spin.begin_interaction();
        spin.begin_interaction();
        assert!(spin.is_user_interacting());
        spin.end_interaction();
        spin.end_interaction();
        assert!(!spin.is_user_interacting());
    }

    #[test]
    fn step_requests_westward_linear_ease() {
        let spin = SpinState::new();
        let mut surface = RecordingSurface::at_zoom(1.5);

        assert!(spin.step(&mut surface));
        assert_eq!(surface.requests.len(), 1);

        let req = &surface.requests[0];
        assert_eq!(req.center.lon_deg, 30.0 - BASE_RATE);
        assert_eq!(req.center.lat_deg, 15.0);
        assert_eq!(req.duration_ms, 1_000);
        assert_eq!(req.easing, Easing::Linear);
    }

    #[test]
    fn step_wraps_longitude_at_the_antimeridian() {
        let spin = SpinState::new();
        let mut surface = RecordingSurface::at_zoom(1.5);
        surface.center.lon_deg = -179.5;

        assert!(spin.step(&mut surface));
        assert_eq!(surface.requests[0].center.lon_deg, 179.0);
    }

    #[test]
    fn step_is_silent_when_suspended() {
        let mut spin = SpinState::new();
        spin.begin_interaction();

        let mut surface = RecordingSurface::at_zoom(1.5);
        for _ in 0..4 {
            assert!(!spin.step(&mut surface));
        }
        assert!(surface.requests.is_empty());
    }

    #[test]
    fn step_is_silent_at_max_zoom() {
        let spin = SpinState::new();
        let mut surface = RecordingSurface::at_zoom(5.0);
        assert!(!spin.step(&mut surface));
        assert!(surface.requests.is_empty());
    }
}

//! Simulation clock driving the orbits.
//!
//! Orbit time is decoupled from wall-clock time: every frame adds the real
//! elapsed seconds multiplied by the time scale (0.5 by default, a global
//! slow-down).

pub const DEFAULT_TIME_SCALE: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct SimClock {
    time: f64,
    time_scale: f64,
    paused: bool,
}

impl SimClock {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time: 0.0,
            time_scale,
            paused: false,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    /// Advance by `real_dt` seconds of wall time; returns the new orbit time.
    pub fn advance(&mut self, real_dt: f64) -> f64 {
        if !self.paused {
            self.time += real_dt * self.time_scale;
        }
        self.time
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_at_half_speed_by_default() {
        let mut clock = SimClock::default();
        clock.advance(1.0);
        clock.advance(0.5);
        assert!((clock.time() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn pause_freezes_time() {
        let mut clock = SimClock::default();
        clock.advance(2.0);
        clock.pause();
        assert_eq!(clock.advance(10.0), 1.0);
        clock.toggle_pause();
        assert!(!clock.is_paused());
        assert_eq!(clock.advance(2.0), 2.0);
    }

    #[test]
    fn negative_scale_is_clamped() {
        let mut clock = SimClock::default();
        clock.set_time_scale(-3.0);
        assert_eq!(clock.time_scale(), 0.0);
        assert_eq!(clock.advance(1.0), 0.0);
    }
}

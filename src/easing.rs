//! Easing curves for camera transitions.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out: slow start, fastest at the midpoint, slow finish.
    #[default]
    InOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::InOutCubic => ease_in_out_cubic(p),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::InOutCubic => "Ease in-out",
        }
    }
}

pub fn ease_in_out_cubic(p: f64) -> f64 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
    }
}

//! 8-bit RGB colors and HSL conversion.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts hue, saturation and lightness (all in `[0, 1]`) to RGB.
    ///
    /// Hue wraps around, saturation and lightness are clamped.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = to_byte(l);
            return Self::new(v, v, v);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self::new(
            to_byte(hue_to_channel(q, p, h + 1.0 / 3.0)),
            to_byte(hue_to_channel(q, p, h)),
            to_byte(hue_to_channel(q, p, h - 1.0 / 3.0)),
        )
    }

    /// CSS-style representation, e.g. `rgb(235,71,71)`.
    pub fn style(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

fn to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_hue_matches_known_style() {
        let c = Rgb::from_hsl(0.0, 0.8, 0.6);
        assert_eq!(c, Rgb::new(235, 71, 71));
        assert_eq!(c.style(), "rgb(235,71,71)");
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(Rgb::from_hsl(0.3, 0.0, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(Rgb::from_hsl(1.25, 0.8, 0.6), Rgb::from_hsl(0.25, 0.8, 0.6));
    }

    #[test]
    fn channel_offset_wraps_into_unit_range() {
        assert_eq!(hue_to_channel(0.2, 0.8, -0.1), hue_to_channel(0.2, 0.8, 0.9));
        assert_eq!(hue_to_channel(0.2, 0.8, 1.1), hue_to_channel(0.2, 0.8, 0.1));
    }

    #[test]
    fn extremes_of_lightness() {
        assert_eq!(Rgb::from_hsl(0.5, 0.8, 0.0), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::from_hsl(0.5, 0.8, 1.0), Rgb::WHITE);
    }
}

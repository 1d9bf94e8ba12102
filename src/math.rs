//! Perspective projection from world space to screen space.
//!
//! Builds a right-handed look-at view from a camera pose and maps points
//! into an egui rectangle, with depth kept for sorting and picking.

use crate::camera::CameraPose;
use eframe::egui::{Pos2, Rect};
use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 1000.0;

/// Minimum on-screen radius used for hit testing small or distant discs.
pub const MIN_PICK_RADIUS: f32 = 4.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Projected {
    pub screen: Pos2,
    /// Distance in front of the camera along the view axis.
    pub depth: f64,
}

pub struct Projector {
    view: Isometry3<f64>,
    perspective: Perspective3<f64>,
    rect: Rect,
    tan_half_fov: f64,
}

impl Projector {
    pub fn new(pose: &CameraPose, fov_y_deg: f64, rect: Rect) -> Self {
        let fov = fov_y_deg.to_radians();
        // A collapsed viewport still needs a valid projection.
        let aspect = if rect.width() > 0.0 && rect.height() > 0.0 {
            (rect.width() / rect.height()) as f64
        } else {
            1.0
        };
        let forward = pose.target - pose.position;
        // Looking straight down or up: pick another up vector.
        let up = if forward.cross(&Vector3::y()).norm() < 1e-9 * forward.norm().max(1.0) {
            -Vector3::z()
        } else {
            Vector3::y()
        };
        Self {
            view: Isometry3::look_at_rh(&pose.position, &pose.target, &up),
            perspective: Perspective3::new(aspect, fov, NEAR_PLANE, FAR_PLANE),
            rect,
            tan_half_fov: (fov / 2.0).tan(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn project(&self, point: &Point3<f64>) -> Option<Projected> {
        let in_view = self.view * point;
        let depth = -in_view.z;
        if depth <= NEAR_PLANE {
            return None;
        }
        let ndc = self.perspective.project_point(&in_view);
        let x = self.rect.left() as f64 + (ndc.x + 1.0) * 0.5 * self.rect.width() as f64;
        let y = self.rect.top() as f64 + (1.0 - ndc.y) * 0.5 * self.rect.height() as f64;
        Some(Projected {
            screen: Pos2::new(x as f32, y as f32),
            depth,
        })
    }

    /// Screen pixels covered by one world unit at the given depth.
    pub fn pixels_per_unit(&self, depth: f64) -> f32 {
        (self.rect.height() as f64 * 0.5 / (self.tan_half_fov * depth)) as f32
    }

    /// Projects a sphere to a screen disc: center and radius in pixels.
    pub fn project_sphere(&self, center: &Point3<f64>, radius: f64) -> Option<(Projected, f32)> {
        let p = self.project(center)?;
        Some((p, radius as f32 * self.pixels_per_unit(p.depth)))
    }
}

pub fn hits_disc(center: Pos2, radius: f32, pointer: Pos2) -> bool {
    center.distance(pointer) <= radius.max(MIN_PICK_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Vec2;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(800.0, 600.0))
    }

    fn pose() -> CameraPose {
        CameraPose::new(Point3::new(0.0, 0.0, 20.0), Point3::origin())
    }

    #[test]
    fn target_lands_at_rect_center() {
        let projector = Projector::new(&pose(), 45.0, rect());
        let p = projector.project(&Point3::origin()).unwrap();
        assert!((p.screen.x - 410.0).abs() < 1e-3);
        assert!((p.screen.y - 320.0).abs() < 1e-3);
        assert!((p.depth - 20.0).abs() < 1e-9);
    }

    #[test]
    fn up_and_right_map_to_screen_directions() {
        let projector = Projector::new(&pose(), 45.0, rect());
        let center = projector.project(&Point3::origin()).unwrap().screen;
        let up = projector.project(&Point3::new(0.0, 1.0, 0.0)).unwrap().screen;
        let right = projector.project(&Point3::new(1.0, 0.0, 0.0)).unwrap().screen;
        assert!(up.y < center.y);
        assert!(right.x > center.x);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let projector = Projector::new(&pose(), 45.0, rect());
        assert!(projector.project(&Point3::new(0.0, 0.0, 30.0)).is_none());
    }

    #[test]
    fn sphere_radius_matches_unit_scale() {
        let projector = Projector::new(&pose(), 45.0, rect());
        let (_, r) = projector.project_sphere(&Point3::origin(), 2.0).unwrap();
        let expected = 2.0 * 300.0 / ((22.5_f64).to_radians().tan() * 20.0);
        assert!((r as f64 - expected).abs() < 1e-2);

        let one_unit = projector.project(&Point3::new(0.0, 1.0, 0.0)).unwrap().screen;
        let center = projector.project(&Point3::origin()).unwrap().screen;
        assert!(((center.y - one_unit.y) - projector.pixels_per_unit(20.0)).abs() < 0.5);
    }

    #[test]
    fn looking_straight_down_is_not_degenerate() {
        let top = CameraPose::new(Point3::new(0.0, 3.0, 0.0), Point3::origin());
        let projector = Projector::new(&top, 45.0, rect());
        let p = projector.project(&Point3::origin()).unwrap();
        assert!(p.screen.x.is_finite() && p.screen.y.is_finite());
    }

    #[test]
    fn collapsed_viewport_does_not_panic() {
        let narrow = Rect::from_min_size(Pos2::new(220.0, 0.0), Vec2::new(0.0, 600.0));
        let projector = Projector::new(&pose(), 45.0, narrow);
        assert!(projector.project(&Point3::origin()).is_some());

        let flat = Rect::from_min_size(Pos2::new(220.0, 0.0), Vec2::new(800.0, 0.0));
        let projector = Projector::new(&pose(), 45.0, flat);
        assert!(projector.project(&Point3::origin()).is_some());
    }

    #[test]
    fn small_discs_keep_a_minimum_pick_area() {
        let c = Pos2::new(100.0, 100.0);
        assert!(hits_disc(c, 0.5, Pos2::new(103.0, 100.0)));
        assert!(!hits_disc(c, 0.5, Pos2::new(110.0, 100.0)));
        assert!(hits_disc(c, 20.0, Pos2::new(110.0, 110.0)));
    }
}

//! Painter-based rendering of the scene.
//!
//! Everything is projected through a `Projector` and drawn back to front:
//! background particles, the decorative ring and orbit guides, the core
//! with its rings and satellites, then the planets sorted by depth.

use crate::color::Rgb;
use crate::config::ViewFlags;
use crate::math::Projector;
use crate::orbit::orbit_path;
use crate::orbital_core::{CORE_RADIUS, INNER_RING_RADIUS, OUTER_RING_RADIUS, SHELL_RADIUS};
use crate::scene::Scene;
use eframe::egui;
use nalgebra::{Point3, Rotation3, Vector3};
use std::f64::consts::TAU;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(2, 2, 8);
pub const COLOR_CORE: egui::Color32 = egui::Color32::from_rgb(0x4f, 0x8c, 0xff);
pub const COLOR_RING: egui::Color32 = egui::Color32::from_rgb(0x88, 0xcc, 0xff);
pub const COLOR_SELECTED: egui::Color32 = egui::Color32::from_rgb(0xff, 0xd7, 0x00);

const DECOR_RING_RADIUS: f64 = 8.0;
const RING_SEGMENTS: usize = 96;
const ORBIT_SEGMENTS: usize = 128;

impl From<Rgb> for egui::Color32 {
    fn from(c: Rgb) -> Self {
        egui::Color32::from_rgb(c.r, c.g, c.b)
    }
}

fn with_alpha(color: egui::Color32, alpha: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

fn shade(color: egui::Color32, factor: f32) -> egui::Color32 {
    let f = |v: u8| (v as f32 * factor).clamp(0.0, 255.0) as u8;
    egui::Color32::from_rgb(f(color.r()), f(color.g()), f(color.b()))
}

/// Circle of `radius` in the XZ plane, optionally rotated.
fn ring_points(radius: f64, rotation: &Rotation3<f64>) -> Vec<Point3<f64>> {
    (0..=RING_SEGMENTS)
        .map(|i| {
            let a = i as f64 / RING_SEGMENTS as f64 * TAU;
            rotation * Point3::new(a.cos() * radius, 0.0, a.sin() * radius)
        })
        .collect()
}

/// Draws a world-space polyline, skipping segments with an endpoint
/// behind the camera.
fn draw_polyline(
    painter: &egui::Painter,
    projector: &Projector,
    points: &[Point3<f64>],
    stroke: egui::Stroke,
) {
    let screen: Vec<Option<egui::Pos2>> = points
        .iter()
        .map(|p| projector.project(p).map(|p| p.screen))
        .collect();
    for pair in screen.windows(2) {
        if let (Some(a), Some(b)) = (pair[0], pair[1]) {
            painter.line_segment([a, b], stroke);
        }
    }
}

pub fn draw_scene(
    painter: &egui::Painter,
    projector: &Projector,
    scene: &Scene,
    flags: &ViewFlags,
    hovered: Option<u32>,
    selected: Option<u32>,
) {
    painter.rect_filled(projector.rect(), 0.0, BACKGROUND);

    if flags.show_particles {
        draw_particles(painter, projector, scene);
    }

    draw_polyline(
        painter,
        projector,
        &ring_points(DECOR_RING_RADIUS, &Rotation3::identity()),
        egui::Stroke::new(1.0, with_alpha(COLOR_RING, 0.15)),
    );

    if flags.show_orbits {
        let stroke = egui::Stroke::new(0.5, egui::Color32::from_white_alpha(24));
        for planet in scene.planets() {
            draw_polyline(painter, projector, &orbit_path(planet, ORBIT_SEGMENTS), stroke);
        }
    }

    draw_core(painter, projector, scene, flags.show_labels);
    draw_planets(painter, projector, scene, flags.show_labels, hovered, selected);
}

fn draw_particles(painter: &egui::Painter, projector: &Projector, scene: &Scene) {
    let spin = Rotation3::from_axis_angle(&Vector3::y_axis(), scene.particle_rotation());
    let color = egui::Color32::from_rgba_unmultiplied(0x88, 0xcc, 0xff, 150);
    for p in scene.particles() {
        if let Some(projected) = projector.project(&(spin * p)) {
            let r = (0.05 * projector.pixels_per_unit(projected.depth)).clamp(0.5, 2.0);
            painter.circle_filled(projected.screen, r, color);
        }
    }
}

fn draw_core(painter: &egui::Painter, projector: &Projector, scene: &Scene, show_labels: bool) {
    let core = scene.core();
    let Some((center, radius)) = projector.project_sphere(&Point3::origin(), CORE_RADIUS) else {
        return;
    };

    let glow = core.glow() as f32;
    let shell = SHELL_RADIUS as f32 / CORE_RADIUS as f32 * radius;
    painter.circle_filled(center.screen, shell, with_alpha(COLOR_CORE, 0.06 * glow));
    painter.circle_filled(center.screen, radius * 1.25, with_alpha(COLOR_CORE, 0.12 * glow));
    painter.circle_filled(center.screen, radius, shade(COLOR_CORE, 0.5 + 0.25 * glow));

    // Spin marker so the core rotation reads on a flat disc.
    let spin = Rotation3::from_axis_angle(&Vector3::y_axis(), core.core_spin());
    let tick = spin * Point3::new(CORE_RADIUS, 0.0, 0.0);
    if let Some(p) = projector.project(&tick) {
        painter.line_segment([center.screen, p.screen], egui::Stroke::new(1.0, with_alpha(egui::Color32::WHITE, 0.4)));
    }

    // Rings are modelled as tori lying in the XY plane.
    let upright = Rotation3::from_axis_angle(&Vector3::x_axis(), std::f64::consts::FRAC_PI_2);
    draw_polyline(
        painter,
        projector,
        &ring_points(INNER_RING_RADIUS, &(core.inner_ring_rotation() * upright)),
        egui::Stroke::new(1.5, with_alpha(COLOR_RING, 0.7)),
    );
    draw_polyline(
        painter,
        projector,
        &ring_points(OUTER_RING_RADIUS, &(core.outer_ring_rotation() * upright)),
        egui::Stroke::new(1.0, with_alpha(COLOR_RING, 0.45)),
    );

    for (sat, pos) in core.satellites() {
        let Some((p, r)) = projector.project_sphere(&pos, sat.size) else {
            continue;
        };
        let color: egui::Color32 = sat.color.into();
        painter.circle_filled(p.screen, r.max(1.5), color);
        if show_labels {
            painter.text(
                p.screen + egui::vec2(0.0, -r - 4.0),
                egui::Align2::CENTER_BOTTOM,
                sat.label,
                egui::FontId::monospace(9.0),
                with_alpha(color, 0.8),
            );
        }
    }
}

fn draw_planets(
    painter: &egui::Painter,
    projector: &Projector,
    scene: &Scene,
    show_labels: bool,
    hovered: Option<u32>,
    selected: Option<u32>,
) {
    let mut visible: Vec<_> = scene
        .planets()
        .iter()
        .zip(scene.frame().placements())
        .filter_map(|(planet, placement)| {
            projector
                .project_sphere(&placement.position, planet.size)
                .map(|(p, r)| (planet, p, r))
        })
        .collect();
    // Far to near.
    visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

    for (planet, p, r) in visible {
        let is_hovered = hovered == Some(planet.id);
        let base: egui::Color32 = if is_hovered {
            Rgb::WHITE.into()
        } else {
            planet.color.into()
        };
        let r = r.max(1.0);

        painter.circle_filled(p.screen, r, shade(base, 0.55));
        painter.circle_filled(p.screen + egui::vec2(-0.2 * r, -0.2 * r), r * 0.75, base);
        painter.circle_filled(p.screen + egui::vec2(-0.35 * r, -0.35 * r), r * 0.25, with_alpha(egui::Color32::WHITE, 0.35));

        if selected == Some(planet.id) {
            painter.circle_stroke(p.screen, r + 4.0, egui::Stroke::new(1.5, COLOR_SELECTED));
        }

        if show_labels && (is_hovered || selected == Some(planet.id)) {
            let galley = painter.layout_no_wrap(
                planet.title.clone(),
                egui::FontId::proportional(12.0),
                egui::Color32::WHITE,
            );
            let text_pos = p.screen + egui::vec2(-galley.size().x / 2.0, -r - 8.0 - galley.size().y);
            let bg_rect = egui::Rect::from_min_size(text_pos, galley.size()).expand(3.0);
            painter.rect_filled(bg_rect, 3.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180));
            painter.galley(text_pos, galley, egui::Color32::WHITE);
        }
    }
}

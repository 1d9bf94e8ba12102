//! Application shell and eframe integration.
//!
//! Defines the App struct, initialization, and the per-frame update that
//! steps the simulation, feeds store changes to the camera, paints the
//! scene and draws the overlay on top, in that order.

use crate::camera::{CameraController, CameraPose};
use crate::catalog::Catalog;
use crate::config::{SceneConfig, ViewFlags};
use crate::drawing::draw_scene;
use crate::math::Projector;
use crate::scene::Scene;
use crate::store::{StoreEvent, UiStore};
use eframe::egui;
use std::sync::mpsc;

const SIDEBAR_WIDTH: f32 = 220.0;
/// Longest frame step fed to the simulation, in seconds.
const MAX_FRAME_DT: f32 = 0.1;
/// Radians of camera rotation per dragged pixel.
const ORBIT_SENSITIVITY: f64 = 0.005;
const DOLLY_SENSITIVITY: f64 = 0.002;

pub struct App {
    pub(crate) config: SceneConfig,
    pub(crate) scene: Scene,
    pub(crate) camera: CameraController,
    pub(crate) store: UiStore,
    events: mpsc::Receiver<StoreEvent>,
    pub(crate) flags: ViewFlags,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::with_config(SceneConfig::load(), &Catalog::load())
    }

    pub fn with_config(config: SceneConfig, catalog: &Catalog) -> Self {
        let scene = Scene::new(&config, catalog);
        let camera = CameraController::new(&config);
        let mut store = UiStore::new();
        let events = store.subscribe();
        Self {
            config,
            scene,
            camera,
            store,
            events,
            flags: ViewFlags::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn store(&self) -> &UiStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut UiStore {
        &mut self.store
    }

    /// Simulation half of a frame: orbit step, store events into the
    /// camera, camera tick. Returns the pose to render.
    pub fn advance(&mut self, dt: f64) -> CameraPose {
        self.scene.step(dt);
        while let Ok(event) = self.events.try_recv() {
            self.camera.on_store_event(&event);
        }
        self.camera.tick(dt)
    }

    /// Selects a planet and focuses the camera on where it is right now.
    pub fn focus_planet(&mut self, id: u32) -> bool {
        let Some(planet) = self.scene.planet(id) else {
            return false;
        };
        let Some(point) = self.scene.frame().position_of(id) else {
            return false;
        };
        log::info!("Focusing {} ({})", planet.title, id);
        self.store.focus_planet(planet, point);
        true
    }

    /// Updates planet and core hover from the pointer; a planet in front
    /// of the core takes the hover. Returns the hovered planet.
    pub fn update_hover(&mut self, projector: &Projector, pointer: Option<egui::Pos2>) -> Option<u32> {
        let picked = pointer.and_then(|p| self.scene.pick_planet(projector, p));
        self.store.set_hovered_id(picked);
        let over_core = picked.is_none() && pointer.is_some_and(|p| self.scene.core_under_pointer(projector, p));
        self.scene.core_mut().set_hovered(over_core);
        picked
    }

    pub fn wants_pointer_cursor(&self) -> bool {
        self.store.hovered_id().is_some() || self.scene.core().is_hovered()
    }

    fn show_viewport(&mut self, ui: &mut egui::Ui, pose: CameraPose) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let projector = Projector::new(&pose, self.config.fov_y_deg, response.rect);

        let picked = self.update_hover(&projector, response.hover_pos());
        if self.wants_pointer_cursor() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        draw_scene(
            &painter,
            &projector,
            &self.scene,
            &self.flags,
            self.store.hovered_id(),
            self.store.selected_project().map(|p| p.id),
        );

        if response.clicked() {
            if let Some(id) = picked {
                self.focus_planet(id);
            }
        }

        // Manual controls take effect from the next frame.
        if response.dragged() {
            let d = response.drag_delta();
            self.camera.orbit(-(d.x as f64) * ORBIT_SENSITIVITY, -(d.y as f64) * ORBIT_SENSITIVITY);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y) as f64;
            if scroll != 0.0 {
                self.camera.dolly((-scroll * DOLLY_SENSITIVITY).exp());
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt).min(MAX_FRAME_DT) as f64;
        let pose = self.advance(dt);

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| self.show_sidebar(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.show_viewport(ui, pose));

        self.show_title(ctx, SIDEBAR_WIDTH);
        self.show_project_panel(ctx);
        self.show_back_button(ctx);

        ctx.request_repaint();
    }
}

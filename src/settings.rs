//! Sidebar settings UI for the simulation clock, camera and display options.

use crate::app::App;
use crate::camera::{CameraState, FocusRequest, TransitionPolicy};
use crate::easing::Easing;
use eframe::egui;

impl App {
    pub(crate) fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Simulation").strong());
        let clock = self.scene.clock_mut();
        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut scale = clock.time_scale();
            if ui
                .add(egui::DragValue::new(&mut scale).range(0.0..=10.0).speed(0.05).max_decimals(2).suffix("×"))
                .changed()
            {
                clock.set_time_scale(scale);
            }
            let pause_label = if clock.is_paused() { "▶" } else { "⏸" };
            if ui.button(pause_label).clicked() {
                clock.toggle_pause();
            }
        });
        ui.label(egui::RichText::new(format!("t = {:.1}", clock.time())).weak());

        ui.separator();
        ui.label(egui::RichText::new("Camera").strong());
        let mut policy = self.camera.policy();
        egui::ComboBox::from_id_salt("transition_policy")
            .selected_text(policy.label())
            .show_ui(ui, |ui| {
                for p in [TransitionPolicy::Ignore, TransitionPolicy::Restart] {
                    ui.selectable_value(&mut policy, p, p.label());
                }
            });
        if policy != self.camera.policy() {
            log::info!("Transition policy set to {:?}", policy);
            self.camera.set_policy(policy);
        }

        let mut easing = self.camera.easing();
        egui::ComboBox::from_id_salt("transition_easing")
            .selected_text(easing.label())
            .show_ui(ui, |ui| {
                for e in [Easing::InOutCubic, Easing::Linear] {
                    ui.selectable_value(&mut easing, e, e.label());
                }
            });
        if easing != self.camera.easing() {
            self.camera.set_easing(easing);
        }

        let pose = self.camera.pose();
        let state = match self.camera.state() {
            CameraState::Idle => "idle".to_string(),
            CameraState::Transitioning(t) => format!("moving {:.0}%", t.progress() * 100.0),
        };
        ui.label(egui::RichText::new(format!(
            "pos ({:.1}, {:.1}, {:.1})  dist {:.1}  {}",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.distance(),
            state,
        )).weak().small());
        if ui.button("Home").clicked() {
            if self.store.focus_point().is_some() {
                self.store.clear_focus();
            } else {
                self.camera.request(FocusRequest::Home);
            }
        }

        ui.separator();
        ui.label(egui::RichText::new("Display").strong());
        ui.checkbox(&mut self.flags.show_orbits, "Orbit guides");
        ui.checkbox(&mut self.flags.show_particles, "Particles");
        ui.checkbox(&mut self.flags.show_labels, "Labels");
    }
}

//! HTML-style overlay drawn on top of the scene.
//!
//! Sidebar with the brand and navigation, the floating title, the panel
//! describing the selected project and the back-to-overview button. The
//! panel and the button only exist while a project is selected.

use crate::app::App;
use eframe::egui;
use egui::RichText;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x61, 0xda, 0xfb);
const BACK_BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0x66, 0x7e, 0xea);
const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(5, 8, 20, 191);

const NAV_ITEMS: [&str; 4] = ["Accueil", "Projets", "À propos", "Contact"];
// Button labels stay within glyphs covered by egui's bundled fonts.
const BACK_LABEL: &str = "Vue d'ensemble";
const CLOSE_LABEL: &str = "×";
const MISSING_DATA_NOTE: &str = "* Ajoute tes données dans assets/projects.json";
const REVISION: &str = env!("ORBITAL_STACK_REVISION");

fn brand(ui: &mut egui::Ui, size: f32) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label(RichText::new("ORBITAL").monospace().strong().size(size).color(egui::Color32::WHITE));
        ui.label(RichText::new(".STACK").monospace().strong().size(size).color(ACCENT));
    });
}

fn tech_badge(ui: &mut egui::Ui, tech: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(color.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.4)))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(tech).monospace().small().color(color));
        });
}

impl App {
    pub(crate) fn show_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        brand(ui, 16.0);
        ui.label(RichText::new("PORTFOLIO SPATIAL").monospace().small().weak());
        ui.add_space(12.0);

        for item in NAV_ITEMS {
            ui.label(RichText::new(format!("— {}", item.to_uppercase())).monospace().small());
        }

        ui.add_space(12.0);
        ui.separator();
        ui.label(
            RichText::new(format!("{} PROJETS EN ORBITE\nCLIQUEZ UNE PLANÈTE", self.scene.planets().len()))
                .monospace()
                .small()
                .weak(),
        );

        ui.add_space(8.0);
        egui::CollapsingHeader::new("Settings")
            .default_open(false)
            .show(ui, |ui| self.show_settings(ui));

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.label(RichText::new(format!("rev {REVISION}")).monospace().small().weak());
        });
    }

    pub(crate) fn show_title(&self, ctx: &egui::Context, left: f32) {
        egui::Area::new(egui::Id::new("title"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(left + 24.0, 24.0))
            .interactable(false)
            .show(ctx, |ui| {
                brand(ui, 26.0);
                ui.label(
                    RichText::new(format!(
                        "{} PROJETS EN ORBITE · CLIQUEZ UNE PLANÈTE",
                        self.scene.planets().len()
                    ))
                    .monospace()
                    .small()
                    .weak(),
                );
            });
    }

    pub(crate) fn show_project_panel(&mut self, ctx: &egui::Context) {
        let Some(project) = self.store.selected_project() else {
            return;
        };
        let color: egui::Color32 = project.color.into();
        let mut close = false;

        egui::Window::new("project")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-24.0, 96.0))
            .default_width(380.0)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(PANEL_FILL)
                    .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.2))),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().circle_filled(rect.center(), 6.0, color);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(CLOSE_LABEL).clicked() {
                            close = true;
                        }
                    });
                });
                ui.label(RichText::new(&project.title).monospace().strong().size(20.0).color(color));
                ui.add_space(4.0);
                ui.label(RichText::new(&project.description).monospace().color(egui::Color32::from_white_alpha(166)));
                ui.add_space(8.0);

                ui.horizontal_wrapped(|ui| {
                    for tech in &project.techs {
                        tech_badge(ui, tech, color);
                    }
                });

                if let Some(url) = project.external_link() {
                    ui.add_space(8.0);
                    ui.hyperlink_to(RichText::new("VOIR LE PROJET →").monospace().color(color), url.as_str());
                }

                if !project.has_real_data {
                    ui.add_space(6.0);
                    ui.label(RichText::new(MISSING_DATA_NOTE).monospace().small().weak());
                }
            });

        if close {
            self.store.clear_focus();
        }
    }

    pub(crate) fn show_back_button(&mut self, ctx: &egui::Context) {
        if self.store.selected_project().is_none() {
            return;
        }
        let mut back = false;
        egui::Area::new(egui::Id::new("back_to_overview"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-32.0, -32.0))
            .show(ctx, |ui| {
                let button = egui::Button::new(
                    RichText::new(BACK_LABEL).monospace().color(egui::Color32::WHITE),
                )
                .fill(BACK_BUTTON_FILL)
                .corner_radius(20.0)
                .min_size(egui::vec2(0.0, 36.0));
                back = ui.add(button).clicked();
            });
        if back {
            self.store.clear_focus();
        }
    }
}

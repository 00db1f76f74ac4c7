// Home screen - session cards

use eframe::egui;

use crate::session::{EntityId, Session, format_clock};

pub enum HomeAction {
    NewSession,
    Edit(EntityId),
    AskDelete(EntityId),
    CancelDelete,
    ConfirmDelete(EntityId),
    Start(EntityId),
}

pub fn show(
    ui: &mut egui::Ui,
    sessions: &[Session],
    pending_delete: Option<&str>,
) -> Option<HomeAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("MyReps").size(32.0).strong());
        ui.label("Build sessions. Follow the beeps.");
    });
    ui.add_space(16.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        if sessions.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(32.0);
                ui.label("No sessions yet.");
                ui.weak("Create your first workout below!");
                ui.add_space(32.0);
            });
        }

        for session in sessions {
            if let Some(a) = session_card(ui, session, pending_delete == Some(session.id.as_str())) {
                action = Some(a);
            }
            ui.add_space(8.0);
        }

        ui.add_space(8.0);
        let new_button = egui::Button::new("+ New Session").min_size(egui::vec2(ui.available_width(), 40.0));
        if ui.add(new_button).clicked() {
            action = Some(HomeAction::NewSession);
        }
    });

    action
}

fn session_card(ui: &mut egui::Ui, session: &Session, confirming: bool) -> Option<HomeAction> {
    let mut action = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&session.name).size(18.0).strong());
                ui.weak(format!(
                    "{} · ~{}",
                    session.exercise_count_label(),
                    format_clock(session.estimated_seconds())
                ));
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑").on_hover_text("Delete").clicked() {
                    action = Some(HomeAction::AskDelete(session.id.clone()));
                }
                if ui.button("✏").on_hover_text("Edit").clicked() {
                    action = Some(HomeAction::Edit(session.id.clone()));
                }
            });
        });

        if confirming {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(255, 107, 107), format!("Delete \"{}\"?", session.name));
                if ui.button("Delete").clicked() {
                    action = Some(HomeAction::ConfirmDelete(session.id.clone()));
                }
                if ui.button("Cancel").clicked() {
                    action = Some(HomeAction::CancelDelete);
                }
            });
        }

        // Exercise tags
        ui.horizontal_wrapped(|ui| {
            for exercise in &session.exercises {
                ui.small(&exercise.name);
            }
        });

        ui.add_space(6.0);
        let start = egui::Button::new(egui::RichText::new("Start Workout").strong())
            .fill(egui::Color32::from_rgb(230, 57, 70))
            .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add(start).clicked() {
            action = Some(HomeAction::Start(session.id.clone()));
        }
    });

    action
}

// Builder screen - create or edit a session

use eframe::egui;

use crate::session::{
    EntityId, ExerciseForm, Session, SessionBuilder, TEMPLATE_CATEGORIES, templates_for,
};

pub enum BuilderAction {
    Back,
    /// `existing` is set when an already stored session was edited
    Save { session: Session, existing: bool },
}

enum RowAction {
    StartEdit(EntityId),
    Remove(EntityId),
    SaveEdit,
    CancelEdit,
}

pub struct BuilderScreen {
    builder: SessionBuilder,
    show_templates: bool,
    category: &'static str,
}

impl BuilderScreen {
    pub fn new(builder: SessionBuilder) -> Self {
        Self {
            builder,
            show_templates: false,
            category: TEMPLATE_CATEGORIES[0],
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<BuilderAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.button("← Back").clicked() {
                action = Some(BuilderAction::Back);
            }
            let title = if self.builder.is_editing_existing() {
                "Edit Session"
            } else {
                "New Session"
            };
            ui.heading(title);
        });
        ui.add_space(8.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label("Session name");
            ui.add(
                egui::TextEdit::singleline(&mut self.builder.name)
                    .hint_text("e.g. Leg Day")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(12.0);

            ui.strong("EXERCISES");
            self.exercise_list(ui);
            ui.add_space(8.0);

            if self.show_templates {
                self.template_picker(ui);
            } else if ui.button("📋 Add from templates").clicked() {
                self.show_templates = true;
            }
            ui.add_space(12.0);

            self.custom_form(ui);
            ui.add_space(16.0);

            let save = egui::Button::new(egui::RichText::new("Save Session").strong())
                .min_size(egui::vec2(ui.available_width(), 40.0));
            if ui.add_enabled(self.builder.can_save(), save).clicked() {
                if let Some(session) = self.builder.build() {
                    let existing = self.builder.is_editing_existing();
                    action = Some(BuilderAction::Save { session, existing });
                }
            }
        });

        action
    }

    fn exercise_list(&mut self, ui: &mut egui::Ui) {
        let mut row_action = None;
        let editing = self.builder.editing_id().map(str::to_owned);

        // Snapshot so the inline form can borrow the builder mutably
        let exercises = self.builder.exercises().to_vec();
        if exercises.is_empty() {
            ui.weak("No exercises yet.");
        }

        for exercise in &exercises {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());

                if editing.as_deref() == Some(exercise.id.as_str()) {
                    if let Some(form) = self.builder.edit_form_mut() {
                        form_fields(ui, form);
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            row_action = Some(RowAction::SaveEdit);
                        }
                        if ui.button("Cancel").clicked() {
                            row_action = Some(RowAction::CancelEdit);
                        }
                    });
                } else {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.strong(&exercise.name);
                            ui.weak(format!(
                                "{} sets · {}s work · {}s rest",
                                exercise.sets, exercise.work_duration, exercise.rest_duration
                            ));
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("🗑").on_hover_text("Remove").clicked() {
                                row_action = Some(RowAction::Remove(exercise.id.clone()));
                            }
                            if ui.button("✏").on_hover_text("Edit").clicked() {
                                row_action = Some(RowAction::StartEdit(exercise.id.clone()));
                            }
                        });
                    });
                }
            });
        }

        match row_action {
            Some(RowAction::StartEdit(id)) => {
                self.builder.start_edit(&id);
            }
            Some(RowAction::Remove(id)) => self.builder.remove_exercise(&id),
            Some(RowAction::SaveEdit) => {
                self.builder.save_edit();
            }
            Some(RowAction::CancelEdit) => self.builder.cancel_edit(),
            None => {}
        }
    }

    fn template_picker(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.strong("Templates");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        self.show_templates = false;
                    }
                });
            });

            ui.horizontal_wrapped(|ui| {
                for category in TEMPLATE_CATEGORIES {
                    ui.selectable_value(&mut self.category, category, category);
                }
            });
            ui.separator();

            for template in templates_for(self.category) {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(template.name);
                        ui.weak(format!(
                            "{} · {} sets · {}s work · {}s rest",
                            template.equipment,
                            template.sets,
                            template.work_duration,
                            template.rest_duration
                        ));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("+ Add").clicked() {
                            self.builder.add_from_template(template);
                        }
                    });
                });
            }
        });
    }

    fn custom_form(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.strong("Custom exercise");
            form_fields(ui, &mut self.builder.form);

            let valid = self.builder.form.is_valid();
            if ui.add_enabled(valid, egui::Button::new("+ Add Exercise")).clicked() {
                self.builder.add_exercise();
            }
        });
    }
}

fn form_fields(ui: &mut egui::Ui, form: &mut ExerciseForm) {
    ui.add(
        egui::TextEdit::singleline(&mut form.name)
            .hint_text("Exercise name")
            .desired_width(f32::INFINITY),
    );
    ui.horizontal(|ui| {
        ui.label("Sets");
        ui.add(egui::DragValue::new(&mut form.sets).range(1..=99));
        ui.label("Work (s)");
        ui.add(egui::DragValue::new(&mut form.work_duration).range(1..=3600));
        ui.label("Rest (s)");
        ui.add(egui::DragValue::new(&mut form.rest_duration).range(0..=3600));
    });
}

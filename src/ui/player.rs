// Player screen - countdown ring, controls and the done view

use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Instant;

use eframe::egui;

use crate::audio::CueEmitter;
use crate::sequencer::{Phase, WorkoutPlayer};
use crate::session::format_clock;

const RING_RADIUS: f32 = 108.0;
const RING_STROKE: f32 = 10.0;
const RING_SEGMENTS: usize = 120;

const READY_COLOR: egui::Color32 = egui::Color32::from_rgb(251, 191, 36);
const WORK_COLOR: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const REST_COLOR: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);

pub enum PlayerAction {
    Quit,
}

pub struct PlayerScreen {
    player: WorkoutPlayer,
}

fn phase_color(phase: Phase) -> egui::Color32 {
    match phase {
        Phase::Ready => READY_COLOR,
        Phase::Rest => REST_COLOR,
        Phase::Work | Phase::Done => WORK_COLOR,
    }
}

impl PlayerScreen {
    pub fn new(player: WorkoutPlayer) -> Self {
        Self { player }
    }

    pub fn quit(&mut self) {
        self.player.quit();
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        cues: &mut dyn CueEmitter,
    ) -> Option<PlayerAction> {
        let now = Instant::now();
        self.player.update(now, cues);

        let action = if self.player.sequencer().is_done() {
            self.done_view(ctx, ui)
        } else {
            let action = self.handle_keys(ctx, now, cues);
            self.playing_view(ui, now, cues).or(action)
        };

        // Wake up for the next tick even without input
        if let Some(wait) = self.player.time_until_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        action
    }

    fn handle_keys(
        &mut self,
        ctx: &egui::Context,
        now: Instant,
        cues: &mut dyn CueEmitter,
    ) -> Option<PlayerAction> {
        let (space, left, right, restart, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if space {
            self.player.toggle_pause(now);
        }
        if left {
            self.player.skip_previous(now, cues);
        }
        if right {
            self.player.skip_next(now, cues);
        }
        if restart {
            self.player.restart_exercise(now, cues);
        }
        escape.then_some(PlayerAction::Quit)
    }

    fn playing_view(
        &mut self,
        ui: &mut egui::Ui,
        now: Instant,
        cues: &mut dyn CueEmitter,
    ) -> Option<PlayerAction> {
        let mut action = None;
        let seq = self.player.sequencer();
        let state = *seq.state();
        let exercise = seq.current_exercise().clone();
        let exercise_count = seq.session().exercises.len();
        let progress = seq.progress();
        let color = phase_color(state.phase);

        ui.horizontal(|ui| {
            if ui.button("✖ Quit").clicked() {
                action = Some(PlayerAction::Quit);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{}%", progress));
            });
        });
        ui.add(egui::ProgressBar::new(f32::from(progress) / 100.0).fill(color));
        ui.add_space(12.0);

        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(state.phase.label()).size(22.0).strong().color(color));
            ui.label(egui::RichText::new(&exercise.name).size(26.0).strong());

            let position = format!("Exercise {}/{}", state.exercise_index + 1, exercise_count);
            if state.phase == Phase::Ready {
                ui.weak(position);
            } else {
                ui.weak(format!("Set {} of {} · {}", state.set_index + 1, exercise.sets, position));
            }
            ui.add_space(12.0);

            self.draw_ring(ui, color, state.remaining);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let can_go_back = state.exercise_index > 0;
                if ui.add_enabled(can_go_back, egui::Button::new("⏮")).on_hover_text("Previous exercise").clicked() {
                    self.player.skip_previous(now, cues);
                }
                if ui.button("↺").on_hover_text("Restart exercise").clicked() {
                    self.player.restart_exercise(now, cues);
                }
                let pause_label = if state.paused { "▶ Resume" } else { "⏸ Pause" };
                if ui.button(pause_label).clicked() {
                    self.player.toggle_pause(now);
                }
                if ui.button("⏭").on_hover_text("Next exercise").clicked() {
                    self.player.skip_next(now, cues);
                }
            });

            if let Some(url) = &exercise.image_url {
                ui.add_space(8.0);
                ui.hyperlink_to("Exercise photo", url);
            }
        });

        ui.add_space(12.0);
        self.exercise_strip(ui, state.exercise_index, color);

        action
    }

    fn draw_ring(&self, ui: &mut egui::Ui, color: egui::Color32, remaining: u32) {
        let size = 2.0 * (RING_RADIUS + RING_STROKE);
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
        let center = response.rect.center();

        painter.circle_stroke(center, RING_RADIUS, egui::Stroke::new(RING_STROKE, egui::Color32::from_gray(40)));

        // Remaining part of the phase, clockwise from 12 o'clock
        let circumference = TAU * RING_RADIUS;
        let visible = circumference - self.player.sequencer().ring_offset(circumference);
        let sweep = visible / RING_RADIUS;
        if sweep > 0.0 {
            let points: Vec<egui::Pos2> = (0..=RING_SEGMENTS)
                .map(|i| {
                    let angle = -FRAC_PI_2 + sweep * i as f32 / RING_SEGMENTS as f32;
                    center + RING_RADIUS * egui::vec2(angle.cos(), angle.sin())
                })
                .collect();
            painter.add(egui::Shape::line(points, egui::Stroke::new(RING_STROKE, color)));
        }

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            format_clock(remaining),
            egui::FontId::monospace(44.0),
            ui.visuals().strong_text_color(),
        );
    }

    fn exercise_strip(&self, ui: &mut egui::Ui, current: usize, color: egui::Color32) {
        egui::ScrollArea::horizontal().show(ui, |ui| {
            ui.horizontal(|ui| {
                for (i, exercise) in self.player.sequencer().session().exercises.iter().enumerate() {
                    let text = egui::RichText::new(&exercise.name).small();
                    if i == current {
                        ui.label(text.color(color).strong());
                    } else {
                        ui.weak(text);
                    }
                }
            });
        });
    }

    fn done_view(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) -> Option<PlayerAction> {
        let mut action = None;
        let seq = self.player.sequencer();

        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.label(egui::RichText::new("🏆").size(56.0));
            ui.label(egui::RichText::new("WORKOUT COMPLETE!").size(30.0).strong().color(WORK_COLOR));
            ui.label(egui::RichText::new(&seq.session().name).size(18.0));
            ui.weak(format!(
                "{} sets · {}",
                seq.total_sets(),
                seq.session().exercise_count_label()
            ));
            ui.add_space(24.0);
            if ui.add(egui::Button::new("Done").min_size(egui::vec2(160.0, 40.0))).clicked() {
                action = Some(PlayerAction::Quit);
            }
        });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
            action = Some(PlayerAction::Quit);
        }
        action
    }
}

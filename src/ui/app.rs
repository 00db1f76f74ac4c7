// Main UI app - screen routing, persistence and notifications

use std::collections::VecDeque;
use std::time::Instant;

use eframe::egui;
use ringbuf::traits::Consumer;

use super::builder::{BuilderAction, BuilderScreen};
use super::home::{self, HomeAction};
use super::player::{PlayerAction, PlayerScreen};
use crate::audio::CueEmitter;
use crate::messaging::channels::NotificationConsumer;
use crate::messaging::notification::{
    NOTIFICATION_TTL_MS, Notification, NotificationCategory, NotificationLevel,
};
use crate::sequencer::WorkoutPlayer;
use crate::session::{EntityId, SessionBuilder, SessionLibrary};
use crate::wake::{NoWake, ScreenWake, SystemInhibitor};

enum Screen {
    Home,
    Builder(BuilderScreen),
    Player(PlayerScreen),
}

pub struct MyRepsApp {
    library: SessionLibrary,
    screen: Screen,
    emitter: Box<dyn CueEmitter>,
    keep_screen_awake: bool,
    /// Session waiting for delete confirmation
    pending_delete: Option<EntityId>,
    // Notification system
    notification_rx: NotificationConsumer,
    notification_queue: VecDeque<Notification>,
    max_notifications: usize,
}

impl MyRepsApp {
    pub fn new(
        library: SessionLibrary,
        emitter: Box<dyn CueEmitter>,
        keep_screen_awake: bool,
        notification_rx: NotificationConsumer,
    ) -> Self {
        Self {
            library,
            screen: Screen::Home,
            emitter,
            keep_screen_awake,
            pending_delete: None,
            notification_rx,
            notification_queue: VecDeque::new(),
            max_notifications: 10,
        }
    }

    /// Queue a notification raised on the UI thread
    pub fn notify(&mut self, notification: Notification) {
        self.notification_queue.push_back(notification);
        if self.notification_queue.len() > self.max_notifications {
            self.notification_queue.pop_front();
        }
    }

    /// Drain notifications sent by the audio thread
    fn update_notifications(&mut self) {
        while let Some(notification) = self.notification_rx.try_pop() {
            self.notify(notification);
        }
    }

    fn recent_notifications(&self) -> Vec<&Notification> {
        self.notification_queue
            .iter()
            .rev()
            .filter(|n| n.is_recent(NOTIFICATION_TTL_MS))
            .take(3)
            .collect()
    }

    fn storage_error(&mut self, action: &str, err: impl std::fmt::Display) {
        tracing::error!(error = %err, "failed to {}", action);
        self.notify(Notification::error(
            NotificationCategory::Storage,
            format!("Could not {}: {}", action, err),
        ));
    }

    fn new_wake(&self) -> Box<dyn ScreenWake> {
        if self.keep_screen_awake {
            Box::new(SystemInhibitor::new())
        } else {
            Box::new(NoWake)
        }
    }

    fn start_workout(&mut self, id: &str) {
        let Some(session) = self.library.get(id).cloned() else {
            return;
        };
        match WorkoutPlayer::new(session, self.new_wake()) {
            Ok(mut player) => {
                player.start(Instant::now());
                self.screen = Screen::Player(PlayerScreen::new(player));
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot start workout");
                self.notify(Notification::warning(
                    NotificationCategory::Generic,
                    format!("Cannot start workout: {}", e),
                ));
            }
        }
    }

    fn apply_home(&mut self, action: HomeAction) {
        match action {
            HomeAction::NewSession => {
                self.screen = Screen::Builder(BuilderScreen::new(SessionBuilder::new()));
            }
            HomeAction::Edit(id) => {
                if let Some(session) = self.library.get(&id) {
                    let builder = SessionBuilder::edit(session);
                    self.screen = Screen::Builder(BuilderScreen::new(builder));
                }
            }
            HomeAction::AskDelete(id) => self.pending_delete = Some(id),
            HomeAction::CancelDelete => self.pending_delete = None,
            HomeAction::ConfirmDelete(id) => {
                self.pending_delete = None;
                if let Err(e) = self.library.delete(&id) {
                    self.storage_error("save sessions", e);
                }
            }
            HomeAction::Start(id) => self.start_workout(&id),
        }
    }

    fn apply_builder(&mut self, action: BuilderAction) {
        match action {
            BuilderAction::Back => self.screen = Screen::Home,
            BuilderAction::Save { session, existing } => {
                tracing::info!(session = %session.name, exercises = session.exercises.len(), "session saved");
                let result = if existing {
                    match self.library.replace(session.clone()) {
                        Ok(true) => Ok(()),
                        // Deleted meanwhile: keep the edit as a new entry
                        Ok(false) => self.library.add(session),
                        Err(e) => Err(e),
                    }
                } else {
                    self.library.add(session)
                };
                if let Err(e) = result {
                    self.storage_error("save sessions", e);
                }
                self.screen = Screen::Home;
            }
        }
    }

    fn apply_player(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::Quit => {
                if let Screen::Player(screen) = &mut self.screen {
                    screen.quit();
                }
                self.screen = Screen::Home;
            }
        }
    }

    /// Display recent notifications at the bottom of the window
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for notification in self.recent_notifications() {
                let (icon, color) = match notification.level {
                    NotificationLevel::Info => ("ℹ", egui::Color32::from_rgb(100, 150, 255)),
                    NotificationLevel::Warning => ("⚠", egui::Color32::from_rgb(255, 165, 0)),
                    NotificationLevel::Error => ("✖", egui::Color32::RED),
                };

                ui.colored_label(color, icon);
                ui.colored_label(color, &notification.message);
                ui.add_space(10.0);
            }
        });
    }
}

impl eframe::App for MyRepsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_notifications();

        if !self.recent_notifications().is_empty() {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                self.draw_status_bar(ui);
            });
            // Let toasts expire without input
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }

        let mut home_action = None;
        let mut builder_action = None;
        let mut player_action = None;

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.screen {
            Screen::Home => {
                home_action = home::show(ui, self.library.sessions(), self.pending_delete.as_deref());
            }
            Screen::Builder(screen) => {
                builder_action = screen.show(ui);
            }
            Screen::Player(screen) => {
                player_action = screen.show(ctx, ui, &mut *self.emitter);
            }
        });

        if let Some(action) = home_action {
            self.apply_home(action);
        }
        if let Some(action) = builder_action {
            self.apply_builder(action);
        }
        if let Some(action) = player_action {
            self.apply_player(action);
        }
    }
}

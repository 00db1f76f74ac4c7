use myreps::audio::{Beeper, CueEmitter, SilentBeeper};
use myreps::config::AppConfig;
use myreps::messaging::notification::{Notification, NotificationCategory};
use myreps::ui::MyRepsApp;
use myreps::{SessionLibrary, SessionStore, create_notification_channel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Stream errors are rare; a small buffer is plenty
const NOTIFICATION_RINGBUFFER_CAPACITY: usize = 64;

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "MyReps starting");
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "invalid configuration, using defaults");
    }

    let (notification_tx, notification_rx) =
        create_notification_channel(NOTIFICATION_RINGBUFFER_CAPACITY);
    // Raised before the window exists, shown as soon as it opens
    let mut startup_notices = Vec::new();

    let data_dir = match config.resolved_data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the working directory for sessions");
            PathBuf::from(".")
        }
    };
    let store = SessionStore::new(&data_dir);
    tracing::info!(path = %store.path().display(), "session store");
    let library = SessionLibrary::open(store);
    tracing::info!(sessions = library.sessions().len(), "sessions loaded");

    let emitter: Box<dyn CueEmitter> = if config.audio.enabled {
        match Beeper::new(config.audio.volume, notification_tx) {
            Ok(beeper) => Box::new(beeper),
            Err(e) => {
                tracing::warn!(error = %e, "audio unavailable, cues will be silent");
                startup_notices.push(Notification::warning(
                    NotificationCategory::Audio,
                    format!("Audio unavailable: {}", e),
                ));
                Box::new(SilentBeeper)
            }
        }
    } else {
        tracing::info!("audio cues disabled");
        Box::new(SilentBeeper)
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 760.0])
            .with_title("MyReps"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "MyReps",
        native_options,
        Box::new(move |_cc| {
            let mut app = MyRepsApp::new(
                library,
                emitter,
                config.keep_screen_awake,
                notification_rx,
            );
            for notice in startup_notices {
                app.notify(notice);
            }
            Ok(Box::new(app))
        }),
    ) {
        tracing::error!(error = %e, "failed to open window");
    }
}

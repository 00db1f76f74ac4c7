// MyReps - Library exports for tests and benchmarks

pub mod audio;
pub mod config;
pub mod messaging;
pub mod sequencer;
pub mod session;
pub mod ui;
pub mod wake;

// Re-export commonly used types for convenience
pub use audio::{Beeper, CueEmitter, SilentBeeper};
pub use config::AppConfig;
pub use messaging::channels::create_notification_channel;
pub use sequencer::{Cue, Phase, PlaybackState, Sequencer, TickClock, WorkoutPlayer};
pub use session::{Exercise, Session, SessionLibrary, SessionStore};
pub use wake::{NoWake, ScreenWake, SystemInhibitor};

// Sequencer module - workout playback
// Pure state machine, a one-second tick clock and the player that drives both

pub mod clock;
pub mod machine;
pub mod player;
pub mod state;

pub use clock::{TICK_INTERVAL, TickClock};
pub use machine::{ControlOutcome, Sequencer, TickOutcome};
pub use player::WorkoutPlayer;
pub use state::{Cue, PlaybackState, Phase, READY_SECONDS, WARNING_AT_SECONDS};

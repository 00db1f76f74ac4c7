// Audio - cue tones rendered on a CPAL output stream

pub mod beeper;
pub mod tone;

pub use beeper::{AudioError, Beeper, CueEmitter, SilentBeeper};
pub use tone::ToneGenerator;

// Playback state - phases, cues and the transient position in a workout

/// Length of the initial get-ready countdown in seconds
pub const READY_SECONDS: u32 = 3;

/// Remaining seconds at which the warning cue fires
pub const WARNING_AT_SECONDS: u32 = 4;

/// Playback phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initial countdown before the first work set
    #[default]
    Ready,
    Work,
    Rest,
    /// Terminal: the workout is complete
    Done,
}

impl Phase {
    /// Label shown above the exercise name
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Ready => "GET READY",
            Phase::Work => "WORK",
            Phase::Rest => "REST",
            Phase::Done => "DONE",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Phase::Done)
    }
}

/// Audible cue emitted at phase boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// One low pulse: four seconds left in the phase
    Warning,
    /// Two pulses: a new phase starts
    Transition,
    /// Three higher pulses: workout complete
    Complete,
}

impl Cue {
    /// Number of tone pulses
    pub fn pulses(&self) -> u32 {
        match self {
            Cue::Warning => 1,
            Cue::Transition => 2,
            Cue::Complete => 3,
        }
    }

    /// Pulse frequency in Hz
    pub fn frequency(&self) -> f32 {
        match self {
            Cue::Warning => 440.0,
            Cue::Transition => 520.0,
            Cue::Complete => 620.0,
        }
    }
}

/// Transient playback position, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub exercise_index: usize,
    pub set_index: u32,
    pub phase: Phase,
    /// Seconds left in the current phase
    pub remaining: u32,
    pub paused: bool,
}

impl PlaybackState {
    /// State at the start of a workout
    pub fn initial() -> Self {
        Self {
            exercise_index: 0,
            set_index: 0,
            phase: Phase::Ready,
            remaining: READY_SECONDS,
            paused: false,
        }
    }

    /// The part of the state that identifies the current phase slot
    /// Any change means the tick cadence must be realigned.
    pub fn slot(&self) -> (usize, u32, Phase) {
        (self.exercise_index, self.set_index, self.phase)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::initial()
    }
}

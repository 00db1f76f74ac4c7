// Sequencer - the workout phase state machine
// Turns a session's exercises into timed Ready/Work/Rest/Done phases.
// Pure: no clock and no audio; callers feed ticks and act on the returned cues.

use super::state::{Cue, Phase, PlaybackState, READY_SECONDS, WARNING_AT_SECONDS};
use crate::session::{Exercise, Session, SessionError, validate_session};

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Warning cue, fired before any transition
    pub warning: Option<Cue>,
    /// Cue of the phase transition performed by this tick
    pub transition: Option<Cue>,
    /// The exercise, set or phase changed
    pub slot_changed: bool,
}

impl TickOutcome {
    /// Cues in emission order
    pub fn cues(self) -> impl Iterator<Item = Cue> {
        self.warning.into_iter().chain(self.transition)
    }
}

/// Result of a manual control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlOutcome {
    pub cue: Option<Cue>,
    pub slot_changed: bool,
}

/// Workout phase state machine
#[derive(Debug, Clone)]
pub struct Sequencer {
    session: Session,
    state: PlaybackState,
    total_sets: u32,
}

impl Sequencer {
    /// Create a sequencer at the start of the Ready countdown
    pub fn new(session: Session) -> Result<Self, SessionError> {
        validate_session(&session)?;
        let total_sets = session.total_sets();
        Ok(Self {
            session,
            state: PlaybackState::initial(),
            total_sets,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining(&self) -> u32 {
        self.state.remaining
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn is_done(&self) -> bool {
        self.state.phase.is_done()
    }

    /// Ticks only advance the workout while running
    pub fn is_running(&self) -> bool {
        !self.state.paused && !self.is_done()
    }

    pub fn total_sets(&self) -> u32 {
        self.total_sets
    }

    pub fn current_exercise(&self) -> &Exercise {
        &self.session.exercises[self.state.exercise_index]
    }

    fn exercise_count(&self) -> usize {
        self.session.exercises.len()
    }

    fn is_last_exercise(&self) -> bool {
        self.state.exercise_index + 1 == self.exercise_count()
    }

    fn is_last_set(&self) -> bool {
        self.state.set_index + 1 == self.current_exercise().sets
    }

    /// Full length of the current phase in seconds
    pub fn phase_duration(&self) -> u32 {
        match self.state.phase {
            Phase::Ready => READY_SECONDS,
            Phase::Work => self.current_exercise().work_duration,
            Phase::Rest => self.current_exercise().rest_duration,
            Phase::Done => 0,
        }
    }

    /// Advance the workout by one second
    /// No-op while paused or done. At most one transition per tick; a phase
    /// entered with 0 seconds transitions on the following tick.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.is_running() {
            return outcome;
        }

        if self.state.remaining > 0 {
            if self.state.remaining == WARNING_AT_SECONDS {
                outcome.warning = Some(Cue::Warning);
            }
            self.state.remaining -= 1;
        }

        if self.state.remaining == 0 {
            outcome.transition = Some(self.advance_phase());
            outcome.slot_changed = true;
        }

        outcome
    }

    /// Move to the next phase once the current one has run out
    fn advance_phase(&mut self) -> Cue {
        match self.state.phase {
            Phase::Ready => {
                self.enter_work(self.state.exercise_index, self.state.set_index);
                Cue::Transition
            }
            Phase::Work => {
                if self.is_last_set() && self.is_last_exercise() {
                    self.finish()
                } else {
                    self.state.phase = Phase::Rest;
                    self.state.remaining = self.current_exercise().rest_duration;
                    Cue::Transition
                }
            }
            Phase::Rest => {
                if self.is_last_set() {
                    self.enter_work(self.state.exercise_index + 1, 0);
                } else {
                    self.enter_work(self.state.exercise_index, self.state.set_index + 1);
                }
                Cue::Transition
            }
            // Done is never ticked
            Phase::Done => Cue::Complete,
        }
    }

    fn enter_work(&mut self, exercise_index: usize, set_index: u32) {
        self.state.exercise_index = exercise_index;
        self.state.set_index = set_index;
        self.state.phase = Phase::Work;
        self.state.remaining = self.current_exercise().work_duration;
    }

    fn finish(&mut self) -> Cue {
        self.state.phase = Phase::Done;
        self.state.remaining = 0;
        Cue::Complete
    }

    /// Force Work on an exercise's first set and resume
    fn jump_to(&mut self, exercise_index: usize) -> ControlOutcome {
        let before = self.state.slot();
        self.enter_work(exercise_index, 0);
        self.state.paused = false;
        ControlOutcome {
            cue: None,
            slot_changed: self.state.slot() != before,
        }
    }

    /// Toggle the paused flag; phase and remaining time are untouched
    pub fn toggle_pause(&mut self) {
        if !self.is_done() {
            self.state.paused = !self.state.paused;
        }
    }

    /// Skip to the next exercise, or finish the workout from the last one
    pub fn skip_next(&mut self) -> ControlOutcome {
        if self.is_done() {
            return ControlOutcome::default();
        }
        if self.is_last_exercise() {
            return ControlOutcome {
                cue: Some(self.finish()),
                slot_changed: true,
            };
        }
        self.jump_to(self.state.exercise_index + 1)
    }

    /// Go back to the previous exercise's first set
    /// Never steps back a single set within the current exercise.
    pub fn skip_previous(&mut self) -> ControlOutcome {
        if self.is_done() || self.state.exercise_index == 0 {
            return ControlOutcome::default();
        }
        self.jump_to(self.state.exercise_index - 1)
    }

    /// Restart the current exercise from its first work set
    pub fn restart_exercise(&mut self) -> ControlOutcome {
        if self.is_done() {
            return ControlOutcome::default();
        }
        let outcome = self.jump_to(self.state.exercise_index);
        // Same slot still needs a fresh cadence: the remaining time was reset
        ControlOutcome {
            slot_changed: true,
            ..outcome
        }
    }

    /// Whole-session progress as an integer percentage
    /// 100 only once done; capped at 99 before that.
    pub fn progress(&self) -> u8 {
        if self.is_done() {
            return 100;
        }
        let prior = self.session.exercises[..self.state.exercise_index]
            .iter()
            .fold(0u32, |total, ex| total.saturating_add(ex.sets));
        let resting = u32::from(self.state.phase == Phase::Rest);
        let completed = prior
            .saturating_add(self.state.set_index)
            .saturating_add(resting);

        let percent = (completed as f64 / self.total_sets as f64 * 100.0).round() as u8;
        percent.min(99)
    }

    /// Elapsed proportion of the current phase in [0, 1]
    pub fn ring_fraction(&self) -> f32 {
        let duration = self.phase_duration();
        if duration == 0 {
            return 0.0;
        }
        1.0 - self.state.remaining as f32 / duration as f32
    }

    /// Length of the drawn part of a countdown arc of `arc_length`
    pub fn ring_offset(&self, arc_length: f32) -> f32 {
        arc_length * self.ring_fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(shape: &[(u32, u32, u32)]) -> Session {
        let exercises = shape
            .iter()
            .enumerate()
            .map(|(i, &(sets, work, rest))| Exercise::new(format!("Ex {}", i + 1), "", sets, work, rest))
            .collect();
        Session::new("Test", exercises)
    }

    fn run_ticks(seq: &mut Sequencer, n: u32) -> Vec<Cue> {
        let mut cues = Vec::new();
        for _ in 0..n {
            cues.extend(seq.tick().cues());
        }
        cues
    }

    #[test]
    fn test_rejects_empty_session() {
        assert!(matches!(
            Sequencer::new(session(&[])),
            Err(SessionError::NoExercises)
        ));
    }

    #[test]
    fn test_ready_to_work() {
        let mut seq = Sequencer::new(session(&[(2, 30, 10)])).unwrap();
        assert_eq!(seq.phase(), Phase::Ready);
        assert_eq!(seq.remaining(), 3);

        assert!(run_ticks(&mut seq, 2).is_empty());
        assert_eq!(seq.remaining(), 1);

        let outcome = seq.tick();
        assert_eq!(outcome.transition, Some(Cue::Transition));
        assert!(outcome.slot_changed);
        assert_eq!(seq.phase(), Phase::Work);
        assert_eq!(seq.remaining(), 30);
    }

    #[test]
    fn test_warning_fires_once_at_four_seconds() {
        let mut seq = Sequencer::new(session(&[(1, 10, 0)])).unwrap();
        run_ticks(&mut seq, 3); // through Ready
        assert_eq!(seq.remaining(), 10);

        let mut warnings = 0;
        for _ in 0..6 {
            let outcome = seq.tick();
            if outcome.warning.is_some() {
                warnings += 1;
            }
        }
        // 10 -> 4 without a warning
        assert_eq!(warnings, 0);
        assert_eq!(seq.remaining(), 4);

        let outcome = seq.tick();
        assert_eq!(outcome.warning, Some(Cue::Warning));
        assert_eq!(outcome.transition, None);
        assert_eq!(seq.remaining(), 3);

        let rest: Vec<_> = run_ticks(&mut seq, 3);
        assert_eq!(rest, vec![Cue::Complete]);
    }

    #[test]
    fn test_short_phase_never_warns() {
        let mut seq = Sequencer::new(session(&[(1, 3, 0)])).unwrap();
        let cues = run_ticks(&mut seq, 10);
        assert_eq!(cues, vec![Cue::Transition, Cue::Complete]);
    }

    #[test]
    fn test_work_rest_cycle_within_exercise() {
        let mut seq = Sequencer::new(session(&[(2, 2, 1), (1, 2, 0)])).unwrap();
        run_ticks(&mut seq, 3);
        assert_eq!(seq.state().slot(), (0, 0, Phase::Work));

        run_ticks(&mut seq, 2);
        assert_eq!(seq.state().slot(), (0, 0, Phase::Rest));
        assert_eq!(seq.remaining(), 1);

        run_ticks(&mut seq, 1);
        assert_eq!(seq.state().slot(), (0, 1, Phase::Work));

        run_ticks(&mut seq, 2);
        assert_eq!(seq.state().slot(), (0, 1, Phase::Rest));

        run_ticks(&mut seq, 1);
        assert_eq!(seq.state().slot(), (1, 0, Phase::Work));

        let cues = run_ticks(&mut seq, 2);
        assert_eq!(cues, vec![Cue::Complete]);
        assert!(seq.is_done());
    }

    #[test]
    fn test_zero_rest_takes_one_tick_with_cue() {
        let mut seq = Sequencer::new(session(&[(2, 1, 0)])).unwrap();
        run_ticks(&mut seq, 3);
        let outcome = seq.tick();
        assert_eq!(outcome.transition, Some(Cue::Transition));
        assert_eq!(seq.phase(), Phase::Rest);
        assert_eq!(seq.remaining(), 0);

        let outcome = seq.tick();
        assert_eq!(outcome.transition, Some(Cue::Transition));
        assert_eq!(seq.state().slot(), (0, 1, Phase::Work));
    }

    #[test]
    fn test_done_stops_ticking() {
        let mut seq = Sequencer::new(session(&[(1, 1, 0)])).unwrap();
        run_ticks(&mut seq, 4);
        assert!(seq.is_done());
        assert!(!seq.is_running());
        assert_eq!(seq.tick(), TickOutcome::default());
        assert_eq!(seq.progress(), 100);
    }

    #[test]
    fn test_pause_preserves_state() {
        let mut seq = Sequencer::new(session(&[(2, 30, 10)])).unwrap();
        run_ticks(&mut seq, 5);
        let before = *seq.state();

        seq.toggle_pause();
        assert!(seq.is_paused());
        run_ticks(&mut seq, 50);
        let mut paused = before;
        paused.paused = true;
        assert_eq!(*seq.state(), paused);

        seq.toggle_pause();
        seq.tick();
        assert_eq!(seq.remaining(), before.remaining - 1);
    }

    #[test]
    fn test_skip_next_and_previous() {
        let mut seq = Sequencer::new(session(&[(3, 30, 10), (2, 20, 5), (1, 15, 0)])).unwrap();
        seq.toggle_pause();

        let outcome = seq.skip_next();
        assert!(outcome.slot_changed);
        assert_eq!(outcome.cue, None);
        assert_eq!(seq.state().slot(), (1, 0, Phase::Work));
        assert_eq!(seq.remaining(), 20);
        assert!(!seq.is_paused());

        seq.skip_previous();
        assert_eq!(seq.state().slot(), (0, 0, Phase::Work));
        assert_eq!(seq.remaining(), 30);

        // No-op at the first exercise
        let before = *seq.state();
        let outcome = seq.skip_previous();
        assert_eq!(outcome, ControlOutcome::default());
        assert_eq!(*seq.state(), before);
    }

    #[test]
    fn test_skip_previous_does_not_step_back_sets() {
        let mut seq = Sequencer::new(session(&[(1, 5, 0), (3, 2, 1)])).unwrap();
        seq.skip_next();
        // Work(2) -> Rest(1) -> Work set 2
        run_ticks(&mut seq, 3);
        assert_eq!(seq.state().slot(), (1, 1, Phase::Work));

        seq.skip_previous();
        assert_eq!(seq.state().slot(), (0, 0, Phase::Work));
    }

    #[test]
    fn test_skip_next_from_last_exercise_completes() {
        let mut seq = Sequencer::new(session(&[(1, 30, 0), (2, 20, 5)])).unwrap();
        seq.skip_next();
        let outcome = seq.skip_next();
        assert_eq!(outcome.cue, Some(Cue::Complete));
        assert!(seq.is_done());
        assert_eq!(seq.progress(), 100);

        // Controls are inert once done
        assert_eq!(seq.skip_previous(), ControlOutcome::default());
        assert_eq!(seq.restart_exercise(), ControlOutcome::default());
        seq.toggle_pause();
        assert!(!seq.is_paused());
    }

    #[test]
    fn test_restart_exercise() {
        let mut seq = Sequencer::new(session(&[(3, 2, 1)])).unwrap();
        run_ticks(&mut seq, 3 + 2 + 1 + 1);
        assert_eq!(seq.state().slot(), (0, 1, Phase::Work));
        seq.toggle_pause();

        let outcome = seq.restart_exercise();
        assert!(outcome.slot_changed);
        assert_eq!(seq.state().slot(), (0, 0, Phase::Work));
        assert_eq!(seq.remaining(), 2);
        assert!(!seq.is_paused());
    }

    #[test]
    fn test_progress_counts_completed_sets() {
        let mut seq = Sequencer::new(session(&[(2, 2, 1), (2, 2, 1)])).unwrap();
        assert_eq!(seq.progress(), 0);

        run_ticks(&mut seq, 3 + 2);
        // Resting after set 1 of 4
        assert_eq!(seq.phase(), Phase::Rest);
        assert_eq!(seq.progress(), 25);

        seq.skip_next();
        assert_eq!(seq.progress(), 50);
    }

    #[test]
    fn test_progress_capped_below_done() {
        // 300 sets: the final work set is 299/300 which rounds to 100
        let mut seq = Sequencer::new(session(&[(300, 1, 0)])).unwrap();
        run_ticks(&mut seq, 3 + 299 * 2);
        assert_eq!(seq.state().slot(), (0, 299, Phase::Work));
        assert_eq!(seq.progress(), 99);
    }

    #[test]
    fn test_ring_fraction() {
        let mut seq = Sequencer::new(session(&[(2, 10, 0)])).unwrap();
        assert_eq!(seq.ring_fraction(), 0.0);
        run_ticks(&mut seq, 3);
        run_ticks(&mut seq, 5);
        assert!((seq.ring_fraction() - 0.5).abs() < 1e-6);
        assert!((seq.ring_offset(100.0) - 50.0).abs() < 1e-4);

        // Zero-length rest projects to an empty ring
        run_ticks(&mut seq, 5);
        assert_eq!(seq.phase(), Phase::Rest);
        assert_eq!(seq.ring_fraction(), 0.0);
    }

    #[test]
    fn test_oversized_session_builds_and_progresses() {
        let json = r#"{"id":"a","name":"Long","exercises":[
            {"id":"e","name":"Hold","sets":4294967295,"workDuration":70000,"restDuration":0},
            {"id":"f","name":"Hang","sets":70000,"workDuration":1,"restDuration":0}
        ]}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        let mut seq = Sequencer::new(session).unwrap();
        assert_eq!(seq.total_sets(), u32::MAX);
        assert_eq!(seq.progress(), 0);

        seq.skip_next();
        assert_eq!(seq.state().exercise_index, 1);
        assert!(seq.progress() <= 99);
        run_ticks(&mut seq, 1);
        assert!(!seq.is_done());
    }
}

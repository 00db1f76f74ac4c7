// Workout player - runs a sequencer against wall-clock time
// Owns the tick clock and the screen-wake hold for one playback; cues are
// handed to the caller's emitter as they happen.

use std::time::{Duration, Instant};

use super::clock::TickClock;
use super::machine::{ControlOutcome, Sequencer};
use crate::audio::CueEmitter;
use crate::session::{Session, SessionError};
use crate::wake::ScreenWake;

pub struct WorkoutPlayer {
    sequencer: Sequencer,
    clock: TickClock,
    wake: Box<dyn ScreenWake>,
    finished: bool,
}

impl WorkoutPlayer {
    /// Prepare playback of `session`; nothing runs until `start`
    pub fn new(session: Session, wake: Box<dyn ScreenWake>) -> Result<Self, SessionError> {
        Ok(Self {
            sequencer: Sequencer::new(session)?,
            clock: TickClock::new(),
            wake,
            finished: false,
        })
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Is the tick clock currently armed?
    pub fn is_ticking(&self) -> bool {
        self.clock.is_running()
    }

    pub fn holds_wake(&self) -> bool {
        self.wake.is_held()
    }

    /// Time until the next tick is due, None while not ticking
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.clock.time_until_tick(now)
    }

    /// Begin playback: take the wake hold and arm the clock
    pub fn start(&mut self, now: Instant) {
        if let Err(e) = self.wake.acquire() {
            tracing::debug!(error = %e, "screen wake hold unavailable");
        }
        tracing::info!(session = %self.sequencer.session().name, "workout started");
        self.sync_clock(now);
    }

    /// Process every tick due at `now`
    /// Returns the number of ticks applied.
    pub fn update(&mut self, now: Instant, cues: &mut dyn CueEmitter) -> u32 {
        let mut ticks = 0;
        while self.clock.poll(now) {
            let outcome = self.sequencer.tick();
            ticks += 1;

            for cue in outcome.cues() {
                cues.emit(cue);
            }

            if outcome.slot_changed {
                let state = self.sequencer.state();
                tracing::debug!(
                    phase = ?state.phase,
                    exercise = state.exercise_index,
                    set = state.set_index,
                    remaining = state.remaining,
                    "phase change"
                );
                // Realigns the cadence, which also ends this loop
                self.sync_clock(now);
            }
        }
        ticks
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.sequencer.toggle_pause();
        tracing::debug!(paused = self.sequencer.is_paused(), "pause toggled");
        self.sync_clock(now);
    }

    pub fn skip_next(&mut self, now: Instant, cues: &mut dyn CueEmitter) {
        let outcome = self.sequencer.skip_next();
        self.apply_control(outcome, now, cues);
    }

    pub fn skip_previous(&mut self, now: Instant, cues: &mut dyn CueEmitter) {
        let outcome = self.sequencer.skip_previous();
        self.apply_control(outcome, now, cues);
    }

    pub fn restart_exercise(&mut self, now: Instant, cues: &mut dyn CueEmitter) {
        let outcome = self.sequencer.restart_exercise();
        self.apply_control(outcome, now, cues);
    }

    fn apply_control(&mut self, outcome: ControlOutcome, now: Instant, cues: &mut dyn CueEmitter) {
        if let Some(cue) = outcome.cue {
            cues.emit(cue);
        }
        if outcome.slot_changed {
            self.sync_clock(now);
        }
    }

    /// Stop ticking while paused or done, otherwise restart the cadence at `now`
    fn sync_clock(&mut self, now: Instant) {
        if self.sequencer.is_done() {
            self.finish();
        } else if self.sequencer.is_paused() {
            self.clock.stop();
        } else {
            self.clock.restart(now);
        }
    }

    fn finish(&mut self) {
        self.clock.stop();
        self.wake.release();
        if !self.finished {
            self.finished = true;
            tracing::info!(session = %self.sequencer.session().name, "workout complete");
        }
    }

    /// Stop the timer and release the wake hold; safe to call repeatedly
    pub fn quit(&mut self) {
        self.clock.stop();
        self.wake.release();
    }
}

impl Drop for WorkoutPlayer {
    fn drop(&mut self) {
        self.quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::state::{Cue, Phase};
    use crate::session::Exercise;
    use crate::wake::WakeError;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    impl CueEmitter for Recorder {
        fn beep(&mut self, pulses: u32, _frequency: f32) {
            let cue = match pulses {
                1 => Cue::Warning,
                2 => Cue::Transition,
                _ => Cue::Complete,
            };
            self.0.push(cue);
        }
    }

    /// Wake hold whose state the test can observe after handing it over
    struct SharedWake(Rc<Cell<bool>>);

    impl ScreenWake for SharedWake {
        fn acquire(&mut self) -> Result<(), WakeError> {
            self.0.set(true);
            Ok(())
        }
        fn release(&mut self) {
            self.0.set(false);
        }
        fn is_held(&self) -> bool {
            self.0.get()
        }
    }

    fn make_player(shape: &[(u32, u32, u32)]) -> (WorkoutPlayer, Rc<Cell<bool>>) {
        let exercises = shape
            .iter()
            .map(|&(sets, work, rest)| Exercise::new("Ex", "", sets, work, rest))
            .collect();
        let held = Rc::new(Cell::new(false));
        let player =
            WorkoutPlayer::new(Session::new("Test", exercises), Box::new(SharedWake(held.clone())))
                .unwrap();
        (player, held)
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_nothing_runs_before_start() {
        let (mut player, held) = make_player(&[(1, 5, 0)]);
        let mut cues = Recorder::default();
        assert_eq!(player.update(Instant::now() + secs(10), &mut cues), 0);
        assert!(!held.get());
        assert!(!player.is_ticking());
    }

    #[test]
    fn test_start_acquires_wake_and_ticks() {
        let (mut player, held) = make_player(&[(1, 5, 0)]);
        let mut cues = Recorder::default();
        let t0 = Instant::now();
        player.start(t0);
        assert!(held.get());
        assert!(player.is_ticking());

        assert_eq!(player.update(t0 + secs(1), &mut cues), 1);
        assert_eq!(player.sequencer().remaining(), 2);
    }

    #[test]
    fn test_transition_realigns_clock() {
        let (mut player, _held) = make_player(&[(1, 5, 0)]);
        let mut cues = Recorder::default();
        let t0 = Instant::now();
        player.start(t0);

        // A late frame: only the ticks up to the transition are applied
        let late = t0 + secs(4);
        assert_eq!(player.update(late, &mut cues), 3);
        assert_eq!(player.sequencer().phase(), Phase::Work);
        assert_eq!(player.sequencer().remaining(), 5);
        assert_eq!(player.time_until_tick(late), Some(secs(1)));
        assert_eq!(cues.0, vec![Cue::Transition]);
    }

    #[test]
    fn test_completion_releases_wake() {
        let (mut player, held) = make_player(&[(1, 1, 0)]);
        let mut cues = Recorder::default();
        let mut now = Instant::now();
        player.start(now);

        for _ in 0..4 {
            now += secs(1);
            player.update(now, &mut cues);
        }
        assert!(player.sequencer().is_done());
        assert!(!player.is_ticking());
        assert!(!held.get());
        assert_eq!(cues.0, vec![Cue::Transition, Cue::Complete]);
    }

    #[test]
    fn test_pause_stops_clock() {
        let (mut player, _held) = make_player(&[(1, 10, 0)]);
        let mut cues = Recorder::default();
        let t0 = Instant::now();
        player.start(t0);

        player.toggle_pause(t0 + Duration::from_millis(500));
        assert!(!player.is_ticking());
        assert_eq!(player.update(t0 + secs(30), &mut cues), 0);
        assert_eq!(player.sequencer().remaining(), 3);

        let resume = t0 + secs(30);
        player.toggle_pause(resume);
        assert!(player.is_ticking());
        assert_eq!(player.update(resume + secs(1), &mut cues), 1);
        assert_eq!(player.sequencer().remaining(), 2);
    }

    #[test]
    fn test_skip_next_from_last_completes() {
        let (mut player, held) = make_player(&[(2, 10, 5)]);
        let mut cues = Recorder::default();
        let t0 = Instant::now();
        player.start(t0);

        player.skip_next(t0, &mut cues);
        assert!(player.sequencer().is_done());
        assert_eq!(cues.0, vec![Cue::Complete]);
        assert!(!player.is_ticking());
        assert!(!held.get());
    }

    #[test]
    fn test_controls_restart_cadence() {
        let (mut player, _held) = make_player(&[(2, 10, 5), (1, 8, 0)]);
        let mut cues = Recorder::default();
        let t0 = Instant::now();
        player.start(t0);

        let t1 = t0 + Duration::from_millis(900);
        player.skip_next(t1, &mut cues);
        assert_eq!(player.sequencer().remaining(), 8);
        assert_eq!(player.time_until_tick(t1), Some(secs(1)));

        let t2 = t1 + Duration::from_millis(300);
        player.restart_exercise(t2, &mut cues);
        assert_eq!(player.time_until_tick(t2), Some(secs(1)));
        // Controls other than finishing emit nothing
        assert!(cues.0.is_empty());
    }

    #[test]
    fn test_quit_and_drop_release_wake() {
        let (mut player, held) = make_player(&[(1, 10, 0)]);
        player.start(Instant::now());
        player.quit();
        assert!(!held.get());
        assert!(!player.is_ticking());

        let (mut player, held) = make_player(&[(1, 10, 0)]);
        player.start(Instant::now());
        drop(player);
        assert!(!held.get());
    }

    /// Wake hold that can never be acquired; counts releases
    struct UnavailableWake(Rc<Cell<u32>>);

    impl ScreenWake for UnavailableWake {
        fn acquire(&mut self) -> Result<(), WakeError> {
            Err(WakeError::Unsupported)
        }
        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
        fn is_held(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_playback_continues_without_wake_hold() {
        let releases = Rc::new(Cell::new(0));
        let session = Session::new("Test", vec![Exercise::new("Ex", "", 1, 1, 0)]);
        let mut player =
            WorkoutPlayer::new(session, Box::new(UnavailableWake(releases.clone()))).unwrap();
        let mut cues = Recorder::default();
        let mut now = Instant::now();

        player.start(now);
        assert!(player.is_ticking());
        assert!(!player.holds_wake());

        now += secs(1);
        assert_eq!(player.update(now, &mut cues), 1);
        assert_eq!(player.sequencer().remaining(), 2);

        for _ in 0..3 {
            now += secs(1);
            player.update(now, &mut cues);
        }
        assert!(player.sequencer().is_done());
        assert!(!player.is_ticking());
        assert!(releases.get() >= 1);
        assert_eq!(cues.0, vec![Cue::Transition, Cue::Complete]);
    }
}

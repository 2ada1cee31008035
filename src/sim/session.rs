//! Round chaining
//!
//! A session owns the live round, the tuning and the RNG. After a round ends
//! it holds at most one pending restart, counted down by the same frame loop
//! that drives the round. Starting a round by hand drops whatever was pending.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{RngState, RoundOutcome, RoundState};
use super::tick::{RoundInput, advance};
use crate::tuning::Tuning;

/// The next round, waiting for its start delay to run out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRound {
    pub level: u32,
    /// Seconds until the round starts
    pub remaining: f32,
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The live round's timer ran out
    RoundEnded { level: u32, outcome: RoundOutcome },
    /// A pending round replaced the finished one
    RoundStarted { level: u32 },
    /// The last level was won; nothing else is scheduled
    Finished { level: u32 },
}

pub struct Session<R = Pcg32> {
    tuning: Tuning,
    round: RoundState,
    pending: Option<PendingRound>,
    finished: bool,
    rounds_started: u32,
    rng: R,
}

impl Session<Pcg32> {
    /// Create a session with a seeded PCG stream
    pub fn new(level: u32, tuning: Tuning, seed: u64) -> Self {
        log::info!("Session seed: {}", seed);
        Self::with_rng(level, tuning, RngState::new(seed).to_rng())
    }
}

impl<R: Rng> Session<R> {
    /// Create a session drawing randomness from `rng`
    pub fn with_rng(level: u32, tuning: Tuning, mut rng: R) -> Self {
        let round = RoundState::new(level, &tuning, &mut rng);
        Self {
            tuning,
            round,
            pending: None,
            finished: false,
            rounds_started: 1,
            rng,
        }
    }

    /// Replace the live round with a fresh one at `level`
    pub fn start(&mut self, level: u32) {
        if let Some(pending) = self.pending.take() {
            log::debug!("Dropping pending start of level {}", pending.level);
        }
        self.round = RoundState::new(level, &self.tuning, &mut self.rng);
        self.finished = false;
        self.rounds_started += 1;
    }

    /// Swap in new tuning, then start a fresh round at `level` with it
    pub fn start_with(&mut self, level: u32, tuning: Tuning) {
        log::info!("Tuning replaced");
        self.tuning = tuning;
        self.start(level);
    }

    /// Run one frame: either count down a pending restart or advance the round
    pub fn frame(&mut self, input: &RoundInput, dt: f32) -> Option<SessionEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.tuning.max_frame_dt)
        } else {
            0.0
        };

        if let Some(pending) = self.pending.as_mut() {
            pending.remaining -= dt;
            if pending.remaining > 0.0 {
                return None;
            }
            let level = pending.level;
            self.start(level);
            log::info!("Starting level {}", level);
            return Some(SessionEvent::RoundStarted { level });
        }

        if self.finished {
            return None;
        }

        let outcome = advance(&mut self.round, input, dt, &mut self.rng)?;
        let level = self.round.level();

        match self.round.next_level() {
            Some(next) => {
                self.pending = Some(PendingRound {
                    level: next,
                    remaining: self.tuning.restart_delay,
                });
                Some(SessionEvent::RoundEnded { level, outcome })
            }
            None => {
                log::info!("Final level {} won", level);
                self.finished = true;
                Some(SessionEvent::Finished { level })
            }
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }

    pub fn pending(&self) -> Option<PendingRound> {
        self.pending
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tuning where nothing decays and rounds last a quarter second
    fn quick_tuning() -> Tuning {
        Tuning {
            light_decay_rate: 0.0,
            base_level_time: 0.25,
            min_level_time: 0.25,
            restart_delay: 0.5,
            max_frame_dt: 0.25,
            ..Default::default()
        }
    }

    fn run_until_event(session: &mut Session, dt: f32) -> SessionEvent {
        for _ in 0..10_000 {
            if let Some(event) = session.frame(&RoundInput::default(), dt) {
                return event;
            }
        }
        panic!("no event");
    }

    fn light_everything(session: &mut Session) {
        for light in &mut session.round_mut().lights {
            light.on = true;
        }
    }

    #[test]
    fn test_win_schedules_next_level() {
        let mut session = Session::new(1, quick_tuning(), 42);
        light_everything(&mut session);

        let event = run_until_event(&mut session, 0.05);
        assert_eq!(
            event,
            SessionEvent::RoundEnded {
                level: 1,
                outcome: RoundOutcome::Won
            }
        );
        assert_eq!(session.pending().map(|p| p.level), Some(2));

        let event = run_until_event(&mut session, 0.05);
        assert_eq!(event, SessionEvent::RoundStarted { level: 2 });
        assert_eq!(session.round().level(), 2);
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_loss_restarts_same_level() {
        let mut session = Session::new(3, quick_tuning(), 42);
        session.round_mut().lights[0].on = false;

        let event = run_until_event(&mut session, 0.05);
        assert_eq!(
            event,
            SessionEvent::RoundEnded {
                level: 3,
                outcome: RoundOutcome::Lost
            }
        );
        assert_eq!(session.pending().map(|p| p.level), Some(3));
    }

    #[test]
    fn test_restart_waits_for_delay() {
        let mut session = Session::new(1, quick_tuning(), 7);
        light_everything(&mut session);
        run_until_event(&mut session, 0.05);

        // 0.5s delay: three 0.125s frames are not enough
        for _ in 0..3 {
            assert_eq!(session.frame(&RoundInput::default(), 0.125), None);
        }
        assert!(session.round().is_over());
        assert_eq!(
            session.frame(&RoundInput::default(), 0.125),
            Some(SessionEvent::RoundStarted { level: 2 })
        );
    }

    #[test]
    fn test_manual_start_cancels_pending() {
        let mut session = Session::new(1, quick_tuning(), 9);
        light_everything(&mut session);
        run_until_event(&mut session, 0.05);
        assert!(session.pending().is_some());

        session.start(5);
        assert!(session.pending().is_none());
        assert_eq!(session.round().level(), 5);
        assert!(!session.round().is_over());

        // The old restart never fires
        for _ in 0..3 {
            assert_eq!(session.frame(&RoundInput::default(), 0.05), None);
        }
        assert_eq!(session.round().level(), 5);
    }

    #[test]
    fn test_final_level_finishes() {
        let tuning = Tuning {
            max_level: Some(1),
            ..quick_tuning()
        };
        let mut session = Session::new(1, tuning, 1);
        light_everything(&mut session);

        assert_eq!(
            run_until_event(&mut session, 0.05),
            SessionEvent::Finished { level: 1 }
        );
        assert!(session.is_finished());
        assert!(session.pending().is_none());
        assert!(session.round().message.contains("All 1 levels complete"));
        for _ in 0..100 {
            assert_eq!(session.frame(&RoundInput::default(), 0.05), None);
        }
    }

    #[test]
    fn test_large_frames_are_clamped() {
        let mut session = Session::new(1, Tuning::default(), 3);
        session.frame(&RoundInput::default(), 30.0);
        let round = session.round();
        assert!(!round.is_over());
        assert!((round.timer - (round.settings.timer - 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_start_with_replaces_tuning() {
        let mut session = Session::new(1, quick_tuning(), 11);
        light_everything(&mut session);
        run_until_event(&mut session, 0.05);
        assert!(session.pending().is_some());

        let retuned = Tuning {
            base_level_time: 7.0,
            min_level_time: 7.0,
            restart_delay: 2.0,
            ..quick_tuning()
        };
        session.start_with(4, retuned.clone());

        assert!(session.pending().is_none());
        assert_eq!(session.tuning(), &retuned);
        assert_eq!(session.round().level(), 4);
        assert_eq!(session.round().timer, 7.0);

        // Later rounds keep the new tuning too
        session.round_mut().lights[0].on = false;
        run_until_event(&mut session, 0.25);
        assert_eq!(session.pending().map(|p| p.remaining), Some(2.0));
    }
}

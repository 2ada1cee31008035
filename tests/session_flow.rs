// Session-level flow: determinism, round chaining and the autopilot.

use tree_lights::Tuning;
use tree_lights::sim::{RoundInput, RoundOutcome, Session, SessionEvent, autopilot_input};

const FRAME_DT: f32 = 1.0 / 60.0;

fn short_rounds() -> Tuning {
    Tuning {
        base_level_time: 3.0,
        min_level_time: 3.0,
        restart_delay: 0.5,
        ..Default::default()
    }
}

/// Play `frames` frames and collect every event with the frame it fired on
fn play(session: &mut Session, frames: u32, autopilot: bool) -> Vec<(u32, SessionEvent)> {
    let mut events = Vec::new();
    for frame in 0..frames {
        let input = if autopilot {
            autopilot_input(session.round())
        } else {
            RoundInput::default()
        };
        if let Some(event) = session.frame(&input, FRAME_DT) {
            events.push((frame, event));
        }
    }
    events
}

#[test]
fn same_seed_same_history() {
    let mut a = Session::new(2, short_rounds(), 4242);
    let mut b = Session::new(2, short_rounds(), 4242);

    let events_a = play(&mut a, 1_200, true);
    let events_b = play(&mut b, 1_200, true);

    assert!(!events_a.is_empty());
    assert_eq!(events_a, events_b);
    assert_eq!(a.round().lit_count(), b.round().lit_count());
    assert_eq!(a.round().player.pos, b.round().player.pos);
}

#[test]
fn every_ended_round_is_followed_by_one_start() {
    let mut session = Session::new(1, short_rounds(), 9);
    let events = play(&mut session, 60 * 20, false);

    let mut expecting_start = false;
    for (_, event) in &events {
        match event {
            SessionEvent::RoundEnded { .. } => {
                assert!(!expecting_start, "two rounds ended without a start between");
                expecting_start = true;
            }
            SessionEvent::RoundStarted { .. } => {
                assert!(expecting_start, "round started without one ending");
                expecting_start = false;
            }
            SessionEvent::Finished { .. } => panic!("no max level configured"),
        }
    }
    assert!(events.len() >= 4);
}

#[test]
fn idle_player_keeps_replaying_the_same_level() {
    let tuning = Tuning {
        light_decay_rate: 50.0,
        ..short_rounds()
    };
    let mut session = Session::new(3, tuning, 77);
    let events = play(&mut session, 60 * 12, false);

    for (_, event) in &events {
        match event {
            SessionEvent::RoundEnded { level, outcome } => {
                assert_eq!(*level, 3);
                assert_eq!(*outcome, RoundOutcome::Lost);
            }
            SessionEvent::RoundStarted { level } => assert_eq!(*level, 3),
            SessionEvent::Finished { .. } => panic!("lost rounds never finish a session"),
        }
    }
    assert!(session.rounds_started() >= 3);
}

#[test]
fn autopilot_clears_gentle_levels_and_finishes() {
    let tuning = Tuning {
        light_decay_rate: 0.0,
        max_level: Some(2),
        ..short_rounds()
    };
    let mut session = Session::new(1, tuning, 2024);
    let events = play(&mut session, 60 * 30, true);

    let ended: Vec<_> = events
        .iter()
        .filter_map(|(_, e)| match e {
            SessionEvent::RoundEnded { level, outcome } => Some((*level, *outcome)),
            _ => None,
        })
        .collect();
    assert_eq!(ended, vec![(1, RoundOutcome::Won)]);
    assert!(matches!(
        events.last(),
        Some((_, SessionEvent::Finished { level: 2 }))
    ));
    assert!(session.is_finished());
    assert!(session.pending().is_none());
}

#[test]
fn restarting_mid_countdown_drops_the_pending_round() {
    let mut session = Session::new(1, short_rounds(), 5);
    let idle = RoundInput::default();

    let mut frames = 0;
    while !matches!(
        session.frame(&idle, FRAME_DT),
        Some(SessionEvent::RoundEnded { .. })
    ) {
        frames += 1;
        assert!(frames < 60 * 10, "round never ended");
    }
    assert!(session.pending().is_some());

    session.start(6);
    assert!(session.pending().is_none());
    assert_eq!(session.round().level(), 6);
    assert!(!session.round().is_over());

    let later = play(&mut session, 60, false);
    assert!(later.is_empty());
    assert_eq!(session.round().level(), 6);
}

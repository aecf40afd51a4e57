use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use wordquest::engine::{EngineState, RoundEngine};
use wordquest::puzzle::SimpleEntry;
use wordquest::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use wordquest::session::SessionRules;
use wordquest::words::SimpleBank;

// Headless integration using the runtime Runner + RoundEngine without a
// TTY: the same loop shape the binary runs, with a scripted event source.

fn single_word_engine(word: &str, rules: SessionRules) -> RoundEngine {
    let bank = SimpleBank::from_entries(vec![SimpleEntry {
        word: word.to_string(),
        definition: "test word".to_string(),
    }]);
    let mut engine = RoundEngine::new(Box::new(bank), rules);
    engine.start_game();
    engine
}

fn key(c: char) -> GameEvent {
    GameEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

#[test]
fn headless_guess_flow_solves_the_word() {
    let mut engine = single_word_engine("hi", SessionRules::default());

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();
    tx.send(GameEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();

    for _ in 0..100u32 {
        match runner.step() {
            GameEvent::Tick => engine.tick(),
            GameEvent::Resize => {}
            GameEvent::Key(ev) => match ev.code {
                KeyCode::Char(c) => engine.enter_letter(c),
                KeyCode::Enter => engine.submit_guess(),
                _ => {}
            },
        }
        if engine.state == EngineState::Solved {
            break;
        }
    }

    assert_eq!(engine.state, EngineState::Solved);
    assert_eq!(engine.session.score, 1);
    assert_eq!(engine.round.as_ref().unwrap().guess_count, 1);

    // The deferred advance pulls the next word on the following tick.
    engine.tick();
    assert_eq!(engine.state, EngineState::Active);
    assert_eq!(engine.round.as_ref().unwrap().guess_count, 0);
}

#[test]
fn headless_session_times_out_on_ticks_alone() {
    let rules = SessionRules {
        max_time_secs: 3,
        ..SessionRules::default()
    };
    let mut engine = single_word_engine("hello", rules);
    engine.enter_letter('h');

    // No key events queued: every step times out into a Tick.
    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    for _ in 0..10u32 {
        if let GameEvent::Tick = runner.step() {
            engine.tick();
        }
        if engine.state == EngineState::TimedOut {
            break;
        }
    }

    assert_eq!(engine.state, EngineState::TimedOut);
    assert_eq!(engine.session.time_left, 0);
    assert_eq!(engine.remaining_hidden(), 0);

    // Stale ticks after the round ended must not mutate anything.
    engine.tick();
    engine.tick();
    assert_eq!(engine.state, EngineState::TimedOut);
    assert_eq!(engine.session.time_left, 0);
}

#[test]
fn headless_win_ends_the_session_with_share_text() {
    let rules = SessionRules {
        target_score: 1,
        ..SessionRules::default()
    };
    let mut engine = single_word_engine("hi", rules);

    engine.enter_letter('h');
    engine.enter_letter('i');
    engine.submit_guess();

    assert_eq!(engine.state, EngineState::Ended);
    assert!(engine.session.game_won);

    let text = engine.share_text().expect("result should be shareable");
    assert!(text.starts_with("Word Quest"));
    assert!(text.contains("Guesses: 1"));
    assert!(text.contains("Reveals: 0"));

    // Ended accepts only restart.
    engine.enter_letter('x');
    engine.tick();
    assert_eq!(engine.state, EngineState::Ended);
    engine.restart();
    assert_eq!(engine.state, EngineState::Welcome);
    assert_eq!(engine.session.score, 0);
}

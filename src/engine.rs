use crate::round::{Glyph, RoundState, Slot};
use crate::session::{SessionRules, SessionState};
use crate::share;
use crate::words::WordSource;

/// Where the engine is in the round lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineState {
    Welcome,
    Loading,
    Active,
    Solved,
    TimedOut,
    /// Word fetch failed; recoverable, retry is another `load_word`.
    LoadFailed(String),
    Ended,
}

/// Ticks the solved presentation holds before the next word loads.
const ADVANCE_DELAY_TICKS: u8 = 1;

/// Owns the current puzzle, per-round state, and the session spanning
/// rounds. The UI drives it through the operations below and reads the
/// derived queries after each call; nothing else mutates game state.
pub struct RoundEngine {
    source: Box<dyn WordSource>,
    pub rules: SessionRules,
    pub session: SessionState,
    pub state: EngineState,
    pub round: Option<RoundState>,
    /// The countdown only runs once the round sees its first letter or
    /// reveal.
    round_started: bool,
    /// Pending `Solved -> Loading` countdown plus the in-flight guard
    /// that keeps a late duplicate tick from loading twice.
    advance_in: Option<u8>,
    advance_inflight: bool,
    /// Transient invalid-attempt signal for the UI, cleared by the next
    /// accepted input. Never part of authoritative state.
    pub shake: bool,
}

impl RoundEngine {
    pub fn new(source: Box<dyn WordSource>, rules: SessionRules) -> Self {
        let session = SessionState::new(&rules);
        Self {
            source,
            rules,
            session,
            state: EngineState::Welcome,
            round: None,
            round_started: false,
            advance_in: None,
            advance_inflight: false,
            shake: false,
        }
    }

    /// Leave the welcome screen and pull the first word.
    pub fn start_game(&mut self) {
        if self.state != EngineState::Welcome {
            return;
        }
        self.session.game_started = true;
        self.load_word();
    }

    /// Fetch a new puzzle and install a fresh round. On failure nothing
    /// partial is installed; the engine parks in `LoadFailed` until the
    /// player retries.
    pub fn load_word(&mut self) {
        if self.state == EngineState::Ended {
            return;
        }
        self.state = EngineState::Loading;
        self.advance_in = None;
        self.advance_inflight = false;
        match self.source.next_puzzle() {
            Ok(puzzle) => {
                self.round = Some(RoundState::new(puzzle));
                self.round_started = false;
                self.shake = false;
                self.state = EngineState::Active;
            }
            Err(e) => {
                self.round = None;
                self.state = EngineState::LoadFailed(e.to_string());
            }
        }
    }

    /// Type a letter into the first empty slot. Uppercase folds to
    /// lowercase; anything else is silently rejected.
    pub fn enter_letter(&mut self, ch: char) {
        if self.state != EngineState::Active {
            return;
        }
        let ch = ch.to_ascii_lowercase();
        if let Some(round) = self.round.as_mut() {
            if round.enter_letter(ch) {
                self.shake = false;
                self.round_started = true;
            }
        }
    }

    /// Type a letter into a specific slot (UIs that track focus).
    pub fn enter_letter_at(&mut self, pos: usize, ch: char) {
        if self.state != EngineState::Active {
            return;
        }
        let ch = ch.to_ascii_lowercase();
        if let Some(round) = self.round.as_mut() {
            if round.enter_letter_at(pos, ch) {
                self.shake = false;
                self.round_started = true;
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.state != EngineState::Active {
            return;
        }
        if let Some(round) = self.round.as_mut() {
            if round.backspace() {
                self.shake = false;
            }
        }
    }

    /// Disclose one letter per the session's reveal policy. Counts as
    /// activity: starts the countdown like a first letter would.
    pub fn request_reveal(&mut self) {
        if self.state != EngineState::Active {
            return;
        }
        let policy = self.rules.reveal_policy;
        if let Some(round) = self.round.as_mut() {
            if round.reveal(policy).is_some() {
                self.shake = false;
                self.round_started = true;
            }
        }
    }

    /// Check the full guess against the hidden target. With empty slots
    /// left this only raises the shake signal and mutates nothing.
    pub fn submit_guess(&mut self) {
        if self.state != EngineState::Active {
            return;
        }
        let matched = {
            let Some(round) = self.round.as_mut() else {
                return;
            };
            let Some(guess) = round.compose_guess() else {
                self.shake = true;
                return;
            };
            round.guess_count += 1;
            guess == round.puzzle.hidden_target()
        };
        if matched {
            self.shake = false;
            self.round_started = false;
            if self.session.record_solve(&self.rules) {
                self.state = EngineState::Ended;
            } else {
                self.state = EngineState::Solved;
                self.advance_in = Some(ADVANCE_DELAY_TICKS);
                self.advance_inflight = false;
            }
        } else {
            if let Some(round) = self.round.as_mut() {
                round.apply_mismatch();
            }
            self.session.streak = 0;
            self.shake = true;
        }
    }

    /// One-second timer callback. Drives the countdown while a round is
    /// live and the deferred solved-to-next-word transition; a tick in
    /// any other state is a guarded no-op, so a stale or duplicate timer
    /// can never mutate a finished round.
    pub fn tick(&mut self) {
        match self.state {
            EngineState::Active => {
                if self.round_started && self.session.time_left > 0 {
                    self.session.time_left -= 1;
                    if self.session.time_left == 0 {
                        self.timeout();
                    }
                }
            }
            EngineState::Solved => {
                if let Some(n) = self.advance_in {
                    if n > 1 {
                        self.advance_in = Some(n - 1);
                    } else {
                        self.advance_in = None;
                        if !self.advance_inflight {
                            self.advance_inflight = true;
                            self.load_word();
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Abandon the current word for a time penalty and pull a new one.
    /// Neither solved nor failed: counters and streak are untouched. A
    /// penalty that lands exactly on zero takes the timeout path.
    pub fn skip(&mut self) {
        if self.state != EngineState::Active {
            return;
        }
        self.session.time_left = self
            .session
            .time_left
            .saturating_sub(self.rules.skip_penalty_secs);
        if self.session.time_left == 0 {
            self.timeout();
        } else {
            self.load_word();
        }
    }

    /// Move on from the timeout presentation to the terminal screen.
    pub fn acknowledge_timeout(&mut self) {
        if self.state == EngineState::TimedOut {
            self.state = EngineState::Ended;
        }
    }

    /// Reset the session and return to the welcome screen.
    pub fn restart(&mut self) {
        self.session = SessionState::new(&self.rules);
        self.round = None;
        self.round_started = false;
        self.advance_in = None;
        self.advance_inflight = false;
        self.shake = false;
        self.state = EngineState::Welcome;
    }

    fn timeout(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.reveal_all();
        }
        self.round_started = false;
        self.advance_in = None;
        self.state = EngineState::TimedOut;
    }

    // Derived queries; pure reads, recomputed on demand.

    pub fn display_buffer(&self) -> Vec<Slot> {
        self.round
            .as_ref()
            .map(|r| r.display_buffer())
            .unwrap_or_default()
    }

    pub fn is_fully_filled(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.is_fully_filled())
    }

    pub fn remaining_hidden(&self) -> usize {
        self.round.as_ref().map(|r| r.remaining_hidden()).unwrap_or(0)
    }

    pub fn result_glyphs(&self) -> Vec<Glyph> {
        self.round
            .as_ref()
            .map(|r| r.result_glyphs())
            .unwrap_or_default()
    }

    /// Shareable summary, available once the round has a result.
    pub fn share_text(&self) -> Option<String> {
        let round = self.round.as_ref()?;
        match self.state {
            EngineState::Solved | EngineState::TimedOut | EngineState::Ended => Some(
                share::share_text(round.guess_count, round.reveal_count, &round.result_glyphs()),
            ),
            _ => None,
        }
    }
}

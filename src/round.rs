use crate::puzzle::Puzzle;
use crate::session::RevealPolicy;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

/// Per-slot view of the hidden target, derived on demand for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Revealed(char),
    Entered(char),
    Blank,
}

/// Per-position marker for the shareable summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Disclosed via a reveal (or the timeout force-reveal).
    Hinted,
    /// Produced by the player.
    Solved,
}

/// Mutable state for one round of guessing.
///
/// Invariants maintained by every mutator:
/// - `revealed` only holds positions below `hidden_len()`
/// - `hinted` is a subset of `revealed`
/// - `input[i]` is `None` whenever `i` is in `revealed`
#[derive(Debug, Clone)]
pub struct RoundState {
    pub puzzle: Puzzle,
    pub revealed: BTreeSet<usize>,
    /// Positions disclosed without the player producing them. Promotions
    /// from partial credit land in `revealed` but not here.
    pub hinted: BTreeSet<usize>,
    pub input: Vec<Option<char>>,
    pub guess_count: u32,
    pub reveal_count: u32,
}

impl RoundState {
    pub fn new(puzzle: Puzzle) -> Self {
        let len = puzzle.hidden_len();
        Self {
            puzzle,
            revealed: BTreeSet::new(),
            hinted: BTreeSet::new(),
            input: vec![None; len],
            guess_count: 0,
            reveal_count: 0,
        }
    }

    pub fn hidden_len(&self) -> usize {
        self.input.len()
    }

    pub fn is_revealed(&self, pos: usize) -> bool {
        self.revealed.contains(&pos)
    }

    /// Number of positions not yet disclosed.
    pub fn remaining_hidden(&self) -> usize {
        self.hidden_len() - self.revealed.len()
    }

    /// Write a letter into a specific slot. Rejected silently (returning
    /// false) on anything but a single lowercase ascii letter aimed at an
    /// in-range, unrevealed position.
    pub fn enter_letter_at(&mut self, pos: usize, ch: char) -> bool {
        if !ch.is_ascii_lowercase() || pos >= self.hidden_len() || self.is_revealed(pos) {
            return false;
        }
        self.input[pos] = Some(ch);
        true
    }

    /// Auto-advance typing model: the letter lands in the first empty,
    /// unrevealed slot in ascending index order.
    pub fn enter_letter(&mut self, ch: char) -> bool {
        let Some(pos) = (0..self.hidden_len())
            .find(|i| !self.is_revealed(*i) && self.input[*i].is_none())
        else {
            return false;
        };
        self.enter_letter_at(pos, ch)
    }

    /// Clear the last filled, unrevealed slot. No-op when nothing is filled.
    pub fn backspace(&mut self) -> bool {
        let Some(pos) = (0..self.hidden_len())
            .rev()
            .find(|i| !self.is_revealed(*i) && self.input[*i].is_some())
        else {
            return false;
        };
        self.input[pos] = None;
        true
    }

    /// Disclose one hidden letter according to `policy`. Guarded so a
    /// reveal never uncovers the final remaining letter: the player must
    /// always produce at least one. Returns the disclosed position.
    pub fn reveal(&mut self, policy: RevealPolicy) -> Option<usize> {
        if self.remaining_hidden() <= 1 {
            return None;
        }
        let candidates: Vec<usize> = (0..self.hidden_len())
            .filter(|i| !self.is_revealed(*i))
            .collect();
        let pos = match policy {
            RevealPolicy::FirstUnrevealed => *candidates.first()?,
            RevealPolicy::Random => *candidates.choose(&mut rand::thread_rng())?,
        };
        self.disclose(pos);
        self.reveal_count += 1;
        Some(pos)
    }

    /// Force every remaining position open, e.g. when the timer runs out.
    /// Does not count against `reveal_count`.
    pub fn reveal_all(&mut self) {
        for pos in 0..self.hidden_len() {
            if !self.is_revealed(pos) {
                self.disclose(pos);
            }
        }
    }

    fn disclose(&mut self, pos: usize) {
        self.revealed.insert(pos);
        self.hinted.insert(pos);
        self.input[pos] = None;
    }

    /// Full-guess predicate: every slot is either revealed or filled.
    pub fn is_fully_filled(&self) -> bool {
        (0..self.hidden_len()).all(|i| self.is_revealed(i) || self.input[i].is_some())
    }

    /// Overlay revealed letters with the player's input into a complete
    /// guess. Returns None unless `is_fully_filled`.
    pub fn compose_guess(&self) -> Option<String> {
        if !self.is_fully_filled() {
            return None;
        }
        let guess = (0..self.hidden_len())
            .map(|i| {
                if self.is_revealed(i) {
                    self.puzzle.hidden_char(i).unwrap_or(' ')
                } else {
                    self.input[i].unwrap_or(' ')
                }
            })
            .collect();
        Some(guess)
    }

    /// Partial-credit pass after a wrong guess: positions where the player
    /// matched the answer lock into `revealed` (not `hinted`), everything
    /// else clears back to empty for re-entry.
    pub fn apply_mismatch(&mut self) {
        for pos in 0..self.hidden_len() {
            if self.is_revealed(pos) {
                continue;
            }
            if self.input[pos].is_some() && self.input[pos] == self.puzzle.hidden_char(pos) {
                self.revealed.insert(pos);
            }
            self.input[pos] = None;
        }
    }

    /// Per-position render state: true letter when revealed, otherwise the
    /// player's letter or a blank.
    pub fn display_buffer(&self) -> Vec<Slot> {
        (0..self.hidden_len())
            .map(|i| {
                if self.is_revealed(i) {
                    Slot::Revealed(self.puzzle.hidden_char(i).unwrap_or(' '))
                } else {
                    match self.input[i] {
                        Some(c) => Slot::Entered(c),
                        None => Slot::Blank,
                    }
                }
            })
            .collect()
    }

    /// One marker per position for the shareable summary.
    pub fn result_glyphs(&self) -> Vec<Glyph> {
        (0..self.hidden_len())
            .map(|i| {
                if self.hinted.contains(&i) {
                    Glyph::Hinted
                } else {
                    Glyph::Solved
                }
            })
            .collect()
    }
}

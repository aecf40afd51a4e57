use crate::puzzle::{CompoundEntry, Puzzle, SimpleEntry};
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::fmt;

static WORDBANK_DIR: Dir = include_dir!("src/wordbank");

/// Failures while pulling a word from a source. All recoverable: the
/// caller retries by asking again.
#[derive(Debug, Clone, PartialEq)]
pub enum WordSourceError {
    /// Bank file missing or exhausted.
    Missing(String),
    /// Bank file present but not valid JSON of the expected shape.
    Malformed(String),
}

impl fmt::Display for WordSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordSourceError::Missing(what) => write!(f, "no words available: {what}"),
            WordSourceError::Malformed(what) => write!(f, "malformed word bank: {what}"),
        }
    }
}

impl std::error::Error for WordSourceError {}

/// Black-box oracle the engine pulls puzzles from on load/skip/next-round.
pub trait WordSource {
    fn next_puzzle(&mut self) -> Result<Puzzle, WordSourceError>;
}

#[derive(Debug, Deserialize)]
struct SimpleBankFile {
    #[allow(dead_code)]
    name: String,
    entries: Vec<SimpleEntry>,
}

#[derive(Debug, Deserialize)]
struct CompoundBankFile {
    #[allow(dead_code)]
    name: String,
    entries: Vec<CompoundEntry>,
}

fn bank_contents(file_name: &str) -> Result<&'static str, WordSourceError> {
    WORDBANK_DIR
        .get_file(file_name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| WordSourceError::Missing(file_name.to_string()))
}

/// Simple mode: random word plus its definition.
pub struct SimpleBank {
    entries: Vec<SimpleEntry>,
}

impl SimpleBank {
    pub fn embedded() -> Result<Self, WordSourceError> {
        let contents = bank_contents("english.json")?;
        let bank: SimpleBankFile = serde_json::from_str(contents)
            .map_err(|e| WordSourceError::Malformed(e.to_string()))?;
        Ok(Self::from_entries(bank.entries))
    }

    pub fn from_entries(entries: Vec<SimpleEntry>) -> Self {
        Self { entries }
    }
}

impl WordSource for SimpleBank {
    fn next_puzzle(&mut self) -> Result<Puzzle, WordSourceError> {
        let entry = self
            .entries
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| WordSourceError::Missing("empty simple bank".to_string()))?;
        Ok(Puzzle::simple(&entry.word, &entry.definition))
    }
}

/// Compound mode: random compound word with one half shown, chosen by
/// coin flip per round.
pub struct CompoundBank {
    entries: Vec<CompoundEntry>,
}

impl CompoundBank {
    pub fn embedded() -> Result<Self, WordSourceError> {
        let contents = bank_contents("compound.json")?;
        let bank: CompoundBankFile = serde_json::from_str(contents)
            .map_err(|e| WordSourceError::Malformed(e.to_string()))?;
        Ok(Self::from_entries(bank.entries))
    }

    pub fn from_entries(entries: Vec<CompoundEntry>) -> Self {
        Self { entries }
    }
}

impl WordSource for CompoundBank {
    fn next_puzzle(&mut self) -> Result<Puzzle, WordSourceError> {
        let mut rng = rand::thread_rng();
        let entry = self
            .entries
            .choose(&mut rng)
            .ok_or_else(|| WordSourceError::Missing("empty compound bank".to_string()))?;
        let showing_prefix = rng.gen_bool(0.5);
        Ok(Puzzle::compound(
            &entry.prefix,
            &entry.suffix,
            &entry.hint,
            showing_prefix,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_simple_bank_loads() {
        let mut bank = SimpleBank::embedded().unwrap();
        let puzzle = bank.next_puzzle().unwrap();
        assert!(puzzle.hidden_len() > 0);
        assert!(!puzzle.hint().is_empty());
        assert!(puzzle
            .hidden_target()
            .chars()
            .all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn embedded_compound_bank_loads() {
        let mut bank = CompoundBank::embedded().unwrap();
        let puzzle = bank.next_puzzle().unwrap();
        assert!(puzzle.hidden_len() > 0);
        assert!(puzzle.shown_half().is_some());
    }

    #[test]
    fn embedded_compound_halves_concatenate_to_word() {
        let contents = bank_contents("compound.json").unwrap();
        let bank: CompoundBankFile = serde_json::from_str(contents).unwrap();
        for entry in &bank.entries {
            assert_eq!(
                entry.word,
                format!("{}{}", entry.prefix, entry.suffix),
                "bad split for {}",
                entry.word
            );
        }
    }

    #[test]
    fn empty_bank_reports_missing() {
        let mut bank = SimpleBank::from_entries(vec![]);
        assert!(matches!(
            bank.next_puzzle(),
            Err(WordSourceError::Missing(_))
        ));
    }

    #[test]
    fn malformed_bank_reports_malformed() {
        let result = serde_json::from_str::<SimpleBankFile>("{\"name\": 3}")
            .map_err(|e| WordSourceError::Malformed(e.to_string()));
        assert!(matches!(result, Err(WordSourceError::Malformed(_))));
    }
}

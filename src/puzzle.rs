use serde::Deserialize;

/// One record from the simple word bank.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimpleEntry {
    pub word: String,
    pub definition: String,
}

/// One record from the compound word bank; `word` is `prefix` + `suffix`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CompoundEntry {
    pub word: String,
    pub prefix: String,
    pub suffix: String,
    pub hint: String,
}

/// The active puzzle for one round.
///
/// Validation and reveal logic only ever look at the hidden target slice,
/// so both variants share one code path downstream. In compound mode the
/// half that is shown is display-only; the player guesses the other half.
#[derive(Debug, Clone, PartialEq)]
pub enum Puzzle {
    Simple {
        answer: String,
        definition: String,
    },
    Compound {
        prefix: String,
        suffix: String,
        hint: String,
        showing_prefix: bool,
    },
}

impl Puzzle {
    pub fn simple(answer: &str, definition: &str) -> Self {
        Puzzle::Simple {
            answer: answer.to_lowercase(),
            definition: definition.to_string(),
        }
    }

    pub fn compound(prefix: &str, suffix: &str, hint: &str, showing_prefix: bool) -> Self {
        Puzzle::Compound {
            prefix: prefix.to_lowercase(),
            suffix: suffix.to_lowercase(),
            hint: hint.to_string(),
            showing_prefix,
        }
    }

    /// The slice the player has to produce.
    pub fn hidden_target(&self) -> &str {
        match self {
            Puzzle::Simple { answer, .. } => answer,
            Puzzle::Compound {
                prefix,
                suffix,
                showing_prefix,
                ..
            } => {
                if *showing_prefix {
                    suffix
                } else {
                    prefix
                }
            }
        }
    }

    /// The half displayed as a freebie (compound mode only).
    pub fn shown_half(&self) -> Option<&str> {
        match self {
            Puzzle::Simple { .. } => None,
            Puzzle::Compound {
                prefix,
                suffix,
                showing_prefix,
                ..
            } => {
                if *showing_prefix {
                    Some(prefix)
                } else {
                    Some(suffix)
                }
            }
        }
    }

    pub fn hidden_len(&self) -> usize {
        self.hidden_target().chars().count()
    }

    pub fn hidden_char(&self, idx: usize) -> Option<char> {
        self.hidden_target().chars().nth(idx)
    }

    /// Definition or hint text shown alongside the letter boxes.
    pub fn hint(&self) -> &str {
        match self {
            Puzzle::Simple { definition, .. } => definition,
            Puzzle::Compound { hint, .. } => hint,
        }
    }

    /// The complete word, for the round-over reveal.
    pub fn full_word(&self) -> String {
        match self {
            Puzzle::Simple { answer, .. } => answer.clone(),
            Puzzle::Compound { prefix, suffix, .. } => format!("{prefix}{suffix}"),
        }
    }
}

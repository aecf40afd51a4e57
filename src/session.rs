/// How `requestReveal` picks the position to disclose.
///
/// `FirstUnrevealed` is the default: deterministic, matches the scored
/// variant of the game. `Random` picks uniformly among unrevealed
/// positions. Exactly one policy is active per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPolicy {
    FirstUnrevealed,
    Random,
}

/// Tunables that govern a session, fixed at startup from config + CLI.
#[derive(Debug, Clone)]
pub struct SessionRules {
    /// Countdown ceiling in seconds; `time_left` starts here and never
    /// exceeds it.
    pub max_time_secs: u32,
    /// Score at which the session is won.
    pub target_score: u32,
    /// Seconds added back on a correct answer, capped at the ceiling.
    pub solve_bonus_secs: u32,
    /// Seconds deducted for skipping a word, floored at zero.
    pub skip_penalty_secs: u32,
    pub reveal_policy: RevealPolicy,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            max_time_secs: 60,
            target_score: 10,
            solve_bonus_secs: 5,
            skip_penalty_secs: 5,
            reveal_policy: RevealPolicy::FirstUnrevealed,
        }
    }
}

/// State spanning rounds. Reset wholesale by `restart`, never piecemeal.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub score: u32,
    pub streak: u32,
    pub time_left: u32,
    pub game_started: bool,
    pub game_won: bool,
}

impl SessionState {
    pub fn new(rules: &SessionRules) -> Self {
        Self {
            score: 0,
            streak: 0,
            time_left: rules.max_time_secs,
            game_started: false,
            game_won: false,
        }
    }

    /// Credit a solved round and report whether the win threshold is met.
    pub fn record_solve(&mut self, rules: &SessionRules) -> bool {
        self.score += 1;
        self.streak += 1;
        self.time_left = (self.time_left + rules.solve_bonus_secs).min(rules.max_time_secs);
        if self.score >= rules.target_score {
            self.game_won = true;
        }
        self.game_won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_the_ceiling() {
        let rules = SessionRules::default();
        let s = SessionState::new(&rules);
        assert_eq!(s.score, 0);
        assert_eq!(s.streak, 0);
        assert_eq!(s.time_left, 60);
        assert!(!s.game_started);
        assert!(!s.game_won);
    }

    #[test]
    fn solve_bonus_is_capped_at_max_time() {
        let rules = SessionRules::default();
        let mut s = SessionState::new(&rules);
        s.time_left = 58;
        s.record_solve(&rules);
        assert_eq!(s.time_left, 60);
        assert_eq!(s.score, 1);
        assert_eq!(s.streak, 1);
    }

    #[test]
    fn reaching_target_score_wins() {
        let rules = SessionRules {
            target_score: 2,
            ..SessionRules::default()
        };
        let mut s = SessionState::new(&rules);
        assert!(!s.record_solve(&rules));
        assert!(s.record_solve(&rules));
        assert!(s.game_won);
    }
}

use crate::session::{RevealPolicy, SessionRules};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted defaults for a session. CLI flags override these at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub max_time_secs: u32,
    pub target_score: u32,
    pub solve_bonus_secs: u32,
    pub skip_penalty_secs: u32,
    /// "first" or "random"; anything else falls back to "first".
    pub reveal_policy: String,
    pub compound_words: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_time_secs: 60,
            target_score: 10,
            solve_bonus_secs: 5,
            skip_penalty_secs: 5,
            reveal_policy: "first".to_string(),
            compound_words: false,
        }
    }
}

impl Config {
    pub fn reveal_policy(&self) -> RevealPolicy {
        match self.reveal_policy.as_str() {
            "random" => RevealPolicy::Random,
            _ => RevealPolicy::FirstUnrevealed,
        }
    }

    pub fn to_rules(&self) -> SessionRules {
        SessionRules {
            max_time_secs: self.max_time_secs,
            target_score: self.target_score,
            solve_bonus_secs: self.solve_bonus_secs,
            skip_penalty_secs: self.skip_penalty_secs,
            reveal_policy: self.reveal_policy(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "wordquest") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wordquest_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

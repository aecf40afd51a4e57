pub mod config;
pub mod engine;
pub mod puzzle;
pub mod round;
pub mod runtime;
pub mod session;
pub mod share;
pub mod ui;
pub mod words;

use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::engine::{EngineState, RoundEngine};
use crate::runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner};
use crate::words::{CompoundBank, SimpleBank, WordSource};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use webbrowser::Browser;

const TICK_RATE_MS: u64 = 1000;

/// timed word-guessing tui with letter reveals, streaks, and shareable results
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the hidden word from its definition before the clock runs out. Reveal letters when stuck, keep a streak going, and share the result."
)]
pub struct Cli {
    /// seconds on the clock at game start
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// score needed to win the session
    #[clap(short = 't', long)]
    target_score: Option<u32>,

    /// seconds gained per correct word
    #[clap(long)]
    bonus: Option<u32>,

    /// seconds lost when skipping a word
    #[clap(long)]
    skip_penalty: Option<u32>,

    /// how a reveal picks the letter to disclose
    #[clap(short = 'r', long, value_enum)]
    reveal: Option<RevealArg>,

    /// play with compound words: one half shown, guess the other
    #[clap(short = 'c', long)]
    compound: bool,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum RevealArg {
    /// deterministic: always the first unrevealed position
    First,
    /// uniformly random among unrevealed positions
    Random,
}

impl RevealArg {
    fn as_config_str(&self) -> &'static str {
        match self {
            RevealArg::First => "first",
            RevealArg::Random => "random",
        }
    }
}

/// Stored config with CLI overrides applied on top.
fn effective_config(cli: &Cli, stored: Config) -> Config {
    Config {
        max_time_secs: cli.seconds.unwrap_or(stored.max_time_secs),
        target_score: cli.target_score.unwrap_or(stored.target_score),
        solve_bonus_secs: cli.bonus.unwrap_or(stored.solve_bonus_secs),
        skip_penalty_secs: cli.skip_penalty.unwrap_or(stored.skip_penalty_secs),
        reveal_policy: cli
            .reveal
            .map(|r| r.as_config_str().to_string())
            .unwrap_or(stored.reveal_policy),
        compound_words: cli.compound || stored.compound_words,
    }
}

pub struct App {
    pub engine: RoundEngine,
    pub compound: bool,
}

impl App {
    pub fn new(cfg: &Config) -> Result<Self, Box<dyn Error>> {
        let source: Box<dyn WordSource> = if cfg.compound_words {
            Box::new(CompoundBank::embedded()?)
        } else {
            Box::new(SimpleBank::embedded()?)
        };
        Ok(Self {
            engine: RoundEngine::new(source, cfg.to_rules()),
            compound: cfg.compound_words,
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let cfg = effective_config(&cli, store.load());
    if cli.save_config {
        store.save(&cfg)?;
    }
    let mut app = App::new(&cfg)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            GameEvent::Tick => app.engine.tick(),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Routes a key press to the engine. Returns true when the app should
/// quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Esc {
        return true;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.engine.state.clone() {
        EngineState::Welcome => {
            if matches!(key.code, KeyCode::Char('s') | KeyCode::Enter) {
                app.engine.start_game();
            }
        }
        EngineState::Active => match key.code {
            KeyCode::Backspace => app.engine.backspace(),
            KeyCode::Enter => app.engine.submit_guess(),
            KeyCode::Tab => app.engine.request_reveal(),
            KeyCode::Right => app.engine.skip(),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => app.engine.enter_letter(c),
            _ => {}
        },
        EngineState::LoadFailed(_) => {
            if key.code == KeyCode::Char('r') {
                app.engine.load_word();
            }
        }
        EngineState::TimedOut => app.engine.acknowledge_timeout(),
        EngineState::Ended => match key.code {
            KeyCode::Char('r') => app.engine.restart(),
            KeyCode::Char('t') => {
                if let Some(text) = app.engine.share_text() {
                    if Browser::is_available() {
                        let _ = webbrowser::open(&share::tweet_url(&text));
                    }
                }
            }
            _ => {}
        },
        EngineState::Loading | EngineState::Solved => {}
    }
    false
}

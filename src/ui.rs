use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::engine::EngineState;
use crate::round::Slot;
use crate::share;
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.engine.state {
            EngineState::Welcome => render_welcome(self, area, buf),
            EngineState::Loading => render_centered_note("loading word...", area, buf),
            EngineState::LoadFailed(msg) => render_load_failed(msg, area, buf),
            EngineState::Active | EngineState::Solved => render_round(self, area, buf),
            EngineState::TimedOut => render_timed_out(self, area, buf),
            EngineState::Ended => render_ended(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn render_centered_note(note: &str, area: Rect, buf: &mut Buffer) {
    let chunks = vertical_center(area, 1);
    Paragraph::new(Span::styled(note, dim().patch(bold())))
        .alignment(Alignment::Center)
        .render(chunks, buf);
}

fn vertical_center(area: Rect, content_height: u16) -> Rect {
    let pad = area.height.saturating_sub(content_height) / 2;
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(content_height),
            Constraint::Min(0),
        ])
        .split(area)[1]
}

fn render_welcome(app: &App, area: Rect, buf: &mut Buffer) {
    let rules = &app.engine.rules;
    let mode = if app.compound {
        "compound words"
    } else {
        "words and definitions"
    };
    let lines = vec![
        Line::from(Span::styled("WORDQUEST", bold().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "guess the hidden word before the clock runs out",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{mode} | {}s on the clock | first to {} wins",
                rules.max_time_secs, rules.target_score
            ),
            dim(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("press ", dim()),
            Span::styled("s", bold()),
            Span::styled(" to start, ", dim()),
            Span::styled("esc", bold()),
            Span::styled(" to quit", dim()),
        ]),
    ];
    let rect = vertical_center(area, lines.len() as u16);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(rect, buf);
}

fn render_load_failed(msg: &str, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            format!("couldn't load a word: {msg}"),
            bold().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("press ", dim()),
            Span::styled("r", bold()),
            Span::styled(" to retry, ", dim()),
            Span::styled("esc", bold()),
            Span::styled(" to quit", dim()),
        ]),
    ];
    let rect = vertical_center(area, lines.len() as u16);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(rect, buf);
}

/// The letter row: revealed letters in yellow, typed letters in white,
/// blanks as underscores. In compound mode the shown half flanks the
/// boxes as plain dim text.
fn letter_row(app: &App) -> Line<'static> {
    let revealed_style = bold().fg(Color::Yellow);
    let entered_style = bold();
    let blank_style = dim();

    let mut spans: Vec<Span> = Vec::new();
    let shown = app
        .engine
        .round
        .as_ref()
        .and_then(|r| r.puzzle.shown_half().map(str::to_string));
    let shown_first = app
        .engine
        .round
        .as_ref()
        .map(|r| matches!(&r.puzzle, crate::puzzle::Puzzle::Compound { showing_prefix: true, .. }))
        .unwrap_or(false);

    if shown_first {
        if let Some(half) = &shown {
            spans.push(Span::styled(format!("{half} "), dim()));
        }
    }
    for (i, slot) in app.engine.display_buffer().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(match slot {
            Slot::Revealed(c) => Span::styled(c.to_string(), revealed_style),
            Slot::Entered(c) => Span::styled(c.to_string(), entered_style),
            Slot::Blank => Span::styled("_".to_string(), blank_style),
        });
    }
    if !shown_first {
        if let Some(half) = &shown {
            spans.push(Span::styled(format!(" {half}"), dim()));
        }
    }
    Line::from(spans)
}

fn render_round(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;
    let hint = engine
        .round
        .as_ref()
        .map(|r| r.puzzle.hint().to_string())
        .unwrap_or_default();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let hint_lines = ((hint.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),          // top padding
            Constraint::Length(hint_lines),
            Constraint::Length(1),       // spacer
            Constraint::Length(1),       // letter boxes
            Constraint::Length(1),       // spacer
            Constraint::Length(1),       // score line
            Constraint::Length(1),       // timer gauge
            Constraint::Length(1),       // message
            Constraint::Min(1),          // bottom padding
            Constraint::Length(1),       // help
        ])
        .split(area);

    Paragraph::new(Span::styled(
        hint,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[1], buf);

    Paragraph::new(letter_row(app))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let (guesses, reveals) = engine
        .round
        .as_ref()
        .map(|r| (r.guess_count, r.reveal_count))
        .unwrap_or((0, 0));
    Paragraph::new(Span::styled(
        format!(
            "score {}/{}   streak {}   guesses {}   reveals {}",
            engine.session.score,
            engine.rules.target_score,
            engine.session.streak,
            guesses,
            reveals
        ),
        dim(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    let ratio = f64::from(engine.session.time_left) / f64::from(engine.rules.max_time_secs.max(1));
    Gauge::default()
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}s", engine.session.time_left))
        .gauge_style(Style::default().fg(if engine.session.time_left <= 10 {
            Color::Red
        } else {
            Color::Green
        }))
        .render(chunks[6], buf);

    let message = if engine.state == EngineState::Solved {
        Span::styled("correct!", bold().fg(Color::Green))
    } else if engine.shake {
        Span::styled("not quite, try again", bold().fg(Color::Red))
    } else {
        Span::styled("type a letter to start the clock", dim())
    };
    Paragraph::new(message)
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

    Paragraph::new(Span::styled(
        "type to fill | backspace erase | tab reveal | enter submit | \u{2192} skip | esc quit",
        dim(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[9], buf);
}

fn render_timed_out(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;
    let word = engine
        .round
        .as_ref()
        .map(|r| r.puzzle.full_word())
        .unwrap_or_default();
    let (guesses, reveals) = engine
        .round
        .as_ref()
        .map(|r| (r.guess_count, r.reveal_count))
        .unwrap_or((0, 0));

    let lines = vec![
        Line::from(Span::styled("time's up!", bold().fg(Color::Red))),
        Line::from(""),
        Line::from(vec![
            Span::styled("the word was: ", dim()),
            Span::styled(word, bold().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(share::glyph_line(&engine.result_glyphs())),
        Line::from(Span::styled(
            format!("guesses {guesses}   reveals {reveals}"),
            dim(),
        )),
        Line::from(""),
        Line::from(Span::styled("press any key to continue", dim())),
    ];
    let rect = vertical_center(area, lines.len() as u16);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(rect, buf);
}

fn render_ended(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;
    let headline = if engine.session.game_won {
        Span::styled("you won! 🎉", bold().fg(Color::Green))
    } else {
        Span::styled("game over", bold().fg(Color::Red))
    };

    let mut lines = vec![
        Line::from(headline),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "final score {}   streak {}",
                engine.session.score, engine.session.streak
            ),
            bold(),
        )),
    ];
    if !engine.result_glyphs().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(share::glyph_line(&engine.result_glyphs())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("r", bold()),
        Span::styled(" restart | ", dim()),
        Span::styled("t", bold()),
        Span::styled(" share | ", dim()),
        Span::styled("esc", bold()),
        Span::styled(" quit", dim()),
    ]));

    let rect = vertical_center(area, lines.len() as u16);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(rect, buf);
}

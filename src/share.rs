use crate::round::Glyph;
use itertools::Itertools;

pub const SHARE_TITLE: &str = "Word Quest 🎯";

/// One glyph per hidden position: yellow for hint-revealed, green for
/// player-solved. Format is copied verbatim by the presentation layer,
/// so keep it stable.
pub fn glyph_line(glyphs: &[Glyph]) -> String {
    glyphs
        .iter()
        .map(|g| match g {
            Glyph::Hinted => "🟨",
            Glyph::Solved => "🟩",
        })
        .join("")
}

/// The full shareable summary: title, stat lines, glyph row.
pub fn share_text(guess_count: u32, reveal_count: u32, glyphs: &[Glyph]) -> String {
    format!(
        "{SHARE_TITLE}\nGuesses: {guess_count}\nReveals: {reveal_count}\n{}",
        glyph_line(glyphs)
    )
}

/// Prefilled tweet intent URL for the share text.
pub fn tweet_url(text: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}",
        percent_encode(text)
    )
}

fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

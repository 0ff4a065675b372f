pub mod layout;
mod entry;
mod quiz;
mod summary;

pub use entry::{draw_loading, draw_word_entry};
pub use layout::{calculate_quiz_chunks, calculate_summary_chunks};
pub use quiz::draw_quiz;
pub use summary::draw_summary;

use crate::AppState;
use crate::models::Tone;
use crate::session::DrillApp;
use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

pub fn draw(f: &mut Frame, app: &DrillApp) {
    match app.app_state() {
        AppState::WordEntry => draw_word_entry(f, app),
        AppState::Loading => draw_loading(f, app),
        AppState::Quiz => draw_quiz(f, app),
        AppState::Summary => draw_summary(f, app),
    }
}

pub(crate) fn key_hint(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

pub(crate) fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::White,
        Tone::Good => Color::Green,
        Tone::Partial => Color::Yellow,
        Tone::Bad => Color::Red,
    }
}

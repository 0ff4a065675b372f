use crate::models::FinalTally;
use crate::session::DrillApp;
use crate::ui::key_hint;
use crate::ui::layout::calculate_summary_chunks;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn word_list_line(words: &[String], color: Color) -> Line<'static> {
    let style = if words.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(color)
    };
    Line::from(Span::styled(FinalTally::render_list(words), style))
}

pub fn draw_summary(f: &mut Frame, app: &DrillApp) {
    let layout = calculate_summary_chunks(f.area());
    let Some(tally) = app.session.final_tally() else {
        return;
    };

    let title = Paragraph::new("Final Score")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let score_text = vec![
        Line::from(format!("Correct: {}", tally.correct)),
        Line::from(format!("Incorrect: {}", tally.incorrect)),
    ];
    let score = Paragraph::new(score_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, layout.score_area);

    let mut words_text = Text::default();
    words_text.push_line(Line::from(Span::styled(
        "Correct Words:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    words_text.push_line(word_list_line(&tally.correct_words, Color::Green));
    words_text.push_line(Line::from(""));
    words_text.push_line(Line::from(Span::styled(
        "Incorrect Words:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    words_text.push_line(word_list_line(&tally.incorrect_words, Color::Red));

    let words = Paragraph::new(words_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(words, layout.words_area);

    let help_text = vec![Line::from(vec![
        key_hint("r/Enter"),
        Span::from(" Start Over  "),
        key_hint("Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

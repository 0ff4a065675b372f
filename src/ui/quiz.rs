use crate::models::Phase;
use crate::session::DrillApp;
use crate::ui::layout::calculate_quiz_chunks;
use crate::ui::{key_hint, tone_color};
use crate::utils::{input_window, truncate_string};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

// "(•) 1. "
const OPTION_PREFIX_WIDTH: usize = 7;

pub fn draw_quiz(f: &mut Frame, app: &DrillApp) {
    let layout = calculate_quiz_chunks(f.area());
    let session = &app.session;

    let progress = format!(
        "Word {} / {}  -  {}",
        (session.current_index() + 1).min(session.total_words()),
        session.total_words(),
        session.score().display()
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut feedback_text = Text::default();
    if let Some(feedback) = session.feedback() {
        feedback_text.push_line(Line::from(Span::styled(
            feedback.message.as_str(),
            Style::default()
                .fg(tone_color(feedback.tone))
                .add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(notice) = &app.notice {
        feedback_text.push_line(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        )));
    }
    let feedback = Paragraph::new(feedback_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Feedback"));
    f.render_widget(feedback, layout.feedback_area);

    match session.phase() {
        Phase::AwaitingSpelling => {
            let inner_width = layout.answer_area.width.saturating_sub(2) as usize;
            let (visible, cursor_col) =
                input_window(&app.input.text, app.input.cursor, inner_width);
            let answer = Paragraph::new(if app.input.text.is_empty() {
                "[Type the word you heard...]".to_string()
            } else {
                visible
            })
            .block(Block::default().borders(Borders::ALL).title("Your Spelling"));
            f.render_widget(answer, layout.answer_area);
            f.set_cursor_position((
                layout.answer_area.x + 1 + cursor_col as u16,
                layout.answer_area.y + 1,
            ));
        }
        Phase::AwaitingMeaning | Phase::RoundResult => {
            let round = session.round();
            let mut text = Text::default();
            let option_width = (layout.answer_area.width.saturating_sub(2) as usize)
                .saturating_sub(OPTION_PREFIX_WIDTH);
            if let Some(question) = &round.question {
                let revealed = session.phase() == Phase::RoundResult;
                for (i, option) in question.options.iter().enumerate() {
                    let selected = round.selected == Some(i);
                    let marker = if selected { "(•)" } else { "( )" };
                    let mut style = Style::default();
                    if selected {
                        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                    }
                    if revealed && *option == question.correct_meaning {
                        style = style.fg(Color::Green);
                    }
                    text.push_line(Line::from(Span::styled(
                        format!(
                            "{} {}. {}",
                            marker,
                            i + 1,
                            truncate_string(option, option_width)
                        ),
                        style,
                    )));
                    text.push_line(Line::from(""));
                }
            }
            let options = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("What does it mean?"));
            f.render_widget(options, layout.answer_area);
        }
        _ => {}
    }

    let mut basic_spans = Vec::new();
    match session.phase() {
        Phase::AwaitingSpelling => basic_spans.extend([
            key_hint("Enter"),
            Span::from(" Check Spelling  "),
            key_hint("Ctrl+R"),
            Span::from(" Repeat Word  "),
        ]),
        Phase::AwaitingMeaning => basic_spans.extend([
            key_hint("↑/↓ 1-3"),
            Span::from(" Choose  "),
            key_hint("Enter"),
            Span::from(" Submit Meaning  "),
            key_hint("Ctrl+R"),
            Span::from(" Repeat Word  "),
        ]),
        Phase::RoundResult => basic_spans.extend([key_hint("Enter/n"), Span::from(" Next Word  ")]),
        _ => {}
    }
    basic_spans.extend([key_hint("Esc"), Span::from(" Quit to Word List")]);

    let help_text = vec![
        Line::from(basic_spans),
        Line::from(vec![key_hint("Ctrl+C"), Span::from(" Exit App")]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

use crate::session::DrillApp;
use crate::ui::key_hint;
use crate::utils::input_window;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

fn draw_title(f: &mut Frame, area: ratatui::layout::Rect) {
    let title = Paragraph::new("Vocab Drill v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

pub fn draw_word_entry(f: &mut Frame, app: &DrillApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0]);

    let instructions = Paragraph::new("Enter Spanish words separated by commas.")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(instructions, chunks[1]);

    let input_area = chunks[2];
    let inner_width = input_area.width.saturating_sub(2) as usize;
    let (visible, cursor_col) = input_window(&app.input.text, app.input.cursor, inner_width);
    let input = if app.input.text.is_empty() {
        Paragraph::new(Span::styled(
            "[gato, perro, casa...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(visible)
    };
    f.render_widget(
        input.block(Block::default().borders(Borders::ALL).title("Words")),
        input_area,
    );
    f.set_cursor_position((
        input_area.x + 1 + cursor_col as u16,
        input_area.y + 1,
    ));

    if let Some(notice) = &app.notice {
        let notice = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(notice, chunks[3]);
    }

    let help_text = vec![Line::from(vec![
        key_hint("Enter"),
        Span::from(" Start  "),
        key_hint("←/→"),
        Span::from(" Move  "),
        key_hint("Esc/Ctrl+C"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}

pub fn draw_loading(f: &mut Frame, app: &DrillApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0]);

    let (done, total) = app.loading_progress;
    let message = Paragraph::new(format!("Fetching definitions... {}/{}", done, total))
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[1]);

    let ratio = if total == 0 {
        0.0
    } else {
        (done as f64 / total as f64).clamp(0.0, 1.0)
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio);
    f.render_widget(gauge, chunks[2]);

    let help_text = vec![Line::from(vec![
        key_hint("Esc"),
        Span::from(" Cancel  "),
        key_hint("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}

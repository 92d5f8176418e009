mod big_text;
mod buttons;
pub mod helpers;

use crate::app::{App, Control};
use big_text::{BigText, GLYPH_HEIGHT};
use buttons::{render_button_row, Button};
use helpers::{centered_rect, phase_color, phase_icon, section_heading};
use midboss_core::models::{Preset, ALERT_THRESHOLD_SECONDS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(GLYPH_HEIGHT + 4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title_bar(f, chunks[0]);
    draw_preset_row(f, app, chunks[1]);
    draw_countdown(f, app, chunks[2]);
    draw_action_row(f, app, chunks[3]);
    draw_reset_row(f, app, chunks[4]);
    draw_status_bar(f, app, chunks[5]);

    if app.show_help {
        draw_help_modal(f);
    }
}

fn draw_title_bar(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "⏳ MidBoss Timer ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ [?]Help │ [q]Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(title, area);
}

fn button_for<'a>(app: &App, control: Control, shortcut: &'a str) -> Button<'a> {
    let snapshot = app.snapshot();
    Button::new(control.label(), shortcut)
        .focused(app.focused_control() == control)
        .enabled(control.is_enabled(&snapshot))
}

fn draw_preset_row(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_preset();
    let shortcuts: Vec<String> = Preset::ALL.iter().map(|p| p.shortcut().to_string()).collect();

    let buttons: Vec<Button> = Preset::ALL
        .iter()
        .zip(&shortcuts)
        .map(|(preset, shortcut)| {
            button_for(app, Control::Preset(*preset), shortcut).active(selected == Some(*preset))
        })
        .collect();

    render_button_row(f, area, &buttons, 2);
}

fn draw_countdown(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let phase = snapshot.phase();
    let color = if snapshot.running && snapshot.remaining_seconds <= ALERT_THRESHOLD_SECONDS {
        Color::Red
    } else {
        phase_color(phase)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} ", phase_icon(phase), phase.as_str()))
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(GLYPH_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let display = snapshot.display();
    let big = BigText::new(&display).style(Style::default().fg(color));
    let digits_area = centered_rect(rows[1], big.width(), GLYPH_HEIGHT);
    f.render_widget(big, digits_area);

    let caption = match snapshot.selected_seconds {
        0 => "Pick a preset to begin".to_string(),
        selected => format!("{} │ {} of {}", display, phase.as_str(), preset_caption(selected)),
    };
    f.render_widget(
        Paragraph::new(caption).alignment(Alignment::Center),
        rows[2],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .ratio(snapshot.progress())
        .label(format!("{:.0}%", snapshot.progress() * 100.0));
    f.render_widget(gauge, rows[3]);
}

fn preset_caption(selected_seconds: u64) -> String {
    match Preset::from_seconds(selected_seconds) {
        Some(preset) => preset.label().to_string(),
        None => format!("{}s", selected_seconds),
    }
}

fn draw_action_row(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts: Vec<String> = Control::ACTIONS.iter().map(|c| c.shortcut()).collect();
    let buttons: Vec<Button> = Control::ACTIONS
        .iter()
        .zip(&shortcuts)
        .map(|(control, shortcut)| button_for(app, *control, shortcut))
        .collect();

    render_button_row(f, area, &buttons, 2);
}

fn draw_reset_row(f: &mut Frame, app: &App, area: Rect) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(area);

    let shortcut = Control::Reset.shortcut();
    button_for(app, Control::Reset, &shortcut).render(f, row[1]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let content = if app.status_message.is_empty() {
        Span::raw("[5/6/7]Preset • [Space]Start/Pause • [x]Stop • [r]Reset • [←→]Focus")
    } else {
        let bg_color = if app.status_message.contains("TIME'S UP") {
            Color::Magenta
        } else {
            Color::Yellow
        };
        Span::styled(
            format!(" {} ", app.status_message),
            Style::default().fg(Color::Black).bg(bg_color),
        )
    };

    let status = Paragraph::new(Line::from(content))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}

fn draw_help_modal(f: &mut Frame) {
    let modal_area = centered_rect(f.area(), 56, 18);
    f.render_widget(Clear, modal_area);

    let help_text = vec![
        section_heading("  PRESETS"),
        Line::from("    [7] [6] [5]    Select a 7, 6 or 5 minute countdown"),
        Line::from(""),
        section_heading("  COUNTDOWN"),
        Line::from("    [s]            Start / resume"),
        Line::from("    [p]            Pause"),
        Line::from("    [Space]        Start or pause"),
        Line::from("    [x]            Stop and rewind"),
        Line::from("    [r]            Reset selection"),
        Line::from(""),
        section_heading("  NAVIGATION"),
        Line::from("    [←/→] [Tab]    Move button focus"),
        Line::from("    [Enter]        Press focused button"),
        Line::from("    [q] [Esc]      Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close this help",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("❓ Help")
                .border_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .style(Style::default().bg(Color::Black));

    f.render_widget(help_paragraph, modal_area);
}

//! Button rendering utilities

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct Button<'a> {
    pub label: &'a str,
    pub shortcut: &'a str,
    pub focused: bool,
    pub enabled: bool,
    pub active: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, shortcut: &'a str) -> Self {
        Self {
            label,
            shortcut,
            focused: false,
            enabled: true,
            active: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Marks a toggle-style button (the chosen preset) as on.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn style(&self) -> Style {
        if !self.enabled {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if self.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text = format!(" [{}] {} ", self.shortcut, self.label);
        let button = Paragraph::new(text)
            .style(self.style())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));

        f.render_widget(button, area);
    }
}

pub fn render_button_row(f: &mut Frame, area: Rect, buttons: &[Button], spacing: u16) {
    let button_count = buttons.len();
    if button_count == 0 {
        return;
    }

    let mut constraints = Vec::new();
    for i in 0..button_count {
        constraints.push(Constraint::Ratio(1, button_count as u32));
        if i < button_count - 1 && spacing > 0 {
            constraints.push(Constraint::Length(spacing));
        }
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let step = if spacing > 0 { 2 } else { 1 };
    for (i, button) in buttons.iter().enumerate() {
        button.render(f, chunks[i * step]);
    }
}

use midboss_core::models::TimerPhase;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn phase_color(phase: TimerPhase) -> Color {
    match phase {
        TimerPhase::Running => Color::Green,
        TimerPhase::Paused => Color::Yellow,
        TimerPhase::Selected | TimerPhase::Idle => Color::Gray,
    }
}

pub fn phase_icon(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Running => "▶",
        TimerPhase::Paused => "⏸",
        TimerPhase::Selected | TimerPhase::Idle => "⏹",
    }
}

pub fn section_heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

//! Reusable UI widgets
//!
//! Building blocks shared by the terminal panels:
//! - Dropdown menu
//! - Text fields and buttons
//! - Status bar
//! - Geometry helpers

use crate::ui::layout::PanelRect;
use crate::ui::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// One dropdown entry: label, hint, enabled
pub struct DropdownEntry<'a> {
    pub label: &'a str,
    pub hint: &'a str,
    pub enabled: bool,
}

/// Render a dropdown menu whose top-left corner is at `anchor`
pub fn render_dropdown(
    frame: &mut Frame,
    entries: &[DropdownEntry],
    cursor: usize,
    theme: &Theme,
    anchor: (u16, u16),
    area: Rect,
) {
    let label_width = entries.iter().map(|e| e.label.len()).max().unwrap_or(0);
    let hint_width = entries.iter().map(|e| e.hint.len()).max().unwrap_or(0);
    let width = (label_width + hint_width + 6) as u16;
    let height = entries.len() as u16 + 2;

    let menu_area = Rect {
        x: anchor.0,
        y: anchor.1,
        width,
        height,
    }
    .intersection(area);
    if menu_area.is_empty() {
        return;
    }

    frame.render_widget(Clear, menu_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.menu_item());
    let inner = block.inner(menu_area);
    frame.render_widget(block, menu_area);

    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let (label_style, hint_style) = if !entry.enabled {
                (theme.menu_disabled(), theme.menu_disabled())
            } else if i == cursor {
                (theme.selected(), theme.selected())
            } else {
                (theme.menu_item(), theme.menu_hint())
            };
            Line::from(vec![
                Span::styled(format!(" {:<width$}  ", entry.label, width = label_width), label_style),
                Span::styled(format!("{:<width$} ", entry.hint, width = hint_width), hint_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// A labelled single-line text field
pub fn input_line<'a>(
    label: &'a str,
    label_width: usize,
    value: String,
    focused: bool,
    field_width: usize,
    theme: &Theme,
) -> Line<'a> {
    let style = if focused { theme.input_focused() } else { theme.input() };

    // Keep the tail visible when the value is wider than the field
    let cursor = if focused { "_" } else { " " };
    let shown: String = {
        let chars: Vec<char> = value.chars().collect();
        let room = field_width.saturating_sub(1);
        let start = chars.len().saturating_sub(room);
        chars[start..].iter().collect()
    };
    let padded = format!("{}{:<width$}", shown, cursor, width = field_width.saturating_sub(shown.chars().count()));

    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = label_width), theme.text()),
        Span::styled(padded, style),
    ])
}

/// A push button, highlighted when focused
pub fn button_line<'a>(label: &'a str, focused: bool, theme: &Theme) -> Line<'a> {
    let style = if focused { theme.selected() } else { theme.text() };
    Line::from(Span::styled(format!("[{}]", label), style))
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: Span,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: area.height.min(1),
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    // Left side
    let left_widget = Paragraph::new(left_content).style(theme.text_dim());

    // Right side
    let right_len = right_content.width() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: status_area.height,
    };
    let right_widget = Paragraph::new(Line::from(right_content)).style(Style::default());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Place a layout rectangle (in cells) inside `origin`
pub fn to_rect(panel: PanelRect, origin: Rect) -> Rect {
    Rect {
        x: origin.x.saturating_add(panel.x as u16),
        y: origin.y.saturating_add(panel.y as u16),
        width: panel.width as u16,
        height: panel.height as u16,
    }
    .intersection(origin)
}

//! Terminal composition
//!
//! Declares the three panels every frame:
//! - Navigation (menu bar + button column) over the whole screen
//! - Timeline to the right of the button column
//! - Login, on top, while a login is in progress
//!
//! plus the Actions dropdown and a status bar. A panel squeezed off a small
//! terminal is skipped for that frame.

use crate::app::App;
use crate::types::{Focus, LoginField, MenuItem, Panel, LOGIN_PROMPT, MENU_TITLE, NAV_BUTTONS, TIMELINE_POSTS};
use crate::ui::layout::{FramePlan, LayoutProfile, Size};
use crate::ui::{theme::Theme, widgets};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

/// Width of the label column in the login panel
const LOGIN_LABEL_WIDTH: usize = 10;

/// Main render function - entry point for all terminal rendering
pub fn render(frame: &mut Frame, app: &mut App, theme: &Theme) {
    let area = frame.area();

    // Panels above, status bar on the last row
    let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let body = layout[0];

    let display = Size::new(body.width as f32, body.height as f32);
    let plan = FramePlan::begin(&LayoutProfile::TERMINAL, display, app.login_visible());

    render_navigation(frame, app, theme, widgets::to_rect(plan.navigation, body));
    render_timeline(frame, app, theme, widgets::to_rect(plan.timeline, body));
    if let Some(login) = plan.login {
        render_login(frame, app, theme, widgets::to_rect(login, body));
    }
    if app.menu.open {
        render_menu(frame, app, theme, body);
    }

    render_status_bar(frame, app, theme, layout[1]);
}

/// Navigation panel: title, menu bar and the inert button column
fn render_navigation(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if area.is_empty() {
        return;
    }
    let focused = app.focus == Focus::Navigation;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", Panel::Navigation.title()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(if focused { theme.border_focused() } else { theme.border() });

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.is_empty() {
        return;
    }

    // Menu bar
    let menu_style = if app.menu.open { theme.selected() } else { theme.text() };
    let menu_bar = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", MENU_TITLE), menu_style),
        Span::styled("  (m)", theme.text_dim()),
    ]));
    frame.render_widget(menu_bar, Rect { height: 1, ..inner });

    // Button column, one blank row above each button
    let column_width = (LayoutProfile::TERMINAL.nav_column_width() as u16).saturating_sub(inner.x - area.x);
    let column = Rect {
        x: inner.x,
        y: inner.y + 1,
        width: column_width.min(inner.width),
        height: inner.height.saturating_sub(1),
    };

    let mut lines = Vec::with_capacity(NAV_BUTTONS.len() * 2);
    for (i, label) in NAV_BUTTONS.iter().enumerate() {
        lines.push(Line::raw(""));
        lines.push(widgets::button_line(label, focused && i == app.nav_selected, theme));
    }
    frame.render_widget(Paragraph::new(lines).style(theme.text()), column);
}

/// Timeline panel: wrapped placeholder posts with a scrollbar
fn render_timeline(frame: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    if area.is_empty() {
        app.set_timeline_bounds(0);
        return;
    }
    let focused = app.focus == Focus::Timeline;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", Panel::Timeline.title()))
        .title_style(if focused { theme.title() } else { theme.text_dim() })
        .borders(Borders::ALL)
        .border_style(if focused { theme.border_focused() } else { theme.border() });

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    // Leave the rightmost column for the scrollbar
    let text_area = Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    };

    let mut lines = Vec::with_capacity(TIMELINE_POSTS.len() * 2);
    for post in TIMELINE_POSTS {
        lines.push(Line::raw(""));
        lines.push(Line::raw(post));
    }

    let timeline = Paragraph::new(lines)
        .style(theme.text())
        .wrap(Wrap { trim: true });

    let content_height = u16::try_from(timeline.line_count(text_area.width)).unwrap_or(u16::MAX);
    app.set_timeline_bounds(content_height.saturating_sub(text_area.height));

    frame.render_widget(timeline.scroll((app.timeline_scroll, 0)), text_area);

    if app.timeline_max_scroll() > 0 {
        let mut state = ScrollbarState::new(app.timeline_max_scroll() as usize)
            .position(app.timeline_scroll as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            inner,
            &mut state,
        );
    }
}

/// Login panel: prompt, email, masked password and the Login button
fn render_login(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if area.is_empty() {
        return;
    }
    let focused_field = match app.focus {
        Focus::Login(field) => Some(field),
        _ => None,
    };

    frame.render_widget(Clear, area);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", Panel::Login.title()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(if focused_field.is_some() {
            theme.border_focused()
        } else {
            theme.border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_width = (inner.width as usize).saturating_sub(LOGIN_LABEL_WIDTH + 1);
    let session = &app.session;

    let lines = vec![
        Line::raw(""),
        Line::styled(LOGIN_PROMPT, theme.text()),
        Line::raw(""),
        widgets::input_line(
            "Email",
            LOGIN_LABEL_WIDTH,
            session.email.as_str().to_owned(),
            focused_field == Some(LoginField::Email),
            field_width,
            theme,
        ),
        Line::raw(""),
        widgets::input_line(
            "Password",
            LOGIN_LABEL_WIDTH,
            session.password.masked('*'),
            focused_field == Some(LoginField::Password),
            field_width,
            theme,
        ),
        Line::raw(""),
        widgets::button_line(" Login ", focused_field == Some(LoginField::Submit), theme),
    ];

    frame.render_widget(Paragraph::new(lines).style(theme.text()), inner);
}

/// Actions dropdown, opened from the navigation menu bar
fn render_menu(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let logged_in = app.session.is_logged_in();
    let entries: Vec<widgets::DropdownEntry> = MenuItem::all()
        .iter()
        .map(|item| widgets::DropdownEntry {
            label: item.label(),
            hint: item.hint(),
            enabled: item.is_enabled(logged_in),
        })
        .collect();

    widgets::render_dropdown(
        frame,
        &entries,
        app.menu.cursor,
        theme,
        (area.x + 1, area.y + 2),
        area,
    );
}

/// Status bar with keybindings and the session state
fn render_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let hints = if app.menu.open {
        "[j/k] Navigate  [Enter] Select  [Esc] Close"
    } else {
        match app.focus {
            Focus::Navigation => "[j/k] Navigate  [m] Menu  [Tab] Next Panel  [q] Quit",
            Focus::Timeline => "[j/k] Scroll  [PgUp/PgDn] Page  [Tab] Next Panel  [q] Quit",
            Focus::Login(LoginField::Submit) => "[Enter] Login  [Up/Down] Field  [Esc] Leave",
            Focus::Login(_) => "Type to edit  [Enter/Down] Next Field  [Esc] Leave",
        }
    };

    let session = if app.session.is_logged_in() {
        Span::styled("● logged in", theme.success())
    } else if app.session.is_logging_in() {
        Span::styled("○ logging in", theme.warning())
    } else {
        Span::styled("○ logged out", theme.text_dim())
    };

    widgets::render_status_bar(frame, hints, session, theme, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    /// Render one frame and return the screen row by row, one symbol per cell
    fn draw_rows(app: &mut App, width: u16, height: u16) -> Vec<Vec<String>> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::gruvbox();
        terminal.draw(|frame| render(frame, app, &theme)).unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol().to_string()).collect())
            .collect()
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        draw_rows(app, width, height).concat().concat()
    }

    #[test]
    fn test_renders_navigation_and_timeline() {
        let mut app = App::new(Config::default());
        let text = draw(&mut app, 80, 24);

        assert!(text.contains("Actions"));
        assert!(text.contains("Notifs"));
        assert!(text.contains("Settings"));
        assert!(text.contains("Timeline"));
        assert!(!text.contains(LOGIN_PROMPT));
        assert!(app.timeline_max_scroll() > 0);
    }

    #[test]
    fn test_login_panel_follows_session() {
        let mut app = App::new(Config::default());
        app.activate_menu(MenuItem::Login);
        app.session.email.set("a@b.c");
        app.session.password.set("secret");

        let text = draw(&mut app, 80, 24);
        assert!(text.contains(LOGIN_PROMPT));
        assert!(text.contains("a@b.c"));
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));

        assert!(app.submit_login());
        let text = draw(&mut app, 80, 24);
        assert!(!text.contains(LOGIN_PROMPT));
        assert!(text.contains("logged in"));
    }

    #[test]
    fn test_menu_dropdown_lists_hints() {
        let mut app = App::new(Config::default());
        app.open_menu();
        let text = draw(&mut app, 80, 24);
        assert!(text.contains("begin new session"));
        assert!(text.contains("chost like a champ"));
        assert!(text.contains("stop chosting"));
    }

    #[test]
    fn test_narrow_terminal_keeps_navigation() {
        let mut app = App::new(Config::default());
        let text = draw(&mut app, 17, 24);

        assert!(text.contains("Notifs"));
        assert!(!text.contains("Timeline"));
        assert_eq!(app.timeline_max_scroll(), 0);
        assert!(app.is_running());

        // Growing the terminal brings the timeline back
        let text = draw(&mut app, 80, 24);
        assert!(text.contains("Timeline"));
    }

    #[test]
    fn test_tiny_terminal_skips_login() {
        let mut app = App::new(Config::default());
        app.activate_menu(MenuItem::Login);
        // The login origin row is below the body area
        let text = draw(&mut app, 40, 5);
        assert!(!text.contains(LOGIN_PROMPT));
        assert!(app.login_visible());
    }

    #[test]
    fn test_timeline_scrolls_to_last_line() {
        let mut app = App::new(Config::default());
        draw(&mut app, 80, 24);
        let max = app.timeline_max_scroll();
        assert!(max > 0);

        app.scroll_timeline(max as i32);
        let rows = draw_rows(&mut app, 80, 24);

        // 80x24: timeline text spans columns 17..77, its last row is 21
        let last_row: String = rows[21][17..77].concat();
        assert!(last_row.trim_end().ends_with("planet x."), "{last_row:?}");

        // One row less than the maximum leaves the final line below the fold
        app.scroll_timeline(-1);
        let rows = draw_rows(&mut app, 80, 24);
        let last_row: String = rows[21][17..77].concat();
        assert!(!last_row.contains("future for us"), "{last_row:?}");
    }
}

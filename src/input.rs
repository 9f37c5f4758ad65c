//! Keyboard handling for the terminal front end
//!
//! Character cells have no pointer, so every widget interaction of the
//! graphics front end is mapped onto keys here.

use crate::app::App;
use crate::types::{Focus, LoginField, MenuItem, NAV_BUTTONS};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Rows moved by PgUp/PgDn in the timeline
const PAGE_ROWS: i32 = 10;

impl App {
    /// Handle a key event. Returns true for the terminal's close request
    /// (Ctrl+C); everything else is applied to the app directly.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.menu.open {
            self.handle_menu_key(key);
            return false;
        }

        match key.code {
            KeyCode::F(10) => {
                self.open_menu();
                return false;
            }
            KeyCode::Tab => {
                self.focus_next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return false;
            }
            _ => {}
        }

        // Single-letter shortcuts, unless typing into a field
        if !self.focus.is_text_input() {
            match key.code {
                KeyCode::Char('q') => {
                    self.activate_menu(MenuItem::Quit);
                    return false;
                }
                KeyCode::Char('m') => {
                    self.open_menu();
                    return false;
                }
                _ => {}
            }
        }

        match self.focus {
            Focus::Navigation => self.handle_navigation_key(key),
            Focus::Timeline => self.handle_timeline_key(key),
            Focus::Login(field) => self.handle_login_key(field, key),
        }
        false
    }

    /// Open the Actions menu on its first enabled entry
    pub fn open_menu(&mut self) {
        let logged_in = self.session.is_logged_in();
        self.menu.open = true;
        self.menu.cursor = MenuItem::all()
            .iter()
            .position(|item| item.is_enabled(logged_in))
            .unwrap_or(0);
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.menu.open = false,
            KeyCode::Char('j') | KeyCode::Down => self.move_menu_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_menu_cursor(-1),
            KeyCode::Enter => {
                let item = MenuItem::all()[self.menu.cursor];
                if self.activate_menu(item) {
                    self.menu.open = false;
                }
            }
            _ => {}
        }
    }

    /// Step to the next enabled entry in `direction`, wrapping around
    fn move_menu_cursor(&mut self, direction: isize) {
        let items = MenuItem::all();
        let logged_in = self.session.is_logged_in();
        let len = items.len() as isize;
        let mut index = self.menu.cursor as isize;

        for _ in 0..len {
            index = (index + direction).rem_euclid(len);
            if items[index as usize].is_enabled(logged_in) {
                self.menu.cursor = index as usize;
                return;
            }
        }
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.nav_selected < NAV_BUTTONS.len() - 1 {
                    self.nav_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.nav_selected = self.nav_selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.press_nav_button(self.nav_selected),
            _ => {}
        }
    }

    fn handle_timeline_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_timeline(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_timeline(-1),
            KeyCode::PageDown => self.scroll_timeline(PAGE_ROWS),
            KeyCode::PageUp => self.scroll_timeline(-PAGE_ROWS),
            KeyCode::Char('g') | KeyCode::Home => self.timeline_scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.timeline_scroll = self.timeline_max_scroll(),
            _ => {}
        }
    }

    fn handle_login_key(&mut self, field: LoginField, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Navigation,
            KeyCode::Up => self.focus = Focus::Login(field.prev()),
            KeyCode::Down => self.focus = Focus::Login(field.next()),
            KeyCode::Enter => match field {
                LoginField::Submit => {
                    self.submit_login();
                }
                _ => self.focus = Focus::Login(field.next()),
            },
            KeyCode::Backspace => {
                match field {
                    LoginField::Email => self.session.email.pop(),
                    LoginField::Password => self.session.password.pop(),
                    LoginField::Submit => None,
                };
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                match field {
                    LoginField::Email => {
                        self.session.email.push(c);
                    }
                    LoginField::Password => {
                        self.session.password.push(c);
                    }
                    LoginField::Submit => {
                        if c == ' ' {
                            self.submit_login();
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::{RunState, StopReason};

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_ctrl_c_is_close_request() {
        let mut app = App::new(Config::default());
        let close = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(close);
        // The frame loop performs the transition, not the key handler
        assert!(app.is_running());
    }

    #[test]
    fn test_q_quits_outside_text_fields() {
        let mut app = App::new(Config::default());
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.run_state(), RunState::Stopped(StopReason::QuitAction));
    }

    #[test]
    fn test_menu_skips_disabled_post() {
        let mut app = App::new(Config::default());
        press(&mut app, KeyCode::F(10));
        assert!(app.menu.open);
        assert_eq!(MenuItem::all()[app.menu.cursor], MenuItem::Login);

        press(&mut app, KeyCode::Down);
        assert_eq!(MenuItem::all()[app.menu.cursor], MenuItem::Quit);
        press(&mut app, KeyCode::Down);
        assert_eq!(MenuItem::all()[app.menu.cursor], MenuItem::Login);
    }

    #[test]
    fn test_full_login_by_keyboard() {
        let mut app = App::new(Config::default());
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Enter);
        assert!(app.login_visible());
        assert!(!app.menu.open);

        // 'q' is text while a field has focus
        type_text(&mut app, "q@b.c");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "pass word");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Login(LoginField::Submit));
        assert!(app.is_running());
        assert_eq!(app.session.email.as_str(), "q@b.c");
        assert_eq!(app.session.password.as_str(), "password");

        press(&mut app, KeyCode::Enter);
        assert!(app.session.is_logged_in());
        assert!(!app.login_visible());
        assert_eq!(app.focus, Focus::Navigation);

        // Post is now the first enabled entry
        press(&mut app, KeyCode::F(10));
        assert_eq!(MenuItem::all()[app.menu.cursor], MenuItem::Post);
    }

    #[test]
    fn test_submit_with_empty_email_keeps_panel() {
        let mut app = App::new(Config::default());
        app.activate_menu(MenuItem::Login);
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert!(!app.session.is_logged_in());
        assert!(app.login_visible());
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut app = App::new(Config::default());
        app.activate_menu(MenuItem::Login);
        type_text(&mut app, "ab");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.email.as_str(), "a");
    }

    #[test]
    fn test_navigation_cursor_bounds() {
        let mut app = App::new(Config::default());
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.nav_selected, NAV_BUTTONS.len() - 1);
        press(&mut app, KeyCode::Enter);
        assert!(app.is_running());
    }

    #[test]
    fn test_timeline_keys() {
        let mut app = App::new(Config::default());
        app.set_timeline_bounds(30);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Timeline);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.timeline_scroll, 10);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.timeline_scroll, 30);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.timeline_scroll, 0);
    }
}

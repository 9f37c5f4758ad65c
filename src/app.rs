//! Application state
//!
//! This is the core of chostty, shared by both front ends:
//! - Run state (RUNNING / STOPPED)
//! - Session and display settings
//! - Menu, login and timeline interactions
//! - Keyboard focus for the terminal front end

use crate::config::Config;
use crate::session::{DisplaySettings, Session};
use crate::types::{Focus, LoginField, MenuItem, RunState, StopReason, NAV_BUTTONS};
use tracing::{debug, info};

/// Main application state
pub struct App {
    // Core state
    pub config: Config,
    pub session: Session,
    pub display: DisplaySettings,
    run_state: RunState,
    frames: u64,

    // Terminal view state
    pub focus: Focus,
    pub menu: MenuState,
    pub nav_selected: usize,
    pub timeline_scroll: u16,
    timeline_max_scroll: u16,
}

/// Actions menu state (terminal front end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
    pub cursor: usize,
}

impl App {
    /// Create a new App instance
    pub fn new(config: Config) -> Self {
        let display = DisplaySettings::new(config.graphics.font_scale);

        Self {
            config,
            session: Session::new(),
            display,
            run_state: RunState::Running,
            frames: 0,

            focus: Focus::Navigation,
            menu: MenuState::default(),
            nav_selected: 0,
            timeline_scroll: 0,
            timeline_max_scroll: 0,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Move to STOPPED. Only the first call has any effect.
    pub fn stop(&mut self, reason: StopReason) -> bool {
        if !self.is_running() {
            return false;
        }
        info!(reason = reason.as_str(), frames = self.frames, "stopping");
        self.run_state = RunState::Stopped(reason);
        true
    }

    /// Frames composed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub(crate) fn count_frame(&mut self) {
        self.frames += 1;
    }

    pub fn login_visible(&self) -> bool {
        self.session.login_visible()
    }

    /// Activate an Actions menu entry. Disabled entries are ignored.
    pub fn activate_menu(&mut self, item: MenuItem) -> bool {
        if !item.is_enabled(self.session.is_logged_in()) {
            debug!(item = item.label(), "ignored disabled menu item");
            return false;
        }

        match item {
            MenuItem::Login => {
                self.session.begin_login();
                self.focus = Focus::Login(LoginField::Email);
            }
            MenuItem::Post => {
                debug!("post requested");
            }
            MenuItem::Quit => {
                self.stop(StopReason::QuitAction);
            }
        }
        true
    }

    /// Press the login panel's Login button
    pub fn submit_login(&mut self) -> bool {
        let accepted = self.session.submit_login();
        if accepted {
            info!("session started");
            self.sync_focus();
        }
        accepted
    }

    /// Slider callback for the font scale. Returns the value actually stored.
    pub fn set_font_scale(&mut self, value: f32) -> f32 {
        self.display.set_font_scale(value)
    }

    /// Press one of the navigation buttons. They have no effect yet.
    pub fn press_nav_button(&mut self, index: usize) {
        if let Some(label) = NAV_BUTTONS.get(index) {
            debug!(button = *label, "navigation button pressed");
        }
    }

    /// Drop focus from the login panel once it is gone
    pub fn sync_focus(&mut self) {
        if matches!(self.focus, Focus::Login(_)) && !self.login_visible() {
            self.focus = Focus::Navigation;
        }
    }

    /// Cycle focus between the visible panels
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Navigation => Focus::Timeline,
            Focus::Timeline if self.login_visible() => Focus::Login(LoginField::Email),
            Focus::Timeline | Focus::Login(_) => Focus::Navigation,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Navigation if self.login_visible() => Focus::Login(LoginField::Email),
            Focus::Navigation => Focus::Timeline,
            Focus::Timeline => Focus::Navigation,
            Focus::Login(_) => Focus::Timeline,
        };
    }

    /// Upper bound for the timeline scroll offset, set by the renderer
    pub fn set_timeline_bounds(&mut self, max_scroll: u16) {
        self.timeline_max_scroll = max_scroll;
        self.timeline_scroll = self.timeline_scroll.min(max_scroll);
    }

    pub fn timeline_max_scroll(&self) -> u16 {
        self.timeline_max_scroll
    }

    pub fn scroll_timeline(&mut self, delta: i32) {
        let next = (self.timeline_scroll as i32 + delta).clamp(0, self.timeline_max_scroll as i32);
        self.timeline_scroll = next as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn test_stop_happens_once() {
        let mut app = app();
        assert!(app.is_running());
        assert!(app.stop(StopReason::CloseRequested));
        assert!(!app.stop(StopReason::QuitAction));
        assert_eq!(app.run_state(), RunState::Stopped(StopReason::CloseRequested));
    }

    #[test]
    fn test_menu_login_opens_panel() {
        let mut app = app();
        assert!(app.activate_menu(MenuItem::Login));
        assert!(app.login_visible());
        assert_eq!(app.focus, Focus::Login(LoginField::Email));
    }

    #[test]
    fn test_post_disabled_until_logged_in() {
        let mut app = app();
        assert!(!app.activate_menu(MenuItem::Post));

        app.activate_menu(MenuItem::Login);
        app.session.email.set("a@b.c");
        app.session.password.set("x");
        assert!(app.submit_login());

        assert!(app.activate_menu(MenuItem::Post));
        assert!(!app.activate_menu(MenuItem::Login));
        assert!(!app.login_visible());
        assert_eq!(app.focus, Focus::Navigation);
    }

    #[test]
    fn test_quit_action_stops() {
        let mut app = app();
        assert!(app.activate_menu(MenuItem::Quit));
        assert_eq!(app.run_state(), RunState::Stopped(StopReason::QuitAction));
    }

    #[test]
    fn test_font_scale_from_config_is_clamped() {
        let mut config = Config::default();
        config.graphics.font_scale = 0.25;
        let mut app = App::new(config);
        assert_eq!(app.display.font_scale(), 1.0);
        assert_eq!(app.set_font_scale(3.0), 2.0);
    }

    #[test]
    fn test_focus_cycle_skips_hidden_login() {
        let mut app = app();
        app.focus_next();
        assert_eq!(app.focus, Focus::Timeline);
        app.focus_next();
        assert_eq!(app.focus, Focus::Navigation);

        app.session.begin_login();
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus, Focus::Login(LoginField::Email));
        app.focus_prev();
        assert_eq!(app.focus, Focus::Timeline);
    }

    #[test]
    fn test_timeline_scroll_clamped() {
        let mut app = app();
        app.set_timeline_bounds(5);
        app.scroll_timeline(10);
        assert_eq!(app.timeline_scroll, 5);
        app.scroll_timeline(-2);
        assert_eq!(app.timeline_scroll, 3);
        app.set_timeline_bounds(1);
        assert_eq!(app.timeline_scroll, 1);
        app.scroll_timeline(-10);
        assert_eq!(app.timeline_scroll, 0);
    }
}

//! Core data types for chostty
//!
//! Shared enums and static content used by both front ends.

use std::fmt;

/// The three panels declared every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Navigation,
    Timeline,
    Login,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Navigation => "chostty",
            Panel::Timeline => "Timeline",
            Panel::Login => "Login",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Entries of the "Actions" menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Login,
    Post,
    Quit,
}

impl MenuItem {
    pub fn all() -> &'static [MenuItem] {
        &[MenuItem::Login, MenuItem::Post, MenuItem::Quit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Login => "Login",
            MenuItem::Post => "Post",
            MenuItem::Quit => "Quit",
        }
    }

    /// Hint text shown next to the label
    pub fn hint(&self) -> &'static str {
        match self {
            MenuItem::Login => "begin new session",
            MenuItem::Post => "chost like a champ",
            MenuItem::Quit => "stop chosting",
        }
    }

    /// Login is offered only while logged out, Post only while logged in
    pub fn is_enabled(&self, logged_in: bool) -> bool {
        match self {
            MenuItem::Login => !logged_in,
            MenuItem::Post => logged_in,
            MenuItem::Quit => true,
        }
    }
}

/// Inert buttons in the navigation column
pub const NAV_BUTTONS: [&str; 8] = [
    "Notifs",
    "Bookmarks",
    "Search",
    "Profile",
    "Drafts",
    "Following",
    "Followers",
    "Settings",
];

/// Menu title shown in the navigation panel's menu bar
pub const MENU_TITLE: &str = "Actions";

/// Placeholder posts for the timeline panel
pub const TIMELINE_POSTS: [&str; 6] = [
    POST_MATRIX,
    POST_REINCARNATION,
    POST_PLANET_X,
    POST_MATRIX,
    POST_REINCARNATION,
    POST_PLANET_X,
];

const POST_MATRIX: &str = "Im trying to explain how i came to the understanding that this reality here on earth is truly a matrix and that there is a reptilian race from the constellation of astro-world who are controlling virtual reality here on earth.";
const POST_REINCARNATION: &str = "reincarnation here has nothing to do with our spiritual growth from cradle to grave and beyond and were never going to get out of this situation without planet x. planet x is not a catastrophe, it is a prison break.";
const POST_PLANET_X: &str = "the force of this planet as it tears apart the electro-magnetic force field that surrounds the earth will finally reveal the matrix and everyone is going to see it; there will be no doubt, there will be no fighting over belief systems, we are going to have all of the masks pulled away. that is the future for us with planet x.";

/// Prompt at the top of the login panel
pub const LOGIN_PROMPT: &str = "Please enter your email and password:";

/// Why the frame loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Window close event (or Ctrl+C in a terminal)
    CloseRequested,
    /// "Quit" from the Actions menu
    QuitAction,
    /// The navigation panel could not begin
    PanelClosed,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::CloseRequested => "close requested",
            StopReason::QuitAction => "quit action",
            StopReason::PanelClosed => "navigation panel closed",
        }
    }
}

/// Frame loop state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Stopped(StopReason),
}

/// Keyboard focus in the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Navigation,
    Timeline,
    Login(LoginField),
}

impl Focus {
    /// Whether typed characters go into a text field
    pub fn is_text_input(&self) -> bool {
        matches!(self, Focus::Login(LoginField::Email | LoginField::Password))
    }
}

/// Focusable widgets of the login panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    Submit,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Submit,
            LoginField::Submit => LoginField::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginField::Email => LoginField::Submit,
            LoginField::Password => LoginField::Email,
            LoginField::Submit => LoginField::Password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_gating() {
        assert!(MenuItem::Login.is_enabled(false));
        assert!(!MenuItem::Login.is_enabled(true));
        assert!(!MenuItem::Post.is_enabled(false));
        assert!(MenuItem::Post.is_enabled(true));
        assert!(MenuItem::Quit.is_enabled(false));
        assert!(MenuItem::Quit.is_enabled(true));
    }

    #[test]
    fn test_login_field_cycle() {
        let field = LoginField::Email;
        assert_eq!(field.next(), LoginField::Password);
        assert_eq!(field.next().next(), LoginField::Submit);
        assert_eq!(field.next().next().next(), LoginField::Email);
        assert_eq!(field.prev(), LoginField::Submit);
    }

    #[test]
    fn test_text_input_focus() {
        assert!(Focus::Login(LoginField::Email).is_text_input());
        assert!(Focus::Login(LoginField::Password).is_text_input());
        assert!(!Focus::Login(LoginField::Submit).is_text_input());
        assert!(!Focus::Timeline.is_text_input());
    }
}

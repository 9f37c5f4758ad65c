//! Session state for chostty
//!
//! Everything here lives in memory for the lifetime of the process:
//! - Login flags (`logging_in`, `logged_in`)
//! - Bounded credential buffers
//! - Display settings (font scale)

use tracing::debug;

/// Size of a credential buffer, terminator included
pub const CREDENTIAL_CAPACITY: usize = 64;

/// Lowest selectable font scale
pub const FONT_SCALE_MIN: f32 = 1.0;
/// Highest selectable font scale
pub const FONT_SCALE_MAX: f32 = 2.0;
/// Font scale used when nothing else is configured
pub const FONT_SCALE_DEFAULT: f32 = 2.0;

/// Which characters a text buffer accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharFilter {
    #[default]
    Any,
    /// Rejects spaces, tabs and any other whitespace
    NoBlank,
}

impl CharFilter {
    fn accepts(&self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        match self {
            CharFilter::Any => true,
            CharFilter::NoBlank => !c.is_whitespace(),
        }
    }
}

/// Text buffer with a fixed byte budget.
///
/// `N` counts a trailing terminator the way a C buffer would, so at most
/// `N - 1` bytes of UTF-8 are stored. Characters are never split: input that
/// does not fit is dropped from the first character that would overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedText<const N: usize> {
    text: String,
    filter: CharFilter,
}

impl<const N: usize> BoundedText<N> {
    pub fn new(filter: CharFilter) -> Self {
        Self {
            text: String::with_capacity(N),
            filter,
        }
    }

    /// Maximum number of bytes the buffer holds
    pub const fn max_len() -> usize {
        N.saturating_sub(1)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append one character. Returns false if it was filtered or did not fit.
    pub fn push(&mut self, c: char) -> bool {
        if !self.filter.accepts(c) {
            return false;
        }
        if self.text.len() + c.len_utf8() > Self::max_len() {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Append as much of `s` as fits, skipping filtered characters.
    /// Returns the number of characters accepted.
    pub fn push_str(&mut self, s: &str) -> usize {
        let mut accepted = 0;
        for c in s.chars() {
            if !self.filter.accepts(c) {
                continue;
            }
            if !self.push(c) {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Replace the contents with `s`, subject to the same limits as `push_str`
    pub fn set(&mut self, s: &str) {
        self.text.clear();
        self.push_str(s);
    }

    /// One mask character per stored character
    pub fn masked(&self, mask: char) -> String {
        self.text.chars().map(|_| mask).collect()
    }
}

/// Credential buffer used by the login panel
pub type Credential = BoundedText<CREDENTIAL_CAPACITY>;

/// Login state of the mock client
#[derive(Debug, Clone)]
pub struct Session {
    logged_in: bool,
    logging_in: bool,
    pub email: Credential,
    pub password: Credential,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            logged_in: false,
            logging_in: false,
            email: Credential::new(CharFilter::Any),
            password: Credential::new(CharFilter::NoBlank),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_logging_in(&self) -> bool {
        self.logging_in
    }

    /// The login panel is only declared while a login is in progress
    pub fn login_visible(&self) -> bool {
        self.logging_in && !self.logged_in
    }

    /// Start a login. Does nothing once logged in.
    pub fn begin_login(&mut self) -> bool {
        if self.logged_in {
            return false;
        }
        if !self.logging_in {
            debug!("login panel opened");
        }
        self.logging_in = true;
        true
    }

    /// Whether the Login button would succeed right now
    pub fn can_submit(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    /// Press the Login button.
    ///
    /// Succeeds iff the login panel is visible and both fields hold text.
    /// No credentials are checked anywhere.
    pub fn submit_login(&mut self) -> bool {
        if !self.login_visible() {
            return false;
        }
        if !self.can_submit() {
            debug!(
                email_empty = self.email.is_empty(),
                password_empty = self.password.is_empty(),
                "login rejected"
            );
            return false;
        }
        self.logged_in = true;
        self.logging_in = false;
        debug!("logged in");
        true
    }
}

/// Settings that only the graphics backend exposes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    font_scale: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_scale: FONT_SCALE_DEFAULT,
        }
    }
}

impl DisplaySettings {
    pub fn new(font_scale: f32) -> Self {
        let mut settings = Self::default();
        settings.set_font_scale(font_scale);
        settings
    }

    pub fn font_scale(&self) -> f32 {
        self.font_scale
    }

    /// Store a new font scale clamped to the slider range. NaN and infinities
    /// leave the current value untouched. Returns the stored value.
    pub fn set_font_scale(&mut self, value: f32) -> f32 {
        if value.is_finite() {
            self.font_scale = value.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX);
        }
        self.font_scale
    }
}

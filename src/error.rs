//! Per-frame error types
//!
//! Application-level code uses `anyhow`; the frame loop needs to tell a
//! panel that failed to begin apart from everything else.

use crate::types::Panel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    /// The toolkit refused to begin a panel
    #[cfg_attr(not(feature = "graphics"), allow(dead_code))]
    #[error("the {0} panel could not begin")]
    PanelBegin(Panel),

    #[error("display I/O failed")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Only the navigation panel may fail without taking the process down
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FrameError::PanelBegin(Panel::Navigation))
    }
}

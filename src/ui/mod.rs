//! User Interface layer
//!
//! This module contains:
//! - Panel geometry shared by both front ends
//! - Theme definitions and colors (terminal)
//! - Reusable widgets (terminal)
//! - Terminal composition of the panels

pub mod layout;
#[cfg(feature = "terminal")]
pub mod render;
#[cfg(feature = "terminal")]
pub mod theme;
#[cfg(feature = "terminal")]
pub mod widgets;

#[cfg(feature = "terminal")]
pub use render::render;
#[cfg(feature = "terminal")]
pub use theme::Theme;

//! Immediate-mode UI overlay.
//!
//! Wraps egui: context lifetime, winit input, tessellation, and painting into
//! the frame's render pass after the scene draw.

mod overlay;
mod theme;

pub use overlay::UiOverlay;
pub use theme::{Palette, Theme};

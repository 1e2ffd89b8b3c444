//! Prism engine crate.
//!
//! A minimal wgpu application scaffold: window, device and surface bootstrap,
//! swap chain and depth buffer kept in sync with the window size, one fixed
//! pipeline, an egui overlay, and the frame driver that sequences them.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod ui;
pub mod window;

//! The triangle app: one hardcoded triangle and a small egui window.

mod app;

use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::render::{RenderConfig, ShaderSource};
use prism_engine::window::{Runtime, RuntimeConfig};

use crate::app::TriangleApp;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "prism triangle".to_string(),
        canvas_id: cfg!(target_arch = "wasm32").then(|| "prism-canvas".to_string()),
        ..Default::default()
    };

    // No filesystem in the browser.
    let shader = if cfg!(target_arch = "wasm32") {
        ShaderSource::Builtin
    } else {
        ShaderSource::Search("triangle.wgsl".to_string())
    };
    let render = RenderConfig {
        shader,
        ..Default::default()
    };

    let app = TriangleApp::new(render.theme);
    log::info!("starting {}", config.title);
    Runtime::run(config, GpuInit::default(), render, app)
}

//! GPU rendering subsystem.
//!
//! One fixed pipeline draws a hardcoded triangle each frame; the UI overlay is
//! painted into the same pass. Size-dependent targets (swap chain, depth) are
//! rebuilt on every resize, the pipeline never is.

mod config;
mod pipeline;
mod renderables;
mod renderer;
mod shader;
mod targets;

pub use config::RenderConfig;
pub use pipeline::{build_pipeline, PipelineDesc, FRAGMENT_ENTRY, VERTEX_ENTRY};
pub use renderables::{Color, Cube, Line, Mesh, Renderables, Sphere, Tripod};
pub use renderer::Renderer;
pub use shader::{find_shader, find_shader_in, ShaderSource, SHADER_SEARCH_PATHS, TRIANGLE_WGSL};
pub use targets::{Extent, FrameTargets, RenderTargets, ResourceFactory};

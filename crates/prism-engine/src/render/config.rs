use crate::ui::Theme;

use super::ShaderSource;

/// What the renderer draws with.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub shader: ShaderSource,
    /// Color the swap-chain image is cleared to before the triangle.
    pub clear_color: wgpu::Color,
    pub theme: Theme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader: ShaderSource::default(),
            clear_color: wgpu::Color::BLACK,
            theme: Theme::default(),
        }
    }
}

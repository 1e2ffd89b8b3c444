use std::borrow::Cow;

use anyhow::Result;

pub const VERTEX_ENTRY: &str = "vertex_main";
pub const FRAGMENT_ENTRY: &str = "fragment_main";

/// Description of the fixed graphics pipeline.
///
/// Independent of the framebuffer size: built once, never rebuilt on resize.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PipelineDesc {
    pub label: String,
    /// WGSL module containing both entry points.
    pub shader: String,
    pub vertex_entry: String,
    pub fragment_entry: String,
    /// Swap-chain format; the single color target.
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
}

impl PipelineDesc {
    pub fn new(
        shader: impl Into<String>,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            label: "prism pipeline".to_string(),
            shader: shader.into(),
            vertex_entry: VERTEX_ENTRY.to_string(),
            fragment_entry: FRAGMENT_ENTRY.to_string(),
            color_format,
            depth_format,
        }
    }

    pub fn color_target(&self) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format: self.color_format,
            blend: None,
            write_mask: wgpu::ColorWrites::ALL,
        }
    }

    /// Depth test `less` with writes on; stencil unused.
    pub fn depth_stencil_state(&self) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: self.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState {
                read_mask: 0,
                write_mask: 0,
                ..Default::default()
            },
            bias: wgpu::DepthBiasState::default(),
        }
    }

    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }
}

/// Compiles the shader module and creates the pipeline.
///
/// An empty source is rejected before the device sees it. WGSL errors are
/// reported by the device's uncaptured-error handler.
pub fn build_pipeline(device: &wgpu::Device, desc: &PipelineDesc) -> Result<wgpu::RenderPipeline> {
    anyhow::ensure!(
        !desc.shader.trim().is_empty(),
        "shader source for {:?} is empty",
        desc.label
    );

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&desc.label),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&desc.shader)),
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&desc.label),
        layout: None,

        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some(&desc.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[],
        },

        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some(&desc.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(desc.color_target())],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(desc.depth_stencil_state()),
        multisample: desc.multisample_state(),

        multiview: None,
        cache: None,
    });

    log::debug!("built pipeline {:?} ({:?})", desc.label, desc.color_format);
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc() -> PipelineDesc {
        PipelineDesc::new(
            "@vertex fn vertex_main() {}",
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Depth24Plus,
        )
    }

    #[test]
    fn entry_points_default_to_triangle_shader_names() {
        let d = desc();
        assert_eq!(d.vertex_entry, "vertex_main");
        assert_eq!(d.fragment_entry, "fragment_main");
    }

    #[test]
    fn depth_state_is_less_with_writes_and_no_stencil() {
        let ds = desc().depth_stencil_state();
        assert_eq!(ds.format, wgpu::TextureFormat::Depth24Plus);
        assert!(ds.depth_write_enabled);
        assert_eq!(ds.depth_compare, wgpu::CompareFunction::Less);
        assert_eq!(ds.stencil.read_mask, 0);
        assert_eq!(ds.stencil.write_mask, 0);
        assert!(!ds.stencil.is_enabled());
    }

    #[test]
    fn multisample_is_single_sample_full_mask() {
        let ms = desc().multisample_state();
        assert_eq!(ms.count, 1);
        assert_eq!(ms.mask, u64::MAX);
        assert!(!ms.alpha_to_coverage_enabled);
    }

    #[test]
    fn color_target_uses_swap_chain_format() {
        let ct = desc().color_target();
        assert_eq!(ct.format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(ct.write_mask, wgpu::ColorWrites::ALL);
    }
}

use super::SurfaceSize;

/// Size and format of the depth buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DepthDesc {
    pub size: SurfaceSize,
    pub format: wgpu::TextureFormat,
}

impl DepthDesc {
    pub fn resized(&self, size: SurfaceSize) -> Self {
        Self { size, ..*self }
    }

    /// 2D, one mip level, one sample, render-attachment only.
    pub fn texture_descriptor(&self) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some("prism depth texture"),
            size: wgpu::Extent3d {
                width: self.size.width,
                height: self.size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        }
    }

    /// Depth-only aspect, single layer, single mip, same format as the texture.
    pub fn view_descriptor(&self) -> wgpu::TextureViewDescriptor<'static> {
        wgpu::TextureViewDescriptor {
            label: Some("prism depth view"),
            format: Some(self.format),
            dimension: Some(wgpu::TextureViewDimension::D2),
            aspect: wgpu::TextureAspect::DepthOnly,
            base_mip_level: 0,
            mip_level_count: Some(1),
            base_array_layer: 0,
            array_layer_count: Some(1),
            ..Default::default()
        }
    }
}

/// Depth texture and the view the render pass attaches.
///
/// Tracks the framebuffer size; rebuilt wholesale on resize.
#[derive(Debug)]
pub struct DepthResource {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    desc: DepthDesc,
}

impl DepthResource {
    pub fn new(device: &wgpu::Device, desc: DepthDesc) -> Self {
        let texture = device.create_texture(&desc.texture_descriptor());
        let view = texture.create_view(&desc.view_descriptor());
        Self { texture, view, desc }
    }

    pub fn size(&self) -> SurfaceSize {
        self.desc.size
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.desc.format
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc() -> DepthDesc {
        DepthDesc {
            size: SurfaceSize::new(600, 400),
            format: wgpu::TextureFormat::Depth24Plus,
        }
    }

    #[test]
    fn texture_descriptor_matches_framebuffer() {
        let d = desc().texture_descriptor();
        assert_eq!(d.size.width, 600);
        assert_eq!(d.size.height, 400);
        assert_eq!(d.size.depth_or_array_layers, 1);
        assert_eq!(d.mip_level_count, 1);
        assert_eq!(d.sample_count, 1);
        assert_eq!(d.dimension, wgpu::TextureDimension::D2);
        assert_eq!(d.usage, wgpu::TextureUsages::RENDER_ATTACHMENT);
        assert_eq!(d.format, wgpu::TextureFormat::Depth24Plus);
    }

    #[test]
    fn view_descriptor_is_depth_only_single_layer() {
        let v = desc().view_descriptor();
        assert_eq!(v.aspect, wgpu::TextureAspect::DepthOnly);
        assert_eq!(v.format, Some(wgpu::TextureFormat::Depth24Plus));
        assert_eq!(v.dimension, Some(wgpu::TextureViewDimension::D2));
        assert_eq!((v.base_mip_level, v.mip_level_count), (0, Some(1)));
        assert_eq!((v.base_array_layer, v.array_layer_count), (0, Some(1)));
    }

    #[test]
    fn resized_keeps_format() {
        let d = desc().resized(SurfaceSize::new(1024, 768));
        assert_eq!(d.size, SurfaceSize::new(1024, 768));
        assert_eq!(d.format, wgpu::TextureFormat::Depth24Plus);
    }
}

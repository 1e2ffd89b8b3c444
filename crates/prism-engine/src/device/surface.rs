use super::{SurfaceErrorAction, SurfaceSize};

/// Everything needed to (re)build the swap chain for one framebuffer size.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SwapChainDesc {
    pub size: SurfaceSize,
    pub format: wgpu::TextureFormat,
    pub present_mode: wgpu::PresentMode,
}

impl SwapChainDesc {
    /// Returns a copy of this descriptor for another framebuffer size.
    pub fn resized(&self, size: SurfaceSize) -> Self {
        Self { size, ..*self }
    }

    /// Builds the wgpu surface configuration.
    ///
    /// Usage is always render-attachment; the surface is only drawn into.
    pub fn configuration(
        &self,
        alpha_mode: wgpu::CompositeAlphaMode,
        desired_maximum_frame_latency: u32,
    ) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.format,
            width: self.size.width,
            height: self.size.height,
            present_mode: self.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        }
    }
}

/// The configured swap chain of the window surface.
///
/// wgpu keeps one surface per window and reconfigures it, so this value is
/// the configuration that was applied. It is replaced, never edited, on resize.
#[derive(Debug, Clone)]
pub struct PresentationTarget {
    config: wgpu::SurfaceConfiguration,
}

impl PresentationTarget {
    pub(crate) fn configure(
        surface: &wgpu::Surface<'_>,
        device: &wgpu::Device,
        config: wgpu::SurfaceConfiguration,
    ) -> Self {
        surface.configure(device, &config);
        Self { config }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.width, self.config.height)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn config(&self) -> &wgpu::SurfaceConfiguration {
        &self.config
    }
}

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    preferred: wgpu::TextureFormat,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.contains(&preferred) {
        return Some(preferred);
    }
    caps.formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a surface acquisition error to an action, reconfiguring when needed.
pub(crate) fn recover_surface(
    surface: &wgpu::Surface<'_>,
    device: &wgpu::Device,
    target: &PresentationTarget,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if !target.size().is_empty() {
                surface.configure(device, &target.config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>, alpha: Vec<wgpu::CompositeAlphaMode>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            alpha_modes: alpha,
            ..Default::default()
        }
    }

    fn desc(w: u32, h: u32) -> SwapChainDesc {
        SwapChainDesc {
            size: SurfaceSize::new(w, h),
            format: wgpu::TextureFormat::Bgra8Unorm,
            present_mode: wgpu::PresentMode::Fifo,
        }
    }

    // ── configuration ─────────────────────────────────────────────────────

    #[test]
    fn configuration_matches_descriptor() {
        let cfg = desc(600, 400).configuration(wgpu::CompositeAlphaMode::Opaque, 1);
        assert_eq!(cfg.usage, wgpu::TextureUsages::RENDER_ATTACHMENT);
        assert_eq!(cfg.format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!((cfg.width, cfg.height), (600, 400));
        assert_eq!(cfg.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(cfg.desired_maximum_frame_latency, 1);
    }

    #[test]
    fn resized_keeps_format_and_mode() {
        let resized = desc(600, 400).resized(SurfaceSize::new(1024, 768));
        assert_eq!(resized.size, SurfaceSize::new(1024, 768));
        assert_eq!(resized.format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(resized.present_mode, wgpu::PresentMode::Fifo);
    }

    // ── format / alpha selection ──────────────────────────────────────────

    #[test]
    fn preferred_format_used_when_supported() {
        let c = caps(
            vec![wgpu::TextureFormat::Rgba8Unorm, wgpu::TextureFormat::Bgra8Unorm],
            vec![],
        );
        assert_eq!(
            choose_surface_format(&c, wgpu::TextureFormat::Bgra8Unorm),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn first_format_used_as_fallback() {
        let c = caps(vec![wgpu::TextureFormat::Rgba8UnormSrgb], vec![]);
        assert_eq!(
            choose_surface_format(&c, wgpu::TextureFormat::Bgra8Unorm),
            Some(wgpu::TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn no_formats_means_no_choice() {
        let c = caps(vec![], vec![]);
        assert_eq!(choose_surface_format(&c, wgpu::TextureFormat::Bgra8Unorm), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let c = caps(vec![], vec![wgpu::CompositeAlphaMode::Opaque]);
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&caps(vec![], vec![]), None), wgpu::CompositeAlphaMode::Auto);
    }
}

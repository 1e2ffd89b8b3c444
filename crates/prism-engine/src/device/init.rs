/// What the frame driver does once the device reports it was lost.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DeviceLostPolicy {
    /// Log once, stop issuing GPU work, keep the window open until closed.
    #[default]
    Suspend,
    /// Log once and end the event loop without an error.
    Exit,
}

/// Initialization parameters for the GPU layer.
///
/// Defaults describe the fixed pipeline this crate draws with: a BGRA8 swap
/// chain presented in FIFO order and a 24-bit depth buffer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Adapter selection hint.
    pub power_preference: wgpu::PowerPreference,

    /// Swap-chain format used when the surface supports it.
    ///
    /// Otherwise the surface's first supported format is used.
    pub preferred_format: wgpu::TextureFormat,

    /// Present mode (swap behavior). FIFO is vsync-locked and always supported.
    pub present_mode: wgpu::PresentMode,

    /// Depth buffer format, shared by the depth resource and every pipeline.
    pub depth_format: wgpu::TextureFormat,

    /// Optional alpha mode preference; unsupported values fall back to a supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Number of frames the presentation engine may queue ahead.
    pub desired_maximum_frame_latency: u32,

    pub device_lost_policy: DeviceLostPolicy,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            preferred_format: wgpu::TextureFormat::Bgra8Unorm,
            present_mode: wgpu::PresentMode::Fifo,
            depth_format: wgpu::TextureFormat::Depth24Plus,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 1,
            device_lost_policy: DeviceLostPolicy::default(),
        }
    }
}

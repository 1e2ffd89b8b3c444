use anyhow::{Context, Result};
use wgpu::SurfaceError;

use crate::render::{build_pipeline, Extent, PipelineDesc, ResourceFactory};

use super::surface::{self, PresentationTarget, SwapChainDesc};
use super::{DepthDesc, DepthResource, DeviceStatus, GpuInit, GraphicsContext, SurfaceErrorAction, SurfaceSize};

/// The window's GPU side: the acquired context plus the surface bound to the window.
///
/// The surface is bound once; only its configuration (the swap chain) is
/// rebuilt afterwards. All GPU objects of the render targets are created here.
pub struct Gpu {
    context: GraphicsContext,
    surface: wgpu::Surface<'static>,
    format: wgpu::TextureFormat,
    alpha_mode: wgpu::CompositeAlphaMode,
    desired_maximum_frame_latency: u32,
}

impl Gpu {
    /// Binds the already-created surface to the acquired context.
    ///
    /// Picks the swap-chain format and alpha mode from the surface capabilities.
    pub fn new(context: GraphicsContext, surface: wgpu::Surface<'static>, init: &GpuInit) -> Result<Self> {
        let caps = surface.get_capabilities(context.adapter());
        let format = surface::choose_surface_format(&caps, init.preferred_format)
            .context("surface reports no supported formats")?;
        if format != init.preferred_format {
            log::warn!(
                "surface does not support {:?}; using {format:?}",
                init.preferred_format
            );
        }
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);

        Ok(Self {
            context,
            surface,
            format,
            alpha_mode,
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        })
    }

    /// Swap-chain format chosen for this surface.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn context(&self) -> &GraphicsContext {
        &self.context
    }

    pub fn device(&self) -> &wgpu::Device {
        self.context.device()
    }

    pub fn queue(&self) -> &wgpu::Queue {
        self.context.queue()
    }

    /// Acquires the next swap-chain image.
    pub fn acquire(&self) -> std::result::Result<wgpu::SurfaceTexture, SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Converts an acquisition error into an action, reconfiguring with `target` if needed.
    pub fn recover(&self, target: &PresentationTarget, err: SurfaceError) -> SurfaceErrorAction {
        surface::recover_surface(&self.surface, self.device(), target, err)
    }

    /// Lets the device run its callbacks (device lost, uncaptured errors, maps).
    pub fn poll(&self) {
        if let Err(e) = self.device().poll(wgpu::PollType::Poll) {
            log::debug!("device poll failed: {e}");
        }
    }
}

impl ResourceFactory for Gpu {
    type SwapChain = PresentationTarget;
    type Depth = DepthResource;
    type Pipeline = wgpu::RenderPipeline;

    fn status(&self) -> DeviceStatus {
        self.context.health().status()
    }

    fn create_swap_chain(&mut self, desc: &SwapChainDesc) -> Result<PresentationTarget> {
        let config = desc.configuration(self.alpha_mode, self.desired_maximum_frame_latency);
        Ok(PresentationTarget::configure(&self.surface, self.device(), config))
    }

    fn create_depth(&mut self, desc: &DepthDesc) -> Result<DepthResource> {
        Ok(DepthResource::new(self.device(), *desc))
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<wgpu::RenderPipeline> {
        build_pipeline(self.device(), desc)
    }
}

impl Extent for PresentationTarget {
    fn extent(&self) -> SurfaceSize {
        self.size()
    }
}

impl Extent for DepthResource {
    fn extent(&self) -> SurfaceSize {
        self.size()
    }
}

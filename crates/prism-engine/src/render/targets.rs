//! Size-dependent render targets and the resize protocol.
//!
//! The swap chain and the depth buffer must always match the framebuffer.
//! They are built together, replaced together on every resize, and only handed
//! out for recording when both match the current size. The pipeline does not
//! depend on the size and is built exactly once.

use anyhow::{Context, Result};

use crate::device::{DepthDesc, DeviceStatus, SurfaceSize, SwapChainDesc};

use super::PipelineDesc;

/// Anything with a framebuffer extent.
pub trait Extent {
    fn extent(&self) -> SurfaceSize;
}

/// GPU creation primitives the render targets are built from.
///
/// Implemented by [`crate::device::Gpu`] over wgpu, and by mocks in tests.
pub trait ResourceFactory {
    type SwapChain: Extent;
    type Depth: Extent;
    type Pipeline;

    /// Device status; nothing is created unless it is `Ready`.
    fn status(&self) -> DeviceStatus;

    fn create_swap_chain(&mut self, desc: &SwapChainDesc) -> Result<Self::SwapChain>;
    fn create_depth(&mut self, desc: &DepthDesc) -> Result<Self::Depth>;
    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<Self::Pipeline>;
}

/// Borrowed view of the targets for one frame. Both attachments match `size`.
pub struct FrameTargets<'a, F: ResourceFactory> {
    pub size: SurfaceSize,
    pub swap_chain: &'a F::SwapChain,
    pub depth: &'a F::Depth,
    pub pipeline: &'a F::Pipeline,
}

/// Owns the swap chain, depth resource and pipeline of one window.
pub struct RenderTargets<F: ResourceFactory> {
    size: SurfaceSize,
    swap_desc: SwapChainDesc,
    depth_desc: DepthDesc,
    pipeline_desc: PipelineDesc,
    swap_chain: F::SwapChain,
    depth: F::Depth,
    pipeline: F::Pipeline,
    rebuilds: u64,
}

impl<F: ResourceFactory> RenderTargets<F> {
    /// Builds the swap chain, then the depth resource, then the pipeline.
    ///
    /// Fails without touching the factory if the device is not ready or the
    /// size is empty, and fails if the device reports an error while the
    /// pipeline is built.
    pub fn new(
        factory: &mut F,
        swap_desc: SwapChainDesc,
        depth_format: wgpu::TextureFormat,
        pipeline_desc: PipelineDesc,
    ) -> Result<Self> {
        ensure_ready(factory)?;
        let size = swap_desc.size;
        anyhow::ensure!(!size.is_empty(), "cannot create render targets for a {size} surface");

        let depth_desc = DepthDesc {
            size,
            format: depth_format,
        };

        let swap_chain = factory.create_swap_chain(&swap_desc)?;
        let depth = factory.create_depth(&depth_desc)?;
        let pipeline = factory.create_pipeline(&pipeline_desc)?;
        // Shader and pipeline validation errors surface through the device status.
        ensure_ready(factory).context("pipeline creation failed")?;
        check_extents::<F>(size, &swap_chain, &depth)?;

        log::debug!("render targets created at {size}");

        Ok(Self {
            size,
            swap_desc,
            depth_desc,
            pipeline_desc,
            swap_chain,
            depth,
            pipeline,
            rebuilds: 0,
        })
    }

    /// Replaces the swap chain and depth resource for `size`.
    ///
    /// Always rebuilds, including when `size` equals the current size. An empty
    /// size is recorded but the rebuild waits for the next non-empty size;
    /// [`frame`](Self::frame) returns `None` meanwhile. The pipeline is untouched.
    pub fn resize(&mut self, factory: &mut F, size: SurfaceSize) -> Result<()> {
        self.size = size;
        if size.is_empty() {
            log::debug!("surface is {size}; deferring swap chain rebuild");
            return Ok(());
        }
        ensure_ready(factory)?;

        let swap_desc = self.swap_desc.resized(size);
        let depth_desc = self.depth_desc.resized(size);

        let swap_chain = factory.create_swap_chain(&swap_desc)?;
        let depth = factory.create_depth(&depth_desc)?;
        check_extents::<F>(size, &swap_chain, &depth)?;

        self.swap_chain = swap_chain;
        self.depth = depth;
        self.swap_desc = swap_desc;
        self.depth_desc = depth_desc;
        self.rebuilds += 1;

        log::debug!("swap chain and depth rebuilt at {size}");
        Ok(())
    }

    /// Targets for recording a frame, or `None` when the attachments do not
    /// match the current size (deferred rebuild after an empty resize).
    pub fn frame(&self) -> Option<FrameTargets<'_, F>> {
        let current = !self.size.is_empty()
            && self.swap_chain.extent() == self.size
            && self.depth.extent() == self.size;

        current.then(|| FrameTargets {
            size: self.size,
            swap_chain: &self.swap_chain,
            depth: &self.depth,
            pipeline: &self.pipeline,
        })
    }

    /// Latest size requested, which may be empty.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn swap_chain(&self) -> &F::SwapChain {
        &self.swap_chain
    }

    pub fn depth(&self) -> &F::Depth {
        &self.depth
    }

    pub fn pipeline(&self) -> &F::Pipeline {
        &self.pipeline
    }

    pub fn pipeline_desc(&self) -> &PipelineDesc {
        &self.pipeline_desc
    }

    /// Number of completed resize rebuilds.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

fn ensure_ready<F: ResourceFactory>(factory: &F) -> Result<()> {
    match factory.status() {
        DeviceStatus::Ready => Ok(()),
        DeviceStatus::Lost { reason, message } => {
            anyhow::bail!("GPU device is lost ({reason}): {message}")
        }
        DeviceStatus::Failed { message } => anyhow::bail!("GPU device failed: {message}"),
    }
}

fn check_extents<F: ResourceFactory>(
    size: SurfaceSize,
    swap_chain: &F::SwapChain,
    depth: &F::Depth,
) -> Result<()> {
    anyhow::ensure!(
        swap_chain.extent() == size,
        "swap chain is {} but the framebuffer is {size}",
        swap_chain.extent()
    );
    anyhow::ensure!(
        depth.extent() == size,
        "depth buffer is {} but the framebuffer is {size}",
        depth.extent()
    );
    Ok(())
}

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::{FrameOutcome, Presentable};
use crate::device::{
    DeviceStatus, Gpu, GpuInit, GraphicsContext, SurfaceErrorAction, SurfaceSize, SwapChainDesc,
};
use crate::ui::UiOverlay;

use super::{PipelineDesc, RenderConfig, RenderTargets, Renderables, ResourceFactory};

/// wgpu presenter for one window.
///
/// Owns the GPU context, the render targets and the UI overlay. Frames are
/// recorded into a single command buffer with a single render pass.
pub struct Renderer {
    window: Arc<Window>,
    gpu: Gpu,
    targets: RenderTargets<Gpu>,
    overlay: UiOverlay,
    clear_color: wgpu::Color,
    host_driven: bool,
}

impl Renderer {
    /// Acquires the context and builds everything a frame needs, in order:
    /// device, surface configuration, depth, pipeline, UI overlay.
    pub async fn bootstrap(window: Arc<Window>, init: GpuInit, config: RenderConfig) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Bound once for the window's lifetime; only its configuration is rebuilt.
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let context = GraphicsContext::acquire(instance, &surface, &init).await?;
        let mut gpu = Gpu::new(context, surface, &init)?;

        // A web canvas can report 0x0 before layout. The runtime reconciles the
        // size with the window once the renderer is installed.
        let inner = window.inner_size();
        let size = SurfaceSize::new(inner.width.max(1), inner.height.max(1));
        let swap_desc = SwapChainDesc {
            size,
            format: gpu.surface_format(),
            present_mode: init.present_mode,
        };

        let source = config.shader.load();
        let pipeline_desc = PipelineDesc::new(source, gpu.surface_format(), init.depth_format);

        // Shader compilation and pipeline validation errors are fatal here, not
        // on the first frame.
        gpu.device().push_error_scope(wgpu::ErrorFilter::Validation);
        let targets = RenderTargets::new(&mut gpu, swap_desc, init.depth_format, pipeline_desc);
        if let Some(err) = gpu.device().pop_error_scope().await {
            return Err(anyhow!("failed to build the render pipeline: {err}"));
        }
        let targets = targets.context("failed to create render targets")?;

        let overlay = UiOverlay::new(
            &window,
            gpu.device(),
            gpu.surface_format(),
            init.depth_format,
            config.theme,
        );

        log::info!("renderer ready: {size} {:?}", gpu.surface_format());

        Ok(Self {
            window,
            gpu,
            targets,
            overlay,
            clear_color: config.clear_color,
            host_driven: cfg!(target_arch = "wasm32"),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn targets(&self) -> &RenderTargets<Gpu> {
        &self.targets
    }

    /// Gives the overlay first look at a window event. Returns `true` when it
    /// was consumed by a widget.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.overlay.on_window_event(&self.window, event)
    }

    fn record(&mut self, output: &wgpu::SurfaceTexture) -> Result<()> {
        let Some(frame) = self.targets.frame() else {
            return Err(anyhow!("render targets are stale"));
        };
        let device = self.gpu.device();
        let queue = self.gpu.queue();

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("prism frame encoder"),
        });

        let mut buffers = self.overlay.upload(device, queue, &mut encoder);

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("prism frame pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        depth_slice: None,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.clear_color),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: frame.depth.view(),
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    ..Default::default()
                })
                .forget_lifetime();

            pass.set_pipeline(frame.pipeline);
            pass.draw(0..3, 0..1);

            self.overlay.paint(&mut pass);
        }

        buffers.push(encoder.finish());
        queue.submit(buffers);
        Ok(())
    }
}

impl Presentable for Renderer {
    type Ui = egui::Context;

    fn status(&self) -> DeviceStatus {
        self.gpu.status()
    }

    fn size(&self) -> SurfaceSize {
        self.targets.size()
    }

    fn begin_frame(&mut self) {
        self.overlay.begin(&self.window);
    }

    fn ui(&self) -> &egui::Context {
        self.overlay.context()
    }

    fn end_frame(&mut self, renderables: &Renderables) -> Result<FrameOutcome> {
        let size = self.targets.size();
        self.overlay.end(&self.window, [size.width, size.height]);

        if !renderables.is_empty() {
            log::trace!("{} renderables produced; not drawn by the fixed pipeline", renderables.len());
        }

        let Some(frame) = self.targets.frame() else {
            log::trace!("skipping frame: targets not built for {size}");
            self.overlay.upload_textures(self.gpu.device(), self.gpu.queue());
            return Ok(FrameOutcome::Skipped);
        };

        let output = match self.gpu.acquire() {
            Ok(output) => output,
            Err(err) => {
                let action = self.gpu.recover(frame.swap_chain, err);
                self.overlay.upload_textures(self.gpu.device(), self.gpu.queue());
                return match action {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(FrameOutcome::Skipped)
                    }
                    SurfaceErrorAction::Fatal => Err(anyhow!("swap chain image acquisition failed")),
                };
            }
        };

        self.record(&output)?;
        self.gpu.poll();

        if self.host_driven {
            // The browser presents the canvas at the end of the host tick.
            drop(output);
        } else {
            self.window.pre_present_notify();
            output.present();
        }
        Ok(FrameOutcome::Presented)
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<()> {
        self.targets.resize(&mut self.gpu, size)
    }
}

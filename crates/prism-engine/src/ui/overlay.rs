use egui::{ClippedPrimitive, TexturesDelta, ViewportId};
use egui_wgpu::{Renderer as EguiRenderer, RendererOptions, ScreenDescriptor};
use winit::event::WindowEvent;
use winit::window::Window;

use super::Theme;

/// Tessellated output of one UI pass, waiting to be uploaded and painted.
struct PendingPaint {
    jobs: Vec<ClippedPrimitive>,
    textures: TexturesDelta,
    screen: ScreenDescriptor,
}

/// egui context plus its winit and wgpu glue.
///
/// A frame is `begin` → caller builds widgets against [`UiOverlay::context`] →
/// `end` → `upload` (once an encoder exists) → `paint` inside the render pass.
/// Texture deltas are consumed by `upload` or `upload_textures`; dropping them
/// would desynchronize egui's texture manager.
pub struct UiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: EguiRenderer,
    pending: Option<PendingPaint>,
}

impl UiOverlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        theme: Theme,
    ) -> Self {
        let ctx = egui::Context::default();
        theme.apply(&ctx);

        let max_texture_side = device.limits().max_texture_dimension_2d as usize;
        let state = egui_winit::State::new(
            ctx.clone(),
            ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(max_texture_side),
        );

        let renderer = EguiRenderer::new(
            device,
            color_format,
            RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: Some(depth_format),
                ..Default::default()
            },
        );

        Self { ctx, state, renderer, pending: None }
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// Feeds a window event to egui. Returns `true` when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        if response.repaint {
            window.request_redraw();
        }
        response.consumed
    }

    pub fn begin(&mut self, window: &Window) {
        if self.pending.take().is_some() {
            log::warn!("ui frame started before the previous one was painted");
        }
        let raw = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw);
    }

    /// Finishes the UI pass and tessellates it for a target of `size_in_pixels`.
    pub fn end(&mut self, window: &Window, size_in_pixels: [u32; 2]) {
        let output = self.ctx.end_pass();
        self.state.handle_platform_output(window, output.platform_output);

        let pixels_per_point = output.pixels_per_point;
        let jobs = self.ctx.tessellate(output.shapes, pixels_per_point);
        self.pending = Some(PendingPaint {
            jobs,
            textures: output.textures_delta,
            screen: ScreenDescriptor { size_in_pixels, pixels_per_point },
        });
    }

    /// Applies texture changes without painting. Used when a frame is skipped.
    pub fn upload_textures(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        if let Some(pending) = self.pending.take() {
            self.apply_textures(device, queue, &pending.textures);
        }
    }

    /// Uploads textures and vertex data. Must precede `paint` in the same frame.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
    ) -> Vec<wgpu::CommandBuffer> {
        let Some(pending) = self.pending.as_ref() else {
            return Vec::new();
        };
        for (id, delta) in &pending.textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &pending.jobs, &pending.screen)
    }

    /// Records UI draws into `pass`, then frees textures egui released.
    pub fn paint(&mut self, pass: &mut wgpu::RenderPass<'static>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.renderer.render(pass, &pending.jobs, &pending.screen);
        for id in &pending.textures.free {
            self.renderer.free_texture(id);
        }
    }

    fn apply_textures(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, delta: &TexturesDelta) {
        for (id, image) in &delta.set {
            self.renderer.update_texture(device, queue, *id, image);
        }
        for id in &delta.free {
            self.renderer.free_texture(id);
        }
    }
}


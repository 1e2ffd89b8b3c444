use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::core::{DriverConfig, FrameDriver, FrameOutcome, FrameProducer, InputSink, Presentable};
use crate::device::{GpuInit, SurfaceSize};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;
use crate::render::{RenderConfig, Renderer};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Ignored on `wasm32` when an existing canvas is used; its size wins.
    pub initial_size: LogicalSize<f64>,
    /// Request a redraw after each resize instead of waiting for the next tick.
    pub redraw_on_resize: bool,
    /// DOM id of the canvas to render into on `wasm32`. `None` appends a new one.
    pub canvas_id: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(600.0, 400.0),
            redraw_on_resize: true,
            canvas_id: None,
        }
    }
}

/// Events injected into the loop from outside winit.
enum RuntimeEvent {
    /// Context acquisition finished.
    Ready(Result<Renderer>),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window closes.
    ///
    /// Natively this blocks and returns the first fatal error. On `wasm32` the
    /// loop is handed to the browser and this returns immediately.
    pub fn run<A>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        render_config: RenderConfig,
        app: A,
    ) -> Result<()>
    where
        A: FrameProducer<egui::Context> + InputSink + 'static,
    {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        let proxy = event_loop.create_proxy();
        let state = RuntimeState::new(config, gpu_init, render_config, app, proxy);
        drive(event_loop, state)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn drive<A>(event_loop: EventLoop<RuntimeEvent>, mut state: RuntimeState<A>) -> Result<()>
where
    A: FrameProducer<egui::Context> + InputSink + 'static,
{
    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;
    match state.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// The browser owns the loop; frames arrive once per animation tick.
#[cfg(target_arch = "wasm32")]
fn drive<A>(event_loop: EventLoop<RuntimeEvent>, state: RuntimeState<A>) -> Result<()>
where
    A: FrameProducer<egui::Context> + InputSink + 'static,
{
    use winit::platform::web::EventLoopExtWebSys;
    event_loop.spawn_app(state);
    Ok(())
}

struct RuntimeState<A>
where
    A: FrameProducer<egui::Context> + InputSink + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    render_config: Option<RenderConfig>,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: EventLoopProxy<RuntimeEvent>,

    window: Option<Arc<Window>>,
    driver: FrameDriver<Renderer, A>,
    input: InputState,

    suspended: bool,
    error: Option<anyhow::Error>,
}

impl<A> RuntimeState<A>
where
    A: FrameProducer<egui::Context> + InputSink + 'static,
{
    fn new(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        render_config: RenderConfig,
        app: A,
        proxy: EventLoopProxy<RuntimeEvent>,
    ) -> Self {
        let driver_config = DriverConfig {
            redraw_on_resize: config.redraw_on_resize,
            device_lost_policy: gpu_init.device_lost_policy,
        };
        Self {
            config,
            gpu_init,
            render_config: Some(render_config),
            proxy,
            window: None,
            driver: FrameDriver::new(app, driver_config),
            input: InputState::default(),
            suspended: false,
            error: None,
        }
    }

    /// Records the first fatal error and ends the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attrs = Window::default_attributes().with_title(self.config.title.clone());

        #[cfg(not(target_arch = "wasm32"))]
        let attrs = attrs.with_inner_size(self.config.initial_size);

        #[cfg(target_arch = "wasm32")]
        let attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;
            match &self.config.canvas_id {
                Some(id) => attrs.with_canvas(Some(web::find_canvas(id)?)),
                None => attrs
                    .with_inner_size(self.config.initial_size)
                    .with_append(true),
            }
        };

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        log::info!("window created: {}", SurfaceSize::from(window.inner_size()));
        Ok(Arc::new(window))
    }

    fn bootstrap(&mut self, event_loop: &ActiveEventLoop, window: Arc<Window>) {
        let init = self.gpu_init.clone();
        let render_config = self.render_config.take().unwrap_or_default();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = pollster::block_on(Renderer::bootstrap(window, init, render_config));
            self.finish_bootstrap(event_loop, result);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let _ = event_loop;
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = Renderer::bootstrap(window, init, render_config).await;
                if proxy.send_event(RuntimeEvent::Ready(result)).is_err() {
                    log::warn!("event loop closed before the GPU context was ready");
                }
            });
        }
    }

    fn finish_bootstrap(&mut self, event_loop: &ActiveEventLoop, result: Result<Renderer>) {
        if let Err(err) = self.driver.start(result) {
            self.fail(event_loop, err.context("GPU initialization failed"));
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        // The window may have changed size (or been minimized) without an
        // event while the context was being acquired.
        let current = SurfaceSize::from(window.inner_size());
        if self.driver.presenter().is_some_and(|p| p.size() != current) {
            self.resize(event_loop, current);
        }
        window.request_redraw();
    }

    fn resize(&mut self, event_loop: &ActiveEventLoop, size: SurfaceSize) {
        match self.driver.on_resize(size) {
            Ok(true) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Ok(false) => {}
            Err(err) => self.fail(event_loop, err.context(format!("resize to {size} failed"))),
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        match self.driver.render_frame() {
            Ok(FrameOutcome::Exit) => {
                log::info!("exiting after device loss");
                event_loop.exit();
            }
            Ok(FrameOutcome::Suspended) => self.suspended = true,
            Ok(_) => {}
            Err(err) => self.fail(event_loop, err),
        }
    }
}

impl<A> ApplicationHandler<RuntimeEvent> for RuntimeState<A>
where
    A: FrameProducer<egui::Context> + InputSink + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        };
        self.window = Some(window.clone());
        self.bootstrap(event_loop, window);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Ready(result) => self.finish_bootstrap(event_loop, result),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw while there is something to draw.
        if !self.suspended {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        // The overlay sees events first; consumed pointer input is not forwarded.
        let consumed = self
            .driver
            .presenter_mut()
            .is_some_and(|renderer| renderer.handle_window_event(&event));

        if let Some(ev) = translate_window_event(window.scale_factor(), &self.input, &event) {
            self.input.apply_event(&ev);
            if !consumed {
                self.driver.on_input(&ev);
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => self.resize(event_loop, new_size.into()),

            WindowEvent::ScaleFactorChanged { .. } => {
                self.resize(event_loop, window.inner_size().into());
            }

            WindowEvent::RedrawRequested => self.render(event_loop),

            _ => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::{Context, Result};
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    /// Looks up the host page's canvas by element id.
    pub fn find_canvas(id: &str) -> Result<HtmlCanvasElement> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .context(format!("no element with id `{id}`"))?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
            .context(format!("element `{id}` is not a canvas"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_600_by_400_logical() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, LogicalSize::new(600.0, 400.0));
        assert!(cfg.redraw_on_resize);
        assert!(cfg.canvas_id.is_none());
    }
}

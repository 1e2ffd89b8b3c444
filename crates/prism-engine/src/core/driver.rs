use anyhow::{anyhow, Result};

use super::app::{FrameOutcome, FrameProducer, InputSink, Presentable};
use crate::device::{DeviceLostPolicy, DeviceStatus, SurfaceSize};
use crate::input::InputEvent;
use crate::time::FrameClock;

/// Frame driver settings.
#[derive(Debug, Copy, Clone)]
pub struct DriverConfig {
    /// Ask the platform for a redraw after a successful resize.
    pub redraw_on_resize: bool,
    pub device_lost_policy: DeviceLostPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            redraw_on_resize: true,
            device_lost_policy: DeviceLostPolicy::Suspend,
        }
    }
}

enum DriverState<P> {
    Uninitialized,
    Running(P),
}

/// Sequences begin → produce → end for each tick and routes resize/input.
///
/// The presenter arrives asynchronously through [`FrameDriver::start`]; until
/// then every call is a no-op.
pub struct FrameDriver<P, A> {
    state: DriverState<P>,
    app: A,
    clock: FrameClock,
    config: DriverConfig,
    loss_reported: bool,
    idle: bool,
    /// Latest size reported before the presenter existed.
    pending_size: Option<SurfaceSize>,
}

impl<P, A> FrameDriver<P, A>
where
    P: Presentable,
    A: FrameProducer<P::Ui>,
{
    pub fn new(app: A, config: DriverConfig) -> Self {
        Self {
            state: DriverState::Uninitialized,
            app,
            clock: FrameClock::new(),
            config,
            loss_reported: false,
            idle: true,
            pending_size: None,
        }
    }

    /// Installs the presenter once context acquisition completes.
    ///
    /// An acquisition error is returned unchanged and the driver stays
    /// uninitialized. A resize that arrived while acquisition was pending is
    /// applied before the first frame.
    pub fn start(&mut self, presenter: Result<P>) -> Result<()> {
        if self.is_running() {
            log::warn!("frame driver already running; ignoring second start");
            return Ok(());
        }
        let mut presenter = presenter?;
        if let Some(size) = self.pending_size.take() {
            if size != presenter.size() {
                log::debug!("applying resize to {size} received during startup");
                presenter.resize(size)?;
            }
        }
        log::info!("frame driver running at {}", presenter.size());
        self.state = DriverState::Running(presenter);
        self.idle = true;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running(_))
    }

    pub fn presenter(&self) -> Option<&P> {
        match &self.state {
            DriverState::Running(p) => Some(p),
            DriverState::Uninitialized => None,
        }
    }

    pub fn presenter_mut(&mut self) -> Option<&mut P> {
        match &mut self.state {
            DriverState::Running(p) => Some(p),
            DriverState::Uninitialized => None,
        }
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    /// Number of frames handed to the producer so far.
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn render_frame(&mut self) -> Result<FrameOutcome> {
        let DriverState::Running(presenter) = &mut self.state else {
            return Ok(FrameOutcome::NotReady);
        };

        match presenter.status() {
            DeviceStatus::Ready => {}
            DeviceStatus::Failed { message } => {
                return Err(anyhow!("uncaptured GPU device error: {message}"));
            }
            DeviceStatus::Lost { reason, message } => {
                if !self.loss_reported {
                    self.loss_reported = true;
                    log::warn!("GPU device lost ({reason}): {message}");
                }
                return Ok(match self.config.device_lost_policy {
                    DeviceLostPolicy::Suspend => FrameOutcome::Suspended,
                    DeviceLostPolicy::Exit => FrameOutcome::Exit,
                });
            }
        }

        if presenter.size().is_empty() {
            log::trace!("skipping frame: zero-sized target");
            self.idle = true;
            return Ok(FrameOutcome::Skipped);
        }
        if std::mem::take(&mut self.idle) {
            self.clock.reset();
        }

        presenter.begin_frame();
        let time = self.clock.tick();
        let renderables = self.app.produce(presenter.ui(), &time);
        presenter.end_frame(&renderables)
    }

    /// Forwards a new framebuffer size. Returns whether a redraw should be requested.
    pub fn on_resize(&mut self, size: SurfaceSize) -> Result<bool> {
        let DriverState::Running(presenter) = &mut self.state else {
            log::debug!("resize to {size} before the presenter exists; deferred");
            self.pending_size = Some(size);
            return Ok(false);
        };
        if !presenter.status().is_ready() {
            log::debug!("resize to {size} while the device is unavailable; ignored");
            return Ok(false);
        }

        presenter.resize(size)?;
        Ok(self.config.redraw_on_resize && !size.is_empty())
    }
}

impl<P, A> FrameDriver<P, A>
where
    A: InputSink,
{
    pub fn on_input(&mut self, event: &InputEvent) {
        self.app.on_input(event);
    }
}

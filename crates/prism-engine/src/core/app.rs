use anyhow::Result;

use crate::device::{DeviceStatus, SurfaceSize};
use crate::input::InputEvent;
use crate::render::Renderables;
use crate::time::FrameTime;

/// Result of one pass through the frame driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// A frame was submitted and presented.
    Presented,
    /// No image was produced this tick (zero-size target, transient surface error).
    Skipped,
    /// The presenter does not exist yet.
    NotReady,
    /// The device was lost; GPU work is suspended.
    Suspended,
    /// The loop should end without an error.
    Exit,
}

/// Produces the per-frame renderable set and populates the UI.
///
/// `Ui` is the immediate-mode context handed out by the presenter.
pub trait FrameProducer<Ui: ?Sized> {
    fn produce(&mut self, ui: &Ui, time: &FrameTime) -> Renderables;
}

/// Receives translated input events.
pub trait InputSink {
    fn on_input(&mut self, _event: &InputEvent) {}
}

/// The GPU side of a frame: begin, record, present, and rebuild on resize.
pub trait Presentable {
    type Ui: ?Sized;

    fn status(&self) -> DeviceStatus;

    /// Current framebuffer size in physical pixels.
    fn size(&self) -> SurfaceSize;

    /// Starts the UI pass.
    fn begin_frame(&mut self);

    fn ui(&self) -> &Self::Ui;

    /// Ends the UI pass, records and presents the frame.
    fn end_frame(&mut self, renderables: &Renderables) -> Result<FrameOutcome>;

    /// Rebuilds size-dependent resources for `size`.
    fn resize(&mut self, size: SurfaceSize) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl InputSink for Silent {}

    #[test]
    fn input_sink_default_ignores_events() {
        let mut sink = Silent;
        sink.on_input(&InputEvent::PointerLeft);
        sink.on_input(&InputEvent::Focused(true));
    }
}

//! Core engine-facing contracts.
//!
//! The capability traits an application and a presenter implement, and the
//! frame driver that composes them. The runtime owns a driver and calls into
//! it from the platform loop.

mod app;
mod driver;

pub use app::{FrameOutcome, FrameProducer, InputSink, Presentable};
pub use driver::{DriverConfig, FrameDriver};

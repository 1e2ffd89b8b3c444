//! GPU device, presentation surface and depth resources.
//!
//! This module is responsible for:
//! - acquiring the wgpu Adapter/Device/Queue and watching device health
//! - binding the window to a Surface and (re)configuring its swap chain
//! - (re)creating the depth texture that matches the framebuffer

mod context;
mod depth;
mod error;
mod gpu;
mod health;
mod init;
mod size;
mod surface;

pub use context::GraphicsContext;
pub use depth::{DepthDesc, DepthResource};
pub use error::SurfaceErrorAction;
pub use gpu::Gpu;
pub use health::{DeviceHealth, DeviceStatus};
pub use init::{DeviceLostPolicy, GpuInit};
pub use size::SurfaceSize;
pub use surface::{PresentationTarget, SwapChainDesc};

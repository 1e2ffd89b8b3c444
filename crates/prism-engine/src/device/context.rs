use std::sync::Arc;

use anyhow::{Context, Result};

use super::{DeviceHealth, GpuInit};

/// Connection to the GPU: instance, adapter, logical device and queue.
///
/// Created once at startup and kept for the process lifetime. Acquisition is
/// asynchronous; nothing may be created on the device before it completes,
/// which the type enforces by only existing once it has.
pub struct GraphicsContext {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    health: DeviceHealth,
}

impl GraphicsContext {
    /// Requests an adapter, then a device from it, and installs the device handlers.
    ///
    /// `surface` is only used to pick an adapter able to present to it.
    /// Adapter or device failure is returned as an error; there is no retry.
    pub async fn acquire(
        instance: wgpu::Instance,
        surface: &wgpu::Surface<'_>,
        init: &GpuInit,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?}, {:?})", info.name, info.device_type, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("prism device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let health = DeviceHealth::new();
        install_handlers(&device, &health);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            health,
        })
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn health(&self) -> &DeviceHealth {
        &self.health
    }
}

/// Registers the uncaptured-error and device-lost handlers.
///
/// Uncaptured errors (validation, shader compilation, OOM) are fatal. Device
/// loss is only recorded; what happens next is the frame driver's decision.
fn install_handlers(device: &wgpu::Device, health: &DeviceHealth) {
    let on_error = health.clone();
    device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
        log::error!("uncaptured device error: {err}");
        on_error.mark_failed(err.to_string());
    }));

    let on_lost = health.clone();
    device.set_device_lost_callback(move |reason, message| {
        log::log!(lost_log_level(&reason), "device lost ({reason:?}): {message}");
        on_lost.mark_lost(format!("{reason:?}"), message);
    });
}

/// Dropping the device on a normal exit also reports it as lost.
fn lost_log_level(reason: &wgpu::DeviceLostReason) -> log::Level {
    match reason {
        wgpu::DeviceLostReason::Destroyed => log::Level::Debug,
        _ => log::Level::Warn,
    }
}

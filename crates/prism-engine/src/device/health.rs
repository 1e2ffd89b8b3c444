use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Device status as last reported by the GPU runtime.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum DeviceStatus {
    #[default]
    Ready,
    /// The device-lost callback fired. No GPU work may be issued afterwards.
    Lost { reason: String, message: String },
    /// An uncaptured device error was reported. Treated as fatal.
    Failed { message: String },
}

impl DeviceStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DeviceStatus::Ready)
    }
}

/// Shared handle to the device status.
///
/// wgpu invokes its error and device-lost callbacks from whatever thread polls
/// the device, so the status lives behind a mutex. Clones share one status.
#[derive(Debug, Clone, Default)]
pub struct DeviceHealth {
    status: Arc<Mutex<DeviceStatus>>,
}

impl DeviceHealth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> DeviceStatus {
        self.lock().clone()
    }

    /// Records a device loss. A prior fatal error is kept.
    pub fn mark_lost(&self, reason: impl Into<String>, message: impl Into<String>) {
        let mut status = self.lock();
        if !matches!(*status, DeviceStatus::Failed { .. }) {
            *status = DeviceStatus::Lost {
                reason: reason.into(),
                message: message.into(),
            };
        }
    }

    /// Records a fatal device error. The first error wins.
    pub fn mark_failed(&self, message: impl Into<String>) {
        let mut status = self.lock();
        if !matches!(*status, DeviceStatus::Failed { .. }) {
            *status = DeviceStatus::Failed {
                message: message.into(),
            };
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeviceStatus> {
        // A panicking callback must not take the status down with it.
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_ready() {
        assert!(DeviceHealth::new().status().is_ready());
    }

    #[test]
    fn clones_share_status() {
        let health = DeviceHealth::new();
        let writer = health.clone();
        writer.mark_lost("Destroyed", "device dropped");
        assert_eq!(
            health.status(),
            DeviceStatus::Lost {
                reason: "Destroyed".to_string(),
                message: "device dropped".to_string(),
            }
        );
    }

    #[test]
    fn failure_is_not_overwritten_by_loss() {
        let health = DeviceHealth::new();
        health.mark_failed("validation error");
        health.mark_lost("Unknown", "lost afterwards");
        assert!(matches!(health.status(), DeviceStatus::Failed { .. }));
    }

    #[test]
    fn first_failure_wins() {
        let health = DeviceHealth::new();
        health.mark_failed("first");
        health.mark_failed("second");
        assert_eq!(
            health.status(),
            DeviceStatus::Failed {
                message: "first".to_string()
            }
        );
    }
}

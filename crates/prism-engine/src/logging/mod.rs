//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only talks to the `log`
//! facade; the backend is `env_logger` on native targets and the browser
//! console on `wasm32`.

mod init;

pub use init::{init_logging, LoggingConfig, WriteStyle};

use std::sync::Once;

/// Filter applied when neither an explicit filter nor `RUST_LOG` is present.
///
/// wgpu is chatty at `info`; its internals are capped at `warn`.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// ANSI coloring behavior for terminal output.
///
/// Ignored on `wasm32`, where output goes to the browser console.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WriteStyle {
    #[default]
    Auto,
    Always,
    Never,
}

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "prism_engine=debug,wgpu_core=warn").
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl LoggingConfig {
    /// Returns the filter string that will be handed to the logger.
    ///
    /// Precedence: explicit `env_filter`, then `RUST_LOG`, then the default.
    pub fn resolved_filter(&self, rust_log: Option<String>) -> String {
        self.env_filter
            .clone()
            .or(rust_log)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; later calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolved_filter(std::env::var("RUST_LOG").ok());
        install(&filter, config.write_style);
        log::debug!("logging initialized ({filter})");
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn install(filter: &str, style: WriteStyle) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    builder.write_style(match style {
        WriteStyle::Auto => env_logger::WriteStyle::Auto,
        WriteStyle::Always => env_logger::WriteStyle::Always,
        WriteStyle::Never => env_logger::WriteStyle::Never,
    });

    // Another logger may already be installed by an embedding host.
    if let Err(e) = builder.try_init() {
        log::warn!("logger already initialized: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn install(filter: &str, _style: WriteStyle) {
    console_error_panic_hook::set_once();

    // The console backend takes a single level; use the most verbose global directive.
    let level = filter
        .split(',')
        .filter(|d| !d.contains('='))
        .find_map(|d| d.trim().parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);

    if let Err(e) = console_log::init_with_level(level) {
        log::warn!("logger already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let cfg = LoggingConfig {
            env_filter: Some("debug".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_filter(Some("warn".to_string())), "debug");
    }

    #[test]
    fn env_filter_used_when_no_explicit_filter() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.resolved_filter(Some("trace".to_string())), "trace");
    }

    #[test]
    fn blank_filters_fall_back_to_default() {
        let cfg = LoggingConfig {
            env_filter: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_filter(None), DEFAULT_FILTER);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}

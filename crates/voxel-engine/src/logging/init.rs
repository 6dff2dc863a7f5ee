use std::sync::Once;

/// Logger configuration.
///
/// `filter` uses `env_logger` directive syntax, e.g. `"info"` or
/// `"voxel_engine=trace,wgpu=warn"`. When unset, `RUST_LOG` is consulted,
/// then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Returns the filter directives this config resolves to.
    fn resolve_filter(&self) -> Option<String> {
        self.filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .filter(|f| !f.trim().is_empty())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolve_filter() {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info; keep it at warn unless asked.
                builder
                    .filter_level(config.default_level)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);

        // try_init: a test harness may already own the global logger.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig {
            filter: Some("voxel_engine=trace".to_string()),
            ..LoggingConfig::default()
        };
        assert_eq!(cfg.resolve_filter().as_deref(), Some("voxel_engine=trace"));
    }

    #[test]
    fn blank_filter_is_ignored() {
        let cfg = LoggingConfig {
            filter: Some("   ".to_string()),
            ..LoggingConfig::default()
        };
        // Falls through to RUST_LOG, which may or may not be set in CI.
        let resolved = cfg.resolve_filter();
        assert_ne!(resolved.as_deref(), Some("   "));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}

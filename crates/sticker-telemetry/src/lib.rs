//! Tracing setup shared by the sticker binaries.

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Crates whose per-sticker events are shown in verbose mode.
const WORKSPACE_TARGETS: [&str; 5] = [
    "sticker_batch",
    "sticker_generator",
    "sticker_render",
    "sticker_storage",
    "stickergen",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryOptions {
    /// Show per-sticker events (`debug` level for the workspace crates).
    pub verbose: bool,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
}

/// The filter used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool) -> String {
    if !verbose {
        return "info".to_string();
    }
    let mut directives = vec!["info".to_string()];
    directives.extend(WORKSPACE_TARGETS.iter().map(|target| format!("{target}=debug")));
    directives.join(",")
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag.
pub fn init(options: TelemetryOptions) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // `log` records from dependencies (e.g. sqlx) are forwarded as events.
    tracing_log::LogTracer::init()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(options.verbose)))?;

    let builder = fmt().with_env_filter(filter).with_target(false);
    if options.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_mode_logs_info() {
        assert_eq!(default_directives(false), "info");
    }

    #[test]
    fn verbose_mode_enables_debug_for_workspace_crates() {
        let directives = default_directives(true);

        assert!(directives.starts_with("info,"));
        assert!(directives.contains("sticker_batch=debug"));
        assert!(directives.contains("stickergen=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}

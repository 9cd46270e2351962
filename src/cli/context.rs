use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Process-wide settings taken from the global CLI flags.
#[derive(Debug, Default)]
struct Settings {
    verbose: bool,
    quiet: bool,
    config: Option<PathBuf>,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Record the global flags. Only the first call has an effect.
pub fn init(verbose: bool, quiet: bool, config: Option<PathBuf>) {
    let _ = SETTINGS.set(Settings {
        verbose,
        quiet,
        config,
    });
}

fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}

pub fn is_verbose() -> bool {
    settings().verbose
}

pub fn is_quiet() -> bool {
    settings().quiet
}

/// Explicit config file from `--config` / `HMI_AUDIT_CONFIG`, if any.
pub fn config_path() -> Option<&'static Path> {
    settings().config.as_deref()
}

// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

/// Initializes the logging framework to capture logs from the crates specified with a minimum
/// [`log::Level`] of [`Info`](log::Level::Info) on debug builds and [`Warn`](log::Level::Warn) on
/// release builds.  On desktop platforms, these defaults can be overridden by setting the
/// `RUST_LOG` environment variable.
pub struct LoggingConfig {
    crates: Vec<&'static str>,
}

impl LoggingConfig {
    /// Creates a new [`LoggingConfig`] instance with the specified list of crates to capture logs
    /// from.
    pub fn new(crates: Vec<&'static str>) -> Self {
        Self { crates }
    }

    /// The level used when `RUST_LOG` is not set.
    pub fn default_level() -> log::LevelFilter {
        if cfg!(debug_assertions) {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Builds the `RUST_LOG`-style filter string applying `level` to every configured crate.
    pub fn filter_string(&self, level: log::LevelFilter) -> String {
        let level_str = level.as_str().to_ascii_lowercase();
        self.crates
            .iter()
            .map(|&pkg_name| format!("{}={}", pkg_name.replace('-', "_"), level_str))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Installs the global logger.  Must be called at most once per process.
    pub fn init(&self) {
        let level = Self::default_level();
        crate::platform_impl::init_with_filter(&self.filter_string(level), level);
    }
}


// End of File

// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # moledit's Logging Framework
//!
//! This crate initializes the logging framework for the molecule editor.  It uses the [`log`]
//! crate for logging, [`env_logger`] to read logging configuration from the environment on
//! desktop platforms, and `console_log` to output logs to the Javascript console when the editor
//! is hosted in the browser.  To initialize these frameworks, create a [`LoggingConfig`] listing
//! the crates to capture and call [`LoggingConfig::init`] once at startup.
//!
//! By default, the logging level is set to [`Info`](log::Level::Info) for debug builds, and
//! [`Warn`](log::Level::Warn) for release builds. This can be overridden by setting the `RUST_LOG`
//! environment variable, like so:
//!
//! ```sh
//! $> RUST_LOG=moledit_molecule=debug cargo run -- session.json
//! ```

mod platform;
mod platform_impl;
pub use platform::LoggingConfig;

/// A module which is typically glob imported.
pub mod prelude {
    pub use super::LoggingConfig;
}

// End of File

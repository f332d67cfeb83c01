// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

pub(crate) fn init_with_filter(_filter_string: &str, log_level: log::LevelFilter) {
    let log_level = match log_level {
        log::LevelFilter::Off => {
            // console_log does not have an "off" level, so just don't configure it.
            return;
        }
        log::LevelFilter::Error => log::Level::Error,
        log::LevelFilter::Warn => log::Level::Warn,
        log::LevelFilter::Info => log::Level::Info,
        log::LevelFilter::Debug => log::Level::Debug,
        log::LevelFilter::Trace => log::Level::Trace,
    };
    if let Err(err) = console_log::init_with_level(log_level) {
        log::warn!("Logging was already initialized: {}", err);
    }
}

// End of File

// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

pub(crate) fn init_with_filter(filter_string: &str, _log_level: log::LevelFilter) {
    // Use env_logger's builder API to avoid unsafe set_var call
    let result = if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter_string))
            .try_init()
    } else {
        env_logger::try_init()
    };
    if let Err(err) = result {
        log::warn!("Logging was already initialized: {}", err);
    }
}

// End of File

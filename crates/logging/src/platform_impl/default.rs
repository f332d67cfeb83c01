// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

// No logger backend on these platforms; records are dropped by the `log` facade.
pub(crate) fn init_with_filter(_filter_string: &str, log_level: log::LevelFilter) {
    log::set_max_level(log_level);
}

// End of File

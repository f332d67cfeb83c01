// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! The molecule editor widget: the editor core from [`molecule`] embedded behind a host
//! seam, with pointer transformation, the element picker, drawing and persistence.

pub mod config;
pub mod drawing;
pub mod picker;
pub mod replay;
pub mod transform;
pub mod widget;

pub use config::{BondingType, Language, PickerOptions, WidgetConfiguration};
pub use drawing::Drawing;
pub use picker::{ElementPicker, PickError, PickRequest};
pub use transform::{CanvasTransform, PointerEvent, ViewportTransform};
pub use widget::{MoleculeEditorWidget, WidgetHost};

pub const APP_NAME: &str = "moledit";

/// The crates whose logs are captured.
pub const LOG_CRATES: &[&str] = &[
    env!("CARGO_PKG_NAME"),
    "moledit-common",
    "moledit-logging",
    "moledit-molecule",
    "moledit-periodic-table",
];

// End of File

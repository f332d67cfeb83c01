// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Number of undo steps kept by the editor.
pub const EDITOR_HISTORY_CAPACITY: usize = 100;

/// Atoms further away than this never capture a placement or a drag.
pub const SNAP_RADIUS: f32 = 80.0;
/// Within this distance the nearest atom captures even when others are in range.
pub const SNAP_PROXIMITY_RADIUS: f32 = 60.0;

pub const MAX_ELECTRONS: u8 = 8;

pub const ATOM_HANDLE_RADIUS: f32 = 20.0;
pub const SINGLE_ELECTRON_DIST: f32 = 28.0;
pub const SINGLE_ELECTRON_RADIUS: f32 = 4.0;
pub const DOUBLE_ELECTRON_DIST: f32 = 28.0;
pub const DOUBLE_ELECTRON_WIDTH: f32 = 12.0;
pub const DOUBLE_ELECTRON_RADIUS: f32 = 3.5;

pub const BOND_SEPARATION: f32 = 6.0;
pub const ELECTRON_BOND_RADIUS: f32 = 4.0;
pub const VALENCE_BOND_RADIUS: f32 = 4.0;

/// Tunables of the interaction model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Undo steps kept before the oldest one is discarded.
    pub history_capacity: usize,
    /// Outer capture radius of the snap search.
    pub snap_radius: f32,
    /// Inner capture radius of the snap search.
    pub snap_proximity_radius: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: EDITOR_HISTORY_CAPACITY,
            snap_radius: SNAP_RADIUS,
            snap_proximity_radius: SNAP_PROXIMITY_RADIUS,
        }
    }
}

// End of File

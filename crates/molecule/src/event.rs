// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use common::{math::vec2_array, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasEventKind {
    Move,
    Up,
    Down,
    Click,
}

/// A pointer event already mapped into model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CanvasEvent {
    #[serde(rename = "event")]
    pub kind: CanvasEventKind,
    #[serde(with = "vec2_array")]
    pub position: Vec2,
}

impl CanvasEvent {
    pub fn new(kind: CanvasEventKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(CanvasEventKind::Move, Vec2::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(CanvasEventKind::Up, Vec2::new(x, y))
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(CanvasEventKind::Down, Vec2::new(x, y))
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::new(CanvasEventKind::Click, Vec2::new(x, y))
    }
}


// End of File

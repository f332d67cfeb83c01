// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use common::{math::vec2_array, Vec2};
use molecule::{CanvasEvent, CanvasEventKind};
use serde::{Deserialize, Serialize};

/// A raw pointer event in client (device) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    #[serde(rename = "event")]
    pub kind: CanvasEventKind,
    #[serde(with = "vec2_array")]
    pub client_pos: Vec2,
}

impl PointerEvent {
    pub fn new(kind: CanvasEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            client_pos: Vec2::new(x, y),
        }
    }
}

/// Maps raw pointer events into model space. The editor core never sees client
/// coordinates.
pub trait CanvasTransform {
    fn transform(&self, event: &PointerEvent) -> CanvasEvent;
}

impl<F> CanvasTransform for F
where
    F: Fn(&PointerEvent) -> CanvasEvent,
{
    fn transform(&self, event: &PointerEvent) -> CanvasEvent {
        self(event)
    }
}

/// A canvas scrolled by `offset` and zoomed by `scale`: model = (client - offset) / scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ViewportTransform {
    #[serde(with = "vec2_array")]
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::zero(),
            scale: 1.0,
        }
    }
}

impl ViewportTransform {
    pub fn to_model(&self, client_pos: Vec2) -> Vec2 {
        if self.scale == 0.0 {
            log::warn!("Viewport scale is zero, ignoring it");
            return client_pos - self.offset;
        }
        (client_pos - self.offset) / self.scale
    }
}

impl CanvasTransform for ViewportTransform {
    fn transform(&self, event: &PointerEvent) -> CanvasEvent {
        CanvasEvent::new(event.kind, self.to_model(event.client_pos))
    }
}


// End of File

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub use ultraviolet::Vec2;

/// Converts degrees to radians. Angles grow counter-clockwise from the +x axis.
pub fn deg(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// The angle of the line running from `from` to `to`.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// The unit vector pointing along `angle`.
pub fn angle_position(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

pub fn middle(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).mag()
}

/// Serializes a [`Vec2`] as a two element `[x, y]` array, the layout used by the
/// persisted editor state.
pub mod vec2_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use ultraviolet::Vec2;

    pub fn serialize<S>(value: &Vec2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [value.x, value.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}


// End of File

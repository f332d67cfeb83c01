// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Shared vocabulary of the molecule editor: item identifiers and the 2D math the
//! model, state machine and renderer all speak.

pub mod ids;
pub mod math;

pub use ids::{AtomId, BondId, IdCounter, ItemRef};
pub use math::Vec2;

// End of File

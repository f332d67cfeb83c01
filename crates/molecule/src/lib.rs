// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The molecule editor core: the atom/bond model, its graph index, the interaction
//! state machine with snap search, bounded undo history and the view derivation.

pub mod config;
mod event;
mod graph;
mod history;
mod molecule;
mod molecule_editor;
mod render;
mod state;
mod state_data;
pub mod view;

pub use crate::event::{CanvasEvent, CanvasEventKind};
pub use crate::graph::MoleculeEditorGraph;
pub use crate::history::{History, HistoryMode};
pub use crate::molecule::{
    AtomModel, BondModel, BondMultiplicity, InvalidMultiplicity, MoleculeEditorModel,
};
pub use crate::molecule_editor::{FollowUp, MoleculeEditor};
pub use crate::render::render;
pub use crate::state::{find_snap, EditorState, SnapResult, ToolMode};
pub use crate::view::{
    AtomView, BondView, ElectronKind, ElectronOrientation, ElectronView, LineDef,
    MoleculeEditorView,
};

// End of File

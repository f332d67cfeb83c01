// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Scripted sessions: a recorded list of user actions replayed against a widget.

use anyhow::{Context, Result};
use common::{AtomId, BondId};
use futures::executor::block_on;
use molecule::{BondMultiplicity, ToolMode};
use periodic_table::Element;
use serde::{Deserialize, Serialize};

use crate::config::WidgetConfiguration;
use crate::drawing::Drawing;
use crate::transform::{PointerEvent, ViewportTransform};
use crate::widget::{MoleculeEditorWidget, WidgetHost};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub state_data: String,
    pub configuration: WidgetConfiguration,
    pub viewport: ViewportTransform,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    Pointer,
    Duplicate,
    Bonding(BondMultiplicity),
    GroupMove,
}

impl From<Tool> for ToolMode {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::Pointer => ToolMode::Pointer,
            Tool::Duplicate => ToolMode::Duplicate,
            Tool::Bonding(multiplicity) => ToolMode::Bonding(multiplicity),
            Tool::GroupMove => ToolMode::GroupMove,
        }
    }
}

/// One user action. Pointer positions are client coordinates.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    Tool {
        tool: Tool,
    },
    /// Picks `element` from the table, then starts placing it at the pointer.
    AddElement {
        element: Element,
        #[serde(flatten)]
        pointer: PointerEvent,
    },
    /// Opens the table and closes it again without picking.
    DismissPicker,
    Canvas {
        #[serde(flatten)]
        pointer: PointerEvent,
    },
    Atom {
        id: AtomId,
        #[serde(flatten)]
        pointer: PointerEvent,
    },
    Bond {
        id: BondId,
        #[serde(flatten)]
        pointer: PointerEvent,
    },
    Electrons {
        delta: i8,
    },
    Delete,
    Undo,
    Redo,
    Clear,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutput {
    pub state_data: String,
    /// How often the widget reported new state data.
    pub persisted: usize,
    pub drawing: Drawing,
}

struct ReplayHost {
    initial: String,
    configuration: WidgetConfiguration,
    persisted: usize,
}

impl WidgetHost for ReplayHost {
    fn state_data(&self) -> String {
        self.initial.clone()
    }

    fn configuration(&self) -> WidgetConfiguration {
        self.configuration.clone()
    }

    fn persist_state_data(&mut self, state_data: String) {
        log::debug!("Persisting {} bytes of state data", state_data.len());
        self.persisted += 1;
    }
}

pub fn replay(session: Session) -> Result<ReplayOutput> {
    let host = ReplayHost {
        initial: session.state_data,
        configuration: session.configuration,
        persisted: 0,
    };
    let mut widget = MoleculeEditorWidget::new(host);
    widget.register_canvas_transform(session.viewport);

    for (index, action) in session.actions.into_iter().enumerate() {
        log::debug!("Action {}: {:?}", index, action);
        apply(&mut widget, action).with_context(|| format!("action {} failed", index))?;
    }

    let drawing = widget.drawing();
    let state_data = widget
        .editor()
        .model()
        .to_state_data()
        .context("failed to serialize the final state")?;
    let host = widget.into_host();

    Ok(ReplayOutput {
        state_data,
        persisted: host.persisted,
        drawing,
    })
}

fn apply(widget: &mut MoleculeEditorWidget<ReplayHost>, action: Action) -> Result<()> {
    match action {
        Action::Tool { tool } => widget.set_tool_mode(tool.into()),
        Action::AddElement { element, pointer } => {
            let request = widget.pick_element_from_table();
            widget.element_picker_callback(element);
            let element = block_on(request)?;
            widget.add_element_to_canvas(element, &pointer);
        }
        Action::DismissPicker => {
            let request = widget.pick_element_from_table();
            widget.dismiss_element_picker();
            if let Err(err) = block_on(request) {
                log::info!("Element picker: {}", err);
            }
        }
        Action::Canvas { pointer } => widget.handle_canvas_event(&pointer),
        Action::Atom { id, pointer } => widget.handle_atom_event(&id, &pointer),
        Action::Bond { id, pointer } => widget.handle_bond_event(&id, &pointer),
        Action::Electrons { delta } => widget.change_selected_electrons(delta),
        Action::Delete => widget.delete_selected_item(),
        Action::Undo => {
            widget.undo();
        }
        Action::Redo => {
            widget.redo();
        }
        Action::Clear => widget.clear(),
    }
    Ok(())
}

// End of File

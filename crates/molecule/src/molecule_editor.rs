// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

use common::{AtomId, BondId, IdCounter, ItemRef, Vec2};
use periodic_table::Element;

use crate::config::EditorConfig;
use crate::event::{CanvasEvent, CanvasEventKind};
use crate::graph::MoleculeEditorGraph;
use crate::history::{History, HistoryMode};
use crate::molecule::{BondMultiplicity, MoleculeEditorModel};
use crate::render::render;
use crate::state::{EditorState, ToolMode};
use crate::view::MoleculeEditorView;

/// A transition scheduled to run after the change that caused it has been observed.
#[derive(Debug, Clone, PartialEq)]
pub enum FollowUp {
    /// Selects the new atom, or starts placing another one, depending on the tool mode
    /// at the time it runs.
    AfterAtomAdded {
        atom_id: AtomId,
        element: Element,
        position: Vec2,
    },
}

/// Drives the editor: turns pointer events into state transitions and model changes.
///
/// The model lives in a bounded [`History`]; the graph index is rebuilt after every
/// change of the model, so it is always current when read.
pub struct MoleculeEditor {
    model: History<MoleculeEditorModel>,
    graph: MoleculeEditorGraph,
    tool_mode: ToolMode,
    state: EditorState,
    deferred: VecDeque<FollowUp>,
    ids: IdCounter,
    config: EditorConfig,
}

impl Default for MoleculeEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl MoleculeEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            model: History::new(MoleculeEditorModel::empty(), config.history_capacity),
            graph: MoleculeEditorGraph::default(),
            tool_mode: ToolMode::default(),
            state: EditorState::Idle,
            deferred: VecDeque::new(),
            ids: IdCounter::default(),
            config,
        }
    }

    /// Starts a session from serialized state data. Undo history is discarded.
    pub fn load_state_data(&mut self, state_data: &str) {
        let model = MoleculeEditorModel::from_state_data(state_data);
        log::info!(
            "Loaded editor model with {} atoms and {} bonds",
            model.atoms.len(),
            model.bonds.len()
        );
        self.set_model(model, false);
        self.set_state(EditorState::Idle);
    }

    pub fn model(&self) -> &MoleculeEditorModel {
        self.model.get()
    }

    pub fn graph(&self) -> &MoleculeEditorGraph {
        &self.graph
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Changes whenever the model does, including undo and redo.
    pub fn revision(&self) -> u64 {
        self.model.revision()
    }

    pub fn can_undo(&self) -> bool {
        self.model.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.model.can_redo()
    }

    pub fn undo_count(&self) -> usize {
        self.model.undo_count()
    }

    pub fn view(&self) -> MoleculeEditorView {
        render(self.model.get(), &self.graph, self.tool_mode, &self.state)
    }

    /// Replaces the model. With `record` the change is an undo step, otherwise the
    /// history starts over.
    pub fn set_model(&mut self, model: MoleculeEditorModel, record: bool) {
        self.model.set(model, record);
        self.model_changed();
    }

    pub fn clear(&mut self) {
        log::info!("Clearing editor model");
        self.set_model(MoleculeEditorModel::empty(), true);
        self.set_state(EditorState::Idle);
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.model.undo();
        if changed {
            self.model_changed();
            self.set_state(EditorState::Idle);
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.model.redo();
        if changed {
            self.model_changed();
            self.set_state(EditorState::Idle);
        }
        changed
    }

    /// Switches the tool mode. Choosing the active mode again changes nothing. The interaction in progress is abandoned, except that
    /// picking a multiplicity while drawing a bond keeps drawing it with the new
    /// multiplicity, picking one while a bond is selected applies it to that bond, and
    /// picking duplicate or bonding mode keeps an atom placement going.
    pub fn set_tool_mode(&mut self, tool_mode: ToolMode) {
        if tool_mode == self.tool_mode {
            return;
        }
        log::debug!("Tool mode: {:?} -> {:?}", self.tool_mode, tool_mode);
        self.tool_mode = tool_mode;

        match (&mut self.state, tool_mode) {
            (EditorState::AddingBond { multiplicity, .. }, ToolMode::Bonding(selected)) => {
                *multiplicity = selected;
            }
            (
                EditorState::Selected {
                    item: ItemRef::Bond(bond_id),
                },
                ToolMode::Bonding(selected),
            ) => {
                let bond_id = bond_id.clone();
                if self.model().bond(&bond_id).is_some() {
                    self.update_model(HistoryMode::Record, |model| {
                        model.set_bond_multiplicity(&bond_id, selected)
                    });
                }
            }
            (EditorState::AddingAtom { .. }, ToolMode::Duplicate | ToolMode::Bonding(_)) => {}
            _ => self.set_state(EditorState::Idle),
        }
    }

    /// Starts placing an atom of `element` at `position`.
    pub fn add_element(&mut self, element: Element, position: Vec2) {
        self.set_state(EditorState::add_atom(element, position));
    }

    /// Adds `delta` electrons to the selected atom.
    pub fn change_selected_electrons(&mut self, delta: i8) {
        if let EditorState::Selected {
            item: ItemRef::Atom(atom_id),
        } = &self.state
        {
            let atom_id = atom_id.clone();
            self.update_model(HistoryMode::Record, |model| {
                model.change_atom_electrons(&atom_id, delta)
            });
        }
    }

    pub fn delete_selected_item(&mut self) {
        if let EditorState::Selected { item } = &self.state {
            let item = item.clone();
            self.update_model(HistoryMode::Record, |model| model.delete_item(&item));
            self.set_state(EditorState::Idle);
        }
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Runs the follow-up transitions scheduled by earlier events. Returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let mut count = 0;
        while let Some(follow_up) = self.deferred.pop_front() {
            log::debug!("Running follow-up {:?}", follow_up);
            match follow_up {
                FollowUp::AfterAtomAdded {
                    atom_id,
                    element,
                    position,
                } => self.after_atom_added(atom_id, element, position),
            }
            count += 1;
        }
        count
    }

    fn after_atom_added(&mut self, atom_id: AtomId, element: Element, position: Vec2) {
        match self.tool_mode {
            ToolMode::Pointer => self.set_state(EditorState::select(atom_id)),
            ToolMode::Duplicate | ToolMode::Bonding(_) => {
                self.set_state(EditorState::add_atom(element, position))
            }
            ToolMode::GroupMove => {}
        }
    }

    // Canvas events

    pub fn handle_canvas_event(&mut self, event: CanvasEvent) {
        let position = event.position;
        match event.kind {
            CanvasEventKind::Move => self.handle_canvas_move(position),
            CanvasEventKind::Up => self.handle_canvas_up(position),
            CanvasEventKind::Down => {}
            CanvasEventKind::Click => self.handle_canvas_click(position),
        }
    }

    fn handle_canvas_click(&mut self, position: Vec2) {
        match &self.state {
            EditorState::Selected { .. } | EditorState::AddingBond { .. } => {
                self.set_state(EditorState::Idle)
            }
            EditorState::AddingAtom { element, .. } => {
                let element = *element;
                self.commit_atom(element, position);
            }
            _ => {}
        }
    }

    /// Places the atom being added at `position`, or at the snap target with a bond to
    /// it, and schedules the follow-up.
    fn commit_atom(&mut self, element: Element, position: Vec2) {
        let snap = self.search_snap(EditorState::add_atom(element, position)).snap().cloned();

        let atom_id = self.next_atom_id();
        let final_position = match snap {
            Some(snap) => {
                let bond_id = self.next_bond_id();
                let multiplicity = self.tool_mode.bond_multiplicity();
                let new_atom = atom_id.clone();
                self.update_model(HistoryMode::Record, |model| {
                    model
                        .add_atom(new_atom.clone(), element, snap.snap_pos)
                        .add_bond(bond_id, &new_atom, &snap.target_id, multiplicity)
                });
                snap.snap_pos
            }
            None => {
                let new_atom = atom_id.clone();
                self.update_model(HistoryMode::Record, |model| {
                    model.add_atom(new_atom, element, position)
                });
                position
            }
        };

        self.set_state(EditorState::Idle);
        self.deferred.push_back(FollowUp::AfterAtomAdded {
            atom_id,
            element,
            position: final_position,
        });
    }

    fn handle_canvas_move(&mut self, position: Vec2) {
        let next = match &self.state {
            EditorState::AddingAtom { element, .. } => {
                self.search_snap(EditorState::add_atom(*element, position))
            }
            EditorState::PreMoveAtom { atom_id } | EditorState::MovingAtom { atom_id, .. } => {
                self.search_snap(EditorState::move_atom(atom_id.clone(), position))
            }
            EditorState::AddingBond {
                start_id,
                multiplicity,
                ..
            } => EditorState::add_bond(start_id.clone(), *multiplicity, position),
            EditorState::MovingGroup {
                start_pos, group, ..
            } => EditorState::MovingGroup {
                start_pos: *start_pos,
                target_pos: position,
                group: group.clone(),
            },
            EditorState::Idle | EditorState::Selected { .. } => return,
        };
        self.set_state(next);
    }

    fn handle_canvas_up(&mut self, position: Vec2) {
        match self.state.clone() {
            EditorState::PreMoveAtom { .. } => self.set_state(EditorState::Idle),
            EditorState::MovingAtom { atom_id, snap, .. } => {
                match snap {
                    Some(snap) => {
                        let bond_id = self.next_bond_id();
                        self.update_model(HistoryMode::Record, |model| {
                            model.move_atom(&atom_id, snap.snap_pos).add_bond(
                                bond_id,
                                &atom_id,
                                &snap.target_id,
                                BondMultiplicity::Single,
                            )
                        });
                    }
                    None => self.update_model(HistoryMode::Record, |model| {
                        model.move_atom(&atom_id, position)
                    }),
                }
                self.set_state(EditorState::Idle);
            }
            EditorState::MovingGroup {
                start_pos,
                target_pos,
                group,
            } => {
                let delta = target_pos - start_pos;
                self.update_model(HistoryMode::Record, |model| model.move_group(delta, &group));
                self.set_state(EditorState::Idle);
            }
            _ => {}
        }
    }

    // Atom events

    pub fn handle_atom_event(&mut self, atom_id: &AtomId, event: CanvasEvent) {
        // Previews are not model items, and a placement preview covers whatever atom
        // is under the pointer.
        if self.is_temporary_atom(atom_id) || matches!(self.state, EditorState::AddingAtom { .. })
        {
            self.handle_canvas_event(event);
            return;
        }

        let position = event.position;
        match event.kind {
            CanvasEventKind::Move => self.handle_canvas_move(position),
            CanvasEventKind::Up => self.handle_atom_up(atom_id, position),
            CanvasEventKind::Down => self.handle_atom_down(atom_id, position),
            CanvasEventKind::Click => self.handle_atom_click(atom_id, position),
        }
    }

    fn handle_atom_click(&mut self, atom_id: &AtomId, position: Vec2) {
        // Clicking a second atom always completes the bond being drawn
        if let EditorState::AddingBond {
            start_id,
            multiplicity,
            ..
        } = &self.state
        {
            if start_id != atom_id {
                let (start_id, multiplicity) = (start_id.clone(), *multiplicity);
                self.complete_add_bond(&start_id, atom_id, multiplicity);
                return;
            }
        }

        match self.tool_mode {
            ToolMode::Pointer => self.toggle_atom_selected(atom_id),
            ToolMode::Duplicate => {
                if let Some(atom) = self.model().atom(atom_id) {
                    let element = atom.element_nr;
                    self.set_state(EditorState::add_atom(element, position));
                }
            }
            ToolMode::Bonding(_) | ToolMode::GroupMove => {}
        }
    }

    fn toggle_atom_selected(&mut self, atom_id: &AtomId) {
        let deselect = match &self.state {
            EditorState::Selected { .. } => self.state.is_atom_selected(atom_id),
            EditorState::PreMoveAtom { atom_id: pending } => pending == atom_id,
            _ => false,
        };
        if deselect {
            self.set_state(EditorState::Idle);
        } else {
            self.set_state(EditorState::select(atom_id.clone()));
        }
    }

    fn handle_atom_up(&mut self, atom_id: &AtomId, position: Vec2) {
        match &self.state {
            EditorState::AddingBond {
                start_id,
                multiplicity,
                ..
            } => {
                if start_id != atom_id {
                    let (start_id, multiplicity) = (start_id.clone(), *multiplicity);
                    self.complete_add_bond(&start_id, atom_id, multiplicity);
                }
            }
            _ => self.handle_canvas_up(position),
        }
    }

    fn handle_atom_down(&mut self, atom_id: &AtomId, position: Vec2) {
        match self.tool_mode {
            ToolMode::Pointer => self.set_state(EditorState::prepare_move_atom(atom_id.clone())),
            // Duplicating happens on click
            ToolMode::Duplicate => {}
            ToolMode::Bonding(multiplicity) => {
                let restart = match &self.state {
                    EditorState::AddingBond { start_id, .. } => start_id == atom_id,
                    _ => true,
                };
                if restart {
                    self.set_state(EditorState::add_bond(atom_id.clone(), multiplicity, position));
                }
            }
            ToolMode::GroupMove => self.begin_group_move(atom_id, position),
        }
    }

    fn begin_group_move(&mut self, pivot: &AtomId, start_pos: Vec2) {
        let group = self.graph.find_group(pivot);
        if group.is_empty() {
            log::debug!("Atom \"{}\" has no group to move", pivot);
            return;
        }
        self.set_state(EditorState::group_move(start_pos, group));
    }

    fn complete_add_bond(&mut self, start_id: &AtomId, end_id: &AtomId, multiplicity: BondMultiplicity) {
        let bond_id = self.next_bond_id();
        self.update_model(HistoryMode::Record, |model| {
            model.add_bond(bond_id, start_id, end_id, multiplicity)
        });
        self.set_state(EditorState::Idle);
    }

    // Bond events

    pub fn handle_bond_event(&mut self, bond_id: &BondId, event: CanvasEvent) {
        if self.is_temporary_bond(bond_id) {
            self.handle_canvas_event(event);
            return;
        }

        match event.kind {
            CanvasEventKind::Move | CanvasEventKind::Up | CanvasEventKind::Down => {
                self.handle_canvas_event(event)
            }
            CanvasEventKind::Click => self.handle_bond_click(bond_id),
        }
    }

    fn handle_bond_click(&mut self, bond_id: &BondId) {
        match self.tool_mode {
            ToolMode::Pointer => {
                if self.state.is_bond_selected(bond_id) {
                    self.set_state(EditorState::Idle);
                } else {
                    self.set_state(EditorState::select(bond_id.clone()));
                }
            }
            ToolMode::Bonding(multiplicity) => {
                self.update_model(HistoryMode::Record, |model| {
                    model.set_bond_multiplicity(bond_id, multiplicity)
                });
            }
            ToolMode::Duplicate | ToolMode::GroupMove => {}
        }
    }

    // Helpers

    fn is_temporary_atom(&self, atom_id: &AtomId) -> bool {
        atom_id.is_temporary() || !self.model().atoms.contains_key(atom_id)
    }

    fn is_temporary_bond(&self, bond_id: &BondId) -> bool {
        bond_id.is_temporary() || !self.model().bonds.contains_key(bond_id)
    }

    fn search_snap(&self, state: EditorState) -> EditorState {
        state.search_snap(
            &self.graph,
            self.config.snap_radius,
            self.config.snap_proximity_radius,
        )
    }

    fn set_state(&mut self, state: EditorState) {
        if std::mem::discriminant(&state) != std::mem::discriminant(&self.state) {
            log::debug!("Editor state: {} -> {}", self.state.name(), state.name());
        }
        self.state = state;
    }

    fn update_model(&mut self, mode: HistoryMode, f: impl FnOnce(MoleculeEditorModel) -> MoleculeEditorModel) {
        self.model.update(mode, f);
        self.model_changed();
    }

    fn model_changed(&mut self) {
        self.graph = MoleculeEditorGraph::create_from(self.model.get());
    }

    fn next_atom_id(&mut self) -> AtomId {
        let atoms = &self.model.get().atoms;
        self.ids.next_atom_id(|id| atoms.contains_key(id))
    }

    fn next_bond_id(&mut self) -> BondId {
        let bonds = &self.model.get().bonds;
        self.ids.next_bond_id(|id| bonds.contains_key(id))
    }
}


// End of File

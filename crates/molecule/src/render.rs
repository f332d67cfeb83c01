// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Derives the [`MoleculeEditorView`] from the model and the interaction state.
//!
//! Rendering is a pure function of its inputs. Inconsistent references (a bond to a
//! missing atom, a state naming an unknown item) are skipped with a warning.

use std::collections::HashSet;

use common::{AtomId, BondId, Vec2};
use periodic_table::Element;

use crate::graph::MoleculeEditorGraph;
use crate::molecule::{AtomModel, BondMultiplicity, MoleculeEditorModel};
use crate::state::{EditorState, ToolMode};
use crate::view::{
    electron_views, prioritize_orientations, AtomView, BondView, ElectronOrientation,
    ElectronView, MoleculeEditorView,
};

pub fn render(
    model: &MoleculeEditorModel,
    graph: &MoleculeEditorGraph,
    tool_mode: ToolMode,
    state: &EditorState,
) -> MoleculeEditorView {
    let mut view = MoleculeEditorView::default();
    render_model_atoms(model, graph, state, &mut view.atoms);
    render_model_bonds(model, state, &mut view.bonds);
    render_temporary_atoms(model, state, &mut view.atoms);
    render_temporary_bonds(model, tool_mode, state, &mut view.bonds);
    view
}

fn render_model_atoms(
    model: &MoleculeEditorModel,
    graph: &MoleculeEditorGraph,
    state: &EditorState,
    atoms: &mut Vec<AtomView>,
) {
    for atom in model.atoms.values() {
        // Drawn by render_temporary_atoms at its drag position
        if state.is_moving_atom(&atom.item_id) {
            continue;
        }
        let id = &atom.item_id;
        atoms.push(AtomView {
            item_id: id.clone(),
            element: atom.element_nr,
            position: atom.position,
            electrons: atom_electron_views(atom, graph),
            selected: state.is_atom_selected(id),
            temporary: false,
            targeted: state.is_atom_bond_targeted(id) || state.is_atom_snap_targeted(id),
        });
    }
}

/// Places the electron symbols of `atom` on the sides not taken by its bonds, where
/// possible.
fn atom_electron_views(atom: &AtomModel, graph: &MoleculeEditorGraph) -> Vec<ElectronView> {
    if atom.electrons == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let occupied: Vec<ElectronOrientation> = graph
        .bonded_atoms(&atom.item_id)
        .map(|other| ElectronOrientation::from_delta(other.position - atom.position))
        .filter(|&orientation| seen.insert(orientation))
        .collect();

    electron_views(atom.electrons, &prioritize_orientations(&occupied))
}

fn render_model_bonds(model: &MoleculeEditorModel, state: &EditorState, bonds: &mut Vec<BondView>) {
    for bond in model.bonds.values() {
        let (Some(left), Some(right)) = (
            model.atom(&bond.left_atom_id),
            model.atom(&bond.right_atom_id),
        ) else {
            log::warn!("Skipping bond \"{}\": references a missing atom", bond.item_id);
            continue;
        };

        let (left_position, left_temporary) = visual_position(state, left);
        let (right_position, right_temporary) = visual_position(state, right);

        bonds.push(BondView {
            item_id: bond.item_id.clone(),
            multiplicity: bond.multiplicity,
            left_position,
            right_position,
            selected: state.is_bond_selected(&bond.item_id),
            temporary: left_temporary || right_temporary,
        });
    }
}

/// Where a bond end is drawn: an atom being dragged pulls its bonds along.
fn visual_position(state: &EditorState, atom: &AtomModel) -> (Vec2, bool) {
    if !state.is_moving_atom(&atom.item_id) {
        return (atom.position, false);
    }
    match state {
        EditorState::MovingAtom { target_pos, .. } => (*target_pos, true),
        EditorState::MovingGroup {
            start_pos,
            target_pos,
            ..
        } => (atom.position + (*target_pos - *start_pos), true),
        _ => (atom.position, false),
    }
}

fn render_temporary_atoms(
    model: &MoleculeEditorModel,
    state: &EditorState,
    atoms: &mut Vec<AtomView>,
) {
    match state {
        EditorState::Idle
        | EditorState::Selected { .. }
        | EditorState::PreMoveAtom { .. }
        | EditorState::AddingBond { .. } => {}
        EditorState::AddingAtom {
            element,
            hover_pos,
            snap,
        } => {
            let position = snap.as_ref().map_or(*hover_pos, |snap| snap.snap_pos);
            atoms.push(temporary_atom(AtomId::tmp_add(), *element, position));
        }
        EditorState::MovingAtom {
            atom_id,
            target_pos,
            snap,
        } => match model.atom(atom_id) {
            Some(atom) => {
                let position = snap.as_ref().map_or(*target_pos, |snap| snap.snap_pos);
                atoms.push(temporary_atom(
                    AtomId::tmp_move(atom_id),
                    atom.element_nr,
                    position,
                ));
            }
            None => log::warn!("Moving unknown atom \"{}\"", atom_id),
        },
        EditorState::MovingGroup {
            start_pos,
            target_pos,
            group,
        } => {
            let delta = *target_pos - *start_pos;
            let group_atoms = group
                .iter()
                .filter_map(|item| item.as_atom())
                .filter_map(|id| model.atom(id));
            for atom in group_atoms {
                atoms.push(temporary_atom(
                    AtomId::tmp_move(&atom.item_id),
                    atom.element_nr,
                    atom.position + delta,
                ));
            }
        }
    }
}

fn temporary_atom(item_id: AtomId, element: Element, position: Vec2) -> AtomView {
    AtomView {
        item_id,
        element,
        position,
        electrons: Vec::new(),
        selected: false,
        temporary: true,
        targeted: false,
    }
}

fn render_temporary_bonds(
    model: &MoleculeEditorModel,
    tool_mode: ToolMode,
    state: &EditorState,
    bonds: &mut Vec<BondView>,
) {
    match state {
        EditorState::Idle
        | EditorState::Selected { .. }
        | EditorState::PreMoveAtom { .. }
        | EditorState::MovingGroup { .. } => {}
        EditorState::AddingAtom { snap, .. } | EditorState::MovingAtom { snap, .. } => {
            let Some(snap) = snap else {
                return;
            };
            match model.atom(&snap.target_id) {
                Some(target) => bonds.push(temporary_bond(
                    snap.snap_pos,
                    target.position,
                    tool_mode.bond_multiplicity(),
                )),
                None => log::warn!("Snapped to unknown atom \"{}\"", snap.target_id),
            }
        }
        EditorState::AddingBond {
            start_id,
            multiplicity,
            hover_pos,
        } => match model.atom(start_id) {
            Some(start) => bonds.push(temporary_bond(start.position, *hover_pos, *multiplicity)),
            None => log::warn!("Adding bond from unknown atom \"{}\"", start_id),
        },
    }
}

fn temporary_bond(left: Vec2, right: Vec2, multiplicity: BondMultiplicity) -> BondView {
    BondView {
        item_id: BondId::tmp_add(),
        multiplicity,
        left_position: left,
        right_position: right,
        selected: false,
        temporary: true,
    }
}

#[cfg(test)]
mod tests {
    use common::ItemRef;

    use super::*;
    use crate::state::SnapResult;
    use crate::view::ElectronKind;

    fn id(id: &str) -> AtomId {
        AtomId::new(id)
    }

    /// a1 (0,0) - a2 (100,0), a3 (0,200) with 3 electrons
    fn model() -> MoleculeEditorModel {
        MoleculeEditorModel::empty()
            .add_atom(id("a1"), Element::Carbon, Vec2::new(0.0, 0.0))
            .add_atom(id("a2"), Element::Oxygen, Vec2::new(100.0, 0.0))
            .add_atom(id("a3"), Element::Nitrogen, Vec2::new(0.0, 200.0))
            .add_bond(BondId::new("b1"), &id("a1"), &id("a2"), BondMultiplicity::Single)
            .change_atom_electrons(&id("a3"), 3)
            .change_atom_electrons(&id("a1"), 1)
    }

    fn render_state(model: &MoleculeEditorModel, state: &EditorState) -> MoleculeEditorView {
        let graph = MoleculeEditorGraph::create_from(model);
        render(model, &graph, ToolMode::Pointer, state)
    }

    fn atom_view<'a>(view: &'a MoleculeEditorView, item: &str) -> &'a AtomView {
        view.atoms
            .iter()
            .find(|atom| atom.item_id.as_str() == item)
            .unwrap()
    }

    #[test]
    fn test_idle_view_mirrors_model() {
        let view = render_state(&model(), &EditorState::Idle);
        assert_eq!(view.atoms.len(), 3);
        assert_eq!(view.bonds.len(), 1);
        assert!(view.atoms.iter().all(|atom| !atom.temporary && !atom.selected));
        assert_eq!(view.bonds[0].left_position, Vec2::new(0.0, 0.0));
        assert_eq!(view.bonds[0].right_position, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_electrons_avoid_bonds() {
        let view = render_state(&model(), &EditorState::Idle);

        let a3 = atom_view(&view, "a3");
        assert_eq!(a3.electrons.len(), 2);
        assert_eq!(a3.electrons[0].kind, ElectronKind::Double);
        assert_eq!(a3.electrons[0].orientation, ElectronOrientation::N);
        assert_eq!(a3.electrons[1].kind, ElectronKind::Single);
        assert_eq!(a3.electrons[1].orientation, ElectronOrientation::E);

        // a1 is bonded towards the east
        let a1 = atom_view(&view, "a1");
        assert_eq!(a1.electrons.len(), 1);
        assert_eq!(a1.electrons[0].orientation, ElectronOrientation::W);
    }

    #[test]
    fn test_dangling_bond_is_skipped() {
        let mut model = model();
        model.atoms.shift_remove(&id("a2"));
        let view = render_state(&model, &EditorState::Idle);
        assert!(view.bonds.is_empty());
        assert_eq!(view.atoms.len(), 2);
    }

    #[test]
    fn test_selection_flags() {
        let model = model();
        let view = render_state(&model, &EditorState::select(id("a2")));
        assert!(atom_view(&view, "a2").selected);
        assert!(!atom_view(&view, "a1").selected);

        let view = render_state(&model, &EditorState::select(BondId::new("b1")));
        assert!(view.bonds[0].selected);
    }

    #[test]
    fn test_moving_atom_is_drawn_at_drag_position() {
        let state = EditorState::move_atom(id("a2"), Vec2::new(150.0, 50.0));
        let view = render_state(&model(), &state);

        assert!(view.atoms.iter().all(|atom| atom.item_id != id("a2")));
        let ghost = atom_view(&view, AtomId::tmp_move(&id("a2")).as_str());
        assert!(ghost.temporary);
        assert_eq!(ghost.element, Element::Oxygen);
        assert_eq!(ghost.position, Vec2::new(150.0, 50.0));

        assert!(view.bonds[0].temporary);
        assert_eq!(view.bonds[0].right_position, Vec2::new(150.0, 50.0));
    }

    #[test]
    fn test_moving_group_translates_members() {
        let group = vec![
            ItemRef::Atom(id("a1")),
            ItemRef::Atom(id("a2")),
            ItemRef::Bond(BondId::new("b1")),
        ];
        let state = EditorState::MovingGroup {
            start_pos: Vec2::new(0.0, 0.0),
            target_pos: Vec2::new(10.0, 20.0),
            group,
        };
        let view = render_state(&model(), &state);

        let temporary: Vec<_> = view.atoms.iter().filter(|atom| atom.temporary).collect();
        assert_eq!(temporary.len(), 2);
        assert_eq!(temporary[1].position, Vec2::new(110.0, 20.0));
        assert_eq!(view.bonds[0].left_position, Vec2::new(10.0, 20.0));
        assert!(view.bonds[0].temporary);
    }

    #[test]
    fn test_adding_atom_with_snap_previews_bond() {
        let model = model();
        let graph = MoleculeEditorGraph::create_from(&model);
        let state = EditorState::AddingAtom {
            element: Element::Hydrogen,
            hover_pos: Vec2::new(5.0, 210.0),
            snap: Some(SnapResult {
                target_id: id("a3"),
                snap_pos: Vec2::new(0.0, 200.0),
            }),
        };
        let view = render(
            &model,
            &graph,
            ToolMode::Bonding(BondMultiplicity::Double),
            &state,
        );

        let ghost = atom_view(&view, AtomId::tmp_add().as_str());
        assert_eq!(ghost.position, Vec2::new(0.0, 200.0));
        assert!(atom_view(&view, "a3").targeted);

        let preview = view.bonds.last().unwrap();
        assert_eq!(preview.item_id, BondId::tmp_add());
        assert_eq!(preview.multiplicity, BondMultiplicity::Double);
        assert!(preview.temporary);
    }

    #[test]
    fn test_adding_bond_previews_line() {
        let state = EditorState::add_bond(id("a1"), BondMultiplicity::Triple, Vec2::new(40.0, 40.0));
        let view = render_state(&model(), &state);
        assert!(atom_view(&view, "a1").targeted);
        let preview = view.bonds.last().unwrap();
        assert_eq!(preview.left_position, Vec2::new(0.0, 0.0));
        assert_eq!(preview.right_position, Vec2::new(40.0, 40.0));
        assert_eq!(preview.multiplicity, BondMultiplicity::Triple);

        // unknown start atom renders no preview
        let state = EditorState::add_bond(id("zz"), BondMultiplicity::Single, Vec2::zero());
        assert_eq!(render_state(&model(), &state).bonds.len(), 1);
    }
}

// End of File

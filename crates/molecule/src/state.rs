// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The interaction state of the editor and the snap search run while an atom follows
//! the pointer.

use common::{math, AtomId, BondId, ItemRef, Vec2};
use periodic_table::Element;

use crate::graph::MoleculeEditorGraph;
use crate::molecule::BondMultiplicity;

/// What the user intends to do with the pointer. Independent of [`EditorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Select and move single atoms.
    #[default]
    Pointer,
    /// Clicking an atom starts placing another atom of its element.
    Duplicate,
    /// Create bonds of the given multiplicity, or apply it to existing bonds.
    Bonding(BondMultiplicity),
    /// Drag whole connected groups.
    GroupMove,
}

impl ToolMode {
    /// The multiplicity of bonds created while this mode is active.
    pub fn bond_multiplicity(self) -> BondMultiplicity {
        match self {
            ToolMode::Bonding(multiplicity) => multiplicity,
            ToolMode::Pointer | ToolMode::Duplicate | ToolMode::GroupMove => {
                BondMultiplicity::Single
            }
        }
    }
}

/// An existing atom capturing a pending placement or drag.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub target_id: AtomId,
    /// The exact position of the target atom.
    pub snap_pos: Vec2,
}

/// The phase of the pointer interaction in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Selected {
        item: ItemRef,
    },
    /// The pointer went down on an atom and has not moved yet.
    PreMoveAtom {
        atom_id: AtomId,
    },
    MovingAtom {
        atom_id: AtomId,
        target_pos: Vec2,
        snap: Option<SnapResult>,
    },
    MovingGroup {
        start_pos: Vec2,
        target_pos: Vec2,
        group: Vec<ItemRef>,
    },
    AddingAtom {
        element: Element,
        hover_pos: Vec2,
        snap: Option<SnapResult>,
    },
    AddingBond {
        start_id: AtomId,
        multiplicity: BondMultiplicity,
        hover_pos: Vec2,
    },
}

impl EditorState {
    pub fn select(item: impl Into<ItemRef>) -> Self {
        EditorState::Selected { item: item.into() }
    }

    pub fn prepare_move_atom(atom_id: AtomId) -> Self {
        EditorState::PreMoveAtom { atom_id }
    }

    pub fn move_atom(atom_id: AtomId, target_pos: Vec2) -> Self {
        EditorState::MovingAtom {
            atom_id,
            target_pos,
            snap: None,
        }
    }

    pub fn group_move(start_pos: Vec2, group: Vec<ItemRef>) -> Self {
        EditorState::MovingGroup {
            start_pos,
            target_pos: start_pos,
            group,
        }
    }

    pub fn add_atom(element: Element, hover_pos: Vec2) -> Self {
        EditorState::AddingAtom {
            element,
            hover_pos,
            snap: None,
        }
    }

    pub fn add_bond(start_id: AtomId, multiplicity: BondMultiplicity, hover_pos: Vec2) -> Self {
        EditorState::AddingBond {
            start_id,
            multiplicity,
            hover_pos,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Selected { .. } => "selected",
            EditorState::PreMoveAtom { .. } => "preMoveAtom",
            EditorState::MovingAtom { .. } => "movingAtom",
            EditorState::MovingGroup { .. } => "movingGroup",
            EditorState::AddingAtom { .. } => "addingAtom",
            EditorState::AddingBond { .. } => "addingBond",
        }
    }

    /// True while `atom` is drawn at a live drag position instead of its stored one.
    pub fn is_moving_atom(&self, atom: &AtomId) -> bool {
        match self {
            EditorState::MovingAtom { atom_id, .. } => atom_id == atom,
            EditorState::MovingGroup { group, .. } => {
                group.iter().any(|item| item.as_atom() == Some(atom))
            }
            _ => false,
        }
    }

    pub fn is_atom_selected(&self, atom: &AtomId) -> bool {
        matches!(self, EditorState::Selected { item: ItemRef::Atom(id) } if id == atom)
    }

    pub fn is_bond_selected(&self, bond: &BondId) -> bool {
        matches!(self, EditorState::Selected { item: ItemRef::Bond(id) } if id == bond)
    }

    /// True for the start atom of a bond being drawn.
    pub fn is_atom_bond_targeted(&self, atom: &AtomId) -> bool {
        matches!(self, EditorState::AddingBond { start_id, .. } if start_id == atom)
    }

    pub fn is_atom_snap_targeted(&self, atom: &AtomId) -> bool {
        self.snap().is_some_and(|snap| &snap.target_id == atom)
    }

    pub fn snap(&self) -> Option<&SnapResult> {
        match self {
            EditorState::MovingAtom { snap, .. } | EditorState::AddingAtom { snap, .. } => {
                snap.as_ref()
            }
            _ => None,
        }
    }

    /// Recomputes the snap target of an atom placement or drag from its current pointer
    /// position. Any other state is returned unchanged.
    pub fn search_snap(
        self,
        graph: &MoleculeEditorGraph,
        snap_radius: f32,
        proximity_radius: f32,
    ) -> Self {
        match self {
            EditorState::AddingAtom {
                element, hover_pos, ..
            } => EditorState::AddingAtom {
                element,
                hover_pos,
                snap: find_snap(graph, hover_pos, None, snap_radius, proximity_radius),
            },
            EditorState::MovingAtom {
                atom_id,
                target_pos,
                ..
            } => {
                let snap = find_snap(
                    graph,
                    target_pos,
                    Some(&atom_id),
                    snap_radius,
                    proximity_radius,
                );
                EditorState::MovingAtom {
                    atom_id,
                    target_pos,
                    snap,
                }
            }
            other => other,
        }
    }
}

/// Finds the atom capturing `position`.
///
/// The nearest atom within `snap_radius` (first found on a tie) captures when it is
/// also within `proximity_radius`, or when it is the only atom within `snap_radius`.
/// `exclude` is skipped, so a dragged atom never snaps onto itself.
pub fn find_snap(
    graph: &MoleculeEditorGraph,
    position: Vec2,
    exclude: Option<&AtomId>,
    snap_radius: f32,
    proximity_radius: f32,
) -> Option<SnapResult> {
    let mut nearest = None;
    let mut candidates = 0;

    for atom in graph.atoms() {
        if exclude == Some(&atom.item_id) {
            continue;
        }
        let distance = math::distance(position, atom.position);
        if distance > snap_radius {
            continue;
        }
        candidates += 1;
        match nearest {
            Some((_, nearest_distance)) if nearest_distance <= distance => {}
            _ => nearest = Some((atom, distance)),
        }
    }

    let (atom, distance) = nearest?;
    if distance <= proximity_radius || candidates == 1 {
        Some(SnapResult {
            target_id: atom.item_id.clone(),
            snap_pos: atom.position,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SNAP_PROXIMITY_RADIUS, SNAP_RADIUS};
    use crate::molecule::MoleculeEditorModel;

    fn graph(atoms: &[(&str, f32, f32)]) -> MoleculeEditorGraph {
        let model = atoms.iter().fold(MoleculeEditorModel::empty(), |model, &(id, x, y)| {
            model.add_atom(AtomId::new(id), Element::Carbon, Vec2::new(x, y))
        });
        MoleculeEditorGraph::create_from(&model)
    }

    fn snap_at(graph: &MoleculeEditorGraph, x: f32, y: f32) -> Option<SnapResult> {
        find_snap(graph, Vec2::new(x, y), None, SNAP_RADIUS, SNAP_PROXIMITY_RADIUS)
    }

    #[test]
    fn test_snap_within_proximity() {
        let graph = graph(&[("a", 0.0, 0.0), ("b", 300.0, 0.0)]);
        let snap = snap_at(&graph, 30.0, 40.0).unwrap();
        assert_eq!(snap.target_id, AtomId::new("a"));
        assert_eq!(snap.snap_pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_no_snap_beyond_outer_radius() {
        let graph = graph(&[("a", 0.0, 0.0)]);
        assert!(snap_at(&graph, 81.0, 0.0).is_none());
        assert!(snap_at(&graph, 100.0, 100.0).is_none());
    }

    #[test]
    fn test_single_candidate_in_outer_ring_snaps() {
        let graph = graph(&[("a", 0.0, 0.0)]);
        let snap = snap_at(&graph, 70.0, 0.0).unwrap();
        assert_eq!(snap.target_id, AtomId::new("a"));
    }

    #[test]
    fn test_ambiguous_outer_ring_does_not_snap() {
        // both atoms are 70 and 75 away, neither within the proximity radius
        let graph = graph(&[("a", 0.0, 0.0), ("b", 145.0, 0.0)]);
        assert!(snap_at(&graph, 70.0, 0.0).is_none());
    }

    #[test]
    fn test_nearest_wins() {
        let graph = graph(&[("a", 0.0, 0.0), ("b", 100.0, 0.0)]);
        let snap = snap_at(&graph, 55.0, 0.0).unwrap();
        assert_eq!(snap.target_id, AtomId::new("b"));
    }

    #[test]
    fn test_tie_takes_first_found() {
        let graph = graph(&[("a", 0.0, 0.0), ("b", 100.0, 0.0)]);
        let snap = snap_at(&graph, 50.0, 0.0).unwrap();
        assert_eq!(snap.target_id, AtomId::new("a"));
    }

    #[test]
    fn test_moving_atom_never_snaps_to_itself() {
        let graph = graph(&[("a", 0.0, 0.0)]);
        let state = EditorState::move_atom(AtomId::new("a"), Vec2::new(5.0, 5.0));
        let state = state.search_snap(&graph, SNAP_RADIUS, SNAP_PROXIMITY_RADIUS);
        assert!(state.snap().is_none());
        assert!(state.is_moving_atom(&AtomId::new("a")));
    }

    #[test]
    fn test_search_snap_keeps_other_states() {
        let graph = graph(&[("a", 0.0, 0.0)]);
        let state = EditorState::select(AtomId::new("a"));
        assert_eq!(
            state.clone().search_snap(&graph, SNAP_RADIUS, SNAP_PROXIMITY_RADIUS),
            state
        );

        let adding = EditorState::add_atom(Element::Oxygen, Vec2::new(10.0, 0.0))
            .search_snap(&graph, SNAP_RADIUS, SNAP_PROXIMITY_RADIUS);
        assert!(adding.is_atom_snap_targeted(&AtomId::new("a")));
    }

    #[test]
    fn test_predicates() {
        let a = AtomId::new("a");
        let b = AtomId::new("b");
        assert!(EditorState::select(a.clone()).is_atom_selected(&a));
        assert!(!EditorState::select(a.clone()).is_atom_selected(&b));
        assert!(!EditorState::select(BondId::new("a")).is_atom_selected(&a));
        assert!(EditorState::select(BondId::new("x")).is_bond_selected(&BondId::new("x")));

        let bonding = EditorState::add_bond(a.clone(), BondMultiplicity::Double, Vec2::zero());
        assert!(bonding.is_atom_bond_targeted(&a));
        assert!(!bonding.is_atom_bond_targeted(&b));

        let group = EditorState::group_move(Vec2::zero(), vec![ItemRef::Atom(b.clone())]);
        assert!(group.is_moving_atom(&b));
        assert!(!group.is_moving_atom(&a));
        assert!(!EditorState::Idle.is_moving_atom(&a));
    }

    #[test]
    fn test_tool_mode_multiplicity() {
        assert_eq!(ToolMode::Pointer.bond_multiplicity(), BondMultiplicity::Single);
        assert_eq!(
            ToolMode::Bonding(BondMultiplicity::Triple).bond_multiplicity(),
            BondMultiplicity::Triple
        );
    }
}

// End of File

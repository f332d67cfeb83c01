// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::{HashMap, HashSet};

use common::{AtomId, BondId, ItemRef};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeRef};

use crate::molecule::{AtomModel, BondModel, MoleculeEditorModel};

/// Adjacency index derived from a [`MoleculeEditorModel`].
///
/// Each node stores a copy of an atom, each edge a copy of a bond, so the index can be
/// read without the model it was built from. It is never persisted: the editor
/// rebuilds it after every model change. Bonds whose endpoints are missing are left
/// out.
#[derive(Debug, Clone, Default)]
pub struct MoleculeEditorGraph {
    graph: UnGraph<AtomModel, BondModel>,
    atom_nodes: HashMap<AtomId, NodeIndex>,
    bond_edges: HashMap<BondId, EdgeIndex>,
}

impl MoleculeEditorGraph {
    pub fn create_from(model: &MoleculeEditorModel) -> Self {
        let mut graph = UnGraph::with_capacity(model.atoms.len(), model.bonds.len());
        let mut atom_nodes = HashMap::with_capacity(model.atoms.len());
        let mut bond_edges = HashMap::with_capacity(model.bonds.len());

        for (id, atom) in &model.atoms {
            atom_nodes.insert(id.clone(), graph.add_node(atom.clone()));
        }
        for (id, bond) in &model.bonds {
            let left = atom_nodes.get(&bond.left_atom_id);
            let right = atom_nodes.get(&bond.right_atom_id);
            match (left, right) {
                (Some(&left), Some(&right)) => {
                    bond_edges.insert(id.clone(), graph.add_edge(left, right, bond.clone()));
                }
                _ => log::debug!("Bond \"{}\" references a missing atom, not indexed", id),
            }
        }

        Self {
            graph,
            atom_nodes,
            bond_edges,
        }
    }

    /// All atoms, in model order.
    pub fn atoms(&self) -> impl Iterator<Item = &AtomModel> {
        self.graph.node_weights()
    }

    pub fn atom(&self, id: &AtomId) -> Option<&AtomModel> {
        self.atom_nodes.get(id).map(|&node| &self.graph[node])
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The bonds incident to `atom`.
    pub fn atom_bonds(&self, atom: &AtomId) -> impl Iterator<Item = &BondModel> {
        let node = self.atom_nodes.get(atom).copied();
        node.into_iter()
            .flat_map(move |node| self.graph.edges(node).map(|edge| edge.weight()))
    }

    /// The `(left, right)` atoms of a bond.
    pub fn bond_atoms(&self, bond: &BondId) -> Option<(&AtomModel, &AtomModel)> {
        let edge = *self.bond_edges.get(bond)?;
        let (a, b) = self.graph.edge_endpoints(edge)?;
        let (a, b) = (&self.graph[a], &self.graph[b]);
        // Undirected edges may report their endpoints in either order
        if a.item_id == self.graph[edge].left_atom_id {
            Some((a, b))
        } else {
            Some((b, a))
        }
    }

    /// For every bond of `atom`, the atom on the other end.
    pub fn bonded_atoms<'a>(&'a self, atom: &AtomId) -> impl Iterator<Item = &'a AtomModel> + 'a {
        let node = self.atom_nodes.get(atom).copied();
        node.into_iter().flat_map(move |node| {
            self.graph
                .edges(node)
                .map(move |edge| {
                    let other = if edge.source() == node {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    &self.graph[other]
                })
        })
    }

    /// The connected component around `pivot`: its atoms in breadth-first order followed
    /// by the bonds between them. An isolated or unknown pivot yields nothing, as there is
    /// no group to move.
    pub fn find_group(&self, pivot: &AtomId) -> Vec<ItemRef> {
        let Some(&start) = self.atom_nodes.get(pivot) else {
            return Vec::new();
        };

        let mut atoms = Vec::new();
        let mut bonds = Vec::new();
        let mut seen_edges = HashSet::new();

        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(node) = bfs.next(&self.graph) {
            atoms.push(ItemRef::Atom(self.graph[node].item_id.clone()));
            for edge in self.graph.edges(node) {
                if seen_edges.insert(edge.id()) {
                    bonds.push(ItemRef::Bond(edge.weight().item_id.clone()));
                }
            }
        }

        if bonds.is_empty() {
            return Vec::new();
        }
        atoms.extend(bonds);
        atoms
    }
}

#[cfg(test)]
mod tests {
    use common::Vec2;
    use periodic_table::Element;

    use super::*;
    use crate::molecule::BondMultiplicity;

    fn id(id: &str) -> AtomId {
        AtomId::new(id)
    }

    /// a1 - a2 - a3 and a4 - a5, a6 isolated, plus b9 dangling
    fn model() -> MoleculeEditorModel {
        let mut model = MoleculeEditorModel::empty();
        for (i, name) in ["a1", "a2", "a3", "a4", "a5", "a6"].iter().enumerate() {
            model = model.add_atom(id(name), Element::Carbon, Vec2::new(i as f32 * 100.0, 0.0));
        }
        let mut model = model
            .add_bond(BondId::new("b1"), &id("a1"), &id("a2"), BondMultiplicity::Single)
            .add_bond(BondId::new("b2"), &id("a3"), &id("a2"), BondMultiplicity::Single)
            .add_bond(BondId::new("b3"), &id("a4"), &id("a5"), BondMultiplicity::Double);
        model.bonds.insert(
            BondId::new("b9"),
            BondModel {
                item_id: BondId::new("b9"),
                left_atom_id: id("a1"),
                right_atom_id: id("gone"),
                multiplicity: BondMultiplicity::Single,
            },
        );
        model
    }

    #[test]
    fn test_create_from() {
        let graph = MoleculeEditorGraph::create_from(&model());
        assert_eq!(graph.atom_count(), 6);
        assert_eq!(graph.bond_count(), 3);
        let order: Vec<_> = graph.atoms().map(|atom| atom.item_id.as_str()).collect();
        assert_eq!(order, ["a1", "a2", "a3", "a4", "a5", "a6"]);
    }

    #[test]
    fn test_atom_bonds() {
        let graph = MoleculeEditorGraph::create_from(&model());
        let mut bonds: Vec<_> = graph.atom_bonds(&id("a2")).map(|b| b.item_id.as_str()).collect();
        bonds.sort();
        assert_eq!(bonds, ["b1", "b2"]);
        assert_eq!(graph.atom_bonds(&id("a6")).count(), 0);
        assert_eq!(graph.atom_bonds(&id("unknown")).count(), 0);
    }

    #[test]
    fn test_bond_atoms_are_ordered() {
        let graph = MoleculeEditorGraph::create_from(&model());
        let (left, right) = graph.bond_atoms(&BondId::new("b2")).unwrap();
        assert_eq!(left.item_id, id("a3"));
        assert_eq!(right.item_id, id("a2"));
        assert!(graph.bond_atoms(&BondId::new("b9")).is_none());
    }

    #[test]
    fn test_bonded_atoms() {
        let graph = MoleculeEditorGraph::create_from(&model());
        let mut others: Vec<_> = graph.bonded_atoms(&id("a2")).map(|a| a.item_id.as_str()).collect();
        others.sort();
        assert_eq!(others, ["a1", "a3"]);
    }

    #[test]
    fn test_find_group() {
        let graph = MoleculeEditorGraph::create_from(&model());
        let group = graph.find_group(&id("a3"));
        assert_eq!(group.len(), 5);
        assert_eq!(group[0], ItemRef::Atom(id("a3")));
        for item in ["a1", "a2", "a3"] {
            assert!(group.contains(&ItemRef::Atom(id(item))));
        }
        assert!(group.contains(&ItemRef::Bond(BondId::new("b1"))));
        assert!(group.contains(&ItemRef::Bond(BondId::new("b2"))));
        assert!(!group.contains(&ItemRef::Atom(id("a4"))));
    }

    #[test]
    fn test_find_group_of_isolated_or_unknown_atom_is_empty() {
        let graph = MoleculeEditorGraph::create_from(&model());
        assert!(graph.find_group(&id("a6")).is_empty());
        assert!(graph.find_group(&id("missing")).is_empty());
    }
}

// End of File

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use common::{math::vec2_array, AtomId, BondId, ItemRef, Vec2};
use indexmap::IndexMap;
use periodic_table::Element;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MAX_ELECTRONS;

/// The order of a bond. Anything outside of single/double/triple is rejected when
/// state is loaded, so the rest of the editor never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum BondMultiplicity {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid bond multiplicity {0}, expected 1, 2 or 3")]
pub struct InvalidMultiplicity(pub u8);

impl BondMultiplicity {
    pub fn count(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BondMultiplicity {
    type Error = InvalidMultiplicity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BondMultiplicity::Single),
            2 => Ok(BondMultiplicity::Double),
            3 => Ok(BondMultiplicity::Triple),
            other => Err(InvalidMultiplicity(other)),
        }
    }
}

impl From<BondMultiplicity> for u8 {
    fn from(multiplicity: BondMultiplicity) -> Self {
        multiplicity.count()
    }
}

/// A placed element instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomModel {
    pub item_id: AtomId,
    pub element_nr: Element,
    #[serde(with = "vec2_array")]
    pub position: Vec2,
    /// Free electrons drawn around the atom, `0..=MAX_ELECTRONS`.
    #[serde(default)]
    pub electrons: u8,
}

/// A bond between two distinct atoms.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BondModel {
    pub item_id: BondId,
    pub left_atom_id: AtomId,
    pub right_atom_id: AtomId,
    pub multiplicity: BondMultiplicity,
}

impl BondModel {
    pub fn references(&self, atom: &AtomId) -> bool {
        &self.left_atom_id == atom || &self.right_atom_id == atom
    }
}

/// The persisted and undo-tracked document of the editor.
///
/// All mutations consume the model and return the updated value, so a caller that
/// wants to keep the previous revision (the history buffer) clones it first.
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoleculeEditorModel {
    pub atoms: IndexMap<AtomId, AtomModel>,
    pub bonds: IndexMap<BondId, BondModel>,
}

impl MoleculeEditorModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    pub fn atom(&self, id: &AtomId) -> Option<&AtomModel> {
        self.atoms.get(id)
    }

    pub fn bond(&self, id: &BondId) -> Option<&BondModel> {
        self.bonds.get(id)
    }

    pub fn add_atom(mut self, id: AtomId, element: Element, position: Vec2) -> Self {
        if self.atoms.contains_key(&id) {
            log::warn!("Refusing to add atom \"{}\": id already exists", id);
            return self;
        }
        let atom = AtomModel {
            item_id: id.clone(),
            element_nr: element,
            position,
            electrons: 0,
        };
        self.atoms.insert(id, atom);
        self
    }

    pub fn move_atom(mut self, id: &AtomId, position: Vec2) -> Self {
        if let Some(atom) = self.atoms.get_mut(id) {
            atom.position = position;
        }
        self
    }

    /// Translates every atom of `group` by `delta`. Bonds in the group follow their atoms.
    pub fn move_group(mut self, delta: Vec2, group: &[ItemRef]) -> Self {
        for atom_id in group.iter().filter_map(ItemRef::as_atom) {
            if let Some(atom) = self.atoms.get_mut(atom_id) {
                atom.position += delta;
            }
        }
        self
    }

    /// Adds `delta` electrons to an atom, clamped to `0..=MAX_ELECTRONS`.
    pub fn change_atom_electrons(mut self, id: &AtomId, delta: i8) -> Self {
        if let Some(atom) = self.atoms.get_mut(id) {
            let electrons = i16::from(atom.electrons) + i16::from(delta);
            atom.electrons = electrons.clamp(0, i16::from(MAX_ELECTRONS)) as u8;
        }
        self
    }

    /// Removes a bond, or an atom together with every bond referencing it.
    pub fn delete_item(mut self, item: &ItemRef) -> Self {
        match item {
            ItemRef::Atom(id) => {
                if self.atoms.shift_remove(id).is_some() {
                    self.bonds.retain(|_, bond| !bond.references(id));
                }
            }
            ItemRef::Bond(id) => {
                self.bonds.shift_remove(id);
            }
        }
        self
    }

    /// Adds a bond between two distinct atoms. A second bond between the same pair is
    /// allowed.
    pub fn add_bond(
        mut self,
        id: BondId,
        left: &AtomId,
        right: &AtomId,
        multiplicity: BondMultiplicity,
    ) -> Self {
        if left == right {
            log::warn!("Refusing to add bond \"{}\": atom \"{}\" bonded to itself", id, left);
            return self;
        }
        if self.bonds.contains_key(&id) {
            log::warn!("Refusing to add bond \"{}\": id already exists", id);
            return self;
        }
        if !self.atoms.contains_key(left) || !self.atoms.contains_key(right) {
            log::warn!(
                "Refusing to add bond \"{}\": missing atom \"{}\" or \"{}\"",
                id,
                left,
                right
            );
            return self;
        }
        let bond = BondModel {
            item_id: id.clone(),
            left_atom_id: left.clone(),
            right_atom_id: right.clone(),
            multiplicity,
        };
        self.bonds.insert(id, bond);
        self
    }

    pub fn set_bond_multiplicity(mut self, id: &BondId, multiplicity: BondMultiplicity) -> Self {
        if let Some(bond) = self.bonds.get_mut(id) {
            bond.multiplicity = multiplicity;
        }
        self
    }
}


// End of File

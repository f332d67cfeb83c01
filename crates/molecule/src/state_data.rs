// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversion between [`MoleculeEditorModel`] and the serialized state data kept by the
//! widget host: `{ "atoms": { id: atom }, "bonds": { id: bond } }`. Every record carries
//! a `"type"` of `"Atom"` or `"Bond"`.
//!
//! Loading never fails. Missing or malformed input yields an empty model, and a
//! malformed atom or bond record is dropped on its own without affecting the others.

use common::{AtomId, BondId};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::MAX_ELECTRONS;
use crate::molecule::{AtomModel, BondModel, MoleculeEditorModel};

#[derive(Serialize)]
struct StateData<'a> {
    atoms: IndexMap<&'a AtomId, Record<'a, AtomModel>>,
    bonds: IndexMap<&'a BondId, Record<'a, BondModel>>,
}

#[derive(Serialize)]
struct Record<'a, T> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    record: &'a T,
}

impl MoleculeEditorModel {
    pub fn from_state_data(state_data: &str) -> Self {
        if state_data.trim().is_empty() {
            return Self::empty();
        }
        match serde_json::from_str::<Value>(state_data) {
            Ok(value) => Self::from_json_value(&value),
            Err(err) => {
                log::warn!("Ignoring unparsable editor state data: {}", err);
                Self::empty()
            }
        }
    }

    pub fn from_json_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                log::warn!("Ignoring editor state data that is not an object");
            }
            return Self::empty();
        };

        let atoms: IndexMap<AtomId, AtomModel> = load_records(object, "atoms")
            .map(|(key, mut atom): (String, AtomModel)| {
                if atom.item_id.as_str() != key {
                    log::warn!("Atom record \"{}\" stored under key \"{}\"", atom.item_id, key);
                    atom.item_id = AtomId::new(key);
                }
                if atom.electrons > MAX_ELECTRONS {
                    log::warn!(
                        "Atom record \"{}\" has {} electrons, keeping {}",
                        atom.item_id,
                        atom.electrons,
                        MAX_ELECTRONS
                    );
                    atom.electrons = MAX_ELECTRONS;
                }
                (atom.item_id.clone(), atom)
            })
            .collect();

        let bonds: IndexMap<BondId, BondModel> = load_records(object, "bonds")
            .filter(|(key, bond): &(String, BondModel)| {
                let self_bond = bond.left_atom_id == bond.right_atom_id;
                if self_bond {
                    log::warn!("Dropping bond record \"{}\": bonds an atom to itself", key);
                }
                !self_bond
            })
            .map(|(key, mut bond)| {
                if bond.item_id.as_str() != key {
                    log::warn!("Bond record \"{}\" stored under key \"{}\"", bond.item_id, key);
                    bond.item_id = BondId::new(key);
                }
                (bond.item_id.clone(), bond)
            })
            .collect();

        Self { atoms, bonds }
    }

    pub fn to_state_data(&self) -> Result<String, serde_json::Error> {
        let state_data = StateData {
            atoms: self
                .atoms
                .iter()
                .map(|(id, atom)| (id, Record { kind: "Atom", record: atom }))
                .collect(),
            bonds: self
                .bonds
                .iter()
                .map(|(id, bond)| (id, Record { kind: "Bond", record: bond }))
                .collect(),
        };
        serde_json::to_string(&state_data)
    }
}

fn load_records<'a, T>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> impl Iterator<Item = (String, T)> + 'a
where
    T: DeserializeOwned + 'a,
{
    let records = match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Object(records)) => Some(records),
        Some(_) => {
            log::warn!("Ignoring editor state field \"{}\": not an object", field);
            None
        }
    };

    records
        .into_iter()
        .flat_map(|records| records.iter())
        .filter_map(move |(key, record)| match T::deserialize(record) {
            Ok(record) => Some((key.clone(), record)),
            Err(err) => {
                log::warn!("Dropping malformed {} record \"{}\": {}", field, key, err);
                None
            }
        })
}


// End of File

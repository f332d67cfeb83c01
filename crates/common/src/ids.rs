// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every reserved identifier starts with this character. Identifiers generated by
/// [`IdCounter`] never do, so temporary items can never collide with model items.
const TEMPORARY_PREFIX: char = '~';

const TMP_ADD_ATOM: &str = "~add-atom";
const TMP_ADD_BOND: &str = "~add-bond";
const TMP_MOVE_ATOM: &str = "~move-atom:";

macro_rules! item_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for the reserved identifiers of view-only items that are not part of
            /// the model.
            pub fn is_temporary(&self) -> bool {
                self.0.starts_with(TEMPORARY_PREFIX)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

item_id!(
    /// Identifies an atom of the molecule model.
    AtomId
);

item_id!(
    /// Identifies a bond of the molecule model.
    BondId
);

impl AtomId {
    /// The atom that is being placed but not yet committed to the model.
    pub fn tmp_add() -> Self {
        Self::new(TMP_ADD_ATOM)
    }

    /// The stand-in drawn for `atom` while it is being dragged.
    pub fn tmp_move(atom: &AtomId) -> Self {
        Self(format!("{TMP_MOVE_ATOM}{}", atom.0))
    }
}

impl BondId {
    /// The bond previewed by an in-progress interaction.
    pub fn tmp_add() -> Self {
        Self::new(TMP_ADD_BOND)
    }
}

/// A reference to either kind of model item, e.g. the current selection.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ItemRef {
    Atom(AtomId),
    Bond(BondId),
}

impl ItemRef {
    pub fn as_atom(&self) -> Option<&AtomId> {
        match self {
            ItemRef::Atom(id) => Some(id),
            ItemRef::Bond(_) => None,
        }
    }
}

impl From<AtomId> for ItemRef {
    fn from(id: AtomId) -> Self {
        ItemRef::Atom(id)
    }
}

impl From<BondId> for ItemRef {
    fn from(id: BondId) -> Self {
        ItemRef::Bond(id)
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemRef::Atom(id) => write!(f, "atom {id}"),
            ItemRef::Bond(id) => write!(f, "bond {id}"),
        }
    }
}

/// Hands out fresh identifiers. A candidate that is already taken (e.g. by an item
/// loaded from serialized state) is skipped.
#[derive(Debug, Default)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn next_atom_id(&mut self, is_taken: impl Fn(&AtomId) -> bool) -> AtomId {
        loop {
            let id = AtomId(format!("a{}", self.bump()));
            if !is_taken(&id) {
                return id;
            }
        }
    }

    pub fn next_bond_id(&mut self, is_taken: impl Fn(&BondId) -> bool) -> BondId {
        loop {
            let id = BondId(format!("b{}", self.bump()));
            if !is_taken(&id) {
                return id;
            }
        }
    }

    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_ids_are_reserved() {
        let atom = AtomId::new("a1");
        assert!(!atom.is_temporary());
        assert!(AtomId::tmp_add().is_temporary());
        assert!(AtomId::tmp_move(&atom).is_temporary());
        assert!(BondId::tmp_add().is_temporary());
        assert_ne!(AtomId::tmp_move(&atom), AtomId::tmp_move(&AtomId::new("a2")));
    }

    #[test]
    fn test_counter_skips_taken_ids() {
        let mut counter = IdCounter::default();
        let taken = [AtomId::new("a1"), AtomId::new("a2")];
        let id = counter.next_atom_id(|id| taken.contains(id));
        assert_eq!(id.as_str(), "a3");

        let bond = counter.next_bond_id(|_| false);
        assert_eq!(bond.as_str(), "b4");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&AtomId::new("xyz")).unwrap();
        assert_eq!(json, "\"xyz\"");
        let id: BondId = serde_json::from_str("\"b7\"").unwrap();
        assert_eq!(id, BondId::new("b7"));
    }
}

// End of File

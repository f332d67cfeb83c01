// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Backend-neutral shapes for a [`MoleculeEditorView`]: circles and line segments in
//! model coordinates, ready to be drawn by whatever renders the canvas.

use common::{math::vec2_array, AtomId, BondId, Vec2};
use molecule::config::{
    ATOM_HANDLE_RADIUS, BOND_SEPARATION, DOUBLE_ELECTRON_DIST, DOUBLE_ELECTRON_RADIUS,
    DOUBLE_ELECTRON_WIDTH, ELECTRON_BOND_RADIUS, SINGLE_ELECTRON_DIST, SINGLE_ELECTRON_RADIUS,
    VALENCE_BOND_RADIUS,
};
use molecule::{
    AtomView, BondMultiplicity, BondView, ElectronKind, LineDef, MoleculeEditorView,
};
use serde::Serialize;

use crate::config::BondingType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dot {
    #[serde(with = "vec2_array")]
    pub center: Vec2,
    pub radius: f32,
}

/// A stroke from `from` to `to`, `radius` being half its width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    #[serde(with = "vec2_array")]
    pub from: Vec2,
    #[serde(with = "vec2_array")]
    pub to: Vec2,
    pub radius: f32,
}

impl Segment {
    fn new([from, to]: LineDef, radius: f32) -> Self {
        Self { from, to, radius }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomDrawing {
    pub item_id: AtomId,
    pub symbol: &'static str,
    #[serde(with = "vec2_array")]
    pub position: Vec2,
    pub handle_radius: f32,
    pub electron_dots: Vec<Dot>,
    pub electron_pairs: Vec<Segment>,
    pub selected: bool,
    pub temporary: bool,
    pub targeted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum BondShape {
    Lines { lines: Vec<Segment> },
    Dots { dots: Vec<Dot> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BondDrawing {
    pub item_id: BondId,
    pub multiplicity: BondMultiplicity,
    pub shape: BondShape,
    pub selected: bool,
    pub temporary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Drawing {
    pub atoms: Vec<AtomDrawing>,
    pub bonds: Vec<BondDrawing>,
}

impl Drawing {
    pub fn from_view(view: &MoleculeEditorView, bonding_type: BondingType) -> Self {
        Self {
            atoms: view.atoms.iter().map(AtomDrawing::from_view).collect(),
            bonds: view
                .bonds
                .iter()
                .map(|bond| BondDrawing::from_view(bond, bonding_type))
                .collect(),
        }
    }
}

impl AtomDrawing {
    pub fn from_view(atom: &AtomView) -> Self {
        let mut electron_dots = Vec::new();
        let mut electron_pairs = Vec::new();
        for electron in &atom.electrons {
            match electron.kind {
                ElectronKind::Single => electron_dots.push(Dot {
                    center: electron.single_coordinates(atom.position, SINGLE_ELECTRON_DIST),
                    radius: SINGLE_ELECTRON_RADIUS,
                }),
                ElectronKind::Double => electron_pairs.push(Segment::new(
                    electron.double_coordinates(
                        atom.position,
                        DOUBLE_ELECTRON_DIST,
                        DOUBLE_ELECTRON_WIDTH,
                    ),
                    DOUBLE_ELECTRON_RADIUS,
                )),
            }
        }

        Self {
            item_id: atom.item_id.clone(),
            symbol: atom.element.symbol(),
            position: atom.position,
            handle_radius: ATOM_HANDLE_RADIUS,
            electron_dots,
            electron_pairs,
            selected: atom.selected,
            temporary: atom.temporary,
            targeted: atom.targeted,
        }
    }
}

impl BondDrawing {
    pub fn from_view(bond: &BondView, bonding_type: BondingType) -> Self {
        let shape = match bonding_type {
            BondingType::Valence => BondShape::Lines {
                lines: bond
                    .valence_bond_lines(BOND_SEPARATION)
                    .into_iter()
                    .map(|line| Segment::new(line, VALENCE_BOND_RADIUS))
                    .collect(),
            },
            BondingType::Electrons => BondShape::Dots {
                dots: bond
                    .electron_bond_dots(BOND_SEPARATION)
                    .into_iter()
                    .map(|center| Dot {
                        center,
                        radius: ELECTRON_BOND_RADIUS,
                    })
                    .collect(),
            },
        };

        Self {
            item_id: bond.item_id.clone(),
            multiplicity: bond.multiplicity,
            shape,
            selected: bond.selected,
            temporary: bond.temporary,
        }
    }
}

#[cfg(test)]
mod tests {
    use molecule::{ElectronOrientation, ElectronView};
    use periodic_table::Element;

    use super::*;

    fn atom_view(electrons: Vec<ElectronView>) -> AtomView {
        AtomView {
            item_id: AtomId::new("a1"),
            element: Element::Chlorine,
            position: Vec2::new(100.0, 100.0),
            electrons,
            selected: true,
            temporary: false,
            targeted: false,
        }
    }

    fn bond_view(multiplicity: BondMultiplicity) -> BondView {
        BondView {
            item_id: BondId::new("b1"),
            multiplicity,
            left_position: Vec2::new(0.0, 0.0),
            right_position: Vec2::new(100.0, 0.0),
            selected: false,
            temporary: true,
        }
    }

    #[test]
    fn test_atom_drawing() {
        let drawing = AtomDrawing::from_view(&atom_view(vec![
            ElectronView {
                kind: ElectronKind::Double,
                orientation: ElectronOrientation::N,
            },
            ElectronView {
                kind: ElectronKind::Single,
                orientation: ElectronOrientation::E,
            },
        ]));
        assert_eq!(drawing.symbol, "Cl");
        assert!(drawing.selected);
        assert_eq!(drawing.handle_radius, ATOM_HANDLE_RADIUS);
        assert_eq!(
            drawing.electron_dots,
            [Dot {
                center: Vec2::new(128.0, 100.0),
                radius: SINGLE_ELECTRON_RADIUS,
            }]
        );
        assert_eq!(drawing.electron_pairs.len(), 1);
        assert_eq!(drawing.electron_pairs[0].from, Vec2::new(88.0, 72.0));
        assert_eq!(drawing.electron_pairs[0].to, Vec2::new(112.0, 72.0));
    }

    #[test]
    fn test_bond_shape_follows_bonding_type() {
        let valence = BondDrawing::from_view(&bond_view(BondMultiplicity::Triple), BondingType::Valence);
        match &valence.shape {
            BondShape::Lines { lines } => assert_eq!(lines.len(), 3),
            other => panic!("expected lines, got {other:?}"),
        }
        assert!(valence.temporary);

        let electrons =
            BondDrawing::from_view(&bond_view(BondMultiplicity::Double), BondingType::Electrons);
        match &electrons.shape {
            BondShape::Dots { dots } => assert_eq!(dots.len(), 4),
            other => panic!("expected dots, got {other:?}"),
        }
    }

    #[test]
    fn test_drawing_json() {
        let view = MoleculeEditorView {
            atoms: vec![atom_view(Vec::new())],
            bonds: vec![bond_view(BondMultiplicity::Single)],
        };
        let json = serde_json::to_value(Drawing::from_view(&view, BondingType::Valence)).unwrap();
        assert_eq!(json["atoms"][0]["symbol"], "Cl");
        assert_eq!(json["bonds"][0]["shape"]["style"], "lines");
        assert_eq!(json["bonds"][0]["multiplicity"], 1);
    }
}

// End of File

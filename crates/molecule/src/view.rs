// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! View records derived from the model and the interaction state, and the layout
//! functions turning them into drawable geometry.

use common::{
    math::{self, vec2_array},
    AtomId, BondId, Vec2,
};
use periodic_table::Element;
use serde::Serialize;

use crate::molecule::BondMultiplicity;

/// A line through the points `a` and `b`.
pub type LineDef = [Vec2; 2];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoleculeEditorView {
    pub atoms: Vec<AtomView>,
    pub bonds: Vec<BondView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomView {
    pub item_id: AtomId,
    pub element: Element,
    #[serde(with = "vec2_array")]
    pub position: Vec2,
    pub electrons: Vec<ElectronView>,
    pub selected: bool,
    /// Not part of the model: a placement or drag preview.
    pub temporary: bool,
    /// Start of a bond being drawn, or the atom a placement would snap to.
    pub targeted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BondView {
    pub item_id: BondId,
    pub multiplicity: BondMultiplicity,
    #[serde(with = "vec2_array")]
    pub left_position: Vec2,
    #[serde(with = "vec2_array")]
    pub right_position: Vec2,
    pub selected: bool,
    pub temporary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectronKind {
    /// One electron, drawn as a dot.
    Single,
    /// An electron pair, drawn as a line.
    Double,
}

/// Compass side of an atom. Screen coordinates: `S` points towards +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElectronOrientation {
    N,
    E,
    S,
    W,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElectronView {
    pub kind: ElectronKind,
    pub orientation: ElectronOrientation,
}

impl BondView {
    /// Valence style: one line per bond order, `separation` apart.
    pub fn valence_bond_lines(&self, separation: f32) -> Vec<LineDef> {
        let centered: LineDef = [self.left_position, self.right_position];
        let angle = math::angle_between(self.left_position, self.right_position);
        let offset = math::angle_position(angle + math::deg(90.0)) * separation;

        match self.multiplicity {
            BondMultiplicity::Single => vec![centered],
            BondMultiplicity::Double => vec![
                offset_line(centered, offset * -0.5),
                offset_line(centered, offset * 0.5),
            ],
            BondMultiplicity::Triple => vec![
                centered,
                offset_line(centered, offset),
                offset_line(centered, -offset),
            ],
        }
    }

    /// Electron style: a pair of dots per bond order around the bond center.
    pub fn electron_bond_dots(&self, separation: f32) -> Vec<Vec2> {
        let center = math::middle(self.left_position, self.right_position);
        let angle = math::angle_between(self.left_position, self.right_position);
        let forward = math::angle_position(angle) * separation;
        let across = math::angle_position(angle + math::deg(90.0)) * separation;

        let c1 = center + forward;
        let c2 = center - forward;

        match self.multiplicity {
            BondMultiplicity::Single => vec![c1, c2],
            BondMultiplicity::Double => vec![c1 + across, c2 + across, c1 - across, c2 - across],
            BondMultiplicity::Triple => {
                let across = across * 1.5;
                vec![c1, c2, c1 + across, c2 + across, c1 - across, c2 - across]
            }
        }
    }
}

fn offset_line([a, b]: LineDef, offset: Vec2) -> LineDef {
    [a + offset, b + offset]
}

impl ElectronView {
    /// Dot position of a single electron `distance` away from `center`.
    pub fn single_coordinates(&self, center: Vec2, distance: f32) -> Vec2 {
        let Vec2 { x, y } = center;
        match self.orientation {
            ElectronOrientation::N => Vec2::new(x, y - distance),
            ElectronOrientation::E => Vec2::new(x + distance, y),
            ElectronOrientation::S => Vec2::new(x, y + distance),
            ElectronOrientation::W => Vec2::new(x - distance, y),
        }
    }

    /// Line of an electron pair `distance` away from `center`, `half_width` to each
    /// side.
    pub fn double_coordinates(&self, center: Vec2, distance: f32, half_width: f32) -> LineDef {
        let Vec2 { x, y } = center;
        let (d, w) = (distance, half_width);
        match self.orientation {
            ElectronOrientation::N => [Vec2::new(x - w, y - d), Vec2::new(x + w, y - d)],
            ElectronOrientation::E => [Vec2::new(x + d, y - w), Vec2::new(x + d, y + w)],
            ElectronOrientation::S => [Vec2::new(x - w, y + d), Vec2::new(x + w, y + d)],
            ElectronOrientation::W => [Vec2::new(x - d, y - w), Vec2::new(x - d, y + w)],
        }
    }
}

impl ElectronOrientation {
    pub const ALL: [ElectronOrientation; 4] = [
        ElectronOrientation::N,
        ElectronOrientation::E,
        ElectronOrientation::S,
        ElectronOrientation::W,
    ];

    pub fn opposite(self) -> Self {
        match self {
            ElectronOrientation::N => ElectronOrientation::S,
            ElectronOrientation::E => ElectronOrientation::W,
            ElectronOrientation::S => ElectronOrientation::N,
            ElectronOrientation::W => ElectronOrientation::E,
        }
    }

    /// The side facing `delta`, picked by whichever axis dominates.
    pub fn from_delta(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 {
                ElectronOrientation::E
            } else {
                ElectronOrientation::W
            }
        } else if delta.y > 0.0 {
            ElectronOrientation::S
        } else {
            ElectronOrientation::N
        }
    }
}

/// Orders the four sides for electron placement. With exactly one occupied side its
/// opposite comes first; occupied sides always come last.
pub fn prioritize_orientations(occupied: &[ElectronOrientation]) -> Vec<ElectronOrientation> {
    let mut result = ElectronOrientation::ALL.to_vec();

    if let [single] = occupied {
        move_to_front(&mut result, single.opposite());
    }
    for &orientation in occupied {
        if let Some(index) = result.iter().position(|&o| o == orientation) {
            let orientation = result.remove(index);
            result.push(orientation);
        }
    }

    result
}

fn move_to_front(orientations: &mut Vec<ElectronOrientation>, orientation: ElectronOrientation) {
    if let Some(index) = orientations.iter().position(|&o| o == orientation) {
        orientations.remove(index);
        orientations.insert(0, orientation);
    }
}

/// Electron symbols for `electrons`: pairs first, then a single one for an odd count,
/// each on the next free side of `orientations`.
pub fn electron_views(electrons: u8, orientations: &[ElectronOrientation]) -> Vec<ElectronView> {
    let doubles = usize::from(electrons / 2);
    let singles = usize::from(electrons % 2);

    let kinds = std::iter::repeat(ElectronKind::Double)
        .take(doubles)
        .chain(std::iter::repeat(ElectronKind::Single).take(singles));

    kinds
        .zip(orientations.iter().copied())
        .map(|(kind, orientation)| ElectronView { kind, orientation })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ElectronOrientation::{E, N, S, W};

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).mag() < 1e-4, "{a:?} != {b:?}");
    }

    fn bond(multiplicity: BondMultiplicity, left: Vec2, right: Vec2) -> BondView {
        BondView {
            item_id: BondId::new("b1"),
            multiplicity,
            left_position: left,
            right_position: right,
            selected: false,
            temporary: false,
        }
    }

    #[test]
    fn test_prioritize_orientations() {
        assert_eq!(prioritize_orientations(&[]), [N, E, S, W]);
        assert_eq!(prioritize_orientations(&[E]), [W, N, S, E]);
        assert_eq!(prioritize_orientations(&[N]), [S, E, W, N]);
        assert_eq!(prioritize_orientations(&[N, S]), [E, W, N, S]);
        assert_eq!(prioritize_orientations(&[W, E, N]), [S, W, E, N]);
    }

    #[test]
    fn test_orientation_from_delta() {
        assert_eq!(ElectronOrientation::from_delta(Vec2::new(10.0, 3.0)), E);
        assert_eq!(ElectronOrientation::from_delta(Vec2::new(-10.0, 3.0)), W);
        assert_eq!(ElectronOrientation::from_delta(Vec2::new(1.0, 30.0)), S);
        assert_eq!(ElectronOrientation::from_delta(Vec2::new(1.0, -30.0)), N);
        // diagonals count as vertical
        assert_eq!(ElectronOrientation::from_delta(Vec2::new(5.0, 5.0)), S);
    }

    #[test]
    fn test_electron_views() {
        let views = electron_views(3, &prioritize_orientations(&[]));
        assert_eq!(
            views,
            [
                ElectronView {
                    kind: ElectronKind::Double,
                    orientation: N
                },
                ElectronView {
                    kind: ElectronKind::Single,
                    orientation: E
                },
            ]
        );

        let views = electron_views(1, &prioritize_orientations(&[E]));
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].orientation, W);

        assert_eq!(electron_views(8, &prioritize_orientations(&[])).len(), 4);
        assert!(electron_views(0, &prioritize_orientations(&[])).is_empty());
    }

    #[test]
    fn test_single_valence_line_is_the_bond() {
        let left = Vec2::new(0.0, 0.0);
        let right = Vec2::new(100.0, 0.0);
        let lines = bond(BondMultiplicity::Single, left, right).valence_bond_lines(6.0);
        assert_eq!(lines, [[left, right]]);
    }

    #[test]
    fn test_double_valence_lines_are_offset() {
        let lines = bond(BondMultiplicity::Double, Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))
            .valence_bond_lines(6.0);
        assert_eq!(lines.len(), 2);
        assert_close(lines[0][0], Vec2::new(0.0, -3.0));
        assert_close(lines[0][1], Vec2::new(100.0, -3.0));
        assert_close(lines[1][0], Vec2::new(0.0, 3.0));
        assert_close(lines[1][1], Vec2::new(100.0, 3.0));
    }

    #[test]
    fn test_triple_valence_lines() {
        let left = Vec2::new(0.0, 0.0);
        let right = Vec2::new(0.0, 50.0);
        let lines = bond(BondMultiplicity::Triple, left, right).valence_bond_lines(6.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], [left, right]);
        // perpendicular to a vertical bond is horizontal
        assert_close(lines[1][0], Vec2::new(-6.0, 0.0));
        assert_close(lines[2][0], Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_electron_bond_dots() {
        let single = bond(BondMultiplicity::Single, Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))
            .electron_bond_dots(6.0);
        assert_eq!(single.len(), 2);
        assert_close(single[0], Vec2::new(56.0, 0.0));
        assert_close(single[1], Vec2::new(44.0, 0.0));

        let double = bond(BondMultiplicity::Double, Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))
            .electron_bond_dots(6.0);
        assert_eq!(double.len(), 4);
        assert_close(double[0], Vec2::new(56.0, 6.0));
        assert_close(double[3], Vec2::new(44.0, -6.0));

        let triple = bond(BondMultiplicity::Triple, Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))
            .electron_bond_dots(6.0);
        assert_eq!(triple.len(), 6);
        assert_close(triple[2], Vec2::new(56.0, 9.0));
    }

    #[test]
    fn test_electron_coordinates() {
        let center = Vec2::new(10.0, 10.0);
        let single = ElectronView {
            kind: ElectronKind::Single,
            orientation: N,
        };
        assert_eq!(single.single_coordinates(center, 28.0), Vec2::new(10.0, -18.0));

        let double = ElectronView {
            kind: ElectronKind::Double,
            orientation: W,
        };
        assert_eq!(
            double.double_coordinates(center, 28.0, 12.0),
            [Vec2::new(-18.0, -2.0), Vec2::new(-18.0, 22.0)]
        );
    }
}

// End of File

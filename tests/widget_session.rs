// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use common::{AtomId, BondId, Vec2};
use molecule::{BondMultiplicity, MoleculeEditorModel};
use moledit::drawing::BondShape;
use moledit::replay::{replay, Session};
use periodic_table::Element;

fn session(json: &str) -> Session {
    serde_json::from_str(json).unwrap()
}

const DRAW_BOND: &str = r#"[
    {"action": "addElement", "element": 6, "event": "click", "clientPos": [110, 120]},
    {"action": "canvas", "event": "click", "clientPos": [110, 120]},
    {"action": "addElement", "element": 8, "event": "click", "clientPos": [310, 120]},
    {"action": "canvas", "event": "click", "clientPos": [310, 120]},
    {"action": "tool", "tool": {"bonding": 2}},
    {"action": "atom", "id": "a1", "event": "down", "clientPos": [110, 120]},
    {"action": "canvas", "event": "move", "clientPos": [200, 120]},
    {"action": "atom", "id": "a2", "event": "up", "clientPos": [310, 120]}
]"#;

#[test]
fn test_draw_two_atoms_and_a_bond() {
    let output = replay(session(&format!(
        r#"{{"viewport": {{"offset": [10, 20], "scale": 1}}, "actions": {DRAW_BOND}}}"#
    )))
    .unwrap();

    let model = MoleculeEditorModel::from_state_data(&output.state_data);
    assert_eq!(model.atoms.len(), 2);
    let carbon = model.atom(&AtomId::new("a1")).unwrap();
    assert_eq!(carbon.element_nr, Element::Carbon);
    assert_eq!(carbon.position, Vec2::new(100.0, 100.0));
    assert_eq!(
        model.atom(&AtomId::new("a2")).unwrap().position,
        Vec2::new(300.0, 100.0)
    );

    assert_eq!(model.bonds.len(), 1);
    let bond = model.bond(&BondId::new("b3")).unwrap();
    assert_eq!(bond.multiplicity, BondMultiplicity::Double);
    assert!(bond.references(&AtomId::new("a1")));
    assert!(bond.references(&AtomId::new("a2")));

    // one report per committed atom and one for the bond
    assert_eq!(output.persisted, 3);

    assert_eq!(output.drawing.atoms.len(), 2);
    assert_eq!(output.drawing.bonds.len(), 1);
    match &output.drawing.bonds[0].shape {
        BondShape::Dots { dots } => assert_eq!(dots.len(), 4),
        other => panic!("expected electron dots, got {other:?}"),
    }
}

#[test]
fn test_valence_configuration_draws_lines() {
    let output = replay(session(&format!(
        r#"{{
            "configuration": {{"sharedParameters": {{"BONDING_TYPE": "valence"}}}},
            "viewport": {{"offset": [10, 20], "scale": 1}},
            "actions": {DRAW_BOND}
        }}"#
    )))
    .unwrap();

    match &output.drawing.bonds[0].shape {
        BondShape::Lines { lines } => assert_eq!(lines.len(), 2),
        other => panic!("expected lines, got {other:?}"),
    }
}

#[test]
fn test_undo_redo_and_delete() {
    let state_data = r#"{"atoms": {"c": {"itemId": "c", "elementNr": 6, "position": [0, 0]}}}"#;
    let actions = r#"[
        {"action": "atom", "id": "c", "event": "click", "clientPos": [0, 0]},
        {"action": "electrons", "delta": 3},
        {"action": "delete"},
        {"action": "undo"},
        {"action": "undo"},
        {"action": "redo"}
    ]"#;
    let json = serde_json::json!({
        "stateData": state_data,
        "actions": serde_json::from_str::<serde_json::Value>(actions).unwrap(),
    });
    let output = replay(serde_json::from_value(json).unwrap()).unwrap();

    let model = MoleculeEditorModel::from_state_data(&output.state_data);
    assert_eq!(model.atoms.len(), 1);
    assert_eq!(model.atom(&AtomId::new("c")).unwrap().electrons, 3);
    assert_eq!(output.persisted, 5);
    // a pair and a lone electron
    assert_eq!(output.drawing.atoms[0].electron_pairs.len(), 1);
    assert_eq!(output.drawing.atoms[0].electron_dots.len(), 1);
}

#[test]
fn test_dismissed_picker_changes_nothing() {
    let output = replay(session(
        r#"{"actions": [{"action": "dismissPicker"}, {"action": "clear"}]}"#,
    ))
    .unwrap();
    // clearing an empty model is still a change of the history
    assert_eq!(output.persisted, 1);
    assert!(output.drawing.atoms.is_empty());
}

#[test]
fn test_rejects_unknown_actions() {
    let result = serde_json::from_str::<Session>(r#"{"actions": [{"action": "explode"}]}"#);
    assert!(result.is_err());

    let result = serde_json::from_str::<Session>(
        r#"{"actions": [{"action": "tool", "tool": {"bonding": 4}}]}"#,
    );
    assert!(result.is_err());
}

// End of File

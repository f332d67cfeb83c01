// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use common::{AtomId, BondId};
use molecule::config::EditorConfig;
use molecule::{MoleculeEditor, MoleculeEditorView, ToolMode};
use periodic_table::Element;

use crate::config::{BondingType, PickerOptions, WidgetConfiguration};
use crate::drawing::Drawing;
use crate::picker::{ElementPicker, PickRequest};
use crate::transform::{CanvasTransform, PointerEvent, ViewportTransform};

/// The framework hosting the widget: it hands over the session's state data and
/// configuration and stores the state data the widget reports back.
pub trait WidgetHost {
    fn state_data(&self) -> String;
    fn configuration(&self) -> WidgetConfiguration;
    fn persist_state_data(&mut self, state_data: String);
}

/// The molecule editor as embedded in a host: the editor core plus pointer
/// transformation, the element picker and persistence.
///
/// Every public operation that may change the model reports the new state data to the
/// host, then runs the editor's deferred follow-ups.
pub struct MoleculeEditorWidget<H: WidgetHost> {
    host: H,
    editor: MoleculeEditor,
    picker: ElementPicker,
    transform: Box<dyn CanvasTransform>,
    configuration: WidgetConfiguration,
    persisted_revision: u64,
}

impl<H: WidgetHost> MoleculeEditorWidget<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, EditorConfig::default())
    }

    pub fn with_config(host: H, config: EditorConfig) -> Self {
        let mut editor = MoleculeEditor::new(config);
        editor.load_state_data(&host.state_data());
        let configuration = host.configuration();

        Self {
            persisted_revision: editor.revision(),
            host,
            editor,
            picker: ElementPicker::default(),
            transform: Box::new(ViewportTransform::default()),
            configuration,
        }
    }

    pub fn register_canvas_transform(&mut self, transform: impl CanvasTransform + 'static) {
        self.transform = Box::new(transform);
    }

    /// Re-reads the configuration, e.g. after the host changed a parameter.
    pub fn reload_configuration(&mut self) {
        self.configuration = self.host.configuration();
    }

    pub fn bonding_type(&self) -> BondingType {
        self.configuration.bonding_type()
    }

    pub fn picker_options(&self) -> PickerOptions {
        self.configuration.picker_options()
    }

    pub fn editor(&self) -> &MoleculeEditor {
        &self.editor
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn view(&self) -> MoleculeEditorView {
        self.editor.view()
    }

    pub fn drawing(&self) -> Drawing {
        Drawing::from_view(&self.editor.view(), self.bonding_type())
    }

    // Toolbar

    pub fn set_tool_mode(&mut self, tool_mode: ToolMode) {
        self.editor.set_tool_mode(tool_mode);
        self.settle();
    }

    pub fn clear(&mut self) {
        self.editor.clear();
        self.settle();
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.editor.undo();
        self.settle();
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.editor.redo();
        self.settle();
        changed
    }

    pub fn change_selected_electrons(&mut self, delta: i8) {
        self.editor.change_selected_electrons(delta);
        self.settle();
    }

    pub fn delete_selected_item(&mut self) {
        self.editor.delete_selected_item();
        self.settle();
    }

    // Element picker

    /// Opens the element picker. The returned request resolves with the picked
    /// element, or fails when the picker is closed or another request replaces it.
    pub fn pick_element_from_table(&mut self) -> PickRequest {
        self.picker.request()
    }

    pub fn element_picker_callback(&mut self, element: Element) {
        self.picker.resolve(element);
    }

    pub fn dismiss_element_picker(&mut self) {
        self.picker.dismiss();
    }

    pub fn picker_open(&self) -> bool {
        self.picker.is_open()
    }

    /// Starts placing `element` where `event` happened.
    pub fn add_element_to_canvas(&mut self, element: Element, event: &PointerEvent) {
        let position = self.transform.transform(event).position;
        self.editor.add_element(element, position);
        self.settle();
    }

    // Pointer events

    pub fn handle_canvas_event(&mut self, event: &PointerEvent) {
        let event = self.transform.transform(event);
        self.editor.handle_canvas_event(event);
        self.settle();
    }

    pub fn handle_atom_event(&mut self, atom_id: &AtomId, event: &PointerEvent) {
        let event = self.transform.transform(event);
        self.editor.handle_atom_event(atom_id, event);
        self.settle();
    }

    pub fn handle_bond_event(&mut self, bond_id: &BondId, event: &PointerEvent) {
        let event = self.transform.transform(event);
        self.editor.handle_bond_event(bond_id, event);
        self.settle();
    }

    /// Reports model changes to the host, then lets the follow-ups of the event run.
    fn settle(&mut self) {
        self.persist();
        if self.editor.has_deferred() {
            self.editor.run_deferred();
            self.persist();
        }
    }

    fn persist(&mut self) {
        let revision = self.editor.revision();
        if revision == self.persisted_revision {
            return;
        }
        match self.editor.model().to_state_data() {
            Ok(state_data) => {
                self.host.persist_state_data(state_data);
                self.persisted_revision = revision;
            }
            Err(err) => log::error!("Failed to serialize editor state: {}", err),
        }
    }
}


// End of File

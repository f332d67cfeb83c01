// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Widget configuration as supplied by the host: two string maps, the widget's own
//! parameters and the parameters shared by all widgets of an item.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const PARAM_LANGUAGE: &str = "LANGUAGE";
pub const PARAM_SHOW_INFO_NAME: &str = "SHOW_INFO_NAME";
pub const PARAM_SHOW_INFO_ORDER: &str = "SHOW_INFO_ORDER";
pub const PARAM_HIGHLIGHT_BLOCKS: &str = "HIGHLIGHT_BLOCKS";
pub const SHARED_PARAM_BONDING_TYPE: &str = "BONDING_TYPE";

/// How bonds are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BondingType {
    /// Lines, one per bond order.
    Valence,
    /// Electron dot pairs, one per bond order.
    #[default]
    Electrons,
}

impl BondingType {
    /// Parses the `BONDING_TYPE` parameter, ignoring case. An empty value selects the
    /// default; an unknown one does too, with a warning.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return Self::default();
        }
        match value.to_ascii_uppercase().as_str() {
            "VALENCE" => BondingType::Valence,
            "ELECTRONS" => BondingType::Electrons,
            _ => {
                log::warn!(
                    "Received unknown {} parameter: {:?}",
                    SHARED_PARAM_BONDING_TYPE,
                    value
                );
                Self::default()
            }
        }
    }
}

/// Language of element names in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Language {
    #[serde(rename = "de")]
    #[default]
    German,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "la")]
    Latin,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "de" => Some(Language::German),
            "en" => Some(Language::English),
            "la" => Some(Language::Latin),
            _ => None,
        }
    }
}

/// Appearance of the periodic table shown when picking an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerOptions {
    pub language: Language,
    pub show_info_name: bool,
    pub show_info_order: bool,
    pub highlight_blocks: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfiguration {
    pub parameters: HashMap<String, String>,
    pub shared_parameters: HashMap<String, String>,
}

impl WidgetConfiguration {
    pub fn bonding_type(&self) -> BondingType {
        self.shared_parameters
            .get(SHARED_PARAM_BONDING_TYPE)
            .map_or_else(BondingType::default, |value| BondingType::parse(value))
    }

    pub fn picker_options(&self) -> PickerOptions {
        let flag = |name: &str| self.parameters.get(name).is_some_and(|v| bool_param(v));
        let language = match self.parameters.get(PARAM_LANGUAGE) {
            Some(value) => Language::parse(value).unwrap_or_else(|| {
                log::warn!("Received unknown {} parameter: {:?}", PARAM_LANGUAGE, value);
                Language::default()
            }),
            None => Language::default(),
        };

        PickerOptions {
            language,
            show_info_name: flag(PARAM_SHOW_INFO_NAME),
            show_info_order: flag(PARAM_SHOW_INFO_ORDER),
            highlight_blocks: flag(PARAM_HIGHLIGHT_BLOCKS),
        }
    }
}

/// Boolean parameters are written as `"true"`/`"false"`; `"1"` is accepted too.
pub fn bool_param(value: &str) -> bool {
    value == "true" || value == "1"
}


// End of File

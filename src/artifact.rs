//! Fill sections for the kiibohd keymap templates.
//!
//! Each section is the text a template engine splices in place of a named
//! fill tag. The assembler only formats tables that were already encoded;
//! it cannot fail, so a run either produces every section or none.

use crate::catalog::CapabilityTable;
use crate::encode::{EncodedMacro, EncodedTriggers};
use crate::layers::{LayerSource, LayerTable, LayerTables};
use crate::layout::BuildInfo;
use serde_json::{Map, Value};

pub const BACKEND_NAME: &str = "kiibohd";

pub const INFORMATION: &str = "Information";
pub const VARIABLE_INFORMATION: &str = "VariableInformation";
pub const DEFINES: &str = "Defines";
pub const CAPABILITIES_LIST: &str = "CapabilitiesList";
pub const RESULT_MACROS: &str = "ResultMacros";
pub const RESULT_MACRO_LIST: &str = "ResultMacroList";
pub const RESULT_MACRO_RECORD: &str = "ResultMacroRecord";
pub const TRIGGER_MACROS: &str = "TriggerMacros";
pub const TRIGGER_MACRO_LIST: &str = "TriggerMacroList";
pub const TRIGGER_MACRO_RECORD: &str = "TriggerMacroRecord";
pub const MAX_SCAN_CODE: &str = "MaxScanCode";
pub const DEFAULT_LAYER_TRIGGER_LIST: &str = "DefaultLayerTriggerList";
pub const DEFAULT_LAYER_SCAN_MAP: &str = "DefaultLayerScanMap";
pub const PARTIAL_LAYER_TRIGGER_LISTS: &str = "PartialLayerTriggerLists";
pub const PARTIAL_LAYER_SCAN_MAPS: &str = "PartialLayerScanMaps";
pub const LAYER_INDEX_LIST: &str = "LayerIndexList";
pub const LAYER_STATE: &str = "LayerState";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artifact {
    sections: Vec<(&'static str, String)>,
}

impl Artifact {
    fn insert(&mut self, name: &'static str, body: String) {
        self.sections.push((name, body));
    }

    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, body)| body.as_str())
    }

    /// Sections in emission order.
    pub fn sections(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.sections.iter().map(|(name, body)| (*name, body.as_str()))
    }

    /// JSON object with keys in emission order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .sections
            .iter()
            .map(|(name, body)| (name.to_string(), Value::String(body.clone())))
            .collect();
        Value::Object(map)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (name, body) in &self.sections {
            out.push_str(&format!("// --- {name} ---\n{body}\n\n"));
        }
        out
    }
}

/// Everything the assembler formats, already encoded and validated.
pub struct ArtifactAssembler<'a> {
    pub capabilities: &'a CapabilityTable,
    pub results: &'a [EncodedMacro],
    pub triggers: &'a EncodedTriggers,
    pub layers: &'a LayerTables,
    pub layer_sources: &'a [LayerSource],
    pub info: &'a BuildInfo,
    pub defines: String,
}

impl ArtifactAssembler<'_> {
    pub fn assemble(self) -> Artifact {
        let mut artifact = Artifact::default();
        artifact.insert(INFORMATION, self.information());
        // Placeholder tag; per-file variable provenance is not tracked.
        artifact.insert(VARIABLE_INFORMATION, String::new());
        artifact.insert(DEFINES, self.defines.clone());
        artifact.insert(CAPABILITIES_LIST, self.capabilities_list());
        artifact.insert(RESULT_MACROS, guide_records("Guide_RM", self.results));
        artifact.insert(RESULT_MACRO_LIST, self.result_macro_list());
        artifact.insert(
            RESULT_MACRO_RECORD,
            "ResultMacroRecord ResultMacroRecordList[ ResultMacroNum ];".to_string(),
        );
        artifact.insert(
            TRIGGER_MACROS,
            guide_records("Guide_TM", &self.triggers.records),
        );
        artifact.insert(TRIGGER_MACRO_LIST, self.trigger_macro_list());
        artifact.insert(
            TRIGGER_MACRO_RECORD,
            "TriggerMacroRecord TriggerMacroRecordList[ TriggerMacroNum ];".to_string(),
        );
        artifact.insert(
            MAX_SCAN_CODE,
            format!("#define MaxScanCode 0x{:X}", self.layers.max_scan_code.0),
        );

        let (default, partials) = match self.layers.layers.split_first() {
            Some((default, partials)) => (Some(default), partials),
            None => (None, &[][..]),
        };
        artifact.insert(
            DEFAULT_LAYER_TRIGGER_LIST,
            default.map(trigger_lists).unwrap_or_default(),
        );
        artifact.insert(
            DEFAULT_LAYER_SCAN_MAP,
            default.map(scan_map).unwrap_or_default(),
        );
        artifact.insert(
            PARTIAL_LAYER_TRIGGER_LISTS,
            partials
                .iter()
                .map(|layer| format!("// Partial Layer {}\n{}", layer.index, trigger_lists(layer)))
                .collect::<Vec<_>>()
                .join("\n\n"),
        );
        artifact.insert(
            PARTIAL_LAYER_SCAN_MAPS,
            partials
                .iter()
                .map(|layer| format!("// Partial Layer {}\n{}", layer.index, scan_map(layer)))
                .collect::<Vec<_>>()
                .join("\n\n"),
        );
        artifact.insert(LAYER_INDEX_LIST, self.layer_index_list());
        artifact.insert(LAYER_STATE, "uint8_t LayerState[ LayerNum ];".to_string());
        artifact
    }

    fn information(&self) -> String {
        let info = self.info;
        let mut out = String::from("// This file was generated by the kll compiler, DO NOT EDIT.\n");
        if let Some(date) = &info.generation_date {
            out.push_str(&format!("// Generation Date:    {date}\n"));
        }
        out.push_str(&format!("// KLL Backend:        {BACKEND_NAME}\n"));
        out.push_str(&format!(
            "// KLL Git Rev:        {}\n",
            info.git_revision.as_deref().unwrap_or("unknown")
        ));
        if info.git_changes.is_empty() {
            out.push_str("// KLL Git Changes:    None\n");
        } else {
            out.push_str("// KLL Git Changes:\n");
            for file in &info.git_changes {
                out.push_str(&format!("//    {file}\n"));
            }
        }
        out.push_str("// Compiler arguments:\n");
        for (position, arg) in info.compiler_args.iter().enumerate() {
            // Flags and the program itself sit one level left of their values.
            if position == 0 || arg.starts_with('-') {
                out.push_str(&format!("//    {arg}\n"));
            } else {
                out.push_str(&format!("//      {arg}\n"));
            }
        }
        out.push_str("//\n");

        out.push_str("// - Base Layer -\n");
        for entry in &info.base_layout {
            out.push_str(&format!("//    {}\n//      {}\n", entry.name, entry.file));
        }

        out.push_str("// - Default Layer -\n");
        if let Some(default) = self.layer_sources.first() {
            for (name, file) in default.name_stack.iter().zip(&default.layer_files) {
                out.push_str(&format!("//    {name}\n//      {file}\n"));
            }
        }

        out.push_str("// - Partial Layers -\n");
        for (index, layer) in self.layer_sources.iter().enumerate().skip(1) {
            out.push_str(&format!("//    Layer {index}\n"));
            for (name, file) in layer.name_stack.iter().zip(&layer.layer_files) {
                out.push_str(&format!("//     {name}\n//       {file}\n"));
            }
        }
        out
    }

    fn capabilities_list(&self) -> String {
        let mut out = String::from("const Capability CapabilitiesList[] = {\n");
        for (_, capability) in self.capabilities.iter() {
            out.push_str(&format!(
                "\t{{ {}, {} }},\n",
                capability.function(),
                capability.arg_byte_width()
            ));
        }
        out.push_str("};");
        out
    }

    fn result_macro_list(&self) -> String {
        let mut out = String::from("const ResultMacro ResultMacroList[] = {\n");
        for index in 0..self.results.len() {
            out.push_str(&format!("\tDefine_RM( {index} ),\n"));
        }
        out.push_str("};");
        out
    }

    fn trigger_macro_list(&self) -> String {
        let mut out = String::from("const TriggerMacro TriggerMacroList[] = {\n");
        for (trigger, result) in self.triggers.pairing.iter().enumerate() {
            out.push_str(&format!("\tDefine_TM( {trigger}, {result} ),\n"));
        }
        out.push_str("};");
        out
    }

    fn layer_index_list(&self) -> String {
        let mut out = String::from("const Layer LayerIndex[] = {\n");
        for layer in &self.layers.layers {
            out.push_str(&format!(
                "\tLayer_IN( {}, \"{}\", 0x{:02X} ),\n",
                layer.scan_map_name(),
                layer.index_label(),
                layer.first_scan_code.0
            ));
        }
        out.push_str("};");
        out
    }
}

fn guide_records(guide: &str, records: &[EncodedMacro]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| format!("{guide}( {index} ) = {{ {} }};", record.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

// `Define_TL( default, 0x04 ) = { 2, 7, 9 };`
fn trigger_lists(layer: &LayerTable) -> String {
    let prefix = layer.symbol_prefix();
    layer
        .slots
        .iter()
        .map(|slot| {
            let mut line = format!(
                "Define_TL( {prefix}, 0x{:02X} ) = {{ {}",
                slot.scan_code.0,
                slot.triggers.len()
            );
            for trigger in &slot.triggers {
                line.push_str(&format!(", {trigger}"));
            }
            line.push_str(" };");
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn scan_map(layer: &LayerTable) -> String {
    let entries = layer
        .slots
        .iter()
        .map(|slot| layer.trigger_list_name(slot.scan_code))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "const nat_ptr_t *{}[] = {{\n{entries}\n}};",
        layer.scan_map_name()
    )
}

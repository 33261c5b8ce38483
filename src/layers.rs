//! Per-layer scan-code lookup tables.
//!
//! The firmware indexes a layer's scan map directly with
//! `scanCode - firstScanCode`, so every scan code between the first and the
//! last populated one keeps a slot, even when nothing is bound to it.

use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::error::{EncodeError, EncodeResult};
use crate::model::ScanCode;
use serde::{Deserialize, Serialize};

/// Separator between stacked layer source names.
pub const NAME_STACK_SEPARATOR: &str = " + ";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// One layer as resolved by the front-end.
pub struct LayerSource {
    /// Names of the sources merged into this layer, in merge order.
    #[serde(default)]
    pub name_stack: Vec<String>,
    /// Files the names came from; parallel to `name_stack`.
    #[serde(default)]
    pub layer_files: Vec<String>,
    /// First scan code as computed upstream, when provided.
    #[serde(default)]
    pub first_scan_code: Option<ScanCode>,
    /// Trigger-macro indices, indexed by scan code.
    pub trigger_list: Vec<Vec<usize>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanCodeSlot {
    pub scan_code: ScanCode,
    pub triggers: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerTable {
    pub index: usize,
    pub first_scan_code: ScanCode,
    /// Contiguous slots from `first_scan_code` to the last populated scan code.
    pub slots: Vec<ScanCodeSlot>,
    pub display_name: String,
}

impl LayerTable {
    pub fn is_default(&self) -> bool {
        self.index == 0
    }

    /// Symbol prefix used by the firmware macros (`default`, `layer1`, ...).
    pub fn symbol_prefix(&self) -> String {
        if self.is_default() {
            "default".to_string()
        } else {
            format!("layer{}", self.index)
        }
    }

    pub fn scan_map_name(&self) -> String {
        format!("{}_scanMap", self.symbol_prefix())
    }

    pub fn trigger_list_name(&self, scan_code: ScanCode) -> String {
        format!("{}_tl_0x{:02X}", self.symbol_prefix(), scan_code.0)
    }

    /// Name shown in the layer index, e.g. `D: MD1 + MD1Overlay` or `2: FnLayer`.
    pub fn index_label(&self) -> String {
        if self.is_default() {
            format!("D: {}", self.display_name)
        } else {
            format!("{}: {}", self.index, self.display_name)
        }
    }

    pub fn max_scan_code(&self) -> Option<ScanCode> {
        self.slots.last().map(|slot| slot.scan_code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerTables {
    /// Default layer first, then partial layers in ascending index order.
    pub layers: Vec<LayerTable>,
    /// Highest populated scan code across every layer.
    pub max_scan_code: ScanCode,
}

pub struct LayerTableBuilder {
    trigger_count: usize,
}

impl LayerTableBuilder {
    /// `trigger_count` bounds the trigger indices a layer may reference.
    pub fn new(trigger_count: usize) -> Self {
        Self { trigger_count }
    }

    pub fn build(
        &self,
        sources: &[LayerSource],
        declared_max: Option<ScanCode>,
        diagnostics: &mut Diagnostics,
    ) -> EncodeResult<LayerTables> {
        if sources.is_empty() {
            return Err(EncodeError::structural("layout defines no default layer"));
        }

        let layers = sources
            .iter()
            .enumerate()
            .map(|(index, source)| self.build_layer(index, source, diagnostics))
            .collect::<EncodeResult<Vec<_>>>()?;

        let max_scan_code = layers
            .iter()
            .filter_map(LayerTable::max_scan_code)
            .max()
            .unwrap_or(ScanCode(0));

        if let Some(declared) = declared_max {
            if declared != max_scan_code {
                return Err(EncodeError::structural(format!(
                    "declared max scan code {declared} but layers reach {max_scan_code}"
                )));
            }
        }

        tracing::debug!(
            layers = layers.len(),
            max_scan_code = max_scan_code.0,
            "built layer tables"
        );
        Ok(LayerTables {
            layers,
            max_scan_code,
        })
    }

    fn build_layer(
        &self,
        index: usize,
        source: &LayerSource,
        diagnostics: &mut Diagnostics,
    ) -> EncodeResult<LayerTable> {
        if source.trigger_list.len() > usize::from(u8::MAX) + 1 {
            return Err(EncodeError::structural(format!(
                "layer {index} trigger list covers {} scan codes, more than a byte can address",
                source.trigger_list.len()
            )));
        }

        for (scan_code, triggers) in source.trigger_list.iter().enumerate() {
            if let Some(bad) = triggers.iter().find(|t| **t >= self.trigger_count) {
                return Err(EncodeError::structural(format!(
                    "layer {index} scan code 0x{scan_code:02X} references trigger macro {bad} but only {} exist",
                    self.trigger_count
                )));
            }
        }

        let first = source.trigger_list.iter().position(|t| !t.is_empty());
        let last = source.trigger_list.iter().rposition(|t| !t.is_empty());

        let display_name = source.name_stack.join(NAME_STACK_SEPARATOR);

        let (Some(first), Some(last)) = (first, last) else {
            if let Some(declared) = source.first_scan_code {
                return Err(EncodeError::structural(format!(
                    "layer {index} declares first scan code {declared} but binds no scan codes"
                )));
            }
            diagnostics.warn(
                DiagnosticCode::EmptyLayer,
                format!("layer {index} ({display_name}) binds no scan codes"),
            );
            return Ok(LayerTable {
                index,
                first_scan_code: ScanCode(0),
                slots: Vec::new(),
                display_name,
            });
        };

        let first_scan_code = scan_code_at(first)?;
        if let Some(declared) = source.first_scan_code {
            if declared != first_scan_code {
                return Err(EncodeError::structural(format!(
                    "layer {index} declares first scan code {declared} but the first bound scan code is {first_scan_code}"
                )));
            }
        }

        let slots = (first..=last)
            .map(|position| {
                Ok(ScanCodeSlot {
                    scan_code: scan_code_at(position)?,
                    triggers: source.trigger_list[position].clone(),
                })
            })
            .collect::<EncodeResult<Vec<_>>>()?;

        Ok(LayerTable {
            index,
            first_scan_code,
            slots,
            display_name,
        })
    }
}

fn scan_code_at(position: usize) -> EncodeResult<ScanCode> {
    u8::try_from(position)
        .map(ScanCode)
        .map_err(|_| EncodeError::structural(format!("scan code {position} exceeds one byte")))
}

//! Resolved-layout document: the single input of a compilation run.
//!
//! The front-end writes one JSON document holding the capability set, the
//! index-sorted result and trigger macros, the per-layer trigger lists and the
//! variables behind `#define`s. The loader enforces the document version and
//! the JSON Schema before deserializing, so the encoders only ever see
//! well-formed tables.

use crate::catalog::{Capability, RequiredCapability};
use crate::layers::LayerSource;
use crate::model::{ResultMacro, ScanCode, TriggerMacro};
use crate::schema_loader::LayoutSchema;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

// Reject unexpected document versions rather than encode against a different
// field contract. The accepted set can be widened through the environment.
pub const LAYOUT_SCHEMA_VERSION: &str = "kll_resolved_v1";
pub const ENV_ALLOWED_LAYOUT_SCHEMAS: &str = "KLL_ALLOWED_LAYOUT_SCHEMAS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Layer source name and the file it was read from.
pub struct LayerProvenance {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Build metadata echoed into the generated header banner.
pub struct BuildInfo {
    #[serde(default)]
    pub generation_date: Option<String>,
    #[serde(default)]
    pub git_revision: Option<String>,
    #[serde(default)]
    pub git_changes: Vec<String>,
    #[serde(default)]
    pub compiler_args: Vec<String>,
    #[serde(default)]
    pub base_layout: Vec<LayerProvenance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLayout {
    pub schema_version: String,
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub required_capabilities: BTreeMap<RequiredCapability, String>,
    /// Extra consumer codes layered over the built-in HID table.
    #[serde(default)]
    pub consumer_codes: BTreeMap<String, u16>,
    /// Result macros in firmware index order.
    pub results: Vec<ResultMacro>,
    /// Trigger macros in firmware index order, each with its result index.
    pub triggers: Vec<TriggerMacro>,
    /// Default layer first, then partial layers.
    pub layers: Vec<LayerSource>,
    #[serde(default)]
    pub overall_max_scan_code: Option<ScanCode>,
    /// Variable name → exported C macro name.
    #[serde(default)]
    pub defines: BTreeMap<String, String>,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    #[serde(default)]
    pub info: BuildInfo,
}

impl ResolvedLayout {
    /// Read, validate and deserialize a layout file with the bundled schema.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading resolved layout {}", path.display()))?;
        Self::from_str_with(&data, &LayoutSchema::bundled()?)
            .with_context(|| format!("loading resolved layout {}", path.display()))
    }

    pub fn from_str_with(data: &str, schema: &LayoutSchema) -> Result<Self> {
        let value: Value = serde_json::from_str(data).context("parsing resolved layout JSON")?;
        Self::from_value(value, schema)
    }

    pub fn from_value(value: Value, schema: &LayoutSchema) -> Result<Self> {
        let version = value
            .get("schema_version")
            .and_then(Value::as_str)
            .unwrap_or_default();
        validate_schema_version(version)?;
        schema.validate(&value)?;
        let layout: ResolvedLayout =
            serde_json::from_value(value).context("deserializing resolved layout")?;
        tracing::debug!(
            capabilities = layout.capabilities.len(),
            results = layout.results.len(),
            triggers = layout.triggers.len(),
            layers = layout.layers.len(),
            "loaded resolved layout"
        );
        Ok(layout)
    }
}

pub fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

pub fn allowed_schema_versions() -> BTreeSet<String> {
    let mut versions: BTreeSet<String> = BTreeSet::new();
    versions.insert(LAYOUT_SCHEMA_VERSION.to_string());
    if let Ok(raw) = std::env::var(ENV_ALLOWED_LAYOUT_SCHEMAS) {
        for v in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            versions.insert(v.to_string());
        }
    }
    versions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Argument, TriggerKey};
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "schema_version": LAYOUT_SCHEMA_VERSION,
            "capabilities": [
                {"name": "usbKeyOut", "function": "Output_usbCodeSend_capability",
                 "args": [{"name": "code", "width": 1}]}
            ],
            "results": [[[{"capability": "usbKeyOut", "args": [4]}]]],
            "triggers": [{"sequence": [[1]], "result": 0}],
            "layers": [{"name_stack": ["MD1"], "trigger_list": [[], [0]]}]
        })
    }

    #[test]
    fn minimal_layout_deserializes() {
        let layout = ResolvedLayout::from_value(minimal(), &LayoutSchema::bundled().unwrap())
            .expect("layout loads");
        assert_eq!(layout.results[0].steps[0][0].args, vec![Argument::Numeric(4)]);
        assert_eq!(layout.triggers[0].sequence[0][0], TriggerKey::digital(1));
        assert!(layout.defines.is_empty());
        assert_eq!(layout.info, BuildInfo::default());
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let mut value = minimal();
        value["schema_version"] = json!("kll_resolved_v0");
        let err = ResolvedLayout::from_value(value, &LayoutSchema::bundled().unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("kll_resolved_v0"));
    }

    #[test]
    fn schema_rejects_non_consumer_symbols() {
        let mut value = minimal();
        value["results"] = json!([[[{"capability": "usbKeyOut", "args": ["LAYER_ONE"]}]]]);
        assert!(ResolvedLayout::from_value(value, &LayoutSchema::bundled().unwrap()).is_err());
    }
}

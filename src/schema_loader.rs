//! JSON Schema gate for resolved-layout documents.
//!
//! The bundled schema ships inside the binary; callers may point at another
//! schema file when the front-end emits an extended document. Validation
//! errors are collected and reported together so one run surfaces every
//! problem in the input.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// Relative path of the bundled schema inside the repository.
pub const BUNDLED_SCHEMA_PATH: &str = "schema/resolved_layout.schema.json";

const BUNDLED_SCHEMA: &str = include_str!("../schema/resolved_layout.schema.json");

/// Compiled resolved-layout schema.
pub struct LayoutSchema {
    compiled: JSONSchema,
}

impl LayoutSchema {
    pub fn bundled() -> Result<Self> {
        let raw: Value =
            serde_json::from_str(BUNDLED_SCHEMA).context("parsing bundled layout schema")?;
        Self::compile(&raw, BUNDLED_SCHEMA_PATH)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(&raw, &path.display().to_string())
    }

    /// Bundled schema unless `path` overrides it.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    fn compile(raw: &Value, label: &str) -> Result<Self> {
        let compiled =
            JSONSchema::compile(raw).map_err(|err| anyhow!("compiling schema {label}: {err}"))?;
        Ok(Self { compiled })
    }

    pub fn validate(&self, instance: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{} at {}", err, err.instance_path))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("resolved layout failed schema validation:\n{}", details);
        }
        Ok(())
    }
}

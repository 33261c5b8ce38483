//! Kiibohd back-end of the KLL compiler.
//!
//! Takes a fully resolved layout (capabilities, index-sorted result and
//! trigger macros, per-layer trigger lists) and encodes it into the
//! length-prefixed arrays the firmware macro interpreter walks at runtime.
//! The run is all-or-nothing: every table is encoded before the artifact is
//! assembled, and the first fatal error aborts the whole compilation.

pub mod artifact;
pub mod catalog;
pub mod defines;
pub mod diagnostics;
pub mod encode;
pub mod error;
pub mod layers;
pub mod layout;
pub mod logging;
pub mod model;
pub mod schema_loader;

pub use artifact::{Artifact, ArtifactAssembler};
pub use catalog::{ArgSpec, Capability, CapabilityTable, ConsumerCodeTable, RequiredCapability};
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
pub use encode::{EncodedMacro, EncodedTriggers, ResultMacroEncoder, Token, TriggerMacroEncoder};
pub use error::{EncodeError, EncodeResult, ResolutionKind};
pub use layers::{LayerSource, LayerTable, LayerTableBuilder, LayerTables, ScanCodeSlot};
pub use layout::{BuildInfo, LayerProvenance, ResolvedLayout};
pub use model::{Argument, Combo, ComboItem, ResultMacro, ScanCode, TriggerKey, TriggerMacro};
pub use schema_loader::LayoutSchema;

/// Artifact plus the non-fatal issues found while producing it.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub artifact: Artifact,
    pub diagnostics: Diagnostics,
}

/// Encode every table of `layout` and assemble the fill sections.
pub fn compile_layout(layout: &ResolvedLayout) -> EncodeResult<Compilation> {
    let mut diagnostics = Diagnostics::new();

    let capabilities = CapabilityTable::build(
        layout.capabilities.iter().cloned(),
        &layout.required_capabilities,
    )?;
    let mut consumer_codes = ConsumerCodeTable::with_defaults();
    consumer_codes.extend(
        layout
            .consumer_codes
            .iter()
            .map(|(tag, code)| (tag.as_str(), *code)),
    );

    let results =
        ResultMacroEncoder::new(&capabilities, &consumer_codes).encode_all(&layout.results)?;
    let triggers = TriggerMacroEncoder::new(layout.results.len()).encode_all(&layout.triggers)?;
    let layers = LayerTableBuilder::new(layout.triggers.len()).build(
        &layout.layers,
        layout.overall_max_scan_code,
        &mut diagnostics,
    )?;
    let defines = defines::render_defines(&layout.defines, &layout.variables, &mut diagnostics);

    let artifact = ArtifactAssembler {
        capabilities: &capabilities,
        results: &results,
        triggers: &triggers,
        layers: &layers,
        layer_sources: &layout.layers,
        info: &layout.info,
        defines,
    }
    .assemble();

    tracing::info!(
        results = results.len(),
        triggers = triggers.records.len(),
        layers = layers.layers.len(),
        warnings = diagnostics.len(),
        "compiled layout"
    );
    Ok(Compilation {
        artifact,
        diagnostics,
    })
}

//! `#define` lines for the firmware headers.
//!
//! A define names a layout variable and the C macro it is exported as. A
//! variable that was never assigned is a warning, not an error: the line is
//! left out and the firmware falls back to its own default.

use crate::diagnostics::{DiagnosticCode, Diagnostics};
use serde_json::Value;
use std::collections::BTreeMap;

/// Render one `\n#define NAME value` line per resolvable define.
pub fn render_defines(
    defines: &BTreeMap<String, String>,
    variables: &BTreeMap<String, Value>,
    diagnostics: &mut Diagnostics,
) -> String {
    let mut out = String::new();
    for (variable, macro_name) in defines {
        match variables.get(variable) {
            Some(value) => {
                out.push_str(&format!("\n#define {macro_name} {}", render_value(value)));
            }
            None => diagnostics.warn(
                DiagnosticCode::MissingDefineVariable,
                format!("'{variable}' not defined..."),
            ),
        }
    }
    out
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    }
}

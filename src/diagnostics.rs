//! Non-fatal issues collected during a run.
//!
//! The library never prints. Warnings are traced and handed back to the caller
//! alongside the artifact so binaries can decide whether to surface or escalate
//! them.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A `#define` referenced a variable that was never assigned.
    MissingDefineVariable,
    /// A layer had no scan code bound to any trigger macro.
    EmptyLayer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(?code, "{message}");
        self.entries.push(Diagnostic { code, message });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has(&self, code: DiagnosticCode) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }
}

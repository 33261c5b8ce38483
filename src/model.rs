//! Resolved macro structures handed over by the front-end.
//!
//! Everything here is plain data: built once when the layout is loaded and
//! read by the encoders without mutation. Argument and trigger-key variants
//! are resolved at load time so the encoders never inspect raw JSON.

use crate::catalog::consumer::CONSUMER_PREFIX;
use crate::error::{EncodeError, EncodeResult, ResolutionKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Numeric identifier of a physical key position.
pub struct ScanCode(pub u8);

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// A single capability argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawArgument")]
pub enum Argument {
    Numeric(u32),
    /// Full `CONSUMER_*` tag; resolved against the consumer code table when
    /// the macro is encoded.
    ConsumerTag(String),
}

impl Argument {
    /// Classify a symbolic argument. Only consumer tags are symbolic in the
    /// firmware encoding; any other name should have been resolved upstream.
    pub fn symbolic(raw: &str) -> EncodeResult<Self> {
        if raw.starts_with(CONSUMER_PREFIX) {
            Ok(Argument::ConsumerTag(raw.to_string()))
        } else {
            Err(EncodeError::unresolved(ResolutionKind::Argument, raw))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawArgument {
    Numeric(u32),
    Symbol(String),
}

impl TryFrom<RawArgument> for Argument {
    type Error = EncodeError;

    fn try_from(raw: RawArgument) -> EncodeResult<Self> {
        match raw {
            RawArgument::Numeric(value) => Ok(Argument::Numeric(value)),
            RawArgument::Symbol(raw) => Argument::symbolic(&raw),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One capability activation inside a combo.
pub struct ComboItem {
    pub capability: String,
    #[serde(default)]
    pub args: Vec<Argument>,
}

impl ComboItem {
    pub fn new(capability: impl Into<String>, args: Vec<Argument>) -> Self {
        Self {
            capability: capability.into(),
            args,
        }
    }
}

/// Items fired together within one sequence step.
pub type Combo = Vec<ComboItem>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Output action sequence: one combo per sequence step.
pub struct ResultMacro {
    pub steps: Vec<Combo>,
}

impl ResultMacro {
    pub fn new(steps: Vec<Combo>) -> Self {
        Self { steps }
    }
}

/// One key of a trigger combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", from = "RawTriggerKey")]
pub enum TriggerKey {
    Digital { scan_code: ScanCode },
    Analog { scan_code: ScanCode, value: u8 },
    LedState { led: u8, state: u8 },
}

impl TriggerKey {
    pub fn digital(scan_code: u8) -> Self {
        TriggerKey::Digital {
            scan_code: ScanCode(scan_code),
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            TriggerKey::Digital { .. } => "digital",
            TriggerKey::Analog { .. } => "analog",
            TriggerKey::LedState { .. } => "led_state",
        }
    }
}

// A bare number is shorthand for a digital key.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTriggerKey {
    Bare(ScanCode),
    Tagged(TaggedTriggerKey),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedTriggerKey {
    Digital { scan_code: ScanCode },
    Analog { scan_code: ScanCode, value: u8 },
    LedState { led: u8, state: u8 },
}

impl From<RawTriggerKey> for TriggerKey {
    fn from(raw: RawTriggerKey) -> Self {
        match raw {
            RawTriggerKey::Bare(scan_code) => TriggerKey::Digital { scan_code },
            RawTriggerKey::Tagged(TaggedTriggerKey::Digital { scan_code }) => {
                TriggerKey::Digital { scan_code }
            }
            RawTriggerKey::Tagged(TaggedTriggerKey::Analog { scan_code, value }) => {
                TriggerKey::Analog { scan_code, value }
            }
            RawTriggerKey::Tagged(TaggedTriggerKey::LedState { led, state }) => {
                TriggerKey::LedState { led, state }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Input scan-code sequence bound to exactly one result macro.
pub struct TriggerMacro {
    pub sequence: Vec<Vec<TriggerKey>>,
    /// Index into the result-macro list.
    pub result: usize,
}

impl TriggerMacro {
    pub fn new(sequence: Vec<Vec<TriggerKey>>, result: usize) -> Self {
        Self { sequence, result }
    }
}

//! Trigger macro encoding.
//!
//! Each sequence step is `len` followed by one `0x00, 0x01, 0xSS` triple per
//! key (digital key type, default key state, scan code). There is no release
//! framing on the trigger side.

use crate::encode::{EncodedMacro, Token};
use crate::error::{EncodeError, EncodeResult};
use crate::model::{TriggerKey, TriggerMacro};

const KEY_TYPE_DIGITAL: u8 = 0x00;
const KEY_STATE_DEFAULT: u8 = 0x01;

/// Encoded trigger records plus the trigger → result pairing table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedTriggers {
    pub records: Vec<EncodedMacro>,
    /// `pairing[t]` is the result-macro index fired by trigger `t`.
    pub pairing: Vec<usize>,
}

pub struct TriggerMacroEncoder {
    result_count: usize,
}

impl TriggerMacroEncoder {
    /// `result_count` bounds the result indices a trigger may pair with.
    pub fn new(result_count: usize) -> Self {
        Self { result_count }
    }

    /// Encode one trigger macro; `index` is its position in the trigger list.
    pub fn encode(&self, index: usize, trigger: &TriggerMacro) -> EncodeResult<EncodedMacro> {
        if trigger.result >= self.result_count {
            return Err(EncodeError::structural(format!(
                "trigger macro {index} pairs with result macro {} but only {} exist",
                trigger.result, self.result_count
            )));
        }

        let mut out = EncodedMacro::default();
        for combo in &trigger.sequence {
            out.push_count(combo.len());
            for key in combo {
                match key {
                    TriggerKey::Digital { scan_code } => {
                        out.push(Token::Hex(KEY_TYPE_DIGITAL));
                        out.push(Token::Hex(KEY_STATE_DEFAULT));
                        out.push(Token::Hex(scan_code.0));
                    }
                    TriggerKey::Analog { .. } | TriggerKey::LedState { .. } => {
                        return Err(EncodeError::UnsupportedVariant {
                            context: format!("trigger macro {index}"),
                            variant: key.variant_name(),
                        });
                    }
                }
            }
        }
        out.terminate();
        Ok(out)
    }

    pub fn encode_all(&self, triggers: &[TriggerMacro]) -> EncodeResult<EncodedTriggers> {
        let mut encoded = EncodedTriggers::default();
        for (index, trigger) in triggers.iter().enumerate() {
            encoded.records.push(self.encode(index, trigger)?);
            encoded.pairing.push(trigger.result);
        }
        tracing::debug!(triggers = encoded.records.len(), "encoded trigger macros");
        Ok(encoded)
    }
}

//! Result macro encoding.
//!
//! Layout of one record (see the kiibohd `Macros/PartialMap/kll.h` guide):
//!
//! ```text
//! [spacer] len, (capIndex, arg*)*   -- per sequence step
//! [spacer]                          -- trailing, only for multi-step macros
//! 0
//! ```
//!
//! A spacer is the single-item combo `1, idx(USB), 0x00`. It releases every
//! USB key between steps so the host does not coalesce a repeated key.

use crate::catalog::{Capability, CapabilityTable, ConsumerCodeTable, RequiredCapability};
use crate::encode::{EncodedMacro, Token};
use crate::error::{EncodeError, EncodeResult};
use crate::model::{Argument, ComboItem, ResultMacro};

pub struct ResultMacroEncoder<'a> {
    capabilities: &'a CapabilityTable,
    consumer_codes: &'a ConsumerCodeTable,
}

impl<'a> ResultMacroEncoder<'a> {
    pub fn new(capabilities: &'a CapabilityTable, consumer_codes: &'a ConsumerCodeTable) -> Self {
        Self {
            capabilities,
            consumer_codes,
        }
    }

    pub fn encode(&self, result: &ResultMacro) -> EncodeResult<EncodedMacro> {
        let mut out = EncodedMacro::default();

        for (step, combo) in result.steps.iter().enumerate() {
            if step > 0 {
                self.push_spacer(&mut out);
            }
            out.push_count(combo.len());
            for item in combo {
                self.encode_item(item, &mut out)?;
            }
        }

        if result.steps.len() > 1 {
            self.push_spacer(&mut out);
        }

        out.terminate();
        Ok(out)
    }

    /// Encode every result macro, keeping the upstream index order.
    pub fn encode_all(&self, results: &[ResultMacro]) -> EncodeResult<Vec<EncodedMacro>> {
        results
            .iter()
            .enumerate()
            .map(|(index, result)| {
                self.encode(result).map_err(|err| match err {
                    EncodeError::Structural(message) => {
                        EncodeError::Structural(format!("result macro {index}: {message}"))
                    }
                    other => other,
                })
            })
            .collect()
    }

    fn push_spacer(&self, out: &mut EncodedMacro) {
        out.push_count(1);
        out.push(Token::Dec(
            self.capabilities.required_index(RequiredCapability::Usb) as u32,
        ));
        out.push(Token::Hex(0x00));
    }

    fn encode_item(&self, item: &ComboItem, out: &mut EncodedMacro) -> EncodeResult<()> {
        let (index, capability) = self.capabilities.capability(&item.capability)?;
        out.push(Token::Dec(index as u32));

        // The no-op capability carries no argument bytes whatever it declares.
        // This runs ahead of the consumer-tag branch so a NONE item handed a
        // `CONSUMER_*` argument still encodes as its index alone.
        if capability.name == self.capabilities.required(RequiredCapability::None) {
            return Ok(());
        }

        for (position, arg) in item.args.iter().enumerate() {
            match arg {
                Argument::ConsumerTag(tag) => {
                    let code = self.consumer_codes.lookup(tag)?;
                    let [low, high] = code.to_le_bytes();
                    out.push(Token::Dec(u32::from(low)));
                    out.push(Token::Dec(u32::from(high)));
                    // A consumer code is the whole argument list of its item.
                    return Ok(());
                }
                Argument::Numeric(value) => {
                    let width = declared_width(capability, position)?;
                    push_numeric(out, &capability.name, *value, width)?;
                }
            }
        }

        if item.args.len() != capability.args.len() {
            return Err(EncodeError::structural(format!(
                "capability {} declares {} argument(s) but {} were given",
                capability.name,
                capability.args.len(),
                item.args.len()
            )));
        }
        Ok(())
    }
}

fn declared_width(capability: &Capability, position: usize) -> EncodeResult<usize> {
    capability
        .args
        .get(position)
        .map(|spec| spec.width)
        .ok_or_else(|| {
            EncodeError::structural(format!(
                "capability {} declares {} argument(s) but argument {} was given",
                capability.name,
                capability.args.len(),
                position + 1
            ))
        })
}

// Little-endian, one token per declared byte.
fn push_numeric(out: &mut EncodedMacro, capability: &str, value: u32, width: usize) -> EncodeResult<()> {
    let significant = 4 - (value.leading_zeros() as usize / 8);
    if significant > width {
        return Err(EncodeError::structural(format!(
            "argument {value} of capability {capability} does not fit in {width} byte(s)"
        )));
    }
    let bytes = value.to_le_bytes();
    for position in 0..width {
        let byte = bytes.get(position).copied().unwrap_or(0);
        out.push(Token::Dec(u32::from(byte)));
    }
    Ok(())
}

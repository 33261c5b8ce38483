//! Linear token streams for the firmware macro interpreter.
//!
//! Both macro kinds encode to a flat, length-prefixed list terminated by `0`.
//! Tokens remember whether the firmware headers print them as decimal or as
//! `0x..` hex so the rendered guide arrays match the kiibohd layout exactly,
//! while [`EncodedMacro::values`] exposes the raw numbers for byte-level checks.

pub mod result;
pub mod trigger;

pub use result::ResultMacroEncoder;
pub use trigger::{EncodedTriggers, TriggerMacroEncoder};

use crate::error::{EncodeError, EncodeResult};
use std::fmt;

/// Value written after every macro.
pub const TERMINATOR: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Dec(u32),
    Hex(u8),
}

impl Token {
    pub fn value(self) -> u32 {
        match self {
            Token::Dec(value) => value,
            Token::Hex(value) => u32::from(value),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Dec(value) => write!(f, "{value}"),
            Token::Hex(value) => write!(f, "0x{value:02X}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedMacro {
    tokens: Vec<Token>,
}

impl EncodedMacro {
    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub(crate) fn push_count(&mut self, count: usize) {
        self.push(Token::Dec(count as u32));
    }

    pub(crate) fn terminate(&mut self) {
        self.push(Token::Dec(TERMINATOR));
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn values(&self) -> Vec<u32> {
        self.tokens.iter().map(|token| token.value()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Raw bytes as the firmware stores them. Capability indices and combo
    /// lengths are single bytes there, so anything wider is rejected.
    pub fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        self.tokens
            .iter()
            .map(|token| {
                u8::try_from(token.value()).map_err(|_| {
                    EncodeError::structural(format!(
                        "value {} does not fit in a firmware byte",
                        token.value()
                    ))
                })
            })
            .collect()
    }

    /// Comma separated body of the guide array, e.g. `1, 4, 4, 0`.
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(Token::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

//! Capability catalog wiring.
//!
//! Capabilities are the output functions the firmware exposes (USB key codes,
//! consumer control, layer switching, ...). Result macros reference them only
//! by position, so the table built here fixes the index space for the whole
//! compilation run. Consumer control codes live alongside because they are
//! the one argument kind that needs a lookup before it can be encoded.

pub mod consumer;
pub mod index;
pub mod model;

pub use consumer::ConsumerCodeTable;
pub use index::CapabilityTable;
pub use model::{ArgSpec, Capability, RequiredCapability};

//! Indexed view of the resolved capability set.
//!
//! Firmware arrays reference capabilities by position, so the index is built
//! from an explicit total order: ascending `str` order over capability names.
//! The table is strict about duplicates and about the four required control
//! classes so a malformed capability set is rejected before any macro is
//! encoded.

use crate::catalog::{Capability, RequiredCapability};
use crate::error::{EncodeError, EncodeResult, ResolutionKind};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Entry {
    index: usize,
    capability: Capability,
}

#[derive(Debug, Clone)]
struct RequiredSlot {
    name: String,
    index: usize,
}

#[derive(Debug, Clone)]
struct RequiredSlots {
    cons: RequiredSlot,
    none: RequiredSlot,
    sys: RequiredSlot,
    usb: RequiredSlot,
}

impl RequiredSlots {
    fn get(&self, kind: RequiredCapability) -> &RequiredSlot {
        match kind {
            RequiredCapability::Cons => &self.cons,
            RequiredCapability::None => &self.none,
            RequiredCapability::Sys => &self.sys,
            RequiredCapability::Usb => &self.usb,
        }
    }
}

#[derive(Debug, Clone)]
/// Capability name → (index, argument width) directory.
pub struct CapabilityTable {
    by_name: BTreeMap<String, Entry>,
    required: RequiredSlots,
}

impl CapabilityTable {
    /// Build the table and resolve the required control classes.
    ///
    /// `overrides` replaces the default firmware name for individual kinds;
    /// kinds without an override use [`RequiredCapability::default_name`].
    pub fn build<I>(
        capabilities: I,
        overrides: &BTreeMap<RequiredCapability, String>,
    ) -> EncodeResult<Self>
    where
        I: IntoIterator<Item = Capability>,
    {
        let mut sorted: BTreeMap<String, Capability> = BTreeMap::new();
        for cap in capabilities {
            if cap.name.trim().is_empty() {
                return Err(EncodeError::structural("encountered capability with no name"));
            }
            if sorted.contains_key(&cap.name) {
                return Err(EncodeError::structural(format!(
                    "duplicate capability name {}",
                    cap.name
                )));
            }
            sorted.insert(cap.name.clone(), cap);
        }

        let by_name: BTreeMap<String, Entry> = sorted
            .into_iter()
            .enumerate()
            .map(|(index, (name, capability))| (name, Entry { index, capability }))
            .collect();

        let slot = |kind: RequiredCapability| -> EncodeResult<RequiredSlot> {
            let name = overrides
                .get(&kind)
                .map(String::as_str)
                .unwrap_or_else(|| kind.default_name());
            let entry = by_name.get(name).ok_or_else(|| {
                EncodeError::unresolved(
                    ResolutionKind::RequiredCapability,
                    format!("{} ({name})", kind.as_str()),
                )
            })?;
            Ok(RequiredSlot {
                name: name.to_string(),
                index: entry.index,
            })
        };
        let required = RequiredSlots {
            cons: slot(RequiredCapability::Cons)?,
            none: slot(RequiredCapability::None)?,
            sys: slot(RequiredCapability::Sys)?,
            usb: slot(RequiredCapability::Usb)?,
        };

        tracing::debug!(capabilities = by_name.len(), "built capability table");
        Ok(Self { by_name, required })
    }

    /// Position of `name` in the firmware capability list.
    pub fn index(&self, name: &str) -> EncodeResult<usize> {
        self.entry(name).map(|entry| entry.index)
    }

    /// Total argument bytes declared by `name`.
    pub fn arg_width(&self, name: &str) -> EncodeResult<usize> {
        self.entry(name).map(|entry| entry.capability.arg_byte_width())
    }

    pub fn capability(&self, name: &str) -> EncodeResult<(usize, &Capability)> {
        self.entry(name)
            .map(|entry| (entry.index, &entry.capability))
    }

    /// Name registered for a required control class.
    pub fn required(&self, kind: RequiredCapability) -> &str {
        &self.required.get(kind).name
    }

    pub fn required_index(&self, kind: RequiredCapability) -> usize {
        self.required.get(kind).index
    }

    /// Iterates capabilities in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Capability)> {
        self.by_name
            .values()
            .map(|entry| (entry.index, &entry.capability))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn entry(&self, name: &str) -> EncodeResult<&Entry> {
        self.by_name
            .get(name)
            .ok_or_else(|| EncodeError::unresolved(ResolutionKind::Capability, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ArgSpec;

    fn cap(name: &str, widths: &[usize]) -> Capability {
        Capability::new(
            name,
            format!("Output_{name}_capability"),
            widths
                .iter()
                .enumerate()
                .map(|(i, width)| ArgSpec {
                    name: format!("arg{i}"),
                    width: *width,
                })
                .collect(),
        )
    }

    fn kiibohd_caps() -> Vec<Capability> {
        vec![
            cap("usbKeyOut", &[1]),
            cap("sysCtrlOut", &[1]),
            cap("noneOut", &[]),
            cap("consCtrlOut", &[2]),
            cap("layerShift", &[2]),
        ]
    }

    #[test]
    fn indices_follow_name_order() {
        let table = CapabilityTable::build(kiibohd_caps(), &BTreeMap::new()).unwrap();
        let names: Vec<_> = table.iter().map(|(_, cap)| cap.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["consCtrlOut", "layerShift", "noneOut", "sysCtrlOut", "usbKeyOut"]
        );
        assert_eq!(table.index("usbKeyOut").unwrap(), 4);
        assert_eq!(table.required_index(RequiredCapability::Usb), 4);
        assert_eq!(table.arg_width("consCtrlOut").unwrap(), 2);
    }

    #[test]
    fn index_space_is_stable_across_input_orders() {
        let mut reversed = kiibohd_caps();
        reversed.reverse();
        let a = CapabilityTable::build(kiibohd_caps(), &BTreeMap::new()).unwrap();
        let b = CapabilityTable::build(reversed, &BTreeMap::new()).unwrap();
        let left: Vec<_> = a.iter().map(|(i, c)| (i, c.name.clone())).collect();
        let right: Vec<_> = b.iter().map(|(i, c)| (i, c.name.clone())).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn ordering_is_by_code_point_not_case_folded() {
        let mut caps = kiibohd_caps();
        caps.push(cap("Zeta", &[]));
        let table = CapabilityTable::build(caps, &BTreeMap::new()).unwrap();
        assert_eq!(table.index("Zeta").unwrap(), 0);
    }

    #[test]
    fn missing_capability_is_a_resolution_error() {
        let table = CapabilityTable::build(kiibohd_caps(), &BTreeMap::new()).unwrap();
        let err = table.index("ledControl").unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Resolution {
                kind: ResolutionKind::Capability,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut caps = kiibohd_caps();
        caps.push(cap("usbKeyOut", &[1]));
        let err = CapabilityTable::build(caps, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, EncodeError::Structural(_)));
    }

    #[test]
    fn required_kinds_must_resolve() {
        let caps: Vec<_> = kiibohd_caps()
            .into_iter()
            .filter(|c| c.name != "sysCtrlOut")
            .collect();
        let err = CapabilityTable::build(caps, &BTreeMap::new()).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Resolution {
                kind: ResolutionKind::RequiredCapability,
                ..
            }
        ));
    }

    #[test]
    fn overrides_replace_default_names() {
        let mut caps = kiibohd_caps();
        caps.push(cap("usbCodeSend", &[1]));
        let mut overrides = BTreeMap::new();
        overrides.insert(RequiredCapability::Usb, "usbCodeSend".to_string());
        let table = CapabilityTable::build(caps, &overrides).unwrap();
        assert_eq!(table.required(RequiredCapability::Usb), "usbCodeSend");
        assert_eq!(
            table.required_index(RequiredCapability::Usb),
            table.index("usbCodeSend").unwrap()
        );
    }
}

#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use kllemit::{
    ArgSpec, Argument, Capability, CapabilityTable, ComboItem, ConsumerCodeTable, LayoutSchema,
    ResolvedLayout,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Index order of the fixture capabilities (ascending by name).
pub const CONS: u32 = 0;
pub const LAYER_SHIFT: u32 = 1;
pub const NONE: u32 = 2;
pub const SYS: u32 = 3;
pub const USB: u32 = 4;

fn arg(name: &str, width: usize) -> ArgSpec {
    ArgSpec {
        name: name.to_string(),
        width,
    }
}

pub fn fixture_capabilities() -> Vec<Capability> {
    vec![
        Capability::new("usbKeyOut", "Output_usbCodeSend_capability", vec![arg("code", 1)]),
        Capability::new("consCtrlOut", "Output_consCtrlSend_capability", vec![arg("code", 2)]),
        Capability::new("sysCtrlOut", "Output_sysCtrlSend_capability", vec![arg("code", 1)]),
        Capability::new("layerShift", "Macro_layerShift_capability", vec![arg("layer", 2)]),
        // Declares an argument to show that NONE still encodes none.
        Capability::new("noneOut", "Output_noneSend_capability", vec![arg("unused", 1)]),
    ]
}

pub fn fixture_table() -> CapabilityTable {
    CapabilityTable::build(fixture_capabilities(), &BTreeMap::new())
        .expect("fixture capabilities build")
}

pub fn consumer_codes() -> ConsumerCodeTable {
    ConsumerCodeTable::with_defaults()
}

pub fn usb(code: u32) -> ComboItem {
    ComboItem::new("usbKeyOut", vec![Argument::Numeric(code)])
}

pub fn consumer(tag: &str) -> ComboItem {
    ComboItem::new("consCtrlOut", vec![Argument::ConsumerTag(tag.to_string())])
}

/// Count occurrences of the spacer triple `1, USB, 0` in an encoded stream.
pub fn count_spacers(values: &[u32]) -> usize {
    values
        .windows(3)
        .filter(|window| window[..] == [1, USB, 0])
        .count()
}

/// A small but complete resolved layout: one default layer, one partial layer.
pub fn sample_layout_json() -> Value {
    json!({
        "schema_version": "kll_resolved_v1",
        "capabilities": [
            {"name": "usbKeyOut", "function": "Output_usbCodeSend_capability",
             "args": [{"name": "code", "width": 1}]},
            {"name": "consCtrlOut", "function": "Output_consCtrlSend_capability",
             "args": [{"name": "code", "width": 2}]},
            {"name": "sysCtrlOut", "function": "Output_sysCtrlSend_capability",
             "args": [{"name": "code", "width": 1}]},
            {"name": "layerShift", "function": "Macro_layerShift_capability",
             "args": [{"name": "layer", "width": 2}]},
            {"name": "noneOut", "function": "Output_noneSend_capability", "args": []}
        ],
        "results": [
            [[{"capability": "usbKeyOut", "args": [4]}]],
            [[{"capability": "usbKeyOut", "args": [5]}], [{"capability": "usbKeyOut", "args": [5]}]],
            [[{"capability": "consCtrlOut", "args": ["CONSUMER_VOLUME_UP"]}]],
            [[{"capability": "layerShift", "args": [1]}]]
        ],
        "triggers": [
            {"sequence": [[2]], "result": 0},
            {"sequence": [[4]], "result": 1},
            {"sequence": [[5]], "result": 3},
            {"sequence": [[2]], "result": 2}
        ],
        "layers": [
            {
                "name_stack": ["MD1", "MD1Overlay"],
                "layer_files": ["MD1-Hacker.kll", "MD1-Overlay.kll"],
                "first_scan_code": 2,
                "trigger_list": [[], [], [0], [], [1], [2]]
            },
            {
                "name_stack": ["FnLayer"],
                "layer_files": ["lcdFuncMap.kll"],
                "trigger_list": [[], [], [3]]
            }
        ],
        "overall_max_scan_code": 5,
        "defines": {"stateWordSize": "StateWordSize_define"},
        "variables": {"stateWordSize": "8"},
        "info": {
            "generation_date": "2026-10-18",
            "git_revision": "3b2f8d1",
            "compiler_args": ["kll", "--backend", "kiibohd", "layout.kll"]
        }
    })
}

pub fn load_layout(value: Value) -> Result<ResolvedLayout> {
    ResolvedLayout::from_value(value, &LayoutSchema::bundled()?)
}

pub fn kll_emit_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kll-emit"));
    for var in ["KLL_INPUT", "KLL_OUTPUT", "KLL_FORMAT", "KLL_ALLOWED_LAYOUT_SCHEMAS"] {
        cmd.env_remove(var);
    }
    cmd
}

pub fn layout_validate_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_layout-validate"));
    cmd.env_remove("KLL_ALLOWED_LAYOUT_SCHEMAS");
    cmd
}

pub fn write_layout(dir: &Path, value: &Value) -> Result<PathBuf> {
    let path = dir.join("layout.json");
    fs::write(&path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing fixture layout {}", path.display()))?;
    Ok(path)
}

pub fn run_command(cmd: Command) -> Result<Output> {
    let mut cmd = cmd;
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

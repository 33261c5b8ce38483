// CLI guard rails for kll-emit and layout-validate: output formats, atomic
// writes and failure exit codes.
#[path = "support/common.rs"]
mod common;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::io::Write;
use std::process::Stdio;
use tempfile::TempDir;

use common::{
    kll_emit_command, layout_validate_command, run_command, sample_layout_json, write_layout,
};

#[test]
fn emits_json_sections_to_output_file() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_layout(dir.path(), &sample_layout_json())?;
    let output = dir.path().join("generatedKeymap.json");

    let mut cmd = kll_emit_command();
    cmd.arg("--input").arg(&input).arg("--output").arg(&output);
    run_command(cmd)?;

    let value: Value = serde_json::from_slice(&fs::read(&output)?)?;
    let sections = value.as_object().context("artifact must be an object")?;
    for name in [
        "Information",
        "VariableInformation",
        "Defines",
        "CapabilitiesList",
        "ResultMacros",
        "ResultMacroList",
        "ResultMacroRecord",
        "TriggerMacros",
        "TriggerMacroList",
        "TriggerMacroRecord",
        "MaxScanCode",
        "DefaultLayerTriggerList",
        "DefaultLayerScanMap",
        "PartialLayerTriggerLists",
        "PartialLayerScanMaps",
        "LayerIndexList",
        "LayerState",
    ] {
        assert!(sections.contains_key(name), "missing section {name}");
    }
    let order: Vec<&str> = sections.keys().map(String::as_str).take(3).collect();
    assert_eq!(order, ["Information", "VariableInformation", "Defines"]);
    assert_eq!(
        sections.get("MaxScanCode").and_then(Value::as_str),
        Some("#define MaxScanCode 0x5")
    );
    Ok(())
}

#[test]
fn text_format_reads_stdin_and_writes_stdout() -> Result<()> {
    let mut cmd = kll_emit_command();
    cmd.arg("--format")
        .arg("text")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().context("spawning kll-emit")?;
    child
        .stdin
        .take()
        .context("kll-emit stdin")?
        .write_all(&serde_json::to_vec(&sample_layout_json())?)?;
    let output = child.wait_with_output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = String::from_utf8(output.stdout)?;
    assert!(text.starts_with("// --- Information ---\n"));
    assert!(text.contains("// --- ResultMacros ---\nGuide_RM( 0 ) = { 1, 4, 4, 0 };"));
    assert!(text.contains("Define_TL( default, 0x03 ) = { 0 };"));
    Ok(())
}

#[test]
fn format_can_come_from_the_environment() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_layout(dir.path(), &sample_layout_json())?;

    let mut cmd = kll_emit_command();
    cmd.env("KLL_INPUT", &input).env("KLL_FORMAT", "text");
    let output = run_command(cmd)?;
    let text = String::from_utf8(output.stdout)?;
    assert!(text.contains("// --- LayerIndexList ---"));
    Ok(())
}

#[test]
fn failed_encoding_leaves_previous_output_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let mut layout = sample_layout_json();
    layout["results"][0] = json!([[{"capability": "ledControl", "args": [1]}]]);
    let input = write_layout(dir.path(), &layout)?;
    let output = dir.path().join("generatedKeymap.json");
    fs::write(&output, "previous")?;

    let result = kll_emit_command()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()?;

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ledControl"), "stderr: {stderr}");
    assert_eq!(fs::read_to_string(&output)?, "previous");
    Ok(())
}

#[test]
fn deny_warnings_turns_missing_defines_into_failure() -> Result<()> {
    let dir = TempDir::new()?;
    let mut layout = sample_layout_json();
    layout["defines"]["indexWordSize"] = json!("IndexWordSize_define");
    let input = write_layout(dir.path(), &layout)?;
    let output = dir.path().join("out.json");

    let lenient = kll_emit_command()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()?;
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stderr).contains("'indexWordSize' not defined"));
    fs::remove_file(&output)?;

    let strict = kll_emit_command()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--deny-warnings")
        .output()?;
    assert!(!strict.status.success());
    assert!(!output.exists());
    Ok(())
}

#[test]
fn unknown_schema_version_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let mut layout = sample_layout_json();
    layout["schema_version"] = json!("kll_resolved_v9");
    let input = write_layout(dir.path(), &layout)?;

    let rejected = kll_emit_command().arg("--input").arg(&input).output()?;
    assert!(!rejected.status.success());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("kll_resolved_v9"));

    let mut allowed = kll_emit_command();
    allowed
        .arg("--input")
        .arg(&input)
        .env("KLL_ALLOWED_LAYOUT_SCHEMAS", "kll_resolved_v9");
    run_command(allowed)?;
    Ok(())
}

#[test]
fn layout_validate_reports_table_counts() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_layout(dir.path(), &sample_layout_json())?;

    let mut cmd = layout_validate_command();
    cmd.arg("--file").arg(&input);
    let output = run_command(cmd)?;
    assert_eq!(
        String::from_utf8(output.stdout)?.trim(),
        "ok: 5 capabilities, 4 result macros, 4 trigger macros, 2 layers"
    );
    Ok(())
}

#[test]
fn layout_validate_rejects_schema_violations() -> Result<()> {
    let dir = TempDir::new()?;
    let mut layout = sample_layout_json();
    layout["results"][0] = json!([[{"capability": "usbKeyOut", "args": ["KEY_A"]}]]);
    let input = write_layout(dir.path(), &layout)?;

    let output = layout_validate_command().arg("--file").arg(&input).output()?;
    assert!(!output.status.success());
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tempfile::tempdir;

#[derive(Debug, Deserialize)]
struct RunReport {
    module: String,
    results: Vec<CallResult>,
    events: Vec<String>,
    coverage: std::collections::BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize)]
struct CallResult {
    function: String,
    id: u32,
    result: Value,
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_aurora_engine"))
        .args(args)
        .output()
        .context("executing aurora_engine")
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().context("path is not valid UTF-8")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        let mut transcript = String::from_utf8_lossy(&output.stdout).to_string();
        transcript.push_str(&String::from_utf8_lossy(&output.stderr));
        panic!(
            "aurora_engine exited with {:?}: {}",
            output.status, transcript
        );
    }
}

#[test]
fn forest_call_script_report() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for the report")?;
    let report_path = temp_dir.path().join("forest_report.json");
    let module = fixture("forest.json");
    let calls = fixture("forest_calls.json");

    let output = run(&[
        "--module",
        path_str(&module)?,
        "--calls",
        path_str(&calls)?,
        "--report-json",
        path_str(&report_path)?,
        "--seed",
        "42",
    ])?;
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loaded module Whispering Forest (2 areas, 7 objects)"));
    assert!(stdout.contains("Saved call report to"));

    let raw = fs::read_to_string(&report_path).context("reading call report")?;
    let report: RunReport = serde_json::from_str(&raw).context("parsing call report")?;
    assert_eq!(report.module, "Whispering Forest");

    let results: Vec<(&str, &Value)> = report
        .results
        .iter()
        .map(|result| (result.function.as_str(), &result.result))
        .collect();
    let expected = [
        ("GetNearestObject", json!({ "object": "B" })),
        ("GetTag", json!({ "string": "B" })),
        ("GetNearestObject", json!({ "object": "D" })),
        ("GetNearestObjectByTag", json!({ "object": "OBJECT_INVALID" })),
        ("GetLocalInt", json!({ "int": 12 })),
        ("SetLocalString", json!("void")),
        ("GetLocalString", json!({ "string": "Aribeth" })),
        ("BeginConversation", json!({ "int": 1 })),
        ("GetPCSpeaker", json!({ "object": "A" })),
        ("#99999", json!("void")),
        ("GetNearestCreature", json!({ "object": "OBJECT_INVALID" })),
        ("GetIsObjectValid", json!({ "int": 0 })),
        ("GetPCSpeaker", json!({ "object": "OBJECT_INVALID" })),
    ];
    assert_eq!(results.len(), expected.len() + 1);
    for (index, (function, value)) in expected.iter().enumerate() {
        assert_eq!(results[index].0, *function, "call {}", index + 1);
        assert_eq!(results[index].1, value, "call {} ({function})", index + 1);
    }

    let dice = &report.results[expected.len()];
    assert_eq!(dice.function, "d6");
    assert_eq!(dice.id, 98);
    let roll = dice.result["int"].as_i64().context("d6 returns an int")?;
    assert!((3..=18).contains(&roll), "3d6 rolled {roll}");

    assert_eq!(
        report.events,
        vec![
            "conversation.begin b_dialog B -> A".to_string(),
            "conversation.end b_dialog".to_string(),
            "object.destroy B".to_string(),
        ]
    );
    assert_eq!(report.coverage.get("GetNearestObject"), Some(&2));
    assert_eq!(report.coverage.get("GetPCSpeaker"), Some(&2));
    assert_eq!(report.coverage.get("#99999"), Some(&1));
    Ok(())
}

#[test]
fn same_seed_rolls_the_same_dice() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for dice scripts")?;
    let calls_path = temp_dir.path().join("dice.json");
    let steps: Vec<Value> = (0..10)
        .map(|_| json!({ "function": "d100", "args": [ { "int": 2 } ] }))
        .collect();
    fs::write(&calls_path, json!({ "steps": steps }).to_string())
        .context("writing dice call script")?;
    let module = fixture("forest.json");

    let mut rolls = Vec::new();
    for name in ["first.json", "second.json"] {
        let report_path = temp_dir.path().join(name);
        let output = run(&[
            "--module",
            path_str(&module)?,
            "--calls",
            path_str(&calls_path)?,
            "--report-json",
            path_str(&report_path)?,
            "--seed",
            "7",
        ])?;
        assert_success(&output);
        let raw = fs::read_to_string(&report_path).context("reading dice report")?;
        let report: RunReport = serde_json::from_str(&raw).context("parsing dice report")?;
        let values: Vec<Value> = report.results.into_iter().map(|r| r.result).collect();
        rolls.push(values);
    }
    assert_eq!(rolls[0], rolls[1]);
    Ok(())
}

#[test]
fn list_functions_marks_unimplemented_entries() -> Result<()> {
    let output = run(&["--list-functions"])?;
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" 227 object GetNearestObject(int, object, int)"));
    assert!(stdout.contains("  38 object GetNearestCreature("));
    assert!(stdout
        .lines()
        .any(|line| line.contains("GetNearestCreature") && line.ends_with("[unimplemented]")));
    assert!(!stdout
        .lines()
        .any(|line| line.contains("GetTag") && line.ends_with("[unimplemented]")));
    Ok(())
}

#[test]
fn unknown_tags_fail_the_run() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for the call script")?;
    let calls_path = temp_dir.path().join("broken.json");
    fs::write(
        &calls_path,
        r#"{ "caller": "nobody", "steps": [ { "function": "GetTag" } ] }"#,
    )
    .context("writing broken call script")?;
    let module = fixture("forest.json");

    let output = run(&[
        "--module",
        path_str(&module)?,
        "--calls",
        path_str(&calls_path)?,
    ])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no object tagged \"nobody\""), "{stderr}");
    Ok(())
}

#[test]
fn module_is_required_to_run_calls() -> Result<()> {
    let output = run(&["--calls", "forest_calls.json"])?;
    assert!(!output.status.success());
    Ok(())
}

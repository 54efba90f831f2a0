use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const RIG_SCRIPT: &str = r#"global proc string buildChain(int $count) {
    string $names[];
    $prefix = "jnt_";
    for ($i = 1; $i <= $count; $i++) {
        joint -n ($prefix + $i);
    }
    select -cl;
}
$chainLength = 4;
"#;

#[test]
fn outline_prints_indented_tree() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let script_path = dir.path().join("rig.mel");
    fs::write(&script_path, RIG_SCRIPT)?;

    let mut cmd = Command::cargo_bin("mel")?;
    cmd.args(["outline", script_path.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("proc buildChain 1:20-1:30 (body 1:1-8:2)"))
        .stdout(predicate::str::contains("  $prefix 3:5-3:12"))
        .stdout(predicate::str::contains("\n$chainLength 9:1-9:13"));

    Ok(())
}

#[test]
fn outline_json_uses_camel_case_ranges() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let script_path = dir.path().join("rig.mel");
    fs::write(&script_path, RIG_SCRIPT)?;

    let output = Command::cargo_bin("mel")?
        .args(["outline", script_path.to_str().unwrap(), "--json"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let roots = value.as_array().expect("array of root symbols");
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["name"], "buildChain");
    assert_eq!(roots[0]["kind"], "procedure");
    assert_eq!(roots[0]["bodyRange"]["end"]["line"], 7);
    assert_eq!(roots[0]["children"][0]["name"], "prefix");
    assert_eq!(roots[1]["kind"], "variable");
    assert!(roots[1].get("children").is_none());

    Ok(())
}

#[test]
fn index_json_excludes_commands_and_numbers() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let script_path = dir.path().join("rig.mel");
    fs::write(&script_path, RIG_SCRIPT)?;

    let output = Command::cargo_bin("mel")?
        .args(["index", script_path.to_str().unwrap(), "--json"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let variables: Vec<&str> = value["variables"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    let words: Vec<&str> = value["words"].as_array().unwrap().iter().filter_map(|v| v.as_str()).collect();

    assert_eq!(variables, vec!["count", "names", "prefix", "i", "chainLength"]);
    assert!(words.contains(&"buildChain"));
    assert!(words.contains(&"jnt"));
    assert!(!words.contains(&"joint"));
    assert!(!words.contains(&"select"));
    assert!(!words.contains(&"4"));

    Ok(())
}

#[test]
fn hover_prints_markdown_with_help_link() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let script_path = dir.path().join("rig.mel");
    fs::write(&script_path, RIG_SCRIPT)?;

    let mut cmd = Command::cargo_bin("mel")?;
    cmd.args(["hover", script_path.to_str().unwrap(), "--line", "7", "--column", "6"]);
    cmd.assert().success().stdout(predicate::str::contains(
        "[Read Online Help](http://help.autodesk.com/cloudhelp/2017/ENU/Maya-Tech-Docs/Commands/select.html)",
    ));

    Ok(())
}

#[test]
fn hover_with_custom_reference_and_base() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let script_path = dir.path().join("rig.mel");
    fs::write(&script_path, RIG_SCRIPT)?;
    let table_path = dir.path().join("commands.json");
    fs::write(&table_path, r#"[{"trigger":"joint","comment":"Create a joint.\nUse -n to name it."}]"#)?;

    let mut cmd = Command::cargo_bin("mel")?;
    cmd.args([
        "hover",
        script_path.to_str().unwrap(),
        "--line",
        "5",
        "--column",
        "10",
        "--reference",
        table_path.to_str().unwrap(),
        "--url-base",
        "https://docs.example/mel",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Create a joint.  \nUse -n to name it.\n\n"))
        .stdout(predicate::str::contains("(https://docs.example/mel/joint.html)"));

    Ok(())
}

#[test]
fn hover_on_unknown_word_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let script_path = dir.path().join("rig.mel");
    fs::write(&script_path, RIG_SCRIPT)?;

    let mut cmd = Command::cargo_bin("mel")?;
    cmd.args(["hover", script_path.to_str().unwrap(), "--line", "1", "--column", "22"]);
    cmd.assert().failure().stderr(predicate::str::contains("no hover"));

    Ok(())
}

#[test]
fn commands_lists_bundled_triggers() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("mel")?;
    cmd.arg("commands");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\nls\n"))
        .stdout(predicate::str::contains("setAttr\n"));

    Ok(())
}

#[test]
fn missing_reference_file_is_reported() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("nope.json");

    let mut cmd = Command::cargo_bin("mel")?;
    cmd.args(["commands", "--reference", missing.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read command table"));

    Ok(())
}

#[test]
fn rejects_parent_directory_paths() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("mel")?;
    cmd.args(["outline", "../secret.mel"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parent directory components"));

    Ok(())
}

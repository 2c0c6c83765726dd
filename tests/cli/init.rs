use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr};

#[test]
fn test_init_creates_config_and_manifest() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .patchlocrc.json
    ✓ Created ./translations/manifest.json

    ----- stderr -----
    ");

    let content = test.read_file(".patchlocrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("resourcesRoot").is_some());
    assert!(parsed.get("candidateRoots").is_some());
    assert_eq!(parsed["mode"], "chained");

    assert!(test.root().join("translations/manifest.json").exists());
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".patchlocrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .patchlocrc.json already exists
    ");
    assert_eq!(test.read_file(".patchlocrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_keeps_existing_manifest() -> Result<()> {
    let test = CliTest::new()?;
    let manifest = r#"{ "version": "9.9.9", "modules": {} }"#;
    test.write_resource("manifest.json", manifest)?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .patchlocrc.json

    ----- stderr -----
    ");
    assert_eq!(test.read_file("translations/manifest.json")?, manifest);
    Ok(())
}

#[test]
fn test_init_project_is_immediately_checkable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "check should work after init. stderr: {}",
        stderr(&output)
    );
    Ok(())
}

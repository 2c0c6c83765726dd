use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

/// Tree at version 1.2.10 with two root documents (one missing) and a
/// dialog document whose target is already translated.
fn setup_project(test: &CliTest, tree_version: &str) -> Result<()> {
    test.write_source(
        "package.json",
        &format!(r#"{{ "name": "app", "version": "{}" }}"#, tree_version),
    )?;
    test.write_source(
        "packages/app/src/App.tsx",
        r#"<Menu label="Open" /><Menu label="Close" /><Menu label="Open" />"#,
    )?;
    test.write_source("packages/app/src/dialogs/About.tsx", "<p>关于</p>")?;

    test.write_resource(
        "manifest.json",
        r#"{
            "name": "app-zh",
            "version": "1.2.10",
            "modules": {
                "root": ["root/missing.json", "root/app.json"],
                "dialogs": ["dialogs/about.json"]
            }
        }"#,
    )?;
    test.write_resource(
        "root/app.json",
        r#"{
            "targetFile": "src/App.tsx",
            "description": "Main menu",
            "replacements": { "\"Open\"": "\"打开\"", "\"Close\"": "\"关闭\"" }
        }"#,
    )?;
    test.write_resource(
        "dialogs/about.json",
        r#"{
            "targetFile": "/src/dialogs/About.tsx",
            "replacements": { "About": "关于" }
        }"#,
    )?;
    Ok(())
}

#[test]
fn test_apply_reports_and_writes() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, "1.2.10")?;

    assert_cmd_snapshot!(test.apply_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Applying app-zh 1.2.10 to upstream (1.2.10)
      ✘ root/missing.json: skipped (translation document not found)
      ✓ src/App.tsx: 3 replacement(s)
      - /src/dialogs/About.tsx: no match

    ✓ Applied 3 replacement(s) in 2 file(s), 1 skipped

    ----- stderr -----
    ");

    assert_eq!(
        test.read_source("packages/app/src/App.tsx")?,
        r#"<Menu label="打开" /><Menu label="关闭" /><Menu label="打开" />"#
    );
    Ok(())
}

#[test]
fn test_apply_twice_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, "1.2.10")?;

    test.apply_command().output()?;
    let first = test.read_source("packages/app/src/App.tsx")?;

    assert_cmd_snapshot!(test.apply_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Applying app-zh 1.2.10 to upstream (1.2.10)
      ✘ root/missing.json: skipped (translation document not found)
      - src/App.tsx: no match
      - /src/dialogs/About.tsx: no match

    ✓ Applied 0 replacement(s) in 2 file(s), 1 skipped

    ----- stderr -----
    ");
    assert_eq!(test.read_source("packages/app/src/App.tsx")?, first);
    Ok(())
}

#[test]
fn test_apply_version_mismatch_still_applies() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, "1.2.11")?;

    assert_cmd_snapshot!(test.apply_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Applying app-zh 1.2.10 to upstream (1.2.11)
      ✘ root/missing.json: skipped (translation document not found)
      ✓ src/App.tsx: 3 replacement(s)
      - /src/dialogs/About.tsx: no match

    ✓ Applied 3 replacement(s) in 2 file(s), 1 skipped

    ----- stderr -----
    warning: tree version 1.2.11 does not match manifest version 1.2.10; some strings may remain untranslated
    ");
    Ok(())
}

#[test]
fn test_apply_dry_run_leaves_files() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, "1.2.10")?;
    let before = test.read_source("packages/app/src/App.tsx")?;

    let mut cmd = test.apply_command();
    cmd.arg("--dry-run");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Checking app-zh 1.2.10 to upstream (1.2.10)
      ✘ root/missing.json: skipped (translation document not found)
      ✓ src/App.tsx: 3 replacement(s)
      - /src/dialogs/About.tsx: no match

    ✓ Would apply 3 replacement(s) in 2 file(s), 1 skipped

    ----- stderr -----
    ");
    assert_eq!(test.read_source("packages/app/src/App.tsx")?, before);
    Ok(())
}

#[test]
fn test_apply_snapshot_mode() -> Result<()> {
    let test = CliTest::new()?;
    test.write_source("package.json", r#"{ "version": "1.0.0" }"#)?;
    test.write_source("packages/app/src/a.ts", "A")?;
    test.write_resource(
        "manifest.json",
        r#"{ "version": "1.0.0", "modules": { "common": ["a.json"] } }"#,
    )?;
    test.write_resource(
        "a.json",
        r#"{ "targetFile": "src/a.ts", "replacements": { "A": "B", "B": "C" } }"#,
    )?;

    let output = test.apply_command().args(["--mode", "snapshot"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_source("packages/app/src/a.ts")?, "B");

    test.write_source("packages/app/src/a.ts", "A")?;
    test.apply_command().output()?;
    assert_eq!(test.read_source("packages/app/src/a.ts")?, "C");
    Ok(())
}

#[test]
fn test_apply_uses_explicit_tree_and_resources() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("vendor/app/package.json", r#"{ "version": "2.0.0" }"#)?;
    test.write_file("vendor/app/packages/app/src/main.ts", "title: 'Welcome'")?;
    test.write_file(
        "zh/manifest.json",
        r#"{ "name": "app-zh", "version": "2.0.0", "modules": { "root": [
            { "document": "main.json", "target": "src/main.ts" }
        ] } }"#,
    )?;
    test.write_file(
        "zh/main.json",
        r#"{ "replacements": { "'Welcome'": "'欢迎'" } }"#,
    )?;

    let mut cmd = test.apply_command();
    cmd.args(["--tree", "vendor/app", "--resources", "zh"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Applying app-zh 2.0.0 to vendor/app (2.0.0)
      ✓ src/main.ts: 1 replacement(s)

    ✓ Applied 1 replacement(s) in 1 file(s), 0 skipped

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("vendor/app/packages/app/src/main.ts")?,
        "title: '欢迎'"
    );
    Ok(())
}

#[test]
fn test_apply_explicit_tree_does_not_fall_back() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, "1.2.10")?;
    let before = test.read_source("packages/app/src/App.tsx")?;

    let mut cmd = test.apply_command();
    cmd.args(["--tree", "typo"]);
    test.settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: No target tree found (no package.json in any candidate):
          - [ROOT]/typo
        ");
    });
    assert_eq!(test.read_source("packages/app/src/App.tsx")?, before);
    Ok(())
}

#[test]
fn test_apply_missing_manifest_is_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_source("package.json", "{}")?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.apply_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to load translation manifest: manifest not found: [ROOT]/./translations/manifest.json
        ");
    });
    Ok(())
}

#[test]
fn test_apply_malformed_document_aborts() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, "1.2.10")?;
    test.write_resource("dialogs/about.json", "{ broken")?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.apply_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----
        Applying app-zh 1.2.10 to upstream (1.2.10)
          ✘ root/missing.json: skipped (translation document not found)
          ✓ src/App.tsx: 3 replacement(s)

        ----- stderr -----
        Error: Failed to apply translations: failed to parse [ROOT]/./translations/dialogs/about.json: key must be a string at line 1 column 3
        ");
    });
    // The root category ran before the failure and keeps its changes.
    assert!(test.read_source("packages/app/src/App.tsx")?.contains("打开"));
    Ok(())
}

#[test]
fn test_apply_without_tree_is_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource("manifest.json", r#"{ "modules": {} }"#)?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.apply_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: No target tree found (no package.json in any candidate):
          - [ROOT]/./upstream
          - [ROOT]/../upstream
        ");
    });
    Ok(())
}

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_check_clean_resources() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource(
        "manifest.json",
        r#"{ "version": "1.0.0", "modules": { "routes": ["routes/home.json"] } }"#,
    )?;
    test.write_resource(
        "routes/home.json",
        r#"{ "targetFile": "src/routes/Home.tsx", "replacements": { "Home": "首页" } }"#,
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 document - no issues found

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_check_reports_errors_and_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource(
        "manifest.json",
        r#"{ "modules": { "root": ["gone.json", "pairs.json"] } }"#,
    )?;
    test.write_resource(
        "pairs.json",
        r#"{ "targetFile": "src/a.ts", "replacements": { "Log": "Log in", "Same": "Same" } }"#,
    )?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: document file does not exist  missing-document
      --> gone.json (root)
    warning: "Log" appears in its own translation and is replaced again on every run  self-reapplying
      --> pairs.json (root)
    warning: "Same" translates to itself  noop-pair
      --> pairs.json (root)

    ✘ 1 error(s), 2 warning(s) in 2 document(s)

    ----- stderr -----
    "#);
    Ok(())
}

#[test]
fn test_check_with_tree_flags_missing_targets() -> Result<()> {
    let test = CliTest::new()?;
    test.write_source("package.json", r#"{ "version": "1.0.0" }"#)?;
    test.write_resource(
        "manifest.json",
        r#"{ "version": "1.0.0", "modules": { "components": ["button.json"] } }"#,
    )?;
    test.write_resource(
        "button.json",
        r#"{ "targetFile": "src/components/Button.tsx", "replacements": { "OK": "确定" } }"#,
    )?;

    // Warnings alone do not fail the check.
    test.settings().bind(|| {
        assert_cmd_snapshot!(test.check_command(), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        warning: src/components/Button.tsx not found at [ROOT]/./upstream/packages/app/src/components/Button.tsx  missing-target
          --> button.json (components)

        ✘ 0 error(s), 1 warning(s) in 1 document(s)

        ----- stderr -----
        ");
    });

    test.write_source("packages/app/src/components/Button.tsx", "OK")?;
    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 document - no issues found

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_check_explicit_tree_must_exist() -> Result<()> {
    let test = CliTest::new()?;
    test.write_source("package.json", r#"{ "version": "1.0.0" }"#)?;
    test.write_resource("manifest.json", r#"{ "modules": {} }"#)?;

    let mut cmd = test.check_command();
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
    Ok(())
}

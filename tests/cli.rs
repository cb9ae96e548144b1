use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn policygate() -> Command {
    let mut cmd = Command::cargo_bin("policygate").unwrap();
    // Make sure ambient CI credentials never leak into the tests
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("GITHUB_EVENT_PATH");
    cmd
}

#[test]
fn check_clean_report_passes() {
    let dir = tempfile::tempdir().unwrap();
    let result = dir.path().join("result.json");
    fs::write(&result, r#"{"violations": []}"#).unwrap();

    policygate()
        .arg("check")
        .arg(&result)
        .assert()
        .success()
        .stdout(predicate::str::contains("No policy violations detected."));
}

#[test]
fn check_critical_violation_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = dir.path().join("result.json");
    fs::write(
        &result,
        r#"{"violations": [{"rule": 1, "file": "a.ts", "line": 3}]}"#,
    )
    .unwrap();

    policygate()
        .arg("check")
        .arg(&result)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("[dry-run]"))
        .stdout(predicate::str::contains("rule 1"))
        .stdout(predicate::str::contains("File: a.ts"))
        .stdout(predicate::str::contains(
            "Critical policy violations detected. Failing workflow.",
        ));
}

#[test]
fn check_non_critical_violations_pass() {
    let dir = tempfile::tempdir().unwrap();
    let result = dir.path().join("result.json");
    fs::write(
        &result,
        r#"{"violations": [{"rule": 5, "file": "a.ts"}, {"rule": 10, "file": "b.ts"}]}"#,
    )
    .unwrap();

    policygate()
        .arg("check")
        .arg(&result)
        .assert()
        .success()
        .stdout(predicate::str::contains("rule 5"))
        .stdout(predicate::str::contains("rule 10"))
        .stdout(predicate::str::contains(
            "Policy violations detected but none were critical.",
        ));
}

#[test]
fn check_fenced_output_is_recovered() {
    let dir = tempfile::tempdir().unwrap();
    let result = dir.path().join("result.txt");
    fs::write(
        &result,
        "Here is the result:\n```json\n{\"violations\":[]}\n```\n",
    )
    .unwrap();

    policygate()
        .arg("check")
        .arg(&result)
        .assert()
        .success()
        .stdout(predicate::str::contains("No policy violations detected."));
}

#[test]
fn check_unparsable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = dir.path().join("result.txt");
    fs::write(&result, "the reviewer said nothing useful").unwrap();

    policygate()
        .arg("check")
        .arg(&result)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Failed to parse policy result"));
}

#[test]
fn check_missing_file_fails() {
    policygate()
        .arg("check")
        .arg("does-not-exist.json")
        .assert()
        .failure();
}

#[test]
fn prompt_renders_template_with_diff() {
    let dir = tempfile::tempdir().unwrap();
    let policies = dir.path().join("policies");
    fs::create_dir(&policies).unwrap();
    fs::write(policies.join("01-secrets.md"), "No secrets in code.\n").unwrap();
    fs::write(policies.join("02-style.md"), "Follow the style guide.\n").unwrap();

    let template = dir.path().join("template.md");
    fs::write(
        &template,
        "You are a policy reviewer.\n\n{{ concatenate all *.md in policies }}\n",
    )
    .unwrap();

    let diff = dir.path().join("changes.diff");
    fs::write(&diff, "--- a/x.ts\n+++ b/x.ts\n+let x = 1;\n").unwrap();

    let output = dir.path().join("out").join("prompt.md");

    policygate()
        .arg("prompt")
        .arg("--template")
        .arg(&template)
        .arg("--diff")
        .arg(&diff)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let prompt = fs::read_to_string(&output).unwrap();
    assert!(prompt.contains("No secrets in code."));
    assert!(prompt.contains("Follow the style guide."));
    assert!(prompt.contains("Git diff to review:\n```diff\n--- a/x.ts"));
    // Sections keep directory sort order
    let secrets = prompt.find("No secrets").unwrap();
    let style = prompt.find("Follow the style").unwrap();
    assert!(secrets < style);
}

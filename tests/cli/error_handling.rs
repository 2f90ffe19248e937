//! CLI error handling tests

use crate::helpers::cli::CliTestHelper;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_missing_tree_file() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["compile", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read change tree"));
}

#[test]
fn test_malformed_tree_json() {
    let helper = CliTestHelper::new();
    fs::write(helper.project_root.join("tree.json"), "{ not json").unwrap();

    helper
        .command()
        .args(["compile", "tree.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_null_tree() {
    let helper = CliTestHelper::new();
    fs::write(helper.project_root.join("tree.json"), "null").unwrap();

    helper
        .command()
        .args(["compile", "tree.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Change tree is null"));
}

#[test]
fn test_invalid_config_yaml() {
    let helper = CliTestHelper::new();
    fs::write(helper.project_root.join("tree.json"), "{}").unwrap();
    helper.write_config("script: [unbalanced");

    helper
        .command()
        .args(["compile", "tree.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

//! cqlmt compile

use crate::helpers::cli::CliTestHelper;
use crate::helpers::tree::{TreeBuilder, deleted_users_table};
use predicates::prelude::*;
use serde_json::json;
use std::fs;

fn added_column_tree() -> serde_json::Value {
    TreeBuilder::new()
        .table(
            "added",
            "users",
            json!({
                "role": { "code": "users", "compMod": { "keyspaceName": "app" } },
                "properties": { "email": { "type": "string" } }
            }),
        )
        .build()
}

#[test]
fn test_compile_prints_script() {
    let helper = CliTestHelper::new();
    helper.write_tree("tree.json", &added_column_tree());

    helper
        .command()
        .args(["compile", "tree.json"])
        .assert()
        .success()
        .stdout("ALTER TABLE \"app\".\"users\" ADD \"email\" text;\n");
}

#[test]
fn test_compile_reads_stdin() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["compile", "-"])
        .write_stdin(added_column_tree().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("ADD \"email\" text;"));
}

#[test]
fn test_compile_writes_output_file() {
    let helper = CliTestHelper::new();
    helper.write_tree("tree.json", &added_column_tree());

    helper
        .command()
        .args(["compile", "tree.json", "--output", "migration.cql"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(helper.project_root.join("migration.cql")).unwrap();
    assert_eq!(written, "ALTER TABLE \"app\".\"users\" ADD \"email\" text;\n");
}

#[test]
fn test_apply_drops_flag() {
    let helper = CliTestHelper::new();
    let tree = TreeBuilder::new()
        .table("deleted", "users", deleted_users_table())
        .build();
    helper.write_tree("tree.json", &tree);

    helper
        .command()
        .args(["compile", "tree.json"])
        .assert()
        .success()
        .stdout("-- DROP TABLE IF EXISTS \"app\".\"users\";\n");

    helper
        .command()
        .args(["compile", "tree.json", "--apply-drops"])
        .assert()
        .success()
        .stdout("DROP TABLE IF EXISTS \"app\".\"users\";\n");
}

#[test]
fn test_config_file_selects_legacy_mode() {
    let helper = CliTestHelper::new();
    let tree = TreeBuilder::new()
        .table(
            "modified",
            "users",
            json!({
                "role": { "code": "users", "compMod": { "keyspaceName": "app" } },
                "properties": {
                    "age": {
                        "name": "age", "type": "numeric", "mode": "varint",
                        "compMod": {
                            "oldField": { "name": "age", "type": "numeric", "mode": "int" },
                            "newField": { "name": "age", "type": "numeric", "mode": "varint" }
                        }
                    }
                }
            }),
        )
        .build();
    helper.write_tree("tree.json", &tree);
    helper.write_config("script:\n  db_version: \"3.0.9\"\n");

    helper
        .command()
        .args(["compile", "tree.json"])
        .assert()
        .success()
        .stdout("ALTER TABLE \"app\".\"users\" ALTER \"age\" TYPE varint;\n");
}

#[test]
fn test_type_map_file() {
    let helper = CliTestHelper::new();
    let tree = TreeBuilder::new()
        .table(
            "added",
            "users",
            json!({
                "role": { "code": "users", "compMod": { "keyspaceName": "app" } },
                "properties": { "home": { "$ref": "#external/definitions/addr" } }
            }),
        )
        .build();
    helper.write_tree("tree.json", &tree);
    helper.write_tree(
        "types.json",
        &json!({ "#external/definitions/addr": "postal_address" }),
    );

    helper
        .command()
        .args(["compile", "tree.json", "--type-map", "types.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frozen<postal_address>"));
}

//! cqlmt check-drops

use crate::helpers::cli::CliTestHelper;
use crate::helpers::tree::{TreeBuilder, deleted_users_table};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_destructive_migration_exits_with_one() {
    let helper = CliTestHelper::new();
    let tree = TreeBuilder::new()
        .table("deleted", "users", deleted_users_table())
        .build();
    helper.write_tree("tree.json", &tree);

    helper
        .command()
        .args(["check-drops", "tree.json"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("destructive statement")
                .and(predicate::str::contains("DROP TABLE IF EXISTS \"app\".\"users\";")),
        );
}

#[test]
fn test_safe_migration_exits_with_zero() {
    let helper = CliTestHelper::new();
    let tree = TreeBuilder::new()
        .keyspace("added", "shop", json!({ "role": { "code": "shop" } }))
        .build();
    helper.write_tree("tree.json", &tree);

    helper
        .command()
        .args(["check-drops", "tree.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No destructive statements"));
}

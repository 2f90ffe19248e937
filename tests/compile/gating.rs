//! Drop statements are commented out unless explicitly applied

use crate::helpers::tree::{TreeBuilder, applying_drops, compile, deleted_users_table, deleted_users_view};
use cqlmt::{ScriptContext, UdtMap, has_destructive_statements};
use rstest::rstest;
use serde_json::{Value, json};

fn destructive_tree() -> Value {
    TreeBuilder::new()
        .keyspace("deleted", "legacy", json!({ "role": { "code": "legacy" } }))
        .table("deleted", "users", deleted_users_table())
        .view("deleted", "users_by_email", deleted_users_view())
        .table(
            "deleted",
            "orders",
            json!({
                "role": { "code": "orders", "compMod": { "keyspaceName": "shop" } },
                "properties": { "note": { "type": "string" } }
            }),
        )
        .build()
}

#[test]
fn test_no_active_drops_by_default() {
    let script = compile(&destructive_tree(), &ScriptContext::default());

    assert!(!script.is_empty());
    for line in script.lines().filter(|line| line.contains("DROP")) {
        assert!(line.starts_with("-- "), "active drop: {}", line);
    }
    assert!(
        has_destructive_statements(&destructive_tree(), &UdtMap::new(), &ScriptContext::default())
            .unwrap()
    );
}

#[test]
fn test_drops_are_active_when_applied() {
    let script = compile(&destructive_tree(), &applying_drops());

    assert!(script.contains("\nDROP TABLE IF EXISTS \"app\".\"users\";"));
    assert!(script.contains("ALTER TABLE \"shop\".\"orders\" DROP \"note\";"));
    assert!(!script.contains("-- "));
}

#[rstest]
#[case::empty(json!({}))]
#[case::only_additions(
    TreeBuilder::new()
        .keyspace("added", "shop", json!({ "role": { "code": "shop" } }))
        .build()
)]
fn test_no_destructive_statements(#[case] tree: Value) {
    assert!(!has_destructive_statements(&tree, &UdtMap::new(), &ScriptContext::default()).unwrap());
}

#[test]
fn test_null_tree_is_rejected() {
    let result = has_destructive_statements(&Value::Null, &UdtMap::new(), &ScriptContext::default());
    assert!(result.is_err());
}

//! Global statement order and deduplication

use crate::helpers::tree::{
    TreeBuilder, applying_drops, compile, deleted_users_table, deleted_users_view,
};
use cqlmt::ScriptContext;
use insta::assert_snapshot;
use serde_json::json;

#[test]
fn test_view_drop_precedes_table_drop() {
    // Tables are walked before views, the order must still flip
    let tree = TreeBuilder::new()
        .table("deleted", "users", deleted_users_table())
        .view("deleted", "users_by_email", deleted_users_view())
        .build();

    assert_snapshot!(compile(&tree, &ScriptContext::default()), @r#"
    -- DROP MATERIALIZED VIEW IF EXISTS "app"."users_by_email";

    -- DROP TABLE IF EXISTS "app"."users";
    "#);
}

#[test]
fn test_keyspace_creation_first_and_drop_last() {
    let tree = TreeBuilder::new()
        .table(
            "added",
            "orders",
            json!({
                "role": { "code": "orders", "compMod": { "created": true, "keyspaceName": "shop" } },
                "properties": { "id": { "type": "uuid", "primaryKey": true } }
            }),
        )
        .keyspace("added", "shop", json!({ "role": { "code": "shop" } }))
        .keyspace("deleted", "legacy", json!({ "role": { "code": "legacy" } }))
        .build();

    let script = compile(&tree, &applying_drops());
    let statements: Vec<_> = script.split("\n\n").collect();

    assert_eq!(statements.len(), 3);
    assert!(statements[0].starts_with("CREATE KEYSPACE IF NOT EXISTS \"shop\""));
    assert!(statements[1].starts_with("CREATE TABLE IF NOT EXISTS \"shop\".\"orders\""));
    assert_eq!(statements[2], "DROP KEYSPACE IF EXISTS \"legacy\";");
}

#[test]
fn test_identical_statements_appear_once() {
    // Both field changes fall back to recreating the whole type
    let tree = TreeBuilder::new()
        .udt(
            "modified",
            "address",
            json!({
                "code": "address",
                "keyspaceName": "app",
                "properties": {
                    "zip": {
                        "type": "numeric", "mode": "varint",
                        "compMod": {
                            "oldField": { "name": "zip", "type": "numeric", "mode": "int" },
                            "newField": { "name": "zip", "type": "numeric", "mode": "varint" }
                        }
                    },
                    "street": {
                        "type": "string",
                        "compMod": {
                            "oldField": { "name": "street", "type": "numeric", "mode": "int" },
                            "newField": { "name": "street", "type": "string" }
                        }
                    }
                }
            }),
        )
        .build();

    let script = compile(&tree, &applying_drops());

    assert_eq!(script.matches("DROP TYPE").count(), 1);
    assert_eq!(script.matches("CREATE TYPE").count(), 1);
    assert!(script.find("DROP TYPE").unwrap() < script.find("CREATE TYPE").unwrap());
}

#[test]
fn test_skip_modified_containers() {
    let tree = TreeBuilder::new()
        .keyspace("added", "shop", json!({ "role": { "code": "shop" } }))
        .keyspace(
            "modified",
            "app",
            json!({ "role": {
                "code": "app",
                "replFactor": 3,
                "compMod": { "replFactor": { "old": 1, "new": 3 } }
            } }),
        )
        .build();

    let mut context = ScriptContext::default();
    assert!(compile(&tree, &context).contains("ALTER KEYSPACE \"app\""));

    context.script_options.containers.skip_modified = true;
    assert_eq!(compile(&tree, &context), "");
}

//! Whole-table scenarios: renames and option-only changes

use crate::helpers::tree::{TreeBuilder, applying_drops, compile};
use cqlmt::{Compiler, ScriptContext, StatementKind, StatementLevel, UdtMap};
use serde_json::json;

fn renamed_table_tree() -> serde_json::Value {
    TreeBuilder::new()
        .table(
            "modified",
            "accounts",
            json!({
                "role": {
                    "code": "accounts",
                    "compMod": {
                        "modified": true,
                        "keyspaceName": "app",
                        "code": { "old": "users", "new": "accounts" }
                    },
                    "properties": {
                        "id": { "type": "uuid", "primaryKey": true },
                        "email": { "type": "string" }
                    }
                }
            }),
        )
        .build()
}

#[test]
fn test_table_rename_drops_and_recreates() {
    let script = compile(&renamed_table_tree(), &applying_drops());

    assert_eq!(
        script,
        "DROP TABLE IF EXISTS \"app\".\"users\";\n\n\
         CREATE TABLE IF NOT EXISTS \"app\".\"accounts\" (\n\
         \t\"id\" uuid,\n\
         \t\"email\" text,\n\
         \tPRIMARY KEY ((\"id\"))\n\
         );"
    );
    assert!(!script.contains("RENAME"));
}

#[test]
fn test_table_rename_keeps_old_table_by_default() {
    let script = compile(&renamed_table_tree(), &ScriptContext::default());

    let first_line = script.lines().next().unwrap();
    assert_eq!(first_line, "-- DROP TABLE IF EXISTS \"app\".\"users\";");
    assert!(script.contains("\nCREATE TABLE IF NOT EXISTS \"app\".\"accounts\" ("));
}

#[test]
fn test_option_only_change() {
    let tree = TreeBuilder::new()
        .table(
            "modified",
            "users",
            json!({
                "role": {
                    "code": "users",
                    "compMod": {
                        "modified": true,
                        "keyspaceName": "app",
                        "code": { "old": "users", "new": "users" },
                        "tableOptions": {
                            "old": { "default_time_to_live": 0 },
                            "new": { "default_time_to_live": 3600 }
                        }
                    }
                }
            }),
        )
        .build();

    let statements = Compiler::default()
        .statements(&tree, &UdtMap::new(), &ScriptContext::default())
        .unwrap();
    let meaningful: Vec<_> = statements.iter().filter(|s| !s.is_empty()).collect();

    assert_eq!(meaningful.len(), 1);
    assert_eq!(meaningful[0].kind, StatementKind::Modify);
    assert_eq!(meaningful[0].level, StatementLevel::Table);
    assert_eq!(
        compile(&tree, &ScriptContext::default()),
        "ALTER TABLE \"app\".\"users\"\n\tWITH default_time_to_live = 3600;"
    );
}

#[test]
fn test_created_table_with_secondary_index() {
    let tree = TreeBuilder::new()
        .table(
            "added",
            "orders",
            json!({
                "role": {
                    "code": "orders",
                    "compMod": { "created": true, "keyspaceName": "shop" },
                    "SecIndxs": [{ "name": "orders_by_customer", "SecIndxKey": [{ "name": "customer" }] }]
                },
                "properties": {
                    "id": { "type": "uuid", "primaryKey": true },
                    "customer": { "type": "string" }
                }
            }),
        )
        .build();

    let script = compile(&tree, &ScriptContext::default());
    let table = script.find("CREATE TABLE IF NOT EXISTS \"shop\".\"orders\"").unwrap();
    let index = script.find("CREATE INDEX IF NOT EXISTS \"orders_by_customer\"").unwrap();
    assert!(table < index);
}

#[test]
fn test_compilation_is_deterministic() {
    let tree = TreeBuilder::new()
        .keyspace("added", "shop", json!({ "role": { "code": "shop", "replFactor": 3 } }))
        .table(
            "added",
            "orders",
            json!({
                "role": { "code": "orders", "compMod": { "created": true, "keyspaceName": "shop" } },
                "properties": {
                    "id": { "type": "uuid", "primaryKey": true },
                    "total": { "type": "numeric", "mode": "decimal" },
                    "tags": { "type": "set", "items": [{ "type": "string" }] }
                }
            }),
        )
        .table("deleted", "users", crate::helpers::tree::deleted_users_table())
        .view("deleted", "users_by_email", crate::helpers::tree::deleted_users_view())
        .build();

    let first = compile(&tree, &ScriptContext::default());
    for _ in 0..3 {
        assert_eq!(compile(&tree, &ScriptContext::default()), first);
    }
    assert!(!first.is_empty());
}

//! Column changes inside an existing table

use crate::helpers::tree::{TreeBuilder, applying_drops, compile};
use cqlmt::ScriptContext;
use rstest::rstest;
use serde_json::{Value, json};

fn modified_users(properties: Value) -> Value {
    TreeBuilder::new()
        .table(
            "modified",
            "users",
            json!({
                "role": { "code": "users", "compMod": { "keyspaceName": "app" } },
                "properties": properties
            }),
        )
        .build()
}

fn age_change(old_mode: &str, new_type: Value) -> Value {
    let mut new_field = new_type.clone();
    new_field["name"] = json!("age");
    let mut property = new_type;
    property["name"] = json!("age");
    property["compMod"] = json!({
        "oldField": { "name": "age", "type": "numeric", "mode": old_mode },
        "newField": new_field
    });
    modified_users(json!({ "age": property }))
}

#[test]
fn test_primary_key_rename_with_type_change_is_suppressed() {
    let tree = modified_users(json!({
        "user_id": {
            "name": "user_id", "type": "numeric", "mode": "bigint", "primaryKey": true,
            "compMod": {
                "oldField": { "name": "id", "type": "numeric", "mode": "int" },
                "newField": { "name": "user_id", "type": "numeric", "mode": "bigint" }
            }
        }
    }));

    assert_eq!(compile(&tree, &applying_drops()), "");
}

#[test]
fn test_incompatible_type_change_drops_then_adds() {
    let tree = age_change("int", json!({ "type": "string" }));

    assert_eq!(
        compile(&tree, &applying_drops()),
        "ALTER TABLE \"app\".\"users\" DROP \"age\";\n\n\
         ALTER TABLE \"app\".\"users\" ADD \"age\" text;"
    );
}

#[rstest]
#[case::legacy(true, "ALTER TABLE \"app\".\"users\" ALTER \"age\" TYPE varint;")]
#[case::modern(
    false,
    "ALTER TABLE \"app\".\"users\" DROP \"age\";\n\nALTER TABLE \"app\".\"users\" ADD \"age\" varint;"
)]
fn test_compatible_type_change(#[case] is_old_model: bool, #[case] expected: &str) {
    let tree = age_change("int", json!({ "type": "numeric", "mode": "varint" }));
    let context = ScriptContext {
        is_old_model,
        ..applying_drops()
    };

    assert_eq!(compile(&tree, &context), expected);
}

#[test]
fn test_non_key_rename_drops_old_name() {
    let tree = modified_users(json!({
        "mail": {
            "name": "mail", "type": "string",
            "compMod": {
                "oldField": { "name": "email" },
                "newField": { "name": "mail" }
            }
        }
    }));

    assert_eq!(
        compile(&tree, &ScriptContext::default()),
        "-- ALTER TABLE \"app\".\"users\" DROP \"email\";\n\n\
         ALTER TABLE \"app\".\"users\" ADD \"mail\" text;"
    );
}

#[test]
fn test_key_rename_in_place() {
    let tree = modified_users(json!({
        "user_id": {
            "name": "user_id", "type": "uuid", "primaryKey": true,
            "compMod": {
                "oldField": { "name": "id" },
                "newField": { "name": "user_id" }
            }
        }
    }));

    assert_eq!(
        compile(&tree, &ScriptContext::default()),
        "ALTER TABLE \"app\".\"users\" RENAME \"id\" TO \"user_id\";"
    );
}

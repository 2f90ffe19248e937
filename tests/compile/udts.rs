//! User-defined type scripts

use crate::helpers::tree::{TreeBuilder, compile};
use cqlmt::{ScriptContext, UdtMap};
use serde_json::json;

#[test]
fn test_added_types_follow_their_dependencies() {
    let tree = TreeBuilder::new()
        .udt(
            "added",
            "person",
            json!({
                "code": "person",
                "keyspaceName": "app",
                "properties": {
                    "name": { "type": "string" },
                    "home": { "$ref": "#model/definitions/address" }
                }
            }),
        )
        .udt(
            "added",
            "address",
            json!({
                "code": "address",
                "keyspaceName": "app",
                "properties": { "street": { "type": "string" } }
            }),
        )
        .build();

    let script = compile(&tree, &ScriptContext::default());
    let address = script.find("CREATE TYPE IF NOT EXISTS \"app\".\"address\"").unwrap();
    let person = script.find("CREATE TYPE IF NOT EXISTS \"app\".\"person\"").unwrap();

    assert!(address < person);
    assert!(script.contains("\"home\" frozen<address>"));
}

#[test]
fn test_caller_type_map_resolves_references() {
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
    let type_map = UdtMap::from([(
        "#external/definitions/addr".to_string(),
        "postal_address".to_string(),
    )]);

    let script = cqlmt::compile(&tree, &type_map, &ScriptContext::default()).unwrap();
    assert_eq!(
        script,
        "ALTER TABLE \"app\".\"users\" ADD \"home\" frozen<postal_address>;"
    );
}

#[test]
fn test_type_field_added_in_place() {
    let tree = TreeBuilder::new()
        .udt(
            "modified",
            "address",
            json!({
                "code": "address",
                "keyspaceName": "app",
                "properties": {
                    "country": { "type": "string", "compMod": { "created": true } }
                }
            }),
        )
        .build();

    assert_eq!(
        compile(&tree, &ScriptContext::default()),
        "ALTER TYPE \"app\".\"address\" ADD \"country\" text;"
    );
}

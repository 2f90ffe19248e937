//! Builders for change tree JSON

use cqlmt::{ScriptContext, UdtMap};
use serde_json::{Map, Value, json};

/// Assembles a change tree one child at a time. Each child gets its own
/// wrapper under the bucket's `items`.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    partitions: Map<String, Value>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, partition: &str, bucket: &str, key: &str, node: Value) -> Self {
        let partition = self
            .partitions
            .entry(partition.to_string())
            .or_insert_with(|| json!({ "properties": {} }));
        let buckets = partition["properties"].as_object_mut().unwrap();
        let bucket = buckets
            .entry(bucket.to_string())
            .or_insert_with(|| json!({ "items": [] }));

        let mut child = Map::new();
        child.insert(key.to_string(), node);
        bucket["items"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "properties": child }));
        self
    }

    pub fn table(self, bucket: &str, key: &str, node: Value) -> Self {
        self.with("entities", bucket, key, node)
    }

    pub fn keyspace(self, bucket: &str, key: &str, node: Value) -> Self {
        self.with("containers", bucket, key, node)
    }

    pub fn view(self, bucket: &str, key: &str, node: Value) -> Self {
        self.with("views", bucket, key, node)
    }

    pub fn udt(self, bucket: &str, key: &str, node: Value) -> Self {
        self.with("modelDefinitions", bucket, key, node)
    }

    pub fn build(self) -> Value {
        json!({ "properties": self.partitions })
    }
}

pub fn applying_drops() -> ScriptContext {
    ScriptContext {
        apply_drop_statements: true,
        ..ScriptContext::default()
    }
}

pub fn compile(tree: &Value, context: &ScriptContext) -> String {
    cqlmt::compile(tree, &UdtMap::new(), context).unwrap()
}

/// A deleted `app.users` table
pub fn deleted_users_table() -> Value {
    json!({
        "role": {
            "code": "users",
            "compMod": { "deleted": true, "keyspaceName": "app" }
        },
        "properties": {
            "id": { "type": "uuid", "primaryKey": true },
            "email": { "type": "string" }
        }
    })
}

/// A deleted view over `app.users`
pub fn deleted_users_view() -> Value {
    json!({
        "role": {
            "code": "users_by_email",
            "keyspaceName": "app",
            "viewOn": "users"
        }
    })
}

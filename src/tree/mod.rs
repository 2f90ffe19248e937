//! Read-only access to a change tree
//!
//! A change tree is JSON produced by the modeling tool. At the root,
//! `properties` holds the `entities`, `containers`, `views` and
//! `modelDefinitions` partitions; each partition splits its children into
//! `added`, `modified` and `deleted` buckets whose `items` wrap the actual
//! nodes. Only the root shape is checked strictly. Anything below it that
//! does not match degrades to "no children".

pub mod field;
pub mod lenient;
pub mod nodes;

pub use field::*;
pub use nodes::*;

use anyhow::{Result, bail};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionKind {
    Entities,
    Containers,
    Views,
    ModelDefinitions,
}

impl PartitionKind {
    pub fn key(self) -> &'static str {
        match self {
            PartitionKind::Entities => "entities",
            PartitionKind::Containers => "containers",
            PartitionKind::Views => "views",
            PartitionKind::ModelDefinitions => "modelDefinitions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Added,
    Modified,
    Deleted,
}

impl BucketKind {
    pub const ALL: [BucketKind; 3] = [BucketKind::Added, BucketKind::Modified, BucketKind::Deleted];

    pub fn key(self) -> &'static str {
        match self {
            BucketKind::Added => "added",
            BucketKind::Modified => "modified",
            BucketKind::Deleted => "deleted",
        }
    }
}

/// A named child node found under a bucket wrapper
#[derive(Debug, Clone)]
pub struct Child<T> {
    pub key: String,
    pub node: T,
}

#[derive(Debug, Clone, Copy)]
pub struct ChangeTree<'a> {
    partitions: Option<&'a Map<String, Value>>,
}

impl<'a> ChangeTree<'a> {
    pub fn from_value(root: &'a Value) -> Result<Self> {
        let root = match root {
            Value::Object(map) => map,
            Value::Null => bail!("Change tree is null"),
            other => bail!(
                "Change tree root must be a JSON object, found {}",
                json_kind(other)
            ),
        };

        Ok(Self {
            partitions: root.get("properties").and_then(Value::as_object),
        })
    }

    /// The `properties` map of every wrapper in a bucket. `items` may be an
    /// array of wrappers or a single wrapper.
    pub fn wrappers(
        &self,
        partition: PartitionKind,
        bucket: BucketKind,
    ) -> Vec<&'a Map<String, Value>> {
        let items = self
            .partitions
            .and_then(|p| p.get(partition.key()))
            .and_then(|p| p.get("properties"))
            .and_then(|b| b.get(bucket.key()))
            .and_then(|b| b.get("items"));

        let wrappers: Vec<&'a Value> = match items {
            Some(Value::Array(list)) => list.iter().collect(),
            Some(single @ Value::Object(_)) => vec![single],
            _ => Vec::new(),
        };

        wrappers
            .into_iter()
            .filter_map(|wrapper| wrapper.get("properties").and_then(Value::as_object))
            .collect()
    }

    /// Every child of every wrapper, in input order
    pub fn children<T: DeserializeOwned>(
        &self,
        partition: PartitionKind,
        bucket: BucketKind,
    ) -> Vec<Child<T>> {
        self.wrappers(partition, bucket)
            .into_iter()
            .flat_map(|wrapper| wrapper.iter())
            .filter_map(|(key, value)| parse_child(partition, key, value))
            .collect()
    }

    /// The first child of each wrapper
    pub fn first_children<T: DeserializeOwned>(
        &self,
        partition: PartitionKind,
        bucket: BucketKind,
    ) -> Vec<Child<T>> {
        self.wrappers(partition, bucket)
            .into_iter()
            .filter_map(|wrapper| wrapper.iter().next())
            .filter_map(|(key, value)| parse_child(partition, key, value))
            .collect()
    }
}

fn parse_child<T: DeserializeOwned>(
    partition: PartitionKind,
    key: &str,
    value: &Value,
) -> Option<Child<T>> {
    match T::deserialize(value) {
        Ok(node) => Some(Child {
            key: key.to_string(),
            node,
        }),
        Err(err) => {
            debug!(
                "Skipping malformed {} node '{}': {}",
                partition.key(),
                key,
                err
            );
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

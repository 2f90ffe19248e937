//! Typed views over the table, keyspace, view and UDT nodes of a change tree

use super::field::{FieldDefinition, FieldSet};
use super::lenient;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Table / view options keyed by CQL option name, in input order
pub type OptionMap = IndexMap<String, Value>;

/// An `{old, new}` pair from comparison metadata
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Change<T> {
    pub old: Option<T>,
    pub new: Option<T>,
}

impl<T> Default for Change<T> {
    fn default() -> Self {
        Self {
            old: None,
            new: None,
        }
    }
}

impl<T: PartialEq> Change<T> {
    pub fn is_changed(&self) -> bool {
        self.old != self.new
    }
}

impl Change<String> {
    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn old_name(&self) -> Option<&str> {
        Self::non_empty(&self.old)
    }

    pub fn new_name(&self) -> Option<&str> {
        Self::non_empty(&self.new)
    }
}

/// Reference to a column by id, used by keys and indexes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyReference {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub key_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    /// `ascending` / `descending` for clustering columns
    #[serde(rename = "type", default, deserialize_with = "lenient::optional_string")]
    pub order: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryIndexDef {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(rename = "SecIndxKey", default, deserialize_with = "lenient::list")]
    pub keys: Vec<KeyReference>,
    /// `keys`, `values`, `entries` or `full` for collection indexes
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub index_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableNode {
    #[serde(default)]
    pub role: TableRole,
    #[serde(default)]
    pub properties: Option<FieldSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRole {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub comp_mod: Option<TableCompMod>,
    #[serde(default)]
    pub properties: Option<FieldSet>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub composite_partition_key: Vec<KeyReference>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub composite_clustering_key: Vec<KeyReference>,
    #[serde(rename = "SecIndxs", default, deserialize_with = "lenient::list")]
    pub secondary_indexes: Vec<SecondaryIndexDef>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub search_index_columns: Vec<KeyReference>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub table_options: OptionMap,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCompMod {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub created: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub deleted: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub modified: bool,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub keyspace_name: Option<String>,
    #[serde(default)]
    pub table_options: Option<Change<OptionMap>>,
    #[serde(default)]
    pub comments: Option<Change<String>>,
    #[serde(default)]
    pub new_properties: Option<FieldSet>,
    #[serde(default)]
    pub old_properties: Option<FieldSet>,
    #[serde(default)]
    pub name: Option<Change<String>>,
    #[serde(default)]
    pub code: Option<Change<String>>,
    #[serde(default)]
    pub collection_name: Option<Change<String>>,
    #[serde(default)]
    pub composite_partition_key: Option<Change<Value>>,
    #[serde(default)]
    pub composite_clustering_key: Option<Change<Value>>,
    #[serde(rename = "SecIndxs", default)]
    pub secondary_indexes: Option<Change<Vec<SecondaryIndexDef>>>,
    #[serde(default)]
    pub search_index_columns: Option<Change<Vec<KeyReference>>>,
}

impl TableNode {
    pub fn comp_mod(&self) -> Option<&TableCompMod> {
        self.role.comp_mod.as_ref()
    }

    /// Changed columns carried directly on the node
    pub fn columns(&self) -> IndexMap<String, FieldDefinition> {
        self.properties
            .as_ref()
            .map(FieldSet::to_map)
            .unwrap_or_default()
    }

    /// Full column set: the role's definition when present, otherwise the node's
    pub fn all_columns(&self) -> IndexMap<String, FieldDefinition> {
        match &self.role.properties {
            Some(set) if !set.is_empty() => set.to_map(),
            _ => self.columns(),
        }
    }

    /// Every field set that may define a column referenced by id
    pub fn column_sources(&self) -> Vec<&FieldSet> {
        let comp_mod = self.comp_mod();
        [
            self.properties.as_ref(),
            self.role.properties.as_ref(),
            comp_mod.and_then(|c| c.new_properties.as_ref()),
            comp_mod.and_then(|c| c.old_properties.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCenter {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub data_center_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_u32")]
    pub repl_factor_value: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyspaceNode {
    #[serde(default)]
    pub role: KeyspaceRole,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyspaceRole {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub repl_strategy: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_u32")]
    pub repl_factor: Option<u32>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub data_centers: Vec<DataCenter>,
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub durable_writes: Option<bool>,
    #[serde(default)]
    pub comp_mod: Option<KeyspaceCompMod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyspaceCompMod {
    #[serde(default)]
    pub name: Option<Change<String>>,
    #[serde(default)]
    pub code: Option<Change<String>>,
    #[serde(default)]
    pub repl_strategy: Option<Change<Value>>,
    #[serde(default)]
    pub repl_factor: Option<Change<Value>>,
    #[serde(default)]
    pub data_centers: Option<Change<Value>>,
    #[serde(default)]
    pub durable_writes: Option<Change<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    #[serde(default)]
    pub role: ViewRole,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRole {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub keyspace_name: Option<String>,
    /// Base table name
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub view_on: Option<String>,
    #[serde(default)]
    pub properties: Option<FieldSet>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub composite_partition_key: Vec<KeyReference>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub composite_clustering_key: Vec<KeyReference>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub where_clause: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub table_options: OptionMap,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub comments: Option<String>,
    #[serde(default)]
    pub comp_mod: Option<ViewCompMod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCompMod {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub keyspace_name: Option<String>,
    #[serde(default)]
    pub name: Option<Change<String>>,
    #[serde(default)]
    pub code: Option<Change<String>>,
    #[serde(default)]
    pub view_on: Option<Change<String>>,
    #[serde(default)]
    pub where_clause: Option<Change<String>>,
    #[serde(default)]
    pub composite_partition_key: Option<Change<Value>>,
    #[serde(default)]
    pub composite_clustering_key: Option<Change<Value>>,
    #[serde(default)]
    pub table_options: Option<Change<OptionMap>>,
    #[serde(default)]
    pub comments: Option<Change<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UdtNode {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(rename = "GUID", default, deserialize_with = "lenient::optional_string")]
    pub guid: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub keyspace_name: Option<String>,
    #[serde(default)]
    pub properties: Option<FieldSet>,
    #[serde(default)]
    pub comp_mod: Option<UdtCompMod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UdtCompMod {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub keyspace_name: Option<String>,
    #[serde(default)]
    pub name: Option<Change<String>>,
    #[serde(default)]
    pub code: Option<Change<String>>,
}

impl UdtNode {
    pub fn fields(&self) -> IndexMap<String, FieldDefinition> {
        self.properties
            .as_ref()
            .map(FieldSet::to_map)
            .unwrap_or_default()
    }
}

/// Resolve an old/new name pair from `code` first, then `name`-like metadata
pub fn renamed(
    code: Option<&Change<String>>,
    fallback: Option<&Change<String>>,
) -> (Option<String>, Option<String>) {
    let old = code
        .and_then(Change::old_name)
        .or_else(|| fallback.and_then(Change::old_name));
    let new = code
        .and_then(Change::new_name)
        .or_else(|| fallback.and_then(Change::new_name));
    (old.map(str::to_string), new.map(str::to_string))
}

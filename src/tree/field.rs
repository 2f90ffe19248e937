//! Column / UDT field definitions as they appear in a change tree

use super::lenient;
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub code: Option<String>,
    #[serde(rename = "GUID", default, deserialize_with = "lenient::optional_string")]
    pub guid: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::optional_string")]
    pub type_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub child_type: Option<String>,
    #[serde(rename = "$ref", default, deserialize_with = "lenient::optional_string")]
    pub reference: Option<String>,
    #[serde(default)]
    pub items: Option<FieldItems>,
    #[serde(default)]
    pub properties: Option<FieldSet>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub key_subtype: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub subtype: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub frozen: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub primary_key: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub composite_partition_key: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub composite_clustering_key: bool,
    #[serde(default)]
    pub comp_mod: Option<Box<FieldCompMod>>,
}

/// Per-field comparison metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCompMod {
    #[serde(default)]
    pub old_field: Option<FieldDefinition>,
    #[serde(default)]
    pub new_field: Option<FieldDefinition>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub created: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldItems {
    Many(Vec<FieldDefinition>),
    One(Box<FieldDefinition>),
}

impl FieldItems {
    pub fn first(&self) -> Option<&FieldDefinition> {
        match self {
            FieldItems::Many(items) => items.first(),
            FieldItems::One(item) => Some(item),
        }
    }

    pub fn all(&self) -> Vec<&FieldDefinition> {
        match self {
            FieldItems::Many(items) => items.iter().collect(),
            FieldItems::One(item) => vec![item.as_ref()],
        }
    }
}

/// Ordered set of named fields. Modeling tools emit both object and array
/// forms; array entries are named by their own `code`/`name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldSet {
    Map(IndexMap<String, FieldDefinition>),
    List(Vec<FieldDefinition>),
}

impl Default for FieldSet {
    fn default() -> Self {
        FieldSet::Map(IndexMap::new())
    }
}

impl FieldSet {
    pub fn iter(&self) -> Vec<(String, &FieldDefinition)> {
        match self {
            FieldSet::Map(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            FieldSet::List(list) => list
                .iter()
                .filter_map(|field| field.display_name().map(|name| (name.to_string(), field)))
                .collect(),
        }
    }

    pub fn to_map(&self) -> IndexMap<String, FieldDefinition> {
        self.iter()
            .into_iter()
            .map(|(name, field)| (name, field.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldSet::Map(map) => map.is_empty(),
            FieldSet::List(list) => list.is_empty(),
        }
    }
}

impl FieldDefinition {
    /// The physical name: `code` wins over `name`
    pub fn display_name(&self) -> Option<&str> {
        self.code.as_deref().or(self.name.as_deref())
    }

    pub fn is_composite_key(&self) -> bool {
        self.composite_partition_key || self.composite_clustering_key
    }

    pub fn has_type_info(&self) -> bool {
        self.type_name.is_some() || self.reference.is_some()
    }

    /// Old/new overlays often carry only the attributes that changed. When
    /// this definition has no type information, fill whatever it leaves unset
    /// from `base`.
    pub fn or_type_of(&self, base: &FieldDefinition) -> FieldDefinition {
        if self.has_type_info() {
            return self.clone();
        }

        FieldDefinition {
            type_name: base.type_name.clone(),
            reference: base.reference.clone(),
            mode: self.mode.clone().or_else(|| base.mode.clone()),
            child_type: self.child_type.clone().or_else(|| base.child_type.clone()),
            items: self.items.clone().or_else(|| base.items.clone()),
            properties: self.properties.clone().or_else(|| base.properties.clone()),
            key_subtype: self.key_subtype.clone().or_else(|| base.key_subtype.clone()),
            subtype: self.subtype.clone().or_else(|| base.subtype.clone()),
            frozen: self.frozen || base.frozen,
            ..self.clone()
        }
    }
}

fn pick<T: Clone + PartialEq>(base: &Option<T>, old: &Option<T>, new: &Option<T>) -> Option<T> {
    match new {
        Some(value) if old.as_ref() != Some(value) => Some(value.clone()),
        _ => base.clone(),
    }
}

fn pick_flag(base: bool, old: bool, new: bool) -> bool {
    if new != old { new } else { base }
}

/// Apply a field's `newField` overlay on top of the field itself.
///
/// An attribute from `new` wins when it differs from the same attribute in
/// `old`; otherwise the base value is kept. Returns the (possibly renamed)
/// field name together with the merged definition.
pub fn merge_field_overlay(
    name: &str,
    base: &FieldDefinition,
    old: &FieldDefinition,
    new: &FieldDefinition,
) -> (String, FieldDefinition) {
    let merged = FieldDefinition {
        name: pick(&base.name, &old.name, &new.name),
        code: pick(&base.code, &old.code, &new.code),
        guid: base.guid.clone(),
        type_name: pick(&base.type_name, &old.type_name, &new.type_name),
        mode: pick(&base.mode, &old.mode, &new.mode),
        child_type: pick(&base.child_type, &old.child_type, &new.child_type),
        reference: pick(&base.reference, &old.reference, &new.reference),
        items: pick(&base.items, &old.items, &new.items),
        properties: pick(&base.properties, &old.properties, &new.properties),
        key_subtype: pick(&base.key_subtype, &old.key_subtype, &new.key_subtype),
        subtype: pick(&base.subtype, &old.subtype, &new.subtype),
        frozen: pick_flag(base.frozen, old.frozen, new.frozen),
        primary_key: pick_flag(base.primary_key, old.primary_key, new.primary_key),
        composite_partition_key: pick_flag(
            base.composite_partition_key,
            old.composite_partition_key,
            new.composite_partition_key,
        ),
        composite_clustering_key: pick_flag(
            base.composite_clustering_key,
            old.composite_clustering_key,
            new.composite_clustering_key,
        ),
        comp_mod: base.comp_mod.clone(),
    };

    let merged_name = match &new.name {
        Some(new_name) if old.name.as_ref() != Some(new_name) => new_name.clone(),
        _ => name.to_string(),
    };

    (merged_name, merged)
}

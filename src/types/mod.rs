//! Column type resolution
//!
//! Maps a field definition from the change tree onto a CQL column type. The
//! compiler only talks to the [`TypeResolver`] trait so a host can plug in its
//! own mapping; [`CqlTypeResolver`] is the built-in one.

pub mod compat;
pub mod cql;

pub use compat::field_type_compatible;
pub use cql::CqlTypeResolver;

use crate::tree::{BucketKind, ChangeTree, FieldDefinition, PartitionKind, UdtNode};
use anyhow::Result;
use std::collections::BTreeMap;

/// Reference id / path / GUID -> user-defined type name
pub type UdtMap = BTreeMap<String, String>;

pub trait TypeResolver {
    /// Resolve the CQL type for `field`. `Ok(None)` means the type is unknown
    /// and the field must be left out of the script.
    fn resolve(
        &self,
        field: &FieldDefinition,
        udt_map: &UdtMap,
        fallback_name: &str,
    ) -> Result<Option<String>>;
}

/// Resolve through `resolver`, falling back to the last segment of the
/// field's `$ref` when the resolver has no answer.
pub fn resolve_column_type(
    resolver: &dyn TypeResolver,
    field: &FieldDefinition,
    udt_map: &UdtMap,
    fallback_name: &str,
) -> Result<Option<String>> {
    if let Some(resolved) = resolver.resolve(field, udt_map, fallback_name)? {
        return Ok(Some(resolved));
    }

    Ok(field
        .reference
        .as_deref()
        .and_then(last_path_segment)
        .map(str::to_string))
}

pub fn last_path_segment(reference: &str) -> Option<&str> {
    reference
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// UDT names declared in the tree's `modelDefinitions`, keyed by every form a
/// field may use to refer to them.
pub fn build_udt_map(tree: &ChangeTree) -> UdtMap {
    let mut map = UdtMap::new();

    for bucket in BucketKind::ALL {
        for child in tree.children::<UdtNode>(PartitionKind::ModelDefinitions, bucket) {
            let name = child
                .node
                .code
                .clone()
                .or_else(|| child.node.name.clone())
                .unwrap_or_else(|| child.key.clone());

            map.insert(format!("#/definitions/{}", child.key), name.clone());
            map.insert(format!("#model/definitions/{}", child.key), name.clone());
            if let Some(guid) = &child.node.guid {
                map.insert(guid.clone(), name.clone());
            }
            map.insert(child.key, name);
        }
    }

    map
}

/// Caller-supplied entries first, tree entries override
pub fn merge_udt_maps(caller: &UdtMap, tree: UdtMap) -> UdtMap {
    let mut merged = caller.clone();
    merged.extend(tree);
    merged
}

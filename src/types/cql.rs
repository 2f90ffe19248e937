//! Built-in field -> CQL type mapping

use super::{TypeResolver, UdtMap, last_path_segment};
use crate::tree::FieldDefinition;
use anyhow::Result;

const SCALAR_TYPES: &[&str] = &[
    "ascii",
    "bigint",
    "blob",
    "boolean",
    "counter",
    "date",
    "decimal",
    "double",
    "duration",
    "float",
    "inet",
    "int",
    "smallint",
    "text",
    "time",
    "timestamp",
    "timeuuid",
    "tinyint",
    "uuid",
    "varchar",
    "varint",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CqlTypeResolver;

impl TypeResolver for CqlTypeResolver {
    fn resolve(
        &self,
        field: &FieldDefinition,
        udt_map: &UdtMap,
        fallback_name: &str,
    ) -> Result<Option<String>> {
        Ok(cql_type(field, udt_map, fallback_name))
    }
}

fn frozen(inner: &str) -> String {
    format!("frozen<{}>", inner)
}

fn cql_type(field: &FieldDefinition, udt_map: &UdtMap, fallback_name: &str) -> Option<String> {
    if let Some(reference) = &field.reference {
        return udt_map.get(reference).map(|name| frozen(name));
    }

    let type_name = field.type_name.as_deref()?.trim().to_ascii_lowercase();

    let resolved = match type_name.as_str() {
        "string" => field.mode.clone().unwrap_or_else(|| "text".to_string()),
        "numeric" => field.mode.clone().unwrap_or_else(|| "int".to_string()),
        "boolean" | "bool" => "boolean".to_string(),
        "list" | "set" => {
            let item = nested_type(field.items.as_ref()?.first()?, udt_map, fallback_name)?;
            format!("{}<{}>", type_name, item)
        }
        "map" => {
            let key = field.key_subtype.as_deref().unwrap_or("text");
            let value = field
                .items
                .as_ref()
                .and_then(|items| items.first())
                .and_then(|item| nested_type(item, udt_map, fallback_name))
                .or_else(|| field.subtype.clone())
                .unwrap_or_else(|| "text".to_string());
            format!("map<{}, {}>", key, value)
        }
        "tuple" => {
            let members: Option<Vec<String>> = field
                .items
                .as_ref()?
                .all()
                .into_iter()
                .map(|item| nested_type(item, udt_map, fallback_name))
                .collect();
            let members = members.filter(|m| !m.is_empty())?;
            return Some(format!("tuple<{}>", members.join(", ")));
        }
        "udt" => {
            let name = field
                .child_type
                .as_deref()
                .or(field.mode.as_deref())
                .and_then(|hint| known_udt(hint, udt_map))
                .unwrap_or(fallback_name);
            return Some(frozen(name));
        }
        scalar if SCALAR_TYPES.contains(&scalar) => scalar.to_string(),
        _ => return None,
    };

    if field.frozen && matches!(type_name.as_str(), "list" | "set" | "map") {
        return Some(frozen(&resolved));
    }

    Some(resolved)
}

fn nested_type(item: &FieldDefinition, udt_map: &UdtMap, fallback_name: &str) -> Option<String> {
    let name = item.display_name().unwrap_or(fallback_name);
    cql_type(item, udt_map, name).or_else(|| {
        item.reference
            .as_deref()
            .and_then(last_path_segment)
            .map(|udt| frozen(udt))
    })
}

fn known_udt<'a>(hint: &'a str, udt_map: &'a UdtMap) -> Option<&'a str> {
    udt_map
        .get(hint)
        .map(String::as_str)
        .or_else(|| udt_map.values().find(|name| name.as_str() == hint).map(String::as_str))
}

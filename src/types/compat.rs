//! Column type conversions that legacy Cassandra versions accept in place
//! (`ALTER TABLE ... ALTER col TYPE t`). Newer versions reject all of them.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static COMPATIBLE_TYPES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("ascii", &["text", "varchar", "blob"][..]),
        ("bigint", &["timestamp", "varint", "blob"][..]),
        ("int", &["varint", "blob"][..]),
        ("text", &["text", "varchar", "blob"][..]),
        ("varchar", &["text", "varchar", "blob"][..]),
        ("timestamp", &["bigint", "blob"][..]),
        ("timeuuid", &["uuid", "blob"][..]),
        ("varint", &["blob"][..]),
    ])
});

fn normalize(type_name: &str) -> String {
    type_name.trim().to_ascii_lowercase()
}

/// Whether a column of `old_type` can be altered to `new_type` in place
pub fn field_type_compatible(old_type: &str, new_type: &str) -> bool {
    let old_type = normalize(old_type);
    let new_type = normalize(new_type);

    if old_type == new_type {
        return true;
    }

    COMPATIBLE_TYPES
        .get(old_type.as_str())
        .is_some_and(|targets| targets.contains(&new_type.as_str()))
}

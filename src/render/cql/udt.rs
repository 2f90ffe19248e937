//! User-defined type rendering

use crate::render::{TypeDefinition, quote_ident};

pub fn render_create_type(udt: &TypeDefinition) -> String {
    let fields = udt
        .fields
        .iter()
        .map(|field| format!("\t{} {}", quote_ident(&field.name), field.type_name))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("CREATE TYPE IF NOT EXISTS {} (\n{}\n);", udt.target, fields)
}

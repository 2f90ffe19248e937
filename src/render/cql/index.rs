//! Secondary and search index rendering

use crate::render::{QualifiedName, SecondaryIndex, quote_ident};

pub fn render_create_index(target: &QualifiedName, index: &SecondaryIndex) -> String {
    let column = quote_ident(&index.column);
    let indexed = match index.target {
        Some(kind) => format!("{}({})", kind.function(), column),
        None => column,
    };

    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({});",
        quote_ident(&index.name),
        target,
        indexed
    )
}

/// Search index columns are written bare
pub fn render_create_search_index(target: &QualifiedName, columns: &[String]) -> String {
    if columns.is_empty() {
        return format!("CREATE SEARCH INDEX IF NOT EXISTS ON {};", target);
    }

    format!(
        "CREATE SEARCH INDEX IF NOT EXISTS ON {} WITH COLUMNS {};",
        target,
        columns.join(", ")
    )
}

//! Materialized view rendering

use super::table::{render_clustering_order, render_primary_key};
use super::with_clauses;
use crate::render::{ViewDefinition, quote_ident};

/// Render a CREATE MATERIALIZED VIEW statement.
///
/// Every primary key column gets an `IS NOT NULL` restriction, as Cassandra
/// requires; a user supplied `whereClause` is appended to them.
pub fn render_create_view(view: &ViewDefinition) -> String {
    let selected = if view.columns.is_empty() {
        "*".to_string()
    } else {
        view.columns
            .iter()
            .map(|col| quote_ident(col))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut conditions: Vec<String> = view
        .partition_key
        .iter()
        .chain(view.clustering_key.iter().map(|col| &col.name))
        .map(|col| format!("{} IS NOT NULL", quote_ident(col)))
        .collect();
    if let Some(clause) = view.where_clause.as_deref() {
        let clause = clause.trim();
        let clause = clause
            .strip_prefix("WHERE ")
            .or_else(|| clause.strip_prefix("where "))
            .unwrap_or(clause);
        if !clause.is_empty() {
            conditions.push(clause.to_string());
        }
    }

    let mut sql = format!(
        "CREATE MATERIALIZED VIEW IF NOT EXISTS {} AS\n\tSELECT {}\n\tFROM {}",
        view.target, selected, view.base_table
    );

    if !conditions.is_empty() {
        sql.push_str(&format!("\n\tWHERE {}", conditions.join(" AND ")));
    }

    if let Some(primary_key) = render_primary_key(&view.partition_key, &view.clustering_key) {
        sql.push_str(&format!("\n\t{}", primary_key));
    }

    let clauses: Vec<String> = render_clustering_order(&view.clustering_key)
        .into_iter()
        .chain(view.options.iter().cloned())
        .collect();
    if !clauses.is_empty() {
        sql.push_str(&format!("\n\tWITH {}", with_clauses(&clauses)));
    }

    sql.push(';');
    sql
}

//! CREATE TABLE rendering

use super::with_clauses;
use crate::render::{ClusteringColumn, TableDefinition, quote_ident};

/// `PRIMARY KEY (("p1", "p2"), "c1")`. `None` without a partition key.
pub(crate) fn render_primary_key(
    partition_key: &[String],
    clustering_key: &[ClusteringColumn],
) -> Option<String> {
    if partition_key.is_empty() {
        return None;
    }

    let partition = partition_key
        .iter()
        .map(|col| quote_ident(col))
        .collect::<Vec<_>>()
        .join(", ");

    let mut parts = vec![format!("({})", partition)];
    parts.extend(clustering_key.iter().map(|col| quote_ident(&col.name)));

    Some(format!("PRIMARY KEY ({})", parts.join(", ")))
}

/// `CLUSTERING ORDER BY ("c1" DESC)` for clustering columns with an order
pub(crate) fn render_clustering_order(clustering_key: &[ClusteringColumn]) -> Option<String> {
    let ordered: Vec<String> = clustering_key
        .iter()
        .filter_map(|col| {
            col.order
                .map(|order| format!("{} {}", quote_ident(&col.name), order.keyword()))
        })
        .collect();

    if ordered.is_empty() {
        None
    } else {
        Some(format!("CLUSTERING ORDER BY ({})", ordered.join(", ")))
    }
}

/// Render a complete CREATE TABLE statement.
///
/// Columns come first, one per line, followed by the primary key. Clustering
/// order and options go into a trailing `WITH` block.
pub fn render_create_table(table: &TableDefinition) -> String {
    let mut definitions: Vec<String> = table
        .columns
        .iter()
        .map(|column| format!("\t{} {}", quote_ident(&column.name), column.type_name))
        .collect();

    if let Some(primary_key) = render_primary_key(&table.partition_key, &table.clustering_key) {
        definitions.push(format!("\t{}", primary_key));
    }

    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        table.target,
        definitions.join(",\n")
    );

    let clauses: Vec<String> = render_clustering_order(&table.clustering_key)
        .into_iter()
        .chain(table.options.iter().cloned())
        .collect();

    if !clauses.is_empty() {
        sql.push_str("\nWITH ");
        sql.push_str(&with_clauses(&clauses));
    }

    sql.push(';');
    sql
}

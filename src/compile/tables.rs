//! Table generators: add, delete and update

use super::Generation;
use super::indexes::{ColumnLookup, IndexScope, index_statements, indexed_columns};
use crate::render::options::{changed_comment, diff_options, render_option_clauses};
use crate::render::{ClusteringColumn, ColumnData, QualifiedName, SortOrder, TableDefinition};
use crate::statement::{Statement, StatementLevel};
use crate::tree::{
    FieldDefinition, KeyReference, OptionMap, TableCompMod, TableNode, merge_field_overlay, renamed,
};
use anyhow::Result;
use indexmap::IndexMap;
use tracing::debug;

/// Columns, options and comment a table is created with
pub(crate) struct TableShape<'a> {
    pub columns: IndexMap<String, FieldDefinition>,
    pub options: &'a OptionMap,
    pub comment: Option<&'a str>,
}

fn key_columns(
    keys: &[KeyReference],
    lookup: &ColumnLookup,
) -> Vec<(String, Option<SortOrder>)> {
    keys.iter()
        .filter_map(|key| {
            lookup
                .resolve(key)
                .map(|name| (name, key.order.as_deref().and_then(SortOrder::parse)))
        })
        .collect()
}

fn primary_key(
    node: &TableNode,
    columns: &IndexMap<String, FieldDefinition>,
    lookup: &ColumnLookup,
) -> (Vec<String>, Vec<ClusteringColumn>) {
    let mut partition: Vec<String> = key_columns(&node.role.composite_partition_key, lookup)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    if partition.is_empty() {
        partition = columns
            .iter()
            .filter(|(_, field)| field.composite_partition_key)
            .map(|(name, _)| name.clone())
            .collect();
    }
    if partition.is_empty() {
        partition = columns
            .iter()
            .filter(|(_, field)| field.primary_key && !field.composite_clustering_key)
            .map(|(name, _)| name.clone())
            .collect();
    }

    let mut clustering: Vec<ClusteringColumn> =
        key_columns(&node.role.composite_clustering_key, lookup)
            .into_iter()
            .map(|(name, order)| ClusteringColumn { name, order })
            .collect();
    if clustering.is_empty() {
        clustering = columns
            .iter()
            .filter(|(_, field)| field.composite_clustering_key)
            .map(|(name, _)| ClusteringColumn {
                name: name.clone(),
                order: None,
            })
            .collect();
    }

    (partition, clustering)
}

/// `CREATE TABLE` for `target`
pub(crate) fn add_table(
    generation: &Generation,
    node: &TableNode,
    target: &QualifiedName,
    shape: TableShape,
) -> Result<Vec<Statement>> {
    let mut columns = Vec::new();
    for (name, field) in &shape.columns {
        match generation.resolve_type(field, name)? {
            Some(type_name) => columns.push(ColumnData::new(name.clone(), type_name)),
            None => debug!("Column '{}' of '{}' has no resolvable type, skipping", name, target.name),
        }
    }

    let lookup = ColumnLookup::default()
        .with_fields(shape.columns.iter().map(|(name, field)| (name.clone(), field)))
        .merge(ColumnLookup::for_table(node, &generation.definitions));
    let (partition_key, clustering_key) = primary_key(node, &shape.columns, &lookup);

    let definition = TableDefinition {
        target: target.clone(),
        columns,
        partition_key,
        clustering_key,
        options: render_option_clauses(shape.options, shape.comment),
    };

    Ok(vec![Statement::add(
        generation.templates.create_table(&definition),
        StatementLevel::Table,
    )])
}

pub(crate) fn delete_table(generation: &Generation, target: &QualifiedName) -> Vec<Statement> {
    vec![Statement::drop(
        generation.templates.drop_table(target),
        StatementLevel::Table,
    )]
}

/// `ALTER TABLE ... WITH` for changed options and comment. Empty when nothing
/// changed or the comparison metadata carries neither.
pub(crate) fn options_script(
    generation: &Generation,
    comp_mod: &TableCompMod,
    target: &QualifiedName,
) -> String {
    if comp_mod.table_options.is_none() && comp_mod.comments.is_none() {
        return String::new();
    }

    let empty = OptionMap::new();
    let (old, new) = comp_mod
        .table_options
        .as_ref()
        .map(|change| {
            (
                change.old.as_ref().unwrap_or(&empty),
                change.new.as_ref().unwrap_or(&empty),
            )
        })
        .unwrap_or((&empty, &empty));

    let comment = comp_mod
        .comments
        .as_ref()
        .and_then(|c| changed_comment(c.old.as_deref(), c.new.as_deref()));

    let clauses = render_option_clauses(&diff_options(new, old), comment);
    generation.templates.alter_table_options(target, &clauses)
}

/// Whether the table has to be dropped and recreated
pub(crate) fn is_table_changed(
    node: &TableNode,
    names: (&Option<String>, &Option<String>),
    lookup: &ColumnLookup,
) -> bool {
    if let (Some(old), Some(new)) = names
        && old != new
    {
        return true;
    }

    let Some(comp_mod) = node.comp_mod() else {
        return false;
    };

    let key_changed = [
        &comp_mod.composite_partition_key,
        &comp_mod.composite_clustering_key,
    ]
    .into_iter()
    .flatten()
    .any(|change| change.is_changed());
    if key_changed {
        return true;
    }

    let indexed = indexed_columns(node, lookup);
    node.columns()
        .iter()
        .any(|(name, field)| field.comp_mod.is_some() && indexed.contains(name))
}

/// Every column of the table after applying per-field `newField` overlays
fn merged_columns(node: &TableNode) -> IndexMap<String, FieldDefinition> {
    node.all_columns()
        .iter()
        .map(|(name, field)| match field.comp_mod.as_deref() {
            Some(comp_mod) => {
                let empty = FieldDefinition::default();
                merge_field_overlay(
                    name,
                    field,
                    comp_mod.old_field.as_ref().unwrap_or(&empty),
                    comp_mod.new_field.as_ref().unwrap_or(&empty),
                )
            }
            None => (name.clone(), field.clone()),
        })
        .collect()
}

/// Per-column results threaded into the table update
#[derive(Debug, Default)]
pub(crate) struct ColumnResults {
    pub statements: Vec<Statement>,
    pub retained: Vec<ColumnData>,
}

/// Update an existing table: either alter it in place or recreate it
pub(crate) fn update_table(
    generation: &Generation,
    node: &TableNode,
    target: &QualifiedName,
    with_options: bool,
    columns: ColumnResults,
) -> Result<Vec<Statement>> {
    let default_comp_mod = TableCompMod::default();
    let comp_mod = node.comp_mod().unwrap_or(&default_comp_mod);
    let (old_name, new_name) = renamed(comp_mod.code.as_ref(), comp_mod.collection_name.as_ref());

    let lookup = ColumnLookup::for_table(node, &generation.definitions);

    if !is_table_changed(node, (&old_name, &new_name), &lookup) {
        if !columns.retained.is_empty() {
            debug!(
                "Table '{}' keeps {} modified columns unchanged",
                target.name,
                columns.retained.len()
            );
        }

        let options = if with_options {
            options_script(generation, comp_mod, target)
        } else {
            String::new()
        };

        let mut statements = vec![Statement::modify(options, StatementLevel::Table)];
        statements.extend(index_statements(generation, node, IndexScope::Altered(target)));
        statements.extend(columns.statements);
        return Ok(statements);
    }

    let (Some(old_name), Some(new_name)) = (old_name, new_name) else {
        debug!("Table '{}' changed but its old or new name is unknown", target.name);
        return Ok(Vec::new());
    };

    let keyspace = target.keyspace.as_deref();
    let old_target = QualifiedName::new(keyspace, &old_name);
    let new_target = QualifiedName::new(keyspace, &new_name);

    let options = comp_mod
        .table_options
        .as_ref()
        .and_then(|change| change.new.as_ref())
        .unwrap_or(&node.role.table_options);
    let comment = comp_mod
        .comments
        .as_ref()
        .and_then(|c| c.new.as_deref())
        .or(node.role.comments.as_deref());

    let mut statements = delete_table(generation, &old_target);
    statements.extend(add_table(
        generation,
        node,
        &new_target,
        TableShape {
            columns: merged_columns(node),
            options,
            comment,
        },
    )?);
    statements.extend(index_statements(
        generation,
        node,
        IndexScope::Recreated {
            old: &old_target,
            new: &new_target,
        },
    ));
    Ok(statements)
}

//! Walks a change tree and collects the raw statements of every node

use super::Generation;
use super::columns::{ColumnChange, GeneratorKind, ScriptData, column_statements};
use super::indexes::{ColumnLookup, IndexScope, index_statements, indexed_columns};
use super::keyspaces::keyspace_statements;
use super::tables::{ColumnResults, TableShape, add_table, delete_table, update_table};
use super::udts::{sort_added_udts, udt_statements};
use super::views::view_statements;
use crate::render::{ColumnData, QualifiedName};
use crate::statement::Statement;
use crate::tree::{BucketKind, ChangeTree, KeyspaceNode, PartitionKind, TableNode, UdtNode, ViewNode};
use anyhow::Result;
use tracing::debug;

fn generator_kind(bucket: BucketKind) -> GeneratorKind {
    match bucket {
        BucketKind::Added => GeneratorKind::Add,
        BucketKind::Modified => GeneratorKind::Update,
        BucketKind::Deleted => GeneratorKind::Delete,
    }
}

/// Raw statements for the whole tree, partitions concatenated in a fixed order
pub(crate) fn walk(generation: &Generation, tree: &ChangeTree) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();

    for bucket in [BucketKind::Modified, BucketKind::Added, BucketKind::Deleted] {
        statements.extend(entities(generation, tree, bucket)?);
    }

    if generation.context.script_options.containers.skip_modified {
        debug!("Skipping keyspace statements");
    } else {
        for bucket in BucketKind::ALL {
            statements.extend(containers(generation, tree, bucket));
        }
    }

    for bucket in [BucketKind::Modified, BucketKind::Added, BucketKind::Deleted] {
        statements.extend(views(generation, tree, bucket));
    }

    for bucket in BucketKind::ALL {
        statements.extend(udts(generation, tree, bucket)?);
    }

    Ok(statements)
}

fn entities(generation: &Generation, tree: &ChangeTree, bucket: BucketKind) -> Result<Vec<Statement>> {
    let kind = generator_kind(bucket);
    let mut statements = Vec::new();
    for child in tree.children::<TableNode>(PartitionKind::Entities, bucket) {
        statements.extend(walk_table(generation, kind, &child.key, &child.node)?);
    }
    Ok(statements)
}

fn containers(generation: &Generation, tree: &ChangeTree, bucket: BucketKind) -> Vec<Statement> {
    let kind = generator_kind(bucket);
    tree.first_children::<KeyspaceNode>(PartitionKind::Containers, bucket)
        .iter()
        .flat_map(|child| keyspace_statements(generation, kind, &child.node))
        .collect()
}

fn views(generation: &Generation, tree: &ChangeTree, bucket: BucketKind) -> Vec<Statement> {
    let kind = generator_kind(bucket);
    tree.first_children::<ViewNode>(PartitionKind::Views, bucket)
        .iter()
        .flat_map(|child| view_statements(generation, kind, &child.node))
        .collect()
}

fn udts(generation: &Generation, tree: &ChangeTree, bucket: BucketKind) -> Result<Vec<Statement>> {
    let kind = generator_kind(bucket);
    let mut children = tree.first_children::<UdtNode>(PartitionKind::ModelDefinitions, bucket);
    if bucket == BucketKind::Added {
        children = sort_added_udts(children);
    }

    let mut statements = Vec::new();
    for child in &children {
        statements.extend(udt_statements(generation, kind, &child.key, &child.node)?);
    }
    Ok(statements)
}

fn walk_table(
    generation: &Generation,
    kind: GeneratorKind,
    key: &str,
    node: &TableNode,
) -> Result<Vec<Statement>> {
    let Some(comp_mod) = node.comp_mod() else {
        debug!("Table '{}' has no comparison metadata, skipping", key);
        return Ok(Vec::new());
    };

    let table_name = node
        .role
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .unwrap_or(key);
    let target = QualifiedName::new(comp_mod.keyspace_name.as_deref(), table_name);

    if comp_mod.deleted {
        let mut statements = delete_table(generation, &target);
        statements.extend(index_statements(generation, node, IndexScope::Deleted(&target)));
        return Ok(statements);
    }

    if comp_mod.created {
        let mut statements = add_table(
            generation,
            node,
            &target,
            TableShape {
                columns: node.all_columns(),
                options: &node.role.table_options,
                comment: node.role.comments.as_deref(),
            },
        )?;
        statements.extend(index_statements(generation, node, IndexScope::Created(&target)));
        return Ok(statements);
    }

    if comp_mod.modified {
        return update_table(generation, node, &target, true, ColumnResults::default());
    }

    let columns = walk_columns(generation, kind, node, &target)?;
    update_table(
        generation,
        node,
        &target,
        kind == GeneratorKind::Update,
        columns,
    )
}

fn walk_columns(
    generation: &Generation,
    kind: GeneratorKind,
    node: &TableNode,
    target: &QualifiedName,
) -> Result<ColumnResults> {
    let lookup = ColumnLookup::for_table(node, &generation.definitions);
    let indexed = indexed_columns(node, &lookup);
    let mut results = ColumnResults::default();

    for (name, property) in node.columns() {
        if kind != GeneratorKind::Update && property.is_composite_key() {
            continue;
        }
        if kind == GeneratorKind::Add && property.comp_mod.is_some() {
            continue;
        }

        let Some(type_name) = generation.resolve_type(&property, &name)? else {
            debug!("Column '{}' of '{}' has no resolvable type, skipping", name, target.name);
            continue;
        };

        if kind == GeneratorKind::Update && (property.comp_mod.is_none() || indexed.contains(&name)) {
            continue;
        }

        let script_data = ScriptData {
            target: target.clone(),
            column: ColumnData::new(name, type_name),
        };
        match column_statements(generation, kind, &property, script_data)? {
            ColumnChange::Statements(statements) => results.statements.extend(statements),
            ColumnChange::MergeIntoTable(column) => results.retained.push(column),
        }
    }

    Ok(results)
}

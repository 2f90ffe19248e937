//! Materialized view generators

use super::Generation;
use super::columns::GeneratorKind;
use super::indexes::ColumnLookup;
use crate::render::options::{changed_comment, diff_options, render_option_clauses};
use crate::render::{ClusteringColumn, QualifiedName, SortOrder, ViewDefinition};
use crate::statement::{Statement, StatementLevel};
use crate::tree::{KeyReference, OptionMap, ViewCompMod, ViewNode, ViewRole, renamed};
use tracing::debug;

fn view_name(role: &ViewRole) -> Option<&str> {
    role.code
        .as_deref()
        .or(role.name.as_deref())
        .filter(|name| !name.trim().is_empty())
}

fn keyspace(role: &ViewRole) -> Option<&str> {
    role.keyspace_name
        .as_deref()
        .or_else(|| role.comp_mod.as_ref().and_then(|c| c.keyspace_name.as_deref()))
}

fn resolve_keys(keys: &[KeyReference], lookup: &ColumnLookup) -> Vec<(String, Option<SortOrder>)> {
    keys.iter()
        .filter_map(|key| {
            lookup
                .resolve(key)
                .map(|name| (name, key.order.as_deref().and_then(SortOrder::parse)))
        })
        .collect()
}

fn definition(role: &ViewRole, name: &str) -> Option<ViewDefinition> {
    let Some(base) = role.view_on.as_deref() else {
        debug!("View '{}' has no base table, skipping", name);
        return None;
    };
    let keyspace = keyspace(role);

    let fields = role.properties.as_ref().map(|p| p.iter()).unwrap_or_default();
    let lookup = ColumnLookup::default().with_fields(fields.iter().map(|(n, f)| (n.clone(), *f)));

    Some(ViewDefinition {
        target: QualifiedName::new(keyspace, name),
        base_table: QualifiedName::new(keyspace, base),
        columns: fields.into_iter().map(|(name, _)| name).collect(),
        partition_key: resolve_keys(&role.composite_partition_key, &lookup)
            .into_iter()
            .map(|(name, _)| name)
            .collect(),
        clustering_key: resolve_keys(&role.composite_clustering_key, &lookup)
            .into_iter()
            .map(|(name, order)| ClusteringColumn { name, order })
            .collect(),
        where_clause: role.where_clause.clone(),
        options: render_option_clauses(&role.table_options, role.comments.as_deref()),
    })
}

fn add(generation: &Generation, role: &ViewRole, name: &str) -> Vec<Statement> {
    definition(role, name)
        .map(|view| {
            vec![Statement::add(
                generation.templates.create_view(&view),
                StatementLevel::View,
            )]
        })
        .unwrap_or_default()
}

fn delete(generation: &Generation, role: &ViewRole, name: &str) -> Statement {
    Statement::drop(
        generation
            .templates
            .drop_view(&QualifiedName::new(keyspace(role), name)),
        StatementLevel::View,
    )
}

/// Changes that cannot be applied with `ALTER MATERIALIZED VIEW`
fn is_view_changed(comp_mod: &ViewCompMod) -> bool {
    let keys_changed = [
        &comp_mod.composite_partition_key,
        &comp_mod.composite_clustering_key,
    ]
    .into_iter()
    .flatten()
    .any(|change| change.is_changed());

    let definition_changed = [&comp_mod.view_on, &comp_mod.where_clause]
        .into_iter()
        .flatten()
        .any(|change| change.is_changed());

    keys_changed || definition_changed
}

fn update(generation: &Generation, role: &ViewRole) -> Vec<Statement> {
    let Some(comp_mod) = &role.comp_mod else {
        return Vec::new();
    };
    let Some(current) = view_name(role) else {
        return Vec::new();
    };

    let (old_name, new_name) = renamed(comp_mod.code.as_ref(), comp_mod.name.as_ref());
    let old_name = old_name.as_deref().unwrap_or(current);
    let new_name = new_name.as_deref().unwrap_or(current);

    if old_name != new_name || is_view_changed(comp_mod) {
        let mut statements = vec![delete(generation, role, old_name)];
        statements.extend(add(generation, role, new_name));
        return statements;
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
    if clauses.is_empty() {
        return Vec::new();
    }

    vec![Statement::modify(
        generation
            .templates
            .alter_view_options(&QualifiedName::new(keyspace(role), new_name), &clauses),
        StatementLevel::View,
    )]
}

/// Statements for one view node
pub(crate) fn view_statements(
    generation: &Generation,
    kind: GeneratorKind,
    node: &ViewNode,
) -> Vec<Statement> {
    let role = &node.role;

    match kind {
        GeneratorKind::Update => update(generation, role),
        GeneratorKind::Add | GeneratorKind::Delete => {
            let Some(name) = view_name(role) else {
                debug!("View without a name, skipping");
                return Vec::new();
            };

            if kind == GeneratorKind::Add {
                add(generation, role, name)
            } else {
                vec![delete(generation, role, name)]
            }
        }
    }
}

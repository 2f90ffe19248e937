//! User-defined type generators

use super::Generation;
use super::columns::GeneratorKind;
use crate::render::{ColumnData, QualifiedName, TypeDefinition};
use crate::statement::{Statement, StatementLevel};
use crate::tree::{Child, FieldDefinition, UdtNode, renamed};
use crate::types::{field_type_compatible, last_path_segment};
use anyhow::Result;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::BTreeSet;
use tracing::{debug, warn};

fn type_name<'a>(key: &'a str, node: &'a UdtNode) -> &'a str {
    node.code
        .as_deref()
        .or(node.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(key)
}

fn target(node: &UdtNode, name: &str) -> QualifiedName {
    let keyspace = node
        .keyspace_name
        .as_deref()
        .or_else(|| node.comp_mod.as_ref().and_then(|c| c.keyspace_name.as_deref()));
    QualifiedName::new(keyspace, name)
}

fn add(generation: &Generation, node: &UdtNode, target: &QualifiedName) -> Result<Vec<Statement>> {
    let mut fields = Vec::new();
    for (name, field) in node.fields() {
        match generation.resolve_type(&field, &name)? {
            Some(type_name) => fields.push(ColumnData::new(name, type_name)),
            None => debug!("Field '{}' of type '{}' has no resolvable type", name, target.name),
        }
    }

    if fields.is_empty() {
        debug!("Type '{}' has no fields, skipping", target.name);
        return Ok(Vec::new());
    }

    let definition = TypeDefinition {
        target: target.clone(),
        fields,
    };
    Ok(vec![Statement::add(
        generation.templates.create_type(&definition),
        StatementLevel::Udt,
    )])
}

fn delete(generation: &Generation, target: &QualifiedName) -> Statement {
    Statement::drop(generation.templates.drop_type(target), StatementLevel::Udt)
}

fn recreate(generation: &Generation, node: &UdtNode, target: &QualifiedName) -> Result<Vec<Statement>> {
    let mut statements = vec![delete(generation, target)];
    statements.extend(add(generation, node, target)?);
    Ok(statements)
}

fn update_field(
    generation: &Generation,
    node: &UdtNode,
    target: &QualifiedName,
    name: &str,
    field: &FieldDefinition,
) -> Result<Vec<Statement>> {
    let Some(comp_mod) = field.comp_mod.as_deref() else {
        return Ok(Vec::new());
    };
    let templates = generation.templates;

    if comp_mod.created {
        return Ok(match generation.resolve_type(field, name)? {
            Some(type_name) => vec![Statement::modify(
                templates.add_type_field(target, &ColumnData::new(name, type_name)),
                StatementLevel::Udt,
            )],
            None => Vec::new(),
        });
    }

    if comp_mod.deleted {
        debug!("Fields cannot be dropped from type '{}', skipping '{}'", target.name, name);
        return Ok(Vec::new());
    }

    let old_field = comp_mod
        .old_field
        .as_ref()
        .map(|f| f.or_type_of(field))
        .unwrap_or_else(|| field.clone());
    let new_field = comp_mod
        .new_field
        .as_ref()
        .map(|f| f.or_type_of(field))
        .unwrap_or_else(|| field.clone());

    let old_name = old_field.display_name().unwrap_or(name);
    let new_name = new_field.display_name().unwrap_or(name);
    let old_type = generation.resolve_type(&old_field, old_name)?;
    let new_type = generation.resolve_type(&new_field, new_name)?;

    let altered_type = match (old_type, new_type) {
        (Some(old_type), Some(new_type)) if old_type != new_type => {
            if !(generation.context.is_old_model && field_type_compatible(&old_type, &new_type)) {
                // the recreated type already carries the new field name
                return recreate(generation, node, target);
            }
            Some(new_type)
        }
        _ => None,
    };

    let mut statements = Vec::new();
    if old_name != new_name {
        statements.push(Statement::modify(
            templates.rename_type_field(target, old_name, new_name),
            StatementLevel::Udt,
        ));
    }
    if let Some(new_type) = altered_type {
        statements.push(Statement::modify(
            templates.alter_type_field(target, &ColumnData::new(new_name, new_type)),
            StatementLevel::Udt,
        ));
    }

    Ok(statements)
}

fn update(generation: &Generation, key: &str, node: &UdtNode) -> Result<Vec<Statement>> {
    let current = type_name(key, node);
    let comp_mod = node.comp_mod.as_ref();
    let (old_name, new_name) = renamed(
        comp_mod.and_then(|c| c.code.as_ref()),
        comp_mod.and_then(|c| c.name.as_ref()),
    );

    if let (Some(old_name), Some(new_name)) = (&old_name, &new_name)
        && old_name != new_name
    {
        let mut statements = vec![delete(generation, &target(node, old_name))];
        statements.extend(add(generation, node, &target(node, new_name))?);
        return Ok(statements);
    }

    let target = target(node, current);
    let mut statements = Vec::new();
    for (name, field) in node.fields() {
        statements.extend(update_field(generation, node, &target, &name, &field)?);
    }
    Ok(statements)
}

/// Statements for one UDT node
pub(crate) fn udt_statements(
    generation: &Generation,
    kind: GeneratorKind,
    key: &str,
    node: &UdtNode,
) -> Result<Vec<Statement>> {
    match kind {
        GeneratorKind::Add => add(generation, node, &target(node, type_name(key, node))),
        GeneratorKind::Update => update(generation, key, node),
        GeneratorKind::Delete => Ok(vec![delete(
            generation,
            &target(node, type_name(key, node)),
        )]),
    }
}

/// Every type name a field refers to, nested collections included
fn referenced_types(field: &FieldDefinition, out: &mut BTreeSet<String>) {
    if let Some(reference) = field.reference.as_deref()
        && let Some(name) = last_path_segment(reference)
    {
        out.insert(name.to_string());
    }
    if let Some(child_type) = &field.child_type {
        out.insert(child_type.clone());
    }
    if let Some(items) = &field.items {
        for item in items.all() {
            referenced_types(item, out);
        }
    }
    if let Some(properties) = &field.properties {
        for (_, nested) in properties.iter() {
            referenced_types(nested, out);
        }
    }
}

/// Order added UDTs so every type comes after the added types it uses.
///
/// Ties keep input order. On a dependency cycle the input order is returned
/// unchanged.
pub(crate) fn sort_added_udts(udts: Vec<Child<UdtNode>>) -> Vec<Child<UdtNode>> {
    let mut graph = DiGraph::<usize, ()>::new();
    let nodes: Vec<NodeIndex> = (0..udts.len()).map(|i| graph.add_node(i)).collect();

    for (i, dependent) in udts.iter().enumerate() {
        let mut references = BTreeSet::new();
        for (_, field) in dependent.node.fields() {
            referenced_types(&field, &mut references);
        }

        for (j, dependency) in udts.iter().enumerate() {
            let names = [dependency.key.as_str(), type_name(&dependency.key, &dependency.node)];
            if i != j && names.iter().any(|name| references.contains(*name)) {
                graph.add_edge(nodes[j], nodes[i], ());
            }
        }
    }

    if is_cyclic_directed(&graph) {
        warn!("User-defined types reference each other in a cycle, keeping input order");
        return udts;
    }

    let mut in_degree: Vec<usize> = nodes
        .iter()
        .map(|&n| graph.neighbors_directed(n, Direction::Incoming).count())
        .collect();
    let mut placed = vec![false; udts.len()];
    let mut order = Vec::with_capacity(udts.len());

    while order.len() < udts.len() {
        let Some(next) = (0..udts.len()).find(|&i| !placed[i] && in_degree[i] == 0) else {
            break;
        };
        placed[next] = true;
        order.push(next);
        for dependent in graph.neighbors_directed(nodes[next], Direction::Outgoing) {
            in_degree[graph[dependent]] -= 1;
        }
    }

    let mut slots: Vec<Option<Child<UdtNode>>> = udts.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

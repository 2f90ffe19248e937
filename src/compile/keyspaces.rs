//! Keyspace generators

use super::Generation;
use super::columns::GeneratorKind;
use crate::render::{KeyspaceDefinition, Replication};
use crate::statement::{Statement, StatementLevel};
use crate::tree::{KeyspaceNode, KeyspaceRole, renamed};
use tracing::debug;

const NETWORK_TOPOLOGY: &str = "NetworkTopologyStrategy";

fn keyspace_name(role: &KeyspaceRole) -> Option<&str> {
    role.code
        .as_deref()
        .or(role.name.as_deref())
        .filter(|name| !name.trim().is_empty())
}

fn definition(role: &KeyspaceRole, name: &str) -> KeyspaceDefinition {
    let is_network_topology = role
        .repl_strategy
        .as_deref()
        .is_some_and(|strategy| strategy.eq_ignore_ascii_case(NETWORK_TOPOLOGY));

    let replication = if is_network_topology {
        Replication::NetworkTopology {
            data_centers: role
                .data_centers
                .iter()
                .filter_map(|dc| {
                    dc.data_center_name
                        .clone()
                        .map(|name| (name, dc.repl_factor_value.unwrap_or(1)))
                })
                .collect(),
        }
    } else {
        Replication::Simple {
            factor: role.repl_factor.unwrap_or(1),
        }
    };

    KeyspaceDefinition {
        name: name.to_string(),
        replication,
        durable_writes: role.durable_writes.unwrap_or(true),
    }
}

fn add(generation: &Generation, role: &KeyspaceRole, name: &str) -> Statement {
    Statement::add(
        generation.templates.create_keyspace(&definition(role, name)),
        StatementLevel::Keyspace,
    )
}

fn delete(generation: &Generation, name: &str) -> Statement {
    Statement::drop(
        generation.templates.drop_keyspace(name),
        StatementLevel::Keyspace,
    )
}

fn update(generation: &Generation, role: &KeyspaceRole) -> Vec<Statement> {
    let Some(comp_mod) = &role.comp_mod else {
        return Vec::new();
    };

    let (old_name, new_name) = renamed(comp_mod.code.as_ref(), comp_mod.name.as_ref());
    if let (Some(old_name), Some(new_name)) = (&old_name, &new_name)
        && old_name != new_name
    {
        return vec![delete(generation, old_name), add(generation, role, new_name)];
    }

    let replication_changed = [
        &comp_mod.repl_strategy,
        &comp_mod.repl_factor,
        &comp_mod.data_centers,
        &comp_mod.durable_writes,
    ]
    .into_iter()
    .flatten()
    .any(|change| change.is_changed());

    if !replication_changed {
        return Vec::new();
    }

    let Some(name) = new_name.as_deref().or(keyspace_name(role)) else {
        return Vec::new();
    };

    vec![Statement::modify(
        generation.templates.alter_keyspace(&definition(role, name)),
        StatementLevel::Keyspace,
    )]
}

/// Statements for one keyspace node
pub(crate) fn keyspace_statements(
    generation: &Generation,
    kind: GeneratorKind,
    node: &KeyspaceNode,
) -> Vec<Statement> {
    let role = &node.role;

    match kind {
        GeneratorKind::Update => update(generation, role),
        GeneratorKind::Add | GeneratorKind::Delete => {
            let Some(name) = keyspace_name(role) else {
                debug!("Keyspace without a name, skipping");
                return Vec::new();
            };

            if kind == GeneratorKind::Add {
                vec![add(generation, role, name)]
            } else {
                vec![delete(generation, name)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::test_support::Fixture;
    use crate::statement::StatementKind;
    use serde_json::json;

    fn keyspace(value: serde_json::Value) -> KeyspaceNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_add_network_topology_keyspace() {
        let fixture = Fixture::default();
        let node = keyspace(json!({ "role": {
            "code": "app",
            "replStrategy": "NetworkTopologyStrategy",
            "dataCenters": [
                { "dataCenterName": "dc1", "replFactorValue": 3 },
                { "replFactorValue": 2 }
            ],
            "durableWrites": false
        } }));

        let statements = keyspace_statements(&fixture.generation(), GeneratorKind::Add, &node);
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].text,
            "CREATE KEYSPACE IF NOT EXISTS \"app\"\n\
             \tWITH REPLICATION = {'class': 'NetworkTopologyStrategy', 'dc1': 3}\n\
             \tAND DURABLE_WRITES = false;"
        );
    }

    #[test]
    fn test_rename_drops_and_recreates() {
        let fixture = Fixture::default();
        let node = keyspace(json!({ "role": {
            "code": "shop",
            "replFactor": 2,
            "compMod": { "code": { "old": "store", "new": "shop" } }
        } }));

        let statements = keyspace_statements(&fixture.generation(), GeneratorKind::Update, &node);
        let kinds: Vec<_> = statements.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StatementKind::Drop, StatementKind::Add]);
        assert_eq!(statements[0].text, "DROP KEYSPACE IF EXISTS \"store\";");
        assert!(statements[1].text.contains("'replication_factor': 2"));
    }

    #[test]
    fn test_replication_change_alters() {
        let fixture = Fixture::default();
        let node = keyspace(json!({ "role": {
            "code": "app",
            "replFactor": 3,
            "compMod": { "replFactor": { "old": 1, "new": 3 } }
        } }));

        let statements = keyspace_statements(&fixture.generation(), GeneratorKind::Update, &node);
        assert_eq!(statements, vec![Statement::modify(
            "ALTER KEYSPACE \"app\"\n\
             \tWITH REPLICATION = {'class': 'SimpleStrategy', 'replication_factor': 3}\n\
             \tAND DURABLE_WRITES = true;",
            StatementLevel::Keyspace
        )]);
    }

    #[test]
    fn test_unchanged_keyspace_yields_nothing() {
        let fixture = Fixture::default();
        let node = keyspace(json!({ "role": {
            "code": "app",
            "compMod": { "durableWrites": { "old": true, "new": true } }
        } }));

        assert!(keyspace_statements(&fixture.generation(), GeneratorKind::Update, &node).is_empty());
    }

    #[test]
    fn test_delete_keyspace() {
        let fixture = Fixture::default();
        let node = keyspace(json!({ "role": { "name": "app" } }));

        assert_eq!(
            keyspace_statements(&fixture.generation(), GeneratorKind::Delete, &node),
            vec![Statement::drop("DROP KEYSPACE IF EXISTS \"app\";", StatementLevel::Keyspace)]
        );
    }
}

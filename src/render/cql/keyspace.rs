//! Keyspace rendering

use crate::render::{KeyspaceDefinition, Replication, escape_string, quote_ident};

fn render_replication(replication: &Replication) -> String {
    match replication {
        Replication::Simple { factor } => format!(
            "{{'class': 'SimpleStrategy', 'replication_factor': {}}}",
            factor
        ),
        Replication::NetworkTopology { data_centers } => {
            let mut entries = vec!["'class': 'NetworkTopologyStrategy'".to_string()];
            entries.extend(
                data_centers
                    .iter()
                    .map(|(name, factor)| format!("{}: {}", escape_string(name), factor)),
            );
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn render_keyspace_body(keyspace: &KeyspaceDefinition) -> String {
    format!(
        "{}\n\tWITH REPLICATION = {}\n\tAND DURABLE_WRITES = {};",
        quote_ident(&keyspace.name),
        render_replication(&keyspace.replication),
        keyspace.durable_writes
    )
}

pub fn render_create_keyspace(keyspace: &KeyspaceDefinition) -> String {
    format!("CREATE KEYSPACE IF NOT EXISTS {}", render_keyspace_body(keyspace))
}

pub fn render_alter_keyspace(keyspace: &KeyspaceDefinition) -> String {
    format!("ALTER KEYSPACE {}", render_keyspace_body(keyspace))
}

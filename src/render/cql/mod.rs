//! Cassandra CQL rendering
//!
//! Each submodule renders one object kind; [`CqlTemplates`] wires them into
//! the [`StatementTemplates`] trait used by the compiler.

pub mod index;
pub mod keyspace;
pub mod table;
pub mod udt;
pub mod view;

pub use index::{render_create_index, render_create_search_index};
pub use keyspace::{render_alter_keyspace, render_create_keyspace};
pub use table::render_create_table;
pub use udt::render_create_type;
pub use view::render_create_view;

use crate::render::{
    ColumnData, KeyspaceDefinition, QualifiedName, SecondaryIndex, StatementTemplates,
    TableDefinition, TypeDefinition, ViewDefinition, quote_ident,
};

/// `\n\tAND ` separated option clauses after a `WITH`
pub(crate) fn with_clauses(clauses: &[String]) -> String {
    clauses.join("\n\tAND ")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CqlTemplates;

impl StatementTemplates for CqlTemplates {
    fn create_table(&self, table: &TableDefinition) -> String {
        render_create_table(table)
    }

    fn drop_table(&self, target: &QualifiedName) -> String {
        format!("DROP TABLE IF EXISTS {};", target)
    }

    fn alter_table_options(&self, target: &QualifiedName, options: &[String]) -> String {
        if options.is_empty() {
            return String::new();
        }
        format!("ALTER TABLE {}\n\tWITH {};", target, with_clauses(options))
    }

    fn add_column(&self, target: &QualifiedName, column: &ColumnData) -> String {
        format!(
            "ALTER TABLE {} ADD {} {};",
            target,
            quote_ident(&column.name),
            column.type_name
        )
    }

    fn drop_column(&self, target: &QualifiedName, column: &str) -> String {
        format!("ALTER TABLE {} DROP {};", target, quote_ident(column))
    }

    fn rename_column(&self, target: &QualifiedName, old_name: &str, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME {} TO {};",
            target,
            quote_ident(old_name),
            quote_ident(new_name)
        )
    }

    fn alter_column_type(&self, target: &QualifiedName, column: &ColumnData) -> String {
        format!(
            "ALTER TABLE {} ALTER {} TYPE {};",
            target,
            quote_ident(&column.name),
            column.type_name
        )
    }

    fn create_index(&self, target: &QualifiedName, index: &SecondaryIndex) -> String {
        render_create_index(target, index)
    }

    fn drop_index(&self, keyspace: Option<&str>, name: &str) -> String {
        format!("DROP INDEX IF EXISTS {};", QualifiedName::new(keyspace, name))
    }

    fn create_search_index(&self, target: &QualifiedName, columns: &[String]) -> String {
        render_create_search_index(target, columns)
    }

    fn drop_search_index(&self, target: &QualifiedName) -> String {
        format!("DROP SEARCH INDEX ON {};", target)
    }

    fn create_keyspace(&self, keyspace: &KeyspaceDefinition) -> String {
        render_create_keyspace(keyspace)
    }

    fn alter_keyspace(&self, keyspace: &KeyspaceDefinition) -> String {
        render_alter_keyspace(keyspace)
    }

    fn drop_keyspace(&self, name: &str) -> String {
        format!("DROP KEYSPACE IF EXISTS {};", quote_ident(name))
    }

    fn create_view(&self, view: &ViewDefinition) -> String {
        render_create_view(view)
    }

    fn alter_view_options(&self, target: &QualifiedName, options: &[String]) -> String {
        if options.is_empty() {
            return String::new();
        }
        format!(
            "ALTER MATERIALIZED VIEW {}\n\tWITH {};",
            target,
            with_clauses(options)
        )
    }

    fn drop_view(&self, target: &QualifiedName) -> String {
        format!("DROP MATERIALIZED VIEW IF EXISTS {};", target)
    }

    fn create_type(&self, udt: &TypeDefinition) -> String {
        render_create_type(udt)
    }

    fn add_type_field(&self, target: &QualifiedName, field: &ColumnData) -> String {
        format!(
            "ALTER TYPE {} ADD {} {};",
            target,
            quote_ident(&field.name),
            field.type_name
        )
    }

    fn rename_type_field(&self, target: &QualifiedName, old_name: &str, new_name: &str) -> String {
        format!(
            "ALTER TYPE {} RENAME {} TO {};",
            target,
            quote_ident(old_name),
            quote_ident(new_name)
        )
    }

    fn alter_type_field(&self, target: &QualifiedName, field: &ColumnData) -> String {
        format!(
            "ALTER TYPE {} ALTER {} TYPE {};",
            target,
            quote_ident(&field.name),
            field.type_name
        )
    }

    fn drop_type(&self, target: &QualifiedName) -> String {
        format!("DROP TYPE IF EXISTS {};", target)
    }
}

//! Statement text rendering
//!
//! Generators in [`crate::compile`] describe *what* to emit with the
//! definition types below and leave the actual text to a
//! [`StatementTemplates`] implementation. [`cql::CqlTemplates`] renders
//! Cassandra CQL.

pub mod cql;
pub mod options;

pub use cql::CqlTemplates;

use itertools::Itertools;
use std::fmt;

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// `"keyspace"."name"`, or just `"name"` when no keyspace is known
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub keyspace: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(keyspace: Option<&str>, name: &str) -> Self {
        Self {
            keyspace: keyspace
                .filter(|ks| !ks.trim().is_empty())
                .map(str::to_string),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.keyspace {
            Some(keyspace) => write!(f, "{}.{}", quote_ident(keyspace), quote_ident(&self.name)),
            None => write!(f, "{}", quote_ident(&self.name)),
        }
    }
}

/// A column (or UDT field) with its resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnData {
    pub name: String,
    pub type_name: String,
}

impl ColumnData {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `ascending` / `descending` as written by the modeling tool
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Asc),
            "desc" | "descending" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringColumn {
    pub name: String,
    pub order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub target: QualifiedName,
    pub columns: Vec<ColumnData>,
    pub partition_key: Vec<String>,
    pub clustering_key: Vec<ClusteringColumn>,
    /// Pre-rendered `name = value` clauses
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replication {
    Simple { factor: u32 },
    NetworkTopology { data_centers: Vec<(String, u32)> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyspaceDefinition {
    pub name: String,
    pub replication: Replication,
    pub durable_writes: bool,
}

/// What a secondary index on a collection column covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Keys,
    Values,
    Entries,
    Full,
}

impl IndexTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keys" => Some(IndexTarget::Keys),
            "values" => Some(IndexTarget::Values),
            "entries" => Some(IndexTarget::Entries),
            "full" => Some(IndexTarget::Full),
            _ => None,
        }
    }

    pub fn function(self) -> &'static str {
        match self {
            IndexTarget::Keys => "KEYS",
            IndexTarget::Values => "VALUES",
            IndexTarget::Entries => "ENTRIES",
            IndexTarget::Full => "FULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryIndex {
    pub name: String,
    pub column: String,
    pub target: Option<IndexTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefinition {
    pub target: QualifiedName,
    pub base_table: QualifiedName,
    /// Selected columns; empty selects `*`
    pub columns: Vec<String>,
    pub partition_key: Vec<String>,
    pub clustering_key: Vec<ClusteringColumn>,
    pub where_clause: Option<String>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub target: QualifiedName,
    pub fields: Vec<ColumnData>,
}

/// Text builders for every statement the compiler can emit
pub trait StatementTemplates {
    fn create_table(&self, table: &TableDefinition) -> String;
    fn drop_table(&self, target: &QualifiedName) -> String;
    fn alter_table_options(&self, target: &QualifiedName, options: &[String]) -> String;
    fn add_column(&self, target: &QualifiedName, column: &ColumnData) -> String;
    fn drop_column(&self, target: &QualifiedName, column: &str) -> String;
    fn rename_column(&self, target: &QualifiedName, old_name: &str, new_name: &str) -> String;
    fn alter_column_type(&self, target: &QualifiedName, column: &ColumnData) -> String;

    fn create_index(&self, target: &QualifiedName, index: &SecondaryIndex) -> String;
    fn drop_index(&self, keyspace: Option<&str>, name: &str) -> String;
    fn create_search_index(&self, target: &QualifiedName, columns: &[String]) -> String;
    fn drop_search_index(&self, target: &QualifiedName) -> String;

    fn create_keyspace(&self, keyspace: &KeyspaceDefinition) -> String;
    fn alter_keyspace(&self, keyspace: &KeyspaceDefinition) -> String;
    fn drop_keyspace(&self, name: &str) -> String;

    fn create_view(&self, view: &ViewDefinition) -> String;
    fn alter_view_options(&self, target: &QualifiedName, options: &[String]) -> String;
    fn drop_view(&self, target: &QualifiedName) -> String;

    fn create_type(&self, udt: &TypeDefinition) -> String;
    fn add_type_field(&self, target: &QualifiedName, field: &ColumnData) -> String;
    fn rename_type_field(&self, target: &QualifiedName, old_name: &str, new_name: &str) -> String;
    fn alter_type_field(&self, target: &QualifiedName, field: &ColumnData) -> String;
    fn drop_type(&self, target: &QualifiedName) -> String;

    /// Inert rendering of a statement: every line prefixed with `-- `
    fn comment_out(&self, text: &str) -> String {
        text.lines().map(|line| format!("-- {}", line)).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("it's"), "'it''s'");
    }

    #[test]
    fn test_qualified_name_without_keyspace() {
        assert_eq!(QualifiedName::new(Some("app"), "users").to_string(), "\"app\".\"users\"");
        assert_eq!(QualifiedName::new(None, "users").to_string(), "\"users\"");
        assert_eq!(QualifiedName::new(Some(" "), "users").to_string(), "\"users\"");
    }

    #[test]
    fn test_comment_out_prefixes_every_line() {
        let templates = CqlTemplates;
        assert_eq!(
            templates.comment_out("DROP TABLE \"t\";\nDROP TABLE \"u\";"),
            "-- DROP TABLE \"t\";\n-- DROP TABLE \"u\";"
        );
    }

    #[test]
    fn test_sort_order_and_index_target_parse() {
        assert_eq!(SortOrder::parse("descending"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("sideways"), None);
        assert_eq!(IndexTarget::parse("Entries"), Some(IndexTarget::Entries));
        assert_eq!(IndexTarget::parse(""), None);
    }
}

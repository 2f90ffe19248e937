//! Secondary and search index generation

use super::Generation;
use crate::render::{IndexTarget, QualifiedName, SecondaryIndex};
use crate::statement::{Statement, StatementLevel};
use crate::tree::{FieldDefinition, KeyReference, SecondaryIndexDef, TableNode};
use tracing::debug;

/// Resolves key references (`keyId` -> GUID) to column names
#[derive(Debug, Clone, Default)]
pub(crate) struct ColumnLookup {
    entries: Vec<(String, Option<String>)>,
}

impl ColumnLookup {
    pub fn with_fields<'f>(
        mut self,
        fields: impl IntoIterator<Item = (String, &'f FieldDefinition)>,
    ) -> Self {
        self.entries.extend(
            fields
                .into_iter()
                .map(|(name, field)| (name, field.guid.clone())),
        );
        self
    }

    /// Entries of `other` are consulted after this lookup's own
    pub fn merge(mut self, other: ColumnLookup) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn for_table(node: &TableNode, definitions: &[(String, FieldDefinition)]) -> Self {
        let mut lookup = Self::default();
        for source in node.column_sources() {
            lookup = lookup.with_fields(source.iter());
        }
        lookup.with_fields(definitions.iter().map(|(name, field)| (name.clone(), field)))
    }

    /// The column a key points at; the key's own name when no GUID matches
    pub fn resolve(&self, key: &KeyReference) -> Option<String> {
        key.key_id
            .as_deref()
            .and_then(|id| {
                self.entries
                    .iter()
                    .find(|(_, guid)| guid.as_deref() == Some(id))
                    .map(|(name, _)| name.clone())
            })
            .or_else(|| key.name.clone())
    }
}

/// How the table an index belongs to is being migrated
#[derive(Debug, Clone, Copy)]
pub(crate) enum IndexScope<'a> {
    Created(&'a QualifiedName),
    Deleted(&'a QualifiedName),
    Recreated {
        old: &'a QualifiedName,
        new: &'a QualifiedName,
    },
    Altered(&'a QualifiedName),
}

/// Names of every column covered by one of the table's indexes
pub(crate) fn indexed_columns(node: &TableNode, lookup: &ColumnLookup) -> Vec<String> {
    let secondary = node
        .role
        .secondary_indexes
        .iter()
        .flat_map(|index| index.keys.iter());

    node.role
        .search_index_columns
        .iter()
        .chain(secondary)
        .filter_map(|key| lookup.resolve(key))
        .collect()
}

fn resolve_indexes(
    definitions: &[SecondaryIndexDef],
    lookup: &ColumnLookup,
    table: &QualifiedName,
) -> Vec<SecondaryIndex> {
    definitions
        .iter()
        .filter_map(|definition| {
            let Some(column) = definition.keys.first().and_then(|key| lookup.resolve(key)) else {
                debug!("Index {:?} on '{}' has no resolvable column", definition.name, table.name);
                return None;
            };

            let name = definition
                .name
                .clone()
                .unwrap_or_else(|| format!("{}_{}_idx", table.name, column));

            Some(SecondaryIndex {
                name,
                column,
                target: definition.index_type.as_deref().and_then(IndexTarget::parse),
            })
        })
        .collect()
}

fn resolve_search_columns(keys: &[KeyReference], lookup: &ColumnLookup) -> Vec<String> {
    keys.iter().filter_map(|key| lookup.resolve(key)).collect()
}

struct IndexSet {
    secondary: Vec<SecondaryIndex>,
    search: Vec<String>,
}

impl IndexSet {
    fn adds(&self, generation: &Generation, target: &QualifiedName) -> Vec<Statement> {
        let mut statements: Vec<Statement> = self
            .secondary
            .iter()
            .map(|index| {
                Statement::add(
                    generation.templates.create_index(target, index),
                    StatementLevel::Index,
                )
            })
            .collect();

        if !self.search.is_empty() {
            statements.push(Statement::add(
                generation.templates.create_search_index(target, &self.search),
                StatementLevel::Index,
            ));
        }

        statements
    }

    fn drops(&self, generation: &Generation, target: &QualifiedName) -> Vec<Statement> {
        let mut statements: Vec<Statement> = self
            .secondary
            .iter()
            .map(|index| {
                Statement::drop(
                    generation
                        .templates
                        .drop_index(target.keyspace.as_deref(), &index.name),
                    StatementLevel::Index,
                )
            })
            .collect();

        if !self.search.is_empty() {
            statements.push(Statement::drop(
                generation.templates.drop_search_index(target),
                StatementLevel::Index,
            ));
        }

        statements
    }
}

/// Index statements for one table
pub(crate) fn index_statements(
    generation: &Generation,
    node: &TableNode,
    scope: IndexScope,
) -> Vec<Statement> {
    let lookup = ColumnLookup::for_table(node, &generation.definitions);
    let comp_mod = node.comp_mod();
    let secondary_change = comp_mod.and_then(|c| c.secondary_indexes.as_ref());
    let search_change = comp_mod.and_then(|c| c.search_index_columns.as_ref());

    let current = |table: &QualifiedName| IndexSet {
        secondary: resolve_indexes(&node.role.secondary_indexes, &lookup, table),
        search: resolve_search_columns(&node.role.search_index_columns, &lookup),
    };

    match scope {
        IndexScope::Created(table) => current(table).adds(generation, table),
        IndexScope::Deleted(table) => current(table).drops(generation, table),
        IndexScope::Recreated { old, new } => {
            let before = IndexSet {
                secondary: secondary_change
                    .and_then(|c| c.old.as_deref())
                    .map(|defs| resolve_indexes(defs, &lookup, old))
                    .unwrap_or_else(|| current(old).secondary),
                search: search_change
                    .and_then(|c| c.old.as_deref())
                    .map(|keys| resolve_search_columns(keys, &lookup))
                    .unwrap_or_else(|| current(old).search),
            };
            let after = IndexSet {
                secondary: secondary_change
                    .and_then(|c| c.new.as_deref())
                    .map(|defs| resolve_indexes(defs, &lookup, new))
                    .unwrap_or_else(|| current(new).secondary),
                search: search_change
                    .and_then(|c| c.new.as_deref())
                    .map(|keys| resolve_search_columns(keys, &lookup))
                    .unwrap_or_else(|| current(new).search),
            };

            let mut statements = before.drops(generation, old);
            statements.extend(after.adds(generation, new));
            statements
        }
        IndexScope::Altered(table) => {
            let mut removed = IndexSet {
                secondary: Vec::new(),
                search: Vec::new(),
            };
            let mut added = IndexSet {
                secondary: Vec::new(),
                search: Vec::new(),
            };

            if let Some(change) = secondary_change {
                let old = resolve_indexes(change.old.as_deref().unwrap_or_default(), &lookup, table);
                let new = resolve_indexes(change.new.as_deref().unwrap_or_default(), &lookup, table);
                removed.secondary = old.iter().filter(|i| !new.contains(i)).cloned().collect();
                added.secondary = new.iter().filter(|i| !old.contains(i)).cloned().collect();
            }

            if let Some(change) = search_change {
                let old = resolve_search_columns(change.old.as_deref().unwrap_or_default(), &lookup);
                let new = resolve_search_columns(change.new.as_deref().unwrap_or_default(), &lookup);
                if old != new {
                    removed.search = old;
                    added.search = new;
                }
            }

            let mut statements = removed.drops(generation, table);
            statements.extend(added.adds(generation, table));
            statements
        }
    }
}

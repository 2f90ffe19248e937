//! Deduplication, drop-gating and global ordering of statements

use crate::render::StatementTemplates;
use crate::statement::{Statement, StatementKind, StatementLevel};
use itertools::Itertools;

/// Fixed precedence of (level, kind) buckets in the final script
pub const PRECEDENCE: [(StatementLevel, StatementKind); 23] = [
    (StatementLevel::Keyspace, StatementKind::Add),
    (StatementLevel::Keyspace, StatementKind::Modify),
    (StatementLevel::View, StatementKind::Drop),
    (StatementLevel::Index, StatementKind::Drop),
    (StatementLevel::Renewal, StatementKind::Drop),
    (StatementLevel::Table, StatementKind::Drop),
    (StatementLevel::Udt, StatementKind::Drop),
    (StatementLevel::Udt, StatementKind::Add),
    (StatementLevel::Udt, StatementKind::Modify),
    (StatementLevel::Table, StatementKind::Add),
    (StatementLevel::Table, StatementKind::Modify),
    (StatementLevel::Field, StatementKind::Drop),
    (StatementLevel::Field, StatementKind::Add),
    (StatementLevel::Field, StatementKind::Modify),
    (StatementLevel::Index, StatementKind::Add),
    (StatementLevel::Index, StatementKind::Modify),
    (StatementLevel::Renewal, StatementKind::Add),
    (StatementLevel::View, StatementKind::Add),
    (StatementLevel::View, StatementKind::Modify),
    (StatementLevel::Udf, StatementKind::Drop),
    (StatementLevel::Udf, StatementKind::Add),
    (StatementLevel::Udf, StatementKind::Modify),
    (StatementLevel::Keyspace, StatementKind::Drop),
];

/// Structurally identical statements collapse to their first occurrence
pub fn dedup(statements: Vec<Statement>) -> Vec<Statement> {
    statements.into_iter().unique().collect()
}

/// Comment out every drop with text unless drops are applied
pub fn gate_drops(
    statements: Vec<Statement>,
    templates: &dyn StatementTemplates,
    apply_drop_statements: bool,
) -> Vec<Statement> {
    if apply_drop_statements {
        return statements;
    }

    statements
        .into_iter()
        .map(|statement| {
            if statement.is_destructive() {
                let rendered = templates.comment_out(&statement.text);
                statement.deactivate(rendered)
            } else {
                statement
            }
        })
        .collect()
}

/// Stable partition into [`PRECEDENCE`] buckets; anything unmatched keeps its
/// relative order at the end
pub fn order_statements(statements: Vec<Statement>) -> Vec<Statement> {
    let mut buckets: Vec<Vec<Statement>> = vec![Vec::new(); PRECEDENCE.len() + 1];

    for statement in statements {
        let slot = PRECEDENCE
            .iter()
            .position(|&(level, kind)| statement.level == level && statement.kind == kind)
            .unwrap_or(PRECEDENCE.len());
        buckets[slot].push(statement);
    }

    buckets.into_iter().flatten().collect()
}

/// Non-empty statement texts separated by a blank line
pub fn render_script(statements: &[Statement]) -> String {
    statements
        .iter()
        .filter(|statement| !statement.is_empty())
        .map(|statement| statement.text.as_str())
        .join("\n\n")
}

//! Column generators and the column change classifier

use super::Generation;
use crate::render::{ColumnData, QualifiedName};
use crate::statement::{Statement, StatementLevel};
use crate::tree::FieldDefinition;
use crate::types::field_type_compatible;
use anyhow::Result;
use tracing::debug;

/// Which generator a bucket of the change tree is walked with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Add,
    Update,
    Delete,
}

/// Outcome of generating one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChange {
    Statements(Vec<Statement>),
    /// Nothing structural changed; the column stays part of the table as is
    MergeIntoTable(ColumnData),
}

impl ColumnChange {
    fn none() -> Self {
        ColumnChange::Statements(Vec::new())
    }
}

/// A changed column with its old/new identity resolved
#[derive(Debug, Clone)]
pub struct HydratedColumn<'a> {
    pub old_name: Option<String>,
    pub new_name: Option<String>,
    pub old_type: Option<String>,
    pub new_type: Option<String>,
    pub is_name_change: bool,
    pub is_type_change: bool,
    pub is_old_model: bool,
    pub property: &'a FieldDefinition,
    pub script_data: ScriptData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptData {
    pub target: QualifiedName,
    pub column: ColumnData,
}

pub(crate) fn hydrate<'a>(
    generation: &Generation,
    property: &'a FieldDefinition,
    script_data: ScriptData,
) -> Result<HydratedColumn<'a>> {
    let comp_mod = property.comp_mod.as_deref();
    let old_field = comp_mod
        .and_then(|c| c.old_field.as_ref())
        .map(|f| f.or_type_of(property))
        .unwrap_or_else(|| property.clone());
    let new_field = comp_mod
        .and_then(|c| c.new_field.as_ref())
        .map(|f| f.or_type_of(property))
        .unwrap_or_else(|| property.clone());

    let old_name = old_field.display_name().map(str::to_string);
    let new_name = new_field.display_name().map(str::to_string);

    let column_name = script_data.column.name.as_str();
    let old_type = generation.resolve_type(&old_field, old_name.as_deref().unwrap_or(column_name))?;
    let new_type = generation.resolve_type(&new_field, new_name.as_deref().unwrap_or(column_name))?;

    Ok(HydratedColumn {
        is_name_change: old_name != new_name,
        is_type_change: old_type != new_type,
        old_name,
        new_name,
        old_type,
        new_type,
        is_old_model: generation.context.is_old_model,
        property,
        script_data,
    })
}

/// Generate the statements for one column of a table
pub(crate) fn column_statements(
    generation: &Generation,
    kind: GeneratorKind,
    property: &FieldDefinition,
    script_data: ScriptData,
) -> Result<ColumnChange> {
    let templates = generation.templates;

    match kind {
        GeneratorKind::Add => Ok(ColumnChange::Statements(vec![Statement::add(
            templates.add_column(&script_data.target, &script_data.column),
            StatementLevel::Field,
        )])),
        GeneratorKind::Delete => Ok(ColumnChange::Statements(vec![Statement::drop(
            templates.drop_column(&script_data.target, &script_data.column.name),
            StatementLevel::Field,
        )])),
        GeneratorKind::Update => {
            let hydrated = hydrate(generation, property, script_data)?;
            Ok(classify(generation, &hydrated))
        }
    }
}

/// Decide how a changed column is migrated
pub(crate) fn classify(generation: &Generation, column: &HydratedColumn) -> ColumnChange {
    let (Some(_), Some(_)) = (&column.old_name, &column.new_name) else {
        debug!(
            "Column '{}' has no old or new name, skipping",
            column.script_data.column.name
        );
        return ColumnChange::none();
    };

    if column.is_name_change {
        return ColumnChange::Statements(alter_name(generation, column));
    }

    if column.is_type_change {
        return ColumnChange::Statements(alter_type(generation, column));
    }

    ColumnChange::MergeIntoTable(column.script_data.column.clone())
}

fn alter_name(generation: &Generation, column: &HydratedColumn) -> Vec<Statement> {
    let (Some(old_name), Some(new_name)) = (&column.old_name, &column.new_name) else {
        return Vec::new();
    };

    if column.property.primary_key && column.is_type_change {
        debug!(
            "Primary key column '{}' is renamed and retyped at once, skipping",
            old_name
        );
        return Vec::new();
    }

    if !column.property.primary_key {
        return drop_and_recreate(generation, column);
    }

    vec![Statement::modify(
        generation
            .templates
            .rename_column(&column.script_data.target, old_name, new_name),
        StatementLevel::Field,
    )]
}

fn alter_type(generation: &Generation, column: &HydratedColumn) -> Vec<Statement> {
    let (Some(old_type), Some(new_type)) = (&column.old_type, &column.new_type) else {
        return Vec::new();
    };

    if column.property.primary_key {
        debug!(
            "Primary key column '{}' changed type, skipping",
            column.script_data.column.name
        );
        return Vec::new();
    }

    if column.is_old_model && field_type_compatible(old_type, new_type) {
        let altered = ColumnData::new(column.script_data.column.name.clone(), new_type.clone());
        return vec![Statement::modify(
            generation
                .templates
                .alter_column_type(&column.script_data.target, &altered),
            StatementLevel::Field,
        )];
    }

    drop_and_recreate(generation, column)
}

/// Drop the old column, then add the new one in its place
fn drop_and_recreate(generation: &Generation, column: &HydratedColumn) -> Vec<Statement> {
    let (Some(old_name), Some(new_name)) = (&column.old_name, &column.new_name) else {
        return Vec::new();
    };

    let target = &column.script_data.target;
    let type_name = column
        .new_type
        .clone()
        .unwrap_or_else(|| column.script_data.column.type_name.clone());
    let templates = generation.templates;

    vec![
        Statement::drop(templates.drop_column(target, old_name), StatementLevel::Field),
        Statement::add(
            templates.add_column(target, &ColumnData::new(new_name.clone(), type_name)),
            StatementLevel::Field,
        ),
    ]
}

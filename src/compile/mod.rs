//! Change tree -> ordered alter script
//!
//! The walker turns every node of the change tree into raw [`Statement`]s
//! using the entity generators in the submodules. The raw list is then
//! deduplicated, drop-gated and reordered by [`order`] before rendering.

pub mod columns;
pub mod context;
pub mod indexes;
pub mod keyspaces;
pub mod order;
pub mod tables;
pub mod udts;
pub mod views;
pub mod walker;

pub use columns::{ColumnChange, GeneratorKind, HydratedColumn};
pub use context::{ContainerScriptOptions, ScriptContext, ScriptOptions};

use crate::render::{CqlTemplates, StatementTemplates};
use crate::statement::Statement;
use crate::tree::{BucketKind, ChangeTree, FieldDefinition, PartitionKind, UdtNode};
use crate::types::{
    CqlTypeResolver, TypeResolver, UdtMap, build_udt_map, merge_udt_maps, resolve_column_type,
};
use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info};

/// Everything a generator needs besides the node it works on
pub(crate) struct Generation<'a> {
    pub templates: &'a dyn StatementTemplates,
    pub resolver: &'a dyn TypeResolver,
    pub udt_map: &'a UdtMap,
    pub context: &'a ScriptContext,
    /// Fields of every UDT in the tree, for resolving index key references
    pub definitions: Vec<(String, FieldDefinition)>,
}

impl Generation<'_> {
    pub fn resolve_type(&self, field: &FieldDefinition, fallback_name: &str) -> Result<Option<String>> {
        resolve_column_type(self.resolver, field, self.udt_map, fallback_name)
    }
}

fn collect_definitions(tree: &ChangeTree) -> Vec<(String, FieldDefinition)> {
    BucketKind::ALL
        .into_iter()
        .flat_map(|bucket| tree.children::<UdtNode>(PartitionKind::ModelDefinitions, bucket))
        .flat_map(|child| child.node.fields())
        .collect()
}

/// Script compiler with pluggable text templates and type resolution
#[derive(Debug, Clone)]
pub struct Compiler<T = CqlTemplates, R = CqlTypeResolver> {
    templates: T,
    resolver: R,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CqlTemplates, CqlTypeResolver)
    }
}

impl<T: StatementTemplates, R: TypeResolver> Compiler<T, R> {
    pub fn new(templates: T, resolver: R) -> Self {
        Self {
            templates,
            resolver,
        }
    }

    /// Every statement the tree produces, before dedup, gating and ordering
    fn raw_statements(
        &self,
        tree: &Value,
        type_map: &UdtMap,
        context: &ScriptContext,
    ) -> Result<Vec<Statement>> {
        let tree = ChangeTree::from_value(tree)?;
        let udt_map = merge_udt_maps(type_map, build_udt_map(&tree));
        debug!("Resolved {} UDT references", udt_map.len());

        let generation = Generation {
            templates: &self.templates,
            resolver: &self.resolver,
            udt_map: &udt_map,
            context,
            definitions: collect_definitions(&tree),
        };

        walker::walk(&generation, &tree)
    }

    /// The final statement list: deduplicated, drop-gated and ordered
    pub fn statements(
        &self,
        tree: &Value,
        type_map: &UdtMap,
        context: &ScriptContext,
    ) -> Result<Vec<Statement>> {
        let raw = self.raw_statements(tree, type_map, context)?;
        let generated = raw.len();

        let unique = order::dedup(raw);
        let gated = order::gate_drops(unique, &self.templates, context.apply_drop_statements);
        let ordered = order::order_statements(gated);

        info!(
            "Generated {} statements ({} after deduplication)",
            generated,
            ordered.len()
        );
        Ok(ordered)
    }

    pub fn compile(&self, tree: &Value, type_map: &UdtMap, context: &ScriptContext) -> Result<String> {
        let statements = self.statements(tree, type_map, context)?;
        Ok(order::render_script(&statements))
    }

    /// Whether the migration drops anything, ignoring drop-gating
    pub fn has_destructive_statements(
        &self,
        tree: &Value,
        type_map: &UdtMap,
        context: &ScriptContext,
    ) -> Result<bool> {
        let raw = self.raw_statements(tree, type_map, context)?;
        Ok(raw.iter().any(Statement::is_destructive))
    }
}

/// Compile a change tree to a CQL alter script
pub fn compile(tree: &Value, type_map: &UdtMap, context: &ScriptContext) -> Result<String> {
    Compiler::default().compile(tree, type_map, context)
}

pub fn has_destructive_statements(
    tree: &Value,
    type_map: &UdtMap,
    context: &ScriptContext,
) -> Result<bool> {
    Compiler::default().has_destructive_statements(tree, type_map, context)
}

//! cqlmt check-drops - Report whether a migration would drop anything

use super::TreeInput;
use crate::compile::{Compiler, ScriptContext};
use anyhow::Result;
use console::style;

/// Returns true when the migration contains destructive statements
pub fn cmd_check_drops(context: &ScriptContext, input: &TreeInput) -> Result<bool> {
    let tree = input.read_tree()?;
    let type_map = input.read_type_map()?;
    let compiler = Compiler::default();

    if !compiler.has_destructive_statements(&tree, &type_map, context)? {
        println!("{} No destructive statements", style("✓").green());
        return Ok(false);
    }

    // List the drops as they would run, not commented out
    let applied = ScriptContext {
        apply_drop_statements: true,
        ..context.clone()
    };
    let drops: Vec<_> = compiler
        .statements(&tree, &type_map, &applied)?
        .into_iter()
        .filter(|statement| statement.is_destructive())
        .collect();

    eprintln!(
        "{} Migration contains {} destructive statement(s):",
        style("warning:").yellow().bold(),
        drops.len()
    );
    for statement in &drops {
        eprintln!("  {}", style(&statement.text).dim());
    }

    Ok(true)
}

//! cqlmt compile - Turn a change tree into an alter script

use super::TreeInput;
use crate::compile::{Compiler, ScriptContext};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Compile the change tree and print the script, or write it to `output`
pub fn cmd_compile(context: &ScriptContext, input: &TreeInput, output: Option<&Path>) -> Result<()> {
    let tree = input.read_tree()?;
    let type_map = input.read_type_map()?;

    let script = Compiler::default().compile(&tree, &type_map, context)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", script))
                .with_context(|| format!("Failed to write script to {}", path.display()))?;
            info!("Wrote script to {}", path.display());
        }
        None if script.is_empty() => info!("No changes to script"),
        None => println!("{}", script),
    }

    Ok(())
}

//! Reading change trees and type maps from disk or stdin

use crate::constants::STDIN_PATH;
use crate::types::UdtMap;
use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments shared by every command that reads a change tree
#[derive(Debug, Clone, Args)]
pub struct TreeInput {
    /// Change tree JSON file, or `-` for stdin
    pub tree: String,

    #[arg(long, help = "JSON object mapping type references to type names")]
    pub type_map: Option<PathBuf>,
}

impl TreeInput {
    pub fn read_tree(&self) -> Result<Value> {
        let contents = if self.tree == STDIN_PATH {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read change tree from stdin")?;
            buffer
        } else {
            std::fs::read_to_string(&self.tree)
                .with_context(|| format!("Failed to read change tree {}", self.tree))?
        };

        serde_json::from_str(&contents).context("Change tree is not valid JSON")
    }

    pub fn read_type_map(&self) -> Result<UdtMap> {
        match &self.type_map {
            Some(path) => read_type_map(path),
            None => Ok(UdtMap::new()),
        }
    }
}

fn read_type_map(path: &Path) -> Result<UdtMap> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read type map {}", path.display()))?;
    let type_map: UdtMap = serde_json::from_str(&contents)
        .with_context(|| format!("Type map {} must be a JSON object of strings", path.display()))?;
    debug!("Loaded {} type map entries", type_map.len());
    Ok(type_map)
}

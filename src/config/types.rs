use clap::Args;
use serde::{Deserialize, Serialize};

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub script: Option<ScriptInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub script: Script,
}

// Script generation configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScriptInput {
    pub apply_drop_statements: Option<bool>,
    pub old_model: Option<bool>,
    pub db_version: Option<String>,
    pub containers: Option<ContainersInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContainersInput {
    pub skip_modified: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub apply_drop_statements: bool,
    /// Legacy dialect, either set explicitly or derived from `db_version`
    pub old_model: bool,
    pub db_version: Option<String>,
    pub containers: Containers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Containers {
    pub skip_modified: bool,
}

// CLI argument structures
#[derive(Debug, Clone, Default, Args)]
pub struct ScriptArgs {
    #[arg(long, help = "Emit drop statements active instead of commented out")]
    pub apply_drops: bool,

    #[arg(long, help = "Generate for the legacy dialect")]
    pub old_model: bool,

    #[arg(long, help = "Suppress all keyspace statements")]
    pub skip_modified_containers: bool,
}

// Flags only override when set, so a file value survives an absent flag
impl From<ScriptArgs> for ScriptInput {
    fn from(args: ScriptArgs) -> Self {
        Self {
            apply_drop_statements: args.apply_drops.then_some(true),
            old_model: args.old_model.then_some(true),
            db_version: None, // Database version comes from file only
            containers: args.skip_modified_containers.then_some(ContainersInput {
                skip_modified: Some(true),
            }),
        }
    }
}

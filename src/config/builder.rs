use crate::compile::{ContainerScriptOptions, ScriptContext, ScriptOptions};
use crate::config::version::is_legacy_version;
use crate::config::{merge::Merge, types::*};
use anyhow::Result;
use tracing::debug;

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            script: self.resolve_script(&defaults.script)?,
        })
    }

    fn resolve_script(&self, defaults: &Script) -> Result<Script> {
        let script_input = self.config_input.script.as_ref();
        let db_version = script_input
            .and_then(|s| s.db_version.as_ref())
            .cloned()
            .or_else(|| defaults.db_version.clone());

        // An explicit switch wins over the version-derived dialect
        let old_model = match script_input.and_then(|s| s.old_model) {
            Some(old_model) => old_model,
            None => match &db_version {
                Some(version) => {
                    let legacy = is_legacy_version(version)?;
                    debug!("Database version {} selects legacy mode: {}", version, legacy);
                    legacy
                }
                None => defaults.old_model,
            },
        };

        Ok(Script {
            apply_drop_statements: script_input
                .and_then(|s| s.apply_drop_statements)
                .unwrap_or(defaults.apply_drop_statements),
            old_model,
            db_version,
            containers: Containers {
                skip_modified: script_input
                    .and_then(|s| s.containers.as_ref())
                    .and_then(|c| c.skip_modified)
                    .unwrap_or(defaults.containers.skip_modified),
            },
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Config> for ScriptContext {
    fn from(config: &Config) -> Self {
        ScriptContext {
            is_old_model: config.script.old_model,
            apply_drop_statements: config.script.apply_drop_statements,
            script_options: ScriptOptions {
                containers: ContainerScriptOptions {
                    skip_modified: config.script.containers.skip_modified,
                },
            },
        }
    }
}

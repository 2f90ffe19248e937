use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            script: match (self.script, other.script) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
        }
    }
}

impl ScriptInput {
    pub fn merge_with(self, other: ScriptInput) -> ScriptInput {
        ScriptInput {
            apply_drop_statements: other.apply_drop_statements.or(self.apply_drop_statements),
            old_model: other.old_model.or(self.old_model),
            db_version: other.db_version.or(self.db_version),
            containers: match (self.containers, other.containers) {
                (Some(a), Some(b)) => Some(ContainersInput {
                    skip_modified: b.skip_modified.or(a.skip_modified),
                }),
                (a, b) => b.or(a),
            },
        }
    }
}

use serde::{Deserialize, Serialize};

/// Options recognised by the compiler for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptContext {
    /// Legacy dialect: compatible column type changes are altered in place
    pub is_old_model: bool,
    /// Emit drops active instead of commented out
    pub apply_drop_statements: bool,
    pub script_options: ScriptOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptOptions {
    pub containers: ContainerScriptOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerScriptOptions {
    /// Suppress all keyspace statements
    pub skip_modified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_from_camel_case() {
        let context: ScriptContext = serde_json::from_value(json!({
            "isOldModel": true,
            "scriptOptions": { "containers": { "skipModified": true } }
        }))
        .unwrap();

        assert!(context.is_old_model);
        assert!(!context.apply_drop_statements);
        assert!(context.script_options.containers.skip_modified);
    }

    #[test]
    fn test_empty_context_is_default() {
        let context: ScriptContext = serde_json::from_value(json!({})).unwrap();
        assert_eq!(context, ScriptContext::default());
    }
}

use crate::core::encoding;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{ActionDocument, Axis, AxisScript, Funscript, ScriptPaths, TransformResult};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

/// Resolved file locations for one run, as reported by a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub input: String,
    pub outputs: Vec<(Axis, String)>,
}

pub struct FunscriptPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    paths: ScriptPaths,
}

impl<S: Storage, C: ConfigProvider> FunscriptPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let paths = ScriptPaths::new(config.base_name());
        Self {
            storage,
            config,
            paths,
        }
    }

    pub fn plan(&self) -> RunPlan {
        RunPlan {
            input: self.storage.display_path(&self.paths.input()),
            outputs: Axis::ALL
                .iter()
                .map(|&axis| (axis, self.storage.display_path(&self.paths.output(axis))))
                .collect(),
        }
    }

    fn parse_document(&self, bytes: &[u8]) -> Result<ActionDocument> {
        let path = self.storage.display_path(&self.paths.input());
        let value: Value = serde_json::from_slice(bytes).map_err(|source| EtlError::ParseError {
            path: path.clone(),
            source,
        })?;

        match value {
            Value::Object(entries) => Ok(ActionDocument::new(entries)),
            other => Err(EtlError::NotAnObject {
                path,
                found: json_kind(&other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FunscriptPipeline<S, C> {
    async fn extract(&self) -> Result<ActionDocument> {
        let input = self.paths.input();
        tracing::debug!("Reading input document: {}", self.storage.display_path(&input));

        let bytes = self.storage.read_file(&input).await?;
        let document = self.parse_document(&bytes)?;

        tracing::debug!("Input document has {} top-level keys", document.entries.len());
        Ok(document)
    }

    async fn transform(&self, document: ActionDocument) -> Result<TransformResult> {
        let mut scripts = Vec::with_capacity(Axis::ALL.len());
        let mut missing_keys = Vec::new();

        for axis in Axis::ALL {
            let key = self.config.axis_key(axis);
            let actions = match document.get(key) {
                Some(actions) => actions.clone(),
                None if self.config.strict_keys() => {
                    return Err(EtlError::MissingKey {
                        key: key.to_string(),
                        path: self.storage.display_path(&self.paths.input()),
                    });
                }
                None => {
                    tracing::debug!("Key '{}' not found, {} actions will be null", key, axis);
                    missing_keys.push(key.to_string());
                    Value::Null
                }
            };

            scripts.push(AxisScript {
                axis,
                script: Funscript::from_actions(actions),
            });
        }

        Ok(TransformResult {
            scripts,
            missing_keys,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        let style = self.config.output_style();
        let mut written = Vec::with_capacity(result.scripts.len());

        for AxisScript { axis, script } in &result.scripts {
            let path = self.paths.output(*axis);
            let bytes = encoding::encode(script, style)?;
            self.storage.write_file(&path, &bytes).await?;

            let location = self.storage.display_path(&path);
            match script.action_count() {
                Some(count) => tracing::debug!("Wrote {} ({} actions)", location, count),
                None => tracing::debug!("Wrote {} (no action list)", location),
            }
            written.push(location);
        }

        Ok(written)
    }
}

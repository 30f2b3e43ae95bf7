use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const FUNSCRIPT_VERSION: &str = "1.0";
pub const FUNSCRIPT_RANGE: u32 = 100;

/// A motion axis carried by the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Stroke,
    Roll,
    Pitch,
}

impl Axis {
    /// Write order of the output files.
    pub const ALL: [Axis; 3] = [Axis::Stroke, Axis::Roll, Axis::Pitch];

    pub fn default_key(self) -> &'static str {
        match self {
            Axis::Stroke => "L0",
            Axis::Roll => "R1",
            Axis::Pitch => "R2",
        }
    }

    /// Extra file-name component before `.funscript`; the stroke axis has none.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Axis::Stroke => None,
            Axis::Roll => Some("roll"),
            Axis::Pitch => Some("pitch"),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Stroke => "stroke",
            Axis::Roll => "roll",
            Axis::Pitch => "pitch",
        };
        f.write_str(name)
    }
}

/// The parsed input: top-level keys mapped to opaque action sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionDocument {
    pub entries: Map<String, Value>,
}

impl ActionDocument {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

/// One output file. Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funscript {
    pub version: String,
    pub inverted: bool,
    pub range: u32,
    pub actions: Value,
}

impl Funscript {
    pub fn from_actions(actions: Value) -> Self {
        Self {
            version: FUNSCRIPT_VERSION.to_string(),
            inverted: false,
            range: FUNSCRIPT_RANGE,
            actions,
        }
    }

    pub fn action_count(&self) -> Option<usize> {
        self.actions.as_array().map(Vec::len)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisScript {
    pub axis: Axis,
    pub script: Funscript,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    pub scripts: Vec<AxisScript>,
    pub missing_keys: Vec<String>,
}

/// Paths relative to the base directory for one base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPaths {
    base_name: String,
}

impl ScriptPaths {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
        }
    }

    pub fn input(&self) -> String {
        format!("{0}/{0}.json", self.base_name)
    }

    pub fn output(&self, axis: Axis) -> String {
        match axis.suffix() {
            Some(suffix) => format!("{0}/{0}.{1}.funscript", self.base_name, suffix),
            None => format!("{0}/{0}.funscript", self.base_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_paths() {
        let paths = ScriptPaths::new("demo");
        assert_eq!(paths.input(), "demo/demo.json");
        assert_eq!(paths.output(Axis::Stroke), "demo/demo.funscript");
        assert_eq!(paths.output(Axis::Roll), "demo/demo.roll.funscript");
        assert_eq!(paths.output(Axis::Pitch), "demo/demo.pitch.funscript");
    }

    #[test]
    fn test_funscript_template_fields() {
        let script = Funscript::from_actions(json!([{"at": 0, "pos": 50}]));
        assert_eq!(script.version, "1.0");
        assert!(!script.inverted);
        assert_eq!(script.range, 100);
        assert_eq!(script.action_count(), Some(1));

        let missing = Funscript::from_actions(Value::Null);
        assert_eq!(missing.action_count(), None);
    }

    #[test]
    fn test_records_are_independent() {
        let mut first = Funscript::from_actions(json!([]));
        let second = Funscript::from_actions(json!([]));
        first.version = "2.0".to_string();
        assert_eq!(second.version, FUNSCRIPT_VERSION);
    }
}

use crate::domain::model::Funscript;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use std::io;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// `{"version": "1.0", "inverted": false, ...}`, ASCII only.
    #[default]
    Python,
    Compact,
    Pretty,
}

/// Mirrors the layout of Python's `json.dump` defaults: `", "` and `": "`
/// separators and `ensure_ascii` escaping.
#[derive(Debug, Default)]
pub struct PythonFormatter;

impl Formatter for PythonFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    // Number text is copied as parsed, except that Python re-emits `-0` as `0`.
    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value == "-0" {
            writer.write_all(b"0")
        } else {
            writer.write_all(value.as_bytes())
        }
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

pub fn encode(script: &Funscript, style: OutputStyle) -> Result<Vec<u8>> {
    let bytes = match style {
        OutputStyle::Python => {
            let mut buffer = Vec::new();
            let mut serializer = Serializer::with_formatter(&mut buffer, PythonFormatter);
            script.serialize(&mut serializer)?;
            buffer
        }
        OutputStyle::Compact => serde_json::to_vec(script)?,
        OutputStyle::Pretty => serde_json::to_vec_pretty(script)?,
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn encode_str(script: &Funscript, style: OutputStyle) -> String {
        String::from_utf8(encode(script, style).unwrap()).unwrap()
    }

    #[test]
    fn test_python_style_layout() {
        let script = Funscript::from_actions(json!([{"at": 0, "pos": 50}, {"at": 100, "pos": 0}]));
        assert_eq!(
            encode_str(&script, OutputStyle::Python),
            r#"{"version": "1.0", "inverted": false, "range": 100, "actions": [{"at": 0, "pos": 50}, {"at": 100, "pos": 0}]}"#
        );
    }

    #[test]
    fn test_python_style_null_actions() {
        let script = Funscript::from_actions(Value::Null);
        assert_eq!(
            encode_str(&script, OutputStyle::Python),
            r#"{"version": "1.0", "inverted": false, "range": 100, "actions": null}"#
        );
    }

    #[test]
    fn test_python_style_escapes_non_ascii() {
        let script = Funscript::from_actions(json!([{"note": "café 🎵", "tab": "a\tb"}]));
        let encoded = encode_str(&script, OutputStyle::Python);
        assert!(encoded.contains(r#""note": "caf\u00e9 \ud83c\udfb5""#));
        assert!(encoded.contains(r#""tab": "a\tb""#));
        assert!(encoded.is_ascii());
    }

    #[test]
    fn test_compact_style() {
        let script = Funscript::from_actions(json!([]));
        assert_eq!(
            encode_str(&script, OutputStyle::Compact),
            r#"{"version":"1.0","inverted":false,"range":100,"actions":[]}"#
        );
    }

    #[test]
    fn test_pretty_style_round_trips() {
        let script = Funscript::from_actions(json!([{"at": 5, "pos": 10}]));
        let encoded = encode(&script, OutputStyle::Pretty).unwrap();
        let decoded: Funscript = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, script);
        assert!(String::from_utf8(encoded).unwrap().contains('\n'));
    }

    #[test]
    fn test_number_text_passes_through() {
        let actions: Value =
            serde_json::from_str(r#"[{"at": 18446744073709551616, "pos": -0, "speed": 1.50}]"#)
                .unwrap();
        let script = Funscript::from_actions(actions);
        assert!(encode_str(&script, OutputStyle::Python)
            .contains(r#"[{"at": 18446744073709551616, "pos": 0, "speed": 1.50}]"#));
        assert!(encode_str(&script, OutputStyle::Compact)
            .contains(r#"[{"at":18446744073709551616,"pos":-0,"speed":1.50}]"#));
    }

    #[test]
    fn test_action_key_order_preserved() {
        let actions: Value = serde_json::from_str(r#"[{"pos": 50, "at": 0}]"#).unwrap();
        let script = Funscript::from_actions(actions);
        assert!(encode_str(&script, OutputStyle::Python).contains(r#"[{"pos": 50, "at": 0}]"#));
    }
}

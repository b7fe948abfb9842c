//! Block-style YAML for the Markdown front matter.
//!
//! `serde_yaml` resolves plain scalars with the YAML 1.2 core schema, so it
//! leaves strings such as `yes`, `on` or `2024-05-17` unquoted. Front matter is
//! commonly read by YAML 1.1 tools (PyYAML, Jekyll), which would turn those
//! into booleans and dates. Strings matching a YAML 1.1 implicit type are
//! therefore single-quoted here. Every other scalar is rendered by `serde_yaml`.

use regex::RegexSet;
use serde_json::Value;
use serde_yaml::Mapping;
use std::sync::LazyLock;

/// Plain scalars that a YAML 1.1 reader resolves to something other than a string.
static YAML11_IMPLICIT: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // bool
        r"^(?:y|Y|yes|Yes|YES|n|N|no|No|NO|true|True|TRUE|false|False|FALSE|on|On|ON|off|Off|OFF)$",
        // null
        r"^(?:~|null|Null|NULL|)$",
        // int: binary, octal, decimal, hex, sexagesimal
        r"^[-+]?(?:0b[01_]+|0[0-7_]+|0|[1-9][0-9_]*|0x[0-9a-fA-F_]+|[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
        // float
        r"^(?:[-+]?[0-9][0-9_]*\.[0-9_]*(?:[eE][-+]?[0-9]+)?|[-+]?\.[0-9_]+(?:[eE][-+]?[0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
        // timestamp
        r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?)$",
        // merge and value keys
        r"^(?:<<|=)$",
    ])
    .expect("YAML 1.1 resolver patterns")
});

/// Renders ordered top-level entries as a block mapping ending in a newline.
pub fn render(entries: &[(String, Value)]) -> Result<String, serde_yaml::Error> {
    let mut out = String::new();
    for (key, value) in entries {
        write_entry(&mut out, key, value, 0)?;
    }
    Ok(out)
}

fn write_entry(out: &mut String, key: &str, value: &Value, indent: usize) -> Result<(), serde_yaml::Error> {
    out.push_str(&" ".repeat(indent));
    out.push_str(&key_text(key)?);
    out.push(':');
    write_value(out, value, indent)
}

/// Writes whatever follows `key:` or `-` on a line owned at `indent`,
/// including the line break.
fn write_value(out: &mut String, value: &Value, indent: usize) -> Result<(), serde_yaml::Error> {
    match value {
        Value::Object(map) if !map.is_empty() => {
            out.push('\n');
            for (key, child) in map {
                write_entry(out, key, child, indent + 2)?;
            }
        }
        Value::Array(items) if !items.is_empty() => {
            out.push('\n');
            for item in items {
                out.push_str(&" ".repeat(indent + 2));
                out.push('-');
                write_value(out, item, indent + 2)?;
            }
        }
        scalar => {
            out.push(' ');
            out.push_str(&scalar_text(scalar, indent)?);
            out.push('\n');
        }
    }
    Ok(())
}

fn scalar_text(value: &Value, indent: usize) -> Result<String, serde_yaml::Error> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => string_text(text, indent)?,
        Value::Array(_) => "[]".to_string(),
        Value::Object(_) => "{}".to_string(),
    })
}

fn string_text(text: &str, indent: usize) -> Result<String, serde_yaml::Error> {
    if YAML11_IMPLICIT.is_match(text) {
        return Ok(single_quoted(text));
    }
    let rendered = as_mapping_value(serde_yaml::Value::from(text))?;
    // Block scalar lines come back indented for a key at column 0.
    Ok(rendered.replace('\n', &format!("\n{}", " ".repeat(indent))))
}

fn key_text(key: &str) -> Result<String, serde_yaml::Error> {
    if YAML11_IMPLICIT.is_match(key) {
        return Ok(single_quoted(key));
    }
    let mut mapping = Mapping::new();
    mapping.insert(serde_yaml::Value::from(key), serde_yaml::Value::Null);
    let rendered = serde_yaml::to_string(&mapping)?;
    Ok(match rendered.strip_suffix(": null\n") {
        Some(plain) if !plain.contains('\n') => plain.to_string(),
        // Multi-line keys come back in `? ` complex form.
        _ => double_quoted(key),
    })
}

/// What `serde_yaml` writes after `v: ` for this value, without the final newline.
fn as_mapping_value(value: serde_yaml::Value) -> Result<String, serde_yaml::Error> {
    let mut mapping = Mapping::new();
    mapping.insert(serde_yaml::Value::from("v"), value);
    let rendered = serde_yaml::to_string(&mapping)?;
    let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);
    Ok(rendered.strip_prefix("v: ").unwrap_or(rendered).to_string())
}

fn single_quoted(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// JSON string escapes are valid YAML double-quoted escapes.
fn double_quoted(text: &str) -> String {
    Value::from(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn yaml11_lookalikes_are_single_quoted() {
        let yaml = render(&entries(&[
            ("Flag", json!("yes")),
            ("Switch", json!("off")),
            ("Published On", json!("2024-05-17")),
            ("Stamp", json!("2024-05-17T09:30:00.000250")),
            ("Code", json!("012")),
            ("Ratio", json!("1.5")),
            ("Nothing", json!("~")),
        ]))
        .unwrap();

        for line in [
            "Flag: 'yes'",
            "Switch: 'off'",
            "Published On: '2024-05-17'",
            "Stamp: '2024-05-17T09:30:00.000250'",
            "Code: '012'",
            "Ratio: '1.5'",
            "Nothing: '~'",
        ] {
            assert!(yaml.lines().any(|l| l == line), "missing {line:?} in\n{yaml}");
        }
    }

    #[test]
    fn ordinary_strings_and_typed_values_stay_plain() {
        let yaml = render(&entries(&[
            ("Headline", json!("New System is Live")),
            ("Is Published", json!(false)),
            ("Views", json!(42)),
            ("Score", json!(2.5)),
            ("Missing", json!(null)),
        ]))
        .unwrap();
        assert_eq!(
            yaml,
            "Headline: New System is Live\nIs Published: false\nViews: 42\nScore: 2.5\nMissing: null\n"
        );
    }

    #[test]
    fn keys_that_look_like_booleans_are_quoted() {
        let yaml = render(&entries(&[("on", json!("stage"))])).unwrap();
        assert_eq!(yaml, "'on': stage\n");
    }

    #[test]
    fn nested_values_parse_back_unchanged() {
        let value = json!({
            "tags": ["rust", "no", "2024-01-01"],
            "author": {"name": "Jules", "active": "true"},
            "empty": [],
            "notes": "line one\n---\n\nline three"
        });
        let yaml = render(&entries(&[("Meta", value.clone())])).unwrap();

        let parsed: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, json!({ "Meta": value }));
        assert!(yaml.contains("- 'no'"), "{yaml}");
        assert!(yaml.contains("active: 'true'"), "{yaml}");
    }

    #[test]
    fn single_quotes_are_doubled() {
        assert_eq!(single_quoted("it's"), "'it''s'");
    }
}

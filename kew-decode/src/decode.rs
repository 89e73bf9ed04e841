//! Document to [`Value`] conversion.

use std::path::Path;

use kew_value::{Kind, Type, Value};
use serde::Deserialize;

use crate::{
    Format,
    error::{Error, Result, SourceContext},
};

/// Decode every document in `src`.
///
/// `name` labels diagnostics. JSON input may hold a stream of values and
/// YAML input several `---` separated documents; TOML is always one table.
pub fn decode_str(src: &str, name: &str, format: Format) -> Result<Vec<Value>> {
    let ctx = SourceContext::new(src, name);
    let values = match format {
        Format::Json => decode_json(&ctx)?,
        Format::Yaml => decode_yaml(&ctx)?,
        Format::Toml => vec![decode_toml(&ctx)?],
    };
    tracing::debug!(file = name, %format, documents = values.len(), "decoded");
    Ok(values)
}

/// Read and decode a file.
///
/// Without an explicit `format` the file extension decides.
pub fn decode_file(path: impl AsRef<Path>, format: Option<Format>) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let format = format
        .or_else(|| Format::from_path(path))
        .ok_or_else(|| {
            Box::new(Error::UnknownFormat {
                path: path.to_path_buf(),
            })
        })?;

    let src = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;

    decode_str(&src, &path.display().to_string(), format)
}

fn decode_json(ctx: &SourceContext) -> Result<Vec<Value>> {
    serde_json::Deserializer::from_str(ctx.src())
        .into_iter::<serde_json::Value>()
        .map(|doc| doc.map(|doc| from_json(&doc)).map_err(|e| ctx.json_error(e)))
        .collect()
}

fn decode_yaml(ctx: &SourceContext) -> Result<Vec<Value>> {
    serde_yaml::Deserializer::from_str(ctx.src())
        .map(|doc| {
            serde_yaml::Value::deserialize(doc)
                .map(|doc| from_yaml(&doc))
                .map_err(|e| ctx.yaml_error(e))
        })
        .collect()
}

fn decode_toml(ctx: &SourceContext) -> Result<Value> {
    let table: toml::Table = toml::from_str(ctx.src()).map_err(|e| ctx.toml_error(e))?;
    Ok(from_toml_table(&table))
}

/// Put a decoded value into an `interface {}` slot.
fn boxed(value: Value) -> Value {
    if value.kind() == Kind::Interface {
        value
    } else {
        Value::interface(value)
    }
}

fn string_map(entries: Vec<(Value, Value)>) -> Value {
    Value::map(Type::string(), Type::interface(), entries)
}

fn list(items: Vec<Value>) -> Value {
    Value::slice(Type::interface(), items)
}

fn integer(n: Option<i64>, u: Option<u64>, f: Option<f64>) -> Value {
    match (n, u, f) {
        (Some(n), _, _) => Value::int(n),
        (None, Some(u), _) => Value::uint_typed(Type::uint64(), u),
        (None, None, Some(f)) => Value::float64(f),
        (None, None, None) => Value::nil_interface(),
    }
}

fn from_json(doc: &serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match doc {
        Json::Null => Value::nil_interface(),
        Json::Bool(b) => Value::bool(*b),
        Json::Number(n) => integer(n.as_i64(), n.as_u64(), n.as_f64()),
        Json::String(s) => Value::string(s.as_str()),
        Json::Array(items) => list(items.iter().map(|v| boxed(from_json(v))).collect()),
        Json::Object(map) => string_map(
            map.iter()
                .map(|(k, v)| (Value::string(k.as_str()), boxed(from_json(v))))
                .collect(),
        ),
    }
}

fn from_yaml(doc: &serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match doc {
        Yaml::Null => Value::nil_interface(),
        Yaml::Bool(b) => Value::bool(*b),
        Yaml::Number(n) => integer(n.as_i64(), n.as_u64(), n.as_f64()),
        Yaml::String(s) => Value::string(s.as_str()),
        Yaml::Sequence(items) => list(items.iter().map(|v| boxed(from_yaml(v))).collect()),
        Yaml::Mapping(map) => {
            let string_keys = map.keys().all(Yaml::is_string);
            let entries = map
                .iter()
                .map(|(k, v)| {
                    let key = from_yaml(k);
                    let key = if string_keys { key } else { boxed(key) };
                    (key, boxed(from_yaml(v)))
                })
                .collect();
            if string_keys {
                string_map(entries)
            } else {
                Value::map(Type::interface(), Type::interface(), entries)
            }
        }
        Yaml::Tagged(tagged) => from_yaml(&tagged.value),
    }
}

fn from_toml_table(table: &toml::Table) -> Value {
    string_map(
        table
            .iter()
            .map(|(k, v)| (Value::string(k.as_str()), boxed(from_toml(v))))
            .collect(),
    )
}

fn from_toml(doc: &toml::Value) -> Value {
    use toml::Value as Toml;

    match doc {
        Toml::String(s) => Value::string(s.as_str()),
        Toml::Integer(n) => Value::int(*n),
        Toml::Float(f) => Value::float64(*f),
        Toml::Boolean(b) => Value::bool(*b),
        Toml::Datetime(dt) => Value::string(dt.to_string()),
        Toml::Array(items) => list(items.iter().map(|v| boxed(from_toml(v))).collect()),
        Toml::Table(table) => from_toml_table(table),
    }
}

#[cfg(test)]
mod tests {
    use kew_value::Data;

    use super::*;

    fn entries(value: &Value) -> &[(Value, Value)] {
        match value.data() {
            Data::Map(Some(entries)) => entries,
            other => panic!("expected a map, got {:?}", other),
        }
    }

    fn lookup<'a>(value: &'a Value, key: &str) -> &'a Value {
        entries(value)
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v.unpack())
            .unwrap_or_else(|| panic!("missing key {}", key))
    }

    #[test]
    fn test_json_object_shape() {
        let docs = decode_str(r#"{"a": 1, "b": [true, null], "c": 1.5}"#, "x.json", Format::Json)
            .unwrap();
        assert_eq!(docs.len(), 1);

        let doc = &docs[0];
        assert_eq!(doc.ty().to_string(), "map[string]interface {}");
        assert_eq!(lookup(doc, "a").as_int(), Some(1));
        assert_eq!(lookup(doc, "c").as_float(), Some(1.5));

        let list = lookup(doc, "b");
        assert_eq!(list.ty().to_string(), "[]interface {}");
        match list.data() {
            Data::Slice(Some(items)) => {
                assert_eq!(items[0].unpack().as_bool(), Some(true));
                assert!(items[1].is_nil());
            }
            other => panic!("expected a slice, got {:?}", other),
        }
    }

    #[test]
    fn test_map_values_are_boxed() {
        let docs = decode_str(r#"{"a": "x"}"#, "x.json", Format::Json).unwrap();
        let (_, value) = &entries(&docs[0])[0];
        assert_eq!(value.kind(), Kind::Interface);
        assert_eq!(value.unpack().kind(), Kind::String);
    }

    #[test]
    fn test_json_stream() {
        let docs = decode_str("1 \"two\"\n[3]", "x.json", Format::Json).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[1].as_str(), Some("two"));
    }

    #[test]
    fn test_large_unsigned_integer() {
        let docs = decode_str("18446744073709551615", "x.json", Format::Json).unwrap();
        assert_eq!(docs[0].kind(), Kind::Uint64);
        assert_eq!(docs[0].as_uint(), Some(u64::MAX));
    }

    #[test]
    fn test_yaml_documents() {
        let src = "kind: Pod\n---\nkind: Service\n";
        let docs = decode_str(src, "x.yaml", Format::Yaml).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(lookup(&docs[1], "kind").as_str(), Some("Service"));
    }

    #[test]
    fn test_yaml_non_string_keys() {
        let docs = decode_str("1: one\ntrue: yes\n", "x.yaml", Format::Yaml).unwrap();
        assert_eq!(docs[0].ty().to_string(), "map[interface {}]interface {}");
        let (key, _) = &entries(&docs[0])[0];
        assert_eq!(key.unpack().as_int(), Some(1));
    }

    #[test]
    fn test_yaml_tag_dropped() {
        let docs = decode_str("!custom hello\n", "x.yaml", Format::Yaml).unwrap();
        assert_eq!(docs[0].as_str(), Some("hello"));
    }

    #[test]
    fn test_toml_table() {
        let src = "name = \"web\"\nwhen = 1979-05-27\n\n[limits]\ncpu = 2\n";
        let docs = decode_str(src, "x.toml", Format::Toml).unwrap();
        assert_eq!(docs.len(), 1);

        let doc = &docs[0];
        assert_eq!(lookup(doc, "name").as_str(), Some("web"));
        assert_eq!(lookup(doc, "when").as_str(), Some("1979-05-27"));
        assert_eq!(lookup(lookup(doc, "limits"), "cpu").as_int(), Some(2));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = decode_str("{", "bad.json", Format::Json).unwrap_err();
        assert!(matches!(*err, Error::Json { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let err = decode_str("a: [1, 2\n", "bad.yaml", Format::Yaml).unwrap_err();
        assert!(matches!(*err, Error::Yaml { .. }));
    }
}

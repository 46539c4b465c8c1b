//! Document decoding and encoding
//!
//! Decoding accepts either JSON or YAML and sniffs which one it has been given.
//! Encoding writes the format that kubectl was asked for.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default JSON indentation width
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Serialization format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl Format {
    /// Lowercase format name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Guess the format of raw document bytes
///
/// Input starting with `{` or `[` after leading whitespace is JSON,
/// anything else is treated as YAML.
pub fn sniff(bytes: &[u8]) -> Format {
    match bytes.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{' | b'[') => Format::Json,
        _ => Format::Yaml,
    }
}

/// Decode raw bytes into a document
///
/// Empty input and a `null` document both decode to `None`. For a YAML
/// stream only the first document is returned.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not valid JSON/YAML.
pub fn decode(bytes: &[u8]) -> Result<Option<Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let format = sniff(bytes);
    debug!(%format, len = bytes.len(), "Decoding document");

    let value = match format {
        Format::Json => {
            let mut stream = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
            match stream.next() {
                Some(value) => value.map_err(|e| decode_error(format, &e))?,
                None => return Ok(None),
            }
        }
        Format::Yaml => match serde_yaml::Deserializer::from_slice(bytes).next() {
            Some(document) => Value::deserialize(document).map_err(|e| decode_error(format, &e))?,
            None => return Ok(None),
        },
    };

    Ok(match value {
        Value::Null => None,
        value => Some(value),
    })
}

fn decode_error(format: Format, err: &dyn fmt::Display) -> Error {
    Error::Decode {
        format: format.as_str(),
        message: err.to_string(),
    }
}

/// Encode a document
///
/// JSON is pretty-printed with `json_indent` spaces per level.
///
/// # Errors
///
/// Returns [`Error::Encode`] if serialization fails.
pub fn encode(value: &Value, format: Format, json_indent: usize) -> Result<String> {
    let encode_error = |e: &dyn fmt::Display| Error::Encode {
        format: format.as_str(),
        message: e.to_string(),
    };

    match format {
        Format::Json => {
            let indent = " ".repeat(json_indent);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut serializer).map_err(|e| encode_error(&e))?;
            String::from_utf8(buf).map_err(|e| encode_error(&e))
        }
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| encode_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert!(matches!("wide".parse::<Format>(), Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_sniff() {
        assert_eq!(sniff(b"  \n{\"a\": 1}"), Format::Json);
        assert_eq!(sniff(b"[1]"), Format::Json);
        assert_eq!(sniff(b"apiVersion: v1\n"), Format::Yaml);
        assert_eq!(sniff(b""), Format::Yaml);
    }

    #[test]
    fn test_empty_input_is_none() {
        assert!(decode(b"").unwrap().is_none());
        assert!(decode(b" \n\t").unwrap().is_none());
        assert!(decode(b"null").unwrap().is_none());
        assert!(decode(b"~\n").unwrap().is_none());
    }

    #[test]
    fn test_json_indent() {
        let out = encode(&json!({"a": {"b": 1}}), Format::Json, 4).unwrap();
        assert_eq!(out, "{\n    \"a\": {\n        \"b\": 1\n    }\n}");

        let out = encode(&json!({"a": 1}), Format::Json, 2).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let err = decode(b"{\"a\": ").unwrap_err();
        assert!(matches!(err, Error::Decode { format: "json", .. }));
    }
}

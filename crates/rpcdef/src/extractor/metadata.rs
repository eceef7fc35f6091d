//! Field tags.
//!
//! A tag is a space-separated list of `key:"value"` pairs, the value a quoted string
//! holding a primary value followed by comma-separated options:
//!
//! ```text
//! json:"user_id,omitempty" validate:"required"
//! ```

use std::collections::BTreeMap;

use rpcdef_support::FieldTag;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
  #[error("bad syntax for tag key at {rest:?}")]
  KeySyntax { rest: String },
  #[error("bad syntax for tag pair: expected ':' after key {key:?}")]
  MissingColon { key: String },
  #[error("bad syntax for tag value of key {key:?}: expected a quoted string")]
  ValueSyntax { key: String },
  #[error("unterminated value for tag key {key:?}")]
  Unterminated { key: String },
  #[error("invalid escape '\\{escape}' in value of tag key {key:?}")]
  Escape { key: String, escape: char },
}

/// Parses a raw tag into its entries. A key given twice keeps its last value.
pub(crate) fn parse_tags(raw: &str) -> Result<BTreeMap<String, FieldTag>, TagError> {
  let mut rest = strip_backticks(raw.trim());
  let mut tags = BTreeMap::new();

  loop {
    rest = rest.trim_start();
    if rest.is_empty() {
      break;
    }

    let key_len = rest
      .find(|c: char| c.is_whitespace() || c.is_control() || c == ':' || c == '"')
      .unwrap_or(rest.len());
    if key_len == 0 {
      return Err(TagError::KeySyntax { rest: rest.to_string() });
    }
    let key = &rest[..key_len];
    rest = rest[key_len..]
      .strip_prefix(':')
      .ok_or_else(|| TagError::MissingColon { key: key.to_string() })?;

    let body = rest
      .strip_prefix('"')
      .ok_or_else(|| TagError::ValueSyntax { key: key.to_string() })?;
    let (value, consumed) = unquote(key, body)?;
    rest = &body[consumed..];

    let mut parts = value.split(',');
    let primary = parts.next().unwrap_or_default().to_string();
    tags.insert(
      key.to_string(),
      FieldTag {
        value: primary,
        options: parts.map(String::from).collect(),
      },
    );
  }

  Ok(tags)
}

fn strip_backticks(raw: &str) -> &str {
  raw
    .strip_prefix('`')
    .and_then(|inner| inner.strip_suffix('`'))
    .map_or(raw, str::trim)
}

/// Decodes a quoted value whose opening quote is already consumed. Returns the value
/// and the number of bytes consumed, closing quote included.
fn unquote(key: &str, body: &str) -> Result<(String, usize), TagError> {
  let mut value = String::new();
  let mut chars = body.char_indices();
  while let Some((offset, c)) = chars.next() {
    match c {
      '"' => return Ok((value, offset + 1)),
      '\\' => {
        let Some((_, escaped)) = chars.next() else {
          break;
        };
        value.push(match escaped {
          '"' => '"',
          '\\' => '\\',
          '\'' => '\'',
          'n' => '\n',
          't' => '\t',
          'r' => '\r',
          '0' => '\0',
          other => {
            return Err(TagError::Escape {
              key: key.to_string(),
              escape: other,
            });
          }
        });
      }
      '\n' => break,
      other => value.push(other),
    }
  }
  Err(TagError::Unterminated { key: key.to_string() })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tag(value: &str, options: &[&str]) -> FieldTag {
    FieldTag {
      value: value.to_string(),
      options: options.iter().map(ToString::to_string).collect(),
    }
  }

  #[test]
  fn test_empty_tag() {
    assert!(parse_tags("").unwrap().is_empty());
    assert!(parse_tags("   ").unwrap().is_empty());
    assert!(parse_tags("``").unwrap().is_empty());
  }

  #[test]
  fn test_value_and_options() {
    let tags = parse_tags(r#"key:"value,opt1,opt2""#).unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags["key"], tag("value", &["opt1", "opt2"]));
  }

  #[test]
  fn test_surrounding_whitespace_and_backticks_are_ignored() {
    let expected = tag("value", &["opt1", "opt2"]);
    for raw in [
      r#"`key:"value,opt1,opt2"`"#,
      r#"  `key:"value,opt1,opt2"`  "#,
      r#"   key:"value,opt1,opt2"   "#,
    ] {
      assert_eq!(parse_tags(raw).unwrap()["key"], expected, "for {raw:?}");
    }
  }

  #[test]
  fn test_multiple_keys() {
    let tags = parse_tags(r#"json:"user_id,omitempty"  validate:"required" db:"-""#).unwrap();
    assert_eq!(tags["json"], tag("user_id", &["omitempty"]));
    assert_eq!(tags["validate"], tag("required", &[]));
    assert_eq!(tags["db"], tag("-", &[]));
  }

  #[test]
  fn test_empty_value_keeps_options() {
    let tags = parse_tags(r#"json:",omitempty""#).unwrap();
    assert_eq!(tags["json"], tag("", &["omitempty"]));
  }

  #[test]
  fn test_escapes() {
    let tags = parse_tags(r#"pattern:"a\"b\\c""#).unwrap();
    assert_eq!(tags["pattern"].value, r#"a"b\c"#);
  }

  #[test]
  fn test_duplicate_key_last_wins() {
    let tags = parse_tags(r#"json:"a" json:"b""#).unwrap();
    assert_eq!(tags["json"].value, "b");
  }

  #[test]
  fn test_errors() {
    assert_eq!(
      parse_tags(r#":"value""#).unwrap_err(),
      TagError::KeySyntax {
        rest: r#":"value""#.to_string()
      }
    );
    assert_eq!(
      parse_tags("json").unwrap_err(),
      TagError::MissingColon { key: "json".to_string() }
    );
    assert_eq!(
      parse_tags("json:value").unwrap_err(),
      TagError::ValueSyntax { key: "json".to_string() }
    );
    assert_eq!(
      parse_tags(r#"json:"value"#).unwrap_err(),
      TagError::Unterminated { key: "json".to_string() }
    );
    assert_eq!(
      parse_tags(r#"json:"a\qb""#).unwrap_err(),
      TagError::Escape {
        key: "json".to_string(),
        escape: 'q'
      }
    );
  }
}

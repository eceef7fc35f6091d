use serde_json::Value;

/// Marks a documentation line holding an example value for a field.
pub(crate) const EXAMPLE_PREFIX: &str = "example:";

/// Splits field documentation into its example value and the remaining text.
///
/// Every `example:` line is removed from the text. The first one with a value
/// supplies the example; a bare marker supplies nothing.
pub(crate) fn extract_example(comment: &str) -> Result<(Option<Value>, String), serde_json::Error> {
  let mut example = None;
  let mut lines = Vec::new();

  for line in comment.lines().map(str::trim).filter(|line| !line.is_empty()) {
    let Some(raw) = line.strip_prefix(EXAMPLE_PREFIX) else {
      lines.push(line);
      continue;
    };
    let raw = raw.trim();
    if raw.is_empty() {
      continue;
    }
    let value = serde_json::from_str(raw)?;
    example.get_or_insert(value);
  }

  Ok((example, lines.join("\n")))
}

/// Trims the documentation attached to services, methods and objects.
pub(crate) fn clean_comment(comment: &str) -> String {
  comment.trim().to_string()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_number_example() {
    let (example, comment) = extract_example("Widget count.\nexample: 5").unwrap();
    assert_eq!(example, Some(json!(5)));
    assert_eq!(comment, "Widget count.");
  }

  #[test]
  fn test_bare_marker_is_dropped() {
    let (example, comment) = extract_example("Widget count.\nexample:").unwrap();
    assert_eq!(example, None);
    assert_eq!(comment, "Widget count.");
  }

  #[test]
  fn test_structured_examples() {
    let cases = [
      ("example: \"hello\"", json!("hello")),
      ("example: true", json!(true)),
      ("example: null", json!(null)),
      ("example: [1, 2, 3]", json!([1, 2, 3])),
      ("example: {\"a\": {\"b\": 1.5}}", json!({"a": {"b": 1.5}})),
    ];
    for (comment, expected) in cases {
      let (example, rest) = extract_example(comment).unwrap();
      assert_eq!(example, Some(expected), "for {comment:?}");
      assert!(rest.is_empty());
    }
  }

  #[test]
  fn test_blank_lines_dropped_and_order_kept() {
    let (example, comment) = extract_example("  First line.  \n\n\nexample: 1\n  Second line.\n").unwrap();
    assert_eq!(example, Some(json!(1)));
    assert_eq!(comment, "First line.\nSecond line.");
  }

  #[test]
  fn test_first_example_wins() {
    let (example, comment) = extract_example("Doc.\nexample: 1\nexample: 2").unwrap();
    assert_eq!(example, Some(json!(1)));
    assert_eq!(comment, "Doc.");
  }

  #[test]
  fn test_invalid_example_fails() {
    assert!(extract_example("Doc.\nexample: {not json").is_err());
  }

  #[test]
  fn test_marker_must_lead_the_line() {
    let (example, comment) = extract_example("See the example: below.").unwrap();
    assert_eq!(example, None);
    assert_eq!(comment, "See the example: below.");
  }

  #[test]
  fn test_clean_comment() {
    assert_eq!(clean_comment("\n  Orders placed.\n"), "Orders placed.");
    assert_eq!(clean_comment(""), "");
  }
}

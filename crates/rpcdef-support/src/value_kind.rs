use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Language-neutral classification of a field or method type.
///
/// Generators map these onto their own primitives. A type with no kind (`None` on
/// [`FieldType::js_type`](crate::FieldType::js_type)) is a primitive the extractor does
/// not know how to translate.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
  String,
  Boolean,
  Number,
  Object,
  Any,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn test_display_matches_serde() {
    for kind in [
      ValueKind::String,
      ValueKind::Boolean,
      ValueKind::Number,
      ValueKind::Object,
      ValueKind::Any,
    ] {
      let json = serde_json::to_string(&kind).unwrap();
      assert_eq!(json, format!("\"{kind}\""));
      assert_eq!(ValueKind::from_str(&kind.to_string()).unwrap(), kind);
    }
  }
}

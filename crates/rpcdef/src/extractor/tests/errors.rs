use std::{error::Error, path::Path};

use super::{extract_err, source};
use crate::extractor::{ExtractError, TagError};

const CALC: &str = "pub trait Calc { fn add(&self, a: AddRequest, b: AddRequest) -> AddResponse; }
pub struct AddRequest { pub a: i32 }
pub struct AddResponse { pub sum: i32 }
";

#[test]
fn test_two_parameters_fail() {
  let err = extract_err(&source("calc", CALC));
  let ExtractError::InvalidMethodSignature {
    service,
    method,
    position,
  } = &err
  else {
    panic!("expected signature error, got {err:?}");
  };
  assert_eq!(service, "Calc");
  assert_eq!(method, "add");
  assert_eq!(position.file, Path::new("calc.rs"));
  assert_eq!((position.line, position.column), (1, 21));
  assert_eq!(
    err.to_string(),
    "calc.rs:1:21: invalid method signature: expected Method(MethodRequest) MethodResponse"
  );
}

#[test]
fn test_missing_request_or_response_fails() {
  for method in [
    "fn ping(&self, request: AddRequest);",
    "fn ping(&self, request: AddRequest) -> ();",
    "fn ping(&self) -> AddResponse;",
    "fn ping(&self, request: AddRequest) -> (AddResponse, AddResponse);",
  ] {
    let text = format!(
      "pub trait Ping {{ {method} }}\npub struct AddRequest {{ pub a: i32 }}\npub struct AddResponse {{ pub sum: i32 }}\n"
    );
    let err = extract_err(&source("ping", &text));
    assert!(
      matches!(err, ExtractError::InvalidMethodSignature { .. }),
      "{method}: {err:?}"
    );
  }
}

#[test]
fn test_response_must_be_a_struct() {
  let modules = source(
    "wrap",
    r"
pub trait Wrap {
  fn wrap(&self, request: WrapRequest) -> Wrapped;
}
pub struct WrapRequest { pub value: i32 }
pub struct Wrapped(pub i32);
",
  );
  let err = extract_err(&modules);
  assert_eq!(err.to_string(), "parse output object type");
  let ExtractError::NotARecord { name, position } = err.innermost() else {
    panic!("expected record error, got {err:?}");
  };
  assert_eq!(name, "Wrapped");
  assert_eq!(position.line, 6);
  assert!(err.source().unwrap().to_string().ends_with("Wrapped must be a struct"));
}

#[test]
fn test_request_must_be_a_struct() {
  let modules = source(
    "kinds",
    r"
pub trait Kinds {
  fn pick(&self, request: Kind) -> PickResponse;
}
pub enum Kind { A, B }
pub struct PickResponse { pub kind: Kind }
",
  );
  let err = extract_err(&modules);
  assert_eq!(err.to_string(), "parse input object type");
  assert!(matches!(err.innermost(), ExtractError::NotARecord { name, .. } if name == "Kind"));
}

#[test]
fn test_enum_fields_are_plain_types() {
  let modules = source(
    "kinds",
    r"
pub struct PickResponse { pub kind: Kind }
pub enum Kind { A, B }
",
  );
  let (definition, _) = super::extract(&modules);
  let kind = &definition.object("kinds.PickResponse").unwrap().field("kind").unwrap().ty;
  assert!(!kind.is_object);
  assert_eq!(kind.type_name, "Kind");
  assert_eq!(kind.js_type, None);
}

#[test]
fn test_private_field_fails() {
  let modules = source(
    "secretive",
    "pub struct Secretive {\n  pub shown: String,\n  hidden: String,\n}\n",
  );
  let err = extract_err(&modules);
  assert_eq!(err.to_string(), "secretive.rs:3:3: hidden must be exported");
  let ExtractError::UnexportedField { object, field, .. } = &err else {
    panic!("expected visibility error, got {err:?}");
  };
  assert_eq!(object, "Secretive");
  assert_eq!(field, "hidden");
}

#[test]
fn test_crate_visible_field_is_not_exported() {
  let modules = source("vis", "pub struct Vis {\n  pub(crate) inner: String,\n}\n");
  assert!(matches!(extract_err(&modules), ExtractError::UnexportedField { .. }));
}

#[test]
fn test_nested_failure_is_wrapped_with_field_context() {
  let modules = source(
    "outer",
    r"
pub struct Envelope { pub inner: Sealed }
pub struct Sealed { secret: String }
",
  );
  let err = extract_err(&modules);
  assert_eq!(err.to_string(), "parse type");
  assert!(matches!(err.innermost(), ExtractError::UnexportedField { field, .. } if field == "secret"));
  assert_eq!(err.position().unwrap().line, 3);
}

#[test]
fn test_malformed_tag_fails() {
  let modules = source(
    "tagged",
    "pub struct Tagged {\n  #[tag = \"json:name\"]\n  pub name: String,\n}\n",
  );
  let err = extract_err(&modules);
  let ExtractError::Tag { object, field, source, .. } = &err else {
    panic!("expected tag error, got {err:?}");
  };
  assert_eq!(object, "Tagged");
  assert_eq!(field, "name");
  assert_eq!(source, &TagError::ValueSyntax { key: "json".to_string() });
  assert!(err.to_string().ends_with("Tagged.name: parse field tag"));
}

#[test]
fn test_malformed_example_fails() {
  let modules = source(
    "sample",
    "pub struct Sample {\n  /// Count.\n  /// example: {oops\n  pub count: u32,\n}\n",
  );
  let err = extract_err(&modules);
  assert!(matches!(err, ExtractError::Example { .. }), "{err:?}");
  assert!(err.to_string().ends_with("Sample.count: extract comment example"));
  assert!(err.source().is_some());
}

#[test]
fn test_error_in_excluded_service_still_fails() {
  let text = CALC.replace("Calc", "Internal");
  let modules = source("calc", &text);
  let config = crate::extractor::ExtractConfig::builder()
    .exclude_services(vec!["Internal".to_string()])
    .build();
  let err = crate::extractor::Orchestrator::new(&modules, config).extract().unwrap_err();
  assert!(matches!(err, ExtractError::InvalidMethodSignature { .. }));
}

use serde_json::json;

use super::{extract, graph, greeter, shop};
use crate::source::{Declaration, FieldDecl, MethodDecl, Module, ModuleSet, Shape, SourceUnit, TypeExpr};

#[test]
fn test_runs_serialize_identically() {
  for load in [greeter, graph, shop] {
    let (first, _) = extract(&load());
    let (second, _) = extract(&load());
    assert_eq!(
      serde_json::to_string_pretty(&first).unwrap(),
      serde_json::to_string_pretty(&second).unwrap()
    );
  }
}

#[test]
fn test_empty_module_set() {
  let (definition, stats) = extract(&ModuleSet::new());
  assert!(definition.services.is_empty());
  assert!(definition.objects.is_empty());
  assert!(definition.module_name.is_empty());
  assert_eq!(stats.objects, 0);
}

#[test]
fn test_module_name_is_outermost_root() {
  let modules = ModuleSet::parse(&[
    SourceUnit::new("app::api", "api.rs", "pub struct A { pub n: u8 }\n"),
    SourceUnit::new("app", "lib.rs", "pub mod models { pub struct B { pub n: u8 } }\n"),
  ])
  .unwrap();
  let (definition, _) = extract(&modules);
  assert_eq!(definition.module_name, "app");
}

#[test]
fn test_hand_built_module_set() {
  let module = Module::new("api::v1")
    .with(
      Declaration::new(
        "Echo",
        Shape::Interface(vec![
          MethodDecl::new(
            "Call",
            vec![TypeExpr::named("api::v1", "Ping")],
            vec![TypeExpr::named("api::v1", "Pong")],
          )
          .with_comment("Call echoes a ping."),
        ]),
      )
      .with_comment("Echo service."),
    )
    .with(Declaration::new(
      "Ping",
      Shape::Record(vec![
        FieldDecl::new("id", TypeExpr::primitive("u64")).with_tag(r#"json:"id,omitempty""#),
      ]),
    ))
    .with(Declaration::new(
      "Pong",
      Shape::Record(vec![
        FieldDecl::new("note", TypeExpr::optional(TypeExpr::primitive("String")))
          .with_comment("A note.\nexample: \"hi\""),
      ]),
    ))
    .with(Declaration::new("Draft", Shape::Record(vec![])).private());

  let mut modules = ModuleSet::new();
  modules.insert(module, true);

  let (definition, _) = extract(&modules);
  assert_eq!(definition.module_name, "v1");
  assert!(definition.object("api::v1.Draft").is_none());

  let call = definition.service("Echo").unwrap().method("Call").unwrap();
  assert_eq!(call.name_lower_camel, "call");
  assert_eq!(call.comment, "Call echoes a ping.");

  let ping = definition.object("api::v1.Ping").unwrap();
  assert!(ping.field("id").unwrap().omit_empty);

  let note = definition.object("api::v1.Pong").unwrap().field("note").unwrap();
  assert_eq!(note.example, Some(json!("hi")));
  assert_eq!(note.comment, "A note.");
  assert!(note.ty.optional);
}

#[test]
fn test_serialized_shape() {
  let (definition, _) = extract(&greeter());
  let value = serde_json::to_value(&definition).unwrap();

  assert_eq!(value["moduleName"], "greeter");
  assert_eq!(value["services"][0]["name"], "Admin");
  assert_eq!(value["services"][0]["methods"][0]["nameLowerCamel"], "reset_all");
  assert_eq!(
    value["services"][0]["methods"][0]["inputObject"]["typeID"],
    "greeter.ResetRequest"
  );

  let request = value["objects"]
    .as_array()
    .unwrap()
    .iter()
    .find(|object| object["name"] == "GreetRequest")
    .unwrap();
  let name = &request["fields"][0];
  assert_eq!(name["type"]["jsType"], "string");
  assert_eq!(name["parsedTags"]["json"]["value"], "name");
  assert_eq!(name["example"], "Mat");
  assert_eq!(name["omitEmpty"], false);
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ValueKind;

/// Root of an extracted RPC definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
  /// Name of the module the services were declared in.
  pub module_name: String,
  /// Services sorted by name.
  pub services: Vec<Service>,
  /// Every object referenced by a service or declared alongside them, in the order
  /// they were first encountered.
  pub objects: Vec<Object>,
  /// Foreign module paths referenced by field and method types, mapped to the short
  /// alias used in [`FieldType::type_name`].
  pub imports: BTreeMap<String, String>,
}

impl Definition {
  /// Looks up an object by its qualified identity.
  #[must_use]
  pub fn object(&self, type_id: &str) -> Option<&Object> {
    self.objects.iter().find(|object| object.type_id == type_id)
  }

  pub fn object_mut(&mut self, type_id: &str) -> Option<&mut Object> {
    self.objects.iter_mut().find(|object| object.type_id == type_id)
  }

  #[must_use]
  pub fn service(&self, name: &str) -> Option<&Service> {
    self.services.iter().find(|service| service.name == name)
  }
}

/// A group of methods, extracted from a public trait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
  pub name: String,
  pub methods: Vec<Method>,
  pub comment: String,
}

impl Service {
  #[must_use]
  pub fn method(&self, name: &str) -> Option<&Method> {
    self.methods.iter().find(|method| method.name == name)
  }
}

/// A single request/response operation of a [`Service`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
  pub name: String,
  pub name_lower_camel: String,
  pub input_object: FieldType,
  pub output_object: FieldType,
  pub comment: String,
}

/// A record type used somewhere in the definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
  /// Qualified identity, `<module path>.<name>`.
  #[serde(rename = "typeID")]
  pub type_id: String,
  pub name: String,
  /// Set when the record lives in a module other than the one being extracted.
  pub imported: bool,
  pub fields: Vec<Field>,
  pub comment: String,
}

impl Object {
  #[must_use]
  pub fn field(&self, name: &str) -> Option<&Field> {
    self.fields.iter().find(|field| field.name == name)
  }
}

/// A named member of an [`Object`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
  pub name: String,
  pub name_lower_camel: String,
  #[serde(rename = "type")]
  pub ty: FieldType,
  pub omit_empty: bool,
  /// Documentation with the `example:` line removed.
  pub comment: String,
  /// The raw tag string as written on the field.
  pub tag: String,
  pub parsed_tags: BTreeMap<String, FieldTag>,
  /// Example value decoded from the field documentation.
  pub example: Option<serde_json::Value>,
}

/// One `key:"value,option,..."` entry of a field tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTag {
  pub value: String,
  pub options: Vec<String>,
}

impl FieldTag {
  #[must_use]
  pub fn has_option(&self, option: &str) -> bool {
    self.options.iter().any(|o| o == option)
  }
}

/// Summary of the type held by a field, or taken/returned by a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldType {
  /// Qualified identity, `<module path>.<object name>`.
  #[serde(rename = "typeID")]
  pub type_id: String,
  /// Type name as it would be written from the extracted module, e.g. `shared::Page`.
  pub type_name: String,
  /// Type name without any module prefix.
  pub object_name: String,
  pub object_name_lower_camel: String,
  /// The field holds zero or more values of this type.
  pub multiple: bool,
  /// The field type was wrapped in `Option`.
  pub optional: bool,
  /// Path of the foreign module owning the type, empty for local types.
  pub package: String,
  /// The type resolved to an object in [`Definition::objects`].
  pub is_object: bool,
  pub js_type: Option<ValueKind>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Definition {
    Definition {
      module_name: "greeter".to_string(),
      services: vec![Service {
        name: "GreeterService".to_string(),
        methods: vec![Method {
          name: "Greet".to_string(),
          name_lower_camel: "greet".to_string(),
          ..Default::default()
        }],
        comment: String::new(),
      }],
      objects: vec![Object {
        type_id: "greeter.GreetRequest".to_string(),
        name: "GreetRequest".to_string(),
        fields: vec![Field {
          name: "Name".to_string(),
          name_lower_camel: "name".to_string(),
          ty: FieldType {
            type_name: "String".to_string(),
            js_type: Some(ValueKind::String),
            ..Default::default()
          },
          example: Some(serde_json::json!("Mat")),
          ..Default::default()
        }],
        ..Default::default()
      }],
      imports: BTreeMap::new(),
    }
  }

  #[test]
  fn test_lookups() {
    let def = sample();
    assert!(def.object("greeter.GreetRequest").is_some());
    assert!(def.object("other.GreetRequest").is_none());
    let service = def.service("GreeterService").unwrap();
    assert_eq!(service.method("Greet").unwrap().name_lower_camel, "greet");
    assert!(def.objects[0].field("Name").is_some());
  }

  #[test]
  fn test_serializes_camel_case() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["moduleName"], "greeter");
    let field = &json["objects"][0]["fields"][0];
    assert_eq!(field["nameLowerCamel"], "name");
    assert_eq!(field["type"]["jsType"], "string");
    assert_eq!(field["type"]["typeID"], "");
    assert_eq!(field["example"], "Mat");
    assert_eq!(json["services"][0]["methods"][0]["inputObject"]["isObject"], false);
  }

  #[test]
  fn test_deserializes_what_it_serializes() {
    let def = sample();
    let json = serde_json::to_string(&def).unwrap();
    let back: Definition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, def);
  }

  #[test]
  fn test_field_tag_options() {
    let tag = FieldTag {
      value: "id".to_string(),
      options: vec!["omitempty".to_string()],
    };
    assert!(tag.has_option("omitempty"));
    assert!(!tag.has_option("string"));
  }
}

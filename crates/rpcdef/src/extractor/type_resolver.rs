use std::{collections::HashMap, sync::LazyLock};

use rpcdef_support::{FieldType, ValueKind};

use crate::{
  extractor::{ExtractResult, naming::lower_camel, walker::SchemaWalker},
  source::{Shape, TypeExpr},
};

/// Value kinds of rendered type names that are not objects.
static VALUE_KINDS: LazyLock<HashMap<&str, ValueKind>> = LazyLock::new(|| {
  let strings = ["String", "str", "char"].map(|name| (name, ValueKind::String));
  let numbers = [
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32", "f64",
  ]
  .map(|name| (name, ValueKind::Number));
  let maps = [
    "HashMap<String, serde_json::Value>",
    "BTreeMap<String, serde_json::Value>",
    "IndexMap<String, serde_json::Value>",
    "serde_json::Map<String, serde_json::Value>",
  ]
  .map(|name| (name, ValueKind::Object));

  strings
    .into_iter()
    .chain(numbers)
    .chain(maps)
    .chain([("bool", ValueKind::Boolean), ("serde_json::Value", ValueKind::Any)])
    .collect()
});

pub(crate) fn value_kind(type_name: &str) -> Option<ValueKind> {
  VALUE_KINDS.get(type_name).copied()
}

/// Short alias a foreign module is imported under.
pub(crate) fn module_alias(module_path: &str) -> &str {
  module_path.rsplit("::").next().unwrap_or(module_path)
}

impl SchemaWalker<'_> {
  /// Summarises a type reference as seen from the `walked` module.
  ///
  /// One level each of sequence and option is peeled off. A reference to a struct
  /// with named fields builds that object first. Types owned by another module are
  /// rendered as `alias::Name` and their module is recorded in the imports.
  pub(crate) fn resolve_type(&mut self, ty: &TypeExpr, walked: &str) -> ExtractResult<FieldType> {
    let mut field_type = FieldType::default();
    let mut inner = ty;
    loop {
      match inner {
        TypeExpr::Sequence(element) if !field_type.multiple => {
          field_type.multiple = true;
          inner = element;
        }
        TypeExpr::Optional(element) if !field_type.optional => {
          field_type.optional = true;
          inner = element;
        }
        _ => break,
      }
    }

    let modules = self.modules;
    if let TypeExpr::Named(named) = inner
      && let Some(declaration) = modules.declaration(named)
      && matches!(declaration.shape, Shape::Record(_))
    {
      self.build_object(walked, &named.module, declaration)?;
      field_type.is_object = true;
    }

    let mut package = None;
    let imports = &mut self.definition.imports;
    field_type.type_name = inner.render(&mut |module: &str| {
      if module == walked {
        return None;
      }
      let alias = module_alias(module).to_string();
      imports.insert(module.to_string(), alias.clone());
      package = Some(module.to_string());
      Some(alias)
    });

    field_type.object_name = inner.render_bare();
    field_type.object_name_lower_camel = lower_camel(&field_type.object_name);
    field_type.type_id = format!("{}.{}", package.as_deref().unwrap_or(walked), field_type.object_name);
    field_type.package = package.unwrap_or_default();
    field_type.js_type = if field_type.is_object {
      Some(ValueKind::Object)
    } else {
      value_kind(&field_type.type_name)
    };

    Ok(field_type)
  }
}

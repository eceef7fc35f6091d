use rpcdef_support::{Field, Object};

use crate::{
  extractor::{
    ExtractError, ExtractResult, JSON_TAG_KEY, OMIT_EMPTY_OPTION,
    documentation::{clean_comment, extract_example},
    error::WrapExt,
    metadata::parse_tags,
    naming::lower_camel,
    walker::SchemaWalker,
  },
  source::{Declaration, FieldDecl, Shape},
};

impl SchemaWalker<'_> {
  /// Adds the object for a record declared in module `owner`, unless it is already
  /// in the definition.
  ///
  /// The object takes its slot in the definition before any field is resolved, so a
  /// field that leads back to it finds it already seen.
  pub(super) fn build_object(&mut self, walked: &str, owner: &str, declaration: &Declaration) -> ExtractResult<()> {
    let Shape::Record(fields) = &declaration.shape else {
      return Err(ExtractError::NotARecord {
        name: declaration.name.clone(),
        position: declaration.position.clone(),
      });
    };

    let type_id = format!("{owner}.{}", declaration.name);
    if !self.seen_objects.insert(type_id.clone()) {
      return Ok(());
    }

    let slot = self.definition.objects.len();
    self.definition.objects.push(Object {
      type_id,
      name: declaration.name.clone(),
      imported: owner != walked,
      fields: Vec::new(),
      comment: clean_comment(&declaration.comment),
    });

    let fields = fields
      .iter()
      .map(|field| self.build_field(walked, &declaration.name, field))
      .collect::<ExtractResult<Vec<_>>>()?;
    self.definition.objects[slot].fields = fields;
    Ok(())
  }

  fn build_field(&mut self, walked: &str, object: &str, field: &FieldDecl) -> ExtractResult<Field> {
    if !field.exported {
      return Err(ExtractError::UnexportedField {
        object: object.to_string(),
        field: field.name.clone(),
        position: field.position.clone(),
      });
    }

    let (example, comment) = extract_example(&field.comment).map_err(|source| ExtractError::Example {
      object: object.to_string(),
      field: field.name.clone(),
      position: field.position.clone(),
      source,
    })?;

    let ty = self.resolve_type(&field.ty, walked).wrap("parse type")?;

    let parsed_tags = parse_tags(&field.tag).map_err(|source| ExtractError::Tag {
      object: object.to_string(),
      field: field.name.clone(),
      position: field.position.clone(),
      source,
    })?;
    let omit_empty = parsed_tags
      .get(JSON_TAG_KEY)
      .is_some_and(|tag| tag.has_option(OMIT_EMPTY_OPTION));

    Ok(Field {
      name: field.name.clone(),
      name_lower_camel: lower_camel(&field.name),
      ty,
      omit_empty,
      comment,
      tag: field.tag.clone(),
      parsed_tags,
      example,
    })
  }
}

use rpcdef_support::{FieldType, Method, Service};

use crate::{
  extractor::{
    ExtractError, ExtractResult, documentation::clean_comment, error::WrapExt, naming::lower_camel,
    walker::SchemaWalker,
  },
  source::{Declaration, MethodDecl, Shape, TypeExpr},
};

impl SchemaWalker<'_> {
  pub(super) fn build_service(
    &mut self,
    walked: &str,
    declaration: &Declaration,
    methods: &[MethodDecl],
  ) -> ExtractResult<Service> {
    let methods = methods
      .iter()
      .map(|method| self.build_method(walked, &declaration.name, method))
      .collect::<ExtractResult<Vec<_>>>()?;

    Ok(Service {
      name: declaration.name.clone(),
      methods,
      comment: clean_comment(&declaration.comment),
    })
  }

  /// A method takes exactly one request and returns exactly one response.
  fn build_method(&mut self, walked: &str, service: &str, method: &MethodDecl) -> ExtractResult<Method> {
    let invalid_signature = || ExtractError::InvalidMethodSignature {
      service: service.to_string(),
      method: method.name.clone(),
      position: method.position.clone(),
    };

    let [input] = method.params.as_slice() else {
      return Err(invalid_signature());
    };
    let input_object = self.resolve_contract_type(input, walked).wrap("parse input object type")?;

    let [output] = method.results.as_slice() else {
      return Err(invalid_signature());
    };
    let output_object = self.resolve_contract_type(output, walked).wrap("parse output object type")?;
    self.response_objects.insert(output_object.type_id.clone());

    Ok(Method {
      name: method.name.clone(),
      name_lower_camel: lower_camel(&method.name),
      input_object,
      output_object,
      comment: clean_comment(&method.comment),
    })
  }

  /// Requests and responses that name a loaded declaration must name a struct with
  /// named fields.
  fn resolve_contract_type(&mut self, ty: &TypeExpr, walked: &str) -> ExtractResult<FieldType> {
    if let TypeExpr::Named(named) = ty
      && let Some(declaration) = self.modules.declaration(named)
      && !matches!(declaration.shape, Shape::Record(_))
    {
      return Err(ExtractError::NotARecord {
        name: declaration.name.clone(),
        position: declaration.position.clone(),
      });
    }
    self.resolve_type(ty, walked)
  }
}

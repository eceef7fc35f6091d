use crate::{extractor::metadata::TagError, source::Position};

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Everything that aborts an extraction. There is no partial result: the first error
/// ends the walk.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
  #[error("{position}: invalid method signature: expected Method(MethodRequest) MethodResponse")]
  InvalidMethodSignature {
    service: String,
    method: String,
    position: Position,
  },
  #[error("{position}: {field} must be exported")]
  UnexportedField {
    object: String,
    field: String,
    position: Position,
  },
  #[error("{position}: {name} must be a struct")]
  NotARecord { name: String, position: Position },
  #[error("{position}: {object}.{field}: parse field tag")]
  Tag {
    object: String,
    field: String,
    position: Position,
    #[source]
    source: TagError,
  },
  #[error("{position}: {object}.{field}: extract comment example")]
  Example {
    object: String,
    field: String,
    position: Position,
    #[source]
    source: serde_json::Error,
  },
  #[error("{context}")]
  Context {
    context: &'static str,
    #[source]
    source: Box<ExtractError>,
  },
}

impl ExtractError {
  #[must_use]
  pub fn wrap(self, context: &'static str) -> Self {
    Self::Context {
      context,
      source: Box::new(self),
    }
  }

  /// The error underneath every layer of context.
  #[must_use]
  pub fn innermost(&self) -> &Self {
    match self {
      Self::Context { source, .. } => source.innermost(),
      other => other,
    }
  }

  /// Source position of the offending declaration, if the error carries one.
  #[must_use]
  pub fn position(&self) -> Option<&Position> {
    match self.innermost() {
      Self::InvalidMethodSignature { position, .. }
      | Self::UnexportedField { position, .. }
      | Self::NotARecord { position, .. }
      | Self::Tag { position, .. }
      | Self::Example { position, .. } => Some(position),
      Self::Context { .. } => None,
    }
  }
}

pub(crate) trait WrapExt<T> {
  fn wrap(self, context: &'static str) -> ExtractResult<T>;
}

impl<T> WrapExt<T> for ExtractResult<T> {
  fn wrap(self, context: &'static str) -> ExtractResult<T> {
    self.map_err(|err| err.wrap(context))
  }
}

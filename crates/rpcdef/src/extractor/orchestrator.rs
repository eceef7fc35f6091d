//! Extraction pipeline from a loaded [`ModuleSet`] to a [`Definition`].
//!
//! ```no_run
//! use rpcdef::{
//!   extractor::{ExtractConfig, Orchestrator},
//!   source::ModuleLoader,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let modules = ModuleLoader::new(["src/api"]).load().await?;
//! let config = ExtractConfig::builder().exclude_services(vec!["Internal".to_string()]).build();
//! let (definition, stats) = Orchestrator::new(&modules, config).extract()?;
//! println!("{} services, {} objects", stats.services, stats.objects);
//! # Ok(())
//! # }
//! ```

use indexmap::IndexSet;
use rpcdef_support::{Definition, Field, FieldType, ValueKind};

use crate::{
  extractor::{
    ERROR_FIELD_COMMENT, ERROR_FIELD_NAME, ERROR_FIELD_NAME_LOWER_CAMEL, ExtractConfig, ExtractResult, ExtractStats,
    pruning::{detect_cycles, prune},
    walker::SchemaWalker,
  },
  source::ModuleSet,
};

/// Runs the extraction over a loaded module set.
pub struct Orchestrator<'a> {
  modules: &'a ModuleSet,
  config: ExtractConfig,
}

impl<'a> Orchestrator<'a> {
  #[must_use]
  pub fn new(modules: &'a ModuleSet, config: ExtractConfig) -> Self {
    Self { modules, config }
  }

  /// Extracts the definition.
  ///
  /// 1. Walks every exported declaration of the root modules
  /// 2. Removes the objects of excluded services
  /// 3. Sorts services by name
  /// 4. Adds the `Error` field to every response object
  ///
  /// # Errors
  ///
  /// Fails on the first method without exactly one request and one response, private
  /// field, malformed tag or malformed example. Nothing is returned in that case.
  pub fn extract(&self) -> ExtractResult<(Definition, ExtractStats)> {
    let mut walker = SchemaWalker::new(self.modules, &self.config);
    walker.walk()?;
    let SchemaWalker {
      mut definition,
      excluded_objects,
      response_objects,
      mut stats,
      ..
    } = walker;

    stats.record_pruned(prune(&mut definition, &excluded_objects, self.config.prune_mode));
    definition.services.sort_by(|a, b| a.name.cmp(&b.name));
    add_error_fields(&mut definition, &response_objects);
    definition.module_name = self.module_name();

    stats.record_cycles(detect_cycles(&definition));
    stats.record_definition(&definition);
    Ok((definition, stats))
  }

  /// Name of the outermost root module. The first one loaded wins a tie.
  fn module_name(&self) -> String {
    self
      .modules
      .roots()
      .min_by_key(|module| module.path.matches("::").count())
      .map(|module| module.name.clone())
      .unwrap_or_default()
  }
}

fn error_field() -> Field {
  Field {
    name: ERROR_FIELD_NAME.to_string(),
    name_lower_camel: ERROR_FIELD_NAME_LOWER_CAMEL.to_string(),
    ty: FieldType {
      type_name: "String".to_string(),
      js_type: Some(ValueKind::String),
      ..Default::default()
    },
    omit_empty: true,
    comment: ERROR_FIELD_COMMENT.to_string(),
    ..Default::default()
  }
}

/// Response objects that were pruned are skipped, as are ones already carrying a
/// field that serializes as `error`.
fn add_error_fields(definition: &mut Definition, response_objects: &IndexSet<String>) {
  for type_id in response_objects {
    let Some(object) = definition.object_mut(type_id) else {
      continue;
    };
    let declared = object
      .fields
      .iter()
      .any(|field| field.name_lower_camel == ERROR_FIELD_NAME_LOWER_CAMEL);
    if !declared {
      object.fields.push(error_field());
    }
  }
}

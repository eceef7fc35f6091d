use std::collections::{BTreeSet, HashSet};

use indexmap::IndexSet;
use rpcdef_support::Definition;

use crate::{
  extractor::{ExtractConfig, ExtractResult, ExtractStats},
  source::{Declaration, MethodDecl, ModuleSet, Shape},
};

/// State of one walk over a [`ModuleSet`].
///
/// Objects are registered in `seen_objects` before their fields are resolved, which
/// is what stops the recursion on cyclic record graphs.
pub(crate) struct SchemaWalker<'a> {
  pub(super) modules: &'a ModuleSet,
  pub(super) config: &'a ExtractConfig,
  pub(super) definition: Definition,
  pub(super) seen_objects: HashSet<String>,
  /// Input and output type ids of excluded services.
  pub(super) excluded_objects: BTreeSet<String>,
  /// Output type ids of every method walked, in first-seen order.
  pub(super) response_objects: IndexSet<String>,
  pub(super) stats: ExtractStats,
}

impl<'a> SchemaWalker<'a> {
  pub(crate) fn new(modules: &'a ModuleSet, config: &'a ExtractConfig) -> Self {
    Self {
      modules,
      config,
      definition: Definition::default(),
      seen_objects: HashSet::new(),
      excluded_objects: BTreeSet::new(),
      response_objects: IndexSet::new(),
      stats: ExtractStats::default(),
    }
  }

  /// Visits every exported declaration of the root modules: modules in load order,
  /// declarations in name order.
  pub(crate) fn walk(&mut self) -> ExtractResult<()> {
    let modules = self.modules;
    for module in modules.roots() {
      for declaration in module.declarations.values().filter(|declaration| declaration.exported) {
        match &declaration.shape {
          Shape::Interface(methods) => self.visit_service(&module.path, declaration, methods)?,
          Shape::Record(_) => self.build_object(&module.path, &module.path, declaration)?,
          Shape::Sequence(_) | Shape::Named(_) | Shape::Opaque => {}
        }
      }
    }
    Ok(())
  }

  /// Builds the service, then either keeps it or records its objects for pruning.
  fn visit_service(&mut self, walked: &str, declaration: &Declaration, methods: &[MethodDecl]) -> ExtractResult<()> {
    let service = self.build_service(walked, declaration, methods)?;
    let excluded = self.config.is_excluded(&service.name);
    self.stats.record_service(&service.name, excluded);

    if excluded {
      for method in &service.methods {
        self.excluded_objects.insert(method.input_object.type_id.clone());
        self.excluded_objects.insert(method.output_object.type_id.clone());
      }
      return Ok(());
    }

    self.definition.services.push(service);
    Ok(())
  }
}

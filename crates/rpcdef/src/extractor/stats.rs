use rpcdef_support::Definition;

/// Counters gathered while extracting a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
  /// Every service walked, excluded ones included, in discovery order.
  pub services_discovered: Vec<String>,
  pub services_excluded: Vec<String>,
  pub services: usize,
  pub methods: usize,
  pub objects: usize,
  /// Type ids of the objects removed because only excluded services used them.
  pub pruned_objects: Vec<String>,
  pub imports: usize,
  /// Groups of objects that reference each other.
  pub cycles: Vec<Vec<String>>,
}

impl ExtractStats {
  pub fn record_service(&mut self, name: &str, excluded: bool) {
    self.services_discovered.push(name.to_string());
    if excluded {
      self.services_excluded.push(name.to_string());
    }
  }

  pub fn record_pruned(&mut self, type_ids: impl IntoIterator<Item = String>) {
    self.pruned_objects.extend(type_ids);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    self.cycles.extend(cycles);
  }

  /// Takes the final counts from the finished definition.
  pub fn record_definition(&mut self, definition: &Definition) {
    self.services = definition.services.len();
    self.methods = definition.services.iter().map(|service| service.methods.len()).sum();
    self.objects = definition.objects.len();
    self.imports = definition.imports.len();
  }
}

mod errors;
mod orchestrator;

use rpcdef_support::{Definition, Object};

use crate::{
  extractor::{ExtractConfig, ExtractError, ExtractStats, Orchestrator},
  source::{ModuleSet, SourceUnit},
};

pub(super) const GREETER: &str = include_str!("../../../fixtures/greeter.rs");
pub(super) const GRAPH: &str = include_str!("../../../fixtures/graph.rs");
pub(super) const SHOP_ORDERS: &str = include_str!("../../../fixtures/shop/orders.rs");
pub(super) const SHOP_SHARED: &str = include_str!("../../../fixtures/shop/shared.rs");

pub(super) fn greeter() -> ModuleSet {
  ModuleSet::parse(&[SourceUnit::new("greeter", "greeter.rs", GREETER)]).expect("greeter fixture parses")
}

pub(super) fn graph() -> ModuleSet {
  ModuleSet::parse(&[SourceUnit::new("graph", "graph.rs", GRAPH)]).expect("graph fixture parses")
}

pub(super) fn shop() -> ModuleSet {
  ModuleSet::parse(&[
    SourceUnit::new("shop::orders", "orders.rs", SHOP_ORDERS),
    SourceUnit::new("shop::shared", "shared.rs", SHOP_SHARED).support(),
  ])
  .expect("shop fixture parses")
}

pub(super) fn source(module: &str, text: &str) -> ModuleSet {
  ModuleSet::parse(&[SourceUnit::new(module, format!("{module}.rs"), text)]).expect("inline source parses")
}

pub(super) fn extract(modules: &ModuleSet) -> (Definition, ExtractStats) {
  extract_with(modules, ExtractConfig::default())
}

pub(super) fn extract_with(modules: &ModuleSet, config: ExtractConfig) -> (Definition, ExtractStats) {
  Orchestrator::new(modules, config).extract().expect("extraction succeeds")
}

pub(super) fn extract_err(modules: &ModuleSet) -> ExtractError {
  Orchestrator::new(modules, ExtractConfig::default())
    .extract()
    .expect_err("extraction fails")
}

pub(super) fn object<'a>(definition: &'a Definition, type_id: &str) -> &'a Object {
  definition
    .object(type_id)
    .unwrap_or_else(|| panic!("object {type_id} missing"))
}

pub(super) fn object_ids(definition: &Definition) -> Vec<&str> {
  definition.objects.iter().map(|object| object.type_id.as_str()).collect()
}

use bon::Builder;
use strum::{Display, EnumString};

/// How objects used by excluded services are removed after the walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PruneMode {
  /// Remove every input/output object of an excluded service, even when a retained
  /// service still uses it.
  Identity,
  /// Remove an excluded service's input/output objects unless they are still
  /// reachable from a retained service.
  #[default]
  Reachability,
}

/// Options for a single extraction.
#[derive(Debug, Clone, Default, Builder)]
pub struct ExtractConfig {
  /// Trait names that are walked but left out of the definition.
  #[builder(default, into)]
  pub exclude_services: Vec<String>,
  #[builder(default)]
  pub prune_mode: PruneMode,
}

impl ExtractConfig {
  #[must_use]
  pub fn is_excluded(&self, service: &str) -> bool {
    self.exclude_services.iter().any(|name| name == service)
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn test_builder_defaults() {
    let config = ExtractConfig::builder().build();
    assert!(config.exclude_services.is_empty());
    assert_eq!(config.prune_mode, PruneMode::Reachability);
    assert!(!config.is_excluded("Internal"));
  }

  #[test]
  fn test_exclusion_is_exact() {
    let config = ExtractConfig::builder()
      .exclude_services(vec!["Internal".to_string()])
      .prune_mode(PruneMode::Identity)
      .build();
    assert!(config.is_excluded("Internal"));
    assert!(!config.is_excluded("internal"));
    assert!(!config.is_excluded("InternalService"));
  }

  #[test]
  fn test_prune_mode_strings() {
    assert_eq!(PruneMode::Identity.to_string(), "identity");
    assert_eq!(PruneMode::from_str("reachability").unwrap(), PruneMode::Reachability);
    assert!(PruneMode::from_str("everything").is_err());
  }
}

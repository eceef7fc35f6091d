use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use itertools::Itertools;
use rpcdef::{
  extractor::{ExtractConfig, ExtractStats, Orchestrator},
  source::{ModuleLoader, ModuleSet},
};
use rpcdef_support::Definition;
use tokio::io::AsyncWriteExt;

use crate::ui::{Colors, ExtractCommand, colors::Role};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct ExtractCommandConfig {
  pub patterns: Vec<PathBuf>,
  pub includes: Vec<PathBuf>,
  /// `None` writes to stdout.
  pub output: Option<PathBuf>,
  pub compact: bool,
  pub verbose: bool,
  pub quiet: bool,
  pub extract: ExtractConfig,
}

impl ExtractCommandConfig {
  pub fn from_command(command: ExtractCommand) -> anyhow::Result<Self> {
    let ExtractCommand {
      patterns,
      output,
      exclude,
      prune,
      include,
      compact,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be used together");
    }

    let exclude = exclude
      .into_iter()
      .map(|name| name.trim().to_string())
      .filter(|name| !name.is_empty())
      .unique()
      .collect::<Vec<_>>();

    Ok(Self {
      patterns,
      includes: include,
      output,
      compact,
      verbose,
      quiet,
      extract: ExtractConfig::builder()
        .exclude_services(exclude)
        .prune_mode(prune.into())
        .build(),
    })
  }

  async fn load_modules(&self) -> anyhow::Result<ModuleSet> {
    ModuleLoader::new(&self.patterns)
      .with_includes(&self.includes)
      .load()
      .await
      .context("failed to load Rust sources")
  }

  fn render(&self, definition: &Definition) -> anyhow::Result<String> {
    let mut json = if self.compact {
      serde_json::to_string(definition)?
    } else {
      serde_json::to_string_pretty(definition)?
    };
    json.push('\n');
    Ok(json)
  }

  async fn write_output(&self, json: String) -> anyhow::Result<()> {
    let Some(output) = &self.output else {
      let mut stdout = tokio::io::stdout();
      stdout.write_all(json.as_bytes()).await?;
      stdout.flush().await?;
      return Ok(());
    };

    if let Some(parent) = output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(output, json)
      .await
      .with_context(|| format!("failed to write {}", output.display()))
  }
}

/// Progress goes to stderr so stdout stays clean for the definition.
struct ExtractLogger<'a> {
  config: &'a ExtractCommandConfig,
  colors: &'a Colors,
}

impl<'a> ExtractLogger<'a> {
  fn new(config: &'a ExtractCommandConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      eprintln!("{} {message}", format_timestamp().with(self.colors.get(Role::Timestamp)));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      eprintln!(
        "            {:<25} {}",
        label.with(self.colors.get(Role::Label)),
        value.with(self.colors.get(Role::Value))
      );
    }
  }

  fn detail(&self, label: String, value: String) {
    if self.config.verbose {
      eprintln!(
        "              {}: {}",
        label.with(self.colors.get(Role::Accent)),
        value.with(self.colors.get(Role::Object))
      );
    }
  }

  fn log_loading(&self) {
    let mut paths = self.config.patterns.iter().map(|path| path.display()).join(", ");
    if self.config.verbose && !self.config.includes.is_empty() {
      let includes = self.config.includes.iter().map(|path| path.display()).join(", ");
      paths = format!("{paths} (types from {includes})");
    }
    self.info(
      &format!("Loading Rust sources from: {paths}")
        .with(self.colors.get(Role::Primary))
        .to_string(),
    );
  }

  fn log_loaded(&self, modules: &ModuleSet) {
    if self.config.verbose {
      self.stat("Modules loaded:", modules.len().to_string());
    }
  }

  fn log_extracting(&self) {
    self.info(&"Extracting RPC definition...".with(self.colors.get(Role::Primary)).to_string());
  }

  fn print_statistics(&self, stats: &ExtractStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Services:", stats.services.to_string());
    if self.config.verbose {
      for service in &stats.services_discovered {
        let state = if stats.services_excluded.contains(service) {
          "excluded"
        } else {
          "kept"
        };
        self.detail(service.clone(), state.to_string());
      }
    }
    self.stat("Methods:", stats.methods.to_string());
    self.stat("Objects:", stats.objects.to_string());
    if stats.imports > 0 {
      self.stat("Imports:", stats.imports.to_string());
    }

    self.print_exclusions(stats);
    self.print_cycles(stats);
  }

  fn print_exclusions(&self, stats: &ExtractStats) {
    if stats.services_excluded.is_empty() {
      return;
    }

    self.stat("Services excluded:", stats.services_excluded.join(", "));
    self.stat("Objects pruned:", stats.pruned_objects.len().to_string());
    for (i, type_id) in stats.pruned_objects.iter().enumerate() {
      self.detail(format!("Pruned {}", i + 1), type_id.clone());
    }
  }

  fn print_cycles(&self, stats: &ExtractStats) {
    if stats.cycles.is_empty() {
      return;
    }

    self.stat("Cycles:", stats.cycles.len().to_string());
    for (i, cycle) in stats.cycles.iter().enumerate() {
      self.detail(format!("Cycle {}", i + 1), cycle.join(" -> "));
    }
  }

  fn log_writing(&self) {
    let target = self
      .config
      .output
      .as_ref()
      .map_or_else(|| "stdout".to_string(), |path| path.display().to_string());
    self.info(
      &format!("Writing to: {target}")
        .with(self.colors.get(Role::Primary))
        .to_string(),
    );
  }

  fn log_success(&self, definition: &Definition) {
    if !self.config.quiet {
      let message = if definition.module_name.is_empty() {
        "Successfully extracted RPC definition".to_string()
      } else {
        format!("Successfully extracted RPC definition for {}", definition.module_name)
      };
      eprintln!();
      eprintln!(
        "{} {}",
        format_timestamp().with(self.colors.get(Role::Timestamp)),
        message.with(self.colors.get(Role::Success))
      );
    }
  }
}

pub async fn extract_definition(config: ExtractCommandConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = ExtractLogger::new(&config, colors);

  logger.log_loading();
  let modules = config.load_modules().await?;
  logger.log_loaded(&modules);

  logger.log_extracting();
  let (definition, stats) = Orchestrator::new(&modules, config.extract.clone())
    .extract()
    .context("failed to extract RPC definition")?;
  logger.print_statistics(&stats);

  logger.log_writing();
  let json = config.render(&definition)?;
  config.write_output(json).await?;
  logger.log_success(&definition);

  Ok(())
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rpcdef::extractor::PruneMode;

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "rpcdef")]
#[command(
  author,
  version,
  about = "Extracts RPC definitions from Rust service traits",
  styles = Colors::clap_styles()
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from Rust sources
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Extract the RPC definition as JSON
  Extract(ExtractCommand),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractCommand {
  /// Rust source files or directories holding the service traits
  #[arg(required = true, value_name = "PATHS")]
  pub patterns: Vec<PathBuf>,

  /// Write the definition to FILE instead of stdout
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Services to leave out of the definition (comma-separated trait names)
  #[arg(long, value_name = "SERVICES", value_delimiter = ',')]
  pub exclude: Vec<String>,

  /// How the objects of excluded services are removed
  #[arg(long, value_enum, default_value = "reachability")]
  pub prune: PruneArg,

  /// Extra files or directories that only resolve types, never contribute services
  #[arg(long, value_name = "PATH")]
  pub include: Vec<PathBuf>,

  /// Write JSON on a single line
  #[arg(long, default_value_t = false)]
  pub compact: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PruneArg {
  /// Drop every request and response of an excluded service
  Identity,
  /// Keep objects a retained service still reaches
  #[default]
  Reachability,
}

impl From<PruneArg> for PruneMode {
  fn from(value: PruneArg) -> Self {
    match value {
      PruneArg::Identity => Self::Identity,
      PruneArg::Reachability => Self::Reachability,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every service method with its request and response
  Services(ListServicesCommand),
}

#[derive(Args, Debug, Clone)]
pub struct ListServicesCommand {
  /// Rust source files or directories holding the service traits
  #[arg(required = true, value_name = "PATHS")]
  pub patterns: Vec<PathBuf>,

  /// Extra files or directories that only resolve types
  #[arg(long, value_name = "PATH")]
  pub include: Vec<PathBuf>,
}

//! Extraction of an RPC [`Definition`](rpcdef_support::Definition) from loaded modules.
//!
//! Public traits become services, public structs become objects. The walk is a single
//! synchronous pass over an immutable [`ModuleSet`](crate::source::ModuleSet); all of
//! its mutable state lives in one `SchemaWalker` value.

pub mod config;
pub(crate) mod documentation;
pub mod error;
pub mod metadata;
pub(crate) mod naming;
mod objects;
pub mod orchestrator;
mod pruning;
mod services;
pub mod stats;
pub(crate) mod type_resolver;
pub(crate) mod walker;

#[cfg(test)]
mod tests;

pub use config::{ExtractConfig, PruneMode};
pub use error::{ExtractError, ExtractResult};
pub use metadata::TagError;
pub use orchestrator::Orchestrator;
pub use stats::ExtractStats;

pub(crate) const ERROR_FIELD_NAME: &str = "Error";
pub(crate) const ERROR_FIELD_NAME_LOWER_CAMEL: &str = "error";
pub(crate) const ERROR_FIELD_COMMENT: &str = "Error is string explaining what went wrong. Empty if everything was fine.";
pub(crate) const JSON_TAG_KEY: &str = "json";
pub(crate) const OMIT_EMPTY_OPTION: &str = "omitempty";

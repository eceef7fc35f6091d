#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
//! Extracts a language-agnostic RPC definition from Rust sources.
//!
//! Public traits become services, their methods become RPC methods, and every public
//! struct reachable from them becomes an object. [`source`] loads the files into a
//! [`source::ModuleSet`] and [`extractor`] turns that set into a
//! [`rpcdef_support::Definition`].

pub mod extractor;
pub mod source;

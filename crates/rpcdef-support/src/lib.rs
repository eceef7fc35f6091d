//! Serializable RPC definition model.
//!
//! A [`Definition`] is the hand-off between `rpcdef` and whatever generator renders
//! client stubs, server scaffolding or documentation from it. Everything here is plain
//! data: serde round-trips it as camelCase JSON so generators written in other
//! languages can consume it without this crate.

mod definition;
mod value_kind;

pub use definition::{Definition, Field, FieldTag, FieldType, Method, Object, Service};
pub use value_kind::ValueKind;

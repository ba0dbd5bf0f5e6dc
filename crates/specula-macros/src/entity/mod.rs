//! Implementation of the `#[derive(Entity)]` macro.
//!
//! Generates the `Entity` field accessor, field-name constants and typed
//! relation constants from struct annotations.

mod attrs;
mod derive;

pub use derive::entity_derive_impl;

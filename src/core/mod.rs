//! Core models — the bag ledger, pointer-reactive transforms, scroll
//! progress and the static catalog.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every model
//! is a plain value owned by the surface that uses it.

pub mod cart;
pub mod catalog;
pub mod motion;
pub mod pointer;
pub mod scroll;

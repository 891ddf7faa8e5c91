// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_store_slicer
//!
//! Carve an [`r3bl_redux::Store`] up into slices. A slice ([`StoreSlicer`]) owns one
//! nested field of the state tree, addressed by a path string like
//! `todos.items[0].title` ([`Selector`]). It is updated by dispatching plain `T -> T`
//! functions, so no reducer code has to be written for it.
//!
//! The moving parts:
//!
//! 1. [`Selector`] parses paths, and [`get_at_path`] / [`set_at_path`] read and write the
//!    JSON form of the state with them.
//! 2. [`GenericAction`] carries the update function and the selector. Its type tag is
//!    `GENERIC_<name>`, see [`create_valid_type_name`].
//! 3. [`wrap_reducer`] (or [`generic_reducer`]) applies generic actions to their slice
//!    and hands everything else to your reducer.
//! 4. [`StoreConnector`] links slices to the store. Slices can be created and can
//!    dispatch before the store exists. Their actions are queued and flushed, in order,
//!    when the store is connected.
//!
//! The state type `S` only has to round trip through [`serde_json::Value`], so a typed
//! struct works as well as a raw [`serde_json::Value`]. The action type `A` has to
//! implement [`From<GenericAction>`] and [`GenericActionCarrier`].
//!
//! Log output goes through [`tracing`], use `r3bl_log` to see it.

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod action;
pub mod path;
pub mod reducer;
pub mod slice;
pub mod slicer_error;

// Re-export.
pub use action::*;
pub use path::*;
pub use reducer::*;
pub use slice::*;
pub use slicer_error::*;

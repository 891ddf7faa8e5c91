// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_redux
//!
//! Thread safe and async Redux store built using [`tokio`]. The [`Store`] holds the
//! application state, and runs the following in response to every dispatched action:
//!
//! 1. Middlewares ([`AsyncMiddleware`]) run concurrently. Each one may return a follow up
//!    action, which is reduced right away.
//! 2. Reducers ([`AsyncReducer`]) run in sequence, each one receiving the state produced
//!    by the previous one.
//! 3. Subscribers ([`AsyncSubscriber`]) run concurrently, but only if the state actually
//!    changed.
//!
//! ```no_run
//! use r3bl_redux::{ReducerFnWrapper, Store};
//!
//! # async fn example() {
//! let mut store = Store::<i32, i32>::default();
//! store.add_reducer(ReducerFnWrapper::new_item(|state: &i32, action: &i32| state + action));
//! store.dispatch_action(2).await;
//! assert_eq!(store.get_state(), 2);
//! # }
//! ```

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod redux;

// Re-export.
pub use redux::*;

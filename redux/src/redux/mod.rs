// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod async_middleware;
pub mod async_reducer;
pub mod async_subscriber;
pub mod reducer_fn_wrapper;
pub mod store;

// Re-export.
pub use async_middleware::*;
pub use async_reducer::*;
pub use async_subscriber::*;
pub use reducer_fn_wrapper::*;
pub use store::*;

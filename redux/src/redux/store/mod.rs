// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod async_store;

// Re-export.
pub use async_store::*;

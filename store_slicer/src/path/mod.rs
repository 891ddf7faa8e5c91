// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod selector;
pub mod state_path;

// Re-export.
pub use selector::*;
pub use state_path::*;

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod generic_reducer;

// Re-export.
pub use generic_reducer::*;

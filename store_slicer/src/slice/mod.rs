// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod slicer_config;
pub mod store_connector;
pub mod store_slicer;

// Re-export.
pub use slicer_config::*;
pub use store_connector::*;
pub use store_slicer::*;

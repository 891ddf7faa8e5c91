// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_log
//!
//! Configure and install [`tracing`] subscribers, so that the `tracing::debug!` etc.
//! events emitted by the store and the store slicer end up on `stdout`, `stderr`, a log
//! file, or a display and a file at the same time.
//!
//! Logging is **DISABLED** by **default**. Call [`try_initialize_logging_global`] (for
//! apps) or [`try_initialize_logging_thread_local`] (for tests) to turn it on. Both take
//! anything that converts [`Into<TracingConfig>`].
//!
//! ```no_run
//! use r3bl_log::{DisplayPreference, TracingConfig, WriterConfig,
//!                try_initialize_logging_global};
//!
//! let config: TracingConfig = tracing::Level::DEBUG.into();
//! let config = config + DisplayPreference::Stderr.into();
//! try_initialize_logging_global(config).unwrap();
//! ```

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod log_support;

// Re-export.
pub use log_support::*;

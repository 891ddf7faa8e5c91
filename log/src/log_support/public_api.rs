// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use tracing::dispatcher;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{TracingConfig, try_create_layers};

/// Global default subscriber, which once set, can't be unset or changed.
/// - This is great for apps.
/// - Docs for [Global default tracing
///   subscriber](https://docs.rs/tracing/latest/tracing/subscriber/fn.set_global_default.html)
///
/// Logging is **DISABLED** by **default**. If you don't call this function w/ a level
/// other than [`tracing_core::LevelFilter::OFF`], then logging won't be enabled.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been installed.
pub fn try_initialize_logging_global(
    options: impl Into<TracingConfig>,
) -> miette::Result<()> {
    let it: TracingConfig = options.into();

    // Early return if the level filter is off.
    if matches!(it.get_level_filter(), tracing_core::LevelFilter::OFF) {
        return Ok(());
    }

    let layers = try_create_layers(&it)?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .into_diagnostic()
}

/// Thread local subscriber, which is thread local, and you can assign different ones
/// to different threads.
/// - This is great for tests.
/// - Docs for [Thread local tracing
///   subscriber](https://docs.rs/tracing/latest/tracing/subscriber/fn.set_default.html)
///
/// Logging is **DISABLED** by **default**. The subscriber stays installed for as long
/// as the returned guard is alive.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_initialize_logging_thread_local(
    options: impl Into<TracingConfig>,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let it: TracingConfig = options.into();

    // Early return if the level filter is off.
    if matches!(it.get_level_filter(), tracing_core::LevelFilter::OFF) {
        return Ok(None);
    }

    let layers = try_create_layers(&it)?;
    let subscriber = tracing_subscriber::registry().with(layers);
    Ok(Some(tracing::subscriber::set_default(subscriber)))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::DisplayPreference;

    #[test]
    #[serial]
    fn test_off_does_not_install_anything() {
        let config = TracingConfig::default();
        let guard = try_initialize_logging_thread_local(config).unwrap();
        assert!(guard.is_none());
        assert!(try_initialize_logging_global(TracingConfig::default()).is_ok());
    }

    #[test]
    #[serial]
    fn test_thread_local_display() {
        let guard = try_initialize_logging_thread_local(DisplayPreference::Stderr).unwrap();
        assert!(guard.is_some());
        tracing::debug!(message = "visible while the guard is alive");
        drop(guard);
    }
}

// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use tracing_appender::rolling::RollingFileAppender;

/// Open the log file at `path_str` for appending. The file never rolls over.
///
/// Note that if you wrap this up in a non blocking writer, as shown below, it doesn't
/// work:
///
/// ```ignore
/// tracing_appender::non_blocking(try_create("foo")?);
/// ```
///
/// # Errors
///
/// Returns an error if `path_str` has no file name (eg: `/` or `..`).
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = Path::new(path_str);

    let Some(file_name) = path.file_name() else {
        miette::bail!("Log file path '{}' does not end in a file name", path_str);
    };

    // A bare file name has an empty parent, which is the current folder.
    let folder = path.parent().unwrap_or_else(|| Path::new(""));

    Ok(tracing_appender::rolling::never(folder, file_name))
}

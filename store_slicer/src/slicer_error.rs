// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Convenience type alias for results in this crate.
pub type SlicerResult<T> = Result<T, SlicerError>;

/// Every way the store slicer can fail. All of them are [`miette::Diagnostic`]s, so `?`
/// turns them into a [`miette::Report`] in code that returns [`miette::Result`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SlicerError {
    #[error("🧭 Invalid selector '{selector}': {reason}")]
    #[diagnostic(
        code(r3bl_store_slicer::invalid_selector),
        help("Use dot separated keys and bracket indexes, eg: `todos.items[0].title`")
    )]
    InvalidSelector {
        selector: String,
        reason: &'static str,
    },

    #[error("🧱 Can't use key '{segment}' of selector '{selector}' on an array")]
    #[diagnostic(
        code(r3bl_store_slicer::path_conflict),
        help("Arrays can only be addressed with numeric segments, eg: `items[2]`")
    )]
    PathConflict { selector: String, segment: String },

    #[error("📏 Index {index} of selector '{selector}' is too far past the end of an array of {len}")]
    #[diagnostic(
        code(r3bl_store_slicer::index_out_of_range),
        help("At most `MAX_ARRAY_PADDING` null elements are inserted to reach an index")
    )]
    IndexOutOfRange {
        selector: String,
        index: usize,
        len: usize,
    },

    #[error("📤 Could not serialize the state tree")]
    #[diagnostic(code(r3bl_store_slicer::serialize_state))]
    SerializeState(#[source] serde_json::Error),

    #[error("📥 Could not deserialize the state tree after updating '{selector}'")]
    #[diagnostic(
        code(r3bl_store_slicer::deserialize_state),
        help("The value returned for this slice does not fit the shape of the state")
    )]
    DeserializeState {
        selector: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("🔪 Could not convert slice '{selector}'")]
    #[diagnostic(
        code(r3bl_store_slicer::convert_slice),
        help("The value at this selector does not match the slice's type")
    )]
    ConvertSlice {
        selector: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("⏳ Pending action queue is full ({limit} actions), connect a store first")]
    #[diagnostic(
        code(r3bl_store_slicer::pending_queue_full),
        help("Raise `SlicerConfig::pending_limit` or connect the store earlier")
    )]
    PendingQueueFull { limit: usize },
}
